pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod playback;
pub mod surface;
pub mod tile;

pub use clock::{Keyframes, LoopClock};
pub use config::{AppConfig, ClockStrategy, Direction, MarqueeConfig, MarqueeConfigPatch};
pub use engine::{Marquee, MarqueeId, Snapshot};
pub use error::{Error, Result};
pub use metrics::MetricsProvider;
pub use playback::{PlaybackController, PlaybackState};
pub use surface::{ListenerId, ListenerKind, RenderSurface};
pub use tile::{Spaced, Tile, TileSet};
