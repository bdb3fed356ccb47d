pub mod app;
pub mod event;
pub mod input;
pub mod surface;
pub mod theme;
pub mod widgets;

pub use app::{App, Screen};
pub use surface::{Segment, TextRegion};
pub use theme::{load_theme, Theme};
