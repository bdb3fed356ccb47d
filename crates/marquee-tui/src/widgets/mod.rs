mod marquee;
mod status_bar;

pub use marquee::{MarqueeView, MarqueeWidget};
pub use status_bar::StatusBarWidget;
