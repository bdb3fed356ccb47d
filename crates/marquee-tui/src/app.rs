use std::time::{Duration, Instant};

use marquee_core::config::MIN_RATE;
use marquee_core::{AppConfig, ListenerKind, Marquee, MarqueeConfigPatch, PlaybackState};
use ratatui::layout::{Constraint, Direction as LayoutDirection, Layout, Rect};
use ratatui::widgets::Block;
use tracing::{debug, warn};

use crate::event::HoverTracker;
use crate::input::Action;
use crate::surface::{Segment, TextRegion};
use crate::theme::Theme;

/// Rate change per key press, in columns per second
const RATE_STEP: f64 = 10.0;
/// Gap change per key press, in columns
const GAP_STEP: f64 = 1.0;
/// Height of the framed band holding the marquee row
const BAND_HEIGHT: u16 = 3;
/// How long a status message stays up
const STATUS_TTL: Duration = Duration::from_secs(2);

/// Where each part of the screen goes for a given terminal size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    /// Framed band around the marquee
    pub band: Rect,
    /// The marquee row itself, inside the band's border
    pub region: Rect,
    pub status: Option<Rect>,
}

impl Screen {
    pub fn compute(area: Rect, show_status: bool) -> Self {
        let (body, status) = if show_status && area.height > 1 {
            let rows = Layout::default()
                .direction(LayoutDirection::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(area);
            (rows[0], Some(rows[1]))
        } else {
            (area, None)
        };

        let rows = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(BAND_HEIGHT),
                Constraint::Min(0),
            ])
            .split(body);
        let band = rows[1];

        Self {
            band,
            region: Block::bordered().inner(band),
            status,
        }
    }
}

/// Application state
pub struct App {
    pub marquee: Marquee<Segment, TextRegion>,
    pub config: AppConfig,
    pub theme: Theme,
    pub hover: HoverTracker,
    pub screen: Option<Screen>,
    pub status_message: Option<String>,
    status_since: Option<Instant>,
    pub should_quit: bool,
}

impl App {
    pub fn new(region: TextRegion, config: AppConfig, theme: Theme) -> Self {
        Self {
            marquee: Marquee::new(region),
            config,
            theme,
            hover: HoverTracker::new(),
            screen: None,
            status_message: None,
            status_since: None,
            should_quit: false,
        }
    }

    /// Tile the region with the configured marquee settings.
    ///
    /// Call [`App::resize`] first so the region has somewhere to live.
    pub fn activate(&mut self) -> marquee_core::Result<()> {
        self.marquee.activate(self.config.marquee.clone())
    }

    /// Lay the screen out for a terminal of `area` and tell the engine
    pub fn resize(&mut self, area: Rect) {
        let screen = Screen::compute(area, self.config.ui.show_status);
        self.screen = Some(screen);
        self.marquee.surface_mut().set_area(screen.region);
        debug!(region = ?screen.region, "marquee region placed");
        self.dispatch(ListenerKind::Geometry);
    }

    pub fn pointer_moved(&mut self, column: u16, row: u16) {
        let area = self.marquee.surface().area();
        if let Some(kind) = self.hover.moved(area, column, row) {
            self.dispatch(kind);
        }
    }

    pub fn pointer_left(&mut self) {
        if let Some(kind) = self.hover.left() {
            self.dispatch(kind);
        }
    }

    /// Route a host event to every listener of `kind` the engine installed
    fn dispatch(&mut self, kind: ListenerKind) {
        for id in self.marquee.surface().listeners_for(kind) {
            self.marquee.notify(id);
        }
    }

    /// Advance the marquee to `now`
    pub fn update(&mut self, now: Instant) {
        self.marquee.tick(now);
        if self
            .status_since
            .is_some_and(|since| now.saturating_duration_since(since) >= STATUS_TTL)
        {
            self.clear_status();
        }
    }

    /// Whether frames should be drawn at the animation rate
    pub fn is_animating(&self) -> bool {
        self.marquee.state() == PlaybackState::Running && self.marquee.tile_distance().is_some()
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::TogglePause => {
                self.marquee.toggle();
                let label = self.marquee.state().label();
                self.set_status(label);
            }
            Action::StartStop => {
                if self.marquee.state() == PlaybackState::Stopped {
                    self.marquee.start();
                } else {
                    self.marquee.stop();
                }
                let label = self.marquee.state().label();
                self.set_status(label);
            }
            Action::Reverse => {
                let Some(config) = self.marquee.config() else {
                    return;
                };
                let direction = config.direction.flipped();
                self.marquee
                    .update_config(&MarqueeConfigPatch::direction(direction));
                self.set_status(format!("direction: {:?}", direction).to_lowercase());
            }
            Action::RateUp | Action::RateDown => {
                let Some(config) = self.marquee.config() else {
                    return;
                };
                let step = if action == Action::RateUp { RATE_STEP } else { -RATE_STEP };
                let rate = (config.rate + step).max(MIN_RATE);
                self.marquee.update_config(&MarqueeConfigPatch::rate(rate));
                self.set_status(format!("rate: {}/s", rate));
            }
            Action::GapUp | Action::GapDown => {
                let Some(config) = self.marquee.config() else {
                    return;
                };
                let step = if action == Action::GapUp { GAP_STEP } else { -GAP_STEP };
                let gap = (config.gap + step).max(0.0);
                self.marquee.update_config(&MarqueeConfigPatch::gap(gap));
                self.set_status(format!("gap: {}", gap));
            }
            Action::ToggleHoverPause => {
                let Some(config) = self.marquee.config() else {
                    return;
                };
                let enabled = !config.pause_on_interaction;
                self.marquee
                    .update_config(&MarqueeConfigPatch::pause_on_interaction(enabled));
                self.set_status(if enabled {
                    "pause on hover: on"
                } else {
                    "pause on hover: off"
                });
            }
            Action::None => {}
        }
    }

    /// Tear the marquee down, restoring the region's content
    pub fn shutdown(&mut self) {
        if self.marquee.is_active() {
            self.marquee.deactivate();
        } else {
            warn!("shutdown without an active marquee");
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_since = Some(Instant::now());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.status_since = None;
    }
}
