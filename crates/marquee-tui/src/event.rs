use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use marquee_core::ListenerKind;
use ratatui::layout::{Position, Rect};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    frame_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self::with_animation_fps(tick_rate_ms, 60)
    }

    pub fn with_animation_fps(tick_rate_ms: u64, fps: u32) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms.max(1)),
            frame_rate: frame_duration(fps),
        }
    }

    /// Poll at the idle tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll at the animation frame rate, used while the marquee moves
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.frame_rate)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            Ok(translate(event::read()?))
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

fn translate(event: Event) -> Option<AppEvent> {
    match event {
        // Only handle key press events, ignore release events
        // (crossterm 0.27+ sends release events on some systems)
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved | MouseEventKind::Drag(_),
            column,
            row,
            ..
        }) => Some(AppEvent::PointerMoved(column, row)),
        Event::FocusLost => Some(AppEvent::PointerLeft),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

/// Frame interval for `fps`, never faster than 1ms
pub fn frame_duration(fps: u32) -> Duration {
    Duration::from_micros(1_000_000 / u64::from(fps.max(1))).max(Duration::from_millis(1))
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse moved to (column, row)
    PointerMoved(u16, u16),
    /// Terminal lost focus; the pointer is no longer over anything
    PointerLeft,
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}

/// Turns raw mouse positions into enter/leave crossings of one region
#[derive(Debug, Default)]
pub struct HoverTracker {
    inside: bool,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Report a pointer position; returns the crossing it caused, if any
    pub fn moved(&mut self, area: Option<Rect>, column: u16, row: u16) -> Option<ListenerKind> {
        let inside = area.is_some_and(|area| area.contains(Position::new(column, row)));
        self.update(inside)
    }

    /// The pointer left the terminal altogether
    pub fn left(&mut self) -> Option<ListenerKind> {
        self.update(false)
    }

    fn update(&mut self, inside: bool) -> Option<ListenerKind> {
        if inside == self.inside {
            return None;
        }
        self.inside = inside;
        Some(if inside {
            ListenerKind::PointerEnter
        } else {
            ListenerKind::PointerLeave
        })
    }
}
