//! Lifecycle manager: ties tiles, metrics, clock and playback to one region.
//!
//! Call [`Marquee::activate`] once the region has content, feed
//! [`Marquee::tick`] from the host's frame source, route listener callbacks
//! through [`Marquee::notify`], and [`Marquee::deactivate`] to put the region
//! back the way it was.

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::clock::{FrameTimer, Keyframes, LoopClock};
use crate::config::{Direction, MarqueeConfig, MarqueeConfigPatch};
use crate::metrics::usable_distance;
use crate::playback::{PlaybackController, PlaybackState};
use crate::surface::{ListenerId, ListenerKind, RenderSurface};
use crate::tile::TileSet;
use crate::{Error, Result};

/// Per-instance identifier, used for log correlation only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarqueeId(Uuid);

impl MarqueeId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for MarqueeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Point-in-time view of a marquee for status lines and simulations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub state: PlaybackState,
    pub offset: f64,
    pub tile_distance: Option<f64>,
    pub rate: f64,
    pub gap: f64,
    pub direction: Direction,
    pub hovered: bool,
}

/// Everything that only exists while the marquee is active
#[derive(Debug)]
struct Session<T> {
    config: MarqueeConfig,
    tiles: TileSet<T>,
    clock: LoopClock,
    playback: PlaybackController,
    timer: FrameTimer,
    listeners: Vec<(ListenerId, ListenerKind)>,
}

impl<T> Session<T> {
    fn remeasure<S: RenderSurface<T>>(&mut self, surface: &S, id: MarqueeId) {
        let measured = surface.measure(&self.tiles);
        let distance = usable_distance(measured);
        if distance.is_none() {
            debug!(marquee = %id, measured, "degenerate geometry, motion suspended");
        }
        self.clock.set_distance(distance);
    }

    fn install<S: RenderSurface<T>>(&mut self, surface: &mut S, id: MarqueeId, kind: ListenerKind) {
        let listener = surface.add_listener(kind);
        debug!(marquee = %id, %listener, ?kind, "listener installed");
        self.listeners.push((listener, kind));
    }

    fn uninstall<S: RenderSurface<T>>(&mut self, surface: &mut S, id: MarqueeId, kind: ListenerKind) {
        self.listeners.retain(|(listener, installed)| {
            if *installed == kind {
                surface.remove_listener(*listener);
                debug!(marquee = %id, %listener, ?kind, "listener removed");
                false
            } else {
                true
            }
        });
    }

    fn kind_of(&self, listener: ListenerId) -> Option<ListenerKind> {
        self.listeners
            .iter()
            .find(|(installed, _)| *installed == listener)
            .map(|(_, kind)| *kind)
    }
}

/// A seamless horizontal marquee bound to one render surface
pub struct Marquee<T, S>
where
    S: RenderSurface<T>,
{
    id: MarqueeId,
    surface: S,
    session: Option<Session<T>>,
}

impl<T, S> Marquee<T, S>
where
    T: Clone,
    S: RenderSurface<T>,
{
    pub fn new(surface: S) -> Self {
        Self {
            id: MarqueeId::new(),
            surface,
            session: None,
        }
    }

    pub fn id(&self) -> MarqueeId {
        self.id
    }

    /// Tile the region's content and get ready to move.
    ///
    /// Fails without touching the region when it is unavailable. Activating
    /// an active marquee is a no-op.
    pub fn activate(&mut self, config: MarqueeConfig) -> Result<()> {
        if self.session.is_some() {
            debug!(marquee = %self.id, "already active, ignoring activate");
            return Ok(());
        }
        if !self.surface.is_available() {
            return Err(Error::RegionUnavailable(format!(
                "marquee {} has no region to run in",
                self.id
            )));
        }

        let config = config.sanitized();
        let content = self.surface.take_content();
        let tiles = TileSet::build(content, config.gap);
        self.surface.mount(&tiles);

        let mut session = Session {
            clock: LoopClock::new(&config),
            playback: PlaybackController::new(config.pause_on_interaction),
            timer: FrameTimer::new(),
            listeners: Vec::new(),
            tiles,
            config,
        };
        session.remeasure(&self.surface, self.id);

        session.install(&mut self.surface, self.id, ListenerKind::Geometry);
        if session.config.pause_on_interaction {
            session.install(&mut self.surface, self.id, ListenerKind::PointerEnter);
            session.install(&mut self.surface, self.id, ListenerKind::PointerLeave);
        }

        if session.config.auto_start {
            session.playback.start();
        }

        info!(
            marquee = %self.id,
            rate = session.config.rate,
            gap = session.config.gap,
            direction = ?session.config.direction,
            strategy = ?session.config.strategy,
            distance = ?session.clock.distance(),
            "marquee activated"
        );
        self.session = Some(session);
        Ok(())
    }

    /// Remove tiling, listeners and translation. Safe to call repeatedly.
    pub fn deactivate(&mut self) {
        let Some(session) = self.session.take() else {
            debug!(marquee = %self.id, "not active, ignoring deactivate");
            return;
        };

        for (listener, kind) in &session.listeners {
            self.surface.remove_listener(*listener);
            debug!(marquee = %self.id, %listener, ?kind, "listener removed");
        }
        self.surface.clear_translation();
        self.surface.restore(session.tiles.into_source());

        info!(marquee = %self.id, "marquee deactivated");
    }

    /// Advance one frame at `now`.
    ///
    /// Returns the offset written to the surface, or `None` when nothing was
    /// written (inactive, not running, or static geometry).
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        let session = self.session.as_mut()?;
        if !session.playback.is_running() {
            session.timer.reset();
            return None;
        }

        if session.clock.distance().is_none() {
            session.timer.reset();
            return None;
        }
        let elapsed = session.timer.elapsed(now);
        let offset = session.clock.advance(elapsed);
        self.surface.set_translation(offset);
        Some(offset)
    }

    /// Advance by an explicit delta, for hosts with their own frame clock
    pub fn tick_by(&mut self, elapsed: Duration) -> Option<f64> {
        let session = self.session.as_mut()?;
        if !session.playback.is_running() {
            return None;
        }
        session.clock.distance()?;
        let offset = session.clock.advance(elapsed);
        self.surface.set_translation(offset);
        Some(offset)
    }

    pub fn start(&mut self) {
        self.with_playback("start", PlaybackController::start);
    }

    pub fn pause(&mut self) {
        self.with_playback("pause", PlaybackController::pause);
    }

    pub fn resume(&mut self) {
        self.with_playback("resume", PlaybackController::resume);
    }

    pub fn stop(&mut self) {
        self.with_playback("stop", PlaybackController::stop);
    }

    /// Pause when running, resume when paused, start when stopped
    pub fn toggle(&mut self) {
        match self.state() {
            PlaybackState::Running => self.pause(),
            PlaybackState::Paused => self.resume(),
            PlaybackState::Stopped => self.start(),
        }
    }

    fn with_playback(&mut self, action: &str, transition: fn(&mut PlaybackController) -> bool) {
        let Some(session) = self.session.as_mut() else {
            debug!(marquee = %self.id, action, "not active, ignoring");
            return;
        };
        if transition(&mut session.playback) {
            session.timer.reset();
            debug!(marquee = %self.id, action, state = ?session.playback.state(), "playback changed");
        }
    }

    /// Replace part of the configuration without rebuilding tiles or
    /// resetting the offset.
    pub fn update_config(&mut self, patch: &MarqueeConfigPatch) {
        let Some(session) = self.session.as_mut() else {
            debug!(marquee = %self.id, "not active, ignoring config update");
            return;
        };

        let previous = session.config.clone();
        let next = previous.merged(patch);

        if next.rate != previous.rate {
            session.clock.set_rate(next.rate);
        }
        if next.direction != previous.direction {
            session.clock.set_direction(next.direction);
        }
        if next.max_frame_ms != previous.max_frame_ms {
            session
                .clock
                .set_max_frame(Duration::from_millis(next.max_frame_ms));
        }
        if next.gap != previous.gap {
            session.tiles.set_gap(next.gap);
            self.surface.mount(&session.tiles);
            session.remeasure(&self.surface, self.id);
        }
        if next.pause_on_interaction != previous.pause_on_interaction {
            if next.pause_on_interaction {
                session.install(&mut self.surface, self.id, ListenerKind::PointerEnter);
                session.install(&mut self.surface, self.id, ListenerKind::PointerLeave);
            } else {
                let hover_paused = session.playback.is_hovered()
                    && session.playback.state() == PlaybackState::Paused;
                session.uninstall(&mut self.surface, self.id, ListenerKind::PointerEnter);
                session.uninstall(&mut self.surface, self.id, ListenerKind::PointerLeave);
                if hover_paused && session.playback.resume() {
                    session.timer.reset();
                }
            }
            session
                .playback
                .set_pause_on_interaction(next.pause_on_interaction);
        }

        debug!(marquee = %self.id, ?next, "config updated");
        session.config = next;
    }

    /// Host signalled a resize or reflow; takes effect from the next tick
    pub fn geometry_changed(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.remeasure(&self.surface, self.id);
    }

    /// Deliver a host event for a listener this marquee installed.
    ///
    /// Ids it did not install, or already removed, are ignored.
    pub fn notify(&mut self, listener: ListenerId) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(kind) = session.kind_of(listener) else {
            debug!(marquee = %self.id, %listener, "event for unknown listener");
            return;
        };

        match kind {
            ListenerKind::PointerEnter => {
                if session.playback.pointer_enter() {
                    session.timer.reset();
                }
            }
            ListenerKind::PointerLeave => {
                if session.playback.pointer_leave() {
                    session.timer.reset();
                }
            }
            ListenerKind::Geometry => session.remeasure(&self.surface, self.id),
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn state(&self) -> PlaybackState {
        self.session
            .as_ref()
            .map(|s| s.playback.state())
            .unwrap_or(PlaybackState::Stopped)
    }

    pub fn offset(&self) -> f64 {
        self.session.as_ref().map(|s| s.clock.offset()).unwrap_or(0.0)
    }

    /// Current wrap period; `None` while inactive or static
    pub fn tile_distance(&self) -> Option<f64> {
        self.session.as_ref().and_then(|s| s.clock.distance())
    }

    pub fn config(&self) -> Option<&MarqueeConfig> {
        self.session.as_ref().map(|s| &s.config)
    }

    pub fn tiles(&self) -> Option<&TileSet<T>> {
        self.session.as_ref().map(|s| &s.tiles)
    }

    pub fn keyframes(&self) -> Option<Keyframes> {
        self.session.as_ref().and_then(|s| s.clock.keyframes())
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        let session = self.session.as_ref()?;
        Some(Snapshot {
            state: session.playback.state(),
            offset: session.clock.offset(),
            tile_distance: session.clock.distance(),
            rate: session.config.rate,
            gap: session.config.gap,
            direction: session.config.direction,
            hovered: session.playback.is_hovered(),
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for host-side changes such as resizing.
    ///
    /// Follow geometry-affecting edits with [`Marquee::geometry_changed`].
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Deactivate and hand the surface back
    pub fn into_surface(mut self) -> S {
        self.deactivate();
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClockStrategy;
    use crate::metrics::MetricsProvider;
    use crate::tile::measure_with;

    /// Items are their own widths
    #[derive(Debug, Default)]
    struct MockSurface {
        available: bool,
        content: Vec<f64>,
        mounted: Option<TileSet<f64>>,
        translation: Option<f64>,
        translation_writes: usize,
        listeners: Vec<(ListenerId, ListenerKind)>,
        removed: Vec<ListenerId>,
        /// Overrides measurement when set
        forced_width: Option<f64>,
    }

    impl MockSurface {
        fn with_content(content: Vec<f64>) -> Self {
            Self {
                available: true,
                content,
                ..Default::default()
            }
        }

        fn listener(&self, kind: ListenerKind) -> ListenerId {
            self.listeners
                .iter()
                .find(|(_, k)| *k == kind)
                .map(|(id, _)| *id)
                .unwrap()
        }
    }

    impl MetricsProvider<f64> for MockSurface {
        fn measure(&self, tiles: &TileSet<f64>) -> f64 {
            match self.forced_width {
                Some(width) => width + tiles.gap(),
                None => measure_with(tiles, |w| *w),
            }
        }
    }

    impl RenderSurface<f64> for MockSurface {
        fn is_available(&self) -> bool {
            self.available
        }

        fn take_content(&mut self) -> Vec<f64> {
            std::mem::take(&mut self.content)
        }

        fn mount(&mut self, tiles: &TileSet<f64>) {
            self.mounted = Some(tiles.clone());
        }

        fn set_translation(&mut self, offset: f64) {
            self.translation = Some(offset);
            self.translation_writes += 1;
        }

        fn clear_translation(&mut self) {
            self.translation = None;
        }

        fn restore(&mut self, content: Vec<f64>) {
            self.mounted = None;
            self.content = content;
        }

        fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
            let id = ListenerId::new();
            self.listeners.push((id, kind));
            id
        }

        fn remove_listener(&mut self, id: ListenerId) {
            self.listeners.retain(|(installed, _)| *installed != id);
            self.removed.push(id);
        }
    }

    fn scenario_config(strategy: ClockStrategy) -> MarqueeConfig {
        MarqueeConfig {
            rate: 100.0,
            gap: 20.0,
            direction: Direction::Forward,
            pause_on_interaction: true,
            auto_start: true,
            strategy,
            max_frame_ms: 250,
        }
    }

    fn active(strategy: ClockStrategy) -> Marquee<f64, MockSurface> {
        let mut marquee = Marquee::new(MockSurface::with_content(vec![500.0]));
        marquee.activate(scenario_config(strategy)).unwrap();
        marquee
    }

    /// Tick every 100ms starting at `start`; the first tick only seeds
    fn run(marquee: &mut Marquee<f64, MockSurface>, start: Instant, frames: u32) -> Instant {
        let mut now = start;
        marquee.tick(now);
        for _ in 0..frames {
            now += Duration::from_millis(100);
            marquee.tick(now);
        }
        now
    }

    /// Smallest signed difference between two offsets modulo the period
    fn phase_delta(from: f64, to: f64, period: f64) -> f64 {
        let d = (to - from).rem_euclid(period);
        if d > period / 2.0 {
            d - period
        } else {
            d
        }
    }

    #[test]
    fn test_activate_tiles_and_measures() {
        let marquee = active(ClockStrategy::Stepped);
        assert!(marquee.is_active());
        assert_eq!(marquee.state(), PlaybackState::Running);
        assert_eq!(marquee.tile_distance(), Some(520.0));

        let mounted = marquee.surface().mounted.as_ref().unwrap();
        assert!(!mounted.source().is_duplicate());
        assert!(mounted.duplicate().is_duplicate());
        // geometry + enter + leave
        assert_eq!(marquee.surface().listeners.len(), 3);
    }

    #[test]
    fn test_one_full_loop_in_5_2_seconds() {
        for strategy in [ClockStrategy::Stepped, ClockStrategy::Keyframed] {
            let mut marquee = active(strategy);
            run(&mut marquee, Instant::now(), 52);
            let offset = marquee.offset();
            assert!(
                phase_delta(0.0, offset, 520.0).abs() < 1e-6,
                "{strategy:?} ended at {offset}"
            );
        }
        let mut stepped = active(ClockStrategy::Stepped);
        run(&mut stepped, Instant::now(), 52);
        assert_eq!(stepped.offset(), 0.0);
    }

    #[test]
    fn test_offset_stays_within_distance() {
        for strategy in [ClockStrategy::Stepped, ClockStrategy::Keyframed] {
            for direction in [Direction::Forward, Direction::Reverse] {
                let mut marquee = active(strategy);
                marquee.update_config(&MarqueeConfigPatch::direction(direction));
                let start = Instant::now();
                marquee.tick(start);
                for i in 1..400u64 {
                    let offset = marquee
                        .tick(start + Duration::from_millis(i * 37))
                        .unwrap();
                    assert!((-520.0..=520.0).contains(&offset));
                }
            }
        }
    }

    #[test]
    fn test_pointer_hover_freezes_offset() {
        let mut marquee = active(ClockStrategy::Stepped);
        let now = run(&mut marquee, Instant::now(), 7);
        let before = marquee.offset();

        let enter = marquee.surface().listener(ListenerKind::PointerEnter);
        let leave = marquee.surface().listener(ListenerKind::PointerLeave);
        marquee.notify(enter);
        assert_eq!(marquee.state(), PlaybackState::Paused);

        // a second of frames while hovered
        let mut t = now;
        for _ in 0..10 {
            t += Duration::from_millis(100);
            assert!(marquee.tick(t).is_none());
        }
        assert_eq!(marquee.offset(), before);

        marquee.notify(leave);
        t += Duration::from_millis(100);
        assert_eq!(marquee.tick(t), Some(before));

        t += Duration::from_millis(100);
        assert_eq!(marquee.tick(t), Some(before - 10.0));
    }

    #[test]
    fn test_pause_resume_without_ticks_keeps_phase() {
        let mut marquee = active(ClockStrategy::Stepped);
        let now = run(&mut marquee, Instant::now(), 3);
        let before = marquee.offset();

        marquee.pause();
        marquee.resume();
        // a long gap with no frames at all
        let later = now + Duration::from_secs(10);
        assert_eq!(marquee.tick(later), Some(before));
        assert_eq!(
            marquee.tick(later + Duration::from_millis(100)),
            Some(before - 10.0)
        );
    }

    #[test]
    fn test_hover_does_not_override_stop() {
        let mut marquee = active(ClockStrategy::Stepped);
        marquee.stop();
        let enter = marquee.surface().listener(ListenerKind::PointerEnter);
        let leave = marquee.surface().listener(ListenerKind::PointerLeave);
        marquee.notify(enter);
        marquee.notify(leave);
        assert_eq!(marquee.state(), PlaybackState::Stopped);

        let writes = marquee.surface().translation_writes;
        run(&mut marquee, Instant::now(), 5);
        assert_eq!(marquee.surface().translation_writes, writes);
    }

    #[test]
    fn test_direction_switch_keeps_phase() {
        for strategy in [ClockStrategy::Stepped, ClockStrategy::Keyframed] {
            let mut marquee = active(strategy);
            let now = run(&mut marquee, Instant::now(), 12);
            let before = marquee.offset();

            marquee.update_config(&MarqueeConfigPatch::direction(Direction::Reverse));
            assert_eq!(marquee.offset(), before);

            let after = marquee.tick(now + Duration::from_millis(100)).unwrap();
            let moved = phase_delta(before, after, 520.0);
            assert!((moved - 10.0).abs() < 1e-6, "{strategy:?} moved {moved}");
        }
    }

    #[test]
    fn test_gap_update_remeasures_without_reset() {
        let mut marquee = active(ClockStrategy::Stepped);
        let now = run(&mut marquee, Instant::now(), 13);
        let before = marquee.offset();
        assert_eq!(before, -130.0);

        marquee.update_config(&MarqueeConfigPatch::gap(40.0));
        assert_eq!(marquee.tile_distance(), Some(540.0));
        assert_eq!(marquee.offset(), before);
        let mounted = marquee.surface().mounted.as_ref().unwrap();
        assert_eq!(mounted.gap(), 40.0);

        assert_eq!(marquee.tick(now + Duration::from_millis(100)), Some(-140.0));
    }

    #[test]
    fn test_zero_width_content_stays_static_until_measured() {
        let mut surface = MockSurface::with_content(Vec::new());
        surface.forced_width = Some(0.0);
        let mut marquee = Marquee::new(surface);
        let config = MarqueeConfig {
            gap: 0.0,
            ..scenario_config(ClockStrategy::Stepped)
        };
        marquee.activate(config).unwrap();
        assert_eq!(marquee.tile_distance(), None);

        let start = Instant::now();
        for i in 0..5u64 {
            assert!(marquee.tick(start + Duration::from_millis(i * 100)).is_none());
        }
        assert_eq!(marquee.surface().translation_writes, 0);

        marquee.surface_mut().forced_width = Some(300.0);
        let geometry = marquee.surface().listener(ListenerKind::Geometry);
        marquee.notify(geometry);
        assert_eq!(marquee.tile_distance(), Some(300.0));

        marquee.tick(start + Duration::from_millis(600));
        let offset = marquee.tick(start + Duration::from_millis(700)).unwrap();
        assert_eq!(offset, -10.0);
    }

    #[test]
    fn test_non_finite_measurement_is_static() {
        let mut surface = MockSurface::with_content(vec![1.0]);
        surface.forced_width = Some(f64::INFINITY);
        let mut marquee = Marquee::new(surface);
        marquee.activate(scenario_config(ClockStrategy::Keyframed)).unwrap();
        assert!(marquee.tick(Instant::now()).is_none());
    }

    #[test]
    fn test_unavailable_region_is_untouched() {
        let mut surface = MockSurface::with_content(vec![500.0]);
        surface.available = false;
        let mut marquee = Marquee::new(surface);

        let err = marquee
            .activate(scenario_config(ClockStrategy::Stepped))
            .unwrap_err();
        assert!(matches!(err, Error::RegionUnavailable(_)));
        assert!(!marquee.is_active());
        assert_eq!(marquee.surface().content, vec![500.0]);
        assert!(marquee.surface().mounted.is_none());
        assert!(marquee.surface().listeners.is_empty());
    }

    #[test]
    fn test_deactivate_is_idempotent() {
        let mut marquee = active(ClockStrategy::Stepped);
        run(&mut marquee, Instant::now(), 3);

        marquee.deactivate();
        let surface = marquee.surface();
        assert_eq!(surface.content, vec![500.0]);
        assert!(surface.mounted.is_none());
        assert!(surface.translation.is_none());
        assert!(surface.listeners.is_empty());
        let removed = surface.removed.len();
        assert_eq!(removed, 3);

        marquee.deactivate();
        let surface = marquee.surface();
        assert_eq!(surface.content, vec![500.0]);
        assert!(surface.listeners.is_empty());
        assert_eq!(surface.removed.len(), removed);
    }

    #[test]
    fn test_deactivate_before_activate_is_noop() {
        let mut marquee = Marquee::new(MockSurface::with_content(vec![42.0]));
        marquee.deactivate();
        assert_eq!(marquee.surface().content, vec![42.0]);
        assert_eq!(marquee.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_tick_after_deactivate_is_noop() {
        let mut marquee = active(ClockStrategy::Stepped);
        let now = run(&mut marquee, Instant::now(), 2);
        marquee.deactivate();
        assert!(marquee.tick(now + Duration::from_millis(100)).is_none());
        assert!(marquee.surface().translation.is_none());
    }

    #[test]
    fn test_double_activate_is_noop() {
        let mut marquee = active(ClockStrategy::Stepped);
        marquee.activate(scenario_config(ClockStrategy::Stepped)).unwrap();
        assert_eq!(marquee.surface().listeners.len(), 3);
        let mounted = marquee.surface().mounted.as_ref().unwrap();
        assert_eq!(mounted.source().items().len(), 1);
    }

    #[test]
    fn test_reactivate_after_deactivate() {
        let mut marquee = active(ClockStrategy::Stepped);
        marquee.deactivate();
        marquee.activate(scenario_config(ClockStrategy::Stepped)).unwrap();
        assert_eq!(marquee.tile_distance(), Some(520.0));
        assert_eq!(marquee.offset(), 0.0);
    }

    #[test]
    fn test_stale_listener_is_ignored() {
        let mut marquee = active(ClockStrategy::Stepped);
        marquee.notify(ListenerId::new());
        assert_eq!(marquee.state(), PlaybackState::Running);
    }

    #[test]
    fn test_disabling_hover_policy_removes_listeners_and_resumes() {
        let mut marquee = active(ClockStrategy::Stepped);
        let enter = marquee.surface().listener(ListenerKind::PointerEnter);
        marquee.notify(enter);
        assert_eq!(marquee.state(), PlaybackState::Paused);

        marquee.update_config(&MarqueeConfigPatch::pause_on_interaction(false));
        assert_eq!(marquee.state(), PlaybackState::Running);
        assert_eq!(marquee.surface().listeners.len(), 1);

        // old id no longer routes
        marquee.notify(enter);
        assert_eq!(marquee.state(), PlaybackState::Running);

        marquee.update_config(&MarqueeConfigPatch::pause_on_interaction(true));
        assert_eq!(marquee.surface().listeners.len(), 3);
    }

    #[test]
    fn test_no_auto_start_waits_for_start() {
        let mut marquee = Marquee::new(MockSurface::with_content(vec![500.0]));
        let config = MarqueeConfig {
            auto_start: false,
            ..scenario_config(ClockStrategy::Stepped)
        };
        marquee.activate(config).unwrap();
        assert_eq!(marquee.state(), PlaybackState::Stopped);
        assert!(marquee.tick(Instant::now()).is_none());

        marquee.start();
        assert_eq!(marquee.state(), PlaybackState::Running);
    }

    #[test]
    fn test_geometry_change_applies_from_next_tick() {
        let mut marquee = active(ClockStrategy::Stepped);
        let now = run(&mut marquee, Instant::now(), 10);
        assert_eq!(marquee.offset(), -100.0);

        marquee.surface_mut().forced_width = Some(60.0);
        marquee.geometry_changed();
        assert_eq!(marquee.tile_distance(), Some(80.0));
        assert_eq!(marquee.offset(), -100.0);

        let offset = marquee.tick(now + Duration::from_millis(100)).unwrap();
        assert_eq!(offset, -30.0);
    }

    #[test]
    fn test_rate_update_keeps_offset() {
        let mut marquee = active(ClockStrategy::Keyframed);
        let now = run(&mut marquee, Instant::now(), 5);
        let before = marquee.offset();
        marquee.update_config(&MarqueeConfigPatch::rate(200.0));
        assert_eq!(marquee.offset(), before);
        let after = marquee.tick(now + Duration::from_millis(100)).unwrap();
        assert!((phase_delta(before, after, 520.0) + 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut marquee = active(ClockStrategy::Stepped);
        run(&mut marquee, Instant::now(), 1);
        let snapshot = marquee.snapshot().unwrap();
        assert_eq!(snapshot.state, PlaybackState::Running);
        assert_eq!(snapshot.offset, -10.0);
        assert_eq!(snapshot.tile_distance, Some(520.0));
        assert!(!snapshot.hovered);
    }

    #[test]
    fn test_keyframes_only_for_keyframed_strategy() {
        let stepped = active(ClockStrategy::Stepped);
        assert!(stepped.keyframes().is_none());

        let keyframed = active(ClockStrategy::Keyframed);
        let keyframes = keyframed.keyframes().unwrap();
        assert_eq!(keyframes.travel, 520.0);
        assert!((keyframes.duration.as_secs_f64() - 5.2).abs() < 1e-6);
        assert!(!keyframes.reverse);
    }

    #[test]
    fn test_keyframes_for_huge_distance_do_not_panic() {
        let mut surface = MockSurface::with_content(vec![1.0]);
        surface.forced_width = Some(1e25);
        let mut marquee = Marquee::new(surface);
        marquee
            .activate(MarqueeConfig {
                rate: 1.0,
                strategy: ClockStrategy::Keyframed,
                ..Default::default()
            })
            .unwrap();
        let keyframes = marquee.keyframes().unwrap();
        assert_eq!(keyframes.duration, Duration::MAX);
    }

    #[test]
    fn test_tiles_exposes_source_and_duplicate() {
        let marquee = active(ClockStrategy::Stepped);
        let tiles = marquee.tiles().unwrap();
        assert_eq!(tiles.gap(), 20.0);
        assert!(!tiles.source().is_duplicate());
        assert!(tiles.duplicate().is_duplicate());
        assert_eq!(tiles.source().items()[0].item, 500.0);

        let mut marquee = marquee;
        marquee.deactivate();
        assert!(marquee.tiles().is_none());
    }

    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_listener_logs_carry_marquee_id() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let mut marquee = Marquee::new(MockSurface::with_content(vec![500.0]));
        let id = marquee.id();
        tracing::subscriber::with_default(subscriber, || {
            marquee.activate(scenario_config(ClockStrategy::Stepped)).unwrap();
            marquee.update_config(&MarqueeConfigPatch::pause_on_interaction(false));
            marquee.deactivate();
        });

        let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = text
            .lines()
            .filter(|line| line.contains("listener installed") || line.contains("listener removed"))
            .collect();
        // three installed, two removed by the policy change, one on deactivate
        assert_eq!(lines.len(), 6);
        let field = format!("marquee={id}");
        assert!(lines.iter().all(|line| line.contains(&field)));
    }
}
