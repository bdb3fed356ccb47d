//! Headless trajectory: drives the engine against a surface that only has a
//! width, printing one line (or JSON record) per frame.

use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Serialize;
use tracing::debug;

use marquee_core::tile::measure_with;
use marquee_core::{
    ListenerId, ListenerKind, Marquee, MarqueeConfig, MetricsProvider, RenderSurface, Snapshot,
    TileSet,
};

pub struct Options {
    pub content_width: f64,
    pub duration: f64,
    pub tick_ms: u64,
    /// Change the content width to `.1` once `.0` seconds have passed
    pub resize: Option<(f64, f64)>,
    pub json: bool,
}

/// Parse `SECONDS:WIDTH`
pub fn parse_resize(value: &str) -> std::result::Result<(f64, f64), String> {
    let (at, width) = value
        .split_once(':')
        .ok_or_else(|| format!("expected SECONDS:WIDTH, got {value:?}"))?;
    let at: f64 = at.trim().parse().map_err(|e| format!("bad seconds: {e}"))?;
    let width: f64 = width.trim().parse().map_err(|e| format!("bad width: {e}"))?;
    Ok((at, width))
}

/// A block of known width; stands in for a real render surface
#[derive(Debug, Default)]
struct WidthSurface {
    content: Vec<f64>,
    mounted: Option<TileSet<f64>>,
    translation: f64,
    listeners: Vec<(ListenerId, ListenerKind)>,
}

impl WidthSurface {
    fn new(width: f64) -> Self {
        Self {
            content: vec![width],
            ..Default::default()
        }
    }

    /// Change the block's width and return the geometry listeners to notify
    fn resize(&mut self, width: f64) -> Vec<ListenerId> {
        if let Some(tiles) = &self.mounted {
            let gap = tiles.gap();
            self.mounted = Some(TileSet::build(vec![width], gap));
        } else {
            self.content = vec![width];
        }
        self.listeners
            .iter()
            .filter(|(_, kind)| *kind == ListenerKind::Geometry)
            .map(|(id, _)| *id)
            .collect()
    }
}

impl MetricsProvider<f64> for WidthSurface {
    fn measure(&self, tiles: &TileSet<f64>) -> f64 {
        // Tiles handed in may predate a resize; measure what is mounted
        let current = self.mounted.as_ref().unwrap_or(tiles);
        measure_with(current, |width| *width)
    }
}

impl RenderSurface<f64> for WidthSurface {
    fn is_available(&self) -> bool {
        true
    }

    fn take_content(&mut self) -> Vec<f64> {
        std::mem::take(&mut self.content)
    }

    fn mount(&mut self, tiles: &TileSet<f64>) {
        self.mounted = Some(tiles.clone());
    }

    fn set_translation(&mut self, offset: f64) {
        self.translation = offset;
    }

    fn clear_translation(&mut self) {
        self.translation = 0.0;
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
    }
}

#[derive(Debug, Serialize)]
struct Frame {
    elapsed_ms: u64,
    translation: f64,
    #[serde(flatten)]
    snapshot: Snapshot,
}

fn simulate(config: MarqueeConfig, options: &Options) -> Result<Vec<Frame>> {
    if options.tick_ms == 0 {
        return Err(anyhow!("--tick must be at least 1ms"));
    }
    let mut marquee = Marquee::new(WidthSurface::new(options.content_width));
    marquee.activate(config)?;
    // Headless runs always move
    marquee.start();

    let tick = Duration::from_millis(options.tick_ms);
    let total = Duration::try_from_secs_f64(options.duration.max(0.0)).map_err(|_| {
        anyhow!(
            "--duration must be a finite number of seconds, got {}",
            options.duration
        )
    })?;
    let mut resize = options.resize;
    let mut elapsed = Duration::ZERO;
    let mut frames = Vec::new();

    while elapsed <= total {
        if let Some((at, width)) = resize {
            if elapsed.as_secs_f64() >= at {
                debug!(width, "resizing content");
                for id in marquee.surface_mut().resize(width) {
                    marquee.notify(id);
                }
                resize = None;
            }
        }

        if !elapsed.is_zero() {
            marquee.tick_by(tick);
        }
        if let Some(snapshot) = marquee.snapshot() {
            frames.push(Frame {
                elapsed_ms: elapsed.as_millis() as u64,
                translation: marquee.surface().translation,
                snapshot,
            });
        }
        elapsed += tick;
    }

    marquee.deactivate();
    Ok(frames)
}

pub fn run(config: MarqueeConfig, options: &Options) -> Result<()> {
    let frames = simulate(config, options)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&frames)?);
        return Ok(());
    }

    for frame in &frames {
        let period = frame
            .snapshot
            .tile_distance
            .map(|d| format!("{d:.1}"))
            .unwrap_or_else(|| "static".to_string());
        println!(
            "{:>7}ms  offset {:>10.3}  period {:>8}  {:?}",
            frame.elapsed_ms, frame.snapshot.offset, period, frame.snapshot.state
        );
    }
    Ok(())
}
