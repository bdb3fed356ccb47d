use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Smallest rate a marquee will move at, in units per second
pub const MIN_RATE: f64 = 1.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub marquee: MarqueeConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here while the TUI is up)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Scroll direction along the horizontal axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Content travels towards the start (leftwards)
    #[default]
    #[serde(alias = "left")]
    Forward,
    /// Content travels towards the end (rightwards)
    #[serde(alias = "right")]
    Reverse,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// How the loop clock turns elapsed time into an offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockStrategy {
    /// Integrate the offset on every tick
    #[default]
    Stepped,
    /// Sample a looping keyframe cycle of `distance / rate` seconds
    Keyframed,
}

/// Marquee behaviour for one activation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarqueeConfig {
    /// Travel rate in columns (or pixels) per second
    #[serde(default = "default_rate")]
    pub rate: f64,
    /// Spacing between items and between the two tiles
    #[serde(default = "default_gap")]
    pub gap: f64,
    #[serde(default)]
    pub direction: Direction,
    /// Pause while the pointer is over the region
    #[serde(default = "default_true")]
    pub pause_on_interaction: bool,
    /// Begin moving as soon as the marquee is activated
    #[serde(default = "default_true")]
    pub auto_start: bool,
    #[serde(default)]
    pub strategy: ClockStrategy,
    /// Longest frame delta fed to the clock, in milliseconds
    #[serde(default = "default_max_frame_ms")]
    pub max_frame_ms: u64,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            rate: default_rate(),
            gap: default_gap(),
            direction: Direction::default(),
            pause_on_interaction: default_true(),
            auto_start: default_true(),
            strategy: ClockStrategy::default(),
            max_frame_ms: default_max_frame_ms(),
        }
    }
}

impl MarqueeConfig {
    /// Return a copy with out-of-range numbers replaced by usable values.
    ///
    /// A non-positive rate never means "stopped": it falls back to [`MIN_RATE`].
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();
        config.rate = sanitize_rate(self.rate);
        config.gap = sanitize_gap(self.gap);
        if config.max_frame_ms == 0 {
            warn!("max_frame_ms of 0 would freeze motion, using default");
            config.max_frame_ms = default_max_frame_ms();
        }
        config
    }

    /// Apply a partial update, returning the sanitized result
    pub fn merged(&self, patch: &MarqueeConfigPatch) -> Self {
        let mut config = self.clone();
        if let Some(rate) = patch.rate {
            config.rate = rate;
        }
        if let Some(gap) = patch.gap {
            config.gap = gap;
        }
        if let Some(direction) = patch.direction {
            config.direction = direction;
        }
        if let Some(pause) = patch.pause_on_interaction {
            config.pause_on_interaction = pause;
        }
        if let Some(auto_start) = patch.auto_start {
            config.auto_start = auto_start;
        }
        if let Some(max_frame_ms) = patch.max_frame_ms {
            config.max_frame_ms = max_frame_ms;
        }
        config.sanitized()
    }
}

/// Partial configuration accepted by `Marquee::update_config`.
///
/// The clock strategy is fixed for an activation and is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarqueeConfigPatch {
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub gap: Option<f64>,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub pause_on_interaction: Option<bool>,
    #[serde(default)]
    pub auto_start: Option<bool>,
    #[serde(default)]
    pub max_frame_ms: Option<u64>,
}

impl MarqueeConfigPatch {
    pub fn rate(rate: f64) -> Self {
        Self {
            rate: Some(rate),
            ..Default::default()
        }
    }

    pub fn gap(gap: f64) -> Self {
        Self {
            gap: Some(gap),
            ..Default::default()
        }
    }

    pub fn direction(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            ..Default::default()
        }
    }

    pub fn pause_on_interaction(enabled: bool) -> Self {
        Self {
            pause_on_interaction: Some(enabled),
            ..Default::default()
        }
    }
}

pub(crate) fn sanitize_rate(rate: f64) -> f64 {
    if rate.is_finite() && rate > 0.0 {
        rate
    } else {
        warn!(rate, "non-positive rate, falling back to minimum");
        MIN_RATE
    }
}

pub(crate) fn sanitize_gap(gap: f64) -> f64 {
    if gap.is_finite() && gap >= 0.0 {
        gap
    } else {
        warn!(gap, "invalid gap, using 0");
        0.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle tick rate in milliseconds when nothing is moving
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while a marquee is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Show the status line under the marquee
    #[serde(default = "default_true")]
    pub show_status: bool,
    /// Theme name (e.g., "gruvbox-dark", "nord", "dracula")
    #[serde(default = "default_theme_name")]
    pub theme: String,
    /// Optional accent color override as hex ("#RRGGBB")
    #[serde(default)]
    pub accent: Option<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            show_status: default_true(),
            theme: default_theme_name(),
            accent: None,
        }
    }
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("marquee")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_rate() -> f64 {
    80.0
}

fn default_gap() -> f64 {
    16.0
}

fn default_max_frame_ms() -> u64 {
    250
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = self.to_toml()?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/marquee/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("marquee")
            .join("config.toml")
    }

    /// Get the log file path used while the terminal UI is active
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("marquee.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
