use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use marquee_core::{AppConfig, ClockStrategy, Direction, MarqueeConfig};

mod commands;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about = "Seamless scrolling text for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scroll text in the terminal
    Run {
        /// Text to scroll; items are split on --separator
        text: Option<String>,
        /// Read the text from a file instead
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Item separator
        #[arg(long, default_value = "|")]
        separator: String,
        #[command(flatten)]
        tuning: TuningArgs,
        /// Keep scrolling while the mouse is over the marquee
        #[arg(long)]
        no_hover_pause: bool,
        /// Start stopped; press 's' to begin
        #[arg(long)]
        stopped: bool,
    },
    /// Print the offset trajectory without a terminal
    Simulate {
        /// Rendered width of the content, without the trailing gap
        #[arg(short = 'w', long, default_value_t = 400.0)]
        content_width: f64,
        #[command(flatten)]
        tuning: TuningArgs,
        /// Seconds to simulate
        #[arg(long, default_value_t = 6.0)]
        duration: f64,
        /// Frame interval in milliseconds
        #[arg(long, default_value_t = 100)]
        tick: u64,
        /// Change the content width mid-run, as SECONDS:WIDTH
        #[arg(long, value_parser = commands::simulate::parse_resize)]
        resize: Option<(f64, f64)>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the configuration
    Config {
        /// Write the default configuration file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Overrides shared by `run` and `simulate`
#[derive(Args, Debug, Clone, Default)]
struct TuningArgs {
    /// Travel rate in columns per second
    #[arg(short, long)]
    rate: Option<f64>,
    /// Spacing between items and between copies
    #[arg(short, long)]
    gap: Option<f64>,
    #[arg(short, long, value_enum)]
    direction: Option<DirectionArg>,
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,
}

impl TuningArgs {
    fn apply(&self, config: &mut MarqueeConfig) {
        if let Some(rate) = self.rate {
            config.rate = rate;
        }
        if let Some(gap) = self.gap {
            config.gap = gap;
        }
        if let Some(direction) = self.direction {
            config.direction = direction.into();
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy.into();
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DirectionArg {
    #[value(alias = "forward")]
    Left,
    #[value(alias = "reverse")]
    Right,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Left => Direction::Forward,
            DirectionArg::Right => Direction::Reverse,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Stepped,
    Keyframed,
}

impl From<StrategyArg> for ClockStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Stepped => ClockStrategy::Stepped,
            StrategyArg::Keyframed => ClockStrategy::Keyframed,
        }
    }
}

/// Log to stderr, or to the log file while the terminal UI owns the screen
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load()?;

    init_logging(&config, matches!(cli.command, Commands::Run { .. }))?;

    match cli.command {
        Commands::Run {
            text,
            file,
            separator,
            tuning,
            no_hover_pause,
            stopped,
        } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("reading {}", path.display()))?,
                (None, None) => anyhow::bail!("nothing to scroll: pass TEXT or --file"),
            };
            tuning.apply(&mut config.marquee);
            if no_hover_pause {
                config.marquee.pause_on_interaction = false;
            }
            if stopped {
                config.marquee.auto_start = false;
            }
            commands::run::run(config, &text, &separator).await
        }
        Commands::Simulate {
            content_width,
            tuning,
            duration,
            tick,
            resize,
            json,
        } => {
            tuning.apply(&mut config.marquee);
            let options = commands::simulate::Options {
                content_width,
                duration,
                tick_ms: tick,
                resize,
                json,
            };
            commands::simulate::run(config.marquee, &options)
        }
        Commands::Config { init } => commands::config::run(&config, init),
    }
}
