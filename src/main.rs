use anyhow::{Context, Result};
use clap::Parser;
use snaktionary::game::GameConfig;
use snaktionary::modes::VersusMode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snaktionary")]
#[command(version, about = "Snake versus mouse word race")]
struct Cli {
    /// YAML configuration file (defaults are used if it does not exist)
    #[arg(long, default_value = "snaktionary.yaml")]
    config: PathBuf,

    /// Vocabulary file, one word per line
    #[arg(long)]
    words: Option<PathBuf>,

    /// Winner log file
    #[arg(long)]
    winners: Option<PathBuf>,

    /// Seed for letter placement
    #[arg(long)]
    seed: Option<u64>,

    /// Tick frequency in Hz
    #[arg(long)]
    tick_hz: Option<u32>,

    /// Log file; the terminal is taken by the game
    #[arg(long, default_value = "snaktionary.log")]
    log_file: PathBuf,
}

impl Cli {
    fn apply(&self, config: &mut GameConfig) {
        if let Some(words) = &self.words {
            config.words_path = words.clone();
        }
        if let Some(winners) = &self.winners {
            config.winners_path = winners.clone();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(tick_hz) = self.tick_hz {
            config.tick_hz = tick_hz;
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("snaktionary=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    // Create game configuration from the file and CLI arguments
    let mut config = GameConfig::load(&cli.config).context("Failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("Invalid configuration")?;
    info!(?config, "starting");

    let mut versus = VersusMode::new(config);
    versus.run().await?;

    Ok(())
}
