use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use weatherbot::config::DEFAULT_CONFIG_PATH;
use weatherbot::orchestrator::forward_shutdown;
use weatherbot::{
    Bot, Config, ConsolePublisher, MastodonClient, OpenAiClient, Publisher, Segmenter,
    SegmenterConfig,
};

#[derive(Parser)]
#[command(name = "weatherbot", version, about = "Post fictional weather forecasts to Mastodon")]
struct Cli {
    /// Path to the JSON config file
    #[arg(short, long, env = "WEATHERBOT_CONFIG", default_value = DEFAULT_CONFIG_PATH, global = true)]
    config: PathBuf,

    /// Log at debug level (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate and post a forecast on every interval until interrupted
    Run {
        /// Print segments instead of posting them
        #[arg(long)]
        dry_run: bool,
    },
    /// Run a single cycle and exit
    Once {
        /// Print segments instead of posting them
        #[arg(long)]
        dry_run: bool,
    },
    /// Segment text from a file (or stdin) and print the result
    Split {
        file: Option<PathBuf>,

        /// Override the per-segment character limit
        #[arg(long)]
        max_length: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Run { dry_run: false }) {
        Command::Run { dry_run } => run(&cli.config, cli.verbose, dry_run, false).await,
        Command::Once { dry_run } => run(&cli.config, cli.verbose, dry_run, true).await,
        Command::Split { file, max_length } => {
            weatherbot::telemetry::init(None, cli.verbose)?;
            split(&cli.config, file.as_deref(), max_length)
        }
    }
}

async fn run(config_path: &Path, verbose: bool, dry_run: bool, once: bool) -> Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    weatherbot::telemetry::init(config.log_file.as_deref(), verbose)?;

    let max_length = config.segmenter.max_segment_length;
    if dry_run {
        run_with(&config, ConsolePublisher::new(max_length), once).await
    } else {
        let publisher = MastodonClient::new(
            &config.mastodon.base_url,
            &config.mastodon.access_token,
            max_length,
        )?
        .visibility(config.mastodon.visibility);
        run_with(&config, publisher, once).await
    }
}

async fn run_with<P: Publisher>(config: &Config, publisher: P, once: bool) -> Result<()> {
    let source = OpenAiClient::with_timeout(&config.openai.api_key, config.request_timeout())?
        .base_url(&config.openai.base_url)
        .model(&config.openai.model)
        .temperature(config.openai.temperature);
    let segmenter = Segmenter::new(config.segmenter.clone())?;

    let mut bot = Bot::new(source, publisher, segmenter, config.bot_settings())?;

    if once {
        let report = bot.run_cycle().await?;
        if !report.publish.is_complete() {
            bail!(
                "Posted {} of {} segments",
                report.publish.posted(),
                report.publish.outcomes.len()
            );
        }
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(forward_shutdown(tokio::signal::ctrl_c(), shutdown_tx));

    bot.run(shutdown_rx).await;
    Ok(())
}

fn split(config_path: &Path, file: Option<&Path>, max_length: Option<usize>) -> Result<()> {
    let mut segmenter_config = if config_path.exists() {
        Config::load(config_path)?.segmenter
    } else {
        SegmenterConfig::default()
    };
    if let Some(max) = max_length {
        segmenter_config = segmenter_config.max_segment_length(max);
    }
    let segmenter = Segmenter::new(segmenter_config)?;

    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let batch = segmenter.segment(&text)?;
    println!(
        "{} segment(s), {:?} layout, limit {}\n",
        batch.len(),
        batch.layout,
        segmenter.max_segment_length()
    );
    for segment in batch.iter() {
        println!("{}", segment.text);
        println!("--- {} chars", segment.char_len());
    }

    Ok(())
}
