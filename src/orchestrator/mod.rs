mod publish;


pub use publish::{publish_batch, PublishReport, SegmentOutcome};

use crate::forecast::{ForecastSource, GenerationError};
use crate::publisher::Publisher;
use crate::segmenter::{SegmentError, Segmenter};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Default pause between cycles
pub const DEFAULT_POST_INTERVAL: Duration = Duration::from_secs(2 * 60 * 60);

/// Errors that end a cycle before anything is published
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("Forecast generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Failed to segment forecast: {0}")]
    Segment(#[from] SegmentError),
}

/// What the bot asks for and how often
#[derive(Debug, Clone)]
pub struct BotSettings {
    pub prompt: String,
    pub max_tokens: u32,
    pub post_interval: Duration,
}

/// Summary of one generate -> segment -> publish cycle
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub cycle: u64,
    pub forecast_chars: usize,
    pub publish: PublishReport,
}

/// Runs forecast cycles against a source and a publisher
pub struct Bot<S, P> {
    source: S,
    publisher: P,
    segmenter: Segmenter,
    settings: BotSettings,
    /// Cycles started so far; only used for logging
    cycle: u64,
}

impl<S, P> Bot<S, P>
where
    S: ForecastSource,
    P: Publisher,
{
    /// Build a bot. Segments are sized for the smaller of the segmenter's
    /// and the publisher's limits.
    ///
    /// # Errors
    /// `SegmentError` when the publisher's limit is too small to segment for.
    pub fn new(
        source: S,
        publisher: P,
        segmenter: Segmenter,
        settings: BotSettings,
    ) -> Result<Self, SegmentError> {
        let publisher_max = publisher.max_length();
        let segmenter = if publisher_max < segmenter.max_segment_length() {
            info!(
                segmenter_max = segmenter.max_segment_length(),
                publisher_max, "Segmenting for the publisher's smaller limit"
            );
            Segmenter::new(segmenter.config().clone().max_segment_length(publisher_max))?
        } else {
            segmenter
        };

        Ok(Self {
            source,
            publisher,
            segmenter,
            settings,
            cycle: 0,
        })
    }

    /// Number of cycles started
    pub fn cycles(&self) -> u64 {
        self.cycle
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Generate one forecast and publish it as numbered posts
    pub async fn run_cycle(&mut self) -> Result<CycleReport, CycleError> {
        self.cycle += 1;
        let cycle = self.cycle;

        info!(cycle, "Getting weather forecast");
        let forecast = self
            .source
            .generate(&self.settings.prompt, self.settings.max_tokens)
            .await?;
        let forecast_chars = forecast.chars().count();

        let batch = self.segmenter.segment(&forecast)?;
        if batch.is_empty() {
            warn!(cycle, "Forecast was blank, nothing to post");
        }

        info!(
            cycle,
            forecast_chars,
            segments = batch.len(),
            layout = ?batch.layout,
            "Posting weather forecast"
        );

        let max_len = self.segmenter.max_segment_length();
        let publish = publish_batch(&self.publisher, &batch, max_len).await;

        Ok(CycleReport {
            cycle,
            forecast_chars,
            publish,
        })
    }

    /// Run cycles until `shutdown` turns true (or its sender goes away).
    ///
    /// Cycle errors are logged and never stop the loop. Shutdown interrupts
    /// the sleep between cycles but never a batch that is being published.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        info!(interval_secs = self.settings.post_interval.as_secs(), "Starting weatherbot");

        loop {
            if *shutdown.borrow() {
                break;
            }

            match self.run_cycle().await {
                Ok(report) => info!(
                    cycle = report.cycle,
                    posted = report.publish.posted(),
                    total = report.publish.outcomes.len(),
                    "Cycle completed"
                ),
                Err(err) => error!(cycle = self.cycle, error = %err, "Cycle failed"),
            }

            if *shutdown.borrow() {
                break;
            }

            let interval = self.settings.post_interval;
            if let Ok(delta) = chrono::Duration::from_std(interval) {
                let next_run = chrono::Local::now() + delta;
                info!(next_run = %next_run.format("%Y-%m-%d %H:%M:%S"), "Sleeping until next cycle");
            }

            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        info!(cycles = self.cycle, "Weatherbot stopped");
    }
}

/// Flip `shutdown` once `signal` resolves.
///
/// If the signal listener itself fails, the sender is held open forever so the
/// bot keeps running instead of reading the closed channel as a stop request.
pub async fn forward_shutdown<F>(signal: F, shutdown: watch::Sender<bool>)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            info!("Received Ctrl+C, stopping after the current cycle");
            let _ = shutdown.send(true);
        }
        Err(err) => {
            error!(error = %err, "Failed to listen for shutdown signal, running until killed");
            std::future::pending::<()>().await;
        }
    }
}
