use crate::publisher::{PublishError, Publisher};
use crate::segmenter::{Layout, SegmentBatch};
use tracing::{error, info, warn};

/// What happened to one segment of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentOutcome {
    Posted,
    /// Over the limit; never sent
    Rejected { length: usize, max: usize },
    /// The publisher returned an error
    Failed(String),
    /// Skipped because an earlier failure aborted the batch
    NotAttempted,
}

/// Per-segment results of publishing one batch, in publish order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub layout: Layout,
    /// `(counter, outcome)` for every segment
    pub outcomes: Vec<(String, SegmentOutcome)>,
    /// A failure stopped the batch early
    pub aborted: bool,
}

impl PublishReport {
    pub fn posted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| *outcome == SegmentOutcome::Posted)
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.posted() == self.outcomes.len()
    }

    /// Counters of segments that did not make it out
    pub fn missing_counters(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| *outcome != SegmentOutcome::Posted)
            .map(|(counter, _)| counter.as_str())
            .collect()
    }
}

/// Hand every segment to the publisher, in order.
///
/// A segment longer than `max_len` is rejected and skipped. When the publisher
/// fails, a structured batch carries on with the next segment but an
/// unstructured one stops there. The two layouts intentionally differ here.
pub async fn publish_batch<P>(publisher: &P, batch: &SegmentBatch, max_len: usize) -> PublishReport
where
    P: Publisher + ?Sized,
{
    let mut outcomes = Vec::with_capacity(batch.len());
    let mut aborted = false;

    for segment in batch.iter() {
        let counter = segment.counter();

        if aborted {
            outcomes.push((counter, SegmentOutcome::NotAttempted));
            continue;
        }

        let length = segment.char_len();
        if length > max_len {
            warn!(segment = %counter, length, max = max_len, "Segment over the limit, not posting it");
            outcomes.push((counter, SegmentOutcome::Rejected { length, max: max_len }));
            continue;
        }

        info!(segment = %counter, chars = length, "Posting segment");
        let outcome = match publisher.publish(&segment.text).await {
            Ok(()) => SegmentOutcome::Posted,
            Err(PublishError::TooLong { length, max }) => {
                warn!(segment = %counter, length, max, "Publisher rejected segment as too long");
                SegmentOutcome::Rejected { length, max }
            }
            Err(err) => {
                error!(segment = %counter, error = %err, "Failed to post segment");
                if batch.layout == Layout::Unstructured {
                    warn!("Aborting the rest of an unstructured forecast");
                    aborted = true;
                }
                SegmentOutcome::Failed(err.to_string())
            }
        };
        outcomes.push((counter, outcome));
    }

    let report = PublishReport {
        layout: batch.layout,
        outcomes,
        aborted,
    };

    if report.is_complete() {
        info!(posted = report.posted(), "All segments posted");
    } else {
        warn!(
            posted = report.posted(),
            total = report.outcomes.len(),
            missing = ?report.missing_counters(),
            "Thread is incomplete"
        );
    }

    report
}
