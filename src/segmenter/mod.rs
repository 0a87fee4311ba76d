mod batch;
mod error;
mod limits;
mod packer;
mod sections;


pub use batch::{Layout, Segment, SegmentBatch};
pub use error::SegmentError;
pub use limits::{bisect_oversized, char_len, number_segments, prefix_reserve};
pub use packer::{pack_sentences, split_sentences};
pub use sections::{
    normalize, parse_sections, ParsedText, Section, SectionKind, StructuralMismatch,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Character limit of a single post (Mastodon default)
pub const DEFAULT_MAX_SEGMENT_LENGTH: usize = 500;

/// Headings the forecast prompt asks the model to use
pub const DEFAULT_HEADINGS: [&str; 3] = ["1: Introduction", "2: Forecast", "3: Farewell"];

/// Punctuation that ends a sentence when followed by whitespace
pub const DEFAULT_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Segmenter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Hard limit for each posted segment, counter prefix included
    pub max_segment_length: usize,
    /// Introduction, forecast and farewell headings, in that order
    pub headings: [String; 3],
    pub sentence_terminators: Vec<char>,
    /// Prefix a batch of one with "1/1"
    pub number_single_segment: bool,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_segment_length: DEFAULT_MAX_SEGMENT_LENGTH,
            headings: DEFAULT_HEADINGS.map(String::from),
            sentence_terminators: DEFAULT_TERMINATORS.to_vec(),
            number_single_segment: true,
        }
    }
}

impl SegmenterConfig {
    /// Override the per-segment limit
    pub fn max_segment_length(mut self, max: usize) -> Self {
        self.max_segment_length = max;
        self
    }

    /// Check the config can produce at least one character per segment
    pub fn validate(&self) -> Result<(), SegmentError> {
        let reserved = prefix_reserve(1);
        if self.max_segment_length <= reserved {
            return Err(SegmentError::LimitTooSmall {
                max: self.max_segment_length,
                reserved,
            });
        }

        if let Some(pos) = self.headings.iter().position(|h| h.trim().is_empty()) {
            return Err(SegmentError::InvalidHeadings(format!(
                "heading {} is empty",
                pos + 1
            )));
        }

        if self.headings.iter().any(|h| h.contains('\n')) {
            return Err(SegmentError::InvalidHeadings(
                "headings must not contain line breaks".to_string(),
            ));
        }

        Ok(())
    }
}

/// Pure text-to-segments pipeline: structural parse, sentence packing,
/// then bisection and numbering.
#[derive(Debug, Clone)]
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    pub fn new(config: SegmenterConfig) -> Result<Self, SegmentError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    pub fn max_segment_length(&self) -> usize {
        self.config.max_segment_length
    }

    /// Split a generated forecast into numbered segments that each fit the
    /// limit once their counter prefix is added.
    ///
    /// The prefix width depends on the final count, so bodies are first sized
    /// for a one-digit total and re-sized if the batch grows past it.
    ///
    /// # Errors
    /// `SegmentError::LimitTooSmall` when the counter prefix needed for the
    /// batch leaves no room for text.
    pub fn segment(&self, text: &str) -> Result<SegmentBatch, SegmentError> {
        let parsed = parse_sections(text, &self.config.headings);

        if let Some(mismatch) = &parsed.mismatch {
            warn!(%mismatch, "Forecast structure not recognized, treating it as one section");
        }

        let max = self.config.max_segment_length;

        // An unnumbered lone segment may use the whole limit
        if !self.config.number_single_segment {
            let bodies = self.fit_bodies(&parsed, max);
            if bodies.len() == 1 {
                debug!(layout = ?parsed.layout, "Forecast fits one unnumbered segment");
                return Ok(SegmentBatch {
                    layout: parsed.layout,
                    mismatch: parsed.mismatch,
                    segments: number_segments(bodies, false),
                });
            }
        }

        let mut digits = 1;

        loop {
            let reserved = limits::prefix_reserve_for_digits(digits);
            let budget = max
                .checked_sub(reserved)
                .filter(|budget| *budget > 0)
                .ok_or(SegmentError::LimitTooSmall { max, reserved })?;

            let bodies = self.fit_bodies(&parsed, budget);
            let needed = limits::digit_count(bodies.len());

            if needed <= digits {
                let segments = number_segments(bodies, self.config.number_single_segment);
                debug!(
                    segments = segments.len(),
                    layout = ?parsed.layout,
                    "Forecast segmented"
                );
                return Ok(SegmentBatch {
                    layout: parsed.layout,
                    mismatch: parsed.mismatch,
                    segments,
                });
            }

            debug!(
                count = bodies.len(),
                digits = needed,
                "Batch outgrew counter width, re-packing with a wider prefix"
            );
            digits = needed;
        }
    }

    /// Pack the middle section, keep the others whole, then bisect anything
    /// still over the budget
    fn fit_bodies(&self, parsed: &ParsedText, budget: usize) -> Vec<String> {
        let terminators = &self.config.sentence_terminators;

        let packed: Vec<String> = parsed
            .sections
            .iter()
            .filter(|section| !section.text.is_empty())
            .flat_map(|section| {
                if section.kind.is_packed() {
                    pack_sentences(&section.text, budget, terminators)
                } else {
                    vec![section.text.clone()]
                }
            })
            .collect();

        let oversized = packed.iter().filter(|s| char_len(s) > budget).count();
        if oversized > 0 {
            debug!(oversized, budget, "Bisecting segments over the limit");
        }

        bisect_oversized(packed, budget)
    }
}
