// Public API exports
pub mod config;
pub mod forecast;
pub mod orchestrator;
pub mod publisher;
pub mod segmenter;
pub mod telemetry;

// Re-export main types for convenience
pub use config::{Config, ConfigError};

pub use segmenter::{
    Layout, Segment, SegmentBatch, SegmentError, Segmenter, SegmenterConfig,
    DEFAULT_MAX_SEGMENT_LENGTH,
};

pub use forecast::{ForecastSource, GenerationError, OpenAiClient};

pub use publisher::{ConsolePublisher, MastodonClient, PublishError, Publisher};

pub use orchestrator::{Bot, BotSettings, CycleError, CycleReport, PublishReport, SegmentOutcome};
