use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentError {
    #[error("Segment limit {max} leaves no room for text after a {reserved}-character counter")]
    LimitTooSmall { max: usize, reserved: usize },

    #[error("Invalid section headings: {0}")]
    InvalidHeadings(String),
}
