use super::sections::StructuralMismatch;

/// Which path the structural parser took for a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// All three headings were found, in order
    Structured,
    /// Headings missing or malformed; the whole text is one section
    Unstructured,
}

/// One bounded, numbered unit of output text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Text exactly as it will be posted, counter prefix included
    pub text: String,
    /// Zero-based position in the batch
    pub index: usize,
    /// Number of segments in the batch
    pub total: usize,
    /// Length of the `i/N\n` prefix (0 when the segment is unnumbered)
    pub prefix_len: usize,
}

impl Segment {
    /// The text without its counter prefix
    pub fn body(&self) -> &str {
        // The prefix is ASCII, so its char count is also its byte count
        self.text.get(self.prefix_len..).unwrap_or_default()
    }

    /// Length in characters, the unit the posting limit is expressed in
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Human-readable counter, e.g. "2/3"
    pub fn counter(&self) -> String {
        format!("{}/{}", self.index + 1, self.total)
    }
}

/// Ordered segments produced from one forecast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentBatch {
    pub layout: Layout,
    /// Present when the structural parser fell back to a single section
    pub mismatch: Option<StructuralMismatch>,
    pub segments: Vec<Segment>,
}

impl SegmentBatch {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Segment bodies in publish order
    pub fn bodies(&self) -> Vec<&str> {
        self.segments.iter().map(Segment::body).collect()
    }

    /// Length of the longest segment, prefix included
    pub fn longest(&self) -> usize {
        self.segments
            .iter()
            .map(Segment::char_len)
            .max()
            .unwrap_or(0)
    }
}
