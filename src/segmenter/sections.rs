use super::batch::Layout;
use std::fmt;

/// Which labelled part of the forecast a section came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Introduction,
    Forecast,
    Farewell,
    /// The entire text, when no usable structure was found
    Whole,
}

impl SectionKind {
    /// Whether the packer splits this section on sentence boundaries.
    /// Every other kind is emitted as a single atomic segment.
    pub fn is_packed(self) -> bool {
        matches!(self, SectionKind::Forecast | SectionKind::Whole)
    }
}

/// A normalized slice of the generated text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub text: String,
}

/// Reported when the headings could not be used to split the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuralMismatch {
    /// Total heading occurrences found (each followed by a line break)
    pub headings_found: usize,
    /// Number of headings that were expected
    pub expected: usize,
}

impl fmt::Display for StructuralMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.headings_found == self.expected {
            write!(
                f,
                "found {} headings but not once each in order",
                self.headings_found
            )
        } else {
            write!(
                f,
                "found {} of {} headings",
                self.headings_found, self.expected
            )
        }
    }
}

/// Result of the structural parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedText {
    pub layout: Layout,
    pub sections: Vec<Section>,
    pub mismatch: Option<StructuralMismatch>,
}

/// Collapse every line break (and the blanks around it) and trim the ends.
///
/// Lines are rejoined with a single space so sentences on adjacent lines stay
/// separable by the sentence splitter.
pub fn normalize(text: &str) -> String {
    text.split(&['\n', '\r'][..])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split raw text on the three headings.
///
/// Each heading is matched as a literal substring followed by `\n` and removed.
/// Anything before the first heading is kept as part of the introduction.
/// If the headings do not occur exactly once each, in order, the whole
/// normalized text comes back as a single `Whole` section.
pub fn parse_sections(text: &str, headings: &[String; 3]) -> ParsedText {
    let text = text.replace("\r\n", "\n");
    let markers: Vec<String> = headings.iter().map(|h| format!("{h}\n")).collect();

    let headings_found: usize = markers
        .iter()
        .map(|marker| text.matches(marker.as_str()).count())
        .sum();

    let ordered = if headings_found == markers.len() {
        locate_in_order(&text, &markers)
    } else {
        None
    };

    match ordered {
        Some([intro_span, forecast_span, farewell_span]) => {
            let preamble = &text[..intro_span.0];
            let intro = &text[intro_span.1..forecast_span.0];
            let forecast = &text[forecast_span.1..farewell_span.0];
            let farewell = &text[farewell_span.1..];

            let intro_text = normalize(&format!("{preamble}\n{intro}"));

            ParsedText {
                layout: Layout::Structured,
                sections: vec![
                    Section {
                        kind: SectionKind::Introduction,
                        text: intro_text,
                    },
                    Section {
                        kind: SectionKind::Forecast,
                        text: normalize(forecast),
                    },
                    Section {
                        kind: SectionKind::Farewell,
                        text: normalize(farewell),
                    },
                ],
                mismatch: None,
            }
        }
        None => ParsedText {
            layout: Layout::Unstructured,
            sections: vec![Section {
                kind: SectionKind::Whole,
                text: normalize(&text),
            }],
            mismatch: Some(StructuralMismatch {
                headings_found,
                expected: markers.len(),
            }),
        },
    }
}

/// Byte ranges of each marker, searching each one after the previous match
fn locate_in_order(text: &str, markers: &[String]) -> Option<[(usize, usize); 3]> {
    let mut spans = [(0usize, 0usize); 3];
    let mut cursor = 0;

    for (slot, marker) in spans.iter_mut().zip(markers) {
        let start = cursor + text.get(cursor..)?.find(marker.as_str())?;
        let end = start + marker.len();
        *slot = (start, end);
        cursor = end;
    }

    Some(spans)
}
