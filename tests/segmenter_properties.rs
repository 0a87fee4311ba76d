//! Property tests for the forecast segmenter.
//!
//! - Every segment fits the limit, counter prefix included
//! - Counters run 1/N..N/N
//! - Bodies reassemble into the input (ignoring whitespace and headings)
//! - Segmenting is deterministic

use proptest::prelude::*;
use weatherbot::{Layout, Segmenter, SegmenterConfig};

fn squash(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn word() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z]{1,12}",
        "[a-z]{1,8}[.!?]",
        "[0-9]{1,2}\\.[0-9]",
        "(☀️|🌧|❄|é|ü){1,3}",
        Just("\n".to_string()),
        "[a-z]{40,90}",
    ]
}

fn prose() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 0..400).prop_map(|words| words.join(" "))
}

fn forecast() -> impl Strategy<Value = (String, bool)> {
    prop_oneof![
        prose().prop_map(|text| (text, false)),
        (prose(), prose(), prose()).prop_map(|(intro, body, bye)| {
            (
                format!("1: Introduction\n{intro}\n2: Forecast\n{body}\n3: Farewell\n{bye}"),
                true,
            )
        }),
    ]
}

proptest! {
    /// Property: every segment fits, prefix included
    #[test]
    fn prop_segments_fit_limit((text, _) in forecast(), max in 40usize..600) {
        let config = SegmenterConfig::default().max_segment_length(max);
        let batch = Segmenter::new(config).unwrap().segment(&text).unwrap();

        for segment in batch.iter() {
            prop_assert!(
                segment.char_len() <= max,
                "segment {} is {} chars, limit {}",
                segment.counter(),
                segment.char_len(),
                max
            );
        }
    }

    /// Property: counters are contiguous and carry the real total
    #[test]
    fn prop_counters_contiguous((text, _) in forecast(), max in 40usize..600) {
        let config = SegmenterConfig::default().max_segment_length(max);
        let batch = Segmenter::new(config).unwrap().segment(&text).unwrap();
        let total = batch.len();

        for (i, segment) in batch.iter().enumerate() {
            let prefix = format!("{}/{}\n", i + 1, total);
            prop_assert!(segment.text.starts_with(&prefix));
            prop_assert_eq!(segment.body(), &segment.text[prefix.len()..]);
        }
    }

    /// Property: bodies reassemble the text minus whitespace and headings
    #[test]
    fn prop_round_trip((text, structured) in forecast(), max in 40usize..600) {
        let config = SegmenterConfig::default().max_segment_length(max);
        let batch = Segmenter::new(config).unwrap().segment(&text).unwrap();

        let expected = if structured && batch.layout == Layout::Structured {
            text.replace("1: Introduction\n", "")
                .replace("2: Forecast\n", "")
                .replace("3: Farewell\n", "")
        } else {
            text.clone()
        };

        prop_assert_eq!(squash(&batch.bodies().concat()), squash(&expected));
    }

    /// Property: same input and config, same batch
    #[test]
    fn prop_deterministic((text, _) in forecast()) {
        let segmenter = Segmenter::new(SegmenterConfig::default()).unwrap();
        prop_assert_eq!(segmenter.segment(&text).unwrap(), segmenter.segment(&text).unwrap());
    }
}
