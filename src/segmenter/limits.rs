use super::batch::Segment;

/// Character length, the unit the posting limit is measured in
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Longest possible `i/N\n` prefix for a batch of `total` segments
pub fn prefix_reserve(total: usize) -> usize {
    prefix_reserve_for_digits(digit_count(total))
}

pub(crate) fn prefix_reserve_for_digits(digits: usize) -> usize {
    // "{index}/{total}\n", index never wider than total
    2 * digits + 2
}

pub(crate) fn digit_count(mut n: usize) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Replace every segment longer than `budget` with its two halves, repeating
/// full scans until nothing exceeds the budget.
///
/// Halves are cut at the midpoint character index with no regard for words
/// or sentences.
pub fn bisect_oversized(mut segments: Vec<String>, budget: usize) -> Vec<String> {
    let budget = budget.max(1);

    while segments.iter().any(|s| char_len(s) > budget) {
        segments = segments
            .into_iter()
            .flat_map(|segment| {
                let len = char_len(&segment);
                if len > budget {
                    let (left, right) = split_at_char(&segment, len / 2);
                    vec![left.to_string(), right.to_string()]
                } else {
                    vec![segment]
                }
            })
            .collect();
    }

    segments
}

fn split_at_char(text: &str, mid: usize) -> (&str, &str) {
    let byte_idx = text
        .char_indices()
        .nth(mid)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    text.split_at(byte_idx)
}

/// Prefix each body with `"{index+1}/{total}\n"`.
///
/// Runs once the sequence is final so every counter agrees with the real
/// total. With `number_single` off, a lone segment is left unnumbered.
pub fn number_segments(bodies: Vec<String>, number_single: bool) -> Vec<Segment> {
    let total = bodies.len();

    bodies
        .into_iter()
        .enumerate()
        .map(|(index, body)| {
            if total == 1 && !number_single {
                return Segment {
                    text: body,
                    index,
                    total,
                    prefix_len: 0,
                };
            }

            let prefix = format!("{}/{}\n", index + 1, total);
            let prefix_len = prefix.len();
            Segment {
                text: prefix + &body,
                index,
                total,
                prefix_len,
            }
        })
        .collect()
}
