/// Split text into sentence-like units.
///
/// A unit ends at a terminator that is followed by whitespace (or by the end
/// of the text). Units are trimmed; a unit may be longer than any limit.
pub fn split_sentences<'a>(text: &'a str, terminators: &[char]) -> Vec<&'a str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !terminators.contains(&ch) {
            continue;
        }

        let at_boundary = match chars.peek() {
            Some(&(_, next)) => next.is_whitespace(),
            None => true,
        };
        if !at_boundary {
            continue;
        }

        let end = idx + ch.len_utf8();
        let sentence = text[start..end].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = end;
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }

    sentences
}

/// Greedily pack whole sentences into segments of at most `budget` chars.
///
/// First-fit: a segment is closed as soon as the next sentence would push it
/// over the budget. Sentences are joined with a single space. A sentence that
/// alone exceeds the budget becomes its own oversized segment; bisecting it is
/// left to [`super::limits::bisect_oversized`].
pub fn pack_sentences(text: &str, budget: usize, terminators: &[char]) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return vec![];
    }

    // Short enough as a whole: no splitting at all
    if text.chars().count() <= budget {
        return vec![text.to_string()];
    }

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for sentence in split_sentences(text, terminators) {
        let sentence_len = sentence.chars().count();

        // Check if adding this sentence would exceed the limit
        if !current.is_empty() && current_len + 1 + sentence_len > budget {
            segments.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(sentence);
        current_len += sentence_len;
    }

    // Flush remaining sentences
    if !current.is_empty() {
        segments.push(current);
    }

    segments
}
