//! Sentence segmentation for narration
//!
//! Splits a complete LLM reply into the sentence list the playback loop
//! iterates over. The synthesizer works best on sentence-sized input, so
//! fragments below a minimum length are merged into their neighbor.

/// Fragments shorter than this are merged into the following sentence.
const MIN_SENTENCE_CHARS: usize = 4;

/// Abbreviations whose trailing period does not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "Mr.", "Mrs.", "Ms.", "Dr.", "Prof.", "Sr.", "Jr.", "St.", "vs.", "etc.", "e.g.", "i.e.",
    "approx.", "No.",
];

/// Split text into speakable sentences.
///
/// Boundaries are `.`, `!`, or `?` followed by whitespace or end of input.
/// Empty and whitespace-only pieces are dropped. Returns an empty vector
/// when nothing speakable remains.
pub fn split_into_sentences(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let mut sentences: Vec<String> = Vec::new();
    let mut current = String::new();

    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    for (i, &c) in chars.iter().enumerate() {
        current.push(c);

        if !is_terminator(c) {
            continue;
        }

        let at_end = i + 1 == len;
        let followed_by_space = !at_end && chars[i + 1].is_whitespace();
        if !(at_end || followed_by_space) {
            // Mid-token punctuation, e.g. "3.5" or "example.com"
            continue;
        }

        if c == '.' && ends_with_abbreviation(&current) {
            continue;
        }

        flush(&mut current, &mut sentences);
    }

    flush(&mut current, &mut sentences);

    merge_short_fragments(sentences)
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn ends_with_abbreviation(s: &str) -> bool {
    // The abbreviation must be a whole word, not the tail of one
    ABBREVIATIONS.iter().any(|abbr| {
        s.strip_suffix(abbr)
            .is_some_and(|head| head.chars().next_back().map_or(true, char::is_whitespace))
    })
}

fn flush(current: &mut String, sentences: &mut Vec<String>) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    current.clear();
}

/// Merge stubs below the minimum length into the sentence that follows
/// (or the one that precedes, for a trailing stub).
fn merge_short_fragments(sentences: Vec<String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(sentences.len());
    let mut carry = String::new();

    for sentence in sentences {
        if !carry.is_empty() {
            let combined = format!("{carry} {sentence}");
            carry.clear();
            if combined.len() < MIN_SENTENCE_CHARS {
                carry = combined;
            } else {
                merged.push(combined);
            }
            continue;
        }

        if sentence.len() < MIN_SENTENCE_CHARS {
            carry = sentence;
        } else {
            merged.push(sentence);
        }
    }

    if !carry.is_empty() {
        match merged.last_mut() {
            Some(last) => {
                last.push(' ');
                last.push_str(&carry);
            }
            None => merged.push(carry),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_split() {
        let sentences = split_into_sentences("First sentence. Second one! Third?");
        assert_eq!(
            sentences,
            vec!["First sentence.", "Second one!", "Third?"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(split_into_sentences("").is_empty());
        assert!(split_into_sentences("   \n\t ").is_empty());
    }

    #[test]
    fn test_no_terminator() {
        let sentences = split_into_sentences("a reply without closing punctuation");
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn test_decimal_not_split() {
        let sentences = split_into_sentences("Pi is roughly 3.14 in value. Neat.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].contains("3.14"));
    }

    #[test]
    fn test_abbreviation_not_split() {
        let sentences = split_into_sentences("Dr. Smith arrived early. She waited.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], "Dr. Smith arrived early.");
    }

    #[test]
    fn test_word_ending_in_abbreviation_still_splits() {
        // "divs." ends with "vs." but is an ordinary word
        let sentences = split_into_sentences("He fixed the divs. Then he left.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], "He fixed the divs.");
    }

    #[test]
    fn test_short_fragment_merged_forward() {
        let sentences = split_into_sentences("Ah. That explains everything we saw.");
        assert_eq!(sentences.len(), 1);
        assert!(sentences[0].starts_with("Ah."));
    }

    #[test]
    fn test_trailing_fragment_merged_backward() {
        let sentences = split_into_sentences("That explains everything we saw. Ok.");
        assert_eq!(sentences.len(), 1);
        assert!(sentences[0].ends_with("Ok."));
    }

    #[test]
    fn test_whitespace_only_pieces_dropped() {
        let sentences = split_into_sentences("One thing.    Another thing.");
        assert_eq!(sentences.len(), 2);
    }
}
