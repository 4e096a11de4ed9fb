//! Candidate-sentence extraction.
//!
//! Filters raw document text down to the sentences long enough to carry a
//! quiz question.

/// Sentence terminator the splitter recognizes.
pub const SENTENCE_TERMINATOR: char = '.';

/// A fragment qualifies when its word count is strictly above this.
pub const MIN_WORDS: usize = 5;

/// Number of whitespace-delimited words in a fragment.
pub fn word_count(fragment: &str) -> usize {
    fragment.split_whitespace().count()
}

/// Split `text` on the sentence terminator and keep the fragments whose
/// word count exceeds [`MIN_WORDS`].
///
/// Document order is preserved. Empty input yields an empty vector, not an
/// error.
pub fn qualifying_sentences(text: &str) -> Vec<String> {
    text.split(SENTENCE_TERMINATOR)
        .filter(|s| word_count(s) > MIN_WORDS)
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(qualifying_sentences("").is_empty());
        assert!(qualifying_sentences("   \n ").is_empty());
    }

    #[test]
    fn short_fragments_are_discarded() {
        let text = "too short. also short here. ok.";
        assert!(qualifying_sentences(text).is_empty());
    }

    #[test]
    fn word_count_boundary_is_strict() {
        // exactly five words does not qualify, six does
        let five = "one two three four five.";
        let six = "one two three four five six.";
        assert!(qualifying_sentences(five).is_empty());
        assert_eq!(qualifying_sentences(six).len(), 1);
    }

    #[test]
    fn document_order_is_preserved() {
        let text = "the first sentence has enough words here. skip. \
                    the second sentence also has enough words here.";
        let sentences = qualifying_sentences(text);
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].contains("first"));
        assert!(sentences[1].contains("second"));
    }

    #[test]
    fn counts_words_across_whitespace_runs() {
        assert_eq!(word_count("  a   b\tc \n d "), 4);
        assert_eq!(word_count(""), 0);
    }
}
