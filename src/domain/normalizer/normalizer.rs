//! Response normalizer

use serde::{Deserialize, Serialize};

use super::rules::{strip_artifact_suffix, truncate_at_sentence_boundary};

/// How aggressively raw output is cleaned up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizerStrictness {
    /// Trim and strip trailing numeric artifacts only
    Lenient,
    /// Additionally cut the text back to the last complete sentence
    #[default]
    Strict,
}

/// Deterministic cleanup of raw generated text.
///
/// `normalize` is pure and idempotent: normalizing its own output is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseNormalizer {
    strictness: NormalizerStrictness,
}

impl ResponseNormalizer {
    pub fn new(strictness: NormalizerStrictness) -> Self {
        Self { strictness }
    }

    pub fn strictness(&self) -> NormalizerStrictness {
        self.strictness
    }

    /// Normalize raw model output into a trimmed, sentence-bounded answer
    pub fn normalize(&self, raw: &str) -> String {
        let stripped = strip_artifact_suffix(raw.trim());

        let normalized = match self.strictness {
            NormalizerStrictness::Lenient => stripped,
            NormalizerStrictness::Strict => {
                truncate_at_sentence_boundary(stripped).unwrap_or(stripped)
            }
        };

        normalized.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict() -> ResponseNormalizer {
        ResponseNormalizer::new(NormalizerStrictness::Strict)
    }

    fn lenient() -> ResponseNormalizer {
        ResponseNormalizer::new(NormalizerStrictness::Lenient)
    }

    #[test]
    fn test_default_is_strict() {
        assert_eq!(
            ResponseNormalizer::default().strictness(),
            NormalizerStrictness::Strict
        );
    }

    #[test]
    fn test_removes_trailing_artifact() {
        assert_eq!(strict().normalize("The answer is 42. 3"), "The answer is");
    }

    #[test]
    fn test_keeps_course_code() {
        assert_eq!(
            strict().normalize("This is ECE 564.2 material."),
            "This is ECE 564.2 material."
        );
    }

    #[test]
    fn test_no_periods_unchanged() {
        assert_eq!(strict().normalize("No periods here"), "No periods here");
    }

    #[test]
    fn test_trailing_space_trimmed() {
        assert_eq!(strict().normalize("Trailing space.   "), "Trailing space.");
    }

    #[test]
    fn test_leading_whitespace_trimmed() {
        assert_eq!(strict().normalize("\n  Hello there."), "Hello there.");
    }

    #[test]
    fn test_drops_incomplete_trailing_sentence() {
        assert_eq!(
            strict().normalize("The course covers iOS development. It also inclu"),
            "The course covers iOS development."
        );
    }

    #[test]
    fn test_drops_dangling_list_number() {
        assert_eq!(
            strict().normalize("The results are as shown in Table 4. 5."),
            "The results are as shown in Table 4."
        );
    }

    #[test]
    fn test_artifact_then_truncation() {
        assert_eq!(
            strict().normalize("Office hours are on Monday. They last 1. 2"),
            "Office hours are on Monday."
        );
    }

    #[test]
    fn test_only_numeric_fragment_is_left_alone() {
        assert_eq!(strict().normalize("1."), "1.");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(strict().normalize(""), "");
        assert_eq!(strict().normalize("   "), "");
    }

    #[test]
    fn test_lenient_keeps_incomplete_sentence() {
        assert_eq!(
            lenient().normalize("First sentence. Second one is cut 12. 3"),
            "First sentence. Second one is cut"
        );
    }

    #[test]
    fn test_idempotent_on_examples() {
        let samples = [
            "The answer is 42. 3",
            "This is ECE 564.2 material.",
            "No periods here",
            "Trailing space.   ",
            "A. B. 1.",
            "Done. 1.2 3.4",
            "1. First point. 2",
            "x.y.z",
            " . . 1 . ",
            "Ends with number 7.",
            "Version 2.0 is out. Next",
        ];

        for normalizer in [strict(), lenient()] {
            for sample in samples {
                let once = normalizer.normalize(sample);
                let twice = normalizer.normalize(&once);
                assert_eq!(once, twice, "not idempotent for {:?}", sample);
            }
        }
    }

    #[test]
    fn test_idempotent_exhaustive_short_strings() {
        const ALPHABET: [char; 5] = ['a', '1', ' ', '.', '\n'];
        const MAX_LEN: u32 = 6;

        for normalizer in [strict(), lenient()] {
            for len in 0..=MAX_LEN {
                for mut n in 0..ALPHABET.len().pow(len) {
                    let mut sample = String::new();
                    for _ in 0..len {
                        sample.push(ALPHABET[n % ALPHABET.len()]);
                        n /= ALPHABET.len();
                    }

                    let once = normalizer.normalize(&sample);
                    let twice = normalizer.normalize(&once);

                    assert_eq!(once, twice, "not idempotent for {:?}", sample);
                    assert_eq!(once, once.trim(), "not trimmed for {:?}", sample);
                }
            }
        }
    }
}
