use std::fmt;

use mood_core::{Result, Sentiment};

use super::SentimentModel;

const POSITIVE_WORDS: &[&str] = &[
    "love", "loved", "enjoy", "enjoying", "great", "good", "wonderful", "excellent", "happy",
    "amazing", "fantastic", "best", "nice",
];

const NEGATIVE_WORDS: &[&str] = &[
    "hate", "hated", "angry", "terrible", "awful", "bad", "horrible", "worst", "sad",
    "disappointed", "disappointing", "annoying", "poor",
];

/// Lexicon-backed stand-in for the real classifier.
///
/// Deterministic and dependency-free, so tests and offline runs can exercise
/// the full request path without downloading weights.
pub struct DummyModel;

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

#[async_trait::async_trait]
impl SentimentModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn classify(&self, text: &str) -> Result<Sentiment> {
        let mut positive = 0usize;
        let mut negative = 0usize;
        for word in text.split_whitespace() {
            let word: String = word
                .chars()
                .filter(|c| c.is_alphabetic())
                .collect::<String>()
                .to_lowercase();
            if POSITIVE_WORDS.contains(&word.as_str()) {
                positive += 1;
            }
            if NEGATIVE_WORDS.contains(&word.as_str()) {
                negative += 1;
            }
        }

        let (label, hits) = if negative > positive {
            ("NEGATIVE", negative)
        } else {
            ("POSITIVE", positive)
        };
        let total = positive + negative;
        let score = if total == 0 {
            0.5
        } else {
            0.5 + 0.5 * hits as f32 / total as f32
        };

        Ok(Sentiment {
            label: label.to_string(),
            score: score.min(1.0),
        })
    }
}
