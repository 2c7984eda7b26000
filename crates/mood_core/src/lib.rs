pub mod error;

pub use error::{Error, Result};

/// A single classification outcome: the model's label for the input text and
/// the probability assigned to that label.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Sentiment {
    pub label: String,
    pub score: f32,
}
