use std::path::PathBuf;

pub mod loader;
pub mod models;

/// Backend selection and model source override handed to [`create_model`].
///
/// `model_dir`, when set, points at a local directory holding the classifier
/// artifacts. A directory that does not exist falls back to the default hub
/// checkpoint rather than failing startup.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub model_name: Option<String>,
    pub model_dir: Option<PathBuf>,
}

pub use loader::{resolve_source, ModelSource, DEFAULT_MODEL_ID};
pub use models::{create_model, SentimentModel};

pub mod prelude {
    pub use super::models::{create_model, SentimentModel};
    pub use super::Config;
    pub use mood_core::{Error, Result, Sentiment};
}
