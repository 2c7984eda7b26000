use std::fmt;
use std::sync::Arc;

use mood_core::{Result, Sentiment};

use crate::loader;
use crate::Config;

pub mod distilbert;
pub mod dummy;

pub use distilbert::DistilBertClassifier;
pub use dummy::DummyModel;

/// A loaded text-sentiment classifier.
///
/// Handles are created once at startup, shared read-only across requests, and
/// dropped at shutdown. Classification is treated as an opaque, potentially
/// slow call; no timeout or retry semantics live at this level.
#[async_trait::async_trait]
pub trait SentimentModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    async fn classify(&self, text: &str) -> Result<Sentiment>;
}

/// Builds the classifier selected by `config.model_name`.
pub async fn create_model(config: Option<Config>) -> Result<Arc<dyn SentimentModel>> {
    let config = config.unwrap_or_default();
    match config.model_name.as_deref() {
        Some("dummy") => Ok(Arc::new(DummyModel::new())),
        _ => {
            let source = loader::resolve_source(config.model_dir.as_deref());
            let model = DistilBertClassifier::load(&source).await?;
            Ok(Arc::new(model))
        }
    }
}
