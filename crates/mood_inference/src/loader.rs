use std::path::{Path, PathBuf};

use hf_hub::api::tokio::Api;
use mood_core::{Error, Result};
use tracing::{info, warn};

/// Checkpoint used when no local override is configured.
pub const DEFAULT_MODEL_ID: &str = "distilbert-base-uncased-finetuned-sst-2-english";

const CONFIG_FILE: &str = "config.json";
const TOKENIZER_FILE: &str = "tokenizer.json";
const WEIGHTS_FILE: &str = "model.safetensors";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    Local(PathBuf),
    Hub(String),
}

/// Picks the model source for this process.
///
/// An override that points at a missing directory is not fatal: the service
/// still starts on the default checkpoint, and the rejected path is surfaced
/// to operators in the log.
pub fn resolve_source(override_dir: Option<&Path>) -> ModelSource {
    match override_dir {
        Some(dir) if dir.is_dir() => ModelSource::Local(dir.to_path_buf()),
        Some(dir) => {
            warn!(
                "configured model path {} does not exist, falling back to {}",
                dir.display(),
                DEFAULT_MODEL_ID
            );
            ModelSource::Hub(DEFAULT_MODEL_ID.to_string())
        }
        None => ModelSource::Hub(DEFAULT_MODEL_ID.to_string()),
    }
}

#[derive(Debug)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
}

/// Resolves the three classifier artifacts for the chosen source.
///
/// A failure here aborts startup; there is no retry policy.
pub async fn fetch(source: &ModelSource) -> Result<ModelFiles> {
    match source {
        ModelSource::Local(dir) => {
            info!("📂 Loading sentiment model from local path {}", dir.display());
            let files = ModelFiles {
                config: dir.join(CONFIG_FILE),
                tokenizer: dir.join(TOKENIZER_FILE),
                weights: dir.join(WEIGHTS_FILE),
            };
            for path in [&files.config, &files.tokenizer, &files.weights] {
                if !path.is_file() {
                    return Err(Error::Startup(format!(
                        "model file {} is missing",
                        path.display()
                    )));
                }
            }
            Ok(files)
        }
        ModelSource::Hub(model_id) => {
            info!("🌍 Fetching sentiment model {} from the hub", model_id);
            let api = Api::new()
                .map_err(|e| Error::Startup(format!("hub api unavailable: {e}")))?;
            let repo = api.model(model_id.clone());
            let config = repo
                .get(CONFIG_FILE)
                .await
                .map_err(|e| Error::Startup(format!("fetching {CONFIG_FILE}: {e}")))?;
            let tokenizer = repo
                .get(TOKENIZER_FILE)
                .await
                .map_err(|e| Error::Startup(format!("fetching {TOKENIZER_FILE}: {e}")))?;
            let weights = repo
                .get(WEIGHTS_FILE)
                .await
                .map_err(|e| Error::Startup(format!("fetching {WEIGHTS_FILE}: {e}")))?;
            Ok(ModelFiles {
                config,
                tokenizer,
                weights,
            })
        }
    }
}
