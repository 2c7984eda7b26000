use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use mood_core::{Error, Result};
use mood_inference::{create_model, Config, SentimentModel};
use tokio::sync::RwLock;
use tracing::info;

enum ModelSlot {
    NotStarted,
    Ready(Arc<dyn SentimentModel>),
    Stopped,
}

/// Process-wide request-spanning state: the classifier handle and the
/// greeting call counter. Constructed explicitly and passed to handlers so
/// tests can build isolated instances.
pub struct AppState {
    model: RwLock<ModelSlot>,
    calls: AtomicU64,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            model: RwLock::new(ModelSlot::NotStarted),
            calls: AtomicU64::new(0),
        }
    }

    /// Loads the classifier and stores the handle. Must run to completion
    /// before the router serves its first request; a loader failure
    /// propagates and aborts startup.
    pub async fn on_startup(&self, config: Config) -> Result<()> {
        let model = create_model(Some(config)).await?;
        info!(
            "🧠 Sentiment model initialized successfully (using {})",
            model.name()
        );
        *self.model.write().await = ModelSlot::Ready(model);
        Ok(())
    }

    /// Releases the classifier handle. Runs after the server has drained
    /// in-flight requests.
    pub async fn on_shutdown(&self) {
        *self.model.write().await = ModelSlot::Stopped;
    }

    /// Returns the classifier handle, or a state error when called outside
    /// the startup..shutdown window.
    pub async fn model(&self) -> Result<Arc<dyn SentimentModel>> {
        match &*self.model.read().await {
            ModelSlot::Ready(model) => Ok(model.clone()),
            ModelSlot::NotStarted => Err(Error::State(
                "classifier requested before startup completed".to_string(),
            )),
            ModelSlot::Stopped => Err(Error::State(
                "classifier requested after shutdown".to_string(),
            )),
        }
    }

    /// Atomic increment-and-read. Concurrent callers each observe a unique
    /// value of the gap-free sequence 1..N.
    pub fn next_call(&self) -> u64 {
        self.calls.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_config() -> Config {
        Config {
            model_name: Some("dummy".to_string()),
            model_dir: None,
        }
    }

    #[tokio::test]
    async fn test_model_unavailable_before_startup() {
        let state = AppState::new();
        assert!(matches!(state.model().await, Err(Error::State(_))));
    }

    #[tokio::test]
    async fn test_model_available_between_startup_and_shutdown() {
        let state = AppState::new();
        state.on_startup(dummy_config()).await.unwrap();
        assert!(state.model().await.is_ok());

        state.on_shutdown().await;
        assert!(matches!(state.model().await, Err(Error::State(_))));
    }

    #[tokio::test]
    async fn test_concurrent_calls_observe_gap_free_sequence() {
        let state = Arc::new(AppState::new());
        let mut handles = Vec::new();
        for _ in 0..100 {
            let state = state.clone();
            handles.push(tokio::spawn(async move { state.next_call() }));
        }

        let mut seen = Vec::with_capacity(100);
        for handle in handles {
            seen.push(handle.await.unwrap());
        }
        seen.sort_unstable();
        let expected: Vec<u64> = (1..=100).collect();
        assert_eq!(seen, expected);
    }
}
