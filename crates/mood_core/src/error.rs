use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Startup error: {0}")]
    Startup(String),

    #[error("State error: {0}")]
    State(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Model error: {0}")]
    Model(#[from] candle_core::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
