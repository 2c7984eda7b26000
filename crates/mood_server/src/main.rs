use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use mood_inference::Config;
use mood_web::{create_app, AppState};
use tracing::{info, warn};

const MODEL_DIR_ENV: &str = "MOOD_MODEL_DIR";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "0.0.0.0:8080")]
    addr: String,
    /// Local directory holding the classifier artifacts; overrides MOOD_MODEL_DIR
    #[arg(long)]
    model_dir: Option<PathBuf>,
    #[arg(
        long,
        default_value = "distilbert",
        help = "Model to use for inference. Available models: distilbert (default), dummy"
    )]
    model: String,
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {}", e);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .compact()
        .init();

    let cli = Cli::parse();

    let model_dir = cli
        .model_dir
        .or_else(|| env::var_os(MODEL_DIR_ENV).map(PathBuf::from));

    let config = Config {
        model_name: Some(cli.model),
        model_dir,
    };

    let state = Arc::new(AppState::new());
    state.on_startup(config).await?;

    let app = create_app(state.clone());

    let listener = tokio::net::TcpListener::bind(&cli.addr).await?;
    info!("🌐 Listening on {}", cli.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.on_shutdown().await;
    info!("Classifier released, exiting");

    Ok(())
}
