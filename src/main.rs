use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use safescan::api::start_server;
use safescan::model::{load_classifier, ClassifierAdapter};
use safescan::pipeline::{HeuristicEngine, UrlClassifierService};
use safescan::utils::logger::init_logger;

#[derive(Debug, Parser)]
#[command(name = "safescan", about = "URL safety classification API server")]
struct Args {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Path to the classifier artifact
    #[arg(long, default_value = "models/url_classifier.json")]
    model: PathBuf,

    /// Path to the scaler artifact
    #[arg(long, default_value = "models/scaler.json")]
    scaler: PathBuf,

    /// Directory for log files
    #[arg(long, default_value = "logs")]
    log_dir: String,
}

#[actix_web::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logger; a logging failure is not fatal for the service
    let _ = init_logger(&args.log_dir);

    // Load the model and scaler; on failure the service still starts,
    // answering with the heuristic fallback instead of crashing
    let service = match load_classifier(&args.model, &args.scaler) {
        Ok((forest, scaler)) => {
            info!("Classifier loaded, serving model-backed predictions");
            UrlClassifierService::new(
                Some(ClassifierAdapter::new(forest, scaler)),
                HeuristicEngine::default(),
            )
        }
        Err(e) => {
            warn!("Error loading model or scaler: {}", e);
            warn!("Running in heuristics-only mode");
            UrlClassifierService::without_classifier(HeuristicEngine::default())
        }
    };

    start_server(&args.host, args.port, Arc::new(service)).await
}
