//! Spamham
//!
//! Classifies short text messages as Spam or Ham with one of three fitted
//! models, through a web form, a JSON API, or the command line.

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use spamham_classifiers::{load_from_config, PredictionHandler};
use spamham_web::{run_server, AppConfig, AppState, Cli, Commands};
use std::net::SocketAddr;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = AppConfig::load(&cli.config, &cli)?;

    match cli.command {
        Commands::Serve { address, port } => {
            if let Some(address) = address {
                config.server.address = address;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let metrics_handle = init_metrics()?;
            let handler = load_handler(&config).await?;
            let state = AppState::new(handler)?.with_metrics(metrics_handle);

            let addr: SocketAddr = format!("{}:{}", config.server.address, config.server.port)
                .parse()
                .context("Invalid listen address")?;
            info!("Open http://{} in your browser", addr);

            run_server(state, addr).await?;
        }

        Commands::Predict { model, text } => {
            let handler = load_handler(&config).await?;
            let label = handler.predict(&text, &model)?;
            println!("The message is: {}", label);
        }

        Commands::Models => {
            let handler = load_handler(&config).await?;
            for name in handler.available_models() {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

/// Load every configured artifact; the service does not start without them
async fn load_handler(config: &AppConfig) -> Result<PredictionHandler> {
    info!("Loading artifacts...");
    let loaded = load_from_config(&config.artifacts).await.map_err(|e| {
        error!("Startup failed: {}", e);
        e
    })?;
    info!("Artifacts loaded, models: {:?}", loaded.model_names());
    Ok(loaded.into_handler())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("spamham=debug,spamham_web=debug,spamham_classifiers=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("spamham=info,spamham_web=info,spamham_classifiers=info,tower_http=warn")
        })
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "spamham_predictions_total",
        "Predictions served by model and label"
    );
    metrics::describe_counter!(
        "spamham_rejected_total",
        "Prediction requests rejected before reaching a model"
    );
    metrics::describe_histogram!(
        "spamham_prediction_latency_us",
        metrics::Unit::Microseconds,
        "Vectorize plus predict latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
