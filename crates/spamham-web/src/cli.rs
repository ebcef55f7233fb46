use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spamham")]
#[command(author, version, about = "Spam or Ham message prediction")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "spamham.yaml", env = "SPAMHAM_CONFIG", global = true)]
    pub config: PathBuf,

    /// Load artifacts from this local registry directory
    #[arg(long, env = "SPAMHAM_MODELS_DIR", global = true, conflicts_with = "store_url")]
    pub models_dir: Option<PathBuf>,

    /// Load artifacts from a registry served over HTTP
    #[arg(long, env = "SPAMHAM_STORE_URL", global = true)]
    pub store_url: Option<String>,

    /// Skip the classifier/vectorizer feature-count check
    #[arg(long, global = true)]
    pub no_verify_dimensions: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web UI and JSON API
    Serve {
        /// Listen address
        #[arg(short, long)]
        address: Option<String>,

        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Classify a single message and print the label
    Predict {
        /// Model to use
        #[arg(short, long, default_value = "Logistic Regression")]
        model: String,

        /// Message text
        text: String,
    },

    /// List the models that load from the configured store
    Models,
}
