//! Spamham web service
//!
//! Form UI, JSON API and CLI on top of [`spamham_classifiers`].

pub mod cli;
pub mod config;
pub mod pages;
pub mod server;
pub mod state;

pub use cli::*;
pub use config::*;
pub use server::{build_app, run_server};
pub use state::*;
