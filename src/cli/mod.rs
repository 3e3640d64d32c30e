//! CLI module for the answer service
//!
//! - `serve`: HTTP server exposing `/process` and health checks
//! - `ask`: run one question through the pipeline and print the response

pub mod ask;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Grounded answer service - retrieval-augmented generation over a pre-indexed corpus
#[derive(Parser)]
#[command(name = "rag-answer-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(serve::ServeArgs),

    /// Answer a single question and exit
    Ask(ask::AskArgs),
}

/// Load `.env`, layered configuration and the tracing subscriber
fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}
