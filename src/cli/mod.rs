//! CLI module for the Video Sentiment API
//!
//! Provides subcommands:
//! - `serve`: HTTP API server
//! - `classify`: one-shot batch classification from a file or stdin

pub mod classify;
pub mod serve;

use clap::{Parser, Subcommand};

/// Video Sentiment API - comment sentiment over pretrained models
#[derive(Parser)]
#[command(name = "video-sentiment-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Classify one comment per line and print the batch result as JSON
    Classify(classify::ClassifyArgs),
}
