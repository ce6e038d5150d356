pub mod ask;
pub mod chat;
pub mod config;
pub mod ingest;
pub mod status;
pub mod ui;

pub use ask::handle_ask;
pub use chat::handle_chat;
pub use config::handle_config;
pub use ingest::handle_ingest;
pub use status::handle_status;

use anyhow::Result;
use chatpdf_config::{Config, ConfigBuilder, Credentials};
use chatpdf_core::ChatPdfError;
use chatpdf_pipeline::Pipeline;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chatpdf")]
#[command(about = "Ask questions about your PDF files, answered by Gemini")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to .chatpdf.{toml,yml,yaml,json} in the working directory)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the processed index
    #[arg(long, value_name = "DIR", global = true)]
    pub index_dir: Option<PathBuf>,

    /// Number of chunks retrieved per question
    #[arg(long, value_name = "N", global = true)]
    pub top_k: Option<usize>,

    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract, chunk and embed PDF files, replacing the saved index
    Ingest {
        /// PDF files to process
        #[arg(value_name = "PDF")]
        pdfs: Vec<PathBuf>,
    },
    /// Answer one question from the processed PDF files
    Ask {
        /// The question
        question: String,
        /// Print the retrieved chunks under the answer
        #[arg(long)]
        sources: bool,
    },
    /// Interactive session; optionally process PDF files first
    Chat {
        #[arg(value_name = "PDF")]
        pdfs: Vec<PathBuf>,
        /// Print the retrieved chunks under each answer
        #[arg(long)]
        sources: bool,
    },
    /// Show what is saved at the index location
    Status,
    /// Print the effective configuration
    Config,
}

/// defaults < config file < CHATPDF_* environment < command-line flags
pub fn load_config(cli: &Cli) -> Result<Config> {
    let builder = match &cli.config {
        Some(path) => ConfigBuilder::new().with_file(path),
        None => ConfigBuilder::new().with_default_file(),
    };

    let mut overrides = Config::default();
    if let Some(dir) = &cli.index_dir {
        overrides.storage.index_dir = dir.clone();
    }
    if let Some(top_k) = cli.top_k {
        overrides.search.top_k = top_k;
    }

    Ok(builder.with_env().with_config(overrides).build()?)
}

/// Pipeline over the hosted models; fails fast when the API key is not set
pub fn open_pipeline(config: &Config) -> Result<Pipeline> {
    let credentials = Credentials::from_env(&config.api).map_err(ChatPdfError::from)?;
    Ok(Pipeline::from_config(config, credentials)?)
}
