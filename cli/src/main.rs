mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{ui, Cli, Commands};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    // Variables already set in the environment take precedence over `.env`
    let dotenv = dotenvy::dotenv();
    init_logging(cli.verbose);

    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Ignoring unreadable .env file: {}", e),
    }

    if let Err(err) = run(cli) {
        ui::print_failure(&err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = commands::load_config(&cli)?;
    info!(
        "Using index at {} (top_k {}, embedding model {})",
        config.storage.index_dir.display(),
        config.search.top_k,
        config.embedding.model_name
    );

    match cli.command {
        Commands::Ingest { pdfs } => commands::handle_ingest(&config, &pdfs),
        Commands::Ask { question, sources } => commands::handle_ask(&config, &question, sources),
        Commands::Chat { pdfs, sources } => commands::handle_chat(&config, &pdfs, sources),
        Commands::Status => commands::handle_status(&config),
        Commands::Config => commands::handle_config(&config),
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,cli=info,chatpdf_config=info,chatpdf_core=info,chatpdf_index=info,chatpdf_pipeline=info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
