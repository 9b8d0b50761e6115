use anyhow::{Context, Result};
use clap::Parser;

use monaco_prompt::cli::{Cli, Commands};
use monaco_prompt::config::Config;
use monaco_prompt::logging::{init_early_logging, init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Extension root: --root, else the current directory
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let config = match Config::load(&root) {
        Ok(config) => config,
        Err(e) => {
            init_early_logging();
            tracing::error!("{:#}", e);
            return Err(e);
        }
    };

    // The guard MUST be held until program exit to ensure logs are flushed
    let _logging_guard = init_logging(&config.logging, &root)?;

    tracing::debug!("Loaded configuration from: {}", root.display());

    match cli.command {
        Commands::Init { force } => {
            monaco_prompt::commands::init::run(&root, force).await?;
        }
        Commands::Serve { host, port } => {
            monaco_prompt::commands::serve::run(&root, config, host, port).await?;
        }
        Commands::Snippets { plugin_root, json } => {
            monaco_prompt::commands::snippets::run(&root, &config, plugin_root, json).await?;
        }
        Commands::Csv => {
            monaco_prompt::commands::csv::run(&root, &config).await?;
        }
    }

    Ok(())
}
