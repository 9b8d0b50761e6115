use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "monaco-prompt")]
#[command(author, version, about = "Asset server for the Monaco prompt editor")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Extension root directory (defaults to the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Scan plugin snippets and print them
    Snippets {
        /// Plugin root to scan (overrides config)
        #[arg(long)]
        plugin_root: Option<PathBuf>,

        /// Print the JSON the server would return
        #[arg(long)]
        json: bool,
    },

    /// Stage bundled CSV files and list the served ones
    Csv,
}
