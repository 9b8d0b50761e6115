pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod settings;
pub mod snippets;
pub mod staging;
pub mod web;

pub use config::Config;
pub use snippets::{Snippet, SnippetRegistry};
