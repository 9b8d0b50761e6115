//! `monaco-prompt csv`: stage bundled CSV dictionaries.

use anyhow::{Context, Result};
use std::path::Path;

use crate::staging::CsvStager;
use crate::Config;

pub async fn run(root: &Path, config: &Config) -> Result<()> {
    let stager = CsvStager::new(config.csv_source_dir(root), config.served_dir(root));

    let (copied, served) = tokio::task::spawn_blocking(move || -> Result<_> {
        let copied = stager.stage()?;
        Ok((copied, stager.list()?))
    })
    .await
    .context("CSV staging task failed")??;

    for name in &copied {
        println!("+ {name}");
    }
    println!("{} staged, {} served:", copied.len(), served.len());
    for name in &served {
        println!("  {name}");
    }

    Ok(())
}
