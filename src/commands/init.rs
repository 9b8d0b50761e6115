use anyhow::{bail, Result};
use std::path::Path;
use tracing::info;

use crate::Config;

pub async fn run(root: &Path, force: bool) -> Result<()> {
    let config_path = Config::config_path(root);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    Config::default().save(root)?;

    info!("Wrote default configuration to {:?}", config_path);
    println!("✓ Created {} with default configuration", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit the file to set the plugin root, port or auth tokens");
    println!("  2. Run 'monaco-prompt serve' to start the server");

    Ok(())
}
