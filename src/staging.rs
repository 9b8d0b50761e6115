//! CSV autocomplete file staging.
//!
//! Bundled CSV files live in a source directory that ships with the
//! extension. On request they are copied into the served directory, but only
//! when no file of the same name exists there yet, so edits made to the
//! served copies survive upgrades.

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const CSV_GLOB: &str = "*.csv";

/// Copies bundled CSV files into the served directory and lists them.
#[derive(Debug, Clone)]
pub struct CsvStager {
    source_dir: PathBuf,
    served_dir: PathBuf,
}

impl CsvStager {
    pub fn new(source_dir: PathBuf, served_dir: PathBuf) -> Self {
        Self {
            source_dir,
            served_dir,
        }
    }

    pub fn served_dir(&self) -> &Path {
        &self.served_dir
    }

    /// Copy every source CSV that is missing from the served directory.
    ///
    /// Returns the names of newly copied files.
    pub fn stage(&self) -> Result<Vec<String>> {
        fs::create_dir_all(&self.served_dir).with_context(|| {
            format!("Failed to create served directory {:?}", self.served_dir)
        })?;

        let mut copied = Vec::new();
        for source in csv_files(&self.source_dir)? {
            let Some(name) = source.file_name() else {
                continue;
            };
            let target = self.served_dir.join(name);
            if target.is_file() {
                continue;
            }

            fs::copy(&source, &target)
                .with_context(|| format!("Failed to copy {:?} to {:?}", source, target))?;

            let name = name.to_string_lossy().into_owned();
            info!(file = %name, "Staged csv file");
            copied.push(name);
        }

        Ok(copied)
    }

    /// Sorted basenames of the CSV files in the served directory.
    ///
    /// Names with more than one `.` are skipped: the editor derives the
    /// dictionary name from the part before the extension and rejects them.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = csv_files(&self.served_dir)?
            .into_iter()
            .filter_map(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
            .filter(|name| {
                let valid = name.matches('.').count() == 1;
                if !valid {
                    warn!(file = %name, "Skipping csv file with too many '.' in its name");
                }
                valid
            })
            .collect();

        names.sort();
        Ok(names)
    }

    /// Stage missing files, then list the served directory.
    pub fn stage_and_list(&self) -> Result<Vec<String>> {
        self.stage()?;
        self.list()
    }
}

/// Regular `*.csv` files directly in `dir`, dot-prefixed names excluded.
fn csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/{}", Pattern::escape(&dir.to_string_lossy()), CSV_GLOB);
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let paths = glob::glob_with(&pattern, options)
        .with_context(|| format!("Invalid csv glob pattern {:?}", pattern))?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(error = %e, "Skipping unreadable csv entry");
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();

    Ok(paths)
}
