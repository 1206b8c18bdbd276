use crate::{IndexerError, LoaderConfig, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};

/// Finds the workforce report in a data directory by name substring and
/// extension pattern.
pub struct ReportScanner {
    dir: PathBuf,
    base_name: String,
    patterns: Vec<Pattern>,
}

impl ReportScanner {
    pub fn new(
        dir: impl AsRef<Path>,
        base_name: impl Into<String>,
        extensions: &[String],
    ) -> Result<Self> {
        let patterns = extensions
            .iter()
            .map(|raw| {
                Pattern::new(raw)
                    .map_err(|e| IndexerError::Other(format!("invalid extension pattern {raw}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
            base_name: base_name.into(),
            patterns,
        })
    }

    pub fn from_config(config: &LoaderConfig) -> Result<Self> {
        Self::new(&config.data_dir, config.base_name.clone(), &config.extensions)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Name-level match: contains the base name and fits one extension pattern.
    pub fn matches(&self, file_name: &str) -> bool {
        if Self::is_noise_file(file_name) {
            return false;
        }
        file_name.contains(&self.base_name)
            && self.patterns.iter().any(|pattern| pattern.matches(file_name))
    }

    /// True for paths directly inside the scanned directory that look like a report.
    pub fn is_report_path(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            return false;
        };
        let in_dir = match (path.parent(), self.dir.canonicalize().ok()) {
            (Some(parent), Some(dir)) => parent
                .canonicalize()
                .map(|parent| parent == dir)
                .unwrap_or(false),
            _ => true,
        };
        in_dir && self.matches(name)
    }

    /// First matching file in file-name order.
    pub fn locate(&self) -> Result<PathBuf> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Failed to read entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();

        let found = names.into_iter().find(|name| self.matches(name));
        match found {
            Some(name) => {
                let path = self.dir.join(name);
                log::info!("Found report {}", path.display());
                Ok(path)
            }
            None => Err(IndexerError::ReportNotFound {
                base_name: self.base_name.clone(),
                dir: self.dir.clone(),
            }),
        }
    }

    /// Office lock files and dotfiles share the report's name but are never data.
    fn is_noise_file(file_name: &str) -> bool {
        file_name.starts_with("~$") || file_name.starts_with('.')
    }
}
