use crate::normalize::normalize_row;
use crate::reader::{read_report, RawTable};
use crate::{Catalog, LoadStats, ReportScanner, Result};
use orgchart_protocol::columns;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const DEFAULT_REPORT_NAME: &str = "100 WD Report";

/// Where to find the report and how to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub data_dir: PathBuf,
    /// Substring the report's file name must contain
    pub base_name: String,
    /// fnmatch-style patterns, e.g. `*.xlsx`
    pub extensions: Vec<String>,
    /// Banner rows above the header row
    pub skip_rows: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            base_name: DEFAULT_REPORT_NAME.to_string(),
            extensions: vec!["*.xlsx".to_string(), "*.csv".to_string()],
            skip_rows: 1,
        }
    }
}

impl LoaderConfig {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }
}

/// Locates, parses and indexes the report.
///
/// Missing or unreadable files are errors. A report lacking required columns
/// still yields a catalog, empty and marked degraded.
pub fn load_catalog(config: &LoaderConfig) -> Result<Catalog> {
    let path = ReportScanner::from_config(config)?.locate()?;
    load_catalog_from_path(&path, config.skip_rows)
}

pub fn load_catalog_from_path(path: &Path, skip_rows: usize) -> Result<Catalog> {
    let started = Instant::now();
    let table = read_report(path, skip_rows)?;
    let mut catalog = catalog_from_table(&table).with_source(path);

    let mut stats = catalog.stats().clone();
    stats.time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    catalog = catalog.with_stats(stats);

    if catalog.load_status().is_loaded() {
        let stats = catalog.stats();
        log::info!(
            "Loaded {} employees in {} groups from {} ({} rows rejected, {} ms)",
            stats.rows_kept,
            stats.groups,
            path.display(),
            stats.rows_rejected,
            stats.time_ms
        );
    }
    Ok(catalog)
}

/// Normalizes every row of an already-parsed table and builds the catalog.
pub fn catalog_from_table(table: &RawTable) -> Catalog {
    let missing = columns::missing_required(table.headers().iter().map(String::as_str));
    if !missing.is_empty() {
        let reason = format!("Missing columns in the dataset - {}", missing.join(", "));
        log::warn!("{reason}; starting with an empty catalog");
        let stats = LoadStats {
            rows_read: table.len(),
            ..LoadStats::default()
        };
        return Catalog::degraded(reason).with_stats(stats);
    }

    let mut stats = LoadStats::new();
    let mut records = Vec::with_capacity(table.len());
    for (idx, row) in table.rows().enumerate() {
        match normalize_row(&row) {
            Ok(record) => {
                stats.add_kept();
                records.push(record);
            }
            Err(reason) => {
                log::debug!("Skipping row {}: {reason}", idx + 1);
                stats.add_rejected(format!("row {}: {reason}", idx + 1));
            }
        }
    }

    Catalog::build(records).with_stats(stats)
}
