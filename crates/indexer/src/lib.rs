//! # Org Chart Indexer
//!
//! Loads the periodic workforce report and builds the immutable lookup
//! tables every query is answered from.
//!
//! ## Pipeline
//!
//! ```text
//! Data directory
//!     │
//!     ├──> Report Scanner (name substring + extension)
//!     │      └─> report path
//!     │
//!     ├──> Reader (csv / spreadsheet, banner row skipped)
//!     │      └─> RawTable
//!     │
//!     ├──> Normalizer (digits-only ids, title case, sentinels)
//!     │      └─> EmployeeRecord[]
//!     │
//!     └──> Catalog (group keys, chart and CCAR datasets)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use orgchart_indexer::{load_catalog, LoaderConfig};
//!
//! fn main() -> orgchart_indexer::Result<()> {
//!     let catalog = load_catalog(&LoaderConfig::new("/srv/reports"))?;
//!
//!     println!("{} employees in {} groups", catalog.records().len(), catalog.group_count());
//!     Ok(())
//! }
//! ```

mod catalog;
mod error;
mod handle;
mod loader;
pub mod normalize;
mod reader;
mod scanner;
mod stats;
mod watcher;

pub use catalog::{Catalog, Dataset, LoadStatus, GROUP_KEY_STRIDE};
pub use error::{IndexerError, Result};
pub use handle::CatalogHandle;
pub use loader::{
    catalog_from_table, load_catalog, load_catalog_from_path, LoaderConfig, DEFAULT_REPORT_NAME,
};
pub use normalize::InvalidRow;
pub use reader::{read_report, GridRow, RawRow, RawTable};
pub use scanner::ReportScanner;
pub use stats::LoadStats;
pub use watcher::{ReloadUpdate, ReportWatcher, WatchConfig};
