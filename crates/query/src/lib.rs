//! # Org Chart Query
//!
//! Read-only lookups over a loaded [`orgchart_indexer::Catalog`]: group
//! listings, leadership resolution, ranked chart rows, manager rosters and
//! the employee directory.
//!
//! ```no_run
//! use orgchart_indexer::{load_catalog, LoaderConfig};
//! use orgchart_query::{DatasetSelector, OrgQuery};
//!
//! fn main() -> anyhow::Result<()> {
//!     let catalog = load_catalog(&LoaderConfig::new("/srv/reports"))?;
//!     let query = OrgQuery::new(&catalog);
//!     for label in query.list_groups() {
//!         let leaders = query.representatives(&DatasetSelector::parse(label))?;
//!         println!("{label}: {:?}", leaders.employee_ids);
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod facade;
mod rank;
mod selector;

pub use error::{QueryError, Result};
pub use facade::{Directory, OrgQuery, Representatives};
pub use rank::{resolve_representatives, sort_by_rank};
pub use selector::DatasetSelector;
