use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod columns;
pub mod payload;
pub mod record;
pub mod title;

pub use payload::{
    ChartPage, ChartRow, EmployeeDirectory, GroupLeadership, LeadershipOverview, ManagersPage,
};
pub use record::{sentinel, EmployeeRecord, WorkerType};
pub use title::TitleRank;

/// Key under which the CCAR cost-center dataset is addressed.
pub const CCAR_KEY: &str = "CCAR";

/// Colors for group tiles on the homepage, cycled in group order.
pub const GROUP_COLORS: [&str; 6] = [
    "#FFD700", "#FF8C00", "#48C9B0", "#F39C12", "#9B59B6", "#3498DB",
];

/// JSON body of every failed HTTP response.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}
