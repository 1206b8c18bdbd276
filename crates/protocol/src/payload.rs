use crate::record::EmployeeRecord;
use crate::title::TitleRank;
use indexmap::IndexMap;
use serde::Serialize;

/// Leadership subset of one group plus its head count.
#[derive(Debug, Clone, Serialize)]
pub struct GroupLeadership {
    pub employees: Vec<EmployeeRecord>,
    pub total_count: usize,
    pub employee_ids: Vec<String>,
}

/// Data behind the homepage and the management view.
#[derive(Debug, Clone, Serialize)]
pub struct LeadershipOverview {
    pub groups: Vec<String>,
    pub group_data: IndexMap<String, GroupLeadership>,
}

/// One org-chart node: the record plus its numeric rank (null when unranked).
#[derive(Debug, Clone, Serialize)]
pub struct ChartRow {
    #[serde(flatten)]
    pub record: EmployeeRecord,
    #[serde(rename = "Hierarchy Rank")]
    pub hierarchy_rank: Option<u8>,
}

impl From<&EmployeeRecord> for ChartRow {
    fn from(record: &EmployeeRecord) -> Self {
        Self {
            hierarchy_rank: record.title_rank().map(TitleRank::value),
            record: record.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartPage {
    pub group: String,
    pub chart_data: Vec<ChartRow>,
    pub highlight_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManagersPage {
    pub divisions: Vec<String>,
    pub division: Option<String>,
    pub managers: IndexMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeDirectory {
    pub all_employees: Vec<EmployeeRecord>,
    pub cities: Vec<String>,
}
