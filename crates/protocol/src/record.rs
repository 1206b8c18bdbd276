use crate::title::TitleRank;
use serde::{Deserialize, Serialize};

/// Values substituted for blank cells. Downstream consumers never see nulls.
pub mod sentinel {
    pub const EMPLOYEE_ID: &str = "Unknown";
    pub const PREFERRED_NAME: &str = "Not Available";
    pub const WORK_EMAIL: &str = "No Email Provided";
    pub const CORPORATE_TITLE: &str = "No Title";
    pub const CITY: &str = "Unknown City";
    pub const COST_CENTER_NAME: &str = "Not Assigned";
    pub const GROUP_LABEL: &str = "Unknown";
    pub const MANAGER_NAME: &str = "No Manager";
    pub const MANAGER_EMPLOYEE_ID: &str = "Unknown";
    pub const MANAGER_EMAIL: &str = "No Email";
    pub const MATRIX_MANAGER: &str = "No Matrix Manager";
    pub const WORKER_TYPE: &str = "unknown";
}

/// Employment classification, always carried in lower case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WorkerType {
    Employee,
    ContingentWorker,
    Unknown,
    Other(String),
}

impl WorkerType {
    pub fn as_str(&self) -> &str {
        match self {
            WorkerType::Employee => "employee",
            WorkerType::ContingentWorker => "contingent worker",
            WorkerType::Unknown => sentinel::WORKER_TYPE,
            WorkerType::Other(value) => value,
        }
    }

    pub fn is_contingent(&self) -> bool {
        matches!(self, WorkerType::ContingentWorker)
    }
}

impl From<String> for WorkerType {
    fn from(value: String) -> Self {
        let lowered = value.to_lowercase();
        match lowered.as_str() {
            "employee" => WorkerType::Employee,
            "contingent worker" => WorkerType::ContingentWorker,
            sentinel::WORKER_TYPE => WorkerType::Unknown,
            _ => WorkerType::Other(lowered),
        }
    }
}

impl From<WorkerType> for String {
    fn from(value: WorkerType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for WorkerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One canonical person-row. JSON keys follow the report's column names so
/// chart renderers can consume records without a mapping layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(rename = "Employee ID")]
    pub employee_id: String,
    #[serde(rename = "Preferred Name")]
    pub preferred_name: String,
    #[serde(rename = "Email - Work")]
    pub work_email: String,
    #[serde(rename = "Worker Corporate Title")]
    pub corporate_title: String,
    #[serde(rename = "Location Address - City")]
    pub city: String,
    #[serde(rename = "Cost Center Name")]
    pub cost_center_name: String,
    #[serde(rename = "UBR Level 8")]
    pub group_label: String,
    #[serde(rename = "Key")]
    pub group_key: u32,
    #[serde(rename = "Organization Manager")]
    pub manager_name: String,
    #[serde(rename = "Organization Manager Employee ID")]
    pub manager_employee_id: String,
    #[serde(rename = "Organization Manager Email")]
    pub manager_email: String,
    #[serde(rename = "Matrix Manager")]
    pub matrix_manager: String,
    #[serde(rename = "Worker Type")]
    pub worker_type: WorkerType,
}

impl EmployeeRecord {
    pub fn title_rank(&self) -> Option<TitleRank> {
        TitleRank::from_title(&self.corporate_title)
    }

    /// True when the report left the title blank.
    pub fn is_missing_title(&self) -> bool {
        self.corporate_title == sentinel::CORPORATE_TITLE
    }

    pub fn is_contingent(&self) -> bool {
        self.worker_type.is_contingent()
    }
}
