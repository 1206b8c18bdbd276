//! Column names of the workforce report and the JSON keys derived from them.

pub const EMPLOYEE_ID: &str = "Employee ID";
pub const PREFERRED_NAME: &str = "Preferred Name";
pub const WORK_EMAIL: &str = "Email - Work";
pub const CORPORATE_TITLE: &str = "Worker Corporate Title";
pub const CITY: &str = "Location Address - City";
pub const COST_CENTER_NAME: &str = "Cost Center Name";
pub const HIERARCHY: &str = "UBR Level 8";
pub const MANAGER_NAME: &str = "Organization Manager";
pub const MANAGER_EMPLOYEE_ID: &str = "Organization Manager Employee ID";
pub const MANAGER_EMAIL: &str = "Organization Manager Email";
pub const MATRIX_MANAGER: &str = "Matrix Manager";
pub const WORKER_TYPE: &str = "Worker Type";

/// Derived columns that only exist after indexing.
pub const GROUP_KEY: &str = "Key";
pub const HIERARCHY_RANK: &str = "Hierarchy Rank";

/// Every column the loader requires; a report missing any of them is a schema mismatch.
pub const REQUIRED_COLUMNS: [&str; 12] = [
    EMPLOYEE_ID,
    PREFERRED_NAME,
    WORK_EMAIL,
    CORPORATE_TITLE,
    CITY,
    COST_CENTER_NAME,
    HIERARCHY,
    MANAGER_NAME,
    MANAGER_EMPLOYEE_ID,
    MANAGER_EMAIL,
    MATRIX_MANAGER,
    WORKER_TYPE,
];

/// Returns the required columns absent from `headers`, in canonical order.
pub fn missing_required<'a, I>(headers: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = headers.into_iter().map(str::trim).collect();
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !present.contains(column))
        .collect()
}
