//! Row normalization: one raw report row in, one canonical [`EmployeeRecord`] out.
//!
//! Rules run in a fixed order: worker type, employee id, corporate title,
//! manager id, sentinel defaults, then the group label derived from the
//! hierarchy column. The group key is left at zero; the catalog assigns it.

use crate::RawRow;
use orgchart_protocol::{columns, sentinel, EmployeeRecord, WorkerType};
use thiserror::Error;

const CONTINGENT_SYNONYM: &str = "Contingent Worker / Person Of Interest";
const CONTINGENT_WORKER: &str = "Contingent Worker";
const MANAGER_ID_MAX_LEN: usize = 7;

/// Why a row was left out of the canonical record set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidRow {
    #[error("employee id is blank")]
    BlankEmployeeId,

    #[error("employee id '{0}' contains no digits")]
    EmployeeIdWithoutDigits(String),
}

pub fn normalize_row(row: &RawRow<'_>) -> Result<EmployeeRecord, InvalidRow> {
    let worker_type = normalize_worker_type(row.get(columns::WORKER_TYPE));
    let employee_id = normalize_employee_id(row.get(columns::EMPLOYEE_ID))?;
    let corporate_title = row
        .get(columns::CORPORATE_TITLE)
        .map(|title| title_case(title.trim()))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| sentinel::CORPORATE_TITLE.to_string());
    let manager_employee_id = normalize_manager_id(row.get(columns::MANAGER_EMPLOYEE_ID));

    let text = |column: &str, fallback: &str| {
        row.get(column)
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    };

    Ok(EmployeeRecord {
        employee_id,
        preferred_name: text(columns::PREFERRED_NAME, sentinel::PREFERRED_NAME),
        work_email: text(columns::WORK_EMAIL, sentinel::WORK_EMAIL),
        corporate_title,
        city: text(columns::CITY, sentinel::CITY),
        cost_center_name: text(columns::COST_CENTER_NAME, sentinel::COST_CENTER_NAME),
        group_label: derive_group_label(row.get(columns::HIERARCHY)),
        group_key: 0,
        manager_name: text(columns::MANAGER_NAME, sentinel::MANAGER_NAME),
        manager_employee_id,
        manager_email: text(columns::MANAGER_EMAIL, sentinel::MANAGER_EMAIL),
        matrix_manager: text(columns::MATRIX_MANAGER, sentinel::MATRIX_MANAGER),
        worker_type,
    })
}

/// Upper-cases a cased letter that does not follow another cased letter and
/// lower-cases the rest, so `"o'NEIL-smith"` becomes `"O'Neil-Smith"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_cased = false;
    for ch in value.chars() {
        let cased = ch.is_lowercase() || ch.is_uppercase();
        if cased {
            if prev_cased {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
        } else {
            out.push(ch);
        }
        prev_cased = cased;
    }
    out
}

pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

pub fn normalize_worker_type(raw: Option<&str>) -> WorkerType {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return WorkerType::Unknown;
    };
    let titled = title_case(raw);
    let folded = if titled == CONTINGENT_SYNONYM {
        CONTINGENT_WORKER.to_string()
    } else {
        titled
    };
    WorkerType::from(folded)
}

pub fn normalize_employee_id(raw: Option<&str>) -> Result<String, InvalidRow> {
    let raw = raw.ok_or(InvalidRow::BlankEmployeeId)?;
    let digits = digits_only(raw);
    if digits.is_empty() {
        return Err(InvalidRow::EmployeeIdWithoutDigits(raw.to_string()));
    }
    Ok(digits)
}

/// Digits only, cut to seven characters; merged exports sometimes concatenate ids.
pub fn normalize_manager_id(raw: Option<&str>) -> String {
    let digits: String = raw
        .map(digits_only)
        .unwrap_or_default()
        .chars()
        .take(MANAGER_ID_MAX_LEN)
        .collect();
    if digits.is_empty() {
        sentinel::MANAGER_EMPLOYEE_ID.to_string()
    } else {
        digits
    }
}

/// Strips the leading code from a hierarchy value: `"1234 Rates Trading"`
/// becomes `"Rates Trading"`.
pub fn derive_group_label(raw: Option<&str>) -> String {
    let value = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(sentinel::GROUP_LABEL);
    match value.split_once(' ') {
        Some((_, rest)) => rest.to_string(),
        None => value.to_string(),
    }
}
