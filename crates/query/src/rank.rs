use orgchart_protocol::title::{DIRECTOR, MANAGING_DIRECTOR};
use orgchart_protocol::{EmployeeRecord, TitleRank};

/// Leadership subset of a group.
///
/// Managing Directors and Directors when any exist; otherwise everyone at the
/// most senior rank present. Unranked titles never count toward the fallback,
/// so a group with only unranked titles yields nothing.
pub fn resolve_representatives<'a, I>(members: I) -> Vec<&'a EmployeeRecord>
where
    I: IntoIterator<Item = &'a EmployeeRecord>,
{
    let members: Vec<&EmployeeRecord> = members.into_iter().collect();

    let leaders: Vec<&EmployeeRecord> = members
        .iter()
        .copied()
        .filter(|record| {
            record.corporate_title == MANAGING_DIRECTOR || record.corporate_title == DIRECTOR
        })
        .collect();
    if !leaders.is_empty() {
        return leaders;
    }

    let Some(best) = members.iter().filter_map(|record| record.title_rank()).min() else {
        return Vec::new();
    };
    members
        .into_iter()
        .filter(|record| record.title_rank() == Some(best))
        .collect()
}

/// Stable sort by ascending rank with unranked titles last.
pub fn sort_by_rank(records: &mut [&EmployeeRecord]) {
    records.sort_by_key(|record| TitleRank::sort_key(record.title_rank()));
}
