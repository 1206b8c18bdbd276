use crate::LoadStats;
use orgchart_protocol::EmployeeRecord;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Group keys are `GROUP_KEY_STRIDE * (first_occurrence_index + 1)`.
pub const GROUP_KEY_STRIDE: u32 = 100;

const CCAR_COST_CENTER: &str = "ccar team";

/// Whether the catalog reflects the report or a degraded empty stand-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadStatus {
    Loaded,
    Degraded { reason: String },
}

impl LoadStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadStatus::Loaded)
    }
}

#[derive(Debug, Clone)]
struct GroupEntry {
    label: String,
    key: u32,
    members: Vec<usize>,
    chart_members: Vec<usize>,
}

/// Non-owning view over a subset of catalog records, in load order.
#[derive(Debug, Clone, Copy)]
pub struct Dataset<'a> {
    records: &'a [EmployeeRecord],
    members: &'a [usize],
}

impl<'a> Dataset<'a> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a EmployeeRecord> + 'a {
        let Dataset { records, members } = *self;
        members.iter().map(move |&idx| &records[idx])
    }

    pub fn to_vec(&self) -> Vec<&'a EmployeeRecord> {
        self.iter().collect()
    }
}

/// Immutable canonical record set plus the per-group, chart and CCAR lookup
/// tables derived from it. Built once per load; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<EmployeeRecord>,
    groups: Vec<GroupEntry>,
    group_by_label: HashMap<String, usize>,
    ccar_members: Vec<usize>,
    ccar_chart_members: Vec<usize>,
    status: LoadStatus,
    source: Option<PathBuf>,
    stats: LoadStats,
}

impl Catalog {
    /// Assigns group keys in first-occurrence order and derives every dataset.
    pub fn build(mut records: Vec<EmployeeRecord>) -> Self {
        let mut groups: Vec<GroupEntry> = Vec::new();
        let mut group_by_label: HashMap<String, usize> = HashMap::new();
        let mut ccar_members = Vec::new();
        let mut ccar_chart_members = Vec::new();

        for (idx, record) in records.iter_mut().enumerate() {
            let group_idx = *group_by_label
                .entry(record.group_label.clone())
                .or_insert_with(|| {
                    let next = groups.len();
                    groups.push(GroupEntry {
                        label: record.group_label.clone(),
                        key: group_key_for_index(next),
                        members: Vec::new(),
                        chart_members: Vec::new(),
                    });
                    next
                });
            let group = &mut groups[group_idx];
            record.group_key = group.key;
            group.members.push(idx);
            if !record.is_contingent() {
                group.chart_members.push(idx);
            }

            if is_ccar_cost_center(&record.cost_center_name) {
                ccar_members.push(idx);
                if !record.is_contingent() {
                    ccar_chart_members.push(idx);
                }
            }
        }

        let stats = LoadStats {
            rows_read: records.len(),
            rows_kept: records.len(),
            groups: groups.len(),
            ccar_members: ccar_members.len(),
            ..LoadStats::default()
        };

        Self {
            records,
            groups,
            group_by_label,
            ccar_members,
            ccar_chart_members,
            status: LoadStatus::Loaded,
            source: None,
            stats,
        }
    }

    /// Empty tables standing in for a report that could not be used.
    pub fn degraded(reason: impl Into<String>) -> Self {
        let mut catalog = Self::build(Vec::new());
        catalog.status = LoadStatus::Degraded {
            reason: reason.into(),
        };
        catalog
    }

    pub fn with_source(mut self, source: impl AsRef<Path>) -> Self {
        self.source = Some(source.as_ref().to_path_buf());
        self
    }

    /// Replaces row accounting with what the loader observed; derived counts stay.
    pub fn with_stats(mut self, stats: LoadStats) -> Self {
        self.stats = LoadStats {
            groups: self.groups.len(),
            ccar_members: self.ccar_members.len(),
            ..stats
        };
        self
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }

    /// Distinct group labels in first-occurrence order.
    pub fn group_labels(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.label.as_str())
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn group_key(&self, label: &str) -> Option<u32> {
        self.group_index_for_label(label)
            .map(|idx| self.groups[idx].key)
    }

    pub fn group_label(&self, key: u32) -> Option<&str> {
        self.group_index_for_key(key)
            .map(|idx| self.groups[idx].label.as_str())
    }

    /// Every record carrying `key`.
    pub fn group_dataset(&self, key: u32) -> Option<Dataset<'_>> {
        self.group_index_for_key(key)
            .map(|idx| self.view(&self.groups[idx].members))
    }

    /// Records carrying `key`, contingent workers excluded.
    pub fn chart_dataset(&self, key: u32) -> Option<Dataset<'_>> {
        self.group_index_for_key(key)
            .map(|idx| self.view(&self.groups[idx].chart_members))
    }

    /// Records whose cost center mentions the CCAR team.
    pub fn ccar_dataset(&self) -> Dataset<'_> {
        self.view(&self.ccar_members)
    }

    pub fn ccar_chart_dataset(&self) -> Dataset<'_> {
        self.view(&self.ccar_chart_members)
    }

    fn view<'a>(&'a self, members: &'a [usize]) -> Dataset<'a> {
        Dataset {
            records: &self.records,
            members,
        }
    }

    fn group_index_for_label(&self, label: &str) -> Option<usize> {
        self.group_by_label.get(label).copied()
    }

    fn group_index_for_key(&self, key: u32) -> Option<usize> {
        if key == 0 || key % GROUP_KEY_STRIDE != 0 {
            return None;
        }
        let idx = usize::try_from(key / GROUP_KEY_STRIDE).ok()? - 1;
        (idx < self.groups.len()).then_some(idx)
    }
}

fn group_key_for_index(idx: usize) -> u32 {
    let ordinal = u32::try_from(idx + 1).unwrap_or(u32::MAX / GROUP_KEY_STRIDE);
    GROUP_KEY_STRIDE.saturating_mul(ordinal)
}

fn is_ccar_cost_center(name: &str) -> bool {
    name.to_lowercase().contains(CCAR_COST_CENTER)
}
