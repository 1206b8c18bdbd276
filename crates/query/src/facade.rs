use crate::rank::{resolve_representatives, sort_by_rank};
use crate::{DatasetSelector, QueryError, Result};
use indexmap::map::Entry;
use indexmap::IndexMap;
use orgchart_indexer::{Catalog, Dataset};
use orgchart_protocol::{
    ChartPage, ChartRow, EmployeeDirectory, EmployeeRecord, GroupLeadership, LeadershipOverview,
    ManagersPage, CCAR_KEY,
};
use std::collections::BTreeSet;

/// Leadership subset of one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Representatives<'a> {
    pub leaders: Vec<&'a EmployeeRecord>,
    pub total_count: usize,
    pub employee_ids: Vec<String>,
}

impl Representatives<'_> {
    pub fn to_payload(&self) -> GroupLeadership {
        GroupLeadership {
            employees: self.leaders.iter().map(|record| (*record).clone()).collect(),
            total_count: self.total_count,
            employee_ids: self.employee_ids.clone(),
        }
    }
}

/// Every record plus the sorted distinct cities they work in.
#[derive(Debug, Clone)]
pub struct Directory<'a> {
    pub records: Vec<&'a EmployeeRecord>,
    pub cities: Vec<String>,
}

impl Directory<'_> {
    pub fn to_payload(&self) -> EmployeeDirectory {
        EmployeeDirectory {
            all_employees: self.records.iter().map(|record| (*record).clone()).collect(),
            cities: self.cities.clone(),
        }
    }
}

/// Read-only queries over one catalog snapshot.
#[derive(Debug, Clone, Copy)]
pub struct OrgQuery<'a> {
    catalog: &'a Catalog,
}

impl<'a> OrgQuery<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Group labels in first-occurrence order.
    pub fn list_groups(&self) -> Vec<&'a str> {
        self.catalog.group_labels().collect()
    }

    pub fn representatives(&self, selector: &DatasetSelector) -> Result<Representatives<'a>> {
        let dataset = self.dataset(selector)?;
        Ok(representatives_of(dataset))
    }

    /// Contingent-excluded members sorted by rank, unranked last.
    pub fn chart_data(&self, selector: &DatasetSelector) -> Result<Vec<&'a EmployeeRecord>> {
        let dataset = self.chart_dataset(selector)?;
        if dataset.is_empty() {
            return Err(QueryError::EmptyDataset(selector.name().to_string()));
        }
        let missing = dataset
            .iter()
            .filter(|record| record.is_missing_title())
            .count();
        if missing > 0 {
            return Err(QueryError::MissingTitles {
                scope: selector.name().to_string(),
                count: missing,
            });
        }

        let mut rows = dataset.to_vec();
        sort_by_rank(&mut rows);
        Ok(rows)
    }

    pub fn chart_page(
        &self,
        selector: &DatasetSelector,
        highlight_id: Option<String>,
    ) -> Result<ChartPage> {
        let rows = self.chart_data(selector)?;
        Ok(ChartPage {
            group: selector.name().to_string(),
            chart_data: rows.into_iter().map(ChartRow::from).collect(),
            highlight_id,
        })
    }

    /// Manager display name -> preferred names of their reports, contingent
    /// workers excluded. The first recorded spelling of a manager id names it;
    /// distinct ids sharing a name are merged under that name.
    pub fn managers_for(
        &self,
        selector: &DatasetSelector,
    ) -> Result<IndexMap<String, Vec<String>>> {
        let dataset = self.chart_dataset(selector)?;

        let mut by_id: IndexMap<&str, (&str, Vec<String>)> = IndexMap::new();
        for record in dataset.iter() {
            by_id
                .entry(record.manager_employee_id.as_str())
                .or_insert_with(|| (record.manager_name.as_str(), Vec::new()))
                .1
                .push(record.preferred_name.clone());
        }

        let mut roster: IndexMap<String, Vec<String>> = IndexMap::with_capacity(by_id.len());
        for (manager_id, (name, reports)) in by_id {
            match roster.entry(name.to_string()) {
                Entry::Occupied(mut existing) => {
                    log::debug!("Manager name '{name}' shared by id {manager_id}; merging reports");
                    existing.get_mut().extend(reports);
                }
                Entry::Vacant(slot) => {
                    slot.insert(reports);
                }
            }
        }
        Ok(roster)
    }

    /// Roster page for `division`. Any division mentioning `CCAR` addresses
    /// the CCAR dataset; no division yields an empty roster.
    pub fn managers_page(&self, division: Option<&str>) -> Result<ManagersPage> {
        let managers = match division {
            Some(division) if division.contains(CCAR_KEY) => {
                self.managers_for(&DatasetSelector::Ccar)?
            }
            Some(division) => self.managers_for(&DatasetSelector::parse(division))?,
            None => IndexMap::new(),
        };
        Ok(ManagersPage {
            divisions: self.list_groups().into_iter().map(str::to_string).collect(),
            division: division.map(str::to_string),
            managers,
        })
    }

    /// Union of every group dataset with the distinct non-empty cities.
    pub fn all_employees_with_cities(&self) -> Directory<'a> {
        let mut records = Vec::with_capacity(self.catalog.records().len());
        let mut cities = BTreeSet::new();
        for label in self.catalog.group_labels() {
            let Some(dataset) = self
                .catalog
                .group_key(label)
                .and_then(|key| self.catalog.group_dataset(key))
            else {
                continue;
            };
            for record in dataset.iter() {
                if !record.city.trim().is_empty() {
                    cities.insert(record.city.clone());
                }
                records.push(record);
            }
        }
        Directory {
            records,
            cities: cities.into_iter().collect(),
        }
    }

    /// Per-group leadership over contingent-excluded members. Groups made up
    /// only of contingent workers are left out.
    pub fn leadership_overview(&self) -> LeadershipOverview {
        let mut groups = Vec::new();
        let mut group_data = IndexMap::new();
        for label in self.catalog.group_labels() {
            let Some(dataset) = self
                .catalog
                .group_key(label)
                .and_then(|key| self.catalog.chart_dataset(key))
            else {
                continue;
            };
            if dataset.is_empty() {
                continue;
            }
            groups.push(label.to_string());
            group_data.insert(label.to_string(), representatives_of(dataset).to_payload());
        }
        LeadershipOverview { groups, group_data }
    }

    fn dataset(&self, selector: &DatasetSelector) -> Result<Dataset<'a>> {
        match selector {
            DatasetSelector::Ccar => Ok(self.catalog.ccar_dataset()),
            DatasetSelector::Group(label) => self
                .catalog
                .group_key(label)
                .and_then(|key| self.catalog.group_dataset(key))
                .ok_or_else(|| QueryError::NotFound(label.clone())),
        }
    }

    fn chart_dataset(&self, selector: &DatasetSelector) -> Result<Dataset<'a>> {
        match selector {
            DatasetSelector::Ccar => Ok(self.catalog.ccar_chart_dataset()),
            DatasetSelector::Group(label) => self
                .catalog
                .group_key(label)
                .and_then(|key| self.catalog.chart_dataset(key))
                .ok_or_else(|| QueryError::NotFound(label.clone())),
        }
    }
}

fn representatives_of(dataset: Dataset<'_>) -> Representatives<'_> {
    let leaders = resolve_representatives(dataset.iter());
    let employee_ids = leaders
        .iter()
        .map(|record| record.employee_id.clone())
        .collect();
    Representatives {
        leaders,
        total_count: dataset.len(),
        employee_ids,
    }
}
