use serde::{Deserialize, Serialize};

const MAX_DIAGNOSTICS: usize = 50;

/// Statistics about one load of the workforce report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    /// Data rows parsed from the file (banner and header excluded)
    pub rows_read: usize,

    /// Rows that became canonical records
    pub rows_kept: usize,

    /// Rows dropped by the normalizer
    pub rows_rejected: usize,

    /// Distinct group labels
    pub groups: usize,

    /// Members of the CCAR cost-center dataset
    pub ccar_members: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,

    /// First few rejection diagnostics
    pub diagnostics: Vec<String>,
}

impl LoadStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_kept(&mut self) {
        self.rows_read += 1;
        self.rows_kept += 1;
    }

    pub fn add_rejected(&mut self, diagnostic: String) {
        self.rows_read += 1;
        self.rows_rejected += 1;
        if self.diagnostics.len() < MAX_DIAGNOSTICS {
            self.diagnostics.push(diagnostic);
        }
    }
}
