use orgchart_protocol::CCAR_KEY;

/// Which dataset a query addresses: a group label, or the CCAR cost center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSelector {
    Group(String),
    Ccar,
}

impl DatasetSelector {
    /// The literal `"CCAR"` selects the cost-center dataset; anything else is a label.
    pub fn parse(raw: &str) -> Self {
        if raw == CCAR_KEY {
            DatasetSelector::Ccar
        } else {
            DatasetSelector::Group(raw.to_string())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DatasetSelector::Group(label) => label,
            DatasetSelector::Ccar => CCAR_KEY,
        }
    }
}

impl From<&str> for DatasetSelector {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl std::fmt::Display for DatasetSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
