use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("No dataset for group '{0}'")]
    NotFound(String),

    #[error("{0} dataset is empty")]
    EmptyDataset(String),

    #[error("{count} rows with missing corporate title found for {scope}")]
    MissingTitles { scope: String, count: usize },
}
