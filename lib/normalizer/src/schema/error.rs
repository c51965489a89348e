use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("failed to parse schema: {0}")]
    Parse(String),
}
