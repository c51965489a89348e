use crate::parser::ParseError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizationError {
    #[error("Fragment definition for '{fragment_name}' not found.")]
    UndefinedFragment { fragment_name: String },

    #[error("Failed to parse operation: {0}")]
    Parse(#[from] ParseError),

    #[error("Selection nesting exceeds the limit of {limit}.")]
    DepthLimitExceeded { limit: usize },

    #[error("Document expands to more than {limit} selections.")]
    SelectionLimitExceeded { limit: usize },
}
