use super::enums::LogicalOperator;
use thiserror::Error;

/// Errors raised while decoding tokens, combining filters or rendering JSON
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Unknown {kind} token: '{token}'")]
    UnknownEnumToken { kind: &'static str, token: String },

    #[error("Cannot combine with '{operator}': a leaf filter needs a concrete operand")]
    InvalidCombination { operator: LogicalOperator },

    #[error("Failed to serialize to JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}
