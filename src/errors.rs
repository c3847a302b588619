use thiserror::Error;

/// The engine performs no I/O, so every failure is a precondition violation
/// on the caller's side. Each error names the offending field so the UI can
/// surface a field-level message instead of a generic one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid input `{field}`: {constraint}")]
    InvalidInput {
        field: &'static str,
        constraint: String,
    },
}

impl EngineError {
    pub fn invalid_input(field: &'static str, constraint: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field,
            constraint: constraint.into(),
        }
    }

    /// name of the field that violated its precondition
    pub fn field(&self) -> &'static str {
        match self {
            EngineError::InvalidInput { field, .. } => field,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
