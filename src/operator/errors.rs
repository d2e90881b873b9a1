use thiserror::Error;

/// Errors raised while configuring an operator registry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Operator name registered twice: {0}")]
    DuplicateName(String),
    #[error("Operator name must be non-empty and contain only ASCII letters or '_': {0:?}")]
    InvalidName(String),
    #[error("Operator name clashes with a grammar symbol: {0}")]
    ReservedName(String),
    #[error("Operator {name} takes {actual} argument(s) but was registered as {expected}-ary")]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),
}

/// Failures of a single operator application.
///
/// These are expected during a search and only ever discard the equation
/// they occur in.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplyError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Domain error: {0}")]
    DomainError(String),
    #[error("Overflow: {0}")]
    Overflow(String),
}
