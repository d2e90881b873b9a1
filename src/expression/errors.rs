use thiserror::Error;

use crate::operator::ApplyError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Domain error: {0}")]
    DomainError(String),
    #[error("Overflow: {0}")]
    Overflow(String),
    #[error("Malformed equation '{equation}': {reason}")]
    MalformedEquation { equation: String, reason: String },
}

impl EvalError {
    /// Arithmetic failures only discard the equation they occur in; a
    /// malformed equation means the generator produced bad text.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, EvalError::MalformedEquation { .. })
    }

    pub(crate) fn malformed(equation: &str, reason: impl Into<String>) -> Self {
        EvalError::MalformedEquation {
            equation: equation.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<ApplyError> for EvalError {
    fn from(err: ApplyError) -> Self {
        match err {
            ApplyError::DivisionByZero => EvalError::DivisionByZero,
            ApplyError::DomainError(reason) => EvalError::DomainError(reason),
            ApplyError::Overflow(reason) => EvalError::Overflow(reason),
        }
    }
}
