use thiserror::Error;

/// Errors that can occur while reading and validating input numbers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UtilsError {
    #[error("Number list cannot be empty")]
    EmptyNumberList,
    #[error("Too many numbers: {count} given, at most {max} supported")]
    TooManyNumbers { count: usize, max: usize },
    #[error("Not a number: {0}")]
    InvalidNumber(String),
}
