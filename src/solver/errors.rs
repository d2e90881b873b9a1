use thiserror::Error;

use crate::expression::EvalError;
use crate::operator::RegistryError;
use crate::utils::UtilsError;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Expression evaluation error: {0}")]
    EvalError(#[from] EvalError),
    #[error("Operator registry error: {0}")]
    RegistryError(#[from] RegistryError),
    #[error("Utils error: {0}")]
    UtilsError(#[from] UtilsError),
}
