//! Operator registry: the named unary and binary operators of a session

mod errors;
mod kind;
mod registry;

pub use errors::{ApplyError, RegistryError};
pub use kind::{
    ArithmeticLimits, DEFAULT_MAX_BITS, DEFAULT_MAX_EXPONENT, DEFAULT_MAX_FACTORIAL, OperatorKind,
    Precedence, Rendered,
};
pub use registry::{OperatorRegistry, OperatorSpec};
