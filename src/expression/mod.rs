//! Evaluation and infix rendering of equations in call syntax

mod display;
mod errors;
mod eval;
mod scan;

pub use errors::EvalError;
pub use eval::Evaluator;

#[cfg(test)]
mod tests;
