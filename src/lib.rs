//! Cryptix - find every value reachable from a list of numbers
//!
//! Given N numbers and a set of unary and binary operators, this library
//! enumerates every expression shape that uses all N numbers exactly once,
//! evaluates each one with exact rational arithmetic and keeps the shortest
//! readable expression for every value it reaches (the "Crypto" or 24 game,
//! generalized).
//!
//! The pipeline is: [`OperatorRegistry`] → [`Grammar`] →
//! [`TemplateGenerator`] → [`fill_equations`] → [`Evaluator`] →
//! [`SolutionStore`].

pub mod equation;
pub mod expression;
pub mod grammar;
pub mod operator;
pub mod solver;
pub mod utils;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod test_support;

// Re-export the main public API
pub use equation::{Equation, fill_equations};
pub use expression::{EvalError, Evaluator};
pub use grammar::{Grammar, Template, TemplateGenerator};
pub use operator::{OperatorKind, OperatorRegistry, OperatorSpec, RegistryError};
pub use solver::{ExpressionSolver, SolutionStore, Solutions, SolverConfig, SolverError};
pub use utils::{UtilsError, Value, parse_number};

/// Solve with the default resource caps and unary limit.
///
/// This is a convenience function that registers `operators` under their
/// default names and runs a full solve.
///
/// # Arguments
///
/// * `numbers` - The numbers to combine, each used exactly once
/// * `operators` - Unary and binary operators, in any order
///
/// # Errors
///
/// This function will return an error if:
/// * The number list is empty or too long
/// * An operator is listed twice
/// * A generated equation cannot be parsed (an internal error)
///
/// # Examples
///
/// ```
/// use cryptix::{OperatorKind, parse_number, solve};
///
/// let numbers = vec![parse_number("3").unwrap(), parse_number("3").unwrap()];
/// let solutions = solve(&numbers, &[OperatorKind::Add, OperatorKind::Mul]).unwrap();
/// assert_eq!(solutions.get(&parse_number("9").unwrap()), Some("(3*3)"));
/// ```
pub fn solve(numbers: &[Value], operators: &[OperatorKind]) -> Result<Solutions, SolverError> {
    utils::validate_number_list(numbers)?;

    let registry =
        OperatorRegistry::from_kinds(operators, solver::constants::DEFAULT_UNARY_LIMIT)?;
    let solver = ExpressionSolver::new(registry, SolverConfig::default());
    solver.solve(numbers)
}
