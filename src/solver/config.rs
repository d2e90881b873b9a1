use std::time::Duration;

use crate::solver::constants::{DEFAULT_MAX_EQUATIONS, DEFAULT_MAX_TEMPLATES};

/// Resource caps for one solve.
///
/// Template and equation counts grow combinatorially with the operator set,
/// the unary limit and the number of inputs. When a cap is hit the solve
/// stops and returns what it has found so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    pub max_templates: Option<usize>,
    pub max_equations: Option<usize>,
    pub time_budget: Option<Duration>,
}

impl SolverConfig {
    /// No caps at all.
    pub fn unbounded() -> Self {
        Self {
            max_templates: None,
            max_equations: None,
            time_budget: None,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_templates: Some(DEFAULT_MAX_TEMPLATES),
            max_equations: Some(DEFAULT_MAX_EQUATIONS),
            time_budget: None,
        }
    }
}
