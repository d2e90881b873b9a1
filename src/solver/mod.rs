pub mod constants;
mod config;
mod core;
mod errors;
mod store;

pub use self::core::ExpressionSolver;
pub use config::SolverConfig;
pub use errors::SolverError;
pub use store::{SolutionStore, Solutions, strip_parens};
