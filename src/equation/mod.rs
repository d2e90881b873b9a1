//! Equation filling: templates instantiated with orderings of the input numbers

mod core;
mod state;

pub use self::core::{Equation, EquationIterator, fill_equations, fill_template};
pub use state::FillState;
