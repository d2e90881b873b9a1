//! Utils module split into submodules

mod errors;
mod numbers;
mod permutations;
mod validation;

pub use errors::UtilsError;
pub use numbers::{Value, integer, is_integral, needs_grouping, parse_number};
pub use permutations::{Permutations, permutation_count};
pub use validation::{MAX_NUMBERS, validate_number_list};
