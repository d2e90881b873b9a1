use log::{debug, warn};

use crate::utils::errors::UtilsError;
use crate::utils::numbers::Value;

/// Largest number list accepted; `n!` orderings per template grow past this
/// point faster than any cap can usefully bound.
pub const MAX_NUMBERS: usize = 10;

/// # Errors
///
/// Returns an error if the list is empty or longer than [`MAX_NUMBERS`].
pub fn validate_number_list(numbers: &[Value]) -> Result<(), UtilsError> {
    debug!("Validating number list of length {}", numbers.len());

    if numbers.is_empty() {
        warn!("Number list is empty");
        return Err(UtilsError::EmptyNumberList);
    }

    if numbers.len() > MAX_NUMBERS {
        warn!(
            "Number list has {} entries, limit is {}",
            numbers.len(),
            MAX_NUMBERS
        );
        return Err(UtilsError::TooManyNumbers {
            count: numbers.len(),
            max: MAX_NUMBERS,
        });
    }

    debug!("Number list validation successful");
    Ok(())
}
