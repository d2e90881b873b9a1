use std::fmt;

use log::{debug, warn};

use crate::grammar::{PLACEHOLDER, Template};
use crate::utils::{Value, permutation_count};

use super::state::FillState;

/// A template with every placeholder replaced by a concrete number,
/// e.g. `mul(add(1,2),3)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Equation(String);

impl Equation {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Substitute `numbers` into the placeholders of `template`, left to right.
///
/// Returns `None` when the counts differ.
pub fn fill_template(template: &Template, numbers: &[String]) -> Option<Equation> {
    if template.terms() != numbers.len() {
        return None;
    }

    let mut segments = template.as_str().split(PLACEHOLDER);
    let mut text = String::with_capacity(
        template.as_str().len() + numbers.iter().map(String::len).sum::<usize>(),
    );
    text.push_str(segments.next().unwrap_or_default());
    for (number, segment) in numbers.iter().zip(segments) {
        text.push_str(number);
        text.push_str(segment);
    }

    Some(Equation(text))
}

/// Lazily yields one equation per (template, ordering of the numbers) pair.
///
/// Orderings are walked one at a time, so neither the equations nor the
/// `n!` orderings are ever held in full. Repeated numbers are not
/// collapsed, so `[3, 3]` yields each template twice; results are
/// deduplicated later by value.
#[derive(Debug, Clone)]
pub struct EquationIterator<'a> {
    templates: &'a [Template],
    numbers: Vec<String>,
    state: FillState,
}

impl<'a> EquationIterator<'a> {
    pub fn new(numbers: &[Value], templates: &'a [Template]) -> Self {
        let numbers: Vec<String> = numbers.iter().map(ToString::to_string).collect();
        let state = FillState::new(numbers.len());
        Self {
            templates,
            numbers,
            state,
        }
    }

    /// Upper bound on the equations this iterator will produce.
    pub fn total(&self) -> usize {
        self.templates
            .len()
            .saturating_mul(permutation_count(self.numbers.len()))
    }
}

impl Iterator for EquationIterator<'_> {
    type Item = Equation;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.state.exhausted {
                return None;
            }

            let Some(template) = self.templates.get(self.state.template) else {
                self.state.mark_exhausted();
                return None;
            };

            if template.terms() != self.numbers.len() {
                warn!(
                    "Skipping template {} with {} placeholders for {} numbers",
                    template,
                    template.terms(),
                    self.numbers.len()
                );
                self.state.next_template();
                continue;
            }

            let Some(ordering) = self.state.next_ordering() else {
                self.state.next_template();
                continue;
            };

            let ordered: Vec<String> = ordering
                .iter()
                .filter_map(|&i| self.numbers.get(i).cloned())
                .collect();

            if let Some(equation) = fill_template(template, &ordered) {
                return Some(equation);
            }
        }
    }
}

/// Every equation for `numbers` over `templates`, in template-major order.
pub fn fill_equations(numbers: &[Value], templates: &[Template]) -> Vec<Equation> {
    let equations = EquationIterator::new(numbers, templates);
    debug!(
        "Filling {} templates with orderings of {} numbers (at most {} equations)",
        templates.len(),
        numbers.len(),
        equations.total()
    );
    equations.collect()
}
