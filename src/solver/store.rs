use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use num_traits::{Signed, Zero};

use crate::utils::{Value, is_integral};

/// Keeps the shortest rendering seen for each value.
///
/// A new expression replaces the stored one only when it is strictly
/// shorter, so ties keep whichever was recorded first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionStore {
    solutions: BTreeMap<Value, String>,
}

impl SolutionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the map changed.
    pub fn record(&mut self, value: Value, expression: String) -> bool {
        match self.solutions.entry(value) {
            Entry::Vacant(slot) => {
                slot.insert(expression);
                true
            }
            Entry::Occupied(mut slot) => {
                if expression.len() < slot.get().len() {
                    slot.insert(expression);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Fold `later` into `self`; entries of `self` count as recorded first.
    pub fn merge(mut self, later: SolutionStore) -> SolutionStore {
        for (value, expression) in later.solutions {
            self.record(value, expression);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn get(&self, value: &Value) -> Option<&str> {
        self.solutions.get(value).map(String::as_str)
    }

    pub fn finalize(self, truncated: bool) -> Solutions {
        Solutions {
            solutions: self.solutions,
            truncated,
        }
    }
}

/// Every reachable value with its shortest expression, ordered by value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solutions {
    solutions: BTreeMap<Value, String>,
    truncated: bool,
}

impl Solutions {
    pub fn get(&self, value: &Value) -> Option<&str> {
        self.solutions.get(value).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// True when a resource cap ended the search early.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &str)> {
        self.solutions.iter().map(|(v, e)| (v, e.as_str()))
    }

    /// Values with denominator one.
    pub fn integral(&self) -> impl Iterator<Item = (&Value, &str)> {
        self.iter().filter(|(v, _)| is_integral(v))
    }

    pub fn fractional(&self) -> impl Iterator<Item = (&Value, &str)> {
        self.iter().filter(|(v, _)| !is_integral(v))
    }

    pub fn positive_integers(&self) -> impl Iterator<Item = (&Value, &str)> {
        self.integral().filter(|(v, _)| v.is_positive())
    }

    /// The exact hit for `target` or else the nearest value, preferring the
    /// smaller of two equally near values.
    pub fn closest_to(&self, target: &Value) -> Option<(&Value, &str)> {
        let mut best: Option<(&Value, &str, Value)> = None;
        for (value, expression) in self.iter() {
            let distance = (value - target).abs();
            if best.as_ref().is_none_or(|(_, _, d)| distance < *d) {
                let exact = distance.is_zero();
                best = Some((value, expression, distance));
                if exact {
                    break;
                }
            }
        }
        best.map(|(value, expression, _)| (value, expression))
    }

    pub fn as_map(&self) -> &BTreeMap<Value, String> {
        &self.solutions
    }

    pub fn into_map(self) -> BTreeMap<Value, String> {
        self.solutions
    }
}

/// Drop one pair of parentheses enclosing the whole expression, for display.
pub fn strip_parens(expression: &str) -> &str {
    let Some(inner) = expression
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    else {
        return expression;
    };

    let mut depth = 0i32;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return expression;
                }
            }
            _ => {}
        }
    }

    if depth == 0 { inner } else { expression }
}
