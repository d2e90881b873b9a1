/// Every ordering of the indices `0..n`, in lexicographic order, produced
/// one at a time.
///
/// Repeated input values are not collapsed: callers index into their own
/// slice, so `n!` orderings are always yielded. Only the current ordering is
/// held, never the whole list.
#[derive(Debug, Clone)]
pub struct Permutations {
    current: Vec<usize>,
    done: bool,
}

impl Permutations {
    pub fn new(n: usize) -> Self {
        Self {
            current: (0..n).collect(),
            done: false,
        }
    }

    /// Number of indices being ordered.
    pub fn width(&self) -> usize {
        self.current.len()
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.current.clone();
        self.done = !next_permutation(&mut self.current);
        Some(item)
    }
}

/// `n!`, saturating at `usize::MAX`.
pub fn permutation_count(n: usize) -> usize {
    (2..=n).fold(1usize, |acc, k| acc.saturating_mul(k))
}

/// Advance `items` to the next lexicographic permutation in place.
/// Returns false once the last permutation has been reached.
fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }

    let Some(pivot) = (0..items.len() - 1).rev().find(|&i| items[i] < items[i + 1]) else {
        return false;
    };

    let Some(successor) = (pivot + 1..items.len())
        .rev()
        .find(|&j| items[j] > items[pivot])
    else {
        return false;
    };

    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}
