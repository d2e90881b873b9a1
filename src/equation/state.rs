use crate::utils::Permutations;

/// Position of an [`EquationIterator`](super::EquationIterator) in the
/// template-major, permutation-minor walk.
#[derive(Debug, Clone)]
pub struct FillState {
    pub(crate) template: usize,
    pub(crate) orderings: Permutations,
    pub(crate) exhausted: bool,
}

impl FillState {
    pub fn new(num_terms: usize) -> Self {
        Self {
            template: 0,
            orderings: Permutations::new(num_terms),
            exhausted: false,
        }
    }

    pub fn next_ordering(&mut self) -> Option<Vec<usize>> {
        self.orderings.next()
    }

    pub fn next_template(&mut self) {
        self.template += 1;
        self.orderings = Permutations::new(self.orderings.width());
    }

    pub fn mark_exhausted(&mut self) {
        self.exhausted = true;
    }
}
