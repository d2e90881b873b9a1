use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

use log::{error, info, trace, warn};
use rayon::prelude::*;

use crate::equation::{Equation, EquationIterator, fill_equations};
use crate::expression::Evaluator;
use crate::grammar::{GenerationLimits, Generated, Template, TemplateGenerator};
use crate::operator::OperatorRegistry;
use crate::solver::config::SolverConfig;
use crate::solver::errors::SolverError;
use crate::solver::store::{SolutionStore, Solutions};
use crate::utils::{Value, validate_number_list};

/// Finds every value reachable from a list of numbers with a fixed operator set
pub struct ExpressionSolver {
    registry: OperatorRegistry,
    config: SolverConfig,
    generator: TemplateGenerator,
}

impl ExpressionSolver {
    pub fn new(registry: OperatorRegistry, config: SolverConfig) -> Self {
        let generator = TemplateGenerator::new(&registry);
        Self {
            registry,
            config,
            generator,
        }
    }

    pub fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Templates with exactly `num_terms` placeholders, capped at
    /// `max_templates`.
    pub fn generate_templates(&self, num_terms: usize) -> Vec<Template> {
        self.bounded_templates(num_terms, self.deadline()).templates
    }

    pub fn fill_equations(&self, numbers: &[Value], templates: &[Template]) -> Vec<Equation> {
        fill_equations(numbers, templates)
    }

    /// Generate templates for `numbers`, fill, evaluate and keep the
    /// shortest expression per value.
    ///
    /// # Errors
    ///
    /// Returns an error if the number list is invalid or an equation turns
    /// out to be malformed. Arithmetic failures only drop their equation.
    pub fn solve(&self, numbers: &[Value]) -> Result<Solutions, SolverError> {
        validate_number_list(numbers)?;

        let deadline = self.deadline();
        let generated = self.bounded_templates(numbers.len(), deadline);
        self.evaluate_templates(numbers, &generated.templates, deadline, generated.truncated)
    }

    /// Like [`solve`](Self::solve) with templates the caller already built.
    ///
    /// # Errors
    ///
    /// See [`solve`](Self::solve).
    pub fn solve_with_templates(
        &self,
        numbers: &[Value],
        templates: &[Template],
    ) -> Result<Solutions, SolverError> {
        validate_number_list(numbers)?;
        self.evaluate_templates(numbers, templates, self.deadline(), false)
    }

    /// Evaluate equations the caller already filled, keeping the shortest
    /// expression per value. Caps and the time budget apply as in
    /// [`solve`](Self::solve).
    ///
    /// # Errors
    ///
    /// Returns an error if an equation is malformed.
    pub fn solve_equations(&self, equations: &[Equation]) -> Result<Solutions, SolverError> {
        info!("Solving {} precomputed equations", equations.len());

        let evaluator = Evaluator::new(&self.registry);
        let budget = Budget::new(self.deadline(), self.config.max_equations, false);

        let store = equations
            .par_iter()
            .try_fold(SolutionStore::new, |mut store, equation| {
                if !budget.exhausted() {
                    budget.evaluate(&evaluator, &mut store, equation)?;
                }
                Ok::<_, SolverError>(store)
            })
            .try_reduce(SolutionStore::new, |earlier, later| Ok(earlier.merge(later)))?;

        Ok(budget.finish(store))
    }

    fn deadline(&self) -> Option<Instant> {
        self.config
            .time_budget
            .map(|budget| Instant::now() + budget)
    }

    fn bounded_templates(&self, num_terms: usize, deadline: Option<Instant>) -> Generated {
        let limits = GenerationLimits {
            max_templates: self.config.max_templates,
            deadline,
        };
        self.generator
            .generate_bounded(num_terms, self.registry.unary_limit(), &limits)
    }

    fn evaluate_templates(
        &self,
        numbers: &[Value],
        templates: &[Template],
        deadline: Option<Instant>,
        already_truncated: bool,
    ) -> Result<Solutions, SolverError> {
        info!(
            "Solving {} numbers over {} templates",
            numbers.len(),
            templates.len()
        );

        let evaluator = Evaluator::new(&self.registry);
        let budget = Budget::new(deadline, self.config.max_equations, already_truncated);

        // Indexed fold/reduce keeps first-recorded tie breaking independent of
        // how rayon splits the work.
        let store = templates
            .par_iter()
            .try_fold(SolutionStore::new, |mut store, template| {
                let equations = EquationIterator::new(numbers, std::slice::from_ref(template));
                for equation in equations {
                    if budget.exhausted() {
                        break;
                    }
                    budget.evaluate(&evaluator, &mut store, &equation)?;
                }
                Ok::<_, SolverError>(store)
            })
            .try_reduce(SolutionStore::new, |earlier, later| Ok(earlier.merge(later)))?;

        Ok(budget.finish(store))
    }
}

/// Shared caps and counters of one parallel solve
struct Budget {
    deadline: Option<Instant>,
    max_equations: Option<usize>,
    consumed: AtomicUsize,
    failed: AtomicUsize,
    truncated: AtomicBool,
}

impl Budget {
    fn new(deadline: Option<Instant>, max_equations: Option<usize>, truncated: bool) -> Self {
        Self {
            deadline,
            max_equations,
            consumed: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            truncated: AtomicBool::new(truncated),
        }
    }

    /// Claims one equation; returns true, and marks the solve truncated,
    /// once the deadline or the equation cap is reached.
    fn exhausted(&self) -> bool {
        let out_of_time = self
            .deadline
            .is_some_and(|deadline| Instant::now() >= deadline);
        let over_cap = !out_of_time
            && self
                .max_equations
                .is_some_and(|max| self.consumed.fetch_add(1, Ordering::Relaxed) >= max);

        if out_of_time || over_cap {
            self.truncated.store(true, Ordering::Relaxed);
            return true;
        }
        false
    }

    fn evaluate(
        &self,
        evaluator: &Evaluator<'_>,
        store: &mut SolutionStore,
        equation: &Equation,
    ) -> Result<(), SolverError> {
        match evaluator.evaluate(equation) {
            Ok(value) => {
                let expression = evaluator.render(equation).inspect_err(|e| {
                    error!("Evaluated equation cannot be rendered: {}", e);
                })?;
                store.record(value, expression);
            }
            Err(e) if e.is_recoverable() => {
                trace!("Discarding {}: {}", equation, e);
                self.failed.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                error!("Generated an equation that cannot be parsed: {}", e);
                return Err(SolverError::from(e));
            }
        }
        Ok(())
    }

    fn finish(self, store: SolutionStore) -> Solutions {
        let truncated = self.truncated.into_inner();
        if truncated {
            warn!(
                "Search stopped early at a resource cap; {} values found so far",
                store.len()
            );
        }
        info!(
            "Found {} distinct values ({} equations discarded)",
            store.len(),
            self.failed.into_inner()
        );

        store.finalize(truncated)
    }
}
