//! Property-based tests for template generation, evaluation and the store.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::equation::fill_template;
    use crate::expression::Evaluator;
    use crate::grammar::TemplateGenerator;
    use crate::operator::OperatorKind;
    use crate::solver::{ExpressionSolver, SolutionStore, SolverConfig};
    use crate::test_support::{arithmetic, infix_value, registry};
    use crate::utils::{Value, integer};

    // Strategy for generating small literals, zero included
    fn small_int() -> impl Strategy<Value = i64> {
        -9i64..=20i64
    }

    // Strategy for (value, expression) pairs with colliding values
    fn entry() -> impl Strategy<Value = (i64, String)> {
        (-3i64..=3i64, "[0-9+*]{1,6}")
    }

    fn store_of(entries: &[(i64, String)]) -> SolutionStore {
        let mut store = SolutionStore::new();
        for (value, expression) in entries {
            store.record(integer(*value), expression.clone());
        }
        store
    }

    proptest! {
        #[test]
        fn templates_hold_exactly_the_requested_terms(
            num_terms in 1usize..=4,
            unary_limit in 0usize..=2,
        ) {
            let registry = registry(
                &[OperatorKind::Add, OperatorKind::Mul, OperatorKind::Neg],
                unary_limit,
            );
            let generator = TemplateGenerator::new(&registry);
            let templates = generator.generate(num_terms, unary_limit);

            prop_assert!(!templates.is_empty());
            for template in &templates {
                prop_assert_eq!(template.terms(), num_terms);
            }
            let mut texts: Vec<&str> = templates.iter().map(|t| t.as_str()).collect();
            texts.sort_unstable();
            texts.dedup();
            prop_assert_eq!(texts.len(), templates.len());
        }

        #[test]
        fn evaluation_is_pure_and_rendering_round_trips(
            a in small_int(),
            b in small_int(),
            c in small_int(),
            pick in 0usize..1000,
        ) {
            let registry = arithmetic();
            let templates = TemplateGenerator::new(&registry).generate(3, 0);
            let template = &templates[pick % templates.len()];
            let numbers = [a, b, c].map(|n| integer(n).to_string());
            let Some(equation) = fill_template(template, &numbers) else {
                return Err(TestCaseError::fail("template should take three numbers"));
            };

            let evaluator = Evaluator::new(&registry);
            let first = evaluator.evaluate(&equation);
            let second = evaluator.evaluate(&equation);
            prop_assert_eq!(&first, &second);

            if let Ok(value) = first {
                let rendered = evaluator.render(&equation);
                prop_assert!(rendered.is_ok());
                if let Ok(text) = rendered {
                    prop_assert_eq!(infix_value(&text), Some(value));
                }
            }
        }

        #[test]
        fn every_solution_evaluates_to_its_key(a in 1i64..=9, b in 1i64..=9, c in 1i64..=9) {
            let solver = ExpressionSolver::new(arithmetic(), SolverConfig::default());
            let numbers: Vec<Value> = [a, b, c].into_iter().map(integer).collect();
            let solutions = solver.solve(&numbers);
            prop_assert!(solutions.is_ok());
            if let Ok(solutions) = solutions {
                prop_assert!(solutions.get(&integer(a + b + c)).is_some());
                for (value, expression) in solutions.iter() {
                    prop_assert_eq!(infix_value(expression), Some(value.clone()));
                }
            }
        }

        #[test]
        fn recording_twice_changes_nothing(entries in prop::collection::vec(entry(), 0..12)) {
            let once = store_of(&entries);
            let mut twice = once.clone();
            for (value, expression) in &entries {
                prop_assert!(!twice.record(integer(*value), expression.clone()));
            }
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn merge_matches_sequential_recording(
            left in prop::collection::vec(entry(), 0..10),
            right in prop::collection::vec(entry(), 0..10),
        ) {
            let merged = store_of(&left).merge(store_of(&right));
            let all: Vec<(i64, String)> = left.iter().chain(right.iter()).cloned().collect();
            prop_assert_eq!(merged, store_of(&all));
        }
    }
}
