use log::trace;

use crate::equation::Equation;
use crate::expression::errors::EvalError;
use crate::expression::scan::reduce_calls;
use crate::operator::{OperatorRegistry, OperatorSpec};
use crate::utils::Value;

/// Evaluates and renders equations written with a registry's operators
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'r> {
    registry: &'r OperatorRegistry,
}

impl<'r> Evaluator<'r> {
    pub fn new(registry: &'r OperatorRegistry) -> Self {
        Self { registry }
    }

    pub(crate) fn operator(
        &self,
        equation: &str,
        name: &str,
        args: &[&str],
    ) -> Result<&'r OperatorSpec, EvalError> {
        let spec = self
            .registry
            .get(name)
            .ok_or_else(|| EvalError::malformed(equation, format!("unknown operator {}", name)))?;
        if spec.arity() != args.len() {
            return Err(EvalError::malformed(
                equation,
                format!(
                    "{} takes {} argument(s), found {}",
                    name,
                    spec.arity(),
                    args.len()
                ),
            ));
        }
        Ok(spec)
    }

    /// # Errors
    ///
    /// Returns an error when:
    /// - a sub-expression divides by zero
    /// - a root, factorial or power operand is outside its domain
    /// - a factorial or power exceeds the registry's limits
    /// - the text is not well-formed call syntax over known operators
    pub fn evaluate(&self, equation: &Equation) -> Result<Value, EvalError> {
        self.evaluate_str(equation.as_str())
    }

    /// # Errors
    ///
    /// See [`evaluate`](Self::evaluate).
    pub fn evaluate_str(&self, equation: &str) -> Result<Value, EvalError> {
        let limits = self.registry.limits();

        let reduced = reduce_calls(equation, |name, args| {
            let spec = self.operator(equation, name, args)?;
            let values = args
                .iter()
                .map(|arg| parse_value(equation, arg))
                .collect::<Result<Vec<_>, _>>()?;
            let value = spec.apply(&values, limits)?;
            Ok(value.to_string())
        });

        let result = reduced.and_then(|text| parse_value(equation, &text));
        match &result {
            Ok(value) => trace!("{} = {}", equation, value),
            Err(e) => trace!("{} failed: {}", equation, e),
        }
        result
    }
}

pub(crate) fn parse_value(equation: &str, text: &str) -> Result<Value, EvalError> {
    text.trim()
        .parse::<Value>()
        .map_err(|_| EvalError::malformed(equation, format!("not a number: {:?}", text)))
}
