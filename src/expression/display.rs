use crate::equation::Equation;
use crate::expression::errors::EvalError;
use crate::expression::eval::{Evaluator, parse_value};
use crate::expression::scan::reduce_calls;
use crate::operator::Rendered;

/// Marks a slot in the working text whose rendering is held aside, so that
/// rendered output is never scanned again as call syntax.
const FRAGMENT_MARK: char = '#';

impl Evaluator<'_> {
    /// Render an equation as infix text, e.g. `mul(add(1,2),3)` as
    /// `((1+2)*3)`. No arithmetic is performed.
    ///
    /// # Errors
    ///
    /// Returns an error only for malformed equation text.
    pub fn render(&self, equation: &Equation) -> Result<String, EvalError> {
        self.render_str(equation.as_str())
    }

    /// # Errors
    ///
    /// See [`render`](Self::render).
    pub fn render_str(&self, equation: &str) -> Result<String, EvalError> {
        let mut fragments: Vec<Rendered> = Vec::new();

        let reduced = reduce_calls(equation, |name, args| {
            let spec = self.operator(equation, name, args)?;
            let operands = args
                .iter()
                .map(|arg| operand(equation, arg, &fragments))
                .collect::<Result<Vec<_>, _>>()?;
            fragments.push(spec.render(&operands));
            Ok(format!("{}{}", FRAGMENT_MARK, fragments.len() - 1))
        })?;

        Ok(operand(equation, &reduced, &fragments)?.finish())
    }
}

fn operand(equation: &str, arg: &str, fragments: &[Rendered]) -> Result<Rendered, EvalError> {
    let arg = arg.trim();
    match arg.strip_prefix(FRAGMENT_MARK) {
        Some(index) => index
            .parse::<usize>()
            .ok()
            .and_then(|i| fragments.get(i))
            .cloned()
            .ok_or_else(|| EvalError::malformed(equation, format!("dangling fragment {}", arg))),
        None => parse_value(equation, arg).map(|value| Rendered::literal(&value)),
    }
}
