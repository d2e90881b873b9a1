use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::operator::errors::{ApplyError, RegistryError};
use crate::utils::{Value, is_integral};

/// Default upper bound for `n!`.
pub const DEFAULT_MAX_FACTORIAL: u64 = 20;
/// Default upper bound for the magnitude of an exponent.
pub const DEFAULT_MAX_EXPONENT: u32 = 64;
/// Default upper bound for the bit length of a numerator or denominator.
pub const DEFAULT_MAX_BITS: u64 = 4096;

/// Magnitude bounds for the operators whose results can explode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArithmeticLimits {
    pub max_factorial: u64,
    pub max_exponent: u32,
    pub max_bits: u64,
}

impl Default for ArithmeticLimits {
    fn default() -> Self {
        Self {
            max_factorial: DEFAULT_MAX_FACTORIAL,
            max_exponent: DEFAULT_MAX_EXPONENT,
            max_bits: DEFAULT_MAX_BITS,
        }
    }
}

/// Binding strength of a rendered fragment, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Additive,
    Multiplicative,
    Power,
    Postfix,
    Atom,
}

/// Infix text together with the precedence of its outermost operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub precedence: Precedence,
}

impl Rendered {
    /// A numeric literal; negative and fractional literals are grouped so
    /// they read as a single operand.
    pub fn literal(value: &Value) -> Self {
        let text = if crate::utils::needs_grouping(value) {
            format!("({})", value)
        } else {
            value.to_string()
        };
        Self {
            text,
            precedence: Precedence::Atom,
        }
    }

    fn grouped_if(&self, group: bool) -> String {
        if group {
            format!("({})", self.text)
        } else {
            self.text.clone()
        }
    }

    /// Final form of a whole expression: compound results get one outer pair.
    pub fn finish(self) -> String {
        if self.precedence < Precedence::Atom {
            format!("({})", self.text)
        } else {
            self.text
        }
    }
}

/// Every operator the solver knows how to apply and render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Neg,
    Sqrt,
    Factorial,
}

impl OperatorKind {
    pub const ALL: [OperatorKind; 8] = [
        OperatorKind::Add,
        OperatorKind::Sub,
        OperatorKind::Mul,
        OperatorKind::Div,
        OperatorKind::Pow,
        OperatorKind::Neg,
        OperatorKind::Sqrt,
        OperatorKind::Factorial,
    ];

    pub fn arity(self) -> usize {
        match self {
            OperatorKind::Neg | OperatorKind::Sqrt | OperatorKind::Factorial => 1,
            _ => 2,
        }
    }

    /// Name used in equation text unless the caller registers another one.
    pub fn default_name(self) -> &'static str {
        match self {
            OperatorKind::Add => "add",
            OperatorKind::Sub => "sub",
            OperatorKind::Mul => "mul",
            OperatorKind::Div => "div",
            OperatorKind::Pow => "pow",
            OperatorKind::Neg => "neg",
            OperatorKind::Sqrt => "sqrt",
            OperatorKind::Factorial => "fact",
        }
    }

    /// # Errors
    ///
    /// Returns an error when:
    /// - a divisor is zero, or zero is raised to a negative power
    /// - a root, factorial or exponent operand is outside its domain
    /// - a factorial, exponent or result size exceeds `limits`
    pub fn apply(self, args: &[Value], limits: &ArithmeticLimits) -> Result<Value, ApplyError> {
        let value = self.apply_unchecked(args, limits)?;
        let bits = bit_length(&value);
        if bits > limits.max_bits {
            return Err(ApplyError::Overflow(format!(
                "{} result has {} bits, limit is {}",
                self.default_name(),
                bits,
                limits.max_bits
            )));
        }
        Ok(value)
    }

    fn apply_unchecked(
        self,
        args: &[Value],
        limits: &ArithmeticLimits,
    ) -> Result<Value, ApplyError> {
        match (self, args) {
            (OperatorKind::Add, [a, b]) => Ok(a + b),
            (OperatorKind::Sub, [a, b]) => Ok(a - b),
            (OperatorKind::Mul, [a, b]) => Ok(a * b),
            (OperatorKind::Div, [a, b]) => {
                if b.is_zero() {
                    Err(ApplyError::DivisionByZero)
                } else {
                    Ok(a / b)
                }
            }
            (OperatorKind::Pow, [base, exponent]) => power(base, exponent, limits),
            (OperatorKind::Neg, [a]) => Ok(-a),
            (OperatorKind::Sqrt, [a]) => square_root(a),
            (OperatorKind::Factorial, [a]) => factorial(a, limits),
            _ => Err(ApplyError::DomainError(format!(
                "{} expects {} argument(s), got {}",
                self.default_name(),
                self.arity(),
                args.len()
            ))),
        }
    }

    /// Infix form of an application, parenthesizing only where standard
    /// precedence and associativity require it.
    pub fn render(self, args: &[Rendered]) -> Rendered {
        use Precedence::{Additive, Atom, Multiplicative, Postfix, Power};

        let infix = |l: &Rendered, op: &str, r: &Rendered, group_l: bool, group_r: bool, p| {
            Rendered {
                text: format!("{}{}{}", l.grouped_if(group_l), op, r.grouped_if(group_r)),
                precedence: p,
            }
        };

        match (self, args) {
            (OperatorKind::Add, [l, r]) => infix(
                l,
                "+",
                r,
                l.precedence < Additive,
                r.precedence < Additive,
                Additive,
            ),
            (OperatorKind::Sub, [l, r]) => infix(
                l,
                "-",
                r,
                l.precedence < Additive,
                r.precedence <= Additive,
                Additive,
            ),
            (OperatorKind::Mul, [l, r]) => infix(
                l,
                "*",
                r,
                l.precedence < Multiplicative,
                r.precedence < Multiplicative,
                Multiplicative,
            ),
            (OperatorKind::Div, [l, r]) => infix(
                l,
                "/",
                r,
                l.precedence < Multiplicative,
                r.precedence <= Multiplicative,
                Multiplicative,
            ),
            (OperatorKind::Pow, [l, r]) => infix(
                l,
                "^",
                r,
                l.precedence <= Power,
                r.precedence < Power,
                Power,
            ),
            (OperatorKind::Neg, [a]) => Rendered {
                text: format!("(-{})", a.grouped_if(a.precedence < Multiplicative)),
                precedence: Atom,
            },
            (OperatorKind::Sqrt, [a]) => Rendered {
                text: format!("sqrt({})", a.text),
                precedence: Atom,
            },
            (OperatorKind::Factorial, [a]) => Rendered {
                text: format!("{}!", a.grouped_if(a.precedence < Postfix)),
                precedence: Postfix,
            },
            _ => Rendered {
                text: format!(
                    "{}({})",
                    self.default_name(),
                    args.iter()
                        .map(|a| a.text.as_str())
                        .collect::<Vec<_>>()
                        .join(",")
                ),
                precedence: Atom,
            },
        }
    }
}

fn power(base: &Value, exponent: &Value, limits: &ArithmeticLimits) -> Result<Value, ApplyError> {
    if !is_integral(exponent) {
        return Err(ApplyError::DomainError(format!(
            "non-integer exponent {}",
            exponent
        )));
    }

    let magnitude = exponent
        .numer()
        .abs()
        .to_u32()
        .filter(|m| *m <= limits.max_exponent)
        .ok_or_else(|| {
            ApplyError::Overflow(format!(
                "exponent {} exceeds {}",
                exponent, limits.max_exponent
            ))
        })?;

    if base.is_zero() && exponent.is_negative() {
        return Err(ApplyError::DivisionByZero);
    }

    // Estimated before multiplying: one oversized power cannot be interrupted.
    let estimate = bit_length(base).saturating_mul(u64::from(magnitude));
    if estimate > limits.max_bits {
        return Err(ApplyError::Overflow(format!(
            "{}^{} needs about {} bits, limit is {}",
            base, exponent, estimate, limits.max_bits
        )));
    }

    let raised = num_traits::pow(base.clone(), magnitude as usize);
    if exponent.is_negative() {
        Ok(Value::one() / raised)
    } else {
        Ok(raised)
    }
}

/// Bit length of the larger of numerator and denominator.
fn bit_length(value: &Value) -> u64 {
    value.numer().bits().max(value.denom().bits())
}

fn square_root(value: &Value) -> Result<Value, ApplyError> {
    if value.is_negative() {
        return Err(ApplyError::DomainError(format!(
            "square root of negative {}",
            value
        )));
    }

    let numer = value.numer().sqrt();
    let denom = value.denom().sqrt();
    if &(&numer * &numer) != value.numer() || &(&denom * &denom) != value.denom() {
        return Err(ApplyError::DomainError(format!(
            "square root of {} is irrational",
            value
        )));
    }

    Ok(Value::new(numer, denom))
}

fn factorial(value: &Value, limits: &ArithmeticLimits) -> Result<Value, ApplyError> {
    if !is_integral(value) || value.is_negative() {
        return Err(ApplyError::DomainError(format!(
            "factorial of {} is undefined",
            value
        )));
    }

    let n = value
        .numer()
        .to_u64()
        .filter(|n| *n <= limits.max_factorial)
        .ok_or_else(|| {
            ApplyError::Overflow(format!(
                "factorial argument {} exceeds {}",
                value, limits.max_factorial
            ))
        })?;

    let product = (2..=n).fold(BigInt::one(), |acc, k| acc * k);
    Ok(Value::from_integer(product))
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.default_name())
    }
}

impl FromStr for OperatorKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "+" => Ok(OperatorKind::Add),
            "sub" | "-" => Ok(OperatorKind::Sub),
            "mul" | "*" => Ok(OperatorKind::Mul),
            "div" | "/" => Ok(OperatorKind::Div),
            "pow" | "^" => Ok(OperatorKind::Pow),
            "neg" => Ok(OperatorKind::Neg),
            "sqrt" => Ok(OperatorKind::Sqrt),
            "fact" | "factorial" | "!" => Ok(OperatorKind::Factorial),
            other => Err(RegistryError::UnknownOperator(other.to_string())),
        }
    }
}
