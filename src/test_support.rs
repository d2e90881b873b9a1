//! Helpers shared by unit and property tests.

use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::operator::{OperatorKind, OperatorRegistry};
use crate::utils::{Value, integer, is_integral};

pub fn registry(kinds: &[OperatorKind], unary_limit: usize) -> OperatorRegistry {
    match OperatorRegistry::from_kinds(kinds, unary_limit) {
        Ok(registry) => registry,
        Err(e) => panic!("registry should configure: {}", e),
    }
}

pub fn arithmetic() -> OperatorRegistry {
    registry(
        &[
            OperatorKind::Add,
            OperatorKind::Sub,
            OperatorKind::Mul,
            OperatorKind::Div,
        ],
        0,
    )
}

/// Evaluate ordinary infix text (`+ - * / ^`, unary minus, postfix `!`,
/// `sqrt(..)`) with the usual precedence rules. Returns `None` for anything
/// it cannot parse or compute exactly.
pub fn infix_value(text: &str) -> Option<Value> {
    let mut parser = InfixParser {
        chars: text.chars().filter(|c| !c.is_whitespace()).collect(),
        pos: 0,
    };
    let value = parser.expr()?;
    (parser.pos == parser.chars.len()).then_some(value)
}

struct InfixParser {
    chars: Vec<char>,
    pos: usize,
}

impl InfixParser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expr(&mut self) -> Option<Value> {
        let mut value = self.term()?;
        loop {
            if self.eat('+') {
                value = value + self.term()?;
            } else if self.eat('-') {
                value = value - self.term()?;
            } else {
                return Some(value);
            }
        }
    }

    fn term(&mut self) -> Option<Value> {
        let mut value = self.unary()?;
        loop {
            if self.eat('*') {
                value = value * self.unary()?;
            } else if self.eat('/') {
                let divisor = self.unary()?;
                if divisor.is_zero() {
                    return None;
                }
                value = value / divisor;
            } else {
                return Some(value);
            }
        }
    }

    fn unary(&mut self) -> Option<Value> {
        if self.eat('-') {
            return Some(-self.unary()?);
        }
        self.power()
    }

    fn power(&mut self) -> Option<Value> {
        let base = self.postfix()?;
        if !self.eat('^') {
            return Some(base);
        }
        let exponent = self.unary()?;
        if !is_integral(&exponent) {
            return None;
        }
        let magnitude = exponent.numer().abs().to_usize()?;
        let raised = num_traits::pow(base, magnitude);
        if exponent.is_negative() {
            if raised.is_zero() {
                return None;
            }
            Some(Value::one() / raised)
        } else {
            Some(raised)
        }
    }

    fn postfix(&mut self) -> Option<Value> {
        let mut value = self.primary()?;
        while self.eat('!') {
            if !is_integral(&value) || value.is_negative() {
                return None;
            }
            let n = value.numer().to_i64()?;
            value = (2..=n).fold(integer(1), |acc, k| acc * integer(k));
        }
        Some(value)
    }

    fn primary(&mut self) -> Option<Value> {
        if self.eat('(') {
            let value = self.expr()?;
            return self.eat(')').then_some(value);
        }

        if self.chars[self.pos..].starts_with(&['s', 'q', 'r', 't', '(']) {
            self.pos += 4;
            let operand = self.primary()?;
            if operand.is_negative() {
                return None;
            }
            let root = operand.numer().sqrt();
            let denom = operand.denom().sqrt();
            let candidate = Value::new(root, denom);
            return (&candidate * &candidate == operand).then_some(candidate);
        }

        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if start == self.pos {
            return None;
        }
        self.chars[start..self.pos]
            .iter()
            .collect::<String>()
            .parse::<Value>()
            .ok()
    }
}
