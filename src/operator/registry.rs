use std::collections::HashMap;

use log::debug;

use crate::grammar::{NONTERMINAL_NAMES, PLACEHOLDER};
use crate::operator::errors::{ApplyError, RegistryError};
use crate::operator::kind::{ArithmeticLimits, OperatorKind, Rendered};
use crate::utils::Value;

/// One named operator as it appears in equation text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorSpec {
    name: String,
    kind: OperatorKind,
}

impl OperatorSpec {
    pub fn new(name: impl Into<String>, kind: OperatorKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> OperatorKind {
        self.kind
    }

    pub fn arity(&self) -> usize {
        self.kind.arity()
    }

    /// # Errors
    ///
    /// Propagates the operator's arithmetic failure.
    pub fn apply(&self, args: &[Value], limits: &ArithmeticLimits) -> Result<Value, ApplyError> {
        self.kind.apply(args, limits)
    }

    pub fn render(&self, args: &[Rendered]) -> Rendered {
        self.kind.render(args)
    }
}

impl From<OperatorKind> for OperatorSpec {
    fn from(kind: OperatorKind) -> Self {
        Self::new(kind.default_name(), kind)
    }
}

/// The fixed operator set of one solving session.
///
/// Names are looked up through a table built once here; nothing is resolved
/// by reflection at evaluation time.
#[derive(Debug, Clone)]
pub struct OperatorRegistry {
    unary: Vec<OperatorSpec>,
    binary: Vec<OperatorSpec>,
    lookup: HashMap<String, OperatorSpec>,
    unary_limit: usize,
    limits: ArithmeticLimits,
}

impl OperatorRegistry {
    /// # Errors
    ///
    /// Returns an error if a name is duplicated, malformed or reserved, or if
    /// an operator is listed under the wrong arity.
    pub fn configure(
        unary: Vec<OperatorSpec>,
        binary: Vec<OperatorSpec>,
        unary_limit: usize,
    ) -> Result<Self, RegistryError> {
        let mut lookup = HashMap::new();

        for (specs, expected) in [(&unary, 1), (&binary, 2)] {
            for spec in specs {
                validate_name(spec.name())?;
                if spec.arity() != expected {
                    return Err(RegistryError::ArityMismatch {
                        name: spec.name().to_string(),
                        expected,
                        actual: spec.arity(),
                    });
                }
                if lookup
                    .insert(spec.name().to_string(), spec.clone())
                    .is_some()
                {
                    return Err(RegistryError::DuplicateName(spec.name().to_string()));
                }
            }
        }

        debug!(
            "Configured {} unary and {} binary operators (unary limit {})",
            unary.len(),
            binary.len(),
            unary_limit
        );

        Ok(Self {
            unary,
            binary,
            lookup,
            unary_limit,
            limits: ArithmeticLimits::default(),
        })
    }

    /// Register operator kinds under their default names, split by arity.
    ///
    /// # Errors
    ///
    /// Returns an error if a kind is listed twice.
    pub fn from_kinds(kinds: &[OperatorKind], unary_limit: usize) -> Result<Self, RegistryError> {
        let (unary, binary): (Vec<OperatorKind>, Vec<OperatorKind>) =
            kinds.iter().copied().partition(|kind| kind.arity() == 1);
        Self::configure(
            unary.into_iter().map(OperatorSpec::from).collect(),
            binary.into_iter().map(OperatorSpec::from).collect(),
            unary_limit,
        )
    }

    pub fn with_limits(mut self, limits: ArithmeticLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn unary(&self) -> &[OperatorSpec] {
        &self.unary
    }

    pub fn binary(&self) -> &[OperatorSpec] {
        &self.binary
    }

    pub fn get(&self, name: &str) -> Option<&OperatorSpec> {
        self.lookup.get(name)
    }

    pub fn unary_limit(&self) -> usize {
        self.unary_limit
    }

    pub fn limits(&self) -> &ArithmeticLimits {
        &self.limits
    }
}

fn validate_name(name: &str) -> Result<(), RegistryError> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic() || c == '_') {
        return Err(RegistryError::InvalidName(name.to_string()));
    }
    if name.contains(PLACEHOLDER) || NONTERMINAL_NAMES.contains(&name) {
        return Err(RegistryError::ReservedName(name.to_string()));
    }
    Ok(())
}
