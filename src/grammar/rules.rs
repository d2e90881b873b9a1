use std::collections::BTreeMap;
use std::fmt;

use crate::operator::{OperatorRegistry, OperatorSpec};

/// Token standing for "the next input number" in a template.
pub const PLACEHOLDER: &str = "TERM";

/// Names of the grammar's nonterminals; operator names may not reuse them.
pub const NONTERMINAL_NAMES: [&str; 5] = ["START", "UNARY", "BINARY", "PARAMETER", "NUM"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Nonterminal {
    Start,
    Unary,
    Binary,
    Parameter,
    Num,
}

impl Nonterminal {
    pub fn name(self) -> &'static str {
        match self {
            Nonterminal::Start => "START",
            Nonterminal::Unary => "UNARY",
            Nonterminal::Binary => "BINARY",
            Nonterminal::Parameter => "PARAMETER",
            Nonterminal::Num => "NUM",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Nonterminal(Nonterminal),
    Text(String),
    Term,
}

/// One right-hand side of a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    symbols: Vec<Symbol>,
}

impl Production {
    fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    fn unary_call(spec: &OperatorSpec) -> Self {
        Self::new(vec![
            Symbol::Text(format!("{}(", spec.name())),
            Symbol::Nonterminal(Nonterminal::Parameter),
            Symbol::Text(")".to_string()),
        ])
    }

    fn binary_call(spec: &OperatorSpec) -> Self {
        Self::new(vec![
            Symbol::Text(format!("{}(", spec.name())),
            Symbol::Nonterminal(Nonterminal::Parameter),
            Symbol::Text(",".to_string()),
            Symbol::Nonterminal(Nonterminal::Parameter),
            Symbol::Text(")".to_string()),
        ])
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for symbol in &self.symbols {
            match symbol {
                Symbol::Nonterminal(nt) => write!(f, "{}", nt.name())?,
                Symbol::Text(text) => write!(f, "{}", text)?,
                Symbol::Term => write!(f, "{}", PLACEHOLDER)?,
            }
        }
        Ok(())
    }
}

/// Context-free rules of operator composition:
///
/// ```text
/// START     -> UNARY | BINARY | NUM
/// UNARY     -> <unary>(PARAMETER)
/// BINARY    -> <binary>(PARAMETER,PARAMETER)
/// PARAMETER -> UNARY | BINARY | NUM
/// NUM       -> TERM
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    rules: BTreeMap<Nonterminal, Vec<Production>>,
}

impl Grammar {
    /// Derive the full rule set from the registered operators.
    pub fn from_registry(registry: &OperatorRegistry) -> Self {
        let branches = vec![
            Production::new(vec![Symbol::Nonterminal(Nonterminal::Unary)]),
            Production::new(vec![Symbol::Nonterminal(Nonterminal::Binary)]),
            Production::new(vec![Symbol::Nonterminal(Nonterminal::Num)]),
        ];

        let mut rules = BTreeMap::new();
        rules.insert(Nonterminal::Start, branches.clone());
        rules.insert(Nonterminal::Parameter, branches);
        rules.insert(
            Nonterminal::Unary,
            registry.unary().iter().map(Production::unary_call).collect(),
        );
        rules.insert(
            Nonterminal::Binary,
            registry.binary().iter().map(Production::binary_call).collect(),
        );
        rules.insert(Nonterminal::Num, vec![Production::new(vec![Symbol::Term])]);

        Self { rules }
    }

    /// The same grammar with UNARY and/or BINARY branches removed from START
    /// and PARAMETER, as used once the matching budget is spent.
    pub fn pruned(&self, without_unary: bool, without_binary: bool) -> Self {
        let keep = |production: &Production| {
            !production.symbols.iter().any(|symbol| match symbol {
                Symbol::Nonterminal(Nonterminal::Unary) => without_unary,
                Symbol::Nonterminal(Nonterminal::Binary) => without_binary,
                _ => false,
            })
        };

        let rules = self
            .rules
            .iter()
            .map(|(nt, productions)| {
                let kept = match nt {
                    Nonterminal::Start | Nonterminal::Parameter => {
                        productions.iter().filter(|p| keep(*p)).cloned().collect()
                    }
                    _ => productions.clone(),
                };
                (*nt, kept)
            })
            .collect();

        Self { rules }
    }

    pub fn alternatives(&self, nonterminal: Nonterminal) -> &[Production] {
        self.rules
            .get(&nonterminal)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (nt, productions) in &self.rules {
            let alternatives: Vec<String> = productions.iter().map(ToString::to_string).collect();
            writeln!(f, "{} -> {}", nt.name(), alternatives.join(" | "))?;
        }
        Ok(())
    }
}
