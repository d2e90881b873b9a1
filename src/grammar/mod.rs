//! Grammar of operator compositions and the template generator built on it

mod generator;
mod rules;

pub use generator::{GenerationLimits, Generated, Template, TemplateGenerator};
pub use rules::{Grammar, NONTERMINAL_NAMES, Nonterminal, PLACEHOLDER, Production, Symbol};
