use std::fmt;
use std::time::Instant;

use log::{debug, warn};

use crate::grammar::rules::{Grammar, Nonterminal, PLACEHOLDER, Symbol};
use crate::operator::OperatorRegistry;

/// An expression shape in call syntax with `TERM` where numbers go,
/// e.g. `mul(add(TERM,TERM),TERM)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Template {
    text: String,
    terms: usize,
}

impl Template {
    /// Wrap caller-supplied template text, counting its placeholders.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let terms = text.matches(PLACEHOLDER).count();
        Self { text, terms }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of placeholder tokens.
    pub fn terms(&self) -> usize {
        self.terms
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Early-stop bounds for template enumeration
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationLimits {
    pub max_templates: Option<usize>,
    pub deadline: Option<Instant>,
}

/// Templates produced by one enumeration
#[derive(Debug, Clone, Default)]
pub struct Generated {
    pub templates: Vec<Template>,
    /// True when a limit stopped enumeration before it finished.
    pub truncated: bool,
}

/// A partially derived template and the budgets left on its branch
#[derive(Debug, Clone)]
struct Derivation {
    symbols: Vec<Symbol>,
    unary_budget: usize,
    term_budget: usize,
}

impl Derivation {
    fn leftmost_nonterminal(&self) -> Option<(usize, Nonterminal)> {
        self.symbols
            .iter()
            .enumerate()
            .find_map(|(i, symbol)| match symbol {
                Symbol::Nonterminal(nt) => Some((i, *nt)),
                _ => None,
            })
    }

    fn to_template(&self) -> Template {
        let mut text = String::new();
        let mut terms = 0;
        for symbol in &self.symbols {
            match symbol {
                Symbol::Text(s) => text.push_str(s),
                Symbol::Term => {
                    text.push_str(PLACEHOLDER);
                    terms += 1;
                }
                Symbol::Nonterminal(nt) => text.push_str(nt.name()),
            }
        }
        Template { text, terms }
    }
}

/// Expands a [`Grammar`] into every template with a fixed number of terms.
///
/// Two budgets bound each branch. `unary_budget` counts the unary calls
/// still allowed. `term_budget` counts the placeholders not yet claimed by
/// an open slot: a BINARY expansion turns one slot into two and spends one
/// unit. A spent budget prunes the matching alternative, so every branch
/// terminates.
pub struct TemplateGenerator {
    /// Indexed by `(unary spent) * 2 + (terms spent)`.
    grammars: [Grammar; 4],
}

impl TemplateGenerator {
    pub fn new(registry: &OperatorRegistry) -> Self {
        let full = Grammar::from_registry(registry);
        let no_unary = registry.unary().is_empty();
        let no_binary = registry.binary().is_empty();

        let grammars = [
            full.pruned(no_unary, no_binary),
            full.pruned(no_unary, true),
            full.pruned(true, no_binary),
            full.pruned(true, true),
        ];

        Self { grammars }
    }

    fn grammar_for(&self, unary_budget: usize, term_budget: usize) -> &Grammar {
        let index = usize::from(unary_budget == 0) * 2 + usize::from(term_budget == 0);
        &self.grammars[index]
    }

    /// All templates with exactly `num_terms` placeholders and at most
    /// `unary_limit` unary calls.
    pub fn generate(&self, num_terms: usize, unary_limit: usize) -> Vec<Template> {
        self.generate_bounded(num_terms, unary_limit, &GenerationLimits::default())
            .templates
    }

    /// Like [`generate`](Self::generate), stopping early at `limits`.
    pub fn generate_bounded(
        &self,
        num_terms: usize,
        unary_limit: usize,
        limits: &GenerationLimits,
    ) -> Generated {
        debug!(
            "Generating templates for {} terms, unary limit {}",
            num_terms, unary_limit
        );

        let mut generated = Generated::default();
        if num_terms == 0 {
            return generated;
        }

        let mut stack = vec![Derivation {
            symbols: vec![Symbol::Nonterminal(Nonterminal::Start)],
            unary_budget: unary_limit,
            term_budget: num_terms - 1,
        }];
        let mut discarded = 0usize;

        while let Some(derivation) = stack.pop() {
            if limits.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                warn!("Template generation deadline reached");
                generated.truncated = true;
                break;
            }

            let Some((position, nonterminal)) = derivation.leftmost_nonterminal() else {
                let template = derivation.to_template();
                if template.terms == num_terms {
                    if limits
                        .max_templates
                        .is_some_and(|max| generated.templates.len() >= max)
                    {
                        warn!(
                            "Template limit reached ({}), stopping enumeration",
                            generated.templates.len()
                        );
                        generated.truncated = true;
                        break;
                    }
                    generated.templates.push(template);
                } else {
                    discarded += 1;
                }
                continue;
            };

            let unary_budget = match nonterminal {
                Nonterminal::Unary => derivation.unary_budget.saturating_sub(1),
                _ => derivation.unary_budget,
            };
            let term_budget = match nonterminal {
                Nonterminal::Binary => derivation.term_budget.saturating_sub(1),
                _ => derivation.term_budget,
            };

            let grammar = self.grammar_for(derivation.unary_budget, derivation.term_budget);

            // Reverse so the first alternative is expanded first.
            for production in grammar.alternatives(nonterminal).iter().rev() {
                let mut symbols = Vec::with_capacity(
                    derivation.symbols.len() + production.symbols().len() - 1,
                );
                symbols.extend_from_slice(&derivation.symbols[..position]);
                symbols.extend_from_slice(production.symbols());
                symbols.extend_from_slice(&derivation.symbols[position + 1..]);
                stack.push(Derivation {
                    symbols,
                    unary_budget,
                    term_budget,
                });
            }
        }

        debug!(
            "Generated {} templates ({} short candidates discarded)",
            generated.templates.len(),
            discarded
        );
        generated
    }
}
