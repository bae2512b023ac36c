//! Turns a raw completion into display-ready text.
//!
//! The formatter is an ordered list of regex rewrite rules folded over the
//! input. It is best-effort: it does not parse markdown and is not
//! idempotent (formatting twice can wrap assignments again).

pub mod rules;

use log::debug;

pub use rules::Rule;

pub struct Formatter {
    rules: Vec<Rule>,
}

impl Formatter {
    /// Compiles the default rule pipeline.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self::with_rules(rules::default_rules()?))
    }

    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(Rule::name)
    }

    pub fn format(&self, raw: &str) -> String {
        let formatted = self
            .rules
            .iter()
            .fold(raw.to_string(), |text, rule| rule.apply(&text));
        debug!(
            "Formatted completion: {} -> {} characters",
            raw.len(),
            formatted.len()
        );
        formatted
    }
}

#[cfg(test)]
mod tests;
