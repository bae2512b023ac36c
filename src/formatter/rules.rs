//! Individual rewrite rules applied by the formatter.
//!
//! Each rule is a pure `&str -> String` rewrite. Rules never fail at
//! runtime; a pattern that does not match leaves the text untouched.

use regex::{Captures, Regex};

/// Horizontal whitespace. Rules that work within a line use this instead of
/// `\s` so they never join two lines together.
const HSPACE: &str = r"[ \t]*";

/// How a rule turns a match into output.
enum Rewrite {
    /// Plain `replace_all` with a `$name` / `${n}` template.
    Template(&'static str),
    /// Binary-operator rewrite. The pattern has `lhs`, `op` and `rhs` groups;
    /// everything between `lhs` and `rhs` is replaced by the joiner, and the
    /// search resumes at `rhs` so chained expressions are covered.
    Join(fn(&Captures) -> String),
}

pub struct Rule {
    name: &'static str,
    pattern: Regex,
    rewrite: Rewrite,
}

impl Rule {
    fn template(name: &'static str, pattern: &str, template: &'static str) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            rewrite: Rewrite::Template(template),
        })
    }

    fn join(name: &'static str, pattern: &str, joiner: fn(&Captures) -> String) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            rewrite: Rewrite::Join(joiner),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn apply(&self, text: &str) -> String {
        match &self.rewrite {
            Rewrite::Template(template) => self.pattern.replace_all(text, *template).into_owned(),
            Rewrite::Join(joiner) => join_operands(&self.pattern, text, *joiner),
        }
    }
}

fn join_operands(pattern: &Regex, text: &str, joiner: fn(&Captures) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut pos = 0;

    while pos <= text.len() {
        let Some(caps) = pattern.captures_at(text, pos) else {
            break;
        };
        let (Some(lhs), Some(rhs)) = (caps.name("lhs"), caps.name("rhs")) else {
            break;
        };
        out.push_str(&text[last..lhs.end()]);
        out.push_str(&joiner(&caps));
        last = rhs.start();
        // rhs always starts past lhs and the operator, so this advances.
        pos = rhs.start();
    }

    out.push_str(&text[last..]);
    out
}

fn spaced_operator(caps: &Captures) -> String {
    format!(" {} ", &caps["op"])
}

fn bare_operator(caps: &Captures) -> String {
    caps["op"].to_string()
}

/// `1. Overview`, `2 Conclusion`
pub fn heading_numbered() -> Result<Rule, regex::Error> {
    Rule::template(
        "heading_numbered",
        r"(?m)^(\d+\.?[ \t]+[A-Z][^:\n]*)$",
        "**${1}**",
    )
}

/// `Summary:`
pub fn heading_label() -> Result<Rule, regex::Error> {
    Rule::template("heading_label", r"(?m)^([A-Z][^:\n]*:)$", "**${1}**")
}

/// `RESULTS`, `FINAL ANSWER`
pub fn heading_caps() -> Result<Rule, regex::Error> {
    Rule::template("heading_caps", r"(?m)^([A-Z][A-Z \t]+)$", "**${1}**")
}

/// `x = 5` becomes `**x** = 5`. Not anchored to line starts.
pub fn assignment() -> Result<Rule, regex::Error> {
    Rule::template(
        "assignment",
        &format!(r"(\w+){HSPACE}={HSPACE}([^=\n]+)"),
        "**${1}** = ${2}",
    )
}

pub fn numeric_operator_spacing() -> Result<Rule, regex::Error> {
    Rule::join(
        "numeric_operator_spacing",
        &format!(r"(?P<lhs>\d+){HSPACE}(?P<op>[+\-*/]){HSPACE}(?P<rhs>\d+)"),
        spaced_operator,
    )
}

pub fn word_operator_spacing() -> Result<Rule, regex::Error> {
    Rule::join(
        "word_operator_spacing",
        &format!(r"(?P<lhs>\w+){HSPACE}(?P<op>[+\-*/]){HSPACE}(?P<rhs>\w+)"),
        spaced_operator,
    )
}

/// Recognises `√[...]` and re-emits it as is.
pub fn square_root() -> Result<Rule, regex::Error> {
    Rule::template("square_root", r"√\[([^\]]+)\]", "√[${1}]")
}

/// Recognises `x^2` and re-emits it as is.
pub fn numeric_power() -> Result<Rule, regex::Error> {
    Rule::template("numeric_power", r"(\w+)\^(\d+)", "${1}^${2}")
}

/// Recognises `x^n` and re-emits it as is.
pub fn word_power() -> Result<Rule, regex::Error> {
    Rule::template("word_power", r"(\w+)\^(\w+)", "${1}^${2}")
}

/// `a / b` becomes `a/b`.
pub fn fraction() -> Result<Rule, regex::Error> {
    Rule::join(
        "fraction",
        &format!(r"(?P<lhs>\w+){HSPACE}(?P<op>/){HSPACE}(?P<rhs>\w+)"),
        bare_operator,
    )
}

/// `sin(x)` becomes `**sin**(x)`.
pub fn trig_function() -> Result<Rule, regex::Error> {
    Rule::template(
        "trig_function",
        r"\b(arccos|arcsin|arctan|cos|sin|tan)\s*\(",
        "**${1}**(",
    )
}

/// Last spacing pass over single alphanumeric neighbours. `/` is left out
/// so fractions compacted earlier stay compact.
pub fn operator_respacing() -> Result<Rule, regex::Error> {
    Rule::join(
        "operator_respacing",
        &format!(r"(?P<lhs>[a-zA-Z0-9]){HSPACE}(?P<op>[+\-*=]){HSPACE}(?P<rhs>[a-zA-Z0-9])"),
        spaced_operator,
    )
}

/// `- item` and `  * item` become `• item`.
pub fn bullet() -> Result<Rule, regex::Error> {
    Rule::template("bullet", r"(?m)^[ \t]*[-*][ \t]+", "• ")
}

/// The full pipeline, in application order.
pub fn default_rules() -> Result<Vec<Rule>, regex::Error> {
    Ok(vec![
        heading_numbered()?,
        heading_label()?,
        heading_caps()?,
        assignment()?,
        numeric_operator_spacing()?,
        word_operator_spacing()?,
        square_root()?,
        numeric_power()?,
        word_power()?,
        fraction()?,
        trig_function()?,
        operator_respacing()?,
        bullet()?,
    ])
}
