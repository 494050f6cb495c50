//! Renderable summaries of test results
//!
//! An [`Expression`] is a list of [`Term`]s such as `t_Student(5) = 1.15` or
//! `CI_95% [-0.36, 1.26]`. Formatting to text is the only rendering done
//! here; figures attach the expression verbatim as a subtitle or caption.

use histostats_core::format::{format_interval, format_level, format_p_value, format_value};
use serde::Serialize;
use std::fmt;

/// A mathematical symbol with optional decorations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    /// Base glyph, e.g. `t` or `μ`
    pub name: String,
    /// Whether the symbol wears a hat (an estimate)
    pub hat: bool,
    /// Subscript text
    pub subscript: Option<String>,
    /// Superscript text
    pub superscript: Option<String>,
}

impl Symbol {
    /// Plain symbol
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hat: false,
            subscript: None,
            superscript: None,
        }
    }

    /// Mark the symbol as an estimate
    pub fn hat(mut self) -> Self {
        self.hat = true;
        self
    }

    /// Attach a subscript
    pub fn sub(mut self, subscript: impl Into<String>) -> Self {
        self.subscript = Some(subscript.into());
        self
    }

    /// Attach a superscript
    pub fn sup(mut self, superscript: impl Into<String>) -> Self {
        self.superscript = Some(superscript.into());
        self
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.hat {
            // combining circumflex
            f.write_str("\u{0302}")?;
        }
        if let Some(sub) = &self.subscript {
            write!(f, "_{sub}")?;
        }
        if let Some(sup) = &self.superscript {
            write!(f, "^{sup}")?;
        }
        Ok(())
    }
}

/// How a term's symbol relates to its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Relation {
    /// `symbol = value`
    Equals,
    /// `symbol value`
    Juxtaposed,
}

/// One `symbol(argument) = value` item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    /// The symbol
    pub symbol: Symbol,
    /// Parenthesised argument, e.g. degrees of freedom
    pub argument: Option<String>,
    /// How symbol and value are joined
    pub relation: Relation,
    /// Already formatted value
    pub value: String,
}

impl Term {
    /// `symbol = value`
    pub fn equals(symbol: Symbol, value: impl Into<String>) -> Self {
        Self {
            symbol,
            argument: None,
            relation: Relation::Equals,
            value: value.into(),
        }
    }

    /// `symbol(argument) = value`
    pub fn with_argument(symbol: Symbol, argument: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            symbol,
            argument: Some(argument.into()),
            relation: Relation::Equals,
            value: value.into(),
        }
    }

    /// `p = …` with p-value formatting
    pub fn p_value(p: f64, digits: usize) -> Self {
        Self::equals(Symbol::new("p"), format_p_value(p, digits))
    }

    /// `CI_95% [lower, upper]`, optionally with a method superscript
    pub fn interval(level: f64, lower: f64, upper: f64, digits: usize, method: Option<&str>) -> Self {
        let mut symbol = Symbol::new("CI").sub(format_level(level));
        if let Some(method) = method {
            symbol = symbol.sup(method);
        }
        Self {
            symbol,
            argument: None,
            relation: Relation::Juxtaposed,
            value: format_interval(lower, upper, digits),
        }
    }

    /// `n_obs = n`
    pub fn n_obs(n: usize) -> Self {
        Self::equals(Symbol::new("n").sub("obs"), n.to_string())
    }

    /// `symbol = value` with fixed-point formatting
    pub fn value(symbol: Symbol, value: f64, digits: usize) -> Self {
        Self::equals(symbol, format_value(value, digits))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)?;
        if let Some(arg) = &self.argument {
            write!(f, "({arg})")?;
        }
        match self.relation {
            Relation::Equals => write!(f, " = {}", self.value),
            Relation::Juxtaposed => write!(f, " {}", self.value),
        }
    }
}

/// A comma separated list of terms
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Expression {
    terms: Vec<Term>,
}

impl Expression {
    /// Create an expression from terms
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    /// Append a term
    pub fn push(&mut self, term: Term) {
        self.terms.push(term);
    }

    /// The terms, in display order
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Check if the expression has no terms
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Find a term by its symbol name
    pub fn term(&self, name: &str) -> Option<&Term> {
        self.terms.iter().find(|t| t.symbol.name == name)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

impl From<Expression> for String {
    fn from(expression: Expression) -> Self {
        expression.to_string()
    }
}
