//! Rule specs and the built-in rules.
//!
//! A rule spec is a pipe-delimited list of rule atoms:
//!
//! ```text
//! required|alphanumeric|min:6|max:20
//! ```
//!
//! An atom is either a bare name (`email`) or a name followed by a colon
//! and an argument string (`between:18,65`, `regex:/^[a-z]+$/`). Only the
//! first colon separates the name, so arguments may contain colons.

pub mod checks;
pub mod date;
pub mod pattern;
pub mod patterns;
pub mod table;

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use pattern::{PatternCache, PatternError};
pub use table::{parameterized_rule_names, simple_rule_names};

/// One `|`-separated atom of a rule spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    /// A bare rule name, e.g. `email`.
    Simple { name: String },

    /// `name:args`, e.g. `min:6`.
    Parameterized { name: String, args: String },
}

impl Rule {
    /// Parse a single atom. Never fails: any text is a rule.
    pub fn parse(atom: &str) -> Self {
        match atom.split_once(':') {
            Some((name, args)) => Rule::Parameterized {
                name: name.to_string(),
                args: args.to_string(),
            },
            None => Rule::Simple {
                name: atom.to_string(),
            },
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Rule::Simple { name } | Rule::Parameterized { name, .. } => name,
        }
    }

    pub fn args(&self) -> Option<&str> {
        match self {
            Rule::Simple { .. } => None,
            Rule::Parameterized { args, .. } => Some(args),
        }
    }

    /// Whether a built-in rule answers to this atom.
    pub fn is_builtin(&self) -> bool {
        match self {
            Rule::Simple { name } => table::simple(name).is_some(),
            Rule::Parameterized { name, .. } => table::parameterized(name).is_some(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Simple { name } => f.write_str(name),
            Rule::Parameterized { name, args } => write!(f, "{}:{}", name, args),
        }
    }
}

/// A parsed rule spec: the ordered atoms of one pipe-delimited string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSpec {
    rules: Vec<Rule>,
}

impl RuleSpec {
    /// Split `spec` on `|` and parse every atom.
    ///
    /// Empty atoms are kept as simple rules with an empty name.
    pub fn parse(spec: &str) -> Self {
        Self {
            rules: spec.split('|').map(Rule::parse).collect(),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromStr for RuleSpec {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<'a> IntoIterator for &'a RuleSpec {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}", rule)?;
        }
        Ok(())
    }
}
