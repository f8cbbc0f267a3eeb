//! Literal text conditions
//!
//! Conditions are plain substring tests combined with boolean operators. They
//! deserialize from the `condition` key of a `[[rules]]` entry:
//!
//! ```toml
//! condition = { contains = "CORSMiddleware" }
//! condition = { any = [{ contains = "re.compile" }, { contains = "MediaNLU" }] }
//! condition = { not = { contains_ignore_case = "password" } }
//! condition = { every_line = { text = "==", comment_prefix = "#" } }
//! ```

use memchr::memmem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boolean test over a file's text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Text contains the substring
    Contains(String),
    /// Lowercased text contains the lowercased substring
    ContainsIgnoreCase(String),
    Not(Box<Condition>),
    /// At least one sub-condition holds (false when empty)
    Any(Vec<Condition>),
    /// Every sub-condition holds (true when empty)
    All(Vec<Condition>),
    /// Every line satisfies the line rule
    EveryLine(LineRule),
}

/// Per-line requirement used by [`Condition::EveryLine`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRule {
    /// Substring each counted line must contain
    pub text: String,
    /// Whitespace-only lines are exempt
    #[serde(default = "default_allow_blank")]
    pub allow_blank: bool,
    /// Lines starting with this prefix are exempt
    #[serde(default)]
    pub comment_prefix: Option<String>,
}

fn default_allow_blank() -> bool {
    true
}

impl LineRule {
    fn accepts(&self, line: &str) -> bool {
        if self.allow_blank && line.trim().is_empty() {
            return true;
        }
        if let Some(prefix) = &self.comment_prefix {
            if line.starts_with(prefix.as_str()) {
                return true;
            }
        }
        contains(line, &self.text)
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    memmem::find(haystack.as_bytes(), needle.as_bytes()).is_some()
}

impl Condition {
    pub fn contains(text: impl Into<String>) -> Self {
        Condition::Contains(text.into())
    }

    pub fn contains_ignore_case(text: impl Into<String>) -> Self {
        Condition::ContainsIgnoreCase(text.into())
    }

    pub fn negate(self) -> Self {
        Condition::Not(Box::new(self))
    }

    /// Evaluate against a file's full text
    pub fn evaluate(&self, content: &str) -> bool {
        match self {
            Condition::Contains(text) => contains(content, text),
            Condition::ContainsIgnoreCase(text) => {
                contains(&content.to_lowercase(), &text.to_lowercase())
            }
            Condition::Not(inner) => !inner.evaluate(content),
            Condition::Any(conditions) => conditions.iter().any(|c| c.evaluate(content)),
            Condition::All(conditions) => conditions.iter().all(|c| c.evaluate(content)),
            Condition::EveryLine(rule) => content.lines().all(|line| rule.accepts(line)),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, items: &[Condition], sep: &str) -> fmt::Result {
            write!(f, "(")?;
            for (i, c) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, " {sep} ")?;
                }
                write!(f, "{c}")?;
            }
            write!(f, ")")
        }

        match self {
            Condition::Contains(text) => write!(f, "contains {text:?}"),
            Condition::ContainsIgnoreCase(text) => write!(f, "contains {text:?} (any case)"),
            Condition::Not(inner) => write!(f, "not {inner}"),
            Condition::Any(items) => join(f, items, "or"),
            Condition::All(items) => join(f, items, "and"),
            Condition::EveryLine(rule) => write!(f, "every line contains {:?}", rule.text),
        }
    }
}
