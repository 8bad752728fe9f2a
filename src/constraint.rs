//! Build constraint evaluation
//!
//! A `// +build` line is a disjunction of space-separated fields; each field
//! is a conjunction of comma-separated atoms; an atom is a tag, optionally
//! negated with `!`. Separate lines in one file are conjoined.
//!
//! ```text
//! // +build linux,386 darwin,!cgo
//! ```
//!
//! reads as `(linux AND 386) OR (darwin AND NOT cgo)`.

use std::fmt;

use tracing::trace;

use crate::tags::TagSet;

/// A single tag test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub tag: String,
    pub negated: bool,
}

impl Atom {
    pub fn parse(text: &str) -> Self {
        match text.strip_prefix('!') {
            Some(tag) => Self {
                tag: tag.to_string(),
                negated: true,
            },
            None => Self {
                tag: text.to_string(),
                negated: false,
            },
        }
    }

    pub fn eval(&self, tags: &TagSet) -> bool {
        tags.contains(&self.tag) != self.negated
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!{}", self.tag)
        } else {
            write!(f, "{}", self.tag)
        }
    }
}

/// Comma-joined atoms, all of which must hold
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clause {
    pub atoms: Vec<Atom>,
}

impl Clause {
    pub fn parse(field: &str) -> Self {
        let atoms = field
            .split(',')
            .filter(|a| !a.is_empty())
            .map(Atom::parse)
            .collect();
        Self { atoms }
    }

    /// Empty conjunction is true
    pub fn eval(&self, tags: &TagSet) -> bool {
        self.atoms.iter().all(|atom| atom.eval(tags))
    }
}

/// One `// +build` line: any clause may hold
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintLine {
    pub clauses: Vec<Clause>,
}

impl ConstraintLine {
    pub fn parse(line: &str) -> Self {
        let clauses = line.split_whitespace().map(Clause::parse).collect();
        Self { clauses }
    }

    /// Empty disjunction is false
    pub fn eval(&self, tags: &TagSet) -> bool {
        self.clauses.iter().any(|clause| {
            let holds = clause.eval(tags);
            trace!(clause = ?clause.atoms.iter().map(ToString::to_string).collect::<Vec<_>>(), holds);
            holds
        })
    }
}

/// Whether a file with these raw constraint lines is included under `tags`.
///
/// No lines means unconditionally included.
pub fn evaluate<S: AsRef<str>>(lines: &[S], tags: &TagSet) -> bool {
    lines
        .iter()
        .all(|line| ConstraintLine::parse(line.as_ref()).eval(tags))
}
