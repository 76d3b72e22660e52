use std::{borrow::Cow, fmt};

use regex::{Regex, RegexBuilder};
use tracing::trace;

use crate::{
    ast::{Literal, Operation, literal::unquote},
    operations::{self, Candidate},
    value::JsonNode,
};

/// One `key operator literal` admission clause.
///
/// A filter is immutable once built. The source token is kept next to its
/// typed form: the text operators read it as written, so `0070` stays
/// `0070`. For the like operators the pattern is compiled here, once; a
/// pattern that does not compile never matches.
#[derive(Debug, Clone)]
pub struct Filter {
    key: String,
    op: Operation,
    raw: String,
    literal: Literal,
    pattern: Option<Regex>,
}

impl Filter {
    /// Builds a clause from the literal token as it appears in the query,
    /// quotes included.
    pub fn new(key: impl Into<String>, op: Operation, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let literal = Literal::typed(&raw);
        let pattern = match op {
            Operation::Like | Operation::NotLike => {
                let source = unquote(&raw);
                match RegexBuilder::new(&source).case_insensitive(true).build() {
                    Ok(re) => Some(re),
                    Err(e) => {
                        trace!(pattern = %source, error = %e, "like pattern does not compile");
                        None
                    }
                }
            }
            _ => None,
        };

        Filter {
            key: key.into(),
            op,
            raw,
            literal,
            pattern,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn op(&self) -> Operation {
        self.op
    }

    pub fn literal(&self) -> &Literal {
        &self.literal
    }

    /// The literal token as written in the query.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Source token with one layer of quotes removed; what `:` and `!:`
    /// search for.
    pub fn text(&self) -> Cow<'_, str> {
        unquote(&self.raw)
    }

    /// Compiled like-pattern, if the operator is a like operator and the
    /// literal is a valid expression.
    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    /// Evaluates the clause against a candidate already pulled out of a node.
    pub fn matches(&self, candidate: &Candidate<'_>) -> bool {
        operations::apply(self, candidate)
    }

    /// Evaluates the clause against the field `key` of an object node.
    /// A missing field fails the clause.
    pub fn admits<N: JsonNode>(&self, object: &N) -> bool {
        match object.get(&self.key) {
            Some(field) => self.matches(&Candidate::from_node(field)),
            None => false,
        }
    }
}

impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.op == other.op && self.raw == other.raw
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.key, self.op, self.raw)
    }
}
