//! Comparison contract of every filter operator.
//!
//! A filter compares its [`Literal`] with a [`Candidate`]: a scalar pulled
//! out of a document node, or the scalars of an array node. Operators are
//! total: every combination the table below does not list is `false`.
//!
//! | operator        | numbers            | strings                        | booleans / null |
//! |-----------------|--------------------|--------------------------------|-----------------|
//! | `===`           | equal by value     | exact match                    | identity        |
//! | `==`            | equal by value     | candidate contains literal     | identity        |
//! | `!==` `!=`      | differ by value    | not an exact match             | differ          |
//! | `>` `>=` `<` `<=` | numeric order    | code-point order               | never           |
//! | `:` `!:`        | never              | case-insensitive substring     | never           |
//! | `::` `!::`      | never              | case-insensitive regex         | never           |
//!
//! Arrays fold per [`Operation::fold`]. Only arrays whose elements are all
//! scalars of one kind take part; anything else is `false`.

use std::cmp::Ordering;

use crate::{
    ast::{Filter, Fold, Literal, Operation},
    value::{JsonNode, Kind},
};

/// Scalar extracted from a document node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'a str),
}

impl<'a> Scalar<'a> {
    /// Scalar view of a node; `None` for objects and arrays.
    pub fn from_node<N: JsonNode>(node: &'a N) -> Option<Self> {
        match node.kind() {
            Kind::Null => Some(Scalar::Null),
            Kind::True => Some(Scalar::Bool(true)),
            Kind::False => Some(Scalar::Bool(false)),
            Kind::Number => match node.as_i64() {
                Some(n) => Some(Scalar::Int(n)),
                None => node.as_f64().map(Scalar::Float),
            },
            Kind::String => node.as_str().map(Scalar::Str),
            Kind::Object | Kind::Array => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(n) => Some(*n as f64),
            Scalar::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Numbers are one family whatever their representation.
    fn family(&self) -> u8 {
        match self {
            Scalar::Null => 0,
            Scalar::Bool(_) => 1,
            Scalar::Int(_) | Scalar::Float(_) => 2,
            Scalar::Str(_) => 3,
        }
    }
}

/// Right-hand side of a comparison, as seen by the operation engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate<'a> {
    Scalar(Scalar<'a>),
    /// Elements of a homogeneous array of scalars
    Array(Vec<Scalar<'a>>),
    /// Objects, nested or mixed arrays
    Unsupported,
}

impl<'a> Candidate<'a> {
    pub fn from_node<N: JsonNode>(node: &'a N) -> Self {
        if node.kind() != Kind::Array {
            return Scalar::from_node(node).map_or(Candidate::Unsupported, Candidate::Scalar);
        }

        let mut scalars = Vec::with_capacity(node.elements().len());
        for element in node.elements() {
            match Scalar::from_node(element) {
                Some(s) => scalars.push(s),
                None => return Candidate::Unsupported,
            }
        }
        match scalars.first() {
            Some(first) if scalars.iter().any(|s| s.family() != first.family()) => {
                Candidate::Unsupported
            }
            _ => Candidate::Array(scalars),
        }
    }
}

/// Evaluates `filter` against `candidate`.
pub fn apply(filter: &Filter, candidate: &Candidate<'_>) -> bool {
    match candidate {
        Candidate::Scalar(scalar) => compare(filter, scalar),
        Candidate::Array(scalars) => match filter.op().fold() {
            Fold::Universal => scalars.iter().all(|s| compare(filter, s)),
            Fold::Existential => scalars.iter().any(|s| compare(filter, s)),
        },
        Candidate::Unsupported => false,
    }
}

fn compare(filter: &Filter, scalar: &Scalar<'_>) -> bool {
    let literal = filter.literal();
    match filter.op() {
        Operation::StrictEq => equals(literal, scalar, false),
        Operation::LooseEq => equals(literal, scalar, true),
        Operation::StrictDiff | Operation::LooseDiff => differs(literal, scalar),
        Operation::Gt => ordering(literal, scalar) == Some(Ordering::Greater),
        Operation::Gte => matches!(
            ordering(literal, scalar),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Operation::Lt => ordering(literal, scalar) == Some(Ordering::Less),
        Operation::Lte => matches!(
            ordering(literal, scalar),
            Some(Ordering::Less | Ordering::Equal)
        ),
        Operation::Contains => contains(filter, scalar) == Some(true),
        Operation::NotContains => contains(filter, scalar) == Some(false),
        Operation::Like => like(filter, scalar) == Some(true),
        Operation::NotLike => like(filter, scalar) == Some(false),
    }
}

fn numbers_equal(literal: &Literal, scalar: &Scalar<'_>) -> Option<bool> {
    match (literal, scalar) {
        (Literal::Int(a), Scalar::Int(b)) => Some(a == b),
        _ => Some(literal.as_f64()? == scalar.as_f64()?),
    }
}

fn equals(literal: &Literal, scalar: &Scalar<'_>, loose: bool) -> bool {
    match (literal, scalar) {
        (Literal::Bool(a), Scalar::Bool(b)) => a == b,
        (Literal::Null, Scalar::Null) => true,
        (Literal::String(_), Scalar::Str(s)) => {
            if loose {
                s.contains(literal.text().replace('"', "").as_str())
            } else {
                *s == literal.text()
            }
        }
        _ => numbers_equal(literal, scalar).unwrap_or(false),
    }
}

fn differs(literal: &Literal, scalar: &Scalar<'_>) -> bool {
    match (literal, scalar) {
        (Literal::Bool(a), Scalar::Bool(b)) => a != b,
        (Literal::Null, Scalar::Null) => false,
        (Literal::String(_), Scalar::Str(s)) => *s != literal.text(),
        _ => numbers_equal(literal, scalar).is_some_and(|eq| !eq),
    }
}

/// Order of the candidate relative to the literal.
fn ordering(literal: &Literal, scalar: &Scalar<'_>) -> Option<Ordering> {
    match (literal, scalar) {
        (Literal::Int(a), Scalar::Int(b)) => Some(b.cmp(a)),
        (Literal::String(_), Scalar::Str(s)) => Some((*s).cmp(literal.text().as_ref())),
        _ => scalar.as_f64()?.partial_cmp(&literal.as_f64()?),
    }
}

fn contains(filter: &Filter, scalar: &Scalar<'_>) -> Option<bool> {
    let Scalar::Str(haystack) = scalar else {
        return None;
    };
    let needle = filter.text().to_lowercase();
    Some(haystack.to_lowercase().contains(&needle))
}

fn like(filter: &Filter, scalar: &Scalar<'_>) -> Option<bool> {
    let Scalar::Str(haystack) = scalar else {
        return None;
    };
    filter.pattern().map(|re| re.is_match(haystack))
}
