use thiserror::Error;
use tracing::trace;

use crate::{
    ast::Query,
    operations::Scalar,
    output,
    value::{JsonNode, Kind},
};

/// Errors that can occur while walking a document with a query.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The query asks for structure the document does not have, e.g. fields
    /// of a node that is a scalar.
    #[error("unexpected value kind for '{field}': expected {expected}, found {found}")]
    UnexpectedKind {
        field: String,
        expected: &'static str,
        found: Kind,
    },

    /// A search path names a key the document does not contain.
    #[error("key not found: {0}")]
    KeyNotFound(String),
}

const ROOT: &str = "$";

/// Tests whether `node` is admitted by `query`.
///
/// An array is admitted when any element is, so an empty array never is. An
/// object is admitted when all local filters hold and every nested query is
/// admitted by the matching field; a missing field fails. Scalars carry
/// nothing to test and are always admitted.
///
/// # Examples
///
/// ```
/// use jsonq::{check, Query};
/// use serde_json::json;
///
/// let query = Query::must_compile("{users(age > 30){name}}");
/// assert!(check(&json!({"users": [{"age": 20}, {"age": 40}]}), &query));
/// assert!(!check(&json!({"users": [{"age": 20}]}), &query));
/// ```
pub fn check<N: JsonNode>(node: &N, query: &Query) -> bool {
    match node.kind() {
        Kind::Array => node.elements().iter().any(|element| check(element, query)),
        Kind::Object => {
            admits(node, query)
                && query
                    .next()
                    .iter()
                    .all(|(name, sub)| node.get(name).is_some_and(|child| check(child, sub)))
        }
        _ => true,
    }
}

/// Projects `node` through `query`, applying the filters of every level.
///
/// Array elements whose projection is rejected are dropped. A rejected
/// top-level object yields an empty string.
///
/// # Examples
///
/// ```
/// use jsonq::{keep, Query, Value};
///
/// let doc = Value::from_json_str(r#"{"sid":486,"st":1,"tt":"active"}"#).unwrap();
/// let query = Query::must_compile("{st,sid,tt}");
/// assert_eq!(keep(&doc, &query).unwrap(), r#"{"st":1,"sid":486,"tt":"active"}"#);
/// ```
pub fn keep<N: JsonNode>(node: &N, query: &Query) -> Result<String, EvalError> {
    let mut out = String::new();
    project(node, query, ROOT, true, &mut out)?;
    Ok(out)
}

/// Projects `node` through `query` without testing the filters of `query`
/// on the object it is called with. Elements of a top-level array and nested
/// queries are still filtered as in [`keep`]. Meant for objects already known
/// to be admitted, e.g. by [`check`].
pub fn retrieve<N: JsonNode>(node: &N, query: &Query) -> Result<String, EvalError> {
    let mut out = String::new();
    project(node, query, ROOT, false, &mut out)?;
    Ok(out)
}

/// Collects the scalars found by following `keys` from `node`. Arrays met
/// along the way are flattened.
pub fn search<'a, N: JsonNode>(node: &'a N, keys: &[&str]) -> Result<Vec<Scalar<'a>>, EvalError> {
    let mut found = Vec::new();
    search_into(node, keys, ROOT, &mut found)?;
    Ok(found)
}

fn search_into<'a, N: JsonNode>(
    node: &'a N,
    keys: &[&str],
    field: &str,
    found: &mut Vec<Scalar<'a>>,
) -> Result<(), EvalError> {
    match node.kind() {
        Kind::Array => {
            for element in node.elements() {
                search_into(element, keys, field, found)?;
            }
            Ok(())
        }
        Kind::Object => {
            let Some((key, rest)) = keys.split_first() else {
                return Err(EvalError::UnexpectedKind {
                    field: field.to_string(),
                    expected: "scalar",
                    found: Kind::Object,
                });
            };
            let child = node
                .get(key)
                .ok_or_else(|| EvalError::KeyNotFound(key.to_string()))?;
            search_into(child, rest, key, found)
        }
        kind => match (keys.first(), Scalar::from_node(node)) {
            (None, Some(scalar)) => {
                found.push(scalar);
                Ok(())
            }
            (key, _) => Err(EvalError::UnexpectedKind {
                field: key.map_or(field, |k| *k).to_string(),
                expected: "object",
                found: kind,
            }),
        },
    }
}

/// Whether every local filter of `query` holds on `object`.
fn admits<N: JsonNode>(object: &N, query: &Query) -> bool {
    query.filters().iter().all(|filter| {
        let ok = filter.admits(object);
        if !ok {
            trace!(filter = %filter, "filter rejected node");
        }
        ok
    })
}

/// Writes the projection of `node` into `out`. Returns `false`, leaving `out`
/// untouched, when the node is rejected by its filters.
fn project<N: JsonNode>(
    node: &N,
    query: &Query,
    field: &str,
    apply_filters: bool,
    out: &mut String,
) -> Result<bool, EvalError> {
    match node.kind() {
        Kind::Array => {
            out.push('[');
            let mut first = true;
            for element in node.elements() {
                let mark = out.len();
                if !first {
                    out.push(',');
                }
                if project(element, query, field, true, out)? {
                    first = false;
                } else {
                    out.truncate(mark);
                }
            }
            out.push(']');
            Ok(true)
        }
        Kind::Object => {
            if apply_filters && !admits(node, query) {
                return Ok(false);
            }

            out.push('{');
            let mut first = true;
            for name in query.retrieve() {
                let Some(child) = node.get(name) else {
                    continue;
                };
                if !first {
                    out.push(',');
                }
                first = false;
                output::write_key(out, name);
                output::write_node(out, child);
            }
            for (name, sub) in query.next() {
                let Some(child) = node.get(name) else {
                    continue;
                };
                let mark = out.len();
                if !first {
                    out.push(',');
                }
                output::write_key(out, name);
                if project(child, sub, name, true, out)? {
                    first = false;
                } else {
                    out.truncate(mark);
                }
            }
            out.push('}');
            Ok(true)
        }
        kind => {
            if !query.is_empty_body() {
                return Err(EvalError::UnexpectedKind {
                    field: field.to_string(),
                    expected: "object",
                    found: kind,
                });
            }
            output::write_node(out, node);
            Ok(true)
        }
    }
}
