//! # Query language - compiled form
//!
//! A query names the fields of a JSON document to keep and the conditions a
//! node must meet to be admitted. It compiles into a tree of [`Query`] nodes
//! that the evaluator walks in lockstep with a document.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Tokens produced by the lexer
//! - **[operators]** - Comparison operators and their array fold
//! - **[literal]** - Typed right-hand side of a filter clause
//! - **[filter]** - One `key operator literal` clause
//! - **[query]** - A compiled node: filters, retrieved fields, nested queries
//!
//! ## Grammar
//!
//! ```text
//! query       := name? filterblock? '{' body '}'
//! filterblock := '(' clause ('&&' clause)* ')'
//! clause      := key operator literal
//! body        := item (',' item)*
//! item        := field | query
//! ```
//!
//! ## Examples
//!
//! ### Projection
//!
//! ```text
//! {sid, st, tt}
//! ```
//!
//! ### Admission on a nested array
//!
//! ```text
//! {users(name == "Leonid" && age >= 18){name, geo{city}}}
//! ```
//!
//! ### Text operators
//!
//! ```text
//! (title : "kafka" && body !:: "^draft"){title}
//! ```
pub mod tokens;
pub mod operators;
pub mod literal;
pub mod filter;
pub mod query;

pub use tokens::Token;
pub use operators::{Fold, Operation};
pub use literal::Literal;
pub use filter::Filter;
pub use query::Query;
