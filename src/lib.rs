//! # jsonq
//!
//! A compact query language that says which fields of a JSON document to keep
//! and which nodes to admit.
//!
//! ```
//! use jsonq::{check, keep, Query, Value};
//!
//! let doc = Value::from_json_str(
//!     r#"{"users":[{"name":"Leonid","age":35},{"name":"Bugaev","age":28}]}"#,
//! ).unwrap();
//! let query = Query::compile(r#"{users(name == "Leonid"){name}}"#).unwrap();
//!
//! assert!(check(&doc, &query));
//! assert_eq!(keep(&doc, &query).unwrap(), r#"{"users":[{"name":"Leonid"}]}"#);
//! ```
pub mod ast;
pub mod evaluator;
pub mod lexer;
pub mod operations;
pub mod output;
pub mod parser;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{Filter, Fold, Literal, Operation, Query, Token};
pub use evaluator::{EvalError, check, keep, retrieve, search};
pub use lexer::{LexError, Lexer, Position};
pub use operations::{Candidate, Scalar};
pub use output::{to_json, to_json_pretty};
pub use parser::{ParseError, Parser, compile};
pub use value::{JsonNode, Kind, Value};
