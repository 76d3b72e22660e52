use std::{fmt, str::FromStr};

use crate::{
    ast::Filter,
    lexer::Lexer,
    parser::{ParseError, Parser},
};

/// One compiled node of a query.
///
/// Built once per query string and never mutated afterwards, so a single
/// tree can be shared by any number of evaluations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    /// Admission clauses, all of which must hold
    filters: Vec<Filter>,

    /// Leaf fields to project, in declaration order
    retrieve: Vec<String>,

    /// Nested sub-queries in declaration order, names unique
    next: Vec<(String, Query)>,

    /// Whether this node or any descendant carries a filter
    keep_filters: bool,
}

impl Query {
    /// Assembles a node. Callers guarantee `next` names are unique; the
    /// parser rejects duplicates before getting here.
    pub fn new(filters: Vec<Filter>, retrieve: Vec<String>, next: Vec<(String, Query)>) -> Self {
        let keep_filters = !filters.is_empty() || next.iter().any(|(_, q)| q.keep_filters);
        Query {
            filters,
            retrieve,
            next,
            keep_filters,
        }
    }

    /// Compiles a user-supplied query string.
    ///
    /// ```
    /// use jsonq::Query;
    ///
    /// let query = Query::compile("{a,b,c}").unwrap();
    /// assert_eq!(query.retrieve(), ["a", "b", "c"]);
    /// assert!(query.filters().is_empty());
    /// assert!(Query::compile("{a").is_err());
    /// ```
    pub fn compile(source: &str) -> Result<Self, ParseError> {
        Parser::new(Lexer::new(source)).parse()
    }

    /// Compiles a query that is known to be well formed, such as a constant
    /// in the caller's source.
    ///
    /// # Panics
    ///
    /// Panics with the parse error if `source` is malformed.
    pub fn must_compile(source: &str) -> Self {
        match Self::compile(source) {
            Ok(query) => query,
            Err(e) => panic!("invalid constant query {:?}: {}", source, e),
        }
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn retrieve(&self) -> &[String] {
        &self.retrieve
    }

    pub fn next(&self) -> &[(String, Query)] {
        &self.next
    }

    /// Sub-query registered under `name`.
    pub fn sub_query(&self, name: &str) -> Option<&Query> {
        self.next.iter().find(|(n, _)| n == name).map(|(_, q)| q)
    }

    pub fn keep_filters(&self) -> bool {
        self.keep_filters
    }

    /// True when the body is `{}`: nothing to retrieve, nothing nested.
    pub fn is_empty_body(&self) -> bool {
        self.retrieve.is_empty() && self.next.is_empty()
    }

    fn print(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        writeln!(f, "{}filters:", indent)?;
        for filter in &self.filters {
            writeln!(f, "{}  - {}", indent, filter)?;
        }
        writeln!(f, "{}retrieve:", indent)?;
        for field in &self.retrieve {
            writeln!(f, "{}  - {}", indent, field)?;
        }
        writeln!(f, "{}next:", indent)?;
        for (name, query) in &self.next {
            writeln!(f, "{}  {}:", indent, name)?;
            query.print(f, depth + 2)?;
        }
        Ok(())
    }
}

/// Indented tree of filters, retrieved fields and nested queries.
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print(f, 0)
    }
}

impl FromStr for Query {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}
