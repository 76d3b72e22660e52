//! Documentation content for the jsonq CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Evaluation,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "grammar" => Some(Self::Syntax),
            "operators" | "ops" | "filters" => Some(Self::Operators),
            "evaluation" | "eval" | "commands" => Some(Self::Evaluation),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"JSONQ DOCUMENTATION

jsonq compiles a compact query into a tree that admits nodes of a JSON
document by filters and projects the fields it names.

DOCUMENTATION CATEGORIES

  syntax            Bodies, nested queries and filter blocks
  operators         Filter operators, literal typing and array folds
  evaluation        What check, keep, retrieve and search produce

QUICK REFERENCE

  {a,b}                 Keep fields a and b
  {a,b{c}}              Keep a, and c inside b
  (x > 1){a}            Admit only nodes whose x is above 1
  {items(qty >= 2){id}} Filter the elements of items

Run 'jsonq doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Evaluation) => Ok(EVALUATION_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Query Structure

GRAMMAR
  query       := name? filterblock? '{' body '}'
  filterblock := '(' clause ('&&' clause)* ')'
  clause      := key operator literal
  body        := item (',' item)*
  item        := field | query

BODY
  {a,b,c}
    Fields to keep, in this order.

    Example:
      Input:  {"c": 3, "a": 1, "b": 2}
      Query:  {a,b,c}
      Output: {"a":1,"b":2,"c":3}

NESTED QUERIES
  {person{name{full}}}
    A field followed by a body is a nested query on that field.

    Constraints:
      - A nested query must be named by its field
      - A field may appear only once per body

FILTER BLOCKS
  users(age >= 18 && name : "leo"){name}
    Clauses joined by && must all hold for a node to be admitted.

    Constraints:
      - Quoted literals use double quotes
      - An empty block () is an error
"#;

const OPERATORS_DOC: &str = r#"OPERATORS - Filter Comparisons

EQUALITY
  ===   Strict equal: numbers by value, strings exactly, booleans, null
  ==    Loose equal: as ===, except the string literal need only appear
        inside the field's string
  !==   Different: same type, different value
  !=    Different: same type, different value

ORDERING
  >  >=  <  <=
    Numbers by value (integers and floats mix), strings by code point.
    Booleans and null never compare.

TEXT
  :     Field contains the literal, ignoring case
  !:    Field does not contain the literal, ignoring case
  ::    Field matches the literal as a regular expression, ignoring case
  !::   Field does not match the regular expression

  A pattern that does not compile never matches.

LITERALS
  true false null     Keywords (case-sensitive)
  42 -7               Integers
  2.5 1e3             Floats
  "text"              Strings; quotes are removed before comparing
  text                Bare strings

ARRAYS
  A filter on an array field compares each element.
    ===  !==  !:  !::               every element must pass
    ==  !=  >  >=  <  <=  :  ::     one element is enough

  Arrays of objects, nested arrays, or arrays mixing types never pass.
"#;

const EVALUATION_DOC: &str = r#"EVALUATION - Commands

check <query>
  Prints true when the document is admitted: an array when any element
  is (never when empty), an object when its filters hold and every nested
  query is admitted by a field that is present.
  Exits with status 1 otherwise.

keep <query>
  Prints the projection of the document. Array elements rejected by the
  filters are dropped; a rejected top-level object prints nothing.

retrieve <query>
  As keep, without testing the filters on the top-level object. Elements
  of a top-level array are still filtered.

search <a.b.c>
  Prints every scalar found along the dotted path, flattening arrays.

compile <query>
  Validates the query and prints its compiled tree.
"#;
