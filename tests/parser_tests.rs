// tests/parser_tests.rs

use jsonq::ast::{Literal, Operation, Query};
use jsonq::lexer::{LexError, Position};
use jsonq::parser::ParseError;

fn err(source: &str) -> ParseError {
    match Query::compile(source) {
        Ok(query) => panic!("expected {:?} to fail, got {:?}", source, query),
        Err(e) => e,
    }
}

// ============================================================================
// Bodies
// ============================================================================

#[test]
fn test_flat_body() {
    let query = Query::compile("{a,b,c}").unwrap();
    assert_eq!(query.retrieve(), ["a", "b", "c"]);
    assert!(query.filters().is_empty());
    assert!(query.next().is_empty());
    assert!(!query.keep_filters());
}

#[test]
fn test_empty_body() {
    let query = Query::compile("{}").unwrap();
    assert!(query.is_empty_body());
    assert!(!query.keep_filters());
}

#[test]
fn test_whitespace_is_insignificant() {
    let spaced = Query::compile(" { a ,\n b { c } } ").unwrap();
    let tight = Query::compile("{a,b{c}}").unwrap();
    assert_eq!(spaced, tight);
}

#[test]
fn test_top_level_name_is_ignored() {
    let named = Query::compile("root(x > 1){a}").unwrap();
    let anonymous = Query::compile("(x > 1){a}").unwrap();
    assert_eq!(named, anonymous);
}

#[test]
fn test_nested_bodies() {
    let query = Query::compile("{person{name{full}, age}, id}").unwrap();
    assert_eq!(query.retrieve(), ["id"]);
    assert_eq!(query.next().len(), 1);

    let person = query.sub_query("person").unwrap();
    assert_eq!(person.retrieve(), ["age"]);
    let name = person.sub_query("name").unwrap();
    assert_eq!(name.retrieve(), ["full"]);
    assert!(name.next().is_empty());
}

#[test]
fn test_nested_order_is_declaration_order() {
    let query = Query::compile("{z{a}, y{b}, x{c}}").unwrap();
    let names: Vec<&str> = query.next().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["z", "y", "x"]);
}

// ============================================================================
// Filters
// ============================================================================

#[test]
fn test_filter_on_empty_body() {
    let query = Query::compile("(a>1){}").unwrap();
    assert_eq!(query.filters().len(), 1);

    let filter = &query.filters()[0];
    assert_eq!(filter.key(), "a");
    assert_eq!(filter.op(), Operation::Gt);
    assert_eq!(filter.literal(), &Literal::Int(1));
    assert!(query.keep_filters());
    assert!(query.is_empty_body());
}

#[test]
fn test_nested_filters() {
    let query =
        Query::compile(r#"{users(name == "Leonid" && age >= 18){name, geo{city}}}"#).unwrap();
    assert!(query.filters().is_empty());
    assert!(query.keep_filters());

    let users = query.sub_query("users").unwrap();
    assert_eq!(users.filters().len(), 2);
    assert_eq!(users.filters()[0].key(), "name");
    assert_eq!(users.filters()[0].op(), Operation::LooseEq);
    assert_eq!(
        users.filters()[0].literal(),
        &Literal::String("\"Leonid\"".to_string())
    );
    assert_eq!(users.filters()[1].key(), "age");
    assert_eq!(users.filters()[1].op(), Operation::Gte);
    assert_eq!(users.filters()[1].literal(), &Literal::Int(18));
    assert_eq!(users.retrieve(), ["name"]);
    assert!(!users.sub_query("geo").unwrap().keep_filters());
}

#[test]
fn test_keep_filters_propagates_upward() {
    let query = Query::compile("{a{b{c(x === 1){}}}}").unwrap();
    assert!(query.keep_filters());
    let a = query.sub_query("a").unwrap();
    assert!(a.keep_filters());
    assert!(a.filters().is_empty());
}

#[test]
fn test_literal_typing() {
    let query = Query::compile("(a === true && b === null && c > -3 && d < 2.5 && e == x){}").unwrap();
    let literals: Vec<&Literal> = query.filters().iter().map(|f| f.literal()).collect();
    assert_eq!(
        literals,
        [
            &Literal::Bool(true),
            &Literal::Null,
            &Literal::Int(-3),
            &Literal::Float(2.5),
            &Literal::String("x".to_string()),
        ]
    );
}

#[test]
fn test_text_operators() {
    let query = Query::compile("(a : foo && b !: bar && c :: ^x && d !:: y$){}").unwrap();
    let ops: Vec<Operation> = query.filters().iter().map(|f| f.op()).collect();
    assert_eq!(
        ops,
        [
            Operation::Contains,
            Operation::NotContains,
            Operation::Like,
            Operation::NotLike
        ]
    );
}

#[test]
fn test_like_pattern_compiled_once() {
    let query = Query::compile("(name :: ^leo){}").unwrap();
    assert!(query.filters()[0].pattern().is_some());

    let broken = Query::compile("(name :: [unclosed){}").unwrap();
    assert!(broken.filters()[0].pattern().is_none());

    let plain = Query::compile("(name : leo){}").unwrap();
    assert!(plain.filters()[0].pattern().is_none());
}

#[test]
fn test_display_tree() {
    let query = Query::compile("{id, users(age > 1){name}}").unwrap();
    let expected = "\
filters:
retrieve:
  - id
next:
  users:
    filters:
      - age > 1
    retrieve:
      - name
    next:
";
    assert_eq!(query.to_string(), expected);
}

#[test]
fn test_from_str() {
    let query: Query = "{a}".parse().unwrap();
    assert_eq!(query.retrieve(), ["a"]);
}

#[test]
#[should_panic(expected = "invalid constant query")]
fn test_must_compile_panics() {
    Query::must_compile("{a");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unterminated_brace() {
    assert_eq!(
        err("{a,b"),
        ParseError::UnterminatedBrace {
            fragment: "{a,b".to_string()
        }
    );
    assert!(matches!(err("{a{b}"), ParseError::UnterminatedBrace { .. }));
}

#[test]
fn test_unbalanced_closing_brace() {
    assert_eq!(
        err("{a}}"),
        ParseError::TrailingInput {
            fragment: "}".to_string()
        }
    );
}

#[test]
fn test_missing_body() {
    assert!(matches!(err(""), ParseError::MissingBody { .. }));
    assert!(matches!(err("(a > 1)"), ParseError::MissingBody { .. }));
}

#[test]
fn test_empty_filter() {
    assert!(matches!(err("(){a}"), ParseError::EmptyFilter { .. }));
    assert!(matches!(err("(a > 1 && ){a}"), ParseError::EmptyFilter { .. }));
}

#[test]
fn test_unterminated_filter() {
    assert!(matches!(err("(a > 1"), ParseError::UnterminatedFilter { .. }));
}

#[test]
fn test_clause_missing_parts() {
    assert_eq!(
        err("(age){}"),
        ParseError::MissingOperator {
            key: "age".to_string()
        }
    );
    assert_eq!(
        err("(age >){}"),
        ParseError::MissingLiteral {
            key: "age".to_string(),
            op: ">".to_string()
        }
    );
    assert!(matches!(err("(> 1){}"), ParseError::MissingKey { .. }));
}

#[test]
fn test_unrecognized_operator() {
    assert_eq!(
        err("(a <> 1){}"),
        ParseError::Lex(LexError::UnrecognizedOperator {
            symbol: "<>".to_string(),
            position: Position { offset: 3 },
        })
    );
}

#[test]
fn test_empty_fields() {
    assert!(matches!(err("{a,,b}"), ParseError::EmptyField { .. }));
    assert!(matches!(err("{a,}"), ParseError::EmptyField { .. }));
}

#[test]
fn test_unnamed_nested_query() {
    assert!(matches!(err("{a,{b}}"), ParseError::MissingName { .. }));
}

#[test]
fn test_duplicate_nested_query() {
    assert_eq!(
        err("{a{x}, a{y}}"),
        ParseError::DuplicateField {
            name: "a".to_string()
        }
    );
}

#[test]
fn test_duplicate_leaf_field() {
    let duplicate = ParseError::DuplicateField {
        name: "a".to_string(),
    };
    assert_eq!(err("{a,a}"), duplicate);
    assert_eq!(err("{a, a{b}}"), duplicate);
    assert_eq!(err("{a{b}, a}"), duplicate);
    assert!(Query::compile("{a{a}}").is_ok());
}

#[test]
fn test_filter_keeps_source_token() {
    let query = Query::compile("(code : 0070 && price :: 1.50){}").unwrap();
    assert_eq!(query.filters()[0].raw(), "0070");
    assert_eq!(query.filters()[1].raw(), "1.50");
    assert_eq!(query.filters()[1].to_string(), "price :: 1.50");
}

#[test]
fn test_error_messages_name_fragment() {
    let message = err("{users{name}").to_string();
    assert!(message.contains("{users{name}"), "{}", message);

    let message = err("(age){}").to_string();
    assert!(message.contains("age"), "{}", message);
}
