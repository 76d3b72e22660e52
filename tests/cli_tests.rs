// tests/cli_tests.rs
#![cfg(feature = "cli")]

use jsonq::cli::{CliError, Command, DocCategory, RunOptions, RunResult, execute, get_doc_category};

fn run(command: Command, query: &str, input: &str) -> Result<RunResult, CliError> {
    execute(&RunOptions {
        command,
        query: query.to_string(),
        input: Some(input.to_string()),
        pretty: false,
    })
}

fn json_output(result: Result<RunResult, CliError>) -> String {
    match result {
        Ok(RunResult::Json(text)) => text,
        other => panic!("expected JSON output, got {:?}", other),
    }
}

const USERS: &str = r#"{"users":[{"name":"Leonid","age":35},{"name":"Bugaev","age":28}]}"#;

// ============================================================================
// Commands
// ============================================================================

#[test]
fn test_check_command() {
    let admitted = run(Command::Check, "{users(age > 30){name}}", USERS).unwrap();
    assert!(matches!(admitted, RunResult::Admitted(true)));

    let rejected = run(Command::Check, "{users(age > 90){name}}", USERS).unwrap();
    assert!(matches!(rejected, RunResult::Admitted(false)));
}

#[test]
fn test_keep_command() {
    let output = json_output(run(Command::Keep, "{users(age < 30){name}}", USERS));
    assert_eq!(output, r#"{"users":[{"name":"Bugaev"}]}"#);
}

#[test]
fn test_keep_rejected() {
    let result = run(Command::Keep, "(missing === 1){users}", USERS).unwrap();
    assert!(matches!(result, RunResult::Rejected));
}

#[test]
fn test_retrieve_command() {
    let output = json_output(run(Command::Retrieve, "(missing === 1){users{name}}", USERS));
    assert_eq!(output, r#"{"users":[{"name":"Leonid"},{"name":"Bugaev"}]}"#);
}

#[test]
fn test_search_command() {
    let output = json_output(run(Command::Search, "users.age", USERS));
    assert_eq!(output, "[35,28]");
}

#[test]
fn test_pretty_output() {
    let output = json_output(execute(&RunOptions {
        command: Command::Keep,
        query: "{users(age > 30){name}}".to_string(),
        input: Some(USERS.to_string()),
        pretty: true,
    }));
    let expected = "{\n  \"users\": [\n    {\n      \"name\": \"Leonid\"\n    }\n  ]\n}";
    assert_eq!(output, expected);
}

#[test]
fn test_compile_command() {
    let result = execute(&RunOptions {
        command: Command::Compile,
        query: "{a, b(x > 1){c}}".to_string(),
        ..Default::default()
    })
    .unwrap();
    match result {
        RunResult::Compiled(query) => {
            assert_eq!(query.retrieve(), ["a"]);
            assert!(query.keep_filters());
        }
        other => panic!("expected compiled query, got {:?}", other),
    }
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_no_input() {
    let result = execute(&RunOptions {
        command: Command::Keep,
        query: "{a}".to_string(),
        ..Default::default()
    });
    assert!(matches!(result, Err(CliError::NoInput)));
}

#[test]
fn test_invalid_json() {
    let result = run(Command::Keep, "{a}", "{not json");
    assert!(matches!(result, Err(CliError::Json(_))));
}

#[test]
fn test_invalid_query() {
    let result = run(Command::Keep, "{a", USERS);
    assert!(matches!(result, Err(CliError::Parse(_))));
}

#[test]
fn test_evaluation_error() {
    let result = run(Command::Keep, "{users{name{first}}}", USERS);
    assert!(matches!(result, Err(CliError::Eval(_))));
}

// ============================================================================
// Docs
// ============================================================================

#[test]
fn test_doc_categories() {
    assert_eq!(DocCategory::from_name("Syntax"), Some(DocCategory::Syntax));
    assert_eq!(DocCategory::from_name("ops"), Some(DocCategory::Operators));
    assert_eq!(DocCategory::from_name("eval"), Some(DocCategory::Evaluation));
    assert_eq!(DocCategory::from_name("nope"), None);

    assert!(get_doc_category("operators").unwrap().contains("!::"));
    assert!(matches!(
        get_doc_category("nope"),
        Err(CliError::UnknownCategory(_))
    ));
}
