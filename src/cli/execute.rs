//! Execute jsonq commands against JSON input

use tracing::debug;

use super::CliError;
use crate::{Query, Value, check, keep, output, retrieve, search};

/// What to do with the compiled query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// Admission test
    #[default]
    Check,
    /// Projection with filters
    Keep,
    /// Projection without top-level filters
    Retrieve,
    /// Scalars along a dotted path
    Search,
    /// Only compile the query
    Compile,
}

/// Options for a CLI run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub command: Command,
    /// Query string, or dotted path for [`Command::Search`]
    pub query: String,
    /// JSON input string
    pub input: Option<String>,
    /// Pretty-print JSON output
    pub pretty: bool,
}

/// Result of a CLI run
#[derive(Debug)]
pub enum RunResult {
    /// Outcome of [`Command::Check`]
    Admitted(bool),
    /// JSON text of a projection or search
    Json(String),
    /// The top-level object was rejected by its filters
    Rejected,
    /// The compiled query
    Compiled(Query),
}

/// Execute a jsonq command
pub fn execute(options: &RunOptions) -> Result<RunResult, CliError> {
    match options.command {
        Command::Compile => Ok(RunResult::Compiled(Query::compile(&options.query)?)),
        Command::Search => run_search(options),
        Command::Check | Command::Keep | Command::Retrieve => run_query(options),
    }
}

fn run_query(options: &RunOptions) -> Result<RunResult, CliError> {
    let query = Query::compile(&options.query)?;
    let document = parse_input(options)?;
    debug!(command = ?options.command, "evaluating query");

    let text = match options.command {
        Command::Check => return Ok(RunResult::Admitted(check(&document, &query))),
        Command::Keep => keep(&document, &query)?,
        _ => retrieve(&document, &query)?,
    };

    if text.is_empty() {
        return Ok(RunResult::Rejected);
    }
    render(text, options.pretty).map(RunResult::Json)
}

fn run_search(options: &RunOptions) -> Result<RunResult, CliError> {
    let document = parse_input(options)?;
    let keys: Vec<&str> = options.query.split('.').filter(|k| !k.is_empty()).collect();
    let scalars = search(&document, &keys)?;

    let mut text = String::from("[");
    for (i, scalar) in scalars.iter().enumerate() {
        if i > 0 {
            text.push(',');
        }
        output::write_scalar(&mut text, scalar);
    }
    text.push(']');
    render(text, options.pretty).map(RunResult::Json)
}

fn parse_input(options: &RunOptions) -> Result<Value, CliError> {
    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    Ok(Value::from_json_str(json_str)?)
}

fn render(text: String, pretty: bool) -> Result<String, CliError> {
    if !pretty {
        return Ok(text);
    }
    let value = Value::from_json_str(&text)?;
    Ok(output::to_json_pretty(&value))
}
