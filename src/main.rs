use clap::{Parser as ClapParser, Subcommand};
use jsonq::cli::{self, CliError, Command, RunOptions, RunResult};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "jsonq")]
#[command(about = "jsonq - admit and project fields of JSON documents with a compact query")]
#[command(version)]
struct Cli {
    /// Log compilation and evaluation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Test whether the document is admitted by the query
    Check {
        /// The query to evaluate
        query: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Project the document through the query, applying every filter
    Keep {
        /// The query to evaluate
        query: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Project the document without testing the top-level filters
    Retrieve {
        /// The query to evaluate
        query: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List the scalars found along a dotted key path
    Search {
        /// Dotted key path, e.g. users.name
        path: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Validate a query and print its compiled tree
    Compile {
        /// The query to compile
        query: String,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'jsonq docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = match cli.command {
        Commands::Check { query, input } => RunOptions {
            command: Command::Check,
            query,
            input,
            pretty: false,
        },
        Commands::Keep {
            query,
            input,
            pretty,
        } => RunOptions {
            command: Command::Keep,
            query,
            input,
            pretty,
        },
        Commands::Retrieve {
            query,
            input,
            pretty,
        } => RunOptions {
            command: Command::Retrieve,
            query,
            input,
            pretty,
        },
        Commands::Search {
            path,
            input,
            pretty,
        } => RunOptions {
            command: Command::Search,
            query: path,
            input,
            pretty,
        },
        Commands::Compile { query } => RunOptions {
            command: Command::Compile,
            query,
            input: None,
            pretty: false,
        },
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            return;
        }
        Commands::Doc { category } => match cli::get_doc_category(&category) {
            Ok(content) => {
                print!("{}", content);
                return;
            }
            Err(e) => exit_with(e),
        },
    };

    match run(options) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => exit_with(e),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "jsonq=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn exit_with(e: CliError) -> ! {
    eprintln!("{}", e);
    std::process::exit(1);
}

/// Runs one command; `Ok(false)` means a negative outcome without an error.
fn run(mut options: RunOptions) -> Result<bool, CliError> {
    if options.command != Command::Compile && options.input.is_none() && !atty::is(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        options.input = Some(buffer);
    }

    match cli::execute(&options)? {
        RunResult::Admitted(admitted) => {
            println!("{}", admitted);
            Ok(admitted)
        }
        RunResult::Json(text) => {
            println!("{}", text);
            Ok(true)
        }
        RunResult::Rejected => Ok(false),
        RunResult::Compiled(query) => {
            println!("Syntax is valid");
            print!("{}", query);
            Ok(true)
        }
    }
}
