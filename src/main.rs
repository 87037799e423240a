use clap::{Args, Parser as ClapParser, Subcommand};
use mcql::cli::{self, CheckOptions, CheckResult, CliError};
use mcql::output::{to_json, to_json_pretty};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(ClapParser)]
#[command(name = "mcql")]
#[command(about = "mcql - compile record queries into a typed AST")]
#[command(version)]
struct Cli {
    /// Log compiler activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct QueryArgs {
    /// The query (reads from stdin if not provided)
    query: Option<String>,

    /// JSON vocabulary file overriding keyword spellings and name patterns
    #[arg(long)]
    vocabulary: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query and print its AST as JSON
    Compile {
        #[command(flatten)]
        args: QueryArgs,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't compile
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the semantic actions the parser emits for a query
    Actions {
        #[command(flatten)]
        args: QueryArgs,
    },

    /// Show the language reference
    Docs,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "mcql=debug" } else { "mcql=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("MCQL_LOG").unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Compile {
            args,
            pretty,
            syntax_only,
        } => run_compile(args, pretty, syntax_only),
        Commands::Actions { args } => run_actions(args),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_query(query: Option<String>) -> Result<String, CliError> {
    match query {
        Some(s) => Ok(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            debug!(bytes = buffer.len(), "read query from stdin");
            Ok(buffer.trim().to_string())
        }
        None => Err(CliError::NoInput),
    }
}

fn options(args: QueryArgs, syntax_only: bool) -> Result<CheckOptions, CliError> {
    Ok(CheckOptions {
        query: read_query(args.query)?,
        vocabulary: args.vocabulary,
        syntax_only,
    })
}

fn run_compile(args: QueryArgs, pretty: bool, syntax_only: bool) -> Result<(), CliError> {
    let options = options(args, syntax_only)?;

    match cli::execute_compile(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Compiled(query) => {
            let json = if pretty {
                to_json_pretty(&query)
            } else {
                to_json(&query)
            }?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn run_actions(args: QueryArgs) -> Result<(), CliError> {
    let options = options(args, true)?;
    for action in cli::execute_actions(&options)? {
        println!("{}", action);
    }
    Ok(())
}
