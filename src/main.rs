use clap::{Parser as ClapParser, Subcommand};
use cordon_lang::{
    Sandbox, SandboxConfig,
    cli::{self, CheckOptions, CheckResult, CliError, FieldOptions},
};
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(ClapParser)]
#[command(name = "cordon")]
#[command(about = "Cordon - screen and evaluate sandboxed condition expressions")]
#[command(version)]
struct Cli {
    /// JSON file with sandbox limits (max_expression_length, max_depth, max_height)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen and evaluate an expression
    Check {
        /// The expression to evaluate
        expression: String,

        /// JSON context object (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only screen and parse, don't evaluate
        #[arg(long)]
        syntax_only: bool,

        /// Print the result coerced to true/false
        #[arg(long)]
        condition: bool,
    },

    /// Compare one field against a literal
    Field {
        /// Path to the field, e.g. item.count
        path: String,

        /// Comparison operator (=== !== == != > >= < <=)
        operator: String,

        /// Literal to compare against, as JSON (e.g. 5 or '"paid"')
        literal: String,

        /// JSON context object (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = load_sandbox(cli.config).and_then(|sandbox| match cli.command {
        Commands::Check {
            expression,
            input,
            pretty,
            syntax_only,
            condition,
        } => run_check(&sandbox, expression, input, pretty, syntax_only, condition),
        Commands::Field {
            path,
            operator,
            literal,
            input,
        } => run_field(&sandbox, path, operator, literal, input),
    });

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn load_sandbox(path: Option<PathBuf>) -> Result<Sandbox, CliError> {
    let config = match path {
        Some(path) => SandboxConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => SandboxConfig::default(),
    };
    Ok(Sandbox::new(config))
}

fn read_input(input: Option<String>) -> Result<Option<String>, CliError> {
    match input {
        Some(s) => Ok(Some(s)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn run_check(
    sandbox: &Sandbox,
    expression: String,
    input: Option<String>,
    pretty: bool,
    syntax_only: bool,
    condition: bool,
) -> Result<(), CliError> {
    let input = if syntax_only { None } else { read_input(input)? };

    let options = CheckOptions {
        expression,
        input,
        syntax_only,
        condition,
    };

    match cli::execute_check(sandbox, &options)? {
        CheckResult::Permitted => println!("Expression is permitted"),
        CheckResult::Condition(result) => println!("{}", result),
        CheckResult::Value(output) => {
            let json = if pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            println!("{}", json);
        }
    }
    Ok(())
}

fn run_field(
    sandbox: &Sandbox,
    path: String,
    operator: String,
    literal: String,
    input: Option<String>,
) -> Result<(), CliError> {
    let options = FieldOptions {
        path,
        operator,
        literal,
        input: read_input(input)?,
    };

    println!("{}", cli::execute_field(sandbox, &options)?);
    Ok(())
}
