//! bayesnet CLI tool
//!
//! Command-line interface for exact inference with bayesnet-core.
//!
//! ## Commands
//!
//! - `query <QUERY>`: Evaluate one query such as `S=T|W=T`
//! - `repl`: Read queries from stdin until `STOP`
//! - `show`: Print the network definition and its evaluation order
//!
//! Every command uses the bundled sprinkler network unless `--network` names a TOML
//! definition file.

use bayesnet_core::query::QueryEvaluator;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod repl;

use commands::load_definition;

#[derive(Parser)]
#[command(name = "bayesnet")]
#[command(author, version, about = "Exact inference over boolean Bayesian networks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single query and print the probability
    Query {
        /// Query text, e.g. "S=T|W=T"
        query: String,

        /// Network definition file (default: bundled sprinkler network)
        #[arg(short, long)]
        network: Option<PathBuf>,

        /// Print numerator, denominator and probability as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read queries from stdin, one per line, until STOP
    Repl {
        /// Network definition file (default: bundled sprinkler network)
        #[arg(short, long)]
        network: Option<PathBuf>,
    },

    /// Print the network definition with its evaluation order
    Show {
        /// Network definition file (default: bundled sprinkler network)
        #[arg(short, long)]
        network: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            query,
            network,
            json,
        } => {
            let definition = load_definition(network)?;
            println!("{}", commands::query(&definition, &query, json)?);
            Ok(())
        }

        Commands::Repl { network } => {
            let definition = load_definition(network)?;
            let network = definition.build()?;
            let evaluator = QueryEvaluator::with_config(&network, definition.engine);
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            repl::run(&evaluator, stdin.lock(), stdout.lock())?;
            Ok(())
        }

        Commands::Show { network } => {
            let definition = load_definition(network)?;
            print!("{}", commands::show(&definition)?);
            Ok(())
        }
    }
}
