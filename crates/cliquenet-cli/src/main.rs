//! CliqueNet CLI - solve, encode, decode and score maximum-clique problems.
//!
//! # Commands
//!
//! - `cliquenet solve <problem.json>` - Find a large maximal clique
//! - `cliquenet encode <graph.json>` - Encode a graph to the base-92 wire format
//! - `cliquenet decode <string|@file>` - Decode a wire string to an adjacency list
//! - `cliquenet check <problem.json> <clique.json>` - Validate a clique
//! - `cliquenet score <problem.json> <responses.json>` - Compute rewards
//! - `cliquenet init-weights --output <file>` - Write seeded network parameters
//!
//! # Examples
//!
//! ```bash
//! # Bootstrap parameters and solve
//! cliquenet init-weights --output weights.json --seed 7
//! cliquenet solve problem.json --weights weights.json
//!
//! # Solve with the degree-ordered baseline instead
//! cliquenet solve problem.json --baseline
//!
//! # Round-trip through the wire format
//! cliquenet encode problem.json > graph.txt
//! cliquenet decode @graph.txt
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

use commands::{check, decode, encode, init_weights, score, solve};

/// CliqueNet CLI - approximate maximum-clique tooling
#[derive(Parser)]
#[command(name = "cliquenet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a large maximal clique
    Solve {
        /// Problem file with number_of_nodes and adjacency_list or encoded_matrix
        problem: PathBuf,

        /// Scoring network parameter file (overrides model.weights)
        #[arg(short, long)]
        weights: Option<PathBuf>,

        /// Use the degree-ordered greedy baseline
        #[arg(long)]
        baseline: bool,

        /// Run start offsets in parallel
        #[arg(long)]
        parallel: bool,

        /// Print per-start details
        #[arg(long)]
        report: bool,
    },

    /// Encode a graph to the base-92 wire format
    Encode {
        /// Problem file with an adjacency_list
        graph: PathBuf,
    },

    /// Decode a wire string (or @file) to JSON
    Decode {
        /// Encoded string, or @path to read it from a file
        input: String,
    },

    /// Check that a clique is valid and maximal
    Check {
        /// Problem file
        problem: PathBuf,

        /// JSON array of node indices
        clique: PathBuf,
    },

    /// Score a batch of responses
    Score {
        /// Problem file
        problem: PathBuf,

        /// JSON array of node-index arrays
        responses: PathBuf,

        /// Problem difficulty
        #[arg(short, long, default_value = "0.0")]
        difficulty: f64,
    },

    /// Write reproducible random network parameters
    InitWeights {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Random seed
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Solve {
            problem,
            weights,
            baseline,
            parallel,
            report,
        } => solve::execute(
            &problem,
            config,
            solve::SolveOptions {
                weights,
                baseline,
                parallel,
                report,
            },
        ),

        Commands::Encode { graph } => encode::execute(&graph, config),

        Commands::Decode { input } => decode::execute(&input, config),

        Commands::Check { problem, clique } => check::execute(&problem, &clique, config),

        Commands::Score {
            problem,
            responses,
            difficulty,
        } => score::execute(&problem, &responses, difficulty, config),

        Commands::InitWeights {
            output,
            seed,
            force,
        } => init_weights::execute(&output, seed, force, cli.quiet),

        Commands::Completions { shell } => {
            use clap::CommandFactory;
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "cliquenet",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
