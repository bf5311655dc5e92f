//! `cliquenet solve` command - Find a large maximal clique.

use std::path::{Path, PathBuf};
use std::time::Instant;

use colored::Colorize;

use cliquenet::{CliqueSolver, GnnCliqueSolver, GreedyDegreeSolver};

use crate::error::{CliError, CliResult};

use super::{load_config, load_graph};

/// Flags of the `solve` command.
#[derive(Debug, Default)]
pub struct SolveOptions {
    pub weights: Option<PathBuf>,
    pub baseline: bool,
    pub parallel: bool,
    pub report: bool,
}

/// Execute the `solve` command.
pub fn execute(problem: &Path, config_path: Option<&Path>, options: SolveOptions) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if options.weights.is_some() {
        config.model.weights = options.weights;
    }
    if options.parallel {
        config.solver.parallel = true;
    }

    let graph = load_graph(problem, &config)?;
    println!("{} Solving {}", "→".bright_cyan(), problem.display().to_string().bright_yellow());
    println!(
        "  {} Graph: {} nodes, {} edges",
        "•".dimmed(),
        graph.num_nodes().to_string().bright_white(),
        graph.num_edges().to_string().bright_white()
    );

    let start = Instant::now();
    let clique = if options.baseline {
        GreedyDegreeSolver::new().solve(&graph)?
    } else {
        if config.model.weights.is_none() {
            return Err(CliError::Config(
                "no scoring network; pass --weights, set model.weights, or use --baseline"
                    .to_string(),
            ));
        }
        let solver = GnnCliqueSolver::from_config(&config)?;
        let report = solver.solve_with_report(&graph)?;

        if options.report {
            println!("  {} Window: {}", "•".dimmed(), report.window);
            for outcome in &report.starts {
                let marker = if Some(outcome.start_rank) == report.best_start {
                    "★".bright_green().to_string()
                } else {
                    " ".to_string()
                };
                println!(
                    "    {} start {:>3}: sampled {:>4}, closed {:>4}",
                    marker, outcome.start_rank, outcome.sampled_size, outcome.closed_size
                );
            }
        }
        report.clique
    };
    let elapsed = start.elapsed();

    let valid = clique.is_clique(&graph) && clique.is_maximal(&graph);
    println!();
    println!(
        "{} Clique of size {} in {:.2?} ({})",
        if valid { "✓".bright_green() } else { "✗".red() },
        clique.len().to_string().bright_white().bold(),
        elapsed,
        if valid {
            "valid, maximal".green()
        } else {
            "INVALID".red()
        }
    );
    println!("{}", serde_json::to_string(clique.as_slice())?);

    if !valid {
        return Err(CliError::Validation(
            "solver returned a non-maximal or invalid clique".to_string(),
        ));
    }
    Ok(())
}
