//! `cliquenet score` command - Reward a batch of responses.

use std::path::Path;

use colored::Colorize;

use cliquenet::RewardCalculator;

use super::{load_config, load_graph, read_json};
use crate::error::CliResult;

/// Execute the `score` command.
pub fn execute(
    problem: &Path,
    responses_path: &Path,
    difficulty: f64,
    config_path: Option<&Path>,
) -> CliResult<()> {
    let config = load_config(config_path)?;
    let graph = load_graph(problem, &config)?;
    let responses: Vec<Vec<u32>> = read_json(responses_path)?;

    let calc = RewardCalculator::new(&graph, difficulty, responses);
    let scores = calc.scores();

    println!("{}:", "Reward Report".bright_white().underline());
    println!(
        "  {:>3}  {:>5}  {:>5}  {:>6}  {:>6}  {:>8}  {:>9}  {:>7}",
        "#", "size", "valid", "rel", "pr", "optimal", "diversity", "reward"
    );
    for (i, response) in calc.responses().iter().enumerate() {
        let valid = calc.is_valid_maximal_clique(response);
        println!(
            "  {:>3}  {:>5}  {:>5}  {:>6.3}  {:>6.3}  {:>8.3}  {:>9.3}  {:>7}",
            i,
            response.len(),
            if valid { "yes".green() } else { "no".red() },
            scores.rel[i],
            scores.pr[i],
            scores.optimality[i],
            scores.diversity[i],
            format!("{:.3}", scores.rewards[i]).bright_white()
        );
    }

    let columns = serde_json::to_string(&scores)?;
    tracing::debug!(%columns, "reward columns");
    Ok(())
}
