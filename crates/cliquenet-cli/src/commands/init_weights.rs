//! `cliquenet init-weights` command - Write seeded network parameters.

use std::path::Path;

use colored::Colorize;

use cliquenet::gnn::{ModelConfig, ModelWeights};

use crate::error::{CliError, CliResult};

/// Execute the `init-weights` command.
pub fn execute(output: &Path, seed: u64, force: bool, quiet: bool) -> CliResult<()> {
    if output.exists() && !force {
        return Err(CliError::Validation(format!(
            "{} already exists (use --force to overwrite)",
            output.display()
        )));
    }

    let config = ModelConfig::default();
    let weights = ModelWeights::seeded(&config, seed);
    weights.save(output)?;

    if !quiet {
        println!(
            "{} Wrote parameters to {}",
            "✓".bright_green(),
            output.display().to_string().bright_cyan()
        );
        println!(
            "  {} {} blocks, hidden width {}, seed {}",
            "•".dimmed(),
            config.n_layers,
            config.hidden_dim,
            seed
        );
    }
    Ok(())
}
