//! `cliquenet check` command - Validate a clique against a graph.

use std::path::Path;

use colored::Colorize;

use cliquenet::graph::NodeId;
use cliquenet::RewardCalculator;

use super::{load_config, load_graph, read_json};
use crate::error::{CliError, CliResult};

/// Execute the `check` command.
pub fn execute(problem: &Path, clique_path: &Path, config_path: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path)?;
    let graph = load_graph(problem, &config)?;
    let nodes: Vec<u32> = read_json(clique_path)?;

    println!("{} Checking clique of {} nodes", "→".bright_cyan(), nodes.len());

    let calc = RewardCalculator::new(&graph, 0.0, Vec::new());
    if calc.is_valid_maximal_clique(&nodes) {
        println!("{} Valid maximal clique of size {}", "✓".bright_green(), nodes.len());
        return Ok(());
    }

    let issues = find_issues(&graph, &nodes);
    for issue in &issues {
        println!("  {} {}", "✗".red(), issue);
    }
    Err(CliError::Validation(format!(
        "{} issue(s) found",
        issues.len()
    )))
}

/// Human-readable reasons `nodes` is not a valid maximal clique.
fn find_issues(graph: &cliquenet::Graph, nodes: &[u32]) -> Vec<String> {
    let mut issues = Vec::new();
    if nodes.is_empty() {
        issues.push("clique is empty".to_string());
        return issues;
    }

    let n = graph.num_nodes();
    let mut seen = std::collections::HashSet::new();
    for &v in nodes {
        if v as usize >= n {
            issues.push(format!("node {} is out of range (n = {})", v, n));
        } else if !seen.insert(v) {
            issues.push(format!("node {} is listed twice", v));
        }
    }
    if !issues.is_empty() {
        return issues;
    }

    for (i, &a) in nodes.iter().enumerate() {
        for &b in &nodes[i + 1..] {
            if !graph.has_edge(NodeId(a), NodeId(b)) {
                issues.push(format!("nodes {} and {} are not adjacent", a, b));
            }
        }
    }
    if !issues.is_empty() {
        return issues;
    }

    for v in graph.nodes() {
        if !seen.contains(&v.get()) && nodes.iter().all(|&m| graph.has_edge(v, NodeId(m))) {
            issues.push(format!("node {} extends the clique (not maximal)", v.get()));
        }
    }
    issues
}
