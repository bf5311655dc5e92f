//! `cliquenet encode` command - Encode a graph to the base-92 wire format.

use std::path::Path;

use super::{codec_for, load_config, load_graph};
use crate::error::CliResult;

/// Execute the `encode` command.
///
/// Prints only the encoded string so the output can be piped.
pub fn execute(graph_path: &Path, config_path: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path)?;
    let graph = load_graph(graph_path, &config)?;
    let encoded = codec_for(&config)?.encode_graph(&graph)?;

    tracing::info!(
        nodes = graph.num_nodes(),
        length = encoded.len(),
        "encoded graph"
    );
    println!("{}", encoded);
    Ok(())
}
