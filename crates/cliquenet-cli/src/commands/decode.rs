//! `cliquenet decode` command - Decode a wire string to a problem file.

use std::fs;
use std::path::Path;

use super::{codec_for, load_config, Problem};
use crate::error::CliResult;

/// Execute the `decode` command.
///
/// `input` is the encoded string itself, or `@path` to read it from a file
/// (a trailing newline is dropped; spaces are digits and are kept).
pub fn execute(input: &str, config_path: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path)?;
    let encoded = read_input(input)?;
    let graph = codec_for(&config)?.decode_graph(&encoded)?;

    let problem = Problem {
        number_of_nodes: graph.num_nodes(),
        adjacency_list: Some(graph.to_adjacency_list()),
        encoded_matrix: None,
    };
    println!("{}", serde_json::to_string(&problem)?);
    Ok(())
}

fn read_input(input: &str) -> CliResult<String> {
    match input.strip_prefix('@') {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            Ok(text.trim_end_matches(['\n', '\r']).to_string())
        }
        None => Ok(input.to_string()),
    }
}
