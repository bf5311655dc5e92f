//! CLI command implementations.

pub mod check;
pub mod decode;
pub mod encode;
pub mod init_weights;
pub mod score;
pub mod solve;

use std::fs;
use std::path::Path;

use cliquenet::codec::GraphCodec;
use cliquenet::{CliqueConfig, Graph};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// A problem file: node count plus either an adjacency list or a wire string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub number_of_nodes: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjacency_list: Option<Vec<Vec<u32>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoded_matrix: Option<String>,
}

impl Problem {
    /// Build the validated graph, decoding the wire string if that is what
    /// the problem carries.
    pub fn to_graph(&self, codec: &GraphCodec) -> CliResult<Graph> {
        match (&self.adjacency_list, &self.encoded_matrix) {
            (Some(lists), None) => Ok(Graph::from_adjacency_list(self.number_of_nodes, lists)?),
            (None, Some(encoded)) => {
                let graph = codec.decode_graph(encoded)?;
                if graph.num_nodes() != self.number_of_nodes {
                    return Err(CliError::Validation(format!(
                        "encoded_matrix holds {} nodes but number_of_nodes is {}",
                        graph.num_nodes(),
                        self.number_of_nodes
                    )));
                }
                Ok(graph)
            }
            (Some(_), Some(_)) => Err(CliError::Validation(
                "problem must carry adjacency_list or encoded_matrix, not both".to_string(),
            )),
            (None, None) => Err(CliError::Validation(
                "problem must carry adjacency_list or encoded_matrix".to_string(),
            )),
        }
    }
}

/// Read and parse a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    if !path.exists() {
        return Err(CliError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Load the configuration file, or defaults plus environment overrides.
pub fn load_config(path: Option<&Path>) -> CliResult<CliqueConfig> {
    let config = match path {
        Some(path) => CliqueConfig::load(path),
        None => CliqueConfig::from_env(),
    };
    config.map_err(|e| CliError::Config(e.to_string()))
}

/// Codec built from the configuration's `[codec]` section.
pub fn codec_for(config: &CliqueConfig) -> CliResult<GraphCodec> {
    Ok(GraphCodec::new(config.codec.clone())?)
}

/// Load a problem file into a graph.
pub fn load_graph(path: &Path, config: &CliqueConfig) -> CliResult<Graph> {
    let problem: Problem = read_json(path)?;
    problem.to_graph(&codec_for(config)?)
}
