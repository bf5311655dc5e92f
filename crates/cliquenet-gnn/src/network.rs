//! The scoring network and its output.

use std::path::Path;

use ndarray::{concatenate, Array2, ArrayView2, Axis};

use cliquenet_graph::{extract_features, Graph, GraphError, NodeFeatures, FEATURE_DIM};

use crate::config::ModelConfig;
use crate::layers::{leaky_relu, Linear, ScatteringBlock};
use crate::propagation::NormalizedPropagation;
use crate::weights::ModelWeights;
use crate::{GnnError, Result};

/// Added to the range before min-max normalization.
const NORMALIZE_EPS: f64 = 1e-6;

/// One score per node, in `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreVector(Vec<f64>);

impl ScoreVector {
    pub fn new(scores: Vec<f64>) -> Self {
        Self(scores)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for ScoreVector {
    fn from(scores: Vec<f64>) -> Self {
        Self(scores)
    }
}

/// Loaded, immutable scoring network.
///
/// Construct once with [`ScoringNetwork::load`] or
/// [`ScoringNetwork::from_weights`] and share by reference (or `Arc`)
/// across solves; scoring never mutates it.
#[derive(Debug, Clone)]
pub struct ScoringNetwork {
    config: ModelConfig,
    input_projection: Linear,
    blocks: Vec<ScatteringBlock>,
    readout_hidden: Linear,
    readout_output: Linear,
}

impl ScoringNetwork {
    /// Build from validated parameters.
    pub fn from_weights(weights: ModelWeights) -> Result<Self> {
        weights.validate()?;
        let config = weights.config;

        let blocks = weights
            .blocks
            .iter()
            .map(|block| ScatteringBlock::from_weights(block, config.negative_slope))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            input_projection: Linear::from_weights(&weights.input_projection)?,
            blocks,
            readout_hidden: Linear::from_weights(&weights.readout_hidden)?,
            readout_output: Linear::from_weights(&weights.readout_output)?,
            config,
        })
    }

    /// Load a parameter file.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing, malformed, from another format version,
    /// or holds a tensor of the wrong shape. No network exists on failure.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let network = Self::from_weights(ModelWeights::load(path)?)?;
        tracing::info!(
            path = %path.display(),
            layers = network.config.n_layers,
            hidden = network.config.hidden_dim,
            "loaded scoring network"
        );
        Ok(network)
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Extract features and score every node.
    pub fn score_graph(&self, graph: &Graph, moment: u32) -> Result<ScoreVector> {
        self.score(graph, &extract_features(graph), moment)
    }

    /// Score every node of `graph` from its features.
    ///
    /// `moment` is the exponent of the band-pass channel magnitudes.
    pub fn score(
        &self,
        graph: &Graph,
        features: &[NodeFeatures],
        moment: u32,
    ) -> Result<ScoreVector> {
        let n = graph.num_nodes();
        if features.len() != n {
            return Err(GraphError::DimensionMismatch {
                expected: n,
                actual: features.len(),
            }
            .into());
        }
        if moment == 0 || i32::try_from(moment).is_err() {
            return Err(GnnError::InvalidConfig(format!(
                "moment must be in 1..={}, got {}",
                i32::MAX,
                moment
            )));
        }
        if n == 0 {
            return Ok(ScoreVector::default());
        }

        let scale = 1.0 / (n as f64).sqrt();
        let x = Array2::from_shape_fn((n, FEATURE_DIM), |(i, j)| {
            features[i].to_array()[j] * scale
        });

        let op = NormalizedPropagation::new(graph);
        let mut hidden = vec![self.input_projection.forward(&x)];
        for (layer, block) in self.blocks.iter().enumerate() {
            let next = block.forward(&op, &hidden[layer], moment)?;
            tracing::trace!(layer, shape = ?next.dim(), "scattering block");
            hidden.push(next);
        }

        let views: Vec<ArrayView2<f64>> = hidden.iter().map(|h| h.view()).collect();
        let stacked = concatenate(Axis(1), &views).map_err(|e| GnnError::ShapeMismatch {
            tensor: "readout input".to_string(),
            expected: format!("[{}][{}]", n, self.config.readout_dim()),
            actual: e.to_string(),
        })?;

        let z = leaky_relu(
            self.readout_hidden.forward(&stacked),
            self.config.negative_slope,
        );
        let raw = self.readout_output.forward(&z);

        let scores = normalize(raw.column(0).iter().copied().collect())?;
        tracing::debug!(nodes = n, moment, "scored graph");
        Ok(scores)
    }
}

/// `(x - min) / (max + eps - min)`.
fn normalize(raw: Vec<f64>) -> Result<ScoreVector> {
    if let Some(i) = raw.iter().position(|x| !x.is_finite()) {
        return Err(GnnError::NonFinite(format!("score of node {}", i)));
    }
    let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
    let max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if raw.len() > 1 && max == min {
        tracing::warn!(nodes = raw.len(), "scoring network produced constant scores");
    }

    let range = max + NORMALIZE_EPS - min;
    Ok(raw.into_iter().map(|x| (x - min) / range).collect::<Vec<_>>().into())
}
