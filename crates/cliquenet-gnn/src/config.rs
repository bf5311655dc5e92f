//! Architecture parameters of the scoring network.

use serde::{Deserialize, Serialize};

use cliquenet_graph::FEATURE_DIM;

use crate::{GnnError, Result};

/// Scoring network architecture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Width of the node feature vector.
    pub input_dim: usize,
    /// Width of every hidden state.
    pub hidden_dim: usize,
    /// Width of the read-out (one score per node).
    pub output_dim: usize,
    /// Number of scattering blocks.
    pub n_layers: usize,
    /// Slope of leaky-ReLU for negative inputs.
    pub negative_slope: f64,
    /// Default exponent of the band-pass channel magnitudes.
    pub moment: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            input_dim: FEATURE_DIM,
            hidden_dim: 8,
            output_dim: 1,
            n_layers: 4,
            negative_slope: 0.01,
            moment: 1,
        }
    }
}

impl ModelConfig {
    /// Create new model configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set hidden width.
    pub fn with_hidden_dim(mut self, dim: usize) -> Self {
        self.hidden_dim = dim;
        self
    }

    /// Set number of scattering blocks.
    pub fn with_layers(mut self, n_layers: usize) -> Self {
        self.n_layers = n_layers;
        self
    }

    /// Set leaky-ReLU negative slope.
    pub fn with_negative_slope(mut self, slope: f64) -> Self {
        self.negative_slope = slope;
        self
    }

    /// Set default band-pass moment.
    pub fn with_moment(mut self, moment: u32) -> Self {
        self.moment = moment;
        self
    }

    /// Width of the concatenated hidden states fed to the read-out.
    pub fn readout_dim(&self) -> usize {
        self.hidden_dim * (self.n_layers + 1)
    }

    /// Check the architecture is one this crate can evaluate.
    pub fn validate(&self) -> Result<()> {
        if self.input_dim != FEATURE_DIM {
            return Err(GnnError::InvalidConfig(format!(
                "input_dim must be {}, got {}",
                FEATURE_DIM, self.input_dim
            )));
        }
        if self.output_dim != 1 {
            return Err(GnnError::InvalidConfig(format!(
                "output_dim must be 1, got {}",
                self.output_dim
            )));
        }
        if self.hidden_dim == 0 {
            return Err(GnnError::InvalidConfig(
                "hidden_dim must be at least 1".to_string(),
            ));
        }
        if !self.negative_slope.is_finite() {
            return Err(GnnError::InvalidConfig(
                "negative_slope must be finite".to_string(),
            ));
        }
        if self.moment == 0 || i32::try_from(self.moment).is_err() {
            return Err(GnnError::InvalidConfig(format!(
                "moment must be in 1..={}, got {}",
                i32::MAX,
                self.moment
            )));
        }
        Ok(())
    }
}
