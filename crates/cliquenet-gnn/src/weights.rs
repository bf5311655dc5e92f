//! Parameter file format.
//!
//! Parameters live in a JSON document:
//!
//! ```text
//! {
//!   "format_version": 1,
//!   "config": { "input_dim": 3, "hidden_dim": 8, ... },
//!   "input_projection": { "weight": [[..], ..], "bias": [..] },
//!   "blocks": [ { "attention": [..], "smooth": 0.5, "residual": { .. } }, .. ],
//!   "readout_hidden": { .. },
//!   "readout_output": { .. }
//! }
//! ```
//!
//! Linear weights are stored `[out][in]`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::ModelConfig;
use crate::{GnnError, Result};

/// Current parameter file version.
pub const FORMAT_VERSION: u32 = 1;

/// Weight matrix and bias of one affine map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearWeights {
    /// `[out][in]` weight rows.
    pub weight: Vec<Vec<f64>>,
    /// One bias per output.
    pub bias: Vec<f64>,
}

impl LinearWeights {
    /// Uniform `±1/sqrt(in_dim)` initialization.
    pub fn seeded(in_dim: usize, out_dim: usize, rng: &mut StdRng) -> Self {
        let bound = 1.0 / (in_dim.max(1) as f64).sqrt();
        let weight = (0..out_dim)
            .map(|_| (0..in_dim).map(|_| rng.gen_range(-bound..bound)).collect())
            .collect();
        let bias = (0..out_dim).map(|_| rng.gen_range(-bound..bound)).collect();
        Self { weight, bias }
    }

    /// Number of inputs.
    pub fn in_dim(&self) -> usize {
        self.weight.first().map_or(0, Vec::len)
    }

    /// Number of outputs.
    pub fn out_dim(&self) -> usize {
        self.weight.len()
    }

    /// Check shape `[out_dim][in_dim]` and finiteness.
    pub fn validate(&self, name: &str, in_dim: usize, out_dim: usize) -> Result<()> {
        let shape_err = |actual: String| GnnError::ShapeMismatch {
            tensor: format!("{}.weight", name),
            expected: format!("[{}][{}]", out_dim, in_dim),
            actual,
        };
        if self.weight.len() != out_dim {
            return Err(shape_err(format!("{} rows", self.weight.len())));
        }
        if let Some(row) = self.weight.iter().find(|row| row.len() != in_dim) {
            return Err(shape_err(format!("row of length {}", row.len())));
        }
        if self.bias.len() != out_dim {
            return Err(GnnError::ShapeMismatch {
                tensor: format!("{}.bias", name),
                expected: format!("[{}]", out_dim),
                actual: format!("[{}]", self.bias.len()),
            });
        }
        if !self.weight.iter().flatten().chain(&self.bias).all(|x| x.is_finite()) {
            return Err(GnnError::NonFinite(name.to_string()));
        }
        Ok(())
    }
}

/// Parameters of one scattering block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockWeights {
    /// Attention vector over `[H ‖ channel]`, length `2 * hidden_dim`.
    pub attention: Vec<f64>,
    /// Residual mixing coefficient, `≥ 0`.
    pub smooth: f64,
    /// Linear map of the residual convolution.
    pub residual: LinearWeights,
}

/// Complete parameter set of a scoring network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelWeights {
    pub format_version: u32,
    pub config: ModelConfig,
    pub input_projection: LinearWeights,
    pub blocks: Vec<BlockWeights>,
    pub readout_hidden: LinearWeights,
    pub readout_output: LinearWeights,
}

impl ModelWeights {
    /// Reproducible random parameters for `config`.
    pub fn seeded(config: &ModelConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let hidden = config.hidden_dim;

        let input_projection = LinearWeights::seeded(config.input_dim, hidden, &mut rng);
        let blocks = (0..config.n_layers)
            .map(|_| {
                let bound = 1.0 / (2.0 * hidden.max(1) as f64).sqrt();
                BlockWeights {
                    attention: (0..2 * hidden)
                        .map(|_| rng.gen_range(-bound..bound))
                        .collect(),
                    smooth: rng.gen_range(0.25..1.0),
                    residual: LinearWeights::seeded(hidden, hidden, &mut rng),
                }
            })
            .collect();
        let readout_hidden = LinearWeights::seeded(config.readout_dim(), hidden, &mut rng);
        let readout_output = LinearWeights::seeded(hidden, config.output_dim, &mut rng);

        Self {
            format_version: FORMAT_VERSION,
            config: config.clone(),
            input_projection,
            blocks,
            readout_hidden,
            readout_output,
        }
    }

    /// Check version, architecture, every tensor shape and finiteness.
    pub fn validate(&self) -> Result<()> {
        if self.format_version != FORMAT_VERSION {
            return Err(GnnError::UnsupportedVersion {
                found: self.format_version,
                expected: FORMAT_VERSION,
            });
        }
        let config = &self.config;
        config.validate()?;
        let hidden = config.hidden_dim;

        self.input_projection
            .validate("input_projection", config.input_dim, hidden)?;

        if self.blocks.len() != config.n_layers {
            return Err(GnnError::ShapeMismatch {
                tensor: "blocks".to_string(),
                expected: format!("{} blocks", config.n_layers),
                actual: format!("{} blocks", self.blocks.len()),
            });
        }
        for (i, block) in self.blocks.iter().enumerate() {
            if block.attention.len() != 2 * hidden {
                return Err(GnnError::ShapeMismatch {
                    tensor: format!("blocks[{}].attention", i),
                    expected: format!("[{}]", 2 * hidden),
                    actual: format!("[{}]", block.attention.len()),
                });
            }
            if !block.attention.iter().all(|x| x.is_finite()) {
                return Err(GnnError::NonFinite(format!("blocks[{}].attention", i)));
            }
            if !block.smooth.is_finite() || block.smooth < 0.0 {
                return Err(GnnError::InvalidConfig(format!(
                    "blocks[{}].smooth must be finite and non-negative, got {}",
                    i, block.smooth
                )));
            }
            block
                .residual
                .validate(&format!("blocks[{}].residual", i), hidden, hidden)?;
        }

        self.readout_hidden
            .validate("readout_hidden", config.readout_dim(), hidden)?;
        self.readout_output
            .validate("readout_output", hidden, config.output_dim)?;
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let weights: Self = serde_json::from_str(json)?;
        weights.validate()?;
        Ok(weights)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read and validate a parameter file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let weights: Self = serde_json::from_reader(reader)?;
        weights.validate()?;
        Ok(weights)
    }

    /// Write a parameter file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}
