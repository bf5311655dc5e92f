//! Solver configuration.
//!
//! Configuration is read from a TOML file with one table per concern:
//!
//! ```toml
//! [solver]
//! num_starts = 10
//! window = 90
//! tolerance = 1e-4
//! parallel = false
//! moment = 1
//!
//! [codec]
//! hdr_digits = 5
//! chunk_bits = 1246
//! chunk_digits = 191
//!
//! [model]
//! weights = "weights.json"
//! ```
//!
//! Layers are merged with the `config` crate: file first, then environment
//! variables named `CLIQUENET_<SECTION>__<KEY>`, e.g.
//! `CLIQUENET_SOLVER__WINDOW=120`. Unknown sections and keys are errors.

use std::path::{Path, PathBuf};

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use cliquenet_codec::CodecConfig;

use crate::{Result, SolverError};

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "CLIQUENET";

/// Orchestrator and sampler parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Number of sampler start offsets (capped by the window).
    pub num_starts: usize,
    /// Number of top-ranked nodes the sampler may use (capped by N).
    pub window: usize,
    /// `Z` below this counts as complete.
    pub tolerance: f64,
    /// Run start offsets on the rayon pool.
    pub parallel: bool,
    /// Band-pass moment passed to the scoring network.
    pub moment: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            num_starts: 10,
            window: 90,
            tolerance: 1e-4,
            parallel: false,
            moment: 1,
        }
    }
}

impl SolverConfig {
    /// Create new solver configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set number of start offsets.
    pub fn with_num_starts(mut self, num_starts: usize) -> Self {
        self.num_starts = num_starts;
        self
    }

    /// Set sampler window.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Set completeness tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Enable or disable parallel start offsets.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set band-pass moment.
    pub fn with_moment(mut self, moment: u32) -> Self {
        self.moment = moment;
        self
    }

    /// Effective `(starts, window)` for a graph of `n` nodes.
    pub fn effective(&self, n: usize) -> (usize, usize) {
        let window = self.window.min(n);
        (self.num_starts.min(window), window)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_starts == 0 {
            return Err(SolverError::Config(
                "solver.num_starts must be at least 1".to_string(),
            ));
        }
        if self.window == 0 {
            return Err(SolverError::Config(
                "solver.window must be at least 1".to_string(),
            ));
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(SolverError::Config(format!(
                "solver.tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.moment == 0 || i32::try_from(self.moment).is_err() {
            return Err(SolverError::Config(format!(
                "solver.moment must be in 1..={}, got {}",
                i32::MAX,
                self.moment
            )));
        }
        Ok(())
    }
}

/// Scoring network location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelSection {
    /// Parameter file of the scoring network.
    pub weights: Option<PathBuf>,
}

/// Complete configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliqueConfig {
    pub solver: SolverConfig,
    pub codec: CodecConfig,
    pub model: ModelSection,
}

impl CliqueConfig {
    /// Parse TOML text (no environment overrides).
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Self::layered(Config::builder().add_source(File::from_str(text, FileFormat::Toml)))
    }

    /// Read a TOML file, apply environment overrides and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::layered(
            Config::builder()
                .add_source(File::from(path).format(FileFormat::Toml))
                .add_source(environment()),
        )?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self> {
        Self::layered(Config::builder().add_source(environment()))
    }

    fn layered(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.solver.validate()?;
        self.codec
            .validate()
            .map_err(|e| SolverError::Config(format!("codec: {}", e)))?;
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// `CLIQUENET_<SECTION>__<KEY>` variables.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliqueConfig::default();
        assert_eq!(config.solver.num_starts, 10);
        assert_eq!(config.solver.window, 90);
        assert_eq!(config.codec.chunk_bits, 1246);
        assert!(config.model.weights.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_effective_caps() {
        let config = SolverConfig::default();
        assert_eq!(config.effective(0), (0, 0));
        assert_eq!(config.effective(4), (4, 4));
        assert_eq!(config.effective(50), (10, 50));
        assert_eq!(config.effective(1000), (10, 90));
        assert_eq!(config.with_num_starts(200).effective(1000), (90, 90));
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = CliqueConfig::from_toml_str(
            r#"
            [solver]
            window = 40
            parallel = true

            [model]
            weights = "model/weights.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.solver.window, 40);
        assert!(config.solver.parallel);
        assert_eq!(config.solver.num_starts, 10);
        assert_eq!(config.codec, CodecConfig::default());
        assert_eq!(
            config.model.weights.as_deref(),
            Some(Path::new("model/weights.json"))
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = CliqueConfig::from_toml_str("[solver]\nwindw = 3\n");
        assert!(matches!(result, Err(SolverError::Config(_))));
    }

    #[test]
    fn test_validation() {
        assert!(CliqueConfig::from_toml_str("[solver]\nwindow = 0\n").is_err());
        assert!(CliqueConfig::from_toml_str("[solver]\ntolerance = -1.0\n").is_err());
        assert!(CliqueConfig::from_toml_str("[codec]\nchunk_digits = 10\n").is_err());
    }

    fn from_vars(file: &str, pairs: &[(&str, &str)]) -> Result<CliqueConfig> {
        let vars: ::config::Map<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliqueConfig::layered(
            Config::builder()
                .add_source(File::from_str(file, FileFormat::Toml))
                .add_source(environment().source(Some(vars))),
        )
    }

    #[test]
    fn test_env_overrides() {
        let config = from_vars(
            "[solver]\nwindow = 40\n",
            &[
                ("CLIQUENET_SOLVER__WINDOW", "120"),
                ("CLIQUENET_SOLVER__PARALLEL", "true"),
                ("CLIQUENET_SOLVER__TOLERANCE", "1e-3"),
                ("CLIQUENET_MODEL__WEIGHTS", "/tmp/w.json"),
                ("PATH", "/usr/bin"),
            ],
        )
        .unwrap();

        assert_eq!(config.solver.window, 120);
        assert!(config.solver.parallel);
        assert!((config.solver.tolerance - 1e-3).abs() < 1e-15);
        assert_eq!(
            config.model.weights.as_deref(),
            Some(Path::new("/tmp/w.json"))
        );
    }

    #[test]
    fn test_env_override_numeric_looking_path() {
        let config = from_vars("", &[("CLIQUENET_MODEL__WEIGHTS", "2024")]).unwrap();
        assert_eq!(config.model.weights.as_deref(), Some(Path::new("2024")));
    }

    #[test]
    fn test_env_override_errors() {
        let bad_section = from_vars("", &[("CLIQUENET_SAMPLER__WINDOW", "3")]);
        assert!(matches!(bad_section, Err(SolverError::Config(_))));

        let bad_key = from_vars("", &[("CLIQUENET_SOLVER__WIDTH", "3")]);
        assert!(matches!(bad_key, Err(SolverError::Config(_))));

        let bad_type = from_vars("", &[("CLIQUENET_SOLVER__WINDOW", "many")]);
        assert!(matches!(bad_type, Err(SolverError::Config(_))));

        let invalid = from_vars("", &[("CLIQUENET_SOLVER__WINDOW", "0")]);
        assert!(matches!(invalid, Err(SolverError::Config(_))));
    }

    #[test]
    fn test_codec_typo_rejected() {
        let in_file = CliqueConfig::from_toml_str("[codec]\nchunk_bit = 10\n");
        assert!(matches!(in_file, Err(SolverError::Config(_))));

        let in_env = from_vars("", &[("CLIQUENET_CODEC__CHUNK_BIT", "10")]);
        assert!(matches!(in_env, Err(SolverError::Config(_))));
    }

    #[test]
    fn test_moment_bounded() {
        let result = CliqueConfig::from_toml_str("[solver]\nmoment = 4294967295\n");
        assert!(matches!(result, Err(SolverError::Config(_))));
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = CliqueConfig::default();
        config.solver.window = 33;
        config.model.weights = Some(PathBuf::from("w.json"));

        let text = config.to_toml_string().unwrap();
        assert_eq!(CliqueConfig::from_toml_str(&text).unwrap(), config);
    }
}
