use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(invalid(name, format!("must be a positive number, got {value}")))
    }
}

fn require_range(name: &'static str, range: (f64, f64)) -> Result<(f64, f64), ConfigError> {
    if range.0 <= range.1 {
        Ok(range)
    } else {
        Err(invalid(
            name,
            format!("lower bound {} exceeds upper bound {}", range.0, range.1),
        ))
    }
}

pub const DEFAULT_TARGET_BCS_SCORE: f64 = 0.7;
pub const DEFAULT_MAX_ITERATIONS: usize = 5000;

/// Search target and budget for the resonance-guided sequence generator.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub target_frequency_hz: f64,
    pub target_bcs_score: f64,
    pub max_iterations: usize,
    /// `None` draws a fresh seed from the OS.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    /// Timescale whose optimal drive frequency equals the target, `1 / (2πf)`.
    pub fn target_timescale_s(&self) -> f64 {
        1.0 / (2.0 * std::f64::consts::PI * self.target_frequency_hz)
    }
}

#[derive(Default)]
pub struct GeneratorConfigBuilder {
    target_frequency_hz: Option<f64>,
    target_bcs_score: Option<f64>,
    max_iterations: Option<usize>,
    seed: Option<u64>,
}

impl GeneratorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_frequency_hz(mut self, hz: f64) -> Self {
        self.target_frequency_hz = Some(hz);
        self
    }
    pub fn target_bcs_score(mut self, score: f64) -> Self {
        self.target_bcs_score = Some(score);
        self
    }
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<GeneratorConfig, ConfigError> {
        let target_frequency_hz = require_positive(
            "target_frequency_hz",
            self.target_frequency_hz
                .ok_or(ConfigError::MissingParameter("target_frequency_hz"))?,
        )?;
        let target_bcs_score = self.target_bcs_score.unwrap_or(DEFAULT_TARGET_BCS_SCORE);
        if !(0.0..=1.0).contains(&target_bcs_score) {
            return Err(invalid(
                "target_bcs_score",
                format!("must lie in [0, 1], got {target_bcs_score}"),
            ));
        }
        let max_iterations = self.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS);
        if max_iterations == 0 {
            return Err(invalid("max_iterations", "must be at least 1"));
        }
        Ok(GeneratorConfig {
            target_frequency_hz,
            target_bcs_score,
            max_iterations,
            seed: self.seed,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeptideConstraints {
    pub length: usize,
    /// Inclusive bounds on net charge.
    pub charge_range: (f64, f64),
    /// Inclusive bounds on mean residue hydrophobicity.
    pub hydrophobicity_range: (f64, f64),
}

impl PeptideConstraints {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            charge_range: (0.0, 5.0),
            hydrophobicity_range: (0.2, 0.6),
        }
    }

    pub fn with_charge_range(mut self, min: f64, max: f64) -> Self {
        self.charge_range = (min, max);
        self
    }

    pub fn with_hydrophobicity_range(mut self, min: f64, max: f64) -> Self {
        self.hydrophobicity_range = (min, max);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.length == 0 {
            return Err(invalid("length", "must be at least 1"));
        }
        require_range("charge_range", self.charge_range)?;
        require_range("hydrophobicity_range", self.hydrophobicity_range)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NucleotideConstraints {
    pub length: usize,
    pub gc_content: f64,
}

impl NucleotideConstraints {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            gc_content: 0.5,
        }
    }

    pub fn with_gc_content(mut self, gc_content: f64) -> Self {
        self.gc_content = gc_content;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.length == 0 {
            return Err(invalid("length", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.gc_content) {
            return Err(invalid(
                "gc_content",
                format!("must lie in [0, 1], got {}", self.gc_content),
            ));
        }
        Ok(())
    }
}

/// Grid and integration settings for the coupled membrane PDE.
#[derive(Debug, Clone, PartialEq)]
pub struct PdeConfig {
    pub domain_length_m: f64,
    pub grid_points: usize,
    pub initial_amplitude: f64,
    pub t_max_s: f64,
    pub time_steps: usize,
}

impl Default for PdeConfig {
    fn default() -> Self {
        Self {
            domain_length_m: 1e-6,
            grid_points: 256,
            initial_amplitude: 0.01,
            t_max_s: 1e-6,
            time_steps: 1000,
        }
    }
}

impl PdeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("domain_length_m", self.domain_length_m)?;
        require_positive("t_max_s", self.t_max_s)?;
        if self.grid_points < 5 {
            return Err(invalid("grid_points", "need at least 5 points"));
        }
        if self.time_steps < 2 {
            return Err(invalid("time_steps", "need at least 2 steps"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolitonConfig {
    pub cancer_type: String,
    /// Membrane reorganization timescale in seconds.
    pub reorganization_time_s: f64,
    pub compute_pde: bool,
    pub pde: PdeConfig,
}

impl Default for SolitonConfig {
    fn default() -> Self {
        Self {
            cancer_type: "melanoma".to_string(),
            reorganization_time_s: 50e-12,
            compute_pde: false,
            pde: PdeConfig::default(),
        }
    }
}

impl SolitonConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("reorganization_time_s", self.reorganization_time_s)?;
        self.pde.validate()
    }
}

/// Operating point for the mercury, plasma, dynamo, and inertial analyses.
#[derive(Debug, Clone, PartialEq)]
pub struct PlasmaConfig {
    pub temperature_k: f64,
    /// Collective-mode length scale in metres.
    pub length_scale_m: f64,
    pub dynamo_radius_m: f64,
    pub test_rpms: Vec<f64>,
    pub electron_density_m3: f64,
    pub electron_temperature_ev: f64,
    pub magnetic_field_t: f64,
    pub field_strength_v_m: f64,
    pub field_frequency_hz: f64,
    pub interaction_volume_m3: f64,
}

impl Default for PlasmaConfig {
    fn default() -> Self {
        Self {
            temperature_k: 293.15,
            length_scale_m: 3.0e-10,
            dynamo_radius_m: 0.15,
            test_rpms: vec![1000.0, 2000.0, 3000.0, 4000.0, 5000.0],
            electron_density_m3: 1e18,
            electron_temperature_ev: 1.0,
            magnetic_field_t: 0.1,
            field_strength_v_m: 1e6,
            field_frequency_hz: 0.3e12,
            interaction_volume_m3: 0.001,
        }
    }
}

impl PlasmaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("temperature_k", self.temperature_k)?;
        require_positive("length_scale_m", self.length_scale_m)?;
        require_positive("dynamo_radius_m", self.dynamo_radius_m)?;
        require_positive("electron_density_m3", self.electron_density_m3)?;
        require_positive("electron_temperature_ev", self.electron_temperature_ev)?;
        require_positive("field_frequency_hz", self.field_frequency_hz)?;
        require_positive("interaction_volume_m3", self.interaction_volume_m3)?;
        if let Some(rpm) = self.test_rpms.iter().find(|r| !(r.is_finite() && **r >= 0.0)) {
            return Err(invalid("test_rpms", format!("invalid rotation speed {rpm}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_builder_applies_defaults() {
        let config = GeneratorConfigBuilder::new()
            .target_frequency_hz(7.5e11)
            .build()
            .unwrap();
        assert_eq!(config.target_bcs_score, DEFAULT_TARGET_BCS_SCORE);
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn generator_builder_requires_target_frequency() {
        let result = GeneratorConfigBuilder::new().seed(3).build();
        assert_eq!(
            result,
            Err(ConfigError::MissingParameter("target_frequency_hz"))
        );
    }

    #[test]
    fn generator_builder_rejects_non_positive_frequency() {
        let result = GeneratorConfigBuilder::new()
            .target_frequency_hz(0.0)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "target_frequency_hz",
                ..
            })
        ));
    }

    #[test]
    fn generator_builder_rejects_zero_iterations() {
        let result = GeneratorConfigBuilder::new()
            .target_frequency_hz(1e11)
            .max_iterations(0)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn target_timescale_inverts_optimal_frequency() {
        let config = GeneratorConfigBuilder::new()
            .target_frequency_hz(1e9)
            .build()
            .unwrap();
        let f = 1.0 / (2.0 * std::f64::consts::PI * config.target_timescale_s());
        assert!((f - 1e9).abs() / 1e9 < 1e-12);
    }

    #[test]
    fn peptide_constraints_reject_inverted_ranges() {
        let c = PeptideConstraints::new(20).with_charge_range(5.0, 1.0);
        assert!(c.validate().is_err());
        assert!(PeptideConstraints::new(20).validate().is_ok());
        assert!(PeptideConstraints::new(0).validate().is_err());
    }

    #[test]
    fn nucleotide_constraints_bound_gc_content() {
        assert!(NucleotideConstraints::new(100).validate().is_ok());
        assert!(
            NucleotideConstraints::new(100)
                .with_gc_content(1.2)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn default_soliton_and_plasma_configs_are_valid() {
        assert!(SolitonConfig::default().validate().is_ok());
        assert!(PlasmaConfig::default().validate().is_ok());
    }

    #[test]
    fn pde_config_requires_a_usable_grid() {
        let pde = PdeConfig {
            grid_points: 2,
            ..PdeConfig::default()
        };
        assert!(pde.validate().is_err());
    }
}
