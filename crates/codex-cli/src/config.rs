use crate::cli::{GeneratorArgs, OutputArgs, PlasmaArgs, SolitonArgs};
use crate::error::{CliError, Result};
use codex_resonance::engine::config as core_config;
use codex_resonance::engine::sequence::stress::StressSettings;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

pub const DEFAULT_OUTPUT_DIR: &str = "codex_output";

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialOutputConfig {
    dir: Option<PathBuf>,
    export: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialGeneratorConfig {
    target_frequency_hz: Option<f64>,
    target_bcs_score: Option<f64>,
    max_iterations: Option<usize>,
    seed: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialPdeConfig {
    domain_length_m: Option<f64>,
    grid_points: Option<usize>,
    initial_amplitude: Option<f64>,
    t_max_s: Option<f64>,
    time_steps: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialSolitonConfig {
    cancer_type: Option<String>,
    reorganization_time_s: Option<f64>,
    compute_pde: Option<bool>,
    pde: Option<PartialPdeConfig>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialPlasmaConfig {
    temperature_k: Option<f64>,
    length_scale_m: Option<f64>,
    dynamo_radius_m: Option<f64>,
    test_rpms: Option<Vec<f64>>,
    electron_density_m3: Option<f64>,
    electron_temperature_ev: Option<f64>,
    magnetic_field_t: Option<f64>,
    field_strength_v_m: Option<f64>,
    field_frequency_hz: Option<f64>,
    interaction_volume_m3: Option<f64>,
}

/// Every setting the CLI can take from a TOML file, flags, or `-S` overrides.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    output: Option<PartialOutputConfig>,
    generator: Option<PartialGeneratorConfig>,
    soliton: Option<PartialSolitonConfig>,
    plasma: Option<PartialPlasmaConfig>,
}

/// Where a command's configuration comes from, before its own flags are known.
#[derive(Debug, Clone, Copy)]
pub struct ConfigSource<'a> {
    pub file: Option<&'a Path>,
    pub set_values: &'a [String],
}

impl ConfigSource<'_> {
    /// File values, then the command's flags, then `-S` overrides.
    pub fn resolve(
        &self,
        flags: impl FnOnce(PartialAppConfig) -> PartialAppConfig,
    ) -> Result<PartialAppConfig> {
        let base = match self.file {
            Some(path) => PartialAppConfig::from_file(path)?,
            None => PartialAppConfig::default(),
        };
        let mut merged = flags(base);
        merged.apply_set_values(self.set_values)?;
        Ok(merged)
    }
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn with_output_flags(mut self, args: &OutputArgs) -> Self {
        let output = self.output.get_or_insert_with(Default::default);
        if let Some(dir) = &args.output_dir {
            output.dir = Some(dir.clone());
        }
        if args.no_export {
            output.export = Some(false);
        }
        self
    }

    pub fn with_generator_flags(mut self, args: &GeneratorArgs) -> Self {
        let generator = self.generator.get_or_insert_with(Default::default);
        generator.target_frequency_hz = args.target_hz.or(generator.target_frequency_hz);
        generator.max_iterations = args.iterations.or(generator.max_iterations);
        generator.seed = args.seed.or(generator.seed);
        self
    }

    pub fn with_soliton_flags(mut self, args: &SolitonArgs) -> Self {
        let soliton = self.soliton.get_or_insert_with(Default::default);
        if let Some(cancer_type) = &args.cancer_type {
            soliton.cancer_type = Some(cancer_type.clone());
        }
        soliton.reorganization_time_s = args.reorganization_time.or(soliton.reorganization_time_s);
        if args.pde {
            soliton.compute_pde = Some(true);
        }
        self.with_output_flags(&args.output)
    }

    pub fn with_plasma_flags(mut self, args: &PlasmaArgs) -> Self {
        let plasma = self.plasma.get_or_insert_with(Default::default);
        plasma.temperature_k = args.temperature.or(plasma.temperature_k);
        plasma.length_scale_m = args.length_scale.or(plasma.length_scale_m);
        plasma.dynamo_radius_m = args.dynamo_radius.or(plasma.dynamo_radius_m);
        self.with_output_flags(&args.output)
    }

    /// Export directory, or `None` when export is switched off.
    pub fn output_dir(&self) -> Option<PathBuf> {
        let output = self.output.clone().unwrap_or_default();
        if output.export == Some(false) {
            return None;
        }
        Some(
            output
                .dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        )
    }

    /// `default_target_hz` applies when neither file, flag, nor `-S` sets a target.
    pub fn generator(&self, default_target_hz: f64) -> Result<core_config::GeneratorConfig> {
        let partial = self.generator.clone().unwrap_or_default();
        let mut builder = core_config::GeneratorConfigBuilder::new()
            .target_frequency_hz(partial.target_frequency_hz.unwrap_or(default_target_hz));
        if let Some(score) = partial.target_bcs_score {
            builder = builder.target_bcs_score(score);
        }
        if let Some(iterations) = partial.max_iterations {
            builder = builder.max_iterations(iterations);
        }
        if let Some(seed) = partial.seed {
            builder = builder.seed(seed);
        }
        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn stress_settings(&self) -> StressSettings {
        let partial = self.generator.clone().unwrap_or_default();
        let defaults = StressSettings::default();
        StressSettings {
            max_iterations: partial.max_iterations.unwrap_or(defaults.max_iterations),
            seed: partial.seed.or(defaults.seed),
        }
    }

    pub fn soliton(&self) -> Result<core_config::SolitonConfig> {
        let partial = self.soliton.clone().unwrap_or_default();
        let defaults = core_config::SolitonConfig::default();
        let pde = partial.pde.unwrap_or_default();
        let config = core_config::SolitonConfig {
            cancer_type: partial.cancer_type.unwrap_or(defaults.cancer_type),
            reorganization_time_s: partial
                .reorganization_time_s
                .unwrap_or(defaults.reorganization_time_s),
            compute_pde: partial.compute_pde.unwrap_or(defaults.compute_pde),
            pde: core_config::PdeConfig {
                domain_length_m: pde.domain_length_m.unwrap_or(defaults.pde.domain_length_m),
                grid_points: pde.grid_points.unwrap_or(defaults.pde.grid_points),
                initial_amplitude: pde
                    .initial_amplitude
                    .unwrap_or(defaults.pde.initial_amplitude),
                t_max_s: pde.t_max_s.unwrap_or(defaults.pde.t_max_s),
                time_steps: pde.time_steps.unwrap_or(defaults.pde.time_steps),
            },
        };
        config
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(config)
    }

    pub fn plasma(&self) -> Result<core_config::PlasmaConfig> {
        let p = self.plasma.clone().unwrap_or_default();
        let d = core_config::PlasmaConfig::default();
        let config = core_config::PlasmaConfig {
            temperature_k: p.temperature_k.unwrap_or(d.temperature_k),
            length_scale_m: p.length_scale_m.unwrap_or(d.length_scale_m),
            dynamo_radius_m: p.dynamo_radius_m.unwrap_or(d.dynamo_radius_m),
            test_rpms: p.test_rpms.unwrap_or(d.test_rpms),
            electron_density_m3: p.electron_density_m3.unwrap_or(d.electron_density_m3),
            electron_temperature_ev: p
                .electron_temperature_ev
                .unwrap_or(d.electron_temperature_ev),
            magnetic_field_t: p.magnetic_field_t.unwrap_or(d.magnetic_field_t),
            field_strength_v_m: p.field_strength_v_m.unwrap_or(d.field_strength_v_m),
            field_frequency_hz: p.field_frequency_hz.unwrap_or(d.field_frequency_hz),
            interaction_volume_m3: p.interaction_volume_m3.unwrap_or(d.interaction_volume_m3),
        };
        config
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(config)
    }

    pub fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let (key, value) = (key.trim(), value.trim());

            match key {
                "output.dir" => {
                    self.output.get_or_insert_with(Default::default).dir =
                        Some(PathBuf::from(value));
                }
                "output.export" => {
                    self.output.get_or_insert_with(Default::default).export =
                        Some(parse(key, value)?);
                }
                "generator.target-frequency-hz" => {
                    self.generator_mut().target_frequency_hz = Some(parse(key, value)?);
                }
                "generator.target-bcs-score" => {
                    self.generator_mut().target_bcs_score = Some(parse(key, value)?);
                }
                "generator.max-iterations" => {
                    self.generator_mut().max_iterations = Some(parse(key, value)?);
                }
                "generator.seed" => {
                    self.generator_mut().seed = Some(parse(key, value)?);
                }
                "soliton.cancer-type" => {
                    self.soliton_mut().cancer_type = Some(value.to_string());
                }
                "soliton.reorganization-time-s" => {
                    self.soliton_mut().reorganization_time_s = Some(parse(key, value)?);
                }
                "soliton.compute-pde" => {
                    self.soliton_mut().compute_pde = Some(parse(key, value)?);
                }
                "soliton.pde.domain-length-m" => {
                    self.pde_mut().domain_length_m = Some(parse(key, value)?);
                }
                "soliton.pde.grid-points" => {
                    self.pde_mut().grid_points = Some(parse(key, value)?);
                }
                "soliton.pde.initial-amplitude" => {
                    self.pde_mut().initial_amplitude = Some(parse(key, value)?);
                }
                "soliton.pde.t-max-s" => {
                    self.pde_mut().t_max_s = Some(parse(key, value)?);
                }
                "soliton.pde.time-steps" => {
                    self.pde_mut().time_steps = Some(parse(key, value)?);
                }
                "plasma.test-rpms" => {
                    let rpms = value
                        .split(',')
                        .map(|v| parse(key, v.trim()))
                        .collect::<Result<Vec<f64>>>()?;
                    self.plasma_mut().test_rpms = Some(rpms);
                }
                _ if key.starts_with("plasma.") => {
                    let number: f64 = parse(key, value)?;
                    let plasma = self.plasma_mut();
                    let slot = match &key["plasma.".len()..] {
                        "temperature-k" => &mut plasma.temperature_k,
                        "length-scale-m" => &mut plasma.length_scale_m,
                        "dynamo-radius-m" => &mut plasma.dynamo_radius_m,
                        "electron-density-m3" => &mut plasma.electron_density_m3,
                        "electron-temperature-ev" => &mut plasma.electron_temperature_ev,
                        "magnetic-field-t" => &mut plasma.magnetic_field_t,
                        "field-strength-v-m" => &mut plasma.field_strength_v_m,
                        "field-frequency-hz" => &mut plasma.field_frequency_hz,
                        "interaction-volume-m3" => &mut plasma.interaction_volume_m3,
                        _ => return Err(unsupported(key)),
                    };
                    *slot = Some(number);
                }
                _ => return Err(unsupported(key)),
            }
        }
        Ok(())
    }

    fn generator_mut(&mut self) -> &mut PartialGeneratorConfig {
        self.generator.get_or_insert_with(Default::default)
    }

    fn soliton_mut(&mut self) -> &mut PartialSolitonConfig {
        self.soliton.get_or_insert_with(Default::default)
    }

    fn pde_mut(&mut self) -> &mut PartialPdeConfig {
        self.soliton_mut().pde.get_or_insert_with(Default::default)
    }

    fn plasma_mut(&mut self) -> &mut PartialPlasmaConfig {
        self.plasma.get_or_insert_with(Default::default)
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value)))
}

fn unsupported(key: &str) -> CliError {
    CliError::Config(format!(
        "Unsupported configuration key for --set: '{}'",
        key
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands, SequenceCommands};
    use clap::Parser;
    use once_cell::sync::Lazy;
    use std::fs;
    use tempfile::TempDir;

    static TEST_DIR: Lazy<TempDir> = Lazy::new(|| tempfile::tempdir().unwrap());

    fn write_config(name: &str, content: &str) -> PathBuf {
        let path = TEST_DIR.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn resolve(
        cli: &Cli,
        flags: impl FnOnce(PartialAppConfig) -> PartialAppConfig,
    ) -> Result<PartialAppConfig> {
        ConfigSource {
            file: cli.config.as_deref(),
            set_values: &cli.set_values,
        }
        .resolve(flags)
    }

    #[test]
    fn defaults_apply_without_file_or_flags() {
        let config = PartialAppConfig::default();
        assert_eq!(config.output_dir(), Some(PathBuf::from(DEFAULT_OUTPUT_DIR)));
        assert_eq!(config.soliton().unwrap(), core_config::SolitonConfig::default());
        assert_eq!(config.plasma().unwrap(), core_config::PlasmaConfig::default());
        let generator = config.generator(7.5e11).unwrap();
        assert_eq!(generator.target_frequency_hz, 7.5e11);
        assert_eq!(generator.max_iterations, 5000);
        assert_eq!(generator.seed, None);
    }

    #[test]
    fn file_values_are_loaded() {
        let path = write_config(
            "file_values.toml",
            r#"
[output]
dir = "results"

[generator]
target-frequency-hz = 1.0e11
max-iterations = 250
seed = 42

[soliton]
cancer-type = "glioblastoma"

[soliton.pde]
grid-points = 64

[plasma]
test-rpms = [500.0, 1500.0]
"#,
        );
        let config = PartialAppConfig::from_file(&path).unwrap();
        assert_eq!(config.output_dir(), Some(PathBuf::from("results")));
        let generator = config.generator(7.5e11).unwrap();
        assert_eq!(generator.target_frequency_hz, 1.0e11);
        assert_eq!(generator.max_iterations, 250);
        assert_eq!(generator.seed, Some(42));
        let soliton = config.soliton().unwrap();
        assert_eq!(soliton.cancer_type, "glioblastoma");
        assert_eq!(soliton.pde.grid_points, 64);
        assert_eq!(config.plasma().unwrap().test_rpms, vec![500.0, 1500.0]);
    }

    #[test]
    fn unknown_file_key_is_a_parse_error() {
        let path = write_config("unknown_key.toml", "[generator]\ntarget-hz = 5.0\n");
        let err = PartialAppConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, CliError::FileParsing { .. }));
    }

    #[test]
    fn flags_override_file_and_set_overrides_flags() {
        let path = write_config(
            "precedence.toml",
            "[generator]\nmax-iterations = 100\nseed = 1\n",
        );
        let path_str = path.to_str().unwrap();
        let cli = Cli::parse_from([
            "codex",
            "--config",
            path_str,
            "-S",
            "generator.seed=99",
            "sequence",
            "generate-dna",
            "--iterations",
            "300",
            "--seed",
            "5",
        ]);
        let Commands::Sequence(args) = &cli.command else {
            panic!("expected sequence");
        };
        let SequenceCommands::GenerateDna { generator, .. } = &args.command else {
            panic!("expected generate-dna");
        };
        let config = resolve(&cli, |c| c.with_generator_flags(generator)).unwrap();
        let resolved = config.generator(34e9).unwrap();
        assert_eq!(resolved.max_iterations, 300);
        assert_eq!(resolved.seed, Some(99));
        assert_eq!(resolved.target_frequency_hz, 34e9);
    }

    #[test]
    fn no_export_flag_disables_output() {
        let cli = Cli::parse_from(["codex", "resonance", "--no-export"]);
        let Commands::Resonance(output) = &cli.command else {
            panic!("expected resonance");
        };
        let config = resolve(&cli, |c| c.with_output_flags(output)).unwrap();
        assert_eq!(config.output_dir(), None);
    }

    #[test]
    fn plasma_flags_and_set_values_merge() {
        let cli = Cli::parse_from([
            "codex",
            "plasma",
            "--temperature",
            "350",
            "-S",
            "plasma.magnetic-field-t=0.5",
            "-S",
            "plasma.test-rpms=100, 200",
        ]);
        let Commands::Plasma(args) = &cli.command else {
            panic!("expected plasma");
        };
        let config = resolve(&cli, |c| c.with_plasma_flags(args)).unwrap();
        let plasma = config.plasma().unwrap();
        assert_eq!(plasma.temperature_k, 350.0);
        assert_eq!(plasma.magnetic_field_t, 0.5);
        assert_eq!(plasma.test_rpms, vec![100.0, 200.0]);
    }

    #[test]
    fn soliton_pde_can_be_enabled_by_flag() {
        let cli = Cli::parse_from(["codex", "soliton", "--pde", "--cancer-type", "breast"]);
        let Commands::Soliton(args) = &cli.command else {
            panic!("expected soliton");
        };
        let soliton = resolve(&cli, |c| c.with_soliton_flags(args))
            .unwrap()
            .soliton()
            .unwrap();
        assert!(soliton.compute_pde);
        assert_eq!(soliton.cancer_type, "breast");
    }

    #[test]
    fn invalid_set_values_are_rejected() {
        let mut config = PartialAppConfig::default();
        for bad in [
            "generator.max-iterations",
            "generator.max-iterations=many",
            "plasma.warp-factor=9",
            "optimization.max-iterations=10",
        ] {
            let err = config.apply_set_values(&[bad.to_string()]).unwrap_err();
            assert!(matches!(err, CliError::Config(_)), "accepted {bad}");
        }
    }

    #[test]
    fn invalid_resolved_values_become_config_errors() {
        let mut config = PartialAppConfig::default();
        config
            .apply_set_values(&["plasma.temperature-k=-1".to_string()])
            .unwrap();
        assert!(matches!(config.plasma(), Err(CliError::Config(_))));
        assert!(matches!(config.generator(0.0), Err(CliError::Config(_))));
    }
}
