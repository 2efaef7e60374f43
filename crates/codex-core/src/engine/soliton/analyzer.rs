use super::membrane::{
    DavydovScore, FrequencyDepth, InsertionDepth, MembraneFluidity, VelocityMatch, davydov_score,
    frequency_depth, insertion_depth, membrane_fluidity, velocity_match,
};
use super::pde::{self, PdeCoefficients, SolitonProperties};
use crate::core::numeric::mean;
use crate::engine::config::SolitonConfig;
use crate::engine::error::EngineError;
use crate::engine::text;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Reference sequences used by the stress test.
pub const STRESS_SEQUENCES: [(&str, &str); 4] = [
    ("TLKIVFIVFRKYVGFLVSQC", "Cancer peptide 1"),
    ("VKMYGWNSIIIHAGVLGKHY", "Cancer peptide 2"),
    ("KWKLFKKIGIGRLKVL", "Alligatorin-2 (known AMP)"),
    ("GIGAVLKVLTTGLPALISWIKRKRQQ", "Melittin (bee venom)"),
];

const HIGH_DAVYDOV: f64 = 0.7;
const FROHLICH_OVERLAP_PASS: f64 = 0.5;

/// Flat numeric features for downstream predictors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MlFeatures {
    pub insertion_depth_angstrom: f64,
    pub frequency_ghz: f64,
    pub effective_velocity_ms: f64,
    pub resonance_quality: f64,
    pub davydov_score: f64,
    pub fluidity_multiplier: f64,
    pub selectivity_enhancement: f64,
    pub helix_propensity: f64,
    pub tm_probability: f64,
}

impl MlFeatures {
    pub fn entries(&self) -> [(&'static str, f64); 9] {
        [
            ("insertion_depth_angstrom", self.insertion_depth_angstrom),
            ("frequency_ghz", self.frequency_ghz),
            ("effective_velocity_ms", self.effective_velocity_ms),
            ("resonance_quality", self.resonance_quality),
            ("davydov_score", self.davydov_score),
            ("fluidity_multiplier", self.fluidity_multiplier),
            ("selectivity_enhancement", self.selectivity_enhancement),
            ("helix_propensity", self.helix_propensity),
            ("tm_probability", self.tm_probability),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolitonSolution {
    pub sequence: String,
    pub insertion: InsertionDepth,
    pub frequency: FrequencyDepth,
    pub velocity: VelocityMatch,
    pub davydov: DavydovScore,
    pub membrane: MembraneFluidity,
    /// Present only when the PDE was requested.
    pub pde: Option<SolitonProperties>,
    pub features: MlFeatures,
    pub overall_score: f64,
}

impl SolitonSolution {
    pub fn has_soliton_solution(&self) -> bool {
        self.pde.is_some_and(|p| p.has_soliton)
    }
}

pub fn analyze_sequence(
    sequence: &str,
    config: &SolitonConfig,
) -> Result<SolitonSolution, EngineError> {
    config.validate()?;
    let insertion = insertion_depth(sequence)?;
    let frequency = frequency_depth(insertion.depth_m)?;
    let velocity = velocity_match(insertion.depth_m, config.reorganization_time_s)?;
    let davydov = davydov_score(sequence)?;
    let membrane = membrane_fluidity(&config.cancer_type);

    let pde = if config.compute_pde {
        Some(pde::solve(
            &PdeCoefficients::for_membrane(&membrane),
            &config.pde,
        )?)
    } else {
        None
    };

    let features = MlFeatures {
        insertion_depth_angstrom: insertion.depth_angstrom,
        frequency_ghz: frequency.frequency_ghz,
        effective_velocity_ms: velocity.velocity_ms,
        resonance_quality: frequency.resonance_quality,
        davydov_score: davydov.score,
        fluidity_multiplier: membrane.multiplier,
        selectivity_enhancement: membrane.selectivity_enhancement,
        helix_propensity: davydov.helix_propensity,
        tm_probability: insertion.transmembrane_probability,
    };
    let overall_score = 0.25
        * (frequency.resonance_quality
            + velocity.score
            + davydov.score
            + insertion.transmembrane_probability);
    debug!(sequence, overall_score, "Soliton analysis complete");

    Ok(SolitonSolution {
        sequence: sequence.to_string(),
        insertion,
        frequency,
        velocity,
        davydov,
        membrane,
        pde,
        features,
        overall_score,
    })
}

pub fn analyze_sequences(
    sequences: &[String],
    config: &SolitonConfig,
) -> Result<Vec<SolitonSolution>, EngineError> {
    sequences
        .par_iter()
        .map(|s| analyze_sequence(s, config))
        .collect()
}

impl fmt::Display for SolitonSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   Sequence: {}", self.sequence)?;
        writeln!(f)?;
        writeln!(f, "   📊 Results:")?;
        writeln!(
            f,
            "      Insertion depth: {:.1} Å",
            self.insertion.depth_angstrom
        )?;
        writeln!(f, "      Frequency: {:.1} GHz", self.frequency.frequency_ghz)?;
        writeln!(f, "      Velocity: {:.1} m/s", self.velocity.velocity_ms)?;
        writeln!(f, "      Regime: {}", self.velocity.regime.label())?;
        writeln!(f, "      Davydov score: {:.2}", self.davydov.score)?;
        writeln!(
            f,
            "      Resonance quality: {:.2}",
            self.frequency.resonance_quality
        )?;
        writeln!(f, "      Overall soliton score: {:.2}", self.overall_score)?;
        if let Some(p) = &self.pde {
            writeln!(
                f,
                "      PDE: amplitude {:.3e}, width {:.3e} m, velocity {:.2} m/s{}",
                p.amplitude,
                p.width_m,
                p.velocity_ms,
                if p.diverged { " (diverged)" } else { "" }
            )?;
        }
        if self.velocity.regime.is_heimburg_jackson() {
            writeln!(f, "      ✅ Heimburg-Jackson compatible")?;
        } else {
            writeln!(f, "      ❌ Outside H-J regime")?;
        }
        if self.frequency.frohlich_overlap > FROHLICH_OVERLAP_PASS {
            writeln!(f, "      ✅ Fröhlich band overlap")
        } else {
            writeln!(f, "      ⚠️ Weak Fröhlich overlap")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolitonStressTest {
    pub results: Vec<(&'static str, SolitonSolution)>,
}

impl SolitonStressTest {
    pub fn run(config: &SolitonConfig) -> Result<Self, EngineError> {
        let results = STRESS_SEQUENCES
            .par_iter()
            .map(|(seq, name)| analyze_sequence(seq, config).map(|s| (*name, s)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { results })
    }

    pub fn heimburg_jackson_count(&self) -> usize {
        self.results
            .iter()
            .filter(|(_, s)| s.velocity.regime.is_heimburg_jackson())
            .count()
    }

    pub fn frohlich_count(&self) -> usize {
        self.results
            .iter()
            .filter(|(_, s)| s.frequency.frohlich_overlap > FROHLICH_OVERLAP_PASS)
            .count()
    }

    pub fn high_davydov_count(&self) -> usize {
        self.results
            .iter()
            .filter(|(_, s)| s.davydov.score > HIGH_DAVYDOV)
            .count()
    }

    pub fn average_score(&self) -> f64 {
        let scores: Vec<f64> = self.results.iter().map(|(_, s)| s.overall_score).collect();
        mean(&scores).unwrap_or(0.0)
    }
}

impl fmt::Display for SolitonStressTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f, "CODEX SOLITON INTEGRATION - STRESS TEST")?;
        writeln!(f, "{}", text::rule('=', 80))?;
        for (name, solution) in &self.results {
            writeln!(f)?;
            writeln!(f, "🧬 {name}")?;
            write!(f, "{solution}")?;
        }

        let n = self.results.len().max(1);
        let pct = |count: usize| count as f64 / n as f64 * 100.0;
        writeln!(f)?;
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f, "SUMMARY STATISTICS")?;
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f)?;
        let (hj, fr, dv) = (
            self.heimburg_jackson_count(),
            self.frohlich_count(),
            self.high_davydov_count(),
        );
        writeln!(
            f,
            "   Heimburg-Jackson compatible: {hj}/{} ({:.0}%)",
            self.results.len(),
            pct(hj)
        )?;
        writeln!(
            f,
            "   Fröhlich band overlap: {fr}/{} ({:.0}%)",
            self.results.len(),
            pct(fr)
        )?;
        writeln!(
            f,
            "   High Davydov score: {dv}/{} ({:.0}%)",
            self.results.len(),
            pct(dv)
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "   Average overall soliton score: {:.2}",
            self.average_score()
        )?;

        if let Some((_, first)) = self.results.first() {
            writeln!(f)?;
            writeln!(f, "   Features available for each sequence:")?;
            for (name, _) in first.features.entries() {
                writeln!(f, "      • {name}")?;
            }
            writeln!(f)?;
            writeln!(f, "   Total features: {}", first.features.entries().len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overall_score_is_mean_of_four_components() {
        let s = analyze_sequence("GIGAVLKVLTTGLPALISWIKRKRQQ", &SolitonConfig::default()).unwrap();
        let expected = (s.frequency.resonance_quality
            + s.velocity.score
            + s.davydov.score
            + s.insertion.transmembrane_probability)
            / 4.0;
        assert!((s.overall_score - expected).abs() < 1e-12);
        assert!(s.pde.is_none());
        assert!(!s.has_soliton_solution());
    }

    #[test]
    fn features_mirror_components() {
        let s = analyze_sequence("TLKIVFIVFRKYVGFLVSQC", &SolitonConfig::default()).unwrap();
        let entries = s.features.entries();
        assert_eq!(entries.len(), 9);
        assert_eq!(entries[0].1, s.insertion.depth_angstrom);
        assert_eq!(s.features.fluidity_multiplier, 2.8);
    }

    #[test]
    fn invalid_reorganization_time_is_rejected() {
        let config = SolitonConfig {
            reorganization_time_s: 0.0,
            ..Default::default()
        };
        assert!(analyze_sequence("KWKLFKKIGIGRLKVL", &config).is_err());
    }

    #[test]
    fn stress_test_covers_reference_sequences() {
        let test = SolitonStressTest::run(&SolitonConfig::default()).unwrap();
        assert_eq!(test.results.len(), 4);
        assert_eq!(test.results[3].0, "Melittin (bee venom)");
        assert!(test.heimburg_jackson_count() <= 4);
        let rendered = test.to_string();
        assert!(rendered.contains("Total features: 9"));
    }

    #[test]
    fn batch_keeps_input_order() {
        let seqs = vec!["KWKLFKKIGIGRLKVL".to_string(), "TLKIVFIVFRKYVGFLVSQC".to_string()];
        let out = analyze_sequences(&seqs, &SolitonConfig::default()).unwrap();
        assert_eq!(out[0].sequence, seqs[0]);
        assert_eq!(out[1].sequence, seqs[1]);
    }
}
