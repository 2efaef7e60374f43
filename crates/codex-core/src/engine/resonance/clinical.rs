use super::{predict_optimal_frequency, resonance_parameter, validate_resonance_condition};
use crate::core::numeric::mean;
use crate::engine::error::{EngineError, require_positive};
use crate::engine::text;
use serde::Serialize;
use std::fmt;

pub const DEFAULT_CELL_SIZE_UM: f64 = 15.0;
pub const DEFAULT_GAMMA_TAU_MS: f64 = 4.0;
pub const DEFAULT_OSTEOBLAST_TAU_MS: f64 = 11.0;
pub const DEFAULT_SA_NODE_TAU_MS: f64 = 300.0;

const REFERENCE_CELL_UM: f64 = 10.0;
const REFERENCE_MEMBRANE_RESISTANCE: f64 = 100e6;
const REFERENCE_MEMBRANE_CAPACITANCE: f64 = 10e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Therapy {
    TumorTreatingFields,
    GammaEntrainment,
    PemfBoneHealing,
    CardiacPacing,
}

impl Therapy {
    pub const fn title(self) -> &'static str {
        match self {
            Self::TumorTreatingFields => "Tumor Treating Fields (TTFields)",
            Self::GammaEntrainment => "Gamma Band Neural Entrainment",
            Self::PemfBoneHealing => "PEMF Bone Healing",
            Self::CardiacPacing => "Cardiac Pacing",
        }
    }

    /// Frequency used in clinical practice, Hz.
    pub const fn clinical_frequency_hz(self) -> f64 {
        match self {
            Self::TumorTreatingFields => 200e3,
            Self::GammaEntrainment => 40.0,
            Self::PemfBoneHealing => 15.0,
            Self::CardiacPacing => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClinicalSimulation {
    pub therapy: Therapy,
    pub tau_s: f64,
    pub predicted_hz: f64,
    pub rho: f64,
    pub resonance_valid: bool,
    /// Prediction as a percentage of the clinical frequency.
    pub accuracy_percent: f64,
}

impl ClinicalSimulation {
    fn from_tau(therapy: Therapy, tau_s: f64) -> Self {
        let predicted_hz = predict_optimal_frequency(tau_s);
        Self {
            therapy,
            tau_s,
            predicted_hz,
            rho: resonance_parameter(predicted_hz, tau_s),
            resonance_valid: validate_resonance_condition(predicted_hz, tau_s),
            accuracy_percent: predicted_hz / therapy.clinical_frequency_hz() * 100.0,
        }
    }
}

/// Membrane RC time of a cell scaled from a 10 µm reference.
pub fn simulate_ttfields(cell_size_um: f64) -> Result<ClinicalSimulation, EngineError> {
    let size = require_positive("cell_size_um", cell_size_um)? / REFERENCE_CELL_UM;
    let resistance = REFERENCE_MEMBRANE_RESISTANCE / size;
    let capacitance = REFERENCE_MEMBRANE_CAPACITANCE * size;
    Ok(ClinicalSimulation::from_tau(
        Therapy::TumorTreatingFields,
        resistance * capacitance,
    ))
}

fn simulate_from_ms(therapy: Therapy, tau_ms: f64) -> Result<ClinicalSimulation, EngineError> {
    let tau_ms = require_positive("tau_ms", tau_ms)?;
    Ok(ClinicalSimulation::from_tau(therapy, tau_ms / 1000.0))
}

pub fn simulate_gamma_entrainment(neuron_tau_ms: f64) -> Result<ClinicalSimulation, EngineError> {
    simulate_from_ms(Therapy::GammaEntrainment, neuron_tau_ms)
}

pub fn simulate_pemf(osteoblast_tau_ms: f64) -> Result<ClinicalSimulation, EngineError> {
    simulate_from_ms(Therapy::PemfBoneHealing, osteoblast_tau_ms)
}

pub fn simulate_cardiac_pacing(sa_node_tau_ms: f64) -> Result<ClinicalSimulation, EngineError> {
    simulate_from_ms(Therapy::CardiacPacing, sa_node_tau_ms)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClinicalValidation {
    pub simulations: Vec<ClinicalSimulation>,
}

impl ClinicalValidation {
    /// All four therapies at their reference timescales.
    pub fn run() -> Result<Self, EngineError> {
        Ok(Self {
            simulations: vec![
                simulate_ttfields(DEFAULT_CELL_SIZE_UM)?,
                simulate_gamma_entrainment(DEFAULT_GAMMA_TAU_MS)?,
                simulate_pemf(DEFAULT_OSTEOBLAST_TAU_MS)?,
                simulate_cardiac_pacing(DEFAULT_SA_NODE_TAU_MS)?,
            ],
        })
    }

    pub fn overall_accuracy(&self) -> f64 {
        let acc: Vec<f64> = self.simulations.iter().map(|s| s.accuracy_percent).collect();
        mean(&acc).unwrap_or(0.0)
    }
}

impl fmt::Display for ClinicalValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(
            f,
            "CODEX TIMESCALE RESONANCE - COMPUTATIONAL VALIDATION REPORT"
        )?;
        writeln!(f, "{}", text::rule('=', 80))?;
        for (i, s) in self.simulations.iter().enumerate() {
            let clinical = s.therapy.clinical_frequency_hz();
            writeln!(f)?;
            writeln!(f, "{}. {}", i + 1, s.therapy.title())?;
            if s.therapy == Therapy::TumorTreatingFields {
                writeln!(f, "   Predicted: {:.1} kHz", s.predicted_hz / 1e3)?;
                writeln!(f, "   Clinical:  {:.1} kHz", clinical / 1e3)?;
            } else if s.therapy == Therapy::CardiacPacing {
                writeln!(f, "   Predicted: {:.2} Hz", s.predicted_hz)?;
                writeln!(f, "   Clinical:  {clinical:.1} Hz")?;
            } else {
                writeln!(f, "   Predicted: {:.1} Hz", s.predicted_hz)?;
                writeln!(f, "   Clinical:  {clinical:.1} Hz")?;
            }
            writeln!(f, "   Accuracy:  {:.1}%", s.accuracy_percent)?;
            writeln!(f, "   Resonance parameter ρ: {:.3}", s.rho)?;
            writeln!(f, "   Valid: {}", text::check(s.resonance_valid))?;
        }
        writeln!(f)?;
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(
            f,
            "OVERALL PREDICTIVE ACCURACY: {:.1}%",
            self.overall_accuracy()
        )?;
        writeln!(f, "{}", text::rule('=', 80))
    }
}

/// Individual membrane measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PatientProfile {
    pub membrane_resistance_ohm: f64,
    pub membrane_capacitance_farad: f64,
    pub tissue_elasticity_pa: Option<f64>,
    pub cell_size_um: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Confidence {
    High,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PatientOptimization {
    pub tau_s: f64,
    pub optimal_frequency_hz: f64,
    pub rho: f64,
    pub therapeutic_window_valid: bool,
    pub confidence: Confidence,
}

pub fn optimize_patient_frequency(
    profile: &PatientProfile,
) -> Result<PatientOptimization, EngineError> {
    let r = require_positive("membrane_resistance_ohm", profile.membrane_resistance_ohm)?;
    let c = require_positive(
        "membrane_capacitance_farad",
        profile.membrane_capacitance_farad,
    )?;
    let tau_s = r * c;
    let optimal_frequency_hz = predict_optimal_frequency(tau_s);
    let valid = validate_resonance_condition(optimal_frequency_hz, tau_s);
    Ok(PatientOptimization {
        tau_s,
        optimal_frequency_hz,
        rho: resonance_parameter(optimal_frequency_hz, tau_s),
        therapeutic_window_valid: valid,
        confidence: if valid {
            Confidence::High
        } else {
            Confidence::Low
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttfields_rc_time_is_size_independent() {
        let small = simulate_ttfields(5.0).unwrap();
        let large = simulate_ttfields(30.0).unwrap();
        assert!((small.tau_s - 1e-3).abs() < 1e-15);
        assert!((small.predicted_hz - large.predicted_hz).abs() < 1e-9);
        assert!(small.resonance_valid);
    }

    #[test]
    fn gamma_prediction_is_near_forty_hertz() {
        let g = simulate_gamma_entrainment(4.0).unwrap();
        assert!((g.predicted_hz - 39.788_735_772_973_83).abs() < 1e-9);
        assert!((g.accuracy_percent - g.predicted_hz / 40.0 * 100.0).abs() < 1e-12);
    }

    #[test]
    fn validation_runs_four_therapies() {
        let v = ClinicalValidation::run().unwrap();
        assert_eq!(v.simulations.len(), 4);
        let rendered = v.to_string();
        assert!(rendered.contains("OVERALL PREDICTIVE ACCURACY"));
        assert!(rendered.contains("4. Cardiac Pacing"));
    }

    #[test]
    fn patient_optimization_is_high_confidence_at_unit_rho() {
        let profile = PatientProfile {
            membrane_resistance_ohm: 1e8,
            membrane_capacitance_farad: 1e-11,
            tissue_elasticity_pa: None,
            cell_size_um: None,
        };
        let out = optimize_patient_frequency(&profile).unwrap();
        assert_eq!(out.confidence, Confidence::High);
        assert!((out.rho - 1.0).abs() < 1e-12);
    }

    #[test]
    fn non_positive_timescales_are_rejected() {
        assert!(simulate_pemf(0.0).is_err());
        assert!(simulate_ttfields(-1.0).is_err());
    }
}
