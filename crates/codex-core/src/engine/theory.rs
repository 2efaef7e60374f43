//! Consistency checks between the geometric-phase picture and the RaRaMa scaling.
//!
//! Four predictions are evaluated: the RaRaMa constant read as a phase velocity,
//! frequency quantisation from the cloaking condition `f = n·v / d`, the
//! Jahn-Teller coupling strength of a few biomolecular modes, and frequency
//! synthesis as phase matching `γ_A + γ_B ≡ γ_target (mod 2π)`.

use crate::core::constants::{CODEX_VELOCITY, ELEMENTARY_CHARGE, HBAR, RARAMA_CONSTANT_GHZ_ANGSTROM};
use crate::core::io::export::ChartSeries;
use crate::engine::error::{EngineError, require_positive};
use crate::engine::text;
use serde::Serialize;
use std::f64::consts::PI;
use std::fmt;
use tracing::{info, instrument};

const ANGSTROM: f64 = 1e-10;
const NM: f64 = 1e-9;

pub const SCALE_TEST_DIMENSIONS_NM: [f64; 5] = [10.0, 50.0, 100.0, 500.0, 1000.0];
pub const CLOAKING_DIMENSION_NM: f64 = 100.0;
pub const CLOAKING_ORDERS: u32 = 5;
/// Coupling above which a conical intersection can form.
pub const STRONG_COUPLING_THRESHOLD: f64 = 1.0;
/// Typical molecular interaction time for phase matching, in seconds.
pub const INTERACTION_TIME_S: f64 = 1e-9;
/// Largest frequency-sum error, in percent, that still counts as synthesis.
pub const SYNTHESIS_TOLERANCE_PERCENT: f64 = 10.0;

/// `ω / k` with `k = 2π / d`, which reduces to `f · d`.
pub fn phase_velocity_from_mode(frequency_hz: f64, dimension_m: f64) -> f64 {
    let k = 2.0 * PI / dimension_m;
    2.0 * PI * frequency_hz / k
}

/// The RaRaMa constant in SI units, m/s.
pub fn rarama_velocity() -> f64 {
    RARAMA_CONSTANT_GHZ_ANGSTROM * 1e9 * ANGSTROM
}

/// Frequency at which a path of length `d` closes with phase `2πn`.
pub fn cloaking_frequency(dimension_m: f64, phase_velocity: f64, charge: u32) -> f64 {
    f64::from(charge) * phase_velocity / dimension_m
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScalePoint {
    pub dimension_nm: f64,
    pub frequency_ghz: f64,
    /// `f · d` in m/s.
    pub product: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CloakingMode {
    pub order: u32,
    pub frequency_ghz: f64,
    pub product: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VibronicCoupling {
    pub name: String,
    pub energy_gap_ev: f64,
    pub frequency_hz: f64,
    pub dimension_nm: f64,
    /// `λ = E_gap / d`, J/m.
    pub coupling_strength: f64,
    /// `g = λ / ħω`.
    pub dimensionless_g: f64,
}

impl VibronicCoupling {
    pub fn is_strong(&self) -> bool {
        self.dimensionless_g > STRONG_COUPLING_THRESHOLD
    }
}

/// Linear Jahn-Teller estimate for a mode confined to `dimension_nm`.
pub fn jahn_teller_coupling(
    name: impl Into<String>,
    energy_gap_ev: f64,
    frequency_hz: f64,
    dimension_nm: f64,
) -> Result<VibronicCoupling, EngineError> {
    require_positive("energy_gap_ev", energy_gap_ev)?;
    require_positive("frequency_hz", frequency_hz)?;
    require_positive("dimension_nm", dimension_nm)?;
    let coupling_strength = energy_gap_ev * ELEMENTARY_CHARGE / (dimension_nm * NM);
    let omega = 2.0 * PI * frequency_hz;
    Ok(VibronicCoupling {
        name: name.into(),
        energy_gap_ev,
        frequency_hz,
        dimension_nm,
        coupling_strength,
        dimensionless_g: coupling_strength / (HBAR * omega),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseMatch {
    pub label: String,
    pub freq_a_hz: f64,
    pub freq_b_hz: f64,
    pub target_hz: f64,
    pub frequency_error_percent: f64,
    /// Folded into `[0, π]`.
    pub phase_difference: f64,
    /// `0` is a perfect match, `1` the worst.
    pub match_quality: f64,
}

impl PhaseMatch {
    pub fn synthesis_works(&self) -> bool {
        self.frequency_error_percent < SYNTHESIS_TOLERANCE_PERCENT
    }

    pub fn sum_hz(&self) -> f64 {
        self.freq_a_hz + self.freq_b_hz
    }
}

/// Compares the combined phase of A and B with the target phase over `interaction_time_s`.
pub fn phase_matching(
    label: impl Into<String>,
    freq_a_hz: f64,
    freq_b_hz: f64,
    target_hz: f64,
    interaction_time_s: f64,
) -> Result<PhaseMatch, EngineError> {
    require_positive("target_hz", target_hz)?;
    require_positive("interaction_time_s", interaction_time_s)?;
    let phase = |f: f64| (2.0 * PI * f * interaction_time_s).rem_euclid(2.0 * PI);
    let mut difference = (phase(freq_a_hz + freq_b_hz) - phase(target_hz)).abs();
    if difference > PI {
        difference = 2.0 * PI - difference;
    }
    Ok(PhaseMatch {
        label: label.into(),
        freq_a_hz,
        freq_b_hz,
        target_hz,
        frequency_error_percent: (freq_a_hz + freq_b_hz - target_hz).abs() / target_hz * 100.0,
        phase_difference: difference,
        match_quality: difference / PI,
    })
}

/// All four predictions evaluated on the reference systems.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TheoryValidation {
    pub predicted_velocity: f64,
    pub observed_velocity: f64,
    pub scale_invariance: Vec<ScalePoint>,
    pub cloaking_modes: Vec<CloakingMode>,
    pub couplings: Vec<VibronicCoupling>,
    pub phase_matches: Vec<PhaseMatch>,
}

impl TheoryValidation {
    #[instrument(skip_all, name = "theory_validation")]
    pub fn run() -> Result<Self, EngineError> {
        let velocity = rarama_velocity();
        let scale_invariance = SCALE_TEST_DIMENSIONS_NM
            .iter()
            .map(|&d_nm| {
                let frequency_hz = velocity / (d_nm * NM);
                ScalePoint {
                    dimension_nm: d_nm,
                    frequency_ghz: frequency_hz / 1e9,
                    product: phase_velocity_from_mode(frequency_hz, d_nm * NM),
                }
            })
            .collect();

        let cloaking_d = CLOAKING_DIMENSION_NM * NM;
        let cloaking_modes = (1..=CLOAKING_ORDERS)
            .map(|n| {
                let f = cloaking_frequency(cloaking_d, CODEX_VELOCITY, n);
                CloakingMode {
                    order: n,
                    frequency_ghz: f / 1e9,
                    product: f * cloaking_d,
                }
            })
            .collect();

        let couplings = vec![
            jahn_teller_coupling("Protein vibrational mode", 0.1, 5e11, 50.0)?,
            jahn_teller_coupling("Chromophore electronic transition", 0.5, 1e12, 10.0)?,
            jahn_teller_coupling("Low-frequency collective mode", 0.05, 5e9, 100.0)?,
        ];

        let t = INTERACTION_TIME_S;
        let phase_matches = vec![
            phase_matching("Exact match", 0.3e9, 0.2e9, 0.5e9, t)?,
            phase_matching("Close match", 0.35e9, 0.18e9, 0.5e9, t)?,
            phase_matching("Mismatch", 0.4e9, 0.2e9, 0.5e9, t)?,
        ];

        let validation = Self {
            predicted_velocity: velocity,
            observed_velocity: CODEX_VELOCITY,
            scale_invariance,
            cloaking_modes,
            couplings,
            phase_matches,
        };
        info!(
            velocity,
            strong_couplings = validation.couplings.iter().filter(|c| c.is_strong()).count(),
            syntheses = validation.phase_matches.iter().filter(|m| m.synthesis_works()).count(),
            "Theory validation complete"
        );
        Ok(validation)
    }

    pub fn velocity_agrees(&self) -> bool {
        (self.predicted_velocity - self.observed_velocity).abs() < 1e-9
    }

    pub fn chart_series(&self) -> Vec<ChartSeries> {
        vec![
            ChartSeries::from_points(
                "dimension_nm_vs_frequency_ghz",
                self.scale_invariance
                    .iter()
                    .map(|p| (p.dimension_nm, p.frequency_ghz))
                    .collect(),
            ),
            ChartSeries::from_points(
                "cloaking_order_vs_frequency_ghz",
                self.cloaking_modes
                    .iter()
                    .map(|m| (f64::from(m.order), m.frequency_ghz))
                    .collect(),
            ),
        ]
    }
}

impl fmt::Display for TheoryValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        text::write_banner(f, "THEORETICAL VALIDATION: GAUGE THEORY ↔ EMPIRICAL DATA")?;

        text::write_section(f, "PREDICTION 1: VIBRONIC PHASE VELOCITY")?;
        writeln!(f, "   f × d = {RARAMA_CONSTANT_GHZ_ANGSTROM} GHz·Å = {:.2} m/s", self.predicted_velocity)?;
        writeln!(f, "   v_phase = ω/k = (2πf)/(2π/d) = f·d")?;
        writeln!(f, "   Predicted v_phase: {:.2} m/s", self.predicted_velocity)?;
        writeln!(f, "   Observed v_Codex:  {:.2} m/s", self.observed_velocity)?;
        writeln!(f, "   {} Velocities agree", text::check(self.velocity_agrees()))?;
        writeln!(f, "📏 SCALE INVARIANCE:")?;
        for p in &self.scale_invariance {
            writeln!(
                f,
                "   d = {:4.0} nm  →  f = {:6.3} GHz  →  f×d = {:.2} m/s",
                p.dimension_nm, p.frequency_ghz, p.product
            )?;
        }

        text::write_section(f, "PREDICTION 2: TOPOLOGICAL CLOAKING & FREQUENCY QUANTIZATION")?;
        writeln!(f, "   Cloaking condition γ = 2πn gives f·d = n·v")?;
        writeln!(f, "📊 QUANTIZATION SERIES (d = {CLOAKING_DIMENSION_NM} nm):")?;
        for m in &self.cloaking_modes {
            writeln!(
                f,
                "   n={}: f = {:6.2} GHz, f×d = {:5.1} m/s  ({:.1} × fundamental)",
                m.order,
                m.frequency_ghz,
                m.product,
                m.product / self.observed_velocity
            )?;
        }

        text::write_section(f, "PREDICTION 3: VIBRONIC COUPLING STRENGTH IN BIOMOLECULES")?;
        for c in &self.couplings {
            writeln!(f, "   {}:", c.name)?;
            writeln!(f, "      Energy gap: {} eV", c.energy_gap_ev)?;
            writeln!(f, "      Frequency: {:.1} GHz", c.frequency_hz / 1e9)?;
            writeln!(f, "      Dimension: {} nm", c.dimension_nm)?;
            writeln!(f, "      Coupling g: {:.2e}", c.dimensionless_g)?;
            if c.is_strong() {
                writeln!(f, "      ✅ STRONG: conical intersections can form")?;
            } else {
                writeln!(f, "      ⚠️  WEAK: coupling may be too weak")?;
            }
        }

        text::write_section(f, "PREDICTION 4: FREQUENCY SYNTHESIS VIA TOPOLOGICAL PHASE MATCHING")?;
        writeln!(f, "   τ = {INTERACTION_TIME_S:e} s")?;
        for m in &self.phase_matches {
            writeln!(f, "   {}:", m.label)?;
            writeln!(
                f,
                "      f_A + f_B = {:.2} + {:.2} = {:.2} GHz (target {:.2} GHz)",
                m.freq_a_hz / 1e9,
                m.freq_b_hz / 1e9,
                m.sum_hz() / 1e9,
                m.target_hz / 1e9
            )?;
            writeln!(f, "      Error = {:.1}%", m.frequency_error_percent)?;
            writeln!(
                f,
                "      Phase Δ = {:.3} rad ({:.2}π)",
                m.phase_difference, m.match_quality
            )?;
            if m.synthesis_works() {
                writeln!(f, "      ✅ SYNTHESIS SUCCESSFUL")?;
            } else {
                writeln!(f, "      ❌ Synthesis unlikely")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_velocity_reduces_to_frequency_times_dimension() {
        assert!((phase_velocity_from_mode(5e9, 2e-8) - 100.0).abs() < 1e-9);
        assert!((rarama_velocity() - CODEX_VELOCITY).abs() < 1e-9);
    }

    #[test]
    fn cloaking_orders_are_harmonics() {
        let d = 100.0 * NM;
        let f1 = cloaking_frequency(d, CODEX_VELOCITY, 1);
        assert!((f1 - 0.5427e9).abs() < 1.0);
        assert!((cloaking_frequency(d, CODEX_VELOCITY, 3) - 3.0 * f1).abs() < 1e-3);
    }

    #[test]
    fn coupling_scales_with_gap_over_dimension() {
        let c = jahn_teller_coupling("test", 1.0, 1e9, 1.0).unwrap();
        assert!((c.coupling_strength - ELEMENTARY_CHARGE / NM).abs() < 1e-15);
        let expected = c.coupling_strength / (HBAR * 2.0 * PI * 1e9);
        assert!((c.dimensionless_g - expected).abs() / expected < 1e-12);
        assert!(c.is_strong());
        assert!(jahn_teller_coupling("bad", 0.0, 1e9, 1.0).is_err());
    }

    #[test]
    fn phase_difference_is_folded_below_pi() {
        // Sum phase 1.6π against target 0 folds to 0.4π.
        let m = phase_matching("fold", 0.5e9, 0.3e9, 1e9, 1e-9).unwrap();
        assert!((m.phase_difference - 0.4 * PI).abs() < 1e-9);
        assert!((m.match_quality - 0.4).abs() < 1e-9);
        assert!((m.frequency_error_percent - 20.0).abs() < 1e-9);
        assert!(!m.synthesis_works());
    }

    #[test]
    fn reference_cases_split_at_ten_percent() {
        let v = TheoryValidation::run().unwrap();
        assert!(v.velocity_agrees());
        assert!(v.scale_invariance.iter().all(|p| (p.product - CODEX_VELOCITY).abs() < 1e-9));
        assert!((v.scale_invariance[0].frequency_ghz - 5.427).abs() < 1e-9);
        assert_eq!(v.cloaking_modes.len(), 5);

        let works: Vec<bool> = v.phase_matches.iter().map(PhaseMatch::synthesis_works).collect();
        assert_eq!(works, [true, true, false]);
        assert!(v.phase_matches[0].phase_difference < 1e-9);
        assert!((v.phase_matches[1].match_quality - 0.06).abs() < 1e-9);
        assert!((v.phase_matches[2].frequency_error_percent - 20.0).abs() < 1e-9);

        assert!(v.couplings.iter().all(VibronicCoupling::is_strong));

        assert_eq!(v.chart_series().len(), 2);
        let report = v.to_string();
        assert!(report.contains("PREDICTION 4"));
        assert!(report.contains("❌ Synthesis unlikely"));
    }
}
