//! Cross-check of time-domain (`1 / 2πτ`) and space-domain (`c / 4d`)
//! frequency predictions on systems where both a size and a timescale are known.

use super::predict_optimal_frequency;
use crate::core::io::export::ChartSeries;
use crate::core::numeric::mean;
use crate::engine::text;
use rayon::prelude::*;
use serde::Serialize;
use std::f64::consts::PI;
use std::fmt;

pub const LAYER_1_VELOCITY: f64 = 54.27;
pub const LAYER_2_VELOCITY: f64 = 343.0;
pub const LAYER_3_VELOCITY_RANGE: (f64, f64) = (1500.0, 5000.0);

const PERFECT_ERROR: f64 = 10.0;
const GOOD_ERROR: f64 = 50.0;
const EXCELLENT_CROSS_ERROR: f64 = 20.0;
const SELF_CONSISTENT_FRACTION: f64 = 0.6;

/// Propagation layer that sets the effective velocity of a space-domain prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VelocityLayer {
    /// Thermodynamic solitons, 54.27 m/s.
    Information,
    /// EM-acoustic coupling, 343 m/s.
    Energy,
    /// Acoustic phonons, 1500 to 5000 m/s.
    Force,
}

impl VelocityLayer {
    pub const fn number(self) -> u8 {
        match self {
            Self::Information => 1,
            Self::Energy => 2,
            Self::Force => 3,
        }
    }

    /// Layer 3 uses the midpoint of its range.
    pub fn velocity_ms(self) -> f64 {
        match self {
            Self::Information => LAYER_1_VELOCITY,
            Self::Energy => LAYER_2_VELOCITY,
            Self::Force => (LAYER_3_VELOCITY_RANGE.0 + LAYER_3_VELOCITY_RANGE.1) / 2.0,
        }
    }

    /// Layer whose band contains `velocity_ms`, if any.
    pub fn from_velocity(velocity_ms: f64) -> Option<Self> {
        if (40.0..=70.0).contains(&velocity_ms) {
            Some(Self::Information)
        } else if (200.0..=500.0).contains(&velocity_ms) {
            Some(Self::Energy)
        } else if velocity_ms >= 1000.0 {
            Some(Self::Force)
        } else {
            None
        }
    }
}

impl fmt::Display for VelocityLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceSystem {
    pub name: &'static str,
    pub dimension_m: f64,
    pub timescale_s: f64,
    pub measured_hz: f64,
    pub expected_layer: VelocityLayer,
    pub reference: &'static str,
}

pub const REFERENCE_SYSTEMS: [ReferenceSystem; 7] = [
    ReferenceSystem {
        name: "Nerve Action Potential",
        dimension_m: 10e-9,
        timescale_s: 1e-3,
        measured_hz: 50.0,
        expected_layer: VelocityLayer::Information,
        reference: "Heimburg & Jackson (2005)",
    },
    ReferenceSystem {
        name: "DNA Helix Resonance",
        dimension_m: 2.55e-9,
        timescale_s: 30e-12,
        measured_hz: 34e9,
        expected_layer: VelocityLayer::Energy,
        reference: "Singh et al. (2018)",
    },
    ReferenceSystem {
        name: "Microtubule Oscillation",
        dimension_m: 25e-9,
        timescale_s: 50e-12,
        measured_hz: 3e9,
        expected_layer: VelocityLayer::Energy,
        reference: "Pokorný et al. (2014)",
    },
    ReferenceSystem {
        name: "Ion Channel Gating",
        dimension_m: 2.8e-10,
        timescale_s: 1e-6,
        measured_hz: 159e3,
        expected_layer: VelocityLayer::Information,
        reference: "Hille (2001)",
    },
    ReferenceSystem {
        name: "Protein Acoustic Phonons",
        dimension_m: 5e-9,
        timescale_s: 1e-12,
        measured_hz: 1e12,
        expected_layer: VelocityLayer::Force,
        reference: "Brillouin scattering data",
    },
    ReferenceSystem {
        name: "Cardiac Myocyte Contraction",
        dimension_m: 100e-6,
        timescale_s: 300e-3,
        measured_hz: 1.0,
        expected_layer: VelocityLayer::Information,
        reference: "Clinical measurement",
    },
    ReferenceSystem {
        name: "TTFields Cancer Therapy",
        dimension_m: 15e-6,
        timescale_s: 0.8e-3,
        measured_hz: 200e3,
        expected_layer: VelocityLayer::Energy,
        reference: "Novocure Ltd.",
    },
];

pub fn predict_from_dimension(dimension_m: f64, layer: VelocityLayer) -> f64 {
    layer.velocity_ms() / (4.0 * dimension_m)
}

/// Velocity at which both predictions coincide: `2d / (πτ)`.
pub fn implied_velocity(dimension_m: f64, timescale_s: f64) -> f64 {
    2.0 * dimension_m / (PI * timescale_s)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum CrossVerdict {
    PerfectMatch,
    GoodAgreement,
    PartialMatch,
    Mismatch,
}

impl CrossVerdict {
    pub fn classify(error_time: f64, error_space: f64) -> Self {
        if error_time < PERFECT_ERROR && error_space < PERFECT_ERROR {
            Self::PerfectMatch
        } else if error_time < GOOD_ERROR && error_space < GOOD_ERROR {
            Self::GoodAgreement
        } else if error_time < GOOD_ERROR || error_space < GOOD_ERROR {
            Self::PartialMatch
        } else {
            Self::Mismatch
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PerfectMatch => "PERFECT MATCH",
            Self::GoodAgreement => "GOOD AGREEMENT",
            Self::PartialMatch => "PARTIAL MATCH",
            Self::Mismatch => "MISMATCH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrossCheck {
    pub system: ReferenceSystem,
    pub f_time_hz: f64,
    pub f_space_hz: f64,
    /// Errors as a percentage of the measured frequency.
    pub error_time_percent: f64,
    pub error_space_percent: f64,
    pub error_cross_percent: f64,
    pub implied_velocity_ms: f64,
    pub implied_layer: Option<VelocityLayer>,
    pub verdict: CrossVerdict,
}

impl CrossCheck {
    pub fn evaluate(system: &ReferenceSystem) -> Self {
        let f_time_hz = predict_optimal_frequency(system.timescale_s);
        let f_space_hz = predict_from_dimension(system.dimension_m, system.expected_layer);
        let measured = system.measured_hz;
        let error_time_percent = (f_time_hz - measured).abs() / measured * 100.0;
        let error_space_percent = (f_space_hz - measured).abs() / measured * 100.0;
        let implied_velocity_ms = implied_velocity(system.dimension_m, system.timescale_s);

        Self {
            system: *system,
            f_time_hz,
            f_space_hz,
            error_time_percent,
            error_space_percent,
            error_cross_percent: (f_time_hz - f_space_hz).abs() / measured * 100.0,
            implied_velocity_ms,
            implied_layer: VelocityLayer::from_velocity(implied_velocity_ms),
            verdict: CrossVerdict::classify(error_time_percent, error_space_percent),
        }
    }

    pub fn layer_matches(&self) -> bool {
        self.implied_layer == Some(self.system.expected_layer)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossValidation {
    pub checks: Vec<CrossCheck>,
}

impl CrossValidation {
    pub fn run() -> Self {
        Self::over(&REFERENCE_SYSTEMS)
    }

    pub fn over(systems: &[ReferenceSystem]) -> Self {
        Self {
            checks: systems.par_iter().map(CrossCheck::evaluate).collect(),
        }
    }

    pub fn count(&self, verdict: CrossVerdict) -> usize {
        self.checks.iter().filter(|c| c.verdict == verdict).count()
    }

    pub fn correct_layers(&self) -> usize {
        self.checks.iter().filter(|c| c.layer_matches()).count()
    }

    fn average(&self, pick: impl Fn(&CrossCheck) -> f64) -> f64 {
        let values: Vec<f64> = self.checks.iter().map(pick).collect();
        mean(&values).unwrap_or(0.0)
    }

    pub fn average_time_error(&self) -> f64 {
        self.average(|c| c.error_time_percent)
    }

    pub fn average_space_error(&self) -> f64 {
        self.average(|c| c.error_space_percent)
    }

    pub fn average_cross_error(&self) -> f64 {
        self.average(|c| c.error_cross_percent)
    }

    /// At least 60% of systems agree perfectly.
    pub fn is_self_consistent(&self) -> bool {
        !self.checks.is_empty()
            && self.count(CrossVerdict::PerfectMatch) as f64
                >= SELF_CONSISTENT_FRACTION * self.checks.len() as f64
    }

    /// Predicted-vs-measured scatter for both domains and implied velocity per system.
    pub fn chart_series(&self) -> Vec<ChartSeries> {
        let mut time = ChartSeries::new("time_domain_vs_measured_hz");
        let mut space = ChartSeries::new("space_domain_vs_measured_hz");
        let mut velocity = ChartSeries::new("implied_velocity_by_system");
        for (i, c) in self.checks.iter().enumerate() {
            time.push(c.system.measured_hz, c.f_time_hz);
            space.push(c.system.measured_hz, c.f_space_hz);
            velocity.push(i as f64, c.implied_velocity_ms);
        }
        vec![time, space, velocity]
    }
}

impl fmt::Display for CrossValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f, "CODEX UNIFIED VALIDATOR - TIME ↔ SPACE DOMAIN CROSS-CHECK")?;
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f)?;
        writeln!(f, "📐 PREDICTION METHODS:")?;
        writeln!(f, "   TIME-DOMAIN:  f = 1/(2π·tau)")?;
        writeln!(f, "   SPACE-DOMAIN: f = c_eff/(4·d)")?;
        writeln!(f)?;
        writeln!(f, "{}", text::rule('-', 80))?;

        for c in &self.checks {
            writeln!(f)?;
            writeln!(f, "{}", c.system.name)?;
            writeln!(f, "   Reference: {}", c.system.reference)?;
            writeln!(f, "   Expected Layer: {}", c.system.expected_layer)?;
            writeln!(
                f,
                "   Time-Domain:  {:.2e} Hz (error: {:.1}%)",
                c.f_time_hz, c.error_time_percent
            )?;
            writeln!(
                f,
                "   Space-Domain: {:.2e} Hz (error: {:.1}%)",
                c.f_space_hz, c.error_space_percent
            )?;
            writeln!(f, "   Measured:     {:.2e} Hz", c.system.measured_hz)?;
            writeln!(f, "   Cross-Check Error: {:.1}%", c.error_cross_percent)?;
            let layer = c
                .implied_layer
                .map_or_else(|| "none".to_string(), |l| l.to_string());
            writeln!(
                f,
                "   Implied Velocity: {:.1} m/s → Layer {layer}",
                c.implied_velocity_ms
            )?;
            writeln!(f, "   Verdict: {}", c.verdict.label())?;
        }

        let n = self.checks.len();
        let pct = |k: usize| k as f64 / n.max(1) as f64 * 100.0;
        writeln!(f)?;
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f, "SUMMARY STATISTICS")?;
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f)?;
        for verdict in [
            CrossVerdict::PerfectMatch,
            CrossVerdict::GoodAgreement,
            CrossVerdict::PartialMatch,
            CrossVerdict::Mismatch,
        ] {
            let k = self.count(verdict);
            writeln!(f, "   {:<18} {k}/{n} ({:.1}%)", verdict.label(), pct(k))?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "   Average Error (Time-Domain):  {:.1}%",
            self.average_time_error()
        )?;
        writeln!(
            f,
            "   Average Error (Space-Domain): {:.1}%",
            self.average_space_error()
        )?;
        let cross = self.average_cross_error();
        writeln!(f, "   Average Cross-Check Error:    {cross:.1}%")?;
        let layers = self.correct_layers();
        writeln!(
            f,
            "   Layer Classification Accuracy: {layers}/{n} ({:.1}%)",
            pct(layers)
        )?;

        writeln!(f)?;
        writeln!(f, "💡 INTERPRETATION:")?;
        if cross < EXCELLENT_CROSS_ERROR {
            writeln!(f, "   ✅ EXCELLENT: Time and space domains are highly consistent.")?;
        } else if cross < GOOD_ERROR {
            writeln!(f, "   ⚠️ MODERATE: Some discrepancies between time and space domains.")?;
        } else {
            writeln!(f, "   ❌ POOR: Significant inconsistencies detected.")?;
        }
        writeln!(f)?;
        writeln!(f, "💡 CONCLUSION:")?;
        if self.is_self_consistent() {
            writeln!(
                f,
                "   ✅ The framework is SELF-CONSISTENT across time and space domains."
            )
        } else {
            writeln!(f, "   ⚠️ Inconsistencies detected. Further refinement needed.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implied_velocity_reconciles_both_domains() {
        let (d, tau) = (10e-9, 1e-3);
        let v = implied_velocity(d, tau);
        let f_space = v / (4.0 * d);
        assert!((f_space - predict_optimal_frequency(tau)).abs() < 1e-9);
    }

    #[test]
    fn layer_bands() {
        assert_eq!(VelocityLayer::from_velocity(54.27), Some(VelocityLayer::Information));
        assert_eq!(VelocityLayer::from_velocity(343.0), Some(VelocityLayer::Energy));
        assert_eq!(VelocityLayer::from_velocity(2000.0), Some(VelocityLayer::Force));
        assert_eq!(VelocityLayer::from_velocity(100.0), None);
        assert_eq!(VelocityLayer::Force.velocity_ms(), 3250.0);
    }

    #[test]
    fn verdict_bands() {
        assert_eq!(CrossVerdict::classify(5.0, 9.9), CrossVerdict::PerfectMatch);
        assert_eq!(CrossVerdict::classify(10.0, 5.0), CrossVerdict::GoodAgreement);
        assert_eq!(CrossVerdict::classify(60.0, 49.0), CrossVerdict::PartialMatch);
        assert_eq!(CrossVerdict::classify(50.0, 50.0), CrossVerdict::Mismatch);
    }

    #[test]
    fn nerve_potential_is_a_space_domain_mismatch() {
        let check = CrossCheck::evaluate(&REFERENCE_SYSTEMS[0]);
        assert!((check.f_space_hz - 54.27 / 40e-9).abs() < 1e-3);
        assert_eq!(check.verdict, CrossVerdict::Mismatch);
    }

    #[test]
    fn run_covers_reference_systems_in_order() {
        let v = CrossValidation::run();
        assert_eq!(v.checks.len(), 7);
        assert_eq!(v.checks[6].system.name, "TTFields Cancer Therapy");
        let total: usize = [
            CrossVerdict::PerfectMatch,
            CrossVerdict::GoodAgreement,
            CrossVerdict::PartialMatch,
            CrossVerdict::Mismatch,
        ]
        .into_iter()
        .map(|verdict| v.count(verdict))
        .sum();
        assert_eq!(total, 7);
        assert_eq!(v.chart_series()[2].points.len(), 7);
        assert!(v.to_string().contains("SUMMARY STATISTICS"));
    }
}
