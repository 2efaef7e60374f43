//! Multi-frequency "chord" therapy: cancer and normal cells as sets of coupled
//! timescales, compared across a log-spaced frequency sweep.

use super::{
    DEFAULT_PEAK_THRESHOLD, TimescaleComponent, composite_response, identify_resonance_peaks,
    predict_optimal_frequency, resonance_parameter,
};
use crate::core::io::export::ChartSeries;
use crate::core::numeric::logspace;
use crate::engine::text;
use serde::Serialize;
use std::fmt;

pub const SWEEP_POINTS: usize = 1000;
/// log10 of the sweep bounds, 0.1 Hz to 100 kHz.
pub const SWEEP_EXPONENTS: (f64, f64) = (-1.0, 5.0);
pub const GOOD_SELECTIVITY: f64 = 2.0;
const RATIO_EPSILON: f64 = 1e-10;

const CHANNELS: [&str; 3] = ["membrane", "cytoskeleton", "tubulin"];
const CANCER_TAUS: [f64; 3] = [0.001, 0.1, 10e-6];
const NORMAL_TAUS: [f64; 3] = [0.005, 0.2, 50e-6];
const CHANNEL_WEIGHTS: [f64; 3] = [1.0, 0.8, 1.2];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelTarget {
    pub channel: &'static str,
    pub tau_s: f64,
    pub frequency_hz: f64,
    pub rho: f64,
}

fn targets(taus: &[f64; 3]) -> Vec<ChannelTarget> {
    CHANNELS
        .iter()
        .zip(taus)
        .map(|(&channel, &tau_s)| {
            let frequency_hz = predict_optimal_frequency(tau_s);
            ChannelTarget {
                channel,
                tau_s,
                frequency_hz,
                rho: resonance_parameter(frequency_hz, tau_s),
            }
        })
        .collect()
}

fn components(taus: &[f64; 3]) -> Vec<TimescaleComponent> {
    taus.iter()
        .zip(CHANNEL_WEIGHTS)
        .map(|(&tau, w)| TimescaleComponent::new(tau).with_weight(w))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeTherapy {
    pub cancer_targets: Vec<ChannelTarget>,
    pub normal_targets: Vec<ChannelTarget>,
    pub frequencies: Vec<f64>,
    pub cancer_response: Vec<f64>,
    pub normal_response: Vec<f64>,
    pub cancer_peaks: Vec<(f64, f64)>,
    pub normal_peaks: Vec<(f64, f64)>,
    pub max_selectivity: f64,
    pub optimal_frequency_hz: f64,
}

impl CompositeTherapy {
    pub fn run() -> Self {
        let frequencies = logspace(SWEEP_EXPONENTS.0, SWEEP_EXPONENTS.1, SWEEP_POINTS);
        let cancer_response = composite_response(&frequencies, &components(&CANCER_TAUS));
        let normal_response = composite_response(&frequencies, &components(&NORMAL_TAUS));

        let (max_selectivity, optimal_frequency_hz) = frequencies
            .iter()
            .zip(cancer_response.iter().zip(&normal_response))
            .filter(|(_, (c, _))| **c > 0.0)
            .map(|(&f, (c, n))| (c / (n + RATIO_EPSILON), f))
            .fold((f64::NEG_INFINITY, 0.0), |best, cur| {
                if cur.0 > best.0 { cur } else { best }
            });

        Self {
            cancer_targets: targets(&CANCER_TAUS),
            normal_targets: targets(&NORMAL_TAUS),
            cancer_peaks: identify_resonance_peaks(
                &frequencies,
                &cancer_response,
                DEFAULT_PEAK_THRESHOLD,
            ),
            normal_peaks: identify_resonance_peaks(
                &frequencies,
                &normal_response,
                DEFAULT_PEAK_THRESHOLD,
            ),
            frequencies,
            cancer_response,
            normal_response,
            max_selectivity,
            optimal_frequency_hz,
        }
    }

    pub fn is_selective(&self) -> bool {
        self.max_selectivity > GOOD_SELECTIVITY
    }

    /// Cancer, normal, and selectivity curves over the sweep.
    pub fn chart_series(&self) -> Vec<ChartSeries> {
        let pair = |name: &str, ys: &[f64]| {
            ChartSeries::from_points(
                name,
                self.frequencies.iter().copied().zip(ys.iter().copied()).collect(),
            )
        };
        let selectivity: Vec<f64> = self
            .cancer_response
            .iter()
            .zip(&self.normal_response)
            .map(|(c, n)| c / (n + RATIO_EPSILON))
            .collect();
        vec![
            pair("cancer_response_vs_hz", &self.cancer_response),
            pair("normal_response_vs_hz", &self.normal_response),
            pair("selectivity_vs_hz", &selectivity),
        ]
    }
}

fn write_targets(f: &mut fmt::Formatter<'_>, targets: &[ChannelTarget], rho: bool) -> fmt::Result {
    for t in targets {
        write!(
            f,
            "   {:<15}: τ = {:.3} ms → f = {:.1} Hz",
            t.channel,
            t.tau_s * 1e3,
            t.frequency_hz
        )?;
        if rho {
            write!(f, " (ρ = {:.2})", t.rho)?;
        }
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for CompositeTherapy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f, "STRESS TEST: CODEX COMPOSITE-FIELD THERAPY (CCFT)")?;
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f)?;
        writeln!(f, "📊 PREDICTED FREQUENCIES:")?;
        writeln!(f)?;
        writeln!(f, "Cancer Cell Targets:")?;
        write_targets(f, &self.cancer_targets, true)?;
        writeln!(f)?;
        writeln!(f, "Normal Cell (Off-Target):")?;
        write_targets(f, &self.normal_targets, false)?;

        writeln!(f)?;
        writeln!(f, "🔬 COMPOSITE RESPONSE ANALYSIS:")?;
        for (label, peaks) in [("Cancer", &self.cancer_peaks), ("Normal", &self.normal_peaks)] {
            writeln!(f)?;
            writeln!(
                f,
                "   {label} cell resonance peaks: {} found",
                peaks.len()
            )?;
            for (freq, r) in peaks.iter().take(3) {
                writeln!(f, "      f = {freq:.1} Hz, response = {r:.3}")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "⚖️ SELECTIVITY ANALYSIS:")?;
        writeln!(
            f,
            "   Maximum selectivity: {:.2}× at f = {:.1} Hz",
            self.max_selectivity, self.optimal_frequency_hz
        )?;
        if self.is_selective() {
            writeln!(f, "   ✓ GOOD: >2× selectivity for cancer vs normal")
        } else {
            writeln!(f, "   ✗ POOR: <2× selectivity - insufficient targeting")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_spans_six_decades() {
        let therapy = CompositeTherapy::run();
        assert_eq!(therapy.frequencies.len(), SWEEP_POINTS);
        assert!((therapy.frequencies[0] - 0.1).abs() < 1e-12);
        assert!((therapy.frequencies[SWEEP_POINTS - 1] - 1e5).abs() < 1e-6);
    }

    #[test]
    fn low_frequency_response_is_total_weight() {
        let therapy = CompositeTherapy::run();
        assert!(therapy.cancer_response[0] <= 3.0);
        assert!(therapy.cancer_response[0] > 2.5);
    }

    #[test]
    fn selectivity_favors_shorter_cancer_timescales() {
        let therapy = CompositeTherapy::run();
        assert!(therapy.max_selectivity > 1.0);
        assert!(therapy.optimal_frequency_hz > 0.1);
        assert_eq!(therapy.cancer_targets.len(), 3);
        assert!((therapy.cancer_targets[0].rho - 1.0).abs() < 1e-12);
    }

    #[test]
    fn chart_series_cover_sweep() {
        let series = CompositeTherapy::run().chart_series();
        assert_eq!(series.len(), 3);
        assert!(series.iter().all(|s| s.points.len() == SWEEP_POINTS));
    }
}
