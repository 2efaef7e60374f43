//! # Timescale Resonance
//!
//! Time-domain counterpart to the dimension-based models: a system with
//! characteristic timescale `τ` couples best to `f = 1 / (2πτ)`, and the
//! dimensionless `ρ = 2πfτ` must fall inside the therapeutic window.
//!
//! - [`clinical`] checks the rule against established therapies and tunes it per patient.
//! - [`composite`] models multi-timescale cells and searches for selective drive frequencies.
//! - [`cross_validation`] compares time-domain and quarter-wave predictions on reference systems.

use crate::core::numeric::local_maxima;
use serde::Serialize;
use std::f64::consts::PI;

pub mod clinical;
pub mod composite;
pub mod cross_validation;

pub const THERAPEUTIC_WINDOW: (f64, f64) = (0.7, 3.0);
pub const DEFAULT_PEAK_THRESHOLD: f64 = 0.5;

pub fn predict_optimal_frequency(tau_s: f64) -> f64 {
    1.0 / (2.0 * PI * tau_s)
}

pub fn resonance_parameter(frequency_hz: f64, tau_s: f64) -> f64 {
    2.0 * PI * frequency_hz * tau_s
}

/// `ρ` inside the inclusive therapeutic window.
pub fn validate_resonance_condition(frequency_hz: f64, tau_s: f64) -> bool {
    let rho = resonance_parameter(frequency_hz, tau_s);
    (THERAPEUTIC_WINDOW.0..=THERAPEUTIC_WINDOW.1).contains(&rho)
}

/// One relaxation channel of a multi-timescale system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimescaleComponent {
    pub tau_s: f64,
    pub weight: f64,
    /// Selectivity exponent.
    pub power: f64,
}

impl TimescaleComponent {
    pub fn new(tau_s: f64) -> Self {
        Self {
            tau_s,
            weight: 1.0,
            power: 2.0,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    fn response(&self, frequency_hz: f64) -> f64 {
        let rho = resonance_parameter(frequency_hz, self.tau_s);
        self.weight / (1.0 + rho.powf(self.power))
    }
}

/// `R(f) = Σ wᵢ / (1 + (2πfτᵢ)^pᵢ)` at each frequency.
pub fn composite_response(frequencies: &[f64], components: &[TimescaleComponent]) -> Vec<f64> {
    frequencies
        .iter()
        .map(|&f| components.iter().map(|c| c.response(f)).sum())
        .collect()
}

/// `(frequency, response)` at each local maximum above `threshold × max`.
pub fn identify_resonance_peaks(
    frequencies: &[f64],
    response: &[f64],
    threshold: f64,
) -> Vec<(f64, f64)> {
    local_maxima(response, threshold)
        .into_iter()
        .filter_map(|i| frequencies.get(i).map(|&f| (f, response[i])))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optimal_frequency_for_one_millisecond() {
        assert!((predict_optimal_frequency(0.001) - 159.154_943_091_895_35).abs() < 1e-9);
    }

    #[test]
    fn optimal_frequency_has_unit_rho() {
        let tau = 4e-3;
        let f = predict_optimal_frequency(tau);
        assert!((resonance_parameter(f, tau) - 1.0).abs() < 1e-12);
        assert!(validate_resonance_condition(f, tau));
    }

    #[test]
    fn window_edges() {
        let tau = 1.0;
        assert!(validate_resonance_condition(0.7 / (2.0 * PI), tau));
        assert!(!validate_resonance_condition(0.5 / (2.0 * PI), tau));
        assert!(!validate_resonance_condition(3.1 / (2.0 * PI), tau));
    }

    #[test]
    fn composite_response_is_weighted_lorentzian_sum() {
        let comps = [
            TimescaleComponent::new(0.001),
            TimescaleComponent::new(0.1).with_weight(0.8),
        ];
        let f = predict_optimal_frequency(0.001);
        let r = composite_response(&[0.0, f], &comps);
        assert!((r[0] - 1.8).abs() < 1e-12);
        let expected = 0.5 + 0.8 / (1.0 + 100.0f64.powi(2));
        assert!((r[1] - expected).abs() < 1e-12);
    }

    #[test]
    fn peaks_pair_frequency_with_response() {
        let freqs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let resp = [0.1, 0.9, 0.2, 0.3, 0.1];
        assert_eq!(
            identify_resonance_peaks(&freqs, &resp, 0.5),
            vec![(2.0, 0.9)]
        );
    }
}
