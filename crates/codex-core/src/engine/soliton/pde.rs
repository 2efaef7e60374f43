//! Explicit finite-difference integration of the coupled membrane equations
//!
//! ```text
//! ∂²ρ/∂t² = (c₀² + pρ + qρ²) ∂²ρ/∂x² − h ∂⁴ρ/∂x⁴
//! ∂V/∂t   = D ∂²V/∂x² − α ∂ρ/∂t
//! ```
//!
//! on a fixed-boundary line, starting from a Gaussian density pulse at rest.

use super::membrane::MembraneFluidity;
use super::{ALPHA_COUPLING, D_DIFFUSION, H_DISPERSION, Q_NORMAL};
use crate::core::numeric::linspace;
use crate::engine::config::PdeConfig;
use crate::engine::error::EngineError;
use nalgebra::DVector;
use serde::Serialize;
use tracing::{debug, warn};

const SOLITON_MIN_AMPLITUDE: f64 = 1e-3;
const MIN_TRACKED_STEPS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PdeCoefficients {
    pub c0: f64,
    pub p: f64,
    pub q: f64,
    pub h: f64,
    pub diffusion: f64,
    pub coupling: f64,
}

impl PdeCoefficients {
    /// Default nonlinear and electrical terms with the membrane's adjusted sound speed and modulus.
    pub fn for_membrane(membrane: &MembraneFluidity) -> Self {
        Self {
            c0: membrane.adjusted_c0,
            p: membrane.adjusted_modulus,
            q: Q_NORMAL,
            h: H_DISPERSION,
            diffusion: D_DIFFUSION,
            coupling: ALPHA_COUPLING,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolitonProperties {
    /// Peak |ρ| over the whole run.
    pub amplitude: f64,
    /// FWHM of the final profile.
    pub width_m: f64,
    /// Peak-tracking velocity.
    pub velocity_ms: f64,
    /// `Σ ρ² dx` of the final profile.
    pub energy: f64,
    pub peak_voltage: f64,
    pub has_soliton: bool,
    /// The field went non-finite and integration stopped early.
    pub diverged: bool,
    pub steps_completed: usize,
}

/// First-order accurate gradient: central in the interior, one-sided at both ends.
fn gradient(f: &DVector<f64>, dx: f64) -> DVector<f64> {
    let n = f.len();
    DVector::from_fn(n, |i, _| {
        if i == 0 {
            (f[1] - f[0]) / dx
        } else if i == n - 1 {
            (f[n - 1] - f[n - 2]) / dx
        } else {
            (f[i + 1] - f[i - 1]) / (2.0 * dx)
        }
    })
}

fn second_derivative(f: &DVector<f64>, dx: f64) -> DVector<f64> {
    gradient(&gradient(f, dx), dx)
}

fn is_finite(v: &DVector<f64>) -> bool {
    v.iter().all(|x| x.is_finite())
}

fn clamp_boundaries(v: &mut DVector<f64>) {
    let n = v.len();
    v[0] = 0.0;
    v[n - 1] = 0.0;
}

fn argmax(v: &DVector<f64>) -> usize {
    let mut best = 0;
    for (i, x) in v.iter().enumerate() {
        if *x > v[best] {
            best = i;
        }
    }
    best
}

pub fn solve(
    coeffs: &PdeCoefficients,
    config: &PdeConfig,
) -> Result<SolitonProperties, EngineError> {
    config.validate()?;
    let n = config.grid_points;
    let length = config.domain_length_m;
    let dx = length / (n - 1) as f64;
    let dt = config.t_max_s / (config.time_steps - 1) as f64;
    let dt2 = dt * dt;

    let x0 = length / 2.0;
    let sigma = length / 20.0;
    let initial: Vec<f64> = linspace(0.0, length, n)
        .into_iter()
        .map(|x| config.initial_amplitude * (-(x - x0).powi(2) / (2.0 * sigma * sigma)).exp())
        .collect();

    let mut prev = DVector::from_vec(initial);
    let mut rho = prev.clone();
    let mut voltage = DVector::<f64>::zeros(n);

    let mut amplitude = rho.amax();
    let mut peaks = vec![argmax(&rho)];
    let mut elapsed = 0.0;
    let mut diverged = false;

    for step in 0..config.time_steps - 1 {
        let d2rho = second_derivative(&rho, dx);
        let d4rho = second_derivative(&d2rho, dx);
        let d2v = second_derivative(&voltage, dx);

        let mut next = if step == 0 {
            rho.clone()
        } else {
            let stiffness = rho.map(|r| coeffs.c0 * coeffs.c0 + coeffs.p * r + coeffs.q * r * r);
            let accel = stiffness.component_mul(&d2rho) - d4rho * coeffs.h;
            &rho * 2.0 - &prev + accel * dt2
        };

        let drho_dt = if step == 0 {
            DVector::zeros(n)
        } else {
            (&next - &rho) / dt
        };
        voltage += (d2v * coeffs.diffusion - drho_dt * coeffs.coupling) * dt;

        clamp_boundaries(&mut next);
        clamp_boundaries(&mut voltage);

        if !is_finite(&next) || !is_finite(&voltage) {
            warn!(step, "Membrane field diverged; stopping integration");
            diverged = true;
            break;
        }

        amplitude = amplitude.max(next.amax());
        peaks.push(argmax(&next));
        elapsed = (step + 1) as f64 * dt;
        prev = std::mem::replace(&mut rho, next);
    }

    let half_max = amplitude / 2.0;
    let above: Vec<usize> = rho
        .iter()
        .enumerate()
        .filter(|(_, r)| **r > half_max)
        .map(|(i, _)| i)
        .collect();
    let width_m = match (above.first(), above.last()) {
        (Some(first), Some(last)) if above.len() > 1 => (last - first) as f64 * dx,
        _ => length / 10.0,
    };

    let velocity_ms = match (peaks.first(), peaks.last()) {
        (Some(first), Some(last)) if peaks.len() > MIN_TRACKED_STEPS && elapsed > 0.0 => {
            (*last as f64 - *first as f64) * dx / elapsed
        }
        _ => 0.0,
    };

    let properties = SolitonProperties {
        amplitude,
        width_m,
        velocity_ms,
        energy: rho.norm_squared() * dx,
        peak_voltage: voltage.amax(),
        has_soliton: !diverged && amplitude > SOLITON_MIN_AMPLITUDE && width_m < length / 2.0,
        diverged,
        steps_completed: peaks.len() - 1,
    };
    debug!(?properties, "Membrane PDE finished");
    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_wave() -> PdeCoefficients {
        PdeCoefficients {
            c0: 1.0,
            p: 0.0,
            q: 0.0,
            h: 0.0,
            diffusion: 0.0,
            coupling: 0.0,
        }
    }

    fn stable_config() -> PdeConfig {
        PdeConfig {
            domain_length_m: 1.0,
            grid_points: 101,
            initial_amplitude: 0.01,
            t_max_s: 0.1,
            time_steps: 101,
        }
    }

    #[test]
    fn gradient_is_exact_for_linear_data() {
        let f = DVector::from_vec(vec![0.0, 2.0, 4.0, 6.0, 8.0]);
        let g = gradient(&f, 1.0);
        assert!(g.iter().all(|v| (*v - 2.0).abs() < 1e-12));
    }

    #[test]
    fn gradient_uses_one_sided_edges() {
        let f = DVector::from_vec(vec![0.0, 1.0, 4.0, 9.0, 16.0]);
        let g = gradient(&f, 1.0);
        assert_eq!(g[0], 1.0);
        assert_eq!(g[2], 4.0);
        assert_eq!(g[4], 7.0);
    }

    #[test]
    fn stable_linear_run_keeps_pulse() {
        let props = solve(&linear_wave(), &stable_config()).unwrap();
        assert!(!props.diverged);
        assert_eq!(props.steps_completed, 100);
        assert!((props.amplitude - 0.01).abs() < 1e-3);
        assert!(props.width_m < 0.5);
        assert!(props.has_soliton);
        assert!(props.energy > 0.0);
    }

    #[test]
    fn unstable_run_is_flagged_as_diverged() {
        let coeffs = PdeCoefficients {
            c0: 1e6,
            ..linear_wave()
        };
        let props = solve(&coeffs, &stable_config()).unwrap();
        assert!(props.diverged);
        assert!(!props.has_soliton);
        assert!(props.steps_completed < 100);
    }

    #[test]
    fn invalid_grid_is_rejected() {
        let config = PdeConfig {
            grid_points: 3,
            ..stable_config()
        };
        assert!(solve(&linear_wave(), &config).is_err());
    }
}
