//! # Membrane Solitons
//!
//! Electromechanical pulse models for peptide-membrane interaction: Heimburg-Jackson
//! density solitons in the lipid bilayer, Davydov excitations along α-helices, and the
//! Fröhlich frequency-depth relation `f = F_D / d`.
//!
//! ## Pipeline
//!
//! 1. [`membrane`] derives insertion depth, resonant frequency, effective velocity,
//!    Davydov suitability, and cancer-specific membrane fluidity from a sequence.
//! 2. [`pde`] optionally integrates the coupled mechanical-electrical field equations.
//! 3. [`analyzer`] combines both into a [`analyzer::SolitonSolution`] with a feature map
//!    and an overall score, and runs the reference stress test.

use phf::{Map, phf_map};

pub mod analyzer;
pub mod membrane;
pub mod pde;

/// Baseline lateral sound speed in the membrane, m/s.
pub const C0_NORMAL: f64 = 50.0;
pub const C0_CANCER_MIN: f64 = 40.0;
pub const C0_CANCER_MAX: f64 = 80.0;
/// Quadratic elastic nonlinearity, Pa.
pub const P_NORMAL: f64 = 1.0e6;
/// Cubic elastic nonlinearity, Pa.
pub const Q_NORMAL: f64 = 1.0e12;
/// Fourth-order dispersion, m⁴/s².
pub const H_DISPERSION: f64 = 1.0e-20;
/// Voltage diffusion, m²/s.
pub const D_DIFFUSION: f64 = 1.0e-9;
/// Mechanoelectric coupling, V·s/m.
pub const ALPHA_COUPLING: f64 = 1.0e-3;
/// Fröhlich frequency-depth constant, Hz·m (542.7 GHz·Å).
pub const F_D_CONSTANT: f64 = 54.27;
pub const EXCITON_PHONON_COUPLING: f64 = 0.1;
/// Hz
pub const AMIDE_I_FREQUENCY: f64 = 1.65e12;

static FLUIDITY_MULTIPLIERS: Map<&'static str, f64> = phf_map! {
    "normal" => 1.0,
    "breast_cancer" => 1.8,
    "colon_cancer" => 2.2,
    "melanoma" => 2.8,
    "pancreatic_cancer" => 1.5,
    "glioblastoma" => 2.5,
};

/// Kyte-Doolittle hydropathy scale.
pub static KYTE_DOOLITTLE: Map<char, f64> = phf_map! {
    'I' => 4.5, 'V' => 4.2, 'L' => 3.8, 'F' => 2.8, 'C' => 2.5,
    'M' => 1.9, 'A' => 1.8, 'G' => -0.4, 'T' => -0.7, 'W' => -0.9,
    'S' => -0.8, 'Y' => -1.3, 'P' => -1.6, 'H' => -3.2, 'E' => -3.5,
    'Q' => -3.5, 'D' => -3.5, 'N' => -3.5, 'K' => -3.9, 'R' => -4.5,
};

/// Membrane fluidity relative to normal tissue; unknown tissue types are normal.
pub fn fluidity_multiplier(cancer_type: &str) -> f64 {
    let key = cancer_type.trim().to_lowercase().replace(' ', "_");
    FLUIDITY_MULTIPLIERS.get(key.as_str()).copied().unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fluidity_lookup_normalizes_names() {
        assert_eq!(fluidity_multiplier("Breast Cancer"), 1.8);
        assert_eq!(fluidity_multiplier("melanoma"), 2.8);
        assert_eq!(fluidity_multiplier("leukemia"), 1.0);
    }

    #[test]
    fn kyte_doolittle_covers_standard_residues() {
        assert_eq!(KYTE_DOOLITTLE.len(), 20);
        assert_eq!(KYTE_DOOLITTLE[&'I'], 4.5);
        assert_eq!(KYTE_DOOLITTLE[&'R'], -4.5);
    }
}
