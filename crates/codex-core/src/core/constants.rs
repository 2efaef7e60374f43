//! Physical and framework constants shared across every resonance model.

/// Frequency-dimension product in GHz·Å.
pub const RARAMA_CONSTANT_GHZ_ANGSTROM: f64 = 542.7;
/// Characteristic propagation velocity in m/s.
pub const CODEX_VELOCITY: f64 = 54.27;
/// The RaRaMa constant expressed in SI units (Hz·m).
pub const FREQUENCY_DEPTH_CONSTANT: f64 = 54.27;

pub const PHI: f64 = 1.618_033_988_749_895;

pub const SPEED_OF_LIGHT: f64 = 2.998e8;
pub const PLANCK: f64 = 6.626e-34;
pub const HBAR: f64 = PLANCK / (2.0 * std::f64::consts::PI);
pub const BOLTZMANN: f64 = 1.381e-23;
pub const VACUUM_PERMEABILITY: f64 = 4.0 * std::f64::consts::PI * 1e-7;
pub const VACUUM_PERMITTIVITY: f64 = 8.854e-12;
pub const ELECTRON_MASS: f64 = 9.109e-31;
pub const ELEMENTARY_CHARGE: f64 = 1.602e-19;
pub const PROTON_MASS: f64 = 1.673e-27;
pub const ATOMIC_MASS_UNIT: f64 = 1.66054e-27;
/// Kelvin per electron-volt.
pub const KELVIN_PER_EV: f64 = 11604.5;

/// Effective electromagnetic propagation speeds (m/s) used by the quarter-wave model.
pub mod propagation {
    pub const LIGHT: f64 = 3.0e8;
    pub const AQUEOUS: f64 = 2.25e8;
    pub const CYTOPLASM: f64 = 2.17e8;
    pub const MEMBRANE: f64 = 2.04e8;
    pub const STRUCTURED_WATER: f64 = 1.8e8;
}

/// Longitudinal sound speeds (m/s) for capsid breathing modes.
pub mod sound {
    pub const PROTEIN: f64 = 2500.0;
    pub const WATER: f64 = 1500.0;
    pub const LIPID: f64 = 1400.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rarama_constant_matches_si_form() {
        let si = RARAMA_CONSTANT_GHZ_ANGSTROM * 1e9 * 1e-10;
        assert!((si - FREQUENCY_DEPTH_CONSTANT).abs() < 1e-9);
    }

    #[test]
    fn hbar_is_planck_over_two_pi() {
        assert!((HBAR * 2.0 * std::f64::consts::PI - PLANCK).abs() < 1e-45);
    }
}
