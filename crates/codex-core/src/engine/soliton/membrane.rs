use super::{
    C0_NORMAL, EXCITON_PHONON_COUPLING, F_D_CONSTANT, KYTE_DOOLITTLE, P_NORMAL, fluidity_multiplier,
};
use crate::core::alphabet::AMINO_ACIDS;
use crate::engine::error::{EngineError, require_positive};
use serde::Serialize;

const HYDROPHOBIC: &[char] = &['I', 'V', 'L', 'F', 'C', 'M', 'A', 'W'];
const H_BOND_DONORS: &[char] = &['S', 'T', 'N', 'Q', 'K', 'R', 'H'];
/// Å of bilayer spanned per helical residue.
const RISE_PER_RESIDUE: f64 = 1.5;
const MIN_WINDOW: usize = 15;
const MAX_WINDOW: usize = 34;
const TM_RATIO: f64 = 0.6;

const FROHLICH_BAND_HZ: (f64, f64) = (20e9, 500e9);
const PHONON_BAND_HZ: (f64, f64) = (0.1e12, 3e12);

/// Rejects empty sequences and letters outside the standard residue alphabet.
pub fn validate_sequence(sequence: &str) -> Result<(), EngineError> {
    if sequence.is_empty() {
        return Err(EngineError::invalid("sequence", "sequence is empty"));
    }
    if let Some(c) = sequence.chars().find(|c| !AMINO_ACIDS.contains_key(c)) {
        return Err(EngineError::invalid(
            "sequence",
            format!("unknown amino acid '{c}'"),
        ));
    }
    Ok(())
}

fn is_hydrophobic(residue: &u8) -> bool {
    HYDROPHOBIC.contains(&(*residue as char))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertionDepth {
    /// Length of the best-scoring hydrophobic window.
    pub hydrophobic_stretch: usize,
    pub depth_angstrom: f64,
    pub depth_m: f64,
    /// Hydrophobic fraction of the whole sequence.
    pub hydrophobic_ratio: f64,
    /// Mean Kyte-Doolittle hydropathy.
    pub gravy: f64,
    pub transmembrane_probability: f64,
    pub notes: &'static str,
}

/// Finds the most membrane-like window and converts its length to an insertion depth.
///
/// Windows of 20 to 25 residues that reach the TM hydrophobic fraction compete on
/// hydrophobic count; every other window competes on fraction alone.
pub fn insertion_depth(sequence: &str) -> Result<InsertionDepth, EngineError> {
    validate_sequence(sequence)?;
    let residues = sequence.as_bytes();
    let len = residues.len();

    let mut best_len = 0usize;
    let mut best_count = 0usize;
    let mut best_ratio = 0.0f64;

    for window in MIN_WINDOW..=MAX_WINDOW.min(len) {
        for slice in residues.windows(window) {
            let count = slice.iter().filter(|r| is_hydrophobic(r)).count();
            let ratio = count as f64 / window as f64;
            let tm_candidate = (20..=25).contains(&window) && ratio >= TM_RATIO;
            if (tm_candidate && count > best_count) || (!tm_candidate && ratio > best_ratio) {
                best_len = window;
                best_count = count;
                best_ratio = ratio;
            }
        }
    }

    let total_hydrophobic = residues.iter().filter(|r| is_hydrophobic(r)).count();
    let overall_ratio = total_hydrophobic as f64 / len as f64;
    if best_len == 0 {
        best_len = len.min(20);
        best_ratio = overall_ratio;
    }

    let (transmembrane_probability, notes) = if best_len >= 20 && best_ratio >= TM_RATIO {
        (f64::min(1.0, best_ratio / TM_RATIO), "Strong TM helix candidate")
    } else if best_len >= MIN_WINDOW {
        (
            0.5 * (best_len as f64 / 20.0) * best_ratio,
            "Partial membrane insertion likely",
        )
    } else {
        (0.2 * best_ratio, "Shallow insertion / surface binding")
    };

    let depth_angstrom = best_len as f64 * RISE_PER_RESIDUE;
    let gravy = sequence
        .chars()
        .map(|c| KYTE_DOOLITTLE.get(&c).copied().unwrap_or(0.0))
        .sum::<f64>()
        / len as f64;

    Ok(InsertionDepth {
        hydrophobic_stretch: best_len,
        depth_angstrom,
        depth_m: depth_angstrom * 1e-10,
        hydrophobic_ratio: overall_ratio,
        gravy,
        transmembrane_probability,
        notes,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencyDepth {
    pub depth_m: f64,
    pub frequency_hz: f64,
    pub frequency_ghz: f64,
    pub frohlich_overlap: f64,
    pub phonon_overlap: f64,
    pub resonance_quality: f64,
}

/// 1 inside the band, otherwise the ratio of the frequency to the nearest edge.
fn band_overlap(f: f64, (low, high): (f64, f64)) -> f64 {
    if f < low {
        f / low
    } else if f > high {
        high / f
    } else {
        1.0
    }
}

pub fn frequency_depth(depth_m: f64) -> Result<FrequencyDepth, EngineError> {
    let depth = require_positive("insertion_depth_m", depth_m)?;
    let frequency_hz = F_D_CONSTANT / depth;
    let frohlich_overlap = band_overlap(frequency_hz, FROHLICH_BAND_HZ);
    let phonon_overlap = band_overlap(frequency_hz, PHONON_BAND_HZ);
    Ok(FrequencyDepth {
        depth_m: depth,
        frequency_hz,
        frequency_ghz: frequency_hz / 1e9,
        frohlich_overlap,
        phonon_overlap,
        resonance_quality: (frohlich_overlap + phonon_overlap) / 2.0,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VelocityRegime {
    Diffusion,
    HeimburgJackson,
    BoundaryLow,
    BoundaryHigh,
    Electromagnetic,
}

impl VelocityRegime {
    pub fn classify(velocity: f64) -> Self {
        if velocity < 10.0 {
            Self::Diffusion
        } else if (40.0..=80.0).contains(&velocity) {
            Self::HeimburgJackson
        } else if velocity < 40.0 {
            Self::BoundaryLow
        } else if velocity <= 150.0 {
            Self::BoundaryHigh
        } else {
            Self::Electromagnetic
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Diffusion => "Regime 1 (Diffusion)",
            Self::HeimburgJackson => "Regime 2 (Heimburg-Jackson soliton)",
            Self::BoundaryLow => "Regime 2 boundary (low)",
            Self::BoundaryHigh => "Regime 2 boundary (high)",
            Self::Electromagnetic => "Regime 3 (Electromagnetic)",
        }
    }

    pub const fn is_heimburg_jackson(self) -> bool {
        matches!(
            self,
            Self::HeimburgJackson | Self::BoundaryLow | Self::BoundaryHigh
        )
    }

    /// Match score in `[0.2, 1]`, linear across the boundary bands.
    pub fn score(self, velocity: f64) -> f64 {
        match self {
            Self::Diffusion => 0.2,
            Self::HeimburgJackson => 1.0,
            Self::BoundaryLow => 0.6 + 0.4 * (velocity - 10.0) / 30.0,
            Self::BoundaryHigh => 1.0 - 0.4 * (velocity - 80.0) / 70.0,
            Self::Electromagnetic => 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VelocityMatch {
    pub velocity_ms: f64,
    pub reorganization_time_s: f64,
    pub regime: VelocityRegime,
    pub score: f64,
}

/// Effective velocity `v = d / τ` and its regime.
pub fn velocity_match(
    depth_m: f64,
    reorganization_time_s: f64,
) -> Result<VelocityMatch, EngineError> {
    let tau = require_positive("reorganization_time_s", reorganization_time_s)?;
    let velocity_ms = depth_m / tau;
    let regime = VelocityRegime::classify(velocity_ms);
    Ok(VelocityMatch {
        velocity_ms,
        reorganization_time_s: tau,
        regime,
        score: regime.score(velocity_ms),
    })
}

/// Chou-Fasman helix propensity; residues that neither form nor break count as 1.
fn chou_fasman(residue: char) -> f64 {
    match residue {
        'A' => 1.42,
        'E' => 1.51,
        'L' => 1.21,
        'M' => 1.45,
        'Q' => 1.11,
        'K' => 1.16,
        'R' => 0.98,
        'H' => 1.00,
        'G' | 'P' => 0.57,
        'S' => 0.77,
        'D' => 1.01,
        'N' => 0.67,
        'C' => 0.70,
        'Y' => 0.69,
        'W' => 1.08,
        _ => 1.0,
    }
}

/// Mean Chou-Fasman propensity mapped from `[0.8, 1.2]` onto `[0, 1]`.
pub fn helix_propensity(sequence: &str) -> f64 {
    let n = sequence.chars().count();
    if n == 0 {
        return 0.0;
    }
    let avg = sequence.chars().map(chou_fasman).sum::<f64>() / n as f64;
    ((avg - 0.8) / 0.4).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DavydovScore {
    pub helix_propensity: f64,
    pub helix_length: usize,
    pub exciton_phonon_coupling: f64,
    pub amide_strength: f64,
    pub score: f64,
    /// Residues.
    pub localization_length: f64,
}

fn length_score(length: usize) -> f64 {
    match length {
        20..=35 => 1.0,
        15..=19 => (length as f64 - 15.0) / 5.0,
        36..=45 => 1.0 - (length as f64 - 35.0) / 10.0,
        _ => 0.2,
    }
}

pub fn davydov_score(sequence: &str) -> Result<DavydovScore, EngineError> {
    validate_sequence(sequence)?;
    let length = sequence.len();
    let helix = helix_propensity(sequence);
    let donors = sequence.chars().filter(|c| H_BOND_DONORS.contains(c)).count();
    let h_bond = f64::min(1.0, donors as f64 / (length as f64 * 0.3));
    let amide_strength = length as f64 / 25.0;

    let score = 0.4 * helix
        + 0.3 * length_score(length)
        + 0.2 * h_bond
        + 0.1 * f64::min(1.0, amide_strength);

    Ok(DavydovScore {
        helix_propensity: helix,
        helix_length: length,
        exciton_phonon_coupling: EXCITON_PHONON_COUPLING,
        amide_strength,
        score,
        localization_length: 5.0 * score,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MembraneFluidity {
    pub cancer_type: String,
    pub multiplier: f64,
    pub adjusted_c0: f64,
    pub adjusted_modulus: f64,
    pub selectivity_enhancement: f64,
}

/// Softer, more fluid membranes carry slower pulses and are targeted more selectively.
pub fn membrane_fluidity(cancer_type: &str) -> MembraneFluidity {
    let multiplier = fluidity_multiplier(cancer_type);
    MembraneFluidity {
        cancer_type: cancer_type.to_string(),
        multiplier,
        adjusted_c0: C0_NORMAL / multiplier.sqrt(),
        adjusted_modulus: P_NORMAL / multiplier,
        selectivity_enhancement: f64::min(3.0, multiplier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_unknown_residues() {
        assert!(insertion_depth("").is_err());
        assert!(insertion_depth("KWKLZ").is_err());
        assert!(davydov_score("kwkl").is_err());
    }

    #[test]
    fn short_sequences_fall_back_to_whole_length() {
        let r = insertion_depth("KWKLFKKIGIGR").unwrap();
        assert_eq!(r.hydrophobic_stretch, 12);
        assert!((r.depth_angstrom - 18.0).abs() < 1e-12);
        assert_eq!(r.notes, "Shallow insertion / surface binding");
        assert!((r.transmembrane_probability - 0.2 * r.hydrophobic_ratio).abs() < 1e-12);
    }

    #[test]
    fn hydrophobic_helix_is_a_tm_candidate() {
        let seq = "LLLLLLLLLLLLLLLLLLLLLLLL";
        let r = insertion_depth(seq).unwrap();
        assert_eq!(r.notes, "Strong TM helix candidate");
        assert_eq!(r.transmembrane_probability, 1.0);
        assert!((20..=25).contains(&r.hydrophobic_stretch));
        assert!(r.gravy > 3.0);
    }

    #[test]
    fn frequency_depth_obeys_constant() {
        let r = frequency_depth(3.0e-9).unwrap();
        assert!((r.frequency_hz * 3.0e-9 - F_D_CONSTANT).abs() < 1e-9);
        assert!((r.frohlich_overlap - r.frequency_hz / 20e9).abs() < 1e-12);
        assert!(frequency_depth(0.0).is_err());
    }

    #[test]
    fn overlap_is_one_inside_band() {
        assert_eq!(band_overlap(100e9, FROHLICH_BAND_HZ), 1.0);
        assert_eq!(band_overlap(1000e9, FROHLICH_BAND_HZ), 0.5);
    }

    #[test]
    fn regime_two_band_is_inclusive() {
        assert_eq!(VelocityRegime::classify(40.0), VelocityRegime::HeimburgJackson);
        assert_eq!(VelocityRegime::classify(80.0), VelocityRegime::HeimburgJackson);
        assert_eq!(VelocityRegime::classify(9.99), VelocityRegime::Diffusion);
        assert_eq!(VelocityRegime::classify(25.0), VelocityRegime::BoundaryLow);
        assert_eq!(VelocityRegime::classify(150.0), VelocityRegime::BoundaryHigh);
        assert_eq!(VelocityRegime::classify(151.0), VelocityRegime::Electromagnetic);
        assert!((VelocityRegime::BoundaryLow.score(25.0) - 0.8).abs() < 1e-12);
        assert!((VelocityRegime::BoundaryHigh.score(150.0) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn velocity_is_depth_over_time() {
        let v = velocity_match(2.5e-9, 50e-12).unwrap();
        assert!((v.velocity_ms - 50.0).abs() < 1e-9);
        assert!(v.regime.is_heimburg_jackson());
        assert!(velocity_match(2.5e-9, 0.0).is_err());
    }

    #[test]
    fn davydov_weights() {
        let d = davydov_score("AAAAAAAAAAAAAAAAAAAA").unwrap();
        assert_eq!(d.helix_propensity, 1.0);
        assert!((d.score - (0.4 + 0.3 + 0.0 + 0.1 * 0.8)).abs() < 1e-12);
        assert!((d.localization_length - 5.0 * d.score).abs() < 1e-12);
    }

    #[test]
    fn length_score_bands() {
        assert_eq!(length_score(17), 0.4);
        assert_eq!(length_score(40), 0.5);
        assert_eq!(length_score(10), 0.2);
    }

    #[test]
    fn fluidity_adjusts_speed_and_modulus() {
        let m = membrane_fluidity("melanoma");
        assert!((m.adjusted_c0 - 50.0 / 2.8f64.sqrt()).abs() < 1e-12);
        assert!((m.adjusted_modulus - 1e6 / 2.8).abs() < 1e-6);
        assert_eq!(m.selectivity_enhancement, 2.8);
    }
}
