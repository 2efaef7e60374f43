//! Resonant modes of viral particles.
//!
//! Three families of modes are predicted from a single diameter: the RaRaMa
//! electromagnetic resonance, quarter-wave electromagnetic modes in a few
//! biological media, and mechanical (acoustic) breathing modes of the capsid.

use crate::core::constants::{CODEX_VELOCITY, RARAMA_CONSTANT_GHZ_ANGSTROM, propagation, sound};
use crate::core::io::export::ChartSeries;
use crate::core::models::virus::VirusData;
use crate::engine::error::{EngineError, require_positive};
use crate::engine::text;
use serde::Serialize;
use std::fmt;

const NM_TO_ANGSTROM: f64 = 10.0;
const ANGSTROM_TO_METER: f64 = 1e-10;
const GHZ_TO_HZ: f64 = 1e9;

/// Breathing-mode target reported by ultrafast spectroscopy, in GHz.
pub const ACOUSTIC_TARGET_GHZ: f64 = 20.0;
/// Stiff capsid protein sound speed used for the upper breathing estimate.
pub const HIGH_VELOCITY_PROTEIN: f64 = 3500.0;

pub fn rarama_frequency_ghz(dimension_angstrom: f64) -> f64 {
    RARAMA_CONSTANT_GHZ_ANGSTROM / dimension_angstrom
}

/// RaRaMa frequency of a structure `dimension_nm` across, in Hz.
pub fn rarama_frequency_hz(dimension_nm: f64) -> f64 {
    rarama_frequency_ghz(dimension_nm * NM_TO_ANGSTROM) * GHZ_TO_HZ
}

/// `λ = v_Codex / f`, in nm.
pub fn codex_wavelength_nm(frequency_hz: f64) -> f64 {
    CODEX_VELOCITY / frequency_hz * 1e9
}

pub fn dimension_from_frequency(frequency_ghz: f64) -> f64 {
    RARAMA_CONSTANT_GHZ_ANGSTROM / frequency_ghz
}

/// Fundamental breathing mode `v / 2d`, in GHz.
pub fn breathing_mode_ghz(diameter_m: f64, velocity: f64) -> f64 {
    velocity / (2.0 * diameter_m) / GHZ_TO_HZ
}

/// `n`-th acoustic mode, `n` times the fundamental, in GHz.
pub fn higher_mode_ghz(diameter_m: f64, velocity: f64, mode_number: u32) -> f64 {
    f64::from(mode_number) * breathing_mode_ghz(diameter_m, velocity)
}

/// Quarter-wave electromagnetic mode `c / 4d`, in GHz.
pub fn quarter_wave_ghz(diameter_m: f64, c_eff: f64) -> f64 {
    c_eff / (4.0 * diameter_m) / GHZ_TO_HZ
}

/// `T_D = c / 4f`, in metres.
pub fn transmission_distance_m(frequency_hz: f64, c_eff: f64) -> f64 {
    c_eff / (4.0 * frequency_hz)
}

/// Sound speed that puts the breathing mode exactly at `frequency_hz`.
pub fn required_velocity(frequency_hz: f64, diameter_m: f64) -> f64 {
    frequency_hz * 2.0 * diameter_m
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Agreement {
    Excellent,
    Good,
    Poor,
}

impl Agreement {
    pub fn from_error_percent(error: f64) -> Self {
        if error < 10.0 {
            Self::Excellent
        } else if error < 25.0 {
            Self::Good
        } else {
            Self::Poor
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObservedComparison {
    pub observed_ghz: f64,
    pub rarama_error_percent: f64,
    pub observed_product: f64,
    pub quarter_wave_cytoplasm_error_percent: f64,
    pub agreement: Agreement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VirusValidation {
    pub name: String,
    pub structure_type: String,
    pub notes: String,
    pub dimension_nm: f64,
    pub dimension_angstrom: f64,
    pub dimension_m: f64,
    pub rarama_ghz: f64,
    pub rarama_hz: f64,
    /// Should come back as the RaRaMa constant.
    pub rarama_product: f64,
    pub quarter_wave_cytoplasm_ghz: f64,
    pub quarter_wave_aqueous_ghz: f64,
    pub quarter_wave_membrane_ghz: f64,
    pub transmission_cytoplasm_nm: f64,
    pub transmission_aqueous_nm: f64,
    pub wavelength_cytoplasm_nm: f64,
    pub wavelength_aqueous_nm: f64,
    pub observed: Option<ObservedComparison>,
}

fn percent_error(predicted: f64, observed: f64) -> f64 {
    (predicted - observed).abs() / observed * 100.0
}

pub fn validate_virus(virus: &VirusData) -> Result<VirusValidation, EngineError> {
    let dimension_nm = require_positive("dimension_nm", virus.dimension_nm)?;
    let observed_ghz = virus
        .observed_freq_ghz
        .map(|f| require_positive("observed_freq_ghz", f))
        .transpose()?;

    let dimension_angstrom = dimension_nm * NM_TO_ANGSTROM;
    let dimension_m = dimension_angstrom * ANGSTROM_TO_METER;
    let rarama_ghz = rarama_frequency_ghz(dimension_angstrom);
    let rarama_hz = rarama_ghz * GHZ_TO_HZ;
    let quarter_wave_cytoplasm_ghz = quarter_wave_ghz(dimension_m, propagation::CYTOPLASM);

    let observed = observed_ghz.map(|observed_ghz| {
        let rarama_error_percent = percent_error(rarama_ghz, observed_ghz);
        ObservedComparison {
            observed_ghz,
            rarama_error_percent,
            observed_product: observed_ghz * dimension_angstrom,
            quarter_wave_cytoplasm_error_percent: percent_error(
                quarter_wave_cytoplasm_ghz,
                observed_ghz,
            ),
            agreement: Agreement::from_error_percent(rarama_error_percent),
        }
    });

    Ok(VirusValidation {
        name: virus.name.clone(),
        structure_type: virus.structure_type.clone(),
        notes: virus.notes.clone(),
        dimension_nm,
        dimension_angstrom,
        dimension_m,
        rarama_ghz,
        rarama_hz,
        rarama_product: rarama_ghz * dimension_angstrom,
        quarter_wave_cytoplasm_ghz,
        quarter_wave_aqueous_ghz: quarter_wave_ghz(dimension_m, propagation::AQUEOUS),
        quarter_wave_membrane_ghz: quarter_wave_ghz(dimension_m, propagation::MEMBRANE),
        transmission_cytoplasm_nm: transmission_distance_m(rarama_hz, propagation::CYTOPLASM)
            * 1e9,
        transmission_aqueous_nm: transmission_distance_m(rarama_hz, propagation::AQUEOUS) * 1e9,
        wavelength_cytoplasm_nm: propagation::CYTOPLASM / rarama_hz * 1e9,
        wavelength_aqueous_nm: propagation::AQUEOUS / rarama_hz * 1e9,
        observed,
    })
}

impl fmt::Display for VirusValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f, "VIRUS: {}", self.name)?;
        writeln!(f, "Structure Type: {}", self.structure_type)?;
        writeln!(f, "{}", text::rule('=', 80))?;

        writeln!(f)?;
        writeln!(f, "📏 DIMENSIONS:")?;
        writeln!(f, "   {:.1} nm", self.dimension_nm)?;
        writeln!(f, "   {:.1} Å", self.dimension_angstrom)?;
        writeln!(f, "   {:.2e} m", self.dimension_m)?;

        writeln!(f)?;
        writeln!(f, "🔮 RARAMA EFFECT PREDICTION:")?;
        writeln!(f, "   f = 542.7 / d = {:.3} GHz", self.rarama_ghz)?;
        writeln!(
            f,
            "   f × d = {:.1} GHz·Å (Expected: 542.7)",
            self.rarama_product
        )?;

        if let Some(obs) = &self.observed {
            writeln!(f)?;
            writeln!(f, "🔬 EXPERIMENTAL VALIDATION:")?;
            writeln!(f, "   Observed: {:.3} GHz", obs.observed_ghz)?;
            writeln!(f, "   RaRaMa Error: {:.2}%", obs.rarama_error_percent)?;
            writeln!(f, "   Observed Product: {:.1} GHz·Å", obs.observed_product)?;
            match obs.agreement {
                Agreement::Excellent => writeln!(f, "   ✓ EXCELLENT AGREEMENT")?,
                Agreement::Good => writeln!(f, "   ✓ GOOD AGREEMENT")?,
                Agreement::Poor => writeln!(f, "   ⚠ Check quarter-wave predictions below")?,
            }
        }

        writeln!(f)?;
        writeln!(f, "🌊 QUARTER-WAVE PREDICTIONS:")?;
        writeln!(f, "   Cytoplasm:  {:.3} GHz", self.quarter_wave_cytoplasm_ghz)?;
        writeln!(f, "   Aqueous:    {:.3} GHz", self.quarter_wave_aqueous_ghz)?;
        writeln!(f, "   Membrane:   {:.3} GHz", self.quarter_wave_membrane_ghz)?;
        if let Some(obs) = &self.observed {
            writeln!(f)?;
            writeln!(
                f,
                "   Quarter-wave (cytoplasm) error: {:.2}%",
                obs.quarter_wave_cytoplasm_error_percent
            )?;
        }

        writeln!(f)?;
        writeln!(f, "📡 TRANSMISSION DISTANCES:")?;
        writeln!(f, "   Cytoplasm:  {:.2} nm", self.transmission_cytoplasm_nm)?;
        writeln!(f, "   Aqueous:    {:.2} nm", self.transmission_aqueous_nm)?;

        writeln!(f)?;
        writeln!(f, "📏 WAVELENGTHS:")?;
        writeln!(f, "   λ (cytoplasm): {:.2} nm", self.wavelength_cytoplasm_nm)?;
        writeln!(f, "   λ (aqueous):   {:.2} nm", self.wavelength_aqueous_nm)?;
        writeln!(
            f,
            "   Virus/Wavelength ratio: {:.3}",
            self.dimension_nm / self.wavelength_cytoplasm_nm
        )?;

        if !self.notes.is_empty() {
            writeln!(f)?;
            writeln!(f, "📝 NOTES: {}", self.notes)?;
        }
        writeln!(f, "{}", text::rule('=', 80))
    }
}

/// Summary table over many validations.
pub struct ValidationSummary<'a> {
    pub results: &'a [VirusValidation],
}

impl ValidationSummary<'_> {
    /// Mean RaRaMa error over viruses with an observed frequency.
    pub fn average_error_percent(&self) -> Option<f64> {
        let errors: Vec<f64> = self
            .results
            .iter()
            .filter_map(|r| r.observed.map(|o| o.rarama_error_percent))
            .collect();
        (!errors.is_empty()).then(|| errors.iter().sum::<f64>() / errors.len() as f64)
    }
}

impl fmt::Display for ValidationSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.results.is_empty() {
            return writeln!(f, "No validation results available.");
        }
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f, "SUMMARY: ALL VIRUS VALIDATIONS")?;
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<20} {:<12} {:<15} {:<10} {:<10}",
            "Virus", "Size (nm)", "RaRaMa (GHz)", "f×d", "Error %"
        )?;
        writeln!(f, "{}", text::rule('-', 80))?;
        for r in self.results {
            let error = r
                .observed
                .map(|o| format!("{:.1}%", o.rarama_error_percent))
                .unwrap_or_else(|| "N/A".to_string());
            writeln!(
                f,
                "{:<20} {:<12.1} {:<15.3} {:<10.1} {:<10}",
                r.name, r.dimension_nm, r.rarama_ghz, r.rarama_product, error
            )?;
        }
        writeln!(f, "{}", text::rule('=', 80))?;
        if let Some(avg) = self.average_error_percent() {
            let n = self.results.iter().filter(|r| r.observed.is_some()).count();
            writeln!(f)?;
            writeln!(f, "Average RaRaMa prediction error: {avg:.2}%")?;
            writeln!(f, "Validated against {n} experimental measurements")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BreathingEstimate {
    pub velocity: f64,
    pub frequency_ghz: f64,
    pub error_from_target_percent: f64,
}

/// Every mode family predicted for one particle diameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiModeAnalysis {
    pub diameter_nm: f64,
    pub rarama_ghz: f64,
    pub breathing: Vec<BreathingEstimate>,
    /// Sound speed that lands the breathing mode on the 20 GHz target.
    pub required_velocity: f64,
    pub envelope_ghz: f64,
    /// Subharmonics of the 20 GHz target: `(fraction, GHz)`.
    pub subharmonics: Vec<(f64, f64)>,
    pub quarter_wave_ghz: f64,
}

pub fn multi_mode_analysis(diameter_nm: f64) -> Result<MultiModeAnalysis, EngineError> {
    let diameter_nm = require_positive("diameter_nm", diameter_nm)?;
    let diameter_m = diameter_nm * 1e-9;

    let breathing = [sound::PROTEIN, HIGH_VELOCITY_PROTEIN]
        .into_iter()
        .map(|velocity| {
            let frequency_ghz = breathing_mode_ghz(diameter_m, velocity);
            BreathingEstimate {
                velocity,
                frequency_ghz,
                error_from_target_percent: percent_error(frequency_ghz, ACOUSTIC_TARGET_GHZ),
            }
        })
        .collect();

    Ok(MultiModeAnalysis {
        diameter_nm,
        rarama_ghz: rarama_frequency_ghz(diameter_nm * NM_TO_ANGSTROM),
        breathing,
        required_velocity: required_velocity(ACOUSTIC_TARGET_GHZ * GHZ_TO_HZ, diameter_m),
        envelope_ghz: breathing_mode_ghz(diameter_m, sound::WATER),
        subharmonics: [0.5, 0.25]
            .into_iter()
            .map(|n| (n, ACOUSTIC_TARGET_GHZ * n))
            .collect(),
        quarter_wave_ghz: quarter_wave_ghz(diameter_m, propagation::CYTOPLASM),
    })
}

impl fmt::Display for MultiModeAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f, "MULTI-MODE RESONANCE: {} nm PARTICLE", self.diameter_nm)?;
        writeln!(f, "{}", text::rule('=', 80))?;

        writeln!(f)?;
        writeln!(f, "1️⃣  RARAMA ELECTROMAGNETIC RESONANCE:")?;
        writeln!(f, "   Formula: f = 542.7 / d")?;
        writeln!(
            f,
            "   Predicted: {:.3} GHz = {:.0} MHz",
            self.rarama_ghz,
            self.rarama_ghz * 1000.0
        )?;

        writeln!(f)?;
        writeln!(f, "2️⃣  ACOUSTIC BREATHING MODE (Fundamental):")?;
        for b in &self.breathing {
            writeln!(f)?;
            writeln!(f, "   Using v = {} m/s:", b.velocity)?;
            writeln!(f, "   Formula: f = v / (2d)")?;
            writeln!(f, "   Predicted: {:.2} GHz", b.frequency_ghz)?;
            writeln!(
                f,
                "   Error from {ACOUSTIC_TARGET_GHZ} GHz: {:.1}%",
                b.error_from_target_percent
            )?;
            if b.error_from_target_percent < 30.0 {
                writeln!(f, "   ✅ EXCELLENT AGREEMENT with measured breathing mode")?;
            }
        }
        writeln!(f)?;
        writeln!(f, "   To get exactly {ACOUSTIC_TARGET_GHZ} GHz:")?;
        writeln!(f, "   Required v = {:.0} m/s", self.required_velocity)?;

        writeln!(f)?;
        writeln!(f, "3️⃣  LOW FREQUENCY MODES (2-10 GHz):")?;
        writeln!(f, "   Shell/Envelope Mode (v ≈ {} m/s):", sound::WATER)?;
        writeln!(f, "   Predicted: {:.2} GHz", self.envelope_ghz)?;
        writeln!(f, "   Or subharmonic of main mode:")?;
        for (n, ghz) in &self.subharmonics {
            writeln!(f, "   {n}× fundamental: {ghz:.1} GHz")?;
        }

        writeln!(f)?;
        writeln!(f, "4️⃣  QUARTER-WAVE ELECTROMAGNETIC:")?;
        writeln!(f, "   Formula: f = c_eff / (4d)")?;
        writeln!(
            f,
            "   Predicted: {:.0} GHz = {:.0} THz",
            self.quarter_wave_ghz,
            self.quarter_wave_ghz / 1000.0
        )
    }
}

/// RaRaMa frequency over a diameter range, `points` evenly spaced samples.
pub fn diameter_frequency_series(min_nm: f64, max_nm: f64, points: usize) -> ChartSeries {
    let step = if points > 1 {
        (max_nm - min_nm) / (points - 1) as f64
    } else {
        0.0
    };
    let points = (0..points)
        .map(|i| {
            let d = min_nm + step * i as f64;
            (d, rarama_frequency_ghz(d * NM_TO_ANGSTROM))
        })
        .collect();
    ChartSeries::from_points("rarama_ghz_vs_diameter_nm", points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::database::bundled_viruses;

    #[test]
    fn rarama_product_is_the_constant() {
        for d in [10.0, 542.7, 1200.0] {
            assert!((rarama_frequency_ghz(d) * d - RARAMA_CONSTANT_GHZ_ANGSTROM).abs() < 1e-9);
            assert!((dimension_from_frequency(rarama_frequency_ghz(d)) - d).abs() < 1e-9);
        }
    }

    #[test]
    fn codex_wavelength_equals_dimension() {
        let f = rarama_frequency_hz(1.0);
        assert!((f - 54.27e9).abs() < 1.0);
        assert!((codex_wavelength_nm(f) - 1.0).abs() < 1e-9);
        assert!((codex_wavelength_nm(rarama_frequency_hz(8.0)) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn breathing_mode_of_ninety_nm_particle() {
        let f = breathing_mode_ghz(90e-9, 2500.0);
        assert!((f - 13.888_888).abs() < 1e-5);
        assert!((higher_mode_ghz(90e-9, 2500.0, 3) - 3.0 * f).abs() < 1e-12);
        assert!((required_velocity(20e9, 90e-9) - 3600.0).abs() < 1e-6);
    }

    #[test]
    fn validation_reports_observed_error() {
        let virus = VirusData::new("Test", 100.0).with_observed_frequency(0.6);
        let v = validate_virus(&virus).unwrap();
        assert!((v.rarama_ghz - 0.5427).abs() < 1e-12);
        let obs = v.observed.unwrap();
        assert!((obs.rarama_error_percent - 9.55).abs() < 1e-9);
        assert_eq!(obs.agreement, Agreement::Excellent);
        assert!((obs.observed_product - 600.0).abs() < 1e-9);
    }

    #[test]
    fn transmission_distance_inverts_frequency() {
        let v = validate_virus(&VirusData::new("T", 50.0)).unwrap();
        let expected = propagation::CYTOPLASM / (4.0 * v.rarama_hz) * 1e9;
        assert!((v.transmission_cytoplasm_nm - expected).abs() < 1e-9);
        assert!(v.observed.is_none());
    }

    #[test]
    fn non_positive_diameter_is_rejected() {
        assert!(matches!(
            validate_virus(&VirusData::new("Bad", 0.0)),
            Err(EngineError::InvalidInput { parameter: "dimension_nm", .. })
        ));
    }

    #[test]
    fn agreement_bands() {
        assert_eq!(Agreement::from_error_percent(9.99), Agreement::Excellent);
        assert_eq!(Agreement::from_error_percent(10.0), Agreement::Good);
        assert_eq!(Agreement::from_error_percent(25.0), Agreement::Poor);
    }

    #[test]
    fn bundled_viruses_all_validate() {
        let viruses = bundled_viruses().unwrap();
        assert_eq!(viruses.len(), 10);
        let results: Vec<_> = viruses.iter().map(|v| validate_virus(v).unwrap()).collect();
        let summary = ValidationSummary { results: &results };
        assert_eq!(summary.average_error_percent(), None);
        assert!(summary.to_string().contains("N/A"));
    }

    #[test]
    fn multi_mode_subharmonics_and_envelope() {
        let m = multi_mode_analysis(90.0).unwrap();
        assert_eq!(m.subharmonics, vec![(0.5, 10.0), (0.25, 5.0)]);
        assert!((m.envelope_ghz - 1500.0 / 180e-9 / 1e9).abs() < 1e-9);
        assert_eq!(m.breathing.len(), 2);
    }

    #[test]
    fn diameter_series_spans_the_range() {
        let s = diameter_frequency_series(10.0, 100.0, 10);
        assert_eq!(s.points.len(), 10);
        assert_eq!(s.points[0].0, 10.0);
        assert!((s.points[9].0 - 100.0).abs() < 1e-9);
    }
}
