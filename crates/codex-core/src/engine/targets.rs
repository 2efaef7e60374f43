//! Drive frequencies for cancer-relevant molecular targets.
//!
//! Each target gets a RaRaMa fundamental from its size, a harmonic series, and
//! the `1 / 2πτ` frequency of every known process. A [`TherapeuticProtocol`]
//! then places the fundamental in a delivery regime and compares it with the
//! TTFields clinical frequency.

use crate::core::io::export::ChartSeries;
use crate::core::models::target::MolecularTarget;
use crate::engine::error::{EngineError, require_positive};
use crate::engine::resonance::predict_optimal_frequency;
use crate::engine::text;
use crate::engine::virus::{codex_wavelength_nm, rarama_frequency_hz};
use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument};

pub const HARMONIC_COUNT: usize = 5;
/// Harmonics carried into a protocol.
pub const PROTOCOL_HARMONICS: usize = 3;
/// Half-width of the therapeutic window as a fraction of the fundamental.
pub const WINDOW_FRACTION: f64 = 0.1;
pub const TTFIELDS_FREQUENCY_HZ: f64 = 200e3;
pub const EXPECTED_MECHANISM: &str =
    "Topological phase disruption → selective interference with cancer cell processes";

/// `f_n = n · f_0` for `n = 1..=count`.
pub fn harmonic_series(fundamental_hz: f64, count: usize) -> Vec<f64> {
    (1..=count).map(|n| n as f64 * fundamental_hz).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessFrequency {
    pub process: String,
    pub tau_s: f64,
    pub frequency_hz: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetAnalysis {
    pub target_name: String,
    pub dimension_nm: f64,
    pub fundamental_hz: f64,
    pub wavelength_nm: f64,
    pub process_frequencies: Vec<ProcessFrequency>,
    pub harmonics_hz: Vec<f64>,
    /// `(low, high)` in Hz.
    pub therapeutic_window: (f64, f64),
}

impl TargetAnalysis {
    pub fn fundamental_mhz(&self) -> f64 {
        self.fundamental_hz / 1e6
    }

    /// Coarse unit band of the fundamental for the comparison table.
    pub fn band(&self) -> &'static str {
        let mhz = self.fundamental_mhz();
        if mhz < 1.0 {
            "kHz"
        } else if mhz < 1000.0 {
            "MHz"
        } else {
            "GHz"
        }
    }
}

pub fn analyze_target(target: &MolecularTarget) -> Result<TargetAnalysis, EngineError> {
    let dimension_nm = require_positive("dimension_nm", target.dimension_nm)?;
    let process_frequencies = target
        .timescale
        .iter()
        .map(|p| {
            let tau_s = require_positive("tau_s", p.tau_s)?;
            Ok::<_, EngineError>(ProcessFrequency {
                process: p.process.clone(),
                tau_s,
                frequency_hz: predict_optimal_frequency(tau_s),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let fundamental_hz = rarama_frequency_hz(dimension_nm);
    debug!(name = %target.name, fundamental_hz, "Target analysed");
    Ok(TargetAnalysis {
        target_name: target.name.clone(),
        dimension_nm,
        fundamental_hz,
        wavelength_nm: codex_wavelength_nm(fundamental_hz),
        process_frequencies,
        harmonics_hz: harmonic_series(fundamental_hz, HARMONIC_COUNT),
        therapeutic_window: (
            fundamental_hz * (1.0 - WINDOW_FRACTION),
            fundamental_hz * (1.0 + WINDOW_FRACTION),
        ),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FrequencyRegime {
    LowFrequency,
    Microwave,
    MillimeterWave,
    Terahertz,
}

impl FrequencyRegime {
    pub fn classify(frequency_hz: f64) -> Self {
        if frequency_hz < 1e6 {
            Self::LowFrequency
        } else if frequency_hz < 1e9 {
            Self::Microwave
        } else if frequency_hz < 1e12 {
            Self::MillimeterWave
        } else {
            Self::Terahertz
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::LowFrequency => "Low frequency (kHz)",
            Self::Microwave => "Microwave (MHz)",
            Self::MillimeterWave => "Millimeter wave (GHz)",
            Self::Terahertz => "Terahertz (THz)",
        }
    }

    pub fn delivery(self) -> &'static str {
        match self {
            Self::LowFrequency => "Direct electrical stimulation",
            Self::Microwave => "Near-field antenna array",
            Self::MillimeterWave => "Waveguide or horn antenna",
            Self::Terahertz => "THz quantum cascade laser",
        }
    }
}

/// MHz above 1 MHz, kHz otherwise.
pub fn readable_frequency(frequency_hz: f64) -> String {
    if frequency_hz > 1e6 {
        format!("{:.3} MHz", frequency_hz / 1e6)
    } else {
        format!("{:.3} kHz", frequency_hz / 1e3)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TherapeuticProtocol {
    pub target: String,
    pub primary_frequency_hz: f64,
    pub therapeutic_window: (f64, f64),
    pub regime: FrequencyRegime,
    pub harmonics_hz: Vec<f64>,
    /// Primary frequency over the TTFields frequency.
    pub ttfields_ratio: f64,
    pub rationale: String,
    pub expected_mechanism: &'static str,
}

impl TherapeuticProtocol {
    pub fn generate(target: &MolecularTarget, analysis: &TargetAnalysis) -> Self {
        let f = analysis.fundamental_hz;
        Self {
            target: target.name.clone(),
            primary_frequency_hz: f,
            therapeutic_window: analysis.therapeutic_window,
            regime: FrequencyRegime::classify(f),
            harmonics_hz: analysis
                .harmonics_hz
                .iter()
                .take(PROTOCOL_HARMONICS)
                .copied()
                .collect(),
            ttfields_ratio: f / TTFIELDS_FREQUENCY_HZ,
            rationale: format!("Target {}", target.cancer_relevance),
            expected_mechanism: EXPECTED_MECHANISM,
        }
    }
}

impl fmt::Display for TherapeuticProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (low, high) = self.therapeutic_window;
        text::write_section(f, &format!("THERAPEUTIC PROTOCOL: {}", self.target))?;
        writeln!(f, "🎯 PRIMARY FREQUENCY:")?;
        writeln!(f, "   {}", readable_frequency(self.primary_frequency_hz))?;
        writeln!(f, "   ({:.3e} Hz)", self.primary_frequency_hz)?;
        writeln!(f, "📡 DELIVERY:")?;
        writeln!(f, "   Regime: {}", self.regime.label())?;
        writeln!(f, "   Method: {}", self.regime.delivery())?;
        writeln!(f, "🔬 THERAPEUTIC WINDOW:")?;
        writeln!(f, "   {:.3} - {:.3} MHz", low / 1e6, high / 1e6)?;
        writeln!(
            f,
            "   (±{:.0}% around primary frequency)",
            WINDOW_FRACTION * 100.0
        )?;
        writeln!(f, "🎵 HARMONIC AUGMENTATION:")?;
        for (i, h) in self.harmonics_hz.iter().enumerate() {
            writeln!(f, "   n={}: {:.3} MHz", i + 1, h / 1e6)?;
        }
        writeln!(f, "⚡ COMPARISON TO TTFIELDS:")?;
        writeln!(f, "   TTFields: {:.0} kHz", TTFIELDS_FREQUENCY_HZ / 1e3)?;
        writeln!(f, "   This protocol: {:.1}× TTFields frequency", self.ttfields_ratio)?;
        writeln!(f, "💡 RATIONALE:")?;
        writeln!(f, "   {}", self.rationale)?;
        writeln!(f, "🔧 MECHANISM:")?;
        writeln!(f, "   {}", self.expected_mechanism)
    }
}

/// Analysis and protocol for every target, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetSurvey {
    pub targets: Vec<MolecularTarget>,
    pub analyses: Vec<TargetAnalysis>,
    pub protocols: Vec<TherapeuticProtocol>,
}

impl TargetSurvey {
    #[instrument(skip_all, name = "target_survey")]
    pub fn run(targets: Vec<MolecularTarget>) -> Result<Self, EngineError> {
        let analyses = targets
            .iter()
            .map(analyze_target)
            .collect::<Result<Vec<_>, _>>()?;
        let protocols = targets
            .iter()
            .zip(&analyses)
            .map(|(t, a)| TherapeuticProtocol::generate(t, a))
            .collect();
        Ok(Self {
            targets,
            analyses,
            protocols,
        })
    }

    /// Harmonic ladder of each target, plus all process frequencies against
    /// the fundamental of their target.
    pub fn chart_series(&self) -> Vec<ChartSeries> {
        let mut series: Vec<ChartSeries> = self
            .analyses
            .iter()
            .map(|a| {
                ChartSeries::from_points(
                    format!("harmonics_ghz: {}", a.target_name),
                    a.harmonics_hz
                        .iter()
                        .enumerate()
                        .map(|(i, h)| ((i + 1) as f64, h / 1e9))
                        .collect(),
                )
            })
            .collect();
        let mut processes = ChartSeries::new("fundamental_ghz_vs_process_ghz");
        for a in &self.analyses {
            for p in &a.process_frequencies {
                processes.push(a.fundamental_hz / 1e9, p.frequency_hz / 1e9);
            }
        }
        series.push(processes);
        series
    }
}

fn write_target(
    f: &mut fmt::Formatter<'_>,
    target: &MolecularTarget,
    analysis: &TargetAnalysis,
) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{}", text::rule('=', text::REPORT_WIDTH))?;
    writeln!(f, "ANALYZING: {}", target.name)?;
    writeln!(f, "{}", text::rule('=', text::REPORT_WIDTH))?;
    writeln!(f, "📐 MOLECULAR DIMENSIONS:")?;
    writeln!(f, "   Size: {} nm", target.dimension_nm)?;
    match target.molecular_weight {
        Some(mw) => writeln!(f, "   MW: {:.0} kDa", mw / 1000.0)?,
        None => writeln!(f, "   MW: extended structure")?,
    }
    writeln!(f, "🔮 RARAMA PREDICTION:")?;
    writeln!(f, "   Fundamental: {:.3} MHz", analysis.fundamental_mhz())?;
    writeln!(f, "   Wavelength: {:.1} nm", analysis.wavelength_nm)?;
    writeln!(f, "🎵 HARMONIC SERIES:")?;
    for (i, h) in analysis.harmonics_hz.iter().enumerate() {
        writeln!(f, "   n={}: {:.3} GHz = {:.1} MHz", i + 1, h / 1e9, h / 1e6)?;
    }
    if !analysis.process_frequencies.is_empty() {
        writeln!(f, "⏱️  TIMESCALE-BASED FREQUENCIES:")?;
        for p in &analysis.process_frequencies {
            writeln!(f, "   {}: {:.3} MHz", p.process, p.frequency_hz / 1e6)?;
        }
    }
    Ok(())
}

impl fmt::Display for TargetSurvey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        text::write_banner(f, "GEOMETRIC PHASE THERAPY: MOLECULAR TARGET ANALYSIS")?;
        writeln!(
            f,
            "📋 Loaded {} cancer-relevant molecular targets",
            self.targets.len()
        )?;
        for ((target, analysis), protocol) in
            self.targets.iter().zip(&self.analyses).zip(&self.protocols)
        {
            write_target(f, target, analysis)?;
            write!(f, "{protocol}")?;
        }

        text::write_section(f, "COMPARATIVE SUMMARY: ALL TARGETS")?;
        writeln!(
            f,
            "{:<42} {:<12} {:<18} Regime",
            "Target", "Size (nm)", "f_RaRaMa (MHz)"
        )?;
        writeln!(f, "{}", text::rule('-', text::REPORT_WIDTH))?;
        for a in &self.analyses {
            writeln!(
                f,
                "{:<42} {:<12.1} {:<18.3} {}",
                a.target_name,
                a.dimension_nm,
                a.fundamental_mhz(),
                a.band()
            )?;
        }
        let above = self
            .protocols
            .iter()
            .filter(|p| p.ttfields_ratio > 1.0)
            .count();
        writeln!(f)?;
        writeln!(
            f,
            "💡 {above}/{} targets sit above the TTFields frequency ({:.0} kHz)",
            self.protocols.len(),
            TTFIELDS_FREQUENCY_HZ / 1e3
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::database;

    fn tubulin() -> MolecularTarget {
        let mut t = MolecularTarget::new("Tubulin", 8.0)
            .with_timescale("GTP hydrolysis", 0.5e-3)
            .with_timescale("Conformational change", 1e-6);
        t.cancer_relevance = "Mitosis disruption".to_string();
        t
    }

    #[test]
    fn harmonics_are_integer_multiples() {
        assert_eq!(harmonic_series(2.0, 4), vec![2.0, 4.0, 6.0, 8.0]);
        assert!(harmonic_series(2.0, 0).is_empty());
    }

    #[test]
    fn tubulin_fundamental_follows_its_size() {
        let a = analyze_target(&tubulin()).unwrap();
        // 542.7 GHz·Å over 80 Å.
        assert!((a.fundamental_hz - 6.78375e9).abs() < 1.0);
        assert!((a.wavelength_nm - 8.0).abs() < 1e-9);
        assert_eq!(a.harmonics_hz.len(), HARMONIC_COUNT);
        assert!((a.harmonics_hz[4] - 5.0 * a.fundamental_hz).abs() < 1e-3);
        assert!((a.therapeutic_window.0 - 0.9 * a.fundamental_hz).abs() < 1e-3);
        assert!((a.therapeutic_window.1 - 1.1 * a.fundamental_hz).abs() < 1e-3);
        let gtp = &a.process_frequencies[0];
        assert!((gtp.frequency_hz - predict_optimal_frequency(0.5e-3)).abs() < 1e-9);
        assert_eq!(a.band(), "GHz");
    }

    #[test]
    fn invalid_dimensions_and_timescales_are_rejected() {
        let err = analyze_target(&MolecularTarget::new("flat", 0.0)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidInput {
                parameter: "dimension_nm",
                ..
            }
        ));
        let err = analyze_target(&MolecularTarget::new("x", 5.0).with_timescale("p", -1.0))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { parameter: "tau_s", .. }));
    }

    #[test]
    fn regimes_follow_decade_boundaries() {
        assert_eq!(FrequencyRegime::classify(200e3), FrequencyRegime::LowFrequency);
        assert_eq!(FrequencyRegime::classify(1e6), FrequencyRegime::Microwave);
        assert_eq!(FrequencyRegime::classify(6.8e9), FrequencyRegime::MillimeterWave);
        assert_eq!(FrequencyRegime::classify(1e12), FrequencyRegime::Terahertz);
        assert_eq!(
            FrequencyRegime::MillimeterWave.delivery(),
            "Waveguide or horn antenna"
        );
    }

    #[test]
    fn readable_frequency_switches_units_above_one_megahertz() {
        assert_eq!(readable_frequency(200e3), "200.000 kHz");
        assert_eq!(readable_frequency(1e6), "1000.000 kHz");
        assert_eq!(readable_frequency(6.78375e9), "6783.750 MHz");
    }

    #[test]
    fn protocol_keeps_three_harmonics_and_ttfields_ratio() {
        let target = tubulin();
        let analysis = analyze_target(&target).unwrap();
        let protocol = TherapeuticProtocol::generate(&target, &analysis);
        assert_eq!(protocol.harmonics_hz, analysis.harmonics_hz[..3].to_vec());
        assert!((protocol.ttfields_ratio - analysis.fundamental_hz / 200e3).abs() < 1e-6);
        assert_eq!(protocol.rationale, "Target Mitosis disruption");
        assert_eq!(protocol.regime, FrequencyRegime::MillimeterWave);
        let text = protocol.to_string();
        assert!(text.contains("THERAPEUTIC PROTOCOL: Tubulin"));
        assert!(text.contains("6783.750 MHz"));
    }

    #[test]
    fn bundled_targets_are_all_gigahertz_and_above_ttfields() {
        let survey = TargetSurvey::run(database::bundled_molecular_targets().unwrap()).unwrap();
        assert_eq!(survey.analyses.len(), 4);
        assert!(survey.analyses.iter().all(|a| a.band() == "GHz"));
        assert!(survey.protocols.iter().all(|p| p.ttfields_ratio > 1.0));
        // The smallest target resonates highest.
        let p53 = &survey.analyses[1];
        assert!(survey.analyses.iter().all(|a| a.fundamental_hz <= p53.fundamental_hz));

        let series = survey.chart_series();
        assert_eq!(series.len(), 5);
        let report = survey.to_string();
        assert!(report.contains("COMPARATIVE SUMMARY: ALL TARGETS"));
        assert!(report.contains("MW: extended structure"));
        assert!(report.contains("4/4 targets sit above"));
    }
}
