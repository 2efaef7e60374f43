//! RaRaMa frequency of each screened compound, estimated from its molecular
//! weight, set against its BCS score.

use super::{CorrelationStrength, DiscoveryRecord, FAIL, PASS, by_desc, heading, icon, opt};
use crate::core::io::export::ChartSeries;
use crate::core::numeric::{linear_fit, mean, pearson, pearson_p_value, std_dev};
use crate::engine::text;
use crate::engine::virus::{codex_wavelength_nm, rarama_frequency_hz};
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

pub const SIGNIFICANCE_LEVEL: f64 = 0.05;
/// Collective-mode range of water networks, inclusive, in THz.
pub const WATER_NETWORK_THZ: (f64, f64) = (0.1, 50.0);
const TREND_THRESHOLD: f64 = 0.3;

/// `(lower THz, upper THz, label)`, lower bound inclusive.
pub const FREQUENCY_BANDS: [(f64, f64, &str); 4] = [
    (0.0, 5.0, "Low (<5 THz)"),
    (5.0, 10.0, "Medium (5-10 THz)"),
    (10.0, 20.0, "High (10-20 THz)"),
    (20.0, 100.0, "Very High (>20 THz)"),
];

/// Size-dependent prefactor of `d = k · MW^(1/3)` in Å.
fn shape_factor(molecular_weight: f64) -> f64 {
    if molecular_weight < 200.0 {
        3.5
    } else if molecular_weight < 1000.0 {
        4.2
    } else if molecular_weight < 10_000.0 {
        5.0
    } else {
        6.5
    }
}

/// Characteristic dimension in nm; `None` for a non-positive weight.
pub fn estimate_dimension_nm(molecular_weight: f64) -> Option<f64> {
    (molecular_weight.is_finite() && molecular_weight > 0.0)
        .then(|| shape_factor(molecular_weight) * molecular_weight.cbrt() / 10.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyRow {
    pub name: String,
    pub molecular_weight: f64,
    pub dimension_nm: f64,
    pub frequency_hz: f64,
    pub wavelength_nm: f64,
    pub bcs_score: f64,
    pub verdict: String,
}

impl FrequencyRow {
    pub fn frequency_thz(&self) -> f64 {
        self.frequency_hz / 1e12
    }

    fn passed(&self) -> bool {
        self.verdict == PASS
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandSummary {
    pub label: &'static str,
    pub count: usize,
    pub pass_count: usize,
    pub average_bcs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyZone {
    pub min_thz: f64,
    pub max_thz: f64,
    pub mean_thz: f64,
    pub std_dev_thz: f64,
}

impl FrequencyZone {
    fn of(rows: &[&FrequencyRow]) -> Option<Self> {
        let thz: Vec<f64> = rows.iter().map(|r| r.frequency_thz()).collect();
        Some(Self {
            min_thz: thz.iter().copied().reduce(f64::min)?,
            max_thz: thz.iter().copied().reduce(f64::max)?,
            mean_thz: mean(&thz)?,
            std_dev_thz: std_dev(&thz)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSummary {
    pub count: usize,
    pub pass_rate: f64,
    pub average_bcs: f64,
}

impl RangeSummary {
    fn of(rows: &[&FrequencyRow]) -> Option<Self> {
        let scores: Vec<f64> = rows.iter().map(|r| r.bcs_score).collect();
        let passed = rows.iter().filter(|r| r.passed()).count();
        Some(Self {
            count: rows.len(),
            average_bcs: mean(&scores)?,
            pass_rate: passed as f64 / rows.len() as f64,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FrequencyTrend {
    /// Higher frequency (smaller molecule) scores better.
    Positive,
    Negative,
    Flat,
}

impl FrequencyTrend {
    pub fn classify(r: f64) -> Self {
        if r > TREND_THRESHOLD {
            Self::Positive
        } else if r < -TREND_THRESHOLD {
            Self::Negative
        } else {
            Self::Flat
        }
    }
}

/// Frequency against biocompatibility over a set of exported screening results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyLaw {
    /// Highest frequency first.
    pub rows: Vec<FrequencyRow>,
    /// Records skipped for a non-positive molecular weight.
    pub skipped: Vec<String>,
    /// Pearson `r` of frequency (THz) against BCS score.
    pub correlation: Option<f64>,
    pub p_value: Option<f64>,
    /// BCS score as `slope · THz + intercept`.
    pub trend_line: Option<(f64, f64)>,
    pub bands: Vec<BandSummary>,
    pub pass_zone: Option<FrequencyZone>,
    pub fail_zone: Option<FrequencyZone>,
    pub in_water_range: Option<RangeSummary>,
    pub out_of_water_range: Option<RangeSummary>,
}

impl FrequencyLaw {
    pub fn from_records(records: &[DiscoveryRecord]) -> Self {
        let mut rows = Vec::with_capacity(records.len());
        let mut skipped = Vec::new();
        for record in records {
            let molecular_weight = record.export.properties.molecular_weight;
            let Some(dimension_nm) = estimate_dimension_nm(molecular_weight) else {
                warn!(compound = record.name(), "No molecular weight; frequency skipped.");
                skipped.push(record.name().to_string());
                continue;
            };
            let frequency_hz = rarama_frequency_hz(dimension_nm);
            rows.push(FrequencyRow {
                name: record.name().to_string(),
                molecular_weight,
                dimension_nm,
                frequency_hz,
                wavelength_nm: codex_wavelength_nm(frequency_hz),
                bcs_score: record.score(),
                verdict: record.export.verdict.clone(),
            });
        }
        rows.sort_by(|a, b| by_desc(a.frequency_hz, b.frequency_hz));

        let thz: Vec<f64> = rows.iter().map(FrequencyRow::frequency_thz).collect();
        let bcs: Vec<f64> = rows.iter().map(|r| r.bcs_score).collect();
        let correlation = pearson(&thz, &bcs);
        let p_value = correlation.and_then(|r| pearson_p_value(r, rows.len()));
        info!(
            compounds = rows.len(),
            correlation, p_value, "Frequency-biocompatibility correlation computed"
        );

        let bands = FREQUENCY_BANDS
            .iter()
            .filter_map(|&(low, high, label)| {
                let members: Vec<&FrequencyRow> = rows
                    .iter()
                    .filter(|r| (low..high).contains(&r.frequency_thz()))
                    .collect();
                let summary = RangeSummary::of(&members)?;
                Some(BandSummary {
                    label,
                    count: summary.count,
                    pass_count: members.iter().filter(|r| r.passed()).count(),
                    average_bcs: summary.average_bcs,
                })
            })
            .collect();

        let with_verdict =
            |verdict: &str| rows.iter().filter(|r| r.verdict == verdict).collect::<Vec<_>>();
        let (water_low, water_high) = WATER_NETWORK_THZ;
        let (inside, outside): (Vec<&FrequencyRow>, Vec<&FrequencyRow>) = rows
            .iter()
            .partition(|r| (water_low..=water_high).contains(&r.frequency_thz()));

        Self {
            trend_line: linear_fit(&thz, &bcs),
            pass_zone: FrequencyZone::of(&with_verdict(PASS)),
            fail_zone: FrequencyZone::of(&with_verdict(FAIL)),
            in_water_range: RangeSummary::of(&inside),
            out_of_water_range: RangeSummary::of(&outside),
            bands,
            correlation,
            p_value,
            skipped,
            rows,
        }
    }

    pub fn is_significant(&self) -> bool {
        self.p_value.is_some_and(|p| p < SIGNIFICANCE_LEVEL)
    }

    pub fn trend(&self) -> Option<FrequencyTrend> {
        self.correlation.map(FrequencyTrend::classify)
    }

    /// BCS against frequency and wavelength, and frequency against molecular weight.
    pub fn chart_series(&self) -> Vec<ChartSeries> {
        let mut frequency = ChartSeries::new("frequency_thz_vs_bcs");
        let mut wavelength = ChartSeries::new("wavelength_nm_vs_bcs");
        let mut scaling = ChartSeries::new("molecular_weight_vs_frequency_thz");
        for r in &self.rows {
            frequency.push(r.frequency_thz(), r.bcs_score);
            wavelength.push(r.wavelength_nm, r.bcs_score);
            scaling.push(r.molecular_weight, r.frequency_thz());
        }
        vec![frequency, wavelength, scaling]
    }
}

fn write_zone(f: &mut fmt::Formatter<'_>, label: &str, zone: &FrequencyZone) -> fmt::Result {
    writeln!(
        f,
        "   {label} compounds frequency range: {:.2} - {:.2} THz",
        zone.min_thz, zone.max_thz
    )?;
    writeln!(
        f,
        "   Average {label} frequency: {:.2} ± {:.2} THz",
        zone.mean_thz, zone.std_dev_thz
    )
}

fn write_range(f: &mut fmt::Formatter<'_>, title: &str, range: &RangeSummary) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "📊 {title}:")?;
    writeln!(f, "   Compounds: {}", range.count)?;
    writeln!(f, "   PASS rate: {:.1}%", range.pass_rate * 100.0)?;
    writeln!(f, "   Average BCS: {:.3}", range.average_bcs)
}

impl fmt::Display for FrequencyLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "DISCOVERY 8: Frequency ↔ Biocompatibility Correlation")?;
        writeln!(f, "📊 Molecular Resonance Frequencies and BCS Scores:")?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<40} {:<12} {:<10} {:<10} Verdict",
            "Compound", "Freq (THz)", "λ (nm)", "BCS"
        )?;
        writeln!(f, "{}", text::rule('-', 90))?;
        for r in &self.rows {
            writeln!(
                f,
                "{:<40} {:<12.3} {:<10.1} {:<10.3} {}",
                r.name,
                r.frequency_thz(),
                r.wavelength_nm,
                r.bcs_score,
                icon(&r.verdict)
            )?;
        }
        for name in &self.skipped {
            writeln!(f, "   ⚠️ {name}: no molecular weight, skipped")?;
        }

        writeln!(f)?;
        writeln!(f, "📈 STATISTICAL ANALYSIS:")?;
        writeln!(f, "   Pearson correlation: r = {}", opt(self.correlation, 4))?;
        match self.p_value {
            Some(p) => writeln!(f, "   P-value: p = {p:.4e}")?,
            None => writeln!(f, "   P-value: n/a")?,
        }
        if self.is_significant() {
            writeln!(f, "   ✅ STATISTICALLY SIGNIFICANT (p < {SIGNIFICANCE_LEVEL})")?;
        } else {
            writeln!(f, "   ⚠️ Not statistically significant (p ≥ {SIGNIFICANCE_LEVEL})")?;
        }
        if let Some(r) = self.correlation {
            match CorrelationStrength::classify(r) {
                CorrelationStrength::Strong => writeln!(f, "   🎯 STRONG CORRELATION DETECTED!")?,
                CorrelationStrength::Moderate => writeln!(f, "   📊 MODERATE CORRELATION")?,
                CorrelationStrength::Weak => writeln!(f, "   📉 WEAK CORRELATION")?,
            }
        }
        if let Some((slope, intercept)) = self.trend_line {
            writeln!(f, "   Trend: BCS = {slope:.4} × f(THz) + {intercept:.3}")?;
        }

        writeln!(f)?;
        writeln!(f, "🔬 FREQUENCY BAND ANALYSIS:")?;
        for band in &self.bands {
            writeln!(f, "   {}:", band.label)?;
            writeln!(f, "      Compounds: {}", band.count)?;
            writeln!(
                f,
                "      PASS rate: {}/{} ({:.1}%)",
                band.pass_count,
                band.count,
                band.pass_count as f64 / band.count as f64 * 100.0
            )?;
            writeln!(f, "      Average BCS: {:.3}", band.average_bcs)?;
        }

        writeln!(f)?;
        writeln!(f, "🎯 BIOCOMPATIBLE FREQUENCY ZONES:")?;
        if let Some(zone) = &self.pass_zone {
            write_zone(f, PASS, zone)?;
        }
        if let Some(zone) = &self.fail_zone {
            write_zone(f, FAIL, zone)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "🌊 WATER NETWORK FREQUENCIES: {} - {} THz",
            WATER_NETWORK_THZ.0, WATER_NETWORK_THZ.1
        )?;
        if let Some(range) = &self.in_water_range {
            write_range(f, "Within water range", range)?;
        }
        if let Some(range) = &self.out_of_water_range {
            write_range(f, "Outside water range", range)?;
        }

        writeln!(f)?;
        writeln!(f, "🔬 CONCLUSION:")?;
        match self.trend() {
            Some(FrequencyTrend::Positive) => {
                writeln!(f, "✅ POSITIVE CORRELATION: higher frequency → higher biocompatibility")?;
                writeln!(f, "   Smaller molecules (higher f) are more compatible")
            }
            Some(FrequencyTrend::Negative) => {
                writeln!(f, "✅ NEGATIVE CORRELATION: higher frequency → lower biocompatibility")?;
                writeln!(f, "   Larger molecules (lower f) are more compatible")
            }
            Some(FrequencyTrend::Flat) | None => {
                writeln!(f, "⚠️ WEAK/NO CORRELATION: frequency alone does not predict biocompatibility")?;
                writeln!(f, "   Functional groups and charge dominate")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::bcs::report::{BcsExport, ExportedGroups, ExportedProperties};
    use crate::engine::discovery::Domain;

    fn record(name: &str, verdict: &str, score: f64, mw: f64) -> DiscoveryRecord {
        DiscoveryRecord {
            source_file: format!("bcs_{name}.json"),
            domain: Domain::FoodAdditive,
            export: BcsExport {
                compound_name: name.to_string(),
                formula: String::new(),
                verdict: verdict.to_string(),
                bcs_score: score,
                pillar1_pass: true,
                pillar2_pass: true,
                pillar3_pass: true,
                red_flags: Vec::new(),
                recommendation: String::new(),
                functional_groups: ExportedGroups::default(),
                properties: ExportedProperties {
                    molecular_weight: mw,
                    water_solubility: 1.0,
                    charged_groups: 0,
                },
            },
        }
    }

    #[test]
    fn dimension_scales_with_cube_root_per_size_class() {
        let d = estimate_dimension_nm(125.0).unwrap();
        assert!((d - 1.75).abs() < 1e-9);
        assert!((estimate_dimension_nm(1000.0).unwrap() - 5.0).abs() < 1e-9);
        assert!((estimate_dimension_nm(8000.0).unwrap() - 10.0).abs() < 1e-9);
        assert!((estimate_dimension_nm(1e6).unwrap() - 65.0).abs() < 1e-9);
        assert_eq!(estimate_dimension_nm(0.0), None);
    }

    #[test]
    fn lighter_compounds_resonate_higher_and_sort_first() {
        let records = vec![
            record("Heavy", FAIL, 0.2, 20_000.0),
            record("Light", PASS, 0.9, 100.0),
            record("Medium", PASS, 0.7, 500.0),
            record("Blank", FAIL, 0.1, 0.0),
        ];
        let law = FrequencyLaw::from_records(&records);
        let names: Vec<&str> = law.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Light", "Medium", "Heavy"]);
        assert_eq!(law.skipped, vec!["Blank".to_string()]);
        assert!(law.correlation.unwrap() > 0.7);
        assert_eq!(law.trend(), Some(FrequencyTrend::Positive));
        assert!(law.trend_line.unwrap().0 > 0.0);

        let pass = law.pass_zone.as_ref().unwrap();
        assert!(pass.min_thz < pass.max_thz);
        let fail = law.fail_zone.as_ref().unwrap();
        assert_eq!(fail.min_thz, fail.max_thz);
        // Small molecules resonate in the tens of GHz, below the water-network band.
        assert!(law.in_water_range.is_none());
        assert_eq!(law.out_of_water_range.as_ref().unwrap().count, 3);
    }

    #[test]
    fn bands_skip_empty_ranges() {
        // 100 Da sits near 0.033 THz; 20 kDa near 0.003 THz.
        let law = FrequencyLaw::from_records(&[
            record("A", PASS, 0.9, 100.0),
            record("B", FAIL, 0.1, 20_000.0),
        ]);
        assert_eq!(law.bands.len(), 1);
        assert_eq!(law.bands[0].label, "Low (<5 THz)");
        assert_eq!(law.bands[0].count, 2);
        assert_eq!(law.bands[0].pass_count, 1);
        assert_eq!(law.p_value, None);
        assert!(!law.is_significant());
    }

    #[test]
    fn report_and_charts_render() {
        let law = FrequencyLaw::from_records(&[
            record("A", PASS, 0.9, 100.0),
            record("B", PASS, 0.6, 400.0),
            record("C", FAIL, 0.2, 5000.0),
        ]);
        let rendered = law.to_string();
        assert!(rendered.contains("DISCOVERY 8:"));
        assert!(rendered.contains("WATER NETWORK FREQUENCIES"));
        let series = law.chart_series();
        assert_eq!(series.len(), 3);
        assert!(series.iter().all(|s| s.points.len() == 3));
    }

    #[test]
    fn trend_classification_bands() {
        assert_eq!(FrequencyTrend::classify(0.31), FrequencyTrend::Positive);
        assert_eq!(FrequencyTrend::classify(-0.31), FrequencyTrend::Negative);
        assert_eq!(FrequencyTrend::classify(0.3), FrequencyTrend::Flat);
    }
}
