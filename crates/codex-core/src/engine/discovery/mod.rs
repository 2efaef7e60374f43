//! # Discovery Engine
//!
//! Mines previously exported screening results (`bcs*.json`) for patterns that
//! hold across the food-additive and dermatology domains, then turns them into
//! heuristic rules and a single coherence index.
//!
//! [`frequency`] tests the same records against their RaRaMa frequencies.

use crate::core::io::database::{DatabaseError, load_json};
use crate::core::io::export::ChartSeries;
use crate::core::numeric::{mean, pearson, std_dev};
use crate::engine::bcs::report::{BcsExport, ExportedGroups};
use crate::engine::text;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

pub mod frequency;

const PASS: &str = "PASS";
const FAIL: &str = "FAIL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    FoodAdditive,
    Dermatology,
}

impl Domain {
    pub fn from_file_name(name: &str) -> Self {
        if name.contains("dermatology") {
            Self::Dermatology
        } else {
            Self::FoodAdditive
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FoodAdditive => "Food Additive",
            Self::Dermatology => "Dermatology",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoveryRecord {
    pub source_file: String,
    pub domain: Domain,
    pub export: BcsExport,
}

impl DiscoveryRecord {
    fn name(&self) -> &str {
        &self.export.compound_name
    }

    fn score(&self) -> f64 {
        self.export.bcs_score
    }

    fn groups(&self) -> &ExportedGroups {
        &self.export.functional_groups
    }

    fn is(&self, verdict: &str) -> bool {
        self.export.verdict == verdict
    }
}

fn group_entries(g: &ExportedGroups) -> [(&'static str, u32); 7] {
    [
        ("hydroxyl", g.hydroxyl),
        ("ether", g.ether),
        ("amine", g.amine),
        ("carbonyl", g.carbonyl),
        ("sulfonate", g.sulfonate),
        ("sulfate", g.sulfate),
        ("iodine", g.iodine),
    ]
}

fn contaminants(g: &ExportedGroups) -> Vec<(&'static str, u32)> {
    [
        ("sulfonate", g.sulfonate),
        ("sulfate", g.sulfate),
        ("iodine", g.iodine),
    ]
    .into_iter()
    .filter(|(_, n)| *n > 0)
    .collect()
}

fn by_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Loads every `bcs*.json` in `dir`, sorted by file name.
pub fn load_records(dir: &Path) -> Result<Vec<DiscoveryRecord>, DatabaseError> {
    let io_err = |e: std::io::Error| DatabaseError::Io {
        path: dir.to_string_lossy().to_string(),
        source: e,
    };
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with("bcs") && name.ends_with(".json") && path.is_file() {
            paths.push((name.to_string(), path));
        }
    }
    paths.sort();

    paths
        .into_iter()
        .map(|(name, path)| {
            debug!(file = %name, "Loading screening export");
            Ok(DiscoveryRecord {
                domain: Domain::from_file_name(&name),
                export: load_json(&path)?,
                source_file: name,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
}

impl DomainStats {
    fn of(records: &[DiscoveryRecord], domain: Domain) -> Self {
        let scores: Vec<f64> = records
            .iter()
            .filter(|r| r.domain == domain)
            .map(DiscoveryRecord::score)
            .collect();
        Self {
            count: scores.len(),
            mean: mean(&scores),
            std_dev: std_dev(&scores),
        }
    }
}

/// Discovery 1: groups that only ever appear in passing or only in failing compounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossDomainPatterns {
    pub food: DomainStats,
    pub dermatology: DomainStats,
    pub pass_count: usize,
    pub fail_count: usize,
    /// `(group, number of PASS compounds containing it)`.
    pub universal_safe_groups: Vec<(&'static str, usize)>,
    /// `(group, number of FAIL compounds containing it)`.
    pub universal_unsafe_groups: Vec<(&'static str, usize)>,
}

fn group_presence(records: &[&DiscoveryRecord]) -> [usize; 7] {
    let mut counts = [0; 7];
    for r in records {
        for (i, (_, n)) in group_entries(r.groups()).iter().enumerate() {
            if *n > 0 {
                counts[i] += 1;
            }
        }
    }
    counts
}

pub fn cross_domain_patterns(records: &[DiscoveryRecord]) -> CrossDomainPatterns {
    let passing: Vec<&DiscoveryRecord> = records.iter().filter(|r| r.is(PASS)).collect();
    let failing: Vec<&DiscoveryRecord> = records.iter().filter(|r| r.is(FAIL)).collect();
    let in_pass = group_presence(&passing);
    let in_fail = group_presence(&failing);
    let names = group_entries(&ExportedGroups::default()).map(|(name, _)| name);

    let exclusive = |a: &[usize; 7], b: &[usize; 7]| {
        names
            .iter()
            .zip(a.iter().zip(b))
            .filter(|(_, (x, y))| **x > 0 && **y == 0)
            .map(|(name, (x, _))| (*name, *x))
            .collect::<Vec<_>>()
    };

    CrossDomainPatterns {
        food: DomainStats::of(records, Domain::FoodAdditive),
        dermatology: DomainStats::of(records, Domain::Dermatology),
        pass_count: passing.len(),
        fail_count: failing.len(),
        universal_safe_groups: exclusive(&in_pass, &in_fail),
        universal_unsafe_groups: exclusive(&in_fail, &in_pass),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydroxylEntry {
    pub name: String,
    pub bcs_score: f64,
    pub hydroxyl: u32,
    pub contaminants: Vec<(&'static str, u32)>,
}

/// Discovery 2: hydroxyl-bearing compounds split by the presence of
/// sulfonate, sulfate, or iodine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydroxylParadox {
    /// Sorted by score, best first.
    pub ranked: Vec<HydroxylEntry>,
    pub clean_average: Option<f64>,
    pub contaminated_average: Option<f64>,
    pub penalty: Option<f64>,
}

pub fn hydroxyl_paradox(records: &[DiscoveryRecord]) -> HydroxylParadox {
    let mut ranked: Vec<HydroxylEntry> = records
        .iter()
        .filter(|r| r.groups().hydroxyl > 0)
        .map(|r| HydroxylEntry {
            name: r.name().to_string(),
            bcs_score: r.score(),
            hydroxyl: r.groups().hydroxyl,
            contaminants: contaminants(r.groups()),
        })
        .collect();
    ranked.sort_by(|a, b| by_desc(a.bcs_score, b.bcs_score));

    let split = |contaminated: bool| {
        let scores: Vec<f64> = ranked
            .iter()
            .filter(|e| e.contaminants.is_empty() != contaminated)
            .map(|e| e.bcs_score)
            .collect();
        mean(&scores)
    };
    let clean_average = split(false);
    let contaminated_average = split(true);

    HydroxylParadox {
        ranked,
        penalty: clean_average.zip(contaminated_average).map(|(c, d)| c - d),
        clean_average,
        contaminated_average,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerdictRow {
    pub name: String,
    pub value: f64,
    pub bcs_score: f64,
    pub verdict: String,
}

fn verdict_rows(
    records: &[DiscoveryRecord],
    value: impl Fn(&DiscoveryRecord) -> f64,
) -> Vec<VerdictRow> {
    records
        .iter()
        .map(|r| VerdictRow {
            name: r.name().to_string(),
            value: value(r),
            bcs_score: r.score(),
            verdict: r.export.verdict.clone(),
        })
        .collect()
}

fn extreme(rows: &[VerdictRow], verdict: &str, pick: fn(f64, f64) -> f64) -> Option<f64> {
    rows.iter()
        .filter(|r| r.verdict == verdict)
        .map(|r| r.value)
        .reduce(pick)
}

/// Largest passing value, smallest failing value, and the midpoint when the two separate cleanly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Threshold {
    pub rows: Vec<VerdictRow>,
    pub max_pass: Option<f64>,
    pub min_fail: Option<f64>,
}

impl Threshold {
    fn from_rows(rows: Vec<VerdictRow>) -> Self {
        Self {
            max_pass: extreme(&rows, PASS, f64::max),
            min_fail: extreme(&rows, FAIL, f64::min),
            rows,
        }
    }

    pub fn separation(&self) -> Option<f64> {
        match (self.max_pass, self.min_fail) {
            (Some(p), Some(f)) if p < f => Some((p + f) / 2.0),
            _ => None,
        }
    }
}

/// Discovery 3: molecular weight against verdict, lightest first.
pub fn molecular_weight_threshold(records: &[DiscoveryRecord]) -> Threshold {
    let mut rows = verdict_rows(records, |r| r.export.properties.molecular_weight);
    rows.sort_by(|a, b| {
        a.value
            .partial_cmp(&b.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| by_desc(b.bcs_score, a.bcs_score))
    });
    Threshold::from_rows(rows)
}

/// Discovery 4: ether-bearing compounds, most ethers first.
pub fn ether_overload(records: &[DiscoveryRecord]) -> Threshold {
    let with_ether: Vec<DiscoveryRecord> = records
        .iter()
        .filter(|r| r.groups().ether > 0)
        .cloned()
        .collect();
    let mut rows = verdict_rows(&with_ether, |r| f64::from(r.groups().ether));
    rows.sort_by(|a, b| by_desc(a.value, b.value));
    Threshold::from_rows(rows)
}

/// Discovery 5: charged groups per kDa, lowest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargeDensityRule {
    pub rows: Vec<VerdictRow>,
    pub all_neutral: bool,
}

pub fn charge_density_rule(records: &[DiscoveryRecord]) -> ChargeDensityRule {
    let mut rows = verdict_rows(records, |r| {
        let p = &r.export.properties;
        if p.molecular_weight > 0.0 {
            f64::from(p.charged_groups) / p.molecular_weight * 1000.0
        } else {
            0.0
        }
    });
    rows.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal));
    ChargeDensityRule {
        all_neutral: rows.iter().all(|r| r.value == 0.0),
        rows,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UntestedCompound {
    pub name: &'static str,
    pub formula: &'static str,
    pub domain: Domain,
    pub molecular_weight: f64,
    pub hydroxyl: u32,
    pub ether: u32,
    pub amine: u32,
    pub carbonyl: u32,
    pub charged_groups: u32,
}

impl UntestedCompound {
    fn has_any_group(&self) -> bool {
        self.hydroxyl + self.ether + self.amine + self.carbonyl + self.charged_groups > 0
    }
}

pub const UNTESTED_COMPOUNDS: [UntestedCompound; 5] = [
    UntestedCompound {
        name: "Caffeine",
        formula: "C8H10N4O2",
        domain: Domain::FoodAdditive,
        molecular_weight: 194.2,
        hydroxyl: 0,
        ether: 0,
        amine: 4,
        carbonyl: 2,
        charged_groups: 0,
    },
    UntestedCompound {
        name: "Ascorbic Acid (Vitamin C)",
        formula: "C6H8O6",
        domain: Domain::FoodAdditive,
        molecular_weight: 176.1,
        hydroxyl: 4,
        ether: 1,
        amine: 0,
        carbonyl: 1,
        charged_groups: 0,
    },
    UntestedCompound {
        name: "Cetyl Alcohol",
        formula: "C16H34O",
        domain: Domain::Dermatology,
        molecular_weight: 242.4,
        hydroxyl: 1,
        ether: 0,
        amine: 0,
        carbonyl: 0,
        charged_groups: 0,
    },
    UntestedCompound {
        name: "Squalane",
        formula: "C30H62",
        domain: Domain::Dermatology,
        molecular_weight: 422.8,
        hydroxyl: 0,
        ether: 0,
        amine: 0,
        carbonyl: 0,
        charged_groups: 0,
    },
    UntestedCompound {
        name: "Sodium Benzoate",
        formula: "C7H5NaO2",
        domain: Domain::FoodAdditive,
        molecular_weight: 144.1,
        hydroxyl: 0,
        ether: 0,
        amine: 0,
        carbonyl: 1,
        charged_groups: 1,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PredictedVerdict {
    Pass,
    Conditional,
    Fail,
}

impl PredictedVerdict {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.65 {
            Self::Pass
        } else if score >= 0.5 {
            Self::Conditional
        } else {
            Self::Fail
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Conditional => "CONDITIONAL",
            Self::Fail => "FAIL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub compound: UntestedCompound,
    pub predicted_score: f64,
    pub verdict: PredictedVerdict,
    pub reasoning: Vec<String>,
}

const PREDICTION_BASE: f64 = 0.5;
const ETHER_SAFE_LIMIT: u32 = 4;
const HYDROPHOBIC_SCORE: f64 = 0.3;

/// Discovery 6: rule-based score for a compound that has not been screened.
pub fn predict(compound: &UntestedCompound) -> Prediction {
    let mut score = PREDICTION_BASE;
    let mut reasoning = Vec::new();

    if compound.hydroxyl > 0 {
        let bonus = f64::from(compound.hydroxyl) * 0.15;
        score += bonus;
        reasoning.push(format!("+{bonus:.2} from {} OH groups", compound.hydroxyl));
    }
    if compound.ether > ETHER_SAFE_LIMIT {
        let penalty = f64::from(compound.ether - ETHER_SAFE_LIMIT) * 0.05;
        score -= penalty;
        reasoning.push(format!(
            "-{penalty:.2} from ether overload ({} groups)",
            compound.ether
        ));
    } else if compound.ether > 0 {
        let bonus = f64::from(compound.ether) * 0.05;
        score += bonus;
        reasoning.push(format!(
            "+{bonus:.2} from {} ethers (safe range)",
            compound.ether
        ));
    }
    if compound.amine > 0 {
        let bonus = f64::from(compound.amine) * 0.12;
        score += bonus;
        reasoning.push(format!("+{bonus:.2} from {} amines", compound.amine));
    }
    if compound.carbonyl > 0 {
        let bonus = f64::from(compound.carbonyl) * 0.08;
        score += bonus;
        reasoning.push(format!("+{bonus:.2} from {} carbonyls", compound.carbonyl));
    }
    if compound.charged_groups > 0 {
        score -= 0.2;
        reasoning.push("-0.20 from charged groups".to_string());
    }
    if !compound.has_any_group() {
        score = HYDROPHOBIC_SCORE;
        reasoning.push("Hydrophobic compound (low water compatibility)".to_string());
    }

    let predicted_score = score.clamp(0.0, 1.0);
    Prediction {
        compound: *compound,
        predicted_score,
        verdict: PredictedVerdict::from_score(predicted_score),
        reasoning,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UciEntry {
    pub name: String,
    pub uci: f64,
    pub bcs_score: f64,
    pub verdict: String,
}

/// `(ΣW_compatible − ΣW_disruptive) / √MW × 100`; zero for a massless record.
pub fn universal_coherence_index(groups: &ExportedGroups, molecular_weight: f64) -> f64 {
    if molecular_weight <= 0.0 {
        return 0.0;
    }
    let compatible = f64::from(groups.hydroxyl)
        + f64::from(groups.amine) * 0.8
        + f64::from(groups.carbonyl) * 0.6
        + f64::from(groups.ether) * 0.3;
    let disruptive = f64::from(groups.sulfonate) * 2.0
        + f64::from(groups.sulfate) * 1.8
        + f64::from(groups.iodine) * 1.5;
    (compatible - disruptive) / molecular_weight.sqrt() * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CorrelationStrength {
    Strong,
    Moderate,
    Weak,
}

impl CorrelationStrength {
    pub fn classify(r: f64) -> Self {
        if r.abs() > 0.7 {
            Self::Strong
        } else if r.abs() > 0.4 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }
}

/// Discovery 7: UCI ranking and its correlation with the BCS score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoherenceIndex {
    /// Highest UCI first.
    pub ranked: Vec<UciEntry>,
    /// `None` when fewer than two records or either series is constant.
    pub correlation: Option<f64>,
}

pub fn coherence_index(records: &[DiscoveryRecord]) -> CoherenceIndex {
    let mut ranked: Vec<UciEntry> = records
        .iter()
        .map(|r| UciEntry {
            name: r.name().to_string(),
            uci: universal_coherence_index(r.groups(), r.export.properties.molecular_weight),
            bcs_score: r.score(),
            verdict: r.export.verdict.clone(),
        })
        .collect();
    ranked.sort_by(|a, b| by_desc(a.uci, b.uci));
    let uci: Vec<f64> = ranked.iter().map(|e| e.uci).collect();
    let bcs: Vec<f64> = ranked.iter().map(|e| e.bcs_score).collect();
    CoherenceIndex {
        correlation: pearson(&uci, &bcs),
        ranked,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoveryReport {
    pub records: Vec<DiscoveryRecord>,
    pub cross_domain: CrossDomainPatterns,
    pub hydroxyl_paradox: HydroxylParadox,
    pub mw_threshold: Threshold,
    pub ether_overload: Threshold,
    pub charge_density: ChargeDensityRule,
    pub predictions: Vec<Prediction>,
    pub coherence: CoherenceIndex,
}

impl DiscoveryReport {
    pub fn from_records(records: Vec<DiscoveryRecord>) -> Self {
        info!(records = records.len(), "Running discovery analyses");
        Self {
            cross_domain: cross_domain_patterns(&records),
            hydroxyl_paradox: hydroxyl_paradox(&records),
            mw_threshold: molecular_weight_threshold(&records),
            ether_overload: ether_overload(&records),
            charge_density: charge_density_rule(&records),
            predictions: UNTESTED_COMPOUNDS.iter().map(predict).collect(),
            coherence: coherence_index(&records),
            records,
        }
    }

    pub fn load(dir: &Path) -> Result<Self, DatabaseError> {
        Ok(Self::from_records(load_records(dir)?))
    }

    /// BCS score against UCI, hydroxyl count, molecular weight, and ether count.
    pub fn chart_series(&self) -> Vec<ChartSeries> {
        let mut uci = ChartSeries::new("uci_vs_bcs");
        let mut hydroxyl = ChartSeries::new("hydroxyl_count_vs_bcs");
        let mut mw = ChartSeries::new("molecular_weight_vs_bcs");
        let mut ether = ChartSeries::new("ether_count_vs_bcs");
        for r in &self.records {
            let g = r.groups();
            let weight = r.export.properties.molecular_weight;
            uci.push(universal_coherence_index(g, weight), r.score());
            hydroxyl.push(f64::from(g.hydroxyl), r.score());
            mw.push(weight, r.score());
            ether.push(f64::from(g.ether), r.score());
        }
        vec![uci, hydroxyl, mw, ether]
    }
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{}", text::rule('=', 70))?;
    writeln!(f, "{title}")?;
    writeln!(f, "{}", text::rule('=', 70))
}

fn icon(verdict: &str) -> &'static str {
    if verdict == PASS { "✅" } else { "❌" }
}

fn opt(v: Option<f64>, digits: usize) -> String {
    v.map_or_else(|| "n/a".to_string(), |x| format!("{x:.digits$}"))
}

fn write_threshold(
    f: &mut fmt::Formatter<'_>,
    t: &Threshold,
    column: &str,
    unit: &str,
) -> fmt::Result {
    writeln!(
        f,
        "{:<40} {:<15} {:<12} Verdict",
        "Compound", column, "BCS Score"
    )?;
    writeln!(f, "{}", text::rule('-', 85))?;
    for r in &t.rows {
        writeln!(
            f,
            "{:<40} {:<15.1} {:<12.3} {} {}",
            r.name,
            r.value,
            r.bcs_score,
            icon(&r.verdict),
            r.verdict
        )?;
    }
    writeln!(f)?;
    writeln!(f, "   Largest PASS: {} {unit}", opt(t.max_pass, 1))?;
    writeln!(f, "   Smallest FAIL: {} {unit}", opt(t.min_fail, 1))?;
    match t.separation() {
        Some(mid) => writeln!(f, "   🎯 Clean separation at ~{mid:.0} {unit}"),
        None => writeln!(f, "   ⚠️ No clean threshold - other factors dominate"),
    }
}

impl fmt::Display for DiscoveryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", text::rule('=', 70))?;
        writeln!(f, "CODEX DISCOVERY ENGINE - Novel Pattern Recognition System")?;
        writeln!(f, "{}", text::rule('=', 70))?;
        writeln!(f, "✅ Loaded {} compounds", self.records.len())?;

        let d1 = &self.cross_domain;
        heading(f, "DISCOVERY 1: Universal Functional Group Safety Rules")?;
        writeln!(
            f,
            "📊 {} food additives vs {} dermatology compounds",
            d1.food.count, d1.dermatology.count
        )?;
        for (label, stats) in [("Food Additives", &d1.food), ("Dermatology   ", &d1.dermatology)] {
            writeln!(
                f,
                "{label} - Average BCS: {} ± {}",
                opt(stats.mean, 3),
                opt(stats.std_dev, 3)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "✅ Groups ONLY in PASS compounds (Universal Safe):")?;
        for (group, n) in &d1.universal_safe_groups {
            writeln!(
                f,
                "   • {}: appears in {n}/{} PASS compounds",
                group.to_uppercase(),
                d1.pass_count
            )?;
        }
        writeln!(f, "❌ Groups ONLY in FAIL compounds (Universal Unsafe):")?;
        for (group, n) in &d1.universal_unsafe_groups {
            writeln!(
                f,
                "   • {}: appears in {n}/{} FAIL compounds",
                group.to_uppercase(),
                d1.fail_count
            )?;
        }

        let d2 = &self.hydroxyl_paradox;
        heading(f, "DISCOVERY 2: The Hydroxyl Paradox - When Good Groups Go Bad")?;
        writeln!(
            f,
            "📊 Analyzing {} compounds with hydroxyl groups",
            d2.ranked.len()
        )?;
        writeln!(f, "🏆 Best Hydroxyl-Containing Compounds:")?;
        for e in d2.ranked.iter().take(3) {
            writeln!(
                f,
                "   • {}: {:.3} ({} OH groups)",
                e.name, e.bcs_score, e.hydroxyl
            )?;
        }
        writeln!(f, "💀 Worst Hydroxyl-Containing Compounds:")?;
        for e in d2.ranked.iter().skip(d2.ranked.len().saturating_sub(3)) {
            writeln!(
                f,
                "   • {}: {:.3} ({} OH groups)",
                e.name, e.bcs_score, e.hydroxyl
            )?;
            if !e.contaminants.is_empty() {
                let list: Vec<String> = e
                    .contaminants
                    .iter()
                    .map(|(g, n)| format!("{n} {g}"))
                    .collect();
                writeln!(f, "     🔴 CONTAMINATED by: {}", list.join(", "))?;
            }
        }
        writeln!(f, "   Clean OH compounds: {} average BCS", opt(d2.clean_average, 3))?;
        writeln!(
            f,
            "   Contaminated OH:    {} average BCS",
            opt(d2.contaminated_average, 3)
        )?;
        if let Some(p) = d2.penalty {
            writeln!(f, "   📉 Contamination penalty: {p:.3} points")?;
        }

        heading(f, "DISCOVERY 3: Molecular Weight Safety Threshold")?;
        write_threshold(f, &self.mw_threshold, "MW (Da)", "Da")?;

        heading(f, "DISCOVERY 4: Ether Overload Syndrome")?;
        write_threshold(f, &self.ether_overload, "Ether Count", "ether groups")?;

        heading(f, "DISCOVERY 5: Charge Density Rule")?;
        writeln!(
            f,
            "{:<40} {:<15} {:<12} Verdict",
            "Compound", "q/MW (1/kDa)", "BCS Score"
        )?;
        writeln!(f, "{}", text::rule('-', 85))?;
        for r in &self.charge_density.rows {
            writeln!(
                f,
                "{:<40} {:<15.3} {:<12.3} {}",
                r.name,
                r.value,
                r.bcs_score,
                icon(&r.verdict)
            )?;
        }
        if self.charge_density.all_neutral {
            writeln!(f, "   All analyzed compounds have charge density = 0.000")?;
            writeln!(
                f,
                "   📋 RECOMMENDATION: Test charged compounds to validate hypothesis"
            )?;
        }

        heading(f, "DISCOVERY 6: Predictions for Untested Compounds")?;
        for p in &self.predictions {
            let c = &p.compound;
            writeln!(f, "📋 {} ({})", c.name, c.formula)?;
            writeln!(f, "   Domain: {}", c.domain.label())?;
            writeln!(f, "   MW: {} Da", c.molecular_weight)?;
            writeln!(f, "   Predicted BCS Score: {:.3}", p.predicted_score)?;
            writeln!(f, "   Predicted Verdict: {}", p.verdict.label())?;
            writeln!(f, "   Reasoning:")?;
            for reason in &p.reasoning {
                writeln!(f, "      • {reason}")?;
            }
            writeln!(f)?;
        }

        let d7 = &self.coherence;
        heading(f, "DISCOVERY 7: Universal Coherence Index (UCI)")?;
        writeln!(f, "   UCI = (ΣW_compatible - ΣW_disruptive) × (1 / sqrt(MW)) × 100")?;
        writeln!(f)?;
        writeln!(f, "{:<40} {:<12} {:<12} Verdict", "Compound", "UCI", "BCS Score")?;
        writeln!(f, "{}", text::rule('-', 80))?;
        for e in &d7.ranked {
            writeln!(
                f,
                "{:<40} {:<12.2} {:<12.3} {}",
                e.name,
                e.uci,
                e.bcs_score,
                icon(&e.verdict)
            )?;
        }
        writeln!(f)?;
        match d7.correlation {
            Some(r) => {
                writeln!(f, "📈 UCI ↔ BCS Correlation: r = {r:.3}")?;
                match CorrelationStrength::classify(r) {
                    CorrelationStrength::Strong => writeln!(
                        f,
                        "   🎯 STRONG CORRELATION - UCI successfully predicts biocompatibility!"
                    ),
                    CorrelationStrength::Moderate => {
                        writeln!(f, "   ⚠️ MODERATE CORRELATION - UCI captures some patterns")
                    }
                    CorrelationStrength::Weak => {
                        writeln!(f, "   ❌ WEAK CORRELATION - Additional factors needed")
                    }
                }
            }
            None => writeln!(f, "📈 UCI ↔ BCS Correlation: undefined"),
        }
    }
}
