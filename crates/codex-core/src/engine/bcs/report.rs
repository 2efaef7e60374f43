use super::analyzer::{BREAKDOWN_COMPATIBLE, BREAKDOWN_DISRUPTIVE, BcsAnalysis};
use crate::core::io::export::{self, ChartSeries, ExportError};
use crate::core::models::compound::CompoundData;
use crate::engine::text::{self, REPORT_WIDTH};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Boxed per-compound screening report.
pub struct BcsReport<'a> {
    pub analysis: &'a BcsAnalysis,
    pub compound: &'a CompoundData,
}

impl<'a> BcsReport<'a> {
    pub fn new(analysis: &'a BcsAnalysis, compound: &'a CompoundData) -> Self {
        Self { analysis, compound }
    }
}

impl fmt::Display for BcsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.analysis;
        let c = self.compound;

        text::write_banner(f, "CODEX BIOCOMPATIBILITY SCREENING (BCS) REPORT")?;
        writeln!(f)?;
        writeln!(f, "🧪 COMPOUND: {}", c.name)?;
        writeln!(f, "   Formula: {}", c.formula)?;
        writeln!(f, "   Description: {}", c.description)?;

        text::write_section(f, "FINAL VERDICT")?;
        writeln!(f, "{} {}", a.verdict.symbol(), a.verdict)?;
        writeln!(f, "BCS Score: {:.3}", a.final_score())?;
        writeln!(f, "Classification: {}", a.safety_class.description())?;
        writeln!(f)?;
        writeln!(f, "{}", a.recommendation)?;
        if !a.red_flags.is_empty() {
            writeln!(f)?;
            writeln!(f, "🚩 RED FLAGS:")?;
            for flag in &a.red_flags {
                writeln!(f, "   {flag}")?;
            }
        }

        text::write_section(f, "THREE-PILLAR ASSESSMENT")?;
        let pillars = [
            ("PILLAR 1: Regulatory Safety & Compliance", &a.regulatory),
            ("PILLAR 2: Aqueous Compatibility", &a.aqueous),
            ("PILLAR 3: Systemic Dynamic Integrity", &a.systemic),
        ];
        for (title, pillar) in pillars {
            writeln!(f)?;
            writeln!(f, "{} {title}", text::check(pillar.pass))?;
            writeln!(f, "   Status: {}", pillar.summary)?;
        }

        let s = &a.score;
        text::write_section(f, "BCS SCORE CALCULATION")?;
        writeln!(f, "Raw Score:                {:>8.3}", s.raw)?;
        writeln!(f, "Normalized Score:         {:>8.3}", s.normalized)?;
        writeln!(f, "  Solubility Modifier:    ×{:>7.3}", s.solubility_modifier)?;
        writeln!(f, "  Molecular Weight Mod:   ×{:>7.3}", s.mw_modifier)?;
        writeln!(f, "  Charge Density Mod:     ×{:>7.3}", s.charge_modifier)?;
        writeln!(f, "  Polymer Dynamics Mod:   ×{:>7.3}", s.polymer_modifier)?;
        writeln!(f, "{}", text::rule('─', 40))?;
        writeln!(f, "FINAL BCS SCORE:          {:>8.3}", s.final_score)?;

        text::write_section(f, "FUNCTIONAL GROUP ANALYSIS")?;
        for (label, score) in &a.functional_group_breakdown {
            if *label == BREAKDOWN_COMPATIBLE {
                writeln!(f, "✓ {label}: +{score:.2}")?;
            } else if *label == BREAKDOWN_DISRUPTIVE {
                writeln!(f, "✗ {label}: {score:.2}")?;
            }
        }
        writeln!(f)?;
        writeln!(f, "Detailed Breakdown:")?;
        for (label, score) in a
            .functional_group_breakdown
            .iter()
            .filter(|(l, s)| *l != BREAKDOWN_COMPATIBLE && *l != BREAKDOWN_DISRUPTIVE && *s != 0.0)
        {
            let sign = if *score > 0.0 { "+" } else { "" };
            writeln!(f, "  • {label:<30} {sign}{score:.2}")?;
        }

        text::write_section(f, "MECHANISTIC PREDICTION")?;
        writeln!(f, "{}", a.mechanistic_prediction)?;
        if !c.known_effects.is_empty() {
            writeln!(f)?;
            writeln!(f, "Known Effects:")?;
            for effect in &c.known_effects {
                writeln!(f, "  • {effect}")?;
            }
        }
        writeln!(f)?;
        writeln!(f, "{}", text::rule('═', REPORT_WIDTH))
    }
}

/// Validation summary over a batch, highest score first.
pub struct ComparisonTable<'a> {
    rows: Vec<&'a BcsAnalysis>,
}

impl<'a> ComparisonTable<'a> {
    pub fn new(analyses: &'a [BcsAnalysis]) -> Self {
        let mut rows: Vec<&BcsAnalysis> = analyses.iter().collect();
        rows.sort_by(|a, b| b.final_score().total_cmp(&a.final_score()));
        Self { rows }
    }

    pub fn rows(&self) -> &[&'a BcsAnalysis] {
        &self.rows
    }
}

impl fmt::Display for ComparisonTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        text::write_banner(f, "VALIDATION SUMMARY: BCS ALGORITHM PERFORMANCE")?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<35} {:<12} {:<20} {:<30}",
            "Compound", "BCS Score", "Verdict", "Pillar Status"
        )?;
        writeln!(f, "{}", text::rule('─', REPORT_WIDTH))?;
        for a in &self.rows {
            let [p1, p2, p3] = a.pillars_passed();
            writeln!(
                f,
                "{:<35} {:<12.3} {} {:<18} P1:{} P2:{} P3:{}",
                a.compound_name,
                a.final_score(),
                a.verdict.symbol(),
                a.verdict.as_str(),
                text::check(p1),
                text::check(p2),
                text::check(p3),
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportedGroups {
    pub hydroxyl: u32,
    pub ether: u32,
    pub amine: u32,
    pub carbonyl: u32,
    pub sulfonate: u32,
    pub sulfate: u32,
    pub iodine: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportedProperties {
    pub molecular_weight: f64,
    pub water_solubility: f64,
    pub charged_groups: u32,
}

/// Flat JSON record written per screened compound and read back by discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BcsExport {
    pub compound_name: String,
    pub formula: String,
    pub verdict: String,
    pub bcs_score: f64,
    pub pillar1_pass: bool,
    pub pillar2_pass: bool,
    pub pillar3_pass: bool,
    pub red_flags: Vec<String>,
    pub recommendation: String,
    pub functional_groups: ExportedGroups,
    pub properties: ExportedProperties,
}

impl BcsExport {
    pub fn new(analysis: &BcsAnalysis, compound: &CompoundData) -> Self {
        let g = &compound.functional_groups;
        let p = &compound.properties;
        let [pillar1_pass, pillar2_pass, pillar3_pass] = analysis.pillars_passed();
        Self {
            compound_name: analysis.compound_name.clone(),
            formula: compound.formula.clone(),
            verdict: analysis.verdict.as_str().to_string(),
            bcs_score: analysis.final_score(),
            pillar1_pass,
            pillar2_pass,
            pillar3_pass,
            red_flags: analysis.red_flags.clone(),
            recommendation: analysis.recommendation.to_string(),
            functional_groups: ExportedGroups {
                hydroxyl: g.hydroxyl,
                ether: g.ether,
                amine: g.amine,
                carbonyl: g.carbonyl,
                sulfonate: g.sulfonate,
                sulfate: g.sulfate,
                iodine: g.iodine,
            },
            properties: ExportedProperties {
                molecular_weight: p.molecular_weight,
                water_solubility: p.water_solubility,
                charged_groups: p.charged_groups,
            },
        }
    }
}

/// Writes `<prefix>_<slug>.json` into `dir` and returns its path.
pub fn export_json(
    dir: &Path,
    prefix: &str,
    analysis: &BcsAnalysis,
    compound: &CompoundData,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(format!("{prefix}_{}.json", compound.slug()));
    export::write_json(&path, &BcsExport::new(analysis, compound))?;
    Ok(path)
}

/// Running score through each modifier, indexed 0 to 4 on x.
pub fn cascade_series(analysis: &BcsAnalysis) -> ChartSeries {
    let points = analysis
        .score
        .cascade()
        .iter()
        .enumerate()
        .map(|(i, (_, y))| (i as f64, *y))
        .collect();
    ChartSeries::from_points(analysis.compound_name.clone(), points)
}
