//! Peptide screening: BCS on a compound view of the sequence, THz matching
//! against cancer-cell signatures, and a combined therapeutic index.

use crate::core::models::compound::{
    CompoundData, FunctionalGroupCount, MolecularProperties, RegulatoryStatus,
};
use crate::core::models::peptide::PeptideData;
use crate::engine::bcs::analyzer::{BcsAnalysis, analyze_compound};
use crate::engine::bcs::scoring::classify_score;
use crate::engine::bcs::{SafetyClass, Verdict};
use crate::engine::text;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;

pub const INVESTIGATIONAL_STATUS: &str = "Investigational (pre-clinical)";
const PEPTIDE_SOLUBILITY_MG_ML: f64 = 50.0;
const PEPTIDE_TIMESCALE_US: f64 = 0.001;
const MAX_PEPTIDE_MODIFIER: f64 = 1.5;
/// Used when a peptide has no BCS result to draw safety from.
const DEFAULT_SAFETY: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CancerType {
    Breast,
    Lung,
    Colorectal,
    Melanoma,
    Prostate,
    Normal,
}

/// Cancer types screened by the crocodilian pipeline.
pub const CANCER_PANEL: [CancerType; 5] = [
    CancerType::Breast,
    CancerType::Lung,
    CancerType::Colorectal,
    CancerType::Melanoma,
    CancerType::Prostate,
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThzSignature {
    /// THz
    pub peak_frequency: f64,
    pub bandwidth: f64,
    /// Relative to normal cells.
    pub relative_intensity: f64,
    pub mechanism: &'static str,
}

impl CancerType {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Breast => "breast_cancer",
            Self::Lung => "lung_cancer",
            Self::Colorectal => "colorectal_cancer",
            Self::Melanoma => "melanoma",
            Self::Prostate => "prostate_cancer",
            Self::Normal => "normal_cells",
        }
    }

    /// Unknown keys fall back to normal cells.
    pub fn from_key(key: &str) -> Self {
        let key = key.trim().to_lowercase().replace(' ', "_");
        [
            Self::Breast,
            Self::Lung,
            Self::Colorectal,
            Self::Melanoma,
            Self::Prostate,
        ]
        .into_iter()
        .find(|c| c.key() == key)
        .unwrap_or(Self::Normal)
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Breast => "Breast Cancer",
            Self::Lung => "Lung Cancer",
            Self::Colorectal => "Colorectal Cancer",
            Self::Melanoma => "Melanoma",
            Self::Prostate => "Prostate Cancer",
            Self::Normal => "Normal Cells",
        }
    }

    pub const fn signature(self) -> ThzSignature {
        let (peak_frequency, bandwidth, relative_intensity, mechanism) = match self {
            Self::Breast => (
                0.75,
                0.35,
                1.45,
                "Increased membrane fluidity + elevated water content",
            ),
            Self::Lung => (
                0.82,
                0.40,
                1.38,
                "Altered lipid composition + disordered water",
            ),
            Self::Colorectal => (
                0.68,
                0.32,
                1.52,
                "High membrane PS exposure + water dysregulation",
            ),
            Self::Melanoma => (
                0.90,
                0.45,
                1.60,
                "Extreme membrane disorder + high proliferation",
            ),
            Self::Prostate => (0.70, 0.30, 1.35, "Cholesterol depletion + anionic PS"),
            Self::Normal => (
                0.55,
                0.20,
                1.00,
                "Structured membranes + coherent water shells",
            ),
        };
        ThzSignature {
            peak_frequency,
            bandwidth,
            relative_intensity,
            mechanism,
        }
    }
}

impl fmt::Display for CancerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Compound view of a peptide for the regular BCS analyzer.
pub fn peptide_to_compound(peptide: &PeptideData) -> CompoundData {
    let s = &peptide.structure;
    let length = s.length as u32;
    let is_polymer = s.length > 20;

    CompoundData {
        name: peptide.name.clone(),
        formula: format!("Peptide ({} residues)", s.length),
        functional_groups: FunctionalGroupCount {
            hydroxyl: s.residue_count('S') + s.residue_count('T') + s.residue_count('Y'),
            amine: s.residue_count('K') + s.residue_count('R'),
            carbonyl: length.saturating_sub(1),
            carboxyl: s.residue_count('D') + s.residue_count('E') + 1,
            ..Default::default()
        },
        properties: MolecularProperties {
            molecular_weight: peptide.physics.molecular_weight,
            water_solubility: PEPTIDE_SOLUBILITY_MG_ML,
            charged_groups: s.net_charge.abs() as u32,
            is_natural: true,
            has_polymer_structure: is_polymer,
            polymer_units: if is_polymer { length } else { 0 },
            dynamic_timescale_us: PEPTIDE_TIMESCALE_US,
        },
        regulatory: RegulatoryStatus {
            fda_status: INVESTIGATIONAL_STATUS.to_string(),
            ..Default::default()
        },
        description: format!("{} antimicrobial peptide", peptide.species),
        cancer_relevance: String::new(),
        known_effects: peptide.known_effects.clone(),
        metabolites: Vec::new(),
    }
}

/// Amphipathicity, hydration and disulfide bonus, capped at 1.5.
pub fn peptide_modifier(peptide: &PeptideData) -> f64 {
    let s = &peptide.structure;
    let mut modifier = 1.0;

    if s.amphipathic_score > 0.7 {
        modifier += 0.3;
    } else if s.amphipathic_score > 0.5 {
        modifier += 0.15;
    }
    if s.length > 0 && peptide.physics.water_coordination_number / s.length as f64 >= 2.0 {
        modifier += 0.1;
    }
    if s.residue_count('C') >= 2 {
        modifier += 0.1;
    }
    f64::min(modifier, MAX_PEPTIDE_MODIFIER)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeptideBcsAnalysis {
    pub base: BcsAnalysis,
    pub modifier: f64,
    /// `min(base × modifier, 1)`.
    pub score: f64,
    /// Reclassified from the adjusted score.
    pub verdict: Verdict,
    pub safety_class: SafetyClass,
}

pub fn analyze_peptide(peptide: &PeptideData) -> PeptideBcsAnalysis {
    let base = analyze_compound(&peptide_to_compound(peptide));
    let modifier = peptide_modifier(peptide);
    let score = f64::min(base.final_score() * modifier, 1.0);
    let (verdict, safety_class, _) = classify_score(score);
    PeptideBcsAnalysis {
        base,
        modifier,
        score,
        verdict,
        safety_class,
    }
}

/// Gaussian match between a peptide frequency and a tissue peak, in `(0, 1]`.
pub fn thz_resonance(peptide_thz: f64, cancer: CancerType) -> f64 {
    let diff = peptide_thz - cancer.signature().peak_frequency;
    (-2.0 * diff * diff).exp()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectivityPrediction {
    pub membrane_selectivity: f64,
    pub thz_resonance: f64,
    pub normal_cell_safety: f64,
    pub therapeutic_index: f64,
    pub ic50_cancer_um: f64,
    pub ic50_normal_um: f64,
}

pub fn predict_selectivity(
    peptide: &PeptideData,
    cancer: CancerType,
    bcs_score: Option<f64>,
) -> SelectivityPrediction {
    let charge_selectivity = f64::min(peptide.structure.net_charge / 10.0, 1.0);
    let thz_resonance = thz_resonance(peptide.physics.thz_resonance_frequency, cancer);
    let normal_cell_safety = bcs_score.unwrap_or(DEFAULT_SAFETY);

    let membrane_selectivity = (charge_selectivity + peptide.structure.amphipathic_score) / 2.0;
    let therapeutic_index =
        0.4 * membrane_selectivity + 0.3 * thz_resonance + 0.3 * normal_cell_safety;

    SelectivityPrediction {
        membrane_selectivity,
        thz_resonance,
        normal_cell_safety,
        therapeutic_index,
        ic50_cancer_um: 50.0 * (1.0 - therapeutic_index),
        ic50_normal_um: 200.0 * normal_cell_safety,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrocodilianResult {
    pub peptide: PeptideData,
    pub bcs: PeptideBcsAnalysis,
    pub predictions: Vec<(CancerType, SelectivityPrediction)>,
}

pub fn analyze_crocodilian(peptides: &[PeptideData]) -> Vec<CrocodilianResult> {
    peptides
        .par_iter()
        .map(|peptide| {
            let bcs = analyze_peptide(peptide);
            let predictions = CANCER_PANEL
                .iter()
                .map(|&c| (c, predict_selectivity(peptide, c, Some(bcs.score))))
                .collect();
            CrocodilianResult {
                peptide: peptide.clone(),
                bcs,
                predictions,
            }
        })
        .collect()
}

impl CrocodilianResult {
    pub fn best_target(&self) -> Option<(CancerType, SelectivityPrediction)> {
        self.predictions
            .iter()
            .copied()
            .max_by(|a, b| a.1.therapeutic_index.total_cmp(&b.1.therapeutic_index))
    }
}

impl fmt::Display for CrocodilianResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f, "ANALYZING: {}", self.peptide.name)?;
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f)?;
        writeln!(f, "🔬 BCS Analysis:")?;
        writeln!(f, "   BCS Score: {:.3}", self.bcs.score)?;
        writeln!(f, "   Verdict: {}", self.bcs.verdict)?;
        writeln!(f)?;
        writeln!(f, "🎯 Cancer Targeting:")?;
        for (cancer, p) in &self.predictions {
            writeln!(f)?;
            writeln!(f, "   {cancer}:")?;
            writeln!(f, "      Membrane Selectivity: {:.3}", p.membrane_selectivity)?;
            writeln!(f, "      THz Resonance: {:.3}", p.thz_resonance)?;
            writeln!(f, "      Normal Cell Safety: {:.3}", p.normal_cell_safety)?;
            writeln!(f, "      Therapeutic Index: {:.3}", p.therapeutic_index)?;
            writeln!(f, "      Predicted IC50 (Cancer): {:.1} μM", p.ic50_cancer_um)?;
            writeln!(f, "      Predicted IC50 (Normal): {:.1} μM", p.ic50_normal_um)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignedPeptideResult {
    pub peptide: PeptideData,
    pub bcs: PeptideBcsAnalysis,
}

impl DesignedPeptideResult {
    /// Design-time therapeutic index carried by the database.
    pub fn therapeutic_index(&self) -> f64 {
        self.peptide.targeting.therapeutic_index
    }
}

impl fmt::Display for DesignedPeptideResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (p, s, t) = (
            &self.peptide,
            &self.peptide.structure,
            &self.peptide.targeting,
        );
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f, "{}", p.name)?;
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f)?;
        writeln!(f, "📋 BASIC INFORMATION:")?;
        writeln!(f, "   Sequence: {}", s.sequence)?;
        writeln!(f, "   Length: {} residues", s.length)?;
        writeln!(f, "   Net Charge: +{}", s.net_charge)?;
        writeln!(f, "   Amphipathic Score: {:.3}", s.amphipathic_score)?;
        writeln!(f, "   Molecular Weight: {:.0} Da", p.physics.molecular_weight)?;
        writeln!(f)?;
        writeln!(f, "🔬 BCS ANALYSIS:")?;
        writeln!(f, "   BCS Score: {:.3}", self.bcs.score)?;
        writeln!(f, "   Verdict: {}", self.bcs.verdict)?;
        writeln!(f)?;
        writeln!(f, "🎯 CANCER TARGETING PREDICTION:")?;
        writeln!(
            f,
            "   THz Resonance Frequency: {:.2} THz",
            p.physics.thz_resonance_frequency
        )?;
        writeln!(f, "   Target Cancer Types:")?;
        for c in &t.target_cancer_types {
            writeln!(f, "      • {c}")?;
        }
        writeln!(f)?;
        writeln!(f, "   Selectivity Metrics:")?;
        writeln!(f, "      Membrane Selectivity: {:.3}", t.membrane_selectivity)?;
        writeln!(f, "      Pore Formation Prob: {:.3}", t.pore_formation_probability)?;
        writeln!(f, "      Normal Cell Toxicity: {:.3}", t.normal_cell_toxicity)?;
        writeln!(f, "      Therapeutic Index: {:.2}", t.therapeutic_index)?;
        writeln!(f)?;
        writeln!(f, "   Mechanism: {}", t.mechanism)?;
        if !p.known_effects.is_empty() {
            writeln!(f)?;
            writeln!(f, "💡 KEY DESIGN FEATURES:")?;
            for e in &p.known_effects {
                writeln!(f, "   • {e}")?;
            }
        }
        Ok(())
    }
}

pub fn analyze_designed(peptides: &[PeptideData]) -> Vec<DesignedPeptideResult> {
    peptides
        .par_iter()
        .map(|peptide| DesignedPeptideResult {
            bcs: analyze_peptide(peptide),
            peptide: peptide.clone(),
        })
        .collect()
}

/// Designed peptides ranked by therapeutic index, with batch averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignRanking<'a> {
    pub ranked: Vec<&'a DesignedPeptideResult>,
    pub average_therapeutic_index: f64,
    pub average_bcs: f64,
    pub average_charge: f64,
}

impl<'a> DesignRanking<'a> {
    pub fn new(results: &'a [DesignedPeptideResult]) -> Self {
        let mut ranked: Vec<&DesignedPeptideResult> = results.iter().collect();
        ranked.sort_by(|a, b| b.therapeutic_index().total_cmp(&a.therapeutic_index()));

        let n = results.len().max(1) as f64;
        let mean = |f: fn(&DesignedPeptideResult) -> f64| results.iter().map(f).sum::<f64>() / n;
        Self {
            average_therapeutic_index: mean(DesignedPeptideResult::therapeutic_index),
            average_bcs: mean(|r| r.bcs.score),
            average_charge: mean(|r| r.peptide.structure.net_charge),
            ranked,
        }
    }

    pub fn best_bcs(&self) -> Option<&'a DesignedPeptideResult> {
        self.ranked
            .iter()
            .copied()
            .max_by(|a, b| a.bcs.score.total_cmp(&b.bcs.score))
    }
}

impl fmt::Display for DesignRanking<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f, "THERAPEUTIC INDEX RANKING")?;
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<6} {:<30} {:<8} {:<8} {:<8} {:<10}",
            "Rank", "Peptide", "TI", "BCS", "Charge", "THz (THz)"
        )?;
        writeln!(f, "{}", text::rule('-', 80))?;
        for (i, r) in self.ranked.iter().enumerate() {
            writeln!(
                f,
                "{:<6} {:<30} {:<8.2} {:<8.3} +{:<7.1} {:<10.2}",
                i + 1,
                r.peptide.name,
                r.therapeutic_index(),
                r.bcs.score,
                r.peptide.structure.net_charge,
                r.peptide.physics.thz_resonance_frequency
            )?;
        }

        writeln!(f)?;
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f, "SUMMARY STATISTICS")?;
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f)?;
        writeln!(
            f,
            "📊 Average Therapeutic Index: {:.2}",
            self.average_therapeutic_index
        )?;
        writeln!(f, "📊 Average BCS Score: {:.3}", self.average_bcs)?;
        writeln!(f, "📊 Average Net Charge: +{:.1}", self.average_charge)?;
        if let Some(best) = self.ranked.first() {
            writeln!(f)?;
            writeln!(
                f,
                "🏆 Best Therapeutic Index: {} (TI = {:.2})",
                best.peptide.name,
                best.therapeutic_index()
            )?;
        }
        if let Some(best) = self.best_bcs() {
            writeln!(f, "🔬 Best BCS Score: {}", best.peptide.name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::database::{bundled_crocodilian_peptides, bundled_designed_peptides};
    use crate::core::models::peptide::{PeptidePhysics, PeptideStructure};

    fn peptide(sequence: &str, charge: f64, amphipathic: f64, water: f64) -> PeptideData {
        PeptideData {
            name: "P".to_string(),
            species: "Test".to_string(),
            design_target: None,
            structure: PeptideStructure {
                sequence: sequence.to_string(),
                length: sequence.len(),
                net_charge: charge,
                amphipathic_score: amphipathic,
                ..Default::default()
            },
            physics: PeptidePhysics {
                molecular_weight: 2500.0,
                water_coordination_number: water,
                thz_resonance_frequency: 0.75,
                ..Default::default()
            },
            targeting: Default::default(),
            known_effects: vec![],
            references: vec![],
        }
    }

    #[test]
    fn compound_view_counts_side_chains() {
        let p = peptide("KRSTYDEC", 1.0, 0.0, 0.0);
        let c = peptide_to_compound(&p);
        let g = &c.functional_groups;
        assert_eq!(g.hydroxyl, 3);
        assert_eq!(g.amine, 2);
        assert_eq!(g.carbonyl, 7);
        assert_eq!(g.carboxyl, 3);
        assert!(!c.properties.has_polymer_structure);
        assert_eq!(c.regulatory.fda_status, INVESTIGATIONAL_STATUS);
    }

    #[test]
    fn long_peptides_are_polymers() {
        let p = peptide(&"K".repeat(22), 5.0, 0.0, 0.0);
        let c = peptide_to_compound(&p);
        assert!(c.properties.has_polymer_structure);
        assert_eq!(c.properties.polymer_units, 22);
        assert_eq!(c.properties.charged_groups, 5);
    }

    #[test]
    fn modifier_caps_at_one_and_a_half() {
        assert_eq!(peptide_modifier(&peptide("KKKK", 0.0, 0.0, 0.0)), 1.0);
        assert!((peptide_modifier(&peptide("KKKK", 0.0, 0.6, 0.0)) - 1.15).abs() < 1e-12);
        assert_eq!(peptide_modifier(&peptide("CCKK", 0.0, 0.9, 8.0)), 1.5);
    }

    #[test]
    fn resonance_peaks_at_signature() {
        assert_eq!(thz_resonance(0.75, CancerType::Breast), 1.0);
        let off = thz_resonance(1.75, CancerType::Breast);
        assert!((off - (-2.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn unknown_cancer_falls_back_to_normal() {
        assert_eq!(CancerType::from_key("Breast cancer"), CancerType::Breast);
        assert_eq!(CancerType::from_key("leukemia"), CancerType::Normal);
        assert_eq!(CancerType::Normal.signature().peak_frequency, 0.55);
    }

    #[test]
    fn selectivity_formula() {
        let p = peptide("KKKK", 5.0, 0.8, 0.0);
        let s = predict_selectivity(&p, CancerType::Breast, None);
        assert!((s.membrane_selectivity - 0.65).abs() < 1e-12);
        assert_eq!(s.normal_cell_safety, 0.5);
        let ti = 0.4 * 0.65 + 0.3 * 1.0 + 0.3 * 0.5;
        assert!((s.therapeutic_index - ti).abs() < 1e-12);
        assert!((s.ic50_cancer_um - 50.0 * (1.0 - ti)).abs() < 1e-12);
        assert!((s.ic50_normal_um - 100.0).abs() < 1e-12);
    }

    #[test]
    fn crocodilian_pipeline_covers_the_panel() {
        let peptides = bundled_crocodilian_peptides().unwrap();
        let results = analyze_crocodilian(&peptides);
        assert_eq!(results.len(), 3);
        for r in &results {
            assert_eq!(r.predictions.len(), CANCER_PANEL.len());
            assert!(r.bcs.score <= 1.0);
            assert!(r.best_target().is_some());
        }
    }

    #[test]
    fn designed_ranking_is_descending() {
        let peptides = bundled_designed_peptides().unwrap();
        let results = analyze_designed(&peptides);
        let ranking = DesignRanking::new(&results);
        assert_eq!(ranking.ranked.len(), 10);
        assert!(
            ranking
                .ranked
                .windows(2)
                .all(|w| w[0].therapeutic_index() >= w[1].therapeutic_index())
        );
        assert!(ranking.average_charge > 0.0);
        assert!(ranking.to_string().contains("SUMMARY STATISTICS"));
    }
}
