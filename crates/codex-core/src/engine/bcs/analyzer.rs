use super::pillars::{self, PillarResult};
use super::scoring::{self, ScoreBreakdown};
use super::{SafetyClass, Verdict, red_flags};
use crate::core::models::compound::{CompoundData, FunctionalGroup};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

pub const BREAKDOWN_COMPATIBLE: &str = "Water-Compatible Groups";
pub const BREAKDOWN_DISRUPTIVE: &str = "Water-Disruptive Groups";

/// Complete screening result for one compound.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BcsAnalysis {
    pub compound_name: String,
    pub regulatory: PillarResult,
    pub aqueous: PillarResult,
    pub systemic: PillarResult,
    pub score: ScoreBreakdown,
    /// Band of the final score before pillar overrides.
    pub automatic_verdict: Verdict,
    pub verdict: Verdict,
    pub safety_class: SafetyClass,
    pub class_description: &'static str,
    /// Ordered `(label, signed contribution)` pairs.
    pub functional_group_breakdown: Vec<(&'static str, f64)>,
    pub red_flags: Vec<String>,
    pub concerns: Vec<String>,
    pub benefits: Vec<String>,
    pub recommendation: &'static str,
    pub mechanistic_prediction: &'static str,
}

impl BcsAnalysis {
    pub fn final_score(&self) -> f64 {
        self.score.final_score
    }

    pub fn pillars_passed(&self) -> [bool; 3] {
        [self.regulatory.pass, self.aqueous.pass, self.systemic.pass]
    }
}

/// Pillar failures override the score; see the branch order.
pub fn final_verdict(p1: bool, p2: bool, p3: bool, score: f64, automatic: Verdict) -> Verdict {
    if !p1 || !p3 || (!p2 && score < 0.55) {
        Verdict::Fail
    } else if !p2 {
        Verdict::ConditionalPass
    } else if score >= 0.70 {
        Verdict::Pass
    } else {
        automatic
    }
}

pub fn recommendation(verdict: Verdict) -> &'static str {
    if verdict.is_biocompatible() {
        "✅ BIOCOMPATIBLE - Safe for use in formulations aligned with Codex principles"
    } else if verdict == Verdict::ConditionalPass {
        "⚠️ CONDITIONAL - Use with caution; address specific concerns noted"
    } else {
        "❌ NON-BIOCOMPATIBLE - Exclude from formulations; fundamentally incompatible"
    }
}

fn mechanistic_prediction(compound: &CompoundData, systemic_pass: bool) -> &'static str {
    let groups = &compound.functional_groups;
    if systemic_pass {
        "Expect: Minimal disruption to systemic coherence; compatible with biological dynamics"
    } else if groups.has_sulfur_anions() {
        "Expect: Intestinal mucus layer degradation, increased permeability, \
         pro-inflammatory dysbiosis, chronic inflammation"
    } else if groups.iodine >= 2 {
        "Expect: Thyroid hormone disruption, endocrine dysregulation, \
         potential carcinogenic effects via chronic TSH elevation"
    } else if compound.properties.has_polymer_structure {
        "Expect: Scale mismatch with cellular dynamics, epithelial damage, \
         barrier dysfunction, inflammatory response"
    } else {
        "Expect: Disruption of systemic coherence through multiple pathways"
    }
}

fn group_breakdown(compound: &CompoundData) -> Vec<(&'static str, f64)> {
    let g = &compound.functional_groups;
    vec![
        (BREAKDOWN_COMPATIBLE, g.water_compatible_score()),
        (BREAKDOWN_DISRUPTIVE, -g.water_disruptive_score()),
        ("Hydroxyl (-OH)", g.contribution(FunctionalGroup::Hydroxyl)),
        ("Ether (-O-)", g.contribution(FunctionalGroup::Ether)),
        ("Amine (-NH2)", g.contribution(FunctionalGroup::Amine)),
        ("Carbonyl (C=O)", g.contribution(FunctionalGroup::Carbonyl)),
        ("Sulfonate (-SO3-)", g.contribution(FunctionalGroup::Sulfonate)),
        ("Sulfate (-OSO3-)", g.contribution(FunctionalGroup::Sulfate)),
        ("Iodine (I)", g.contribution(FunctionalGroup::Iodine)),
    ]
}

pub fn analyze_compound(compound: &CompoundData) -> BcsAnalysis {
    let score = scoring::final_score(&compound.functional_groups, &compound.properties);
    let (automatic_verdict, safety_class, class_description) =
        scoring::classify_score(score.final_score);

    let regulatory = pillars::regulatory(&compound.regulatory);
    let aqueous = pillars::aqueous(&compound.properties);
    let systemic = pillars::systemic(
        &compound.functional_groups,
        &compound.properties,
        &compound.known_effects,
    );

    let verdict = final_verdict(
        regulatory.pass,
        aqueous.pass,
        systemic.result.pass,
        score.final_score,
        automatic_verdict,
    );
    debug!(
        compound = %compound.name,
        score = score.final_score,
        verdict = %verdict,
        "Screened compound."
    );

    BcsAnalysis {
        compound_name: compound.name.clone(),
        red_flags: red_flags::detect(&compound.functional_groups, &compound.properties),
        functional_group_breakdown: group_breakdown(compound),
        mechanistic_prediction: mechanistic_prediction(compound, systemic.result.pass),
        recommendation: recommendation(verdict),
        regulatory,
        aqueous,
        systemic: systemic.result,
        concerns: systemic.concerns,
        benefits: systemic.benefits,
        score,
        automatic_verdict,
        verdict,
        safety_class,
        class_description,
    }
}

/// Screens every compound in parallel; output order follows input order.
pub fn analyze_batch(compounds: &[CompoundData]) -> Vec<BcsAnalysis> {
    compounds.par_iter().map(analyze_compound).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::database::bundled_food_additives;
    use crate::core::models::compound::{
        FunctionalGroupCount, MolecularProperties, RegulatoryStatus,
    };

    fn compound(
        groups: FunctionalGroupCount,
        props: MolecularProperties,
        regulatory: RegulatoryStatus,
    ) -> CompoundData {
        CompoundData {
            name: "Test".to_string(),
            formula: "X".to_string(),
            functional_groups: groups,
            properties: props,
            regulatory,
            description: String::new(),
            cancer_relevance: String::new(),
            known_effects: vec![],
            metabolites: vec![],
        }
    }

    #[test]
    fn verdict_override_order() {
        assert_eq!(final_verdict(false, true, true, 0.9, Verdict::Excellent), Verdict::Fail);
        assert_eq!(final_verdict(true, true, false, 0.9, Verdict::Excellent), Verdict::Fail);
        assert_eq!(final_verdict(true, false, true, 0.5, Verdict::Moderate), Verdict::Fail);
        assert_eq!(
            final_verdict(true, false, true, 0.6, Verdict::Borderline),
            Verdict::ConditionalPass
        );
        assert_eq!(final_verdict(true, true, true, 0.70, Verdict::Good), Verdict::Pass);
        assert_eq!(
            final_verdict(true, true, true, 0.5, Verdict::Moderate),
            Verdict::Moderate
        );
    }

    #[test]
    fn hydroxyl_rich_soluble_compound_passes() {
        let c = compound(
            FunctionalGroupCount {
                hydroxyl: 3,
                ..Default::default()
            },
            MolecularProperties {
                molecular_weight: 92.1,
                water_solubility: 1000.0,
                is_natural: true,
                ..Default::default()
            },
            RegulatoryStatus {
                fda_status: "GRAS".to_string(),
                ..Default::default()
            },
        );
        let a = analyze_compound(&c);
        assert_eq!(a.final_score(), 1.0);
        assert_eq!(a.verdict, Verdict::Pass);
        assert_eq!(a.pillars_passed(), [true, true, true]);
        assert!(a.red_flags.is_empty());
        assert!(a.recommendation.starts_with("✅"));
    }

    #[test]
    fn banned_compound_fails_regardless_of_score() {
        let c = compound(
            FunctionalGroupCount {
                hydroxyl: 3,
                ..Default::default()
            },
            MolecularProperties {
                molecular_weight: 92.1,
                water_solubility: 1000.0,
                ..Default::default()
            },
            RegulatoryStatus {
                is_banned: true,
                ..Default::default()
            },
        );
        let a = analyze_compound(&c);
        assert_eq!(a.automatic_verdict, Verdict::Excellent);
        assert_eq!(a.verdict, Verdict::Fail);
        assert!(a.recommendation.starts_with("❌"));
    }

    #[test]
    fn breakdown_keeps_label_order_and_signs() {
        let c = compound(
            FunctionalGroupCount {
                hydroxyl: 2,
                iodine: 4,
                ..Default::default()
            },
            MolecularProperties::default(),
            RegulatoryStatus::default(),
        );
        let a = analyze_compound(&c);
        let labels: Vec<&str> = a.functional_group_breakdown.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels[0], BREAKDOWN_COMPATIBLE);
        assert_eq!(labels[8], "Iodine (I)");
        assert!((a.functional_group_breakdown[1].1 + 3.2).abs() < 1e-12);
        assert!((a.functional_group_breakdown[8].1 + 3.2).abs() < 1e-12);
    }

    #[test]
    fn failed_systemic_pillar_with_sulfate_predicts_mucus_damage() {
        let mut c = compound(
            FunctionalGroupCount {
                sulfate: 1,
                ..Default::default()
            },
            MolecularProperties {
                molecular_weight: 288.4,
                water_solubility: 100.0,
                charged_groups: 1,
                ..Default::default()
            },
            RegulatoryStatus::default(),
        );
        c.known_effects = vec!["Anionic surfactant that disrupts lipid bilayers".to_string()];
        let a = analyze_compound(&c);
        assert!(!a.systemic.pass);
        assert_eq!(a.concerns.len(), 3);
        assert!(a.mechanistic_prediction.contains("mucus layer"));
    }

    #[test]
    fn batch_preserves_input_order() {
        let db = bundled_food_additives().unwrap();
        let analyses = analyze_batch(&db.compound);
        let names: Vec<&str> = analyses.iter().map(|a| a.compound_name.as_str()).collect();
        let expected: Vec<&str> = db.compound.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn bundled_erythrosine_is_not_biocompatible() {
        let db = bundled_food_additives().unwrap();
        let a = analyze_compound(db.find_compound("erythrosine").unwrap());
        assert!(!a.verdict.is_biocompatible());
        assert!(a.red_flags.iter().any(|f| f.contains("iodine")));
    }
}
