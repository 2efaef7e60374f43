use super::{SafetyClass, Verdict};
use crate::core::models::compound::{FunctionalGroupCount, MolecularProperties};
use serde::Serialize;

/// Every intermediate of a BCS score, in the order the modifiers are applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub raw: f64,
    pub normalized: f64,
    pub solubility_modifier: f64,
    pub mw_modifier: f64,
    pub charge_modifier: f64,
    pub polymer_modifier: f64,
    /// Rounded to three decimals.
    pub final_score: f64,
}

impl ScoreBreakdown {
    /// Running score after each modifier: normalized, +solubility, +MW, +charge, final.
    pub fn cascade(&self) -> [(&'static str, f64); 5] {
        let after_sol = self.normalized * self.solubility_modifier;
        let after_mw = after_sol * self.mw_modifier;
        let after_charge = after_mw * self.charge_modifier;
        [
            ("Normalized", self.normalized),
            ("+Solubility", after_sol),
            ("+MW", after_mw),
            ("+Charge", after_charge),
            ("Final", self.final_score),
        ]
    }
}

pub(crate) fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// Returns `(raw, normalized)`.
pub fn raw_score(groups: &FunctionalGroupCount) -> (f64, f64) {
    let positive = groups.water_compatible_score();
    let negative = groups.water_disruptive_score();
    let raw = positive - negative;

    let normalized = if groups.total_groups() == 0 {
        0.0
    } else if positive + negative == 0.0 {
        0.5
    } else {
        positive / (positive + negative)
    };
    (raw, normalized.clamp(0.0, 1.0))
}

pub fn solubility_modifier(solubility_mg_ml: f64) -> f64 {
    if solubility_mg_ml < 1.0 { 0.7 } else { 1.0 }
}

pub fn mw_modifier(molecular_weight: f64) -> f64 {
    if molecular_weight < 200.0 {
        1.0
    } else if molecular_weight < 500.0 {
        0.95
    } else if molecular_weight < 1000.0 {
        0.85
    } else {
        0.70
    }
}

pub fn charge_density_modifier(charge_density: f64) -> f64 {
    if charge_density > 5.0 {
        0.4
    } else if charge_density > 3.0 {
        0.6
    } else {
        1.0
    }
}

pub fn polymer_modifier(is_polymer: bool, polymer_units: u32, dynamic_timescale_us: f64) -> f64 {
    if is_polymer && polymer_units > 10 && dynamic_timescale_us > 1.0 {
        0.5
    } else {
        1.0
    }
}

pub fn final_score(groups: &FunctionalGroupCount, props: &MolecularProperties) -> ScoreBreakdown {
    let (raw, normalized) = raw_score(groups);
    let solubility_modifier = solubility_modifier(props.water_solubility);
    let mw_modifier = mw_modifier(props.molecular_weight);
    let charge_modifier = charge_density_modifier(props.charge_density());
    let polymer_modifier = polymer_modifier(
        props.has_polymer_structure,
        props.polymer_units,
        props.dynamic_timescale_us,
    );

    let score =
        normalized * solubility_modifier * mw_modifier * charge_modifier * polymer_modifier;

    ScoreBreakdown {
        raw,
        normalized,
        solubility_modifier,
        mw_modifier,
        charge_modifier,
        polymer_modifier,
        final_score: round3(score),
    }
}

/// Automatic verdict band for a score. Each lower edge is inclusive.
pub fn classify_score(score: f64) -> (Verdict, SafetyClass, &'static str) {
    if score >= 0.85 {
        (
            Verdict::Excellent,
            SafetyClass::HighlyBiocompatible,
            "Essential nutrients, natural antioxidants, no adverse effects",
        )
    } else if score >= 0.70 {
        (
            Verdict::Good,
            SafetyClass::GenerallySafe,
            "Vitamins, natural sweeteners, beneficial at recommended doses",
        )
    } else if score >= 0.55 {
        (
            Verdict::Borderline,
            SafetyClass::SafeLowDose,
            "GRAS compounds with some concerns, may disrupt microbiome",
        )
    } else if score >= 0.40 {
        (
            Verdict::Moderate,
            SafetyClass::Concerning,
            "Mixed safety profile, contraindications exist, dose-dependent issues",
        )
    } else if score >= 0.25 {
        (
            Verdict::Poor,
            SafetyClass::Problematic,
            "Causes inflammation, microbiome disruption, regulatory concerns",
        )
    } else {
        (
            Verdict::VeryPoor,
            SafetyClass::HighlyDisruptive,
            "Severe toxicity, banned or restricted, used to induce disease in research",
        )
    }
}
