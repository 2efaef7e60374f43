use crate::core::models::compound::{FunctionalGroupCount, MolecularProperties, RegulatoryStatus};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillarResult {
    /// A CONDITIONAL outcome counts as a pass.
    pub pass: bool,
    pub summary: String,
}

impl PillarResult {
    fn pass(summary: String) -> Self {
        Self {
            pass: true,
            summary,
        }
    }

    fn fail(summary: String) -> Self {
        Self {
            pass: false,
            summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemicAssessment {
    pub result: PillarResult,
    pub concerns: Vec<String>,
    pub benefits: Vec<String>,
}

/// Quantities print with at least one decimal, as in the curated database.
fn quantity(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 {
        format!("{x:.1}")
    } else {
        format!("{x}")
    }
}

/// Pillar 1: baseline safety and regulatory compliance.
pub fn regulatory(status: &RegulatoryStatus) -> PillarResult {
    if status.is_banned {
        return PillarResult::fail(format!("FAIL - Banned substance: {}", status.fda_status));
    }
    if status.is_carcinogen {
        return PillarResult::fail(format!(
            "FAIL - Classified as carcinogen: {}",
            status.fda_status
        ));
    }
    if status.fda_status.contains("GRAS") {
        return PillarResult::pass(format!("PASS - FDA GRAS status: {}", status.fda_status));
    }
    if status.has_warnings {
        return PillarResult::pass(format!(
            "CONDITIONAL - Approved but warnings exist: {}",
            status.warning_text
        ));
    }
    PillarResult::pass(format!("PASS - Regulatory status: {}", status.fda_status))
}

/// Pillar 2: physicochemical and aqueous compatibility.
pub fn aqueous(props: &MolecularProperties) -> PillarResult {
    let sol = quantity(props.water_solubility);
    let (solubility_ok, sol_text) = if props.water_solubility >= 1.0 {
        (true, format!("Good water solubility ({sol} mg/mL)"))
    } else if props.water_solubility >= 0.01 {
        (true, format!("Moderate solubility ({sol} mg/mL)"))
    } else {
        (false, format!("Poor water solubility ({sol} mg/mL)"))
    };

    if props.is_natural && !solubility_ok {
        return PillarResult::pass(format!(
            "PASS - {sol_text}, but natural compound with evolved metabolic integration"
        ));
    }

    let mw = quantity(props.molecular_weight);
    let (mw_concern, mw_text) = if props.molecular_weight > 1000.0 {
        (true, format!("High MW ({mw} Da) limits bioavailability"))
    } else {
        (false, format!("Appropriate MW ({mw} Da)"))
    };

    match (solubility_ok, mw_concern) {
        (true, false) => PillarResult::pass(format!("PASS - {sol_text}; {mw_text}")),
        (true, true) | (false, false) => {
            PillarResult::pass(format!("CONDITIONAL - {sol_text}; {mw_text}"))
        }
        (false, true) => PillarResult::fail(format!("FAIL - {sol_text}; {mw_text}")),
    }
}

struct EffectRule {
    all_of: &'static [&'static str],
    any_of: &'static [&'static str],
    label: &'static str,
}

const CONCERN_RULES: &[EffectRule] = &[
    EffectRule {
        all_of: &[],
        any_of: &["disrupt"],
        label: "Known disruptive effects on biological systems",
    },
    EffectRule {
        all_of: &["barrier"],
        any_of: &["degrad", "damage"],
        label: "Barrier degradation effects",
    },
    EffectRule {
        all_of: &[],
        any_of: &["neurolog", "neurotox"],
        label: "Neurological or neurotoxic effects",
    },
    EffectRule {
        all_of: &["inhibit"],
        any_of: &["transport", "neurotransmitter", "precursor"],
        label: "Inhibition of critical transport or neurotransmitter systems",
    },
    EffectRule {
        all_of: &["microbiome"],
        any_of: &["alter", "dysbiosis", "inconsistent"],
        label: "Microbiome alteration or dysbiosis effects",
    },
    EffectRule {
        all_of: &["inflammatory", "pro-"],
        any_of: &[],
        label: "Pro-inflammatory effects",
    },
    EffectRule {
        all_of: &["permeability", "increase"],
        any_of: &[],
        label: "Increased permeability (barrier disruption)",
    },
    EffectRule {
        all_of: &[],
        any_of: &["surfactant", "emulsifier"],
        label: "Surfactant/emulsifier - designed to disrupt interfaces",
    },
    EffectRule {
        all_of: &["glucose", "intolerance"],
        any_of: &[],
        label: "Metabolic disruption (glucose intolerance)",
    },
];

const BENEFIT_RULES: &[EffectRule] = &[
    EffectRule {
        all_of: &["antioxidant", "anti-"],
        any_of: &[],
        label: "Antioxidant properties → coherence-promoting",
    },
    EffectRule {
        all_of: &["anti-inflammatory"],
        any_of: &[],
        label: "Anti-inflammatory effects → coherence-promoting",
    },
    EffectRule {
        all_of: &["essential"],
        any_of: &[],
        label: "Essential nutrient → integrated into metabolic systems",
    },
];

impl EffectRule {
    fn matches(&self, text: &str) -> bool {
        self.all_of.iter().all(|k| text.contains(k))
            && (self.any_of.is_empty() || self.any_of.iter().any(|k| text.contains(k)))
    }
}

fn matching_labels(rules: &[EffectRule], text: &str) -> Vec<String> {
    rules
        .iter()
        .filter(|r| r.matches(text))
        .map(|r| r.label.to_string())
        .collect()
}

/// Pillar 3: systemic dynamic integrity. Keyword rules run over the
/// lower-cased known effects taken as one text.
pub fn systemic(
    groups: &FunctionalGroupCount,
    props: &MolecularProperties,
    known_effects: &[String],
) -> SystemicAssessment {
    let mut concerns = Vec::new();

    if groups.has_sulfur_anions() {
        concerns.push("Sulfonate/sulfate groups → intestinal barrier disruption".to_string());
    }
    if groups.iodine >= 2 {
        concerns.push("Multiple iodine atoms → endocrine disruption".to_string());
    }
    if props.has_polymer_structure && props.polymer_units > 10 {
        concerns.push("Large polymer → scale mismatch, epithelial damage".to_string());
    }
    let density = props.charge_density();
    if density > 3.0 {
        concerns.push(format!(
            "High charge density ({density:.1}) → water network disruption"
        ));
    }

    // One lowercased text for all effects; a rule's keywords may come from different entries.
    let effects = known_effects.join(" | ").to_lowercase();
    concerns.extend(matching_labels(CONCERN_RULES, &effects));
    let benefits = matching_labels(BENEFIT_RULES, &effects);

    let result = if concerns.is_empty() && !benefits.is_empty() {
        PillarResult::pass(format!("PASS - {}", benefits.join("; ")))
    } else if concerns.is_empty() {
        PillarResult::pass("PASS - No significant systemic concerns detected".to_string())
    } else if concerns.len() <= 1 && benefits.len() >= 2 {
        PillarResult::pass(format!(
            "CONDITIONAL - Benefits: {}; Minor concerns: {}",
            benefits.join("; "),
            concerns.join("; ")
        ))
    } else if concerns.len() >= 3 {
        PillarResult::fail(format!("FAIL - {}", concerns.join("; ")))
    } else {
        PillarResult::pass(format!(
            "CONDITIONAL - Concerns: {}; Benefits: {}",
            concerns.join("; "),
            benefits.join("; ")
        ))
    };

    SystemicAssessment {
        result,
        concerns,
        benefits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effects(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn regulatory_ban_overrides_gras() {
        let status = RegulatoryStatus {
            fda_status: "GRAS (revoked)".to_string(),
            is_banned: true,
            ..Default::default()
        };
        let r = regulatory(&status);
        assert!(!r.pass);
        assert!(r.summary.starts_with("FAIL - Banned"));
    }

    #[test]
    fn regulatory_warning_is_conditional_pass() {
        let status = RegulatoryStatus {
            fda_status: "Approved".to_string(),
            has_warnings: true,
            warning_text: "Phenylketonurics".to_string(),
            ..Default::default()
        };
        let r = regulatory(&status);
        assert!(r.pass);
        assert_eq!(
            r.summary,
            "CONDITIONAL - Approved but warnings exist: Phenylketonurics"
        );
    }

    #[test]
    fn regulatory_gras_wins_over_warning() {
        let status = RegulatoryStatus {
            fda_status: "GRAS".to_string(),
            has_warnings: true,
            ..Default::default()
        };
        assert!(regulatory(&status).summary.starts_with("PASS - FDA GRAS"));
    }

    #[test]
    fn aqueous_decision_table() {
        let p = |mw: f64, sol: f64, natural: bool| MolecularProperties {
            molecular_weight: mw,
            water_solubility: sol,
            is_natural: natural,
            ..Default::default()
        };

        let good = aqueous(&p(300.0, 10.0, false));
        assert!(good.pass && good.summary.starts_with("PASS"));

        let big = aqueous(&p(5000.0, 10.0, false));
        assert!(big.pass && big.summary.starts_with("CONDITIONAL"));

        let insoluble_small = aqueous(&p(300.0, 0.001, false));
        assert!(insoluble_small.pass && insoluble_small.summary.starts_with("CONDITIONAL"));

        let insoluble_big = aqueous(&p(5000.0, 0.001, false));
        assert!(!insoluble_big.pass);

        let natural = aqueous(&p(5000.0, 0.001, true));
        assert!(natural.pass);
        assert!(natural.summary.contains("natural compound"));
    }

    #[test]
    fn aqueous_summary_prints_whole_numbers_with_a_decimal() {
        let p = MolecularProperties {
            molecular_weight: 1000.0,
            water_solubility: 1000.0,
            ..Default::default()
        };
        assert_eq!(
            aqueous(&p).summary,
            "PASS - Good water solubility (1000.0 mg/mL); Appropriate MW (1000.0 Da)"
        );
    }

    #[test]
    fn systemic_without_concerns_lists_benefits() {
        let a = systemic(
            &FunctionalGroupCount::default(),
            &MolecularProperties::default(),
            &effects(&["Essential for energy metabolism"]),
        );
        assert!(a.result.pass);
        assert_eq!(
            a.result.summary,
            "PASS - Essential nutrient → integrated into metabolic systems"
        );
    }

    #[test]
    fn systemic_with_nothing_found_passes_plainly() {
        let a = systemic(
            &FunctionalGroupCount::default(),
            &MolecularProperties::default(),
            &[],
        );
        assert_eq!(
            a.result.summary,
            "PASS - No significant systemic concerns detected"
        );
    }

    #[test]
    fn systemic_fails_with_three_concerns() {
        let groups = FunctionalGroupCount {
            sulfate: 1,
            ..Default::default()
        };
        let a = systemic(
            &groups,
            &MolecularProperties::default(),
            &effects(&[
                "Emulsifier used in ice cream",
                "Increases intestinal permeability",
            ]),
        );
        assert!(a.concerns.len() >= 3, "{:?}", a.concerns);
        assert!(!a.result.pass);
    }

    #[test]
    fn one_concern_with_two_benefits_is_conditional() {
        let a = systemic(
            &FunctionalGroupCount::default(),
            &MolecularProperties::default(),
            &effects(&[
                "Potent antioxidant, anti-inflammatory",
                "Disrupts nothing important",
            ]),
        );
        assert_eq!(a.concerns.len(), 1);
        assert!(a.benefits.len() >= 2);
        assert!(a.result.pass);
        assert!(a.result.summary.starts_with("CONDITIONAL - Benefits:"));
    }

    #[test]
    fn rule_keywords_match_across_effect_entries() {
        let a = systemic(
            &FunctionalGroupCount::default(),
            &MolecularProperties::default(),
            &effects(&["PRO-oxidant at high dose", "Inflammatory marker rise"]),
        );
        assert_eq!(a.concerns, vec!["Pro-inflammatory effects".to_string()]);
    }
}
