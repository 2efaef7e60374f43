use crate::core::models::compound::{FunctionalGroupCount, MolecularProperties};

/// Hard structural alarm thresholds.
pub fn structural(groups: &FunctionalGroupCount, props: &MolecularProperties) -> Vec<String> {
    let mut flags = Vec::new();

    if groups.sulfonate + groups.sulfate >= 2 {
        flags.push(
            "⚠️ CRITICAL: ≥2 sulfonate/sulfate groups detected (BCS penalty -4.0 minimum)"
                .to_string(),
        );
    }
    if groups.iodine >= 2 {
        flags.push(
            "⚠️ CRITICAL: ≥2 iodine atoms detected (Endocrine disruption risk)".to_string(),
        );
    }
    if props.molecular_weight > 10_000.0 && props.charged_groups > 0 {
        flags.push(
            "⚠️ CRITICAL: Scale mismatch - High MW polymer with charged groups".to_string(),
        );
    }
    if props.charge_density() > 5.0 {
        flags.push(
            "⚠️ CRITICAL: Severe charge density (>5) - Water network disruption".to_string(),
        );
    }
    flags
}

/// Combinations of features that compound each other.
pub fn mechanistic(groups: &FunctionalGroupCount, props: &MolecularProperties) -> Vec<String> {
    let mut flags = Vec::new();

    if groups.has_sulfur_anions() && props.has_polymer_structure {
        flags.push("⚡ Double disruption: Kosmotropic ions + polymer structure".to_string());
    }
    if groups.total_halogens() > 0 && props.charged_groups > 0 {
        flags.push("⚡ Additive toxicity: Halogenation + charged groups".to_string());
    }
    if props.charged_groups >= 3 && props.molecular_weight < 500.0 {
        flags.push("⚡ Chaotropic disruption: Multiple charges in small molecule".to_string());
    }
    flags
}

/// Structural flags followed by mechanistic flags.
pub fn detect(groups: &FunctionalGroupCount, props: &MolecularProperties) -> Vec<String> {
    let mut flags = structural(groups, props);
    flags.extend(mechanistic(groups, props));
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_compound_raises_no_flags() {
        let groups = FunctionalGroupCount {
            hydroxyl: 5,
            ..Default::default()
        };
        let props = MolecularProperties {
            molecular_weight: 300.0,
            ..Default::default()
        };
        assert!(detect(&groups, &props).is_empty());
    }

    #[test]
    fn erythrosine_like_profile_hits_iodine_and_halogen_flags() {
        let groups = FunctionalGroupCount {
            iodine: 4,
            ..Default::default()
        };
        let props = MolecularProperties {
            molecular_weight: 879.9,
            charged_groups: 2,
            ..Default::default()
        };
        let structural = structural(&groups, &props);
        let mechanistic = mechanistic(&groups, &props);
        assert_eq!(structural.len(), 1);
        assert!(structural[0].contains("iodine"));
        assert_eq!(mechanistic.len(), 1);
        assert!(mechanistic[0].contains("Halogenation"));
    }

    #[test]
    fn sulfated_polymer_is_doubly_flagged() {
        let groups = FunctionalGroupCount {
            sulfate: 2,
            ..Default::default()
        };
        let props = MolecularProperties {
            molecular_weight: 20_000.0,
            charged_groups: 2,
            has_polymer_structure: true,
            ..Default::default()
        };
        let flags = detect(&groups, &props);
        assert!(flags[0].contains("sulfonate/sulfate"));
        assert!(flags.iter().any(|f| f.contains("Scale mismatch")));
        assert!(flags.iter().any(|f| f.contains("Double disruption")));
    }

    #[test]
    fn small_multiply_charged_molecule_is_chaotropic() {
        let props = MolecularProperties {
            molecular_weight: 50.0,
            charged_groups: 3,
            ..Default::default()
        };
        let flags = detect(&FunctionalGroupCount::default(), &props);
        assert!(flags.iter().any(|f| f.contains("Severe charge density")));
        assert!(flags.iter().any(|f| f.contains("Chaotropic")));

        let heavier = MolecularProperties {
            molecular_weight: 100.0,
            ..props
        };
        let flags = detect(&FunctionalGroupCount::default(), &heavier);
        assert!(!flags.iter().any(|f| f.contains("Severe charge density")));
        assert!(flags.iter().any(|f| f.contains("Chaotropic")));
    }
}
