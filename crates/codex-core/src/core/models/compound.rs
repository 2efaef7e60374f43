use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionalGroup {
    Hydroxyl,
    Ether,
    Amine,
    Carbonyl,
    Carboxyl,
    Sulfonate,
    Sulfate,
    QuaternaryAmmonium,
    Phosphate,
    Carboxylate,
    Fluorine,
    Chlorine,
    Bromine,
    Iodine,
}

impl FunctionalGroup {
    pub const WATER_COMPATIBLE: [FunctionalGroup; 5] = [
        Self::Hydroxyl,
        Self::Ether,
        Self::Amine,
        Self::Carbonyl,
        Self::Carboxyl,
    ];

    pub const WATER_DISRUPTIVE: [FunctionalGroup; 9] = [
        Self::Sulfonate,
        Self::Sulfate,
        Self::QuaternaryAmmonium,
        Self::Phosphate,
        Self::Carboxylate,
        Self::Fluorine,
        Self::Chlorine,
        Self::Bromine,
        Self::Iodine,
    ];

    /// Signed contribution of one group to the water-network score.
    pub const fn weight(self) -> f64 {
        match self {
            Self::Hydroxyl => 1.0,
            Self::Ether => 0.5,
            Self::Amine => 0.8,
            Self::Carbonyl => 0.6,
            Self::Carboxyl => 0.7,
            Self::Sulfonate => -2.0,
            Self::Sulfate => -1.8,
            Self::QuaternaryAmmonium => -1.5,
            Self::Phosphate => -1.2,
            Self::Carboxylate => -0.8,
            Self::Fluorine => -0.3,
            Self::Chlorine => -0.5,
            Self::Bromine => -0.7,
            Self::Iodine => -0.8,
        }
    }

    pub const fn is_water_compatible(self) -> bool {
        self.weight() > 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FunctionalGroupCount {
    pub hydroxyl: u32,
    pub ether: u32,
    pub amine: u32,
    pub carbonyl: u32,
    pub carboxyl: u32,

    pub sulfonate: u32,
    pub sulfate: u32,
    pub quaternary_ammonium: u32,
    pub phosphate: u32,
    pub carboxylate: u32,
    pub fluorine: u32,
    pub chlorine: u32,
    pub bromine: u32,
    pub iodine: u32,

    pub repeating_units: u32,
    pub is_polymer: bool,
}

impl FunctionalGroupCount {
    pub fn count(&self, group: FunctionalGroup) -> u32 {
        match group {
            FunctionalGroup::Hydroxyl => self.hydroxyl,
            FunctionalGroup::Ether => self.ether,
            FunctionalGroup::Amine => self.amine,
            FunctionalGroup::Carbonyl => self.carbonyl,
            FunctionalGroup::Carboxyl => self.carboxyl,
            FunctionalGroup::Sulfonate => self.sulfonate,
            FunctionalGroup::Sulfate => self.sulfate,
            FunctionalGroup::QuaternaryAmmonium => self.quaternary_ammonium,
            FunctionalGroup::Phosphate => self.phosphate,
            FunctionalGroup::Carboxylate => self.carboxylate,
            FunctionalGroup::Fluorine => self.fluorine,
            FunctionalGroup::Chlorine => self.chlorine,
            FunctionalGroup::Bromine => self.bromine,
            FunctionalGroup::Iodine => self.iodine,
        }
    }

    /// Weighted contribution of a single group, signed.
    pub fn contribution(&self, group: FunctionalGroup) -> f64 {
        self.count(group) as f64 * group.weight()
    }

    pub fn total_groups(&self) -> u32 {
        FunctionalGroup::WATER_COMPATIBLE
            .iter()
            .chain(FunctionalGroup::WATER_DISRUPTIVE.iter())
            .map(|&g| self.count(g))
            .sum()
    }

    pub fn water_compatible_score(&self) -> f64 {
        FunctionalGroup::WATER_COMPATIBLE
            .iter()
            .map(|&g| self.contribution(g))
            .sum()
    }

    /// Magnitude of the disruptive contribution (always non-negative).
    pub fn water_disruptive_score(&self) -> f64 {
        FunctionalGroup::WATER_DISRUPTIVE
            .iter()
            .map(|&g| self.contribution(g))
            .sum::<f64>()
            .abs()
    }

    pub fn total_halogens(&self) -> u32 {
        self.fluorine + self.chlorine + self.bromine + self.iodine
    }

    pub fn has_sulfur_anions(&self) -> bool {
        self.sulfonate > 0 || self.sulfate > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct MolecularProperties {
    /// Da
    pub molecular_weight: f64,
    /// mg/mL
    pub water_solubility: f64,
    pub charged_groups: u32,
    pub is_natural: bool,
    pub has_polymer_structure: bool,
    pub polymer_units: u32,
    /// µs
    pub dynamic_timescale_us: f64,
}

impl MolecularProperties {
    /// Charged groups per 100 Da; zero for a massless record.
    pub fn charge_density(&self) -> f64 {
        if self.molecular_weight == 0.0 {
            return 0.0;
        }
        self.charged_groups as f64 / (self.molecular_weight / 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct RegulatoryStatus {
    pub fda_status: String,
    pub is_banned: bool,
    pub is_carcinogen: bool,
    pub has_warnings: bool,
    pub warning_text: String,
    pub notes: Vec<String>,
}

impl Default for RegulatoryStatus {
    fn default() -> Self {
        Self {
            fda_status: "Unknown".to_string(),
            is_banned: false,
            is_carcinogen: false,
            has_warnings: false,
            warning_text: String::new(),
            notes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct CompoundData {
    pub name: String,
    pub formula: String,
    #[serde(default)]
    pub functional_groups: FunctionalGroupCount,
    pub properties: MolecularProperties,
    #[serde(default)]
    pub regulatory: RegulatoryStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cancer_relevance: String,
    #[serde(default)]
    pub known_effects: Vec<String>,
    #[serde(default)]
    pub metabolites: Vec<String>,
}

impl CompoundData {
    /// File-name friendly form of the compound name.
    pub fn slug(&self) -> String {
        self.name
            .replace(' ', "_")
            .replace(['(', ')'], "")
            .to_lowercase()
    }
}

/// Skin-barrier profile for one dermatology ingredient, matched by name substring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct BarrierImpact {
    /// Lower-case fragment of the compound name.
    pub key: String,
    #[serde(default)]
    pub coherence_mechanisms: Vec<String>,
    #[serde(default)]
    pub decoherence_mechanisms: Vec<String>,
    pub tewl_impact: String,
    pub optimal_concentration: String,
    pub skin_layer_target: String,
}

impl BarrierImpact {
    pub fn not_assessed() -> Self {
        Self {
            key: String::new(),
            coherence_mechanisms: vec!["Not assessed".to_string()],
            decoherence_mechanisms: vec!["Not assessed".to_string()],
            tewl_impact: "Unknown".to_string(),
            optimal_concentration: "Not specified".to_string(),
            skin_layer_target: "Not specified".to_string(),
        }
    }

    pub fn matches(&self, compound_name: &str) -> bool {
        compound_name.to_lowercase().contains(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> FunctionalGroupCount {
        FunctionalGroupCount {
            hydroxyl: 2,
            ether: 1,
            carbonyl: 1,
            sulfate: 1,
            iodine: 2,
            ..Default::default()
        }
    }

    #[test]
    fn total_groups_sums_every_counted_group() {
        assert_eq!(groups().total_groups(), 7);
    }

    #[test]
    fn water_compatible_score_is_weighted_sum() {
        let expected = 2.0 * 1.0 + 1.0 * 0.5 + 1.0 * 0.6;
        assert!((groups().water_compatible_score() - expected).abs() < 1e-12);
    }

    #[test]
    fn water_disruptive_score_is_reported_as_magnitude() {
        let expected = 1.8 + 2.0 * 0.8;
        assert!((groups().water_disruptive_score() - expected).abs() < 1e-12);
    }

    #[test]
    fn repeating_units_do_not_count_as_groups() {
        let g = FunctionalGroupCount {
            repeating_units: 40,
            is_polymer: true,
            ..Default::default()
        };
        assert_eq!(g.total_groups(), 0);
    }

    #[test]
    fn charge_density_of_zero_mass_is_zero() {
        let props = MolecularProperties {
            charged_groups: 3,
            ..Default::default()
        };
        assert_eq!(props.charge_density(), 0.0);
    }

    #[test]
    fn charge_density_is_per_hundred_dalton() {
        let props = MolecularProperties {
            molecular_weight: 400.0,
            charged_groups: 2,
            ..Default::default()
        };
        assert!((props.charge_density() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn slug_strips_parentheses_and_spaces() {
        let compound = CompoundData {
            name: "Riboflavin (Vitamin B2)".to_string(),
            formula: String::new(),
            functional_groups: Default::default(),
            properties: Default::default(),
            regulatory: Default::default(),
            description: String::new(),
            cancer_relevance: String::new(),
            known_effects: vec![],
            metabolites: vec![],
        };
        assert_eq!(compound.slug(), "riboflavin_vitamin_b2");
    }

    #[test]
    fn weights_split_into_compatible_and_disruptive_sets() {
        assert!(
            FunctionalGroup::WATER_COMPATIBLE
                .iter()
                .all(|g| g.is_water_compatible())
        );
        assert!(
            FunctionalGroup::WATER_DISRUPTIVE
                .iter()
                .all(|g| !g.is_water_compatible())
        );
    }
}
