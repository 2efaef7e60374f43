use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct PeptideStructure {
    /// Single-letter code; may carry modification prefixes such as `cyclo-`.
    pub sequence: String,
    pub length: usize,
    /// At pH 7.4.
    pub net_charge: f64,
    pub hydrophobic_residues: u32,
    pub cationic_residues: u32,
    pub anionic_residues: u32,
    /// 0..=1, from the hydrophobic moment.
    pub amphipathic_score: f64,
}

impl PeptideStructure {
    pub fn residue_count(&self, residue: char) -> u32 {
        self.sequence.chars().filter(|&c| c == residue).count() as u32
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct PeptidePhysics {
    pub molecular_weight: f64,
    pub isoelectric_point: f64,
    pub hydrophobicity: f64,
    pub alpha_helix_propensity: f64,
    pub beta_sheet_propensity: f64,
    pub water_coordination_number: f64,
    /// THz
    pub thz_resonance_frequency: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct CancerTargetingScore {
    pub membrane_selectivity: f64,
    pub pore_formation_probability: f64,
    pub normal_cell_toxicity: f64,
    pub therapeutic_index: f64,
    pub target_cancer_types: Vec<String>,
    pub mechanism: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PeptideData {
    pub name: String,
    pub species: String,
    /// Cancer type a designed peptide was optimised for.
    #[serde(default)]
    pub design_target: Option<String>,
    pub structure: PeptideStructure,
    pub physics: PeptidePhysics,
    #[serde(default)]
    pub targeting: CancerTargetingScore,
    #[serde(default)]
    pub known_effects: Vec<String>,
    #[serde(default)]
    pub references: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn residue_count_counts_exact_letters_only() {
        let s = PeptideStructure {
            sequence: "cyclo-KWKC".to_string(),
            ..Default::default()
        };
        assert_eq!(s.residue_count('K'), 2);
        assert_eq!(s.residue_count('C'), 1);
        assert_eq!(s.residue_count('c'), 2);
    }

    #[test]
    fn peptide_deserializes_with_optional_sections_missing() {
        let text = r#"
            name = "P"
            species = "Designed"
            [structure]
            sequence = "KK"
            length = 2
            [physics]
            molecular-weight = 274.0
        "#;
        let peptide: PeptideData = toml::from_str(text).unwrap();
        assert!(peptide.design_target.is_none());
        assert_eq!(peptide.structure.length, 2);
        assert_eq!(peptide.targeting, CancerTargetingScore::default());
    }
}
