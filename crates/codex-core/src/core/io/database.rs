use crate::core::models::compound::{BarrierImpact, CompoundData};
use crate::core::models::fuel::FuelMolecule;
use crate::core::models::peptide::PeptideData;
use crate::core::models::target::MolecularTarget;
use crate::core::models::virus::VirusData;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

const FOOD_ADDITIVES: &str = include_str!("data/food_additives.toml");
const DERMATOLOGY: &str = include_str!("data/dermatology.toml");
const VIRUSES: &str = include_str!("data/viruses.toml");
const FUELS: &str = include_str!("data/fuels.toml");
const CROCODILIAN_PEPTIDES: &str = include_str!("data/crocodilian_peptides.toml");
const DESIGNED_PEPTIDES: &str = include_str!("data/designed_peptides.toml");
const MOLECULAR_TARGETS: &str = include_str!("data/molecular_targets.toml");

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("JSON parsing error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompoundDatabase {
    #[serde(default)]
    pub compound: Vec<CompoundData>,
    /// Ordered; the first matching entry wins.
    #[serde(default)]
    pub barrier: Vec<BarrierImpact>,
}

impl CompoundDatabase {
    /// Case-insensitive substring lookup by compound name.
    pub fn find_compound(&self, name: &str) -> Option<&CompoundData> {
        let needle = name.to_lowercase();
        self.compound
            .iter()
            .find(|c| c.name.to_lowercase().contains(&needle))
    }

    pub fn barrier_impact(&self, compound_name: &str) -> BarrierImpact {
        self.barrier
            .iter()
            .find(|b| b.matches(compound_name))
            .cloned()
            .unwrap_or_else(BarrierImpact::not_assessed)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VirusFile {
    #[serde(default)]
    virus: Vec<VirusData>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FuelFile {
    #[serde(default)]
    fuel: Vec<FuelMolecule>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PeptideFile {
    #[serde(default)]
    peptide: Vec<PeptideData>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TargetFile {
    #[serde(default)]
    target: Vec<MolecularTarget>,
}

fn parse<T: DeserializeOwned>(content: &str, origin: &str) -> Result<T, DatabaseError> {
    toml::from_str(content).map_err(|e| DatabaseError::Toml {
        path: origin.to_string(),
        source: e,
    })
}

fn read(path: &Path) -> Result<String, DatabaseError> {
    std::fs::read_to_string(path).map_err(|e| DatabaseError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T, DatabaseError> {
    let content = read(path)?;
    parse(&content, &path.to_string_lossy())
}

pub fn bundled_food_additives() -> Result<CompoundDatabase, DatabaseError> {
    parse(FOOD_ADDITIVES, "<bundled food_additives.toml>")
}

pub fn bundled_dermatology() -> Result<CompoundDatabase, DatabaseError> {
    parse(DERMATOLOGY, "<bundled dermatology.toml>")
}

pub fn bundled_viruses() -> Result<Vec<VirusData>, DatabaseError> {
    parse::<VirusFile>(VIRUSES, "<bundled viruses.toml>").map(|f| f.virus)
}

pub fn bundled_fuels() -> Result<Vec<FuelMolecule>, DatabaseError> {
    parse::<FuelFile>(FUELS, "<bundled fuels.toml>").map(|f| f.fuel)
}

pub fn bundled_crocodilian_peptides() -> Result<Vec<PeptideData>, DatabaseError> {
    parse::<PeptideFile>(CROCODILIAN_PEPTIDES, "<bundled crocodilian_peptides.toml>")
        .map(|f| f.peptide)
}

pub fn bundled_designed_peptides() -> Result<Vec<PeptideData>, DatabaseError> {
    parse::<PeptideFile>(DESIGNED_PEPTIDES, "<bundled designed_peptides.toml>").map(|f| f.peptide)
}

pub fn bundled_molecular_targets() -> Result<Vec<MolecularTarget>, DatabaseError> {
    parse::<TargetFile>(MOLECULAR_TARGETS, "<bundled molecular_targets.toml>").map(|f| f.target)
}

pub fn load_compounds(path: &Path) -> Result<CompoundDatabase, DatabaseError> {
    load(path)
}

pub fn load_viruses(path: &Path) -> Result<Vec<VirusData>, DatabaseError> {
    load::<VirusFile>(path).map(|f| f.virus)
}

pub fn load_fuels(path: &Path) -> Result<Vec<FuelMolecule>, DatabaseError> {
    load::<FuelFile>(path).map(|f| f.fuel)
}

pub fn load_peptides(path: &Path) -> Result<Vec<PeptideData>, DatabaseError> {
    load::<PeptideFile>(path).map(|f| f.peptide)
}

pub fn load_molecular_targets(path: &Path) -> Result<Vec<MolecularTarget>, DatabaseError> {
    load::<TargetFile>(path).map(|f| f.target)
}

/// Reads a JSON document such as a previously exported screening result.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, DatabaseError> {
    let content = read(path)?;
    serde_json::from_str(&content).map_err(|e| DatabaseError::Json {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn bundled_food_additives_hold_the_validation_set() {
        let db = bundled_food_additives().unwrap();
        let names: Vec<&str> = db.compound.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.len(), 6);
        for expected in [
            "Riboflavin",
            "Quercetin",
            "Erythrosine",
            "Steviol Glycosides",
            "Aspartame",
            "Polysorbate 80",
        ] {
            assert!(
                names.iter().any(|n| n.contains(expected)),
                "missing {expected}"
            );
        }
        assert!(db.barrier.is_empty());
    }

    #[test]
    fn bundled_dermatology_pairs_every_compound_with_a_barrier_profile() {
        let db = bundled_dermatology().unwrap();
        assert_eq!(db.compound.len(), 8);
        assert_eq!(db.barrier.len(), 8);
        for compound in &db.compound {
            let impact = db.barrier_impact(&compound.name);
            assert_ne!(impact.tewl_impact, "Unknown", "{}", compound.name);
        }
    }

    #[test]
    fn unknown_compound_gets_not_assessed_barrier_profile() {
        let db = bundled_dermatology().unwrap();
        let impact = db.barrier_impact("Zinc Oxide");
        assert_eq!(impact.coherence_mechanisms, vec!["Not assessed"]);
        assert_eq!(impact.tewl_impact, "Unknown");
    }

    #[test]
    fn bundled_collections_have_expected_sizes() {
        assert_eq!(bundled_viruses().unwrap().len(), 10);
        assert_eq!(bundled_fuels().unwrap().len(), 8);
        assert_eq!(bundled_crocodilian_peptides().unwrap().len(), 3);
        let designed = bundled_designed_peptides().unwrap();
        assert_eq!(designed.len(), 10);
        assert!(designed.iter().all(|p| p.design_target.is_some()));
        let targets = bundled_molecular_targets().unwrap();
        assert_eq!(targets.len(), 4);
        assert!(targets.iter().all(|t| t.timescale.len() == 3));
        assert_eq!(targets[3].molecular_weight, None);
    }

    #[test]
    fn find_compound_is_case_insensitive_substring_match() {
        let db = bundled_food_additives().unwrap();
        let found = db.find_compound("ERYTHRO").unwrap();
        assert!(found.name.starts_with("Erythrosine"));
        assert!(db.find_compound("caffeine").is_none());
    }

    #[test]
    fn load_compounds_reads_user_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            r#"
            [[compound]]
            name = "Ethanol"
            formula = "C2H6O"

            [compound.functional-groups]
            hydroxyl = 1

            [compound.properties]
            molecular-weight = 46.07
            water-solubility = 1000.0
            "#,
        )
        .unwrap();

        let db = load_compounds(&path).unwrap();
        assert_eq!(db.compound.len(), 1);
        assert_eq!(db.compound[0].functional_groups.hydroxyl, 1);
        assert_eq!(db.compound[0].regulatory.fda_status, "Unknown");
    }

    #[test]
    fn load_compounds_rejects_unknown_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(
            &path,
            r#"
            [[compound]]
            name = "X"
            formula = "X"
            colour = "blue"

            [compound.properties]
            molecular-weight = 1.0
            "#,
        )
        .unwrap();

        assert!(matches!(
            load_compounds(&path),
            Err(DatabaseError::Toml { .. })
        ));
    }

    #[test]
    fn load_reports_missing_file_as_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        match load_fuels(&path) {
            Err(DatabaseError::Io { path: p, .. }) => assert!(p.ends_with("absent.toml")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn load_json_reports_malformed_documents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bcs_x.json");
        fs::write(&path, "{ not json").unwrap();
        let result: Result<serde_json::Value, _> = load_json(&path);
        assert!(matches!(result, Err(DatabaseError::Json { .. })));
    }
}
