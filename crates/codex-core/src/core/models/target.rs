use serde::{Deserialize, Serialize};

/// Characteristic time of one molecular process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ProcessTimescale {
    pub process: String,
    pub tau_s: f64,
}

/// A cancer-relevant structure that a drive frequency could be tuned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct MolecularTarget {
    pub name: String,
    /// Da; unset for extended structures such as a bilayer.
    #[serde(default)]
    pub molecular_weight: Option<f64>,
    /// Characteristic size in nanometres.
    pub dimension_nm: f64,
    #[serde(default)]
    pub function: String,
    #[serde(default)]
    pub cancer_relevance: String,
    #[serde(default)]
    pub timescale: Vec<ProcessTimescale>,
}

impl MolecularTarget {
    pub fn new(name: impl Into<String>, dimension_nm: f64) -> Self {
        Self {
            name: name.into(),
            molecular_weight: None,
            dimension_nm,
            function: String::new(),
            cancer_relevance: String::new(),
            timescale: Vec::new(),
        }
    }

    pub fn with_timescale(mut self, process: impl Into<String>, tau_s: f64) -> Self {
        self.timescale.push(ProcessTimescale {
            process: process.into(),
            tau_s,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membrane_target_needs_no_molecular_weight() {
        let text = r#"
            name = "Cancer cell membrane"
            dimension-nm = 7.5
            [[timescale]]
            process = "Lipid flip-flop"
            tau-s = 1.0
        "#;
        let target: MolecularTarget = toml::from_str(text).unwrap();
        assert_eq!(target.molecular_weight, None);
        assert_eq!(target.timescale[0].tau_s, 1.0);
        assert!(target.function.is_empty());
    }

    #[test]
    fn builder_appends_timescales_in_order() {
        let t = MolecularTarget::new("X", 5.0)
            .with_timescale("a", 1e-3)
            .with_timescale("b", 1e-6);
        let processes: Vec<&str> = t.timescale.iter().map(|p| p.process.as_str()).collect();
        assert_eq!(processes, ["a", "b"]);
    }
}
