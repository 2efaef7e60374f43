use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct VirusData {
    pub name: String,
    /// Characteristic diameter in nanometres.
    pub dimension_nm: f64,
    #[serde(default)]
    pub observed_freq_ghz: Option<f64>,
    #[serde(default = "spherical")]
    pub structure_type: String,
    #[serde(default)]
    pub notes: String,
}

fn spherical() -> String {
    "spherical".to_string()
}

impl VirusData {
    pub fn new(name: impl Into<String>, dimension_nm: f64) -> Self {
        Self {
            name: name.into(),
            dimension_nm,
            observed_freq_ghz: None,
            structure_type: spherical(),
            notes: String::new(),
        }
    }

    pub fn with_observed_frequency(mut self, ghz: f64) -> Self {
        self.observed_freq_ghz = Some(ghz);
        self
    }
}
