use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FuelType {
    Hydrocarbon,
    Alcohol,
    Ester,
    Ether,
    Hydrogen,
    Hybrid,
    Novel,
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hydrocarbon => "Hydrocarbon",
            Self::Alcohol => "Alcohol",
            Self::Ester => "Ester",
            Self::Ether => "Ether",
            Self::Hydrogen => "Hydrogen",
            Self::Hybrid => "Hybrid",
            Self::Novel => "Novel",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WaterCompatibility {
    Immiscible,
    Hygroscopic,
    Miscible,
    Reactive,
    Neutral,
}

impl fmt::Display for WaterCompatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Immiscible => "Immiscible - Phase separates",
            Self::Hygroscopic => "Hygroscopic - Absorbs water",
            Self::Miscible => "Miscible - Mixes with water",
            Self::Reactive => "Reactive - Chemically reacts",
            Self::Neutral => "Neutral - Minimal interaction",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CombustionQuality {
    Excellent,
    #[default]
    Good,
    Moderate,
    Poor,
}

impl fmt::Display for CombustionQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Excellent => "Excellent - Clean, complete combustion",
            Self::Good => "Good - Minor byproducts",
            Self::Moderate => "Moderate - Some pollutants",
            Self::Poor => "Poor - Significant emissions",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct MolecularStructure {
    pub formula: String,
    pub carbon_count: u32,
    pub hydrogen_count: u32,
    pub oxygen_count: u32,
    pub nitrogen_count: u32,
    pub sulfur_count: u32,
    pub hydroxyl: u32,
    pub ether: u32,
    pub ester: u32,
    pub carbonyl: u32,
    pub double_bonds: u32,
    pub aromatic_rings: u32,
}

impl MolecularStructure {
    pub fn h_c_ratio(&self) -> f64 {
        if self.carbon_count == 0 {
            return 0.0;
        }
        self.hydrogen_count as f64 / self.carbon_count as f64
    }

    /// Oxygen share of all counted atoms.
    pub fn oxygen_content(&self) -> f64 {
        let total = self.carbon_count
            + self.hydrogen_count
            + self.oxygen_count
            + self.nitrogen_count
            + self.sulfur_count;
        if total == 0 {
            return 0.0;
        }
        self.oxygen_count as f64 / total as f64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct EnergeticProperties {
    pub molecular_weight: f64,
    /// MJ/kg, lower heating value
    pub energy_density_mass: f64,
    /// MJ/L
    pub energy_density_volume: f64,
    pub octane_rating: f64,
    pub cetane_rating: f64,
    /// kg/L
    pub density: f64,
    /// °C
    pub boiling_point: f64,
    /// °C
    pub flash_point: f64,
    pub vapor_pressure: f64,
    /// K
    pub adiabatic_flame_temp: f64,
    pub stoichiometric_air_fuel: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct WaterInteraction {
    /// g/L
    pub water_solubility: f64,
    /// ppm
    pub water_tolerance: f64,
    pub hygroscopicity: f64,
    pub water_compatibility: WaterCompatibility,
    #[serde(default)]
    pub disrupts_water_coherence: bool,
    #[serde(default)]
    pub forms_micelles: bool,
    #[serde(default)]
    pub creates_emulsions: bool,
    #[serde(default)]
    pub microbial_growth_risk: f64,
    #[serde(default)]
    pub corrosion_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct EmissionsProfile {
    /// kg CO2 per MJ
    pub co2_per_mj: f64,
    #[serde(default = "low")]
    pub co_emissions: String,
    #[serde(default = "low")]
    pub nox_emissions: String,
    #[serde(default = "low")]
    pub particulate_matter: String,
    #[serde(default = "low")]
    pub unburned_hydrocarbons: String,
    #[serde(default = "low")]
    pub soot_formation: String,
    #[serde(default)]
    pub combustion_quality: CombustionQuality,
}

fn low() -> String {
    "Low".to_string()
}

impl EmissionsProfile {
    /// Share of carbon that ends up as CO2 rather than CO or soot.
    pub fn carbon_efficiency(&self) -> f64 {
        match self.combustion_quality {
            CombustionQuality::Excellent => 0.98,
            CombustionQuality::Good => 0.95,
            CombustionQuality::Moderate => 0.90,
            CombustionQuality::Poor => 0.80,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FuelMolecule {
    pub name: String,
    pub common_name: String,
    pub fuel_type: FuelType,
    pub structure: MolecularStructure,
    pub energetics: EnergeticProperties,
    pub water_interaction: WaterInteraction,
    pub emissions: EmissionsProfile,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub renewable: bool,
    #[serde(default = "available")]
    pub commercial_availability: String,
    #[serde(default = "unit_cost")]
    pub cost_relative: f64,
}

fn available() -> String {
    "Available".to_string()
}

fn unit_cost() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn h_c_ratio_is_zero_without_carbon() {
        let hydrogen = MolecularStructure {
            formula: "H2".into(),
            hydrogen_count: 2,
            ..Default::default()
        };
        assert_eq!(hydrogen.h_c_ratio(), 0.0);
    }

    #[test]
    fn h_c_ratio_of_octane() {
        let octane = MolecularStructure {
            carbon_count: 8,
            hydrogen_count: 18,
            ..Default::default()
        };
        assert!((octane.h_c_ratio() - 2.25).abs() < 1e-12);
    }

    #[test]
    fn oxygen_content_is_atom_fraction() {
        let ethanol = MolecularStructure {
            carbon_count: 2,
            hydrogen_count: 6,
            oxygen_count: 1,
            ..Default::default()
        };
        assert!((ethanol.oxygen_content() - 1.0 / 9.0).abs() < 1e-12);
        assert_eq!(MolecularStructure::default().oxygen_content(), 0.0);
    }

    #[test]
    fn carbon_efficiency_follows_combustion_quality() {
        let mut e = EmissionsProfile {
            co2_per_mj: 0.07,
            co_emissions: low(),
            nox_emissions: low(),
            particulate_matter: low(),
            unburned_hydrocarbons: low(),
            soot_formation: low(),
            combustion_quality: CombustionQuality::Excellent,
        };
        assert_eq!(e.carbon_efficiency(), 0.98);
        e.combustion_quality = CombustionQuality::Poor;
        assert_eq!(e.carbon_efficiency(), 0.80);
    }
}
