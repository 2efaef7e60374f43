use crate::core::constants::RARAMA_CONSTANT_GHZ_ANGSTROM;
use crate::core::models::fuel::{
    CombustionQuality, EmissionsProfile, EnergeticProperties, FuelMolecule, MolecularStructure,
    WaterCompatibility, WaterInteraction,
};
use crate::engine::bcs::scoring::round3;
use crate::engine::text;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;

/// Å per C-C bond in a straight chain.
const BOND_LENGTH_ANGSTROM: f64 = 1.25;
/// Effective length used for carbon-free fuels such as hydrogen.
const CARBON_FREE_LENGTH_ANGSTROM: f64 = 3.0;

/// Polar groups per 100 Da, rounded to three decimals.
pub fn charge_density(structure: &MolecularStructure, energetics: &EnergeticProperties) -> f64 {
    if energetics.molecular_weight == 0.0 {
        return 0.0;
    }
    let polar = f64::from(structure.hydroxyl) * 1.0
        + f64::from(structure.ester) * 0.8
        + f64::from(structure.ether) * 0.5
        + f64::from(structure.carbonyl) * 0.7
        + f64::from(structure.oxygen_count) * 0.3;
    round3(polar / (energetics.molecular_weight / 100.0))
}

/// Codex resonance of the carbon backbone in THz, rounded to three decimals.
pub fn thz_signature(structure: &MolecularStructure) -> f64 {
    let length = if structure.carbon_count > 0 {
        f64::from(structure.carbon_count) * BOND_LENGTH_ANGSTROM
    } else {
        CARBON_FREE_LENGTH_ANGSTROM
    };
    let mut thz = RARAMA_CONSTANT_GHZ_ANGSTROM / length / 1000.0;
    if structure.aromatic_rings > 0 {
        thz *= 1.1;
    }
    if structure.double_bonds > 0 {
        thz *= 1.05;
    }
    round3(thz)
}

/// Resistance to water uptake; immiscible fuels score best.
pub fn water_coherence_score(water: &WaterInteraction, charge_density: f64) -> f64 {
    let mut score: f64 = match water.water_compatibility {
        WaterCompatibility::Immiscible | WaterCompatibility::Neutral => 1.0,
        WaterCompatibility::Hygroscopic => 0.5,
        WaterCompatibility::Miscible => 0.3,
        WaterCompatibility::Reactive => 0.2,
    };

    score *= if water.water_solubility < 0.1 {
        1.0
    } else if water.water_solubility < 10.0 {
        0.8
    } else {
        0.5
    };
    score *= 1.0 - water.hygroscopicity * 0.5;
    if charge_density > 3.0 {
        score *= 0.6;
    } else if charge_density > 1.0 {
        score *= 0.8;
    }
    score *= 1.0 - water.microbial_growth_risk * 0.3;

    round3(score.clamp(0.0, 1.0))
}

pub fn energy_efficiency_score(
    energetics: &EnergeticProperties,
    structure: &MolecularStructure,
    emissions: &EmissionsProfile,
) -> f64 {
    let mass = (energetics.energy_density_mass / 44.0).min(1.0);
    let volume = (energetics.energy_density_volume / 32.0).min(1.0);

    let hc = structure.h_c_ratio();
    let hc_score = if (2.0..=2.5).contains(&hc) {
        1.0
    } else if hc > 2.5 {
        0.9
    } else {
        (hc / 2.0).max(0.3)
    };

    let quality = match emissions.combustion_quality {
        CombustionQuality::Excellent => 1.0,
        CombustionQuality::Good => 0.85,
        CombustionQuality::Moderate => 0.65,
        CombustionQuality::Poor => 0.4,
    };

    round3(mass * 0.4 + volume * 0.3 + hc_score * 0.2 + quality * 0.1)
}

pub fn storage_stability_score(water: &WaterInteraction, structure: &MolecularStructure) -> f64 {
    let mut score: f64 = if water.water_tolerance > 1000.0 {
        1.0
    } else if water.water_tolerance > 500.0 {
        0.9
    } else {
        0.7
    };
    score *= 1.0 - water.microbial_growth_risk;
    score *= 1.0 - water.corrosion_factor * 0.5;
    if structure.double_bonds > 3 {
        score *= 0.7;
    } else if structure.double_bonds > 0 {
        score *= 0.9;
    }
    if structure.aromatic_rings > 0 {
        score *= 1.05;
    }
    round3(score.clamp(0.0, 1.0))
}

pub fn environmental_score(
    emissions: &EmissionsProfile,
    renewable: bool,
    structure: &MolecularStructure,
) -> f64 {
    let mut score: f64 = match emissions.combustion_quality {
        CombustionQuality::Excellent => 1.0,
        CombustionQuality::Good => 0.8,
        CombustionQuality::Moderate => 0.5,
        CombustionQuality::Poor => 0.2,
    };
    score *= if emissions.co2_per_mj < 0.060 {
        1.2
    } else if emissions.co2_per_mj < 0.070 {
        1.0
    } else {
        0.8
    };
    if renewable {
        score *= 1.3;
    }
    if structure.sulfur_count > 0 {
        score *= 0.6;
    }
    if structure.nitrogen_count > 0 {
        score *= 0.8;
    }
    round3(score.clamp(0.0, 1.0))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelAnalysis {
    pub name: String,
    pub common_name: String,
    pub charge_density: f64,
    pub thz_signature: f64,
    pub water_coherence_score: f64,
    pub energy_efficiency_score: f64,
    pub storage_stability_score: f64,
    pub environmental_score: f64,
    pub codex_score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

pub fn analyze_fuel(fuel: &FuelMolecule) -> FuelAnalysis {
    let charge_density = charge_density(&fuel.structure, &fuel.energetics);
    let thz_signature = thz_signature(&fuel.structure);
    let water = water_coherence_score(&fuel.water_interaction, charge_density);
    let efficiency = energy_efficiency_score(&fuel.energetics, &fuel.structure, &fuel.emissions);
    let storage = storage_stability_score(&fuel.water_interaction, &fuel.structure);
    let environmental = environmental_score(&fuel.emissions, fuel.renewable, &fuel.structure);

    let codex_score =
        round3(efficiency * 0.35 + water * 0.25 + storage * 0.20 + environmental * 0.20);

    let mut strengths = Vec::new();
    if efficiency > 0.8 {
        strengths.push(format!("High energy efficiency ({efficiency:.2})"));
    }
    if water > 0.8 {
        strengths.push(format!("Excellent water resistance ({water:.2})"));
    }
    if storage > 0.8 {
        strengths.push(format!("Very stable in storage ({storage:.2})"));
    }
    if environmental > 0.7 {
        strengths.push(format!("Low environmental impact ({environmental:.2})"));
    }
    if fuel.renewable {
        strengths.push("Renewable fuel source".to_string());
    }

    let mut weaknesses = Vec::new();
    if efficiency < 0.5 {
        weaknesses.push(format!("Low energy density ({efficiency:.2})"));
    }
    if water < 0.5 {
        weaknesses.push(format!("Poor water resistance ({water:.2})"));
    }
    if storage < 0.5 {
        weaknesses.push(format!("Storage instability issues ({storage:.2})"));
    }
    if environmental < 0.5 {
        weaknesses.push(format!("High environmental impact ({environmental:.2})"));
    }
    if charge_density > 3.0 {
        weaknesses.push("High charge density disrupts water coherence".to_string());
    }

    let mut recommendations = Vec::new();
    if fuel.water_interaction.hygroscopicity > 0.5 {
        recommendations.push("Add water scavengers or desiccants".to_string());
    }
    if fuel.structure.double_bonds > 2 {
        recommendations.push("Add antioxidants to prevent degradation".to_string());
    }
    if environmental < 0.6 {
        recommendations.push("Consider blending with renewable fuels".to_string());
    }
    if charge_density > 2.0 {
        recommendations.push("Minimize polar functional groups".to_string());
    }

    FuelAnalysis {
        name: fuel.name.clone(),
        common_name: fuel.common_name.clone(),
        charge_density,
        thz_signature,
        water_coherence_score: water,
        energy_efficiency_score: efficiency,
        storage_stability_score: storage,
        environmental_score: environmental,
        codex_score,
        strengths,
        weaknesses,
        recommendations,
    }
}

/// Analyzes every fuel in parallel; output order follows input order.
pub fn analyze_fuels(fuels: &[FuelMolecule]) -> Vec<FuelAnalysis> {
    fuels.par_iter().map(analyze_fuel).collect()
}

pub struct FuelReport<'a> {
    pub fuel: &'a FuelMolecule,
    pub analysis: &'a FuelAnalysis,
}

fn write_list(f: &mut fmt::Formatter<'_>, title: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f, "{}", text::rule('─', 80))?;
    writeln!(f, "{title}")?;
    for item in items {
        writeln!(f, "   • {item}")?;
    }
    writeln!(f)
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{}", text::rule('─', 80))?;
    writeln!(f, "{title}")?;
    writeln!(f, "{}", text::rule('─', 80))
}

impl fmt::Display for FuelReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fuel, a) = (self.fuel, self.analysis);
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f, "CODEX FUEL ANALYSIS: {} ({})", fuel.name, fuel.common_name)?;
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f)?;
        writeln!(f, "Formula: {}", fuel.structure.formula)?;
        writeln!(f, "Type: {}", fuel.fuel_type)?;
        writeln!(f, "Renewable: {}", if fuel.renewable { "Yes" } else { "No" })?;
        writeln!(f, "Description: {}", fuel.description)?;
        writeln!(f)?;

        heading(f, "CODEX FRAMEWORK METRICS")?;
        writeln!(f, "Charge Density:          {:.3} charges/100 Da", a.charge_density)?;
        writeln!(f, "THz Signature:           {:.3} THz", a.thz_signature)?;
        writeln!(f, "Water Coherence Score:   {:.3} / 1.0", a.water_coherence_score)?;
        writeln!(f)?;

        heading(f, "PERFORMANCE SCORES")?;
        writeln!(f, "Energy Efficiency:       {:.3} / 1.0", a.energy_efficiency_score)?;
        writeln!(f, "Storage Stability:       {:.3} / 1.0", a.storage_stability_score)?;
        writeln!(f, "Environmental:           {:.3} / 1.0", a.environmental_score)?;
        writeln!(f)?;
        writeln!(f, "⭐ OVERALL CODEX SCORE:   {:.3} / 1.0", a.codex_score)?;
        writeln!(f)?;

        let e = &fuel.energetics;
        heading(f, "ENERGY PROPERTIES")?;
        writeln!(f, "Energy Density (mass):   {:.1} MJ/kg", e.energy_density_mass)?;
        writeln!(f, "Energy Density (volume): {:.1} MJ/L", e.energy_density_volume)?;
        writeln!(f, "H/C Ratio:               {:.2}", fuel.structure.h_c_ratio())?;
        if e.octane_rating > 0.0 {
            writeln!(f, "Octane Rating:           {:.0} RON", e.octane_rating)?;
        }
        if e.cetane_rating > 0.0 {
            writeln!(f, "Cetane Rating:           {:.0} CN", e.cetane_rating)?;
        }
        writeln!(f)?;

        let w = &fuel.water_interaction;
        heading(f, "WATER INTERACTION")?;
        writeln!(f, "Water Compatibility:     {}", w.water_compatibility)?;
        writeln!(f, "Water Solubility:        {:.4} g/L", w.water_solubility)?;
        writeln!(f, "Water Tolerance:         {:.0} ppm", w.water_tolerance)?;
        writeln!(f, "Hygroscopicity:          {:.2}", w.hygroscopicity)?;
        writeln!(f)?;

        let em = &fuel.emissions;
        heading(f, "EMISSIONS PROFILE")?;
        writeln!(f, "Combustion Quality:      {}", em.combustion_quality)?;
        writeln!(f, "CO2 Intensity:           {:.4} kg CO2/MJ", em.co2_per_mj)?;
        writeln!(f, "Carbon Efficiency:       {:.2}", em.carbon_efficiency())?;
        writeln!(f, "NOx Emissions:           {}", em.nox_emissions)?;
        writeln!(f, "Particulate Matter:      {}", em.particulate_matter)?;
        writeln!(f)?;

        write_list(f, "✅ STRENGTHS:", &a.strengths)?;
        write_list(f, "⚠️  WEAKNESSES:", &a.weaknesses)?;
        write_list(f, "💡 RECOMMENDATIONS:", &a.recommendations)
    }
}

/// Comparison matrix sorted by codex score, best first.
pub struct FuelComparison<'a> {
    rows: Vec<(&'a FuelMolecule, &'a FuelAnalysis)>,
}

impl<'a> FuelComparison<'a> {
    pub fn new(fuels: &'a [FuelMolecule], analyses: &'a [FuelAnalysis]) -> Self {
        let mut rows: Vec<_> = fuels.iter().zip(analyses).collect();
        rows.sort_by(|a, b| b.1.codex_score.total_cmp(&a.1.codex_score));
        Self { rows }
    }

    pub fn ranked_names(&self) -> Vec<&str> {
        self.rows.iter().map(|(f, _)| f.common_name.as_str()).collect()
    }
}

impl fmt::Display for FuelComparison<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", text::rule('=', 120))?;
        writeln!(f, "CODEX FUEL COMPARISON MATRIX")?;
        writeln!(f, "{}", text::rule('=', 120))?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<25} {:<8} {:<8} {:<8} {:<8} {:<8} {:<12} {:<6}",
            "Fuel", "Codex", "Energy", "Water", "Storage", "Environ", "Energy", "H/C"
        )?;
        writeln!(
            f,
            "{:<25} {:<8} {:<8} {:<8} {:<8} {:<8} {:<12} {:<6}",
            "Name", "Score", "Effic.", "Resist", "Stable", "Score", "(MJ/kg)", "Ratio"
        )?;
        writeln!(f, "{}", text::rule('-', 120))?;
        for (fuel, a) in &self.rows {
            writeln!(
                f,
                "{:<25} {:<8.3} {:<8.3} {:<8.3} {:<8.3} {:<8.3} {:<12.1} {:<6.2}",
                fuel.common_name,
                a.codex_score,
                a.energy_efficiency_score,
                a.water_coherence_score,
                a.storage_stability_score,
                a.environmental_score,
                fuel.energetics.energy_density_mass,
                fuel.structure.h_c_ratio()
            )?;
        }
        Ok(())
    }
}
