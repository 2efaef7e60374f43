//! Liquid-mercury collective modes, mercury plasma parameters, rotating-dynamo
//! onset, and the speculative inertial-coupling estimate.

use crate::core::constants::{
    ATOMIC_MASS_UNIT, CODEX_VELOCITY, ELECTRON_MASS, ELEMENTARY_CHARGE, HBAR, KELVIN_PER_EV,
    PLANCK, RARAMA_CONSTANT_GHZ_ANGSTROM, SPEED_OF_LIGHT, VACUUM_PERMEABILITY,
    VACUUM_PERMITTIVITY,
};
use crate::core::io::export::ChartSeries;
use crate::core::numeric::linspace;
use crate::engine::config::PlasmaConfig;
use crate::engine::error::{EngineError, require_positive};
use crate::engine::text;
use serde::Serialize;
use std::f64::consts::PI;
use std::fmt;
use tracing::debug;

/// Mercury reference data.
pub mod mercury {
    /// amu
    pub const ATOMIC_MASS: f64 = 200.59;
    /// kg/m³ at 20 °C
    pub const DENSITY: f64 = 13534.0;
    /// Ω·m at 20 °C
    pub const RESISTIVITY: f64 = 961e-9;
    /// m/s
    pub const BULK_SOUND_SPEED: f64 = 1450.0;
    /// m
    pub const ATOMIC_SPACING: f64 = 3.0e-10;
    /// K
    pub const MELTING_POINT: f64 = 234.32;
    /// K
    pub const BOILING_POINT: f64 = 629.88;
    /// K
    pub const SUPERCONDUCTING_TC: f64 = 4.15;
    /// K
    pub const REFERENCE_TEMPERATURE: f64 = 293.15;
    /// Resistivity assumed for the solid phase.
    pub const SOLID_RESISTIVITY: f64 = 1e-6;
}

const WATER_MOLECULAR_MASS: f64 = 18.0;
const CRITICAL_MAGNETIC_REYNOLDS: f64 = 10.0;
const LIQUID_METAL_COUPLING: f64 = 0.75;
const INERTIAL_COUPLING: f64 = 1e-20;
const MAX_MASS_REDUCTION: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MercuryProperties {
    pub temperature_k: f64,
    pub density: f64,
    pub resistivity: f64,
    pub sound_speed: f64,
    /// Pa·s
    pub viscosity: f64,
    pub is_superconducting: bool,
}

pub fn mercury_properties(temperature_k: f64) -> Result<MercuryProperties, EngineError> {
    let t = require_positive("temperature_k", temperature_k)?;
    let delta = t - mercury::REFERENCE_TEMPERATURE;
    let resistivity = if t < mercury::MELTING_POINT {
        mercury::SOLID_RESISTIVITY
    } else {
        mercury::RESISTIVITY * (1.0 + 0.0009 * (t - mercury::MELTING_POINT))
    };

    Ok(MercuryProperties {
        temperature_k: t,
        density: mercury::DENSITY * (1.0 - 1.81e-4 * delta),
        resistivity,
        sound_speed: mercury::BULK_SOUND_SPEED * (1.0 - 0.0002 * delta),
        viscosity: 1.526e-3 * (365.0 / t).exp(),
        is_superconducting: t < mercury::SUPERCONDUCTING_TC,
    })
}

/// Codex velocity scaled by the Hg/H₂O mass ratio and a thermal coherence loss.
pub fn collective_velocity(temperature_k: f64) -> f64 {
    let mass_factor = 1.0 / (mercury::ATOMIC_MASS / WATER_MOLECULAR_MASS).sqrt();
    let temp_factor = (-0.001 * (temperature_k - mercury::REFERENCE_TEMPERATURE)).exp();
    CODEX_VELOCITY * mass_factor * temp_factor
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CodexResonance {
    pub length_scale_m: f64,
    pub frequency_thz: f64,
    pub wavelength_m: f64,
    pub energy_ev: f64,
    pub coupling_strength: f64,
}

/// `f × d = 542.7 GHz·Å` at the given length scale.
pub fn thz_resonance(length_scale_m: f64) -> Result<CodexResonance, EngineError> {
    let length = require_positive("length_scale_m", length_scale_m)?;
    let freq_ghz = RARAMA_CONSTANT_GHZ_ANGSTROM / (length * 1e10);
    let freq_hz = freq_ghz * 1e9;
    Ok(CodexResonance {
        length_scale_m: length,
        frequency_thz: freq_hz / 1e12,
        wavelength_m: SPEED_OF_LIGHT / freq_hz,
        energy_ev: PLANCK * freq_hz / ELEMENTARY_CHARGE,
        coupling_strength: LIQUID_METAL_COUPLING,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DispersionPoint {
    /// m⁻¹
    pub wavevector: f64,
    pub energy_ev: f64,
    pub damping: f64,
}

/// Linear collective-mode dispersion `E = ħvq` with quadratic damping in `q / q_max`.
pub fn dispersion(temperature_k: f64, wavevectors: &[f64]) -> Vec<DispersionPoint> {
    let v = collective_velocity(temperature_k);
    let q_max = wavevectors.iter().copied().fold(0.0, f64::max);
    wavevectors
        .iter()
        .map(|&q| {
            let ratio = if q_max > 0.0 { q / q_max } else { 0.0 };
            DispersionPoint {
                wavevector: q,
                energy_ev: HBAR * v * q / ELEMENTARY_CHARGE,
                damping: 0.01 + 0.1 * ratio * ratio,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlasmaParameters {
    pub electron_density: f64,
    pub ion_density: f64,
    /// K
    pub electron_temperature: f64,
    /// K
    pub ion_temperature: f64,
    pub magnetic_field: f64,
    pub debye_length: f64,
}

pub fn plasma_parameters(
    electron_density: f64,
    temperature_ev: f64,
    magnetic_field: f64,
) -> Result<PlasmaParameters, EngineError> {
    let n = require_positive("electron_density_m3", electron_density)?;
    let t_ev = require_positive("electron_temperature_ev", temperature_ev)?;
    let temperature_k = t_ev * KELVIN_PER_EV;
    let debye_length =
        (VACUUM_PERMITTIVITY * t_ev * ELEMENTARY_CHARGE / (n * ELEMENTARY_CHARGE.powi(2))).sqrt();

    Ok(PlasmaParameters {
        electron_density: n,
        ion_density: n,
        electron_temperature: temperature_k,
        ion_temperature: temperature_k * 0.5,
        magnetic_field,
        debye_length,
    })
}

/// Electron plasma frequency in rad/s.
pub fn plasma_frequency(electron_density: f64) -> f64 {
    (electron_density * ELEMENTARY_CHARGE.powi(2) / (ELECTRON_MASS * VACUUM_PERMITTIVITY)).sqrt()
}

/// Electron and singly-ionized Hg⁺ cyclotron frequencies in rad/s.
pub fn cyclotron_frequencies(magnetic_field: f64) -> (f64, f64) {
    let ion_mass = mercury::ATOMIC_MASS * ATOMIC_MASS_UNIT;
    (
        ELEMENTARY_CHARGE * magnetic_field / ELECTRON_MASS,
        ELEMENTARY_CHARGE * magnetic_field / ion_mass,
    )
}

/// Codex resonance at the Debye length.
pub fn plasma_resonance(params: &PlasmaParameters) -> Result<CodexResonance, EngineError> {
    thz_resonance(params.debye_length)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DynamoConditions {
    pub rotation_rpm: f64,
    pub radius_m: f64,
    pub tip_velocity: f64,
    pub conductivity: f64,
    pub magnetic_reynolds: f64,
    pub is_self_sustaining: bool,
}

fn rpm_to_angular(rpm: f64) -> f64 {
    rpm * 2.0 * PI / 60.0
}

fn angular_to_rpm(omega: f64) -> f64 {
    omega * 60.0 / (2.0 * PI)
}

pub fn dynamo_conditions(
    rotation_rpm: f64,
    radius_m: f64,
    temperature_k: f64,
) -> Result<DynamoConditions, EngineError> {
    let radius = require_positive("dynamo_radius_m", radius_m)?;
    let props = mercury_properties(temperature_k)?;
    let conductivity = 1.0 / props.resistivity;
    let tip_velocity = rpm_to_angular(rotation_rpm) * radius;
    let magnetic_reynolds = VACUUM_PERMEABILITY * conductivity * tip_velocity * radius;

    Ok(DynamoConditions {
        rotation_rpm,
        radius_m: radius,
        tip_velocity,
        conductivity,
        magnetic_reynolds,
        is_self_sustaining: magnetic_reynolds > CRITICAL_MAGNETIC_REYNOLDS,
    })
}

/// Rotation speed at which `Rm` reaches the onset threshold.
pub fn critical_rpm(radius_m: f64, temperature_k: f64) -> Result<f64, EngineError> {
    let radius = require_positive("dynamo_radius_m", radius_m)?;
    let conductivity = 1.0 / mercury_properties(temperature_k)?.resistivity;
    let v_critical = CRITICAL_MAGNETIC_REYNOLDS / (VACUUM_PERMEABILITY * conductivity * radius);
    Ok(angular_to_rpm(v_critical / radius))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DynamoPrediction {
    pub codex_velocity: f64,
    pub codex_rpm: f64,
    pub standard_critical_rpm: f64,
    pub ratio: f64,
    pub interpretation: &'static str,
}

pub fn dynamo_prediction(
    radius_m: f64,
    temperature_k: f64,
) -> Result<DynamoPrediction, EngineError> {
    let radius = require_positive("dynamo_radius_m", radius_m)?;
    let codex_velocity = collective_velocity(temperature_k);
    let codex_rpm = angular_to_rpm(codex_velocity / radius);
    let standard_critical_rpm = critical_rpm(radius, temperature_k)?;
    Ok(DynamoPrediction {
        codex_velocity,
        codex_rpm,
        standard_critical_rpm,
        ratio: codex_rpm / standard_critical_rpm,
        interpretation: if codex_rpm < standard_critical_rpm {
            "Codex predicts enhanced dynamo effect"
        } else {
            "Standard theory predicts onset first"
        },
    })
}

/// Zero-point energy density `ħω³ / (2π²c³)`.
pub fn vacuum_energy_density(frequency_hz: f64) -> f64 {
    let omega = 2.0 * PI * frequency_hz;
    HBAR * omega.powi(3) / (2.0 * PI * PI * SPEED_OF_LIGHT.powi(3))
}

/// Speculative field-to-vacuum energy ratio, capped at 0.1.
pub fn mass_reduction_factor(
    field_strength_v_m: f64,
    frequency_hz: f64,
    interaction_volume_m3: f64,
) -> Result<f64, EngineError> {
    let f = require_positive("field_frequency_hz", frequency_hz)?;
    let volume = require_positive("interaction_volume_m3", interaction_volume_m3)?;
    let field_energy = 0.5 * VACUUM_PERMITTIVITY * field_strength_v_m.powi(2) * volume;
    let epsilon = INERTIAL_COUPLING * field_energy / (vacuum_energy_density(f) * volume);
    Ok(f64::min(epsilon, MAX_MASS_REDUCTION))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InertialBand {
    Negligible,
    Tiny,
    Small,
    Significant,
}

impl InertialBand {
    pub fn classify(epsilon: f64) -> Self {
        if epsilon < 1e-10 {
            Self::Negligible
        } else if epsilon < 1e-5 {
            Self::Tiny
        } else if epsilon < 1e-3 {
            Self::Small
        } else {
            Self::Significant
        }
    }

    pub const fn interpretation(self) -> &'static str {
        match self {
            Self::Negligible => "Effect is NEGLIGIBLE (below any measurable threshold)",
            Self::Tiny => "Effect is TINY (would require ultra-precise measurement)",
            Self::Small => "Effect is SMALL (detectable with high-precision instruments)",
            Self::Significant => "Effect is SIGNIFICANT (if real, would be revolutionary)",
        }
    }
}

/// Every part of the mercury and plasma analysis at one operating point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlasmaAnalysis {
    pub properties: MercuryProperties,
    pub collective_velocity: f64,
    pub resonance: CodexResonance,
    pub dynamo: Vec<DynamoConditions>,
    pub prediction: DynamoPrediction,
    pub plasma: PlasmaParameters,
    pub plasma_frequency: f64,
    pub electron_cyclotron: f64,
    pub ion_cyclotron: f64,
    pub plasma_resonance: CodexResonance,
    pub field_strength_v_m: f64,
    pub field_frequency_hz: f64,
    pub interaction_volume_m3: f64,
    pub mass_reduction: f64,
    pub inertial_band: InertialBand,
}

pub fn analyze(config: &PlasmaConfig) -> Result<PlasmaAnalysis, EngineError> {
    config.validate()?;
    let t = config.temperature_k;

    let dynamo = config
        .test_rpms
        .iter()
        .map(|&rpm| dynamo_conditions(rpm, config.dynamo_radius_m, t))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(
        rows = dynamo.len(),
        sustaining = dynamo.iter().filter(|d| d.is_self_sustaining).count(),
        "Dynamo sweep evaluated"
    );

    let plasma = plasma_parameters(
        config.electron_density_m3,
        config.electron_temperature_ev,
        config.magnetic_field_t,
    )?;
    let (electron_cyclotron, ion_cyclotron) = cyclotron_frequencies(config.magnetic_field_t);
    let mass_reduction = mass_reduction_factor(
        config.field_strength_v_m,
        config.field_frequency_hz,
        config.interaction_volume_m3,
    )?;

    Ok(PlasmaAnalysis {
        properties: mercury_properties(t)?,
        collective_velocity: collective_velocity(t),
        resonance: thz_resonance(config.length_scale_m)?,
        dynamo,
        prediction: dynamo_prediction(config.dynamo_radius_m, t)?,
        plasma_frequency: plasma_frequency(plasma.electron_density),
        electron_cyclotron,
        ion_cyclotron,
        plasma_resonance: plasma_resonance(&plasma)?,
        plasma,
        field_strength_v_m: config.field_strength_v_m,
        field_frequency_hz: config.field_frequency_hz,
        interaction_volume_m3: config.interaction_volume_m3,
        mass_reduction,
        inertial_band: InertialBand::classify(mass_reduction),
    })
}

fn part(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{}", text::rule('=', 80))?;
    writeln!(f, "{title}")?;
    writeln!(f, "{}", text::rule('=', 80))?;
    writeln!(f)
}

impl fmt::Display for PlasmaAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.properties;
        let r = &self.resonance;
        part(f, "PART 1: MERCURY COLLECTIVE DYNAMICS")?;
        writeln!(f, "Mercury Properties at {:.1} K:", p.temperature_k)?;
        writeln!(f, "  Density:            {:.1} kg/m³", p.density)?;
        writeln!(f, "  Resistivity:        {:.1} nΩ·m", p.resistivity * 1e9)?;
        writeln!(f, "  Sound Speed:        {:.1} m/s", p.sound_speed)?;
        writeln!(f, "  Viscosity:          {:.2} mPa·s", p.viscosity * 1000.0)?;
        writeln!(f)?;
        writeln!(f, "Codex Framework Predictions:")?;
        writeln!(f, "  Collective Velocity: {:.2} m/s", self.collective_velocity)?;
        writeln!(f, "  (Compare: Water Codex velocity = {CODEX_VELOCITY:.2} m/s)")?;
        writeln!(
            f,
            "  THz Resonance:       {:.3} THz ({:.1} GHz)",
            r.frequency_thz,
            r.frequency_thz * 1000.0
        )?;
        writeln!(f, "  Photon Energy:       {:.3} eV", r.energy_ev)?;
        writeln!(f, "  Coupling Strength:   {:.2}", r.coupling_strength)?;
        writeln!(f)?;

        part(f, "PART 2: ROTATING MERCURY DYNAMO")?;
        if let Some(first) = self.dynamo.first() {
            writeln!(
                f,
                "System: Rotating sphere, radius = {:.1} cm",
                first.radius_m * 100.0
            )?;
            writeln!(f)?;
        }
        writeln!(
            f,
            "{:<10} {:<12} {:<15} {:<20}",
            "RPM", "R_m", "v_tip (m/s)", "Status"
        )?;
        writeln!(f, "{}", text::rule('-', 80))?;
        for d in &self.dynamo {
            let status = if d.is_self_sustaining {
                "🟢 SELF-SUSTAINING"
            } else {
                "🔴 Sub-critical"
            };
            writeln!(
                f,
                "{:<10} {:<12.2} {:<15.2} {:<20}",
                d.rotation_rpm, d.magnetic_reynolds, d.tip_velocity, status
            )?;
        }
        writeln!(f)?;
        let pred = &self.prediction;
        writeln!(f, "Codex Framework Prediction:")?;
        writeln!(f, "  Codex Collective Velocity: {:.2} m/s", pred.codex_velocity)?;
        writeln!(f, "  Predicted Onset RPM:       {:.0} RPM", pred.codex_rpm)?;
        writeln!(
            f,
            "  Standard Theory RPM:       {:.0} RPM",
            pred.standard_critical_rpm
        )?;
        writeln!(f, "  Ratio (Codex/Standard):    {:.2}", pred.ratio)?;
        writeln!(f, "  Interpretation:            {}", pred.interpretation)?;
        writeln!(f)?;

        let pl = &self.plasma;
        part(f, "PART 3: MERCURY PLASMA")?;
        writeln!(f, "Mercury Plasma Parameters:")?;
        writeln!(f, "  Electron Density:     {:.2e} m⁻³", pl.electron_density)?;
        writeln!(
            f,
            "  Temperature:          {:.1} eV ({:.0} K)",
            pl.electron_temperature / KELVIN_PER_EV,
            pl.electron_temperature
        )?;
        writeln!(f, "  Debye Length:         {:.2} μm", pl.debye_length * 1e6)?;
        writeln!(f, "  Magnetic Field:       {:.2} T", pl.magnetic_field)?;
        writeln!(f)?;
        writeln!(f, "Characteristic Frequencies:")?;
        writeln!(
            f,
            "  Plasma Frequency:     {:.2} GHz",
            self.plasma_frequency / (2.0 * PI * 1e9)
        )?;
        writeln!(
            f,
            "  Electron Cyclotron:   {:.2} GHz",
            self.electron_cyclotron / (2.0 * PI * 1e9)
        )?;
        writeln!(
            f,
            "  Ion Cyclotron:        {:.2} MHz",
            self.ion_cyclotron / (2.0 * PI * 1e6)
        )?;
        writeln!(f)?;
        writeln!(f, "Codex Resonance (based on Debye length):")?;
        writeln!(
            f,
            "  Frequency:            {:.3} THz",
            self.plasma_resonance.frequency_thz
        )?;
        writeln!(
            f,
            "  Energy:               {:.3} eV",
            self.plasma_resonance.energy_ev
        )?;
        writeln!(f)?;

        part(f, "PART 4: INERTIAL MASS REDUCTION (SPECULATIVE)")?;
        writeln!(f, "⚠️  WARNING: Highly speculative, based on Pais patents")?;
        writeln!(f)?;
        writeln!(f, "Hypothetical Test Conditions:")?;
        writeln!(f, "  Electric Field:       {:.2e} V/m", self.field_strength_v_m)?;
        writeln!(
            f,
            "  Frequency:            {:.1} THz",
            self.field_frequency_hz / 1e12
        )?;
        writeln!(
            f,
            "  Interaction Volume:   {:.1} liters",
            self.interaction_volume_m3 * 1000.0
        )?;
        writeln!(f)?;
        writeln!(f, "Predicted Mass Reduction:")?;
        writeln!(f, "  Factor ε:             {:.2e}", self.mass_reduction)?;
        writeln!(f, "  Percentage:           {:.6}%", self.mass_reduction * 100.0)?;
        writeln!(f)?;
        writeln!(f, "Interpretation:")?;
        writeln!(f, "  → {}", self.inertial_band.interpretation())
    }
}

/// Figure data for the collective-mode and dynamo panels.
pub fn chart_series(config: &PlasmaConfig) -> Result<Vec<ChartSeries>, EngineError> {
    config.validate()?;
    let t = config.temperature_k;
    let mut series = Vec::new();

    series.push(ChartSeries::from_points(
        "collective_velocity_vs_temperature_k",
        linspace(250.0, 400.0, 50)
            .into_iter()
            .map(|temp| (temp, collective_velocity(temp)))
            .collect(),
    ));

    let mut resonance = ChartSeries::new("resonance_thz_vs_length_angstrom");
    for length in linspace(2e-10, 10e-10, 50) {
        resonance.push(length * 1e10, thz_resonance(length)?.frequency_thz);
    }
    series.push(resonance);

    series.push(ChartSeries::from_points(
        "dispersion_mev_vs_q_per_nm",
        dispersion(t, &linspace(1e9, 1e11, 100))
            .into_iter()
            .map(|p| (p.wavevector / 1e9, p.energy_ev * 1000.0))
            .collect(),
    ));

    let mut resistivity = ChartSeries::new("resistivity_nohm_m_vs_temperature_k");
    let mut sound = ChartSeries::new("sound_speed_vs_temperature_k");
    for temp in linspace(250.0, 600.0, 100) {
        let props = mercury_properties(temp)?;
        resistivity.push(temp, props.resistivity * 1e9);
        sound.push(temp, props.sound_speed);
    }
    series.push(resistivity);
    series.push(sound);

    let mut reynolds = ChartSeries::new("magnetic_reynolds_vs_rpm");
    for rpm in linspace(100.0, 5000.0, 100) {
        reynolds.push(
            rpm,
            dynamo_conditions(rpm, config.dynamo_radius_m, t)?.magnetic_reynolds,
        );
    }
    series.push(reynolds);

    let mut standard = ChartSeries::new("critical_rpm_vs_radius_cm");
    let mut codex = ChartSeries::new("codex_rpm_vs_radius_cm");
    for radius in linspace(0.05, 0.5, 50) {
        let prediction = dynamo_prediction(radius, t)?;
        standard.push(radius * 100.0, prediction.standard_critical_rpm);
        codex.push(radius * 100.0, prediction.codex_rpm);
    }
    series.push(standard);
    series.push(codex);

    Ok(series)
}
