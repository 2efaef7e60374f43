//! # Core Models Module
//!
//! Plain data records describing the things the toolkit scores: small-molecule
//! compounds, peptides, fuels, virus particles, and therapeutic molecular targets.
//!
//! ## Overview
//!
//! Every record derives `serde` so it can be loaded from the bundled TOML databases
//! or a user-supplied file of the same schema. Records carry only measured or
//! curated values plus a few derived quantities that follow directly from them
//! (charge density, H/C ratio); all scoring lives in [`crate::engine`].
//!
//! ## Key Components
//!
//! - [`compound`] - Functional-group counts, molecular properties, and regulatory status
//! - [`peptide`] - Peptide sequence, biophysics, and cancer-targeting data
//! - [`fuel`] - Fuel structure, energetics, water interaction, and emissions
//! - [`virus`] - Virus dimensions and optional observed resonance
//! - [`target`] - Cancer-relevant molecular targets and their process timescales

pub mod compound;
pub mod fuel;
pub mod peptide;
pub mod target;
pub mod virus;
