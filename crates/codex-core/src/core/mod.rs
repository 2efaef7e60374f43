//! # Core Module
//!
//! Stateless building blocks of the Codex Resonance toolkit: constants, data models,
//! sequence alphabets, and the bundled databases together with result export.
//!
//! ## Overview
//!
//! Nothing in this module scores or simulates anything. It defines the records the
//! engine consumes and the fixed tables every model shares, so that each engine
//! submodule can stay a set of pure functions over these types.
//!
//! ## Architecture
//!
//! - **Framework Constants** ([`constants`]) - RaRaMa constant, Codex velocity, physical constants
//! - **Data Models** ([`models`]) - Compounds, peptides, fuels, and viruses
//! - **Alphabets** ([`alphabet`]) - Amino acids, nucleotides, and BCS-weighted functional groups
//! - **Data I/O** ([`io`]) - Bundled TOML databases, user data loading, JSON and chart-data export
//! - **Numerics** ([`numeric`]) - Sample grids, summary statistics, correlation, and peak picking
//!
//! ## Key Capabilities
//!
//! - **Embedded reference data** available without any files on disk
//! - **User-supplied databases** in the same TOML schema
//! - **Chart-data CSV** in a long `series,x,y` format for external plotting

pub mod alphabet;
pub mod constants;
pub mod io;
pub mod models;
pub mod numeric;
