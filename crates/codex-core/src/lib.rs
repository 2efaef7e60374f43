//! # Codex Resonance Core Library
//!
//! Typed computations for the Codex Resonance Framework: biocompatibility screening,
//! RaRaMa acoustic modes, mercury plasma dynamics, membrane solitons, timescale resonance,
//! resonance-guided sequence design, and pattern discovery over exported results.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`CompoundData`, `VirusData`,
//!   `FuelMolecule`, `PeptideData`), physical constants, residue alphabets, the bundled
//!   TOML databases, and JSON/CSV export utilities.
//!
//! - **[`engine`]: The Logic Core.** Scoring formulas, physics models, and report types for
//!   each domain, plus configuration builders, progress callbacks, and the engine error type.
//!
//! - **[`workflows`]: The Public API.** One entry point per procedure. Each loads its
//!   inputs, runs the engine with progress reporting, and returns a result that carries
//!   both the text report and any chart data for the caller to persist.

pub mod core;
pub mod engine;
pub mod workflows;
