//! # Engine Module
//!
//! Scoring and physics logic for every domain the toolkit covers, together with the
//! configuration, progress, and error types the workflows share.
//!
//! ## Overview
//!
//! Each domain module takes typed records from [`crate::core`] and returns analysis
//! structs that render as text reports through `Display` and expose chart data as
//! [`crate::core::io::export::ChartSeries`]. Nothing here touches the terminal; the
//! workflows layer decides what is printed and what is written to disk.
//!
//! ## Architecture
//!
//! - **Biocompatibility** ([`bcs`], [`dermatology`]) - Functional-group scoring, the three
//!   pillars, final verdicts, and JSON exports
//! - **Acoustic and molecular domains** ([`virus`], [`fuel`], [`peptide`]) - RaRaMa
//!   frequencies, fuel scoring, and anticancer peptide selectivity
//! - **Physics models** ([`plasma`], [`soliton`], [`resonance`]) - Mercury plasma dynamics,
//!   membrane solitons, and timescale resonance
//! - **Sequence design** ([`sequence`]) - Resonance-guided generation and alignment
//! - **Discovery** ([`discovery`]) - Pattern mining over exported screening results
//! - **Therapeutic targets** ([`targets`]) - RaRaMa harmonics and delivery protocols per target
//! - **Theory checks** ([`theory`]) - Phase velocity, cloaking quantisation, coupling, and phase matching
//! - **Configuration** ([`config`]) - Builders and validated parameter sets
//! - **Progress Monitoring** ([`progress`]) - Phase and task callbacks for front ends
//! - **Error Handling** ([`error`]) - Engine-level error type wrapping every concern

pub mod bcs;
pub mod config;
pub mod dermatology;
pub mod discovery;
pub mod error;
pub mod fuel;
pub mod peptide;
pub mod plasma;
pub mod progress;
pub mod resonance;
pub mod sequence;
pub mod soliton;
pub mod targets;
pub(crate) mod text;
pub mod theory;
pub mod virus;
