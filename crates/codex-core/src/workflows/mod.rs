//! # Workflows Module
//!
//! High-level entry points that run one complete procedure of the toolkit from input
//! loading to result export.
//!
//! ## Overview
//!
//! Each workflow resolves its data source (bundled database or a user file), drives the
//! engine while reporting phases through a [`ProgressReporter`](crate::engine::progress::ProgressReporter),
//! and returns a result struct whose parts render as text reports. When an output
//! directory is given, JSON documents and chart-data CSV files are written there and
//! their paths are listed in the result.
//!
//! ## Architecture
//!
//! - **Screening** ([`screen`], [`dermatology`]) - Biocompatibility reports and exports
//! - **Acoustic and molecular** ([`virus`], [`fuel`], [`peptides`]) - Domain validations and rankings
//! - **Physics** ([`plasma`], [`soliton`], [`resonance`]) - Model analyses and stress tests
//! - **Sequence design** ([`sequence`]) - Generation, alignment, and the GIT stress test
//! - **Discovery** ([`discover`]) - Pattern mining and the frequency law over a directory of exports
//! - **Therapeutic targets** ([`targets`]) - Per-target frequency analysis and protocols
//! - **Theory** ([`theory`]) - Geometric-phase consistency checks

use crate::core::io::export::{self, ChartSeries};
use crate::engine::error::EngineError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub mod dermatology;
pub mod discover;
pub mod fuel;
pub mod peptides;
pub mod plasma;
pub mod resonance;
pub mod screen;
pub mod sequence;
pub mod soliton;
pub mod targets;
pub mod theory;
pub mod virus;

pub(crate) fn write_charts(
    dir: &Path,
    file_name: &str,
    series: &[ChartSeries],
) -> Result<PathBuf, EngineError> {
    let path = dir.join(file_name);
    export::write_series_csv(&path, series)?;
    info!(path = %path.display(), series = series.len(), "Chart data written");
    Ok(path)
}

pub(crate) fn write_document<T: Serialize>(
    dir: &Path,
    file_name: &str,
    value: &T,
) -> Result<PathBuf, EngineError> {
    let path = dir.join(file_name);
    export::write_json(&path, value)?;
    info!(path = %path.display(), "JSON document written");
    Ok(path)
}
