use crate::engine::config::SolitonConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::soliton::analyzer::{SolitonSolution, SolitonStressTest, analyze_sequences};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub const SOLITON_DOCUMENT: &str = "soliton_features.json";

#[derive(Debug, Clone)]
pub enum SolitonOutcome {
    /// User-supplied sequences in input order.
    Sequences(Vec<SolitonSolution>),
    /// No sequences were given; the four reference sequences were run instead.
    StressTest(SolitonStressTest),
}

impl SolitonOutcome {
    pub fn solutions(&self) -> Vec<&SolitonSolution> {
        match self {
            Self::Sequences(s) => s.iter().collect(),
            Self::StressTest(t) => t.results.iter().map(|(_, s)| s).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SolitonResult {
    pub outcome: SolitonOutcome,
    pub written: Vec<PathBuf>,
}

#[instrument(skip_all, name = "soliton_workflow")]
pub fn run(
    sequences: &[String],
    config: &SolitonConfig,
    output_dir: Option<&Path>,
    reporter: &ProgressReporter,
) -> Result<SolitonResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Soliton Analysis",
    });
    info!(
        sequences = sequences.len(),
        cancer_type = %config.cancer_type,
        pde = config.compute_pde,
        "Starting soliton analysis."
    );
    let outcome = if sequences.is_empty() {
        reporter.message("No sequences given; running the reference stress test");
        SolitonOutcome::StressTest(SolitonStressTest::run(config)?)
    } else {
        SolitonOutcome::Sequences(analyze_sequences(sequences, config)?)
    };
    reporter.report(Progress::PhaseFinish);

    let mut written = Vec::new();
    if let Some(dir) = output_dir {
        let features: Vec<_> = outcome
            .solutions()
            .into_iter()
            .map(|s| (&s.sequence, s.features))
            .collect();
        written.push(super::write_document(dir, SOLITON_DOCUMENT, &features)?);
    }

    Ok(SolitonResult { outcome, written })
}
