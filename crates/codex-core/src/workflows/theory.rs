use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::theory::TheoryValidation;
use std::path::{Path, PathBuf};
use tracing::instrument;

pub const THEORY_DOCUMENT: &str = "theoretical_validation.json";
pub const THEORY_CHART: &str = "theoretical_scaling.csv";

#[derive(Debug, Clone)]
pub struct TheoryResult {
    pub validation: TheoryValidation,
    pub written: Vec<PathBuf>,
}

#[instrument(skip_all, name = "theory_workflow")]
pub fn run(output_dir: Option<&Path>, reporter: &ProgressReporter) -> Result<TheoryResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Theoretical Validation",
    });
    let validation = TheoryValidation::run()?;
    reporter.report(Progress::PhaseFinish);

    let mut written = Vec::new();
    if let Some(dir) = output_dir {
        written.push(super::write_document(dir, THEORY_DOCUMENT, &validation)?);
        written.push(super::write_charts(dir, THEORY_CHART, &validation.chart_series())?);
    }

    Ok(TheoryResult {
        validation,
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_document_and_charts() {
        let dir = tempdir().unwrap();
        let result = run(Some(dir.path()), &ProgressReporter::new()).unwrap();
        assert_eq!(result.validation.phase_matches.len(), 3);
        assert!(dir.path().join(THEORY_DOCUMENT).exists());
        assert!(dir.path().join(THEORY_CHART).exists());
    }
}
