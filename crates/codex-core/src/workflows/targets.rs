use crate::core::io::database;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::targets::TargetSurvey;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub const TARGET_DOCUMENT: &str = "molecular_target_protocols.json";
pub const TARGET_CHART: &str = "molecular_target_spectra.csv";

#[derive(Debug, Clone)]
pub struct TargetResult {
    pub survey: TargetSurvey,
    pub written: Vec<PathBuf>,
}

#[instrument(skip_all, name = "targets_workflow")]
pub fn run(
    database: Option<&Path>,
    output_dir: Option<&Path>,
    reporter: &ProgressReporter,
) -> Result<TargetResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading Molecular Targets",
    });
    let targets = match database {
        Some(path) => database::load_molecular_targets(path)?,
        None => database::bundled_molecular_targets()?,
    };
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Target Frequency Analysis",
    });
    let survey = TargetSurvey::run(targets)?;
    info!(count = survey.analyses.len(), "Target analysis complete.");
    reporter.report(Progress::PhaseFinish);

    let mut written = Vec::new();
    if let Some(dir) = output_dir {
        written.push(super::write_document(dir, TARGET_DOCUMENT, &survey)?);
        written.push(super::write_charts(dir, TARGET_CHART, &survey.chart_series())?);
    }

    Ok(TargetResult { survey, written })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn surveys_bundled_targets_and_exports() {
        let dir = tempdir().unwrap();
        let result = run(None, Some(dir.path()), &ProgressReporter::new()).unwrap();
        assert_eq!(result.survey.protocols.len(), 4);
        assert_eq!(result.written.len(), 2);
        assert!(dir.path().join(TARGET_DOCUMENT).exists());
        assert!(dir.path().join(TARGET_CHART).exists());
    }

    #[test]
    fn user_database_replaces_bundled_targets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("targets.toml");
        std::fs::write(
            &path,
            "[[target]]\nname = \"Kinesin\"\ndimension-nm = 4.0\n",
        )
        .unwrap();
        let result = run(Some(&path), None, &ProgressReporter::new()).unwrap();
        assert_eq!(result.survey.targets.len(), 1);
        assert!(result.survey.analyses[0].process_frequencies.is_empty());
        assert!(result.written.is_empty());
    }
}
