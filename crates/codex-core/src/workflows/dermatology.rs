use crate::core::io::database;
use crate::engine::dermatology::{
    self, DermatologyAnalysis, DermatologyComparison, DermatologySummary,
};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct DermatologyResult {
    pub analyses: Vec<DermatologyAnalysis>,
    pub written: Vec<PathBuf>,
}

impl DermatologyResult {
    pub fn comparison(&self) -> DermatologyComparison<'_> {
        DermatologyComparison {
            analyses: &self.analyses,
        }
    }

    pub fn summary(&self) -> DermatologySummary {
        DermatologySummary::from_analyses(&self.analyses)
    }
}

/// `database` defaults to the bundled dermatology set; `output_dir` enables JSON export.
#[instrument(skip_all, name = "dermatology_workflow")]
pub fn run(
    database: Option<&Path>,
    output_dir: Option<&Path>,
    reporter: &ProgressReporter,
) -> Result<DermatologyResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading Database",
    });
    let db = match database {
        Some(path) => database::load_compounds(path)?,
        None => database::bundled_dermatology()?,
    };
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Dermatological Screening",
    });
    let analyses = dermatology::analyze_database(&db);
    info!(count = analyses.len(), "Dermatology compounds analyzed.");
    reporter.report(Progress::PhaseFinish);

    let mut written = Vec::new();
    if let Some(dir) = output_dir {
        reporter.report(Progress::PhaseStart { name: "Exporting" });
        for analysis in &analyses {
            written.push(dermatology::export_json(dir, analysis)?);
        }
        reporter.report(Progress::PhaseFinish);
    }

    Ok(DermatologyResult { analyses, written })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn exports_one_file_per_compound() {
        let dir = tempdir().unwrap();
        let result = run(None, Some(dir.path()), &ProgressReporter::new()).unwrap();
        assert_eq!(result.analyses.len(), 8);
        assert_eq!(result.written.len(), 8);
        for path in &result.written {
            let name = path.file_name().unwrap().to_string_lossy();
            assert!(name.starts_with("bcs_dermatology_"));
        }
    }

    #[test]
    fn summary_counts_cover_every_compound() {
        let result = run(None, None, &ProgressReporter::new()).unwrap();
        let s = result.summary();
        assert_eq!(s.pass + s.conditional + s.fail, 8);
        assert!(result.comparison().to_string().contains("SUMMARY STATISTICS"));
    }
}
