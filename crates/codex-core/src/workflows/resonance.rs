use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::resonance::clinical::ClinicalValidation;
use crate::engine::resonance::composite::CompositeTherapy;
use crate::engine::resonance::cross_validation::CrossValidation;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub const COMPOSITE_CHART: &str = "composite_therapy_response.csv";
pub const CROSS_VALIDATION_CHART: &str = "time_space_cross_validation.csv";

#[derive(Debug, Clone)]
pub struct ResonanceResult {
    pub clinical: ClinicalValidation,
    pub cross_validation: CrossValidation,
    pub composite: CompositeTherapy,
    pub written: Vec<PathBuf>,
}

#[instrument(skip_all, name = "resonance_workflow")]
pub fn run(
    output_dir: Option<&Path>,
    reporter: &ProgressReporter,
) -> Result<ResonanceResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Clinical Validation",
    });
    let clinical = ClinicalValidation::run()?;
    info!(
        accuracy_percent = clinical.overall_accuracy(),
        "Clinical validation complete."
    );
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Time-Space Cross-Validation",
    });
    let cross_validation = CrossValidation::run();
    info!(
        self_consistent = cross_validation.is_self_consistent(),
        "Cross-validation complete."
    );
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Composite Therapy",
    });
    let composite = CompositeTherapy::run();
    info!(
        max_selectivity = composite.max_selectivity,
        "Composite therapy sweep complete."
    );
    reporter.report(Progress::PhaseFinish);

    let mut written = Vec::new();
    if let Some(dir) = output_dir {
        written.push(super::write_charts(
            dir,
            COMPOSITE_CHART,
            &composite.chart_series(),
        )?);
        written.push(super::write_charts(
            dir,
            CROSS_VALIDATION_CHART,
            &cross_validation.chart_series(),
        )?);
    }

    Ok(ResonanceResult {
        clinical,
        cross_validation,
        composite,
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn runs_all_three_analyses_and_writes_charts() {
        let dir = tempdir().unwrap();
        let result = run(Some(dir.path()), &ProgressReporter::new()).unwrap();
        assert_eq!(result.clinical.simulations.len(), 4);
        assert_eq!(result.cross_validation.checks.len(), 7);
        assert_eq!(result.composite.frequencies.len(), 1000);
        assert_eq!(result.written.len(), 2);
        assert!(result.written.iter().all(|p| p.exists()));
    }
}
