use crate::core::io::database;
use crate::core::models::virus::VirusData;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::virus::{
    MultiModeAnalysis, ValidationSummary, VirusValidation, diameter_frequency_series,
    multi_mode_analysis, validate_virus,
};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub const DIAMETER_CHART: &str = "virus_diameter_frequency.csv";
const CHART_RANGE_NM: (f64, f64) = (10.0, 200.0);
const CHART_POINTS: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct VirusRequest<'a> {
    /// A single user-described particle; replaces the database when set.
    pub custom: Option<VirusData>,
    pub database: Option<&'a Path>,
    pub output_dir: Option<&'a Path>,
}

#[derive(Debug, Clone)]
pub struct VirusResult {
    pub validations: Vec<VirusValidation>,
    /// Present for a custom particle only.
    pub multi_mode: Option<MultiModeAnalysis>,
    pub written: Vec<PathBuf>,
}

impl VirusResult {
    pub fn summary(&self) -> ValidationSummary<'_> {
        ValidationSummary {
            results: &self.validations,
        }
    }
}

#[instrument(skip_all, name = "virus_workflow")]
pub fn run(request: &VirusRequest, reporter: &ProgressReporter) -> Result<VirusResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading Viruses",
    });
    let viruses = match (&request.custom, request.database) {
        (Some(custom), _) => vec![custom.clone()],
        (None, Some(path)) => database::load_viruses(path)?,
        (None, None) => database::bundled_viruses()?,
    };
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "RaRaMa Validation",
    });
    reporter.report(Progress::TaskStart {
        total_steps: viruses.len() as u64,
    });
    let mut validations = Vec::with_capacity(viruses.len());
    for virus in &viruses {
        validations.push(validate_virus(virus)?);
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);
    let multi_mode = request
        .custom
        .as_ref()
        .map(|v| multi_mode_analysis(v.dimension_nm))
        .transpose()?;
    info!(validated = validations.len(), "Virus validation complete.");
    reporter.report(Progress::PhaseFinish);

    let mut written = Vec::new();
    if let Some(dir) = request.output_dir {
        let series = diameter_frequency_series(CHART_RANGE_NM.0, CHART_RANGE_NM.1, CHART_POINTS);
        written.push(super::write_charts(dir, DIAMETER_CHART, &[series])?);
    }

    Ok(VirusResult {
        validations,
        multi_mode,
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn validates_bundled_viruses() {
        let result = run(&VirusRequest::default(), &ProgressReporter::new()).unwrap();
        assert_eq!(result.validations.len(), 10);
        assert!(result.multi_mode.is_none());
    }

    #[test]
    fn custom_virus_gets_multi_mode_analysis() {
        let dir = tempdir().unwrap();
        let request = VirusRequest {
            custom: Some(VirusData::new("Test particle", 90.0).with_observed_frequency(8.0)),
            output_dir: Some(dir.path()),
            ..Default::default()
        };
        let result = run(&request, &ProgressReporter::new()).unwrap();
        assert_eq!(result.validations.len(), 1);
        assert!(result.validations[0].observed.is_some());
        assert_eq!(result.multi_mode.unwrap().diameter_nm, 90.0);
        assert!(dir.path().join(DIAMETER_CHART).exists());
    }

    #[test]
    fn non_positive_diameter_is_rejected() {
        let request = VirusRequest {
            custom: Some(VirusData::new("Broken", 0.0)),
            ..Default::default()
        };
        assert!(matches!(
            run(&request, &ProgressReporter::new()),
            Err(EngineError::InvalidInput { .. })
        ));
    }
}
