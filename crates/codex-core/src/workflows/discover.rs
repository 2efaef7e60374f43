use crate::engine::discovery::frequency::FrequencyLaw;
use crate::engine::discovery::{DiscoveryReport, load_records};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

pub const DISCOVERY_CHART: &str = "codex_discoveries.csv";
pub const DISCOVERY_DOCUMENT: &str = "codex_discoveries.json";
pub const FREQUENCY_CHART: &str = "frequency_biocompatibility_correlation.csv";
pub const FREQUENCY_DOCUMENT: &str = "frequency_biocompatibility_correlation.json";

#[derive(Debug, Clone)]
pub struct DiscoverResult {
    pub report: DiscoveryReport,
    pub written: Vec<PathBuf>,
}

/// Mines every `bcs*.json` export in `data_dir`.
#[instrument(skip_all, name = "discovery_workflow")]
pub fn run(
    data_dir: &Path,
    output_dir: Option<&Path>,
    reporter: &ProgressReporter,
) -> Result<DiscoverResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading Exports",
    });
    let records = load_records(data_dir)?;
    if records.is_empty() {
        warn!(dir = %data_dir.display(), "No screening exports found.");
    }
    reporter.message(format!("Loaded {} exports", records.len()));
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Pattern Discovery",
    });
    let report = DiscoveryReport::from_records(records);
    info!(
        correlation = report.coherence.correlation,
        "Discovery analyses complete."
    );
    reporter.report(Progress::PhaseFinish);

    let mut written = Vec::new();
    if let Some(dir) = output_dir {
        written.push(super::write_charts(
            dir,
            DISCOVERY_CHART,
            &report.chart_series(),
        )?);
        written.push(super::write_document(dir, DISCOVERY_DOCUMENT, &report)?);
    }

    Ok(DiscoverResult { report, written })
}

#[derive(Debug, Clone)]
pub struct FrequencyLawResult {
    pub law: FrequencyLaw,
    pub written: Vec<PathBuf>,
}

/// Correlates the RaRaMa frequency of every exported compound with its BCS score.
#[instrument(skip_all, name = "frequency_law_workflow")]
pub fn frequency_law(
    data_dir: &Path,
    output_dir: Option<&Path>,
    reporter: &ProgressReporter,
) -> Result<FrequencyLawResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading Exports",
    });
    let records = load_records(data_dir)?;
    reporter.message(format!("Loaded {} exports", records.len()));
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Frequency Correlation",
    });
    let law = FrequencyLaw::from_records(&records);
    if law.rows.len() < 3 {
        warn!(
            compounds = law.rows.len(),
            "Too few compounds for a significance test."
        );
    }
    reporter.report(Progress::PhaseFinish);

    let mut written = Vec::new();
    if let Some(dir) = output_dir {
        written.push(super::write_charts(dir, FREQUENCY_CHART, &law.chart_series())?);
        written.push(super::write_document(dir, FREQUENCY_DOCUMENT, &law)?);
    }

    Ok(FrequencyLawResult { law, written })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::{dermatology, screen};
    use tempfile::tempdir;

    #[test]
    fn mines_exports_from_both_screening_workflows() {
        let data = tempdir().unwrap();
        let reporter = ProgressReporter::new();
        let request = screen::ScreenRequest {
            output_dir: Some(data.path()),
            ..Default::default()
        };
        screen::run(&request, &reporter).unwrap();
        dermatology::run(None, Some(data.path()), &reporter).unwrap();

        let out = tempdir().unwrap();
        let result = run(data.path(), Some(out.path()), &reporter).unwrap();
        assert_eq!(result.report.records.len(), 14);
        assert_eq!(result.report.cross_domain.dermatology.count, 8);
        assert!(out.path().join(DISCOVERY_CHART).exists());
        assert!(out.path().join(DISCOVERY_DOCUMENT).exists());
    }

    #[test]
    fn frequency_law_covers_every_screened_compound() {
        let data = tempdir().unwrap();
        let reporter = ProgressReporter::new();
        let request = screen::ScreenRequest {
            output_dir: Some(data.path()),
            ..Default::default()
        };
        screen::run(&request, &reporter).unwrap();

        let out = tempdir().unwrap();
        let result = frequency_law(data.path(), Some(out.path()), &reporter).unwrap();
        assert_eq!(result.law.rows.len() + result.law.skipped.len(), 6);
        assert!(result.law.correlation.is_some());
        assert_eq!(
            result.written,
            vec![
                out.path().join(FREQUENCY_CHART),
                out.path().join(FREQUENCY_DOCUMENT)
            ]
        );
    }

    #[test]
    fn missing_directory_is_a_database_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            run(&missing, None, &ProgressReporter::new()),
            Err(EngineError::Database { .. })
        ));
        assert!(matches!(
            frequency_law(&missing, None, &ProgressReporter::new()),
            Err(EngineError::Database { .. })
        ));
    }
}
