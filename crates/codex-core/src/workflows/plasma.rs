use crate::engine::config::PlasmaConfig;
use crate::engine::error::EngineError;
use crate::engine::plasma::{self, PlasmaAnalysis};
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub const PLASMA_CHART: &str = "mercury_plasma_dynamics.csv";

#[derive(Debug, Clone)]
pub struct PlasmaResult {
    pub analysis: PlasmaAnalysis,
    pub written: Vec<PathBuf>,
}

#[instrument(skip_all, name = "plasma_workflow")]
pub fn run(
    config: &PlasmaConfig,
    output_dir: Option<&Path>,
    reporter: &ProgressReporter,
) -> Result<PlasmaResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Mercury Plasma Analysis",
    });
    let analysis = plasma::analyze(config)?;
    info!(
        temperature_k = config.temperature_k,
        "Mercury plasma analysis complete."
    );
    reporter.report(Progress::PhaseFinish);

    let mut written = Vec::new();
    if let Some(dir) = output_dir {
        reporter.report(Progress::PhaseStart {
            name: "Parameter Sweeps",
        });
        let series = plasma::chart_series(config)?;
        written.push(super::write_charts(dir, PLASMA_CHART, &series)?);
        reporter.report(Progress::PhaseFinish);
    }

    Ok(PlasmaResult { analysis, written })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_analysis_writes_sweeps() {
        let dir = tempdir().unwrap();
        let result = run(
            &PlasmaConfig::default(),
            Some(dir.path()),
            &ProgressReporter::new(),
        )
        .unwrap();
        assert_eq!(result.written, vec![dir.path().join(PLASMA_CHART)]);
        assert!(!result.analysis.to_string().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = PlasmaConfig {
            temperature_k: -1.0,
            ..PlasmaConfig::default()
        };
        assert!(matches!(
            run(&config, None, &ProgressReporter::new()),
            Err(EngineError::Config { .. })
        ));
    }
}
