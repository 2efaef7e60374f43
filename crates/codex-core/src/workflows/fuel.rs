use crate::core::io::database;
use crate::core::models::fuel::FuelMolecule;
use crate::engine::error::EngineError;
use crate::engine::fuel::{FuelAnalysis, FuelComparison, FuelReport, analyze_fuels};
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub const FUEL_DOCUMENT: &str = "codex_fuel_analysis.json";

#[derive(Debug, Clone)]
pub struct FuelResult {
    pub fuels: Vec<FuelMolecule>,
    pub analyses: Vec<FuelAnalysis>,
    pub written: Vec<PathBuf>,
}

impl FuelResult {
    pub fn reports(&self) -> impl Iterator<Item = FuelReport<'_>> {
        self.fuels
            .iter()
            .zip(&self.analyses)
            .map(|(fuel, analysis)| FuelReport { fuel, analysis })
    }

    pub fn comparison(&self) -> FuelComparison<'_> {
        FuelComparison::new(&self.fuels, &self.analyses)
    }
}

#[instrument(skip_all, name = "fuel_workflow")]
pub fn run(
    database: Option<&Path>,
    output_dir: Option<&Path>,
    reporter: &ProgressReporter,
) -> Result<FuelResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading Fuels",
    });
    let fuels = match database {
        Some(path) => database::load_fuels(path)?,
        None => database::bundled_fuels()?,
    };
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Fuel Analysis",
    });
    let analyses = analyze_fuels(&fuels);
    info!(count = analyses.len(), "Fuel analysis complete.");
    reporter.report(Progress::PhaseFinish);

    let mut written = Vec::new();
    if let Some(dir) = output_dir {
        written.push(super::write_document(dir, FUEL_DOCUMENT, &analyses)?);
    }

    Ok(FuelResult {
        fuels,
        analyses,
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn ranks_all_bundled_fuels() {
        let dir = tempdir().unwrap();
        let result = run(None, Some(dir.path()), &ProgressReporter::new()).unwrap();
        assert_eq!(result.analyses.len(), 8);
        assert_eq!(result.comparison().ranked_names().len(), 8);
        assert_eq!(result.reports().count(), 8);
        assert!(dir.path().join(FUEL_DOCUMENT).exists());
    }
}
