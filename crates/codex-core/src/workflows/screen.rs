use crate::core::io::database::{self, CompoundDatabase};
use crate::core::models::compound::CompoundData;
use crate::engine::bcs::analyzer::{BcsAnalysis, analyze_compound};
use crate::engine::bcs::report::{self, BcsReport, ComparisonTable, cascade_series};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub const EXPORT_PREFIX: &str = "bcs";
pub const CASCADE_CHART: &str = "bcs_score_cascade.csv";

#[derive(Debug, Clone, Default)]
pub struct ScreenRequest<'a> {
    /// `None` screens the bundled food-additive database.
    pub database: Option<&'a Path>,
    /// Case-insensitive name fragments; empty screens every compound.
    pub compounds: &'a [String],
    /// `None` skips JSON and chart export.
    pub output_dir: Option<&'a Path>,
}

#[derive(Debug, Clone)]
pub struct ScreenResult {
    pub compounds: Vec<CompoundData>,
    pub analyses: Vec<BcsAnalysis>,
    pub written: Vec<PathBuf>,
}

impl ScreenResult {
    pub fn reports(&self) -> impl Iterator<Item = BcsReport<'_>> {
        self.analyses
            .iter()
            .zip(&self.compounds)
            .map(|(a, c)| BcsReport::new(a, c))
    }

    pub fn comparison(&self) -> ComparisonTable<'_> {
        ComparisonTable::new(&self.analyses)
    }
}

pub(crate) fn load_compound_database(path: Option<&Path>) -> Result<CompoundDatabase, EngineError> {
    Ok(match path {
        Some(p) => database::load_compounds(p)?,
        None => database::bundled_food_additives()?,
    })
}

fn select(db: CompoundDatabase, names: &[String]) -> Result<Vec<CompoundData>, EngineError> {
    if names.is_empty() {
        return Ok(db.compound);
    }
    names
        .iter()
        .map(|name| {
            db.find_compound(name)
                .cloned()
                .ok_or_else(|| EngineError::CompoundNotFound(name.clone()))
        })
        .collect()
}

#[instrument(skip_all, name = "screen_workflow")]
pub fn run(request: &ScreenRequest, reporter: &ProgressReporter) -> Result<ScreenResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading Database",
    });
    let db = load_compound_database(request.database)?;
    let compounds = select(db, request.compounds)?;
    info!(count = compounds.len(), "Compounds selected for screening.");
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart { name: "Screening" });
    reporter.report(Progress::TaskStart {
        total_steps: compounds.len() as u64,
    });
    let analyses: Vec<BcsAnalysis> = compounds
        .par_iter()
        .map(|compound| {
            let analysis = analyze_compound(compound);
            reporter.report(Progress::TaskIncrement);
            analysis
        })
        .collect();
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let mut written = Vec::new();
    if let Some(dir) = request.output_dir {
        reporter.report(Progress::PhaseStart { name: "Exporting" });
        for (analysis, compound) in analyses.iter().zip(&compounds) {
            written.push(report::export_json(dir, EXPORT_PREFIX, analysis, compound)?);
        }
        let cascades: Vec<_> = analyses.iter().map(cascade_series).collect();
        written.push(super::write_charts(dir, CASCADE_CHART, &cascades)?);
        reporter.report(Progress::PhaseFinish);
    }

    info!(
        screened = analyses.len(),
        files = written.len(),
        "Screening workflow complete."
    );
    Ok(ScreenResult {
        compounds,
        analyses,
        written,
    })
}
