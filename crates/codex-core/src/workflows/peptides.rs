use crate::core::io::database;
use crate::core::models::peptide::PeptideData;
use crate::engine::error::EngineError;
use crate::engine::peptide::{
    CrocodilianResult, DesignRanking, DesignedPeptideResult, analyze_crocodilian,
    analyze_designed,
};
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::Path;
use tracing::{info, instrument};

fn load(
    database: Option<&Path>,
    bundled: fn() -> Result<Vec<PeptideData>, database::DatabaseError>,
) -> Result<Vec<PeptideData>, EngineError> {
    Ok(match database {
        Some(path) => database::load_peptides(path)?,
        None => bundled()?,
    })
}

/// Natural crocodilian peptides scored against the five-cancer panel.
#[instrument(skip_all, name = "crocodilian_workflow")]
pub fn run_crocodilian(
    database: Option<&Path>,
    reporter: &ProgressReporter,
) -> Result<Vec<CrocodilianResult>, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading Peptides",
    });
    let peptides = load(database, database::bundled_crocodilian_peptides)?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Cancer Targeting",
    });
    let results = analyze_crocodilian(&peptides);
    info!(peptides = results.len(), "Crocodilian analysis complete.");
    reporter.report(Progress::PhaseFinish);
    Ok(results)
}

/// Designed peptides with BCS; rank them with [`DesignRanking::new`].
#[instrument(skip_all, name = "peptide_design_workflow")]
pub fn run_designed(
    database: Option<&Path>,
    reporter: &ProgressReporter,
) -> Result<Vec<DesignedPeptideResult>, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading Peptides",
    });
    let peptides = load(database, database::bundled_designed_peptides)?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Design Screening",
    });
    let results = analyze_designed(&peptides);
    if let Some(best) = DesignRanking::new(&results).ranked.first() {
        info!(
            best = %best.peptide.name,
            therapeutic_index = best.therapeutic_index(),
            "Design screening complete."
        );
    }
    reporter.report(Progress::PhaseFinish);
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crocodilian_covers_every_cancer() {
        let results = run_crocodilian(None, &ProgressReporter::new()).unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.predictions.len() == 5));
    }

    #[test]
    fn designed_peptides_rank_by_therapeutic_index() {
        let results = run_designed(None, &ProgressReporter::new()).unwrap();
        let ranking = DesignRanking::new(&results);
        assert_eq!(ranking.ranked.len(), 10);
        assert!(
            ranking
                .ranked
                .windows(2)
                .all(|w| w[0].therapeutic_index() >= w[1].therapeutic_index())
        );
    }
}
