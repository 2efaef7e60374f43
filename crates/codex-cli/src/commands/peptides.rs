use super::progress_reporter;
use crate::cli::{PeptideCommands, PeptidesArgs};
use crate::error::Result;
use codex_resonance::engine::peptide::DesignRanking;
use codex_resonance::workflows::peptides;
use tokio::task;

pub async fn run(args: PeptidesArgs) -> Result<()> {
    match args.command {
        PeptideCommands::Crocodilian { database } => {
            let results = task::block_in_place(|| {
                peptides::run_crocodilian(database.as_deref(), &progress_reporter())
            })?;
            for result in &results {
                println!("{result}");
            }
        }
        PeptideCommands::Design { database } => {
            let results = task::block_in_place(|| {
                peptides::run_designed(database.as_deref(), &progress_reporter())
            })?;
            for result in &results {
                println!("{result}");
            }
            println!("{}", DesignRanking::new(&results));
        }
    }
    Ok(())
}
