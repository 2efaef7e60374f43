use super::{print_written, progress_reporter};
use crate::cli::SolitonArgs;
use crate::config::ConfigSource;
use crate::error::Result;
use codex_resonance::workflows::soliton::{self, SolitonOutcome};
use tokio::task;
use tracing::debug;

pub async fn run(args: SolitonArgs, source: ConfigSource<'_>) -> Result<()> {
    let config = source.resolve(|c| c.with_soliton_flags(&args))?;
    let soliton_config = config.soliton()?;
    let output_dir = config.output_dir();
    debug!(?soliton_config, "Resolved soliton configuration.");

    let result = task::block_in_place(|| {
        soliton::run(
            &args.sequences,
            &soliton_config,
            output_dir.as_deref(),
            &progress_reporter(),
        )
    })?;

    match &result.outcome {
        SolitonOutcome::Sequences(solutions) => {
            for solution in solutions {
                println!("{solution}");
            }
        }
        SolitonOutcome::StressTest(report) => println!("{report}"),
    }
    print_written(&result.written);
    Ok(())
}
