use super::{print_written, progress_reporter};
use crate::cli::ScreenArgs;
use crate::config::ConfigSource;
use crate::error::Result;
use codex_resonance::workflows::screen::{self, ScreenRequest};
use tokio::task;
use tracing::info;

pub async fn run(args: ScreenArgs, source: ConfigSource<'_>) -> Result<()> {
    let config = source.resolve(|c| c.with_output_flags(&args.source.output))?;
    let output_dir = config.output_dir();
    let request = ScreenRequest {
        database: args.source.database.as_deref(),
        compounds: &args.compounds,
        output_dir: output_dir.as_deref(),
    };

    let result = task::block_in_place(|| screen::run(&request, &progress_reporter()))?;
    info!(screened = result.analyses.len(), "Screening finished.");

    for report in result.reports() {
        println!("{report}");
    }
    if result.analyses.len() > 1 {
        println!("{}", result.comparison());
    }
    print_written(&result.written);
    Ok(())
}
