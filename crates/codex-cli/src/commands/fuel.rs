use super::{print_written, progress_reporter};
use crate::cli::DatabaseArgs;
use crate::config::ConfigSource;
use crate::error::Result;
use codex_resonance::workflows::fuel;
use tokio::task;

pub async fn run(args: DatabaseArgs, source: ConfigSource<'_>) -> Result<()> {
    let config = source.resolve(|c| c.with_output_flags(&args.output))?;
    let output_dir = config.output_dir();

    let result = task::block_in_place(|| {
        fuel::run(
            args.database.as_deref(),
            output_dir.as_deref(),
            &progress_reporter(),
        )
    })?;

    for report in result.reports() {
        println!("{report}");
    }
    println!("{}", result.comparison());
    print_written(&result.written);
    Ok(())
}
