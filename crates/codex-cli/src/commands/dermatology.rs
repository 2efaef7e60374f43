use super::{print_written, progress_reporter};
use crate::cli::DermatologyArgs;
use crate::config::ConfigSource;
use crate::error::Result;
use codex_resonance::workflows::dermatology;
use tokio::task;

pub async fn run(args: DermatologyArgs, source: ConfigSource<'_>) -> Result<()> {
    let config = source.resolve(|c| c.with_output_flags(&args.source.output))?;
    let output_dir = config.output_dir();

    let result = task::block_in_place(|| {
        dermatology::run(
            args.source.database.as_deref(),
            output_dir.as_deref(),
            &progress_reporter(),
        )
    })?;

    for analysis in &result.analyses {
        println!("{analysis}");
    }
    println!("{}", result.comparison());
    print_written(&result.written);
    Ok(())
}
