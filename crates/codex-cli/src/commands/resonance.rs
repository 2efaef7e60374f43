use super::{print_written, progress_reporter};
use crate::cli::OutputArgs;
use crate::config::ConfigSource;
use crate::error::Result;
use codex_resonance::workflows::resonance;
use tokio::task;

pub async fn run(args: OutputArgs, source: ConfigSource<'_>) -> Result<()> {
    let config = source.resolve(|c| c.with_output_flags(&args))?;
    let output_dir = config.output_dir();

    let result =
        task::block_in_place(|| resonance::run(output_dir.as_deref(), &progress_reporter()))?;

    println!("{}", result.clinical);
    println!("{}", result.cross_validation);
    println!("{}", result.composite);
    print_written(&result.written);
    Ok(())
}
