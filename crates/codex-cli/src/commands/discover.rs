use super::{print_written, progress_reporter};
use crate::cli::DiscoverArgs;
use crate::config::ConfigSource;
use crate::error::{CliError, Result};
use codex_resonance::workflows::discover;
use tokio::task;

fn require_data_dir(args: &DiscoverArgs) -> Result<()> {
    if args.data_dir.is_dir() {
        Ok(())
    } else {
        Err(CliError::Argument(format!(
            "data directory does not exist: {}",
            args.data_dir.display()
        )))
    }
}

pub async fn run(args: DiscoverArgs, source: ConfigSource<'_>) -> Result<()> {
    require_data_dir(&args)?;
    let config = source.resolve(|c| c.with_output_flags(&args.output))?;
    let output_dir = config.output_dir();

    let result = task::block_in_place(|| {
        discover::run(&args.data_dir, output_dir.as_deref(), &progress_reporter())
    })?;

    println!("{}", result.report);
    print_written(&result.written);
    Ok(())
}

pub async fn run_frequency_law(args: DiscoverArgs, source: ConfigSource<'_>) -> Result<()> {
    require_data_dir(&args)?;
    let config = source.resolve(|c| c.with_output_flags(&args.output))?;
    let output_dir = config.output_dir();

    let result = task::block_in_place(|| {
        discover::frequency_law(&args.data_dir, output_dir.as_deref(), &progress_reporter())
    })?;

    println!("{}", result.law);
    print_written(&result.written);
    Ok(())
}
