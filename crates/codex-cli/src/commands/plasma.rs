use super::{print_written, progress_reporter};
use crate::cli::PlasmaArgs;
use crate::config::ConfigSource;
use crate::error::Result;
use codex_resonance::workflows::plasma;
use tokio::task;
use tracing::debug;

pub async fn run(args: PlasmaArgs, source: ConfigSource<'_>) -> Result<()> {
    let config = source.resolve(|c| c.with_plasma_flags(&args))?;
    let plasma_config = config.plasma()?;
    let output_dir = config.output_dir();
    debug!(?plasma_config, "Resolved plasma configuration.");

    let result = task::block_in_place(|| {
        plasma::run(&plasma_config, output_dir.as_deref(), &progress_reporter())
    })?;

    println!("{}", result.analysis);
    print_written(&result.written);
    Ok(())
}
