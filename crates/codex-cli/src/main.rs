mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::config::ConfigSource;
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run_app().await {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook
        .install()
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install error hooks: {e}")))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("🚀 Codex CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        info!(
            "Setting Rayon global thread pool to {} threads.",
            num_threads
        );
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| {
                CliError::Other(anyhow::anyhow!("Failed to build global thread pool: {}", e))
            })?;
    }

    let source = ConfigSource {
        file: cli.config.as_deref(),
        set_values: &cli.set_values,
    };

    let command_result = match cli.command {
        Commands::Screen(args) => {
            info!("Dispatching to 'screen' command.");
            commands::screen::run(args, source).await
        }
        Commands::Dermatology(args) => {
            info!("Dispatching to 'dermatology' command.");
            commands::dermatology::run(args, source).await
        }
        Commands::Virus(args) => {
            info!("Dispatching to 'virus' command.");
            commands::virus::run(args, source).await
        }
        Commands::Fuel(args) => {
            info!("Dispatching to 'fuel' command.");
            commands::fuel::run(args, source).await
        }
        Commands::Peptides(args) => {
            info!("Dispatching to 'peptides' command.");
            commands::peptides::run(args).await
        }
        Commands::Plasma(args) => {
            info!("Dispatching to 'plasma' command.");
            commands::plasma::run(args, source).await
        }
        Commands::Soliton(args) => {
            info!("Dispatching to 'soliton' command.");
            commands::soliton::run(args, source).await
        }
        Commands::Resonance(args) => {
            info!("Dispatching to 'resonance' command.");
            commands::resonance::run(args, source).await
        }
        Commands::Sequence(args) => {
            info!("Dispatching to 'sequence' command.");
            commands::sequence::run(args, source).await
        }
        Commands::Discover(args) => {
            info!("Dispatching to 'discover' command.");
            commands::discover::run(args, source).await
        }
        Commands::FrequencyLaw(args) => {
            info!("Dispatching to 'frequency-law' command.");
            commands::discover::run_frequency_law(args, source).await
        }
        Commands::Targets(args) => {
            info!("Dispatching to 'targets' command.");
            commands::targets::run(args, source).await
        }
        Commands::Theory(args) => {
            info!("Dispatching to 'theory' command.");
            commands::theory::run(args, source).await
        }
    };

    match &command_result {
        Ok(()) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }
    command_result
}
