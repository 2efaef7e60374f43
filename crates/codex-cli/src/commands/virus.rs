use super::{print_written, progress_reporter};
use crate::cli::VirusArgs;
use crate::config::ConfigSource;
use crate::error::{CliError, Result};
use codex_resonance::core::models::virus::VirusData;
use codex_resonance::workflows::virus::{self, VirusRequest};
use tokio::task;

fn custom_particle(args: &VirusArgs) -> Result<Option<VirusData>> {
    match (&args.name, args.diameter_nm) {
        (Some(name), Some(diameter)) => {
            let mut virus = VirusData::new(name.clone(), diameter);
            if let Some(ghz) = args.observed_ghz {
                virus = virus.with_observed_frequency(ghz);
            }
            Ok(Some(virus))
        }
        (None, None) => Ok(None),
        _ => Err(CliError::Argument(
            "--name and --diameter-nm must be given together".to_string(),
        )),
    }
}

pub async fn run(args: VirusArgs, source: ConfigSource<'_>) -> Result<()> {
    let config = source.resolve(|c| c.with_output_flags(&args.source.output))?;
    let output_dir = config.output_dir();
    let request = VirusRequest {
        custom: custom_particle(&args)?,
        database: args.source.database.as_deref(),
        output_dir: output_dir.as_deref(),
    };

    let result = task::block_in_place(|| virus::run(&request, &progress_reporter()))?;

    for validation in &result.validations {
        println!("{validation}");
    }
    if let Some(analysis) = &result.multi_mode {
        println!("{analysis}");
    }
    println!("{}", result.summary());
    print_written(&result.written);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::DatabaseArgs;

    fn args(name: Option<&str>, diameter_nm: Option<f64>) -> VirusArgs {
        VirusArgs {
            name: name.map(str::to_string),
            diameter_nm,
            observed_ghz: Some(6.0),
            source: DatabaseArgs::default(),
        }
    }

    #[test]
    fn custom_particle_needs_name_and_diameter() {
        assert!(custom_particle(&args(None, None)).unwrap().is_none());
        let virus = custom_particle(&args(Some("Phage"), Some(90.0)))
            .unwrap()
            .unwrap();
        assert_eq!(virus.dimension_nm, 90.0);
        assert!(matches!(
            custom_particle(&args(Some("Phage"), None)),
            Err(CliError::Argument(_))
        ));
    }
}
