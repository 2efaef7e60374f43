use super::{print_written, progress_reporter};
use crate::cli::{SequenceArgs, SequenceCommands};
use crate::config::ConfigSource;
use crate::error::{CliError, Result};
use codex_resonance::engine::config::{NucleotideConstraints, PeptideConstraints};
use codex_resonance::engine::sequence::SequenceKind;
use codex_resonance::workflows::sequence::{self, GenerationResult};
use tokio::task;

/// Peptide drive frequency used when no target is configured.
pub const DEFAULT_PEPTIDE_TARGET_HZ: f64 = 7.5e11;
/// Nucleotide drive frequency used when no target is configured.
pub const DEFAULT_DNA_TARGET_HZ: f64 = 34e9;

fn range(values: Option<Vec<f64>>, flag: &str) -> Result<Option<(f64, f64)>> {
    match values.as_deref() {
        None => Ok(None),
        Some([min, max]) => Ok(Some((*min, *max))),
        Some(_) => Err(CliError::Argument(format!("{flag} takes exactly MIN MAX"))),
    }
}

fn print_generation(result: &GenerationResult) {
    println!("{}", result.sequence);
    println!("Seed: {}", result.seed);
    print_written(&result.written);
}

pub async fn run(args: SequenceArgs, source: ConfigSource<'_>) -> Result<()> {
    match args.command {
        SequenceCommands::GeneratePeptide {
            length,
            charge_range,
            hydrophobicity_range,
            generator,
            output,
        } => {
            let config = source.resolve(|c| {
                c.with_generator_flags(&generator)
                    .with_output_flags(&output)
            })?;
            let generator_config = config.generator(DEFAULT_PEPTIDE_TARGET_HZ)?;
            let mut constraints = PeptideConstraints::new(length);
            if let Some((min, max)) = range(charge_range, "--charge-range")? {
                constraints = constraints.with_charge_range(min, max);
            }
            if let Some((min, max)) = range(hydrophobicity_range, "--hydrophobicity-range")? {
                constraints = constraints.with_hydrophobicity_range(min, max);
            }
            let output_dir = config.output_dir();
            let result = task::block_in_place(|| {
                sequence::generate_peptide(
                    generator_config,
                    &constraints,
                    output_dir.as_deref(),
                    &progress_reporter(),
                )
            })?;
            print_generation(&result);
        }
        SequenceCommands::GenerateDna {
            length,
            gc_content,
            generator,
            output,
        } => {
            let config = source.resolve(|c| {
                c.with_generator_flags(&generator)
                    .with_output_flags(&output)
            })?;
            let generator_config = config.generator(DEFAULT_DNA_TARGET_HZ)?;
            let constraints = NucleotideConstraints::new(length).with_gc_content(gc_content);
            let output_dir = config.output_dir();
            let result = task::block_in_place(|| {
                sequence::generate_nucleotides(
                    generator_config,
                    &constraints,
                    output_dir.as_deref(),
                    &progress_reporter(),
                )
            })?;
            print_generation(&result);
        }
        SequenceCommands::Align { first, second, dna } => {
            let kind = if dna {
                SequenceKind::Nucleotide
            } else {
                SequenceKind::AminoAcid
            };
            let alignment = task::block_in_place(|| {
                sequence::align(&first, &second, kind, &progress_reporter())
            })?;
            println!("{alignment}");
        }
        SequenceCommands::StressTest { generator } => {
            let config = source.resolve(|c| c.with_generator_flags(&generator))?;
            let settings = config.stress_settings();
            let report = task::block_in_place(|| {
                sequence::stress_test(&settings, &progress_reporter())
            })?;
            println!("{report}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_requires_two_bounds() {
        assert_eq!(range(None, "--charge-range").unwrap(), None);
        assert_eq!(
            range(Some(vec![-1.0, 2.0]), "--charge-range").unwrap(),
            Some((-1.0, 2.0))
        );
        assert!(matches!(
            range(Some(vec![1.0]), "--charge-range"),
            Err(CliError::Argument(_))
        ));
    }
}
