use crate::engine::config::{GeneratorConfig, NucleotideConstraints, PeptideConstraints};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::sequence::aligner::{self, AlignmentScoring, SequenceAlignment};
use crate::engine::sequence::generator::SequenceGenerator;
use crate::engine::sequence::stress::{GitStressTest, StressSettings};
use crate::engine::sequence::{GeneticSequence, SequenceKind};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub sequence: GeneticSequence,
    /// Seed actually used, so an unseeded run can be replayed.
    pub seed: u64,
    pub written: Vec<PathBuf>,
}

fn finish_generation(
    generator: &SequenceGenerator,
    sequence: GeneticSequence,
    output_dir: Option<&Path>,
) -> Result<GenerationResult, EngineError> {
    info!(
        name = %sequence.name,
        bcs_score = sequence.bcs_score,
        seed = generator.seed(),
        "Sequence generated."
    );
    let mut written = Vec::new();
    if let Some(dir) = output_dir {
        let file_name = format!("git_{}.json", sequence.name);
        written.push(super::write_document(dir, &file_name, &sequence)?);
    }
    Ok(GenerationResult {
        sequence,
        seed: generator.seed(),
        written,
    })
}

#[instrument(skip_all, name = "peptide_generation_workflow")]
pub fn generate_peptide(
    config: GeneratorConfig,
    constraints: &PeptideConstraints,
    output_dir: Option<&Path>,
    reporter: &ProgressReporter,
) -> Result<GenerationResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Peptide Generation",
    });
    let generator = SequenceGenerator::new(config);
    let sequence = generator.generate_peptide(constraints)?;
    reporter.report(Progress::PhaseFinish);
    finish_generation(&generator, sequence, output_dir)
}

#[instrument(skip_all, name = "dna_generation_workflow")]
pub fn generate_nucleotides(
    config: GeneratorConfig,
    constraints: &NucleotideConstraints,
    output_dir: Option<&Path>,
    reporter: &ProgressReporter,
) -> Result<GenerationResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "DNA Generation",
    });
    let generator = SequenceGenerator::new(config);
    let sequence = generator.generate_nucleotides(constraints)?;
    reporter.report(Progress::PhaseFinish);
    finish_generation(&generator, sequence, output_dir)
}

/// Both sequences are read with the same alphabet.
#[instrument(skip_all, name = "alignment_workflow")]
pub fn align(
    first: &str,
    second: &str,
    kind: SequenceKind,
    reporter: &ProgressReporter,
) -> Result<SequenceAlignment, EngineError> {
    reporter.report(Progress::PhaseStart { name: "Alignment" });
    let parse = |s: &str| match kind {
        SequenceKind::AminoAcid => GeneticSequence::peptide(s),
        SequenceKind::Nucleotide => GeneticSequence::nucleotides(s),
    };
    let (first, second) = (parse(first)?, parse(second)?);
    let alignment = aligner::align(&first, &second, &AlignmentScoring::default());
    info!(
        score = alignment.alignment_score,
        identity_percent = alignment.identity_percent,
        "Alignment complete."
    );
    reporter.report(Progress::PhaseFinish);
    Ok(alignment)
}

#[instrument(skip_all, name = "git_stress_workflow")]
pub fn stress_test(
    settings: &StressSettings,
    reporter: &ProgressReporter,
) -> Result<GitStressTest, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "GIT Stress Test",
    });
    let report = GitStressTest::run(settings)?;
    info!(passed = report.passed_count(), "GIT stress test complete.");
    reporter.report(Progress::PhaseFinish);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::GeneratorConfigBuilder;
    use tempfile::tempdir;

    fn config(seed: u64) -> GeneratorConfig {
        GeneratorConfigBuilder::new()
            .target_frequency_hz(1e11)
            .max_iterations(300)
            .seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn generated_dna_is_written_with_seed() {
        let dir = tempdir().unwrap();
        let result = generate_nucleotides(
            config(9),
            &NucleotideConstraints::new(30),
            Some(dir.path()),
            &ProgressReporter::new(),
        )
        .unwrap();
        assert_eq!(result.seed, 9);
        assert_eq!(result.sequence.length, 30);
        assert!(dir.path().join("git_nucleotide_seq_30.json").exists());
    }

    #[test]
    fn seeded_peptide_runs_agree() {
        let constraints = PeptideConstraints::new(15)
            .with_charge_range(-20.0, 20.0)
            .with_hydrophobicity_range(-5.0, 5.0);
        let reporter = ProgressReporter::new();
        let a = generate_peptide(config(4), &constraints, None, &reporter).unwrap();
        let b = generate_peptide(config(4), &constraints, None, &reporter).unwrap();
        assert_eq!(a.sequence, b.sequence);
    }

    #[test]
    fn aligns_with_requested_alphabet() {
        let reporter = ProgressReporter::new();
        let dna = align("GATTACA", "GATTACA", SequenceKind::Nucleotide, &reporter).unwrap();
        assert_eq!(dna.alignment_score, 7.0);
        assert!(align("", "KK", SequenceKind::AminoAcid, &reporter).is_err());
        assert!(matches!(
            align("kwkl", "xyzb", SequenceKind::AminoAcid, &reporter),
            Err(EngineError::InvalidInput { .. })
        ));
    }
}
