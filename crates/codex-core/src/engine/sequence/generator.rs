use super::{GeneticSequence, GenerationError, SequenceKind, SequenceProperties};
use crate::core::alphabet::AMINO_ACID_LETTERS;
use crate::engine::config::{GeneratorConfig, NucleotideConstraints, PeptideConstraints};
use crate::engine::error::EngineError;
use crate::engine::resonance::predict_optimal_frequency;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::{debug, info};

const BCS_WEIGHT: f64 = 0.4;
const RESONANCE_WEIGHT: f64 = 0.4;
const STABILITY_WEIGHT: f64 = 0.2;
const PREFERRED_MW: f64 = 2000.0;
const MW_SCALE: f64 = 1000.0;

/// Spreads candidate indices across the seed space.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

struct Candidate {
    iteration: usize,
    score: f64,
    sequence: String,
    properties: SequenceProperties,
}

impl Candidate {
    /// Higher score wins; ties go to the earlier iteration.
    fn better(self, other: Self) -> Self {
        match self.score.partial_cmp(&other.score) {
            Some(Ordering::Greater) => self,
            Some(Ordering::Less) => other,
            _ if self.iteration <= other.iteration => self,
            _ => other,
        }
    }
}

/// Samples random candidates and keeps the one that best balances BCS,
/// resonance match with the target frequency, and molecular-weight stability.
pub struct SequenceGenerator {
    config: GeneratorConfig,
    seed: u64,
}

impl SequenceGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self { config, seed }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Seed actually in use, drawn from the OS when none was configured.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn rng_for(&self, iteration: usize) -> StdRng {
        StdRng::seed_from_u64(
            self.seed
                .wrapping_add((iteration as u64).wrapping_mul(SEED_STRIDE)),
        )
    }

    /// `0.4·BCS + 0.4·resonance + 0.2·stability`.
    pub fn score(&self, props: &SequenceProperties) -> f64 {
        let target = self.config.target_frequency_hz;
        let predicted = predict_optimal_frequency(props.timescale_s);
        let error = (predicted - target).abs() / target;
        let resonance = 1.0 / (1.0 + (1.0 + error).log10());
        let stability = 1.0 / (1.0 + (props.molecular_weight - PREFERRED_MW).abs() / MW_SCALE);
        BCS_WEIGHT * props.normalized_bcs() + RESONANCE_WEIGHT * resonance + STABILITY_WEIGHT * stability
    }

    fn search<F>(&self, kind: SequenceKind, candidate: F) -> Result<GeneticSequence, EngineError>
    where
        F: Fn(&mut StdRng) -> Option<(String, SequenceProperties)> + Sync,
    {
        let iterations = self.config.max_iterations;
        let best = (0..iterations)
            .into_par_iter()
            .filter_map(|iteration| {
                let mut rng = self.rng_for(iteration);
                let (sequence, properties) = candidate(&mut rng)?;
                Some(Candidate {
                    iteration,
                    score: self.score(&properties),
                    sequence,
                    properties,
                })
            })
            .reduce_with(Candidate::better)
            .ok_or(GenerationError::ConstraintsUnsatisfied { iterations })?;

        debug!(
            kind = kind.key(),
            iteration = best.iteration,
            score = best.score,
            "Selected best candidate"
        );
        Ok(GeneticSequence::from_properties(
            kind,
            best.sequence,
            best.properties,
        ))
    }

    /// Fails with [`GenerationError::ConstraintsUnsatisfied`] when no sampled
    /// sequence meets the charge and hydrophobicity windows.
    pub fn generate_peptide(
        &self,
        constraints: &PeptideConstraints,
    ) -> Result<GeneticSequence, EngineError> {
        constraints.validate()?;
        info!(
            length = constraints.length,
            target_hz = self.config.target_frequency_hz,
            "Generating peptide sequence"
        );
        let (q_min, q_max) = constraints.charge_range;
        let (h_min, h_max) = constraints.hydrophobicity_range;

        self.search(SequenceKind::AminoAcid, |rng| {
            let sequence: String = (0..constraints.length)
                .filter_map(|_| AMINO_ACID_LETTERS.choose(rng).copied())
                .collect();
            let props = SequenceProperties::of_peptide(&sequence).ok()?;
            let in_window = (q_min..=q_max).contains(&props.net_charge)
                && (h_min..=h_max).contains(&props.hydrophobicity);
            in_window.then_some((sequence, props))
        })
    }

    /// Shuffled sequence with the requested GC/AT composition.
    pub fn generate_nucleotides(
        &self,
        constraints: &NucleotideConstraints,
    ) -> Result<GeneticSequence, EngineError> {
        constraints.validate()?;
        info!(
            length = constraints.length,
            gc_content = constraints.gc_content,
            "Generating nucleotide sequence"
        );
        let length = constraints.length;
        let n_gc = (length as f64 * constraints.gc_content) as usize;
        let n_at = length - n_gc;

        self.search(SequenceKind::Nucleotide, |rng| {
            let mut bases: Vec<char> = Vec::with_capacity(length);
            for _ in 0..n_gc / 2 {
                bases.extend(['G', 'C']);
            }
            for _ in 0..n_at / 2 {
                bases.extend(['A', 'T']);
            }
            while bases.len() < length {
                bases.push(if rng.gen_bool(0.5) { 'G' } else { 'A' });
            }
            bases.shuffle(rng);
            let sequence: String = bases.into_iter().collect();
            let props = SequenceProperties::of_nucleotides(&sequence).ok()?;
            Some((sequence, props))
        })
    }
}
