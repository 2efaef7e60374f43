//! # Genetic Information Transfer
//!
//! Resonance-guided generation and alignment of peptide and nucleotide
//! sequences. Every sequence carries a BCS-style score derived from the
//! functional groups of its residues and a characteristic timescale whose
//! optimal drive frequency is compared against a target.
//!
//! - [`generator`] samples random candidates under composition constraints and keeps the best.
//! - [`aligner`] scores global alignments together with BCS and resonance compatibility.
//! - [`stress`] runs the six-test validation battery.

use crate::core::alphabet::{AMINO_ACIDS, NUCLEOTIDES, group_weight};
use crate::engine::error::EngineError;
use crate::engine::resonance::{
    predict_optimal_frequency, resonance_parameter, validate_resonance_condition,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

pub mod aligner;
pub mod generator;
pub mod stress;

/// Offset and span that map a raw BCS contribution onto `[0, 1]`.
const BCS_OFFSET: f64 = 10.0;
const BCS_SPAN: f64 = 20.0;

/// Empirical peptide relaxation scaling, seconds per dalton.
const PEPTIDE_TIMESCALE_PER_DA: f64 = 1e-12 / 3000.0;
/// Base-pair breathing time.
const BASE_PAIR_TIMESCALE_S: f64 = 30e-12;
const PHOSPHATE_GROUP: &str = "phosphate_OPO3";

pub const GENERATED_BY: &str = "Generated by Codex GIT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("No candidate satisfied the constraints after {iterations} iterations")]
    ConstraintsUnsatisfied { iterations: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceKind {
    AminoAcid,
    Nucleotide,
}

impl SequenceKind {
    pub const fn key(self) -> &'static str {
        match self {
            Self::AminoAcid => "amino_acid",
            Self::Nucleotide => "nucleotide",
        }
    }
}

/// Composition-derived properties of a sequence before it is scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceProperties {
    pub length: usize,
    pub net_charge: f64,
    pub molecular_weight: f64,
    /// Mean residue hydrophobicity; zero for nucleotides.
    pub hydrophobicity: f64,
    pub functional_groups: BTreeMap<&'static str, u32>,
    /// Raw weighted sum of functional-group BCS weights.
    pub bcs_contribution: f64,
    pub timescale_s: f64,
}

impl SequenceProperties {
    /// Residues must be upper-case one-letter amino-acid codes.
    pub fn of_peptide(sequence: &str) -> Result<Self, EngineError> {
        let length = sequence.chars().count();
        if length == 0 {
            return Err(EngineError::invalid("sequence", "peptide sequence is empty"));
        }
        if let Some(c) = sequence.chars().find(|c| !AMINO_ACIDS.contains_key(c)) {
            return Err(EngineError::invalid(
                "sequence",
                format!("unknown amino acid '{c}'"),
            ));
        }

        let mut props = Self {
            length,
            net_charge: 0.0,
            molecular_weight: 0.0,
            hydrophobicity: 0.0,
            functional_groups: BTreeMap::new(),
            bcs_contribution: 0.0,
            timescale_s: 0.0,
        };
        for aa in sequence.chars().filter_map(|c| AMINO_ACIDS.get(&c)) {
            props.net_charge += aa.charge;
            props.molecular_weight += aa.molecular_weight;
            props.hydrophobicity += aa.hydrophobicity;
            for &(group, count) in aa.groups {
                *props.functional_groups.entry(group).or_default() += count;
            }
        }
        props.hydrophobicity /= length as f64;
        props.bcs_contribution = props
            .functional_groups
            .iter()
            .map(|(group, &count)| group_weight(group) * f64::from(count))
            .sum();
        props.timescale_s = props.molecular_weight * PEPTIDE_TIMESCALE_PER_DA;
        Ok(props)
    }

    /// One phosphate and one negative charge per base.
    pub fn of_nucleotides(sequence: &str) -> Result<Self, EngineError> {
        let length = sequence.chars().count();
        if length == 0 {
            return Err(EngineError::invalid(
                "sequence",
                "nucleotide sequence is empty",
            ));
        }
        if let Some(c) = sequence.chars().find(|c| !NUCLEOTIDES.contains_key(c)) {
            return Err(EngineError::invalid(
                "sequence",
                format!("unknown nucleotide '{c}'"),
            ));
        }

        let molecular_weight = sequence
            .chars()
            .filter_map(|c| NUCLEOTIDES.get(&c))
            .map(|n| n.molecular_weight)
            .sum();
        let phosphates = u32::try_from(length).unwrap_or(u32::MAX);
        Ok(Self {
            length,
            net_charge: -(length as f64),
            molecular_weight,
            hydrophobicity: 0.0,
            functional_groups: BTreeMap::from([(PHOSPHATE_GROUP, phosphates)]),
            bcs_contribution: group_weight(PHOSPHATE_GROUP) * length as f64,
            timescale_s: BASE_PAIR_TIMESCALE_S * length as f64 / 2.0,
        })
    }

    /// BCS contribution mapped onto `[0, 1]`.
    pub fn normalized_bcs(&self) -> f64 {
        ((self.bcs_contribution + BCS_OFFSET) / BCS_SPAN).clamp(0.0, 1.0)
    }
}

/// Fraction of G and C among the bases of `sequence`.
pub fn gc_content(sequence: &str) -> f64 {
    let total = sequence.chars().count();
    if total == 0 {
        return 0.0;
    }
    let gc = sequence.chars().filter(|c| matches!(c, 'G' | 'C')).count();
    gc as f64 / total as f64
}

/// Mean THz frequency of the recognised bases.
pub fn mean_base_frequency_thz(sequence: &str) -> f64 {
    let total = sequence.chars().count();
    if total == 0 {
        return 0.0;
    }
    let sum: f64 = sequence
        .chars()
        .filter_map(|c| NUCLEOTIDES.get(&c))
        .map(|n| n.thz_frequency)
        .sum();
    sum / total as f64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneticSequence {
    pub kind: SequenceKind,
    pub sequence: String,
    pub length: usize,
    pub bcs_score: f64,
    pub functional_groups: BTreeMap<&'static str, u32>,
    pub timescale_s: f64,
    pub optimal_frequency_hz: f64,
    pub resonance_parameter: f64,
    pub molecular_weight: f64,
    pub net_charge: f64,
    pub hydrophobicity: f64,
    pub name: String,
    pub target_application: String,
}

impl GeneticSequence {
    pub fn from_properties(kind: SequenceKind, sequence: String, props: SequenceProperties) -> Self {
        let optimal_frequency_hz = predict_optimal_frequency(props.timescale_s);
        Self {
            kind,
            name: format!("{}_seq_{}", kind.key(), sequence.chars().count()),
            bcs_score: props.normalized_bcs(),
            resonance_parameter: resonance_parameter(optimal_frequency_hz, props.timescale_s),
            optimal_frequency_hz,
            length: props.length,
            functional_groups: props.functional_groups,
            timescale_s: props.timescale_s,
            molecular_weight: props.molecular_weight,
            net_charge: props.net_charge,
            hydrophobicity: props.hydrophobicity,
            sequence,
            target_application: GENERATED_BY.to_string(),
        }
    }

    pub fn peptide(sequence: &str) -> Result<Self, EngineError> {
        let props = SequenceProperties::of_peptide(sequence)?;
        Ok(Self::from_properties(
            SequenceKind::AminoAcid,
            sequence.to_string(),
            props,
        ))
    }

    pub fn nucleotides(sequence: &str) -> Result<Self, EngineError> {
        let props = SequenceProperties::of_nucleotides(sequence)?;
        Ok(Self::from_properties(
            SequenceKind::Nucleotide,
            sequence.to_string(),
            props,
        ))
    }

    /// Whether `ρ` sits in the therapeutic window. `_tolerance` is accepted for
    /// call-site compatibility and does not widen the window.
    pub fn is_resonant(&self, _tolerance: f64) -> bool {
        validate_resonance_condition(self.optimal_frequency_hz, self.timescale_s)
    }
}

impl fmt::Display for GeneticSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "      Name: {}", self.name)?;
        writeln!(f, "      Sequence: {}", self.sequence)?;
        writeln!(f, "      Length: {}", self.length)?;
        writeln!(f, "      BCS Score: {:.3}", self.bcs_score)?;
        writeln!(f, "      Frequency: {:.2e} Hz", self.optimal_frequency_hz)?;
        writeln!(f, "      ρ: {:.3}", self.resonance_parameter)?;
        writeln!(f, "      Charge: {:+.1}", self.net_charge)?;
        writeln!(f, "      MW: {:.1} Da", self.molecular_weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peptide_properties_sum_residue_contributions() {
        let props = SequenceProperties::of_peptide("KS").unwrap();
        assert_eq!(props.net_charge, 1.0);
        assert!((props.molecular_weight - 251.3).abs() < 1e-9);
        assert!((props.hydrophobicity - (-1.50 - 0.18) / 2.0).abs() < 1e-12);
        assert_eq!(props.functional_groups["amine_NH2"], 1);
        assert_eq!(props.functional_groups["hydroxyl_OH"], 1);
        assert!((props.bcs_contribution - 1.8).abs() < 1e-12);
        assert!((props.timescale_s - 251.3 / 3000.0 * 1e-12).abs() < 1e-24);
    }

    #[test]
    fn letters_outside_the_alphabet_are_rejected() {
        assert!(SequenceProperties::of_peptide("KXK").is_err());
        assert!(SequenceProperties::of_peptide("kwkl").is_err());
        assert!(SequenceProperties::of_nucleotides("GATN").is_err());
        assert!(matches!(
            GeneticSequence::nucleotides("xyzb"),
            Err(EngineError::InvalidInput {
                parameter: "sequence",
                ..
            })
        ));
    }

    #[test]
    fn nucleotides_carry_one_phosphate_per_base() {
        let props = SequenceProperties::of_nucleotides("GCAT").unwrap();
        assert_eq!(props.net_charge, -4.0);
        assert_eq!(props.functional_groups[PHOSPHATE_GROUP], 4);
        assert!((props.bcs_contribution + 4.8).abs() < 1e-12);
        assert!((props.timescale_s - 60e-12).abs() < 1e-24);
        assert!((props.normalized_bcs() - 0.26).abs() < 1e-12);
    }

    #[test]
    fn normalized_bcs_is_clamped() {
        let long_dna = "A".repeat(50);
        let props = SequenceProperties::of_nucleotides(&long_dna).unwrap();
        assert_eq!(props.normalized_bcs(), 0.0);
    }

    #[test]
    fn generated_sequences_resonate_by_construction() {
        let seq = GeneticSequence::peptide("KWKLFKKIGIGRLKVL").unwrap();
        assert_eq!(seq.name, "amino_acid_seq_16");
        assert_eq!(seq.target_application, GENERATED_BY);
        assert!((seq.resonance_parameter - 1.0).abs() < 1e-12);
        assert!(seq.is_resonant(0.3));
        assert!(seq.is_resonant(100.0));
    }

    #[test]
    fn gc_content_and_mean_frequency() {
        assert_eq!(gc_content("GGCA"), 0.75);
        assert!((mean_base_frequency_thz("AT") - 0.60).abs() < 1e-12);
        assert_eq!(gc_content(""), 0.0);
    }

    #[test]
    fn empty_sequences_are_rejected() {
        assert!(GeneticSequence::peptide("").is_err());
        assert!(GeneticSequence::nucleotides("").is_err());
    }
}
