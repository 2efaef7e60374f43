use super::GeneticSequence;
use nalgebra::DMatrix;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlignmentScoring {
    pub gap_penalty: f64,
    pub mismatch_penalty: f64,
    pub match_bonus: f64,
}

impl Default for AlignmentScoring {
    fn default() -> Self {
        Self {
            gap_penalty: -1.0,
            mismatch_penalty: -0.5,
            match_bonus: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceAlignment {
    pub first: String,
    pub second: String,
    /// Global Needleman-Wunsch score.
    pub alignment_score: f64,
    pub bcs_compatibility: f64,
    pub resonance_compatibility: f64,
    /// Length difference.
    pub gaps: usize,
    /// Positions past the shorter sequence count as mismatches.
    pub mismatches: usize,
    /// Ungapped positional identity over the longer length.
    pub identity_percent: f64,
}

/// Score of the optimal global alignment of `a` and `b`.
pub fn needleman_wunsch(a: &[char], b: &[char], scoring: &AlignmentScoring) -> f64 {
    let (n, m) = (a.len(), b.len());
    let mut h = DMatrix::<f64>::zeros(n + 1, m + 1);
    for i in 0..=n {
        h[(i, 0)] = i as f64 * scoring.gap_penalty;
    }
    for j in 0..=m {
        h[(0, j)] = j as f64 * scoring.gap_penalty;
    }
    for i in 1..=n {
        for j in 1..=m {
            let pair = if a[i - 1] == b[j - 1] {
                scoring.match_bonus
            } else {
                scoring.mismatch_penalty
            };
            let diagonal = h[(i - 1, j - 1)] + pair;
            let delete = h[(i - 1, j)] + scoring.gap_penalty;
            let insert = h[(i, j - 1)] + scoring.gap_penalty;
            h[(i, j)] = diagonal.max(delete).max(insert);
        }
    }
    h[(n, m)]
}

pub fn align(
    first: &GeneticSequence,
    second: &GeneticSequence,
    scoring: &AlignmentScoring,
) -> SequenceAlignment {
    let a: Vec<char> = first.sequence.chars().collect();
    let b: Vec<char> = second.sequence.chars().collect();
    let longest = a.len().max(b.len());
    let matches = a.iter().zip(&b).filter(|(x, y)| x == y).count();

    let identity_percent = if longest == 0 {
        0.0
    } else {
        matches as f64 / longest as f64 * 100.0
    };

    let f1 = first.optimal_frequency_hz;
    let f2 = second.optimal_frequency_hz;
    let avg = (f1 + f2) / 2.0;
    let resonance_compatibility = if avg > 0.0 {
        1.0 / (1.0 + (f1 - f2).abs() / avg)
    } else {
        0.0
    };

    SequenceAlignment {
        first: first.sequence.clone(),
        second: second.sequence.clone(),
        alignment_score: needleman_wunsch(&a, &b, scoring),
        bcs_compatibility: 1.0 - (first.bcs_score - second.bcs_score).abs(),
        resonance_compatibility,
        gaps: a.len().abs_diff(b.len()),
        mismatches: longest - matches,
        identity_percent,
    }
}

fn preview(sequence: &str) -> String {
    sequence.chars().take(30).collect()
}

impl fmt::Display for SequenceAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   Sequence 1: {}...", preview(&self.first))?;
        writeln!(f, "   Sequence 2: {}...", preview(&self.second))?;
        writeln!(f)?;
        writeln!(f, "   Alignment Score: {:.2}", self.alignment_score)?;
        writeln!(f, "   Identity: {:.1}%", self.identity_percent)?;
        writeln!(f, "   Gaps: {}, Mismatches: {}", self.gaps, self.mismatches)?;
        writeln!(f, "   BCS Compatibility: {:.3}", self.bcs_compatibility)?;
        writeln!(
            f,
            "   Resonance Compatibility: {:.3}",
            self.resonance_compatibility
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn identical_sequences_score_their_length() {
        let s = chars("KWKLFKKIGIGRLKVL");
        assert_eq!(
            needleman_wunsch(&s, &s, &AlignmentScoring::default()),
            s.len() as f64
        );
    }

    #[test]
    fn single_gap_costs_one() {
        let score = needleman_wunsch(&chars("ACGT"), &chars("AGT"), &AlignmentScoring::default());
        assert_eq!(score, 2.0);
    }

    #[test]
    fn empty_against_sequence_is_all_gaps() {
        let score = needleman_wunsch(&[], &chars("ACG"), &AlignmentScoring::default());
        assert_eq!(score, -3.0);
    }

    #[test]
    fn alignment_metrics() {
        let a = GeneticSequence::peptide("KKKK").unwrap();
        let b = GeneticSequence::peptide("KKAKLL").unwrap();
        let out = align(&a, &b, &AlignmentScoring::default());
        assert_eq!(out.gaps, 2);
        assert_eq!(out.mismatches, 3);
        assert!((out.identity_percent - 50.0).abs() < 1e-12);
        assert!(out.resonance_compatibility > 0.0 && out.resonance_compatibility <= 1.0);
        assert!(out.bcs_compatibility <= 1.0);
    }

    #[test]
    fn self_alignment_is_fully_compatible() {
        let a = GeneticSequence::peptide("GIGAVLKVLTTGLPALISWIKRKRQQ").unwrap();
        let out = align(&a, &a, &AlignmentScoring::default());
        assert_eq!(out.identity_percent, 100.0);
        assert_eq!(out.bcs_compatibility, 1.0);
        assert_eq!(out.resonance_compatibility, 1.0);
    }
}
