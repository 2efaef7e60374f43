//! Skin-care extension of the biocompatibility screen.
//!
//! Every ingredient is screened with the regular BCS analyzer, then placed in a
//! coherence type and paired with its barrier-impact profile.

use crate::core::io::database::CompoundDatabase;
use crate::core::io::export::ExportError;
use crate::core::models::compound::{BarrierImpact, CompoundData};
use crate::engine::bcs::Verdict;
use crate::engine::bcs::analyzer::{BcsAnalysis, analyze_compound};
use crate::engine::bcs::report::{self, BcsReport};
use crate::engine::text::{self, REPORT_WIDTH};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub const EXPORT_PREFIX: &str = "bcs_dermatology";

const TYPE1_KEYS: [&str; 4] = ["hyaluronic", "niacinamide", "glycerin", "urea"];
const TYPE2_KEYS: [&str; 1] = ["petrolatum"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DermatologyType {
    ActivePromoter,
    PassivePreserver,
    Disruptive,
    Conditional,
}

impl DermatologyType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ActivePromoter => "TYPE 1: Active Coherence Promoter",
            Self::PassivePreserver => "TYPE 2: Passive Coherence Preserver",
            Self::Disruptive => "DISRUPTIVE: Non-Biocompatible",
            Self::Conditional => "CONDITIONAL: See detailed analysis",
        }
    }

    /// Label up to the colon, as shown in the comparison table.
    pub fn short(self) -> &'static str {
        let label = self.label();
        label.split(':').next().unwrap_or(label)
    }
}

impl fmt::Display for DermatologyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Name keywords take precedence over the verdict.
pub fn classify_type(compound_name: &str, verdict: Verdict) -> DermatologyType {
    let name = compound_name.to_lowercase();
    if TYPE1_KEYS.iter().any(|k| name.contains(k)) {
        DermatologyType::ActivePromoter
    } else if TYPE2_KEYS.iter().any(|k| name.contains(k)) {
        DermatologyType::PassivePreserver
    } else if verdict == Verdict::Fail {
        DermatologyType::Disruptive
    } else {
        DermatologyType::Conditional
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialNote {
    pub heading: &'static str,
    pub points: &'static [&'static str],
}

struct NoteRule {
    keys: &'static [&'static str],
    note: SpecialNote,
}

const NOTE_RULES: &[NoteRule] = &[
    NoteRule {
        keys: &["retinol"],
        note: SpecialNote {
            heading: "⚠️  CONDITIONAL VERDICT NOTES:",
            points: &[
                "Transient decoherence (weeks 0-6) → Long-term coherence (weeks 6+)",
                "Requires: Gradual introduction, sun protection, barrier support",
                "Contraindicated: Pregnancy, compromised barrier",
            ],
        },
    },
    NoteRule {
        keys: &["petrolatum"],
        note: SpecialNote {
            heading: "⚠️  TYPE 2 CLASSIFICATION NOTES:",
            points: &[
                "Passive protection, NOT active participation in water dynamics",
                "Best combined with Type 1 humectants (glycerin, HA)",
                "Ideal for: Barrier protection, wound healing, severe compromise",
            ],
        },
    },
    NoteRule {
        keys: &["sls", "sulfate"],
        note: SpecialNote {
            heading: "🚨 CRITICAL FAILURE NOTES:",
            points: &[
                "Mechanism of action = barrier disruption (unavoidable)",
                "NO adaptation period; only cumulative damage",
                "Alternative surfactants: Sodium cocoyl isethionate, decyl glucoside",
            ],
        },
    },
    NoteRule {
        keys: &["paraben"],
        note: SpecialNote {
            heading: "🚨 ENDOCRINE DISRUPTION FAILURE:",
            points: &[
                "Molecular mimicry of estrogen (master regulatory hormone)",
                "Signaling-level decoherence (not structural)",
                "Alternatives: Phenoxyethanol, ethylhexylglycerin, benzyl alcohol",
            ],
        },
    },
];

pub fn special_notes(compound_name: &str) -> Vec<SpecialNote> {
    let name = compound_name.to_lowercase();
    NOTE_RULES
        .iter()
        .filter(|r| r.keys.iter().any(|k| name.contains(k)))
        .map(|r| r.note)
        .collect()
}

pub const FORMULATION_PRINCIPLES: &str = "\
PRINCIPLE 1: Biomimetic Hydration Architecture
  ✅ Use: Glycerin (5-10%) + HA (0.1-1%) + Urea (2-5%)
  ❌ Avoid: SLS and harsh surfactants

PRINCIPLE 2: Active Barrier Support
  ✅ Use: Niacinamide (2-5%) for ceramide synthesis
  ❌ Avoid: Parabens (endocrine disruptors)

PRINCIPLE 3: Occlusion Without Obstruction
  ✅ Use: Petrolatum + Type 1 humectants (combination strategy)
  ❌ Avoid: Relying solely on occlusives

PRINCIPLE 4: Therapeutic Decoherence (When Appropriate)
  ✅ Use: Retinol with adaptation protocol + barrier support
  ❌ Avoid: SLS (pathological decoherence, no adaptation)";

#[derive(Debug, Clone)]
pub struct DermatologyAnalysis {
    pub compound: CompoundData,
    pub bcs: BcsAnalysis,
    pub derma_type: DermatologyType,
    pub barrier: BarrierImpact,
    pub notes: Vec<SpecialNote>,
}

/// Screens every compound of a dermatology database; output follows input order.
pub fn analyze_database(db: &CompoundDatabase) -> Vec<DermatologyAnalysis> {
    db.compound
        .par_iter()
        .map(|compound| {
            let bcs = analyze_compound(compound);
            DermatologyAnalysis {
                derma_type: classify_type(&compound.name, bcs.verdict),
                barrier: db.barrier_impact(&compound.name),
                notes: special_notes(&compound.name),
                compound: compound.clone(),
                bcs,
            }
        })
        .collect()
}

impl fmt::Display for DermatologyAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(
            f,
            "DERMATOLOGICAL BCS ANALYSIS: {}",
            self.compound.name.to_uppercase()
        )?;
        writeln!(f, "{}", text::rule('=', 80))?;
        write!(f, "{}", BcsReport::new(&self.bcs, &self.compound))?;

        writeln!(f)?;
        writeln!(f, "{}", text::rule('-', 80))?;
        writeln!(f, "DERMATOLOGY-SPECIFIC ASSESSMENT")?;
        writeln!(f, "{}", text::rule('-', 80))?;
        writeln!(f)?;
        writeln!(f, "🔬 Dermatological Classification: {}", self.derma_type)?;

        let b = &self.barrier;
        writeln!(f)?;
        writeln!(f, "📊 Barrier Dynamics Impact:")?;
        writeln!(f, "   Target Layer: {}", b.skin_layer_target)?;
        writeln!(f, "   TEWL Impact: {}", b.tewl_impact)?;
        writeln!(f, "   Optimal Concentration: {}", b.optimal_concentration)?;

        writeln!(f)?;
        writeln!(f, "✅ Coherence-Promoting Mechanisms:")?;
        if b.coherence_mechanisms.is_empty() {
            writeln!(f, "   ⚠️  None identified")?;
        }
        for m in &b.coherence_mechanisms {
            writeln!(f, "   • {m}")?;
        }
        writeln!(f)?;
        writeln!(f, "❌ Decoherence Mechanisms:")?;
        if b.decoherence_mechanisms.is_empty() {
            writeln!(f, "   ✅ None identified")?;
        }
        for m in &b.decoherence_mechanisms {
            writeln!(f, "   • {m}")?;
        }

        for note in &self.notes {
            writeln!(f)?;
            writeln!(f, "{}", note.heading)?;
            for point in note.points {
                writeln!(f, "   • {point}")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DermatologySummary {
    pub pass: usize,
    pub conditional: usize,
    pub fail: usize,
    pub average_score: f64,
    pub type1: usize,
    pub type2: usize,
}

impl DermatologySummary {
    pub fn from_analyses(analyses: &[DermatologyAnalysis]) -> Self {
        let count = |pred: fn(&DermatologyAnalysis) -> bool| analyses.iter().filter(|a| pred(a)).count();
        let average_score = if analyses.is_empty() {
            0.0
        } else {
            analyses.iter().map(|a| a.bcs.final_score()).sum::<f64>() / analyses.len() as f64
        };
        Self {
            pass: count(|a| a.bcs.verdict.is_biocompatible()),
            conditional: count(|a| a.bcs.verdict.is_conditional()),
            fail: count(|a| !a.bcs.verdict.is_biocompatible() && !a.bcs.verdict.is_conditional()),
            average_score,
            type1: count(|a| a.derma_type == DermatologyType::ActivePromoter),
            type2: count(|a| a.derma_type == DermatologyType::PassivePreserver),
        }
    }
}

fn table_verdict(verdict: Verdict) -> String {
    match verdict {
        Verdict::ConditionalPass => "⚠️  CONDITIONAL".to_string(),
        Verdict::Borderline | Verdict::Moderate => format!("⚠️  {verdict}"),
        v => format!("{} {v}", v.symbol()),
    }
}

/// Comparison table and summary statistics, in database order.
pub struct DermatologyComparison<'a> {
    pub analyses: &'a [DermatologyAnalysis],
}

impl fmt::Display for DermatologyComparison<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f, "DERMATOLOGICAL BCS COMPARISON TABLE")?;
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<30} {:<12} {:<20} {:<15}",
            "Compound", "BCS Score", "Verdict", "Type"
        )?;
        writeln!(f, "{}", text::rule('-', 80))?;
        for a in self.analyses {
            writeln!(
                f,
                "{:<30} {:<12.3} {:<20} {:<15}",
                a.compound.name,
                a.bcs.final_score(),
                table_verdict(a.bcs.verdict),
                a.derma_type.short()
            )?;
        }

        let s = DermatologySummary::from_analyses(self.analyses);
        writeln!(f)?;
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f, "SUMMARY STATISTICS")?;
        writeln!(f, "{}", text::rule('=', 80))?;
        writeln!(f)?;
        writeln!(f, "✅ PASS: {} compounds (unequivocal biocompatibility)", s.pass)?;
        writeln!(
            f,
            "⚠️  CONDITIONAL/BORDERLINE: {} compounds (context-dependent)",
            s.conditional
        )?;
        writeln!(f, "❌ FAIL: {} compounds (non-biocompatible)", s.fail)?;
        writeln!(f)?;
        writeln!(f, "📊 Average BCS Score: {:.3}", s.average_score)?;
        writeln!(f)?;
        writeln!(f, "🔬 Type 1 Active Promoters: {}", s.type1)?;
        writeln!(f, "🔬 Type 2 Passive Preservers: {}", s.type2)?;
        writeln!(
            f,
            "🔬 Disruptive/Conditional: {}",
            self.analyses.len() - s.type1 - s.type2
        )?;

        writeln!(f)?;
        writeln!(f, "{}", text::rule('=', REPORT_WIDTH))?;
        writeln!(f, "STRATEGIC FORMULATION RECOMMENDATIONS")?;
        writeln!(f, "{}", text::rule('=', REPORT_WIDTH))?;
        writeln!(f, "{FORMULATION_PRINCIPLES}")
    }
}

/// Writes `bcs_dermatology_<slug>.json`.
pub fn export_json(dir: &Path, analysis: &DermatologyAnalysis) -> Result<PathBuf, ExportError> {
    report::export_json(dir, EXPORT_PREFIX, &analysis.bcs, &analysis.compound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::database::bundled_dermatology;
    use tempfile::tempdir;

    #[test]
    fn name_keywords_win_over_verdict() {
        assert_eq!(
            classify_type("Urea (Carbamide)", Verdict::Fail),
            DermatologyType::ActivePromoter
        );
        assert_eq!(
            classify_type("Petrolatum", Verdict::ConditionalPass),
            DermatologyType::PassivePreserver
        );
        assert_eq!(
            classify_type("Sodium Lauryl Sulfate", Verdict::Fail),
            DermatologyType::Disruptive
        );
        assert_eq!(
            classify_type("Retinol", Verdict::ConditionalPass),
            DermatologyType::Conditional
        );
        assert_eq!(DermatologyType::ActivePromoter.short(), "TYPE 1");
    }

    #[test]
    fn sls_gets_failure_notes_only() {
        let notes = special_notes("Sodium Lauryl Sulfate (SLS)");
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].heading, "🚨 CRITICAL FAILURE NOTES:");
        assert!(special_notes("Glycerin").is_empty());
    }

    #[test]
    fn bundled_database_is_fully_assessed() {
        let db = bundled_dermatology().unwrap();
        let analyses = analyze_database(&db);
        assert_eq!(analyses.len(), 8);
        assert!(analyses.iter().all(|a| a.barrier.tewl_impact != "Unknown"));

        let summary = DermatologySummary::from_analyses(&analyses);
        assert_eq!(summary.pass + summary.conditional + summary.fail, 8);
        assert_eq!(summary.type1, 4);
        assert_eq!(summary.type2, 1);
        assert!((0.0..=1.0).contains(&summary.average_score));
    }

    #[test]
    fn unknown_ingredient_is_not_assessed() {
        let db = bundled_dermatology().unwrap();
        let impact = db.barrier_impact("Squalane");
        assert_eq!(impact.tewl_impact, "Unknown");
    }

    #[test]
    fn comparison_renders_every_compound() {
        let db = bundled_dermatology().unwrap();
        let analyses = analyze_database(&db);
        let rendered = DermatologyComparison { analyses: &analyses }.to_string();
        for a in &analyses {
            assert!(rendered.contains(&a.compound.name));
        }
        assert!(rendered.contains("SUMMARY STATISTICS"));
    }

    #[test]
    fn export_uses_dermatology_prefix() {
        let dir = tempdir().unwrap();
        let db = bundled_dermatology().unwrap();
        let analyses = analyze_database(&db);
        let path = export_json(dir.path(), &analyses[2]).unwrap();
        assert_eq!(path.file_name().unwrap(), "bcs_dermatology_glycerin_glycerol.json");
    }
}
