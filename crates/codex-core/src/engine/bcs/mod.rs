//! # Biocompatibility Screening
//!
//! Scores how well a compound integrates with structured water and living systems,
//! from its functional groups, bulk properties, and regulatory record.
//!
//! ## Pipeline
//!
//! 1. [`scoring`] turns group counts into a normalized score and applies the
//!    solubility, molecular-weight, charge-density, and polymer modifiers in order.
//! 2. [`red_flags`] lists structural alarms and mechanistic concerns.
//! 3. [`pillars`] runs the regulatory, aqueous, and systemic assessments.
//! 4. [`analyzer`] combines all three into a [`analyzer::BcsAnalysis`] with a final verdict.
//! 5. [`report`] renders text reports, comparison tables, JSON exports, and chart data.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod analyzer;
pub mod pillars;
pub mod red_flags;
pub mod report;
pub mod scoring;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "EXCELLENT")]
    Excellent,
    #[serde(rename = "GOOD")]
    Good,
    #[serde(rename = "BORDERLINE")]
    Borderline,
    #[serde(rename = "MODERATE")]
    Moderate,
    #[serde(rename = "POOR")]
    Poor,
    #[serde(rename = "VERY POOR")]
    VeryPoor,
    #[serde(rename = "FAIL")]
    Fail,
    #[serde(rename = "CONDITIONAL PASS")]
    ConditionalPass,
    #[serde(rename = "PASS")]
    Pass,
}

impl Verdict {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Borderline => "BORDERLINE",
            Self::Moderate => "MODERATE",
            Self::Poor => "POOR",
            Self::VeryPoor => "VERY POOR",
            Self::Fail => "FAIL",
            Self::ConditionalPass => "CONDITIONAL PASS",
            Self::Pass => "PASS",
        }
    }

    /// PASS, EXCELLENT and GOOD.
    pub const fn is_biocompatible(self) -> bool {
        matches!(self, Self::Pass | Self::Excellent | Self::Good)
    }

    /// CONDITIONAL PASS, BORDERLINE and MODERATE.
    pub const fn is_conditional(self) -> bool {
        matches!(self, Self::ConditionalPass | Self::Borderline | Self::Moderate)
    }

    pub const fn symbol(self) -> &'static str {
        if self.is_biocompatible() {
            "✅"
        } else if matches!(self, Self::ConditionalPass) {
            "⚠️"
        } else {
            "❌"
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SafetyClass {
    HighlyBiocompatible,
    GenerallySafe,
    SafeLowDose,
    Concerning,
    Problematic,
    HighlyDisruptive,
}

impl SafetyClass {
    pub const fn description(self) -> &'static str {
        match self {
            Self::HighlyBiocompatible => "Highly biocompatible, likely beneficial",
            Self::GenerallySafe => "Generally safe, compatible with biology",
            Self::SafeLowDose => "Safe at low doses, monitor chronic exposure",
            Self::Concerning => "Concerning, limit exposure",
            Self::Problematic => "Problematic, avoid chronic exposure",
            Self::HighlyDisruptive => "Highly disruptive, ban candidate",
        }
    }
}

impl fmt::Display for SafetyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_groups_partition_the_automatic_bands() {
        for v in [
            Verdict::Excellent,
            Verdict::Good,
            Verdict::Borderline,
            Verdict::Moderate,
            Verdict::Poor,
            Verdict::VeryPoor,
            Verdict::Fail,
            Verdict::ConditionalPass,
            Verdict::Pass,
        ] {
            assert!(!(v.is_biocompatible() && v.is_conditional()), "{v}");
        }
        assert!(!Verdict::Poor.is_biocompatible() && !Verdict::Poor.is_conditional());
    }

    #[test]
    fn verdict_serializes_with_display_text() {
        let json = serde_json::to_string(&Verdict::VeryPoor).unwrap();
        assert_eq!(json, "\"VERY POOR\"");
        assert_eq!(Verdict::ConditionalPass.to_string(), "CONDITIONAL PASS");
    }
}
