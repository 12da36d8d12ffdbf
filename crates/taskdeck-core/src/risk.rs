//! Derived risk scoring
//!
//! Risk is a pure function of a task's size estimate: each story point adds
//! ten points of risk, saturating at 100. Missing, NaN, and negative
//! estimates count as zero. The banding thresholds drive badge colors in
//! every surface that renders a score.

use serde::{Deserialize, Serialize};

/// Upper bound of the risk scale
pub const MAX_RISK: u8 = 100;

/// Scores strictly above this are [`RiskBand::High`]
pub const HIGH_RISK_THRESHOLD: u8 = 70;

/// Scores strictly above this (and not high) are [`RiskBand::Medium`]
pub const MEDIUM_RISK_THRESHOLD: u8 = 40;

/// Compute the risk score for a size estimate
///
/// Fractional estimates are floored before scaling so `5.9` points and `5`
/// points score the same. NaN and negative inputs score zero; oversized
/// estimates saturate at the cap.
#[must_use]
pub fn risk_score(story_points: Option<f64>) -> u8 {
    let points = story_points.unwrap_or(0.0);
    if points.is_nan() || points <= 0.0 {
        return 0;
    }
    let scaled = (points.floor() * 10.0).min(f64::from(MAX_RISK));
    // scaled is within [0, 100] here, infinity included via min
    scaled as u8
}

/// Severity band for a risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    /// Score above 70
    High,
    /// Score above 40, at most 70
    Medium,
    /// Everything else
    Low,
}

impl RiskBand {
    /// Classify a score into its band
    #[inline]
    #[must_use]
    pub fn for_score(score: u8) -> Self {
        if score > HIGH_RISK_THRESHOLD {
            RiskBand::High
        } else if score > MEDIUM_RISK_THRESHOLD {
            RiskBand::Medium
        } else {
            RiskBand::Low
        }
    }

    /// Whether this band flags the task for attention
    #[inline]
    #[must_use]
    pub fn is_high(&self) -> bool {
        matches!(self, RiskBand::High)
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RiskBand::High => "high",
            RiskBand::Medium => "medium",
            RiskBand::Low => "low",
        };
        f.write_str(label)
    }
}
