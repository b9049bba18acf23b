use std::fmt::Write;

use strum_macros::Display;

/// Baseline every per-match score starts from, and the composite fallback
/// when a player has no scorable history.
pub const DEFAULT_SCORE: f64 = 100.0;

/// Why an adjustment was applied, kept for display and audit logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ScoreReason {
    FirstBloodKill,
    FirstBloodAssist,
    PentaKills,
    QuadraKills,
    TripleKills,
    JoinTeamRateRank,
    GoldEarnedRank,
    DamageRank,
    DamagePerGoldRank,
    VisionScoreRank,
    MinionsKilled,
    KillRate,
    DamageRate,
    AssistRate,
    KdaAdjust,
}

/// Running per-match score: a value seeded at the baseline plus the ordered
/// trail of (delta, reason) adjustments. Additive only, never re-based.
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    value: f64,
    reasons: Vec<(f64, ScoreReason)>,
}

impl ScoreBreakdown {
    pub fn new(base: f64) -> Self {
        Self {
            value: base,
            reasons: Vec::new(),
        }
    }

    pub fn add(&mut self, delta: f64, reason: ScoreReason) {
        self.value += delta;
        self.reasons.push((delta, reason));
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn reasons(&self) -> &[(f64, ScoreReason)] {
        &self.reasons
    }

    /// Compact audit line, e.g. `FirstBloodKill:+10.0 KdaAdjust:-1.2`.
    pub fn reasons_display(&self) -> String {
        let mut out = String::new();
        for (delta, reason) in &self.reasons {
            if !out.is_empty() {
                out.push(' ');
            }
            let _ = write!(out, "{reason}:{delta:+.1}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_in_order() {
        let mut breakdown = ScoreBreakdown::new(DEFAULT_SCORE);
        breakdown.add(10.0, ScoreReason::FirstBloodKill);
        breakdown.add(-5.0, ScoreReason::GoldEarnedRank);
        assert_eq!(breakdown.value(), 105.0);
        assert_eq!(
            breakdown.reasons(),
            &[
                (10.0, ScoreReason::FirstBloodKill),
                (-5.0, ScoreReason::GoldEarnedRank)
            ]
        );
    }

    #[test]
    fn reasons_display_shows_signed_deltas() {
        let mut breakdown = ScoreBreakdown::new(DEFAULT_SCORE);
        breakdown.add(10.0, ScoreReason::PentaKills);
        breakdown.add(-2.5, ScoreReason::KdaAdjust);
        assert_eq!(breakdown.reasons_display(), "PentaKills:+10.0 KdaAdjust:-2.5");
    }
}
