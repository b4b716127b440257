//! Scoring engine: nine lenses over a `CompanyProfile`, averaged into one
//! overall score and a verdict.
//!
//! Everything here is a pure function of the profile. Non-finite arithmetic
//! becomes `None` at the lens that produced it and never escapes as an error.

pub mod strategies;

use crate::models::{CompanyProfile, Evaluation, StrategyScores, Verdict};

// ── Primitive ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// At or above the threshold is best.
    Higher,
    /// At or below the threshold is best.
    Lower,
}

/// `Higher`: `min(value / threshold, 1)`. `Lower`: `min(threshold / value, 1)`.
///
/// No floor is applied, so a negative value can give a negative score.
/// `Lower` with a zero value divides to `+inf` and caps at 1.
pub fn score_metric(value: Option<f64>, threshold: f64, direction: Direction) -> Option<f64> {
    let value = value.filter(|v| v.is_finite())?;
    Some(match direction {
        Direction::Higher => (value / threshold).min(1.0),
        Direction::Lower => (threshold / value).min(1.0),
    })
}

/// Unweighted mean over every component; a `None` component adds `0` to the sum.
pub(crate) fn mean(components: &[Option<f64>]) -> Option<f64> {
    if components.is_empty() {
        return None;
    }
    let sum: f64 = components.iter().map(|c| c.unwrap_or(0.0)).sum();
    Some(sum / components.len() as f64)
}

// ── Aggregation ───────────────────────────────────────────────────────────────

pub fn score_strategies(profile: &CompanyProfile) -> StrategyScores {
    StrategyScores {
        financial_health: strategies::financial_health(profile),
        profitability: strategies::profitability(profile),
        valuation: strategies::valuation(profile),
        growth: strategies::growth(profile),
        algorithmic: strategies::algorithmic(profile),
        value_investing: strategies::value_investing(profile),
        growth_investing: strategies::growth_investing(profile),
        dividend_investing: strategies::dividend_investing(profile),
        momentum_investing: strategies::momentum_investing(profile),
    }
}

/// Mean of the lenses that produced a score; `None` when none did.
pub fn overall_score(scores: &StrategyScores) -> Option<f64> {
    let valid: Vec<f64> = scores.as_array().into_iter().flatten().collect();
    if valid.is_empty() {
        return None;
    }
    Some(valid.iter().sum::<f64>() / valid.len() as f64)
}

pub fn verdict(score: Option<f64>) -> Verdict {
    match score {
        None => Verdict::InsufficientData,
        Some(s) if s >= 0.8 => Verdict::Excellent,
        Some(s) if s >= 0.6 => Verdict::Good,
        Some(s) if s >= 0.4 => Verdict::Average,
        Some(s) if s >= 0.2 => Verdict::BelowAverage,
        Some(_) => Verdict::Poor,
    }
}

pub fn evaluate(profile: &CompanyProfile) -> Evaluation {
    let scores = score_strategies(profile);
    let overall = overall_score(&scores);
    Evaluation {
        scores,
        overall_score: overall,
        evaluation: verdict(overall),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
