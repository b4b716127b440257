//! The nine scoring lenses.
//!
//! Each lens averages a few [`score_metric`] readings without weights. A
//! reading that comes back `None` still counts in the divisor and adds `0`.
//!
//! Input defaults follow two rules. Ratios read as `0` when missing and as
//! `None` when the page held text instead of a number (`required_or_zero`);
//! `GrowthMetrics` are already zero-defaulted. The 52-week bounds stay `None`
//! (`required_or_null`), which removes the two lenses built on them.

use crate::models::{CompanyProfile, RatioKey};

use super::{mean, score_metric, Direction::Higher, Direction::Lower};

pub fn financial_health(p: &CompanyProfile) -> Option<f64> {
    let top = &p.top_line;
    mean(&[
        score_metric(top.required_or_zero(&RatioKey::DebtToEquity), 1.0, Lower),
        score_metric(top.required_or_zero(&RatioKey::CurrentRatio), 1.5, Higher),
        score_metric(top.required_or_zero(&RatioKey::Roce), 15.0, Higher),
    ])
}

pub fn profitability(p: &CompanyProfile) -> Option<f64> {
    let top = &p.top_line;
    mean(&[
        score_metric(top.required_or_zero(&RatioKey::Roe), 15.0, Higher),
        score_metric(top.required_or_zero(&RatioKey::Roce), 15.0, Higher),
    ])
}

pub fn valuation(p: &CompanyProfile) -> Option<f64> {
    mean(&[
        score_metric(p.top_line.required_or_zero(&RatioKey::StockPe), 20.0, Lower),
        score_metric(price_to_book(p), 3.0, Lower),
    ])
}

pub fn growth(p: &CompanyProfile) -> Option<f64> {
    mean(&[
        score_metric(Some(p.growth.sales_growth_3y), 10.0, Higher),
        score_metric(Some(p.growth.profit_growth_3y), 15.0, Higher),
    ])
}

/// Raw trend and volatility ratios over the 52-week range, not thresholded.
pub fn algorithmic(p: &CompanyProfile) -> Option<f64> {
    let range = WeekRange::of(p)?;
    let score = (range.trend()? + range.volatility()?) / 2.0;
    score.is_finite().then_some(score)
}

pub fn value_investing(p: &CompanyProfile) -> Option<f64> {
    let top = &p.top_line;
    mean(&[
        score_metric(top.required_or_zero(&RatioKey::StockPe), 15.0, Lower),
        score_metric(price_to_book(p), 1.5, Lower),
        score_metric(top.required_or_zero(&RatioKey::DividendYield), 3.0, Higher),
        score_metric(top.required_or_zero(&RatioKey::Roe), 15.0, Higher),
    ])
}

pub fn growth_investing(p: &CompanyProfile) -> Option<f64> {
    let top = &p.top_line;
    let profit_growth = non_zero_or_one(p.growth.profit_growth_3y);
    let pe_to_growth = top.required_or_zero(&RatioKey::StockPe).map(|pe| pe / profit_growth);
    mean(&[
        score_metric(Some(p.growth.sales_growth_3y), 15.0, Higher),
        score_metric(Some(p.growth.profit_growth_3y), 20.0, Higher),
        score_metric(top.required_or_zero(&RatioKey::Roe), 20.0, Higher),
        score_metric(pe_to_growth, 1.0, Lower),
    ])
}

pub fn dividend_investing(p: &CompanyProfile) -> Option<f64> {
    let top = &p.top_line;
    mean(&[
        score_metric(top.required_or_zero(&RatioKey::DividendYield), 4.0, Higher),
        score_metric(top.required_or_zero(&RatioKey::Roe), 15.0, Higher),
        score_metric(Some(p.growth.dividend_payout_ratio), 60.0, Lower),
        score_metric(top.required_or_zero(&RatioKey::DebtToEquity), 1.0, Lower),
    ])
}

pub fn momentum_investing(p: &CompanyProfile) -> Option<f64> {
    let range = WeekRange::of(p)?;
    mean(&[
        score_metric(range.trend(), 0.8, Higher),
        score_metric(range.volatility(), 0.5, Higher),
    ])
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Current price over book value; a zero or missing book value divides by 1.
/// A missing price has no ratio.
fn price_to_book(p: &CompanyProfile) -> Option<f64> {
    let price = p.top_line.required_or_null(&RatioKey::CurrentPrice)?;
    let book = non_zero_or_one(p.top_line.required_or_zero(&RatioKey::BookValue)?);
    Some(price / book)
}

fn non_zero_or_one(v: f64) -> f64 {
    if v == 0.0 { 1.0 } else { v }
}

struct WeekRange {
    price: Option<f64>,
    high: f64,
    low: f64,
}

impl WeekRange {
    fn of(p: &CompanyProfile) -> Option<Self> {
        let top = &p.top_line;
        Some(Self {
            high: top.required_or_null(&RatioKey::WeekHigh52)?,
            low: top.required_or_null(&RatioKey::WeekLow52)?,
            price: top.required_or_zero(&RatioKey::CurrentPrice),
        })
    }

    /// Position of the price inside the range: 0 at the low, 1 at the high.
    fn trend(&self) -> Option<f64> {
        self.price.map(|price| (price - self.low) / (self.high - self.low))
    }

    fn volatility(&self) -> Option<f64> {
        self.price.map(|price| 1.0 - (self.high - self.low) / price)
    }
}
