//! Assembles one `CompanyProfile` from a fetched company page.

use crate::models::{CompanyProfile, FinancialTable, GrowthMetrics, MetricValue, RatioKey, TopLineRatios};
use scraper::Html;
use tracing::{debug, warn};

use super::metric::{parse_number, parse_pair, parse_value};
use super::parsers::{
    find_labelled_cell, find_section_table, parse_company_name, parse_key_ratios, ExtractError,
    RawRatio, Section,
};
use super::table::{extract_table, RawTable};

/// Label of the combined 52-week cell in the key-ratio list.
pub const HIGH_LOW_LABEL: &str = "High / Low";

const SALES_GROWTH_LABEL: &str = "Sales growth (3Yrs)";
const PROFIT_GROWTH_LABEL: &str = "Profit growth (3Yrs)";
const PAYOUT_RATIO_LABEL: &str = "Dividend Payout Ratio";

/// Parse a whole company page.
///
/// Fails with [`ExtractError::NoData`] when neither a key ratio nor a table
/// row could be read.
pub fn build_profile(html: &str) -> Result<CompanyProfile, ExtractError> {
    let doc = Html::parse_document(html);
    build_profile_from_document(&doc)
}

pub fn build_profile_from_document(doc: &Html) -> Result<CompanyProfile, ExtractError> {
    let profile = CompanyProfile {
        name: parse_company_name(doc)?,
        top_line: top_line_ratios(&parse_key_ratios(doc)?),
        growth: growth_metrics(doc)?,
        balance_sheet: section_table(doc, Section::BalanceSheet)?,
        ratios: section_table(doc, Section::Ratios)?,
        quarterly_results: section_table(doc, Section::Quarters)?,
    };

    if profile.extracted_field_count() == 0 {
        return Err(ExtractError::NoData);
    }

    debug!(
        "{}: {} ratios, {} balance-sheet rows, {} ratio rows, {} quarterly rows",
        profile.name,
        profile.top_line.len(),
        profile.balance_sheet.len(),
        profile.ratios.len(),
        profile.quarterly_results.len(),
    );
    Ok(profile)
}

/// Key-ratio list → typed ratios. `High / Low` splits into the two 52-week
/// bounds; a bound that is not a number is left out.
pub fn top_line_ratios(raw: &[RawRatio]) -> TopLineRatios {
    let mut ratios = TopLineRatios::new();

    for RawRatio { name, value } in raw {
        if name == HIGH_LOW_LABEL {
            let Some((high, low)) = parse_pair(value) else { continue };
            if let Some(high) = high {
                ratios.insert(RatioKey::WeekHigh52, MetricValue::Parsed(high));
            }
            if let Some(low) = low {
                ratios.insert(RatioKey::WeekLow52, MetricValue::Parsed(low));
            }
            if high.is_none() || low.is_none() {
                debug!("Incomplete 52-week range: {:?}", value);
            }
        } else if let Some(parsed) = parse_value(value) {
            ratios.insert(RatioKey::from(name.as_str()), parsed);
        }
    }

    ratios
}

fn growth_metrics(doc: &Html) -> Result<GrowthMetrics, ExtractError> {
    Ok(GrowthMetrics {
        sales_growth_3y: labelled_or_zero(doc, SALES_GROWTH_LABEL)?,
        profit_growth_3y: labelled_or_zero(doc, PROFIT_GROWTH_LABEL)?,
        dividend_payout_ratio: labelled_or_zero(doc, PAYOUT_RATIO_LABEL)?,
    })
}

fn labelled_or_zero(doc: &Html, label: &str) -> Result<f64, ExtractError> {
    let value = find_labelled_cell(doc, label)?.as_deref().and_then(parse_number);
    if value.is_none() {
        debug!("{:?} not found, defaulting to 0", label);
    }
    Ok(value.unwrap_or(0.0))
}

fn section_table(doc: &Html, section: Section) -> Result<FinancialTable, ExtractError> {
    match find_section_table(doc, section)? {
        Some(table) => Ok(extract_table(&RawTable::from_element(table)?)),
        None => {
            warn!("No {:?} table on page", section);
            Ok(FinancialTable::new())
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::fixtures::COMPANY_PAGE;
    use crate::scraper::metric::CRORE;

    #[test]
    fn test_build_profile_from_page() {
        let profile = build_profile(COMPANY_PAGE).unwrap();

        assert_eq!(profile.name, "Acme Industries Ltd");
        let top = &profile.top_line;
        assert_eq!(top.required_or_null(&RatioKey::MarketCap), Some(1234.0 * CRORE));
        assert_eq!(top.required_or_null(&RatioKey::CurrentPrice), Some(250.0));
        assert_eq!(top.required_or_null(&RatioKey::WeekHigh52), Some(320.0));
        assert_eq!(top.required_or_null(&RatioKey::WeekLow52), Some(200.0));
        assert_eq!(top.required_or_null(&RatioKey::DividendYield), Some(2.5));
        assert!(top.get(&RatioKey::from(HIGH_LOW_LABEL)).is_none());

        assert_eq!(profile.growth.sales_growth_3y, 12.0);
        assert_eq!(profile.growth.profit_growth_3y, 17.0);
        assert_eq!(profile.growth.dividend_payout_ratio, 0.0);

        assert_eq!(profile.quarterly_results.len(), 2);
        assert_eq!(
            profile.quarterly_results.get("Sales").unwrap().get("Sep 2024"),
            Some(&MetricValue::Parsed(1110.0))
        );
        assert!(!profile.balance_sheet.contains_key("Particulars"));
        assert_eq!(
            profile.balance_sheet.get("Borrowings").unwrap().get("Mar 2024"),
            Some(&MetricValue::Parsed(350.0))
        );
        assert!(profile.ratios.is_empty());
    }

    #[test]
    fn test_page_without_signal_fails() {
        let err = build_profile("<html><body><h1>Nothing Here</h1></body></html>").unwrap_err();
        assert!(matches!(err, ExtractError::NoData));
    }

    #[test]
    fn test_high_low_with_missing_bound() {
        let raw = vec![RawRatio { name: HIGH_LOW_LABEL.into(), value: "₹ 320 / --".into() }];
        let ratios = top_line_ratios(&raw);
        assert_eq!(ratios.required_or_null(&RatioKey::WeekHigh52), Some(320.0));
        assert_eq!(ratios.required_or_null(&RatioKey::WeekLow52), None);
    }

    #[test]
    fn test_free_form_ratio_label_kept() {
        let raw = vec![RawRatio { name: "Promoter holding".into(), value: "55.1 %".into() }];
        let ratios = top_line_ratios(&raw);
        assert_eq!(
            ratios.get(&RatioKey::Other("Promoter holding".into())),
            Some(&MetricValue::Parsed(55.1))
        );
    }
}
