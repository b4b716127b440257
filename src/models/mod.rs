use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

// ── Metric value ──────────────────────────────────────────────────────────────

/// A single scraped cell after parsing.
///
/// `Raw` keeps the trimmed source text when no numeric reading applies, so
/// layout oddities stay visible in the output instead of being dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Parsed(f64),
    Raw(String),
}

impl MetricValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Parsed(v) => Some(*v),
            MetricValue::Raw(_) => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Parsed(v) => write!(f, "{}", v),
            MetricValue::Raw(s) => f.write_str(s),
        }
    }
}

/// Result of the full parser precedence: either a `high / low` pair or one value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedCell {
    Single(MetricValue),
    Pair { high: Option<f64>, low: Option<f64> },
}

// ── Ordered label map ─────────────────────────────────────────────────────────

/// Insertion-ordered map keyed by scraped labels.
///
/// Period columns and line items must come out in page order, and re-inserting
/// an existing key replaces the value in place.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledMap<K, V> {
    entries: Vec<(K, V)>,
}

impl<K: PartialEq, V> LabeledMap<K, V> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn insert(&mut self, key: K, value: V) {
        match self.entries.iter().position(|(k, _)| *k == key) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: PartialEq<Q>,
        Q: ?Sized,
    {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: PartialEq<Q>,
        Q: ?Sized,
    {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: PartialEq, V> Default for LabeledMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Serialize, V: Serialize> Serialize for LabeledMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// period label → value, e.g. `"Mar 2024" → 1234.0`
pub type PeriodSeries = LabeledMap<String, MetricValue>;

/// line item → period series, e.g. `"Borrowings" → {...}`
pub type FinancialTable = LabeledMap<String, PeriodSeries>;

// ── Top-line ratios ───────────────────────────────────────────────────────────

/// Labels of the key-ratio list at the top of a company page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RatioKey {
    MarketCap,
    CurrentPrice,
    WeekHigh52,
    WeekLow52,
    StockPe,
    BookValue,
    DividendYield,
    Roce,
    Roe,
    FaceValue,
    DebtToEquity,
    CurrentRatio,
    Other(String),
}

impl RatioKey {
    pub fn label(&self) -> &str {
        match self {
            RatioKey::MarketCap => "Market Cap",
            RatioKey::CurrentPrice => "Current Price",
            RatioKey::WeekHigh52 => "52 Week High",
            RatioKey::WeekLow52 => "52 Week Low",
            RatioKey::StockPe => "Stock P/E",
            RatioKey::BookValue => "Book Value",
            RatioKey::DividendYield => "Dividend Yield",
            RatioKey::Roce => "ROCE",
            RatioKey::Roe => "ROE",
            RatioKey::FaceValue => "Face Value",
            RatioKey::DebtToEquity => "Debt to equity",
            RatioKey::CurrentRatio => "Current ratio",
            RatioKey::Other(label) => label,
        }
    }
}

impl From<&str> for RatioKey {
    fn from(label: &str) -> Self {
        match label {
            "Market Cap" => RatioKey::MarketCap,
            "Current Price" => RatioKey::CurrentPrice,
            "52 Week High" => RatioKey::WeekHigh52,
            "52 Week Low" => RatioKey::WeekLow52,
            "Stock P/E" => RatioKey::StockPe,
            "Book Value" => RatioKey::BookValue,
            "Dividend Yield" => RatioKey::DividendYield,
            "ROCE" => RatioKey::Roce,
            "ROE" => RatioKey::Roe,
            "Face Value" => RatioKey::FaceValue,
            "Debt to equity" => RatioKey::DebtToEquity,
            "Current ratio" => RatioKey::CurrentRatio,
            other => RatioKey::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RatioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for RatioKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TopLineRatios(LabeledMap<RatioKey, MetricValue>);

impl TopLineRatios {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: RatioKey, value: MetricValue) {
        self.0.insert(key, value);
    }

    pub fn get(&self, key: &RatioKey) -> Option<&MetricValue> {
        self.0.get(key)
    }

    /// Numeric reading of `key`; a missing value counts as `0`, raw text stays `None`.
    pub fn required_or_zero(&self, key: &RatioKey) -> Option<f64> {
        match self.get(key) {
            None => Some(0.0),
            Some(value) => value.as_f64(),
        }
    }

    /// Numeric reading of `key`; missing or raw-text values stay `None`.
    pub fn required_or_null(&self, key: &RatioKey) -> Option<f64> {
        self.get(key).and_then(MetricValue::as_f64)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RatioKey, &MetricValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ── Growth metrics ────────────────────────────────────────────────────────────

/// Growth and payout figures. Absent values are stored as `0`, not null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GrowthMetrics {
    #[serde(rename = "Sales growth 3Years")]
    pub sales_growth_3y: f64,
    #[serde(rename = "Profit growth 3Years")]
    pub profit_growth_3y: f64,
    #[serde(rename = "Dividend Payout Ratio")]
    pub dividend_payout_ratio: f64,
}

// ── Company profile ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompanyProfile {
    pub name: String,
    #[serde(flatten)]
    pub top_line: TopLineRatios,
    #[serde(flatten)]
    pub growth: GrowthMetrics,
    #[serde(rename = "balanceSheet")]
    pub balance_sheet: FinancialTable,
    pub ratios: FinancialTable,
    #[serde(rename = "quarterlyResults")]
    pub quarterly_results: FinancialTable,
}

impl CompanyProfile {
    /// Fields that carry scraped signal. The name and the zero-defaulted
    /// growth figures are always present and do not count.
    pub fn extracted_field_count(&self) -> usize {
        self.top_line.len()
            + self.balance_sheet.len()
            + self.ratios.len()
            + self.quarterly_results.len()
    }
}

// ── Scores ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StrategyScores {
    pub financial_health: Option<f64>,
    pub profitability: Option<f64>,
    pub valuation: Option<f64>,
    pub growth: Option<f64>,
    pub algorithmic: Option<f64>,
    pub value_investing: Option<f64>,
    pub growth_investing: Option<f64>,
    pub dividend_investing: Option<f64>,
    pub momentum_investing: Option<f64>,
}

impl StrategyScores {
    pub fn as_array(&self) -> [Option<f64>; 9] {
        [
            self.financial_health,
            self.profitability,
            self.valuation,
            self.growth,
            self.algorithmic,
            self.value_investing,
            self.growth_investing,
            self.dividend_investing,
            self.momentum_investing,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Excellent,
    Good,
    Average,
    #[serde(rename = "Below Average")]
    BelowAverage,
    Poor,
    #[serde(rename = "Insufficient data")]
    InsufficientData,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::Excellent => "Excellent",
            Verdict::Good => "Good",
            Verdict::Average => "Average",
            Verdict::BelowAverage => "Below Average",
            Verdict::Poor => "Poor",
            Verdict::InsufficientData => "Insufficient data",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub scores: StrategyScores,
    pub overall_score: Option<f64>,
    pub evaluation: Verdict,
}

// ── Report ────────────────────────────────────────────────────────────────────

/// What a caller gets back for one ticker: the profile with its evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyReport {
    #[serde(flatten)]
    pub profile: CompanyProfile,
    pub evaluation: Evaluation,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_labeled_map_keeps_order_and_replaces_in_place() {
        let mut series = PeriodSeries::new();
        series.insert("Mar 2023".into(), MetricValue::Parsed(1.0));
        series.insert("Mar 2024".into(), MetricValue::Parsed(2.0));
        series.insert("Mar 2023".into(), MetricValue::Parsed(3.0));

        let keys: Vec<&String> = series.keys().collect();
        assert_eq!(keys, ["Mar 2023", "Mar 2024"]);
        assert_eq!(series.get("Mar 2023"), Some(&MetricValue::Parsed(3.0)));
    }

    #[test]
    fn test_ratio_key_round_trips_known_and_free_labels() {
        assert_eq!(RatioKey::from("Stock P/E"), RatioKey::StockPe);
        assert_eq!(RatioKey::StockPe.label(), "Stock P/E");
        let other = RatioKey::from("Promoter holding");
        assert_eq!(other, RatioKey::Other("Promoter holding".into()));
        assert_eq!(other.label(), "Promoter holding");
    }

    #[test]
    fn test_zero_and_null_accessors_differ_on_missing() {
        let mut ratios = TopLineRatios::new();
        ratios.insert(RatioKey::Roe, MetricValue::Parsed(18.0));
        ratios.insert(RatioKey::FaceValue, MetricValue::Raw("n/a".into()));

        assert_eq!(ratios.required_or_zero(&RatioKey::Roe), Some(18.0));
        assert_eq!(ratios.required_or_zero(&RatioKey::Roce), Some(0.0));
        assert_eq!(ratios.required_or_null(&RatioKey::Roce), None);
        assert_eq!(ratios.required_or_null(&RatioKey::FaceValue), None);
        assert_eq!(ratios.required_or_zero(&RatioKey::FaceValue), None);
    }

    #[test]
    fn test_report_serializes_flattened_shape() {
        let mut profile = CompanyProfile {
            name: "Acme Ltd".into(),
            ..Default::default()
        };
        profile.top_line.insert(RatioKey::Roce, MetricValue::Parsed(21.5));
        let mut series = PeriodSeries::new();
        series.insert("Mar 2024".into(), MetricValue::Raw("--".into()));
        profile.ratios.insert("Debtor Days".into(), series);

        let report = CompanyReport {
            profile,
            evaluation: Evaluation {
                scores: StrategyScores::default(),
                overall_score: None,
                evaluation: Verdict::InsufficientData,
            },
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["name"], json!("Acme Ltd"));
        assert_eq!(value["ROCE"], json!(21.5));
        assert_eq!(value["Sales growth 3Years"], json!(0.0));
        assert_eq!(value["ratios"]["Debtor Days"]["Mar 2024"], json!("--"));
        assert_eq!(value["balanceSheet"], json!({}));
        assert_eq!(value["evaluation"]["scores"]["momentum_investing"], json!(null));
        assert_eq!(value["evaluation"]["overall_score"], json!(null));
        assert_eq!(value["evaluation"]["evaluation"], json!("Insufficient data"));
    }
}
