//! Generic two-dimensional table extraction.
//!
//! The same walk serves the balance sheet, the ratio history and the
//! quarterly results. Nothing here knows which of the three it is reading.

use crate::models::{FinancialTable, PeriodSeries};
use scraper::ElementRef;

use super::metric::parse_value;
use super::parsers::{cell_text, selector, ExtractError};

/// Label the source puts in the header row's first cell.
pub const HEADER_LABEL: &str = "Particulars";

// ── Raw table ─────────────────────────────────────────────────────────────────

/// Cell text of one table, before any parsing.
///
/// `header[0]` is the label column; `header[1..]` are period labels.
/// Each row's first cell is its line-item label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Header = every `th` of the table in document order.
    /// Rows = every `tr`, with its `td`/`th` cells.
    pub fn from_element(table: ElementRef<'_>) -> Result<Self, ExtractError> {
        let th_sel = selector("th")?;
        let tr_sel = selector("tr")?;
        let cell_sel = selector("td, th")?;

        let header = table.select(&th_sel).map(cell_text).collect();
        let rows = table
            .select(&tr_sel)
            .map(|tr| tr.select(&cell_sel).map(cell_text).collect::<Vec<_>>())
            .filter(|cells| !cells.is_empty())
            .collect();

        Ok(Self { header, rows })
    }
}

// ── Column alignment ──────────────────────────────────────────────────────────

/// Positional value-column → period-label lookup, built once per table.
///
/// Value cell `i` (0-based, label excluded) belongs to header cell `i + 1`.
/// Columns past the end of the header resolve to `""`; a short header
/// therefore misaligns silently rather than failing.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodColumns {
    labels: Vec<String>,
}

impl PeriodColumns {
    pub fn from_header(header: &[String]) -> Self {
        Self {
            labels: header.iter().skip(1).cloned().collect(),
        }
    }

    pub fn label_for(&self, value_index: usize) -> &str {
        self.labels
            .get(value_index)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

// ── Extraction ────────────────────────────────────────────────────────────────

/// line item → period → parsed value.
///
/// Rows with an empty label or the `Particulars` header label are skipped.
/// Empty cells write no period key.
pub fn extract_table(table: &RawTable) -> FinancialTable {
    let columns = PeriodColumns::from_header(&table.header);
    let mut out = FinancialTable::new();

    for row in &table.rows {
        let Some((label, values)) = row.split_first() else { continue };
        let label = label.trim();
        if label.is_empty() || label == HEADER_LABEL {
            continue;
        }

        let mut series = PeriodSeries::new();
        for (i, cell) in values.iter().enumerate() {
            if let Some(value) = parse_value(cell) {
                series.insert(columns.label_for(i).to_string(), value);
            }
        }
        out.insert(label.to_string(), series);
    }

    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
