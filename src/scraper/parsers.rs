use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no data could be extracted from the page")]
    NoData,

    #[error("invalid selector {css:?}: {reason}")]
    Selector { css: &'static str, reason: String },
}

pub(crate) fn selector(css: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        css,
        reason: format!("{:?}", e),
    })
}

/// Element text with runs of whitespace (including `&nbsp;`) collapsed.
pub(crate) fn cell_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Company header ────────────────────────────────────────────────────────────

pub fn parse_company_name(doc: &Html) -> Result<String, ExtractError> {
    let h1 = selector("h1")?;
    let name = doc.select(&h1).next().map(cell_text).unwrap_or_default();
    if name.is_empty() {
        debug!("No company name found");
    }
    Ok(name)
}

// ── Key ratios ────────────────────────────────────────────────────────────────

/// One `{name, value}` entry of the top-ratios list, still as display text.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRatio {
    pub name: String,
    pub value: String,
}

pub fn parse_key_ratios(doc: &Html) -> Result<Vec<RawRatio>, ExtractError> {
    let li_sel = selector(".company-ratios #top-ratios li")?;
    let name_sel = selector(".name")?;
    let value_sel = selector(".value")?;

    let mut ratios = Vec::new();
    for (i, li) in doc.select(&li_sel).enumerate() {
        let name = li.select(&name_sel).next().map(cell_text).unwrap_or_default();
        let value = li.select(&value_sel).next().map(cell_text).unwrap_or_default();

        if name.is_empty() || value.is_empty() {
            debug!("Skipping ratio at index {} (name={:?}, value={:?})", i, name, value);
            continue;
        }
        ratios.push(RawRatio { name, value });
    }

    if ratios.is_empty() {
        debug!("No top ratios found");
    }
    Ok(ratios)
}

// ── Labelled cells ────────────────────────────────────────────────────────────

/// Text of the `td` right after the first `td` whose text contains `label`.
pub fn find_labelled_cell(doc: &Html, label: &str) -> Result<Option<String>, ExtractError> {
    let td_sel = selector("td")?;

    let value = doc
        .select(&td_sel)
        .find(|td| cell_text(*td).contains(label))
        .and_then(|td| {
            td.next_siblings()
                .filter_map(ElementRef::wrap)
                .find(|sib| sib.value().name() == "td")
        })
        .map(cell_text);

    Ok(value)
}

// ── Tables ────────────────────────────────────────────────────────────────────

/// Page sections that carry a period table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    BalanceSheet,
    Ratios,
    Quarters,
}

impl Section {
    fn table_css(self) -> &'static str {
        match self {
            Section::BalanceSheet => "#balance-sheet table.data-table",
            Section::Ratios => "#ratios table.data-table",
            Section::Quarters => "#quarters table.data-table",
        }
    }
}

/// First `table.data-table` inside the given section, if the page has one.
pub fn find_section_table(
    doc: &Html,
    section: Section,
) -> Result<Option<ElementRef<'_>>, ExtractError> {
    let sel = selector(section.table_css())?;
    Ok(doc.select(&sel).next())
}
