//! Company-page extraction and multi-strategy scoring for screener.in tickers.
//!
//! [`pipeline::analyze_page`] is the pure core: HTML in, scored report out.
//! [`pipeline::Pipeline`] adds fetching and concurrent batches on top.

pub mod config;
pub mod models;
pub mod pipeline;
pub mod scoring;
pub mod scraper;
pub mod utils;

pub use models::{CompanyProfile, CompanyReport, Evaluation, MetricValue, Verdict};
pub use pipeline::{analyze_page, Pipeline};
pub use scraper::parsers::ExtractError;
