//! Pipeline orchestrator: ties source → extraction → scoring together.
//!
//! ## Run modes
//!
//! `analyze()` — one ticker: fetch its page, build the profile, score it.
//!
//! `run()` — a batch of tickers analyzed concurrently, bounded by
//!   `pipeline.concurrency`. A failing ticker is logged and counted; the rest
//!   of the batch still completes.

use crate::config::AppConfig;
use crate::models::CompanyReport;
use crate::scoring::evaluate;
use crate::scraper::parsers::ExtractError;
use crate::scraper::profile::build_profile;
use crate::scraper::{normalise_ticker, CompanyDataSource, ScreenerScraper};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// Extraction + scoring for an already-fetched company page.
pub fn analyze_page(html: &str) -> Result<CompanyReport, ExtractError> {
    let profile = build_profile(html)?;
    let evaluation = evaluate(&profile);
    Ok(CompanyReport { profile, evaluation })
}

pub struct Pipeline {
    source: Arc<dyn CompanyDataSource>,
    concurrency: usize,
}

impl Pipeline {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let scraper = ScreenerScraper::new(&config.scraper).context("Failed to build scraper")?;
        Ok(Self::with_source(Arc::new(scraper), config.pipeline.concurrency))
    }

    pub fn with_source(source: Arc<dyn CompanyDataSource>, concurrency: usize) -> Self {
        Self {
            source,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn analyze(&self, ticker: &str) -> Result<CompanyReport> {
        analyze_with(self.source.as_ref(), ticker).await
    }

    /// Analyze every ticker; reports come back in input order, failures are skipped.
    pub async fn run(&self, tickers: &[String]) -> Result<(Vec<CompanyReport>, PipelineStats)> {
        let sem = Arc::new(Semaphore::new(self.concurrency));
        let mut handles = Vec::new();

        for ticker in tickers {
            let ticker = normalise_ticker(ticker);
            let label = ticker.clone();
            let source = Arc::clone(&self.source);
            let sem = Arc::clone(&sem);

            let handle = tokio::spawn(async move {
                let _permit = sem.acquire().await?;
                analyze_with(source.as_ref(), &ticker).await
            });

            handles.push((label, handle));
        }

        let mut reports = Vec::with_capacity(handles.len());
        let mut errors = 0usize;

        for (ticker, handle) in handles {
            match handle.await {
                Ok(Ok(report)) => reports.push(report),
                Ok(Err(e)) => { warn!("{}: {:#}", ticker, e); errors += 1; }
                Err(e) => { error!("Task panic for {}: {}", ticker, e); errors += 1; }
            }
        }

        let stats = PipelineStats {
            tickers_requested: tickers.len(),
            reports: reports.len(),
            errors,
        };
        info!(
            "=== Done: {} tickers | {} reports | {} errors ===",
            stats.tickers_requested, stats.reports, stats.errors
        );

        Ok((reports, stats))
    }
}

async fn analyze_with(source: &dyn CompanyDataSource, ticker: &str) -> Result<CompanyReport> {
    let html = source.fetch_company_page(ticker).await?;
    let report = analyze_page(&html).with_context(|| format!("Extraction failed for {}", ticker))?;

    info!(
        "{}: {} ({}) overall={:?}",
        ticker,
        report.profile.name,
        report.evaluation.evaluation,
        report.evaluation.overall_score,
    );
    Ok(report)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStats {
    pub tickers_requested: usize,
    pub reports: usize,
    pub errors: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Verdict;
    use crate::scraper::fixtures::{COMPANY_PAGE, PAGE_WITHOUT_RANGE};
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct StaticSource {
        pages: HashMap<&'static str, &'static str>,
    }

    #[async_trait]
    impl CompanyDataSource for StaticSource {
        async fn fetch_company_page(&self, ticker: &str) -> Result<String> {
            self.pages
                .get(ticker)
                .map(|p| p.to_string())
                .ok_or_else(|| anyhow!("no page for {}", ticker))
        }
    }

    fn pipeline() -> Pipeline {
        let pages = HashMap::from([
            ("ACME", COMPANY_PAGE),
            ("FLAT", PAGE_WITHOUT_RANGE),
            ("EMPTY", "<html><body><h1>Shell Co</h1></body></html>"),
        ]);
        Pipeline::with_source(Arc::new(StaticSource { pages }), 2)
    }

    #[test]
    fn test_analyze_page_scores_every_lens() {
        let report = analyze_page(COMPANY_PAGE).unwrap();
        let scores = report.evaluation.scores;

        assert!(scores.as_array().iter().all(Option::is_some));
        // price 250 inside 200..320
        assert_eq!(scores.algorithmic, Some((50.0 / 120.0 + (1.0 - 120.0 / 250.0)) / 2.0));
        assert!(report.evaluation.overall_score.is_some());
        assert_ne!(report.evaluation.evaluation, Verdict::InsufficientData);
    }

    #[test]
    fn test_analyze_without_range_drops_two_lenses() {
        let report = tokio_test::block_on(pipeline().analyze("FLAT")).unwrap();
        let scores = report.evaluation.scores;

        assert_eq!(report.profile.name, "Rangeless Ltd");
        assert_eq!(scores.algorithmic, None);
        assert_eq!(scores.momentum_investing, None);
        assert_eq!(scores.profitability, Some(1.0));
        assert_eq!(scores.as_array().iter().flatten().count(), 7);
    }

    #[test]
    fn test_empty_page_is_an_extraction_failure() {
        let err = tokio_test::block_on(pipeline().analyze("EMPTY")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExtractError>(),
            Some(ExtractError::NoData)
        ));
    }

    #[tokio::test]
    async fn test_batch_keeps_going_past_failures() {
        let tickers: Vec<String> = ["acme", "missing", "EMPTY", "flat"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let (reports, stats) = pipeline().run(&tickers).await.unwrap();

        assert_eq!(stats, PipelineStats { tickers_requested: 4, reports: 2, errors: 2 });
        let names: Vec<&str> = reports.iter().map(|r| r.profile.name.as_str()).collect();
        assert_eq!(names, ["Acme Industries Ltd", "Rangeless Ltd"]);
    }
}
