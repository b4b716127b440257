pub mod http_client;
pub mod metric;
pub mod parsers;
pub mod profile;
pub mod table;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::config::ScraperConfig;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use tracing::debug;
use url::Url;

use self::http_client::HttpClient;

// ── Source trait ──────────────────────────────────────────────────────────────

/// Swappable source of company pages.
#[async_trait]
pub trait CompanyDataSource: Send + Sync {
    async fn fetch_company_page(&self, ticker: &str) -> Result<String>;
}

// ── screener.in scraper ───────────────────────────────────────────────────────

pub struct ScreenerScraper {
    client: HttpClient,
    base_url: Url,
    consolidated: bool,
}

impl ScreenerScraper {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid base URL {:?}", config.base_url))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("Base URL {:?} cannot take a path", config.base_url));
        }

        Ok(Self {
            client: HttpClient::new(config)?,
            base_url,
            consolidated: config.consolidated,
        })
    }

    /// URL for a company page.  e.g. tcs → /company/TCS/consolidated/
    pub fn company_url(&self, ticker: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&normalise_ticker(ticker));
            if self.consolidated {
                segments.push("consolidated");
            }
            segments.push("");
        }
        url
    }
}

#[async_trait]
impl CompanyDataSource for ScreenerScraper {
    async fn fetch_company_page(&self, ticker: &str) -> Result<String> {
        let url = self.company_url(ticker);
        debug!("Fetching company page: {}", url);

        self.client
            .get_text(url.as_str())
            .await
            .with_context(|| format!("Failed to fetch company page for {}", ticker))
    }
}

pub fn normalise_ticker(s: &str) -> String {
    s.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_url_consolidated_and_standalone() {
        let mut config = ScraperConfig::default();
        let scraper = ScreenerScraper::new(&config).unwrap();
        assert_eq!(
            scraper.company_url(" tcs ").as_str(),
            "https://www.screener.in/company/TCS/consolidated/"
        );

        config.base_url = "https://www.screener.in/company/".into();
        config.consolidated = false;
        let scraper = ScreenerScraper::new(&config).unwrap();
        assert_eq!(
            scraper.company_url("INFY").as_str(),
            "https://www.screener.in/company/INFY/"
        );
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        let config = ScraperConfig {
            base_url: "mailto:someone@example.com".into(),
            ..Default::default()
        };
        assert!(ScreenerScraper::new(&config).is_err());
    }
}
