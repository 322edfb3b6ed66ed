use std::sync::Arc;

use crate::{
    config::ScrapingConfig,
    probability_scraper::ProbabilityScraper,
    requests::{RequestClient, Upstream},
};

pub struct ScrapingContext {
    pub scraping_config: ScrapingConfig,
    pub probability_scraper: ProbabilityScraper,
    pub request_client: Arc<dyn Upstream>,
}

impl ScrapingContext {
    pub fn new(scraping_config: ScrapingConfig) -> anyhow::Result<Self> {
        let request_client = Arc::new(RequestClient::new(&scraping_config.user_agent)?);
        Self::with_upstream(scraping_config, request_client)
    }

    pub fn with_upstream(
        scraping_config: ScrapingConfig,
        request_client: Arc<dyn Upstream>,
    ) -> anyhow::Result<Self> {
        let probability_scraper = ProbabilityScraper::new()?;
        Ok(ScrapingContext {
            scraping_config,
            probability_scraper,
            request_client,
        })
    }
}
