use anyhow::Context;
use regex::Regex;
use serde::{Deserialize, de::DeserializeOwned};

const DEFAULT_SEASON_FEED_URLS: [&str; 6] = [
    "https://stats.fn.sportradar.com/betano/pt/Europe:London/gismo/stats_season_fixtures2/106501",
    "https://stats.fn.sportradar.com/betano/pt/Europe:London/gismo/stats_season_fixtures2/106509",
    "https://stats.fn.sportradar.com/betano/pt/Europe:London/gismo/stats_season_fixtures2/105353",
    "https://stats.fn.sportradar.com/betano/pt/Europe:London/gismo/stats_season_fixtures2/106499",
    "https://stats.fn.sportradar.com/betano/pt/Europe:London/gismo/stats_season_fixtures2/105937",
    "https://stats.fn.sportradar.com/betano/pt/Europe:London/gismo/stats_season_fixtures2/107373",
];
const DEFAULT_STANDINGS_URL_TEMPLATE: &str =
    "https://stats.fn.sportradar.com/betano/pt/Europe:London/gismo/stats_season_tables/{season_id}";
const DEFAULT_HEAD_TO_HEAD_URL_TEMPLATE: &str =
    "https://s5.sir.sportradar.com/betano/pt/1/season/{season_id}/headtohead/match/{match_id}";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// The env vars that configure scraping and serving. All of them are optional.
#[derive(Debug, Deserialize)]
pub struct ScrapingEnv {
    #[serde(default = "default_season_feed_urls")]
    pub season_feed_urls: Vec<String>,
    #[serde(default = "default_standings_url_template")]
    pub standings_url_template: String,
    #[serde(default = "default_head_to_head_url_template")]
    pub head_to_head_url_template: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

fn default_season_feed_urls() -> Vec<String> {
    DEFAULT_SEASON_FEED_URLS.iter().map(|url| url.to_string()).collect()
}

fn default_standings_url_template() -> String {
    DEFAULT_STANDINGS_URL_TEMPLATE.to_string()
}

fn default_head_to_head_url_template() -> String {
    DEFAULT_HEAD_TO_HEAD_URL_TEMPLATE.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

impl Default for ScrapingEnv {
    fn default() -> Self {
        Self {
            season_feed_urls: default_season_feed_urls(),
            standings_url_template: default_standings_url_template(),
            head_to_head_url_template: default_head_to_head_url_template(),
            user_agent: default_user_agent(),
            bind_address: default_bind_address(),
        }
    }
}

/// One configured season: its fixture feed and the id embedded in that URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Season {
    pub id: String,
    pub feed_url: String,
}

#[derive(Debug, Clone)]
pub struct ScrapingConfig {
    pub seasons: Vec<Season>,
    pub user_agent: String,
    pub bind_address: String,
    standings_url_template: String,
    head_to_head_url_template: String,
}

impl ScrapingConfig {
    pub fn new() -> anyhow::Result<Self> {
        let scraping_env = ScrapingEnv::load_from_env()?;
        Self::from_scraping_env(scraping_env)
    }

    pub fn from_scraping_env(scraping_env: ScrapingEnv) -> anyhow::Result<Self> {
        let extractor = SeasonUrlIdExtractor::new()?;
        let seasons = scraping_env
            .season_feed_urls
            .iter()
            .map(|url| url.trim())
            .filter(|url| !url.is_empty())
            .map(|url| {
                Ok(Season {
                    id: extractor.extract_season_id(url)?,
                    feed_url: url.to_string(),
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self {
            seasons,
            user_agent: scraping_env.user_agent,
            bind_address: scraping_env.bind_address,
            standings_url_template: scraping_env.standings_url_template,
            head_to_head_url_template: scraping_env.head_to_head_url_template,
        })
    }

    pub fn get_standings_url(&self, season_id: &str) -> String {
        self.standings_url_template.replace("{season_id}", season_id)
    }

    pub fn get_head_to_head_url(&self, season_id: &str, match_id: u64) -> String {
        self.head_to_head_url_template
            .replace("{season_id}", season_id)
            .replace("{match_id}", &match_id.to_string())
    }
}

pub struct SeasonUrlIdExtractor {
    // Matches the numeric season id that ends a fixture feed url.
    season_id_regex: Regex,
}

impl SeasonUrlIdExtractor {
    pub fn new() -> anyhow::Result<Self> {
        let season_id_regex = Regex::new(r"/(\d+)/?$")?;
        Ok(Self { season_id_regex })
    }

    pub fn extract_season_id(&self, feed_url: &str) -> anyhow::Result<String> {
        let Some(caps) = self.season_id_regex.captures(feed_url) else {
            return Err(anyhow::anyhow!(
                "couldn't find season id in provided url: {}",
                feed_url
            ));
        };
        let Some(match_) = caps.get(1) else {
            return Err(anyhow::anyhow!(
                "couldn't find season id in provided url: {}",
                feed_url
            ));
        };
        Ok(match_.as_str().to_string())
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config =
            envy::from_env::<Self>().context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
