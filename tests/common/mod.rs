#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use team_games::ScrapingContext;
use team_games::config::{ScrapingConfig, ScrapingEnv};
use team_games::requests::{Upstream, UpstreamResponse};

pub fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

pub fn feed_url(season_id: &str) -> String {
    format!("http://upstream.test/fixtures/{season_id}")
}

pub fn tables_url(season_id: &str) -> String {
    format!("http://upstream.test/tables/{season_id}")
}

pub fn head_to_head_url(season_id: &str, match_id: u64) -> String {
    format!("http://h2h.test/season/{season_id}/match/{match_id}")
}

/// Serves canned bodies by url and records every request made.
#[derive(Default)]
pub struct StubUpstream {
    responses: HashMap<String, (u16, String)>,
    unreachable: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl StubUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: String, status: u16, body: String) -> Self {
        self.responses.insert(url, (status, body));
        self
    }

    /// Fails the request itself, as a dropped connection would.
    pub fn with_unreachable(mut self, url: String) -> Self {
        self.unreachable.insert(url);
        self
    }

    /// Fixture and standings feeds for a season, both served with 200.
    pub fn with_season(self, season_id: &str) -> Self {
        self.with(
            feed_url(season_id),
            200,
            read_fixture(&format!("fixtures_{season_id}.json")),
        )
        .with(
            tables_url(season_id),
            200,
            read_fixture(&format!("tables_{season_id}.json")),
        )
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, url: &str) -> usize {
        self.calls().iter().filter(|called| *called == url).count()
    }
}

#[async_trait]
impl Upstream for StubUpstream {
    async fn fetch(&self, url: &str) -> anyhow::Result<UpstreamResponse> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.unreachable.contains(url) {
            return Err(anyhow::anyhow!("connection reset while requesting {url}"));
        }
        let (status, body) = self
            .responses
            .get(url)
            .cloned()
            .unwrap_or((404, "not found".to_string()));
        Ok(UpstreamResponse {
            url: url.to_string(),
            status,
            body,
        })
    }
}

pub fn context_for(season_ids: &[&str], upstream: Arc<StubUpstream>) -> ScrapingContext {
    let scraping_env = ScrapingEnv {
        season_feed_urls: season_ids.iter().map(|id| feed_url(id)).collect(),
        standings_url_template: "http://upstream.test/tables/{season_id}".to_string(),
        head_to_head_url_template: "http://h2h.test/season/{season_id}/match/{match_id}"
            .to_string(),
        ..ScrapingEnv::default()
    };
    let config = ScrapingConfig::from_scraping_env(scraping_env).expect("config should build");
    ScrapingContext::with_upstream(config, upstream).expect("context should build")
}
