use log::{error, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    config::ScrapingConfig,
    requests::Upstream,
    season_feed::{RawTeams, UnplayedFixture},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbabilityRecord {
    #[serde(rename = "Data")]
    pub date: String,
    #[serde(rename = "Equipa_da_casa")]
    pub home_team: String,
    #[serde(rename = "Equipa_visitante")]
    pub away_team: String,
    #[serde(rename = "Probabilidade")]
    pub draw_probability: i64,
}

#[derive(Debug, Deserialize)]
struct Probabilities {
    draw: f64,
}

/// Pulls the pre-match probabilities out of the script blobs embedded in a
/// head-to-head page.
pub struct ProbabilityScraper {
    probabilities_regex: Regex,
    // Stops at the first `}}`, so it relies on `away` being the last nested object.
    teams_regex: Regex,
    match_data_regex: Regex,
    date_regex: Regex,
}

impl ProbabilityScraper {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            probabilities_regex: Regex::new(r#""probabilities":\s*(\{.*?\})"#)?,
            teams_regex: Regex::new(r#""teams":\s*(\{.*?\}\})"#)?,
            match_data_regex: Regex::new(r#""data":\s*\{"match":\s*(\{.*?\})\}"#)?,
            date_regex: Regex::new(r#""date":\s*"([^"]+)""#)?,
        })
    }

    fn capture<'a>(regex: &Regex, text: &'a str) -> Option<&'a str> {
        regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Builds the record from a page body; `None` when any fragment is
    /// missing or does not decode.
    pub fn parse_page(&self, page: &str) -> Option<ProbabilityRecord> {
        let (Some(probabilities_json), Some(teams_json)) = (
            Self::capture(&self.probabilities_regex, page),
            Self::capture(&self.teams_regex, page),
        ) else {
            warn!("head-to-head page has no probabilities or teams fragment");
            return None;
        };

        let probabilities: Probabilities = match serde_json::from_str(probabilities_json) {
            Ok(probabilities) => probabilities,
            Err(e) => {
                warn!("could not decode probabilities fragment: {e}");
                return None;
            }
        };
        let teams: RawTeams = match serde_json::from_str(teams_json) {
            Ok(teams) => teams,
            Err(e) => {
                warn!("could not decode teams fragment: {e}");
                return None;
            }
        };

        let Some(date) = Self::capture(&self.match_data_regex, page)
            .and_then(|match_data| Self::capture(&self.date_regex, match_data))
        else {
            warn!("head-to-head page has no match date");
            return None;
        };

        Some(ProbabilityRecord {
            date: date.to_string(),
            home_team: teams.home.mediumname,
            away_team: teams.away.mediumname,
            draw_probability: probabilities.draw.round() as i64,
        })
    }

    pub async fn scrape(
        &self,
        upstream: &dyn Upstream,
        config: &ScrapingConfig,
        fixture: &UnplayedFixture,
    ) -> Option<ProbabilityRecord> {
        let url = config.get_head_to_head_url(&fixture.season_id, fixture.match_id);
        info!("Fetching head-to-head page: {url}");
        let page = match upstream.fetch(&url).await {
            Ok(response) => match response.into_success_body() {
                Ok(body) => body,
                Err(e) => {
                    error!("Failed to fetch head-to-head page: {e}");
                    return None;
                }
            },
            Err(e) => {
                error!("Failed to fetch head-to-head page: {e:#}");
                return None;
            }
        };
        let record = self.parse_page(&page);
        if let Some(record) = &record {
            info!(
                "Draw probability for {} vs {}: {}",
                record.home_team, record.away_team, record.draw_probability
            );
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head></head><body><script>
window.__INITIAL_STATE__ = {"event":{"probabilities": {"home":48.7,"draw":26.6,"away":24.7},"teams": {"home":{"_id":3006,"mediumname":"Benfica"},"away":{"_id":3002,"mediumname":"Porto"}},"extra":1}};
window.__MATCH__ = {"data": {"match": {"_id":4242,"time":"20:00","date":"10/05/24"}}};
</script></body></html>"#;

    #[test]
    fn extracts_record_from_embedded_script() {
        let scraper = ProbabilityScraper::new().unwrap();
        let record = scraper.parse_page(PAGE).unwrap();
        assert_eq!(
            record,
            ProbabilityRecord {
                date: "10/05/24".to_string(),
                home_team: "Benfica".to_string(),
                away_team: "Porto".to_string(),
                draw_probability: 27,
            }
        );
    }

    #[test]
    fn rounds_half_away_from_zero() {
        let scraper = ProbabilityScraper::new().unwrap();
        let page = PAGE.replace("26.6", "25.5");
        assert_eq!(scraper.parse_page(&page).unwrap().draw_probability, 26);
        let page = PAGE.replace("26.6", "25.4");
        assert_eq!(scraper.parse_page(&page).unwrap().draw_probability, 25);
    }

    #[test]
    fn missing_fragment_yields_nothing() {
        let scraper = ProbabilityScraper::new().unwrap();
        assert!(scraper.parse_page(&PAGE.replace("probabilities", "odds")).is_none());
        assert!(scraper.parse_page(&PAGE.replace("\"teams\"", "\"sides\"")).is_none());
        assert!(scraper.parse_page(&PAGE.replace("\"date\"", "\"day\"")).is_none());
        assert!(scraper.parse_page("").is_none());
    }

    #[test]
    fn undecodable_fragment_yields_nothing() {
        let scraper = ProbabilityScraper::new().unwrap();
        let page = PAGE.replace("\"draw\":26.6", "\"draw\":\"n/a\"");
        assert!(scraper.parse_page(&page).is_none());
    }
}
