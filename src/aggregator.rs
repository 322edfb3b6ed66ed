use anyhow::Context;
use log::{error, info};
use serde::Serialize;

use crate::{
    config::Season,
    probability_scraper::ProbabilityRecord,
    scraping_context::ScrapingContext,
    season_feed::{self, Match, UnplayedFixture},
    standings::{self, StandingRow},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamGamesResponse {
    pub matches: Vec<Match>,
    pub standings: Vec<StandingRow>,
    pub probability: Vec<ProbabilityRecord>,
}

/// What one season contributes to the response.
#[derive(Debug)]
struct SeasonGames {
    matches: Vec<Match>,
    standings: Vec<StandingRow>,
}

async fn fetch_body(context: &ScrapingContext, url: &str) -> anyhow::Result<String> {
    let response = context.request_client.fetch(url).await?;
    let body = response.into_success_body()?;
    Ok(body)
}

/// `Ok(None)` when the team plays no fixture in the season.
async fn collect_season(
    context: &ScrapingContext,
    season: &Season,
    team_name: &str,
) -> anyhow::Result<Option<SeasonGames>> {
    let feed = fetch_body(context, &season.feed_url)
        .await
        .context("failed to fetch fixture feed")?;
    let fixtures = season_feed::parse_season_feed(&feed)?;

    if !season_feed::team_in_season(&fixtures, team_name) {
        info!(
            "Team '{}' is not involved in season with ID: {}",
            team_name, season.id
        );
        return Ok(None);
    }

    let standings_url = context.scraping_config.get_standings_url(&season.id);
    let standings_body = fetch_body(context, &standings_url)
        .await
        .context("failed to fetch standings feed")?;
    let standings = standings::extract_standings(&standings_body)?;

    let matches = season_feed::extract_matches(&fixtures, team_name);
    Ok(Some(SeasonGames { matches, standings }))
}

/// Walks the configured seasons in order and merges the team's matches, the
/// standings of every season it plays in, and the draw probability of its
/// first unplayed match.
pub async fn get_team_games(context: &ScrapingContext, team_name: &str) -> TeamGamesResponse {
    info!("Fetching team games for: {team_name}");
    let mut response = TeamGamesResponse::default();
    let mut first_unplayed: Option<UnplayedFixture> = None;

    for season in &context.scraping_config.seasons {
        info!("Fetching data from URL: {}", season.feed_url);
        let season_games = match collect_season(context, season, team_name).await {
            Ok(Some(season_games)) => season_games,
            Ok(None) => continue,
            Err(e) => {
                error!("Skipping season with ID {}: {e:#}", season.id);
                continue;
            }
        };

        if first_unplayed.is_none() {
            if let Some(unplayed) = season_feed::first_unplayed(&season_games.matches) {
                let fixture = UnplayedFixture {
                    season_id: season.id.clone(),
                    match_id: unplayed.id,
                };
                if let Some(record) = context
                    .probability_scraper
                    .scrape(context.request_client.as_ref(), &context.scraping_config, &fixture)
                    .await
                {
                    response.probability.push(record);
                }
                first_unplayed = Some(fixture);
            }
        }

        response.standings.extend(season_games.standings);
        response.matches.extend(season_games.matches);
    }

    response
}
