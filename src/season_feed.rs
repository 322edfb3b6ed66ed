//! Fixture feed of one season: wire types, the membership filter and the
//! projection of fixtures into normalised matches.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::text_manipulators::{UNPLAYED_RESULT, normalize_date, render_result};

/// `{"doc": [{"data": ...}]}` wrapper shared by the provider's feeds.
#[derive(Debug, Deserialize)]
pub struct FeedEnvelope<T> {
    pub doc: Vec<FeedDoc<T>>,
}

#[derive(Debug, Deserialize)]
pub struct FeedDoc<T> {
    pub data: T,
}

impl<T> FeedEnvelope<T> {
    pub fn into_first_data(self) -> anyhow::Result<T> {
        self.doc
            .into_iter()
            .next()
            .map(|doc| doc.data)
            .context("feed has an empty doc list")
    }
}

#[derive(Debug, Deserialize)]
pub struct FixturesData {
    pub matches: Vec<RawFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFixture {
    #[serde(rename = "_id")]
    pub id: u64,
    pub teams: RawTeams,
    #[serde(default)]
    pub result: Option<RawResult>,
    pub time: RawKickoff,
    pub status: String,
    #[serde(default)]
    pub roundname: Option<RawRound>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTeams {
    pub home: RawTeam,
    pub away: RawTeam,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTeam {
    pub mediumname: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResult {
    #[serde(default)]
    pub home: Option<u32>,
    #[serde(default)]
    pub away: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawKickoff {
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRound {
    #[serde(default)]
    pub name: Option<RoundName>,
}

/// The provider sends round names either as a plain number or as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoundName {
    Number(u64),
    Text(String),
}

impl RawFixture {
    pub fn involves(&self, team_name: &str) -> bool {
        self.teams.home.mediumname == team_name || self.teams.away.mediumname == team_name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    #[serde(rename = "_id")]
    pub id: u64,
    #[serde(rename = "Jornada")]
    pub round: Option<RoundName>,
    #[serde(rename = "Data")]
    pub date: String,
    #[serde(rename = "Hora")]
    pub time: String,
    #[serde(rename = "Equipa_da_casa")]
    pub home_team: String,
    #[serde(rename = "Resultado")]
    pub result: String,
    #[serde(rename = "Equipa_visitante")]
    pub away_team: String,
}

impl Match {
    pub fn is_unplayed(&self) -> bool {
        self.result == UNPLAYED_RESULT
    }
}

impl From<&RawFixture> for Match {
    fn from(fixture: &RawFixture) -> Self {
        let (home_score, away_score) = fixture
            .result
            .as_ref()
            .map_or((None, None), |result| (result.home, result.away));
        Match {
            id: fixture.id,
            round: fixture
                .roundname
                .as_ref()
                .and_then(|round| round.name.clone()),
            date: normalize_date(&fixture.time.date),
            time: fixture.time.time.clone(),
            home_team: fixture.teams.home.mediumname.clone(),
            result: render_result(&fixture.status, home_score, away_score),
            away_team: fixture.teams.away.mediumname.clone(),
        }
    }
}

/// The earliest unplayed match of the queried team, with the season it
/// belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnplayedFixture {
    pub season_id: String,
    pub match_id: u64,
}

pub fn parse_season_feed(raw: &str) -> anyhow::Result<Vec<RawFixture>> {
    let envelope: FeedEnvelope<FixturesData> =
        serde_json::from_str(raw).context("invalid fixture feed json")?;
    Ok(envelope.into_first_data()?.matches)
}

pub fn team_in_season(fixtures: &[RawFixture], team_name: &str) -> bool {
    fixtures.iter().any(|fixture| fixture.involves(team_name))
}

/// Matches of `team_name`, in feed order.
pub fn extract_matches(fixtures: &[RawFixture], team_name: &str) -> Vec<Match> {
    fixtures
        .iter()
        .filter(|fixture| fixture.involves(team_name))
        .map(Match::from)
        .collect()
}

pub fn first_unplayed(matches: &[Match]) -> Option<&Match> {
    matches.iter().find(|m| m.is_unplayed())
}
