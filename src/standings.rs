use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::season_feed::{FeedEnvelope, RawTeam};

#[derive(Debug, Deserialize)]
pub struct StandingsData {
    pub tables: Vec<StandingsTable>,
}

#[derive(Debug, Deserialize)]
pub struct StandingsTable {
    pub tablerows: Vec<RawStandingRow>,
}

#[derive(Debug, Deserialize)]
pub struct RawStandingRow {
    pub pos: u32,
    pub team: RawTeam,
    pub total: u32,
    #[serde(rename = "pointsTotal")]
    pub points_total: u32,
    #[serde(rename = "drawTotal")]
    pub draw_total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingRow {
    #[serde(rename = "Posição")]
    pub position: u32,
    #[serde(rename = "Nome")]
    pub team_name: String,
    #[serde(rename = "Jogos")]
    pub games_played: u32,
    #[serde(rename = "Pontos")]
    pub points: u32,
    #[serde(rename = "Empates")]
    pub draws: u32,
}

impl From<RawStandingRow> for StandingRow {
    fn from(row: RawStandingRow) -> Self {
        StandingRow {
            position: row.pos,
            team_name: row.team.mediumname,
            games_played: row.total,
            points: row.points_total,
            draws: row.draw_total,
        }
    }
}

/// Rows of the first table of a standings feed, in upstream order.
pub fn extract_standings(raw: &str) -> anyhow::Result<Vec<StandingRow>> {
    let envelope: FeedEnvelope<StandingsData> =
        serde_json::from_str(raw).context("invalid standings feed json")?;
    let table = envelope
        .into_first_data()?
        .tables
        .into_iter()
        .next()
        .context("standings feed has no tables")?;
    Ok(table.tablerows.into_iter().map(StandingRow::from).collect())
}
