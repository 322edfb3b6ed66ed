use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    aggregator::{TeamGamesResponse, get_team_games},
    scraping_context::ScrapingContext,
};

#[derive(Debug, Deserialize)]
pub struct TeamGamesQuery {
    pub team_name: String,
}

async fn index() -> Json<Value> {
    Json(json!({
        "service": "team_games",
        "endpoints": {
            "/get_team_games": { "query": { "team_name": "Nome da equipa" } }
        }
    }))
}

async fn team_games_handler(
    State(context): State<Arc<ScrapingContext>>,
    Query(query): Query<TeamGamesQuery>,
) -> Json<TeamGamesResponse> {
    Json(get_team_games(&context, &query.team_name).await)
}

pub fn router(context: Arc<ScrapingContext>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/get_team_games", get(team_games_handler))
        .with_state(context)
}
