pub mod aggregator;
pub mod config;
pub mod probability_scraper;
pub mod requests;
pub mod scraping_context;
pub mod season_feed;
pub mod server;
pub mod standings;
mod text_manipulators;
mod upstream_status_error;

pub use aggregator::{TeamGamesResponse, get_team_games};
pub use scraping_context::ScrapingContext;
pub use upstream_status_error::UpstreamStatusError;
