use chrono::NaiveDate;

/// Status string the provider uses for a postponed fixture.
pub const POSTPONED_STATUS: &str = "Adiado";

pub const POSTPONED_RESULT: &str = "ADI";
pub const UNPLAYED_RESULT: &str = "-:-";

/// Reformats a `DD/MM/YY` date as `DD/MM/YYYY`, keeping the raw string when
/// it does not parse. Two-digit years 00-69 land in 20xx, 70-99 in 19xx.
pub fn normalize_date(raw: &str) -> String {
    // chrono skips surrounding whitespace; padded dates are kept verbatim.
    if raw.trim() != raw {
        return raw.to_string();
    }
    match NaiveDate::parse_from_str(raw, "%d/%m/%y") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn render_result(status: &str, home_score: Option<u32>, away_score: Option<u32>) -> String {
    if status == POSTPONED_STATUS {
        return POSTPONED_RESULT.to_string();
    }
    match (home_score, away_score) {
        (Some(home), Some(away)) => format!("{home}:{away}"),
        _ => UNPLAYED_RESULT.to_string(),
    }
}
