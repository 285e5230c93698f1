use crate::types::{crest_for, Team};

/// Smallest bar width so that houses without points stay visible
pub const MIN_DISPLAY_PERCENT: u32 = 5;
pub const MAX_DISPLAY_PERCENT: u32 = 100;

/// A house with its share of all points, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseStanding {
    pub name: String,
    pub points: i64,
    pub percent: u32,
    pub crest: &'static str,
}

/// Share of the overall total for each team, in input order.
///
/// An all-zero (or empty) total is treated as 1 so nothing divides by zero.
/// Values are rounded half-up and clamped to
/// `MIN_DISPLAY_PERCENT..=MAX_DISPLAY_PERCENT`.
pub fn display_percentages(teams: &[Team]) -> Vec<u32> {
    let total: i128 = teams.iter().map(|t| i128::from(t.total_points)).sum();
    let total = if total == 0 { 1 } else { total };

    teams
        .iter()
        .map(|t| share_of(t.total_points, total))
        .collect()
}

fn share_of(points: i64, total: i128) -> u32 {
    let raw = (points as f64 / total as f64 * 100.0 + 0.5).floor();
    raw.clamp(MIN_DISPLAY_PERCENT as f64, MAX_DISPLAY_PERCENT as f64) as u32
}

/// Build display standings, preserving the server's ordering
pub fn standings(teams: &[Team]) -> Vec<HouseStanding> {
    teams
        .iter()
        .zip(display_percentages(teams))
        .map(|(team, percent)| HouseStanding {
            name: team.name.clone(),
            points: team.total_points,
            percent,
            crest: crest_for(Some(&team.name)),
        })
        .collect()
}
