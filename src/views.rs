//! Display models built from server data

use crate::standings::{standings, HouseStanding};
use crate::types::*;

pub const UNASSIGNED_LABEL: &str = "Unassigned";
pub const NO_HOUSE_LABEL: &str = "—";

/// Sample totals shown on the landing screen before any live data exists
pub fn sample_houses() -> Vec<Team> {
    vec![
        Team::new("Gryffindor", 120),
        Team::new("Slytherin", 110),
        Team::new("Hufflepuff", 95),
        Team::new("Ravenclaw", 130),
    ]
}

pub fn landing_preview() -> Vec<HouseStanding> {
    standings(&sample_houses())
}

/// One line of the activity feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityItem {
    pub reason: String,
    pub delta: i64,
}

impl ActivityItem {
    /// Signed label: "+5" for awards, "-3" for deductions, "0" otherwise
    pub fn label(&self) -> String {
        if self.delta > 0 {
            format!("+{}", self.delta)
        } else {
            self.delta.to_string()
        }
    }

    pub fn is_gain(&self) -> bool {
        self.delta >= 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub student_name: String,
    pub house: Option<String>,
    pub crest: &'static str,
    /// Total of the student's own house, 0 when it is not listed
    pub house_total: i64,
    /// Points the student personally earned
    pub contribution: i64,
    pub standings: Vec<HouseStanding>,
    /// Newest first, as sent by the server
    pub activity: Vec<ActivityItem>,
}

impl DashboardView {
    pub fn house_label(&self) -> &str {
        self.house
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(UNASSIGNED_LABEL)
    }
}

impl From<&StudentDashboard> for DashboardView {
    fn from(data: &StudentDashboard) -> Self {
        let house = data.student.assigned_house.clone();
        let house_total = house
            .as_deref()
            .and_then(|name| data.houses.iter().find(|h| h.name == name))
            .map(|h| h.total_points)
            .unwrap_or(0);

        Self {
            student_name: data.student.name.clone(),
            crest: crest_for(house.as_deref()),
            house,
            house_total,
            contribution: data.student.total_points,
            standings: standings(&data.houses),
            activity: data
                .transactions
                .iter()
                .map(|t| ActivityItem {
                    reason: t.reason.clone(),
                    delta: t.delta,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopPerformer {
    pub id: String,
    pub name: String,
    pub house: Option<String>,
    pub points: i64,
}

impl TopPerformer {
    pub fn house_label(&self) -> &str {
        self.house
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(NO_HOUSE_LABEL)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaderboardView {
    pub standings: Vec<HouseStanding>,
    /// In the order ranked by the server
    pub top: Vec<TopPerformer>,
}

impl From<&Overview> for LeaderboardView {
    fn from(data: &Overview) -> Self {
        Self {
            standings: standings(&data.houses),
            top: data
                .top
                .iter()
                .map(|entry| TopPerformer {
                    id: entry.id.clone(),
                    name: entry.name.clone(),
                    house: entry.assigned_house.clone(),
                    points: entry.total_points,
                })
                .collect(),
        }
    }
}
