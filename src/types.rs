use serde::{Deserialize, Deserializer, Serialize};

/// Opaque ID types for type safety
pub type UserId = String;
pub type QuestionId = u32;

/// Identity handed out by a successful signup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
}

/// Outcome of the sorting quiz
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SortingResult {
    pub house: String,
}

/// Null or absent point values count as zero. Fractional values are
/// rounded to the nearest whole point, halves away from zero.
fn points_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(0);
    };

    if let Some(points) = number.as_i64() {
        return Ok(points);
    }
    // u64 beyond i64::MAX and floats; `as` saturates at the i64 bounds
    Ok(number.as_f64().map(|points| points.round() as i64).unwrap_or(0))
}

/// A house and its server-side point total
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    #[serde(default, deserialize_with = "points_or_zero")]
    pub total_points: i64,
}

impl Team {
    pub fn new(name: impl Into<String>, total_points: i64) -> Self {
        Self {
            name: name.into(),
            total_points,
        }
    }
}

/// A single point award or deduction, newest first as the server sends them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    #[serde(default)]
    pub reason: String,
    #[serde(default, deserialize_with = "points_or_zero")]
    pub delta: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub assigned_house: Option<String>,
    #[serde(default, deserialize_with = "points_or_zero")]
    pub total_points: i64,
}

/// The signed-in student as reported by the dashboard endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentProfile {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub assigned_house: Option<String>,
    #[serde(default, deserialize_with = "points_or_zero")]
    pub total_points: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentDashboard {
    pub student: StudentProfile,
    #[serde(default)]
    pub houses: Vec<Team>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Overview {
    #[serde(default)]
    pub houses: Vec<Team>,
    #[serde(default)]
    pub top: Vec<LeaderboardEntry>,
}

/// The four houses a student can be sorted into
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum House {
    Gryffindor,
    Slytherin,
    Hufflepuff,
    Ravenclaw,
}

/// Crest shown for houses outside the known set
pub const FALLBACK_CREST: &str = "⭐";

impl House {
    pub const ALL: [House; 4] = [
        House::Gryffindor,
        House::Slytherin,
        House::Hufflepuff,
        House::Ravenclaw,
    ];

    pub fn from_name(name: &str) -> Option<House> {
        Self::ALL.into_iter().find(|h| h.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            House::Gryffindor => "Gryffindor",
            House::Slytherin => "Slytherin",
            House::Hufflepuff => "Hufflepuff",
            House::Ravenclaw => "Ravenclaw",
        }
    }

    pub fn crest(self) -> &'static str {
        match self {
            House::Gryffindor => "🛡️",
            House::Slytherin => "🐍",
            House::Hufflepuff => "🦡",
            House::Ravenclaw => "🦅",
        }
    }
}

/// Crest for an arbitrary house name, falling back for unknown or missing houses
pub fn crest_for(name: Option<&str>) -> &'static str {
    name.and_then(House::from_name)
        .map(House::crest)
        .unwrap_or(FALLBACK_CREST)
}

/// Answers chosen so far, kept in the order they were first given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizAnswerSet {
    entries: Vec<(QuestionId, usize)>,
}

impl QuizAnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer. Re-answering keeps the question's original position.
    pub fn set(&mut self, question_id: QuestionId, option_index: usize) {
        match self.entries.iter_mut().find(|(q, _)| *q == question_id) {
            Some(entry) => entry.1 = option_index,
            None => self.entries.push((question_id, option_index)),
        }
    }

    pub fn get(&self, question_id: QuestionId) -> Option<usize> {
        self.entries
            .iter()
            .find(|(q, _)| *q == question_id)
            .map(|(_, option)| *option)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, usize)> + '_ {
        self.entries.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_points_become_zero() {
        let team: Team = serde_json::from_str(r#"{"name":"Slytherin","total_points":null}"#).unwrap();
        assert_eq!(team.total_points, 0);

        let team: Team = serde_json::from_str(r#"{"name":"Slytherin"}"#).unwrap();
        assert_eq!(team.total_points, 0);
    }

    #[test]
    fn test_dashboard_tolerates_sparse_payload() {
        let json = r#"{
            "student": {"name": "Luna", "assigned_house": null, "total_points": null},
            "houses": [{"name": "Ravenclaw", "total_points": 40}],
            "transactions": [{"reason": "Late", "delta": -5}, {"reason": "Help", "delta": null}]
        }"#;
        let dashboard: StudentDashboard = serde_json::from_str(json).unwrap();

        assert_eq!(dashboard.student.total_points, 0);
        assert!(dashboard.student.assigned_house.is_none());
        assert_eq!(dashboard.transactions[0].delta, -5);
        assert_eq!(dashboard.transactions[1].delta, 0);
    }

    #[test]
    fn test_fractional_points_are_rounded() {
        let json = r#"{
            "houses": [
                {"name": "Gryffindor", "total_points": 120.5},
                {"name": "Slytherin", "total_points": 2.0},
                {"name": "Hufflepuff", "total_points": -3.5},
                {"name": "Ravenclaw", "total_points": 1e30}
            ],
            "top": [{"id": "s-1", "name": "Hermione", "total_points": 79.4}]
        }"#;
        let overview: Overview = serde_json::from_str(json).unwrap();

        let points: Vec<_> = overview.houses.iter().map(|h| h.total_points).collect();
        assert_eq!(points, vec![121, 2, -4, i64::MAX]);
        assert_eq!(overview.top[0].total_points, 79);

        let tx: Transaction = serde_json::from_str(r#"{"reason":"Quidditch","delta":2.0}"#).unwrap();
        assert_eq!(tx.delta, 2);
    }

    #[test]
    fn test_points_reject_non_numbers() {
        let result = serde_json::from_str::<Team>(r#"{"name":"Slytherin","total_points":"ten"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_overview_missing_lists_are_empty() {
        let overview: Overview = serde_json::from_str("{}").unwrap();
        assert!(overview.houses.is_empty());
        assert!(overview.top.is_empty());
    }

    #[test]
    fn test_crest_fallback() {
        assert_eq!(crest_for(Some("Hufflepuff")), "🦡");
        assert_eq!(crest_for(Some("Durmstrang")), FALLBACK_CREST);
        assert_eq!(crest_for(None), FALLBACK_CREST);
    }

    #[test]
    fn test_answer_set_keeps_first_answer_position() {
        let mut answers = QuizAnswerSet::new();
        answers.set(3, 1);
        answers.set(1, 0);
        answers.set(3, 2);

        let collected: Vec<_> = answers.iter().collect();
        assert_eq!(collected, vec![(3, 2), (1, 0)]);
        assert_eq!(answers.len(), 2);
    }
}
