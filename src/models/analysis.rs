use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::task::CleanTask;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependency: f64,
}

impl SubScores {
    /// Highest factor; ties go to the earlier one in field order.
    pub fn top_factor(&self) -> (&'static str, f64) {
        let factors = [
            ("urgency", self.urgency),
            ("importance", self.importance),
            ("effort", self.effort),
            ("dependency", self.dependency),
        ];
        factors
            .into_iter()
            .fold(factors[0], |best, next| if next.1 > best.1 { next } else { best })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    pub id: String,
    pub title: String,
    pub raw: CleanTask,
    pub score: f64,
    pub subscores: SubScores,
    pub explanation: String,
    pub issues: Vec<String>,
}

impl ScoredTask {
    pub fn has_issue(&self, issue: &str) -> bool {
        self.issues.iter().any(|i| i == issue)
    }

    /// JSON has no encoding for NaN or infinity.
    pub fn is_finite(&self) -> bool {
        let s = &self.subscores;
        [self.score, s.urgency, s.importance, s.effort, s.dependency]
            .iter()
            .all(|v| v.is_finite())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub strategy: String,
    pub results: Vec<ScoredTask>,
    pub cycles: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub task: ScoredTask,
    pub why: String,
}

/// Row of the `analyses` table. `results` holds the JSON-encoded result list.
#[derive(sqlx::FromRow, Debug)]
pub struct AnalysisRecord {
    pub analysis_id: String,
    pub strategy: String,
    pub results: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_factor_prefers_first_on_ties() {
        let scores = SubScores {
            urgency: 0.5,
            importance: 0.8,
            effort: 0.8,
            dependency: 0.1,
        };
        assert_eq!(scores.top_factor(), ("importance", 0.8));
    }
}
