use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::scoring::dates::parse_due_date;

pub const DEFAULT_IMPORTANCE: i64 = 5;
pub const DEFAULT_ESTIMATED_HOURS: f64 = 4.0;
pub const MIN_ESTIMATED_HOURS: f64 = 0.1;

/// A task as submitted by a client. Every field is optional and loosely typed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TaskInput {
    pub id: Option<String>,
    pub title: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub estimated_hours: Option<f64>,
    pub importance: Option<i64>,
    pub dependencies: Vec<String>,
}

impl TaskInput {
    pub fn from_value(value: &Value) -> Result<Self, AppError> {
        let object = value
            .as_object()
            .ok_or_else(|| AppError::BadRequest("Each task must be a JSON object".into()))?;

        Ok(Self {
            id: object.get("id").and_then(text_of),
            title: object.get("title").and_then(text_of),
            due_date: object
                .get("due_date")
                .and_then(Value::as_str)
                .and_then(parse_due_date),
            estimated_hours: object.get("estimated_hours").and_then(float_of),
            importance: object.get("importance").and_then(integer_of),
            dependencies: match object.get("dependencies") {
                Some(Value::Array(items)) => items.iter().map(dependency_id).collect(),
                _ => Vec::new(),
            },
        })
    }
}

// Empty strings and zero count as "not given"
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn float_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|hours| hours.is_finite())
}

fn integer_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn dependency_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Normalized task, echoed back to clients as `raw`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanTask {
    pub id: String,
    pub title: String,
    pub importance: i64,
    pub estimated_hours: f64,
    pub due_date: Option<NaiveDate>,
    pub dependencies: Vec<String>,
    #[serde(skip)]
    pub hours_defaulted: bool,
}

impl CleanTask {
    pub fn from_input(input: TaskInput, index: usize) -> Self {
        let id = input
            .id
            .or_else(|| input.title.clone())
            .unwrap_or_else(|| format!("task-{}", index));
        let title = input.title.unwrap_or_else(|| format!("Untitled {}", index));

        let importance = match input.importance {
            Some(0) | None => DEFAULT_IMPORTANCE,
            Some(value) => value,
        };

        // Zero counts as missing; negative and tiny estimates floor at MIN_ESTIMATED_HOURS
        let (estimated_hours, hours_defaulted) = match input.estimated_hours {
            Some(hours) if hours != 0.0 => (hours.max(MIN_ESTIMATED_HOURS), false),
            _ => (DEFAULT_ESTIMATED_HOURS, true),
        };

        Self {
            id,
            title,
            importance,
            estimated_hours,
            due_date: input.due_date,
            dependencies: input.dependencies,
            hours_defaulted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_loose_types() {
        let input = TaskInput::from_value(&json!({
            "id": 7,
            "title": "Write report",
            "due_date": "2025-03-01",
            "estimated_hours": "2.5",
            "importance": "8",
            "dependencies": [1, "b"]
        }))
        .unwrap();

        assert_eq!(input.id.as_deref(), Some("7"));
        assert_eq!(input.due_date, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(input.estimated_hours, Some(2.5));
        assert_eq!(input.importance, Some(8));
        assert_eq!(input.dependencies, vec!["1", "b"]);
    }

    #[test]
    fn garbage_fields_become_absent() {
        let input = TaskInput::from_value(&json!({
            "title": "",
            "due_date": "someday",
            "estimated_hours": "lots",
            "importance": "7.5",
            "dependencies": "a"
        }))
        .unwrap();
        assert_eq!(input, TaskInput::default());
    }

    #[test]
    fn float_importance_truncates() {
        let input = TaskInput::from_value(&json!({ "importance": 7.9 })).unwrap();
        assert_eq!(input.importance, Some(7));
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(TaskInput::from_value(&json!("task")).is_err());
    }

    #[test]
    fn clean_task_fills_defaults() {
        let clean = CleanTask::from_input(TaskInput::default(), 2);
        assert_eq!(clean.id, "task-2");
        assert_eq!(clean.title, "Untitled 2");
        assert_eq!(clean.importance, 5);
        assert_eq!(clean.estimated_hours, 4.0);
        assert!(clean.hours_defaulted);
    }

    #[test]
    fn id_falls_back_to_title() {
        let clean = CleanTask::from_input(
            TaskInput {
                title: Some("Pay rent".into()),
                importance: Some(0),
                estimated_hours: Some(0.0),
                ..Default::default()
            },
            0,
        );
        assert_eq!(clean.id, "Pay rent");
        assert_eq!(clean.importance, 5);
        assert!(clean.hours_defaulted);
    }

    #[test]
    fn negative_and_tiny_hours_floor_at_minimum() {
        for hours in [-2.0, 0.01] {
            let clean = CleanTask::from_input(
                TaskInput {
                    estimated_hours: Some(hours),
                    ..Default::default()
                },
                0,
            );
            assert_eq!(clean.estimated_hours, MIN_ESTIMATED_HOURS);
            assert!(!clean.hours_defaulted);
        }
    }
}
