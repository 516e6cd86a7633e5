//! Task prioritization.
//!
//! Every task gets four sub-scores in `0..=1` (urgency, importance, effort,
//! dependency). The final score is their weighted sum under the chosen
//! [`Strategy`], with a penalty for tasks caught in a dependency cycle.

pub mod cycles;
pub mod dates;
pub mod strategy;

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::analysis::{Analysis, ScoredTask, SubScores, Suggestion};
use crate::models::task::{CleanTask, TaskInput};
use cycles::detect_cycles;
pub use strategy::{Strategy, WeightOverrides};

pub const ISSUE_CIRCULAR_DEPENDENCY: &str = "circular_dependency";
pub const ISSUE_NO_DUE_DATE: &str = "no_due_date";
pub const ISSUE_NO_ESTIMATED_HOURS: &str = "no_estimated_hours";
pub const ISSUE_UNKNOWN_DEPENDENCY: &str = "unknown_dependency";

const URGENCY_HORIZON_DAYS: f64 = 30.0;
const OVERDUE_BASE: f64 = 0.9;
const OVERDUE_CAP: f64 = 0.99;
const OVERDUE_MAX_DAYS: i64 = 30;
const QUICK_WIN_HOURS: f64 = 1.0;
const LONG_HAUL_HOURS: f64 = 16.0;
const CYCLE_PENALTY: f64 = 0.9;

pub fn urgency_score(due_date: Option<NaiveDate>, today: NaiveDate) -> f64 {
    let Some(due) = due_date else {
        return 0.0;
    };
    let days = (due - today).num_days();
    if days < 0 {
        let overdue = (-days).min(OVERDUE_MAX_DAYS) as f64;
        (OVERDUE_BASE + overdue / 100.0).min(OVERDUE_CAP)
    } else {
        (1.0 - days as f64 / URGENCY_HORIZON_DAYS).clamp(0.0, 1.0)
    }
}

pub fn importance_score(importance: i64) -> f64 {
    importance.clamp(1, 10) as f64 / 10.0
}

/// Short tasks score high.
pub fn effort_score(hours: f64) -> f64 {
    if hours <= QUICK_WIN_HOURS {
        1.0
    } else if hours >= LONG_HAUL_HOURS {
        0.0
    } else {
        1.0 - (hours - QUICK_WIN_HOURS) / (LONG_HAUL_HOURS - QUICK_WIN_HOURS)
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Normalize inputs, keyed by id. A repeated id replaces the earlier task in place.
fn normalize(inputs: Vec<TaskInput>) -> Vec<CleanTask> {
    let mut tasks: Vec<CleanTask> = Vec::with_capacity(inputs.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (index, input) in inputs.into_iter().enumerate() {
        let task = CleanTask::from_input(input, index);
        match positions.get(&task.id) {
            Some(&pos) => tasks[pos] = task,
            None => {
                positions.insert(task.id.clone(), tasks.len());
                tasks.push(task);
            }
        }
    }
    tasks
}

pub fn compute_scores(
    inputs: Vec<TaskInput>,
    strategy: Strategy,
    overrides: &WeightOverrides,
    today: NaiveDate,
) -> Analysis {
    let weights = strategy.weights().with_overrides(overrides);
    let tasks = normalize(inputs);

    let report = detect_cycles(
        tasks
            .iter()
            .map(|t| (t.id.as_str(), t.dependencies.as_slice())),
    );

    let mut dependents: HashMap<&str, usize> =
        tasks.iter().map(|t| (t.id.as_str(), 0)).collect();
    for task in &tasks {
        for dep in &task.dependencies {
            if let Some(count) = dependents.get_mut(dep.as_str()) {
                *count += 1;
            }
        }
    }
    let max_dependents = dependents.values().copied().max().unwrap_or(0);

    let mut results: Vec<ScoredTask> = tasks
        .iter()
        .map(|task| {
            let mut explanation = Vec::new();
            let mut issues = Vec::new();

            let urgency = urgency_score(task.due_date, today);
            match task.due_date {
                None => explanation.push("No due date, low urgency".to_string()),
                Some(due) => {
                    let days = (due - today).num_days();
                    if days < 0 {
                        explanation.push(format!("Overdue by {} days, urgency boosted", -days));
                    } else {
                        explanation.push(format!("Due in {} days, urgency {:.2}", days, urgency));
                    }
                }
            }

            let importance = importance_score(task.importance);
            explanation.push(format!("Importance {} scores {:.2}", task.importance, importance));

            let effort = effort_score(task.estimated_hours);
            explanation.push(format!(
                "Estimated {}h scores {:.2} on effort",
                task.estimated_hours, effort
            ));

            let blocked = dependents.get(task.id.as_str()).copied().unwrap_or(0);
            let dependency = if max_dependents > 0 {
                blocked as f64 / max_dependents as f64
            } else {
                0.0
            };
            explanation.push(format!("Blocks {} tasks, dependency {:.2}", blocked, dependency));

            let mut score = weights.urgency * urgency
                + weights.importance * importance
                + weights.effort * effort
                + weights.dependency * dependency;

            if report.in_cycle.contains(&task.id) {
                issues.push(ISSUE_CIRCULAR_DEPENDENCY.to_string());
                score *= CYCLE_PENALTY;
                explanation.push("Part of a dependency cycle, penalty applied".to_string());
            }
            debug_assert!(score.is_finite(), "score for {} overflowed", task.id);
            if task.due_date.is_none() {
                issues.push(ISSUE_NO_DUE_DATE.to_string());
            }
            if task.hours_defaulted {
                issues.push(ISSUE_NO_ESTIMATED_HOURS.to_string());
            }
            if task
                .dependencies
                .iter()
                .any(|dep| !dependents.contains_key(dep.as_str()))
            {
                issues.push(ISSUE_UNKNOWN_DEPENDENCY.to_string());
            }

            ScoredTask {
                id: task.id.clone(),
                title: task.title.clone(),
                raw: task.clone(),
                score: round4(score),
                subscores: SubScores {
                    urgency: round4(urgency),
                    importance: round4(importance),
                    effort: round4(effort),
                    dependency: round4(dependency),
                },
                explanation: explanation.join("; "),
                issues,
            }
        })
        .collect();

    // sort_by is stable, so ties keep input order
    results.sort_by(|a, b| b.score.total_cmp(&a.score));

    Analysis {
        strategy: strategy.name().to_string(),
        results,
        cycles: report.cycles,
    }
}

/// Pick the first `limit` results and say why each one made the cut.
pub fn suggest(results: &[ScoredTask], limit: usize) -> Vec<Suggestion> {
    results
        .iter()
        .take(limit)
        .map(|task| {
            let (factor, value) = task.subscores.top_factor();
            let mut reasons = vec![format!("Top driver: {} ({:.2})", factor, value)];
            if task.has_issue(ISSUE_CIRCULAR_DEPENDENCY) {
                reasons.push("In circular dependency, resolve manually".to_string());
            }
            Suggestion {
                task: task.clone(),
                why: reasons.join("; "),
            }
        })
        .collect()
}
