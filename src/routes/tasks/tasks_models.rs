use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::{ScoredTask, Suggestion};
use crate::models::task::TaskInput;
use crate::scoring::strategy::StrategyInfo;
use crate::scoring::{Strategy, WeightOverrides};

// Query strings

#[derive(Deserialize)]
pub struct StrategyQuery {
    pub strategy: Option<String>,
}

#[derive(Deserialize)]
pub struct SuggestQuery {
    pub limit: Option<usize>,
    pub strategy: Option<String>,
}


// Analyze request: either {"tasks": [...], "strategy": ..., "weights": {...}}
// or a bare list of tasks with the strategy in the query string
pub struct AnalyzeRequest {
    pub tasks: Vec<TaskInput>,
    pub strategy: Strategy,
    pub overrides: WeightOverrides,
}

impl AnalyzeRequest {
    pub fn from_payload(payload: Value, query_strategy: Option<&str>) -> Result<Self, AppError> {
        match payload {
            Value::Array(items) => Ok(Self {
                tasks: parse_tasks(&items)?,
                strategy: Strategy::from_name(query_strategy.unwrap_or_default()),
                overrides: WeightOverrides::default(),
            }),
            Value::Object(mut object) => {
                let tasks = match object.remove("tasks") {
                    None | Some(Value::Null) => Vec::new(),
                    Some(Value::Array(items)) => parse_tasks(&items)?,
                    Some(_) => return Err(AppError::BadRequest("'tasks' must be a list".into())),
                };

                let strategy = object
                    .get("strategy")
                    .and_then(Value::as_str)
                    .or(query_strategy)
                    .map(Strategy::from_name)
                    .unwrap_or_default();

                let overrides = match object.remove("weights") {
                    None | Some(Value::Null) => WeightOverrides::default(),
                    Some(weights) => serde_json::from_value::<WeightOverrides>(weights)
                        .map_err(|e| AppError::BadRequest(format!("Invalid weights: {}", e)))?,
                };
                overrides.validate().map_err(AppError::BadRequest)?;

                Ok(Self {
                    tasks,
                    strategy,
                    overrides,
                })
            }
            _ => Err(AppError::BadRequest(
                "Expected a list of tasks or an object with a 'tasks' list".into(),
            )),
        }
    }
}

fn parse_tasks(items: &[Value]) -> Result<Vec<TaskInput>, AppError> {
    items.iter().map(TaskInput::from_value).collect()
}


// Responses

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub analysis_id: Option<Uuid>,
    pub strategy: String,
    pub results: Vec<ScoredTask>,
    pub cycles: Vec<Vec<String>>,
}

#[derive(Serialize)]
pub struct SuggestResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzed_at: Option<DateTime<Utc>>,
    pub strategy: String,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Serialize)]
pub struct StrategiesResponse {
    pub default: &'static str,
    pub strategies: Vec<StrategyInfo>,
}
