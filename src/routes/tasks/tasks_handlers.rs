use actix_web::{web, HttpResponse, Responder};
use chrono::Local;
use log::{error, info, warn};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::config::{Config, MAX_SUGGEST_LIMIT};
use crate::errors::AppError;
use crate::scoring::{self, strategy::list_strategies, Strategy};
use crate::store;
use super::tasks_models::{
    AnalyzeRequest, AnalyzeResponse,
    StrategyQuery, SuggestQuery, SuggestResponse,
    StrategiesResponse,
};

pub async fn tasks_get() -> impl Responder {
    info!("Received request on /api/tasks endpoint");
    HttpResponse::Ok().body("Hello, this is the Smart Task Analyzer API.")
}

pub async fn analyze_get() -> impl Responder {
    HttpResponse::Ok().body(
        "POST a list of tasks (or {\"tasks\": [...], \"strategy\": \"...\"}) to analyze them.",
    )
}

// Score a batch of tasks and keep the result for /suggest
pub async fn analyze(
    pool: web::Data<SqlitePool>,
    query: web::Query<StrategyQuery>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let request = AnalyzeRequest::from_payload(payload.into_inner(), query.strategy.as_deref())?;
    info!(
        "Received request to analyze {} tasks with strategy {}",
        request.tasks.len(),
        request.strategy.name()
    );

    let analysis = scoring::compute_scores(
        request.tasks,
        request.strategy,
        &request.overrides,
        Local::now().date_naive(),
    );

    if !analysis.cycles.is_empty() {
        warn!("Found {} dependency cycle(s)", analysis.cycles.len());
    }

    // A storage failure still returns the scores
    let analysis_id = match store::save_analysis(pool.get_ref(), &analysis).await {
        Ok(id) => Some(id),
        Err(e) => {
            error!("Failed to store analysis: {}", e);
            None
        }
    };

    Ok(HttpResponse::Ok().json(AnalyzeResponse {
        analysis_id,
        strategy: analysis.strategy,
        results: analysis.results,
        cycles: analysis.cycles,
    }))
}

fn resolve_limit(requested: Option<usize>, config: &Config) -> Result<usize, AppError> {
    let limit = requested.unwrap_or(config.suggest_limit);
    if limit == 0 || limit > MAX_SUGGEST_LIMIT {
        return Err(AppError::BadRequest(format!(
            "limit must be between 1 and {}",
            MAX_SUGGEST_LIMIT
        )));
    }
    Ok(limit)
}

// Top tasks from the most recent analysis
pub async fn suggest_get(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    query: web::Query<SuggestQuery>,
) -> Result<HttpResponse, AppError> {
    let limit = resolve_limit(query.limit, &config)?;

    let record = match store::load_latest(pool.get_ref()).await? {
        Some(record) => record,
        None => {
            info!("Suggest requested before any analysis was stored");
            return Err(AppError::NoStoredAnalysis);
        }
    };

    let results = record.scored_tasks()?;
    info!(
        "Suggesting {} of {} tasks from analysis {}",
        limit.min(results.len()),
        results.len(),
        record.analysis_id
    );

    Ok(HttpResponse::Ok().json(SuggestResponse {
        analysis_id: Some(record.analysis_id),
        analyzed_at: Some(record.created_at),
        strategy: record.strategy,
        suggestions: scoring::suggest(&results, limit),
    }))
}

// One-shot suggestions for a posted batch; nothing is stored
pub async fn suggest_post(
    config: web::Data<Config>,
    query: web::Query<SuggestQuery>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let limit = resolve_limit(query.limit, &config)?;
    let request = AnalyzeRequest::from_payload(payload.into_inner(), query.strategy.as_deref())?;
    info!("Received request to suggest from {} posted tasks", request.tasks.len());

    let analysis = scoring::compute_scores(
        request.tasks,
        request.strategy,
        &request.overrides,
        Local::now().date_naive(),
    );

    Ok(HttpResponse::Ok().json(SuggestResponse {
        analysis_id: None,
        analyzed_at: None,
        suggestions: scoring::suggest(&analysis.results, limit),
        strategy: analysis.strategy,
    }))
}

pub async fn strategies() -> impl Responder {
    HttpResponse::Ok().json(StrategiesResponse {
        default: Strategy::default().name(),
        strategies: list_strategies(),
    })
}
