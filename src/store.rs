use chrono::Utc;
use log::info;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::{Analysis, AnalysisRecord, ScoredTask};

pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    migrate(&pool).await?;
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Persist an analysis as the newest one. Returns its id.
pub async fn save_analysis(pool: &SqlitePool, analysis: &Analysis) -> Result<Uuid, AppError> {
    if let Some(bad) = analysis.results.iter().find(|r| !r.is_finite()) {
        return Err(AppError::NonFiniteScore(bad.id.clone()));
    }

    let analysis_id = Uuid::new_v4();
    let results = serde_json::to_string(&analysis.results)?;

    sqlx::query(
        "INSERT INTO analyses (analysis_id, strategy, results, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(analysis_id.to_string())
    .bind(&analysis.strategy)
    .bind(results)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    info!(
        "Stored analysis {} ({} tasks, strategy {})",
        analysis_id,
        analysis.results.len(),
        analysis.strategy
    );
    Ok(analysis_id)
}

pub async fn load_latest(pool: &SqlitePool) -> Result<Option<AnalysisRecord>, AppError> {
    let record = sqlx::query_as::<_, AnalysisRecord>(
        "SELECT analysis_id, strategy, results, created_at FROM analyses ORDER BY seq DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;
    Ok(record)
}

impl AnalysisRecord {
    pub fn scored_tasks(&self) -> Result<Vec<ScoredTask>, AppError> {
        Ok(serde_json::from_str(&self.results)?)
    }
}

#[cfg(test)]
pub async fn memory_pool() -> SqlitePool {
    // One connection: each in-memory connection is its own database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    migrate(&pool).await.expect("migrations");
    pool
}
