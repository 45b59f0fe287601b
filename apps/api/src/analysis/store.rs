//! Persistence Sink — one row per analysis in the `resumes` table.
//!
//! Schema consumed: `resumes (id uuid default, name text null, email text null,
//! skills text[], analysis jsonb, created_at timestamptz default)`.

use sqlx::PgPool;
use uuid::Uuid;

use crate::analysis::normalize::AnalysisResult;

/// The persisted `analysis` object. Mirrors the response fields minus
/// `email`, which is stored as its own column.
fn analysis_record(result: &AnalysisResult) -> serde_json::Value {
    serde_json::json!({
        "summary": result.summary,
        "skills": result.skills,
        "score": result.score,
        "improve": result.improve,
    })
}

/// Inserts one analysis record and returns the new row id.
/// Any failure propagates to the request handler; there is no queue or retry.
pub async fn insert_analysis(pool: &PgPool, result: &AnalysisResult) -> Result<Uuid, sqlx::Error> {
    let analysis = analysis_record(result);

    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO resumes (name, email, skills, analysis) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(Option::<String>::None)
    .bind(result.email.as_deref())
    .bind(&result.skills)
    .bind(&analysis)
    .fetch_one(pool)
    .await?;

    Ok(id)
}
