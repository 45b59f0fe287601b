//! Axum route handler for the analyze endpoint.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::analysis::normalize::{AnalysisResult, Outcome};
use crate::analysis::{analyze_resume_text, store};
use crate::errors::AppError;
use crate::extract::extract_resume_text;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// POST /api/analyze
///
/// Accepts a multipart body with a single `file` part of type
/// `application/pdf`, runs the full pipeline (extract → prompt → model →
/// normalize → persist) and returns the flattened result. Every step failure
/// is caught at this boundary; the client sees either the complete result
/// with a success flag or a single error object, never a partial response.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let pdf = read_pdf_upload(&mut multipart).await?;

    let resume_text = extract_resume_text(&pdf)?;

    let normalized = analyze_resume_text(state.llm.as_ref(), &resume_text).await?;
    match &normalized.outcome {
        Outcome::Clean => {}
        Outcome::FieldsDefaulted(fields) => {
            tracing::warn!("Model output needed defaults for fields: {fields:?}");
        }
        Outcome::Unparseable => {
            tracing::warn!("Model output was unusable; responding with the fallback analysis");
        }
    }

    // A persistence failure denies the client its result even though the
    // analysis succeeded; persistence is not best-effort.
    let id = store::insert_analysis(&state.db, &normalized.result).await?;
    tracing::info!("Persisted analysis {id}");

    Ok(Json(AnalyzeResponse {
        success: true,
        result: normalized.result,
    }))
}

/// Reads the upload, accepting exactly one `file` part whose declared content
/// type is `application/pdf`. Neither the model nor the database is touched
/// when validation fails.
async fn read_pdf_upload(multipart: &mut Multipart) -> Result<Bytes, AppError> {
    let mut pdf: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        if pdf.is_some() || field.content_type() != Some("application/pdf") {
            return Err(AppError::InvalidFileType);
        }
        pdf = Some(
            field
                .bytes()
                .await
                .map_err(|e| AppError::Upload(e.to_string()))?,
        );
    }

    pdf.ok_or(AppError::InvalidFileType)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::Request;

    const BOUNDARY: &str = "resume-upload-test";

    fn part(name: &str, content_type: &str, data: &str) -> String {
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{name}\"; filename=\"resume\"\r\n\
             Content-Type: {content_type}\r\n\r\n\
             {data}\r\n"
        )
    }

    async fn upload(body: String) -> Result<Bytes, AppError> {
        let request = Request::builder()
            .method("POST")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        let mut multipart = Multipart::from_request(request, &()).await.unwrap();
        read_pdf_upload(&mut multipart).await
    }

    #[tokio::test]
    async fn test_single_pdf_part_is_accepted() {
        let body = format!(
            "{}--{BOUNDARY}--\r\n",
            part("file", "application/pdf", "%PDF-1.4")
        );
        let bytes = upload(body).await.unwrap();
        assert_eq!(&bytes[..], b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_non_pdf_content_type_is_rejected() {
        let body = format!(
            "{}--{BOUNDARY}--\r\n",
            part("file", "text/plain", "just some text")
        );
        assert!(matches!(upload(body).await, Err(AppError::InvalidFileType)));
    }

    #[tokio::test]
    async fn test_missing_file_part_is_rejected() {
        let body = format!("{}--{BOUNDARY}--\r\n", part("name", "text/plain", "Jane"));
        assert!(matches!(upload(body).await, Err(AppError::InvalidFileType)));
    }

    #[tokio::test]
    async fn test_second_file_part_is_rejected() {
        let body = format!(
            "{}{}--{BOUNDARY}--\r\n",
            part("file", "application/pdf", "%PDF-1.4"),
            part("file", "application/pdf", "%PDF-1.4")
        );
        assert!(matches!(upload(body).await, Err(AppError::InvalidFileType)));
    }

    #[test]
    fn test_success_response_is_flattened() {
        let response = AnalyzeResponse {
            success: true,
            result: AnalysisResult {
                summary: "s".to_string(),
                skills: vec!["Rust".to_string()],
                email: None,
                score: 91.0,
                improve: "i".to_string(),
            },
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "success": true,
                "summary": "s",
                "skills": ["Rust"],
                "email": null,
                "score": 91.0,
                "improve": "i"
            })
        );
    }
}
