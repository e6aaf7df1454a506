//! Axum route handlers for the Screening API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::errors::AppError;
use crate::extract::extract_pdf_text;
use crate::screening::pipeline::{self, ScreeningResult, Submission};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub candidate_name: String,
    pub resume_text: String,
    pub interview_text: String,
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn bad_multipart(e: MultipartError) -> AppError {
    AppError::Validation(format!("Invalid multipart body: {e}"))
}

/// POST /api/v1/candidates/analyze-text
///
/// Screens a candidate from pre-extracted text. All three fields are required
/// and validated before any network activity.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<ScreeningResult>, AppError> {
    require("candidate_name", &request.candidate_name)?;
    require("resume_text", &request.resume_text)?;
    require("interview_text", &request.interview_text)?;

    let result = pipeline::run(
        state.analyzer.as_ref(),
        Submission {
            candidate_name: request.candidate_name.trim().to_string(),
            resume_text: request.resume_text,
            interview_text: request.interview_text,
        },
    )
    .await?;

    Ok(Json(result))
}

/// POST /api/v1/candidates/analyze
///
/// Screens a candidate from raw uploads: a `candidate_name` text field plus
/// `resume` and `interview` PDF files. The two extractions run concurrently;
/// the backend call waits for both.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScreeningResult>, AppError> {
    let mut candidate_name = String::new();
    let mut resume: Option<Bytes> = None;
    let mut interview: Option<Bytes> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "candidate_name" => candidate_name = field.text().await.map_err(bad_multipart)?,
            "resume" => resume = Some(field.bytes().await.map_err(bad_multipart)?),
            "interview" => interview = Some(field.bytes().await.map_err(bad_multipart)?),
            // unknown fields are ignored
            _ => {}
        }
    }

    require("candidate_name", &candidate_name)?;
    let resume = resume
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;
    let interview = interview
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::Validation("interview file is required".to_string()))?;

    let (resume_text, interview_text) =
        tokio::try_join!(extract_pdf_text(resume), extract_pdf_text(interview))?;

    let result = pipeline::run(
        state.analyzer.as_ref(),
        Submission {
            candidate_name: candidate_name.trim().to_string(),
            resume_text,
            interview_text,
        },
    )
    .await?;

    Ok(Json(result))
}
