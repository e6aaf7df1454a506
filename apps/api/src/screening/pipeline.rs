//! Submission pipeline: one backend call, normalization, derivation, done.
//!
//! Each submission is independent; nothing is shared across submissions and a
//! failed submission is never retried.

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::backend::{AnalyzeRequest, Analyzer};
use crate::errors::AppError;
use crate::screening::models::{InterviewScenario, ResumeEvaluation};
use crate::screening::normalize::normalize_response;

/// One validated submission: candidate name plus the extracted text of both
/// uploads.
#[derive(Debug, Clone)]
pub struct Submission {
    pub candidate_name: String,
    pub resume_text: String,
    pub interview_text: String,
}

/// The full screening response returned to the API consumer.
#[derive(Debug, Serialize)]
pub struct ScreeningResult {
    pub candidate_name: String,
    pub resume_analysis: ResumeEvaluation,
    pub interview_scenario: InterviewScenario,
    /// Raw backend payload, echoed only when normalization recovered nothing,
    /// so the caller can render it as a diagnostic fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

/// Runs one screening submission end to end.
pub async fn run(
    analyzer: &dyn Analyzer,
    submission: Submission,
) -> Result<ScreeningResult, AppError> {
    let id = Uuid::new_v4();
    info!(
        submission = %id,
        candidate = %submission.candidate_name,
        "screening submission started"
    );

    let request = AnalyzeRequest {
        candidate_name: submission.candidate_name,
        resume_text: submission.resume_text,
        interview_text: submission.interview_text,
    };
    let raw = analyzer.analyze(&request).await?;

    let (resume_analysis, interview_scenario) = normalize_response(&raw);

    let raw_echo = if resume_analysis.is_empty() && interview_scenario.is_empty() {
        warn!(submission = %id, "normalization recovered nothing; echoing raw payload");
        Some(raw)
    } else {
        None
    };

    info!(
        submission = %id,
        total_score = ?resume_analysis.total_score,
        recommended_role = ?resume_analysis.recommended_role,
        "screening submission finished"
    );

    Ok(ScreeningResult {
        candidate_name: request.candidate_name,
        resume_analysis,
        interview_scenario,
        raw: raw_echo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;
    use crate::screening::models::Role;
    use async_trait::async_trait;
    use serde_json::json;

    struct StubAnalyzer(Value);

    #[async_trait]
    impl Analyzer for StubAnalyzer {
        async fn analyze(&self, _request: &AnalyzeRequest) -> Result<Value, BackendError> {
            Ok(self.0.clone())
        }
    }

    struct FailingAnalyzer;

    #[async_trait]
    impl Analyzer for FailingAnalyzer {
        async fn analyze(&self, _request: &AnalyzeRequest) -> Result<Value, BackendError> {
            Err(BackendError::Api {
                status: 503,
                body: "workflow unavailable".to_string(),
            })
        }
    }

    fn submission() -> Submission {
        Submission {
            candidate_name: "Sam".to_string(),
            resume_text: "resume text".to_string(),
            interview_text: "interview text".to_string(),
        }
    }

    #[tokio::test]
    async fn test_well_formed_response_produces_populated_result() {
        let analyzer = StubAnalyzer(json!({
            "resume_analysis": {"total_score": 25},
            "interview_scenario": {"questions": ["q1"]}
        }));
        let result = run(&analyzer, submission()).await.unwrap();
        assert_eq!(result.candidate_name, "Sam");
        assert_eq!(result.resume_analysis.total_score, Some(25.0));
        assert_eq!(result.resume_analysis.recommended_role, Some(Role::Spm));
        assert_eq!(result.interview_scenario.questions, vec!["q1"]);
        assert!(result.raw.is_none());
    }

    #[tokio::test]
    async fn test_unrecognized_payload_is_echoed_as_diagnostic() {
        let analyzer = StubAnalyzer(json!("the workflow replied in prose"));
        let result = run(&analyzer, submission()).await.unwrap();
        assert!(result.resume_analysis.is_empty());
        assert!(result.interview_scenario.is_empty());
        assert_eq!(result.raw, Some(json!("the workflow replied in prose")));
    }

    #[tokio::test]
    async fn test_backend_failure_is_terminal() {
        let result = run(&FailingAnalyzer, submission()).await;
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }
}
