//! Resume analysis pipeline: prompt → model → normalize.
//! The route handler in [`handlers`] chains this with extraction and persistence.

pub mod handlers;
pub mod normalize;
pub mod prompts;
pub mod store;

use crate::errors::AppError;
use crate::llm_client::CompletionProvider;

use normalize::{normalize_completion, Normalized};
use prompts::build_analyze_prompt;

/// Runs one resume text through the model and normalizes the completion.
/// A transport or provider failure is an error; an unusable completion is not.
pub async fn analyze_resume_text(
    llm: &dyn CompletionProvider,
    resume_text: &str,
) -> Result<Normalized, AppError> {
    let prompt = build_analyze_prompt(resume_text);
    let completion = llm.complete(&prompt).await?;
    Ok(normalize_completion(&completion))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalize::Outcome;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;

    struct CannedProvider(&'static str);

    #[async_trait]
    impl CompletionProvider for CannedProvider {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::NoCandidates)
        }
    }

    #[tokio::test]
    async fn test_clean_completion_flows_through() {
        let provider = CannedProvider(
            r#"```json
            {"summary": "s", "skills": ["Rust"], "email": null, "score": 50, "improve": "i"}
            ```"#,
        );
        let normalized = analyze_resume_text(&provider, "resume text").await.unwrap();
        assert_eq!(normalized.outcome, Outcome::Clean);
        assert_eq!(normalized.result.skills, vec!["Rust"]);
    }

    #[tokio::test]
    async fn test_unusable_completion_is_still_a_success() {
        let provider = CannedProvider("the model rambled instead of emitting JSON");
        let normalized = analyze_resume_text(&provider, "resume text").await.unwrap();
        assert_eq!(normalized.outcome, Outcome::Unparseable);
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces_as_llm_error() {
        let result = analyze_resume_text(&FailingProvider, "resume text").await;
        assert!(matches!(result, Err(AppError::Llm(LlmError::NoCandidates))));
    }
}
