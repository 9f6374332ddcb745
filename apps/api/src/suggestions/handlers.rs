use axum::{extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::CompletionRequest;
use crate::state::AppState;
use crate::suggestions::prompts;
use crate::suggestions::{
    ContentSuggestionResponse, ContentSuggestionsRequest, JobAnalysisRequest, JobAnalysisResponse,
    SuggestionResponse, SuggestionsRequest,
};

/// Trimmed, non-empty text or `None`.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// POST /api/v1/ai/suggestions
///
/// A specific question wins over a section; with neither, the whole resume is
/// reviewed.
pub async fn handle_suggestions(
    State(state): State<AppState>,
    Json(req): Json<SuggestionsRequest>,
) -> Result<Json<SuggestionResponse>, AppError> {
    let resume = match &req.resume_data {
        Some(v) if !v.is_null() => v,
        _ => return Err(AppError::Validation("Resume data is required".to_string())),
    };

    let prompt = if let Some(question) = non_blank(req.specific_question.as_deref()) {
        prompts::question_prompt(question, resume)
    } else if let Some(section) = non_blank(req.section.as_deref()) {
        prompts::section_prompt(section, resume)
    } else {
        prompts::review_prompt(resume)
    };

    let completion = state
        .completions
        .complete(CompletionRequest {
            system: prompts::REVIEW_SYSTEM.to_string(),
            prompt,
            max_tokens: prompts::REVIEW_MAX_TOKENS,
            temperature: prompts::TEMPERATURE,
        })
        .await?;

    info!(
        "Resume suggestions generated ({} tokens)",
        completion.usage.total_tokens
    );

    Ok(Json(SuggestionResponse {
        suggestion: completion.text,
        model: completion.model,
        usage: completion.usage,
    }))
}

/// POST /api/v1/ai/content-suggestions
pub async fn handle_content_suggestions(
    State(state): State<AppState>,
    Json(req): Json<ContentSuggestionsRequest>,
) -> Result<Json<ContentSuggestionResponse>, AppError> {
    let (Some(field), Some(context)) = (
        non_blank(req.field.as_deref()),
        non_blank(req.context.as_deref()),
    ) else {
        return Err(AppError::Validation(
            "Field and context are required".to_string(),
        ));
    };

    let prompt = prompts::content_prompt(
        field,
        context,
        req.job_title.as_deref(),
        req.industry.as_deref(),
    );

    let completion = state
        .completions
        .complete(CompletionRequest {
            system: prompts::CONTENT_SYSTEM.to_string(),
            prompt,
            max_tokens: prompts::CONTENT_MAX_TOKENS,
            temperature: prompts::TEMPERATURE,
        })
        .await?;

    info!("Content suggestion generated for field '{field}'");

    Ok(Json(ContentSuggestionResponse {
        suggestion: completion.text,
        field: field.to_string(),
        model: completion.model,
        usage: completion.usage,
    }))
}

/// POST /api/v1/ai/job-analysis
pub async fn handle_job_analysis(
    State(state): State<AppState>,
    Json(req): Json<JobAnalysisRequest>,
) -> Result<Json<JobAnalysisResponse>, AppError> {
    let Some(job_description) = non_blank(req.job_description.as_deref()) else {
        return Err(AppError::Validation(
            "Job description is required".to_string(),
        ));
    };
    let resume = req.resume_data.as_ref().filter(|v| !v.is_null());

    let completion = state
        .completions
        .complete(CompletionRequest {
            system: prompts::JOB_ANALYSIS_SYSTEM.to_string(),
            prompt: prompts::job_analysis_prompt(job_description, resume),
            max_tokens: prompts::JOB_ANALYSIS_MAX_TOKENS,
            temperature: prompts::TEMPERATURE,
        })
        .await?;

    info!(
        "Job description analyzed ({} chars, resume attached: {})",
        job_description.len(),
        resume.is_some()
    );

    Ok(Json(JobAnalysisResponse {
        analysis: completion.text,
        model: completion.model,
        usage: completion.usage,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(Some(" skills ")), Some("skills"));
    }
}
