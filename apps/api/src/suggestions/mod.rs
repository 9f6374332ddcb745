// AI writing assistance: resume review, field drafting, job description analysis.
// All completions go through the CompletionService held in AppState.

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::llm_client::Usage;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsRequest {
    pub resume_data: Option<Value>,
    pub section: Option<String>,
    pub specific_question: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSuggestionsRequest {
    pub field: Option<String>,
    pub context: Option<String>,
    pub job_title: Option<String>,
    pub industry: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAnalysisRequest {
    pub job_description: Option<String>,
    pub resume_data: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub suggestion: String,
    pub model: String,
    pub usage: Usage,
}

#[derive(Debug, Serialize)]
pub struct ContentSuggestionResponse {
    pub suggestion: String,
    pub field: String,
    pub model: String,
    pub usage: Usage,
}

#[derive(Debug, Serialize)]
pub struct JobAnalysisResponse {
    pub analysis: String,
    pub model: String,
    pub usage: Usage,
}
