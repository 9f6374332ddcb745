use std::sync::Arc;
use std::time::Duration;

use crate::llm_client::CompletionService;
use crate::render::PageGeometry;
use crate::resumes::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable resume store. Default: PgResumeStore.
    pub store: Arc<dyn ResumeStore>,
    /// Pluggable completion service. `LlmClient` when OPENAI_API_KEY is set,
    /// `DisabledCompletions` otherwise.
    pub completions: Arc<dyn CompletionService>,
    /// Page size and margins for PDF export. A4 with 50pt margins.
    pub page_geometry: PageGeometry,
    /// Upper bound on a single PDF render.
    pub render_timeout: Duration,
}
