use anyhow::anyhow;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumeDocument, ResumeRecord, ResumeSummary};
use crate::render::render_pdf;
use crate::resumes::validation::prepare_for_save;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Resume {id} not found"))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ResumeSummary>>, AppError> {
    let summaries = state.store.list(params.user_id).await?;
    Ok(Json(summaries))
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    Json(doc): Json<ResumeDocument>,
) -> Result<(StatusCode, Json<ResumeRecord>), AppError> {
    let doc = prepare_for_save(doc)?;
    let record = state.store.create(params.user_id, doc).await?;
    info!("Created resume {} for user {}", record.id, params.user_id);
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumeRecord>, AppError> {
    let record = state
        .store
        .get(params.user_id, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(record))
}

/// PUT /api/v1/resumes/:id
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
    Json(doc): Json<ResumeDocument>,
) -> Result<Json<ResumeRecord>, AppError> {
    let doc = prepare_for_save(doc)?;
    let record = state
        .store
        .update(params.user_id, id, doc)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(record))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete(params.user_id, id).await? {
        return Err(not_found(id));
    }
    info!("Deleted resume {id} for user {}", params.user_id);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/resumes/:id/duplicate
pub async fn handle_duplicate_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<(StatusCode, Json<ResumeRecord>), AppError> {
    let original = state
        .store
        .get(params.user_id, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let mut copy = original.document;
    copy.title = format!("{} (Copy)", copy.title);
    copy.created_at = None;
    copy.last_modified = None;

    let record = state.store.create(params.user_id, copy).await?;
    info!("Duplicated resume {id} as {}", record.id);
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/resumes/:id/pdf
///
/// Renders on the blocking pool under `render_timeout`. A render that overruns
/// is reported as an internal error; the blocking task is left to finish on
/// its own.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Response, AppError> {
    let record = state
        .store
        .get(params.user_id, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let filename = pdf_filename(&record.document.title);
    let geometry = state.page_geometry;
    let document = record.document;
    let task = tokio::task::spawn_blocking(move || render_pdf(&document, &geometry));

    let joined = tokio::time::timeout(state.render_timeout, task)
        .await
        .map_err(|_| {
            AppError::Internal(anyhow!(
                "PDF render for resume {id} exceeded {:?}",
                state.render_timeout
            ))
        })?;
    let rendered = joined.map_err(|e| AppError::Internal(anyhow!("PDF render task failed: {e}")))?;
    let pdf = rendered?;

    info!("Exported resume {id} as PDF ({} bytes)", pdf.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        Bytes::from(pdf),
    )
        .into_response())
}

/// Attachment filename for a resume title. Blank titles become `resume`;
/// characters that cannot sit inside a quoted header value become `_`.
pub fn pdf_filename(title: &str) -> String {
    let title = title.trim();
    let stem: String = if title.is_empty() {
        "resume".to_string()
    } else {
        title
            .chars()
            .map(|c| {
                if c == '"' || c == '\\' || c.is_control() || !c.is_ascii() {
                    '_'
                } else {
                    c
                }
            })
            .collect()
    };
    format!("{stem}.pdf")
}
