//! Resume persistence: a pluggable store scoped by owner.
//!
//! Default: `PgResumeStore` (PostgreSQL, document held as JSONB).
//! Every operation takes the owner's `user_id`; a resume belonging to someone
//! else behaves exactly like a missing one.
//!
//! `AppState` holds an `Arc<dyn ResumeStore>`.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumeDocument, ResumeRecord, ResumeRow, ResumeSummary};

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Summaries of every resume the user owns, most recently modified first.
    async fn list(&self, user_id: Uuid) -> Result<Vec<ResumeSummary>, AppError>;

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<ResumeRecord>, AppError>;

    async fn create(&self, user_id: Uuid, document: ResumeDocument)
        -> Result<ResumeRecord, AppError>;

    /// Replaces the document and bumps `lastModified`. `None` if not found.
    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        document: ResumeDocument,
    ) -> Result<Option<ResumeRecord>, AppError>;

    /// Returns whether a resume was deleted.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// The JSONB payload. Timestamps live in their own columns.
fn document_json(document: &ResumeDocument) -> Result<serde_json::Value, AppError> {
    let mut stored = document.clone();
    stored.created_at = None;
    stored.last_modified = None;
    serde_json::to_value(&stored).map_err(|e| AppError::Internal(e.into()))
}

fn into_record(row: ResumeRow) -> Result<ResumeRecord, AppError> {
    let id = row.id;
    ResumeRecord::try_from(row).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("Stored resume {id} is not a valid document: {e}"))
    })
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn list(&self, user_id: Uuid) -> Result<Vec<ResumeSummary>, AppError> {
        let rows = sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE user_id = $1 ORDER BY last_modified DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| into_record(row).map(|r| ResumeSummary::from(&r)))
            .collect()
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<ResumeRecord>, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(into_record).transpose()
    }

    async fn create(
        &self,
        user_id: Uuid,
        document: ResumeDocument,
    ) -> Result<ResumeRecord, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resumes (id, user_id, title, template, is_public, document)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&document.title)
        .bind(document.template.as_str())
        .bind(document.is_public)
        .bind(document_json(&document)?)
        .fetch_one(&self.pool)
        .await?;

        into_record(row)
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        document: ResumeDocument,
    ) -> Result<Option<ResumeRecord>, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            UPDATE resumes
            SET title = $3, template = $4, is_public = $5, document = $6, last_modified = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&document.title)
        .bind(document.template.as_str())
        .bind(document.is_public)
        .bind(document_json(&document)?)
        .fetch_optional(&self.pool)
        .await?;

        row.map(into_record).transpose()
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory (tests)
// ────────────────────────────────────────────────────────────────────────────
