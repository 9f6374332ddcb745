use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the `resumes` table and its owner index if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS resumes (
            id             UUID PRIMARY KEY,
            user_id        UUID NOT NULL,
            title          TEXT NOT NULL,
            template       TEXT NOT NULL,
            is_public      BOOLEAN NOT NULL DEFAULT FALSE,
            document       JSONB NOT NULL,
            created_at     TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            last_modified  TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS resumes_user_modified_idx ON resumes (user_id, last_modified DESC)",
    )
    .execute(pool)
    .await?;

    info!("Resume schema ready");
    Ok(())
}
