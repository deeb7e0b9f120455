//! Submission sinks: where a finished resume goes.
//!
//! Default: `InMemorySink` (no database needed, used in tests and local runs).
//! With `DATABASE_URL` set: `PgSink`, one JSONB row per submission.
//!
//! `AppState` holds an `Arc<dyn SubmissionSink>`, chosen at startup via config.

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::output::NormalizedOutput;

/// Accepts a normalized resume. Nothing comes back but success or failure.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn accept(&self, session_id: Uuid, output: &NormalizedOutput) -> Result<(), AppError>;
}

#[derive(Default)]
pub struct InMemorySink {
    accepted: RwLock<Vec<(Uuid, NormalizedOutput)>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything accepted so far, oldest first.
    pub async fn accepted(&self) -> Vec<(Uuid, NormalizedOutput)> {
        self.accepted.read().await.clone()
    }
}

#[async_trait]
impl SubmissionSink for InMemorySink {
    async fn accept(&self, session_id: Uuid, output: &NormalizedOutput) -> Result<(), AppError> {
        self.accepted.write().await.push((session_id, output.clone()));
        info!("Stored submission for session {session_id} in memory");
        Ok(())
    }
}

pub struct PgSink {
    pool: PgPool,
}

impl PgSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionSink for PgSink {
    async fn accept(&self, session_id: Uuid, output: &NormalizedOutput) -> Result<(), AppError> {
        let data = serde_json::to_value(output).map_err(anyhow::Error::from)?;
        let id = Uuid::new_v4();

        sqlx::query("INSERT INTO resume_submissions (id, session_id, data) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(session_id)
            .bind(&data)
            .execute(&self.pool)
            .await?;

        info!("Inserted submission {id} for session {session_id}");
        Ok(())
    }
}
