use sqlx::PgConnection;

use crate::errors::duplicate_application;
use crate::pkg::internal::adaptors::applications::spec::{ApplicationEntry, ApplicationStatus};
use crate::prelude::Result;

pub struct ApplicationMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ApplicationMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ApplicationMutator { pool }
    }

    /// Inserts the application in `pending`. The unique (job_id, applicant_id)
    /// constraint is the duplicate gate, so a concurrent second submission
    /// fails here rather than racing a read-then-write check.
    pub async fn create(
        &mut self,
        job_id: i32,
        applicant_id: &str,
        resume: Option<String>,
        cover_letter: Option<String>,
    ) -> Result<ApplicationEntry> {
        let row = sqlx::query_as::<_, ApplicationEntry>(
            r#"
            INSERT INTO applications (job_id, applicant_id, resume, cover_letter)
            VALUES ($1, $2, $3, $4)
            RETURNING id, job_id, applicant_id, resume, cover_letter, status, applied_at, updated_at
            "#,
        )
        .bind(job_id)
        .bind(applicant_id)
        .bind(resume)
        .bind(cover_letter)
        .fetch_one(&mut *self.pool)
        .await
        .map_err(duplicate_application)?;
        Ok(row)
    }

    /// Updates the status of an application scoped to its job; `None` when
    /// no such application exists under that job.
    pub async fn set_status(
        &mut self,
        id: i32,
        job_id: i32,
        status: ApplicationStatus,
    ) -> Result<Option<ApplicationEntry>> {
        let row = sqlx::query_as::<_, ApplicationEntry>(
            r#"
            UPDATE applications SET status = $3, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1 AND job_id = $2
            RETURNING id, job_id, applicant_id, resume, cover_letter, status, applied_at, updated_at
            "#,
        )
        .bind(id)
        .bind(job_id)
        .bind(status)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }
}
