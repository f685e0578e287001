use sqlx::PgConnection;

use crate::pkg::internal::adaptors::applications::spec::{AppliedJob, ApplicationWithApplicant};
use crate::prelude::Result;

pub struct ApplicationSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ApplicationSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ApplicationSelector { pool }
    }

    pub async fn get_for_job(&mut self, job_id: i32) -> Result<Vec<ApplicationWithApplicant>> {
        let rows = sqlx::query_as::<_, ApplicationWithApplicant>(
            "SELECT a.id, u.user_id, u.name, u.username, u.profile_picture,
                    a.resume, a.cover_letter, a.status, a.applied_at
             FROM applications a JOIN users u ON u.user_id = a.applicant_id
             WHERE a.job_id = $1
             ORDER BY a.applied_at, a.id",
        )
        .bind(job_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    /// Every job the user has applied to, with their own application state,
    /// newest job first.
    pub async fn get_applied_jobs(&mut self, user_id: &str) -> Result<Vec<AppliedJob>> {
        let rows = sqlx::query_as::<_, AppliedJob>(
            "SELECT j.id, j.title, j.company, j.location, j.job_type, j.created_at,
                    u.user_id, u.name, u.username, u.profile_picture,
                    a.status, a.applied_at
             FROM applications a
             JOIN jobs j ON j.id = a.job_id
             JOIN users u ON u.user_id = j.posted_by
             WHERE a.applicant_id = $1
             ORDER BY j.created_at DESC, j.id DESC",
        )
        .bind(user_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
