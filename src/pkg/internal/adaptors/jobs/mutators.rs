use sqlx::{PgConnection, Postgres, QueryBuilder};

use crate::pkg::internal::adaptors::jobs::spec::{JobEntry, JobPatch, NewJob};
use crate::prelude::Result;

pub struct JobMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobMutator { pool }
    }

    pub async fn create(&mut self, posted_by: &str, job: NewJob) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            INSERT INTO jobs (title, company, location, description, requirements, salary, job_type, posted_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, company, location, description, requirements, salary, job_type, posted_by, is_active, created_at, updated_at
            "#,
        )
        .bind(job.title)
        .bind(job.company)
        .bind(job.location)
        .bind(job.description)
        .bind(job.requirements)
        .bind(job.salary)
        .bind(job.job_type)
        .bind(posted_by)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&mut self, id: i32, patch: JobPatch) -> Result<Option<JobEntry>> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE jobs SET updated_at = CURRENT_TIMESTAMP");

        if let Some(title) = patch.title {
            qb.push(", title = ").push_bind(title);
        }
        if let Some(company) = patch.company {
            qb.push(", company = ").push_bind(company);
        }
        if let Some(location) = patch.location {
            qb.push(", location = ").push_bind(location);
        }
        if let Some(description) = patch.description {
            qb.push(", description = ").push_bind(description);
        }
        if let Some(requirements) = patch.requirements {
            qb.push(", requirements = ").push_bind(requirements);
        }
        if let Some(salary) = patch.salary {
            qb.push(", salary = ").push_bind(salary);
        }
        if let Some(job_type) = patch.job_type {
            qb.push(", job_type = ").push_bind(job_type);
        }
        if let Some(is_active) = patch.is_active {
            qb.push(", is_active = ").push_bind(is_active);
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING id, title, company, location, description, requirements, salary, job_type, posted_by, is_active, created_at, updated_at");

        let row = qb
            .build_query_as::<JobEntry>()
            .fetch_optional(&mut *self.pool)
            .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Set-semantics save: true when the membership was added, false when
    /// the user had already saved this job.
    pub async fn save(&mut self, job_id: i32, user_id: &str) -> Result<bool> {
        let result =
            sqlx::query("INSERT INTO saved_jobs (job_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
                .bind(job_id)
                .bind(user_id)
                .execute(&mut *self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn unsave(&mut self, job_id: i32, user_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM saved_jobs WHERE job_id = $1 AND user_id = $2")
            .bind(job_id)
            .bind(user_id)
            .execute(&mut *self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
