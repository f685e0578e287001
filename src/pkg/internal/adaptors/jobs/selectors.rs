use sqlx::{PgConnection, Postgres, QueryBuilder};

use crate::pkg::internal::adaptors::jobs::spec::{JobEntry, JobWithPoster, SearchFilter};
use crate::prelude::Result;

pub struct JobSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            "SELECT id, title, company, location, description, requirements, salary, job_type, posted_by, is_active, created_at, updated_at
             FROM jobs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_active(&mut self) -> Result<Vec<JobWithPoster>> {
        let rows = sqlx::query_as::<_, JobWithPoster>(
            "SELECT j.id, j.title, j.company, j.location, j.description, j.requirements, j.salary, j.job_type, j.is_active, j.created_at, j.updated_at,
                    u.user_id, u.name, u.username, u.profile_picture
             FROM jobs j JOIN users u ON u.user_id = j.posted_by
             WHERE j.is_active
             ORDER BY j.created_at DESC, j.id DESC",
        )
        .fetch_all(&mut *self.pool)
        .await?;

        Ok(rows)
    }

    /// Active jobs matching every supplied filter: free text against title,
    /// company or description, substring location and exact job type.
    pub async fn search(&mut self, filter: &SearchFilter) -> Result<Vec<JobWithPoster>> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT j.id, j.title, j.company, j.location, j.description, j.requirements, j.salary, j.job_type, j.is_active, j.created_at, j.updated_at,
                    u.user_id, u.name, u.username, u.profile_picture
             FROM jobs j JOIN users u ON u.user_id = j.posted_by
             WHERE j.is_active",
        );
        if let Some(query) = &filter.query {
            let pattern = format!("%{}%", query);
            qb.push(" AND (j.title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR j.company ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR j.description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(location) = &filter.location {
            qb.push(" AND j.location ILIKE ")
                .push_bind(format!("%{}%", location));
        }
        if let Some(job_type) = filter.job_type {
            qb.push(" AND j.job_type = ").push_bind(job_type);
        }
        qb.push(" ORDER BY j.created_at DESC, j.id DESC");

        let rows = qb
            .build_query_as::<JobWithPoster>()
            .fetch_all(&mut *self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_posted_by(&mut self, user_id: &str) -> Result<Vec<JobEntry>> {
        let rows = sqlx::query_as::<_, JobEntry>(
            "SELECT id, title, company, location, description, requirements, salary, job_type, posted_by, is_active, created_at, updated_at
             FROM jobs WHERE posted_by = $1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_saved_by(&mut self, user_id: &str) -> Result<Vec<JobWithPoster>> {
        let rows = sqlx::query_as::<_, JobWithPoster>(
            "SELECT j.id, j.title, j.company, j.location, j.description, j.requirements, j.salary, j.job_type, j.is_active, j.created_at, j.updated_at,
                    u.user_id, u.name, u.username, u.profile_picture
             FROM jobs j
             JOIN saved_jobs s ON s.job_id = j.id
             JOIN users u ON u.user_id = j.posted_by
             WHERE s.user_id = $1 AND j.is_active
             ORDER BY j.created_at DESC, j.id DESC",
        )
        .bind(user_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn saved_by(&mut self, job_id: i32) -> Result<Vec<String>> {
        let rows = sqlx::query_scalar::<_, String>(
            "SELECT user_id FROM saved_jobs WHERE job_id = $1 ORDER BY saved_at",
        )
        .bind(job_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
