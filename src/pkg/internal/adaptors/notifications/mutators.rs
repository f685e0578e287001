use sqlx::PgConnection;

use crate::pkg::internal::adaptors::notifications::spec::{NotificationEntry, NotificationKind};
use crate::prelude::Result;

pub struct NotificationMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> NotificationMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        NotificationMutator { pool }
    }

    pub async fn create(
        &mut self,
        recipient: &str,
        kind: NotificationKind,
        related_user: &str,
        related_job: i32,
    ) -> Result<NotificationEntry> {
        let row = sqlx::query_as::<_, NotificationEntry>(
            r#"
            INSERT INTO notifications (recipient, kind, related_user, related_job)
            VALUES ($1, $2, $3, $4)
            RETURNING id, recipient, kind, related_user, related_job, created_at
            "#,
        )
        .bind(recipient)
        .bind(kind)
        .bind(related_user)
        .bind(related_job)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }
}
