use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, Serialize, sqlx::Type)]
#[sqlx(type_name = "notification_type", rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    JobApplication,
    ApplicationStatus,
}

/// Written for the delivery subsystem to pick up; never read back here.
#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEntry {
    pub id: i32,
    pub recipient: String,
    pub kind: NotificationKind,
    pub related_user: Option<String>,
    pub related_job: Option<i32>,
    pub created_at: DateTime<Utc>,
}
