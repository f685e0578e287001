use serde::Serialize;
use sqlx::FromRow;

/// Public profile fields attached to listings and applicant rows.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: String,
    pub name: String,
    pub username: String,
    pub profile_picture: Option<String>,
}

/// Fuller profile shown for a job's poster.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub name: String,
    pub username: String,
    pub profile_picture: Option<String>,
    pub headline: Option<String>,
}
