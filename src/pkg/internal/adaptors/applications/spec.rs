use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::pkg::internal::adaptors::jobs::spec::JobType;
use crate::pkg::internal::adaptors::users::spec::UserSummary;
use crate::prelude::Error;

/// Lifecycle of one (job, applicant) pair. Everything past `pending` is set
/// by the job's poster; all three later states are reachable directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ApplicationStatus {
    Pending,
    UnderReview,
    Accepted,
    Rejected,
}

impl FromStr for ApplicationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "pending" => Ok(ApplicationStatus::Pending),
            "under-review" => Ok(ApplicationStatus::UnderReview),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            _ => Err(Error::Validation("Invalid application status".into())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationEntry {
    pub id: i32,
    pub job_id: i32,
    pub applicant_id: String,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Applicant roster row on the single-job view.
#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithApplicant {
    pub id: i32,
    #[sqlx(flatten)]
    pub user: UserSummary,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AppliedJobSummary {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    #[sqlx(flatten)]
    pub posted_by: UserSummary,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// One row of the "my applications" listing: the job plus the caller's
/// own application state, nothing about other applicants.
#[derive(Debug, Serialize, FromRow)]
pub struct AppliedJob {
    #[sqlx(flatten)]
    pub job: AppliedJobSummary,
    #[sqlx(flatten)]
    pub application: ApplicationSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_all_four_states() {
        assert_eq!(
            "pending".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Pending
        );
        assert_eq!(
            "under-review".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::UnderReview
        );
        assert_eq!(
            "accepted".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Accepted
        );
        assert_eq!(
            "rejected".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Rejected
        );
    }

    #[test]
    fn status_outside_the_set_is_rejected() {
        assert!("shortlisted".parse::<ApplicationStatus>().is_err());
        assert!("Accepted".parse::<ApplicationStatus>().is_err());
        assert!("".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(ApplicationStatus::UnderReview).unwrap(),
            serde_json::json!("under-review")
        );
    }
}
