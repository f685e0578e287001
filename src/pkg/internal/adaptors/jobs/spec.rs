use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::pkg::internal::adaptors::applications::spec::ApplicationWithApplicant;
use crate::pkg::internal::adaptors::users::spec::{UserProfile, UserSummary};
use crate::prelude::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_type")]
pub enum JobType {
    #[serde(rename = "Full-time")]
    #[sqlx(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    #[sqlx(rename = "Part-time")]
    PartTime,
    Contract,
    Internship,
    Remote,
}

impl Default for JobType {
    fn default() -> Self {
        JobType::FullTime
    }
}

impl FromStr for JobType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "Full-time" => Ok(JobType::FullTime),
            "Part-time" => Ok(JobType::PartTime),
            "Contract" => Ok(JobType::Contract),
            "Internship" => Ok(JobType::Internship),
            "Remote" => Ok(JobType::Remote),
            _ => Err(Error::Validation("Invalid job type".into())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobEntry {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub salary: Option<String>,
    pub job_type: JobType,
    pub posted_by: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing row with the poster's public profile joined in.
#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobWithPoster {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub salary: Option<String>,
    pub job_type: JobType,
    pub is_active: bool,
    #[sqlx(flatten)]
    pub posted_by: UserSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Single-job view: poster profile, applicant roster and the saved-by set.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub salary: Option<String>,
    pub job_type: JobType,
    pub posted_by: UserProfile,
    pub applications: Vec<ApplicationWithApplicant>,
    pub saved_by: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobDetail {
    pub fn assemble(
        job: JobEntry,
        poster: UserProfile,
        applications: Vec<ApplicationWithApplicant>,
        saved_by: Vec<String>,
    ) -> Self {
        JobDetail {
            id: job.id,
            title: job.title,
            company: job.company,
            location: job.location,
            description: job.description,
            requirements: job.requirements,
            salary: job.salary,
            job_type: job.job_type,
            posted_by: poster,
            applications,
            saved_by,
            is_active: job.is_active,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

/// Validated creation payload, required fields guaranteed non-blank.
#[derive(Debug)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub salary: Option<String>,
    pub job_type: JobType,
}

/// Allow-listed patch. The poster, applications and saves are not
/// expressible through this type, so an update can never touch them.
#[derive(Debug, Default)]
pub struct JobPatch {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub salary: Option<String>,
    pub job_type: Option<JobType>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, PartialEq)]
pub struct SearchFilter {
    pub query: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
}

impl SearchFilter {
    /// Blank filters are treated as absent; a job type outside the enum is
    /// rejected rather than matched against nothing.
    pub fn parse(
        query: Option<String>,
        location: Option<String>,
        job_type: Option<String>,
    ) -> Result<Self, Error> {
        let non_blank = |f: Option<String>| f.filter(|v| !v.trim().is_empty());
        let job_type = match non_blank(job_type) {
            Some(v) => Some(v.parse::<JobType>()?),
            None => None,
        };
        Ok(SearchFilter {
            query: non_blank(query),
            location: non_blank(location),
            job_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_type_round_trips_through_wire_names() {
        assert_eq!(
            serde_json::to_value(JobType::FullTime).unwrap(),
            serde_json::json!("Full-time")
        );
        assert_eq!(
            serde_json::from_value::<JobType>(serde_json::json!("Remote")).unwrap(),
            JobType::Remote
        );
        assert_eq!("Part-time".parse::<JobType>().unwrap(), JobType::PartTime);
        assert_eq!(JobType::default(), JobType::FullTime);
    }

    #[test]
    fn job_type_outside_the_set_is_rejected() {
        assert!("full-time".parse::<JobType>().is_err());
        assert!("Freelance".parse::<JobType>().is_err());
        assert!("".parse::<JobType>().is_err());
    }

    #[test]
    fn blank_filters_are_absent() {
        let filter =
            SearchFilter::parse(Some("".into()), Some("  ".into()), Some("".into())).unwrap();
        assert_eq!(filter, SearchFilter::default());
    }

    #[test]
    fn supplied_filters_are_kept() {
        let filter = SearchFilter::parse(
            Some("engineer".into()),
            Some("NY".into()),
            Some("Remote".into()),
        )
        .unwrap();
        assert_eq!(filter.query.as_deref(), Some("engineer"));
        assert_eq!(filter.location.as_deref(), Some("NY"));
        assert_eq!(filter.job_type, Some(JobType::Remote));
    }

    #[test]
    fn unknown_job_type_filter_is_an_error() {
        assert!(SearchFilter::parse(None, None, Some("Gig".into())).is_err());
    }
}
