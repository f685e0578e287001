use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    pkg::{
        internal::{
            adaptors::{
                applications::selectors::ApplicationSelector,
                jobs::{
                    mutators::JobMutator,
                    selectors::JobSelector,
                    spec::{JobDetail, JobEntry, JobPatch, JobWithPoster, NewJob, SearchFilter},
                },
                users::selectors::UserSelector,
            },
            auth::User,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::{Error, Result},
};

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobInput {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub salary: Option<String>,
    pub job_type: Option<String>,
}

impl CreateJobInput {
    pub fn validated(self) -> Result<NewJob> {
        let required = |f: Option<String>| {
            f.filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::Validation("Required fields missing".into()))
        };
        let job_type = match self.job_type.filter(|v| !v.is_empty()) {
            Some(v) => v.parse()?,
            None => Default::default(),
        };
        Ok(NewJob {
            title: required(self.title)?,
            company: required(self.company)?,
            location: required(self.location)?,
            description: required(self.description)?,
            requirements: self.requirements.unwrap_or_default(),
            salary: self.salary.filter(|v| !v.trim().is_empty()),
            job_type,
        })
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PatchJobInput {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub salary: Option<String>,
    pub job_type: Option<String>,
    pub is_active: Option<bool>,
}

impl PatchJobInput {
    /// Supplied required text fields must stay non-blank; everything else
    /// passes through. Fields outside the allow-list simply don't exist on
    /// this type.
    pub fn validated(self) -> Result<JobPatch> {
        let non_blank = |f: Option<String>| match f {
            Some(v) if v.trim().is_empty() => {
                Err(Error::Validation("Required fields missing".into()))
            }
            other => Ok(other),
        };
        let job_type = match self.job_type.filter(|v| !v.is_empty()) {
            Some(v) => Some(v.parse()?),
            None => None,
        };
        Ok(JobPatch {
            title: non_blank(self.title)?,
            company: non_blank(self.company)?,
            location: non_blank(self.location)?,
            description: non_blank(self.description)?,
            requirements: self.requirements,
            salary: self.salary,
            job_type,
            is_active: self.is_active,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub query: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Extension(_user): Extension<Arc<User>>,
) -> Result<Json<Vec<JobWithPoster>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let jobs = JobSelector::new(&mut tx).get_active().await?;
    Ok(Json(jobs))
}

pub async fn search(
    State(state): State<AppState>,
    Extension(_user): Extension<Arc<User>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<JobWithPoster>>> {
    let filter = SearchFilter::parse(params.query, params.location, params.job_type)?;
    let mut tx = state.db_pool.begin_txn().await?;
    let jobs = JobSelector::new(&mut tx).search(&filter).await?;
    Ok(Json(jobs))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(_user): Extension<Arc<User>>,
    Path(id): Path<i32>,
) -> Result<Json<JobDetail>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or(Error::NotFound("Job"))?;
    let poster = UserSelector::new(&mut tx)
        .get_profile(&job.posted_by)
        .await?
        .ok_or(Error::NotFound("Job"))?;
    let applications = ApplicationSelector::new(&mut tx).get_for_job(id).await?;
    let saved_by = JobSelector::new(&mut tx).saved_by(id).await?;
    Ok(Json(JobDetail::assemble(job, poster, applications, saved_by)))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Json(input): Json<CreateJobInput>,
) -> Result<(StatusCode, Json<JobEntry>)> {
    let input = input.validated()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobMutator::new(&mut tx).create(&user.user_id, input).await?;
    tx.commit().await?;
    tracing::info!("user {} posted job {}", &user.user_id, job.id);
    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(id): Path<i32>,
    Json(input): Json<PatchJobInput>,
) -> Result<Json<JobEntry>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or(Error::NotFound("Job"))?;
    if job.posted_by != user.user_id {
        return Err(Error::Forbidden("update this job"));
    }
    let patch = input.validated()?;
    let job = JobMutator::new(&mut tx)
        .update(id, patch)
        .await?
        .ok_or(Error::NotFound("Job"))?;
    tx.commit().await?;
    Ok(Json(job))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or(Error::NotFound("Job"))?;
    if job.posted_by != user.user_id {
        return Err(Error::Forbidden("delete this job"));
    }
    JobMutator::new(&mut tx).delete(id).await?;
    tx.commit().await?;
    tracing::info!("user {} deleted job {}", &user.user_id, id);
    Ok(Json(json!({ "message": "Job deleted successfully" })))
}

pub async fn toggle_save(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let mut tx = state.db_pool.begin_txn().await?;
    JobSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or(Error::NotFound("Job"))?;
    let mut jobs = JobMutator::new(&mut tx);
    let message = if jobs.save(id, &user.user_id).await? {
        "Job saved successfully"
    } else {
        jobs.unsave(id, &user.user_id).await?;
        "Job unsaved successfully"
    };
    tx.commit().await?;
    Ok(Json(json!({ "message": message })))
}

pub async fn saved(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
) -> Result<Json<Vec<JobWithPoster>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let jobs = JobSelector::new(&mut tx).get_saved_by(&user.user_id).await?;
    Ok(Json(jobs))
}

pub async fn posted(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
) -> Result<Json<Vec<JobEntry>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let jobs = JobSelector::new(&mut tx)
        .get_posted_by(&user.user_id)
        .await?;
    Ok(Json(jobs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkg::internal::adaptors::jobs::spec::JobType;

    fn full_input() -> CreateJobInput {
        CreateJobInput {
            title: Some("Backend Engineer".into()),
            company: Some("Acme".into()),
            location: Some("Remote".into()),
            description: Some("Build APIs".into()),
            requirements: None,
            salary: None,
            job_type: Some("Remote".into()),
        }
    }

    #[test]
    fn creation_requires_all_four_text_fields() {
        for missing in ["title", "company", "location", "description"] {
            let mut input = full_input();
            match missing {
                "title" => input.title = None,
                "company" => input.company = None,
                "location" => input.location = None,
                _ => input.description = None,
            }
            match input.validated() {
                Err(Error::Validation(msg)) => assert_eq!(msg, "Required fields missing"),
                other => panic!("expected validation error, got {:?}", other.is_ok()),
            }
        }
    }

    #[test]
    fn blank_required_fields_are_missing() {
        let mut input = full_input();
        input.title = Some("   ".into());
        assert!(input.validated().is_err());
    }

    #[test]
    fn creation_defaults_are_applied() {
        let mut input = full_input();
        input.job_type = None;
        let job = input.validated().unwrap();
        assert_eq!(job.job_type, JobType::FullTime);
        assert!(job.requirements.is_empty());
        assert!(job.salary.is_none());
    }

    #[test]
    fn creation_rejects_unknown_job_type() {
        let mut input = full_input();
        input.job_type = Some("Gig".into());
        assert!(input.validated().is_err());
    }

    #[test]
    fn patch_keeps_only_supplied_fields() {
        let patch = PatchJobInput {
            title: Some("Senior Backend Engineer".into()),
            is_active: Some(false),
            ..Default::default()
        }
        .validated()
        .unwrap();
        assert_eq!(patch.title.as_deref(), Some("Senior Backend Engineer"));
        assert_eq!(patch.is_active, Some(false));
        assert!(patch.company.is_none());
        assert!(patch.job_type.is_none());
    }

    #[test]
    fn patch_rejects_blanked_required_fields() {
        let input = PatchJobInput {
            description: Some("".into()),
            ..Default::default()
        };
        assert!(input.validated().is_err());
    }

    #[test]
    fn patch_rejects_unknown_job_type() {
        let input = PatchJobInput {
            job_type: Some("Freelance".into()),
            ..Default::default()
        };
        assert!(input.validated().is_err());
    }
}
