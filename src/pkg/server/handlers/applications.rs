use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    pkg::{
        internal::{
            adaptors::{
                applications::{
                    mutators::ApplicationMutator,
                    selectors::ApplicationSelector,
                    spec::{AppliedJob, ApplicationStatus},
                },
                jobs::selectors::JobSelector,
                notifications::spec::NotificationKind,
            },
            auth::User,
            notify::{self, Event},
        },
        server::state::{AppState, GetTxn},
    },
    prelude::{Error, Result},
};

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApplyInput {
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusInput {
    pub job_id: i32,
    pub application_id: i32,
    pub status: String,
}

pub async fn apply(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(id): Path<i32>,
    Json(input): Json<ApplyInput>,
) -> Result<Json<Value>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or(Error::NotFound("Job"))?;
    ApplicationMutator::new(&mut tx)
        .create(id, &user.user_id, input.resume, input.cover_letter)
        .await?;
    tx.commit().await?;

    tracing::info!("user {} applied to job {}", &user.user_id, id);
    notify::dispatch(
        state.db_pool.clone(),
        Event {
            recipient: job.posted_by,
            kind: NotificationKind::JobApplication,
            related_user: user.user_id.clone(),
            related_job: id,
        },
    );
    Ok(Json(
        json!({ "message": "Job application submitted successfully" }),
    ))
}

pub async fn set_status(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Json(input): Json<StatusInput>,
) -> Result<Json<Value>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(input.job_id)
        .await?
        .ok_or(Error::NotFound("Job"))?;
    if job.posted_by != user.user_id {
        return Err(Error::Forbidden("update application status"));
    }
    let status = input.status.parse::<ApplicationStatus>()?;
    let application = ApplicationMutator::new(&mut tx)
        .set_status(input.application_id, input.job_id, status)
        .await?
        .ok_or(Error::NotFound("Application"))?;
    tx.commit().await?;

    notify::dispatch(
        state.db_pool.clone(),
        Event {
            recipient: application.applicant_id,
            kind: NotificationKind::ApplicationStatus,
            related_user: user.user_id.clone(),
            related_job: input.job_id,
        },
    );
    Ok(Json(
        json!({ "message": "Application status updated successfully" }),
    ))
}

pub async fn mine(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
) -> Result<Json<Vec<AppliedJob>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let applications = ApplicationSelector::new(&mut tx)
        .get_applied_jobs(&user.user_id)
        .await?;
    Ok(Json(applications))
}
