use std::sync::Arc;

use sqlx::PgPool;
use tokio::task::JoinHandle;

use crate::pkg::internal::adaptors::notifications::mutators::NotificationMutator;
use crate::pkg::internal::adaptors::notifications::spec::NotificationKind;
use crate::pkg::server::state::GetTxn;
use crate::prelude::Error;

pub struct Event {
    pub recipient: String,
    pub kind: NotificationKind,
    pub related_user: String,
    pub related_job: i32,
}

/// Records a notification on a detached task. The primary mutation has
/// already committed when this runs, so failures are logged and dropped
/// instead of being surfaced to the caller.
pub fn dispatch(pool: Arc<PgPool>, event: Event) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = async {
            let mut tx = pool.begin_txn().await?;
            NotificationMutator::new(&mut tx)
                .create(
                    &event.recipient,
                    event.kind,
                    &event.related_user,
                    event.related_job,
                )
                .await?;
            tx.commit().await?;
            Ok::<(), Error>(())
        }
        .await;
        if let Err(err) = outcome {
            tracing::error!("failed to record notification: {}", err);
        }
    })
}
