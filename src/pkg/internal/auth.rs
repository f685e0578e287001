use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::{
    pkg::server::state::AppState,
    prelude::{Error, Result},
};

/// The acting identity resolved by the auth subsystem's session token.
/// Issuing and verifying tokens lives with that subsystem; this service
/// only looks them up.
#[derive(FromRow, Debug)]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub name: String,
}

impl User {
    pub async fn from_token(state: &AppState, token_str: &str) -> Result<User> {
        let token = token_str.parse::<Uuid>().map_err(|_| Error::Unauthorized)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.user_id, u.username, u.email, u.name
            FROM tokens t
            JOIN users u ON u.user_id = t.user_id
            WHERE t.token = $1 AND t.expiry > now()
            "#,
        )
        .bind(token)
        .fetch_optional(&*state.db_pool)
        .await?
        .ok_or(Error::Unauthorized)?;
        Ok(user)
    }
}
