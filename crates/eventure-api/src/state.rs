use std::sync::Arc;

use tracing::error;

use eventure_core::{CoreError, CredentialStore};
use eventure_db::Database;

use crate::error::ApiError;
use crate::session::SessionIssuer;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub credentials: Arc<dyn CredentialStore>,
    pub sessions: SessionIssuer,
}

/// Run a core operation off the async runtime. SQLite calls and password
/// hashing both block.
pub async fn blocking<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&AppStateInner) -> Result<T, CoreError> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&*state))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(e.into())
        })?
        .map_err(ApiError::from)
}
