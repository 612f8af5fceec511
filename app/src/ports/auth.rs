use async_trait::async_trait;
use progress_tracker_shared::AuthError;

/// Supplies the identity of the signed-in user
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Current user id, or an [`AuthError`] when nobody is signed in
    async fn current_user_id(&self) -> Result<String, AuthError>;
}
