use crate::api::AuthApi;
use crate::error::ApiError;
use crate::transport::Transport;

/// Runs `operation`; when it fails with [`ApiError::Unauthorized`], refreshes
/// the session through `auth` and runs it exactly once more.
///
/// A failing refresh surfaces its own error, which is again `Unauthorized`
/// when no refresh token is held. Any other failure of `operation` passes
/// through untouched.
///
/// # Example
///
/// ```ignore
/// use wastehub_client::{retry_once_on_unauthorized, AuthApi, UserApi};
///
/// let auth = AuthApi::new(client.clone());
/// let user = UserApi::new(client.clone());
/// let profile = retry_once_on_unauthorized(&auth, || user.me()).await?;
/// ```
pub async fn retry_once_on_unauthorized<T, R, F, Fut>(
    auth: &AuthApi<T>,
    mut operation: F,
) -> Result<R, ApiError>
where
    T: Transport,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<R, ApiError>>,
{
    match operation().await {
        Err(error) if error.is_unauthorized() => {
            auth.refresh().await?;
            operation().await
        }
        result => result,
    }
}
