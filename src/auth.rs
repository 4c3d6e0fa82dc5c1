use crate::errors::AppError;
use crate::state::AppState;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

// The authenticated caller, resolved from an opaque bearer token. Sessions
// are seeded data; this service does not mint or expire them.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthorized)?;
        let token = header.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;

        let data = state.data.lock().await;
        let user_id = data.user_for_token(token).ok_or(AppError::Unauthorized)?;

        Ok(CurrentUser { user_id })
    }
}
