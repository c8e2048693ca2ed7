//! JWT-based authentication extractor for Axum handlers.

use axum::extract::{FromRequestParts, OriginalUri};
use axum::http::request::Parts;
use crm_core::permissions::Actor;
use crm_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// A request without a valid token is rejected with
/// [`AppError::LoginRequired`], which redirects to the login route and
/// carries the requested path in `next`.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// Names of the groups the user belonged to when the token was issued.
    pub groups: Vec<String>,
    pub is_superuser: bool,
}

impl AuthUser {
    /// The principal the permission checks run against.
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id, self.groups.iter().cloned(), self.is_superuser)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        let Some(token) = token else {
            return Err(login_required(parts));
        };

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            login_required(parts)
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            groups: claims.groups,
            is_superuser: claims.is_superuser,
        })
    }
}

/// Build the login redirect for the request being rejected.
///
/// Nested routers see a stripped URI, so the full path comes from
/// [`OriginalUri`] when it is present.
fn login_required(parts: &Parts) -> AppError {
    let next = parts
        .extensions
        .get::<OriginalUri>()
        .map(|uri| uri.0.path().to_string())
        .unwrap_or_else(|| parts.uri.path().to_string());
    AppError::LoginRequired { next }
}
