//! Bearer-token session extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tfe_core::error::CoreError;
use tfe_core::session::Actor;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The caller's session, if any.
///
/// A request without an `Authorization` header yields `Session(None)` and
/// the admin service decides whether that is acceptable. A header that is
/// present but malformed, or carries an invalid or expired token, is
/// rejected with 401 before the handler runs.
///
/// ```ignore
/// async fn my_handler(session: Session, State(state): State<AppState>) -> AppResult<...> {
///     state.admin.list_drafts(session.actor()).await?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Session(pub Option<Actor>);

impl Session {
    pub fn actor(&self) -> Option<&Actor> {
        self.0.as_ref()
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get("authorization") else {
            return Ok(Session(None));
        };

        let token = header
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid Authorization format. Expected: Bearer <token>".into(),
                ))
            })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(Session(Some(claims.into_actor())))
    }
}
