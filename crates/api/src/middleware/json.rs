//! JSON body extractor for admin writes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use tfe_core::error::CoreError;
use tfe_core::session::authorize;

use crate::error::AppError;
use crate::middleware::auth::Session;
use crate::state::AppState;

/// An admin session paired with a decoded JSON body.
///
/// The session is checked before the body is read, so an anonymous or
/// non-admin caller gets 401/403 whatever it sent. Body rejections use the
/// `{error, code}` envelope: undecodable JSON is a `VALIDATION_ERROR`, a
/// missing `Content-Type` or unreadable body is a `BAD_REQUEST`.
///
/// ```ignore
/// async fn save(State(state): State<AppState>, AdminJson(session, input): AdminJson<Settings>) { ... }
/// ```
#[derive(Debug)]
pub struct AdminJson<T>(pub Session, pub T);

impl<T> FromRequest<AppState> for AdminJson<T>
where
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let session = Session::from_request_parts(&mut parts, state).await?;
        authorize(session.actor())?;

        let req = Request::from_parts(parts, body);
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        Ok(AdminJson(session, value))
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            AppError::Core(CoreError::Validation(rejection.body_text()))
        }
        other => AppError::BadRequest(other.body_text()),
    }
}
