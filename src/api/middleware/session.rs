//! Bearer session middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::CurrentUser;
use crate::errors::AppError;

/// Resolve the caller from the Authorization header.
///
/// A header that is present must hold a valid bearer token; the verified
/// [`CurrentUser`] is then inserted into the request extensions. Requests
/// without the header pass through anonymously and each customer
/// operation decides whether to reject them.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(auth_header) = request.headers().get(AUTHORIZATION).cloned() else {
        return Ok(next.run(request).await);
    };

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .ok_or(AppError::Unauthorized)?;

    let claims = state.sessions.verify_token(token)?;
    request.extensions_mut().insert(CurrentUser::from(claims));

    Ok(next.run(request).await)
}
