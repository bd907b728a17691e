use actix_web::{web, HttpResponse};

use crate::dto::RefreshTokenRequest;
use crate::handlers::ApiError;
use crate::state::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new token pair. The presented refresh
/// token is revoked, so presenting it again fails.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "token_type": "Bearer",
///     "access_expires_in": 900,
///     "refresh_expires_in": 604800
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Malformed, invalid, revoked or non-refresh token, or unknown subject
/// - 410 Gone: Refresh token expired
/// - 429 Too Many Requests: Refresh attempts from this client exhausted
pub async fn refresh(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, ApiError> {
    let pair = state.sessions.rotate_refresh(&request.refresh_token).await?;
    Ok(HttpResponse::Ok().json(pair))
}
