use actix_web::{web, HttpResponse};

use crate::dto::{LogoutRequest, LogoutResponse};
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the presented access token and, when supplied in the body, the
/// refresh token of the same session.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {access_token}
/// ```
///
/// # Request Body (optional)
///
/// ```json
/// {
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing, malformed, invalid or revoked access token
/// - 410 Gone: Access token expired
pub async fn logout(
    state: web::Data<AppState>,
    auth: AuthContext,
    body: Option<web::Json<LogoutRequest>>,
) -> HttpResponse {
    let refresh_token = body.and_then(|body| body.into_inner().refresh_token);
    state
        .sessions
        .revoke_session(&auth.token, refresh_token.as_deref());

    HttpResponse::Ok().json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    })
}
