use actix_web::HttpResponse;

use crate::dto::SessionResponse;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/auth/session
///
/// Returns the caller the bearer token authenticates as.
pub async fn current_session(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse {
        subject_id: auth.subject_id(),
        role: auth.role().to_string(),
    })
}
