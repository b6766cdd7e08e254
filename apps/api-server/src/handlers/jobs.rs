//! Job endpoints beyond the shared content handlers.

use actix_web::{HttpResponse, web};

use techhub_core::JobGateway;

use crate::state::AppState;

/// GET /api/jobs/remote
pub async fn remote(state: web::Data<AppState>) -> HttpResponse {
    let jobs: JobGateway = state.gateway();
    HttpResponse::Ok().json(jobs.get_remote().await)
}
