//! Video endpoints beyond the shared content handlers.

use actix_web::{HttpResponse, web};

use techhub_core::VideoGateway;
use techhub_core::gateway::RELATED_LIMIT;
use techhub_shared::dto::ListParams;

use crate::state::AppState;

/// GET /api/videos/{id}/related?limit=
pub async fn related(
    state: web::Data<AppState>,
    path: web::Path<String>,
    params: web::Query<ListParams>,
) -> HttpResponse {
    let videos: VideoGateway = state.gateway();
    let limit = params.limit.unwrap_or(RELATED_LIMIT);
    HttpResponse::Ok().json(videos.get_related(&path, limit).await)
}
