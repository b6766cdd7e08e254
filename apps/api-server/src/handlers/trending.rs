//! Trending topics endpoint.

use actix_web::{HttpResponse, web};

use techhub_core::TrendingAggregator;
use techhub_shared::dto::ListParams;

use crate::state::AppState;

/// GET /api/trending?limit=
pub async fn trending(state: web::Data<AppState>, params: web::Query<ListParams>) -> HttpResponse {
    let limit = params.limit.unwrap_or(TrendingAggregator::DEFAULT_LIMIT);
    HttpResponse::Ok().json(state.trending().fetch_trending(limit).await)
}
