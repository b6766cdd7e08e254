//! Handlers shared by every content table, instantiated per entity when
//! routes are registered.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use techhub_core::domain::{ContentEntity, DEFAULT_PAGE_SIZE, PageRequest};
use techhub_shared::dto::{AcceptedResponse, CollectionParams, ListParams, PageParams};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Default `?limit=` for top-by-views lists.
pub const TOP_LIMIT: usize = 10;

/// GET /api/{table}?tag=
pub async fn list<E: ContentEntity + Serialize>(
    state: web::Data<AppState>,
    params: web::Query<CollectionParams>,
) -> HttpResponse {
    let gateway = state.gateway::<E>();
    let items = match params.tag.as_deref() {
        Some(tag) => gateway.filter_by_tag(tag).await,
        None => gateway.get_all().await,
    };
    HttpResponse::Ok().json(items)
}

/// GET /api/{table}/page?page=&pageSize=&q=
pub async fn page<E: ContentEntity + Serialize>(
    state: web::Data<AppState>,
    params: web::Query<PageParams>,
) -> HttpResponse {
    let request = PageRequest::new(
        params.page.unwrap_or(1),
        params.page_size.unwrap_or(DEFAULT_PAGE_SIZE as i64),
    );
    let page = state
        .gateway::<E>()
        .get_paginated(request, params.q.as_deref())
        .await;
    HttpResponse::Ok().json(page)
}

/// GET /api/{table}/latest?limit=
pub async fn latest<E: ContentEntity + Serialize>(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> HttpResponse {
    let limit = params.limit.unwrap_or(E::DEFAULT_LIMIT);
    HttpResponse::Ok().json(state.gateway::<E>().get_latest(limit).await)
}

/// GET /api/{table}/top?limit=
pub async fn top<E: ContentEntity + Serialize>(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> HttpResponse {
    let limit = params.limit.unwrap_or(TOP_LIMIT);
    HttpResponse::Ok().json(state.gateway::<E>().get_top_by_views(limit).await)
}

/// GET /api/{table}/{id}
pub async fn by_id<E: ContentEntity + Serialize>(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let item = state
        .gateway::<E>()
        .get_by_id(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("{} {} not found", E::KIND, id)))?;
    Ok(HttpResponse::Ok().json(item))
}

/// POST /api/{table}/{id}/views
pub async fn record_view<E: ContentEntity>(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    state.gateway::<E>().increment_views(&path).await;
    HttpResponse::Accepted().json(AcceptedResponse { accepted: true })
}
