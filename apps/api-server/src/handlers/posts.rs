//! Post endpoints beyond the shared content handlers.

use actix_web::{HttpResponse, web};

use techhub_core::domain::PostKind;
use techhub_core::gateway::{LATEST_POSTS_LIMIT, RELATED_LIMIT};
use techhub_shared::dto::{CollectionParams, ListParams};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts?tag= | ?category=
pub async fn list(
    state: web::Data<AppState>,
    params: web::Query<CollectionParams>,
) -> HttpResponse {
    let posts = state.posts();
    let items = match (params.category.as_deref(), params.tag.as_deref()) {
        (Some(category), _) => posts.get_by_category(category).await,
        (None, Some(tag)) => posts.filter_by_tag(tag).await,
        (None, None) => posts.get_all().await,
    };
    HttpResponse::Ok().json(items)
}

/// GET /api/posts/latest?limit=
pub async fn latest(state: web::Data<AppState>, params: web::Query<ListParams>) -> HttpResponse {
    let limit = params.limit.unwrap_or(LATEST_POSTS_LIMIT);
    HttpResponse::Ok().json(state.posts().get_latest_posts(limit).await)
}

/// GET /api/posts/featured
pub async fn featured(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let post = state
        .posts()
        .get_featured()
        .await
        .ok_or_else(|| AppError::NotFound("No posts published yet".to_string()))?;
    Ok(HttpResponse::Ok().json(post))
}

/// GET /api/posts/type/{type}
pub async fn by_type(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let kind = PostKind::parse(&path).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Unknown post type '{}', expected 'article' or 'tutorial'",
            path.as_str()
        ))
    })?;
    Ok(HttpResponse::Ok().json(state.posts().get_by_type(kind).await))
}

/// GET /api/posts/{slug}
pub async fn by_slug(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts()
        .get_by_slug(&path)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Post '{}' not found", path.as_str())))?;
    Ok(HttpResponse::Ok().json(post))
}

/// GET /api/posts/{slug}/related?limit=
pub async fn related(
    state: web::Data<AppState>,
    path: web::Path<String>,
    params: web::Query<ListParams>,
) -> HttpResponse {
    let limit = params.limit.unwrap_or(RELATED_LIMIT);
    HttpResponse::Ok().json(state.posts().get_related(&path, limit).await)
}
