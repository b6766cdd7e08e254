//! XML sitemap endpoint.

use actix_web::{HttpResponse, web};

use techhub_core::sitemap;

use crate::state::AppState;

/// GET /api/sitemap
pub async fn sitemap(state: web::Data<AppState>) -> HttpResponse {
    let posts = state.posts().get_sitemap_entries().await;

    let mut entries = sitemap::static_pages();
    entries.extend(sitemap::article_entries(&posts));

    HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .body(sitemap::render(&state.site_url, &entries))
}
