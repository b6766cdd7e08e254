//! HTTP handlers and route configuration.

mod contact;
mod content;
mod health;
mod jobs;
mod posts;
mod preferences;
mod sitemap;
mod trending;
mod videos;


use actix_web::web;

use techhub_core::domain::{Job, Post, Video};

/// Configure all application routes.
///
/// Fixed segments are registered before `/{slug}` and `/{id}` so they are
/// not captured as keys.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/trending", web::get().to(trending::trending))
            .route("/contact", web::post().to(contact::submit))
            .route("/sitemap", web::get().to(sitemap::sitemap))
            // Posts
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("/page", web::get().to(content::page::<Post>))
                    .route("/latest", web::get().to(posts::latest))
                    .route("/featured", web::get().to(posts::featured))
                    .route("/top", web::get().to(content::top::<Post>))
                    .route("/type/{type}", web::get().to(posts::by_type))
                    .route("/{slug}", web::get().to(posts::by_slug))
                    .route("/{slug}/related", web::get().to(posts::related))
                    .route("/{id}/views", web::post().to(content::record_view::<Post>)),
            )
            // Jobs
            .service(
                web::scope("/jobs")
                    .route("", web::get().to(content::list::<Job>))
                    .route("/page", web::get().to(content::page::<Job>))
                    .route("/latest", web::get().to(content::latest::<Job>))
                    .route("/remote", web::get().to(jobs::remote))
                    .route("/top", web::get().to(content::top::<Job>))
                    .route("/{id}", web::get().to(content::by_id::<Job>))
                    .route("/{id}/views", web::post().to(content::record_view::<Job>)),
            )
            // Videos
            .service(
                web::scope("/videos")
                    .route("", web::get().to(content::list::<Video>))
                    .route("/page", web::get().to(content::page::<Video>))
                    .route("/latest", web::get().to(content::latest::<Video>))
                    .route("/top", web::get().to(content::top::<Video>))
                    .route("/{id}", web::get().to(content::by_id::<Video>))
                    .route("/{id}/related", web::get().to(videos::related))
                    .route("/{id}/views", web::post().to(content::record_view::<Video>)),
            )
            // Preferences
            .service(
                web::scope("/preferences")
                    .route("", web::get().to(preferences::get))
                    .route("/theme", web::put().to(preferences::set_theme))
                    .route("/theme/toggle", web::post().to(preferences::toggle_theme))
                    .route("/consent", web::post().to(preferences::save_consent))
                    .route("/consent", web::delete().to(preferences::reset_consent)),
            ),
    );
}
