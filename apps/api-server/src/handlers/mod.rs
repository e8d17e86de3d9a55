//! HTTP handlers and route configuration.

mod auth;
mod feed;
mod health;

use actix_web::web;

/// Configure all REST routes. The GraphQL endpoint is mounted separately
/// in `main` because it carries the schema as its own app data.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/auth")
                .route("/signup", web::put().to(auth::signup))
                .route("/login", web::post().to(auth::login))
                .route("/status", web::get().to(auth::get_status))
                .route("/status", web::put().to(auth::update_status)),
        )
        .service(
            web::scope("/feed")
                .route("/posts", web::get().to(feed::get_posts))
                .route("/post", web::post().to(feed::create_post))
                .route("/post/{id}", web::get().to(feed::get_post))
                .route("/post/{id}", web::put().to(feed::update_post))
                .route("/post/{id}", web::delete().to(feed::delete_post)),
        );
}
