//! HTTP handlers and route configuration.

mod blog;
mod follow;
mod health;
mod user;

#[cfg(test)]
mod tests;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // User / auth routes
            .service(
                web::scope("/user")
                    .route("/signup", web::post().to(user::signup))
                    .route("/signin", web::post().to(user::signin))
                    .route("/verify-email", web::get().to(user::verify_email))
                    .route("/me", web::get().to(user::me))
                    .route("/update/profile", web::post().to(user::update_profile))
                    .route(
                        "/update/profile-picture",
                        web::post().to(user::update_profile_picture),
                    ),
            )
            // Follow graph routes
            .service(
                web::scope("/follow")
                    .route("/follow", web::post().to(follow::follow))
                    .route("/recommendations", web::get().to(follow::recommendations))
                    .route("/followers/details", web::get().to(follow::follower_details)),
            )
            // Blog routes ("/get/bulk" must register before "/{id}")
            .service(
                web::scope("/blog")
                    .route("/create", web::post().to(blog::create))
                    .route("/update/{id}", web::put().to(blog::update))
                    .route("/get/bulk", web::get().to(blog::bulk))
                    .route("/{id}", web::get().to(blog::get)),
            ),
    );
}
