mod current_user;
mod handlers;

pub use current_user::{CurrentUser, USER_HEADER};

use axum::routing::{get, post};
use axum::Router;
use circles_app::AppContext;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/posts",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route("/api/posts/{id}", get(handlers::get_post))
        .route(
            "/api/posts/{id}/vote",
            get(handlers::get_vote).post(handlers::cast_vote),
        )
        .route("/api/posts/{id}/click", post(handlers::click_arrow))
        .route("/api/posts/{id}/audit", get(handlers::audit_post))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(ctx)
}
