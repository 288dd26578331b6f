use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::service::PlayerService;

pub mod health;
pub mod players;

pub fn router(service: PlayerService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { "Tennis Players API - v1.0" }))
        .route("/health", get(health::health_check))

        // Player endpoints
        .route(
            "/players",
            get(players::list_players)
                .post(players::create_player)
                .put(players::update_player),
        )
        .route(
            "/players/{identifier}",
            get(players::get_player).delete(players::delete_player),
        )

        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(service)
}
