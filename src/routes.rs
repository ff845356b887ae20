use axum::{
    http::HeaderValue,
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::SecurityConfig;
use crate::handlers::{protected, public};
use crate::middleware::identity_gate;
use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    let seed_routes = state.config.api.enable_seed_routes;

    Router::new()
        // Public
        .route("/", get(public::system::root))
        .route("/health", get(public::system::health))
        .merge(auth_public_routes(seed_routes))
        .merge(avatar_routes(seed_routes))
        .merge(review_public_routes())
        .merge(movie_routes())
        // Protected
        .merge(protected_routes(&state))
        // Global middleware
        .layer(cors_layer(&state.config.security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_public_routes(seed_routes: bool) -> Router<AppState> {
    use public::auth;

    let router = Router::new()
        .route("/api/auth/health", get(auth::health_get))
        .route("/api/auth/register", post(auth::register_post))
        .route("/api/auth/login", post(auth::login_post));

    if seed_routes {
        router.route(
            "/api/auth/seed",
            get(auth::seed_test_user).post(auth::seed_test_user),
        )
    } else {
        router
    }
}

fn avatar_routes(seed_routes: bool) -> Router<AppState> {
    use public::avatars;

    let router = Router::new().route("/api/avatars", get(avatars::avatars_get));

    if seed_routes {
        router.route("/api/avatars/seed", post(avatars::avatars_seed))
    } else {
        router
    }
}

fn review_public_routes() -> Router<AppState> {
    use public::reviews;

    Router::new()
        .route("/api/reviews", get(reviews::reviews_get))
        .route("/api/reviews/recent", get(reviews::recent_get))
}

fn movie_routes() -> Router<AppState> {
    use public::movies;

    Router::new()
        .route("/api/movies/popular", get(movies::popular_get))
        .route("/api/movies/:id", get(movies::movie_get))
        .route("/api/movies/:id/credits", get(movies::credits_get))
        .route("/api/movies/:id/similar", get(movies::similar_get))
        .route(
            "/api/movies/:id/watch/providers",
            get(movies::watch_providers_get),
        )
        .route("/api/movies/:id/videos", get(movies::videos_get))
        .route("/api/search", get(movies::search_get))
}

/// Everything behind the identity gate. The gate is a route layer, so paths
/// shared with public routes (`/api/reviews`) keep their public methods open.
fn protected_routes(state: &AppState) -> Router<AppState> {
    use protected::{auth, favorites, reviews};

    Router::new()
        .route("/api/auth/me", get(auth::me_get).put(auth::me_put))
        .route(
            "/api/favorites",
            get(favorites::favorites_get).post(favorites::favorites_post),
        )
        .route("/api/favorites/:movieId", delete(favorites::favorites_delete))
        .route("/api/reviews", post(reviews::review_post))
        .route("/api/reviews/my-reviews", get(reviews::my_reviews_get))
        .route_layer(middleware::from_fn_with_state(state.clone(), identity_gate))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
