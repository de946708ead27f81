use axum::Router;

pub mod blobs;
pub mod health;
pub mod language_centers;
pub mod universities;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Domain routers carry their own resource paths and arrive with state
/// applied, so they are merged rather than nested.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new()
        .merge(universities::router(state))
        .merge(language_centers::router(state))
        .merge(blobs::router(state.upload_policy.clone()))
}

/// `/ready`, checking the database connection.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
