use axum::Router;
use domain_universities::{PgUniversityStore, handlers};
use std::sync::Arc;

pub fn router(state: &crate::state::AppState) -> Router {
    let store = PgUniversityStore::new(state.db.clone());
    handlers::router(Arc::new(store))
}
