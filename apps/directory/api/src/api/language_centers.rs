use axum::Router;
use domain_language_centers::{PgLanguageCenterStore, handlers};
use std::sync::Arc;

pub fn router(state: &crate::state::AppState) -> Router {
    let store = PgLanguageCenterStore::new(state.db.clone());
    handlers::router(Arc::new(store))
}
