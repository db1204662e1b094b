use axum::Router;

use crate::controllers::{AppState, auth, businesses, generators, products, qr};

/// Build every application route.
pub fn build_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::routes())
        .merge(businesses::routes())
        .merge(products::routes())
        .merge(qr::routes())
        .merge(generators::routes())
}
