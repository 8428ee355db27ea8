//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (pings the catalog)
//!
//! GET  /                        - Redirect to the product list
//!
//! # Products (read/write through the catalog API)
//! GET  /products                - Product listing (search, filter, sort, pagination)
//! GET  /products/new            - New product form
//! POST /products/new            - Create product
//! GET  /products/{id}/edit      - Edit product form
//! POST /products/{id}/edit      - Update product
//! POST /products/{id}/delete    - Delete product (from the confirmation dialog)
//! ```
//!
//! Health endpoints are registered in `main` next to the observability
//! layers; everything else lives here.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    response::Redirect,
    routing::{get, post},
};

use crate::state::AppState;

pub mod products;

/// Largest accepted form post, sized for product image uploads.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Build the admin router.
#[must_use]
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/products") }))
        .route("/products", get(products::index))
        .route(
            "/products/new",
            get(products::new_form).post(products::create),
        )
        .route(
            "/products/{id}/edit",
            get(products::edit_form).post(products::update),
        )
        .route("/products/{id}/delete", post(products::destroy))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
