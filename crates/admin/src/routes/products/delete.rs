//! Product delete handler.

use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::instrument;

use marigold_core::ProductId;

use crate::{catalog::CatalogError, models::ListQuery, state::AppState};

/// Delete confirmation form input: the list state to return to.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteFormInput {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub page: Option<String>,
}

/// Confirmed delete handler.
///
/// Always redirects back to the list in the state the dialog was opened
/// from; the outcome only decides the flash message. The redirect never
/// carries `confirm_delete`, so the dialog is closed either way.
#[instrument(skip(state), fields(product_id = %id))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<DeleteFormInput>,
) -> Redirect {
    let product_id = ProductId::new(id);
    let list = ListQuery::from_params(
        input.search,
        input.category,
        input.sort,
        input.dir,
        input.page.as_deref().and_then(|p| p.parse().ok()),
    );

    let flash = match state.catalog().delete_product(&product_id).await {
        Ok(()) => {
            tracing::info!(product_id = %product_id, "Product deleted");
            "success=deleted"
        }
        Err(CatalogError::NotFound(_)) => {
            tracing::warn!(product_id = %product_id, "Delete target already gone");
            "error=not_found"
        }
        Err(e) => {
            tracing::error!(product_id = %product_id, error = %e, "Failed to delete product");
            "error=delete_failed"
        }
    };

    Redirect::to(&format!("{}&{flash}", list.href()))
}
