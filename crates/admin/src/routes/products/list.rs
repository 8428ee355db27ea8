//! Products list page handler.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use tracing::instrument;

use crate::{
    components::data_table::products_table_config,
    filters,
    models::{ListQuery, page_window},
    state::AppState,
};

use super::types::{
    DeleteTargetView, FilterView, PageLinkView, ProductRowView, ProductsQuery, SortHeaderView,
    error_flash, filter_views, sort_headers, success_flash,
};

/// Products list page template with data table support.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub current_path: String,
    /// Data table ID.
    pub table_id: String,
    /// Rendered column headers with sort links.
    pub headers: Vec<SortHeaderView>,
    /// Dropdown filters with their current selections resolved.
    pub table_filters: Vec<FilterView>,
    /// Search input placeholder.
    pub search_placeholder: String,
    /// Empty state copy.
    pub empty_title: String,
    pub empty_description: Option<String>,
    /// Current list state, echoed into form fields and links.
    pub query: ListQuery,
    /// Href for the list in its current state.
    pub current_href: String,
    /// Products to display.
    pub products: Vec<ProductRowView>,
    pub total_products: i64,
    pub total_pages: u32,
    /// Numbered pagination links.
    pub page_links: Vec<PageLinkView>,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    /// Product awaiting delete confirmation, if the dialog is open.
    pub delete_target: Option<DeleteTargetView>,
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Products list page handler.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Html<String> {
    let categories = match state.catalog().fetch_categories().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::error!("Failed to fetch categories: {e}");
            vec![]
        }
    };
    let config = products_table_config(&categories);

    let list = query.list_query();
    let params = list.derive_request_params();

    let (products, total_products, total_pages, fetch_error) =
        match state.catalog().fetch_products(&params).await {
            Ok(page) => {
                let rows: Vec<ProductRowView> =
                    page.products.iter().map(ProductRowView::from).collect();
                (rows, page.total_products, page.total_pages, None)
            }
            Err(e) => {
                tracing::error!("Failed to fetch products: {e}");
                let message = "Failed to load products. Check the logs for details.".to_string();
                (vec![], 0, 0, Some(message))
            }
        };

    // The confirmation dialog only ever names a product on the current page;
    // a stale or unknown ID renders no dialog at all.
    let delete_target = query.confirm_delete.as_ref().and_then(|id| {
        products.iter().find(|row| &row.id == id).map(|row| {
            DeleteTargetView {
                id: row.id.clone(),
                name: row.name.clone(),
                action: format!("/products/{}/delete", row.id),
            }
        })
    });

    let page_links: Vec<PageLinkView> = page_window(list.page, total_pages)
        .into_iter()
        .map(|number| PageLinkView {
            number,
            href: list.page_href(number, total_pages),
            is_current: number == list.page,
        })
        .collect();
    let prev_href = (list.page > 1).then(|| list.page_href(list.page - 1, total_pages));
    let next_href = (list.page < total_pages).then(|| list.page_href(list.page + 1, total_pages));

    let success = query
        .success
        .as_deref()
        .and_then(success_flash)
        .map(str::to_string);
    let error = fetch_error.or_else(|| {
        query
            .error
            .as_deref()
            .and_then(error_flash)
            .map(str::to_string)
    });

    let template = ProductsIndexTemplate {
        current_path: "/products".to_string(),
        table_id: config.table_id.clone(),
        headers: sort_headers(&config.columns, &list),
        table_filters: filter_views(&config.filters, &list),
        search_placeholder: config.search_placeholder,
        empty_title: config.empty_title,
        empty_description: config.empty_description,
        current_href: list.href(),
        query: list,
        products,
        total_products,
        total_pages,
        page_links,
        prev_href,
        next_href,
        delete_target,
        success,
        error,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}
