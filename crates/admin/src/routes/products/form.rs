//! Product create and edit form handlers.
//!
//! Both pages render the same form template. Validation failures and
//! catalog rejections re-render the form with the typed values intact;
//! only a successful save navigates away.

use askama::Template;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::instrument;

use marigold_core::{ProductId, ProductStatus};

use crate::{
    catalog::UploadedImage,
    error::AppError,
    filters,
    models::{PostedProductForm, ProductForm},
    state::AppState,
};

/// One option in the form's category select.
#[derive(Debug, Clone)]
pub struct CategoryOptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// One option in the form's status select.
#[derive(Debug, Clone)]
pub struct StatusOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Product form template, shared by the create and edit pages.
#[derive(Template)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub current_path: String,
    pub page_title: String,
    /// Form action for the saving POST.
    pub action: String,
    pub form: ProductForm,
    pub category_options: Vec<CategoryOptionView>,
    pub status_options: Vec<StatusOptionView>,
    pub back_href: String,
    pub is_edit: bool,
}

/// Terminal view for a product that no longer exists.
#[derive(Template)]
#[template(path = "products/not_found.html")]
pub struct ProductNotFoundTemplate {
    pub current_path: String,
    pub back_href: String,
}

/// New product page handler.
#[instrument(skip(state))]
pub async fn new_form(State(state): State<AppState>) -> Html<String> {
    let form = ProductForm::blank();
    let template = build_form_template(&state, "New product", "/products/new", form, false).await;
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

/// Edit product page handler.
#[instrument(skip(state), fields(product_id = %id))]
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let product_id = ProductId::new(id);

    match state.catalog().fetch_product_by_id(&product_id).await {
        Ok(Some(product)) => {
            let mut form = ProductForm::new();
            form.populate(&product);
            let action = format!("/products/{product_id}/edit");
            let template =
                build_form_template(&state, "Edit product", &action, form, true).await;
            Html(template.render().unwrap_or_else(|e| {
                tracing::error!("Template render error: {}", e);
                "Internal Server Error".to_string()
            }))
            .into_response()
        }
        Ok(None) => not_found_response(),
        Err(e) => {
            tracing::error!(product_id = %product_id, error = %e, "Failed to fetch product");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch product").into_response()
        }
    }
}

/// Create product handler.
#[instrument(skip(state, multipart))]
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let posted = read_form(multipart).await?;
    let mut form = ProductForm::from_posted(posted);

    if !form.validate() {
        let template =
            build_form_template(&state, "New product", "/products/new", form, false).await;
        return render_form(&template);
    }

    let submission = form.build_submission();
    form.start_submit();
    match state.catalog().create_product(submission).await {
        Ok(product) => {
            form.complete_submit();
            tracing::info!(product_id = %product.id, "Product created");
            Ok(Redirect::to("/products?success=created").into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create product");
            form.fail_submit(format!("Failed to create product: {e}"));
            let template =
                build_form_template(&state, "New product", "/products/new", form, false).await;
            render_form(&template)
        }
    }
}

/// Update product handler.
#[instrument(skip(state, multipart), fields(product_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let product_id = ProductId::new(id);
    let posted = read_form(multipart).await?;
    let mut form = ProductForm::from_posted(posted);
    let action = format!("/products/{product_id}/edit");

    if !form.validate() {
        let template = build_form_template(&state, "Edit product", &action, form, true).await;
        return render_form(&template);
    }

    let submission = form.build_submission();
    form.start_submit();
    match state.catalog().update_product(&product_id, submission).await {
        Ok(_) => {
            form.complete_submit();
            tracing::info!(product_id = %product_id, "Product updated");
            Ok(Redirect::to("/products?success=updated").into_response())
        }
        Err(e) => {
            tracing::error!(product_id = %product_id, error = %e, "Failed to update product");
            form.fail_submit(format!("Failed to update product: {e}"));
            let template = build_form_template(&state, "Edit product", &action, form, true).await;
            render_form(&template)
        }
    }
}

/// Collect the posted multipart fields into a `PostedProductForm`.
///
/// Field names match the catalog payload names. Repeated fields accumulate;
/// unchecked checkboxes simply never arrive. Browsers post one empty file
/// part for an untouched file input, which is skipped.
async fn read_form(mut multipart: Multipart) -> Result<PostedProductForm, AppError> {
    let mut posted = PostedProductForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed form upload: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "images" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read image upload: {e}")))?;
            if file_name.is_empty() || bytes.is_empty() {
                continue;
            }
            posted.new_images.push(UploadedImage {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read form field: {e}")))?;
        match name.as_str() {
            "name" => posted.name = value,
            "description" => posted.description = value,
            "richDescription" => posted.rich_description = value,
            "brand" => posted.brand = value,
            "sku" => posted.sku = value,
            "price" => posted.price = value,
            "originalPrice" => posted.original_price = value,
            "discountPercentage" => posted.discount_percentage = value,
            "stockQuantity" => posted.stock_quantity = value,
            "weight" => posted.weight = value,
            "length" => posted.length = value,
            "width" => posted.width = value,
            "height" => posted.height = value,
            "category" => posted.category = value,
            "colors" => posted.colors = value,
            "sizes" => posted.sizes = value,
            "tags" => posted.tags = value,
            "status" => posted.status = value,
            "isFeatured" => posted.is_featured = value == "true",
            "onSale" => posted.on_sale = value == "true",
            "existingImageUrls" => posted.existing_image_urls.push(value),
            "removeImages" => posted.remove_images.push(value),
            _ => {}
        }
    }

    Ok(posted)
}

/// Assemble the form template, fetching categories for the select.
///
/// A category fetch failure degrades to an empty select rather than
/// blocking the form.
async fn build_form_template(
    state: &AppState,
    page_title: &str,
    action: &str,
    form: ProductForm,
    is_edit: bool,
) -> ProductFormTemplate {
    let categories = match state.catalog().fetch_categories().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::error!("Failed to fetch categories: {e}");
            vec![]
        }
    };

    let category_options = categories
        .iter()
        .map(|category| CategoryOptionView {
            value: category.id.to_string(),
            label: category.name.clone(),
            selected: category.id.as_str() == form.category,
        })
        .collect();
    let status_options = ProductStatus::ALL
        .iter()
        .map(|status| StatusOptionView {
            value: status.as_str(),
            label: status.label(),
            selected: *status == form.status,
        })
        .collect();

    ProductFormTemplate {
        current_path: "/products".to_string(),
        page_title: page_title.to_string(),
        action: action.to_string(),
        form,
        category_options,
        status_options,
        back_href: "/products".to_string(),
        is_edit,
    }
}

/// Render the form template inside a POST handler, where a render failure
/// becomes an error response instead of a fallback page.
fn render_form(template: &ProductFormTemplate) -> Result<Response, AppError> {
    let body = template
        .render()
        .map_err(|e| AppError::Internal(format!("Template render error: {e}")))?;
    Ok(Html(body).into_response())
}

fn not_found_response() -> Response {
    let template = ProductNotFoundTemplate {
        current_path: "/products".to_string(),
        back_href: "/products".to_string(),
    };
    let body = template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Product not found".to_string()
    });
    (StatusCode::NOT_FOUND, Html(body)).into_response()
}
