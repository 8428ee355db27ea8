//! Catalog API REST client.
//!
//! This module provides a typed client for the catalog backend. Reads are
//! plain JSON; product writes are multipart forms so image uploads travel
//! in the same request as the field data.

use std::sync::Arc;
use std::time::Duration;

use marigold_core::ProductId;
use moka::future::Cache;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use secrecy::ExposeSecret;
use tracing::{debug, instrument};

use crate::config::CatalogApiConfig;

use super::{
    CatalogError,
    types::{Category, ListParams, Product, ProductPage, ProductSubmission},
};

const CATEGORY_CACHE_KEY: &str = "categories";

/// Catalog API client.
///
/// Cheap to clone; all clones share one connection pool and one category
/// cache.
///
/// # Security
///
/// Holds the HIGH PRIVILEGE catalog bearer token. Only use on
/// Tailscale-protected infrastructure.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    /// Categories change rarely; caching them keeps form and filter
    /// rendering off the network.
    categories: Cache<String, Vec<Category>>,
}

/// Error body shape the catalog API uses for failures.
#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Arguments
    ///
    /// * `config` - Catalog API configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &CatalogApiConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let categories = Cache::builder()
            .max_capacity(1)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
                api_key: config.api_key.expose_secret().to_string(),
                categories,
            }),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    fn product_url(&self, id: &ProductId) -> String {
        self.url(&format!("/products/{}", urlencoding::encode(id.as_str())))
    }

    /// Attach auth and send, mapping transport-level failures.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, CatalogError> {
        let response = request.bearer_auth(&self.inner.api_key).send().await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(CatalogError::RateLimited(retry_after));
        }

        if response.status() == StatusCode::UNAUTHORIZED
            || response.status() == StatusCode::FORBIDDEN
        {
            return Err(CatalogError::Unauthorized(
                "Invalid or expired API token".to_string(),
            ));
        }

        Ok(response)
    }

    /// Turn a non-success response into the matching `CatalogError`.
    ///
    /// Callers that give 404 a meaning of its own (`fetch_product_by_id`)
    /// check the status before getting here.
    async fn api_error(response: reqwest::Response) -> CatalogError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .ok()
            .and_then(|body| body.message.or(body.error))
            .unwrap_or_else(|| {
                if text.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                } else {
                    text
                }
            });

        if status == StatusCode::NOT_FOUND {
            return CatalogError::NotFound(message);
        }

        CatalogError::Api {
            status: status.as_u16(),
            message,
        }
    }

    /// Read a success response body as JSON.
    async fn parse_body<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, CatalogError> {
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    // =========================================================================
    // Product methods
    // =========================================================================

    /// Fetch one page of products.
    ///
    /// # Arguments
    ///
    /// * `params` - Page, sort, and filter parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self, params: &ListParams) -> Result<ProductPage, CatalogError> {
        let request = self.inner.client.get(self.url("/products")).query(params);
        let response = self.send(request).await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        Self::parse_body(response).await
    }

    /// Fetch a single product.
    ///
    /// Returns `Ok(None)` when no product exists with this ID, so callers
    /// can render a not-found page instead of an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn fetch_product_by_id(
        &self,
        id: &ProductId,
    ) -> Result<Option<Product>, CatalogError> {
        let request = self.inner.client.get(self.product_url(id));
        let response = self.send(request).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        Ok(Some(Self::parse_body(response).await?))
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the submission or the request fails.
    #[instrument(skip(self, submission), fields(name = %submission.name))]
    pub async fn create_product(
        &self,
        submission: ProductSubmission,
    ) -> Result<Product, CatalogError> {
        let form = build_submission_form(submission)?;
        let request = self.inner.client.post(self.url("/products")).multipart(form);
        let response = self.send(request).await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        Self::parse_body(response).await
    }

    /// Update a product.
    ///
    /// The submission replaces the stored product wholesale. Stored images
    /// whose URLs are absent from `existing_image_urls` are deleted by the
    /// backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the submission or the request fails.
    #[instrument(skip(self, submission), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        submission: ProductSubmission,
    ) -> Result<Product, CatalogError> {
        let form = build_submission_form(submission)?;
        let request = self.inner.client.put(self.product_url(id)).multipart(form);
        let response = self.send(request).await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        Self::parse_body(response).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), CatalogError> {
        let request = self.inner.client.delete(self.product_url(id));
        let response = self.send(request).await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        Ok(())
    }

    // =========================================================================
    // Category methods
    // =========================================================================

    /// Fetch all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogError> {
        // Check cache
        if let Some(categories) = self.inner.categories.get(CATEGORY_CACHE_KEY).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let request = self.inner.client.get(self.url("/categories"));
        let response = self.send(request).await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let categories: Vec<Category> = Self::parse_body(response).await?;

        // Cache the result
        self.inner
            .categories
            .insert(CATEGORY_CACHE_KEY.to_string(), categories.clone())
            .await;

        Ok(categories)
    }
}

// =============================================================================
// Multipart encoding
// =============================================================================

/// Flatten a submission into the text fields of the multipart form.
///
/// Repeated names (`colors`, `sizes`, `tags`, `existingImageUrls`) become
/// repeated parts, which the backend collects into arrays. Optional numerics
/// are omitted entirely when unset so the backend keeps its own defaults;
/// `discountPercentage` is always sent because its blank-means-zero rule is
/// resolved before this point.
fn submission_text_fields(submission: &ProductSubmission) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("name", submission.name.clone()),
        ("description", submission.description.clone()),
        ("richDescription", submission.rich_description.clone()),
        ("brand", submission.brand.clone()),
        ("sku", submission.sku.clone()),
        ("price", submission.price.to_string()),
        ("category", submission.category.to_string()),
        ("stockQuantity", submission.stock_quantity.to_string()),
        ("status", submission.status.as_str().to_string()),
        ("isFeatured", submission.is_featured.to_string()),
        ("onSale", submission.on_sale.to_string()),
        (
            "discountPercentage",
            submission.discount_percentage.to_string(),
        ),
    ];

    if let Some(original_price) = submission.original_price {
        fields.push(("originalPrice", original_price.to_string()));
    }
    if let Some(weight) = submission.weight {
        fields.push(("weight", weight.to_string()));
    }
    if let Some(length) = submission.dimensions.length {
        fields.push(("dimensions[length]", length.to_string()));
    }
    if let Some(width) = submission.dimensions.width {
        fields.push(("dimensions[width]", width.to_string()));
    }
    if let Some(height) = submission.dimensions.height {
        fields.push(("dimensions[height]", height.to_string()));
    }

    for color in &submission.colors {
        fields.push(("colors", color.clone()));
    }
    for size in &submission.sizes {
        fields.push(("sizes", size.clone()));
    }
    for tag in &submission.tags {
        fields.push(("tags", tag.clone()));
    }
    for url in &submission.existing_image_urls {
        fields.push(("existingImageUrls", url.clone()));
    }

    fields
}

/// Build the full multipart form: text fields plus one `images` file part
/// per newly uploaded file.
fn build_submission_form(submission: ProductSubmission) -> Result<Form, CatalogError> {
    let mut form = Form::new();
    for (name, value) in submission_text_fields(&submission) {
        form = form.text(name, value);
    }
    for image in submission.new_images {
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)?;
        form = form.part("images", part);
    }
    Ok(form)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::types::Dimensions;
    use super::*;
    use marigold_core::{CategoryId, ProductStatus};
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn sample_submission() -> ProductSubmission {
        ProductSubmission {
            name: "Garden Trowel".to_string(),
            description: "Hand trowel".to_string(),
            rich_description: "<p>Hand trowel</p>".to_string(),
            brand: "Marigold".to_string(),
            sku: "TRW-01".to_string(),
            price: dec("12.50"),
            original_price: None,
            category: CategoryId::new("cat-1"),
            stock_quantity: 7,
            colors: vec!["Green".to_string(), "Black".to_string()],
            sizes: vec![],
            tags: vec!["garden".to_string()],
            status: ProductStatus::Active,
            is_featured: true,
            on_sale: false,
            discount_percentage: Decimal::ZERO,
            weight: None,
            dimensions: Dimensions::default(),
            existing_image_urls: vec![
                "https://img.test/a.jpg".to_string(),
                "https://img.test/b.jpg".to_string(),
            ],
            new_images: vec![],
        }
    }

    fn values<'a>(fields: &'a [(&'static str, String)], name: &str) -> Vec<&'a str> {
        fields
            .iter()
            .filter(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    #[test]
    fn test_scalar_fields_present() {
        let fields = submission_text_fields(&sample_submission());

        assert_eq!(values(&fields, "name"), vec!["Garden Trowel"]);
        assert_eq!(values(&fields, "price"), vec!["12.50"]);
        assert_eq!(values(&fields, "category"), vec!["cat-1"]);
        assert_eq!(values(&fields, "stockQuantity"), vec!["7"]);
        assert_eq!(values(&fields, "status"), vec!["active"]);
    }

    #[test]
    fn test_booleans_encode_as_true_false() {
        let fields = submission_text_fields(&sample_submission());

        assert_eq!(values(&fields, "isFeatured"), vec!["true"]);
        assert_eq!(values(&fields, "onSale"), vec!["false"]);
    }

    #[test]
    fn test_list_fields_repeat_in_order() {
        let fields = submission_text_fields(&sample_submission());

        assert_eq!(values(&fields, "colors"), vec!["Green", "Black"]);
        assert_eq!(values(&fields, "tags"), vec!["garden"]);
        assert!(values(&fields, "sizes").is_empty());
        assert_eq!(
            values(&fields, "existingImageUrls"),
            vec!["https://img.test/a.jpg", "https://img.test/b.jpg"]
        );
    }

    #[test]
    fn test_unset_optionals_are_omitted() {
        let fields = submission_text_fields(&sample_submission());

        assert!(values(&fields, "originalPrice").is_empty());
        assert!(values(&fields, "weight").is_empty());
        assert!(values(&fields, "dimensions[length]").is_empty());
        // discountPercentage is always sent, zero included
        assert_eq!(values(&fields, "discountPercentage"), vec!["0"]);
    }

    #[test]
    fn test_dimensions_use_bracket_names() {
        let mut submission = sample_submission();
        submission.weight = Some(dec("0.4"));
        submission.dimensions = Dimensions {
            length: Some(dec("30")),
            width: Some(dec("8.5")),
            height: None,
        };

        let fields = submission_text_fields(&submission);

        assert_eq!(values(&fields, "weight"), vec!["0.4"]);
        assert_eq!(values(&fields, "dimensions[length]"), vec!["30"]);
        assert_eq!(values(&fields, "dimensions[width]"), vec!["8.5"]);
        assert!(values(&fields, "dimensions[height]").is_empty());
    }
}
