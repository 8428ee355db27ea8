//! Catalog API client (HIGH PRIVILEGE - Tailscale only).
//!
//! # Security
//!
//! **CRITICAL: This module holds the high-privilege catalog API token.**
//!
//! It should ONLY run on Tailscale-protected infrastructure. The token has
//! full write access to:
//! - Products (create, update, delete)
//! - Product images (upload, retain, remove)
//!
//! # Architecture
//!
//! - Plain REST/JSON over `reqwest` (no local database sync)
//! - Product writes go out as multipart forms so image uploads ride along
//! - Category list cached in-process for five minutes
//!
//! # Example
//!
//! ```rust,ignore
//! use marigold_admin::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog)?;
//!
//! // Page through products
//! let page = client.fetch_products(&params).await?;
//!
//! // Look up one product for the edit form
//! let product = client.fetch_product_by_id(&id).await?;
//!
//! // Delete
//! client.delete_product(&id).await?;
//! ```

mod client;
pub mod types;

pub use client::CatalogClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Catalog API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
