//! Integration tests for Marigold.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the admin server with catalog credentials in the environment
//! cargo run -p marigold-admin
//!
//! # Run integration tests against it
//! cargo test -p marigold-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `admin_products` - Product list, form, and delete flow tests
//!
//! Every test drives the rendered HTML over HTTP and is ignored by default,
//! so a plain `cargo test` stays hermetic. Point `ADMIN_BASE_URL` at a
//! non-default server to run against a deployed instance.
