//! Marigold Core - Shared types library.
//!
//! This crate provides common types used across all Marigold components:
//! - `admin` - Internal catalog administration panel (Tailscale-only)
//! - `integration-tests` - End-to-end tests against a running admin server
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, product status, money helpers, and the
//!   comma-list normalization used by array-typed catalog fields

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
