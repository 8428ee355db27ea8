//! Marigold Admin library.
//!
//! This crate provides the admin functionality as a library,
//! allowing it to be tested and reused.
//!
//! # Security
//!
//! This crate contains HIGH PRIVILEGE access:
//! - Catalog API write token (create, update, delete products)
//!
//! Only deploy on Tailscale-protected infrastructure.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod routes;
pub mod state;
