//! # clientele-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **customer REST API** under `/rest/customers/`
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into HTTP responses: status code, `Location`
//!   header and a JSON or XML body chosen from `Accept`
//! - Map [`ClienteleError`](clientele_domain::error::ClienteleError) variants
//!   to status codes in a single place ([`error::ApiError`])
//!
//! ## Dependency rule
//! Depends on `clientele-app` (for port traits and services) and
//! `clientele-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod extract;
pub mod router;
pub mod state;
pub mod xml;
