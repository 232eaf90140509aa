//! # clientele-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `CustomerRepository` — CRUD plus identity lookup for customers
//! - Define **driving/inbound ports** as use-case structs:
//!   - `CustomerService` — list, get, register, update, remove, clear
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `clientele-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
