//! # clientele-domain
//!
//! Pure domain model for the clientele customer registry.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Customers** (people with a server-assigned identity) and their
//!   postal **Addresses**
//! - Define the **validation** capability and the customer field rules
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod customer;
pub mod validation;
