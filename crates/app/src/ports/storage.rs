//! Storage port — repository traits for persistence.

use std::future::Future;

use clientele_domain::customer::Customer;
use clientele_domain::error::ClienteleError;
use clientele_domain::id::CustomerId;

/// Persistence for [`Customer`] records.
///
/// Implementations own uniqueness of `id`; identity checks by name are
/// answered through [`exists_by_first_name`](Self::exists_by_first_name).
pub trait CustomerRepository {
    /// Store a new customer.
    fn create(
        &self,
        customer: Customer,
    ) -> impl Future<Output = Result<Customer, ClienteleError>> + Send;

    fn get_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<Option<Customer>, ClienteleError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Customer>, ClienteleError>> + Send;

    /// Whether any stored customer has exactly this first name.
    fn exists_by_first_name(
        &self,
        first_name: &str,
    ) -> impl Future<Output = Result<bool, ClienteleError>> + Send;

    /// Replace every mutable field of the stored record with the same `id`.
    fn update(
        &self,
        customer: Customer,
    ) -> impl Future<Output = Result<Customer, ClienteleError>> + Send;

    fn delete(&self, id: CustomerId) -> impl Future<Output = Result<(), ClienteleError>> + Send;

    /// Remove every stored customer.
    fn delete_all(&self) -> impl Future<Output = Result<(), ClienteleError>> + Send;
}
