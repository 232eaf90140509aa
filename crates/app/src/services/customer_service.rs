//! Customer service — use-cases for managing customers.

use clientele_domain::customer::{Customer, CustomerDetails};
use clientele_domain::error::{ClienteleError, ConflictError, NotFoundError};
use clientele_domain::id::CustomerId;

use crate::ports::CustomerRepository;

/// Application service for customer CRUD operations.
pub struct CustomerService<R> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List all customers.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_customers(&self) -> Result<Vec<Customer>, ClienteleError> {
        self.repo.get_all().await
    }

    /// Look up a customer by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`ClienteleError::NotFound`] when no customer with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_customer(&self, id: CustomerId) -> Result<Customer, ClienteleError> {
        tracing::info!(customer_id = %id, "fetching customer");
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Customer",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Whether a customer with the same identity (first name) is stored.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn customer_exists(&self, customer: &Customer) -> Result<bool, ClienteleError> {
        self.repo.exists_by_first_name(&customer.first_name).await
    }

    /// Register a new customer under a freshly assigned id.
    ///
    /// Validation runs first and reports every broken rule at once; the
    /// duplicate check only runs for valid input.
    ///
    /// # Errors
    ///
    /// Returns [`ClienteleError::Validation`] if any field rule fails,
    /// [`ClienteleError::Conflict`] if a customer with the same first name
    /// exists, or a storage error from the repository.
    pub async fn register_customer(
        &self,
        details: CustomerDetails,
    ) -> Result<Customer, ClienteleError> {
        let customer = Customer::register(details);
        if let Err(err) = customer.validate() {
            tracing::warn!(error = %err, "rejecting invalid customer");
            return Err(err);
        }

        tracing::info!(first_name = %customer.first_name, "creating customer");
        if self.customer_exists(&customer).await? {
            tracing::warn!(
                first_name = %customer.first_name,
                "a customer with this name already exists"
            );
            return Err(ConflictError {
                entity: "Customer",
                name: customer.first_name,
            }
            .into());
        }

        self.repo.create(customer).await
    }

    /// Persist changes to an existing customer.
    ///
    /// No field rules are enforced here; callers load the current record,
    /// [`apply`](Customer::apply) the new details and hand it back.
    ///
    /// # Errors
    ///
    /// Returns [`ClienteleError::NotFound`] when the record disappeared
    /// since it was loaded, [`ClienteleError::Conflict`] when the store
    /// refuses the new first name, or a storage error.
    pub async fn update_customer(&self, customer: Customer) -> Result<Customer, ClienteleError> {
        tracing::info!(customer_id = %customer.id, "updating customer");
        self.repo.update(customer).await
    }

    /// Delete a customer by id after checking that it exists.
    ///
    /// # Errors
    ///
    /// Returns [`ClienteleError::NotFound`] when no customer with `id`
    /// exists, or a storage error from the repository.
    pub async fn delete_customer(&self, id: CustomerId) -> Result<(), ClienteleError> {
        self.get_customer(id).await?;
        tracing::info!(customer_id = %id, "deleting customer");
        self.repo.delete(id).await
    }

    /// Delete every customer. Succeeds on an empty store.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn delete_all_customers(&self) -> Result<(), ClienteleError> {
        tracing::info!("deleting all customers");
        self.repo.delete_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientele_domain::customer::Address;
    use clientele_domain::error::ValidationError;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryCustomerRepo {
        store: Mutex<HashMap<CustomerId, Customer>>,
    }

    impl CustomerRepository for InMemoryCustomerRepo {
        fn create(
            &self,
            customer: Customer,
        ) -> impl Future<Output = Result<Customer, ClienteleError>> + Send {
            let mut store = self.store.lock().unwrap();
            store.insert(customer.id, customer.clone());
            async { Ok(customer) }
        }

        fn get_by_id(
            &self,
            id: CustomerId,
        ) -> impl Future<Output = Result<Option<Customer>, ClienteleError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.get(&id).cloned();
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Customer>, ClienteleError>> + Send {
            let store = self.store.lock().unwrap();
            let result: Vec<Customer> = store.values().cloned().collect();
            async { Ok(result) }
        }

        fn exists_by_first_name(
            &self,
            first_name: &str,
        ) -> impl Future<Output = Result<bool, ClienteleError>> + Send {
            let store = self.store.lock().unwrap();
            let found = store.values().any(|c| c.first_name == first_name);
            async move { Ok(found) }
        }

        fn update(
            &self,
            customer: Customer,
        ) -> impl Future<Output = Result<Customer, ClienteleError>> + Send {
            let mut store = self.store.lock().unwrap();
            store.insert(customer.id, customer.clone());
            async { Ok(customer) }
        }

        fn delete(&self, id: CustomerId) -> impl Future<Output = Result<(), ClienteleError>> + Send {
            let mut store = self.store.lock().unwrap();
            store.remove(&id);
            async { Ok(()) }
        }

        fn delete_all(&self) -> impl Future<Output = Result<(), ClienteleError>> + Send {
            let mut store = self.store.lock().unwrap();
            store.clear();
            async { Ok(()) }
        }
    }

    fn make_service() -> CustomerService<InMemoryCustomerRepo> {
        CustomerService::new(InMemoryCustomerRepo::default())
    }

    fn details(first_name: &str) -> CustomerDetails {
        CustomerDetails {
            first_name: Some(first_name.to_string()),
            last_name: Some("Kolli".to_string()),
            ..CustomerDetails::default()
        }
    }

    #[tokio::test]
    async fn should_register_customer_when_valid() {
        let svc = make_service();

        let created = svc.register_customer(details("Raja")).await.unwrap();

        let fetched = svc.get_customer(created.id).await.unwrap();
        assert_eq!(fetched.first_name, "Raja");
        assert_eq!(fetched.last_name.as_deref(), Some("Kolli"));
    }

    #[tokio::test]
    async fn should_reject_register_when_first_name_is_blank() {
        let svc = make_service();

        let result = svc.register_customer(details(" ")).await;

        match result {
            Err(ClienteleError::Validation(ValidationError::Rejected(violations))) => {
                assert_eq!(violations.to_string(), "First name is required");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(svc.list_customers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_report_validation_before_conflict() {
        let svc = make_service();
        svc.register_customer(details("Raja")).await.unwrap();

        let mut dup = details("Raja");
        dup.last_name = Some(String::new());
        let result = svc.register_customer(dup).await;

        assert!(matches!(result, Err(ClienteleError::Validation(_))));
    }

    #[tokio::test]
    async fn should_return_conflict_when_first_name_already_registered() {
        let svc = make_service();
        svc.register_customer(details("Raja")).await.unwrap();

        let result = svc.register_customer(details("Raja")).await;

        assert!(matches!(result, Err(ClienteleError::Conflict(_))));
        assert_eq!(svc.list_customers().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_return_not_found_when_customer_missing() {
        let svc = make_service();
        let result = svc.get_customer(CustomerId::new()).await;
        assert!(matches!(result, Err(ClienteleError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_all_customers() {
        let svc = make_service();
        svc.register_customer(details("Raja")).await.unwrap();
        svc.register_customer(details("Paul")).await.unwrap();

        let all = svc.list_customers().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn should_update_only_editable_fields() {
        let svc = make_service();
        let created = svc.register_customer(details("Raja")).await.unwrap();

        let mut current = svc.get_customer(created.id).await.unwrap();
        current.apply(CustomerDetails {
            first_name: Some("Rajesh".to_string()),
            last_name: None,
            date_of_birth: None,
            address: Some(Address {
                postcode: Some("LS1 1AA".to_string()),
                ..Address::default()
            }),
        });
        let saved = svc.update_customer(current).await.unwrap();

        assert_eq!(saved.id, created.id);
        let fetched = svc.get_customer(created.id).await.unwrap();
        assert_eq!(fetched.first_name, "Rajesh");
        assert!(fetched.last_name.is_none());
        assert_eq!(
            fetched.address.and_then(|a| a.postcode).as_deref(),
            Some("LS1 1AA")
        );
    }

    #[tokio::test]
    async fn should_delete_customer() {
        let svc = make_service();
        let created = svc.register_customer(details("Raja")).await.unwrap();

        svc.delete_customer(created.id).await.unwrap();

        let result = svc.get_customer(created.id).await;
        assert!(matches!(result, Err(ClienteleError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_missing_customer() {
        let svc = make_service();
        let result = svc.delete_customer(CustomerId::new()).await;
        assert!(matches!(result, Err(ClienteleError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_all_customers_even_when_empty() {
        let svc = make_service();
        svc.delete_all_customers().await.unwrap();

        svc.register_customer(details("Raja")).await.unwrap();
        svc.register_customer(details("Paul")).await.unwrap();
        svc.delete_all_customers().await.unwrap();

        assert!(svc.list_customers().await.unwrap().is_empty());
    }
}
