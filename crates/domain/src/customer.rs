//! Customer — a person known to the registry, identified by a server-assigned id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ClienteleError;
use crate::id::CustomerId;
use crate::time;
use crate::validation::{Validator, Violations};

/// Postal address attached to a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    pub street: Option<String>,
    pub town: Option<String>,
    pub county: Option<String>,
    pub postcode: Option<String>,
}

/// A registered customer.
///
/// `id` is assigned once at registration; every other field can be
/// replaced through [`Customer::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "customer", rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<Address>,
}

/// The client-editable part of a [`Customer`]: everything except `id`.
///
/// Request bodies deserialize into this type. An `id` sent by the client is
/// not part of it and is dropped during deserialization. A missing or `null`
/// first name is kept as `None` so the validator reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomerDetails {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<Address>,
}

impl Customer {
    /// Create a builder for constructing a [`Customer`].
    #[must_use]
    pub fn builder() -> CustomerBuilder {
        CustomerBuilder::default()
    }

    /// Assign a fresh identifier to `details`. No validation is performed.
    #[must_use]
    pub fn register(details: CustomerDetails) -> Self {
        Self {
            id: CustomerId::new(),
            first_name: details.first_name.unwrap_or_default(),
            last_name: details.last_name,
            date_of_birth: details.date_of_birth,
            address: details.address,
        }
    }

    /// Overwrite the name, date of birth and address; `id` is left untouched.
    pub fn apply(&mut self, details: CustomerDetails) {
        self.first_name = details.first_name.unwrap_or_default();
        self.last_name = details.last_name;
        self.date_of_birth = details.date_of_birth;
        self.address = details.address;
    }

    /// Check every field rule.
    ///
    /// # Errors
    ///
    /// Returns [`ClienteleError::Validation`] listing all broken rules.
    pub fn validate(&self) -> Result<(), ClienteleError> {
        CustomerValidator::default().check(self)?;
        Ok(())
    }
}

/// Field rules for [`Customer`]. An absent first name is stored as empty and
/// fails the same rule as a blank one.
#[derive(Debug, Clone, Copy)]
pub struct CustomerValidator {
    today: NaiveDate,
}

impl Default for CustomerValidator {
    fn default() -> Self {
        Self::as_of(time::today())
    }
}

impl CustomerValidator {
    /// Validator that treats `today` as the current date.
    #[must_use]
    pub fn as_of(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Validator<Customer> for CustomerValidator {
    fn validate(&self, target: &Customer, errors: &mut Violations) {
        if target.first_name.trim().is_empty() {
            errors.push("First name is required");
        }
        if target
            .last_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            errors.push("Last name must not be blank");
        }
        if target.date_of_birth.is_some_and(|dob| dob > self.today) {
            errors.push("Date of birth must be in the past");
        }
        if target
            .address
            .as_ref()
            .and_then(|address| address.postcode.as_deref())
            .is_some_and(|postcode| postcode.trim().is_empty())
        {
            errors.push("Postcode must not be blank");
        }
    }
}

/// Step-by-step builder for [`Customer`].
#[derive(Debug, Default)]
pub struct CustomerBuilder {
    id: Option<CustomerId>,
    first_name: Option<String>,
    last_name: Option<String>,
    date_of_birth: Option<NaiveDate>,
    address: Option<Address>,
}

impl CustomerBuilder {
    #[must_use]
    pub fn id(mut self, id: CustomerId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    #[must_use]
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    #[must_use]
    pub fn date_of_birth(mut self, date_of_birth: NaiveDate) -> Self {
        self.date_of_birth = Some(date_of_birth);
        self
    }

    #[must_use]
    pub fn address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Consume the builder, validate, and return a [`Customer`].
    ///
    /// # Errors
    ///
    /// Returns [`ClienteleError::Validation`] if any field rule fails.
    pub fn build(self) -> Result<Customer, ClienteleError> {
        let customer = Customer {
            id: self.id.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            address: self.address,
        };
        customer.validate()?;
        Ok(customer)
    }
}
