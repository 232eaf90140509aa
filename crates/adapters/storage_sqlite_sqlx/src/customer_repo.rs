//! `SQLite` implementation of [`CustomerRepository`].

use std::future::Future;
use std::str::FromStr;

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use clientele_app::ports::CustomerRepository;
use clientele_domain::customer::{Address, Customer};
use clientele_domain::error::{ClienteleError, ConflictError, NotFoundError};
use clientele_domain::id::CustomerId;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Customer`].
struct Wrapper(Customer);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Customer> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let first_name: String = row.try_get("first_name")?;
        let last_name: Option<String> = row.try_get("last_name")?;
        let date_of_birth: Option<String> = row.try_get("date_of_birth")?;
        let address: Option<String> = row.try_get("address")?;

        let id = CustomerId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let date_of_birth = date_of_birth
            .map(|s| NaiveDate::from_str(&s))
            .transpose()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let address = address
            .map(|s| serde_json::from_str::<Address>(&s))
            .transpose()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Customer {
            id,
            first_name,
            last_name,
            date_of_birth,
            address,
        }))
    }
}

/// Map a failed write, turning a clash on the unique first-name index into a
/// conflict.
fn write_error(err: sqlx::Error, customer: &Customer) -> ClienteleError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => ConflictError {
            entity: "Customer",
            name: customer.first_name.clone(),
        }
        .into(),
        _ => StorageError::from(err).into(),
    }
}

/// Column values shared by insert and update.
struct Columns {
    date_of_birth: Option<String>,
    address: Option<String>,
}

impl Columns {
    fn encode(customer: &Customer) -> Result<Self, StorageError> {
        Ok(Self {
            date_of_birth: customer.date_of_birth.map(|d| d.to_string()),
            address: customer
                .address
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
        })
    }
}

const INSERT: &str = "INSERT INTO customers (id, first_name, last_name, date_of_birth, address) VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM customers WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM customers ORDER BY rowid";
const EXISTS_BY_FIRST_NAME: &str =
    "SELECT EXISTS(SELECT 1 FROM customers WHERE first_name = ?)";
const UPDATE: &str = "UPDATE customers SET first_name = ?, last_name = ?, date_of_birth = ?, address = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM customers WHERE id = ?";
const DELETE_ALL: &str = "DELETE FROM customers";

/// `SQLite`-backed customer repository.
pub struct SqliteCustomerRepository {
    pool: SqlitePool,
}

impl SqliteCustomerRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl CustomerRepository for SqliteCustomerRepository {
    fn create(
        &self,
        customer: Customer,
    ) -> impl Future<Output = Result<Customer, ClienteleError>> + Send {
        let pool = self.pool.clone();
        async move {
            let columns = Columns::encode(&customer)?;
            sqlx::query(INSERT)
                .bind(customer.id.to_string())
                .bind(&customer.first_name)
                .bind(&customer.last_name)
                .bind(columns.date_of_birth)
                .bind(columns.address)
                .execute(&pool)
                .await
                .map_err(|err| write_error(err, &customer))?;

            Ok(customer)
        }
    }

    fn get_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<Option<Customer>, ClienteleError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Customer>, ClienteleError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn exists_by_first_name(
        &self,
        first_name: &str,
    ) -> impl Future<Output = Result<bool, ClienteleError>> + Send {
        let pool = self.pool.clone();
        let first_name = first_name.to_owned();
        async move {
            let exists: i64 = sqlx::query_scalar(EXISTS_BY_FIRST_NAME)
                .bind(first_name)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(exists != 0)
        }
    }

    fn update(
        &self,
        customer: Customer,
    ) -> impl Future<Output = Result<Customer, ClienteleError>> + Send {
        let pool = self.pool.clone();
        async move {
            let columns = Columns::encode(&customer)?;
            let result = sqlx::query(UPDATE)
                .bind(&customer.first_name)
                .bind(&customer.last_name)
                .bind(columns.date_of_birth)
                .bind(columns.address)
                .bind(customer.id.to_string())
                .execute(&pool)
                .await
                .map_err(|err| write_error(err, &customer))?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError {
                    entity: "Customer",
                    id: customer.id.to_string(),
                }
                .into());
            }

            Ok(customer)
        }
    }

    fn delete(&self, id: CustomerId) -> impl Future<Output = Result<(), ClienteleError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn delete_all(&self) -> impl Future<Output = Result<(), ClienteleError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_ALL)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}
