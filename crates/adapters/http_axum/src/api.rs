//! REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod customers;

use axum::Router;
use axum::routing::get;

use clientele_app::ports::CustomerRepository;

use crate::state::AppState;

/// Collection path; every customer lives under it.
pub const CUSTOMERS_PATH: &str = "/rest/customers/";

/// Build the customer routes.
///
/// | Method | Path | Handler |
/// |---|---|---|
/// | `GET` | `/rest/customers/` | [`customers::list`] |
/// | `POST` | `/rest/customers/` | [`customers::create`] |
/// | `DELETE` | `/rest/customers/` | [`customers::delete_all`] |
/// | `GET` | `/rest/customers/{id}` | [`customers::get`] |
/// | `PUT` | `/rest/customers/{id}` | [`customers::update`] |
/// | `DELETE` | `/rest/customers/{id}` | [`customers::delete`] |
pub fn routes<CR>() -> Router<AppState<CR>>
where
    CR: CustomerRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            CUSTOMERS_PATH,
            get(customers::list::<CR>)
                .post(customers::create::<CR>)
                .delete(customers::delete_all::<CR>),
        )
        .route(
            "/rest/customers/{id}",
            get(customers::get::<CR>)
                .put(customers::update::<CR>)
                .delete(customers::delete::<CR>),
        )
}
