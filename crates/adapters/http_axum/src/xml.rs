//! XML response body, the counterpart of [`axum::Json`].

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Serializes `T` with `quick-xml` and sets `Content-Type: application/xml`.
///
/// The root element takes the serde name of `T`.
#[derive(Debug, Clone)]
pub struct Xml<T>(pub T);

impl<T: Serialize> IntoResponse for Xml<T> {
    fn into_response(self) -> Response {
        match quick_xml::se::to_string(&self.0) {
            Ok(body) => (
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/xml"),
                )],
                body,
            )
                .into_response(),
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize XML response");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
