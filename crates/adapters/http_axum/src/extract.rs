//! Request extractors shared by the API handlers.

use std::convert::Infallible;

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// A JSON request body whose decoding failures are reported through
/// [`ApiError`], so every error response has the same shape.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Representation a client asked for through its `Accept` header.
///
/// JSON is the default: it is chosen when the header is absent, when it only
/// lists wildcards, or when it names nothing this API can produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Json,
    Xml,
}

impl Format {
    /// Pick the preferred representation, honouring `q` weights. Among equal
    /// weights an exact media type beats a wildcard, then the first listed wins.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut best: Option<(f32, bool, Self)> = None;
        let ranges = headers
            .get_all(header::ACCEPT)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(','));

        for range in ranges {
            let Some((quality, exact, format)) = Self::rank(range) else {
                continue;
            };
            if quality <= 0.0 {
                continue;
            }
            let better = best.is_none_or(|(best_quality, best_exact, _)| {
                quality > best_quality || (quality >= best_quality && exact && !best_exact)
            });
            if better {
                best = Some((quality, exact, format));
            }
        }

        best.map_or(Self::Json, |(_, _, format)| format)
    }

    fn rank(range: &str) -> Option<(f32, bool, Self)> {
        let mut params = range.split(';').map(str::trim);
        let media = params.next()?.to_ascii_lowercase();
        let (exact, format) = match media.as_str() {
            "application/json" => (true, Self::Json),
            "application/xml" | "text/xml" => (true, Self::Xml),
            "*/*" | "application/*" => (false, Self::Json),
            _ => return None,
        };
        let quality = params
            .find_map(|param| param.strip_prefix("q="))
            .and_then(|q| q.parse::<f32>().ok())
            .unwrap_or(1.0);
        Some((quality, exact, format))
    }
}

impl<S> FromRequestParts<S> for Format
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
