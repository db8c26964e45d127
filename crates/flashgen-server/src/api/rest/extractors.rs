//! Custom extractors
//!
//! Request bodies are parsed here so that malformed input surfaces as a
//! [`ServerError`] with the usual error body.

use crate::error::ServerError;
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::{request::Parts, HeaderMap},
    Json,
};
use serde_json::Value;
use std::convert::Infallible;

/// Identity used when no forwarding header is present
pub const ANONYMOUS_IDENTITY: &str = "anonymous";

/// Untyped JSON body.
///
/// Accepts any content type; unparseable bytes become
/// [`ServerError::InvalidJson`]. Field validation happens downstream.
pub struct RawJson(pub Value);

#[axum::async_trait]
impl<S> FromRequest<S> for RawJson
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ServerError::InvalidJson)?;

        serde_json::from_slice(&bytes)
            .map(RawJson)
            .map_err(|_| ServerError::InvalidJson)
    }
}

/// Typed JSON extractor with better error messages
pub struct JsonExtractor<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonExtractor<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => {
                let error_message = match rejection {
                    JsonRejection::JsonDataError(err) => {
                        format!("Invalid JSON data: {}", err)
                    }
                    JsonRejection::JsonSyntaxError(err) => {
                        format!("JSON syntax error: {}", err)
                    }
                    JsonRejection::MissingJsonContentType(_) => {
                        "Missing 'Content-Type: application/json' header".to_string()
                    }
                    _ => format!("Failed to parse JSON: {}", rejection),
                };

                Err(ServerError::InvalidRequest(error_message))
            }
        }
    }
}

/// Caller identity for rate limiting
pub struct ClientIdentity(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for ClientIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClientIdentity(identity_from_headers(&parts.headers)))
    }
}

/// First `x-forwarded-for` entry, trimmed, or [`ANONYMOUS_IDENTITY`].
///
/// All callers without the header share one quota.
pub fn identity_from_headers(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|first| !first.is_empty())
        .unwrap_or(ANONYMOUS_IDENTITY)
        .to_string()
}
