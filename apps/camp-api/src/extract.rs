//! Request body extractor.
//!
//! Handlers take the raw JSON object and hand it to the validation pass in
//! `camp_core::validation`, which reports every field problem at once. Only a
//! body that is not a JSON object at all is rejected here.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde_json::{Map, Value};

use crate::error::ApiError;

pub const BODY_NOT_OBJECT: &str = "Request body must be a JSON object.";

/// A request body parsed as a JSON object.
///
/// No `Content-Type` check is made; the bytes alone decide.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonObject(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::bad_request(BODY_NOT_OBJECT))?;

        JsonObject::parse(&bytes)
    }
}

impl JsonObject {
    /// Parses raw body bytes, for handlers that must look something up first.
    pub fn parse(bytes: &[u8]) -> Result<Self, ApiError> {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Ok(JsonObject(map)),
            _ => Err(ApiError::bad_request(BODY_NOT_OBJECT)),
        }
    }
}

impl std::ops::Deref for JsonObject {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
