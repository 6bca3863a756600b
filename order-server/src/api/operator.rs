//! Operator Extractor
//!
//! Reads the operator performing a mutation from the `x-operator-name` header.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::orders::CommandMetadata;

pub const OPERATOR_HEADER: &str = "x-operator-name";
pub const DEFAULT_OPERATOR: &str = "system";

/// Operator name, `system` when the header is absent or blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator(pub String);

impl Operator {
    /// Command metadata stamped with the current time
    pub fn metadata(&self) -> CommandMetadata {
        CommandMetadata::new(self.0.clone())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Operator {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let name = parts
            .headers
            .get(OPERATOR_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_OPERATOR);
        Ok(Operator(name.to_string()))
    }
}
