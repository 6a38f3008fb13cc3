// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The loan service response envelope and the errors a caller can see.
//!
//! On the wire every response is `{success, data?, message?, errors?}`.
//! [`ApiResponse`] decodes that into a sum type so `data` can only be reached
//! on success.

use crate::estimator::EstimateError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Could not reach the loan service. Please try again later or contact support.";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{}", TRANSPORT_FAILURE_MESSAGE)]
    Transport(#[source] reqwest::Error),
    #[error("{message}")]
    BusinessRejection { message: String, errors: Vec<String> },
    #[error("Product '{0}' was not found")]
    ProductNotFound(String),
    #[error(transparent)]
    Estimate(#[from] EstimateError),
    #[error("Unexpected response from the loan service: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    pub fn rejection(message: impl Into<String>) -> Self {
        ClientError::BusinessRejection {
            message: message.into(),
            errors: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Ok(T),
    /// `success: true` without a payload.
    Empty,
    Rejected {
        message: Option<String>,
        errors: Vec<String>,
    },
}

impl<T> ApiResponse<T> {
    pub fn rejected(message: impl Into<String>) -> Self {
        ApiResponse::Rejected {
            message: Some(message.into()),
            errors: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, ApiResponse::Rejected { .. })
    }

    /// Payload if any. A rejection becomes [`ClientError::BusinessRejection`],
    /// using `fallback` when the service sent no message.
    pub fn into_data(self, fallback: &str) -> Result<Option<T>, ClientError> {
        match self {
            ApiResponse::Ok(data) => Ok(Some(data)),
            ApiResponse::Empty => Ok(None),
            ApiResponse::Rejected { message, errors } => {
                let message = message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| fallback.to_string());
                tracing::warn!(%message, ?errors, "loan service rejected request");
                Err(ClientError::BusinessRejection { message, errors })
            }
        }
    }

    /// Like [`into_data`](Self::into_data) but a missing payload is an error.
    pub fn into_required(self, fallback: &str) -> Result<T, ClientError> {
        self.into_data(fallback)?
            .ok_or_else(|| ClientError::MalformedResponse("success without data".into()))
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    message: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "no_errors")]
    errors: &'a [String],
}

fn no_errors(errors: &&[String]) -> bool {
    errors.is_empty()
}

impl<T> From<Envelope<T>> for ApiResponse<T> {
    fn from(e: Envelope<T>) -> Self {
        match (e.success, e.data) {
            (true, Some(data)) => ApiResponse::Ok(data),
            (true, None) => ApiResponse::Empty,
            (false, _) => ApiResponse::Rejected {
                message: e.message,
                errors: e.errors,
            },
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ApiResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Envelope::<T>::deserialize(deserializer).map(Into::into)
    }
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let env = match self {
            ApiResponse::Ok(data) => EnvelopeRef {
                success: true,
                data: Some(data),
                message: None,
                errors: &[],
            },
            ApiResponse::Empty => EnvelopeRef {
                success: true,
                data: None,
                message: None,
                errors: &[],
            },
            ApiResponse::Rejected { message, errors } => EnvelopeRef {
                success: false,
                data: None,
                message: message.as_deref(),
                errors: errors.as_slice(),
            },
        };
        env.serialize(serializer)
    }
}
