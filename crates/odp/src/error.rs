// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use odp_common_config::EnvError;
use odp_common_http::RetryableError;
use odp_core::{ErrorCode, HttpError, TimestampError};
use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by the ODP SDK.
#[derive(Debug, Error)]
pub enum OdpError {
	#[error(transparent)]
	Http(#[from] HttpError),

	#[error("field already exists: {0}")]
	FieldExists(#[source] HttpError),

	#[error("object already exists: {0}")]
	ObjectExists(#[source] HttpError),

	#[error("identifier already exists: {0}")]
	IdentifierExists(#[source] HttpError),

	#[error("relation already exists: {0}")]
	RelationExists(#[source] HttpError),

	#[error("module already enabled: {0}")]
	ModuleAlreadyEnabled(#[source] HttpError),

	#[error("object not found: {0}")]
	ObjectNotFound(#[source] HttpError),

	#[error("schema validation failed: {0}")]
	SchemaValidation(String),

	#[error(transparent)]
	InvalidTimestamp(#[from] TimestampError),

	#[error("invalid configuration: {0}")]
	Config(#[from] EnvError),

	#[error("failed to build HTTP client: {0}")]
	HttpClient(#[source] reqwest::Error),
}

impl OdpError {
	/// The transport error behind this error, if it came from a request.
	pub fn http_error(&self) -> Option<&HttpError> {
		match self {
			OdpError::Http(e)
			| OdpError::FieldExists(e)
			| OdpError::ObjectExists(e)
			| OdpError::IdentifierExists(e)
			| OdpError::RelationExists(e)
			| OdpError::ModuleAlreadyEnabled(e)
			| OdpError::ObjectNotFound(e) => Some(e),
			OdpError::SchemaValidation(_)
			| OdpError::InvalidTimestamp(_)
			| OdpError::Config(_)
			| OdpError::HttpClient(_) => None,
		}
	}

	pub fn code(&self) -> Option<ErrorCode> {
		self.http_error().map(HttpError::code)
	}

	pub fn status(&self) -> Option<StatusCode> {
		self.http_error().and_then(HttpError::status)
	}
}

impl RetryableError for OdpError {
	fn retry_status(&self) -> Option<StatusCode> {
		match self {
			OdpError::Http(e) if e.code() == ErrorCode::Non2xx => e.status(),
			_ => None,
		}
	}
}

pub type Result<T> = std::result::Result<T, OdpError>;

#[cfg(test)]
mod tests {
	use super::*;
	use reqwest::header::HeaderMap;
	use odp_core::HttpResponse;
	use serde_json::json;

	fn non_2xx(status: StatusCode) -> HttpError {
		HttpError::non_2xx(HttpResponse {
			success: false,
			status,
			status_text: status.canonical_reason().unwrap_or_default().to_string(),
			headers: HeaderMap::new(),
			data: json!({"error": "upstream"}),
		})
	}

	#[test]
	fn gateway_errors_are_retryable() {
		let err = OdpError::from(non_2xx(StatusCode::BAD_GATEWAY));
		assert_eq!(err.retry_status(), Some(StatusCode::BAD_GATEWAY));
	}

	#[test]
	fn classified_errors_are_never_retried() {
		let err = OdpError::ObjectNotFound(non_2xx(StatusCode::SERVICE_UNAVAILABLE));
		assert_eq!(err.retry_status(), None);
		assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
	}

	#[test]
	fn batch_limit_has_no_status() {
		let err = OdpError::from(HttpError::for_code(ErrorCode::BatchLimitExceeded));
		assert_eq!(err.code(), Some(ErrorCode::BatchLimitExceeded));
		assert_eq!(err.retry_status(), None);
		assert_eq!(
			err.to_string(),
			"A maximum batch size of 100 is allowed in a single request"
		);
	}

	#[test]
	fn local_errors_expose_no_transport_error() {
		let err = OdpError::SchemaValidation("object name foo must be prefixed with app_".into());
		assert!(err.http_error().is_none());
		assert!(err.code().is_none());
	}

	#[test]
	fn conflict_display_includes_status_text() {
		let err = OdpError::FieldExists(non_2xx(StatusCode::BAD_REQUEST));
		assert_eq!(err.to_string(), "field already exists: Bad Request");
	}
}
