// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The normalized response envelope and the transport error.

use std::error::Error as StdError;
use std::fmt;

use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::batch::BATCH_LIMIT;
use crate::invalids::{invalids_of, InvalidDetail};

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Machine-checkable classification of an [`HttpError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
	/// A batch write exceeded [`BATCH_LIMIT`]. Raised before any network I/O.
	BatchLimitExceeded,
	/// The API responded with a status outside 200..=299.
	Non2xx,
	/// No usable response: connection failure, unreadable body, serialization failure.
	Unexpected,
}

impl ErrorCode {
	pub fn as_str(&self) -> &'static str {
		match self {
			ErrorCode::BatchLimitExceeded => "BatchLimitExceeded",
			ErrorCode::Non2xx => "Non2xx",
			ErrorCode::Unexpected => "Unexpected",
		}
	}

	/// The fixed message used by [`HttpError::for_code`].
	pub fn default_message(&self) -> String {
		match self {
			ErrorCode::BatchLimitExceeded => {
				format!("A maximum batch size of {BATCH_LIMIT} is allowed in a single request")
			}
			ErrorCode::Non2xx => "Http response was outside 2xx".to_string(),
			ErrorCode::Unexpected => "An unexpected error occurred making the request".to_string(),
		}
	}
}

impl fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A response from a v3 API call.
///
/// `success` is true for 2xx responses. Failed responses travel inside
/// [`HttpError::response`] with `success == false`.
#[derive(Debug, Clone)]
pub struct HttpResponse<T> {
	pub success: bool,
	pub status: StatusCode,
	pub status_text: String,
	pub headers: HeaderMap,
	pub data: T,
}

impl<T> HttpResponse<T> {
	/// Replaces the body while keeping status and headers.
	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> HttpResponse<U> {
		HttpResponse {
			success: self.success,
			status: self.status,
			status_text: self.status_text,
			headers: self.headers,
			data: f(self.data),
		}
	}
}

impl HttpResponse<Value> {
	/// Decodes the JSON body into a typed response.
	pub fn deserialize<T: DeserializeOwned>(self) -> Result<HttpResponse<T>, HttpError> {
		let HttpResponse {
			success,
			status,
			status_text,
			headers,
			data,
		} = self;
		let data = serde_json::from_value(data).map_err(HttpError::unexpected)?;
		Ok(HttpResponse {
			success,
			status,
			status_text,
			headers,
			data,
		})
	}
}

/// Standard 200/202 body returned by most write endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct V3SuccessResponse {
	#[serde(default)]
	pub title: String,
	#[serde(default)]
	pub status: u16,
	#[serde(default)]
	pub timestamp: String,
}

/// The single error type produced by the transport.
#[derive(Error)]
#[error("{message}")]
pub struct HttpError {
	message: String,
	code: ErrorCode,
	response: Option<Box<HttpResponse<Value>>>,
	#[source]
	source: Option<BoxError>,
}

impl HttpError {
	/// Builds an error carrying the fixed message for `code`.
	pub fn for_code(code: ErrorCode) -> Self {
		Self {
			message: code.default_message(),
			code,
			response: None,
			source: None,
		}
	}

	/// Builds a `Non2xx` error from a failed response. The message is the status text.
	pub fn non_2xx(response: HttpResponse<Value>) -> Self {
		Self {
			message: response.status_text.clone(),
			code: ErrorCode::Non2xx,
			response: Some(Box::new(response)),
			source: None,
		}
	}

	/// Builds an `Unexpected` error that keeps the underlying error as its source.
	pub fn unexpected<E>(err: E) -> Self
	where
		E: Into<BoxError>,
	{
		let source = err.into();
		Self {
			message: source.to_string(),
			code: ErrorCode::Unexpected,
			response: None,
			source: Some(source),
		}
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	pub fn code(&self) -> ErrorCode {
		self.code
	}

	pub fn response(&self) -> Option<&HttpResponse<Value>> {
		self.response.as_deref()
	}

	pub fn status(&self) -> Option<StatusCode> {
		self.response.as_ref().map(|r| r.status)
	}

	/// The `detail.invalids` entries of the error body, if any.
	pub fn invalids(&self) -> Vec<InvalidDetail> {
		self
			.response
			.as_ref()
			.map(|r| invalids_of(&r.data))
			.unwrap_or_default()
	}
}

impl fmt::Debug for HttpError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HttpError")
			.field("message", &self.message)
			.field("code", &self.code)
			.field("status", &self.status())
			.field("data", &self.response.as_ref().map(|r| &r.data))
			.field("source", &self.source)
			.finish()
	}
}
