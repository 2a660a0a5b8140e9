// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The v3 transport: every resource call goes through [`V3Api::request`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use odp_common_config::REDACTED;
use odp_common_http::RetryConfig;
use odp_core::{join_uri, ErrorCode, HttpError, HttpResponse};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::config::{AppContext, Config, ConfigHandle};
use crate::error::{OdpError, Result};
use crate::interceptor::RequestDetail;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Per-call transport options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOptions {
	/// Allow one retry on a gateway failure.
	pub retry: bool,
}

impl Default for RequestOptions {
	fn default() -> Self {
		Self { retry: true }
	}
}

impl RequestOptions {
	pub fn no_retry() -> Self {
		Self { retry: false }
	}
}

/// Where a [`V3Api`] reads its configuration from.
#[derive(Debug, Clone)]
pub(crate) enum ConfigSource {
	/// Resolved once when the client was built.
	Fixed(Arc<Config>),
	/// Follows a handle that may be replaced later.
	Shared(ConfigHandle),
}

impl ConfigSource {
	fn snapshot(&self) -> Arc<Config> {
		match self {
			ConfigSource::Fixed(config) => Arc::clone(config),
			ConfigSource::Shared(handle) => handle.current(),
		}
	}
}

/// Low-level access to any v3 endpoint by path.
#[derive(Debug, Clone)]
pub struct V3Api {
	inner: Arc<V3ApiInner>,
}

#[derive(Debug)]
struct V3ApiInner {
	config: ConfigSource,
	http_client: Client,
	retry_config: RetryConfig,
}

impl V3Api {
	pub(crate) fn new(config: ConfigSource, http_client: Client) -> Self {
		Self {
			inner: Arc::new(V3ApiInner {
				config,
				http_client,
				retry_config: RetryConfig::default(),
			}),
		}
	}

	/// A snapshot of the configuration the next request will use.
	pub fn config(&self) -> Arc<Config> {
		self.inner.config.snapshot()
	}

	pub fn app_context(&self) -> Option<AppContext> {
		self.config().app_context().cloned()
	}

	/// The error the transport raises for a code, with its fixed message.
	pub fn error_for_code(&self, code: ErrorCode) -> HttpError {
		HttpError::for_code(code)
	}

	pub async fn get<T>(&self, path: &str) -> Result<HttpResponse<T>>
	where
		T: DeserializeOwned,
	{
		self
			.request::<T, Value>(Method::GET, path, None, RequestOptions::default())
			.await
	}

	pub async fn post<T, P>(&self, path: &str, payload: &P) -> Result<HttpResponse<T>>
	where
		T: DeserializeOwned,
		P: Serialize + ?Sized,
	{
		self
			.request(Method::POST, path, Some(payload), RequestOptions::default())
			.await
	}

	/// Sends a request and decodes the 2xx body as `T`.
	///
	/// The configuration is read once per call and reused by the retry. The
	/// interceptor, if any, runs on every attempt.
	///
	/// # Errors
	///
	/// - `Non2xx` with the status text as message and the decoded error body
	/// - `Unexpected` for transport failures and undecodable 2xx bodies
	pub async fn request<T, P>(
		&self,
		method: Method,
		path: &str,
		payload: Option<&P>,
		options: RequestOptions,
	) -> Result<HttpResponse<T>>
	where
		T: DeserializeOwned,
		P: Serialize + ?Sized,
	{
		let config = self.config();
		let body = payload
			.map(serde_json::to_string)
			.transpose()
			.map_err(HttpError::unexpected)?;

		let retry_config = if options.retry {
			self.inner.retry_config.clone()
		} else {
			RetryConfig::no_retry()
		};

		let outcome = odp_common_http::retry(&retry_config, || {
			self.attempt(&config, &method, path, body.as_deref())
		})
		.await
		.and_then(|response| response.deserialize::<T>().map_err(OdpError::from));

		if let Err(err) = &outcome {
			if !config.log_requests() {
				error!(
					method = %method,
					path = path,
					code = ?err.code(),
					status = ?err.status(),
					body = ?err.http_error().and_then(HttpError::response).map(|r| &r.data),
					error = %err,
					"ODP API request failed"
				);
			}
		}

		outcome
	}

	async fn attempt(
		&self,
		config: &Config,
		method: &Method,
		path: &str,
		body: Option<&str>,
	) -> Result<HttpResponse<Value>> {
		let url = join_uri(&[config.api_base_path(), path]);
		let detail = RequestDetail {
			method: method.clone(),
			headers: default_headers(config),
			body: body.map(str::to_string),
		};
		let (url, detail) = match config.request_interceptor() {
			Some(interceptor) => interceptor.intercept(&url, &detail),
			None => (url, detail),
		};

		let log_requests = config.log_requests();
		if log_requests {
			debug!(
				method = %detail.method,
				url = %url,
				headers = ?redacted(&detail.headers),
				body = detail.body.as_deref().unwrap_or_default(),
				"ODP API request"
			);
		}

		let mut request = self.inner.http_client.request(detail.method, &url);
		for (name, value) in &detail.headers {
			request = request.header(name.as_str(), value.as_str());
		}
		if let Some(body) = detail.body {
			request = request.body(body);
		}

		let response = request.send().await.map_err(|e| {
			if log_requests {
				debug!(url = %url, error = %e, "ODP API request could not be sent");
			}
			HttpError::unexpected(e)
		})?;

		let status = response.status();
		let status_text = status_text(status);
		let headers = response.headers().clone();

		if status.is_success() {
			let text = response.text().await.map_err(HttpError::unexpected)?;
			let data = if text.trim().is_empty() {
				Value::Null
			} else {
				serde_json::from_str::<Value>(&text).map_err(HttpError::unexpected)?
			};
			if log_requests {
				debug!(status = status.as_u16(), body = %data, "ODP API response");
			}
			return Ok(HttpResponse {
				success: true,
				status,
				status_text,
				headers,
				data,
			});
		}

		let is_json = headers
			.get(CONTENT_TYPE)
			.and_then(|value| value.to_str().ok())
			.is_some_and(|value| value.contains("application/json"));
		let data = error_body(is_json, response.text().await);
		if log_requests {
			debug!(status = status.as_u16(), body = %data, "ODP API response");
		}

		Err(HttpError::non_2xx(HttpResponse {
			success: false,
			status,
			status_text,
			headers,
			data,
		})
		.into())
	}
}

/// The reason phrase, or the numeric code for statuses without one (e.g. 520).
fn status_text(status: StatusCode) -> String {
	match status.canonical_reason() {
		Some(reason) => reason.to_string(),
		None => status.as_str().to_string(),
	}
}

/// Decodes a non-2xx body. Anything that is not JSON is kept as `{"error": text}`.
fn error_body<E: fmt::Display>(is_json: bool, text: std::result::Result<String, E>) -> Value {
	match text {
		Ok(text) if is_json => {
			serde_json::from_str::<Value>(&text).unwrap_or_else(|_| json!({ "error": text }))
		}
		Ok(text) => json!({ "error": text }),
		Err(e) => json!({ "error": format!("failed to read response body: {e}") }),
	}
}

fn default_headers(config: &Config) -> BTreeMap<String, String> {
	BTreeMap::from([
		(CONTENT_TYPE.as_str().to_string(), "application/json".to_string()),
		(API_KEY_HEADER.to_string(), config.api_key().expose().clone()),
	])
}

fn redacted(headers: &BTreeMap<String, String>) -> BTreeMap<&str, &str> {
	headers
		.iter()
		.map(|(name, value)| {
			if name.eq_ignore_ascii_case(API_KEY_HEADER) {
				(name.as_str(), REDACTED)
			} else {
				(name.as_str(), value.as_str())
			}
		})
		.collect()
}
