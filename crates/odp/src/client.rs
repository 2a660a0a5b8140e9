// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The SDK entry point.

use std::sync::Arc;
use std::time::Duration;

use odp_common_config::SecretString;
use odp_core::{
	CustomerPayload, CustomerResponse, EventPayload, EventResponse, GqlResponse, HttpResponse,
	OneOrMany, Payload, PayloadOptions,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use crate::api::object::ObjectResponse;
use crate::api::{self, IdentifierApi, ListsApi, SchemaApi};
use crate::config::{AppContext, Config, ConfigHandle, ConfigOverrides};
use crate::error::{OdpError, Result};
use crate::interceptor::RequestInterceptor;
use crate::transport::{ConfigSource, V3Api};

/// Builder for an [`OdpClient`].
///
/// Anything left unset is resolved from the environment when [`build`](Self::build)
/// is called.
#[derive(Debug, Default)]
pub struct OdpClientBuilder {
	overrides: ConfigOverrides,
	request_timeout: Option<Duration>,
}

impl OdpClientBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the private API key, e.g. `W4WzcEs-ABgXorzY7h1LCQ.secret`.
	pub fn api_key(mut self, key: impl Into<SecretString>) -> Self {
		self.overrides = self.overrides.api_key(key);
		self
	}

	/// Overrides the region derived from the API key.
	///
	/// Example: `https://api.eu1.odp.optimizely.com/v3/`
	pub fn api_base_path(mut self, path: impl Into<String>) -> Self {
		self.overrides = self.overrides.api_base_path(path);
		self
	}

	pub fn request_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
		self.overrides = self.overrides.request_interceptor(interceptor);
		self
	}

	pub fn app_context(mut self, context: AppContext) -> Self {
		self.overrides = self.overrides.app_context(context);
		self
	}

	/// Logs every request and response at debug level.
	pub fn log_requests(mut self, enabled: bool) -> Self {
		self.overrides = self.overrides.log_requests(enabled);
		self
	}

	/// Timeout for each HTTP attempt. Unset means no client-side timeout.
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = Some(timeout);
		self
	}

	pub fn build(self) -> Result<OdpClient> {
		let config = Config::resolve(self.overrides)?;
		OdpClient::from_source(
			ConfigSource::Fixed(Arc::new(config)),
			self.request_timeout,
		)
	}
}

/// Client for the ODP v3 REST API.
///
/// Cheap to clone; clones share one connection pool.
///
/// # Example
///
/// ```no_run
/// use odp::{EventPayload, OdpClient};
///
/// # async fn example() -> odp::Result<()> {
/// let client = OdpClient::builder()
/// 	.api_key("W4WzcEs-ABgXorzY7h1LCQ.secret")
/// 	.build()?;
///
/// client
/// 	.event(
/// 		EventPayload::new("pageview")
/// 			.action("visit")
/// 			.identifier("email", "jane@example.com"),
/// 	)
/// 	.await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OdpClient {
	api: V3Api,
}

impl OdpClient {
	pub fn builder() -> OdpClientBuilder {
		OdpClientBuilder::new()
	}

	/// Creates a client with a fixed, already resolved configuration.
	pub fn new(config: Config) -> Result<Self> {
		Self::from_source(ConfigSource::Fixed(Arc::new(config)), None)
	}

	/// Creates a client that reads `handle` on every request.
	pub fn with_handle(handle: ConfigHandle) -> Result<Self> {
		Self::from_source(ConfigSource::Shared(handle), None)
	}

	fn from_source(config: ConfigSource, request_timeout: Option<Duration>) -> Result<Self> {
		let mut builder = odp_common_http::builder();
		if let Some(timeout) = request_timeout {
			builder = builder.timeout(timeout);
		}
		let http_client = builder.build().map_err(OdpError::HttpClient)?;

		let api = V3Api::new(config, http_client);
		info!(api_base_path = %api.config().api_base_path(), "ODP client initialized");

		Ok(Self { api })
	}

	/// Direct access to any v3 endpoint by path.
	pub fn v3_api(&self) -> &V3Api {
		&self.api
	}

	/// Sends one event or a batch of events.
	pub async fn event(
		&self,
		payload: impl Into<OneOrMany<EventPayload>>,
	) -> Result<HttpResponse<EventResponse>> {
		api::event::event(&self.api, payload).await
	}

	/// Creates or updates customer profiles with the default sanitizer options.
	pub async fn customer(
		&self,
		payload: impl Into<OneOrMany<CustomerPayload>>,
	) -> Result<HttpResponse<CustomerResponse>> {
		self.customer_with(payload, &PayloadOptions::default()).await
	}

	pub async fn customer_with(
		&self,
		payload: impl Into<OneOrMany<CustomerPayload>>,
		opts: &PayloadOptions,
	) -> Result<HttpResponse<CustomerResponse>> {
		api::customer::customer(&self.api, payload, opts).await
	}

	/// Upserts objects of a type, e.g. `products`, with the default sanitizer options.
	pub async fn object(
		&self,
		object_type: &str,
		payload: impl Into<OneOrMany<Payload>>,
	) -> Result<HttpResponse<ObjectResponse>> {
		self
			.object_with(object_type, payload, &PayloadOptions::default())
			.await
	}

	pub async fn object_with(
		&self,
		object_type: &str,
		payload: impl Into<OneOrMany<Payload>>,
		opts: &PayloadOptions,
	) -> Result<HttpResponse<ObjectResponse>> {
		api::object::object(&self.api, object_type, payload, opts).await
	}

	pub async fn graphql<T>(&self, query: &str, variables: Option<&Value>) -> Result<GqlResponse<T>>
	where
		T: DeserializeOwned,
	{
		api::graphql::graphql(&self.api, query, variables).await
	}

	pub fn identifier(&self) -> IdentifierApi<'_> {
		IdentifierApi::new(&self.api)
	}

	pub fn schema(&self) -> SchemaApi<'_> {
		SchemaApi::new(&self.api)
	}

	pub fn list(&self) -> ListsApi<'_> {
		ListsApi::new(&self.api)
	}
}
