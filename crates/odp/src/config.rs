// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration resolution.
//!
//! A [`Config`] is resolved from explicit [`ConfigOverrides`] layered over the
//! environment. Once resolved it is immutable. Shared, swappable configuration
//! goes through a [`ConfigHandle`].

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use odp_common_config::{env_flag, load_env, load_secret_env, EnvSource, ProcessEnv, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::interceptor::RequestInterceptor;

pub const DEFAULT_API_BASE_PATH: &str = "https://api.zaius.com/v3/";
pub const EU1_API_BASE_PATH: &str = "https://api.eu1.odp.optimizely.com/v3/";
pub const AU1_API_BASE_PATH: &str = "https://api.au1.odp.optimizely.com/v3/";

/// API key variables, current name first.
pub const API_KEY_VARS: &[&str] = &["ODP_SDK_API_KEY", "ZAIUS_SDK_API_KEY"];
/// Base path override variables, current name first.
pub const API_BASE_PATH_VARS: &[&str] = &["ODP_SDK_API_BASE_PATH", "ZAIUS_SDK_API_BASE_PATH"];
pub const LOG_REQUESTS_VAR: &str = "LOG_REQUESTS";

/// Data region an account lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
	Us,
	Eu1,
	Au1,
}

impl Region {
	/// Derives the region from the public part of an API key.
	///
	/// The public part is everything before the last `.`; a key with no `.` is
	/// all public part. Public parts ending in `-eu1` or `-au1` select those
	/// regions, anything else is US.
	pub fn from_api_key(api_key: &str) -> Self {
		let public = api_key
			.rsplit_once('.')
			.map_or(api_key, |(public, _)| public);
		if public.ends_with("-eu1") {
			Region::Eu1
		} else if public.ends_with("-au1") {
			Region::Au1
		} else {
			Region::Us
		}
	}

	pub fn api_base_path(&self) -> &'static str {
		match self {
			Region::Us => DEFAULT_API_BASE_PATH,
			Region::Eu1 => EU1_API_BASE_PATH,
			Region::Au1 => AU1_API_BASE_PATH,
		}
	}
}

/// Identifies the app on whose behalf schema changes are made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppContext {
	pub app_id: String,
	pub display_name: String,
	pub version: String,
	pub vendor: String,
}

impl AppContext {
	/// The prefix schema names must carry, or `None` when there is no app id.
	pub fn name_prefix(&self) -> Option<String> {
		(!self.app_id.is_empty()).then(|| format!("{}_", self.app_id))
	}
}

/// Partial configuration. Unset fields fall back to the environment.
#[derive(Clone, Default)]
pub struct ConfigOverrides {
	pub api_key: Option<SecretString>,
	pub api_base_path: Option<String>,
	pub request_interceptor: Option<Arc<dyn RequestInterceptor>>,
	pub app_context: Option<AppContext>,
	pub log_requests: Option<bool>,
}

impl ConfigOverrides {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn api_key(mut self, api_key: impl Into<SecretString>) -> Self {
		self.api_key = Some(api_key.into());
		self
	}

	pub fn api_base_path(mut self, api_base_path: impl Into<String>) -> Self {
		self.api_base_path = Some(api_base_path.into());
		self
	}

	pub fn request_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
		self.request_interceptor = Some(Arc::new(interceptor));
		self
	}

	pub fn app_context(mut self, app_context: AppContext) -> Self {
		self.app_context = Some(app_context);
		self
	}

	pub fn log_requests(mut self, enabled: bool) -> Self {
		self.log_requests = Some(enabled);
		self
	}
}

impl fmt::Debug for ConfigOverrides {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ConfigOverrides")
			.field("api_key", &self.api_key)
			.field("api_base_path", &self.api_base_path)
			.field("request_interceptor", &self.request_interceptor.is_some())
			.field("app_context", &self.app_context)
			.field("log_requests", &self.log_requests)
			.finish()
	}
}

/// A fully resolved configuration.
#[derive(Clone)]
pub struct Config {
	api_key: SecretString,
	api_base_path: String,
	request_interceptor: Option<Arc<dyn RequestInterceptor>>,
	app_context: Option<AppContext>,
	log_requests: bool,
}

impl Config {
	/// Resolves from the process environment alone.
	pub fn from_env() -> Result<Self> {
		Self::resolve(ConfigOverrides::default())
	}

	/// Resolves `overrides` over the process environment.
	pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
		Self::resolve_with(overrides, &ProcessEnv)
	}

	/// Resolves `overrides` over the variables provided by `source`.
	///
	/// # Precedence
	///
	/// - API key: override, then `ODP_SDK_API_KEY`, then `ZAIUS_SDK_API_KEY`,
	///   then empty. A missing key is not an error here; the API rejects it.
	/// - Base path: override, then the base path variables, then the region
	///   derived from the resolved API key.
	pub fn resolve_with(overrides: ConfigOverrides, source: &impl EnvSource) -> Result<Self> {
		let api_key = match overrides.api_key {
			Some(api_key) => api_key,
			None => load_secret_env(source, API_KEY_VARS)?.unwrap_or_default(),
		};

		let api_base_path = match overrides.api_base_path {
			Some(path) => path,
			None => load_env(source, API_BASE_PATH_VARS)?.unwrap_or_else(|| {
				Region::from_api_key(api_key.expose())
					.api_base_path()
					.to_string()
			}),
		};

		Ok(Self {
			api_key,
			api_base_path,
			request_interceptor: overrides.request_interceptor,
			app_context: overrides.app_context,
			log_requests: overrides
				.log_requests
				.unwrap_or_else(|| env_flag(source, LOG_REQUESTS_VAR)),
		})
	}

	pub fn api_key(&self) -> &SecretString {
		&self.api_key
	}

	pub fn api_base_path(&self) -> &str {
		&self.api_base_path
	}

	pub fn request_interceptor(&self) -> Option<&dyn RequestInterceptor> {
		self.request_interceptor.as_deref()
	}

	pub fn app_context(&self) -> Option<&AppContext> {
		self.app_context.as_ref()
	}

	pub fn log_requests(&self) -> bool {
		self.log_requests
	}
}

impl fmt::Debug for Config {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Config")
			.field("api_key", &self.api_key)
			.field("api_base_path", &self.api_base_path)
			.field("request_interceptor", &self.request_interceptor.is_some())
			.field("app_context", &self.app_context)
			.field("log_requests", &self.log_requests)
			.finish()
	}
}

/// A swappable configuration cell.
///
/// Readers take an `Arc<Config>` snapshot; [`ConfigHandle::replace`] never
/// affects a snapshot already taken.
#[derive(Debug, Clone)]
pub struct ConfigHandle {
	inner: Arc<RwLock<Arc<Config>>>,
}

impl ConfigHandle {
	pub fn new(config: Config) -> Self {
		Self {
			inner: Arc::new(RwLock::new(Arc::new(config))),
		}
	}

	pub fn current(&self) -> Arc<Config> {
		let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
		Arc::clone(&guard)
	}

	pub fn replace(&self, config: Config) {
		let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
		*guard = Arc::new(config);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use std::collections::HashMap;

	fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |name: &str| map.get(name).cloned()
	}

	#[test]
	fn region_from_key_suffix() {
		assert_eq!(Region::from_api_key("abc-eu1.secret"), Region::Eu1);
		assert_eq!(Region::from_api_key("abc-au1.secret"), Region::Au1);
		assert_eq!(Region::from_api_key("abc.secret"), Region::Us);
		assert_eq!(Region::from_api_key("abc-eu1"), Region::Eu1);
		assert_eq!(Region::from_api_key(""), Region::Us);
	}

	#[test]
	fn region_uses_last_dot() {
		assert_eq!(Region::from_api_key("a.b-eu1.secret"), Region::Eu1);
		assert_eq!(Region::from_api_key("abc-eu1.x.secret"), Region::Us);
	}

	#[test]
	fn key_override_selects_region() {
		let config =
			Config::resolve_with(ConfigOverrides::new().api_key("abc-eu1.secret"), &vars(&[])).unwrap();
		assert_eq!(config.api_base_path(), EU1_API_BASE_PATH);
		assert_eq!(config.api_key().expose(), "abc-eu1.secret");
	}

	#[test]
	fn explicit_base_path_wins() {
		let config = Config::resolve_with(
			ConfigOverrides::new()
				.api_key("abc-eu1.secret")
				.api_base_path("http://localhost:8080/v3/"),
			&vars(&[("ODP_SDK_API_BASE_PATH", "http://env/")]),
		)
		.unwrap();
		assert_eq!(config.api_base_path(), "http://localhost:8080/v3/");
	}

	#[test]
	fn env_base_path_beats_region() {
		let config = Config::resolve_with(
			ConfigOverrides::new().api_key("abc-au1.secret"),
			&vars(&[("ZAIUS_SDK_API_BASE_PATH", "http://env/v3/")]),
		)
		.unwrap();
		assert_eq!(config.api_base_path(), "http://env/v3/");
	}

	#[test]
	fn key_from_legacy_env() {
		let config = Config::resolve_with(
			ConfigOverrides::default(),
			&vars(&[("ZAIUS_SDK_API_KEY", "legacy-au1.secret")]),
		)
		.unwrap();
		assert_eq!(config.api_key().expose(), "legacy-au1.secret");
		assert_eq!(config.api_base_path(), AU1_API_BASE_PATH);
	}

	#[test]
	fn empty_env_values_are_skipped() {
		let config = Config::resolve_with(
			ConfigOverrides::default(),
			&vars(&[
				("ODP_SDK_API_BASE_PATH", ""),
				("ODP_SDK_API_KEY", ""),
				("ZAIUS_SDK_API_KEY", "legacy-eu1.secret"),
			]),
		)
		.unwrap();
		assert_eq!(config.api_key().expose(), "legacy-eu1.secret");
		assert_eq!(config.api_base_path(), EU1_API_BASE_PATH);
	}

	#[test]
	fn missing_key_resolves_to_empty() {
		let config = Config::resolve_with(ConfigOverrides::default(), &vars(&[])).unwrap();
		assert_eq!(config.api_key().expose(), "");
		assert_eq!(config.api_base_path(), DEFAULT_API_BASE_PATH);
		assert!(!config.log_requests());
		assert!(config.app_context().is_none());
	}

	#[test]
	fn log_requests_from_env_and_override() {
		let env = vars(&[("LOG_REQUESTS", "true")]);
		assert!(Config::resolve_with(ConfigOverrides::default(), &env)
			.unwrap()
			.log_requests());
		assert!(!Config::resolve_with(ConfigOverrides::new().log_requests(false), &env)
			.unwrap()
			.log_requests());
	}

	#[test]
	fn unreadable_key_file_is_a_config_error() {
		let result = Config::resolve_with(
			ConfigOverrides::default(),
			&vars(&[("ODP_SDK_API_KEY_FILE", "/nonexistent/odp/key")]),
		);
		assert!(matches!(result, Err(crate::OdpError::Config(_))));
	}

	#[test]
	fn debug_output_redacts_key() {
		let config =
			Config::resolve_with(ConfigOverrides::new().api_key("public.private"), &vars(&[])).unwrap();
		assert!(!format!("{config:?}").contains("private"));
	}

	#[test]
	fn app_context_prefix() {
		let mut context = AppContext {
			app_id: "my_app".to_string(),
			display_name: "My App".to_string(),
			version: "1.0.0".to_string(),
			vendor: "acme".to_string(),
		};
		assert_eq!(context.name_prefix().as_deref(), Some("my_app_"));
		context.app_id.clear();
		assert!(context.name_prefix().is_none());
	}

	#[test]
	fn handle_snapshots_survive_replace() {
		let handle = ConfigHandle::new(
			Config::resolve_with(ConfigOverrides::new().api_key("first"), &vars(&[])).unwrap(),
		);
		let before = handle.current();
		handle.replace(
			Config::resolve_with(ConfigOverrides::new().api_key("second-eu1.x"), &vars(&[])).unwrap(),
		);

		assert_eq!(before.api_key().expose(), "first");
		assert_eq!(handle.current().api_key().expose(), "second-eu1.x");
		assert_eq!(handle.current().api_base_path(), EU1_API_BASE_PATH);
	}

	proptest! {
		#[test]
		fn region_ignores_private_part(public in "[a-zA-Z0-9]{1,20}", private in "[a-zA-Z0-9-]{0,20}") {
			let eu = format!("{public}-eu1.{private}");
			let us = format!("{public}.{private}-eu1");
			prop_assert_eq!(Region::from_api_key(&eu), Region::Eu1);
			prop_assert_eq!(Region::from_api_key(&us), Region::Us);
		}
	}
}
