// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Process-wide client.
//!
//! The global client follows a single [`ConfigHandle`]. [`configure`] swaps the
//! configuration; requests already in flight keep the snapshot they started with.

use std::sync::OnceLock;

use crate::client::OdpClient;
use crate::config::{Config, ConfigHandle, ConfigOverrides};
use crate::error::Result;

static CONFIG: OnceLock<ConfigHandle> = OnceLock::new();
static CLIENT: OnceLock<OdpClient> = OnceLock::new();

fn handle() -> Result<&'static ConfigHandle> {
	if let Some(handle) = CONFIG.get() {
		return Ok(handle);
	}
	let config = Config::from_env()?;
	Ok(CONFIG.get_or_init(|| ConfigHandle::new(config)))
}

/// Replaces the global configuration.
///
/// `overrides` are resolved over the environment; `None` restores the
/// environment defaults.
pub fn configure(overrides: Option<ConfigOverrides>) -> Result<()> {
	let config = Config::resolve(overrides.unwrap_or_default())?;
	match CONFIG.get() {
		Some(handle) => handle.replace(config),
		None => {
			let handle = CONFIG.get_or_init(|| ConfigHandle::new(config.clone()));
			handle.replace(config);
		}
	}
	Ok(())
}

/// The global client, created from the environment on first use.
pub fn client() -> Result<&'static OdpClient> {
	if let Some(client) = CLIENT.get() {
		return Ok(client);
	}
	let client = OdpClient::with_handle(handle()?.clone())?;
	Ok(CLIENT.get_or_init(|| client))
}

/// A snapshot of the current global configuration.
pub fn config() -> Result<std::sync::Arc<Config>> {
	Ok(handle()?.current())
}
