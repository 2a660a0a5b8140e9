// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Environment variable helpers.
//!
//! Every loader supports the `*_FILE` convention used by Docker secrets and
//! Kubernetes, and takes a list of names so a renamed variable keeps
//! working under its legacy name. The first name that is set wins.

use std::path::PathBuf;
use std::{env, fs};

use thiserror::Error;

use crate::secret::Secret;

/// Errors that can occur when loading settings from the environment.
#[derive(Debug, Error)]
pub enum EnvError {
	/// Failed to read the file named by a `*_FILE` variable.
	#[error("failed to read file at {path} (from {var}): {source}")]
	Io {
		var: String,
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// A `*_FILE` variable was set to an empty path.
	#[error("file path in {var} is empty")]
	EmptyPath { var: String },
}

/// Where variable values come from. The process environment in production,
/// a closure in tests.
pub trait EnvSource {
	fn var(&self, name: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
	fn var(&self, name: &str) -> Option<String> {
		env::var(name).ok()
	}
}

impl<F> EnvSource for F
where
	F: Fn(&str) -> Option<String>,
{
	fn var(&self, name: &str) -> Option<String> {
		self(name)
	}
}

/// Loads a value using the `VAR` / `VAR_FILE` convention, trying each name in order.
///
/// # Precedence
///
/// For each name, in order:
/// 1. If `{name}_FILE` is set, read the value from that file path
/// 2. Otherwise, if `{name}` is set to a non-empty value, use it directly
///
/// An empty `{name}` counts as unset, so the next name is tried. The first
/// name that yields a value wins. A single trailing newline is
/// stripped from file content.
///
/// # Example
///
/// ```no_run
/// use odp_common_config::{load_env, ProcessEnv};
///
/// let base_path = load_env(&ProcessEnv, &["ODP_SDK_API_BASE_PATH", "ZAIUS_SDK_API_BASE_PATH"])?;
/// # Ok::<(), odp_common_config::EnvError>(())
/// ```
pub fn load_env(source: &impl EnvSource, names: &[&str]) -> Result<Option<String>, EnvError> {
	for name in names {
		let file_var = format!("{name}_FILE");

		if let Some(path_str) = source.var(&file_var) {
			if path_str.is_empty() {
				return Err(EnvError::EmptyPath { var: file_var });
			}

			let path = PathBuf::from(&path_str);
			let content = fs::read_to_string(&path).map_err(|e| EnvError::Io {
				var: file_var.clone(),
				path: path.clone(),
				source: e,
			})?;

			let value = content.strip_suffix('\n').unwrap_or(&content).to_string();
			return Ok(Some(value));
		}

		if let Some(value) = source.var(name).filter(|v| !v.is_empty()) {
			return Ok(Some(value));
		}
	}

	Ok(None)
}

/// Like [`load_env`], wrapping the value in a [`Secret`].
pub fn load_secret_env(
	source: &impl EnvSource,
	names: &[&str],
) -> Result<Option<Secret<String>>, EnvError> {
	Ok(load_env(source, names)?.map(Secret::new))
}

/// True only when the variable is set to exactly `true`.
pub fn env_flag(source: &impl EnvSource, name: &str) -> bool {
	source.var(name).as_deref() == Some("true")
}
