// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration helpers for the ODP SDK.
//!
//! - [`Secret`] keeps API keys out of logs and zeroizes them on drop
//! - [`env`] loads settings with the `VAR` / `VAR_FILE` convention and
//!   falls back from current to legacy variable names

pub mod env;
mod secret;

pub use env::{env_flag, load_env, load_secret_env, EnvError, EnvSource, ProcessEnv};
pub use secret::{Secret, SecretString, REDACTED};
