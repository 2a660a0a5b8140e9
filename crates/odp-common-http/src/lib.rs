// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for the ODP SDK.
//!
//! This crate provides:
//! - A pre-configured HTTP client builder with the SDK User-Agent header
//! - A status-driven retry helper for transient gateway failures

mod client;
mod retry;

pub use client::{builder, user_agent};
pub use retry::{retry, RetryConfig, RetryableError};
