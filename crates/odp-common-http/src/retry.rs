// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Status-driven retry for HTTP requests.
//!
//! Only errors that carry a response status listed in
//! [`RetryConfig::retryable_statuses`] are retried. Errors without a status
//! (connection failures, body decoding) are returned on the first attempt.

use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct RetryConfig {
	/// Total attempts including the first one.
	pub max_attempts: u32,
	/// Pause between attempts.
	pub delay: Duration,
	pub retryable_statuses: Vec<StatusCode>,
}

impl Default for RetryConfig {
	/// One immediate retry on gateway failures.
	fn default() -> Self {
		Self {
			max_attempts: 2,
			delay: Duration::ZERO,
			retryable_statuses: vec![
				StatusCode::BAD_GATEWAY,
				StatusCode::SERVICE_UNAVAILABLE,
				StatusCode::GATEWAY_TIMEOUT,
			],
		}
	}
}

impl RetryConfig {
	/// A single attempt.
	pub fn no_retry() -> Self {
		Self {
			max_attempts: 1,
			..Self::default()
		}
	}

	pub fn is_retryable_status(&self, status: StatusCode) -> bool {
		self.retryable_statuses.contains(&status)
	}
}

pub trait RetryableError {
	/// The HTTP status the failed attempt received, if any.
	fn retry_status(&self) -> Option<StatusCode>;
}

pub async fn retry<F, Fut, T, E>(cfg: &RetryConfig, mut f: F) -> Result<T, E>
where
	F: FnMut() -> Fut,
	Fut: std::future::Future<Output = Result<T, E>>,
	E: RetryableError + std::fmt::Debug,
{
	let mut attempt = 0;

	loop {
		match f().await {
			Ok(result) => return Ok(result),
			Err(err) => {
				attempt += 1;
				let status = err.retry_status();

				if !status.is_some_and(|s| cfg.is_retryable_status(s)) {
					debug!(
						status = ?status,
						attempt = attempt,
						"non-retryable error encountered"
					);
					return Err(err);
				}

				if attempt >= cfg.max_attempts {
					warn!(
						status = ?status,
						attempt = attempt,
						max_attempts = cfg.max_attempts,
						"max retry attempts exhausted"
					);
					return Err(err);
				}

				warn!(
					status = ?status,
					attempt = attempt,
					max_attempts = cfg.max_attempts,
					delay_ms = cfg.delay.as_millis(),
					"retrying after error"
				);

				if !cfg.delay.is_zero() {
					tokio::time::sleep(cfg.delay).await;
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicU32, Ordering};
	use std::sync::Arc;

	#[derive(Debug)]
	struct MockError {
		status: Option<StatusCode>,
	}

	impl RetryableError for MockError {
		fn retry_status(&self) -> Option<StatusCode> {
			self.status
		}
	}

	async fn run_with_statuses(
		cfg: &RetryConfig,
		statuses: Vec<Option<StatusCode>>,
	) -> (Result<u32, MockError>, u32) {
		let attempt_count = Arc::new(AtomicU32::new(0));
		let statuses = Arc::new(statuses);

		let result = retry(cfg, || {
			let count = Arc::clone(&attempt_count);
			let statuses = Arc::clone(&statuses);
			async move {
				let n = count.fetch_add(1, Ordering::SeqCst) as usize;
				match statuses.get(n) {
					Some(status) => Err(MockError { status: *status }),
					None => Ok(n as u32),
				}
			}
		})
		.await;

		(result, attempt_count.load(Ordering::SeqCst))
	}

	#[tokio::test]
	async fn gateway_failure_is_retried_once_then_succeeds() {
		let (result, attempts) =
			run_with_statuses(&RetryConfig::default(), vec![Some(StatusCode::BAD_GATEWAY)]).await;
		assert_eq!(result.unwrap(), 1);
		assert_eq!(attempts, 2);
	}

	#[tokio::test]
	async fn every_gateway_status_is_retryable() {
		for status in [
			StatusCode::BAD_GATEWAY,
			StatusCode::SERVICE_UNAVAILABLE,
			StatusCode::GATEWAY_TIMEOUT,
		] {
			let (result, attempts) =
				run_with_statuses(&RetryConfig::default(), vec![Some(status)]).await;
			assert!(result.is_ok(), "{status} should be retried");
			assert_eq!(attempts, 2);
		}
	}

	#[tokio::test]
	async fn never_retries_twice() {
		let (result, attempts) = run_with_statuses(
			&RetryConfig::default(),
			vec![
				Some(StatusCode::SERVICE_UNAVAILABLE),
				Some(StatusCode::SERVICE_UNAVAILABLE),
				Some(StatusCode::SERVICE_UNAVAILABLE),
			],
		)
		.await;
		assert_eq!(
			result.unwrap_err().status,
			Some(StatusCode::SERVICE_UNAVAILABLE)
		);
		assert_eq!(attempts, 2);
	}

	#[tokio::test]
	async fn client_errors_fail_immediately() {
		for status in [
			StatusCode::BAD_REQUEST,
			StatusCode::NOT_FOUND,
			StatusCode::INTERNAL_SERVER_ERROR,
		] {
			let (result, attempts) =
				run_with_statuses(&RetryConfig::default(), vec![Some(status)]).await;
			assert!(result.is_err());
			assert_eq!(attempts, 1, "{status} should not be retried");
		}
	}

	#[tokio::test]
	async fn errors_without_status_fail_immediately() {
		let (result, attempts) = run_with_statuses(&RetryConfig::default(), vec![None]).await;
		assert!(result.is_err());
		assert_eq!(attempts, 1);
	}

	#[tokio::test]
	async fn no_retry_config_makes_one_attempt() {
		let (result, attempts) =
			run_with_statuses(&RetryConfig::no_retry(), vec![Some(StatusCode::BAD_GATEWAY)]).await;
		assert!(result.is_err());
		assert_eq!(attempts, 1);
	}

	#[tokio::test]
	async fn configured_delay_is_awaited() {
		let cfg = RetryConfig {
			delay: Duration::from_millis(20),
			..RetryConfig::default()
		};
		let start = std::time::Instant::now();
		let (result, _) = run_with_statuses(&cfg, vec![Some(StatusCode::GATEWAY_TIMEOUT)]).await;
		assert!(result.is_ok());
		assert!(start.elapsed() >= Duration::from_millis(20));
	}
}
