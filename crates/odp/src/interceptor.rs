// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Hook for rewriting outgoing requests.

use std::collections::BTreeMap;

use reqwest::Method;

/// The parts of an outgoing request an interceptor may rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDetail {
	pub method: Method,
	pub headers: BTreeMap<String, String>,
	pub body: Option<String>,
}

/// Rewrites a request before it is sent.
///
/// Receives the resolved URL and request by reference and returns the pair to
/// dispatch. Runs once per attempt, so a retried request is intercepted again.
///
/// Any `Fn(&str, &RequestDetail) -> (String, RequestDetail)` closure is an
/// interceptor:
///
/// ```
/// use odp::RequestDetail;
///
/// let redirect = |url: &str, detail: &RequestDetail| {
/// 	(url.replace("api.zaius.com", "proxy.internal"), detail.clone())
/// };
/// # let _: &dyn odp::RequestInterceptor = &redirect;
/// ```
pub trait RequestInterceptor: Send + Sync {
	fn intercept(&self, url: &str, detail: &RequestDetail) -> (String, RequestDetail);
}

impl<F> RequestInterceptor for F
where
	F: Fn(&str, &RequestDetail) -> (String, RequestDetail) + Send + Sync,
{
	fn intercept(&self, url: &str, detail: &RequestDetail) -> (String, RequestDetail) {
		self(url, detail)
	}
}
