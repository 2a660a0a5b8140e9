// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use odp_core::{CustomerPayload, CustomerResponse, HttpResponse, OneOrMany, PayloadOptions};

use crate::error::Result;
use crate::transport::V3Api;

/// Creates or updates customer profiles through `POST /profiles`.
///
/// Identifiers are folded into the attributes, winning on key collisions, and
/// the attributes are sanitized with `opts` before sending.
pub async fn customer(
	api: &V3Api,
	payload: impl Into<OneOrMany<CustomerPayload>>,
	opts: &PayloadOptions,
) -> Result<HttpResponse<CustomerResponse>> {
	let payload = payload.into();
	payload.check()?;
	let profiles = payload.map(|customer| customer.into_profile(opts));
	api.post("/profiles", &profiles).await
}
