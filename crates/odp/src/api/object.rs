// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use odp_core::{HttpResponse, OneOrMany, Payload, PayloadOptions, V3SuccessResponse};

use crate::error::Result;
use crate::transport::V3Api;

pub type ObjectResponse = V3SuccessResponse;

/// Upserts objects of `object_type`, e.g. `products`, through `POST /objects/{type}`.
pub async fn object(
	api: &V3Api,
	object_type: &str,
	payload: impl Into<OneOrMany<Payload>>,
	opts: &PayloadOptions,
) -> Result<HttpResponse<ObjectResponse>> {
	let payload = payload.into();
	payload.check()?;
	let payload = payload.map(|object| object.sanitized(opts));
	api.post(&format!("/objects/{object_type}"), &payload).await
}
