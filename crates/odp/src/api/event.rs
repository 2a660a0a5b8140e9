// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use odp_core::{EventPayload, EventResponse, HttpResponse, OneOrMany};

use crate::error::Result;
use crate::transport::V3Api;

/// Sends one event, or a batch of up to 100, to `POST /events`.
pub async fn event(
	api: &V3Api,
	payload: impl Into<OneOrMany<EventPayload>>,
) -> Result<HttpResponse<EventResponse>> {
	let payload = payload.into();
	payload.check()?;
	api.post("/events", &payload).await
}
