// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request logging. Each test installs a thread-local subscriber, so these
//! stay on the default current-thread runtime.

mod common;

use odp::{ErrorCode, V3SuccessResponse};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn accepted() -> ResponseTemplate {
	ResponseTemplate::new(202).set_body_json(json!({
		"title": "Accepted",
		"status": 202,
		"timestamp": "2024-01-01T00:00:00.000Z"
	}))
}

#[tokio::test]
async fn logged_requests_redact_the_key() {
	let (logs, _guard) = common::capture_logs();
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(accepted())
		.up_to_n_times(1)
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(422).set_body_json(json!({"title": "Unprocessable"})))
		.mount(&server)
		.await;

	let client = common::builder(&server)
		.log_requests(true)
		.build()
		.expect("odp client");

	let ok: V3SuccessResponse = client
		.v3_api()
		.post::<V3SuccessResponse, _>("/events", &json!({"type": "a"}))
		.await
		.expect("accepted")
		.data;
	assert_eq!(ok.status, 202);

	let err = client
		.v3_api()
		.post::<V3SuccessResponse, _>("/events", &json!({"type": "b"}))
		.await
		.unwrap_err();
	assert_eq!(err.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));

	assert_eq!(logs.count("DEBUG", "ODP API request"), 2);
	assert_eq!(logs.count("DEBUG", "ODP API response"), 2);
	assert_eq!(logs.count("DEBUG", "[REDACTED]"), 2);
	assert_eq!(logs.count("DEBUG", "Unprocessable"), 1);
	assert_eq!(logs.count("ERROR", ""), 0);
	assert!(!logs.contents().contains(common::API_KEY));
}

#[tokio::test]
async fn failures_are_logged_once_when_request_logging_is_off() {
	let (logs, _guard) = common::capture_logs();
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(400).set_body_json(json!({"title": "Bad Request"})))
		.expect(1)
		.mount(&server)
		.await;

	let err = common::client(&server)
		.v3_api()
		.post::<V3SuccessResponse, _>("/events", &json!({"type": "a"}))
		.await
		.unwrap_err();
	assert_eq!(err.code(), Some(ErrorCode::Non2xx));

	assert_eq!(logs.count("ERROR", ""), 1);
	assert_eq!(logs.count("ERROR", "ODP API request failed"), 1);
	assert_eq!(logs.count("ERROR", "Bad Request"), 1);
	assert_eq!(logs.count("DEBUG", "ODP API request"), 0);
	assert_eq!(logs.count("DEBUG", "ODP API response"), 0);
	assert!(!logs.contents().contains(common::API_KEY));
}

#[tokio::test]
async fn retried_failure_is_logged_once() {
	let (logs, _guard) = common::capture_logs();
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(503))
		.expect(2)
		.mount(&server)
		.await;

	let err = common::client(&server)
		.v3_api()
		.post::<V3SuccessResponse, _>("/events", &json!({"type": "a"}))
		.await
		.unwrap_err();
	assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));

	assert_eq!(logs.count("ERROR", ""), 1);
	assert_eq!(logs.count("ERROR", "ODP API request failed"), 1);
}

#[tokio::test]
async fn successes_are_silent_when_request_logging_is_off() {
	let (logs, _guard) = common::capture_logs();
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(accepted())
		.expect(1)
		.mount(&server)
		.await;

	common::client(&server)
		.v3_api()
		.post::<V3SuccessResponse, _>("/events", &json!({"type": "a"}))
		.await
		.expect("accepted");

	assert_eq!(logs.count("DEBUG", "ODP API"), 0);
	assert_eq!(logs.count("ERROR", ""), 0);
}
