// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Sends an event, a customer profile and a list subscription.
//!
//! ```text
//! ODP_SDK_API_KEY=... RUST_LOG=odp=debug LOG_REQUESTS=true cargo run -p odp --example ingest
//! ```

use std::collections::BTreeMap;

use odp::{CustomerPayload, EventPayload, OdpClient, OdpError};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), OdpError> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let client = OdpClient::builder().build()?;
	let email = "jane@example.com";

	let response = client
		.event(
			EventPayload::new("pageview")
				.action("visit")
				.identifier("email", email)
				.data("page", "/pricing"),
		)
		.await?;
	info!(status = %response.status, "event sent");

	client
		.customer(
			CustomerPayload::new()
				.identifier("email", email)
				.attribute("first_name", "Jane")
				.attribute("nickname", "   "),
		)
		.await?;
	info!("customer updated");

	let identifiers = BTreeMap::from([("email".to_string(), email.to_string())]);
	match client.list().subscribe("newsletter", identifiers).await {
		Ok(response) => info!(updates = response.data.updates.len(), "subscribed"),
		Err(err) => error!(code = ?err.code(), status = ?err.status(), error = %err, "subscription failed"),
	}

	Ok(())
}
