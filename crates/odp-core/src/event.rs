// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::V3SuccessResponse;
use crate::payload::Payload;

/// Identifier field name to value, e.g. `email` to `jane@example.com`.
pub type Identifiers = BTreeMap<String, String>;

/// Response body of `POST /events`.
pub type EventResponse = V3SuccessResponse;

/// An event to ingest via `POST /events`.
///
/// # Example
///
/// ```
/// use odp_core::EventPayload;
///
/// let event = EventPayload::new("product")
///     .action("detail")
///     .identifier("email", "jane@example.com")
///     .data("product_id", "sku-1");
/// assert_eq!(event.event_type, "product");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
	#[serde(rename = "type")]
	pub event_type: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub action: Option<String>,
	/// At least one identifier is required by the API.
	pub identifiers: Identifiers,
	#[serde(default)]
	pub data: Payload,
}

impl EventPayload {
	pub fn new(event_type: impl Into<String>) -> Self {
		Self {
			event_type: event_type.into(),
			action: None,
			identifiers: Identifiers::new(),
			data: Payload::new(),
		}
	}

	pub fn action(mut self, action: impl Into<String>) -> Self {
		self.action = Some(action.into());
		self
	}

	pub fn identifier(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
		self.identifiers.insert(field.into(), value.into());
		self
	}

	pub fn data<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.data.set(key, value);
		self
	}

	/// Tags the event with where it came from. Unset fields are left alone.
	pub fn data_source(mut self, source: DataSource) -> Self {
		let fields = [
			("data_source_type", source.data_source_type),
			("data_source", source.data_source),
			("data_source_details", source.data_source_details),
			("data_source_version", source.data_source_version),
		];
		for (key, value) in fields {
			if let Some(value) = value {
				self.data.set(key, value);
			}
		}
		self
	}
}

/// Origin information attached to event data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
	/// e.g. `app`, `csv`, `api`
	pub data_source_type: Option<String>,
	pub data_source: Option<String>,
	pub data_source_details: Option<String>,
	pub data_source_version: Option<String>,
}
