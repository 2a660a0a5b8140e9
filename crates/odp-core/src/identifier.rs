// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Messaging identifier metadata, consent and reachability.

use serde::{Deserialize, Serialize};

use crate::payload::Payload;
use crate::timestamp::{TimestampError, UpdateTimestamp};

/// Metadata attached to a single identifier value, sent to `POST /identifiers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifierMetadata {
	pub identifier_field_name: String,
	pub identifier_value: String,
	#[serde(default)]
	pub metadata: Payload,
}

impl IdentifierMetadata {
	pub fn new(field_name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			identifier_field_name: field_name.into(),
			identifier_value: value.into(),
			metadata: Payload::new(),
		}
	}

	pub fn metadata<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<serde_json::Value>,
	{
		self.metadata.set(key, value);
		self
	}
}

/// Response body of `GET /identifiers/{field}?id={value}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifierMetadataResponse {
	pub identifier_field_name: String,
	pub identifier_value: String,
	#[serde(default)]
	pub metadata: Payload,
}

/// A consent change for one messaging identifier.
///
/// Setting `consent` to false revokes any consent previously given.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsentUpdate {
	pub identifier_field_name: String,
	pub identifier_value: String,
	pub consent: bool,
	/// Human readable, kept for audit.
	pub consent_update_reason: Option<String>,
	/// Time of a historical change. The API defaults to now.
	pub consent_update_ts: Option<UpdateTimestamp>,
	/// Extra fields for the event the API may generate from this update.
	pub event_data: Option<Payload>,
}

impl ConsentUpdate {
	pub fn new(field_name: impl Into<String>, value: impl Into<String>, consent: bool) -> Self {
		Self {
			identifier_field_name: field_name.into(),
			identifier_value: value.into(),
			consent,
			consent_update_reason: None,
			consent_update_ts: None,
			event_data: None,
		}
	}

	pub fn reason(mut self, reason: impl Into<String>) -> Self {
		self.consent_update_reason = Some(reason.into());
		self
	}

	pub fn at(mut self, ts: impl Into<UpdateTimestamp>) -> Self {
		self.consent_update_ts = Some(ts.into());
		self
	}

	pub fn event_data(mut self, data: Payload) -> Self {
		self.event_data = Some(data);
		self
	}

	/// The wire form, with the timestamp as epoch seconds.
	pub fn to_record(&self) -> Result<ConsentRecord<'_>, TimestampError> {
		Ok(ConsentRecord {
			identifier_field_name: &self.identifier_field_name,
			identifier_value: &self.identifier_value,
			consent: self.consent,
			consent_update_reason: self.consent_update_reason.as_deref(),
			consent_update_ts: self
				.consent_update_ts
				.as_ref()
				.map(UpdateTimestamp::to_epoch_seconds)
				.transpose()?,
			event_data: self.event_data.as_ref(),
		})
	}
}

/// Wire form of a [`ConsentUpdate`].
#[derive(Debug, Serialize)]
pub struct ConsentRecord<'a> {
	pub identifier_field_name: &'a str,
	pub identifier_value: &'a str,
	pub consent: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub consent_update_reason: Option<&'a str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub consent_update_ts: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub event_data: Option<&'a Payload>,
}

/// Response body of `GET /consent/{field}?id={value}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetConsentResponse {
	pub identifier_field_name: String,
	pub identifier_value: String,
	/// `None` when the customer never explicitly opted in or out.
	pub consent: Option<bool>,
	pub consent_update_reason: Option<String>,
	/// Epoch seconds.
	pub consent_update_ts: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReachabilityUpdateType {
	HardBounce,
	SoftBounce,
	SpamReport,
	Uninstall,
	InvalidIdentifier,
	ReturnedToSender,
	Unknown,
	Expired,
	Other,
}

/// A reachability change for one messaging identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ReachabilityUpdate {
	pub identifier_field_name: String,
	pub identifier_value: String,
	pub reachable: bool,
	/// Required when `reachable` is false, must be unset otherwise.
	pub reachable_update_type: Option<ReachabilityUpdateType>,
	pub reachable_update_reason: Option<String>,
	pub reachable_update_ts: Option<UpdateTimestamp>,
	pub event_data: Option<Payload>,
}

impl ReachabilityUpdate {
	pub fn reachable(field_name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			identifier_field_name: field_name.into(),
			identifier_value: value.into(),
			reachable: true,
			reachable_update_type: None,
			reachable_update_reason: None,
			reachable_update_ts: None,
			event_data: None,
		}
	}

	pub fn unreachable(
		field_name: impl Into<String>,
		value: impl Into<String>,
		update_type: ReachabilityUpdateType,
	) -> Self {
		Self {
			reachable: false,
			reachable_update_type: Some(update_type),
			..Self::reachable(field_name, value)
		}
	}

	pub fn reason(mut self, reason: impl Into<String>) -> Self {
		self.reachable_update_reason = Some(reason.into());
		self
	}

	pub fn at(mut self, ts: impl Into<UpdateTimestamp>) -> Self {
		self.reachable_update_ts = Some(ts.into());
		self
	}

	pub fn event_data(mut self, data: Payload) -> Self {
		self.event_data = Some(data);
		self
	}

	/// The wire form, with the timestamp as epoch seconds.
	pub fn to_record(&self) -> Result<ReachabilityRecord<'_>, TimestampError> {
		Ok(ReachabilityRecord {
			identifier_field_name: &self.identifier_field_name,
			identifier_value: &self.identifier_value,
			reachable: self.reachable,
			reachable_update_type: self.reachable_update_type,
			reachable_update_reason: self.reachable_update_reason.as_deref(),
			reachable_update_ts: self
				.reachable_update_ts
				.as_ref()
				.map(UpdateTimestamp::to_epoch_seconds)
				.transpose()?,
			event_data: self.event_data.as_ref(),
		})
	}
}

/// Wire form of a [`ReachabilityUpdate`].
#[derive(Debug, Serialize)]
pub struct ReachabilityRecord<'a> {
	pub identifier_field_name: &'a str,
	pub identifier_value: &'a str,
	pub reachable: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reachable_update_type: Option<ReachabilityUpdateType>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reachable_update_reason: Option<&'a str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reachable_update_ts: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub event_data: Option<&'a Payload>,
}

/// Response body of `GET /reachability/{field}?id={value}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetReachabilityResponse {
	pub identifier_field_name: String,
	pub identifier_value: String,
	pub reachable: bool,
	pub reachable_update_type: Option<ReachabilityUpdateType>,
	pub reachable_update_reason: Option<String>,
	/// Epoch seconds.
	pub reachable_update_ts: Option<i64>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{TimeZone, Utc};
	use serde_json::json;

	#[test]
	fn consent_record_converts_timestamp() {
		let update = ConsentUpdate::new("email", "jane@example.com", true)
			.reason("signed up")
			.at(Utc.with_ymd_and_hms(2020, 4, 1, 0, 0, 0).unwrap());
		assert_eq!(
			serde_json::to_value(update.to_record().unwrap()).unwrap(),
			json!({
				"identifier_field_name": "email",
				"identifier_value": "jane@example.com",
				"consent": true,
				"consent_update_reason": "signed up",
				"consent_update_ts": 1_585_699_200
			})
		);
	}

	#[test]
	fn consent_record_omits_unset_fields() {
		let update = ConsentUpdate::new("email", "jane@example.com", false);
		assert_eq!(
			serde_json::to_value(update.to_record().unwrap()).unwrap(),
			json!({"identifier_field_name": "email", "identifier_value": "jane@example.com", "consent": false})
		);
	}

	#[test]
	fn reachability_record_uses_snake_case_type() {
		let update = ReachabilityUpdate::unreachable("email", "x@y.com", ReachabilityUpdateType::HardBounce)
			.at("2020-04-01T00:00:00Z");
		let record = serde_json::to_value(update.to_record().unwrap()).unwrap();
		assert_eq!(record["reachable"], json!(false));
		assert_eq!(record["reachable_update_type"], json!("hard_bounce"));
		assert_eq!(record["reachable_update_ts"], json!(1_585_699_200));
	}

	#[test]
	fn bad_timestamp_fails_record() {
		let update = ReachabilityUpdate::reachable("email", "x@y.com").at("yesterday-ish");
		assert!(update.to_record().is_err());
	}

	#[test]
	fn get_consent_accepts_nulls() {
		let response: GetConsentResponse = serde_json::from_value(json!({
			"identifier_field_name": "email",
			"identifier_value": "x@y.com",
			"consent": null,
			"consent_update_reason": null,
			"consent_update_ts": null
		}))
		.unwrap();
		assert_eq!(response.consent, None);
	}
}
