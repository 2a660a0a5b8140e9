// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! List and subscription payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::event::Identifiers;

/// A subscribe or unsubscribe request for one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUpdateRequest {
	/// Overrides the list passed to the subscription call when set.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub list_id: Option<String>,
	pub subscribed: bool,
	/// The identifiers of the customer, e.g. `email`.
	#[serde(flatten)]
	pub identifiers: Identifiers,
}

impl ListUpdateRequest {
	pub fn new(identifiers: Identifiers, subscribed: bool) -> Self {
		Self {
			list_id: None,
			subscribed,
			identifiers,
		}
	}

	pub fn list_id(mut self, list_id: impl Into<String>) -> Self {
		self.list_id = Some(list_id.into());
		self
	}
}

/// One subscription change reported back by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListUpdate {
	pub list_id: String,
	pub subscribed: bool,
	#[serde(flatten)]
	pub identifiers: BTreeMap<String, Value>,
}

/// Response body of `POST /lists/subscriptions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListUpdateResponse {
	#[serde(default)]
	pub updates: Vec<ListUpdate>,
}

/// A list as described by the lists API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListInfo {
	#[serde(alias = "list_id")]
	pub id: String,
	pub name: String,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Response body of `POST /lists`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateListResponse {
	#[serde(default)]
	pub created: Vec<ListInfo>,
}

/// Response body of `GET /lists`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetListsResponse {
	#[serde(default)]
	pub lists: Vec<ListInfo>,
}
