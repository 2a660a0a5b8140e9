// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Customer profile payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::V3SuccessResponse;
use crate::event::Identifiers;
use crate::payload::{Payload, PayloadOptions};

/// Response body of `POST /profiles`.
pub type CustomerResponse = V3SuccessResponse;

/// A customer upsert: identifiers plus known attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerPayload {
	pub identifiers: Identifiers,
	#[serde(default)]
	pub attributes: Payload,
}

/// The wire shape of a profile upsert. Identifiers travel inside `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformedCustomerPayload {
	pub attributes: Payload,
}

impl CustomerPayload {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn identifier(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
		self.identifiers.insert(field.into(), value.into());
		self
	}

	pub fn attribute<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.attributes.set(key, value);
		self
	}

	/// Folds the identifiers into the attributes, then sanitizes them.
	///
	/// An identifier wins over an attribute with the same name.
	pub fn into_profile(self, opts: &PayloadOptions) -> TransformedCustomerPayload {
		let mut attributes = self.attributes;
		for (field, value) in self.identifiers {
			attributes.set(field, value);
		}
		attributes.sanitize(opts);
		TransformedCustomerPayload { attributes }
	}
}
