// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Structured `detail.invalids` entries of a v3 error body.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One invalid schema field reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidDetail {
	pub field: String,
	pub reason: InvalidReason,
}

/// The API reports a reason either as a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InvalidReason {
	One(String),
	Many(Vec<String>),
}

impl InvalidReason {
	/// True if the reason, or any of the reasons, satisfies `matcher`.
	pub fn any<F>(&self, matcher: F) -> bool
	where
		F: Fn(&str) -> bool,
	{
		match self {
			InvalidReason::One(reason) => matcher(reason.as_str()),
			InvalidReason::Many(reasons) => reasons.iter().any(|r| matcher(r.as_str())),
		}
	}
}

/// A reason predicate that can live in a static table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonMatch {
	Exact(&'static str),
	Prefix(&'static str),
}

impl ReasonMatch {
	pub fn matches(&self, reason: &str) -> bool {
		match self {
			ReasonMatch::Exact(expected) => reason == *expected,
			ReasonMatch::Prefix(prefix) => reason.starts_with(prefix),
		}
	}
}

/// Extracts `detail.invalids` from an error body.
///
/// Entries that are not schema details (event detail entries carry
/// `event`/`message` instead of `field`/`reason`) are skipped.
pub fn invalids_of(data: &Value) -> Vec<InvalidDetail> {
	data
		.pointer("/detail/invalids")
		.and_then(Value::as_array)
		.map(|items| {
			items
				.iter()
				.filter_map(|item| InvalidDetail::deserialize(item).ok())
				.collect()
		})
		.unwrap_or_default()
}

/// True if any entry for `field` has a reason accepted by `matcher`.
pub fn invalids_contain<F>(invalids: &[InvalidDetail], field: &str, matcher: F) -> bool
where
	F: Fn(&str) -> bool,
{
	invalids
		.iter()
		.any(|detail| detail.field == field && detail.reason.any(&matcher))
}
