// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Update timestamps for consent and reachability changes.
//!
//! The API takes these as unix epoch seconds. Callers may hand over a
//! `DateTime<Utc>`, epoch seconds, or an RFC 3339 string; all of them are
//! normalized before a request is built.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateTimestamp {
	/// Unix epoch seconds, sent unchanged.
	Epoch(i64),
	At(DateTime<Utc>),
	/// RFC 3339 date-time, or a bare `YYYY-MM-DD` date taken as UTC midnight.
	Text(String),
}

#[derive(Debug, Error)]
#[error("invalid timestamp {value:?}: expected RFC 3339 or YYYY-MM-DD")]
pub struct TimestampError {
	value: String,
	#[source]
	source: chrono::ParseError,
}

impl TimestampError {
	pub fn value(&self) -> &str {
		&self.value
	}
}

impl UpdateTimestamp {
	/// Epoch seconds, rounded to the nearest second.
	pub fn to_epoch_seconds(&self) -> Result<i64, TimestampError> {
		match self {
			UpdateTimestamp::Epoch(seconds) => Ok(*seconds),
			UpdateTimestamp::At(at) => Ok(round_millis(at.timestamp_millis())),
			UpdateTimestamp::Text(text) => parse_text(text)
				.map(|at| round_millis(at.timestamp_millis()))
				.map_err(|source| TimestampError {
					value: text.clone(),
					source,
				}),
		}
	}
}

fn parse_text(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
	match DateTime::parse_from_rfc3339(text) {
		Ok(at) => Ok(at.with_timezone(&Utc)),
		Err(err) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
			.ok()
			.and_then(|date| date.and_hms_opt(0, 0, 0))
			.map(|midnight| midnight.and_utc())
			.ok_or(err),
	}
}

fn round_millis(millis: i64) -> i64 {
	(millis + 500).div_euclid(1000)
}

impl From<i64> for UpdateTimestamp {
	fn from(seconds: i64) -> Self {
		UpdateTimestamp::Epoch(seconds)
	}
}

impl From<DateTime<Utc>> for UpdateTimestamp {
	fn from(at: DateTime<Utc>) -> Self {
		UpdateTimestamp::At(at)
	}
}

impl From<String> for UpdateTimestamp {
	fn from(text: String) -> Self {
		UpdateTimestamp::Text(text)
	}
}

impl From<&str> for UpdateTimestamp {
	fn from(text: &str) -> Self {
		UpdateTimestamp::Text(text.to_string())
	}
}
