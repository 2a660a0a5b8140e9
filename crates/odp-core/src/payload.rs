// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Flat field/value payloads and their sanitizer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Controls how [`Payload::sanitize`] treats blank strings and nulls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadOptions {
	/// Trim string values, replacing empty results with null. Defaults to true.
	#[serde(default = "enabled")]
	pub trim_to_null: bool,
	/// Drop fields whose value is null. Defaults to true.
	#[serde(default = "enabled")]
	pub exclude_nulls: bool,
}

fn enabled() -> bool {
	true
}

impl Default for PayloadOptions {
	fn default() -> Self {
		Self {
			trim_to_null: true,
			exclude_nulls: true,
		}
	}
}

impl PayloadOptions {
	pub fn trim_to_null(mut self, enabled: bool) -> Self {
		self.trim_to_null = enabled;
		self
	}

	pub fn exclude_nulls(mut self, enabled: bool) -> Self {
		self.exclude_nulls = enabled;
		self
	}
}

/// A flat mapping of field name to value, used for customer attributes and objects.
///
/// # Example
///
/// ```
/// use odp_core::{Payload, PayloadOptions};
///
/// let mut payload = Payload::new()
///     .insert("product_id", "sku-1")
///     .insert("name", "  Widget ")
///     .insert("description", "   ");
///
/// payload.sanitize(&PayloadOptions::default());
/// assert_eq!(payload.get("name"), Some(&serde_json::Value::from("Widget")));
/// assert!(payload.get("description").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload {
	inner: Map<String, Value>,
}

impl Payload {
	pub fn new() -> Self {
		Self { inner: Map::new() }
	}

	/// Inserts a field. Accepts anything convertible into a JSON value.
	pub fn insert<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into());
		self
	}

	/// Sets a field in place.
	pub fn set<K, V>(&mut self, key: K, value: V)
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into());
	}

	/// Merges another payload into this one. Fields from `other` win.
	pub fn merge(mut self, other: Payload) -> Self {
		self.inner.extend(other.inner);
		self
	}

	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.inner.remove(key)
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.inner.get(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.inner.contains_key(key)
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn iter(&self) -> serde_json::map::Iter<'_> {
		self.inner.iter()
	}

	/// Sanitizes top-level fields in place. Nested objects and arrays are left untouched.
	pub fn sanitize(&mut self, opts: &PayloadOptions) {
		if opts.trim_to_null {
			for value in self.inner.values_mut() {
				if let Value::String(text) = value {
					let trimmed = text.trim();
					if trimmed.is_empty() {
						*value = Value::Null;
					} else if trimmed.len() != text.len() {
						*text = trimmed.to_string();
					}
				}
			}
		}

		if opts.exclude_nulls {
			self.inner.retain(|_, value| !value.is_null());
		}
	}

	/// Consuming form of [`Payload::sanitize`].
	pub fn sanitized(mut self, opts: &PayloadOptions) -> Self {
		self.sanitize(opts);
		self
	}

	pub fn into_map(self) -> Map<String, Value> {
		self.inner
	}

	pub fn into_value(self) -> Value {
		Value::Object(self.inner)
	}
}

impl From<Payload> for Value {
	fn from(payload: Payload) -> Self {
		payload.into_value()
	}
}

impl From<Value> for Payload {
	fn from(value: Value) -> Self {
		match value {
			Value::Object(map) => Self { inner: map },
			_ => Self::new(),
		}
	}
}

impl From<Map<String, Value>> for Payload {
	fn from(map: Map<String, Value>) -> Self {
		Self { inner: map }
	}
}

impl<K, V> FromIterator<(K, V)> for Payload
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			inner: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use serde_json::json;

	fn sample() -> Payload {
		Payload::from(json!({
			"empty": "",
			"blank": "   ",
			"nullified": null,
			"value": "value",
		}))
	}

	#[test]
	fn default_options_drop_blank_and_null() {
		let payload = sample().sanitized(&PayloadOptions::default());
		assert_eq!(payload.into_value(), json!({"value": "value"}));
	}

	#[test]
	fn keeps_nulls_when_exclude_nulls_disabled() {
		let payload = sample().sanitized(&PayloadOptions::default().exclude_nulls(false));
		assert_eq!(
			payload.into_value(),
			json!({"empty": null, "blank": null, "nullified": null, "value": "value"})
		);
	}

	#[test]
	fn keeps_blank_strings_when_trim_disabled() {
		let payload = sample().sanitized(&PayloadOptions::default().trim_to_null(false));
		assert_eq!(
			payload.into_value(),
			json!({"empty": "", "blank": "   ", "value": "value"})
		);
	}

	#[test]
	fn trims_surrounding_whitespace() {
		let payload = Payload::new()
			.insert("name", "  Jane ")
			.sanitized(&PayloadOptions::default());
		assert_eq!(payload.get("name"), Some(&json!("Jane")));
	}

	#[test]
	fn leaves_nested_values_alone() {
		let payload = Payload::from(json!({"nested": {"blank": " "}, "list": ["", null]}))
			.sanitized(&PayloadOptions::default());
		assert_eq!(
			payload.into_value(),
			json!({"nested": {"blank": " "}, "list": ["", null]})
		);
	}

	#[test]
	fn non_string_values_pass_through() {
		let payload = Payload::new()
			.insert("count", 0)
			.insert("active", false)
			.sanitized(&PayloadOptions::default());
		assert_eq!(payload.len(), 2);
	}

	#[test]
	fn merge_prefers_other() {
		let merged = Payload::new()
			.insert("email", "old@example.com")
			.insert("name", "A")
			.merge(Payload::new().insert("email", "new@example.com"));
		assert_eq!(merged.get("email"), Some(&json!("new@example.com")));
		assert_eq!(merged.len(), 2);
	}

	#[test]
	fn options_deserialize_with_defaults() {
		let opts: PayloadOptions = serde_json::from_value(json!({"excludeNulls": false})).unwrap();
		assert!(opts.trim_to_null);
		assert!(!opts.exclude_nulls);
	}

	fn field_value() -> impl Strategy<Value = Value> {
		prop_oneof![
			Just(Value::Null),
			"[ a-z]{0,6}".prop_map(Value::from),
			any::<i32>().prop_map(Value::from),
			any::<bool>().prop_map(Value::from),
		]
	}

	proptest! {
		#[test]
		fn sanitize_is_idempotent(
			fields in proptest::collection::btree_map("[a-z]{1,8}", field_value(), 0..12),
			trim_to_null in any::<bool>(),
			exclude_nulls in any::<bool>(),
		) {
			let opts = PayloadOptions { trim_to_null, exclude_nulls };
			let once = fields.into_iter().collect::<Payload>().sanitized(&opts);
			let twice = once.clone().sanitized(&opts);
			prop_assert_eq!(once, twice);
		}

		#[test]
		fn default_sanitize_leaves_no_blank_strings(
			fields in proptest::collection::btree_map("[a-z]{1,8}", field_value(), 0..12),
		) {
			let payload = fields.into_iter().collect::<Payload>().sanitized(&PayloadOptions::default());
			for (_, value) in payload.iter() {
				prop_assert!(!value.is_null());
				if let Value::String(text) = value {
					prop_assert!(!text.trim().is_empty());
					prop_assert_eq!(text.trim(), text.as_str());
				}
			}
		}
	}
}
