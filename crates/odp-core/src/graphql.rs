// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! GraphQL request and response types.

use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::HttpResponse;

/// Body of `POST /graphql`.
#[derive(Debug, Serialize)]
pub struct GqlRequest<'a> {
	pub query: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub variables: Option<&'a Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GqlLocation {
	pub line: u32,
	pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GqlError {
	pub message: String,
	#[serde(default)]
	pub locations: Vec<GqlLocation>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub path: Option<Vec<Value>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extensions: Option<Map<String, Value>>,
}

/// The JSON body a GraphQL server returns.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GqlResult<T> {
	pub errors: Option<Vec<GqlError>>,
	pub data: Option<T>,
	pub extensions: Option<Map<String, Value>>,
}

/// A GraphQL response with `data`, `errors` and `extensions` lifted out of the body.
#[derive(Debug, Clone)]
pub struct GqlResponse<T> {
	pub success: bool,
	pub status: StatusCode,
	pub status_text: String,
	pub headers: HeaderMap,
	pub data: Option<T>,
	pub errors: Option<Vec<GqlError>>,
	pub extensions: Option<Map<String, Value>>,
}

impl<T> GqlResponse<T> {
	/// True when the server reported no GraphQL errors.
	pub fn is_ok(&self) -> bool {
		self.errors.as_ref().map_or(true, Vec::is_empty)
	}
}

impl<T> From<HttpResponse<GqlResult<T>>> for GqlResponse<T> {
	fn from(response: HttpResponse<GqlResult<T>>) -> Self {
		let GqlResult {
			errors,
			data,
			extensions,
		} = response.data;
		Self {
			success: response.success,
			status: response.status,
			status_text: response.status_text,
			headers: response.headers,
			data,
			errors,
			extensions,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn request_omits_missing_variables() {
		let request = GqlRequest {
			query: "{ customers { edges { node { email } } } }",
			variables: None,
		};
		assert_eq!(
			serde_json::to_value(&request).unwrap(),
			json!({"query": "{ customers { edges { node { email } } } }"})
		);
	}

	#[test]
	fn unpacks_body_into_response() {
		let body: GqlResult<Value> = serde_json::from_value(json!({
			"data": {"customer": {"name": "Jane"}},
			"errors": [{"message": "partial", "locations": [{"line": 1, "column": 3}]}],
			"extensions": {"cost": "1"}
		}))
		.unwrap();
		let response = GqlResponse::from(HttpResponse {
			success: true,
			status: StatusCode::OK,
			status_text: "OK".to_string(),
			headers: HeaderMap::new(),
			data: body,
		});
		assert_eq!(response.data.unwrap()["customer"]["name"], json!("Jane"));
		assert_eq!(response.errors.as_ref().unwrap()[0].locations[0].column, 3);
		assert_eq!(response.extensions.unwrap()["cost"], json!("1"));
	}

	#[test]
	fn missing_errors_is_ok() {
		let body: GqlResult<Value> = serde_json::from_value(json!({"data": {}})).unwrap();
		let response = GqlResponse::from(HttpResponse {
			success: true,
			status: StatusCode::OK,
			status_text: "OK".to_string(),
			headers: HeaderMap::new(),
			data: body,
		});
		assert!(response.is_ok());
	}

	#[derive(Debug, PartialEq, Deserialize)]
	struct Customer {
		name: String,
	}

	#[test]
	fn data_type_needs_no_default() {
		let body: GqlResult<Customer> =
			serde_json::from_value(json!({"data": {"name": "Jane"}})).unwrap();
		assert_eq!(
			body.data,
			Some(Customer {
				name: "Jane".to_string()
			})
		);
		assert!(body.errors.is_none());
		assert!(body.extensions.is_none());

		let empty: GqlResult<Customer> = serde_json::from_value(json!({})).unwrap();
		assert!(empty.data.is_none());
	}
}
