// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Schema definitions for objects, fields, relations, identifiers and modules.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
	String,
	Number,
	Timestamp,
	Boolean,
	Vector,
}

/// A field on an object. Names are lower snake case and unique within the object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
	pub name: String,
	#[serde(rename = "type")]
	pub field_type: FieldType,
	pub display_name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Marks the primary key when creating an object.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub primary: Option<bool>,
}

impl FieldDefinition {
	pub fn new(name: impl Into<String>, field_type: FieldType, display_name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			field_type,
			display_name: display_name.into(),
			description: None,
			primary: None,
		}
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn primary(mut self) -> Self {
		self.primary = Some(true);
		self
	}
}

/// An object type. Must contain at least a primary key field when created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDefinition {
	/// Plural, lower snake case.
	pub name: String,
	pub display_name: String,
	/// Singular form used during ingest. Derived by the API when unset.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub alias: Option<String>,
	#[serde(default)]
	pub fields: Vec<FieldDefinition>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub relations: Option<Vec<RelationDefinition>>,
}

/// Parent/child field pair a relation joins on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinField {
	pub parent: String,
	pub child: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDefinition {
	pub name: String,
	pub display_name: String,
	pub child_object: String,
	/// More than one pair supports compound primary keys.
	pub join_fields: Vec<JoinField>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeConfidence {
	Low,
	High,
}

/// A customer identifier type, e.g. `loyalty_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierDefinition {
	/// Ends in a known suffix: `_id`, `_hash`, `_number`, `_token`, `_alias`, `_address` or `_key`.
	pub name: String,
	pub display_name: String,
	pub merge_confidence: MergeConfidence,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub messaging: Option<bool>,
}

/// Response body of `POST /schema/identifiers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIdentifierResponse {
	/// Fields added to the events object.
	#[serde(default)]
	pub events: Vec<FieldDefinition>,
	/// Fields added to the customers object.
	#[serde(default)]
	pub customers: Vec<FieldDefinition>,
}

/// Response body of `GET` and `POST /schema/modules`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulesResponse {
	#[serde(default)]
	pub enabled_modules: Vec<String>,
}
