// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Schema management: objects, fields, relations, identifiers and modules.
//!
//! A `Non2xx` from a create call is checked once against [`CONFLICT_RULES`];
//! a matching rule turns it into the corresponding `*Exists` error. When the
//! configuration carries an [`AppContext`], names are validated locally first.

use odp_core::{
	invalids_contain, CreateIdentifierResponse, ErrorCode, FieldDefinition, HttpError, HttpResponse,
	IdentifierDefinition, ModulesResponse, ObjectDefinition, ReasonMatch, RelationDefinition,
};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::AppContext;
use crate::error::{OdpError, Result};
use crate::transport::V3Api;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchemaOperation {
	CreateField,
	CreateObject,
	CreateRelation,
	CreateIdentifier,
	EnableModule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conflict {
	FieldExists,
	ObjectExists,
	RelationExists,
	IdentifierExists,
	ModuleAlreadyEnabled,
}

impl Conflict {
	fn into_error(self, source: HttpError) -> OdpError {
		match self {
			Conflict::FieldExists => OdpError::FieldExists(source),
			Conflict::ObjectExists => OdpError::ObjectExists(source),
			Conflict::RelationExists => OdpError::RelationExists(source),
			Conflict::IdentifierExists => OdpError::IdentifierExists(source),
			Conflict::ModuleAlreadyEnabled => OdpError::ModuleAlreadyEnabled(source),
		}
	}
}

struct ConflictRule {
	operation: SchemaOperation,
	field: &'static str,
	reason: ReasonMatch,
	conflict: Conflict,
}

const CONFLICT_RULES: &[ConflictRule] = &[
	ConflictRule {
		operation: SchemaOperation::CreateField,
		field: "name",
		reason: ReasonMatch::Prefix("already used"),
		conflict: Conflict::FieldExists,
	},
	ConflictRule {
		operation: SchemaOperation::CreateObject,
		field: "name",
		reason: ReasonMatch::Prefix("already used"),
		conflict: Conflict::ObjectExists,
	},
	ConflictRule {
		operation: SchemaOperation::CreateRelation,
		field: "name",
		reason: ReasonMatch::Prefix("already used"),
		conflict: Conflict::RelationExists,
	},
	ConflictRule {
		operation: SchemaOperation::CreateIdentifier,
		field: "customers.name",
		reason: ReasonMatch::Prefix("already used"),
		conflict: Conflict::IdentifierExists,
	},
	ConflictRule {
		operation: SchemaOperation::EnableModule,
		field: "module",
		reason: ReasonMatch::Exact("already enabled"),
		conflict: Conflict::ModuleAlreadyEnabled,
	},
];

fn classify(operation: SchemaOperation, err: OdpError) -> OdpError {
	let OdpError::Http(http) = err else {
		return err;
	};
	if http.code() != ErrorCode::Non2xx {
		return OdpError::Http(http);
	}

	let invalids = http.invalids();
	let matched = CONFLICT_RULES
		.iter()
		.filter(|rule| rule.operation == operation)
		.find(|rule| invalids_contain(&invalids, rule.field, |reason| rule.reason.matches(reason)));

	match matched {
		Some(rule) => {
			debug!(operation = ?operation, conflict = ?rule.conflict, "schema conflict");
			rule.conflict.into_error(http)
		}
		None => OdpError::Http(http),
	}
}

#[derive(Serialize)]
struct EnableModuleRequest<'a> {
	module: &'a str,
}

pub struct SchemaApi<'a> {
	api: &'a V3Api,
}

impl<'a> SchemaApi<'a> {
	pub fn new(api: &'a V3Api) -> Self {
		Self { api }
	}

	/// Fetches one object definition, failing with `ObjectNotFound` on a 404.
	pub async fn get_object(&self, name: &str) -> Result<HttpResponse<ObjectDefinition>> {
		self
			.api
			.get(&format!("/schema/objects/{name}"))
			.await
			.map_err(|err| match err {
				OdpError::Http(http) if http.status() == Some(StatusCode::NOT_FOUND) => {
					OdpError::ObjectNotFound(http)
				}
				other => other,
			})
	}

	pub async fn get_all_objects(&self) -> Result<HttpResponse<Vec<ObjectDefinition>>> {
		self.api.get("/schema/objects").await
	}

	pub async fn create_object(
		&self,
		object: &ObjectDefinition,
	) -> Result<HttpResponse<ObjectDefinition>> {
		if let Some(context) = self.api.app_context() {
			validate_object(&context, object)?;
		}
		self
			.api
			.post("/schema/objects", object)
			.await
			.map_err(|err| classify(SchemaOperation::CreateObject, err))
	}

	/// Adds a field to `object`, e.g. `customers`.
	pub async fn create_field(
		&self,
		object: &str,
		field: &FieldDefinition,
	) -> Result<HttpResponse<Value>> {
		if let Some(context) = self.api.app_context() {
			validate_field(&context, object, field)?;
		}
		self
			.api
			.post(&format!("/schema/objects/{object}/fields"), field)
			.await
			.map_err(|err| classify(SchemaOperation::CreateField, err))
	}

	/// Adds a relation from `object` to `relation.child_object`.
	pub async fn create_relation(
		&self,
		object: &str,
		relation: &RelationDefinition,
	) -> Result<HttpResponse<Value>> {
		if let Some(context) = self.api.app_context() {
			validate_relation(&context, relation)?;
		}
		self
			.api
			.post(&format!("/schema/objects/{object}/relations"), relation)
			.await
			.map_err(|err| classify(SchemaOperation::CreateRelation, err))
	}

	pub async fn create_identifier(
		&self,
		identifier: &IdentifierDefinition,
	) -> Result<HttpResponse<CreateIdentifierResponse>> {
		if let Some(context) = self.api.app_context() {
			validate_identifier(&context, identifier)?;
		}
		self
			.api
			.post("/schema/identifiers", identifier)
			.await
			.map_err(|err| classify(SchemaOperation::CreateIdentifier, err))
	}

	pub async fn get_enabled_modules(&self) -> Result<HttpResponse<ModulesResponse>> {
		self.api.get("/schema/modules").await
	}

	pub async fn enable_module(&self, module: &str) -> Result<HttpResponse<ModulesResponse>> {
		self
			.api
			.post("/schema/modules", &EnableModuleRequest { module })
			.await
			.map_err(|err| classify(SchemaOperation::EnableModule, err))
	}
}

fn require_prefix(kind: &str, value: &str, prefix: &str) -> Result<()> {
	if value.starts_with(prefix) {
		Ok(())
	} else {
		Err(OdpError::SchemaValidation(format!(
			"{kind} {value} must be prefixed with {prefix}"
		)))
	}
}

/// Fields on an object the app owns are exempt.
fn validate_field(context: &AppContext, object: &str, field: &FieldDefinition) -> Result<()> {
	let Some(prefix) = context.name_prefix() else {
		return Ok(());
	};
	if object.starts_with(&prefix) {
		return Ok(());
	}
	require_prefix("field name", &field.name, &prefix)?;
	require_prefix("field display name", &field.display_name, &context.display_name)
}

fn validate_object(context: &AppContext, object: &ObjectDefinition) -> Result<()> {
	let Some(prefix) = context.name_prefix() else {
		return Ok(());
	};
	require_prefix("object name", &object.name, &prefix)?;
	if let Some(alias) = &object.alias {
		require_prefix("object alias", alias, &prefix)?;
	}
	require_prefix("object display name", &object.display_name, &context.display_name)
}

/// Only relations joining from an app-owned parent field are checked.
fn validate_relation(context: &AppContext, relation: &RelationDefinition) -> Result<()> {
	let Some(prefix) = context.name_prefix() else {
		return Ok(());
	};
	if !relation
		.join_fields
		.iter()
		.any(|join| join.parent.starts_with(&prefix))
	{
		return Ok(());
	}
	require_prefix("relation name", &relation.name, &prefix)?;
	require_prefix(
		"relation display name",
		&relation.display_name,
		&context.display_name,
	)
}

fn validate_identifier(context: &AppContext, identifier: &IdentifierDefinition) -> Result<()> {
	let Some(prefix) = context.name_prefix() else {
		return Ok(());
	};
	require_prefix("identifier name", &identifier.name, &prefix)?;
	require_prefix(
		"identifier display name",
		&identifier.display_name,
		&context.display_name,
	)
}
