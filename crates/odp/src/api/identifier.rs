// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identifier metadata, consent and reachability.
//!
//! Updates are always sent as an array, even for a single item, and
//! timestamps go out as epoch seconds.

use odp_core::{
	check_batch, encode_component, ConsentUpdate, GetConsentResponse, GetReachabilityResponse,
	HttpResponse, IdentifierMetadata, IdentifierMetadataResponse, OneOrMany, ReachabilityUpdate,
	V3SuccessResponse,
};

use crate::error::Result;
use crate::transport::V3Api;

pub struct IdentifierApi<'a> {
	api: &'a V3Api,
}

impl<'a> IdentifierApi<'a> {
	pub fn new(api: &'a V3Api) -> Self {
		Self { api }
	}

	/// Metadata stored against one identifier value.
	pub async fn get_metadata(
		&self,
		field_name: &str,
		value: &str,
	) -> Result<HttpResponse<IdentifierMetadataResponse>> {
		self.api.get(&lookup_path("identifiers", field_name, value)).await
	}

	pub async fn update_metadata(
		&self,
		updates: impl Into<OneOrMany<IdentifierMetadata>>,
	) -> Result<HttpResponse<V3SuccessResponse>> {
		let updates = updates.into().into_vec();
		check_batch(&updates)?;
		self.api.post("/identifiers", &updates).await
	}

	pub async fn get_consent(
		&self,
		field_name: &str,
		value: &str,
	) -> Result<HttpResponse<GetConsentResponse>> {
		self.api.get(&lookup_path("consent", field_name, value)).await
	}

	/// Fails with `InvalidTimestamp` before any I/O if a timestamp string does not parse.
	pub async fn update_consent(
		&self,
		updates: impl Into<OneOrMany<ConsentUpdate>>,
	) -> Result<HttpResponse<V3SuccessResponse>> {
		let updates = updates.into().into_vec();
		check_batch(&updates)?;
		let records = updates
			.iter()
			.map(ConsentUpdate::to_record)
			.collect::<std::result::Result<Vec<_>, _>>()?;
		self.api.post("/consent", &records).await
	}

	pub async fn get_reachability(
		&self,
		field_name: &str,
		value: &str,
	) -> Result<HttpResponse<GetReachabilityResponse>> {
		self.api.get(&lookup_path("reachability", field_name, value)).await
	}

	/// Fails with `InvalidTimestamp` before any I/O if a timestamp string does not parse.
	pub async fn update_reachability(
		&self,
		updates: impl Into<OneOrMany<ReachabilityUpdate>>,
	) -> Result<HttpResponse<V3SuccessResponse>> {
		let updates = updates.into().into_vec();
		check_batch(&updates)?;
		let records = updates
			.iter()
			.map(ReachabilityUpdate::to_record)
			.collect::<std::result::Result<Vec<_>, _>>()?;
		self.api.post("/reachability", &records).await
	}
}

fn lookup_path(resource: &str, field_name: &str, value: &str) -> String {
	format!(
		"/{resource}/{}?id={}",
		encode_component(field_name),
		encode_component(value)
	)
}
