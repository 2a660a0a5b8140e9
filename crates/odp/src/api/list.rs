// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use odp_core::{
	check_batch, CreateListResponse, GetListsResponse, HttpResponse, Identifiers, ListUpdateRequest,
	ListUpdateResponse, OneOrMany,
};
use serde::Serialize;

use crate::error::Result;
use crate::transport::V3Api;

#[derive(Serialize)]
struct CreateListRequest<'a> {
	name: &'a str,
}

pub struct ListsApi<'a> {
	api: &'a V3Api,
}

impl<'a> ListsApi<'a> {
	pub fn new(api: &'a V3Api) -> Self {
		Self { api }
	}

	pub async fn create_list(&self, name: &str) -> Result<HttpResponse<CreateListResponse>> {
		self.api.post("/lists", &CreateListRequest { name }).await
	}

	pub async fn get_lists(&self) -> Result<HttpResponse<GetListsResponse>> {
		self.api.get("/lists").await
	}

	pub async fn subscribe(
		&self,
		list_id: &str,
		identifiers: impl Into<OneOrMany<Identifiers>>,
	) -> Result<HttpResponse<ListUpdateResponse>> {
		self
			.update_subscriptions(list_id, subscription_updates(identifiers.into(), true))
			.await
	}

	pub async fn unsubscribe(
		&self,
		list_id: &str,
		identifiers: impl Into<OneOrMany<Identifiers>>,
	) -> Result<HttpResponse<ListUpdateResponse>> {
		self
			.update_subscriptions(list_id, subscription_updates(identifiers.into(), false))
			.await
	}

	/// Applies subscription changes. Updates without their own `list_id` go to `list_id`.
	pub async fn update_subscriptions(
		&self,
		list_id: &str,
		updates: Vec<ListUpdateRequest>,
	) -> Result<HttpResponse<ListUpdateResponse>> {
		check_batch(&updates)?;
		let updates: Vec<ListUpdateRequest> = updates
			.into_iter()
			.map(|mut update| {
				update.list_id.get_or_insert_with(|| list_id.to_string());
				update
			})
			.collect();
		self.api.post("/lists/subscriptions", &updates).await
	}
}

fn subscription_updates(
	identifiers: OneOrMany<Identifiers>,
	subscribed: bool,
) -> Vec<ListUpdateRequest> {
	identifiers
		.into_vec()
		.into_iter()
		.map(|identifiers| ListUpdateRequest::new(identifiers, subscribed))
		.collect()
}
