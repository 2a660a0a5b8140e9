// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use odp_core::{GqlRequest, GqlResponse, GqlResult};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;
use crate::transport::V3Api;

/// Runs a GraphQL query.
///
/// GraphQL errors come back in [`GqlResponse::errors`] on a 2xx response;
/// only transport failures are returned as `Err`.
pub async fn graphql<T>(
	api: &V3Api,
	query: &str,
	variables: Option<&Value>,
) -> Result<GqlResponse<T>>
where
	T: DeserializeOwned,
{
	let request = GqlRequest { query, variables };
	let response = api.post::<GqlResult<T>, _>("/graphql", &request).await?;
	Ok(GqlResponse::from(response))
}
