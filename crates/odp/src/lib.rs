// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rust SDK for the Optimizely Data Platform (ODP) v3 REST API.
//!
//! The client sends events, customer profiles and objects, manages identifiers,
//! lists and schema, and runs GraphQL queries. Every call goes through one
//! transport that adds authentication, retries gateway failures once and
//! normalizes responses into [`HttpResponse`] or [`OdpError`].
//!
//! # Quick Start
//!
//! ```ignore
//! use odp::{CustomerPayload, EventPayload, OdpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OdpClient::builder()
//!         .api_key("W4WzcEs-ABgXorzY7h1LCQ.secret")
//!         .build()?;
//!
//!     client.event(
//!         EventPayload::new("order")
//!             .action("purchase")
//!             .identifier("email", "jane@example.com")
//!             .data("revenue", 42.5),
//!     ).await?;
//!
//!     client.customer(
//!         CustomerPayload::new()
//!             .identifier("email", "jane@example.com")
//!             .attribute("name", "  Jane  "),
//!     ).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! Unset builder options come from the environment:
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `ODP_SDK_API_KEY` / `ZAIUS_SDK_API_KEY` | Private API key |
//! | `ODP_SDK_API_BASE_PATH` / `ZAIUS_SDK_API_BASE_PATH` | Base path override |
//! | `LOG_REQUESTS` | `true` logs every request and response at debug level |
//!
//! Each variable also accepts a `*_FILE` form naming a file to read. Without a
//! base path override the region is derived from the API key: public parts
//! ending in `-eu1` or `-au1` use those regions, anything else the US endpoint.
//!
//! # Batches
//!
//! Write calls accept a single item or a `Vec`. Batches over [`BATCH_LIMIT`]
//! fail with [`ErrorCode::BatchLimitExceeded`] without sending a request.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod global;
pub mod interceptor;
pub mod transport;

pub use client::{OdpClient, OdpClientBuilder};
pub use config::{AppContext, Config, ConfigHandle, ConfigOverrides, Region};
pub use error::{OdpError, Result};
pub use interceptor::{RequestDetail, RequestInterceptor};
pub use transport::{RequestOptions, V3Api};

pub use api::object::ObjectResponse;
pub use odp_common_config::SecretString;
pub use odp_core::{
	invalids_contain, ConsentUpdate, CreateIdentifierResponse, CreateListResponse, CustomerPayload,
	CustomerResponse, DataSource, ErrorCode, EventPayload, EventResponse, FieldDefinition, FieldType,
	GetConsentResponse, GetListsResponse, GetReachabilityResponse, GqlError, GqlResponse, HttpError,
	HttpResponse, IdentifierDefinition, IdentifierMetadata, IdentifierMetadataResponse, Identifiers,
	InvalidDetail, JoinField, ListInfo, ListUpdateRequest, ListUpdateResponse, MergeConfidence,
	ModulesResponse, ObjectDefinition, OneOrMany, Payload, PayloadOptions, ReachabilityUpdate,
	ReachabilityUpdateType, RelationDefinition, UpdateTimestamp, V3SuccessResponse, BATCH_LIMIT,
};
