// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the ODP v3 SDK.
//!
//! This crate holds everything that does not touch the network:
//! - Payload types for events, customers, objects, identifiers, lists, schema and GraphQL
//! - The [`Payload`] sanitizer and the batch guard
//! - The normalized [`HttpResponse`] envelope and [`HttpError`]
//! - URI joining and path component encoding

pub mod batch;
pub mod customer;
pub mod error;
pub mod event;
pub mod graphql;
pub mod identifier;
pub mod invalids;
pub mod list;
pub mod payload;
pub mod schema;
pub mod timestamp;
pub mod uri;

pub use batch::{check_batch, OneOrMany, BATCH_LIMIT};
pub use customer::{CustomerPayload, CustomerResponse, TransformedCustomerPayload};
pub use error::{ErrorCode, HttpError, HttpResponse, V3SuccessResponse};
pub use event::{DataSource, EventPayload, EventResponse, Identifiers};
pub use graphql::{GqlError, GqlLocation, GqlRequest, GqlResponse, GqlResult};
pub use identifier::{
	ConsentRecord, ConsentUpdate, GetConsentResponse, GetReachabilityResponse, IdentifierMetadata,
	IdentifierMetadataResponse, ReachabilityRecord, ReachabilityUpdate, ReachabilityUpdateType,
};
pub use invalids::{invalids_contain, invalids_of, InvalidDetail, InvalidReason, ReasonMatch};
pub use list::{
	CreateListResponse, GetListsResponse, ListInfo, ListUpdate, ListUpdateRequest,
	ListUpdateResponse,
};
pub use payload::{Payload, PayloadOptions};
pub use schema::{
	CreateIdentifierResponse, FieldDefinition, FieldType, IdentifierDefinition, JoinField,
	MergeConfidence, ModulesResponse, ObjectDefinition, RelationDefinition,
};
pub use timestamp::{TimestampError, UpdateTimestamp};
pub use uri::{encode_component, join_uri};
