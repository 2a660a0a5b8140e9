// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resource wrappers over [`V3Api`](crate::V3Api).
//!
//! Each function maps one SDK call onto a v3 endpoint. [`OdpClient`](crate::OdpClient)
//! exposes them as methods; they are public so a bare `V3Api` can be used too.

pub mod customer;
pub mod event;
pub mod graphql;
pub mod identifier;
pub mod list;
pub mod object;
pub mod schema;

pub use identifier::IdentifierApi;
pub use list::ListsApi;
pub use schema::SchemaApi;
