// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Batch size guard for write calls.

use serde::Serialize;

use crate::error::{ErrorCode, HttpError};

/// Maximum number of items accepted by a single batch write.
pub const BATCH_LIMIT: usize = 100;

/// Rejects batches larger than [`BATCH_LIMIT`] with `BatchLimitExceeded`.
pub fn check_batch<T>(items: &[T]) -> Result<(), HttpError> {
	if items.len() > BATCH_LIMIT {
		return Err(HttpError::for_code(ErrorCode::BatchLimitExceeded));
	}
	Ok(())
}

/// A write payload that is either a single item or a batch.
///
/// Serializes untagged: a single item is sent as a JSON object, a batch as an array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
	One(T),
	Many(Vec<T>),
}

impl<T> OneOrMany<T> {
	/// Applies the batch guard. Single items always pass.
	pub fn check(&self) -> Result<(), HttpError> {
		match self {
			OneOrMany::One(_) => Ok(()),
			OneOrMany::Many(items) => check_batch(items),
		}
	}

	pub fn len(&self) -> usize {
		match self {
			OneOrMany::One(_) => 1,
			OneOrMany::Many(items) => items.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn map<U, F>(self, mut f: F) -> OneOrMany<U>
	where
		F: FnMut(T) -> U,
	{
		match self {
			OneOrMany::One(item) => OneOrMany::One(f(item)),
			OneOrMany::Many(items) => OneOrMany::Many(items.into_iter().map(f).collect()),
		}
	}

	pub fn try_map<U, E, F>(self, mut f: F) -> Result<OneOrMany<U>, E>
	where
		F: FnMut(T) -> Result<U, E>,
	{
		match self {
			OneOrMany::One(item) => Ok(OneOrMany::One(f(item)?)),
			OneOrMany::Many(items) => Ok(OneOrMany::Many(
				items.into_iter().map(f).collect::<Result<_, _>>()?,
			)),
		}
	}

	pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
		match self {
			OneOrMany::One(item) => std::slice::from_mut(item).iter_mut(),
			OneOrMany::Many(items) => items.iter_mut(),
		}
	}

	/// Flattens into a batch. Endpoints that only accept arrays use this.
	pub fn into_vec(self) -> Vec<T> {
		match self {
			OneOrMany::One(item) => vec![item],
			OneOrMany::Many(items) => items,
		}
	}
}

impl<T> From<T> for OneOrMany<T> {
	fn from(item: T) -> Self {
		OneOrMany::One(item)
	}
}

impl<T> From<Vec<T>> for OneOrMany<T> {
	fn from(items: Vec<T>) -> Self {
		OneOrMany::Many(items)
	}
}
