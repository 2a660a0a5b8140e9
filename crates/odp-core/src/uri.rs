// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::borrow::Cow;

/// Joins URI parts with exactly one `/` at each seam.
///
/// Leading and trailing slashes on the outer ends are preserved.
pub fn join_uri<S: AsRef<str>>(parts: &[S]) -> String {
	let mut uri = String::new();
	for (index, part) in parts.iter().enumerate() {
		let part = part.as_ref();
		if index > 0 {
			match (uri.ends_with('/'), part.starts_with('/')) {
				(true, true) => {
					uri.pop();
				}
				(false, false) => uri.push('/'),
				_ => {}
			}
		}
		uri.push_str(part);
	}
	uri
}

/// Percent-encodes a single path or query component.
///
/// Only `A-Z a-z 0-9 - _ . ~` pass through. `!'()*` are escaped as well, which
/// servers decode to the same value.
pub fn encode_component(value: &str) -> Cow<'_, str> {
	urlencoding::encode(value)
}
