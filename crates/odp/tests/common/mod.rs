// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use odp::{AppContext, OdpClient, OdpClientBuilder};
use tracing::subscriber::DefaultGuard;
use wiremock::MockServer;

pub const API_KEY: &str = "test-key.secret";

/// Formatted log output collected by [`capture_logs`].
#[derive(Debug, Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
	pub fn contents(&self) -> String {
		String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
	}

	/// Number of lines at `level` that mention `message`.
	pub fn count(&self, level: &str, message: &str) -> usize {
		self
			.contents()
			.lines()
			.filter(|line| line.contains(level) && line.contains(message))
			.count()
	}
}

impl io::Write for LogBuffer {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.0.lock().unwrap().extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

/// Sends this thread's `odp` events into a fresh buffer until the guard drops.
///
/// The default is thread-local, so callers must run on a current-thread runtime.
pub fn capture_logs() -> (LogBuffer, DefaultGuard) {
	let buffer = LogBuffer::default();
	let writer = buffer.clone();
	let subscriber = tracing_subscriber::fmt()
		.with_env_filter("odp=debug")
		.with_writer(move || writer.clone())
		.with_ansi(false)
		.without_time()
		.finish();
	(buffer, tracing::subscriber::set_default(subscriber))
}

pub fn base_path(server: &MockServer) -> String {
	format!("{}/v3/", server.uri())
}

pub fn builder(server: &MockServer) -> OdpClientBuilder {
	OdpClient::builder()
		.api_key(API_KEY)
		.api_base_path(base_path(server))
		.log_requests(false)
}

pub fn client(server: &MockServer) -> OdpClient {
	builder(server).build().expect("odp client")
}

pub fn app_context() -> AppContext {
	AppContext {
		app_id: "my_app".to_string(),
		display_name: "My App".to_string(),
		version: "1.0.0".to_string(),
		vendor: "acme".to_string(),
	}
}
