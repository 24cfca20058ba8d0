// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

// Minimal blocking JSON-RPC 1.1 client, as spoken by the SDK callback server.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::config::Config;
use crate::errors::ContigFilterError;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

pub struct RpcClient {
    url: String,
    token: Option<String>,
    service_ver: String,
    client: reqwest::blocking::Client,
}

impl RpcClient {
    pub fn new(config: &Config) -> Result<Self, ContigFilterError> {
        // Collaborator calls (e.g. saving a large assembly) may run for a long time.
        let no_timeout: Option<Duration> = None;
        let client = reqwest::blocking::Client::builder()
            .timeout(no_timeout)
            .build()?;
        Ok(RpcClient {
            url: config.callback_url.clone(),
            token: config.token.clone(),
            service_ver: config.service_ver.clone(),
            client,
        })
    }

    /// Calls `method` (e.g. `AssemblyUtil.get_assembly_as_fasta`) with a single argument and
    /// decodes the first element of the result list.
    pub fn call<T: DeserializeOwned>(&self, method: &str, arg: Value) -> Result<T, ContigFilterError> {
        let service = method.split('.').next().unwrap_or(method);
        let body = request_body(method, arg, &self.service_ver);
        debug!("POST {} {}", self.url, method);

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(token) = &self.token {
            request = request.header(reqwest::header::AUTHORIZATION, token.as_str());
        }
        let response = request.send()?;
        let status = response.status();
        let text = response.text()?;

        let value: Value = serde_json::from_str(&text).map_err(|_| {
            ContigFilterError::upstream(
                service,
                format!("{} returned a non-JSON response (status={}): {}", method, status, text.trim()),
            )
        })?;
        let result = result_of(service, value)?;
        serde_json::from_value(result).map_err(|e| {
            ContigFilterError::upstream(service, format!("unexpected result from {}: {}", method, e))
        })
    }
}

fn request_body(method: &str, arg: Value, service_ver: &str) -> Value {
    json!({
        "version": "1.1",
        "method": method,
        "params": [arg],
        "id": NEXT_ID.fetch_add(1, Ordering::Relaxed).to_string(),
        "context": {"service_ver": service_ver},
    })
}

/// Extracts `result[0]` from a JSON-RPC response, turning an `error` member into an upstream
/// error.
pub fn result_of(service: &str, mut response: Value) -> Result<Value, ContigFilterError> {
    if let Some(error) = response.get("error").filter(|e| !e.is_null()) {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or_else(|| error.to_string());
        return Err(ContigFilterError::upstream(service, message));
    }
    match response.get_mut("result").map(Value::take) {
        Some(Value::Array(mut items)) if !items.is_empty() => Ok(items.swap_remove(0)),
        Some(Value::Array(_)) | Some(Value::Null) | None => Ok(Value::Null),
        Some(other) => Ok(other),
    }
}
