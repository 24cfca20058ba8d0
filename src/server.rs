// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

// JSON-RPC 1.1 dispatch for the module's own methods, as used by the SDK job runner.

use log::{error, info};
use serde::Serialize;
use serde_json::{json, Value};

use crate::app::ContigFilter;
use crate::config::SERVICE_NAME;
use crate::errors::ContigFilterError;

const METHOD_NOT_FOUND: i64 = -32601;
const PARSE_ERROR: i64 = -32700;

/// The response document for one call, along with the error it carries, if any.
#[derive(Debug)]
pub struct Outcome {
    pub response: Value,
    pub error: Option<ContigFilterError>,
}

/// Handles one call and always produces a response document, carrying either `result` or
/// `error`.
pub fn dispatch(module: &ContigFilter, request: &Value) -> Value {
    handle(module, request).response
}

/// Parses a raw request body; unparseable input yields a parse-error response.
pub fn dispatch_str(module: &ContigFilter, body: &str) -> Value {
    handle_str(module, body).response
}

pub fn handle_str(module: &ContigFilter, body: &str) -> Outcome {
    match serde_json::from_str::<Value>(body) {
        Ok(request) => handle(module, &request),
        Err(e) => failure(
            &Value::from("1.1"),
            &Value::Null,
            ContigFilterError::Rpc {
                code: PARSE_ERROR,
                message: format!("Parse error: {}", e),
            },
        ),
    }
}

pub fn handle(module: &ContigFilter, request: &Value) -> Outcome {
    let id = request.get("id").cloned().unwrap_or(Value::Null);
    let version = request
        .get("version")
        .cloned()
        .unwrap_or_else(|| Value::from("1.1"));

    let Some(method) = request.get("method").and_then(Value::as_str) else {
        let e = ContigFilterError::Rpc {
            code: PARSE_ERROR,
            message: String::from("No method in request"),
        };
        return failure(&version, &id, e);
    };
    let params = request
        .get("params")
        .and_then(Value::as_array)
        .and_then(|p| p.first())
        .cloned()
        .unwrap_or(Value::Null);

    match call(module, method, &params) {
        Ok(result) => {
            info!("{} finished", method);
            Outcome {
                response: json!({ "version": version, "id": id, "result": [result] }),
                error: None,
            }
        }
        Err(e) => {
            error!("{} failed: {}", method, e);
            failure(&version, &id, e)
        }
    }
}

fn call(module: &ContigFilter, method: &str, params: &Value) -> Result<Value, ContigFilterError> {
    let local = method
        .strip_prefix(SERVICE_NAME)
        .and_then(|m| m.strip_prefix('.'));
    match local {
        Some("filter_contigs") => to_value(module.filter_contigs(params)),
        Some("filter_contigs_max") => to_value(module.filter_contigs_max(params)),
        Some("assembly_metadata_report") => to_value(module.assembly_metadata_report(params)),
        Some("status") => to_value(Ok(module.status())),
        _ => Err(ContigFilterError::Rpc {
            code: METHOD_NOT_FOUND,
            message: format!("Unknown method: {}", method),
        }),
    }
}

pub fn is_error(response: &Value) -> bool {
    response.get("error").is_some_and(|e| !e.is_null())
}

fn to_value<T: Serialize>(result: Result<T, ContigFilterError>) -> Result<Value, ContigFilterError> {
    Ok(serde_json::to_value(result?)?)
}

fn failure(version: &Value, id: &Value, e: ContigFilterError) -> Outcome {
    let message = e.to_string();
    Outcome {
        response: json!({
            "version": version,
            "id": id,
            "error": {
                "name": e.name(),
                "code": e.code(),
                "message": message,
                "error": message,
            }
        }),
        error: Some(e),
    }
}
