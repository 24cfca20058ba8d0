// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::{fmt, io};

#[derive(Debug)]
pub enum ContigFilterError {
    /// Request parameter missing, unparseable or out of range.
    InvalidParameter(String),
    /// Failure reported by (or while talking to) a collaborating service.
    Upstream { service: String, message: String },
    /// Input data (FASTA stream, metadata document) that cannot be interpreted.
    MalformedInput(String),
    Io(io::Error),
    Config(String),
    /// Malformed JSON-RPC call (unparseable body, unknown method).
    Rpc { code: i64, message: String },
}

impl ContigFilterError {
    pub fn upstream(service: &str, message: impl Into<String>) -> Self {
        ContigFilterError::Upstream {
            service: service.to_string(),
            message: message.into(),
        }
    }

    /// Short name used in JSON-RPC error objects.
    pub fn name(&self) -> &'static str {
        match self {
            ContigFilterError::InvalidParameter(_) => "InvalidParameter",
            ContigFilterError::Upstream { .. } => "UpstreamServiceError",
            ContigFilterError::MalformedInput(_) => "MalformedInputData",
            ContigFilterError::Io(_) => "IOError",
            ContigFilterError::Config(_) => "ConfigurationError",
            ContigFilterError::Rpc { .. } => "JSONRPCError",
        }
    }

    /// JSON-RPC error code.
    pub fn code(&self) -> i64 {
        match self {
            ContigFilterError::InvalidParameter(_) => -32602,
            ContigFilterError::Rpc { code, .. } => *code,
            _ => -32000,
        }
    }
}

// These allow conversion to ContigFilterError, required for main() to return Result<()> and for
// '?' to work.

impl From<io::Error> for ContigFilterError {
    fn from(e: io::Error) -> Self {
        ContigFilterError::Io(e)
    }
}

impl From<reqwest::Error> for ContigFilterError {
    fn from(e: reqwest::Error) -> Self {
        let service = e
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| String::from("callback"));
        ContigFilterError::Upstream {
            service,
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for ContigFilterError {
    fn from(e: serde_json::Error) -> Self {
        ContigFilterError::MalformedInput(e.to_string())
    }
}

impl fmt::Display for ContigFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContigFilterError::InvalidParameter(msg) => write!(f, "{}", msg),
            ContigFilterError::Upstream { service, message } => {
                write!(f, "{} error: {}", service, message)
            }
            ContigFilterError::MalformedInput(msg) => write!(f, "Malformed input: {}", msg),
            ContigFilterError::Io(e) => write!(f, "I/O error: {}", e),
            ContigFilterError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ContigFilterError::Rpc { message, .. } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ContigFilterError {}
