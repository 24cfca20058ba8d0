// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

// Request validation. Each request arrives as an untyped JSON mapping and leaves as a typed
// struct; checks run in a fixed order and stop at the first violation.

use serde_json::{Map, Value};

use crate::errors::ContigFilterError;
use crate::filter::LengthBounds;

type Fields = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterContigsParams {
    pub workspace_name: String,
    pub assembly_input_ref: String,
    pub min_length: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterContigsMaxParams {
    pub workspace_name: String,
    pub assembly_input_ref: String,
    pub min_length: u64,
    pub max_length: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataReportParams {
    pub workspace_name: String,
    pub assembly_input_ref: String,
    pub show_contigs: bool,
}

impl FilterContigsParams {
    pub fn from_value(params: &Value) -> Result<Self, ContigFilterError> {
        let fields = as_fields(params)?;
        let workspace_name = required_string(fields, "workspace_name")?;
        let assembly_input_ref = required_string(fields, "assembly_input_ref")?;
        let min_length = min_length(fields)?;
        Ok(FilterContigsParams {
            workspace_name,
            assembly_input_ref,
            min_length: clamp_length(min_length),
        })
    }

    pub fn bounds(&self) -> LengthBounds {
        LengthBounds::at_least(self.min_length)
    }
}

impl FilterContigsMaxParams {
    pub fn from_value(params: &Value) -> Result<Self, ContigFilterError> {
        let fields = as_fields(params)?;
        let workspace_name = required_string(fields, "workspace_name")?;
        let assembly_input_ref = required_string(fields, "assembly_input_ref")?;
        let min_length = min_length(fields)?;
        let max_length = required_int(fields, "max_length")?;
        if max_length < min_length {
            return Err(ContigFilterError::InvalidParameter(format!(
                "max_length parameter cannot be less than min_length ({})",
                max_length
            )));
        }
        Ok(FilterContigsMaxParams {
            workspace_name,
            assembly_input_ref,
            min_length: clamp_length(min_length),
            max_length: clamp_length(max_length),
        })
    }

    pub fn bounds(&self) -> LengthBounds {
        LengthBounds::between(self.min_length, self.max_length)
    }
}

impl MetadataReportParams {
    pub fn from_value(params: &Value) -> Result<Self, ContigFilterError> {
        let fields = as_fields(params)?;
        let workspace_name = required_string(fields, "workspace_name")?;
        let assembly_input_ref = required_string(fields, "assembly_input_ref")?;
        let show_contigs = required_int(fields, "showContigs")?;
        if show_contigs < 0 {
            return Err(ContigFilterError::InvalidParameter(format!(
                "showContigs parameter cannot be negative ({})",
                show_contigs
            )));
        }
        if show_contigs > 1 {
            return Err(ContigFilterError::InvalidParameter(format!(
                "showContigs parameter cannot be greater than one ({})",
                show_contigs
            )));
        }
        Ok(MetadataReportParams {
            workspace_name,
            assembly_input_ref,
            show_contigs: show_contigs == 1,
        })
    }
}

fn as_fields(params: &Value) -> Result<&Fields, ContigFilterError> {
    params.as_object().ok_or_else(|| {
        ContigFilterError::InvalidParameter(String::from(
            "Input parameters must be a mapping of parameter names to values",
        ))
    })
}

fn not_set(name: &str) -> ContigFilterError {
    ContigFilterError::InvalidParameter(format!(
        "Parameter {} is not set in input arguments",
        name
    ))
}

fn required_string(fields: &Fields, name: &str) -> Result<String, ContigFilterError> {
    match fields.get(name) {
        None | Some(Value::Null) => Err(not_set(name)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(not_set(name)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ContigFilterError::InvalidParameter(format!(
            "Parameter {} must be a string ({})",
            name, other
        ))),
    }
}

fn min_length(fields: &Fields) -> Result<i128, ContigFilterError> {
    let min_length = required_int(fields, "min_length")?;
    if min_length < 0 {
        return Err(ContigFilterError::InvalidParameter(format!(
            "min_length parameter cannot be negative ({})",
            min_length
        )));
    }
    Ok(min_length)
}

// Lengths beyond u64 can never be reached by a contig, so they saturate.
fn clamp_length(length: i128) -> u64 {
    u64::try_from(length).unwrap_or(u64::MAX)
}

fn required_int(fields: &Fields, name: &str) -> Result<i128, ContigFilterError> {
    let value = fields.get(name).ok_or_else(|| not_set(name))?;
    coerce_int(value).ok_or_else(|| {
        ContigFilterError::InvalidParameter(format!(
            "Cannot parse integer from {} parameter ({})",
            name,
            display_value(value)
        ))
    })
}

/// Lenient integer cast: integers, finite floats (truncated toward zero), booleans and decimal
/// strings. Wide enough for any JSON integer up to `u64::MAX`.
fn coerce_int(value: &Value) -> Option<i128> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i128)
            }),
        Value::Bool(b) => Some(i128::from(*b)),
        Value::String(s) => s.trim().parse::<i128>().ok(),
        _ => None,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
