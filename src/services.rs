// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

// Collaborating SDK services. The module only talks to them through these traits, so that the
// handlers can run against in-memory implementations.

pub mod assembly_util;
pub mod data_file_util;
pub mod kbase_report;
pub mod rpc;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ContigFilterError;

/// A local FastA copy of an Assembly object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FastaFile {
    pub path: PathBuf,
    pub assembly_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedObject {
    #[serde(rename = "ref")]
    pub object_ref: String,
    pub description: String,
}

/// Summary handed to the report service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub objects_created: Vec<CreatedObject>,
    pub text_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportInfo {
    pub name: String,
    #[serde(rename = "ref")]
    pub report_ref: String,
}

pub trait AssemblyStore {
    fn get_assembly_as_fasta(&self, assembly_ref: &str) -> Result<FastaFile, ContigFilterError>;

    /// Saves the FastA file at `path` as a new Assembly object and returns its reference.
    fn save_assembly_from_fasta(
        &self,
        path: &Path,
        workspace_name: &str,
        assembly_name: &str,
    ) -> Result<String, ContigFilterError>;
}

pub trait ObjectStore {
    /// The `data` member of the referenced workspace object.
    fn get_object_data(&self, object_ref: &str) -> Result<Value, ContigFilterError>;
}

pub trait ReportStore {
    fn create_report(
        &self,
        report: &Report,
        workspace_name: &str,
    ) -> Result<ReportInfo, ContigFilterError>;
}
