// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::path::Path;

use serde_json::json;

use crate::config::Config;
use crate::errors::ContigFilterError;
use crate::services::rpc::RpcClient;
use crate::services::{AssemblyStore, FastaFile};

pub struct AssemblyUtilClient {
    rpc: RpcClient,
}

impl AssemblyUtilClient {
    pub fn new(config: &Config) -> Result<Self, ContigFilterError> {
        Ok(AssemblyUtilClient {
            rpc: RpcClient::new(config)?,
        })
    }
}

impl AssemblyStore for AssemblyUtilClient {
    fn get_assembly_as_fasta(&self, assembly_ref: &str) -> Result<FastaFile, ContigFilterError> {
        self.rpc
            .call("AssemblyUtil.get_assembly_as_fasta", json!({ "ref": assembly_ref }))
    }

    fn save_assembly_from_fasta(
        &self,
        path: &Path,
        workspace_name: &str,
        assembly_name: &str,
    ) -> Result<String, ContigFilterError> {
        self.rpc.call(
            "AssemblyUtil.save_assembly_from_fasta",
            json!({
                "file": { "path": path.to_string_lossy() },
                "workspace_name": workspace_name,
                "assembly_name": assembly_name,
            }),
        )
    }
}
