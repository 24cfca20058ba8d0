// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::Config;
use crate::errors::ContigFilterError;
use crate::services::rpc::RpcClient;
use crate::services::ObjectStore;

pub struct DataFileUtilClient {
    rpc: RpcClient,
}

#[derive(Debug, Deserialize)]
struct GetObjectsResult {
    data: Vec<ObjectData>,
}

#[derive(Debug, Deserialize)]
struct ObjectData {
    data: Value,
}

impl DataFileUtilClient {
    pub fn new(config: &Config) -> Result<Self, ContigFilterError> {
        Ok(DataFileUtilClient {
            rpc: RpcClient::new(config)?,
        })
    }
}

impl ObjectStore for DataFileUtilClient {
    fn get_object_data(&self, object_ref: &str) -> Result<Value, ContigFilterError> {
        let result: GetObjectsResult = self.rpc.call(
            "DataFileUtil.get_objects",
            json!({ "object_refs": [object_ref] }),
        )?;
        result
            .data
            .into_iter()
            .next()
            .map(|obj| obj.data)
            .ok_or_else(|| {
                ContigFilterError::upstream(
                    "DataFileUtil",
                    format!("no object returned for {}", object_ref),
                )
            })
    }
}
