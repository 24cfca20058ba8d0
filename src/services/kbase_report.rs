// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use serde_json::json;

use crate::config::Config;
use crate::errors::ContigFilterError;
use crate::services::rpc::RpcClient;
use crate::services::{Report, ReportInfo, ReportStore};

pub struct KBaseReportClient {
    rpc: RpcClient,
}

impl KBaseReportClient {
    pub fn new(config: &Config) -> Result<Self, ContigFilterError> {
        Ok(KBaseReportClient {
            rpc: RpcClient::new(config)?,
        })
    }
}

impl ReportStore for KBaseReportClient {
    fn create_report(
        &self,
        report: &Report,
        workspace_name: &str,
    ) -> Result<ReportInfo, ContigFilterError> {
        self.rpc.call(
            "KBaseReport.create",
            json!({ "report": report, "workspace_name": workspace_name }),
        )
    }
}
