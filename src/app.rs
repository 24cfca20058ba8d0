// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use log::info;
use serde::Serialize;
use serde_json::Value;

use crate::{
    config::Config,
    errors::ContigFilterError,
    filter::{filter_records, LengthBounds},
    metadata::{format_metadata, AssemblyMetadata},
    params::{FilterContigsMaxParams, FilterContigsParams, MetadataReportParams},
    seq::fasta::{open_fasta_file, write_fasta_file},
    services::{
        assembly_util::AssemblyUtilClient, data_file_util::DataFileUtilClient,
        kbase_report::KBaseReportClient, AssemblyStore, CreatedObject, ObjectStore, Report,
        ReportStore,
    },
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_URL: &str = "https://github.com/landml/landContigFilter.git";
// Overridable at build time through the GIT_COMMIT_HASH environment variable.
pub const GIT_COMMIT_HASH: &str = match option_env!("GIT_COMMIT_HASH") {
    Some(hash) => hash,
    None => "a79f1ac900c780ffd5fe3c13b1c078b17ce4bbd0",
};

// Name of the filtered FastA in the scratch directory. Not unique per call: concurrent calls
// sharing a scratch directory must be isolated by the host.
pub const FILTERED_FASTA: &str = "filtered.fasta";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterContigsResults {
    pub report_name: String,
    pub report_ref: String,
    pub assembly_output: String,
    pub n_initial_contigs: u64,
    pub n_contigs_removed: u64,
    pub n_contigs_remaining: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssemblyMetadataResults {
    pub report_name: String,
    pub report_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub state: String,
    pub message: String,
    pub version: String,
    pub git_url: String,
    pub git_commit_hash: String,
}

/// The module implementation: one instance serves any number of sequential calls and keeps no
/// state between them.
pub struct ContigFilter {
    config: Config,
    assemblies: Box<dyn AssemblyStore>,
    objects: Box<dyn ObjectStore>,
    reports: Box<dyn ReportStore>,
}

impl ContigFilter {
    /// Connects to the collaborating services through the callback URL.
    pub fn new(config: Config) -> Result<Self, ContigFilterError> {
        let assemblies = AssemblyUtilClient::new(&config)?;
        let objects = DataFileUtilClient::new(&config)?;
        let reports = KBaseReportClient::new(&config)?;
        Ok(ContigFilter::with_services(
            config,
            Box::new(assemblies),
            Box::new(objects),
            Box::new(reports),
        ))
    }

    pub fn with_services(
        config: Config,
        assemblies: Box<dyn AssemblyStore>,
        objects: Box<dyn ObjectStore>,
        reports: Box<dyn ReportStore>,
    ) -> Self {
        ContigFilter {
            config,
            assemblies,
            objects,
            reports,
        }
    }

    /// Keeps contigs at least `min_length` long.
    pub fn filter_contigs(&self, params: &Value) -> Result<FilterContigsResults, ContigFilterError> {
        info!("Starting Filter Contigs function. Params={}", params);
        info!("Validating parameters.");
        let params = FilterContigsParams::from_value(params)?;
        self.filter_assembly(
            &params.workspace_name,
            &params.assembly_input_ref,
            params.bounds(),
        )
    }

    /// Keeps contigs whose length lies in `[min_length, max_length]`.
    pub fn filter_contigs_max(
        &self,
        params: &Value,
    ) -> Result<FilterContigsResults, ContigFilterError> {
        info!("Starting Filter Contigs Min/Max function. Params={}", params);
        info!("Validating parameters.");
        let params = FilterContigsMaxParams::from_value(params)?;
        self.filter_assembly(
            &params.workspace_name,
            &params.assembly_input_ref,
            params.bounds(),
        )
    }

    fn filter_assembly(
        &self,
        workspace_name: &str,
        assembly_ref: &str,
        bounds: LengthBounds,
    ) -> Result<FilterContigsResults, ContigFilterError> {
        info!("Downloading Assembly data as a Fasta file.");
        let fasta = self.assemblies.get_assembly_as_fasta(assembly_ref)?;

        info!("Filtering contigs, length {}", bounds);
        let outcome = filter_records(open_fasta_file(&fasta.path)?, bounds)?;
        info!("{}", outcome.summary());

        let filtered_path = self.config.scratch.join(FILTERED_FASTA);
        write_fasta_file(&filtered_path, &outcome.retained)?;

        info!("Uploading filtered Assembly data.");
        let assembly_output = self.assemblies.save_assembly_from_fasta(
            &filtered_path,
            workspace_name,
            &fasta.assembly_name,
        )?;

        let report = Report {
            objects_created: vec![CreatedObject {
                object_ref: assembly_output.clone(),
                description: String::from("Filtered contigs"),
            }],
            text_message: outcome.summary(),
        };
        let report_info = self.reports.create_report(&report, workspace_name)?;

        let output = FilterContigsResults {
            report_name: report_info.name,
            report_ref: report_info.report_ref,
            assembly_output,
            n_initial_contigs: outcome.n_total,
            n_contigs_removed: outcome.n_removed(),
            n_contigs_remaining: outcome.n_remaining,
        };
        info!("returning: {:?}", output);
        Ok(output)
    }

    /// Reports an assembly's stored metadata as text.
    pub fn assembly_metadata_report(
        &self,
        params: &Value,
    ) -> Result<AssemblyMetadataResults, ContigFilterError> {
        info!("Starting Assembly MetaData Report Function. Params={}", params);
        info!("Validating parameters.");
        let params = MetadataReportParams::from_value(params)?;

        info!("Fetching Assembly metadata.");
        let data = self.objects.get_object_data(&params.assembly_input_ref)?;
        let metadata = AssemblyMetadata::from_value(data)?;
        let text = format_metadata(&metadata, params.show_contigs)?;
        info!("{}", text);

        let report = Report {
            objects_created: vec![CreatedObject {
                object_ref: params.assembly_input_ref.clone(),
                description: String::from("AssemblyMetadata"),
            }],
            text_message: text,
        };
        let report_info = self.reports.create_report(&report, &params.workspace_name)?;

        let output = AssemblyMetadataResults {
            report_name: report_info.name,
            report_ref: report_info.report_ref,
        };
        info!("returning: {:?}", output);
        Ok(output)
    }

    pub fn status(&self) -> Status {
        status()
    }
}

pub fn status() -> Status {
    Status {
        state: String::from("OK"),
        message: String::new(),
        version: String::from(VERSION),
        git_url: String::from(GIT_URL),
        git_commit_hash: String::from(GIT_COMMIT_HASH),
    }
}
