// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use crate::app::{self, ContigFilter};
use crate::config::Config;
use crate::errors::ContigFilterError;
use crate::server;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None) ]
struct Cli {
    /// Callback service URL (default: $SDK_CALLBACK_URL)
    #[arg(long = "callback-url", global = true)]
    callback_url: Option<String>,

    /// Scratch directory (default: from the deploy config)
    #[arg(long, global = true)]
    scratch: Option<PathBuf>,

    /// Deploy config file (default: $KB_DEPLOYMENT_CONFIG)
    #[arg(long = "deploy-config", global = true)]
    deploy_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one JSON-RPC job: read the call from INPUT, write the response to OUTPUT
    Async {
        input: PathBuf,
        output: PathBuf,
        /// Auth token (default: $KB_AUTH_TOKEN)
        token: Option<String>,
    },

    /// Print module status and exit
    Status,

    /// Filter contigs by length
    FilterContigs {
        #[arg(short, long = "workspace-name")]
        workspace_name: String,

        #[arg(short, long = "assembly-ref")]
        assembly_ref: String,

        #[arg(short, long = "min-length")]
        min_length: i64,

        /// Also drop contigs longer than this
        #[arg(short = 'M', long = "max-length")]
        max_length: Option<i64>,
    },

    /// Report an assembly's metadata
    MetadataReport {
        #[arg(short, long = "workspace-name")]
        workspace_name: String,

        #[arg(short, long = "assembly-ref")]
        assembly_ref: String,

        #[arg(short, long = "show-contigs")]
        show_contigs: bool,
    },
}

fn build_module(cli: &Cli, token: Option<String>) -> Result<ContigFilter, ContigFilterError> {
    let config = Config::from_env(
        cli.callback_url.clone(),
        cli.scratch.clone(),
        cli.deploy_config.clone(),
    )?;
    let config = match token {
        Some(token) => config.with_token(Some(token)),
        None => config,
    };
    info!("callback URL: {}, scratch: {}", config.callback_url, config.scratch.display());
    ContigFilter::new(config)
}

/// Runs one job: reads the call from `input` and writes the response document to `output`. A
/// failed call still leaves its `error` document behind, and the error is returned as is.
fn run_job(module: &ContigFilter, input: &Path, output: &Path) -> Result<(), ContigFilterError> {
    let body = fs::read_to_string(input)?;
    let outcome = server::handle_str(module, &body);
    fs::write(output, serde_json::to_string_pretty(&outcome.response)?)?;
    match outcome.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn print_json(value: &Value) -> Result<(), ContigFilterError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn run() -> Result<(), ContigFilterError> {
    env_logger::init();
    info!("Starting log");

    let cli = Cli::parse();

    match &cli.command {
        Command::Status => print_json(&serde_json::to_value(app::status())?),
        Command::Async {
            input,
            output,
            token,
        } => {
            let module = build_module(&cli, token.clone())?;
            run_job(&module, input, output)
        }
        Command::FilterContigs {
            workspace_name,
            assembly_ref,
            min_length,
            max_length,
        } => {
            let module = build_module(&cli, None)?;
            let mut params = json!({
                "workspace_name": workspace_name,
                "assembly_input_ref": assembly_ref,
                "min_length": min_length,
            });
            let result = match max_length {
                Some(max) => {
                    params["max_length"] = json!(max);
                    module.filter_contigs_max(&params)?
                }
                None => module.filter_contigs(&params)?,
            };
            print_json(&serde_json::to_value(result)?)
        }
        Command::MetadataReport {
            workspace_name,
            assembly_ref,
            show_contigs,
        } => {
            let module = build_module(&cli, None)?;
            let params = json!({
                "workspace_name": workspace_name,
                "assembly_input_ref": assembly_ref,
                "showContigs": i64::from(*show_contigs),
            });
            let result = module.assembly_metadata_report(&params)?;
            print_json(&serde_json::to_value(result)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{AssemblyStore, FastaFile, ObjectStore, Report, ReportInfo, ReportStore};
    use clap::CommandFactory;
    use tempfile::TempDir;

    struct Offline;

    impl AssemblyStore for Offline {
        fn get_assembly_as_fasta(&self, _r: &str) -> Result<FastaFile, ContigFilterError> {
            Err(ContigFilterError::upstream("AssemblyUtil", "offline"))
        }
        fn save_assembly_from_fasta(
            &self,
            _p: &Path,
            _w: &str,
            _n: &str,
        ) -> Result<String, ContigFilterError> {
            Err(ContigFilterError::upstream("AssemblyUtil", "offline"))
        }
    }

    impl ObjectStore for Offline {
        fn get_object_data(&self, _r: &str) -> Result<Value, ContigFilterError> {
            Err(ContigFilterError::upstream("DataFileUtil", "offline"))
        }
    }

    impl ReportStore for Offline {
        fn create_report(&self, _r: &Report, _w: &str) -> Result<ReportInfo, ContigFilterError> {
            Err(ContigFilterError::upstream("KBaseReport", "offline"))
        }
    }

    fn job_rig(call: &Value) -> (TempDir, ContigFilter, PathBuf, PathBuf) {
        let dir = TempDir::new().unwrap();
        let module = ContigFilter::with_services(
            Config::new("http://localhost:5000", dir.path()),
            Box::new(Offline),
            Box::new(Offline),
            Box::new(Offline),
        );
        let input = dir.path().join("input.json");
        let output = dir.path().join("output.json");
        fs::write(&input, call.to_string()).unwrap();
        (dir, module, input, output)
    }

    fn read_output(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_run_job_writes_result() {
        let (_dir, module, input, output) = job_rig(
            &json!({"version": "1.1", "id": "7", "method": "landContigFilter.status", "params": []}),
        );
        run_job(&module, &input, &output).unwrap();
        let doc = read_output(&output);
        assert_eq!(doc["id"], "7");
        assert_eq!(doc["result"][0]["state"], "OK");
        assert!(doc.get("error").is_none());
    }

    #[test]
    fn test_run_job_failure_writes_error_and_keeps_category() {
        let (_dir, module, input, output) = job_rig(&json!({
            "version": "1.1",
            "id": "8",
            "method": "landContigFilter.filter_contigs",
            "params": [{"workspace_name": "ws"}]
        }));
        let err = run_job(&module, &input, &output).unwrap_err();
        assert!(matches!(err, ContigFilterError::InvalidParameter(_)));
        let doc = read_output(&output);
        assert_eq!(doc["error"]["name"], "InvalidParameter");
        assert_eq!(
            doc["error"]["message"],
            "Parameter assembly_input_ref is not set in input arguments"
        );
    }

    #[test]
    fn test_run_job_upstream_failure() {
        let (_dir, module, input, output) = job_rig(&json!({
            "id": "9",
            "method": "landContigFilter.filter_contigs",
            "params": [{"workspace_name": "ws", "assembly_input_ref": "1/2/3", "min_length": 10}]
        }));
        let err = run_job(&module, &input, &output).unwrap_err();
        assert!(matches!(err, ContigFilterError::Upstream { .. }));
        assert_eq!(read_output(&output)["error"]["name"], "UpstreamServiceError");
    }

    #[test]
    fn test_run_job_missing_input_is_io() {
        let (dir, module, _input, output) = job_rig(&json!({}));
        let err = run_job(&module, &dir.path().join("absent.json"), &output).unwrap_err();
        assert!(matches!(err, ContigFilterError::Io(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_filter_with_max() {
        let cli = Cli::try_parse_from([
            "contig_filter",
            "--scratch",
            "/tmp",
            "filter-contigs",
            "-w",
            "ws",
            "-a",
            "1/2/3",
            "-m",
            "10",
            "-M",
            "500",
        ])
        .unwrap();
        assert_eq!(cli.scratch, Some(PathBuf::from("/tmp")));
        match cli.command {
            Command::FilterContigs {
                min_length,
                max_length,
                ..
            } => {
                assert_eq!(min_length, 10);
                assert_eq!(max_length, Some(500));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_async_job() {
        let cli = Cli::try_parse_from(["contig_filter", "async", "in.json", "out.json"]).unwrap();
        match cli.command {
            Command::Async { input, token, .. } => {
                assert_eq!(input, PathBuf::from("in.json"));
                assert_eq!(token, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
