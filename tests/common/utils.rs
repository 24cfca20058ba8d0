// SPDX-License-Identifier: MIT 
// Copyright (c) 2025 Thomas Junier 

use std::{
    cell::RefCell,
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use serde_json::Value;
use tempfile::TempDir;

use contig_filter::{
    app::ContigFilter,
    config::Config,
    errors::ContigFilterError,
    seq::{fasta::read_fasta_file, record::SeqRecord},
    services::{AssemblyStore, FastaFile, ObjectStore, Report, ReportInfo, ReportStore},
};

#[allow(dead_code)]
#[derive(Default)]
pub struct Calls {
    pub fetched: Vec<String>,
    pub saved: Vec<Vec<SeqRecord>>,
    pub objects: Vec<String>,
    pub reports: Vec<Report>,
}

pub type CallLog = Rc<RefCell<Calls>>;

pub struct FakeAssemblies {
    pub log: CallLog,
    pub fasta_path: PathBuf,
}

impl AssemblyStore for FakeAssemblies {
    fn get_assembly_as_fasta(&self, assembly_ref: &str) -> Result<FastaFile, ContigFilterError> {
        self.log.borrow_mut().fetched.push(assembly_ref.to_string());
        Ok(FastaFile {
            path: self.fasta_path.clone(),
            assembly_name: String::from("TestAssembly2"),
        })
    }

    fn save_assembly_from_fasta(
        &self,
        path: &Path,
        _workspace_name: &str,
        _assembly_name: &str,
    ) -> Result<String, ContigFilterError> {
        let records = read_fasta_file(path)?;
        self.log.borrow_mut().saved.push(records);
        Ok(String::from("77/2/1"))
    }
}

pub struct FakeObjects {
    pub log: CallLog,
    pub data: Value,
}

impl ObjectStore for FakeObjects {
    fn get_object_data(&self, object_ref: &str) -> Result<Value, ContigFilterError> {
        self.log.borrow_mut().objects.push(object_ref.to_string());
        Ok(self.data.clone())
    }
}

pub struct FakeReports {
    pub log: CallLog,
}

impl ReportStore for FakeReports {
    fn create_report(
        &self,
        report: &Report,
        _workspace_name: &str,
    ) -> Result<ReportInfo, ContigFilterError> {
        self.log.borrow_mut().reports.push(report.clone());
        Ok(ReportInfo {
            name: String::from("report_test"),
            report_ref: String::from("77/3/1"),
        })
    }
}

/// FastA text with one record per length, named ctg_0, ctg_1, ...
#[allow(dead_code)]
pub fn fasta_with_lengths(lengths: &[usize]) -> String {
    let mut text = String::new();
    for (i, &len) in lengths.iter().enumerate() {
        let _ = writeln!(text, ">ctg_{} contig number {}", i, i);
        let seq = "ACGT".repeat(len / 4 + 1);
        // wrap at 60 columns like most FastA writers
        for chunk in seq.as_bytes()[..len].chunks(60) {
            text.push_str(std::str::from_utf8(chunk).expect("ascii"));
            text.push('\n');
        }
    }
    text
}

/// A module wired to in-memory services, reading `fasta` as the input assembly.
#[allow(dead_code)]
pub fn with_rig(fasta: &str, metadata: Value) -> (TempDir, ContigFilter, CallLog) {
    let dir = tempfile::tempdir().expect("tempdir");
    let fasta_path = dir.path().join("assembly.fa");
    fs::write(&fasta_path, fasta).expect("write fixture");
    let log: CallLog = Rc::new(RefCell::new(Calls::default()));
    let module = ContigFilter::with_services(
        Config::new("http://localhost:5000", dir.path()),
        Box::new(FakeAssemblies {
            log: log.clone(),
            fasta_path,
        }),
        Box::new(FakeObjects {
            log: log.clone(),
            data: metadata,
        }),
        Box::new(FakeReports { log: log.clone() }),
    );
    (dir, module, log)
}
