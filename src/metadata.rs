// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

// Assembly metadata as stored by the workspace, and its plain-text rendering for reports.

use std::fmt::Write;

use itertools::Itertools;
use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::errors::ContigFilterError;

/// Scalar fields shown at the top of the report, in this order.
pub const SCALAR_FIELDS: [&str; 8] = [
    "assembly_id",
    "dna_size",
    "gc_content",
    "num_contigs",
    "fasta_handle_ref",
    "md5",
    "type",
    "taxon_ref",
];

/// Per-contig attributes, in column order.
pub const CONTIG_FIELDS: [&str; 4] = ["length", "gc_content", "contig_id", "description"];

/// Read-only view of an Assembly object's data. Key order of `base_counts` and `contigs` is the
/// order of the source document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssemblyMetadata {
    pub assembly_id: Option<Value>,
    pub dna_size: Option<Value>,
    pub gc_content: Option<Value>,
    pub num_contigs: Option<Value>,
    pub fasta_handle_ref: Option<Value>,
    pub md5: Option<Value>,
    #[serde(rename = "type")]
    pub assembly_type: Option<Value>,
    pub taxon_ref: Option<Value>,
    pub fasta_handle_info: Option<Map<String, Value>>,
    pub base_counts: Option<Map<String, Value>>,
    pub contigs: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContigInfo {
    pub length: Option<Value>,
    pub gc_content: Option<Value>,
    pub contig_id: Option<Value>,
    pub description: Option<Value>,
}

impl ContigInfo {
    fn field(&self, name: &str) -> Option<&Value> {
        match name {
            "length" => self.length.as_ref(),
            "gc_content" => self.gc_content.as_ref(),
            "contig_id" => self.contig_id.as_ref(),
            "description" => self.description.as_ref(),
            _ => None,
        }
    }
}

impl AssemblyMetadata {
    pub fn from_value(value: Value) -> Result<Self, ContigFilterError> {
        if !value.is_object() {
            return Err(ContigFilterError::MalformedInput(format!(
                "assembly data is not a mapping: {}",
                value
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn scalar(&self, name: &str) -> Option<&Value> {
        match name {
            "assembly_id" => self.assembly_id.as_ref(),
            "dna_size" => self.dna_size.as_ref(),
            "gc_content" => self.gc_content.as_ref(),
            "num_contigs" => self.num_contigs.as_ref(),
            "fasta_handle_ref" => self.fasta_handle_ref.as_ref(),
            "md5" => self.md5.as_ref(),
            "type" => self.assembly_type.as_ref(),
            "taxon_ref" => self.taxon_ref.as_ref(),
            _ => None,
        }
    }

    pub fn file_name(&self) -> Option<&Value> {
        self.fasta_handle_info
            .as_ref()
            .and_then(|info| info.get("node_file_name"))
    }
}

// Strings without quotes, everything else as JSON text.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Renders the metadata report text. The per-contig table is emitted whenever the document
/// carries contigs; `show_contigs` does not gate it.
pub fn format_metadata(
    doc: &AssemblyMetadata,
    show_contigs: bool,
) -> Result<String, ContigFilterError> {
    let base_counts = doc.base_counts.as_ref().ok_or_else(|| {
        ContigFilterError::MalformedInput(String::from(
            "assembly metadata has no base_counts field",
        ))
    })?;

    let mut text = String::from("\nAssembly Metadata\n");
    for name in SCALAR_FIELDS {
        if let Some(value) = doc.scalar(name) {
            // Writing to a String cannot fail.
            let _ = writeln!(text, "\t{:20} = {}", name, render_value(value));
        }
    }
    if let Some(file_name) = doc.file_name() {
        let _ = writeln!(text, "\t{:20} = {}", "filename", render_value(file_name));
    }

    text.push_str("BASE counts\n");
    for (base, count) in base_counts {
        let _ = writeln!(text, "\t{:5} = {}", base, render_value(count));
    }

    text.push_str("\nName\tLength\tGC content\tContigID\tDescription\n");
    if let Some(contigs) = &doc.contigs {
        debug!(
            "rendering {} contig rows (showContigs = {})",
            contigs.len(),
            show_contigs
        );
        for (name, raw) in contigs {
            let info = ContigInfo::deserialize(raw)?;
            let row = CONTIG_FIELDS
                .iter()
                .map(|field| info.field(field).map(render_value).unwrap_or_default())
                .join("\t");
            let _ = writeln!(text, "{}\t{}", name, row);
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> AssemblyMetadata {
        AssemblyMetadata::from_value(json!({
            "assembly_id": "test.fna",
            "dna_size": 1250,
            "gc_content": 0.41,
            "num_contigs": 2,
            "md5": "abc123",
            "type": "Unknown",
            "fasta_handle_info": {"node_file_name": "test.fna", "shock_id": "xyz"},
            "base_counts": {"G": 250, "A": 400, "T": 350, "C": 250},
            "contigs": {
                "ctg_b": {"length": 1000, "gc_content": 0.4, "contig_id": "ctg_b", "description": "chromosome"},
                "ctg_a": {"length": 250, "contig_id": "ctg_a"}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_format_layout() {
        let text = format_metadata(&sample(), true).unwrap();
        let expected = "\nAssembly Metadata\n\
            \tassembly_id          = test.fna\n\
            \tdna_size             = 1250\n\
            \tgc_content           = 0.41\n\
            \tnum_contigs          = 2\n\
            \tmd5                  = abc123\n\
            \ttype                 = Unknown\n\
            \tfilename             = test.fna\n\
            BASE counts\n\
            \tG     = 250\n\
            \tA     = 400\n\
            \tT     = 350\n\
            \tC     = 250\n\
            \n\
            Name\tLength\tGC content\tContigID\tDescription\n\
            ctg_b\t1000\t0.4\tctg_b\tchromosome\n\
            ctg_a\t250\t\tctg_a\t\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_format_is_deterministic() {
        let doc = sample();
        let first = format_metadata(&doc, false).unwrap();
        let second = format_metadata(&doc, false).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_show_contigs_does_not_gate_table() {
        let doc = sample();
        assert_eq!(
            format_metadata(&doc, false).unwrap(),
            format_metadata(&doc, true).unwrap()
        );
    }

    #[test]
    fn test_missing_base_counts_is_malformed() {
        let doc = AssemblyMetadata::from_value(json!({"assembly_id": "x"})).unwrap();
        match format_metadata(&doc, true) {
            Err(ContigFilterError::MalformedInput(msg)) => assert!(msg.contains("base_counts")),
            other => panic!("expected malformed input, got {:?}", other),
        }
    }

    #[test]
    fn test_no_contigs_ends_with_header() {
        let doc = AssemblyMetadata::from_value(json!({"base_counts": {"N": 3}})).unwrap();
        let text = format_metadata(&doc, true).unwrap();
        assert_eq!(
            text,
            "\nAssembly Metadata\nBASE counts\n\tN     = 3\n\nName\tLength\tGC content\tContigID\tDescription\n"
        );
    }

    #[test]
    fn test_non_mapping_document() {
        assert!(matches!(
            AssemblyMetadata::from_value(json!("nope")),
            Err(ContigFilterError::MalformedInput(_))
        ));
        assert!(matches!(
            AssemblyMetadata::from_value(json!({"base_counts": [1, 2]})),
            Err(ContigFilterError::MalformedInput(_))
        ));
    }
}
