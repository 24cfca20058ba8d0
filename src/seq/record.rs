// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

// A record for sequences, consisting of an identifier, an optional description and the raw
// residues. Records are created while scanning a FastA stream and are never mutated.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqRecord {
    pub id: String,
    pub description: Option<String>,
    pub sequence: Vec<u8>,
}

impl SeqRecord {
    pub fn new(id: &str, description: Option<&str>, sequence: &[u8]) -> Self {
        SeqRecord {
            id: id.to_string(),
            description: description.map(String::from),
            sequence: sequence.to_vec(),
        }
    }

    /// Number of residues.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}
