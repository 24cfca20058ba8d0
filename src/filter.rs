// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::fmt;

use crate::errors::ContigFilterError;
use crate::seq::file::SeqFile;
use crate::seq::record::SeqRecord;

/// Inclusive bounds on contig length. Without an upper bound, every record at least `min` long
/// passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: u64,
    pub max: Option<u64>,
}

impl LengthBounds {
    pub fn at_least(min: u64) -> Self {
        LengthBounds { min, max: None }
    }

    pub fn between(min: u64, max: u64) -> Self {
        LengthBounds {
            min,
            max: Some(max),
        }
    }

    pub fn contains(&self, len: u64) -> bool {
        len >= self.min && self.max.map_or(true, |max| len <= max)
    }
}

impl fmt::Display for LengthBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "[{}, {}]", self.min, max),
            None => write!(f, ">= {}", self.min),
        }
    }
}

#[derive(Debug, Default)]
pub struct FilterOutcome {
    /// Records that passed, in input order.
    pub retained: SeqFile,
    pub n_total: u64,
    pub n_remaining: u64,
}

impl FilterOutcome {
    pub fn n_removed(&self) -> u64 {
        self.n_total - self.n_remaining
    }

    /// One-line summary, also used as the report text.
    pub fn summary(&self) -> String {
        format!(
            "Filtered Assembly to {} contigs out of {}",
            self.n_remaining, self.n_total
        )
    }
}

/// Single forward pass over `records`, keeping those whose length lies within `bounds`. The first
/// parse error aborts the scan.
pub fn filter_records<I>(records: I, bounds: LengthBounds) -> Result<FilterOutcome, ContigFilterError>
where
    I: IntoIterator<Item = Result<SeqRecord, ContigFilterError>>,
{
    let mut outcome = FilterOutcome::default();
    for record in records {
        let record = record?;
        outcome.n_total += 1;
        if bounds.contains(record.len() as u64) {
            outcome.retained.push(record);
            outcome.n_remaining += 1;
        }
    }
    Ok(outcome)
}
