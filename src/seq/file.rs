// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use crate::errors::ContigFilterError;
use crate::seq::record::SeqRecord;

// For our purposes, a sequence file is just a Vec of sequence records.
//

pub type SeqFile = Vec<SeqRecord>;

// A lazily parsed stream of records. Each item may fail independently, e.g. when the stream turns
// out not to be FastA after all.
pub type SeqStream<'a> = Box<dyn Iterator<Item = Result<SeqRecord, ContigFilterError>> + 'a>;
