// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use bio::io::fasta;

use crate::errors::ContigFilterError;
use crate::seq::file::{SeqFile, SeqStream};
use crate::seq::record::SeqRecord;

fn parse_error(e: io::Error) -> ContigFilterError {
    match e.kind() {
        ErrorKind::InvalidData | ErrorKind::UnexpectedEof | ErrorKind::Other => {
            ContigFilterError::MalformedInput(format!("FastA parse error: {}", e))
        }
        _ => ContigFilterError::Io(e),
    }
}

// Blank lines before the first header are not an error.
fn skip_leading_whitespace<B: BufRead>(reader: &mut B) -> io::Result<()> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(());
        }
        let n = buf.iter().take_while(|b| b.is_ascii_whitespace()).count();
        let done = n < buf.len();
        reader.consume(n);
        if done {
            return Ok(());
        }
    }
}

// Spaces and carriage returns inside sequence lines are not residues.
fn residues(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .copied()
        .filter(|b| !matches!(b, b' ' | b'\r'))
        .collect()
}

/// Lazily parses FastA records from any byte stream. The stream is consumed once; the returned
/// iterator cannot be restarted.
pub fn fasta_records<'a, R: Read + 'a>(reader: R) -> SeqStream<'a> {
    let mut reader = BufReader::new(reader);
    if let Err(e) = skip_leading_whitespace(&mut reader) {
        return Box::new(std::iter::once(Err::<SeqRecord, _>(parse_error(e))));
    }
    let records = fasta::Reader::new(reader).records().map(|result| {
        result
            .map(|rec| SeqRecord {
                id: rec.id().to_string(),
                description: rec.desc().map(String::from),
                sequence: residues(rec.seq()),
            })
            .map_err(parse_error)
    });
    Box::new(records)
}

pub fn open_fasta_file<P: AsRef<Path>>(path: P) -> Result<SeqStream<'static>, ContigFilterError> {
    let file = File::open(path)?;
    Ok(fasta_records(file))
}

pub fn read_fasta_file<P: AsRef<Path>>(path: P) -> Result<SeqFile, ContigFilterError> {
    open_fasta_file(path)?.collect()
}

pub fn write_fasta<W: Write>(writer: W, records: &[SeqRecord]) -> Result<(), ContigFilterError> {
    let mut writer = fasta::Writer::new(writer);
    for rec in records {
        writer.write(&rec.id, rec.description.as_deref(), &rec.sequence)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_fasta_file<P: AsRef<Path>>(
    path: P,
    records: &[SeqRecord],
) -> Result<(), ContigFilterError> {
    let file = File::create(path)?;
    write_fasta(BufWriter::new(file), records)
}
