// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use contig_filter::errors::ContigFilterError;

fn main() -> Result<(), ContigFilterError> {
    contig_filter::run()
}
