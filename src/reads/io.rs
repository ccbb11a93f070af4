// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::Result;
use bio::io::{fasta, fastq};
use flate2::read::MultiGzDecoder;
use rayon::prelude::*;

use crate::constants::{LOW_QUALITY_CHAR, MAX_LOW_QUALITY_FRACTION};
use crate::errors::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Fastq,
    Fasta,
}

fn detect_format(path: &Path) -> Result<(Format, bool)> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let gzipped = name.ends_with(".gz");
    let stem = if gzipped {
        &name[..name.len() - 3]
    } else {
        &name[..]
    };
    let format = match stem.rsplit('.').next() {
        Some("fastq") | Some("fq") => Format::Fastq,
        Some("fasta") | Some("fa") | Some("fna") => Format::Fasta,
        _ => {
            return Err(Error::UnsupportedReadFormat {
                path: path.to_owned(),
            }
            .into())
        }
    };
    Ok((format, gzipped))
}

fn open(path: &Path, gzipped: bool) -> Result<Box<dyn io::Read>> {
    let file = File::open(path)?;
    Ok(if gzipped {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    })
}

/// Load all usable read fragments from a FASTQ or FASTA file (optionally gzipped).
///
/// FASTQ records failing the quality filter are dropped. Remaining sequences are split
/// at every non-ACGT base and fragments shorter than `min_fragment_len` are discarded.
pub fn load_fragments<P: AsRef<Path>>(path: P, min_fragment_len: usize) -> Result<Vec<Vec<u8>>> {
    let path = path.as_ref();
    let (format, gzipped) = detect_format(path)?;
    let reader = open(path, gzipped)?;

    match format {
        Format::Fastq => {
            let records = fastq::Reader::new(reader)
                .records()
                .collect::<Result<Vec<_>, _>>()?;
            Ok(records
                .par_iter()
                .filter(|record| passes_quality(record.qual()))
                .flat_map_iter(|record| fragments(record.seq(), min_fragment_len))
                .collect())
        }
        Format::Fasta => {
            let records = fasta::Reader::new(reader)
                .records()
                .collect::<Result<Vec<_>, _>>()?;
            Ok(records
                .par_iter()
                .flat_map_iter(|record| fragments(record.seq(), min_fragment_len))
                .collect())
        }
    }
}

/// A read passes if at most `MAX_LOW_QUALITY_FRACTION` of its bases are of low quality.
pub(crate) fn passes_quality(qual: &[u8]) -> bool {
    if qual.is_empty() {
        return false;
    }
    let low_quality = qual.iter().filter(|q| **q < LOW_QUALITY_CHAR).count();
    low_quality as f64 / qual.len() as f64 <= MAX_LOW_QUALITY_FRACTION
}

/// Uppercased ACGT stretches of `seq` with at least `min_len` bases.
pub(crate) fn fragments(seq: &[u8], min_len: usize) -> Vec<Vec<u8>> {
    seq.split(|base| !matches!(base.to_ascii_uppercase(), b'A' | b'C' | b'G' | b'T'))
        .filter(|fragment| fragment.len() >= min_len)
        .map(|fragment| fragment.to_ascii_uppercase())
        .collect()
}
