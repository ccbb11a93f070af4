// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("minimum suffix length must be at least 1")]
    InvalidMinSuffixLength,
    #[error("contamination ratio must be a non-negative number, found {econt}")]
    InvalidContaminationRatio { econt: f64 },
    #[error("minimum tumour count must be at least 1")]
    InvalidMinTumourCount,
    #[error("minimum block size must be at least 1")]
    InvalidMinBlockSize,
    #[error("trim value must be at least 1")]
    InvalidTrimValue,
    #[error("allelic error frequency must be within [0, 1), found {freq}")]
    InvalidAllelicErrorFrequency { freq: f64 },
    #[error("number of threads must be at least 1")]
    InvalidThreads,
    #[error("unsupported read file {path:?}: expected FASTQ or FASTA (optionally gzipped)")]
    UnsupportedReadFormat { path: PathBuf },
    #[error("no {tissue} reads left after quality processing")]
    EmptyReadSet { tissue: String },
}
