// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

/// Terminates every stored read. Sorts below all base symbols.
pub const SENTINEL: u8 = b'$';

/// Base symbols in frequency matrix row order.
pub const BASES: [u8; 4] = [b'A', b'T', b'C', b'G'];

pub const DEFAULT_MIN_SUFFIX_LEN: usize = 30;
pub const DEFAULT_MIN_TUMOUR_COUNT: usize = 4;
pub const DEFAULT_MIN_BLOCK_SIZE: usize = 4;

/// Minimum number of reads covering a consensus column for it to be kept.
pub const TRIM_VALUE: usize = 4;

/// Blocks with more tags than this are treated as repeats and skipped.
pub const COVERAGE_UPPER_THRESHOLD: usize = 80;

pub const ALLELIC_FREQ_OF_ERROR: f64 = 0.1;

// Read quality processing: a read is dropped if more than
// MAX_LOW_QUALITY_FRACTION of its quality characters are below LOW_QUALITY_CHAR.
pub const LOW_QUALITY_CHAR: u8 = b'5';
pub const MAX_LOW_QUALITY_FRACTION: f64 = 0.1;

pub const MASK_CONFIDENT: u8 = b'-';
pub const MASK_HEALTHY_LOW_CONFIDENCE: u8 = b'L';
pub const MASK_TUMOUR_LOW_SUPPORT: u8 = b'M';

pub const DEFAULT_ECONT: f64 = 0.1;

pub const PAIRS_FILE: &str = "consensus_pairs.tsv";
pub const SNVS_FILE: &str = "snvs.tsv";
pub const SNV_FASTQ_FILE: &str = "snv_consensus.fastq";
pub const EXTRACTED_READS_FILE: &str = "tumour_specific_reads.fasta";
