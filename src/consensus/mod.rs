// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Majority vote consensus of the tags of a breakpoint block.
//!
//! All tags are laid out in a common frame, such that the first base of each tag's suffix
//! falls into the same column (the anchor). Columns covered by fewer than `trim_value`
//! reads are dropped. The consensus offset is the position of the anchor within the
//! consensus sequence.

use derive_new::new;
use getset::{CopyGetters, Getters};

use crate::blocks::BreakPointBlock;
use crate::constants::{
    BASES, MASK_CONFIDENT, MASK_HEALTHY_LOW_CONFIDENCE, MASK_TUMOUR_LOW_SUPPORT,
};
use crate::params::Params;
use crate::reads::{ReadStore, Tissue};

pub(crate) mod matrix;
pub mod pair;

pub use pair::ConsensusPair;

use matrix::FrequencyMatrix;

#[derive(Getters, CopyGetters, Debug, Clone, PartialEq, Eq)]
pub struct Consensus {
    #[getset(get = "pub")]
    sequence: String,
    #[getset(get = "pub")]
    quality: String,
    /// Position of the anchor within the sequence.
    #[getset(get_copy = "pub")]
    offset: usize,
}

impl Consensus {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

#[derive(new, Debug)]
pub struct ConsensusBuilder<'a> {
    reads: &'a ReadStore,
    params: Params,
}

impl<'a> ConsensusBuilder<'a> {
    /// Consensus of the block's tags supporting the given tissue, or `None` if the block
    /// has to be skipped for this tissue.
    pub fn build(&self, block: &BreakPointBlock, tissue: Tissue) -> Option<Consensus> {
        if block.len() > self.params.coverage_upper_threshold() {
            debug!(
                "Skipping block {}: {} tags exceed the coverage limit.",
                block.id(),
                block.len()
            );
            return None;
        }

        let min_suffix_len = self.params.min_suffix_len();
        let aligned: Vec<(usize, Vec<u8>)> = block
            .tags()
            .iter()
            .filter(|tag| tag.tissue().supports(tissue))
            .map(|tag| {
                (
                    tag.oriented_offset(self.reads, min_suffix_len),
                    tag.oriented_bases(self.reads),
                )
            })
            .collect();
        if aligned.is_empty() {
            debug!("Skipping block {}: no {} tags.", block.id(), tissue);
            return None;
        }

        let max_offset = aligned.iter().map(|(offset, _)| *offset).max()?;
        let min_offset = aligned.iter().map(|(offset, _)| *offset).min()?;
        let max_len = aligned.iter().map(|(_, bases)| bases.len()).max()?;

        let mut matrix = FrequencyMatrix::new(max_offset - min_offset + max_len);
        for (offset, bases) in &aligned {
            for (i, base) in bases.iter().enumerate() {
                matrix.add(max_offset - offset + i, *base);
            }
        }

        let mut sequence = String::new();
        let mut quality = String::new();
        let mut retained = false;
        let mut skipped = 0;
        for column in 0..matrix.width() {
            if matrix.coverage(column) < self.params.trim_value() {
                if !retained {
                    skipped += 1;
                }
                matrix.invalidate(column);
                continue;
            }
            if let Some(row) = matrix.majority(column) {
                sequence.push(BASES[row] as char);
                quality.push(self.mask(&matrix, column, row, tissue) as char);
                retained = true;
            }
        }

        if sequence.is_empty() {
            debug!("Skipping block {}: empty {} consensus.", block.id(), tissue);
            return None;
        }

        Some(Consensus {
            sequence,
            quality,
            offset: max_offset.checked_sub(skipped)?,
        })
    }

    fn mask(&self, matrix: &FrequencyMatrix, column: usize, row: usize, tissue: Tissue) -> u8 {
        match tissue {
            Tissue::Healthy => {
                let total = matrix.coverage(column) as f64;
                let frequent = (0..BASES.len())
                    .filter(|base| {
                        matrix.count(*base, column) as f64 / total
                            > self.params.allelic_error_freq()
                    })
                    .count();
                if frequent > 1 {
                    MASK_HEALTHY_LOW_CONFIDENCE
                } else {
                    MASK_CONFIDENT
                }
            }
            Tissue::Tumour => {
                if matrix.count(row, column) < self.params.min_block_size() {
                    MASK_TUMOUR_LOW_SUPPORT
                } else {
                    MASK_CONFIDENT
                }
            }
        }
    }
}
