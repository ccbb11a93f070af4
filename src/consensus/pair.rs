// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use getset::{CopyGetters, Getters};

use crate::blocks::BreakPointBlock;
use crate::consensus::{Consensus, ConsensusBuilder};
use crate::reads::Tissue;

/// Tumour (mutated) and healthy (non-mutated) consensus of a block.
///
/// Overhangs are positive where the non-mutated consensus reaches further beyond the
/// shared anchor than the mutated one.
#[derive(Getters, CopyGetters, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusPair {
    #[getset(get_copy = "pub")]
    block_id: usize,
    #[getset(get = "pub")]
    mutated: String,
    #[getset(get = "pub")]
    non_mutated: String,
    #[getset(get = "pub")]
    mutated_quality: String,
    #[getset(get = "pub")]
    non_mutated_quality: String,
    #[getset(get_copy = "pub")]
    mutated_offset: usize,
    #[getset(get_copy = "pub")]
    non_mutated_offset: usize,
    #[getset(get_copy = "pub")]
    left_overhang: i64,
    #[getset(get_copy = "pub")]
    right_overhang: i64,
}

impl ConsensusPair {
    pub fn new(block_id: usize, mutated: Consensus, non_mutated: Consensus) -> Self {
        let m_offset = mutated.offset() as i64;
        let nm_offset = non_mutated.offset() as i64;
        let left_overhang = nm_offset - m_offset;
        let right_overhang =
            (non_mutated.len() as i64 - nm_offset) - (mutated.len() as i64 - m_offset);

        ConsensusPair {
            block_id,
            mutated_offset: mutated.offset(),
            non_mutated_offset: non_mutated.offset(),
            mutated: mutated.sequence,
            mutated_quality: mutated.quality,
            non_mutated: non_mutated.sequence,
            non_mutated_quality: non_mutated.quality,
            left_overhang,
            right_overhang,
        }
    }

    /// Index into `mutated` aligned to position `pos` of `non_mutated`, if any.
    pub fn mutated_position(&self, pos: usize) -> Option<usize> {
        let aligned = pos as i64 - self.left_overhang;
        if aligned >= 0 && (aligned as usize) < self.mutated.len() {
            Some(aligned as usize)
        } else {
            None
        }
    }
}

impl<'a> ConsensusBuilder<'a> {
    /// Build both consensus sequences of a block. Blocks lacking either are skipped.
    pub fn build_pair(&self, block: &BreakPointBlock) -> Option<ConsensusPair> {
        let mutated = self.build(block, Tissue::Tumour)?;
        let non_mutated = self.build(block, Tissue::Healthy)?;
        Some(ConsensusPair::new(block.id(), mutated, non_mutated))
    }
}
