// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use derive_new::new;
use getset::CopyGetters;

use crate::constants::MASK_CONFIDENT;
use crate::consensus::ConsensusPair;

/// Single base difference between the consensus sequences of a block.
#[derive(new, CopyGetters, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[getset(get_copy = "pub")]
pub struct Snv {
    block_id: usize,
    /// 0-based position in the non-mutated consensus.
    position: usize,
    reference: char,
    alternative: char,
}

/// Isolated single base differences between the aligned consensus sequences of a pair.
///
/// Positions masked in either quality string are ignored. Two adjacent differences hint
/// at an indel, and the whole pair is discarded in that case.
pub fn call_snvs(pair: &ConsensusPair) -> Vec<Snv> {
    let non_mutated = pair.non_mutated().as_bytes();
    let non_mutated_quality = pair.non_mutated_quality().as_bytes();
    let mutated = pair.mutated().as_bytes();
    let mutated_quality = pair.mutated_quality().as_bytes();

    let differences: Vec<(usize, usize)> = (0..non_mutated.len())
        .filter_map(|pos| {
            let aligned = pair.mutated_position(pos)?;
            let confident = non_mutated_quality[pos] == MASK_CONFIDENT
                && mutated_quality[aligned] == MASK_CONFIDENT;
            if confident && non_mutated[pos] != mutated[aligned] {
                Some((pos, aligned))
            } else {
                None
            }
        })
        .collect();

    if differences.windows(2).any(|w| w[1].0 == w[0].0 + 1) {
        debug!("Discarding block {}: indel-like.", pair.block_id());
        return Vec::new();
    }

    differences
        .into_iter()
        .map(|(pos, aligned)| {
            Snv::new(
                pair.block_id(),
                pos,
                non_mutated[pos] as char,
                mutated[aligned] as char,
            )
        })
        .collect()
}
