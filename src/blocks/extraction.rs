// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use derive_new::new;

use crate::blocks::{BreakPointBlock, ReadTag};
use crate::params::Params;
use crate::reads::{common_prefix_len, ReadStore};
use crate::scan::Runs;

/// Groups sorted local tags into breakpoint blocks.
#[derive(new, Debug)]
pub struct BlockExtractor<'a> {
    reads: &'a ReadStore,
    params: Params,
}

impl<'a> BlockExtractor<'a> {
    pub fn extract(&self, tags: &[ReadTag]) -> Vec<BreakPointBlock> {
        let min_suffix_len = self.params.min_suffix_len();
        let suffixes: Vec<Vec<u8>> = tags
            .iter()
            .map(|tag| tag.suffix(self.reads, min_suffix_len))
            .collect();

        let runs = Runs::new(0..tags.len(), tags.len(), |seed, pos| {
            common_prefix_len(&suffixes[seed], &suffixes[pos]) >= min_suffix_len
        });

        let blocks: Vec<_> = runs
            .filter(|run| run.len() >= self.params.min_block_size())
            .enumerate()
            .map(|(id, run)| BreakPointBlock::new(id, tags[run].iter().cloned()))
            .collect();
        info!(
            "Found {} breakpoint blocks among {} local suffixes.",
            blocks.len(),
            tags.len()
        );
        blocks
    }
}
