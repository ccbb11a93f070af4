// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use bio::alphabets::dna;
use derive_new::new;

use crate::blocks::{BreakPointBlock, Orientation, ReadTag, TagTissue};
use crate::index::{search, GenomicIndex, SuffixRef};
use crate::params::Params;
use crate::reads::{ReadStore, Tissue};

/// Adds the global index neighbourhood of a block's breakpoint to the block.
///
/// Healthy suffixes become `Healthy` tags, tumour suffixes become `Switched` tags.
#[derive(new)]
pub struct AlleleCompleter<'a, I: ?Sized> {
    index: &'a I,
    reads: &'a ReadStore,
    params: Params,
}

impl<'a, I> AlleleCompleter<'a, I>
where
    I: GenomicIndex + ?Sized,
{
    /// Complete the block and return the number of newly inserted tags.
    pub fn complete(&self, block: &mut BreakPointBlock) -> usize {
        let min_suffix_len = self.params.min_suffix_len();
        let representative = match block.representative() {
            Some(tag) => *tag,
            None => return 0,
        };
        let bases = representative.bases(self.reads);
        let start = representative.offset();
        let window = &bases[start..start + min_suffix_len];

        let queries = [
            (window.to_vec(), representative.orientation()),
            (dna::revcomp(window), representative.orientation().invert()),
        ];

        let mut inserted = 0;
        for (query, orientation) in queries.iter() {
            match search(self.index, self.reads, query) {
                Some(hit) => {
                    for suffix in self.neighbourhood(hit) {
                        if block.insert(tag(&suffix, *orientation)) {
                            inserted += 1;
                        }
                    }
                }
                None => debug!(
                    "Block {}: no {} match in index.",
                    block.id(),
                    orientation
                ),
            }
        }
        debug!(
            "Block {}: {} healthy and {} switched tags.",
            block.id(),
            block.count(TagTissue::Healthy),
            block.count(TagTissue::Switched)
        );
        inserted
    }

    /// The hit and all adjacent suffixes sharing at least `min_suffix_len` bases with it.
    fn neighbourhood(&self, hit: usize) -> Vec<SuffixRef> {
        let min_suffix_len = self.params.min_suffix_len();
        let hit_suffix = self.index.get(hit);
        let linked =
            |rank: usize| self.index.lcp(&self.index.get(rank), &hit_suffix) >= min_suffix_len;

        let mut first = hit;
        while first > 0 && linked(first - 1) {
            first -= 1;
        }
        let mut last = hit;
        while last + 1 < self.index.len() && linked(last + 1) {
            last += 1;
        }
        (first..=last).map(|rank| self.index.get(rank)).collect()
    }
}

fn tag(suffix: &SuffixRef, orientation: Orientation) -> ReadTag {
    let tissue = match suffix.tissue() {
        Tissue::Healthy => TagTissue::Healthy,
        Tissue::Tumour => TagTissue::Switched,
    };
    ReadTag::new(suffix.read_id(), suffix.offset(), orientation, tissue)
}
