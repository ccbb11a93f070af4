// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use bio::data_structures::suffix_array::suffix_array;

use crate::index::layout::ConcatLayout;
use crate::index::{GenomicIndex, SuffixRef};
use crate::reads::{common_prefix_len, ReadStore, Tissue};

/// In-memory generalized suffix array over all reads of a [`ReadStore`].
#[derive(Debug, Clone)]
pub struct GeneralizedSuffixArray<'a> {
    reads: &'a ReadStore,
    suffixes: Vec<SuffixRef>,
}

impl<'a> GeneralizedSuffixArray<'a> {
    /// Sort all suffixes with at least `min_suffix_len` bases.
    pub fn build(reads: &'a ReadStore, min_suffix_len: usize) -> Self {
        let mut layout = ConcatLayout::default();
        for tissue in [Tissue::Healthy, Tissue::Tumour].iter() {
            for (read_id, read) in reads.reads(*tissue).iter().enumerate() {
                layout.push((*tissue, read_id), &[read]);
            }
        }
        if layout.is_empty() {
            return GeneralizedSuffixArray {
                reads,
                suffixes: Vec::new(),
            };
        }

        let suffixes = suffix_array(layout.text())
            .into_iter()
            .filter_map(|pos| {
                let ((tissue, read_id), offset) = layout.locate(pos);
                // bases remaining in front of the sentinel
                let remaining = reads.read(tissue, read_id).len() - 1 - offset;
                if remaining >= min_suffix_len {
                    Some(SuffixRef::new(read_id, offset, tissue))
                } else {
                    None
                }
            })
            .collect();

        GeneralizedSuffixArray { reads, suffixes }
    }

    /// Wrap an already sorted suffix order, e.g. one computed by an external builder.
    pub fn from_sorted(reads: &'a ReadStore, suffixes: Vec<SuffixRef>) -> Self {
        GeneralizedSuffixArray { reads, suffixes }
    }

    pub fn suffixes(&self) -> &[SuffixRef] {
        &self.suffixes
    }
}

impl<'a> GenomicIndex for GeneralizedSuffixArray<'a> {
    fn len(&self) -> usize {
        self.suffixes.len()
    }

    fn get(&self, rank: usize) -> SuffixRef {
        self.suffixes[rank]
    }

    fn lcp(&self, a: &SuffixRef, b: &SuffixRef) -> usize {
        common_prefix_len(self.reads.suffix(a), self.reads.suffix(b))
    }
}
