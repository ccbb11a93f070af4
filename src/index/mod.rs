// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use derive_new::new;
use getset::CopyGetters;

use crate::reads::Tissue;

pub mod gsa;
pub(crate) mod layout;
pub mod search;

pub use gsa::GeneralizedSuffixArray;
pub use search::search;

/// Reference to the suffix of read `read_id` of the given tissue, starting at `offset`.
#[derive(new, CopyGetters, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[getset(get_copy = "pub")]
pub struct SuffixRef {
    read_id: usize,
    offset: usize,
    tissue: Tissue,
}

/// A generalized suffix array over all healthy and tumour reads.
///
/// Suffixes are sorted lexicographically including their read sentinel, which sorts below
/// every base. Implementations are read-only and shared between threads.
pub trait GenomicIndex: Sync {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Suffix at the given rank. Panics if `rank >= len()`.
    fn get(&self, rank: usize) -> SuffixRef;

    /// Length of the longest common prefix of two suffixes, sentinels excluded.
    fn lcp(&self, a: &SuffixRef, b: &SuffixRef) -> usize;

    fn lcp_at(&self, a: usize, b: usize) -> usize {
        self.lcp(&self.get(a), &self.get(b))
    }
}
