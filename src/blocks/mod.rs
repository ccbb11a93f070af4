// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Breakpoint blocks: groups of read suffixes, in both orientations, that share a
//! prefix of at least the minimum suffix length.
//!
//! A tag's offset always refers to the forward read. For a reverse complement tag it is
//! the forward position of the bases whose reverse complement starts the tag's suffix, so
//! the suffix starts at `read_len - (offset + min_suffix_len + 1)` in the reverse
//! complemented read, `read_len` counting the sentinel.

use std::collections::BTreeSet;

use bio::alphabets::dna;
use derive_new::new;
use getset::{CopyGetters, Getters};
use strum_macros::Display;

use crate::constants::SENTINEL;
use crate::reads::{ReadStore, Tissue};

pub mod completion;
pub mod extraction;
pub mod local;

pub use completion::AlleleCompleter;
pub use extraction::BlockExtractor;
pub use local::LocalIndexBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum Orientation {
    #[strum(serialize = "+")]
    Forward,
    #[strum(serialize = "-")]
    ReverseComplement,
}

impl Orientation {
    pub fn invert(self) -> Self {
        match self {
            Orientation::Forward => Orientation::ReverseComplement,
            Orientation::ReverseComplement => Orientation::Forward,
        }
    }
}

/// Role of a tag within a block.
///
/// `Switched` tags come from tumour reads found in the global index next to a block's
/// breakpoint. They stand in for the non-mutated allele.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum TagTissue {
    #[strum(serialize = "tumour")]
    Tumour,
    #[strum(serialize = "healthy")]
    Healthy,
    #[strum(serialize = "switched")]
    Switched,
}

impl TagTissue {
    /// Read set the tagged read is stored in.
    pub fn read_tissue(self) -> Tissue {
        match self {
            TagTissue::Healthy => Tissue::Healthy,
            TagTissue::Tumour | TagTissue::Switched => Tissue::Tumour,
        }
    }

    /// Whether tags of this kind contribute to the consensus of the given tissue.
    pub fn supports(self, tissue: Tissue) -> bool {
        match tissue {
            Tissue::Tumour => self == TagTissue::Tumour,
            Tissue::Healthy => self == TagTissue::Healthy || self == TagTissue::Switched,
        }
    }
}

#[derive(new, CopyGetters, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[getset(get_copy = "pub")]
pub struct ReadTag {
    read_id: usize,
    offset: usize,
    orientation: Orientation,
    tissue: TagTissue,
}

impl ReadTag {
    /// Bases of the tagged read (without sentinel), in forward read orientation.
    pub fn bases<'a>(&self, reads: &'a ReadStore) -> &'a [u8] {
        reads.bases(self.tissue.read_tissue(), self.read_id)
    }

    /// Read bases in the orientation of the tag.
    pub fn oriented_bases(&self, reads: &ReadStore) -> Vec<u8> {
        match self.orientation {
            Orientation::Forward => self.bases(reads).to_vec(),
            Orientation::ReverseComplement => dna::revcomp(self.bases(reads)),
        }
    }

    /// Start of the tag's suffix within the oriented read.
    pub fn oriented_offset(&self, reads: &ReadStore, min_suffix_len: usize) -> usize {
        match self.orientation {
            Orientation::Forward => self.offset,
            Orientation::ReverseComplement => {
                let read_len = self.bases(reads).len() + 1;
                read_len - (self.offset + min_suffix_len + 1)
            }
        }
    }

    /// Suffix in the tag's orientation, terminated by the sentinel.
    pub fn suffix(&self, reads: &ReadStore, min_suffix_len: usize) -> Vec<u8> {
        let start = self.oriented_offset(reads, min_suffix_len);
        let mut suffix = match self.orientation {
            Orientation::Forward => self.bases(reads)[start..].to_vec(),
            Orientation::ReverseComplement => {
                let mut oriented = self.oriented_bases(reads);
                oriented.drain(..start);
                oriented
            }
        };
        suffix.push(SENTINEL);
        suffix
    }
}

/// LCP of the materialized suffixes of two tags.
#[cfg(test)]
pub(crate) fn tag_lcp(
    reads: &ReadStore,
    min_suffix_len: usize,
    a: &ReadTag,
    b: &ReadTag,
) -> usize {
    crate::reads::common_prefix_len(
        &a.suffix(reads, min_suffix_len),
        &b.suffix(reads, min_suffix_len),
    )
}

#[derive(Getters, CopyGetters, Debug, Clone, PartialEq, Eq)]
pub struct BreakPointBlock {
    #[getset(get_copy = "pub")]
    id: usize,
    #[getset(get = "pub")]
    tags: BTreeSet<ReadTag>,
}

impl BreakPointBlock {
    pub fn new<T: IntoIterator<Item = ReadTag>>(id: usize, tags: T) -> Self {
        BreakPointBlock {
            id,
            tags: tags.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// The first tag in tag order.
    pub fn representative(&self) -> Option<&ReadTag> {
        self.tags.iter().next()
    }

    /// Add a tag. Returns false if it was already present.
    pub fn insert(&mut self, tag: ReadTag) -> bool {
        self.tags.insert(tag)
    }

    pub fn count(&self, tissue: TagTissue) -> usize {
        self.tags.iter().filter(|tag| tag.tissue == tissue).count()
    }
}
