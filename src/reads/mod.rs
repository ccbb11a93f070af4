// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Storage of the healthy and tumour read sets.
//!
//! Every read is kept with a trailing [`SENTINEL`](crate::constants::SENTINEL), so that
//! suffixes taken from different reads never share a prefix beyond the end of a read.

use std::path::Path;

use anyhow::Result;
use strum_macros::{Display, EnumString};

use crate::constants::SENTINEL;
use crate::errors::Error;
use crate::index::SuffixRef;

pub mod io;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum Tissue {
    #[strum(serialize = "tumour")]
    Tumour,
    #[strum(serialize = "healthy")]
    Healthy,
}

#[derive(Debug, Default, Clone)]
pub struct ReadStore {
    tumour: Vec<Vec<u8>>,
    healthy: Vec<Vec<u8>>,
}

impl ReadStore {
    pub fn new() -> Self {
        ReadStore::default()
    }

    /// Build a store from plain base sequences, appending the sentinel to each.
    pub fn from_sequences<T, H, S1, S2>(tumour: T, healthy: H) -> Self
    where
        T: IntoIterator<Item = S1>,
        H: IntoIterator<Item = S2>,
        S1: AsRef<[u8]>,
        S2: AsRef<[u8]>,
    {
        let mut store = ReadStore::new();
        for seq in tumour {
            store.push(Tissue::Tumour, seq.as_ref());
        }
        for seq in healthy {
            store.push(Tissue::Healthy, seq.as_ref());
        }
        store
    }

    /// Load and quality process the given read files of both tissues.
    pub fn from_files<P: AsRef<Path>>(
        tumour: &[P],
        healthy: &[P],
        min_fragment_len: usize,
    ) -> Result<Self> {
        let mut store = ReadStore::new();
        for (tissue, paths) in [(Tissue::Tumour, tumour), (Tissue::Healthy, healthy)].iter() {
            for path in paths.iter() {
                let fragments = io::load_fragments(path, min_fragment_len)?;
                info!(
                    "Loaded {} {} read fragments from {}.",
                    fragments.len(),
                    tissue,
                    path.as_ref().display()
                );
                for fragment in fragments {
                    store.push(*tissue, &fragment);
                }
            }
            if store.is_empty(*tissue) {
                return Err(Error::EmptyReadSet {
                    tissue: tissue.to_string(),
                }
                .into());
            }
        }
        Ok(store)
    }

    /// Append a read (given without sentinel) and return its id.
    pub fn push(&mut self, tissue: Tissue, seq: &[u8]) -> usize {
        let reads = self.reads_mut(tissue);
        let mut read = Vec::with_capacity(seq.len() + 1);
        read.extend_from_slice(seq);
        read.push(SENTINEL);
        reads.push(read);
        reads.len() - 1
    }

    pub fn len(&self, tissue: Tissue) -> usize {
        self.reads(tissue).len()
    }

    pub fn is_empty(&self, tissue: Tissue) -> bool {
        self.reads(tissue).is_empty()
    }

    pub fn reads(&self, tissue: Tissue) -> &[Vec<u8>] {
        match tissue {
            Tissue::Tumour => &self.tumour,
            Tissue::Healthy => &self.healthy,
        }
    }

    fn reads_mut(&mut self, tissue: Tissue) -> &mut Vec<Vec<u8>> {
        match tissue {
            Tissue::Tumour => &mut self.tumour,
            Tissue::Healthy => &mut self.healthy,
        }
    }

    /// Full read including the trailing sentinel.
    ///
    /// Panics if `id` does not refer to a stored read.
    pub fn read(&self, tissue: Tissue, id: usize) -> &[u8] {
        &self.reads(tissue)[id]
    }

    /// Read bases without the trailing sentinel.
    pub fn bases(&self, tissue: Tissue, id: usize) -> &[u8] {
        let read = self.read(tissue, id);
        &read[..read.len() - 1]
    }

    /// Suffix referenced by `suffix`, including the sentinel.
    pub fn suffix(&self, suffix: &SuffixRef) -> &[u8] {
        &self.read(suffix.tissue(), suffix.read_id())[suffix.offset()..]
    }
}

/// Number of leading positions shared by `a` and `b`. The sentinel never counts as shared.
pub(crate) fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter()
        .zip(b.iter())
        .take_while(|(x, y)| x == y && **x != SENTINEL)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_appended() {
        let store = ReadStore::from_sequences(vec!["ACGT"], vec!["GGA", "TTTT"]);
        assert_eq!(store.read(Tissue::Tumour, 0), b"ACGT$");
        assert_eq!(store.bases(Tissue::Healthy, 1), b"TTTT");
        assert_eq!(store.len(Tissue::Healthy), 2);
        let suffix = SuffixRef::new(0, 1, Tissue::Healthy);
        assert_eq!(store.suffix(&suffix), b"GA$");
    }

    #[test]
    fn test_common_prefix_stops_at_sentinel() {
        assert_eq!(common_prefix_len(b"ACG$", b"ACG$"), 3);
        assert_eq!(common_prefix_len(b"ACGT$", b"ACGA$"), 3);
        assert_eq!(common_prefix_len(b"$", b"$"), 0);
        assert_eq!(common_prefix_len(b"ACGT", b"AC"), 2);
    }

    #[test]
    fn test_tissue_display() {
        assert_eq!(Tissue::Tumour.to_string(), "tumour");
        assert_eq!("healthy".parse::<Tissue>().unwrap(), Tissue::Healthy);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_read() {
        let store = ReadStore::from_sequences(vec!["ACGT"], Vec::<&str>::new());
        store.read(Tissue::Tumour, 1);
    }
}
