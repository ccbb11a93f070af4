// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::BTreeSet;

use bio::alphabets::dna;
use bio::data_structures::suffix_array::suffix_array;
use derive_new::new;

use crate::blocks::{Orientation, ReadTag, TagTissue};
use crate::constants::SENTINEL;
use crate::index::layout::ConcatLayout;
use crate::reads::{ReadStore, Tissue};

/// Suffix array over the extracted tumour reads, each read contributing itself and its
/// reverse complement.
#[derive(new, Debug)]
pub struct LocalIndexBuilder<'a> {
    reads: &'a ReadStore,
    min_suffix_len: usize,
}

impl<'a> LocalIndexBuilder<'a> {
    fn layout(&self, read_ids: &BTreeSet<usize>) -> ConcatLayout<usize> {
        let mut layout = ConcatLayout::default();
        for &read_id in read_ids {
            let read = self.reads.read(Tissue::Tumour, read_id);
            let revcomp = dna::revcomp(self.reads.bases(Tissue::Tumour, read_id));
            layout.push(read_id, &[read, revcomp.as_slice(), &[SENTINEL][..]]);
        }
        layout
    }

    /// Sorted tags of all suffixes with at least `min_suffix_len` bases.
    pub fn build(&self, read_ids: &BTreeSet<usize>) -> Vec<ReadTag> {
        let layout = self.layout(read_ids);
        if layout.is_empty() {
            return Vec::new();
        }

        suffix_array(layout.text())
            .into_iter()
            .filter_map(|pos| {
                let (read_id, local) = layout.locate(pos);
                self.tag(read_id, local)
            })
            .collect()
    }

    /// Tag for the suffix at `local` within the doubled block of a read.
    fn tag(&self, read_id: usize, local: usize) -> Option<ReadTag> {
        let read_len = self.reads.read(Tissue::Tumour, read_id).len();
        let bases = read_len - 1;

        let (orientation, start) = if local < read_len {
            (Orientation::Forward, local)
        } else {
            (Orientation::ReverseComplement, local - read_len)
        };
        if bases - start < self.min_suffix_len {
            return None;
        }

        let offset = match orientation {
            Orientation::Forward => start,
            Orientation::ReverseComplement => read_len - start - self.min_suffix_len - 1,
        };
        Some(ReadTag::new(read_id, offset, orientation, TagTissue::Tumour))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reads::common_prefix_len;

    fn reads() -> ReadStore {
        ReadStore::from_sequences(
            vec!["ACGTTGCA", "GGCATTAC", "TTGCAACG"],
            vec!["AAAAAAAA"],
        )
    }

    #[test]
    fn test_first_reverse_complement_position() {
        let reads = reads();
        let builder = LocalIndexBuilder::new(&reads, 3);

        // ACGTTGCA$ occupies local offsets 0..=8, its reverse complement starts at 9
        let tag = builder.tag(0, 9).unwrap();
        assert_eq!(tag.orientation(), Orientation::ReverseComplement);
        assert_eq!(tag.offset(), 8 - 3);
        let tag = builder.tag(0, 14).unwrap();
        assert_eq!(tag.orientation(), Orientation::ReverseComplement);
        assert_eq!(tag.offset(), 0);
        let tag = builder.tag(0, 5).unwrap();
        assert_eq!(tag.orientation(), Orientation::Forward);
        assert_eq!(tag.offset(), 5);
        // sentinels and too short suffixes
        assert!(builder.tag(0, 6).is_none());
        assert!(builder.tag(0, 8).is_none());
        assert!(builder.tag(0, 15).is_none());
        assert!(builder.tag(0, 17).is_none());
    }

    #[test]
    fn test_round_trip() {
        let reads = reads();
        let read_ids: BTreeSet<usize> = (0..3).collect();
        let builder = LocalIndexBuilder::new(&reads, 3);
        let layout = builder.layout(&read_ids);
        let tags = builder.build(&read_ids);

        for pos in suffix_array(layout.text()) {
            let (read_id, local) = layout.locate(pos);
            if let Some(tag) = builder.tag(read_id, local) {
                let text = &layout.text()[pos..];
                let end = text.iter().position(|c| *c == SENTINEL).unwrap();
                assert_eq!(tag.suffix(&reads, 3), &text[..=end]);
            }
        }

        // 2 * (8 - 3 + 1) suffixes per read
        assert_eq!(tags.len(), 3 * 12);
        for pair in tags.windows(2) {
            assert!(pair[0].suffix(&reads, 3) <= pair[1].suffix(&reads, 3));
        }
    }

    #[test]
    fn test_deterministic() {
        let reads = reads();
        let read_ids: BTreeSet<usize> = vec![0, 2].into_iter().collect();
        let builder = LocalIndexBuilder::new(&reads, 4);
        assert_eq!(builder.build(&read_ids), builder.build(&read_ids));
    }

    #[test]
    fn test_both_orientations_present() {
        let reads = reads();
        let read_ids: BTreeSet<usize> = vec![1].into_iter().collect();
        let tags = LocalIndexBuilder::new(&reads, 8).build(&read_ids);
        assert_eq!(tags.len(), 2);
        let fwd = tags
            .iter()
            .find(|t| t.orientation() == Orientation::Forward)
            .unwrap();
        let rev = tags
            .iter()
            .find(|t| t.orientation() == Orientation::ReverseComplement)
            .unwrap();
        assert_eq!(fwd.offset(), 0);
        assert_eq!(rev.offset(), 0);
        assert_eq!(rev.suffix(&reads, 8), b"GTAATGCC$".to_vec());
        assert_eq!(
            common_prefix_len(&fwd.suffix(&reads, 8), &rev.suffix(&reads, 8)),
            1
        );
    }
}
