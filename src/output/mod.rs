// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Writers for the tables and sequence files produced by a run.

use std::collections::{BTreeMap, BTreeSet};
use std::io;

use anyhow::Result;
use bio::io::{fasta, fastq};
use itertools::Itertools;
use serde::Serialize;

use crate::calling::Snv;
use crate::consensus::ConsensusPair;
use crate::reads::{ReadStore, Tissue};

const DUMMY_QUALITY: u8 = b'~';

fn write_tsv<W, T>(writer: W, records: &[T]) -> Result<()>
where
    W: io::Write,
    T: Serialize,
{
    let mut wrt = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);
    for record in records {
        wrt.serialize(record)?;
    }
    wrt.flush()?;
    Ok(())
}

/// Tab separated table with one consensus pair per row.
pub fn write_pairs<W: io::Write>(writer: W, pairs: &[ConsensusPair]) -> Result<()> {
    write_tsv(writer, pairs)
}

/// Tab separated table with one SNV candidate per row.
pub fn write_snvs<W: io::Write>(writer: W, snvs: &[Snv]) -> Result<()> {
    write_tsv(writer, snvs)
}

/// Description of a consensus pair record: 1-based SNV positions and the mutated consensus.
fn snv_description(positions: &[usize], mutated: &str) -> String {
    format!(
        "[SNV:{}][{}]",
        positions.iter().map(|pos| pos + 1).join(";"),
        mutated
    )
}

/// Non-mutated consensus sequences of all pairs with at least one SNV, ready for alignment
/// against a reference genome.
pub fn write_snv_fastq<W: io::Write>(
    writer: W,
    pairs: &[ConsensusPair],
    snvs: &[Snv],
) -> Result<()> {
    let mut positions: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for snv in snvs {
        positions
            .entry(snv.block_id())
            .or_insert_with(Vec::new)
            .push(snv.position());
    }

    let mut wrt = fastq::Writer::new(writer);
    for pair in pairs {
        if let Some(positions) = positions.get(&pair.block_id()) {
            let qual = vec![DUMMY_QUALITY; pair.non_mutated().len()];
            let description = snv_description(positions, pair.mutated());
            wrt.write(
                &format!("block{}", pair.block_id()),
                Some(description.as_str()),
                pair.non_mutated().as_bytes(),
                &qual,
            )?;
        }
    }
    wrt.flush()?;
    Ok(())
}

/// FASTA with the given tumour reads.
pub fn write_reads_fasta<W: io::Write>(
    writer: W,
    reads: &ReadStore,
    read_ids: &BTreeSet<usize>,
) -> Result<()> {
    let mut wrt = fasta::Writer::new(writer);
    for &read_id in read_ids {
        wrt.write(
            &format!("tumour{}", read_id),
            None,
            reads.bases(Tissue::Tumour, read_id),
        )?;
    }
    wrt.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{BreakPointBlock, Orientation, ReadTag, TagTissue};
    use crate::consensus::ConsensusBuilder;
    use crate::params::ParamsBuilder;

    fn pair() -> ConsensusPair {
        let reads = ReadStore::from_sequences(vec!["ACGTT"], vec!["ACGAT"]);
        let params = ParamsBuilder::default()
            .min_suffix_len(2)
            .trim_value(1)
            .min_block_size(1)
            .build()
            .unwrap();
        let block = BreakPointBlock::new(
            2,
            vec![
                ReadTag::new(0, 0, Orientation::Forward, TagTissue::Tumour),
                ReadTag::new(0, 0, Orientation::Forward, TagTissue::Healthy),
            ],
        );
        ConsensusBuilder::new(&reads, params)
            .build_pair(&block)
            .unwrap()
    }

    #[test]
    fn test_pairs_table() {
        let mut buf = Vec::new();
        write_pairs(&mut buf, &[pair()]).unwrap();
        let table = String::from_utf8(buf).unwrap();
        let mut lines = table.lines();
        assert_eq!(
            lines.next(),
            Some(
                "block_id\tmutated\tnon_mutated\tmutated_quality\tnon_mutated_quality\t\
                 mutated_offset\tnon_mutated_offset\tleft_overhang\tright_overhang"
            )
        );
        assert_eq!(lines.next(), Some("2\tACGTT\tACGAT\t-----\t-----\t0\t0\t0\t0"));
    }

    #[test]
    fn test_snv_fastq() {
        let pair = pair();
        let snvs = crate::calling::call_snvs(&pair);
        assert_eq!(snvs.len(), 1);

        let mut buf = Vec::new();
        write_snv_fastq(&mut buf, &[pair], &snvs).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "@block2 [SNV:4][ACGTT]\nACGAT\n+\n~~~~~\n"
        );

        let mut buf = Vec::new();
        write_snvs(&mut buf, &snvs).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "block_id\tposition\treference\talternative\n2\t3\tA\tT\n"
        );
    }

    #[test]
    fn test_reads_fasta() {
        let reads = ReadStore::from_sequences(vec!["ACGT", "GGCC", "TTAA"], Vec::<&str>::new());
        let mut buf = Vec::new();
        write_reads_fasta(&mut buf, &reads, &vec![0, 2].into_iter().collect()).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            ">tumour0\nACGT\n>tumour2\nTTAA\n"
        );
    }
}
