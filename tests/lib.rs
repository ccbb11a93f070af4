// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use bio::io::fasta;
use structopt::StructOpt;
use suffixcall::cli::{self, Suffixcall};

const GENOME: &str = "GCTAAAGACAATTACATAACATACACGTCAGCACGAAACTTGTTGGCCCAGTGTGAATCGCTTAAG\
GGTTAAGTAAGTGTGATGCATACGCCTTTACTTGCTGTGTCCACCCCATCGGACTGGCATTTTTATTACACTCAGAAACAGAACTCGG\
GTAATTTTGACAGGTCACGCAGAGGCGCGCCCTCCTGAAGTGCGTGGACACTCGCTATGAATCTCTGATTTACCCACTCTGCCAAACT\
CCAGCGCGGTCAGTTCCATCACCCTAAGTAACCGAATAATGCGTTCGCTCTATTGACT";
const MUTATION: usize = 150;
const READ_LEN: usize = 50;

fn mutated_genome() -> Vec<u8> {
    let mut genome = GENOME.as_bytes().to_vec();
    assert_eq!(genome[MUTATION], b'T');
    genome[MUTATION] = b'A';
    genome
}

fn windows(genome: &[u8], first: usize, step: usize) -> Vec<&[u8]> {
    (first..=genome.len() - READ_LEN)
        .step_by(step)
        .map(|start| &genome[start..start + READ_LEN])
        .collect()
}

fn write_fastq(path: &Path, reads: &[&[u8]]) {
    let mut file = fs::File::create(path).unwrap();
    for (i, read) in reads.iter().enumerate() {
        writeln!(
            file,
            "@read{}\n{}\n+\n{}",
            i,
            std::str::from_utf8(read).unwrap(),
            "I".repeat(read.len())
        )
        .unwrap();
    }
}

/// Healthy reads tile the genome densely. The tumour sample is mostly normal, with a
/// sparse subclone carrying a T>A substitution.
fn setup(dir: &Path) -> (PathBuf, PathBuf) {
    let genome = GENOME.as_bytes();
    let mutated = mutated_genome();

    let tumour = dir.join("tumour.fq");
    let mut tumour_reads = windows(genome, 0, 3);
    tumour_reads.extend(windows(&mutated, 2, 7));
    write_fastq(&tumour, &tumour_reads);

    let healthy = dir.join("healthy.fastq");
    write_fastq(&healthy, &windows(genome, 0, 1));

    (tumour, healthy)
}

fn read_fasta(path: &Path) -> Vec<Vec<u8>> {
    fasta::Reader::from_file(path)
        .unwrap()
        .records()
        .map(|record| record.unwrap().seq().to_vec())
        .collect()
}

fn args<'a>(subcommand: &'a str, tumour: &'a str, healthy: &'a str) -> Vec<&'a str> {
    vec![
        "suffixcall",
        subcommand,
        "--tumour",
        tumour,
        "--healthy",
        healthy,
        "--min-suffix-len",
        "20",
        "--threads",
        "2",
    ]
}

#[test]
fn test_call_detects_planted_snv() {
    let tmp = tempfile::tempdir().unwrap();
    let (tumour, healthy) = setup(tmp.path());
    let outdir = tmp.path().join("out");

    let mut argv = args("call", tumour.to_str().unwrap(), healthy.to_str().unwrap());
    argv.extend(&["--outdir", outdir.to_str().unwrap()]);
    cli::run(Suffixcall::from_iter(argv)).unwrap();

    // only reads of the subclone overlapping the substitution are tumour specific
    let extracted = read_fasta(&outdir.join("tumour_specific_reads.fasta"));
    let covering: Vec<_> = windows(&mutated_genome(), 2, 7)
        .into_iter()
        .filter(|read| !GENOME.as_bytes().windows(READ_LEN).any(|w| w == *read))
        .map(|read| read.to_vec())
        .collect();
    assert_eq!(covering.len(), 7);
    assert_eq!(extracted, covering);

    let pairs = fs::read_to_string(outdir.join("consensus_pairs.tsv")).unwrap();
    let mut rows = pairs.lines();
    assert_eq!(
        rows.next(),
        Some(
            "block_id\tmutated\tnon_mutated\tmutated_quality\tnon_mutated_quality\t\
             mutated_offset\tnon_mutated_offset\tleft_overhang\tright_overhang"
        )
    );
    let mut n_pairs = 0;
    for row in rows {
        let fields: Vec<_> = row.split('\t').collect();
        assert_eq!(fields.len(), 9);
        assert!(!fields[1].is_empty() && !fields[2].is_empty());
        assert_eq!(fields[1].len(), fields[3].len());
        assert_eq!(fields[2].len(), fields[4].len());
        n_pairs += 1;
    }
    assert!(n_pairs > 0);

    // forward blocks report T>A, reverse complemented ones A>T
    let snvs = fs::read_to_string(outdir.join("snvs.tsv")).unwrap();
    let mut rows = snvs.lines();
    assert_eq!(
        rows.next(),
        Some("block_id\tposition\treference\talternative")
    );
    let calls: Vec<(String, String)> = rows
        .map(|row| {
            let fields: Vec<_> = row.split('\t').collect();
            (fields[2].to_owned(), fields[3].to_owned())
        })
        .collect();
    assert!(!calls.is_empty());
    assert!(calls
        .iter()
        .all(|(r, a)| (r == "T" && a == "A") || (r == "A" && a == "T")));

    let fastq = fs::read_to_string(outdir.join("snv_consensus.fastq")).unwrap();
    assert!(fastq.starts_with("@block"));
    assert!(fastq.contains("[SNV:"));
}

#[test]
fn test_extract_matches_call() {
    let tmp = tempfile::tempdir().unwrap();
    let (tumour, healthy) = setup(tmp.path());
    let output = tmp.path().join("extracted.fa");

    let mut argv = args("extract", tumour.to_str().unwrap(), healthy.to_str().unwrap());
    argv.extend(&["--output", output.to_str().unwrap()]);
    cli::run(Suffixcall::from_iter(argv)).unwrap();

    let extracted = read_fasta(&output);
    assert_eq!(extracted.len(), 7);
    assert!(extracted
        .iter()
        .all(|read| !GENOME.as_bytes().windows(READ_LEN).any(|w| w == read.as_slice())));
}

#[test]
fn test_unknown_extension() {
    let tmp = tempfile::tempdir().unwrap();
    let (_, healthy) = setup(tmp.path());
    let tumour = tmp.path().join("tumour.txt");
    fs::write(&tumour, "").unwrap();

    let argv = args("extract", tumour.to_str().unwrap(), healthy.to_str().unwrap());
    assert!(cli::run(Suffixcall::from_iter(argv)).is_err());
}
