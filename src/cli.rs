// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

use anyhow::Result;
use structopt::StructOpt;

use crate::calling::CallerBuilder;
use crate::constants;
use crate::index::GeneralizedSuffixArray;
use crate::output;
use crate::params::{Params, ParamsBuilder};
use crate::reads::ReadStore;

#[derive(Debug, StructOpt, Clone)]
#[structopt(
    name = "suffixcall",
    about = "Reference-free detection of tumour-specific SNVs from tumour and healthy reads."
)]
#[structopt(setting = structopt::clap::AppSettings::ColoredHelp)]
pub struct Suffixcall {
    #[structopt(long, short, global = true, help = "Print debug messages.")]
    pub verbose: bool,
    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(Debug, StructOpt, Clone)]
pub enum Command {
    #[structopt(
        name = "call",
        about = "Build breakpoint blocks and consensus pairs and report SNV candidates."
    )]
    Call {
        #[structopt(flatten)]
        input: Input,
        #[structopt(flatten)]
        params: ParamsOpt,
        #[structopt(
            long,
            parse(from_os_str),
            help = "Directory to write consensus pairs, SNV candidates and extracted reads to."
        )]
        outdir: PathBuf,
    },
    #[structopt(
        name = "extract",
        about = "Write the tumour reads of tumour-enriched loci as FASTA."
    )]
    Extract {
        #[structopt(flatten)]
        input: Input,
        #[structopt(flatten)]
        params: ParamsOpt,
        #[structopt(
            long,
            parse(from_os_str),
            help = "FASTA file to write (if omitted, write to STDOUT)."
        )]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, StructOpt, Clone)]
pub struct Input {
    #[structopt(
        long,
        parse(from_os_str),
        required = true,
        help = "FASTQ or FASTA files (optionally gzipped) with reads from the tumour sample."
    )]
    tumour: Vec<PathBuf>,
    #[structopt(
        long,
        parse(from_os_str),
        required = true,
        help = "FASTQ or FASTA files (optionally gzipped) with reads from the healthy sample."
    )]
    healthy: Vec<PathBuf>,
    #[structopt(long, short, default_value = "1", help = "Number of worker threads.")]
    threads: usize,
}

#[derive(Debug, StructOpt, Clone)]
pub struct ParamsOpt {
    #[structopt(
        long = "params",
        parse(from_os_str),
        help = "JSON file with parameters. Overrides all parameter flags."
    )]
    params_file: Option<PathBuf>,
    #[structopt(
        long,
        default_value = "30",
        help = "Minimum number of shared bases for suffixes of the same locus."
    )]
    min_suffix_len: usize,
    #[structopt(
        long,
        default_value = "0.1",
        help = "Maximum ratio of healthy to tumour suffixes in a tumour-enriched locus."
    )]
    econt: f64,
    #[structopt(
        long,
        default_value = "4",
        help = "Minimum number of tumour suffixes in a tumour-enriched locus."
    )]
    min_tumour_count: usize,
    #[structopt(
        long,
        default_value = "4",
        help = "Minimum number of suffixes forming a breakpoint block."
    )]
    min_block_size: usize,
    #[structopt(
        long,
        default_value = "4",
        help = "Minimum read coverage of a consensus position."
    )]
    trim_value: usize,
    #[structopt(
        long,
        default_value = "80",
        help = "Blocks with more tags are skipped as repetitive."
    )]
    coverage_upper_threshold: usize,
    #[structopt(
        long,
        default_value = "0.1",
        help = "Base frequency above which a healthy consensus position counts as ambiguous."
    )]
    allelic_error_freq: f64,
}

impl ParamsOpt {
    pub fn params(&self) -> Result<Params> {
        if let Some(path) = &self.params_file {
            info!("Loading parameters from {}.", path.display());
            return Params::from_json(path);
        }
        let params = ParamsBuilder::default()
            .min_suffix_len(self.min_suffix_len)
            .econt(self.econt)
            .min_tumour_count(self.min_tumour_count)
            .min_block_size(self.min_block_size)
            .trim_value(self.trim_value)
            .coverage_upper_threshold(self.coverage_upper_threshold)
            .allelic_error_freq(self.allelic_error_freq)
            .build()?;
        params.validate()?;
        Ok(params)
    }
}

pub fn run(opt: Suffixcall) -> Result<()> {
    match opt.command {
        Command::Call {
            input,
            params,
            outdir,
        } => {
            let params = params.params()?;
            let reads = ReadStore::from_files(
                input.tumour.as_slice(),
                input.healthy.as_slice(),
                params.min_suffix_len(),
            )?;
            let index = GeneralizedSuffixArray::build(&reads, params.min_suffix_len());
            info!(
                "Built generalized suffix array with {} suffixes.",
                index.suffixes().len()
            );

            let calls = CallerBuilder::default()
                .reads(&reads)
                .params(params)
                .threads(input.threads)
                .build()?
                .call(&index)?;

            fs::create_dir_all(&outdir)?;
            output::write_pairs(
                File::create(outdir.join(constants::PAIRS_FILE))?,
                calls.pairs(),
            )?;
            output::write_snvs(
                File::create(outdir.join(constants::SNVS_FILE))?,
                calls.snvs(),
            )?;
            output::write_snv_fastq(
                File::create(outdir.join(constants::SNV_FASTQ_FILE))?,
                calls.pairs(),
                calls.snvs(),
            )?;
            output::write_reads_fasta(
                File::create(outdir.join(constants::EXTRACTED_READS_FILE))?,
                &reads,
                calls.extracted(),
            )?;
            info!("Results written to {}.", outdir.display());
        }
        Command::Extract {
            input,
            params,
            output: path,
        } => {
            let params = params.params()?;
            let reads = ReadStore::from_files(
                input.tumour.as_slice(),
                input.healthy.as_slice(),
                params.min_suffix_len(),
            )?;
            let index = GeneralizedSuffixArray::build(&reads, params.min_suffix_len());

            let extracted = CallerBuilder::default()
                .reads(&reads)
                .params(params)
                .threads(input.threads)
                .build()?
                .extract(&index)?;

            match path {
                Some(path) => {
                    output::write_reads_fasta(File::create(path)?, &reads, &extracted)?
                }
                None => output::write_reads_fasta(io::stdout(), &reads, &extracted)?,
            }
        }
    }
    Ok(())
}
