// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::BTreeSet;

use anyhow::Result;
use derive_builder::Builder;
use getset::Getters;

use crate::blocks::{AlleleCompleter, BlockExtractor, BreakPointBlock, LocalIndexBuilder};
use crate::calling::snv::{call_snvs, Snv};
use crate::consensus::{ConsensusBuilder, ConsensusPair};
use crate::errors::Error;
use crate::extraction::LocusExtractor;
use crate::index::GenomicIndex;
use crate::params::Params;
use crate::reads::ReadStore;

/// Result of a full calling run.
#[derive(Getters, Debug, Clone, Default)]
#[getset(get = "pub")]
pub struct Calls {
    extracted: BTreeSet<usize>,
    blocks: Vec<BreakPointBlock>,
    pairs: Vec<ConsensusPair>,
    snvs: Vec<Snv>,
}

#[derive(Builder)]
#[builder(pattern = "owned")]
pub struct Caller<'a> {
    reads: &'a ReadStore,
    #[builder(default)]
    params: Params,
    #[builder(default = "1")]
    threads: usize,
}

impl<'a> Caller<'a> {
    fn validate(&self) -> Result<()> {
        self.params.validate()?;
        if self.threads == 0 {
            return Err(Error::InvalidThreads.into());
        }
        Ok(())
    }

    /// Ids of all tumour reads taking part in a tumour-enriched locus.
    pub fn extract<I>(&self, index: &I) -> Result<BTreeSet<usize>>
    where
        I: GenomicIndex + ?Sized,
    {
        self.validate()?;
        LocusExtractor::new(self.params, self.threads).extract(index)
    }

    pub fn call<I>(&self, index: &I) -> Result<Calls>
    where
        I: GenomicIndex + ?Sized,
    {
        let min_suffix_len = self.params.min_suffix_len();

        // Step 1: collect reads of tumour-enriched loci.
        let extracted = self.extract(index)?;

        // Step 2: sort their suffixes in both orientations and group them into blocks.
        let tags = LocalIndexBuilder::new(self.reads, min_suffix_len).build(&extracted);
        info!("Built local index with {} suffixes.", tags.len());
        let mut blocks = BlockExtractor::new(self.reads, self.params).extract(&tags);

        // Step 3: add healthy and switched evidence from the global index.
        let completer = AlleleCompleter::new(index, self.reads, self.params);
        let inserted: usize = blocks
            .iter_mut()
            .map(|block| completer.complete(block))
            .sum();
        info!("Added {} tags from the global index.", inserted);

        // Step 4: consensus pairs.
        let builder = ConsensusBuilder::new(self.reads, self.params);
        let pairs: Vec<_> = blocks
            .iter()
            .filter_map(|block| builder.build_pair(block))
            .collect();
        info!(
            "Built {} consensus pairs from {} blocks.",
            pairs.len(),
            blocks.len()
        );

        // Step 5: isolated single base differences.
        let snvs: Vec<_> = pairs.iter().flat_map(call_snvs).collect();
        info!("Found {} SNV candidates.", snvs.len());

        Ok(Calls {
            extracted,
            blocks,
            pairs,
            snvs,
        })
    }
}
