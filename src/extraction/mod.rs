// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Detection of tumour-enriched loci in the generalized suffix array.

use std::collections::BTreeSet;
use std::ops::Range;
use std::sync::Mutex;

use anyhow::Result;
use derive_new::new;

use crate::index::GenomicIndex;
use crate::params::Params;
use crate::reads::Tissue;
use crate::scan::{partitions, Runs};

/// Tumour read ids collected by concurrent workers.
///
/// Workers accumulate locally and hand over whole batches, so the lock is taken once per
/// worker.
#[derive(Debug, Default)]
pub struct ExtractionSet {
    read_ids: Mutex<BTreeSet<usize>>,
}

impl ExtractionSet {
    pub fn new() -> Self {
        ExtractionSet::default()
    }

    pub fn merge(&self, batch: BTreeSet<usize>) {
        let mut read_ids = self.read_ids.lock().unwrap();
        if read_ids.is_empty() {
            *read_ids = batch;
        } else {
            read_ids.extend(batch);
        }
    }

    pub fn into_inner(self) -> BTreeSet<usize> {
        self.read_ids.into_inner().unwrap()
    }
}

/// Whether a run with the given tissue counts is a tumour-enriched locus.
pub(crate) fn is_tumour_enriched(tumour: usize, healthy: usize, params: &Params) -> bool {
    if tumour + healthy == 1 {
        return tumour == 1 && params.min_tumour_count() == 1;
    }
    tumour > 0
        && tumour >= params.min_tumour_count()
        && healthy as f64 / tumour as f64 <= params.econt()
}

#[derive(new, Debug, Clone, Copy)]
pub struct LocusExtractor {
    params: Params,
    threads: usize,
}

impl LocusExtractor {
    /// Collect the ids of all tumour reads taking part in a tumour-enriched locus.
    ///
    /// The index is split into one static partition per thread.
    pub fn extract<I>(&self, index: &I) -> Result<BTreeSet<usize>>
    where
        I: GenomicIndex + ?Sized,
    {
        let threads = self.threads.max(1);
        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
        let ranges = partitions(index.len(), threads);
        info!(
            "Scanning {} suffixes in {} partitions.",
            index.len(),
            ranges.len()
        );

        let extracted = ExtractionSet::new();
        // one task per partition, never split further
        pool.scope(|scope| {
            for range in &ranges {
                let extracted = &extracted;
                scope.spawn(move |_| {
                    let found = self.scan_partition(index, range.clone());
                    debug!(
                        "Partition {}..{}: {} tumour reads.",
                        range.start,
                        range.end,
                        found.len()
                    );
                    extracted.merge(found);
                });
            }
        });

        let read_ids = extracted.into_inner();
        info!("Extracted {} tumour-specific reads.", read_ids.len());
        Ok(read_ids)
    }

    fn scan_partition<I>(&self, index: &I, range: Range<usize>) -> BTreeSet<usize>
    where
        I: GenomicIndex + ?Sized,
    {
        let min_suffix_len = self.params.min_suffix_len();
        let mut found = BTreeSet::new();
        let runs = Runs::new(range, index.len(), |seed, pos| {
            index.lcp_at(seed, pos) >= min_suffix_len
        });

        for run in runs {
            let members: Vec<_> = run.map(|rank| index.get(rank)).collect();
            let tumour = members
                .iter()
                .filter(|s| s.tissue() == Tissue::Tumour)
                .count();
            let healthy = members.len() - tumour;

            if is_tumour_enriched(tumour, healthy, &self.params) {
                found.extend(
                    members
                        .iter()
                        .filter(|s| s.tissue() == Tissue::Tumour)
                        .map(|s| s.read_id()),
                );
            }
        }
        found
    }
}
