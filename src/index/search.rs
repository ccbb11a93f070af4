// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::cmp::Ordering;

use crate::index::GenomicIndex;
use crate::reads::ReadStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Comparison {
    lcp: usize,
    ordering: Ordering,
}

/// Compare a suffix against the query, assuming the first `skip` positions match.
/// `Equal` means the query is a prefix of the suffix.
fn compare(suffix: &[u8], query: &[u8], skip: usize) -> Comparison {
    let lcp = skip
        + suffix
            .iter()
            .skip(skip)
            .zip(query.iter().skip(skip))
            .take_while(|(a, b)| a == b)
            .count();

    let ordering = if lcp == query.len() {
        Ordering::Equal
    } else {
        match suffix.get(lcp) {
            Some(c) => c.cmp(&query[lcp]),
            None => Ordering::Less,
        }
    };

    Comparison { lcp, ordering }
}

/// Find the rank of some suffix of `index` that starts with `query`.
///
/// Every suffix between the current bounds shares at least the smaller of the two
/// bound LCPs with the query, so comparisons resume from there instead of position 0.
pub fn search<I>(index: &I, reads: &ReadStore, query: &[u8]) -> Option<usize>
where
    I: GenomicIndex + ?Sized,
{
    if index.is_empty() || query.is_empty() {
        return None;
    }
    let suffix = |rank: usize| reads.suffix(&index.get(rank));

    let mut left = 0;
    let mut right = index.len() - 1;
    let mut left_lcp = compare(suffix(left), query, 0).lcp;
    let mut right_lcp = compare(suffix(right), query, 0).lcp;

    while left <= right {
        let mid = left + (right - left) / 2;
        let cmp = compare(suffix(mid), query, left_lcp.min(right_lcp));
        match cmp.ordering {
            Ordering::Equal => return Some(mid),
            Ordering::Less => {
                left = mid + 1;
                left_lcp = cmp.lcp;
            }
            Ordering::Greater => {
                if mid == 0 {
                    break;
                }
                right = mid - 1;
                right_lcp = cmp.lcp;
            }
        }
    }
    None
}
