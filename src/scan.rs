// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Run scanning over sorted suffix sequences.
//!
//! A run is a maximal stretch `[seed, extension)` of positions where every member is
//! linked to the seed. For LCP thresholds over sorted suffixes, a position is linked to
//! the seed exactly when it is linked to its predecessor inside the run. This allows a
//! range of positions to be scanned on its own: positions at the start of the range that
//! continue a run begun in front of it belong to that earlier run and are skipped, while
//! runs seeded inside the range are followed beyond its end. Scanning a partition of the
//! sequence range by range thus yields the same runs as one sequential scan, including a
//! singleton run for an unlinked last position.

use std::ops::Range;

/// Iterator over the runs seeded inside a range of positions.
pub(crate) struct Runs<F> {
    seed: usize,
    end: usize,
    len: usize,
    linked: F,
}

impl<F> Runs<F>
where
    F: Fn(usize, usize) -> bool,
{
    /// Runs seeded in `range` over a sequence of `len` positions. `linked(seed, pos)`
    /// decides whether `pos` belongs to the run seeded at `seed`.
    pub(crate) fn new(range: Range<usize>, len: usize, linked: F) -> Self {
        let end = range.end.min(len);
        let mut seed = range.start;
        while seed > 0 && seed < end && linked(seed - 1, seed) {
            seed += 1;
        }
        Runs {
            seed,
            end,
            len,
            linked,
        }
    }
}

impl<F> Iterator for Runs<F>
where
    F: Fn(usize, usize) -> bool,
{
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        if self.seed >= self.end {
            return None;
        }
        let seed = self.seed;
        let mut extension = seed + 1;
        while extension < self.len && (self.linked)(seed, extension) {
            extension += 1;
        }
        self.seed = extension;
        Some(seed..extension)
    }
}

/// Split `len` positions into `n` contiguous ranges. The last range absorbs the remainder.
pub(crate) fn partitions(len: usize, n: usize) -> Vec<Range<usize>> {
    let n = n.max(1);
    let chunk = len / n;
    (0..n)
        .map(|i| {
            let start = i * chunk;
            let end = if i == n - 1 { len } else { start + chunk };
            start..end
        })
        .filter(|range| !range.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // positions sharing a label are linked
    fn labelled(labels: &'static [u8]) -> impl Fn(usize, usize) -> bool {
        move |a, b| labels[a] == labels[b]
    }

    const LABELS: &[u8] = b"aaabccccdde";

    #[test]
    fn test_sequential_runs() {
        let runs: Vec<_> = Runs::new(0..LABELS.len(), LABELS.len(), labelled(LABELS)).collect();
        assert_eq!(runs, vec![0..3, 3..4, 4..8, 8..10, 10..11]);
    }

    #[test]
    fn test_last_position_singleton() {
        let labels: &'static [u8] = b"aab";
        let runs: Vec<_> = Runs::new(0..3, 3, labelled(labels)).collect();
        assert_eq!(runs.last(), Some(&(2..3)));
    }

    #[test]
    fn test_partitioned_equals_sequential() {
        let sequential: Vec<_> =
            Runs::new(0..LABELS.len(), LABELS.len(), labelled(LABELS)).collect();
        for n in 1..=LABELS.len() + 2 {
            let partitioned: Vec<_> = partitions(LABELS.len(), n)
                .into_iter()
                .flat_map(|range| Runs::new(range, LABELS.len(), labelled(LABELS)))
                .collect();
            assert_eq!(partitioned, sequential, "{} partitions", n);
        }
    }

    #[test]
    fn test_partitions() {
        assert_eq!(partitions(10, 3), vec![0..3, 3..6, 6..10]);
        assert_eq!(partitions(2, 4), vec![0..2]);
        assert_eq!(partitions(0, 2), Vec::<Range<usize>>::new());
        assert_eq!(partitions(5, 0), vec![0..5]);
    }
}
