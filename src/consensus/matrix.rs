// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use ndarray::{s, Array2};

use crate::constants::BASES;

const INVALID: i64 = -1;

/// Base counts per column, one row per base in `BASES` order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FrequencyMatrix {
    counts: Array2<i64>,
}

impl FrequencyMatrix {
    pub(crate) fn new(width: usize) -> Self {
        FrequencyMatrix {
            counts: Array2::zeros((BASES.len(), width)),
        }
    }

    pub(crate) fn width(&self) -> usize {
        self.counts.ncols()
    }

    /// Count `base` at `column`. Bases outside of ACGT are ignored.
    pub(crate) fn add(&mut self, column: usize, base: u8) {
        if let Some(row) = BASES.iter().position(|b| *b == base) {
            self.counts[[row, column]] += 1;
        }
    }

    pub(crate) fn coverage(&self, column: usize) -> usize {
        if self.is_invalid(column) {
            return 0;
        }
        self.counts.column(column).sum() as usize
    }

    pub(crate) fn count(&self, row: usize, column: usize) -> usize {
        self.counts[[row, column]].max(0) as usize
    }

    pub(crate) fn invalidate(&mut self, column: usize) {
        self.counts.slice_mut(s![.., column]).fill(INVALID);
    }

    pub(crate) fn is_invalid(&self, column: usize) -> bool {
        self.counts[[0, column]] == INVALID
    }

    /// Row with the strictly highest count. On ties the first row wins.
    pub(crate) fn majority(&self, column: usize) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for row in 0..BASES.len() {
            let count = self.count(row, column);
            if count > best.map_or(0, |(_, c)| c) {
                best = Some((row, count));
            }
        }
        best.map(|(row, _)| row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut matrix = FrequencyMatrix::new(3);
        for base in b"AAC" {
            matrix.add(0, *base);
        }
        matrix.add(1, b'N');
        assert_eq!(matrix.coverage(0), 3);
        assert_eq!(matrix.coverage(1), 0);
        assert_eq!(matrix.majority(0), Some(0));
        assert_eq!(matrix.majority(1), None);
    }

    #[test]
    fn test_tie_keeps_first_row() {
        let mut matrix = FrequencyMatrix::new(3);
        for base in b"TTCCGG" {
            matrix.add(0, *base);
        }
        for base in b"CCGG" {
            matrix.add(1, *base);
        }
        for base in b"GGCCTA" {
            matrix.add(2, *base);
        }
        // rows follow A, T, C, G order
        assert_eq!(matrix.majority(0), Some(1));
        assert_eq!(matrix.majority(1), Some(2));
        assert_eq!(matrix.majority(2), Some(2));
    }

    #[test]
    fn test_invalidate() {
        let mut matrix = FrequencyMatrix::new(2);
        for base in b"ATCG" {
            matrix.add(1, *base);
        }
        matrix.invalidate(1);
        assert!(matrix.is_invalid(1));
        assert_eq!(matrix.coverage(1), 0);
        assert_eq!(matrix.majority(1), None);
        assert!(!matrix.is_invalid(0));
    }
}
