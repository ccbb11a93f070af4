// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

/// Concatenation of keyed text segments, e.g. one segment per read.
///
/// Keeps a sorted table of segment start positions, so that a position in the
/// concatenation can be mapped back to its segment and local offset in O(log n).
#[derive(Debug, Clone)]
pub(crate) struct ConcatLayout<K> {
    text: Vec<u8>,
    starts: Vec<usize>,
    keys: Vec<K>,
}

impl<K: Copy> Default for ConcatLayout<K> {
    fn default() -> Self {
        ConcatLayout {
            text: Vec::new(),
            starts: Vec::new(),
            keys: Vec::new(),
        }
    }
}

impl<K: Copy> ConcatLayout<K> {
    /// Append a segment made of the given parts.
    pub(crate) fn push(&mut self, key: K, parts: &[&[u8]]) {
        self.starts.push(self.text.len());
        self.keys.push(key);
        for part in parts {
            self.text.extend_from_slice(part);
        }
    }

    pub(crate) fn text(&self) -> &[u8] {
        &self.text
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Segment key and offset within the segment of position `pos`.
    pub(crate) fn locate(&self, pos: usize) -> (K, usize) {
        let idx = self.starts.partition_point(|start| *start <= pos) - 1;
        (self.keys[idx], pos - self.starts[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate() {
        let mut layout = ConcatLayout::default();
        layout.push(7, &[b"ACG$"]);
        layout.push(3, &[b"TT$", b"AA$"]);
        layout.push(9, &[b"C$"]);

        assert_eq!(layout.text(), b"ACG$TT$AA$C$");
        assert_eq!(layout.locate(0), (7, 0));
        assert_eq!(layout.locate(3), (7, 3));
        assert_eq!(layout.locate(4), (3, 0));
        assert_eq!(layout.locate(9), (3, 5));
        assert_eq!(layout.locate(10), (9, 0));
        assert_eq!(layout.locate(11), (9, 1));
    }
}
