//! A fixed-size 2D boolean grid.
//!
//! [`CellMap`] stores one bit per cell, 64 cells per word, in row-major order
//! (Z rows of X cells). The dimensions are fixed at construction; every access
//! is bounds checked and out-of-range reads or writes are rejected rather than
//! panicking.
//!
//! # Example
//!
//! ```rust
//! use bulldoze_extensions::geometry::CellMap;
//!
//! let mut map = CellMap::new(5, 3);
//! assert!(map.set(4, 2, true));
//! assert!(!map.set(5, 0, true));
//! assert_eq!(map.get(4, 2), Some(true));
//! assert_eq!(map.get(5, 0), None);
//! assert_eq!(map.count(), 1);
//! ```

use std::fmt;

/// A 2D boolean grid with explicit width and height.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CellMap {
    /// The bits, stored as a vector of words.
    words: Vec<u64>,
    /// Cells along X.
    width: usize,
    /// Cells along Z.
    height: usize,
}

impl CellMap {
    /// Creates a grid with every cell cleared.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let len = width * height;
        Self {
            words: vec![0; len.div_ceil(64)],
            width,
            height,
        }
    }

    /// Creates a grid with every cell set.
    #[must_use]
    pub fn filled(width: usize, height: usize) -> Self {
        let mut map = Self::new(width, height);
        map.fill(true);
        map
    }

    /// Cells along X.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Cells along Z.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// Returns `true` if no cell is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    fn index(&self, x: usize, z: usize) -> Option<usize> {
        if x < self.width && z < self.height {
            Some(z * self.width + x)
        } else {
            None
        }
    }

    /// Reads a cell, or `None` if the position lies outside the grid.
    #[must_use]
    pub fn get(&self, x: usize, z: usize) -> Option<bool> {
        let index = self.index(x, z)?;
        Some((self.words[index / 64] & (1u64 << (index % 64))) != 0)
    }

    /// Writes a cell. Returns `false`, leaving the grid untouched, if the
    /// position lies outside the grid.
    pub fn set(&mut self, x: usize, z: usize, value: bool) -> bool {
        let Some(index) = self.index(x, z) else {
            return false;
        };

        let bit = 1u64 << (index % 64);
        if value {
            self.words[index / 64] |= bit;
        } else {
            self.words[index / 64] &= !bit;
        }
        true
    }

    /// Sets or clears every cell.
    pub fn fill(&mut self, value: bool) {
        let fill = if value { u64::MAX } else { 0 };
        for word in &mut self.words {
            *word = fill;
        }

        // Clear excess bits in last word
        let len = self.len();
        if value && len % 64 != 0 {
            if let Some(last) = self.words.last_mut() {
                *last = (1u64 << (len % 64)) - 1;
            }
        }
    }

    /// Number of set cells.
    #[must_use]
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Copies every cell of `other` into `self`.
    ///
    /// Nothing is copied, and `false` is returned, when the dimensions differ.
    /// The storage of `self` is never reallocated.
    pub fn copy_from(&mut self, other: &CellMap) -> bool {
        if self.width != other.width || self.height != other.height {
            return false;
        }

        self.words.copy_from_slice(&other.words);
        true
    }

    /// Returns an iterator over the `(x, z)` positions of set cells, row by row.
    pub fn iter(&self) -> CellMapIter<'_> {
        CellMapIter {
            map: self,
            index: 0,
        }
    }

    /// The grid as one byte per cell (`0` or `1`), row-major.
    ///
    /// This is the representation the host keeps for its region maps.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        (0..self.len())
            .map(|index| u8::from(self.words[index / 64] & (1u64 << (index % 64)) != 0))
            .collect()
    }
}

impl fmt::Debug for CellMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CellMap {}x{}", self.width, self.height)?;
        for z in 0..self.height {
            for x in 0..self.width {
                let cell = if self.get(x, z) == Some(true) { '#' } else { '.' };
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the set cells of a [`CellMap`].
pub struct CellMapIter<'a> {
    map: &'a CellMap,
    index: usize,
}

impl Iterator for CellMapIter<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.map.len();
        while self.index < len {
            let word_idx = self.index / 64;
            let bit_idx = self.index % 64;

            // Skip the rest of an empty word in one step
            let word = self.map.words[word_idx] >> bit_idx;
            if word == 0 {
                self.index = (word_idx + 1) * 64;
                continue;
            }

            let index = self.index + word.trailing_zeros() as usize;
            self.index = index + 1;
            if index < len {
                return Some((index % self.map.width, index / self.map.width));
            }
        }
        None
    }
}
