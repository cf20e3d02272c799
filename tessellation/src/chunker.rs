//! `Chunker<T>`: a flat buffer of `T` plus a parallel list of `(offset,
//! length)` contour ranges (spec §3). Generalizes the teacher's
//! single-contour `Polygon<'l, T>` (`path/src/polygon.rs`) to own its
//! storage and hold any number of contours.

use alloc::vec::Vec;

use crate::error::InvalidInput;

/// An ordered sequence of contours sharing one flat backing buffer.
/// Mutation during a planarize run is forbidden by convention — nothing in
/// this type enforces it, matching the teacher's own `Polygon`, which is
/// just a borrowed slice plus a `closed` flag.
#[derive(Clone, Debug, Default)]
pub struct Chunker<T> {
    data: Vec<T>,
    ranges: Vec<(u32, u32)>,
}

impl<T> Chunker<T> {
    pub fn new() -> Self {
        Chunker {
            data: Vec::new(),
            ranges: Vec::new(),
        }
    }

    /// Appends one contour, returning its index.
    pub fn push_contour(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        let offset = self.data.len() as u32;
        self.data.extend(items);
        let len = self.data.len() as u32 - offset;
        self.ranges.push((offset, len));
        self.ranges.len() - 1
    }

    pub fn contour_count(&self) -> usize {
        self.ranges.len()
    }

    pub fn contour(&self, index: usize) -> &[T] {
        let (offset, len) = self.ranges[index];
        &self.data[offset as usize..(offset + len) as usize]
    }

    pub fn contours(&self) -> impl Iterator<Item = &[T]> {
        (0..self.contour_count()).map(move |i| self.contour(i))
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Checks spec §7's `InvalidInput` conditions: every contour has at
    /// least 3 vertices, and the ranges tile the backing buffer without
    /// overlap or gaps.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        let mut expected_offset = 0u32;
        for (index, &(offset, len)) in self.ranges.iter().enumerate() {
            if offset != expected_offset {
                return Err(InvalidInput::MismatchedChunkerOffsets);
            }
            if (len as usize) < 3 {
                return Err(InvalidInput::ContourTooShort {
                    contour_index: index,
                    len: len as usize,
                });
            }
            expected_offset += len;
        }
        if expected_offset as usize != self.data.len() {
            return Err(InvalidInput::MismatchedChunkerOffsets);
        }
        Ok(())
    }
}

#[test]
fn test_chunker_roundtrip() {
    let mut c: Chunker<i32> = Chunker::new();
    c.push_contour([1, 2, 3]);
    c.push_contour([4, 5, 6, 7]);
    assert_eq!(c.contour_count(), 2);
    assert_eq!(c.contour(0), &[1, 2, 3]);
    assert_eq!(c.contour(1), &[4, 5, 6, 7]);
    assert!(c.validate().is_ok());
}

#[test]
fn test_chunker_rejects_short_contour() {
    let mut c: Chunker<i32> = Chunker::new();
    c.push_contour([1, 2]);
    assert!(c.validate().is_err());
}
