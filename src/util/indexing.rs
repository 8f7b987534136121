//! Index helpers for square, row-major grids and for splitting row ranges
//! into the contiguous bands handed to worker tasks.

use std::ops::Range;

#[inline]
pub fn coord_to_linear(row: usize, col: usize, size: usize) -> usize {
    debug_assert!(row < size && col < size);
    row * size + col
}

#[inline]
pub fn linear_to_coord(linear_index: usize, size: usize) -> (usize, usize) {
    (linear_index / size, linear_index % size)
}

/// Rows `1..size-1`, empty when the grid has no interior.
#[inline]
pub fn interior_range(size: usize) -> Range<usize> {
    1..size.saturating_sub(1)
}

#[inline]
pub fn is_boundary(row: usize, col: usize, size: usize) -> bool {
    row == 0 || col == 0 || row + 1 == size || col + 1 == size
}

/// Number of items per band when `len` items are split into `parts` bands.
/// Never returns zero so it can be handed to `chunks_mut`.
#[inline]
pub fn band_len(len: usize, parts: usize) -> usize {
    len.div_ceil(parts.max(1)).max(1)
}

/// Split `range` into at most `parts` contiguous, non-empty bands.
pub fn bands(range: Range<usize>, parts: usize) -> Vec<Range<usize>> {
    let step = band_len(range.len(), parts);
    let mut result = Vec::with_capacity(parts.max(1));
    let mut start = range.start;
    while start < range.end {
        let end = (start + step).min(range.end);
        result.push(start..end);
        start = end;
    }
    result
}
