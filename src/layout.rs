//! Near-square grid sizing.

/// Columns and rows of the figure grid.
///
/// `columns = ceil(sqrt(n))` and `rows = rint(sqrt(n))` (round half to even),
/// kept bit-for-bit compatible with the layouts earlier tools produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
}

impl GridLayout {
    pub fn for_count(count: usize) -> Self {
        let root = (count as f64).sqrt();
        Self {
            columns: root.ceil() as usize,
            rows: root.round_ties_even() as usize,
        }
    }

    pub fn capacity(&self) -> usize {
        self.columns * self.rows
    }

    /// `(column, row)` of the `index`-th cell in row-major order.
    pub fn cell(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.capacity() {
            return None;
        }
        Some((index % self.columns, index / self.columns))
    }
}
