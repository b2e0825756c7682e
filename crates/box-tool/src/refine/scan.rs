//! Boustrophedon traversal of the sampling grid.

/// One unit of sampling work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    /// True for the last cell visited in its row.
    pub row_end: bool,
}

/// Yields every cell of an `n x n` grid, even rows left to right and odd
/// rows right to left, so consecutive cells are always adjacent.
#[derive(Debug, Clone)]
pub struct ScanOrder {
    resolution: usize,
    next: usize,
}

impl ScanOrder {
    pub fn serpentine(resolution: usize) -> Self {
        Self { resolution, next: 0 }
    }
}

impl Iterator for ScanOrder {
    type Item = GridCell;

    fn next(&mut self) -> Option<GridCell> {
        let n = self.resolution;
        if self.next >= n * n {
            return None;
        }
        let row = self.next / n;
        let step = self.next % n;
        self.next += 1;
        let col = if row % 2 == 0 { step } else { n - 1 - step };
        Some(GridCell {
            row,
            col,
            row_end: step + 1 == n,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.resolution * self.resolution).saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ScanOrder {}
