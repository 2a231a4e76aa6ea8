/// Width and height in samples of a single block (MCU component)
pub const BLOCK_SIZE: usize = 8;

/// Everything that can go wrong when describing a [`BlockGrid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("block grid must have at least one block column and one block row")]
    ZeroDimension,

    #[error("block grid of {columns}x{rows} blocks overflows the addressable pixel count")]
    TooLarge { columns: usize, rows: usize },
}

/// Rectangular grid of 8x8 blocks covering the whole image
///
/// All planes and the pixel buffer share this geometry, stored densely in row-major order
/// with a stride equal to [`BlockGrid::width`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    columns: usize,
    rows: usize,
}

impl BlockGrid {
    pub fn new(columns: usize, rows: usize) -> Result<Self, GridError> {
        if columns == 0 || rows == 0 {
            return Err(GridError::ZeroDimension);
        }

        // Make sure width * height can never overflow later on
        columns
            .checked_mul(BLOCK_SIZE)
            .zip(rows.checked_mul(BLOCK_SIZE))
            .and_then(|(w, h)| w.checked_mul(h))
            .ok_or(GridError::TooLarge { columns, rows })?;

        Ok(Self { columns, rows })
    }

    /// Number of blocks per row
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of block rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Width of the image in pixels
    pub fn width(&self) -> usize {
        self.columns * BLOCK_SIZE
    }

    /// Height of the image in pixels
    pub fn height(&self) -> usize {
        self.rows * BLOCK_SIZE
    }

    /// Number of samples in each plane and pixels in the destination
    pub fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }

    /// Split the grid into at most `n` bands of whole block rows, top to bottom
    ///
    /// Bands differ in height by at most one block row.
    pub(crate) fn split_rows(&self, n: usize) -> impl Iterator<Item = BlockGrid> + use<> {
        let n = n.clamp(1, self.rows);
        let base = self.rows / n;
        let extra = self.rows % n;
        let columns = self.columns;

        (0..n).map(move |i| BlockGrid {
            columns,
            rows: base + usize::from(i < extra),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry() {
        let grid = BlockGrid::new(2, 1).unwrap();

        assert_eq!(grid.width(), 16);
        assert_eq!(grid.height(), 8);
        assert_eq!(grid.pixel_count(), 128);
    }

    #[test]
    fn rejects_zero() {
        assert_eq!(BlockGrid::new(0, 4), Err(GridError::ZeroDimension));
        assert_eq!(BlockGrid::new(4, 0), Err(GridError::ZeroDimension));
    }

    #[test]
    fn rejects_overflow() {
        assert_eq!(
            BlockGrid::new(usize::MAX / 4, 1),
            Err(GridError::TooLarge {
                columns: usize::MAX / 4,
                rows: 1
            })
        );
    }

    #[test]
    fn split_rows_covers_grid() {
        let grid = BlockGrid::new(3, 7).unwrap();

        let bands: Vec<_> = grid.split_rows(3).collect();
        assert_eq!(bands.iter().map(|b| b.rows()).collect::<Vec<_>>(), [3, 2, 2]);
        assert!(bands.iter().all(|b| b.columns() == 3));

        // More bands than rows
        assert_eq!(grid.split_rows(64).count(), 7);
    }
}
