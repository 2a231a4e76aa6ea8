use crate::BlockGrid;
use std::fmt;

/// Identifies one of the three sample planes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    Y,
    Cb,
    Cr,
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Plane::Y => "Y",
            Plane::Cb => "Cb",
            Plane::Cr => "Cr",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoundsCheckError {
    #[error("invalid size of plane {plane}, expected it to be at least {minimum}, but got {got}")]
    PlaneTooSmall {
        plane: Plane,
        minimum: usize,
        got: usize,
    },

    #[error("invalid destination size, expected it to be at least {minimum}, but got {got}")]
    DestinationTooSmall { minimum: usize, got: usize },
}

/// Planar, fully upsampled YCbCr samples as produced by the inverse DCT stage
///
/// Every plane is row-major with a stride of [`BlockGrid::width`] samples.
#[derive(Debug, Clone, Copy)]
pub struct YCbCrPlanes<'a> {
    pub y: &'a [u8],
    pub cb: &'a [u8],
    pub cr: &'a [u8],
}

impl<'a> YCbCrPlanes<'a> {
    pub fn new(y: &'a [u8], cb: &'a [u8], cr: &'a [u8]) -> Self {
        Self { y, cb, cr }
    }

    /// Check that every plane can hold the samples of the given grid
    pub fn bounds_check(&self, grid: BlockGrid) -> Result<(), BoundsCheckError> {
        let minimum = grid.pixel_count();

        for (plane, buf) in [(Plane::Y, self.y), (Plane::Cb, self.cb), (Plane::Cr, self.cr)] {
            if buf.len() < minimum {
                return Err(BoundsCheckError::PlaneTooSmall {
                    plane,
                    minimum,
                    got: buf.len(),
                });
            }
        }

        Ok(())
    }

    /// Split the planes into consecutive bands of whole block rows
    ///
    /// Must only be called after a successful [`YCbCrPlanes::bounds_check`] for `grid`.
    pub(crate) fn split(
        self,
        grid: BlockGrid,
        n: usize,
    ) -> impl Iterator<Item = (YCbCrPlanes<'a>, BlockGrid)> {
        let mut rem = self;

        grid.split_rows(n).map(move |band| {
            let len = band.pixel_count();

            let (y, y_rem) = rem.y.split_at(len);
            let (cb, cb_rem) = rem.cb.split_at(len);
            let (cr, cr_rem) = rem.cr.split_at(len);

            rem = YCbCrPlanes::new(y_rem, cb_rem, cr_rem);

            (YCbCrPlanes::new(y, cb, cr), band)
        })
    }
}

/// Check that the destination can hold every pixel of the given grid
pub(crate) fn bounds_check_dst(dst: &[u32], grid: BlockGrid) -> Result<(), BoundsCheckError> {
    let minimum = grid.pixel_count();

    if dst.len() < minimum {
        return Err(BoundsCheckError::DestinationTooSmall {
            minimum,
            got: dst.len(),
        });
    }

    Ok(())
}

/// Split the destination into bands matching [`YCbCrPlanes::split`]
pub(crate) fn split_dst(dst: &mut [u32], grid: BlockGrid, n: usize) -> Vec<&mut [u32]> {
    let mut rem = dst;

    grid.split_rows(n)
        .map(|band| {
            let (band, tail) = std::mem::take(&mut rem).split_at_mut(band.pixel_count());
            rem = tail;
            band
        })
        .collect()
}
