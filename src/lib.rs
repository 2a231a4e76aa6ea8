//! Conversion of planar YCbCr samples, as produced by the inverse DCT stage of a baseline
//! JPEG decoder, into packed 32 bit pixels.
//!
//! Every output pixel holds the bytes `B, G, R, 0` in memory order. The conversion is
//! vectorized with the widest SIMD extension detected at runtime and falls back to a
//! scalar path that produces the exact same output.
#![allow(unsafe_op_in_unsafe_fn)]

use kernel::YCbCrToArgb;
use planes::bounds_check_dst;

pub use color::{ColorMatrix, Coefficients};
pub use grid::{BLOCK_SIZE, BlockGrid, GridError};
#[cfg(feature = "multi-thread")]
pub use multi_thread::convert_multi_thread;
pub use planes::{BoundsCheckError, Plane, YCbCrPlanes};

mod color;
mod grid;
mod kernel;
#[cfg(feature = "multi-thread")]
mod multi_thread;
mod planes;
mod vector;

mod arch {
    #[cfg(target_arch = "x86")]
    pub use std::arch::x86::*;
    #[cfg(target_arch = "x86_64")]
    pub use std::arch::x86_64::*;

    #[cfg(target_arch = "aarch64")]
    pub use std::arch::aarch64::*;
    #[cfg(target_arch = "aarch64")]
    pub use std::arch::is_aarch64_feature_detected;
}

/// Everything that can go wrong when calling [`convert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    BoundsCheck(#[from] BoundsCheckError),
}

/// Verify that the planes and destination are large enough for the grid
fn verify_input(
    src: &YCbCrPlanes<'_>,
    dst: &[u32],
    grid: BlockGrid,
) -> Result<(), BoundsCheckError> {
    src.bounds_check(grid)?;
    bounds_check_dst(dst, grid)
}

/// Convert the YCbCr samples covering `grid` into packed pixels
///
/// Pixel `i` of `dst` is computed from sample `i` of each plane. Elements past
/// [`BlockGrid::pixel_count`] are left untouched.
///
/// # Example
///
/// ```
/// use ycbcr_argb::{BlockGrid, ColorMatrix, YCbCrPlanes, convert};
///
/// let grid = BlockGrid::new(1, 1).unwrap();
///
/// let y = [200u8; 64];
/// let cb = [128u8; 64];
/// let cr = [198u8; 64];
/// let mut argb = [0u32; 64];
///
/// convert(YCbCrPlanes::new(&y, &cb, &cr), &mut argb, grid, ColorMatrix::BT601).unwrap();
///
/// assert_eq!(argb[0].to_ne_bytes(), [200, 150, 255, 0]);
/// ```
pub fn convert(
    src: YCbCrPlanes<'_>,
    dst: &mut [u32],
    grid: BlockGrid,
    matrix: ColorMatrix,
) -> Result<(), ConvertError> {
    verify_input(&src, dst, grid)?;

    // Safety: Inputs have been checked
    unsafe { convert_unchecked(src, dst, grid, matrix) };

    Ok(())
}

/// Same as [`convert`] without verifying the buffer sizes
///
/// # Safety
///
/// Every plane and `dst` must hold at least [`BlockGrid::pixel_count`] elements.
/// Only debug builds assert this.
pub unsafe fn convert_unchecked(
    src: YCbCrPlanes<'_>,
    dst: &mut [u32],
    grid: BlockGrid,
    matrix: ColorMatrix,
) {
    debug_assert!(verify_input(&src, dst, grid).is_ok());

    kernel::visit(
        grid.width(),
        grid.height(),
        YCbCrToArgb {
            y: src.y.as_ptr(),
            cb: src.cb.as_ptr(),
            cr: src.cr.as_ptr(),
            dst: dst.as_mut_ptr(),
            coefficients: matrix.coefficients(),
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(columns: usize, rows: usize) -> BlockGrid {
        BlockGrid::new(columns, rows).unwrap()
    }

    #[test]
    fn rejects_small_planes() {
        let full = [0u8; 64];
        let short = [0u8; 32];
        let mut dst = [0u32; 64];

        let err = convert(
            YCbCrPlanes::new(&full, &short, &full),
            &mut dst,
            grid(1, 1),
            ColorMatrix::BT601,
        )
        .unwrap_err();

        assert_eq!(
            err,
            ConvertError::BoundsCheck(BoundsCheckError::PlaneTooSmall {
                plane: Plane::Cb,
                minimum: 64,
                got: 32
            })
        );
        assert!(dst.iter().all(|&px| px == 0));
    }

    #[test]
    fn rejects_small_destination() {
        let full = [0u8; 128];
        let mut dst = [0u32; 127];

        let err = convert(
            YCbCrPlanes::new(&full, &full, &full),
            &mut dst,
            grid(2, 1),
            ColorMatrix::BT601,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ConvertError::BoundsCheck(BoundsCheckError::DestinationTooSmall {
                minimum: 128,
                got: 127
            })
        ));
    }

    #[test]
    fn leaves_excess_destination_untouched() {
        let y = [10u8; 64];
        let c = [128u8; 64];
        let mut dst = [u32::MAX; 70];

        convert(YCbCrPlanes::new(&y, &c, &c), &mut dst, grid(1, 1), ColorMatrix::BT601).unwrap();

        assert!(dst[..64].iter().all(|px| px.to_ne_bytes() == [10, 10, 10, 0]));
        assert!(dst[64..].iter().all(|&px| px == u32::MAX));
    }

    #[test]
    fn saturation_boundary() {
        let y = [0u8; 64];
        let c = [255u8; 64];
        let mut dst = [0u32; 64];

        convert(YCbCrPlanes::new(&y, &c, &c), &mut dst, grid(1, 1), ColorMatrix::BT601).unwrap();

        // R = 178.05, G = -134.56, B = 225.04
        assert!(dst.iter().all(|px| px.to_ne_bytes() == [225, 0, 178, 0]));

        let y = [255u8; 64];
        let c = [0u8; 64];

        convert(YCbCrPlanes::new(&y, &c, &c), &mut dst, grid(1, 1), ColorMatrix::BT601).unwrap();

        // R = 75.54, G = 390.46, B = 28.18
        assert!(dst.iter().all(|px| px.to_ne_bytes() == [28, 255, 76, 0]));
    }

    #[test]
    fn tuned_matrix_deviates_in_green() {
        let y = [128u8; 64];
        let cb = [0u8; 64];
        let cr = [128u8; 64];
        let src = YCbCrPlanes::new(&y, &cb, &cr);

        let mut bt601 = [0u32; 64];
        let mut tuned = [0u32; 64];

        convert(src, &mut bt601, grid(1, 1), ColorMatrix::BT601).unwrap();
        convert(src, &mut tuned, grid(1, 1), ColorMatrix::Tuned).unwrap();

        // G = 128 + 0.344136 * 128 = 172.05 vs 128 + 0.381834 * 128 = 176.87
        // B = 128 - 1.772 * 128 = -98.8 vs 128 - 1.7772 * 128 = -99.5
        assert_eq!(bt601[0].to_ne_bytes(), [0, 172, 128, 0]);
        assert_eq!(tuned[0].to_ne_bytes(), [0, 177, 128, 0]);
    }
}
