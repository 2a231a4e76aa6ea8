use crate::planes::split_dst;
use crate::{
    BlockGrid, ColorMatrix, ConvertError, YCbCrPlanes, convert, convert_unchecked, verify_input,
};
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};

/// Same as [`convert`], but splits the image into bands of block rows converted in parallel
///
/// Produces the exact same output as [`convert`].
#[inline(never)]
pub fn convert_multi_thread(
    src: YCbCrPlanes<'_>,
    dst: &mut [u32],
    grid: BlockGrid,
    matrix: ColorMatrix,
) -> Result<(), ConvertError> {
    verify_input(&src, dst, grid)?;

    let threads = num_cpus::get();

    if threads == 1 || grid.rows() == 1 {
        return convert(src, dst, grid, matrix);
    }

    let bands = threads.min(grid.rows());

    log::trace!(
        "converting {}x{} pixels in {bands} bands of block rows",
        grid.width(),
        grid.height()
    );

    let src_bands: Vec<_> = src.split(grid, bands).collect();
    let dst_bands = split_dst(dst, grid, bands);

    src_bands
        .into_par_iter()
        .zip(dst_bands)
        .for_each(|((src, band), dst)| {
            // Safety: Every band lies within the checked input
            unsafe { convert_unchecked(src, dst, band, matrix) }
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_single_threaded() {
        let grid = BlockGrid::new(5, 13).unwrap();
        let n = grid.pixel_count();

        let y: Vec<u8> = (0..n).map(|i| (i * 7 % 256) as u8).collect();
        let cb: Vec<u8> = (0..n).map(|i| (i * 13 % 256) as u8).collect();
        let cr: Vec<u8> = (0..n).map(|i| (i * 29 % 256) as u8).collect();
        let src = YCbCrPlanes::new(&y, &cb, &cr);

        let mut single = vec![0u32; n];
        let mut multi = vec![0u32; n];

        convert(src, &mut single, grid, ColorMatrix::BT601).unwrap();
        convert_multi_thread(src, &mut multi, grid, ColorMatrix::BT601).unwrap();

        assert_eq!(single, multi);
    }

    #[test]
    fn rejects_small_destination() {
        let grid = BlockGrid::new(2, 2).unwrap();
        let planes = [0u8; 256];
        let mut dst = [0u32; 255];

        assert!(
            convert_multi_thread(
                YCbCrPlanes::new(&planes, &planes, &planes),
                &mut dst,
                grid,
                ColorMatrix::BT601
            )
            .is_err()
        );
    }
}
