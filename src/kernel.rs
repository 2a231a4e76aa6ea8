use crate::arch::*;
use crate::color::{Coefficients, ycbcr_to_rgb};
use crate::vector::Vector;

/// Visits an image row by row, one lane group of pixels at a time
pub(crate) trait RowVisitor {
    /// Process `V::LEN` pixels starting at the linear pixel offset
    unsafe fn visit<V: Vector>(&mut self, offset: usize);
}

/// Reads a lane group from each plane, converts it and writes the packed pixels
pub(crate) struct YCbCrToArgb {
    pub(crate) y: *const u8,
    pub(crate) cb: *const u8,
    pub(crate) cr: *const u8,
    pub(crate) dst: *mut u32,

    pub(crate) coefficients: Coefficients,
}

impl RowVisitor for YCbCrToArgb {
    #[inline(always)]
    unsafe fn visit<V: Vector>(&mut self, offset: usize) {
        let y = V::load_u8(self.y.add(offset));
        let cb = V::load_u8(self.cb.add(offset));
        let cr = V::load_u8(self.cr.add(offset));

        let (r, g, b) = ycbcr_to_rgb(&self.coefficients, y, cb, cr);

        V::write_bgr0(b, g, r, self.dst.add(offset));
    }
}

/// Visit every pixel of a `width` x `height` image using the widest vector the CPU supports
///
/// # Safety
///
/// Every pointer used by the visitor must be valid for `width * height` elements
#[inline(never)]
pub(crate) unsafe fn visit<R: RowVisitor>(width: usize, height: usize, visitor: R) {
    #[cfg(all(feature = "unstable", any(target_arch = "x86", target_arch = "x86_64")))]
    if is_x86_feature_detected!("avx512f") && is_x86_feature_detected!("avx512bw") {
        #[target_feature(enable = "avx512f", enable = "avx512bw")]
        unsafe fn call<R: RowVisitor>(width: usize, height: usize, visitor: R) {
            visit_impl::<__m512, _>(width, height, visitor);
        }

        // Safety: Did a feature check
        unsafe {
            call(width, height, visitor);
            return;
        }
    }

    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    if is_x86_feature_detected!("avx2") {
        #[target_feature(enable = "avx2")]
        unsafe fn call<R: RowVisitor>(width: usize, height: usize, visitor: R) {
            visit_impl::<__m256, _>(width, height, visitor);
        }

        // Safety: Did a feature check
        unsafe {
            call(width, height, visitor);
            return;
        }
    }

    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    if is_x86_feature_detected!("sse4.1") {
        #[target_feature(enable = "sse4.1")]
        unsafe fn call<R: RowVisitor>(width: usize, height: usize, visitor: R) {
            visit_impl::<__m128, _>(width, height, visitor);
        }

        // Safety: Did a feature check
        unsafe {
            call(width, height, visitor);
            return;
        }
    }

    #[cfg(target_arch = "aarch64")]
    if is_aarch64_feature_detected!("neon") {
        #[target_feature(enable = "neon")]
        unsafe fn call<R: RowVisitor>(width: usize, height: usize, visitor: R) {
            visit_impl::<float32x4_t, _>(width, height, visitor);
        }

        // Safety: Did a feature check
        unsafe {
            call(width, height, visitor);
            return;
        }
    }

    // Fallback to naive
    visit_impl::<f32, _>(width, height, visitor);
}

#[inline(always)]
pub(crate) unsafe fn visit_impl<V: Vector, R: RowVisitor>(
    width: usize,
    height: usize,
    mut visitor: R,
) {
    // How many pixels cannot be vectorized since they don't fit the vector (per row)
    let non_vectored_pixels_per_row = width % V::LEN;
    let vectored_pixels_per_row = width - non_vectored_pixels_per_row;

    for y in 0..height {
        let row = y * width;

        for x in (0..vectored_pixels_per_row).step_by(V::LEN) {
            visitor.visit::<V>(row + x);
        }

        // Process remaining pixels that couldn't be vectorized
        for x in vectored_pixels_per_row..width {
            visitor.visit::<f32>(row + x);
        }
    }
}
