use std::fmt::Debug;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) mod avx2;
#[cfg(all(feature = "unstable", any(target_arch = "x86", target_arch = "x86_64")))]
pub(crate) mod avx512;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) mod sse41;

#[cfg(target_arch = "aarch64")]
pub(crate) mod neon;

/// Abstraction over float SIMD vector and common operations
pub(crate) unsafe trait Vector: Debug + Copy + 'static {
    /// Many pixels (f32) can this vector hold
    const LEN: usize;

    /// Set all elements in the vector to the given value
    unsafe fn splat(v: f32) -> Self;

    unsafe fn vadd(self, other: Self) -> Self;

    unsafe fn vsub(self, other: Self) -> Self;
    unsafe fn vsubf(self, other: f32) -> Self {
        self.vsub(Self::splat(other))
    }

    unsafe fn vmul(self, other: Self) -> Self;
    unsafe fn vmulf(self, other: f32) -> Self {
        self.vmul(Self::splat(other))
    }

    /// Load LEN packed bytes and widen them to f32
    ///
    /// # Safety
    ///
    /// Pointer must be valid to read Self::LEN bytes
    unsafe fn load_u8(ptr: *const u8) -> Self;

    /// Round (ties to even) and saturate b, g and r to u8 and write LEN pixels
    /// with the bytes B, G, R, 0 in memory order
    ///
    /// # Safety
    ///
    /// Pointer must be valid to write Self::LEN u32s
    unsafe fn write_bgr0(b: Self, g: Self, r: Self, ptr: *mut u32);
}

unsafe impl Vector for f32 {
    const LEN: usize = 1;

    unsafe fn splat(v: f32) -> Self {
        v
    }

    unsafe fn vadd(self, other: Self) -> Self {
        self + other
    }
    unsafe fn vsub(self, other: Self) -> Self {
        self - other
    }
    unsafe fn vmul(self, other: Self) -> Self {
        self * other
    }

    unsafe fn load_u8(ptr: *const u8) -> Self {
        Self::from(ptr.read_unaligned())
    }

    unsafe fn write_bgr0(b: Self, g: Self, r: Self, ptr: *mut u32) {
        ptr.write_unaligned(u32::from_ne_bytes([
            saturate_u8(b),
            saturate_u8(g),
            saturate_u8(r),
            0,
        ]))
    }
}

/// Equivalent of a float to i32 conversion in the default rounding mode followed by
/// the i32 -> u16 -> u8 saturating narrows done by the SIMD implementations
///
/// The two agree for every value below 32768, which covers every RGB value the
/// color transform can produce from u8 samples.
#[inline(always)]
pub(crate) fn saturate_u8(v: f32) -> u8 {
    v.round_ties_even().clamp(0.0, 255.0) as u8
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturate() {
        assert_eq!(saturate_u8(-300.7), 0);
        assert_eq!(saturate_u8(-0.5), 0);
        assert_eq!(saturate_u8(0.5), 0);
        assert_eq!(saturate_u8(1.5), 2);
        assert_eq!(saturate_u8(2.5), 2);
        assert_eq!(saturate_u8(254.5), 254);
        assert_eq!(saturate_u8(255.49), 255);
        assert_eq!(saturate_u8(298.14), 255);
        assert_eq!(saturate_u8(70000.0), 255);
    }

    #[test]
    fn scalar_write_byte_order() {
        let mut px = 0u32;

        unsafe { f32::write_bgr0(10.0, 20.0, 30.0, &mut px) };

        assert_eq!(px.to_ne_bytes(), [10, 20, 30, 0]);
    }

    #[test]
    fn scalar_load() {
        let v = unsafe { f32::load_u8([7u8].as_ptr()) };

        assert_eq!(v, 7.0);
    }
}
