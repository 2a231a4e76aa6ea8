use super::Vector;
use crate::arch::*;

unsafe impl Vector for __m128 {
    const LEN: usize = 4;

    #[inline(always)]
    unsafe fn splat(v: f32) -> Self {
        _mm_set1_ps(v)
    }

    #[inline(always)]
    unsafe fn vadd(self, other: Self) -> Self {
        _mm_add_ps(self, other)
    }

    #[inline(always)]
    unsafe fn vsub(self, other: Self) -> Self {
        _mm_sub_ps(self, other)
    }

    #[inline(always)]
    unsafe fn vmul(self, other: Self) -> Self {
        _mm_mul_ps(self, other)
    }

    #[inline(always)]
    unsafe fn load_u8(ptr: *const u8) -> Self {
        let v = ptr.cast::<i32>().read_unaligned();
        let v = _mm_cvtepu8_epi32(_mm_cvtsi32_si128(v));
        _mm_cvtepi32_ps(v)
    }

    #[inline(always)]
    unsafe fn write_bgr0(b: Self, g: Self, r: Self, ptr: *mut u32) {
        let zero = _mm_setzero_si128();

        let b = f32x4_to_u8x4(b, zero);
        let g = f32x4_to_u8x4(g, zero);
        let r = f32x4_to_u8x4(r, zero);

        // [b0 g0 b1 g1 ..] and [r0 0 r1 0 ..] interleaved as 16 bit pairs
        let bg = _mm_unpacklo_epi8(b, g);
        let r0 = _mm_unpacklo_epi8(r, zero);
        let bgr0 = _mm_unpacklo_epi16(bg, r0);

        ptr.cast::<__m128i>().write_unaligned(bgr0)
    }
}

/// Convert to i32 and saturate to u8 in the lowest 4 bytes
#[inline(always)]
unsafe fn f32x4_to_u8x4(v: __m128, zero: __m128i) -> __m128i {
    let v = _mm_cvtps_epi32(v);
    let v = _mm_packus_epi32(v, zero);
    _mm_packus_epi16(v, zero)
}
