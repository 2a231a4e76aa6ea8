use super::Vector;
use crate::arch::*;

unsafe impl Vector for __m256 {
    const LEN: usize = 8;

    #[inline(always)]
    unsafe fn splat(v: f32) -> Self {
        _mm256_set1_ps(v)
    }

    #[inline(always)]
    unsafe fn vadd(self, other: Self) -> Self {
        _mm256_add_ps(self, other)
    }

    #[inline(always)]
    unsafe fn vsub(self, other: Self) -> Self {
        _mm256_sub_ps(self, other)
    }

    #[inline(always)]
    unsafe fn vmul(self, other: Self) -> Self {
        _mm256_mul_ps(self, other)
    }

    #[inline(always)]
    unsafe fn load_u8(ptr: *const u8) -> Self {
        let v = ptr.cast::<i64>().read_unaligned();
        let v = _mm256_cvtepu8_epi32(_mm_set1_epi64x(v));
        _mm256_cvtepi32_ps(v)
    }

    #[inline(always)]
    unsafe fn write_bgr0(b: Self, g: Self, r: Self, ptr: *mut u32) {
        let b = _mm256_cvtps_epi32(b);
        let g = _mm256_cvtps_epi32(g);
        let r = _mm256_cvtps_epi32(r);

        // Packs operate per 128 bit lane, so each lane ends up holding its own 4 pixels as
        // [b0 b1 b2 b3 g0 g1 g2 g3 r0 r1 r2 r3 0 0 0 0]
        let bg = _mm256_packus_epi32(b, g);
        let r0 = _mm256_packus_epi32(r, _mm256_setzero_si256());
        let bgr0 = _mm256_packus_epi16(bg, r0);

        #[rustfmt::skip]
        let idx = _mm256_setr_epi8(
            0, 4, 8, 12,
            1, 5, 9, 13,
            2, 6, 10, 14,
            3, 7, 11, 15,
            0, 4, 8, 12,
            1, 5, 9, 13,
            2, 6, 10, 14,
            3, 7, 11, 15,
        );

        let bgr0 = _mm256_shuffle_epi8(bgr0, idx);

        ptr.cast::<__m256i>().write_unaligned(bgr0)
    }
}
