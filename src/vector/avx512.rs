use super::Vector;
use crate::arch::*;

unsafe impl Vector for __m512 {
    const LEN: usize = 16;

    #[inline(always)]
    unsafe fn splat(v: f32) -> Self {
        _mm512_set1_ps(v)
    }

    #[inline(always)]
    unsafe fn vadd(self, other: Self) -> Self {
        _mm512_add_ps(self, other)
    }

    #[inline(always)]
    unsafe fn vsub(self, other: Self) -> Self {
        _mm512_sub_ps(self, other)
    }

    #[inline(always)]
    unsafe fn vmul(self, other: Self) -> Self {
        _mm512_mul_ps(self, other)
    }

    #[inline(always)]
    unsafe fn load_u8(ptr: *const u8) -> Self {
        let v = ptr.cast::<__m128i>().read_unaligned();
        let v = _mm512_cvtepu8_epi32(v);
        _mm512_cvtepi32_ps(v)
    }

    #[inline(always)]
    unsafe fn write_bgr0(b: Self, g: Self, r: Self, ptr: *mut u32) {
        let b = _mm512_cvtps_epi32(b);
        let g = _mm512_cvtps_epi32(g);
        let r = _mm512_cvtps_epi32(r);

        // Same per 128 bit lane layout as the avx2 implementation, just 4 lanes wide
        let bg = _mm512_packus_epi32(b, g);
        let r0 = _mm512_packus_epi32(r, _mm512_setzero_si512());
        let bgr0 = _mm512_packus_epi16(bg, r0);

        #[rustfmt::skip]
        let idx = _mm512_broadcast_i32x4(_mm_setr_epi8(
            0, 4, 8, 12,
            1, 5, 9, 13,
            2, 6, 10, 14,
            3, 7, 11, 15,
        ));

        let bgr0 = _mm512_shuffle_epi8(bgr0, idx);

        ptr.cast::<__m512i>().write_unaligned(bgr0)
    }
}
