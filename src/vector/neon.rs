use super::Vector;
use crate::arch::*;
use std::mem::transmute;

unsafe impl Vector for float32x4_t {
    const LEN: usize = 4;

    #[inline(always)]
    unsafe fn splat(v: f32) -> Self {
        vdupq_n_f32(v)
    }

    #[inline(always)]
    unsafe fn vadd(self, other: Self) -> Self {
        vaddq_f32(self, other)
    }
    #[inline(always)]
    unsafe fn vsub(self, other: Self) -> Self {
        vsubq_f32(self, other)
    }
    #[inline(always)]
    unsafe fn vmul(self, other: Self) -> Self {
        vmulq_f32(self, other)
    }

    #[inline(always)]
    unsafe fn load_u8(ptr: *const u8) -> Self {
        let v = ptr.cast::<[u8; 4]>().read_unaligned();
        let v = vmovl_u8(transmute::<[[u8; 4]; 2], uint8x8_t>([v, v]));
        let v = vmovl_u16(vget_low_u16(v));

        vcvtq_f32_u32(v)
    }

    #[inline(always)]
    unsafe fn write_bgr0(b: Self, g: Self, r: Self, ptr: *mut u32) {
        let zero = vdup_n_u8(0);

        let b = float32x4_to_u8x8(b);
        let g = float32x4_to_u8x8(g);
        let r = float32x4_to_u8x8(r);

        // [b0 g0 b1 g1 b2 g2 b3 g3] and [r0 0 r1 0 r2 0 r3 0]
        let bg = vreinterpret_u16_u8(vzip1_u8(b, g));
        let r0 = vreinterpret_u16_u8(vzip1_u8(r, zero));

        let lo = vzip1_u16(bg, r0);
        let hi = vzip2_u16(bg, r0);

        let bgr0 = vreinterpretq_u32_u16(vcombine_u16(lo, hi));

        vst1q_u32(ptr, bgr0)
    }
}

/// Round to nearest (ties to even), saturate to u8 and return it in the lower 4 lanes
#[inline(always)]
unsafe fn float32x4_to_u8x8(v: float32x4_t) -> uint8x8_t {
    let v = vcvtnq_s32_f32(v);
    let v = vqmovun_s32(v);

    vqmovn_u16(vcombine_u16(v, v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::test_util::convert_with;

    #[test]
    fn load() {
        if !is_aarch64_feature_detected!("neon") {
            return;
        }

        unsafe {
            let v = float32x4_t::load_u8([0, 1, 128, 255].as_ptr());

            assert_eq!(transmute::<float32x4_t, [f32; 4]>(v), [0.0, 1.0, 128.0, 255.0]);
        }
    }

    #[test]
    fn write_saturates_and_interleaves() {
        if !is_aarch64_feature_detected!("neon") {
            return;
        }

        unsafe {
            let b = transmute::<[f32; 4], float32x4_t>([-20.0, 0.5, 1.5, 300.0]);
            let g = transmute::<[f32; 4], float32x4_t>([10.0, 254.5, 255.4, -0.4]);
            let r = transmute::<[f32; 4], float32x4_t>([433.0, 2.5, 128.0, 7.0]);

            let mut out = [0u32; 4];
            float32x4_t::write_bgr0(b, g, r, out.as_mut_ptr());

            assert_eq!(
                out.map(u32::to_ne_bytes),
                [[0, 10, 255, 0], [0, 254, 2, 0], [2, 255, 128, 0], [255, 0, 7, 0]]
            );
        }
    }

    #[test]
    fn matches_scalar() {
        if !is_aarch64_feature_detected!("neon") {
            return;
        }

        unsafe {
            assert_eq!(convert_with::<float32x4_t>(1024), convert_with::<f32>(1024));
        }
    }
}
