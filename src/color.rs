use crate::vector::Vector;

/// Chroma samples are stored with this bias added
pub(crate) const CHROMA_BIAS: f32 = 128.0;

/// Matrix used to transform YCbCr into RGB
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ColorMatrix {
    /// Inverse of the ITU-R BT.601 matrix as used by JFIF
    #[default]
    BT601,

    /// Empirically tuned coefficients found in some legacy decoders
    ///
    /// Differs from [`ColorMatrix::BT601`] in the green and blue coefficients
    /// (0.381834, 0.71414 and 1.7772), so green is up to ~5 and blue up to ~1 code
    /// values off for strongly saturated chroma. Only use it when output must match
    /// those decoders bit for bit.
    Tuned,
}

/// Coefficients applied to the bias-free chroma values
///
/// ```text
/// R = Y + cr_to_r * Cr
/// G = Y - cb_to_g * Cb - cr_to_g * Cr
/// B = Y + cb_to_b * Cb
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub cr_to_r: f32,
    pub cb_to_g: f32,
    pub cr_to_g: f32,
    pub cb_to_b: f32,
}

impl ColorMatrix {
    pub fn coefficients(&self) -> Coefficients {
        match self {
            ColorMatrix::BT601 => Coefficients {
                cr_to_r: 1.402,
                cb_to_g: 0.344136,
                cr_to_g: 0.714136,
                cb_to_b: 1.772,
            },
            ColorMatrix::Tuned => Coefficients {
                cr_to_r: 1.402,
                cb_to_g: 0.381834,
                cr_to_g: 0.71414,
                cb_to_b: 1.7772,
            },
        }
    }
}

/// Transform a lane group of YCbCr samples (0..=255, chroma biased) to unclamped RGB
///
/// Only separate multiplies and adds are used, so every [`Vector`] implementation
/// produces the exact same floats.
#[inline(always)]
pub(crate) unsafe fn ycbcr_to_rgb<V: Vector>(c: &Coefficients, y: V, cb: V, cr: V) -> (V, V, V) {
    let cb = cb.vsubf(CHROMA_BIAS);
    let cr = cr.vsubf(CHROMA_BIAS);

    let r = y.vadd(cr.vmulf(c.cr_to_r));
    let g = y.vsub(cb.vmulf(c.cb_to_g)).vsub(cr.vmulf(c.cr_to_g));
    let b = y.vadd(cb.vmulf(c.cb_to_b));

    (r, g, b)
}
