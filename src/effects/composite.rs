use crate::foundation::error::{MockupError, MockupResult};
use crate::foundation::math::mul_div255_u8;

pub(crate) type PremulRgba8 = [u8; 4];

pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Overlay of `src` onto `dst`: the backdrop picks multiply or screen per channel, then the
/// result is composited source-over.
pub(crate) fn overlay(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let sa = f32::from(src[3]) / 255.0 * opacity;
    let da = f32::from(dst[3]) / 255.0;
    let mut out = [0u8; 4];
    for i in 0..3 {
        let sc = f32::from(src[i]) / 255.0 * opacity;
        let dc = f32::from(dst[i]) / 255.0;
        let cs = if sa > 0.0 { (sc / sa).min(1.0) } else { 0.0 };
        let cb = if da > 0.0 { (dc / da).min(1.0) } else { 0.0 };
        let mixed = overlay_channel(cb, cs);
        let v = (1.0 - da) * sc + (1.0 - sa) * dc + sa * da * mixed;
        out[i] = to_u8(v);
    }
    out[3] = to_u8(sa + da - sa * da);
    out
}

fn overlay_channel(cb: f32, cs: f32) -> f32 {
    if cb <= 0.5 {
        cs * 2.0 * cb
    } else {
        let b = 2.0 * cb - 1.0;
        cs + b - cs * b
    }
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> MockupResult<()> {
    blend_in_place(dst, src, opacity, over, "over_in_place")
}

pub(crate) fn overlay_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> MockupResult<()> {
    blend_in_place(dst, src, opacity, overlay, "overlay_in_place")
}

fn blend_in_place(
    dst: &mut [u8],
    src: &[u8],
    opacity: f32,
    op: fn(PremulRgba8, PremulRgba8, f32) -> PremulRgba8,
    name: &str,
) -> MockupResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(MockupError::input(format!(
            "{name} expects equal-length rgba8 buffers"
        )));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = op([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
