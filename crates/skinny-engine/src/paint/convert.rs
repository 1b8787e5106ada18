//! Conversions between the color spaces a [`Color`](super::Color) can be
//! specified in. RGB is the hub; hue is in degrees, `-1` when achromatic.

pub(super) fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max > 0.0 { delta / max } else { 0.0 };
    (hue(r, g, b, max, delta), s, max)
}

pub(super) fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    if h < 0.0 || s <= 0.0 {
        return (v, v, v);
    }

    let c = v * s;
    let (r, g, b) = hue_to_rgb(h, c);
    let m = v - c;
    (r + m, g + m, b + m)
}

pub(super) fn rgb_to_hsl(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = 0.5 * (max + min);

    let s = if delta <= 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * l - 1.0).abs())
    };
    (hue(r, g, b, max, delta), s.min(1.0), l)
}

pub(super) fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    if h < 0.0 || s <= 0.0 {
        return (l, l, l);
    }

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let (r, g, b) = hue_to_rgb(h, c);
    let m = l - 0.5 * c;
    (r + m, g + m, b + m)
}

pub(super) fn rgb_to_cmyk(r: f32, g: f32, b: f32) -> (f32, f32, f32, f32) {
    let k = 1.0 - r.max(g).max(b);
    if k >= 1.0 {
        return (0.0, 0.0, 0.0, 1.0);
    }

    let inv = 1.0 / (1.0 - k);
    ((1.0 - r - k) * inv, (1.0 - g - k) * inv, (1.0 - b - k) * inv, k)
}

pub(super) fn cmyk_to_rgb(c: f32, m: f32, y: f32, k: f32) -> (f32, f32, f32) {
    ((1.0 - c) * (1.0 - k), (1.0 - m) * (1.0 - k), (1.0 - y) * (1.0 - k))
}

fn hue(r: f32, g: f32, b: f32, max: f32, delta: f32) -> f32 {
    if delta <= 0.0 {
        return -1.0;
    }

    let h = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    (h * 60.0).rem_euclid(360.0)
}

/// RGB triple of a pure hue with chroma `c`, before adding the lightness offset.
fn hue_to_rgb(h: f32, c: f32) -> (f32, f32, f32) {
    let hp = h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());

    match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close3(a: (f32, f32, f32), b: (f32, f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-5 && (a.1 - b.1).abs() < 1e-5 && (a.2 - b.2).abs() < 1e-5
    }

    #[test]
    fn grey_is_achromatic() {
        let (h, s, v) = rgb_to_hsv(0.5, 0.5, 0.5);
        assert_eq!(h, -1.0);
        assert_eq!(s, 0.0);
        assert_eq!(v, 0.5);
    }

    #[test]
    fn primary_hues() {
        assert_eq!(rgb_to_hsv(0.0, 1.0, 0.0).0, 120.0);
        assert_eq!(rgb_to_hsv(0.0, 0.0, 1.0).0, 240.0);
    }

    #[test]
    fn hsl_roundtrip() {
        let rgb = (0.8, 0.3, 0.1);
        let (h, s, l) = rgb_to_hsl(rgb.0, rgb.1, rgb.2);
        assert!(close3(hsl_to_rgb(h, s, l), rgb));
    }

    #[test]
    fn cmyk_black_and_roundtrip() {
        assert_eq!(rgb_to_cmyk(0.0, 0.0, 0.0), (0.0, 0.0, 0.0, 1.0));
        let (c, m, y, k) = rgb_to_cmyk(0.2, 0.6, 0.4);
        assert!(close3(cmyk_to_rgb(c, m, y, k), (0.2, 0.6, 0.4)));
    }
}
