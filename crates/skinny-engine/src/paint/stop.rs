use crate::hash::HashFold;

use super::color::lerp;
use super::Color;

/// Position marking a stop that still waits for [`normalized_stops`].
pub const UNSET_POSITION: f32 = -1.0;

/// Smallest gap [`normalized_stops`] puts between two stops that were given
/// the same position (a hard color edge).
const HARD_EDGE_GAP: f32 = 1e-5;

/// A single gradient stop.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GradientStop {
    pub position: f32,
    pub color: Color,
}

impl GradientStop {
    #[inline]
    pub const fn new(position: f32, color: Color) -> Self {
        Self { position, color }
    }

    /// A stop whose position is filled in by normalization.
    #[inline]
    pub const fn unset(color: Color) -> Self {
        Self { position: UNSET_POSITION, color }
    }

    #[inline]
    pub fn is_unset(self) -> bool {
        self.position == UNSET_POSITION
    }

    /// Stop positioned `ratio` of the way from `self` to `to`, with the
    /// color interpolated in the same proportion.
    pub fn interpolated(self, to: GradientStop, ratio: f32) -> GradientStop {
        GradientStop::new(
            lerp(self.position, to.position, ratio),
            Color::interpolated(self.color, to.color, ratio),
        )
    }
}

// ── predicates ────────────────────────────────────────────────────────────

/// A stop list is renderable when it has at least two stops, starts at 0.0,
/// ends at 1.0, increases strictly and only holds valid colors.
pub fn is_gradient_valid(stops: &[GradientStop]) -> bool {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return false;
    };
    if stops.len() < 2 || first.position != 0.0 || last.position != 1.0 {
        return false;
    }

    stops.windows(2).all(|w| w[0].position < w[1].position)
        && stops.iter().all(|s| s.color.is_valid())
}

/// True when every stop has the same color (an empty list is monochrome).
pub fn is_monochrome(stops: &[GradientStop]) -> bool {
    match stops.first() {
        None => true,
        Some(first) => stops.iter().all(|s| s.color == first.color),
    }
}

/// True when at least one stop has a visible color.
pub fn is_visible(stops: &[GradientStop]) -> bool {
    stops.iter().any(|s| s.color.is_visible())
}

// ── lookup ────────────────────────────────────────────────────────────────

/// Color at `pos`: clamped to the end colors outside the stop range,
/// linearly interpolated between the bracketing stops inside it.
///
/// Returns `Color::Invalid` unless [`is_gradient_valid`] holds.
pub fn color_at(stops: &[GradientStop], pos: f32) -> Color {
    if !is_gradient_valid(stops) {
        return Color::Invalid;
    }
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Color::Invalid;
    };

    if !(pos > first.position) {
        return first.color;
    }
    if pos >= last.position {
        return last.color;
    }

    let upper = stops.partition_point(|s| s.position <= pos);
    let s1 = stops[upper - 1];
    let s2 = stops[upper];
    segment_color(s1, s2, pos)
}

/// Color between two stops; `s1.position <= pos <= s2.position` is expected.
pub(crate) fn segment_color(s1: GradientStop, s2: GradientStop, pos: f32) -> Color {
    let range = s2.position - s1.position;
    if range <= 0.0 {
        return s2.color;
    }
    Color::interpolated(s1.color, s2.color, (pos - s1.position) / range)
}

// ── structural operations ─────────────────────────────────────────────────

/// Mirrors positions (`1 - p`) and reverses the order.
pub fn reverted_stops(stops: &[GradientStop]) -> Vec<GradientStop> {
    stops
        .iter()
        .rev()
        .map(|s| GradientStop::new(1.0 - s.position, s.color))
        .collect()
}

/// The `[from, to]` part of `stops`, stretched to `[0, 1]`.
///
/// The boundary colors are sampled with [`color_at`]. `from == to` yields a
/// monochrome pair, an empty input or `from > to` an empty list.
pub fn extracted_stops(stops: &[GradientStop], from: f32, to: f32) -> Vec<GradientStop> {
    if stops.is_empty() || !(from <= to) {
        return Vec::new();
    }

    let from = from.clamp(0.0, 1.0);
    let to = to.clamp(0.0, 1.0);

    if from == to {
        let c = color_at(stops, from);
        return vec![GradientStop::new(0.0, c), GradientStop::new(1.0, c)];
    }

    let range = to - from;
    let mut out = Vec::with_capacity(stops.len() + 2);
    out.push(GradientStop::new(0.0, color_at(stops, from)));
    out.extend(
        stops
            .iter()
            .filter(|s| s.position > from && s.position < to)
            .map(|s| GradientStop::new((s.position - from) / range, s.color)),
    );
    out.push(GradientStop::new(1.0, color_at(stops, to)));
    out
}

/// Replaces the `[from, to]` part of `stops` by `replacement`, which gets
/// squeezed from `[0, 1]` into `[from, to]`.
pub fn replaced_stops(
    stops: &[GradientStop],
    replacement: &[GradientStop],
    from: f32,
    to: f32,
) -> Vec<GradientStop> {
    if replacement.is_empty() || !(from <= to) {
        return stops.to_vec();
    }

    let from = from.clamp(0.0, 1.0);
    let to = to.clamp(0.0, 1.0);
    let range = to - from;

    let mut out: Vec<GradientStop> = stops.iter().filter(|s| s.position < from).copied().collect();
    out.extend(
        replacement
            .iter()
            .map(|s| GradientStop::new(from + s.position.clamp(0.0, 1.0) * range, s.color)),
    );
    out.extend(stops.iter().filter(|s| s.position > to).copied());

    // Collapsed ranges produce equal neighbours; keep the list well-formed.
    normalized_stops(&out)
}

/// Merges two stop lists for a cross-fade.
///
/// The result holds the union of both position sets; at every position the
/// color is `interpolated(from(pos), to(pos), ratio)` where a side lacking
/// that position samples its own stops. Ratios at or beyond the ends return
/// the corresponding input unchanged.
pub fn interpolated_stops(
    from: &[GradientStop],
    to: &[GradientStop],
    ratio: f32,
) -> Vec<GradientStop> {
    if from.is_empty() && to.is_empty() {
        return Vec::new();
    }
    if ratio <= 0.0 || from == to {
        return from.to_vec();
    }
    if ratio >= 1.0 {
        return to.to_vec();
    }

    // Fading from/to nothing: the other side goes through transparency.
    if from.is_empty() {
        return recolored(to, |c| Color::interpolated(Color::Invalid, c, ratio));
    }
    if to.is_empty() {
        return recolored(from, |c| Color::interpolated(c, Color::Invalid, ratio));
    }

    if is_monochrome(from) && is_monochrome(to) {
        let c = Color::interpolated(from[0].color, to[0].color, ratio);
        return vec![GradientStop::new(0.0, c), GradientStop::new(1.0, c)];
    }
    if is_monochrome(from) {
        let c = from[0].color;
        return recolored(to, |t| Color::interpolated(c, t, ratio));
    }
    if is_monochrome(to) {
        let c = to[0].color;
        return recolored(from, |f| Color::interpolated(f, c, ratio));
    }

    let mut out = Vec::with_capacity(from.len() + to.len());
    let (mut i, mut j) = (0, 0);

    while i < from.len() || j < to.len() {
        let pi = from.get(i).map_or(f32::INFINITY, |s| s.position);
        let pj = to.get(j).map_or(f32::INFINITY, |s| s.position);

        let (pos, c1, c2) = if pi == pj {
            i += 1;
            j += 1;
            (pi, from[i - 1].color, to[j - 1].color)
        } else if pi < pj {
            i += 1;
            (pi, from[i - 1].color, color_at(to, pi))
        } else {
            j += 1;
            (pj, color_at(from, pj), to[j - 1].color)
        };

        out.push(GradientStop::new(pos, Color::interpolated(c1, c2, ratio)));
    }

    out
}

/// Turns an incompletely specified list into a valid one where possible.
///
/// - unset positions are spread evenly between their set neighbours
/// - positions are clamped to `[0, 1]` and made strictly increasing; equal
///   positions become a hard edge separated by a minimal gap
/// - missing `0.0`/`1.0` stops are synthesized from the nearest color
/// - a single stop becomes a monochrome pair; an empty list stays empty
pub fn normalized_stops(stops: &[GradientStop]) -> Vec<GradientStop> {
    if stops.is_empty() || is_gradient_valid(stops) {
        return stops.to_vec();
    }
    if stops.len() == 1 {
        let c = stops[0].color;
        return vec![GradientStop::new(0.0, c), GradientStop::new(1.0, c)];
    }

    let mut positions: Vec<f32> = stops
        .iter()
        .map(|s| if s.is_unset() || !s.position.is_finite() { UNSET_POSITION } else { s.position })
        .collect();

    let n = positions.len();
    if positions[0] == UNSET_POSITION {
        positions[0] = 0.0;
    }
    if positions[n - 1] == UNSET_POSITION {
        positions[n - 1] = 1.0;
    }

    let mut i = 1;
    while i < n {
        if positions[i] != UNSET_POSITION {
            i += 1;
            continue;
        }
        let lo = i - 1;
        let hi = (i..n).find(|&k| positions[k] != UNSET_POSITION).unwrap_or(n - 1);
        let (p0, p1) = (positions[lo], positions[hi].max(positions[lo]));
        let steps = (hi - lo) as f32;
        for k in i..hi {
            positions[k] = p0 + (p1 - p0) * (k - lo) as f32 / steps;
        }
        i = hi + 1;
    }

    let mut out: Vec<GradientStop> = Vec::with_capacity(n + 2);
    for (stop, pos) in stops.iter().zip(positions) {
        let mut pos = pos.clamp(0.0, 1.0);
        if let Some(prev) = out.last() {
            if pos <= prev.position {
                pos = prev.position + HARD_EDGE_GAP;
            }
        }
        if pos > 1.0 {
            // Everything squeezed against the end: the latest color wins.
            if let Some(last) = out.last_mut() {
                if last.position >= 1.0 {
                    last.color = stop.color;
                    continue;
                }
            }
            pos = 1.0;
        }
        out.push(GradientStop::new(pos, stop.color));
    }

    if let Some(first) = out.first().copied() {
        if first.position > 0.0 {
            out.insert(0, GradientStop::new(0.0, first.color));
        }
    }
    if let Some(last) = out.last().copied() {
        if last.position < 1.0 {
            out.push(GradientStop::new(1.0, last.color));
        }
    }

    out
}

/// Evenly spaced stops for a list of colors.
///
/// With `discrete`, every color fills a band of equal width with hard edges
/// between the bands.
pub fn build_stops(colors: &[Color], discrete: bool) -> Vec<GradientStop> {
    match colors.len() {
        0 => return Vec::new(),
        1 => return normalized_stops(&[GradientStop::new(0.0, colors[0])]),
        _ => {}
    }

    let stops: Vec<GradientStop> = if discrete {
        let step = 1.0 / colors.len() as f32;
        colors
            .iter()
            .enumerate()
            .flat_map(|(i, &c)| {
                [
                    GradientStop::new(i as f32 * step, c),
                    GradientStop::new((i + 1) as f32 * step, c),
                ]
            })
            .collect()
    } else {
        let step = 1.0 / (colors.len() - 1) as f32;
        colors
            .iter()
            .enumerate()
            .map(|(i, &c)| GradientStop::new(i as f32 * step, c))
            .collect()
    };

    normalized_stops(&stops)
}

/// Generic `(position, color)` pair representation.
pub fn to_pairs(stops: &[GradientStop]) -> Vec<(f32, Color)> {
    stops.iter().map(|s| (s.position, s.color)).collect()
}

/// Stops from `(position, color)` pairs, normalized.
pub fn from_pairs(pairs: &[(f32, Color)]) -> Vec<GradientStop> {
    let stops: Vec<GradientStop> = pairs.iter().map(|&(p, c)| GradientStop::new(p, c)).collect();
    normalized_stops(&stops)
}

/// Seeded hash over positions and colors.
pub fn stops_hash(stops: &[GradientStop], seed: u64) -> u64 {
    let mut h = HashFold::new(seed);
    fold_stops(stops, &mut h);
    h.finish()
}

pub(crate) fn fold_stops(stops: &[GradientStop], h: &mut HashFold) {
    h.u64(stops.len() as u64);
    for s in stops {
        h.f32(s.position);
        s.color.fold_hash(h);
    }
}

fn recolored(stops: &[GradientStop], f: impl Fn(Color) -> Color) -> Vec<GradientStop> {
    stops.iter().map(|s| GradientStop::new(s.position, f(s.color))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops(list: &[(f32, Color)]) -> Vec<GradientStop> {
        list.iter().map(|&(p, c)| GradientStop::new(p, c)).collect()
    }

    fn red_blue() -> Vec<GradientStop> {
        stops(&[(0.0, Color::RED), (1.0, Color::BLUE)])
    }

    fn close_stops(a: &[GradientStop], b: &[GradientStop]) -> bool {
        a.len() == b.len()
            && a.iter().zip(b).all(|(x, y)| (x.position - y.position).abs() < 1e-6 && x.color == y.color)
    }

    // ── validity ──────────────────────────────────────────────────────────

    #[test]
    fn valid_requires_bounds_and_order() {
        assert!(is_gradient_valid(&red_blue()));
        assert!(!is_gradient_valid(&[]));
        assert!(!is_gradient_valid(&stops(&[(0.0, Color::RED)])));
        assert!(!is_gradient_valid(&stops(&[(0.1, Color::RED), (1.0, Color::BLUE)])));
        assert!(!is_gradient_valid(&stops(&[(0.0, Color::RED), (0.9, Color::BLUE)])));
        assert!(!is_gradient_valid(&stops(&[
            (0.0, Color::RED),
            (0.5, Color::GREEN),
            (0.5, Color::GREEN),
            (1.0, Color::BLUE)
        ])));
        assert!(!is_gradient_valid(&stops(&[(0.0, Color::Invalid), (1.0, Color::BLUE)])));
    }

    #[test]
    fn monochrome_detection() {
        assert!(is_monochrome(&stops(&[(0.0, Color::RED), (1.0, Color::RED)])));
        assert!(!is_monochrome(&red_blue()));
    }

    // ── color_at ──────────────────────────────────────────────────────────

    #[test]
    fn color_at_clamps_and_interpolates() {
        let s = red_blue();
        assert_eq!(color_at(&s, -1.0), Color::RED);
        assert_eq!(color_at(&s, 0.0), Color::RED);
        assert_eq!(color_at(&s, 1.0), Color::BLUE);
        assert_eq!(color_at(&s, 2.0), Color::BLUE);
        assert_eq!(color_at(&s, 0.5), Color::rgba(0.5, 0.0, 0.5, 1.0));
        assert_eq!(color_at(&[], 0.5), Color::Invalid);
    }

    #[test]
    fn color_at_picks_bracketing_segment() {
        let s = stops(&[(0.0, Color::RED), (0.5, Color::GREEN), (1.0, Color::BLUE)]);
        assert_eq!(color_at(&s, 0.5), Color::GREEN);
        assert_eq!(color_at(&s, 0.75), Color::rgba(0.0, 0.5, 0.5, 1.0));
    }

    #[test]
    fn color_at_rejects_unsorted_stops() {
        let s = stops(&[(0.0, Color::RED), (0.8, Color::GREEN), (0.3, Color::BLUE), (1.0, Color::WHITE)]);
        assert_eq!(color_at(&s, 0.5), Color::Invalid);
        assert_eq!(color_at(&s, 0.0), Color::Invalid);
        assert_eq!(color_at(&[GradientStop::new(0.0, Color::RED)], 0.5), Color::Invalid);
    }

    // ── revert / extract / replace ────────────────────────────────────────

    #[test]
    fn reverted_mirrors_positions() {
        let s = stops(&[(0.0, Color::RED), (0.25, Color::GREEN), (1.0, Color::BLUE)]);
        let r = reverted_stops(&s);
        assert_eq!(r, stops(&[(0.0, Color::BLUE), (0.75, Color::GREEN), (1.0, Color::RED)]));
    }

    #[test]
    fn double_revert_is_identity() {
        let s = stops(&[(0.0, Color::RED), (0.1, Color::GREEN), (0.7, Color::WHITE), (1.0, Color::BLUE)]);
        assert!(close_stops(&reverted_stops(&reverted_stops(&s)), &s));
    }

    #[test]
    fn extract_full_range_is_identity() {
        let s = stops(&[(0.0, Color::RED), (0.3, Color::GREEN), (1.0, Color::BLUE)]);
        assert_eq!(extracted_stops(&s, 0.0, 1.0), s);
    }

    #[test]
    fn extract_sub_range_samples_boundaries() {
        let s = stops(&[(0.0, Color::RED), (0.5, Color::GREEN), (1.0, Color::BLUE)]);
        let e = extracted_stops(&s, 0.25, 0.75);
        assert_eq!(e.len(), 3);
        assert_eq!(e[0], GradientStop::new(0.0, color_at(&s, 0.25)));
        assert_eq!(e[1], GradientStop::new(0.5, Color::GREEN));
        assert_eq!(e[2], GradientStop::new(1.0, color_at(&s, 0.75)));
        assert!(is_gradient_valid(&e));
    }

    #[test]
    fn extract_degenerate_ranges() {
        let s = red_blue();
        assert!(extracted_stops(&s, 0.8, 0.2).is_empty());
        let point = extracted_stops(&s, 0.5, 0.5);
        assert!(is_monochrome(&point));
        assert_eq!(point.len(), 2);
    }

    #[test]
    fn replace_splices_range() {
        let base = stops(&[(0.0, Color::RED), (0.5, Color::GREEN), (1.0, Color::BLUE)]);
        let repl = stops(&[(0.0, Color::WHITE), (1.0, Color::BLACK)]);
        let r = replaced_stops(&base, &repl, 0.25, 0.75);
        assert_eq!(
            r,
            stops(&[
                (0.0, Color::RED),
                (0.25, Color::WHITE),
                (0.75, Color::BLACK),
                (1.0, Color::BLUE)
            ])
        );
    }

    // ── interpolation ─────────────────────────────────────────────────────

    #[test]
    fn interpolated_with_self_is_identity() {
        let a = stops(&[(0.0, Color::RED), (0.4, Color::GREEN), (1.0, Color::BLUE)]);
        for ratio in [0.0, 0.3, 0.5, 1.0] {
            assert_eq!(interpolated_stops(&a, &a, ratio), a);
        }
    }

    #[test]
    fn interpolated_endpoints() {
        let a = stops(&[(0.0, Color::RED), (0.4, Color::GREEN), (1.0, Color::BLUE)]);
        let b = stops(&[(0.0, Color::WHITE), (0.7, Color::BLACK), (1.0, Color::YELLOW)]);
        assert_eq!(interpolated_stops(&a, &b, 0.0), a);
        assert_eq!(interpolated_stops(&a, &b, 1.0), b);
    }

    #[test]
    fn interpolated_merges_positions() {
        let a = stops(&[(0.0, Color::RED), (0.4, Color::GREEN), (1.0, Color::BLUE)]);
        let b = stops(&[(0.0, Color::WHITE), (0.7, Color::BLACK), (1.0, Color::YELLOW)]);
        let m = interpolated_stops(&a, &b, 0.5);
        let positions: Vec<f32> = m.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 0.4, 0.7, 1.0]);
        assert_eq!(
            m[1].color,
            Color::interpolated(Color::GREEN, color_at(&b, 0.4), 0.5)
        );
        assert_eq!(
            m[2].color,
            Color::interpolated(color_at(&a, 0.7), Color::BLACK, 0.5)
        );
    }

    #[test]
    fn interpolated_monochrome_pair() {
        let a = stops(&[(0.0, Color::RED), (1.0, Color::RED)]);
        let b = stops(&[(0.0, Color::BLUE), (1.0, Color::BLUE)]);
        let m = interpolated_stops(&a, &b, 0.5);
        let c = Color::rgba(0.5, 0.0, 0.5, 1.0);
        assert_eq!(m, stops(&[(0.0, c), (1.0, c)]));
    }

    #[test]
    fn interpolated_from_empty_fades_in() {
        let b = red_blue();
        let m = interpolated_stops(&[], &b, 0.25);
        assert_eq!(m.len(), 2);
        assert_eq!(m[0].color.alpha(), 0.25);
        assert_eq!(m[1].color, Color::BLUE.with_alpha(0.25));
    }

    // ── normalization / building ──────────────────────────────────────────

    #[test]
    fn normalize_fills_unset_positions() {
        let s = [
            GradientStop::unset(Color::RED),
            GradientStop::unset(Color::GREEN),
            GradientStop::unset(Color::BLUE),
        ];
        let n = normalized_stops(&s);
        assert_eq!(n, stops(&[(0.0, Color::RED), (0.5, Color::GREEN), (1.0, Color::BLUE)]));
    }

    #[test]
    fn normalize_adds_missing_bounds() {
        let n = normalized_stops(&stops(&[(0.2, Color::RED), (0.6, Color::BLUE)]));
        assert!(is_gradient_valid(&n));
        assert_eq!(n.first().map(|s| s.color), Some(Color::RED));
        assert_eq!(n.len(), 4);
    }

    #[test]
    fn normalize_separates_hard_edges() {
        let n = normalized_stops(&stops(&[
            (0.0, Color::RED),
            (0.5, Color::RED),
            (0.5, Color::BLUE),
            (1.0, Color::BLUE),
        ]));
        assert!(is_gradient_valid(&n));
        assert_eq!(n.len(), 4);
        assert!(n[2].position > 0.5 && n[2].position < 0.5001);
    }

    #[test]
    fn normalize_single_stop_is_monochrome() {
        let n = normalized_stops(&[GradientStop::new(0.3, Color::GREEN)]);
        assert_eq!(n, stops(&[(0.0, Color::GREEN), (1.0, Color::GREEN)]));
    }

    #[test]
    fn build_even_and_discrete() {
        let even = build_stops(&[Color::RED, Color::GREEN, Color::BLUE], false);
        assert_eq!(even, stops(&[(0.0, Color::RED), (0.5, Color::GREEN), (1.0, Color::BLUE)]));

        let bands = build_stops(&[Color::RED, Color::BLUE], true);
        assert!(is_gradient_valid(&bands));
        assert_eq!(bands.len(), 4);
        assert_eq!(color_at(&bands, 0.25), Color::RED);
        assert_eq!(color_at(&bands, 0.75), Color::BLUE);
    }

    #[test]
    fn pairs_roundtrip() {
        let s = stops(&[(0.0, Color::RED), (0.5, Color::GREEN), (1.0, Color::BLUE)]);
        assert_eq!(from_pairs(&to_pairs(&s)), s);
    }

    // ── hashing ───────────────────────────────────────────────────────────

    #[test]
    fn hash_tracks_content() {
        let a = red_blue();
        let mut b = red_blue();
        assert_eq!(stops_hash(&a, 1), stops_hash(&b, 1));
        b[1].color = Color::GREEN;
        assert_ne!(stops_hash(&a, 1), stops_hash(&b, 1));
    }
}
