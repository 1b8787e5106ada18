/// Steps `(cos, sin)` around an arc in equal increments without calling
/// the trigonometric functions per step.
///
/// Every step applies the angle-addition identities to the previous pair.
/// The drift this accumulates stays far below a pixel for the step counts
/// the renderers use (at most 160).
///
/// Not inverted, the sequence runs from angle `0` to `angle`; inverted, it
/// runs from `angle` back to `0`. Both yield `step_count + 1` pairs.
#[derive(Debug, Clone)]
pub struct ArcIterator {
    cos: f64,
    sin: f64,
    cos_step: f64,
    sin_step: f64,
    end: (f64, f64),
    step: usize,
    step_count: usize,
}

impl ArcIterator {
    pub fn new(angle: f64, step_count: usize, inverted: bool) -> Self {
        // Zero steps would divide by zero; a single step covers the angle.
        let step_count = step_count.max(1);
        let delta = angle / step_count as f64;

        let (start, end) = if inverted {
            ((angle.cos(), angle.sin()), (1.0, 0.0))
        } else {
            ((1.0, 0.0), (angle.cos(), angle.sin()))
        };
        let sin_step = if inverted { -delta.sin() } else { delta.sin() };

        Self {
            cos: start.0,
            sin: start.1,
            cos_step: delta.cos(),
            sin_step,
            end,
            step: 0,
            step_count,
        }
    }

    /// Quarter circle, the shape of a rounded corner.
    pub fn quarter(step_count: usize, inverted: bool) -> Self {
        Self::new(std::f64::consts::FRAC_PI_2, step_count, inverted)
    }

    #[inline]
    pub fn cos(&self) -> f64 {
        self.cos
    }

    #[inline]
    pub fn sin(&self) -> f64 {
        self.sin
    }

    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    #[inline]
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Fraction of the arc covered so far, `0.0..=1.0`.
    #[inline]
    pub fn progress(&self) -> f64 {
        self.step as f64 / self.step_count as f64
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.step > self.step_count
    }

    pub fn increment(&mut self) {
        self.step += 1;

        if self.step == self.step_count {
            // Land exactly on the end angle.
            (self.cos, self.sin) = self.end;
            return;
        }

        let cos = self.cos * self.cos_step - self.sin * self.sin_step;
        self.sin = self.sin * self.cos_step + self.cos * self.sin_step;
        self.cos = cos;
    }

    /// Number of segments for a quarter circle of `radius`: roughly one per
    /// 3 pixels of arc length, at least 3 and at most 18.
    pub fn segment_hint(radius: f64) -> usize {
        let arc_length = radius * std::f64::consts::FRAC_PI_2;
        ((arc_length / 3.0).ceil() as usize).clamp(3, 18)
    }
}

impl Iterator for ArcIterator {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_done() {
            return None;
        }
        let item = (self.cos, self.sin);
        self.increment();
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn full_turn_closes() {
        for n in 3..=160 {
            let mut it = ArcIterator::new(TAU, n, false);
            for _ in 0..n {
                it.increment();
            }
            assert!((it.cos() - 1.0).abs() < 1e-6, "n = {n}");
            assert!(it.sin().abs() < 1e-6, "n = {n}");
        }
    }

    #[test]
    fn yields_step_count_plus_one_pairs() {
        assert_eq!(ArcIterator::quarter(5, false).count(), 6);
        assert_eq!(ArcIterator::quarter(5, true).count(), 6);
    }

    #[test]
    fn quarter_endpoints() {
        let pairs: Vec<_> = ArcIterator::quarter(4, false).collect();
        assert_eq!(pairs[0], (1.0, 0.0));
        let (c, s) = pairs[4];
        assert!(c.abs() < 1e-12 && (s - 1.0).abs() < 1e-12);
    }

    #[test]
    fn inverted_runs_backwards() {
        let pairs: Vec<_> = ArcIterator::quarter(4, true).collect();
        let (c, s) = pairs[0];
        assert!(c.abs() < 1e-12 && (s - 1.0).abs() < 1e-12);
        let (c, s) = pairs[4];
        assert!((c - 1.0).abs() < 1e-12 && s.abs() < 1e-12);

        let (c, s) = pairs[2];
        assert!((c - (FRAC_PI_2 / 2.0).cos()).abs() < 1e-9);
        assert!((s - (FRAC_PI_2 / 2.0).sin()).abs() < 1e-9);
    }

    #[test]
    fn matches_direct_evaluation() {
        let n = 12;
        for (k, (c, s)) in ArcIterator::new(PI, n, false).enumerate() {
            let a = PI * k as f64 / n as f64;
            assert!((c - a.cos()).abs() < 1e-9);
            assert!((s - a.sin()).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_steps_are_guarded() {
        let it = ArcIterator::new(FRAC_PI_2, 0, false);
        assert_eq!(it.step_count(), 1);
        assert_eq!(it.count(), 2);
    }

    #[test]
    fn segment_hint_bounds() {
        assert_eq!(ArcIterator::segment_hint(0.0), 3);
        assert_eq!(ArcIterator::segment_hint(1.0), 3);
        assert_eq!(ArcIterator::segment_hint(20.0), 11);
        assert_eq!(ArcIterator::segment_hint(1000.0), 18);
    }
}
