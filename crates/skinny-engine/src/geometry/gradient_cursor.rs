use crate::paint::GradientStop;

/// Single-pass cursor over the stops a geometric sweep crosses.
///
/// Only stops strictly between the first and the last sweep position are
/// candidates: the boundary rows get their colors by lookup anyway. The
/// sweep must advance with non-decreasing positions.
#[derive(Debug, Clone)]
pub struct GradientCursor {
    stops: Vec<GradientStop>,
    next: usize,
}

impl GradientCursor {
    pub fn new(stops: &[GradientStop], first: f32, last: f32) -> Self {
        let stops = stops
            .iter()
            .filter(|s| s.position > first && s.position < last)
            .copied()
            .collect();
        Self { stops, next: 0 }
    }

    /// A cursor that never yields; used for monochrome sweeps.
    pub fn empty() -> Self {
        Self { stops: Vec::new(), next: 0 }
    }

    /// Number of extra lines the whole sweep will insert.
    #[inline]
    pub fn insert_count(&self) -> usize {
        self.stops.len()
    }

    /// Candidates not yet consumed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.stops.len() - self.next
    }

    /// Consumes and returns the stops at or before `pos`.
    pub fn advance(&mut self, pos: f32) -> &[GradientStop] {
        let start = self.next;
        while self.next < self.stops.len() && self.stops[self.next].position <= pos {
            self.next += 1;
        }
        &self.stops[start..self.next]
    }
}
