//! Seeded 64-bit folding hash used for change detection.
//!
//! Every call site picks its own seed so that e.g. a shape hash and a color
//! hash over the same values never collide by construction.

use std::hash::Hasher;

use rustc_hash::FxHasher;

use crate::coords::Rect;

pub(crate) struct HashFold(FxHasher);

impl HashFold {
    #[inline]
    pub(crate) fn new(seed: u64) -> Self {
        Self(FxHasher::with_seed(seed as usize))
    }

    /// Folds a float by bit pattern; `-0.0` and `0.0` hash the same.
    #[inline]
    pub(crate) fn f32(&mut self, v: f32) -> &mut Self {
        let v = if v == 0.0 { 0.0 } else { v };
        self.0.write_u32(v.to_bits());
        self
    }

    #[inline]
    pub(crate) fn u8(&mut self, v: u8) -> &mut Self {
        self.0.write_u8(v);
        self
    }

    #[inline]
    pub(crate) fn u64(&mut self, v: u64) -> &mut Self {
        self.0.write_u64(v);
        self
    }

    pub(crate) fn rect(&mut self, r: Rect) -> &mut Self {
        self.f32(r.origin.x).f32(r.origin.y).f32(r.size.x).f32(r.size.y)
    }

    #[inline]
    pub(crate) fn finish(&self) -> u64 {
        self.0.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_changes_result() {
        let a = HashFold::new(1).f32(2.0).finish();
        let b = HashFold::new(2).f32(2.0).finish();
        assert_ne!(a, b);
    }

    #[test]
    fn rect_fold_sees_every_edge() {
        let a = HashFold::new(3).rect(Rect::new(0.0, 0.0, 10.0, 20.0)).finish();
        let b = HashFold::new(3).rect(Rect::new(0.0, 0.0, 20.0, 10.0)).finish();
        assert_ne!(a, b);
    }

    #[test]
    fn signed_zero_folds_equal() {
        let a = HashFold::new(7).f32(0.0).finish();
        let b = HashFold::new(7).f32(-0.0).finish();
        assert_eq!(a, b);
    }
}
