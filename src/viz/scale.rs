//! Linear data-to-pixel mapping.

use serde::{Deserialize, Serialize};

/// Maps `domain` linearly onto `range`. The range may be inverted
/// (e.g. `(height, 0.0)` for a value axis growing upward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// A zero-width domain maps everything to the middle of the range.
    #[inline]
    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Inverse of [`map`](Self::map). A zero-width range inverts to the domain start.
    #[inline]
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + (px - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Clamp a pixel coordinate into the range.
    pub fn clamp_px(&self, px: f64) -> f64 {
        let (r0, r1) = self.range;
        px.clamp(r0.min(r1), r0.max(r1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_and_inverts_with_flipped_range() {
        let s = LinearScale::new((-5.0, 15.0), (250.0, 0.0));
        assert_eq!(s.map(-5.0), 250.0);
        assert_eq!(s.map(15.0), 0.0);
        assert_eq!(s.map(5.0), 125.0);
        assert!((s.invert(125.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_domain_maps_to_midpoint() {
        let s = LinearScale::new((2010.0, 2010.0), (0.0, 550.0));
        assert_eq!(s.map(2010.0), 275.0);
        assert_eq!(s.map(1999.0), 275.0);
    }
}
