//! Piecewise-linear lookup over sorted knots.
//!
//! Used for compound reference curves (load → pressure). Outside the knot range
//! the curve is held flat: linear extrapolation can produce nonsense (negative
//! pressures) for loads far from the measured range.

/// Interpolate `y` at `x` over `knots` sorted by ascending `x`.
///
/// Returns `None` for an empty knot list.
pub fn interpolate(knots: &[(f64, f64)], x: f64) -> Option<f64> {
    let first = knots.first()?;
    let last = knots.last()?;

    if x <= first.0 {
        return Some(first.1);
    }
    if x >= last.0 {
        return Some(last.1);
    }

    for w in knots.windows(2) {
        let (x0, _) = w[0];
        let (x1, _) = w[1];
        if x >= x0 && x <= x1 {
            return Some(linear_interp(w[0], w[1], x));
        }
    }

    Some(last.1)
}

pub fn linear_interp(a: (f64, f64), b: (f64, f64), x: f64) -> f64 {
    let (x0, y0) = a;
    let (x1, y1) = b;
    if (x1 - x0).abs() < 1e-12 {
        return y0;
    }
    let u = (x - x0) / (x1 - x0);
    y0 + u * (y1 - y0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_between_knots() {
        let knots = [(200.0, 1.8), (400.0, 2.2)];
        let y = interpolate(&knots, 300.0).unwrap();
        assert!((y - 2.0).abs() < 1e-12, "expected 2.0, got {y}");
    }

    #[test]
    fn holds_flat_outside_range() {
        let knots = [(200.0, 1.8), (400.0, 2.2), (600.0, 2.5)];
        assert_eq!(interpolate(&knots, 50.0), Some(1.8));
        assert_eq!(interpolate(&knots, 900.0), Some(2.5));
    }

    #[test]
    fn empty_knots_yield_none() {
        assert_eq!(interpolate(&[], 1.0), None);
    }
}
