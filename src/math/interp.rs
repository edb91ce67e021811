//! Monotone lookup tables with piecewise-linear interpolation.
//!
//! A nomogram maps a score to an outcome probability. Between two table points the
//! value is interpolated linearly; outside the table it is clamped to the first/last
//! value.

use crate::error::{AppError, EXIT_USAGE};

/// An ordered `(x, y)` table, strictly increasing in both coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nomogram<'a> {
    points: &'a [(f64, f64)],
}

impl<'a> Nomogram<'a> {
    /// Validate and wrap a table.
    pub fn new(points: &'a [(f64, f64)]) -> Result<Self, AppError> {
        if points.len() < 2 {
            return Err(AppError::new(EXIT_USAGE, "Nomogram needs at least two points."));
        }
        if points.iter().any(|(x, y)| !(x.is_finite() && y.is_finite())) {
            return Err(AppError::new(EXIT_USAGE, "Nomogram points must be finite."));
        }
        for pair in points.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            if !(x1 > x0 && y1 > y0) {
                return Err(AppError::new(
                    EXIT_USAGE,
                    format!("Nomogram is not strictly increasing at ({x0}, {y0}) -> ({x1}, {y1})."),
                ));
            }
        }
        Ok(Self { points })
    }

    /// Wrap a compile-time table without validation.
    ///
    /// Constant tables built this way must be covered by a test calling `new`.
    pub const fn from_static(points: &'static [(f64, f64)]) -> Nomogram<'static> {
        Nomogram { points }
    }

    /// Smallest and largest `y` in the table.
    pub fn y_bounds(&self) -> (f64, f64) {
        (self.first().1, self.last().1)
    }

    /// Interpolate `y` at `x`, clamping outside the table's `x` range.
    pub fn interpolate(&self, x: f64) -> f64 {
        let first = self.first();
        let last = self.last();

        // `!(x > ..)` also routes NaN to the lower clamp.
        if !(x > first.0) {
            return first.1;
        }
        if x >= last.0 {
            return last.1;
        }

        for pair in self.points.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            if x >= x0 && x <= x1 {
                let t = (x - x0) / (x1 - x0);
                return y0 + t * (y1 - y0);
            }
        }

        last.1
    }

    fn first(&self) -> (f64, f64) {
        self.points[0]
    }

    fn last(&self) -> (f64, f64) {
        self.points[self.points.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: [(f64, f64); 3] = [(0.0, 1.0), (10.0, 3.0), (20.0, 7.0)];

    #[test]
    fn exact_at_table_points() {
        let n = Nomogram::new(&TABLE).unwrap();
        for &(x, y) in &TABLE {
            assert_eq!(n.interpolate(x), y);
        }
    }

    #[test]
    fn linear_between_points_and_clamped_outside() {
        let n = Nomogram::new(&TABLE).unwrap();
        assert!((n.interpolate(5.0) - 2.0).abs() < 1e-12);
        assert!((n.interpolate(15.0) - 5.0).abs() < 1e-12);
        assert_eq!(n.interpolate(-100.0), 1.0);
        assert_eq!(n.interpolate(1e9), 7.0);
        assert_eq!(n.interpolate(f64::NAN), 1.0);
        assert_eq!(n.y_bounds(), (1.0, 7.0));
    }

    #[test]
    fn rejects_non_monotone_tables() {
        assert!(Nomogram::new(&[(0.0, 1.0)]).is_err());
        assert!(Nomogram::new(&[(0.0, 1.0), (0.0, 2.0)]).is_err());
        assert!(Nomogram::new(&[(0.0, 2.0), (1.0, 1.0)]).is_err());
        assert!(Nomogram::new(&[(0.0, 1.0), (f64::INFINITY, 2.0)]).is_err());
    }
}
