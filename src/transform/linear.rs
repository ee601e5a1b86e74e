//! Module holding the one-dimensional linear transform.

use crate::error::{IndexError, Result};
use std::fmt;

/// A linear equation `y = slope * x + intercept`.
///
/// The slope is derived from two reference points, and the intercept from
/// a third correspondence `(x0, y0)` that the line must pass through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearEquationTransform {
    slope: f64,
    intercept: f64,
}

impl LinearEquationTransform {
    /// Create the linear equation with the slope of the line through
    /// `(x1, y1)` and `(x2, y2)`, passing through `(x0, y0)`.
    ///
    /// # Errors
    ///
    /// - `IndexError::CoincidentPoints` if both reference points are equal.
    /// - `IndexError::HorizontalLine` if `y1 == y2`, as the equation would
    /// have no inverse.
    /// - `IndexError::VerticalLine` if `x1 == x2`.
    ///
    /// # Example
    ///
    /// ```
    /// # use cifti_index::LinearEquationTransform;
    /// let t = LinearEquationTransform::new(0., 10., 100., 150., 0., 100.)?;
    /// assert_eq!(t.transform(10.), 150.);
    /// # Ok::<(), cifti_index::IndexError>(())
    /// ```
    pub fn new(x1: f64, x2: f64, y1: f64, y2: f64, x0: f64, y0: f64) -> Result<Self> {
        let dx = x2 - x1;
        let dy = y2 - y1;
        if dx == 0.0 && dy == 0.0 {
            return Err(IndexError::CoincidentPoints(x1, y1));
        }
        if dy == 0.0 {
            return Err(IndexError::HorizontalLine(y1));
        }
        if dx == 0.0 {
            return Err(IndexError::VerticalLine(x1));
        }

        let slope = dy / dx;
        let intercept = y0 - slope * x0;
        Ok(LinearEquationTransform { slope, intercept })
    }

    /// Apply the equation to `x`.
    pub fn transform(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// The slope of the line.
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// The value at `x = 0`.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl fmt::Display for LinearEquationTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y = {}x + {}", self.slope, self.intercept)
    }
}

#[cfg(test)]
mod tests {
    use super::LinearEquationTransform;
    use crate::error::IndexError;
    use approx::assert_relative_eq;

    #[test]
    fn passes_through_reference_points() {
        let t = LinearEquationTransform::new(2., 6., -1., 7., 2., -1.).unwrap();
        assert_relative_eq!(t.slope(), 2.);
        assert_relative_eq!(t.intercept(), -5.);
        assert_relative_eq!(t.transform(2.), -1.);
        assert_relative_eq!(t.transform(6.), 7.);
    }

    #[test]
    fn third_point_pins_intercept() {
        let t = LinearEquationTransform::new(0., 1., 0., 3., 10., 0.).unwrap();
        assert_relative_eq!(t.transform(10.), 0.);
        assert_relative_eq!(t.transform(11.), 3.);
    }

    #[test]
    fn degenerate_points() {
        assert_eq!(
            LinearEquationTransform::new(1., 1., 5., 5., 0., 0.),
            Err(IndexError::CoincidentPoints(1., 5.))
        );
        assert_eq!(
            LinearEquationTransform::new(1., 2., 5., 5., 0., 0.),
            Err(IndexError::HorizontalLine(5.))
        );
        assert_eq!(
            LinearEquationTransform::new(1., 1., 5., 6., 0., 0.),
            Err(IndexError::VerticalLine(1.))
        );
    }

    #[test]
    fn display() {
        let t = LinearEquationTransform::new(0., 1., 1., 3., 0., 1.).unwrap();
        assert_eq!(t.to_string(), "y = 2x + 1");
    }
}
