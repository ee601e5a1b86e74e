//! Types for error handling go here.

quick_error! {
    /// Error type for all error variants originated by this crate.
    #[derive(Debug, Clone, PartialEq)]
    pub enum IndexError {
        /// The volume affine has rotation or shear, so the grid is not plumb.
        NonPlumbGeometry {
            display("Volume geometry is not plumb (axis-aligned)")
        }
        /// A voxel spacing is zero or not a finite number.
        DegenerateSpacing(axis: usize, spacing: f32) {
            display("Invalid voxel spacing {} along axis {}", spacing, axis)
        }
        /// Both reference points of a linear equation are the same point.
        CoincidentPoints(x: f64, y: f64) {
            display("Points are coincident at ({}, {})", x, y)
        }
        /// The reference points describe a horizontal line, which has no inverse.
        HorizontalLine(y: f64) {
            display("Points form a horizontal line at y={} (slope of zero)", y)
        }
        /// The reference points describe a vertical line.
        VerticalLine(x: f64) {
            display("Points form a vertical line at x={} (undefined slope)", x)
        }
        /// A rectangle transform could not be built or was used while invalid.
        InvalidRectangleTransform(message: String) {
            display("Invalid rectangle transform: {}", message)
        }
    }
}

/// Alias type for results originated from this crate.
pub type Result<T> = ::std::result::Result<T, IndexError>;
