//! Affine coordinate transforms between rectangles.
//!
//! Image and media drawing code often needs to move points between spaces
//! that differ by a per-axis scale and offset, and sometimes by the origin
//! convention (pixel rows counted from the top, model coordinates from the
//! bottom). [`LinearEquationTransform`] handles one axis;
//! [`RectangleTransform`] combines two of them, plus their inverses, to map
//! points between a source and a target [`Rect`].

pub mod linear;
pub mod rectangle;

pub use self::linear::LinearEquationTransform;
pub use self::rectangle::{Origin, Rect, RectangleTransform};
