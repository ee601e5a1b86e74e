//! Module holding the rectangle-to-rectangle transform.

use super::linear::LinearEquationTransform;
use crate::error::{IndexError, Result};
use std::fmt;
use tracing::error;

/// Where the origin of a rectangle's coordinate system lies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Y grows downwards from the top-left corner (pixel rows).
    TopLeft,
    /// Y grows upwards from the bottom-left corner (model space).
    BottomLeft,
}

/// An axis-aligned rectangle.
///
/// Edges follow the screen convention: `top()` is `y` and `bottom()` is
/// `y + height`, regardless of which [`Origin`] the rectangle is used with.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X of the left edge
    pub x: f64,
    /// Y of the top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its corner and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// X of the left edge.
    pub fn left(&self) -> f64 {
        self.x
    }

    /// X of the right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Y of the top edge.
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Y of the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// The center point.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether the rectangle has a positive width and height.
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// The low and high Y reference values for the given origin convention.
    fn y_range(&self, origin: Origin) -> (f64, f64) {
        match origin {
            Origin::BottomLeft => (self.top(), self.bottom()),
            Origin::TopLeft => (self.bottom(), self.top()),
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x={}, y={}, w={}, h={})", self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisTransforms {
    x: LinearEquationTransform,
    y: LinearEquationTransform,
    x_inverse: LinearEquationTransform,
    y_inverse: LinearEquationTransform,
}

/// Maps points between a source and a target rectangle.
///
/// Each axis is mapped independently, so the transform scales and offsets
/// but never rotates. A source rectangle whose origin convention differs
/// from the target's is flipped vertically.
///
/// Construction never fails outright: check [`is_valid`](Self::is_valid)
/// (or use [`try_new`](Self::try_new)). Mapping a point with an invalid
/// transform is an error.
///
/// # Example
///
/// ```
/// # use cifti_index::{Origin, Rect, RectangleTransform};
/// let transform = RectangleTransform::new(
///     Rect::new(0., 0., 10., 20.),
///     Origin::BottomLeft,
///     Rect::new(100., 200., 50., 5.),
///     Origin::BottomLeft,
/// );
/// assert!(transform.is_valid());
/// assert_eq!(transform.transform_source_to_target(10., 20.)?, (150., 205.));
/// # Ok::<(), cifti_index::IndexError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleTransform {
    source: Rect,
    source_origin: Origin,
    target: Rect,
    target_origin: Origin,
    transforms: Option<AxisTransforms>,
    error_message: String,
}

impl RectangleTransform {
    /// Build the transform between two rectangles. Every problem found is
    /// collected in [`error_message`](Self::error_message).
    pub fn new(source: Rect, source_origin: Origin, target: Rect, target_origin: Origin) -> Self {
        let mut errors = Vec::new();
        if !source.is_valid() {
            errors.push(format!("Source rectangle has no area: {}", source));
        }
        if !target.is_valid() {
            errors.push(format!("Target rectangle has no area: {}", target));
        }

        let (source_low, source_high) = source.y_range(source_origin);
        let (target_low, target_high) = target.y_range(target_origin);

        let mut build = |name: &str, r: Result<LinearEquationTransform>| match r {
            Ok(t) => Some(t),
            Err(e) => {
                errors.push(format!("{} transform: {}", name, e));
                None
            }
        };

        let x = build(
            "X",
            LinearEquationTransform::new(
                source.left(),
                source.right(),
                target.left(),
                target.right(),
                source.left(),
                target.left(),
            ),
        );
        let x_inverse = build(
            "Inverse X",
            LinearEquationTransform::new(
                target.left(),
                target.right(),
                source.left(),
                source.right(),
                target.left(),
                source.left(),
            ),
        );
        let y = build(
            "Y",
            LinearEquationTransform::new(
                source_low,
                source_high,
                target_low,
                target_high,
                source_low,
                target_low,
            ),
        );
        let y_inverse = build(
            "Inverse Y",
            LinearEquationTransform::new(
                target_low,
                target_high,
                source_low,
                source_high,
                target_low,
                source_low,
            ),
        );

        let transforms = match (x, y, x_inverse, y_inverse) {
            (Some(x), Some(y), Some(x_inverse), Some(y_inverse)) if errors.is_empty() => {
                Some(AxisTransforms {
                    x,
                    y,
                    x_inverse,
                    y_inverse,
                })
            }
            _ => None,
        };

        RectangleTransform {
            source,
            source_origin,
            target,
            target_origin,
            transforms,
            error_message: errors.join("\n"),
        }
    }

    /// Build the transform between two rectangles, failing if it is not
    /// valid.
    ///
    /// # Errors
    ///
    /// - `IndexError::InvalidRectangleTransform` with every problem found.
    pub fn try_new(
        source: Rect,
        source_origin: Origin,
        target: Rect,
        target_origin: Origin,
    ) -> Result<Self> {
        let transform = Self::new(source, source_origin, target, target_origin);
        if transform.is_valid() {
            Ok(transform)
        } else {
            Err(IndexError::InvalidRectangleTransform(transform.error_message))
        }
    }

    /// Whether both rectangles have an area and all axis transforms could
    /// be built.
    pub fn is_valid(&self) -> bool {
        self.transforms.is_some()
    }

    /// Newline separated description of every problem found when building
    /// the transform. Empty if valid.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// The source rectangle.
    pub fn source(&self) -> (Rect, Origin) {
        (self.source, self.source_origin)
    }

    /// The target rectangle.
    pub fn target(&self) -> (Rect, Origin) {
        (self.target, self.target_origin)
    }

    fn axis_transforms(&self) -> Result<&AxisTransforms> {
        self.transforms.as_ref().ok_or_else(|| {
            error!(reason = %self.error_message, "attempted to use an invalid rectangle transform");
            IndexError::InvalidRectangleTransform(self.error_message.clone())
        })
    }

    /// Map a point in the source rectangle's space to the target's.
    ///
    /// # Errors
    ///
    /// - `IndexError::InvalidRectangleTransform` if the transform is not
    /// valid.
    pub fn transform_source_to_target(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let t = self.axis_transforms()?;
        Ok((t.x.transform(x), t.y.transform(y)))
    }

    /// Map a point in the target rectangle's space back to the source's.
    ///
    /// # Errors
    ///
    /// - `IndexError::InvalidRectangleTransform` if the transform is not
    /// valid.
    pub fn transform_target_to_source(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let t = self.axis_transforms()?;
        Ok((t.x_inverse.transform(x), t.y_inverse.transform(y)))
    }
}

impl fmt::Display for RectangleTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "source {} {:?} -> target {} {:?}",
            self.source, self.source_origin, self.target, self.target_origin
        )?;
        match &self.transforms {
            Some(t) => write!(f, ", x: {}, y: {}", t.x, t.y),
            None => write!(f, ", invalid: {}", self.error_message),
        }
    }
}
