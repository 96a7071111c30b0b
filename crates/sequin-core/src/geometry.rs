//! Geometric primitives used by layout and rendering.
//!
//! All coordinates are in pixels with the origin at the top-left corner;
//! `x` grows to the right and `y` grows downward.

/// A position in diagram space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Returns a new Size with padding added to both width and height
    ///
    /// The padding is applied according to the specified Insets values
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// A rectangle described by its minimum and maximum coordinates.
///
/// Layout results are expressed as `Bounds` values: each placed element
/// reports the rectangle it occupies in diagram space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from a top-left corner and a size
    pub fn from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x(),
            min_y: top_left.y(),
            max_x: top_left.x() + size.width(),
            max_y: top_left.y() + size.height(),
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the horizontal center of the bounds
    pub fn center_x(self) -> f32 {
        (self.min_x + self.max_x) / 2.0
    }

    /// Returns the vertical center of the bounds
    pub fn center_y(self) -> f32 {
        (self.min_y + self.max_y) / 2.0
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Reflects the bounds across the vertical centerline of a region
    /// spanning `0..region_width`.
    ///
    /// The width and height of the bounds are preserved.
    pub fn mirror_x(self, region_width: f32) -> Self {
        Self {
            min_x: region_width - self.max_x,
            min_y: self.min_y,
            max_x: region_width - self.min_x,
            max_y: self.max_y,
        }
    }
}

/// Represents spacing around an element (padding, margin, etc.)
/// with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Returns the top inset value
    pub fn top(self) -> f32 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f32 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f32 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f32 {
        self.left
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

/// Minimum and maximum dimensions passed to content measurement.
///
/// A maximum of [`f32::INFINITY`] means the dimension is unbounded.
/// Constraints where the minimum and maximum are equal force the content
/// to an exact dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    min_width: f32,
    max_width: f32,
    min_height: f32,
    max_height: f32,
}

impl Constraints {
    /// Constraints that allow any size.
    pub fn unbounded() -> Self {
        Self {
            min_width: 0.0,
            max_width: f32::INFINITY,
            min_height: 0.0,
            max_height: f32::INFINITY,
        }
    }

    /// Constraints with only an upper width bound.
    pub fn loose_width(max_width: f32) -> Self {
        Self {
            max_width,
            ..Self::unbounded()
        }
    }

    /// Constraints with both a lower and an upper width bound.
    pub fn width_range(min_width: f32, max_width: f32) -> Self {
        Self {
            min_width,
            max_width,
            ..Self::unbounded()
        }
    }

    /// Constraints that force an exact width.
    pub fn fixed_width(width: f32) -> Self {
        Self::width_range(width, width)
    }

    /// Returns the minimum width
    pub fn min_width(self) -> f32 {
        self.min_width
    }

    /// Returns the maximum width
    pub fn max_width(self) -> f32 {
        self.max_width
    }

    /// Returns the minimum height
    pub fn min_height(self) -> f32 {
        self.min_height
    }

    /// Returns the maximum height
    pub fn max_height(self) -> f32 {
        self.max_height
    }

    /// Returns a copy with the maximum width lowered to `max_width`.
    ///
    /// The minimum width is preserved, so the result may force an exact
    /// width when the new maximum falls below the current minimum.
    pub fn cap_max_width(self, max_width: f32) -> Self {
        Self {
            max_width: self.max_width.min(max_width).max(self.min_width),
            ..self
        }
    }

    /// Returns a copy with the given insets removed from the width bounds.
    ///
    /// Used to measure content inside a padded box. Bounds never drop
    /// below zero.
    pub fn deflate_width(self, insets: Insets) -> Self {
        let pad = insets.horizontal_sum();
        Self {
            min_width: (self.min_width - pad).max(0.0),
            max_width: if self.max_width.is_finite() {
                (self.max_width - pad).max(0.0)
            } else {
                self.max_width
            },
            ..self
        }
    }

    /// Clamps a size into these constraints.
    pub fn constrain(self, size: Size) -> Size {
        Size::new(
            size.width().clamp(self.min_width, self.max_width),
            size.height().clamp(self.min_height, self.max_height),
        )
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_add() {
        let p1 = Point::new(1.0, 2.0);
        let p2 = Point::new(3.0, 4.0);
        let result = p1.add_point(p2);
        assert_eq!(result.x(), 4.0);
        assert_eq!(result.y(), 6.0);
    }

    #[test]
    fn test_size_new() {
        let size = Size::new(100.0, 200.0);
        assert_eq!(size.width(), 100.0);
        assert_eq!(size.height(), 200.0);
    }

    #[test]
    fn test_size_max() {
        let size1 = Size::new(10.0, 20.0);
        let size2 = Size::new(15.0, 18.0);
        let max_size = size1.max(size2);

        assert_eq!(max_size.width(), 15.0);
        assert_eq!(max_size.height(), 20.0);
    }

    #[test]
    fn test_size_add_padding() {
        let size = Size::new(10.0, 20.0);
        let padded = size.add_padding(Insets::uniform(5.0));

        assert_eq!(padded.width(), 20.0); // 10 + 5*2
        assert_eq!(padded.height(), 30.0); // 20 + 5*2
    }

    #[test]
    fn test_size_is_zero() {
        assert!(Size::new(0.0, 0.0).is_zero());
        assert!(Size::default().is_zero());
        assert!(!Size::new(1.0, 0.0).is_zero());
        assert!(!Size::new(0.0, 1.0).is_zero());
    }

    #[test]
    fn test_bounds_from_top_left() {
        let bounds = Bounds::from_top_left(Point::new(2.0, 3.0), Size::new(5.0, 8.0));

        assert_eq!(bounds.min_x(), 2.0);
        assert_eq!(bounds.min_y(), 3.0);
        assert_eq!(bounds.max_x(), 7.0);
        assert_eq!(bounds.max_y(), 11.0);
        assert_eq!(bounds.width(), 5.0);
        assert_eq!(bounds.height(), 8.0);
    }

    #[test]
    fn test_bounds_centers() {
        let bounds = Bounds::from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 4.0));
        assert_eq!(bounds.center_x(), 5.0);
        assert_eq!(bounds.center_y(), 2.0);
    }

    #[test]
    fn test_bounds_to_size() {
        let bounds = Bounds::from_top_left(Point::new(1.0, 2.0), Size::new(5.0, 7.0));
        let size = bounds.to_size();
        assert_eq!(size.width(), 5.0);
        assert_eq!(size.height(), 7.0);
    }

    #[test]
    fn test_bounds_mirror_x() {
        let bounds = Bounds::from_top_left(Point::new(10.0, 5.0), Size::new(20.0, 8.0));
        let mirrored = bounds.mirror_x(100.0);

        assert_eq!(mirrored.min_x(), 70.0); // 100 - 30
        assert_eq!(mirrored.max_x(), 90.0); // 100 - 10
        assert_eq!(mirrored.min_y(), 5.0);
        assert_eq!(mirrored.max_y(), 13.0);
        assert_eq!(mirrored.width(), bounds.width());
    }

    #[test]
    fn test_bounds_mirror_x_involution() {
        let bounds = Bounds::from_top_left(Point::new(3.0, 1.0), Size::new(4.0, 2.0));
        assert_eq!(bounds.mirror_x(50.0).mirror_x(50.0), bounds);
    }

    #[test]
    fn test_insets_new() {
        let insets = Insets::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(insets.top(), 1.0);
        assert_eq!(insets.right(), 2.0);
        assert_eq!(insets.bottom(), 3.0);
        assert_eq!(insets.left(), 4.0);
    }

    #[test]
    fn test_insets_uniform() {
        let insets = Insets::uniform(5.0);
        assert_eq!(insets.top(), 5.0);
        assert_eq!(insets.right(), 5.0);
        assert_eq!(insets.bottom(), 5.0);
        assert_eq!(insets.left(), 5.0);
    }

    #[test]
    fn test_insets_sums() {
        let insets = Insets::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(insets.horizontal_sum(), 6.0); // 2.0 + 4.0
        assert_eq!(insets.vertical_sum(), 4.0); // 1.0 + 3.0
    }

    #[test]
    fn test_constraints_unbounded() {
        let constraints = Constraints::unbounded();
        assert_eq!(constraints.min_width(), 0.0);
        assert_eq!(constraints.max_width(), f32::INFINITY);
        assert_eq!(constraints.min_height(), 0.0);
        assert_eq!(constraints.max_height(), f32::INFINITY);
    }

    #[test]
    fn test_constraints_fixed_width() {
        let constraints = Constraints::fixed_width(42.0);
        assert_eq!(constraints.min_width(), 42.0);
        assert_eq!(constraints.max_width(), 42.0);

        let constrained = constraints.constrain(Size::new(10.0, 5.0));
        assert_eq!(constrained.width(), 42.0);
        assert_eq!(constrained.height(), 5.0);
    }

    #[test]
    fn test_constraints_constrain_clamps_both_ends() {
        let constraints = Constraints::width_range(10.0, 20.0);

        assert_eq!(constraints.constrain(Size::new(5.0, 1.0)).width(), 10.0);
        assert_eq!(constraints.constrain(Size::new(15.0, 1.0)).width(), 15.0);
        assert_eq!(constraints.constrain(Size::new(25.0, 1.0)).width(), 20.0);
    }

    #[test]
    fn test_constraints_cap_max_width() {
        let constraints = Constraints::loose_width(100.0).cap_max_width(30.0);
        assert_eq!(constraints.max_width(), 30.0);

        // Capping below the minimum collapses to the minimum.
        let tight = Constraints::width_range(50.0, 100.0).cap_max_width(30.0);
        assert_eq!(tight.max_width(), 50.0);
    }

    #[test]
    fn test_constraints_deflate_width() {
        let constraints = Constraints::width_range(10.0, 50.0).deflate_width(Insets::uniform(4.0));
        assert_eq!(constraints.min_width(), 2.0);
        assert_eq!(constraints.max_width(), 42.0);

        // Unbounded maxima stay unbounded.
        let loose = Constraints::unbounded().deflate_width(Insets::uniform(4.0));
        assert_eq!(loose.max_width(), f32::INFINITY);

        // Bounds never go negative.
        let tiny = Constraints::width_range(1.0, 3.0).deflate_width(Insets::uniform(4.0));
        assert_eq!(tiny.min_width(), 0.0);
        assert_eq!(tiny.max_width(), 0.0);
    }
}
