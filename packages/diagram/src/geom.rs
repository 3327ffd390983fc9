//! Integer 2D value types.
//!
//! These are plain `vek` types. Points are pixel positions (usually the
//! center of whatever sits there), vectors are offsets, and dimensions are
//! width/height pairs.

use vek::*;


pub type Point = Vec2<i32>;
pub type Vector = Vec2<i32>;
pub type Dimension = Extent2<i32>;


pub fn point(x: i32, y: i32) -> Point {
    Vec2::new(x, y)
}

pub fn dimension(w: i32, h: i32) -> Dimension {
    Extent2::new(w, h)
}

/// Square dimension with the given side length.
pub fn square(w: i32) -> Dimension {
    Extent2::new(w, w)
}

/// Componentwise max of two dimensions.
pub fn dimension_max(a: Dimension, b: Dimension) -> Dimension {
    Extent2::new(a.w.max(b.w), a.h.max(b.h))
}

/// Componentwise max over many dimensions, starting from zero.
pub fn dimension_max_all<I>(dims: I) -> Dimension
where
    I: IntoIterator<Item = Dimension>,
{
    dims.into_iter().fold(Extent2::new(0, 0), dimension_max)
}

/// Bottom-right extent of something with the given center and size.
pub fn centered_max_dimension(center: Point, dim: Dimension) -> Dimension {
    Extent2::new(center.x + dim.w / 2, center.y + dim.h / 2)
}

/// Whether `target` is inside the box of size `dim` centered on `center`.
///
/// The near edges are inclusive and the far edges are exclusive.
pub fn centered_box_contains(center: Point, dim: Dimension, target: Point) -> bool {
    let within_x = target.x >= center.x - dim.w / 2 && target.x < center.x + dim.w / 2;
    let within_y = target.y >= center.y - dim.h / 2 && target.y < center.y + dim.h / 2;
    within_x && within_y
}


/// Point operations used when laying out diagrams.
pub trait PointExt: Sized {
    fn translate(self, dx: i32, dy: i32) -> Self;

    /// Whether the two points share an x or a y coordinate.
    fn is_orthogonal(self, other: Self) -> bool;

    /// Point with this point's x and `other`'s y.
    fn project_x(self, other: Self) -> Self;

    /// Point with `other`'s x and this point's y.
    fn project_y(self, other: Self) -> Self;
}

impl PointExt for Vec2<i32> {
    fn translate(self, dx: i32, dy: i32) -> Self {
        Vec2::new(self.x + dx, self.y + dy)
    }

    fn is_orthogonal(self, other: Self) -> bool {
        self.x == other.x || self.y == other.y
    }

    fn project_x(self, other: Self) -> Self {
        Vec2::new(self.x, other.y)
    }

    fn project_y(self, other: Self) -> Self {
        Vec2::new(other.x, self.y)
    }
}


#[test]
fn test_orthogonality() {
    assert!(point(0, 0).is_orthogonal(point(0, 5)));
    assert!(point(0, 0).is_orthogonal(point(-3, 0)));
    assert!(point(2, 2).is_orthogonal(point(2, 2)));
    assert!(!point(0, 0).is_orthogonal(point(3, 4)));
}

#[test]
fn test_projections_form_corner() {
    let a = point(1, 2);
    let b = point(10, 20);
    assert_eq!(a.project_x(b), point(1, 20));
    assert_eq!(a.project_y(b), point(10, 2));
    assert!(a.is_orthogonal(a.project_x(b)) && b.is_orthogonal(a.project_x(b)));
}

#[test]
fn test_centered_box_is_half_open() {
    let c = point(10, 10);
    let d = square(16);
    assert!(centered_box_contains(c, d, point(2, 2)));
    assert!(centered_box_contains(c, d, point(17, 17)));
    assert!(!centered_box_contains(c, d, point(18, 10)));
    assert!(!centered_box_contains(c, d, point(10, 1)));
    assert_eq!(centered_max_dimension(c, d), dimension(18, 18));
}
