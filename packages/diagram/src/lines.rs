//! Right-angled connector lines and arrows.

use crate::{
    context::DrawContext,
    geom::{Point, Dimension, PointExt, dimension},
    interactable::Drawable,
};
use draw::{CanvasExt, colour};
use anyhow::*;


/// Axis-aligned line segment from `a` to `b`. Arrows point at `b`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    a: Point,
    b: Point,
}

impl Segment {
    /// Panics if the points aren't orthogonal.
    pub fn new(a: Point, b: Point) -> Self {
        assert!(a.is_orthogonal(b), "points aren't orthogonal: {:?} {:?}", a, b);
        Segment { a, b }
    }

    pub fn try_new(a: Point, b: Point) -> Result<Self> {
        ensure!(a.is_orthogonal(b), "points aren't orthogonal: {:?} {:?}", a, b);
        Ok(Segment { a, b })
    }

    pub fn a(&self) -> Point {
        self.a
    }

    pub fn b(&self) -> Point {
        self.b
    }

    fn draw_segment(&self, ctx: &mut DrawContext, colour: u32) {
        ctx.canvas.draw_line(self.a, self.b, colour);
    }

    fn draw_arrow(&self, ctx: &mut DrawContext, colour: u32) {
        self.draw_segment(ctx, colour);
        ctx.canvas.draw_arrowhead(self.a, self.b, colour);
    }
}


/// Set of segments and arrows sharing a colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lines {
    colour: u32,
    segments: Vec<Segment>,
    arrows: Vec<Segment>,
}

impl Lines {
    /// Pen-style builder, starting at `pos`.
    pub fn builder(pos: Point) -> LinesBuilder {
        LinesBuilder {
            colour: colour::BLACK,
            pen: pos,
            segments: Vec::new(),
            arrows: Vec::new(),
        }
    }

    pub fn colour(&self) -> u32 {
        self.colour
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn arrows(&self) -> &[Segment] {
        &self.arrows
    }
}

impl Drawable for Lines {
    fn max_dimension(&self) -> Dimension {
        let mut max_x: i32 = -1;
        let mut max_y: i32 = -1;
        for segment in self.segments.iter().chain(&self.arrows) {
            max_x = max_x.max(segment.a.x).max(segment.b.x);
            max_y = max_y.max(segment.a.y).max(segment.b.y);
        }
        // lines are 2 pixels thick
        dimension(max_x + 1, max_y + 1)
    }

    fn draw(&self, ctx: &mut DrawContext) {
        for segment in &self.segments {
            segment.draw_segment(ctx, self.colour);
        }
        for arrow in &self.arrows {
            arrow.draw_arrow(ctx, self.colour);
        }
    }
}


/// Builds lines by moving a pen around.
///
/// Operations taking a point draw from the pen to that point, then move the
/// pen there. Operations taking a segment leave the pen where it is.
#[derive(Debug, Clone)]
pub struct LinesBuilder {
    colour: u32,
    pen: Point,
    segments: Vec<Segment>,
    arrows: Vec<Segment>,
}

impl LinesBuilder {
    pub fn set_colour(mut self, colour: u32) -> Self {
        self.colour = colour;
        self
    }

    pub fn move_to(mut self, pos: Point) -> Self {
        self.pen = pos;
        self
    }

    pub fn add_segment(mut self, pos: Point) -> Self {
        self.segments.push(Segment::new(self.pen, pos));
        self.pen = pos;
        self
    }

    pub fn add_segment_raw(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Arrow pointing at `pos`.
    pub fn add_arrow(mut self, pos: Point) -> Self {
        self.arrows.push(Segment::new(self.pen, pos));
        self.pen = pos;
        self
    }

    pub fn add_arrow_raw(mut self, segment: Segment) -> Self {
        self.arrows.push(segment);
        self
    }

    /// Arrow pointing back at the pen's old position.
    pub fn add_reverse_arrow(mut self, pos: Point) -> Self {
        self.arrows.push(Segment::new(pos, self.pen));
        self.pen = pos;
        self
    }

    /// Arrow with heads at both ends.
    pub fn add_double_arrow(mut self, pos: Point) -> Self {
        self.arrows.push(Segment::new(self.pen, pos));
        self.arrows.push(Segment::new(pos, self.pen));
        self.pen = pos;
        self
    }

    pub fn build(self) -> Lines {
        Lines {
            colour: self.colour,
            segments: self.segments,
            arrows: self.arrows,
        }
    }
}


#[cfg(test)]
use crate::geom::point;

#[test]
fn test_segment_orthogonality() {
    assert!(Segment::try_new(point(0, 0), point(3, 4)).is_err());
    assert!(Segment::try_new(point(0, 0), point(0, 5)).is_ok());
}

#[test]
#[should_panic(expected = "orthogonal")]
fn test_diagonal_segment_panics() {
    Segment::new(point(0, 0), point(3, 4));
}

#[test]
fn test_pen_movement() {
    let lines = Lines::builder(point(0, 0))
        .add_segment(point(0, 10))
        .add_arrow(point(20, 10))
        .add_reverse_arrow(point(20, 30))
        .add_segment_raw(Segment::new(point(50, 0), point(50, 5)))
        .add_double_arrow(point(40, 30))
        .build();
    assert_eq!(lines.segments().len(), 2);
    assert_eq!(lines.arrows()[0], Segment::new(point(0, 10), point(20, 10)));
    assert_eq!(lines.arrows()[1], Segment::new(point(20, 30), point(20, 10)));
    // the raw segment didn't move the pen
    assert_eq!(lines.arrows()[2], Segment::new(point(20, 30), point(40, 30)));
    assert_eq!(lines.arrows()[3], Segment::new(point(40, 30), point(20, 30)));
    assert_eq!(lines.max_dimension(), dimension(51, 31));
}
