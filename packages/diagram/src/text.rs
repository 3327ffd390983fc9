//! Static labels: text and component icons.

use crate::{
    component::Component,
    context::DrawContext,
    geom::{Point, Dimension, square, dimension, centered_max_dimension},
    grid::Direction,
    interactable::{Drawable, BoundedDrawable},
};
use draw::{
    Canvas,
    FontMetrics,
    ICON_WIDTH,
    TEXT_HEIGHT,
    colour,
};


/// A single line of text, sized when built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    text: String,
    /// Center of the text.
    position: Point,
    colour: u32,
    small: bool,
    shadow: bool,
    dimension: Dimension,
}

impl Text {
    /// Text placed in `direction` from `pos`. For example `Direction::E` puts
    /// the text's left edge on `pos`.
    pub fn builder(text: impl Into<String>, pos: Point, direction: Direction) -> TextBuilder {
        TextBuilder {
            text: text.into(),
            position: pos,
            direction,
            colour: colour::BLACK,
            small: false,
            shadow: false,
        }
    }

    /// Panics if `direction` has no vertical component.
    pub fn multi_line_builder(pos: Point, direction: Direction) -> MultiLineTextBuilder {
        assert!(
            direction.y_factor() != 0,
            "direction must have a vertical component: {:?}", direction,
        );
        MultiLineTextBuilder {
            position: pos,
            direction,
            line_height: MultiLineTextBuilder::LINE_HEIGHT,
            colour: colour::BLACK,
            small: false,
            shadow: false,
            lines: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Drawable for Text {
    fn max_dimension(&self) -> Dimension {
        centered_max_dimension(self.position, self.dimension)
    }

    fn draw(&self, ctx: &mut DrawContext) {
        let top_left = self.position - Point::new(self.dimension.w / 2, self.dimension.h / 2);
        ctx.canvas.draw_text(&self.text, top_left, self.colour, self.small, self.shadow);
    }
}

impl BoundedDrawable for Text {
    fn position(&self) -> Point {
        self.position
    }

    fn dimension(&self) -> Dimension {
        self.dimension
    }
}


pub struct TextBuilder {
    text: String,
    position: Point,
    direction: Direction,
    colour: u32,
    small: bool,
    shadow: bool,
}

impl TextBuilder {
    pub fn set_colour(mut self, colour: u32) -> Self {
        self.colour = colour;
        self
    }

    pub fn set_small(mut self, small: bool) -> Self {
        self.small = small;
        self
    }

    pub fn set_shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }

    pub fn build<M: FontMetrics + ?Sized>(self, metrics: &M) -> Text {
        let mut w = metrics.string_width(&self.text);
        let mut h = TEXT_HEIGHT;
        if self.small {
            w /= 2;
            h /= 2;
        }
        let center = self.position + Point::new(
            self.direction.x_factor() * w / 2,
            self.direction.y_factor() * h / 2,
        );
        Text {
            text: self.text,
            position: center,
            colour: self.colour,
            small: self.small,
            shadow: self.shadow,
            dimension: dimension(w, h),
        }
    }
}


/// Builds a column of text lines.
pub struct MultiLineTextBuilder {
    position: Point,
    direction: Direction,
    line_height: i32,
    colour: u32,
    small: bool,
    shadow: bool,
    lines: Vec<String>,
}

impl MultiLineTextBuilder {
    pub const LINE_HEIGHT: i32 = TEXT_HEIGHT + 2;

    pub fn set_colour(mut self, colour: u32) -> Self {
        self.colour = colour;
        self
    }

    /// Small text also halves the line height.
    pub fn set_small(mut self, small: bool) -> Self {
        self.small = small;
        self
    }

    pub fn set_shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }

    pub fn set_line_height(mut self, line_height: i32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn adjust_line_height(mut self, delta: i32) -> Self {
        self.line_height += delta;
        self
    }

    /// Add text, split into a line per `'\n'`.
    pub fn add_line(self, line: &str) -> Self {
        self.add_all_lines(line.split('\n'))
    }

    pub fn add_all_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn build<M: FontMetrics + ?Sized>(self, metrics: &M) -> Vec<Text> {
        let line_height = if self.small { self.line_height / 2 } else { self.line_height };
        let count = self.lines.len() as i32;
        let mut y = match self.direction.y_factor() {
            -1 => self.position.y - count * line_height,
            0 => self.position.y - count * line_height / 2,
            _ => self.position.y,
        };
        let mut texts = Vec::with_capacity(self.lines.len());
        for line in self.lines {
            texts.push(Text::builder(line, Point::new(self.position.x, y), self.direction)
                .set_colour(self.colour)
                .set_small(self.small)
                .set_shadow(self.shadow)
                .build(metrics));
            y += line_height;
        }
        texts
    }
}


/// Icon of a component, drawn without a slot behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentLabel {
    component: Component,
    position: Point,
}

impl ComponentLabel {
    pub fn new(component: Component, position: Point) -> Self {
        ComponentLabel { component, position }
    }

    pub fn component(&self) -> &Component {
        &self.component
    }
}

impl Drawable for ComponentLabel {
    fn max_dimension(&self) -> Dimension {
        centered_max_dimension(self.position, self.dimension())
    }

    fn draw(&self, ctx: &mut DrawContext) {
        self.component.draw(ctx, self.position);
    }
}

impl BoundedDrawable for ComponentLabel {
    fn position(&self) -> Point {
        self.position
    }

    fn dimension(&self) -> Dimension {
        square(ICON_WIDTH)
    }
}


#[cfg(test)]
use crate::geom::point;
#[cfg(test)]
use draw::recording::MonospaceMetrics;

#[test]
fn test_text_direction_offsets_center() {
    let metrics = MonospaceMetrics(6);
    let east = Text::builder("abcd", point(100, 50), Direction::E).build(&metrics);
    assert_eq!(east.dimension(), dimension(24, 8));
    assert_eq!(east.position(), point(112, 50));

    let small = Text::builder("abcd", point(100, 50), Direction::NW)
        .set_small(true)
        .build(&metrics);
    assert_eq!(small.dimension(), dimension(12, 4));
    assert_eq!(small.position(), point(94, 48));
}

#[test]
fn test_multi_line_stacks_lines() {
    let metrics = MonospaceMetrics(6);
    let texts = Text::multi_line_builder(point(50, 100), Direction::N)
        .add_line("one\ntwo")
        .add_line("three")
        .build(&metrics);
    assert_eq!(texts.len(), 3);
    // the block ends above the anchor
    assert_eq!(texts[0].position().y, 100 - 3 * 10 - 4);
    assert_eq!(texts[1].position().y - texts[0].position().y, 10);
    assert_eq!(texts[2].text(), "three");
}

#[test]
#[should_panic(expected = "vertical component")]
fn test_multi_line_needs_vertical_direction() {
    Text::multi_line_builder(point(0, 0), Direction::E);
}
