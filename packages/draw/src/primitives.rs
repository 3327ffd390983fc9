//! Center-based drawing helpers layered over the raw `Canvas` operations.

use crate::{
    Canvas,
    FontMetrics,
    TextureRegion,
    ICON_WIDTH,
    TEXT_HEIGHT,
    colour,
};
use vek::*;


/// Size of a string when drawn, taking small (half scale) text into account.
pub fn text_size<M: FontMetrics + ?Sized>(metrics: &M, text: &str, small: bool) -> Extent2<i32> {
    let w = metrics.string_width(text);
    if small {
        Extent2::new(w / 2, TEXT_HEIGHT / 2)
    } else {
        Extent2::new(w, TEXT_HEIGHT)
    }
}

/// Top-left corner of a tooltip box of the given size for the given absolute
/// mouse position, mimicking the usual NEI placement around screen edges.
pub fn tooltip_position(
    size: Extent2<i32>,
    mouse: Vec2<i32>,
    display: Extent2<i32>,
) -> Vec2<i32> {
    let mut x = mouse.x + 12;
    let mut y = mouse.y - 12;
    if x + size.w > display.w - 8 {
        x -= size.w + 24;
    }
    if y + size.h > display.h - 8 {
        y = display.h - (size.h + 8);
    }
    Vec2::new(x.max(8), y.max(8))
}


/// Drawing helpers available on every canvas.
pub trait CanvasExt: Canvas {
    /// Draw a line of thickness 2 between two points.
    ///
    /// If the points aren't orthogonal this fills the rectangle between them.
    fn draw_line(&mut self, a: Vec2<i32>, b: Vec2<i32>, colour: u32) {
        let top_left = Vec2::new(a.x.min(b.x) - 1, a.y.min(b.y) - 1);
        let size = Extent2::new((a.x - b.x).abs() + 2, (a.y - b.y).abs() + 2);
        self.draw_rect(top_left, size, colour);
    }

    /// Draw an arrowhead at `b`, pointing away from `a`.
    fn draw_arrowhead(&mut self, a: Vec2<i32>, b: Vec2<i32>, colour: u32) {
        // unit vector from b back towards a
        let diff = Vec2::new((a.x - b.x).signum(), (a.y - b.y).signum());
        let mut curr = b;
        for i in 0..3 {
            let perp = Vec2::new(i * diff.y, i * diff.x);
            self.draw_line(curr + perp, curr - perp, colour);
            curr = curr + diff;
        }
    }

    /// Draw text centered on a point.
    fn draw_text_centered(
        &mut self,
        text: &str,
        center: Vec2<i32>,
        colour: u32,
        small: bool,
        shadow: bool,
    ) {
        let size = text_size(&*self, text, small);
        let top_left = Vec2::new(center.x - size.w / 2, center.y - size.h / 2);
        self.draw_text(text, top_left, colour, small, shadow);
    }

    /// Draw an already-formatted stack size in the bottom-right corner of the
    /// icon centered on `center`.
    fn draw_stack_size(&mut self, text: &str, center: Vec2<i32>, small: bool) {
        let size = text_size(&*self, text, small);
        let text_center = Vec2::new(
            center.x + (ICON_WIDTH - size.w) / 2,
            center.y + (ICON_WIDTH - size.h) / 2,
        );
        self.draw_text_centered(text, text_center, colour::WHITE, small, true);
    }

    /// Draw short additional info in the top-left corner of the icon centered
    /// on `center`.
    fn draw_additional_info(&mut self, text: &str, center: Vec2<i32>, small: bool) {
        let size = text_size(&*self, text, small);
        let text_center = Vec2::new(
            center.x + (size.w - ICON_WIDTH) / 2,
            center.y + (size.h - ICON_WIDTH) / 2,
        );
        self.draw_text_centered(text, text_center, colour::YELLOW, small, true);
    }

    fn draw_texture_centered(&mut self, region: TextureRegion, center: Vec2<i32>) {
        self.draw_texture(region, region.top_left_centered(center));
    }

    fn draw_slot(&mut self, center: Vec2<i32>) {
        self.draw_texture_centered(TextureRegion::SLOT, center);
    }

    fn draw_big_slot(&mut self, center: Vec2<i32>) {
        self.draw_texture_centered(TextureRegion::BIG_SLOT, center);
    }

    fn draw_raised_slot(&mut self, center: Vec2<i32>) {
        self.draw_texture_centered(TextureRegion::RAISED_SLOT, center);
    }

    fn draw_item_centered(&mut self, item_id: &str, damage: i32, center: Vec2<i32>) {
        self.draw_item_icon(item_id, damage, icon_top_left(center));
    }

    fn draw_fluid_centered(&mut self, fluid_id: &str, center: Vec2<i32>) {
        self.draw_fluid_icon(fluid_id, icon_top_left(center));
    }

    /// Fill an icon-sized square centered on `center`. Usually given a
    /// semi-transparent colour.
    fn draw_overlay(&mut self, center: Vec2<i32>, colour: u32) {
        self.draw_rect(
            icon_top_left(center),
            Extent2::new(ICON_WIDTH, ICON_WIDTH),
            colour,
        );
    }
}

impl<C: Canvas + ?Sized> CanvasExt for C {}


fn icon_top_left(center: Vec2<i32>) -> Vec2<i32> {
    Vec2::new(center.x - ICON_WIDTH / 2, center.y - ICON_WIDTH / 2)
}


#[cfg(test)]
use crate::recording::{RecordingCanvas, DrawCommand};

#[test]
fn test_draw_line_is_thick_rect() {
    let mut canvas = RecordingCanvas::new();
    canvas.draw_line(Vec2::new(10, 5), Vec2::new(2, 5), colour::BLACK);
    assert_eq!(
        canvas.commands(),
        &[DrawCommand::Rect {
            top_left: Vec2::new(1, 4),
            size: Extent2::new(10, 2),
            colour: colour::BLACK,
        }],
    );
}

#[test]
fn test_arrowhead_steps_back_from_head() {
    let mut canvas = RecordingCanvas::new();
    canvas.draw_arrowhead(Vec2::new(0, 0), Vec2::new(10, 0), colour::RED);
    let rects = canvas.rects();
    assert_eq!(rects.len(), 3);
    // widest bar is furthest from the head
    assert_eq!(rects[0].0, Vec2::new(9, -1));
    assert_eq!(rects[2].0, Vec2::new(7, -3));
    assert_eq!(rects[2].1, Extent2::new(2, 6));
}

#[test]
fn test_tooltip_position_clamps_to_screen() {
    let display = Extent2::new(200, 100);
    let size = Extent2::new(50, 20);
    assert_eq!(tooltip_position(size, Vec2::new(20, 40), display), Vec2::new(32, 28));
    // flips to the left of the cursor near the right edge
    assert_eq!(tooltip_position(size, Vec2::new(180, 40), display), Vec2::new(118, 28));
    // pulled up from the bottom and kept off the top
    assert_eq!(tooltip_position(size, Vec2::new(20, 95), display), Vec2::new(32, 72));
    assert_eq!(tooltip_position(size, Vec2::new(20, 0), display), Vec2::new(32, 8));
}
