//! Single slots which content can be inserted into.

use crate::{
    context::DrawContext,
    geom::{Point, Dimension, square, centered_max_dimension},
    grid::SLOT_WIDTH,
    interactable::{Drawable, BoundedDrawable, Interactable},
    tooltip::Tooltip,
};
use draw::{
    CanvasExt,
    ICON_WIDTH,
    colour,
};
use std::{
    fmt::{self, Formatter, Debug},
    sync::Arc,
};


/// Draws something centered on a point.
pub type DrawFn = Arc<dyn Fn(&mut DrawContext, Point) + Send + Sync>;

/// The standard slot background.
pub fn default_draw_fn() -> DrawFn {
    Arc::new(|ctx, pos| ctx.canvas.draw_slot(pos))
}

/// A fixed-size interactive cell.
///
/// The hitbox is always icon-sized, whatever the slot width; the width only
/// matters for spacing slots within a group.
#[derive(Clone)]
pub struct Slot {
    position: Point,
    slot_width: i32,
    tooltip: Tooltip,
    draw_fn: DrawFn,
}

impl Slot {
    pub fn builder(position: Point) -> SlotBuilder {
        SlotBuilder {
            position,
            slot_width: SLOT_WIDTH,
            tooltip: Tooltip::empty(),
            draw_fn: default_draw_fn(),
        }
    }

    /// Builder initialized to a copy of this slot.
    pub fn to_builder(&self) -> SlotBuilder {
        SlotBuilder {
            position: self.position,
            slot_width: self.slot_width,
            tooltip: self.tooltip.clone(),
            draw_fn: Arc::clone(&self.draw_fn),
        }
    }

    pub fn slot_width(&self) -> i32 {
        self.slot_width
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }
}

impl Debug for Slot {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Slot")
            .field("position", &self.position)
            .field("slot_width", &self.slot_width)
            .field("tooltip", &self.tooltip)
            .finish_non_exhaustive()
    }
}

impl Drawable for Slot {
    fn max_dimension(&self) -> Dimension {
        centered_max_dimension(self.position, self.dimension())
    }

    fn draw(&self, ctx: &mut DrawContext) {
        (self.draw_fn)(ctx, self.position);
    }
}

impl BoundedDrawable for Slot {
    fn position(&self) -> Point {
        self.position
    }

    fn dimension(&self) -> Dimension {
        square(ICON_WIDTH)
    }
}

impl Interactable for Slot {
    fn draw_overlay(&self, ctx: &mut DrawContext) {
        ctx.canvas.draw_overlay(self.position, colour::OVERLAY_WHITE);
    }

    fn draw_tooltip(&self, ctx: &mut DrawContext, mouse: Point) {
        self.tooltip.draw(ctx, mouse);
    }
}


#[derive(Clone)]
pub struct SlotBuilder {
    position: Point,
    slot_width: i32,
    tooltip: Tooltip,
    draw_fn: DrawFn,
}

impl SlotBuilder {
    pub fn set_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn set_slot_width(mut self, slot_width: i32) -> Self {
        self.slot_width = slot_width;
        self
    }

    pub fn set_tooltip(mut self, tooltip: Tooltip) -> Self {
        self.tooltip = tooltip;
        self
    }

    pub fn set_draw_fn<F>(self, f: F) -> Self
    where
        F: Fn(&mut DrawContext, Point) + Send + Sync + 'static,
    {
        self.set_shared_draw_fn(Arc::new(f))
    }

    pub fn set_shared_draw_fn(mut self, draw_fn: DrawFn) -> Self {
        self.draw_fn = draw_fn;
        self
    }

    pub fn build(self) -> Slot {
        Slot {
            position: self.position,
            slot_width: self.slot_width,
            tooltip: self.tooltip,
            draw_fn: self.draw_fn,
        }
    }
}


#[cfg(test)]
use crate::{
    config::EngineConfig,
    context::Modifiers,
    geom::point,
    state::DiagramState,
};
#[cfg(test)]
use draw::{recording::RecordingCanvas, TextureRegion};

#[test]
fn test_slot_draws_background_at_position() {
    let slot = Slot::builder(point(11, 11)).build();
    let mut canvas = RecordingCanvas::new();
    let state = DiagramState::new();
    let config = EngineConfig::default();
    let mut ctx = DrawContext::new(&mut canvas, &state, &config, Modifiers::default());
    slot.draw(&mut ctx);
    assert_eq!(canvas.textures(TextureRegion::SLOT), vec![point(2, 2)]);
}

#[test]
fn test_to_builder_keeps_tooltip() {
    let slot = Slot::builder(point(0, 0))
        .set_tooltip(Tooltip::create("input"))
        .set_slot_width(26)
        .build();
    let moved = slot.to_builder().set_position(point(40, 40)).build();
    assert_eq!(moved.position(), point(40, 40));
    assert_eq!(moved.tooltip(), slot.tooltip());
    assert_eq!(moved.slot_width(), 26);
    assert!(moved.check_bounding_box(point(32, 32)));
    assert!(!moved.check_bounding_box(point(31, 40)));
}
