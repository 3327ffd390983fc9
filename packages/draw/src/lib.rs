//! Drawing primitives boundary for the diagram engine.
//!
//! The engine never talks to a renderer directly. Everything it draws goes
//! through the `Canvas` trait, which the host implements on top of whatever it
//! really renders with. Coordinates are integer GUI pixels, colours are packed
//! `0xAARRGGBB` integers (see `colour`).

#[macro_use]
extern crate tracing;

pub mod colour;
pub mod texture;
pub mod primitives;
pub mod recording;

pub use self::{
    primitives::CanvasExt,
    texture::TextureRegion,
};

use vek::*;


/// Width and height of an item or fluid icon.
pub const ICON_WIDTH: i32 = 16;

/// Height of a line of normal-size text.
pub const TEXT_HEIGHT: i32 = 8;


/// Text measuring, separated from `Canvas` so labels can be sized when a
/// diagram is built, long before anything is drawn.
pub trait FontMetrics {
    /// Width in pixels of the given string at normal size.
    fn string_width(&self, text: &str) -> i32;
}

/// Rectangle of the screen outside of which drawing is discarded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScissorRect {
    pub top_left: Vec2<i32>,
    pub size: Extent2<i32>,
}

/// The draw-primitives library the engine calls into.
///
/// All positions are top-left corners in the current viewport's space, except
/// where documented otherwise. The convenience helpers in `CanvasExt` take
/// center points and are what most engine code uses.
pub trait Canvas: FontMetrics {
    /// Size of the whole screen, in GUI pixels.
    fn display_size(&self) -> Extent2<i32>;

    /// Fill a rectangle with a colour.
    fn draw_rect(&mut self, top_left: Vec2<i32>, size: Extent2<i32>, colour: u32);

    /// Draw a string. Small text is half scale, and its `top_left` is still
    /// in unscaled coordinates.
    fn draw_text(
        &mut self,
        text: &str,
        top_left: Vec2<i32>,
        colour: u32,
        small: bool,
        shadow: bool,
    );

    /// Draw an item icon, `ICON_WIDTH` square.
    fn draw_item_icon(&mut self, item_id: &str, damage: i32, top_left: Vec2<i32>);

    /// Draw a fluid icon, `ICON_WIDTH` square.
    fn draw_fluid_icon(&mut self, fluid_id: &str, top_left: Vec2<i32>);

    /// Draw a region of the slot texture sheet.
    fn draw_texture(&mut self, region: TextureRegion, top_left: Vec2<i32>);

    /// Draw the standard tooltip background box.
    fn draw_tooltip_box(&mut self, top_left: Vec2<i32>, size: Extent2<i32>);

    /// Begin drawing into a scrolled viewport. Subsequent positions are
    /// offset by `translate` and clipped to `scissor`, which is given in
    /// absolute screen coordinates.
    fn push_viewport(&mut self, translate: Vec2<i32>, scissor: ScissorRect);

    /// Undo the most recent `push_viewport`.
    fn pop_viewport(&mut self);
}


/// Run `f` with a viewport pushed, popping it again afterwards, even if `f`
/// unwinds.
pub fn with_viewport<C, F, R>(
    canvas: &mut C,
    translate: Vec2<i32>,
    scissor: ScissorRect,
    f: F,
) -> R
where
    C: Canvas + ?Sized,
    F: FnOnce(&mut C) -> R,
{
    canvas.push_viewport(translate, scissor);
    let guard = ViewportGuard(canvas);
    f(&mut *guard.0)
}

/// Pops a pushed viewport when dropped.
struct ViewportGuard<'c, C: Canvas + ?Sized>(&'c mut C);

impl<'c, C: Canvas + ?Sized> Drop for ViewportGuard<'c, C> {
    fn drop(&mut self) {
        self.0.pop_viewport();
    }
}
