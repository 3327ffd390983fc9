//! Viewport scrolling and the scrollbar.

use crate::{
    config::EngineConfig,
    context::Modifiers,
    geom::{Point, Vector, Dimension, point, dimension},
    state::ScrollDirection,
};
use draw::{
    Canvas,
    ScissorRect,
    colour,
};


/// Pixels of the host GUI above the viewport.
pub const TOP_MARGIN: i32 = 31;
/// Pixels of the host GUI below the viewport.
pub const BOTTOM_MARGIN: i32 = 5;
/// Pixels of the host GUI on either side of the viewport.
pub const SIDE_MARGIN: i32 = 4;

/// Extra scrollable height, so the bottom row is never clipped.
pub const VERTICAL_PADDING: i32 = 2;
/// Leeway in all four directions when checking if the mouse is on the
/// scrollbar.
pub const MOUSEOVER_PADDING: i32 = 2;
pub const SCROLLBAR_WIDTH: i32 = 6;
/// The scrollbar fades out over this many ticks.
pub const FADE_TICKS: i32 = 24;

const FOREGROUND_COLOUR: u32 = 0x145DA0;
const FOREGROUND_SELECTED_COLOUR: u32 = 0x2E8BC0;
const BACKGROUND_COLOUR: u32 = 0xB1D4E0;
const FOREGROUND_OPACITY: i32 = 0xF0;
const BACKGROUND_OPACITY: i32 = 0x90;


/// Mouse button, as far as the scrollbar cares.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
}

impl MouseButton {
    /// From a host button code. Only left (0) and right (1) are known.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(MouseButton::Left),
            1 => Some(MouseButton::Right),
            _ => None,
        }
    }
}


/// Host GUI geometry and input at the time of a callback.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GuiFrame {
    /// Mouse position in absolute screen coordinates.
    pub mouse: Point,
    /// Top-left corner of the host GUI.
    pub gui_origin: Point,
    pub gui_size: Dimension,
    /// Offset of the current page's diagram from the GUI origin.
    pub page_offset: Vector,
    pub modifiers: Modifiers,
}

impl GuiFrame {
    /// Top-left corner of the viewport, in absolute coordinates.
    pub fn viewport_position(&self) -> Point {
        self.gui_origin + point(SIDE_MARGIN, TOP_MARGIN)
    }

    pub fn viewport_dimension(&self) -> Dimension {
        self.gui_size - dimension(2 * SIDE_MARGIN, TOP_MARGIN + BOTTOM_MARGIN)
    }

    /// Whether the mouse is within the viewport, edges included.
    pub fn mouse_in_bounds(&self) -> bool {
        let diff = self.mouse - self.viewport_position();
        let dim = self.viewport_dimension();
        diff.x >= 0 && diff.x <= dim.w && diff.y >= 0 && diff.y <= dim.h
    }

    /// Whether the mouse is over the scrollbar column, with some leeway.
    pub fn mouse_in_scroll_bounds(&self) -> bool {
        let vp_pos = self.viewport_position();
        let vp_dim = self.viewport_dimension();
        let top_left = point(
            vp_pos.x + vp_dim.w + 5 - MOUSEOVER_PADDING,
            vp_pos.y - MOUSEOVER_PADDING,
        );
        let size = dimension(4 + 2 * MOUSEOVER_PADDING, vp_dim.h + 2 * MOUSEOVER_PADDING);
        let diff = self.mouse - top_left;
        diff.x >= 0 && diff.x <= size.w && diff.y >= 0 && diff.y <= size.h
    }
}


/// Scroll state of a diagram group's viewport.
///
/// Nothing but `check_scroll_state` enforces scroll bounds. Everything else
/// is free to scroll out of range, and gets clamped on the next check.
#[derive(Debug, Clone)]
pub struct GuiManager {
    scroll_y: i32,
    scrollbar_selected: bool,
    scrollbar_fade: i32,
}

impl GuiManager {
    pub fn new() -> Self {
        GuiManager {
            scroll_y: 0,
            scrollbar_selected: false,
            // show the scrollbar when a scrollable diagram is first opened
            scrollbar_fade: FADE_TICKS,
        }
    }

    pub fn scroll_y(&self) -> i32 {
        self.scroll_y
    }

    pub fn scrollbar_selected(&self) -> bool {
        self.scrollbar_selected
    }

    pub fn scrollbar_fade(&self) -> i32 {
        self.scrollbar_fade
    }

    pub fn tick(&mut self) {
        if self.scrollbar_fade > 0 {
            self.scrollbar_fade -= 1;
        }
    }

    pub fn scrollable_height(&self, frame: &GuiFrame, diagram: Dimension) -> i32 {
        diagram.h + VERTICAL_PADDING - frame.viewport_dimension().h
    }

    pub fn is_scrollable(&self, frame: &GuiFrame, diagram: Dimension) -> bool {
        self.scrollable_height(frame, diagram) > 0
    }

    /// Fix up scroll state after anything that could invalidate it, such as
    /// resizes, switching diagrams, or scrolling.
    pub fn check_scroll_state(&mut self, frame: &GuiFrame, diagram: Dimension) {
        let scrollable = self.scrollable_height(frame, diagram);
        if scrollable <= 0 {
            self.scroll_y = 0;
            self.scrollbar_selected = false;
            self.scrollbar_fade = 0;
            return;
        }

        if frame.mouse_in_scroll_bounds() {
            self.scrollbar_fade = FADE_TICKS;
        }
        if self.scrollbar_selected {
            self.scroll_to_mouse(frame, diagram);
        }
        self.scroll_y = self.scroll_y.clamp(0, scrollable);
    }

    /// Doesn't check bounds.
    pub fn scroll(&mut self, direction: ScrollDirection, config: &EngineConfig) {
        self.scroll_y += direction.factor() * config.scroll_speed;
        self.scrollbar_fade = FADE_TICKS;
    }

    /// Scroll so the scrollbar cursor is centered on the mouse. Doesn't check
    /// bounds.
    pub fn scroll_to_mouse(&mut self, frame: &GuiFrame, diagram: Dimension) {
        if diagram.h <= 0 {
            return;
        }
        let vp_pos = frame.viewport_position();
        let vp_dim = frame.viewport_dimension();
        let cursor_h = vp_dim.h * vp_dim.h / diagram.h;
        let track_h = vp_dim.h - cursor_h;
        if track_h <= 0 {
            return;
        }
        let mouse_offset = frame.mouse.y - (vp_pos.y + cursor_h / 2);
        self.scroll_y = mouse_offset * self.scrollable_height(frame, diagram) / track_h;
        self.scrollbar_fade = FADE_TICKS;
    }

    /// Handle a click which may be on the scrollbar. Returns whether it was
    /// consumed.
    ///
    /// While the scrollbar is selected it consumes clicks anywhere.
    pub fn mouse_click_scrollbar(
        &mut self,
        button: MouseButton,
        frame: &GuiFrame,
        diagram: Dimension,
    ) -> bool {
        if !self.is_scrollable(frame, diagram) {
            return false;
        }
        if !frame.mouse_in_scroll_bounds() && !self.scrollbar_selected {
            return false;
        }
        match button {
            MouseButton::Left => self.scrollbar_selected = !self.scrollbar_selected,
            MouseButton::Right => self.scroll_to_mouse(frame, diagram),
        }
        true
    }

    /// Mouse position relative to the current page's diagram, accounting for
    /// scroll.
    pub fn relative_mouse(&self, frame: &GuiFrame) -> Point {
        frame.mouse + point(0, self.scroll_y) - (frame.gui_origin + frame.page_offset)
    }

    /// Run `f` with the canvas clipped to the viewport and translated so that
    /// it draws in diagram coordinates.
    pub fn with_viewport<F, R>(&self, canvas: &mut dyn Canvas, frame: &GuiFrame, f: F) -> R
    where
        F: FnOnce(&mut dyn Canvas) -> R,
    {
        let translate = frame.gui_origin + frame.page_offset - point(0, self.scroll_y);
        let scissor = ScissorRect {
            top_left: frame.viewport_position(),
            size: frame.viewport_dimension(),
        };
        draw::with_viewport(canvas, translate, scissor, |canvas| f(canvas))
    }

    /// Draw the scrollbar, if it hasn't faded. Draws in absolute coordinates.
    pub fn draw_scrollbar(&self, canvas: &mut dyn Canvas, frame: &GuiFrame, diagram: Dimension) {
        if self.scrollbar_fade <= 0 || diagram.h <= 0 {
            return;
        }

        // fully opaque for the first half of the fade
        let fade = (2 * self.scrollbar_fade).min(FADE_TICKS);
        let fg_opacity = FOREGROUND_OPACITY * fade / FADE_TICKS;
        let bg_opacity = BACKGROUND_OPACITY * fade / FADE_TICKS;
        let fg_colour = if self.scrollbar_selected {
            FOREGROUND_SELECTED_COLOUR
        } else {
            FOREGROUND_COLOUR
        };
        let fg_colour = colour::with_alpha(fg_colour, fg_opacity as u8);
        let bg_colour = colour::with_alpha(BACKGROUND_COLOUR, bg_opacity as u8);

        let vp_pos = frame.viewport_position();
        let vp_dim = frame.viewport_dimension();
        let x = vp_pos.x + vp_dim.w + 7;
        let y = vp_pos.y;

        // padded so integer division never makes it vanish
        let cursor_h = vp_dim.h * vp_dim.h / diagram.h + 2;
        let cursor_y = y + self.scroll_y * vp_dim.h / diagram.h - 1;
        let cursor_bottom = cursor_y + cursor_h;
        let above_h = cursor_y - y;
        let below_h = y + vp_dim.h - cursor_bottom;

        if above_h > 0 {
            canvas.draw_rect(point(x, y), dimension(2, above_h), bg_colour);
        }
        canvas.draw_rect(point(x - 2, cursor_y), dimension(SCROLLBAR_WIDTH, cursor_h), fg_colour);
        if below_h > 0 {
            canvas.draw_rect(point(x, cursor_bottom), dimension(2, below_h), bg_colour);
        }
    }
}

impl Default for GuiManager {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
use draw::recording::RecordingCanvas;

/// 176x166 GUI at (100, 20), so the viewport is 168x130 at (104, 51).
#[cfg(test)]
fn frame(mouse: Point) -> GuiFrame {
    GuiFrame {
        mouse,
        gui_origin: point(100, 20),
        gui_size: dimension(176, 166),
        page_offset: point(5, 11),
        modifiers: Modifiers::default(),
    }
}

#[test]
fn test_viewport_geometry() {
    let frame = frame(point(104, 51));
    assert_eq!(frame.viewport_position(), point(104, 51));
    assert_eq!(frame.viewport_dimension(), dimension(168, 130));
    assert!(frame.mouse_in_bounds());
    assert!(GuiFrame { mouse: point(272, 181), ..frame }.mouse_in_bounds());
    assert!(!GuiFrame { mouse: point(273, 181), ..frame }.mouse_in_bounds());
    // scrollbar column starts at 104 + 168 + 5 - 2
    assert!(GuiFrame { mouse: point(275, 60), ..frame }.mouse_in_scroll_bounds());
    assert!(!GuiFrame { mouse: point(274, 60), ..frame }.mouse_in_scroll_bounds());
}

#[test]
fn test_scroll_clamps_on_check() {
    let config = EngineConfig::default();
    let frame = frame(point(0, 0));
    let tall = dimension(150, 200);
    let mut gui = GuiManager::new();
    assert_eq!(gui.scrollable_height(&frame, tall), 72);

    for _ in 0..10 {
        gui.scroll(ScrollDirection::Down, &config);
    }
    // unchecked until the next check
    assert_eq!(gui.scroll_y(), 120);
    gui.check_scroll_state(&frame, tall);
    assert_eq!(gui.scroll_y(), 72);

    gui.scroll(ScrollDirection::Up, &config);
    gui.check_scroll_state(&frame, tall);
    assert_eq!(gui.scroll_y(), 60);

    // shrinking the diagram resets scrolling and hides the scrollbar
    gui.check_scroll_state(&frame, dimension(150, 100));
    assert_eq!(gui.scroll_y(), 0);
    assert!(!gui.scrollbar_selected());
    assert_eq!(gui.scrollbar_fade(), 0);
    assert!(!gui.is_scrollable(&frame, dimension(150, 100)));
}

#[test]
fn test_scrollbar_fades() {
    let mut gui = GuiManager::new();
    for _ in 0..FADE_TICKS + 5 {
        gui.tick();
    }
    assert_eq!(gui.scrollbar_fade(), 0);
    gui.scroll(ScrollDirection::Down, &EngineConfig::default());
    assert_eq!(gui.scrollbar_fade(), FADE_TICKS);

    // hovering the scrollbar keeps it visible
    let mut gui = GuiManager::new();
    gui.tick();
    gui.check_scroll_state(&frame(point(276, 100)), dimension(150, 200));
    assert_eq!(gui.scrollbar_fade(), FADE_TICKS);
}

#[test]
fn test_scrollbar_click_and_drag() {
    let tall = dimension(150, 260);
    let mut gui = GuiManager::new();
    // not over the scrollbar
    assert!(!gui.mouse_click_scrollbar(MouseButton::Left, &frame(point(150, 100)), tall));
    // not scrollable
    assert!(!gui.mouse_click_scrollbar(MouseButton::Left, &frame(point(276, 100)), dimension(10, 10)));

    assert!(gui.mouse_click_scrollbar(MouseButton::Left, &frame(point(276, 100)), tall));
    assert!(gui.scrollbar_selected());

    // cursor is 130 * 130 / 260 = 65 tall, so the track is 65 long
    let bottom = frame(point(150, 51 + 32 + 65));
    gui.check_scroll_state(&bottom, tall);
    assert_eq!(gui.scroll_y(), 132);
    let top = frame(point(150, 0));
    gui.check_scroll_state(&top, tall);
    assert_eq!(gui.scroll_y(), 0);

    // selected scrollbar consumes clicks anywhere
    assert!(gui.mouse_click_scrollbar(MouseButton::Left, &top, tall));
    assert!(!gui.scrollbar_selected());
}

#[test]
fn test_relative_mouse_accounts_for_scroll() {
    let config = EngineConfig::default();
    let mut gui = GuiManager::new();
    let frame = frame(point(130, 70));
    assert_eq!(gui.relative_mouse(&frame), point(25, 39));
    gui.scroll(ScrollDirection::Down, &config);
    assert_eq!(gui.relative_mouse(&frame), point(25, 51));
}

#[test]
fn test_with_viewport_pops() {
    let mut canvas = RecordingCanvas::new();
    let gui = GuiManager::new();
    let depth = gui.with_viewport(&mut canvas, &frame(point(0, 0)), |canvas| {
        canvas.draw_rect(point(0, 0), dimension(1, 1), colour::BLACK);
        canvas.display_size().w
    });
    assert_eq!(depth, 427);
    assert_eq!(canvas.viewport_depth(), 0);
    assert_eq!(canvas.commands().len(), 3);
}

#[test]
fn test_draw_scrollbar() {
    let mut canvas = RecordingCanvas::new();
    let frame = frame(point(0, 0));
    let tall = dimension(150, 260);
    let mut gui = GuiManager::new();
    gui.draw_scrollbar(&mut canvas, &frame, tall);
    // at the top, only the cursor and the track below it
    let rects = canvas.rects();
    assert_eq!(rects.len(), 2);
    assert_eq!(rects[0], (point(277, 50), dimension(6, 67), 0xF0145DA0));
    assert_eq!(rects[1].0, point(279, 117));
    assert_eq!(rects[1].2, 0x90B1D4E0);

    for _ in 0..FADE_TICKS {
        gui.tick();
    }
    canvas.clear();
    gui.draw_scrollbar(&mut canvas, &frame, tall);
    assert!(canvas.commands().is_empty());
}
