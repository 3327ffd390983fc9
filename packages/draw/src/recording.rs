//! A canvas that just remembers what it was asked to draw.
//!
//! Used by tests, and by the demo binary to render pages without a window.

use crate::{
    Canvas,
    FontMetrics,
    ScissorRect,
    TextureRegion,
};
use vek::*;


/// Fixed advance used by `MonospaceMetrics::default`, close to the average
/// glyph advance of the vanilla font.
pub const DEFAULT_CHAR_WIDTH: i32 = 6;

/// Font metrics where every visible char has the same width.
///
/// Formatting codes (`§` followed by one char) take up no width.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MonospaceMetrics(pub i32);

impl Default for MonospaceMetrics {
    fn default() -> Self {
        MonospaceMetrics(DEFAULT_CHAR_WIDTH)
    }
}

impl FontMetrics for MonospaceMetrics {
    fn string_width(&self, text: &str) -> i32 {
        let mut visible = 0;
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '§' {
                chars.next();
            } else {
                visible += 1;
            }
        }
        visible * self.0
    }
}


/// Single recorded canvas operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Rect {
        top_left: Vec2<i32>,
        size: Extent2<i32>,
        colour: u32,
    },
    Text {
        text: String,
        top_left: Vec2<i32>,
        colour: u32,
        small: bool,
        shadow: bool,
    },
    ItemIcon {
        item_id: String,
        damage: i32,
        top_left: Vec2<i32>,
    },
    FluidIcon {
        fluid_id: String,
        top_left: Vec2<i32>,
    },
    Texture {
        region: TextureRegion,
        top_left: Vec2<i32>,
    },
    TooltipBox {
        top_left: Vec2<i32>,
        size: Extent2<i32>,
    },
    PushViewport {
        translate: Vec2<i32>,
        scissor: ScissorRect,
    },
    PopViewport,
}

/// Canvas which records commands instead of drawing them.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    metrics: MonospaceMetrics,
    display_size: Extent2<i32>,
    commands: Vec<DrawCommand>,
    viewport_depth: usize,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::with_display_size(Extent2::new(427, 240))
    }

    pub fn with_display_size(display_size: Extent2<i32>) -> Self {
        RecordingCanvas {
            metrics: MonospaceMetrics::default(),
            display_size,
            commands: Vec::new(),
            viewport_depth: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of viewports currently pushed.
    pub fn viewport_depth(&self) -> usize {
        self.viewport_depth
    }

    /// All rects drawn, as `(top_left, size, colour)`.
    pub fn rects(&self) -> Vec<(Vec2<i32>, Extent2<i32>, u32)> {
        self.commands.iter()
            .filter_map(|command| match command {
                &DrawCommand::Rect { top_left, size, colour } => Some((top_left, size, colour)),
                _ => None,
            })
            .collect()
    }

    /// All strings drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands.iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Top-left corners of all textures drawn from the given region.
    pub fn textures(&self, region: TextureRegion) -> Vec<Vec2<i32>> {
        self.commands.iter()
            .filter_map(|command| match command {
                &DrawCommand::Texture { region: r, top_left } if r == region => Some(top_left),
                _ => None,
            })
            .collect()
    }

    /// Number of item and fluid icons drawn.
    pub fn icon_count(&self) -> usize {
        self.commands.iter()
            .filter(|command| matches!(
                command,
                DrawCommand::ItemIcon { .. } | DrawCommand::FluidIcon { .. }
            ))
            .count()
    }
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl FontMetrics for RecordingCanvas {
    fn string_width(&self, text: &str) -> i32 {
        self.metrics.string_width(text)
    }
}

impl Canvas for RecordingCanvas {
    fn display_size(&self) -> Extent2<i32> {
        self.display_size
    }

    fn draw_rect(&mut self, top_left: Vec2<i32>, size: Extent2<i32>, colour: u32) {
        self.commands.push(DrawCommand::Rect { top_left, size, colour });
    }

    fn draw_text(
        &mut self,
        text: &str,
        top_left: Vec2<i32>,
        colour: u32,
        small: bool,
        shadow: bool,
    ) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            top_left,
            colour,
            small,
            shadow,
        });
    }

    fn draw_item_icon(&mut self, item_id: &str, damage: i32, top_left: Vec2<i32>) {
        self.commands.push(DrawCommand::ItemIcon {
            item_id: item_id.to_owned(),
            damage,
            top_left,
        });
    }

    fn draw_fluid_icon(&mut self, fluid_id: &str, top_left: Vec2<i32>) {
        self.commands.push(DrawCommand::FluidIcon {
            fluid_id: fluid_id.to_owned(),
            top_left,
        });
    }

    fn draw_texture(&mut self, region: TextureRegion, top_left: Vec2<i32>) {
        self.commands.push(DrawCommand::Texture { region, top_left });
    }

    fn draw_tooltip_box(&mut self, top_left: Vec2<i32>, size: Extent2<i32>) {
        self.commands.push(DrawCommand::TooltipBox { top_left, size });
    }

    fn push_viewport(&mut self, translate: Vec2<i32>, scissor: ScissorRect) {
        self.viewport_depth += 1;
        self.commands.push(DrawCommand::PushViewport { translate, scissor });
    }

    fn pop_viewport(&mut self) {
        if self.viewport_depth == 0 {
            warn!("pop_viewport called with no viewport pushed");
            return;
        }
        self.viewport_depth -= 1;
        self.commands.push(DrawCommand::PopViewport);
    }
}


#[test]
fn test_formatting_codes_have_no_width() {
    let metrics = MonospaceMetrics::default();
    assert_eq!(metrics.string_width("abc"), 18);
    assert_eq!(metrics.string_width("§eabc§r"), 18);
}

#[test]
fn test_with_viewport_balances() {
    let mut canvas = RecordingCanvas::new();
    let scissor = ScissorRect {
        top_left: Vec2::new(4, 31),
        size: Extent2::new(158, 130),
    };
    let depth_inside = crate::with_viewport(
        &mut canvas,
        Vec2::new(0, -10),
        scissor,
        |canvas| canvas.viewport_depth(),
    );
    assert_eq!(depth_inside, 1);
    assert_eq!(canvas.viewport_depth(), 0);
    assert_eq!(canvas.commands().last(), Some(&DrawCommand::PopViewport));
}

#[test]
fn test_with_viewport_pops_on_unwind() {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    let mut canvas = RecordingCanvas::new();
    let scissor = ScissorRect {
        top_left: Vec2::new(4, 31),
        size: Extent2::new(158, 130),
    };
    let result = catch_unwind(AssertUnwindSafe(|| {
        crate::with_viewport(&mut canvas, Vec2::zero(), scissor, |canvas| {
            canvas.draw_rect(Vec2::new(0, 0), Extent2::new(2, 2), 0xFF000000);
            panic!("draw failed");
        })
    }));
    assert!(result.is_err());
    assert_eq!(canvas.viewport_depth(), 0);
    assert_eq!(canvas.commands().last(), Some(&DrawCommand::PopViewport));
}
