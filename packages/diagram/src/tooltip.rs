//! Structured tooltips.
//!
//! A tooltip is a list of lines, and each line is a list of elements laid out
//! left to right. Formatting elements apply to every text element after them
//! on the same line.

use crate::{
    component::{Component, DisplayComponent},
    context::DrawContext,
    geom::{Point, point, dimension},
    grid::SLOT_WIDTH,
};
use draw::{
    Canvas,
    CanvasExt,
    FontMetrics,
    TEXT_HEIGHT,
    colour,
    primitives::tooltip_position,
};
use std::collections::BTreeSet;


/// Default vertical space between tooltip lines.
pub const LINE_SPACING: i32 = 2;

/// Default horizontal space between elements of a line.
pub const ELEMENT_SPACING: i32 = 4;


/// Minecraft chat formatting codes.
///
/// Colours are declared before styles, so that iterating a sorted set emits
/// colour codes first. Styles only stick if they come after the colour.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChatFormatting {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
    Obfuscated,
    Bold,
    Strikethrough,
    Underline,
    Italic,
    Reset,
}

impl ChatFormatting {
    pub fn code(self) -> char {
        match self {
            ChatFormatting::Black => '0',
            ChatFormatting::DarkBlue => '1',
            ChatFormatting::DarkGreen => '2',
            ChatFormatting::DarkAqua => '3',
            ChatFormatting::DarkRed => '4',
            ChatFormatting::DarkPurple => '5',
            ChatFormatting::Gold => '6',
            ChatFormatting::Gray => '7',
            ChatFormatting::DarkGray => '8',
            ChatFormatting::Blue => '9',
            ChatFormatting::Green => 'a',
            ChatFormatting::Aqua => 'b',
            ChatFormatting::Red => 'c',
            ChatFormatting::LightPurple => 'd',
            ChatFormatting::Yellow => 'e',
            ChatFormatting::White => 'f',
            ChatFormatting::Obfuscated => 'k',
            ChatFormatting::Bold => 'l',
            ChatFormatting::Strikethrough => 'm',
            ChatFormatting::Underline => 'n',
            ChatFormatting::Italic => 'o',
            ChatFormatting::Reset => 'r',
        }
    }
}


/// Scale and chat formatting applied to tooltip text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TextFormatting {
    pub small: bool,
    pub formatting: BTreeSet<ChatFormatting>,
}

impl TextFormatting {
    pub fn new(small: bool, formatting: &[ChatFormatting]) -> Self {
        TextFormatting {
            small,
            formatting: formatting.iter().copied().collect(),
        }
    }

    pub fn default_formatting() -> Self {
        Self::new(false, &[ChatFormatting::Reset])
    }

    pub fn slot() -> Self {
        Self::new(false, &[ChatFormatting::Aqua])
    }

    pub fn info() -> Self {
        Self::new(false, &[ChatFormatting::Yellow])
    }

    pub fn urgent() -> Self {
        Self::new(false, &[ChatFormatting::Red])
    }

    pub fn trivial() -> Self {
        Self::new(false, &[ChatFormatting::Gray])
    }

    pub fn special() -> Self {
        Self::new(false, &[ChatFormatting::LightPurple])
    }

    /// Prefix `text` with the formatting codes.
    pub fn format(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + self.formatting.len() * 2);
        for code in &self.formatting {
            out.push('§');
            out.push(code.code());
        }
        out.push_str(text);
        out
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TooltipElement {
    /// Empty horizontal space of this many pixels.
    Spacing(i32),
    Text(String),
    /// Icon of a component, drawn in a slot. Unaffected by formatting.
    DisplayComponentIcon(DisplayComponent),
    /// Description of a component, looked up when drawn.
    ComponentDescription(Component),
    /// Formatting for the rest of the line.
    Formatting(TextFormatting),
}

impl TooltipElement {
    fn width<M: FontMetrics + ?Sized>(&self, metrics: &M, formatting: &TextFormatting) -> i32 {
        match self {
            &TooltipElement::Spacing(spacing) => spacing,
            TooltipElement::Text(text) => {
                let w = metrics.string_width(&formatting.format(text));
                if formatting.small { w / 2 } else { w }
            }
            TooltipElement::DisplayComponentIcon(_) => SLOT_WIDTH,
            TooltipElement::ComponentDescription(component) => {
                metrics.string_width(&component.description())
            }
            TooltipElement::Formatting(_) => 0,
        }
    }

    fn height(&self, formatting: &TextFormatting) -> i32 {
        match self {
            TooltipElement::Spacing(_) | TooltipElement::Formatting(_) => 0,
            TooltipElement::Text(_) | TooltipElement::ComponentDescription(_) => {
                if formatting.small { TEXT_HEIGHT / 2 } else { TEXT_HEIGHT }
            }
            TooltipElement::DisplayComponentIcon(_) => SLOT_WIDTH,
        }
    }

    fn draw(&self, ctx: &mut DrawContext, top_left: Point, formatting: &TextFormatting) {
        match self {
            TooltipElement::Text(text) => {
                ctx.canvas.draw_text(
                    &formatting.format(text),
                    top_left,
                    colour::WHITE,
                    formatting.small,
                    true,
                );
            }
            TooltipElement::DisplayComponentIcon(display) => {
                let center = top_left + point(SLOT_WIDTH / 2, SLOT_WIDTH / 2);
                ctx.canvas.draw_slot(center);
                display.draw(ctx, center);
            }
            TooltipElement::ComponentDescription(component) => {
                ctx.canvas.draw_text(
                    &formatting.format(&component.description()),
                    top_left,
                    colour::WHITE,
                    formatting.small,
                    true,
                );
            }
            TooltipElement::Spacing(_) | TooltipElement::Formatting(_) => (),
        }
    }
}


/// Single line of a tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TooltipLine {
    pub elements: Vec<TooltipElement>,
    /// Extra space added below the line.
    pub additional_spacing: i32,
}

impl TooltipLine {
    pub fn spacing(additional_spacing: i32) -> Self {
        TooltipLine { elements: Vec::new(), additional_spacing }
    }

    /// Visit each non-formatting element along with the formatting in effect
    /// for it.
    fn for_each_element<'s, F>(&'s self, mut f: F)
    where
        F: FnMut(&'s TooltipElement, &TextFormatting),
    {
        let mut curr = TextFormatting::default_formatting();
        for element in &self.elements {
            if let TooltipElement::Formatting(formatting) = element {
                curr = formatting.clone();
            } else {
                f(element, &curr);
            }
        }
    }

    pub fn width<M: FontMetrics + ?Sized>(&self, metrics: &M) -> i32 {
        let mut width = 0;
        let mut first = true;
        self.for_each_element(|element, formatting| {
            if !first {
                width += ELEMENT_SPACING;
            }
            first = false;
            width += element.width(metrics, formatting);
        });
        width
    }

    pub fn height(&self) -> i32 {
        let mut height = 0;
        self.for_each_element(|element, formatting| {
            height = height.max(element.height(formatting));
        });
        height + self.additional_spacing
    }

    /// Draw with `top_left` as the top-left corner of the line.
    pub fn draw(&self, ctx: &mut DrawContext, top_left: Point) {
        let line_height = self.height();
        let mut placed = Vec::new();
        {
            let metrics = &*ctx.canvas;
            let mut x = top_left.x;
            self.for_each_element(|element, formatting| {
                let y = top_left.y + (line_height - element.height(formatting)) / 2;
                placed.push((element, formatting.clone(), point(x, y)));
                x += ELEMENT_SPACING + element.width(metrics, formatting);
            });
        }
        for (element, formatting, pos) in placed {
            element.draw(ctx, pos, &formatting);
        }
    }
}


/// A tooltip. May be empty, in which case nothing is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tooltip {
    lines: Vec<TooltipLine>,
}

impl Tooltip {
    pub fn empty() -> Self {
        Tooltip::default()
    }

    pub fn builder() -> TooltipBuilder {
        TooltipBuilder::new()
    }

    /// Tooltip of text lines, split on `'\n'`.
    pub fn create(text: &str) -> Self {
        Self::builder().add_text_line(text).build()
    }

    /// Tooltip of formatted text lines, split on `'\n'`.
    pub fn create_formatted(text: &str, formatting: TextFormatting) -> Self {
        Self::builder().set_formatting(formatting).add_text_line(text).build()
    }

    /// Join non-empty tooltips, with spacing between each.
    pub fn concat<'a, I>(tooltips: I) -> Self
    where
        I: IntoIterator<Item = &'a Tooltip>,
    {
        let mut builder = Self::builder();
        let mut first = true;
        for tooltip in tooltips {
            if tooltip.is_empty() {
                continue;
            }
            if !first {
                builder = builder.add_spacing();
            }
            first = false;
            builder = builder.add_all_lines(tooltip.lines.iter().cloned());
        }
        builder.build()
    }

    pub fn lines(&self) -> &[TooltipLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn width<M: FontMetrics + ?Sized>(&self, metrics: &M) -> i32 {
        self.lines.iter().map(|line| line.width(metrics)).max().unwrap_or(0)
    }

    pub fn height(&self) -> i32 {
        if self.lines.is_empty() {
            return 0;
        }
        LINE_SPACING * (self.lines.len() as i32 - 1)
            + self.lines.iter().map(TooltipLine::height).sum::<i32>()
    }

    /// Draw next to the absolute mouse position, kept on screen.
    ///
    /// Unlike most drawing, tooltips are drawn in absolute screen
    /// coordinates, which makes it easy to keep them within the screen.
    pub fn draw(&self, ctx: &mut DrawContext, mouse: Point) {
        if self.is_empty() {
            return;
        }
        let size = dimension(self.width(&*ctx.canvas), self.height());
        let top_left = tooltip_position(size, mouse, ctx.canvas.display_size());
        ctx.canvas.draw_tooltip_box(top_left - point(4, 4), size + dimension(8, 8));
        let mut y = top_left.y;
        for line in &self.lines {
            line.draw(ctx, point(top_left.x, y));
            y += LINE_SPACING + line.height();
        }
    }
}


/// Builds a tooltip line by line, formatting text lines with the current
/// formatting.
#[derive(Debug, Clone)]
pub struct TooltipBuilder {
    lines: Vec<TooltipLine>,
    formatting: TextFormatting,
}

impl TooltipBuilder {
    pub fn new() -> Self {
        TooltipBuilder {
            lines: Vec::new(),
            formatting: TextFormatting::default_formatting(),
        }
    }

    /// Add a line as-is, ignoring the current formatting.
    pub fn add_line(mut self, line: TooltipLine) -> Self {
        self.lines.push(line);
        self
    }

    pub fn add_all_lines<I>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = TooltipLine>,
    {
        self.lines.extend(lines);
        self
    }

    /// Add the default amount of vertical spacing.
    pub fn add_spacing(self) -> Self {
        self.add_spacing_of(LINE_SPACING)
    }

    pub fn add_spacing_of(self, spacing: i32) -> Self {
        self.add_line(TooltipLine::spacing(spacing))
    }

    /// Add text, split into a line per `'\n'`.
    pub fn add_text_line(self, text: &str) -> Self {
        self.add_all_text_lines(text.split('\n'))
    }

    pub fn add_all_text_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            let elements = vec![
                TooltipElement::Formatting(self.formatting.clone()),
                TooltipElement::Text(line.as_ref().to_owned()),
            ];
            self.lines.push(TooltipLine { elements, additional_spacing: 0 });
        }
        self
    }

    /// Add a line with the component's icon (including stack size) and its
    /// description.
    pub fn add_display_component(mut self, display: DisplayComponent) -> Self {
        let component = display.component.clone();
        let elements = vec![
            TooltipElement::Formatting(self.formatting.clone()),
            TooltipElement::DisplayComponentIcon(display),
            TooltipElement::ComponentDescription(component),
        ];
        self.lines.push(TooltipLine { elements, additional_spacing: 0 });
        self
    }

    pub fn add_all_display_components<I>(mut self, displays: I) -> Self
    where
        I: IntoIterator<Item = DisplayComponent>,
    {
        for display in displays {
            self = self.add_display_component(display);
        }
        self
    }

    /// Add a line with a component's icon and its description.
    pub fn add_component(self, component: Component) -> Self {
        self.add_display_component(DisplayComponent::new(component))
    }

    pub fn add_component_description(mut self, component: Component) -> Self {
        let elements = vec![
            TooltipElement::Formatting(self.formatting.clone()),
            TooltipElement::ComponentDescription(component),
        ];
        self.lines.push(TooltipLine { elements, additional_spacing: 0 });
        self
    }

    /// Format subsequent text lines with the given formatting.
    pub fn set_formatting(mut self, formatting: TextFormatting) -> Self {
        self.formatting = formatting;
        self
    }

    pub fn build(self) -> Tooltip {
        Tooltip { lines: self.lines }
    }
}

impl Default for TooltipBuilder {
    fn default() -> Self {
        Self::new()
    }
}


#[test]
fn test_text_line_splits_on_newline() {
    let tooltip = Tooltip::create("one\ntwo\nthree");
    assert_eq!(tooltip.lines().len(), 3);
    assert_eq!(tooltip.height(), 3 * TEXT_HEIGHT + 2 * LINE_SPACING);
}

#[test]
fn test_concat_skips_empty_and_adds_spacing() {
    let a = Tooltip::create("a");
    let b = Tooltip::create("b");
    let joined = Tooltip::concat([&a, &Tooltip::empty(), &b]);
    assert_eq!(joined.lines().len(), 3);
    assert_eq!(joined.lines()[1], TooltipLine::spacing(LINE_SPACING));
    assert!(Tooltip::concat([&Tooltip::empty()]).is_empty());
}

#[test]
fn test_colours_format_before_styles() {
    let formatting = TextFormatting::new(false, &[ChatFormatting::Bold, ChatFormatting::Red]);
    assert_eq!(formatting.format("hi"), "§c§lhi");
}

#[test]
fn test_line_width_spaces_elements() {
    use draw::recording::MonospaceMetrics;

    let metrics = MonospaceMetrics(6);
    let line = Tooltip::builder()
        .add_component(Component::item("minecraft:stone", 0))
        .build();
    let description_width = 6 * "minecraft:stone (#0)".len() as i32;
    assert_eq!(line.width(&metrics), SLOT_WIDTH + ELEMENT_SPACING + description_width);
    assert_eq!(line.height(), SLOT_WIDTH);

    let small = Tooltip::create_formatted("abcd", TextFormatting::new(true, &[]));
    assert_eq!(small.width(&metrics), 12);
    assert_eq!(small.height(), TEXT_HEIGHT / 2);
}
