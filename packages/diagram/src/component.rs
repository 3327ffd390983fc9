//! Items and fluids, and the content records inserted into diagram slots.

use crate::{
    context::DrawContext,
    effect::{HostEffects, Lookup},
    format::format_int,
    geom::Point,
    interactable::RecipeType,
    tooltip::{Tooltip, TextFormatting},
};
use draw::CanvasExt;
use std::{
    fmt::{self, Formatter, Display},
    sync::Arc,
};


/// Whether a component is an item or a fluid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentType {
    Item,
    Fluid,
}

/// Immutable serialized NBT attached to a component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Nbt(pub Arc<str>);

impl Nbt {
    pub fn new(snbt: impl Into<Arc<str>>) -> Self {
        Nbt(snbt.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemComponent {
    /// Registry name of the item.
    pub id: Arc<str>,
    pub damage: i32,
    pub nbt: Option<Nbt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FluidComponent {
    /// Registry name of the fluid.
    pub id: Arc<str>,
    pub nbt: Option<Nbt>,
}

/// Identity of an item or fluid, ignoring amounts.
///
/// NBT is part of the identity, since it's sometimes what defines an item.
/// Items sort before fluids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    Item(ItemComponent),
    Fluid(FluidComponent),
}

impl ItemComponent {
    pub const DEFAULT_STACK_SIZE: i32 = 1;
}

impl FluidComponent {
    pub const DEFAULT_STACK_SIZE: i32 = 1000;
}

impl Component {
    pub fn item(id: impl Into<Arc<str>>, damage: i32) -> Self {
        Component::Item(ItemComponent { id: id.into(), damage, nbt: None })
    }

    pub fn fluid(id: impl Into<Arc<str>>) -> Self {
        Component::Fluid(FluidComponent { id: id.into(), nbt: None })
    }

    pub fn component_type(&self) -> ComponentType {
        match self {
            Component::Item(_) => ComponentType::Item,
            Component::Fluid(_) => ComponentType::Fluid,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Component::Item(item) => &item.id,
            Component::Fluid(fluid) => &fluid.id,
        }
    }

    pub fn nbt(&self) -> Option<&Nbt> {
        match self {
            Component::Item(item) => item.nbt.as_ref(),
            Component::Fluid(fluid) => fluid.nbt.as_ref(),
        }
    }

    pub fn with_nbt(&self, nbt: Nbt) -> Self {
        let mut copy = self.clone();
        match &mut copy {
            Component::Item(item) => item.nbt = Some(nbt),
            Component::Fluid(fluid) => fluid.nbt = Some(nbt),
        }
        copy
    }

    pub fn without_nbt(&self) -> Self {
        let mut copy = self.clone();
        match &mut copy {
            Component::Item(item) => item.nbt = None,
            Component::Fluid(fluid) => fluid.nbt = None,
        }
        copy
    }

    pub fn default_stack_size(&self) -> i32 {
        match self {
            Component::Item(_) => ItemComponent::DEFAULT_STACK_SIZE,
            Component::Fluid(_) => FluidComponent::DEFAULT_STACK_SIZE,
        }
    }

    /// Description for printing as text.
    pub fn description(&self) -> String {
        match self {
            Component::Item(item) => format!("{} (#{})", item.id, item.damage),
            Component::Fluid(fluid) => fluid.id.to_string(),
        }
    }

    /// Ask the host to show recipes for, or bookmark, this component.
    pub fn interact(&self, recipe_type: RecipeType, effects: &mut HostEffects) {
        match (self, recipe_type) {
            (Component::Item(item), RecipeType::Bookmark) => {
                effects.toggle_bookmark(item.clone());
            }
            // fluids can't be bookmarked
            (Component::Fluid(_), RecipeType::Bookmark) => (),
            (_, recipe_type) => {
                effects.show_recipes(recipe_type, Lookup::Component(self.clone()));
            }
        }
    }

    /// Draw this component's icon centered on `pos`.
    pub fn draw(&self, ctx: &mut DrawContext, pos: Point) {
        match self {
            Component::Item(item) => ctx.canvas.draw_item_centered(&item.id, item.damage, pos),
            Component::Fluid(fluid) => ctx.canvas.draw_fluid_centered(&fluid.id, pos),
        }
    }
}

impl Display for Component {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.description())
    }
}


/// NBT strings are split into lines of this length in tooltips.
const NBT_LINE_LEN: usize = 64;

/// A component with optional display information attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayComponent {
    pub component: Component,
    pub stack_size: Option<i32>,
    /// Short text drawn on top of the icon.
    pub additional_info: Option<String>,
    pub additional_tooltip: Tooltip,
}

impl DisplayComponent {
    pub fn new(component: Component) -> Self {
        DisplayComponent {
            component,
            stack_size: None,
            additional_info: None,
            additional_tooltip: Tooltip::empty(),
        }
    }

    pub fn with_stack_size(mut self, stack_size: i32) -> Self {
        self.stack_size = Some(stack_size);
        self
    }

    pub fn with_additional_info(mut self, info: impl Into<String>) -> Self {
        self.additional_info = Some(info.into());
        self
    }

    pub fn with_additional_tooltip(mut self, tooltip: Tooltip) -> Self {
        self.additional_tooltip = tooltip;
        self
    }

    pub fn component_type(&self) -> ComponentType {
        self.component.component_type()
    }

    /// Tooltip describing the component and its amount. NBT is summarized,
    /// or spelled out while shift is held. With `show_ids`, registry ids are
    /// listed too.
    pub fn description_tooltip(&self, shift: bool, show_ids: bool) -> Tooltip {
        let mut builder = Tooltip::builder()
            .add_text_line(&self.component.description());
        if let Some(stack_size) = self.stack_size {
            builder = builder
                .set_formatting(TextFormatting::new(true, &[]))
                .add_text_line(&format!("Stack size: {}", format_int(stack_size as i64)));
        }
        if show_ids {
            builder = builder.set_formatting(TextFormatting::trivial());
            builder = match &self.component {
                Component::Item(item) => builder
                    .add_text_line(&format!("Item id: {}", item.id))
                    .add_text_line(&format!("Damage: {}", item.damage)),
                Component::Fluid(fluid) => builder
                    .add_text_line(&format!("Fluid id: {}", fluid.id)),
            };
        }
        if let Some(nbt) = self.component.nbt() {
            builder = builder.add_spacing();
            if shift {
                let chars = nbt.as_str().chars().collect::<Vec<char>>();
                builder = builder
                    .set_formatting(TextFormatting::trivial())
                    .add_all_text_lines(chars
                        .chunks(NBT_LINE_LEN)
                        .map(|chunk| chunk.iter().collect::<String>()));
            } else {
                builder = builder
                    .set_formatting(TextFormatting::info())
                    .add_text_line("Has NBT (hold shift to show)");
            }
        }
        builder.build()
    }

    pub fn interact(&self, recipe_type: RecipeType, effects: &mut HostEffects) {
        self.component.interact(recipe_type, effects);
    }

    /// Draw the icon, stack size, and additional info centered on `pos`.
    pub fn draw(&self, ctx: &mut DrawContext, pos: Point) {
        self.component.draw(ctx, pos);
        if let Some(stack_size) = self.stack_size {
            if stack_size != 1 || ctx.config.show_stack_size_one {
                let small = self.component_type() == ComponentType::Fluid;
                ctx.canvas.draw_stack_size(&format_int(stack_size as i64), pos, small);
            }
        }
        if let Some(ref info) = self.additional_info {
            ctx.canvas.draw_additional_info(info, pos, true);
        }
    }
}

impl From<Component> for DisplayComponent {
    fn from(component: Component) -> Self {
        DisplayComponent::new(component)
    }
}


#[test]
fn test_items_sort_before_fluids() {
    let mut components = vec![
        Component::fluid("water"),
        Component::item("minecraft:iron_ingot", 0),
        Component::item("minecraft:gold_ingot", 0),
    ];
    components.sort();
    assert_eq!(components[0], Component::item("minecraft:gold_ingot", 0));
    assert_eq!(components[2], Component::fluid("water"));
}

#[test]
fn test_nbt_is_part_of_identity() {
    let plain = Component::item("minecraft:book", 0);
    let tagged = plain.with_nbt(Nbt::new("{ench:[]}"));
    assert_ne!(plain, tagged);
    assert_eq!(tagged.without_nbt(), plain);
}

#[test]
fn test_fluids_cannot_be_bookmarked() {
    let mut effects = HostEffects::new();
    Component::fluid("lava").interact(RecipeType::Bookmark, &mut effects);
    assert!(effects.is_empty());
    Component::item("minecraft:bucket", 0).interact(RecipeType::Bookmark, &mut effects);
    Component::fluid("lava").interact(RecipeType::Usage, &mut effects);
    assert_eq!(effects.len(), 2);
}

#[test]
fn test_nbt_tooltip_depends_on_shift() {
    let nbt = "x".repeat(100);
    let display = DisplayComponent::new(Component::item("minecraft:book", 0).with_nbt(Nbt::new(nbt)));
    // description, spacing, summary line
    assert_eq!(display.description_tooltip(false, false).lines().len(), 3);
    // description, spacing, two chunks of raw nbt
    assert_eq!(display.description_tooltip(true, false).lines().len(), 4);
}

#[cfg(test)]
fn tooltip_texts(tooltip: &Tooltip) -> Vec<String> {
    use crate::tooltip::TooltipElement;

    tooltip.lines().iter()
        .flat_map(|line| line.elements.iter())
        .filter_map(|element| match element {
            TooltipElement::Text(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_ids_shown_when_enabled() {
    let item = DisplayComponent::new(Component::item("minecraft:wool", 14)).with_stack_size(3);
    let hidden = tooltip_texts(&item.description_tooltip(false, false));
    assert_eq!(hidden, vec!["minecraft:wool (#14)", "Stack size: 3"]);

    let shown = tooltip_texts(&item.description_tooltip(false, true));
    assert_eq!(&shown[2..], &["Item id: minecraft:wool", "Damage: 14"]);

    let fluid = DisplayComponent::new(Component::fluid("lava"));
    assert_eq!(tooltip_texts(&fluid.description_tooltip(false, false)), vec!["lava"]);
    assert_eq!(tooltip_texts(&fluid.description_tooltip(false, true)), vec!["lava", "Fluid id: lava"]);
}
