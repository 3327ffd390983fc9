//! Things drawn on a diagram, and things which can also be moused over and
//! clicked.

use crate::{
    component::DisplayComponent,
    context::DrawContext,
    effect::{HostEffects, Lookup},
    geom::{
        Point,
        Dimension,
        square,
        centered_box_contains,
        centered_max_dimension,
    },
    group_info::DiagramGroupInfo,
    slot::Slot,
    state::DiagramState,
    text::ComponentLabel,
    tooltip::{Tooltip, TextFormatting},
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


/// Which kind of lookup an interaction asks for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecipeType {
    Crafting,
    Usage,
    /// Add or remove a host bookmark. Not a real lookup type.
    Bookmark,
}

impl RecipeType {
    /// The lookup types, without `Bookmark`.
    pub const VALID_TYPES: [RecipeType; 2] = [RecipeType::Crafting, RecipeType::Usage];
}


/// Anything that can be drawn as part of a diagram.
pub trait Drawable: Debug + Send + Sync {
    /// Max x and y coordinate this takes up. Diagram size is computed from
    /// this.
    fn max_dimension(&self) -> Dimension;

    fn draw(&self, ctx: &mut DrawContext);
}

/// A drawable with a well-defined hitbox.
pub trait BoundedDrawable: Drawable {
    /// Center of the drawable.
    fn position(&self) -> Point;

    fn dimension(&self) -> Dimension;
}

/// Something drawn on screen which can be moused over or clicked on.
pub trait Interactable: BoundedDrawable {
    fn interact(
        &self,
        _state: &mut DiagramState,
        _recipe_type: RecipeType,
        _effects: &mut HostEffects,
    ) {}

    /// Called while the mouse is over this.
    fn draw_overlay(&self, _ctx: &mut DrawContext) {}

    /// Draw the tooltip. Unlike other drawing, `mouse` is in absolute screen
    /// coordinates.
    fn draw_tooltip(&self, _ctx: &mut DrawContext, _mouse: Point) {}

    /// Whether the point is inside this interactable's bounding box.
    fn check_bounding_box(&self, target: Point) -> bool {
        centered_box_contains(self.position(), self.dimension(), target)
    }
}


/// Content inserted into a slot. Cycles through its components over time if
/// there are several.
#[derive(Debug, Clone)]
pub struct InteractiveComponentGroup {
    position: Point,
    components: Vec<DisplayComponent>,
    /// Drawn before the component's own tooltip.
    slot_tooltip: Tooltip,
}

impl InteractiveComponentGroup {
    /// Panics if `components` is empty.
    pub fn new(position: Point, components: Vec<DisplayComponent>, slot_tooltip: Tooltip) -> Self {
        assert!(!components.is_empty(), "component group must contain at least one component");
        InteractiveComponentGroup { position, components, slot_tooltip }
    }

    pub fn for_slot(slot: &Slot, components: Vec<DisplayComponent>) -> Self {
        Self::new(slot.position(), components, slot.tooltip().clone())
    }

    pub fn components(&self) -> &[DisplayComponent] {
        &self.components
    }

    pub fn current_index(&self, state: &DiagramState) -> usize {
        state.cycle_index(self.components.len())
    }

    pub fn current_component(&self, state: &DiagramState) -> &DisplayComponent {
        &self.components[self.current_index(state)]
    }

    /// Tooltip describing where we are in the cycle. Lists the components
    /// while shift is held.
    pub fn cycle_tooltip(&self, state: &DiagramState, max_listed: i32, shift: bool) -> Tooltip {
        let len = self.components.len();
        if len <= 1 {
            return Tooltip::empty();
        }
        let index = self.current_index(state) + 1;
        if !shift || max_listed <= 0 {
            let text = if max_listed > 0 {
                format!("Component {} of {} (hold shift to list)", index, len)
            } else {
                format!("Component {} of {}", index, len)
            };
            return Tooltip::create_formatted(&text, TextFormatting::info());
        }

        let listed = len.min(max_listed as usize);
        let mut builder = Tooltip::builder()
            .set_formatting(TextFormatting::info())
            .add_text_line(&format!("Component {} of {}", index, len))
            .add_spacing()
            .add_text_line("Cycles through:")
            .add_all_display_components(self.components[..listed].iter().cloned());
        if listed < len {
            builder = builder.add_text_line(&format!("...and {} more", len - listed));
        }
        builder.build()
    }
}

impl Drawable for InteractiveComponentGroup {
    fn max_dimension(&self) -> Dimension {
        centered_max_dimension(self.position, self.dimension())
    }

    fn draw(&self, ctx: &mut DrawContext) {
        let state = ctx.state;
        self.current_component(state).draw(ctx, self.position);
    }
}

impl BoundedDrawable for InteractiveComponentGroup {
    fn position(&self) -> Point {
        self.position
    }

    fn dimension(&self) -> Dimension {
        square(ICON_WIDTH)
    }
}

impl Interactable for InteractiveComponentGroup {
    fn interact(
        &self,
        state: &mut DiagramState,
        recipe_type: RecipeType,
        effects: &mut HostEffects,
    ) {
        self.current_component(state).interact(recipe_type, effects);
    }

    fn draw_overlay(&self, ctx: &mut DrawContext) {
        ctx.canvas.draw_overlay(self.position, colour::OVERLAY_WHITE);
    }

    fn draw_tooltip(&self, ctx: &mut DrawContext, mouse: Point) {
        let state = ctx.state;
        let shift = ctx.modifiers.shift;
        let component = self.current_component(state);
        let tooltip = Tooltip::concat([
            &component.description_tooltip(shift, ctx.config.show_ids),
            &self.slot_tooltip,
            &component.additional_tooltip,
            &self.cycle_tooltip(state, ctx.config.tooltip_max_cycle_count, shift),
        ]);
        tooltip.draw(ctx, mouse);
    }
}


pub type PointFn = Arc<dyn Fn(&mut DrawContext, Point) + Send + Sync>;
pub type InteractFn = Arc<dyn Fn(&mut DiagramState, RecipeType, &mut HostEffects) + Send + Sync>;

/// Arbitrary interactable wrapped around a bounded drawable. Flexible, but
/// takes some setup.
#[derive(Clone)]
pub struct CustomInteractable {
    drawable: Arc<dyn BoundedDrawable>,
    tooltip: Tooltip,
    interact: InteractFn,
    /// Called with our position before the drawable is drawn, e.g. to draw a
    /// slot under it.
    draw_background: PointFn,
    /// Called with our position while moused over.
    draw_overlay: PointFn,
}

impl CustomInteractable {
    pub fn builder<D: BoundedDrawable + 'static>(drawable: D) -> CustomInteractableBuilder {
        CustomInteractableBuilder {
            drawable: Arc::new(drawable),
            tooltip: Tooltip::empty(),
            interact: Arc::new(|_, _, _| ()),
            draw_background: Arc::new(|_, _| ()),
            draw_overlay: Arc::new(|_, _| ()),
        }
    }

    pub fn drawable(&self) -> &Arc<dyn BoundedDrawable> {
        &self.drawable
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }
}

impl Debug for CustomInteractable {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("CustomInteractable")
            .field("drawable", &self.drawable)
            .field("tooltip", &self.tooltip)
            .finish_non_exhaustive()
    }
}

impl Drawable for CustomInteractable {
    fn max_dimension(&self) -> Dimension {
        centered_max_dimension(self.position(), self.dimension())
    }

    fn draw(&self, ctx: &mut DrawContext) {
        (self.draw_background)(ctx, self.position());
        self.drawable.draw(ctx);
    }
}

impl BoundedDrawable for CustomInteractable {
    fn position(&self) -> Point {
        self.drawable.position()
    }

    fn dimension(&self) -> Dimension {
        self.drawable.dimension()
    }
}

impl Interactable for CustomInteractable {
    fn interact(
        &self,
        state: &mut DiagramState,
        recipe_type: RecipeType,
        effects: &mut HostEffects,
    ) {
        (self.interact)(state, recipe_type, effects);
    }

    fn draw_overlay(&self, ctx: &mut DrawContext) {
        (self.draw_overlay)(ctx, self.position());
    }

    fn draw_tooltip(&self, ctx: &mut DrawContext, mouse: Point) {
        self.tooltip.draw(ctx, mouse);
    }
}

pub struct CustomInteractableBuilder {
    drawable: Arc<dyn BoundedDrawable>,
    tooltip: Tooltip,
    interact: InteractFn,
    draw_background: PointFn,
    draw_overlay: PointFn,
}

impl CustomInteractableBuilder {
    pub fn tooltip(mut self, tooltip: Tooltip) -> Self {
        self.tooltip = tooltip;
        self
    }

    pub fn interact<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut DiagramState, RecipeType, &mut HostEffects) + Send + Sync + 'static,
    {
        self.interact = Arc::new(f);
        self
    }

    /// Interacting shows the host's handlers for the given id.
    ///
    /// A crafting click lists usages and a usage click lists crafting, which
    /// is what makes a left click on a group's button list its diagrams.
    pub fn interact_id(self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.interact(move |_, recipe_type, effects| match recipe_type {
            RecipeType::Crafting => {
                effects.show_recipes(RecipeType::Usage, Lookup::Id(id.clone()));
            }
            RecipeType::Usage => {
                effects.show_recipes(RecipeType::Crafting, Lookup::Id(id.clone()));
            }
            RecipeType::Bookmark => (),
        })
    }

    pub fn draw_background<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut DrawContext, Point) + Send + Sync + 'static,
    {
        self.draw_background = Arc::new(f);
        self
    }

    pub fn draw_overlay<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut DrawContext, Point) + Send + Sync + 'static,
    {
        self.draw_overlay = Arc::new(f);
        self
    }

    pub fn build(self) -> CustomInteractable {
        CustomInteractable {
            drawable: self.drawable,
            tooltip: self.tooltip,
            interact: self.interact,
            draw_background: self.draw_background,
            draw_overlay: self.draw_overlay,
        }
    }
}


/// Button showing a group's icon, which opens all of the group's diagrams.
pub fn all_diagrams_button(info: &DiagramGroupInfo, pos: Point) -> CustomInteractable {
    CustomInteractable::builder(ComponentLabel::new(info.icon.clone(), pos))
        .tooltip(Tooltip::create_formatted("Show all diagrams", TextFormatting::special()))
        .interact_id(info.group_id.clone())
        .draw_background(|ctx, pos| ctx.canvas.draw_raised_slot(pos))
        .draw_overlay(|ctx, pos| ctx.canvas.draw_overlay(pos, colour::OVERLAY_BLUE))
        .build()
}


#[cfg(test)]
use crate::{
    component::Component,
    effect::HostEffect,
    geom::point,
};

#[test]
#[should_panic(expected = "at least one component")]
fn test_empty_component_group_panics() {
    InteractiveComponentGroup::new(point(0, 0), Vec::new(), Tooltip::empty());
}

#[test]
fn test_component_group_cycles() {
    let group = InteractiveComponentGroup::new(
        point(11, 11),
        vec![
            Component::item("a", 0).into(),
            Component::item("b", 0).into(),
            Component::item("c", 0).into(),
        ],
        Tooltip::empty(),
    );
    let mut state = DiagramState::new();
    let mut seen = Vec::new();
    for _ in 0..4 {
        seen.push(group.current_component(&state).component.id().to_owned());
        state.scroll(crate::state::ScrollDirection::Down);
    }
    assert_eq!(seen, ["a", "b", "c", "a"]);
}

#[test]
fn test_cycle_tooltip_lists_while_shift_held() {
    let components = (0..10)
        .map(|i| DisplayComponent::new(Component::item(format!("item{}", i), 0)))
        .collect::<Vec<_>>();
    let group = InteractiveComponentGroup::new(point(0, 0), components, Tooltip::empty());
    let state = DiagramState::new();
    assert_eq!(group.cycle_tooltip(&state, 8, false).lines().len(), 1);
    // index, spacing, header, 8 components, overflow
    assert_eq!(group.cycle_tooltip(&state, 8, true).lines().len(), 12);
    assert_eq!(group.cycle_tooltip(&state, 0, true).lines().len(), 1);
}

#[test]
fn test_all_diagrams_button_swaps_lookup() {
    let info = DiagramGroupInfo::builder(
        "Fluid containers",
        "neicustomdiagram.diagramgroup.fluidcontainers",
        Component::item("minecraft:bucket", 0),
    ).build();
    let button = all_diagrams_button(&info, point(11, 11));
    let mut state = DiagramState::new();
    let mut effects = HostEffects::new();
    button.interact(&mut state, RecipeType::Crafting, &mut effects);
    assert_eq!(
        effects.drain().collect::<Vec<_>>(),
        vec![HostEffect::ShowRecipes {
            recipe_type: RecipeType::Usage,
            lookup: Lookup::Id("neicustomdiagram.diagramgroup.fluidcontainers".to_owned()),
        }],
    );
    assert!(button.check_bounding_box(point(4, 4)));
    assert!(!button.check_bounding_box(point(20, 11)));
}
