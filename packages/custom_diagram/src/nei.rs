//! Shim between a diagram group and NEI's recipe handler callbacks.
//!
//! NEI asks a registered handler for a crafting or usage handler, naming a
//! lookup id and passing the stacks involved. The id is either `"item"`,
//! `"fluid"` / `"liquid"`, or something handler specific such as a group id.

use diagram::{
    component::{Component, Nbt},
    context::Modifiers,
    effect::{HostEffects, Lookup},
    group::{DiagramGroup, KeyBinding, PageRenderer},
    group_info::DiagramGroupVisibility,
    gui_manager::GuiFrame,
    interactable::RecipeType,
    state::ScrollDirection,
};
use draw::Canvas;
use serde::{Serialize, Deserialize};


/// A stack as NEI hands it to us.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostStack {
    Item {
        id: String,
        #[serde(default)]
        damage: i32,
        #[serde(default)]
        nbt: Option<String>,
    },
    Fluid {
        id: String,
        amount: i32,
        #[serde(default)]
        nbt: Option<String>,
    },
}

impl HostStack {
    /// Identity of the stack. Amounts are dropped.
    pub fn component(&self) -> Component {
        let (component, nbt) = match self {
            &HostStack::Item { ref id, damage, ref nbt } => (Component::item(id.as_str(), damage), nbt),
            &HostStack::Fluid { ref id, ref nbt, .. } => (Component::fluid(id.as_str()), nbt),
        };
        match nbt {
            &Some(ref nbt) => component.with_nbt(Nbt::new(nbt.as_str())),
            &None => component,
        }
    }
}


/// Translate an NEI lookup id and its stacks. `None` if a stack lookup has no
/// stack of the right kind.
pub fn lookup(id: &str, stacks: &[HostStack]) -> Option<Lookup> {
    match id {
        "item" => match stacks.first() {
            Some(stack @ &HostStack::Item { .. }) => Some(Lookup::Component(stack.component())),
            _ => None,
        },
        "fluid" | "liquid" => match stacks.first() {
            Some(stack @ &HostStack::Fluid { .. }) => Some(Lookup::Component(stack.component())),
            _ => None,
        },
        _ => Some(Lookup::Id(id.to_owned())),
    }
}


/// NEI key codes for the bindings diagrams respond to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeiKeyBindings {
    pub recipe: i32,
    pub usage: i32,
    pub bookmark: i32,
}

impl NeiKeyBindings {
    pub fn resolve(&self, key_code: i32) -> Option<KeyBinding> {
        if key_code == self.recipe {
            Some(KeyBinding::ShowRecipes)
        } else if key_code == self.usage {
            Some(KeyBinding::ShowUsages)
        } else if key_code == self.bookmark {
            Some(KeyBinding::Bookmark)
        } else {
            None
        }
    }
}

impl Default for NeiKeyBindings {
    fn default() -> Self {
        // LWJGL codes for R, U and A
        NeiKeyBindings {
            recipe: 19,
            usage: 22,
            bookmark: 30,
        }
    }
}


/// A diagram group registered with NEI as both a crafting and a usage
/// handler.
#[derive(Debug)]
pub struct NeiHandler {
    group: DiagramGroup,
    visibility: DiagramGroupVisibility,
    key_bindings: NeiKeyBindings,
}

impl NeiHandler {
    pub fn new(group: DiagramGroup, visibility: DiagramGroupVisibility) -> Self {
        NeiHandler {
            group,
            visibility,
            key_bindings: NeiKeyBindings::default(),
        }
    }

    pub fn with_key_bindings(mut self, key_bindings: NeiKeyBindings) -> Self {
        self.key_bindings = key_bindings;
        self
    }

    pub fn group(&self) -> &DiagramGroup {
        &self.group
    }

    pub fn visibility(&self) -> DiagramGroupVisibility {
        self.visibility
    }

    pub fn handler_id(&self) -> &str {
        &self.group.info().group_id
    }

    pub fn recipe_name(&self) -> &str {
        &self.group.info().group_name
    }

    pub fn recipes_per_page(&self) -> i32 {
        self.group.info().diagrams_per_page
    }

    /// Height of each recipe, so that `recipes_per_page` of them fill a page.
    pub fn recipe_height(&self) -> i32 {
        self.group.info().handler_height()
    }

    pub fn get_recipe_handler(&self, output_id: &str, results: &[HostStack], modifiers: Modifiers) -> NeiHandler {
        self.load(output_id, results, RecipeType::Crafting, modifiers)
    }

    pub fn get_usage_handler(&self, input_id: &str, ingredients: &[HostStack], modifiers: Modifiers) -> NeiHandler {
        self.load(input_id, ingredients, RecipeType::Usage, modifiers)
    }

    fn load(&self, id: &str, stacks: &[HostStack], recipe_type: RecipeType, modifiers: Modifiers) -> NeiHandler {
        let group = match lookup(id, stacks) {
            Some(lookup) if self.visibility.is_shown(modifiers) => {
                self.group.load_diagrams(&lookup, recipe_type)
            }
            Some(_) => {
                trace!(handler = %self.handler_id(), ?modifiers, "group hidden, not loading");
                self.group.new_instance(Vec::new())
            }
            None => {
                debug!(handler = %self.handler_id(), %id, "no stack of the right kind for lookup");
                self.group.new_instance(Vec::new())
            }
        };
        NeiHandler {
            group,
            visibility: self.visibility,
            key_bindings: self.key_bindings,
        }
    }

    /// Handle a raw NEI key code. Returns whether it was handled.
    pub fn key_code_typed(
        &mut self,
        key_code: i32,
        page: usize,
        frame: &GuiFrame,
        effects: &mut HostEffects,
    ) -> bool {
        match self.key_bindings.resolve(key_code) {
            Some(key) => self.key_typed(key, page, frame, effects),
            None => false,
        }
    }
}

impl PageRenderer for NeiHandler {
    fn num_pages(&self) -> usize {
        self.group.num_pages()
    }

    fn draw_background(&mut self, page: usize, canvas: &mut dyn Canvas, frame: &GuiFrame) {
        self.group.draw_background(page, canvas, frame)
    }

    fn draw_foreground(&mut self, page: usize, canvas: &mut dyn Canvas, frame: &GuiFrame) {
        self.group.draw_foreground(page, canvas, frame)
    }

    fn draw_tooltip(&mut self, page: usize, canvas: &mut dyn Canvas, frame: &GuiFrame) {
        self.group.draw_tooltip(page, canvas, frame)
    }

    fn mouse_clicked(
        &mut self,
        button: i32,
        page: usize,
        frame: &GuiFrame,
        effects: &mut HostEffects,
    ) -> bool {
        self.group.mouse_clicked(button, page, frame, effects)
    }

    fn key_typed(
        &mut self,
        key: KeyBinding,
        page: usize,
        frame: &GuiFrame,
        effects: &mut HostEffects,
    ) -> bool {
        self.group.key_typed(key, page, frame, effects)
    }

    fn mouse_scrolled(&mut self, direction: ScrollDirection, page: usize, frame: &GuiFrame) -> bool {
        self.group.mouse_scrolled(direction, page, frame)
    }

    fn on_update(&mut self, modifiers: Modifiers) {
        self.group.on_update(modifiers)
    }
}


#[cfg(test)]
use crate::{
    catalog::Catalog,
    generators::fluid_containers::FluidContainers,
    registry::GeneratorContext,
};
#[cfg(test)]
use diagram::{
    config::EngineConfig,
    effect::HostEffect,
    geom::{point, dimension},
    grid::TOTAL_HEIGHT,
    gui_manager::{SIDE_MARGIN, TOP_MARGIN},
    interactable::BoundedDrawable,
    layout::SlotGroupKey,
};
#[cfg(test)]
use draw::recording::{MonospaceMetrics, RecordingCanvas};
#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
fn water() -> HostStack {
    HostStack::Fluid { id: "water".to_owned(), amount: 1000, nbt: None }
}

#[cfg(test)]
fn handler(visibility: DiagramGroupVisibility) -> NeiHandler {
    let generator = FluidContainers::create(GeneratorContext {
        group_id: "test.fluidcontainers".to_owned(),
        catalog: Arc::new(Catalog::sample()),
        metrics: Arc::new(MonospaceMetrics::default()),
    });
    NeiHandler::new(generator.generate(&EngineConfig::default()), visibility)
}

#[cfg(test)]
fn frame_over_first_fluid(handler: &NeiHandler) -> GuiFrame {
    let diagram = &handler.group().diagrams()[0];
    let slot = diagram.layout()
        .slot_group(&SlotGroupKey::new("fluids"))
        .map(|group| group.slot(0, 0).position())
        .unwrap();
    let gui_origin = point(100, 20);
    // diagram drawn from the top left of the viewport
    let page_offset = point(SIDE_MARGIN, TOP_MARGIN);
    GuiFrame {
        mouse: gui_origin + page_offset + slot,
        gui_origin,
        gui_size: dimension(176, 166),
        page_offset,
        modifiers: Modifiers::default(),
    }
}

#[test]
fn test_lookup_ids() {
    let item = HostStack::Item { id: "minecraft:bucket".to_owned(), damage: 0, nbt: Some("{a:1}".to_owned()) };
    assert_eq!(
        lookup("item", &[item.clone()]),
        Some(Lookup::Component(Component::item("minecraft:bucket", 0).with_nbt(Nbt::new("{a:1}")))),
    );
    assert_eq!(lookup("liquid", &[water()]), Some(Lookup::Component(Component::fluid("water"))));
    assert_eq!(lookup("fluid", &[item]), None);
    assert_eq!(lookup("item", &[]), None);
    assert_eq!(lookup("some.group", &[]), Some(Lookup::Id("some.group".to_owned())));
}

#[test]
fn test_stack_json() {
    let stack: HostStack = serde_json::from_str(r#"{ "type": "fluid", "id": "lava", "amount": 144 }"#).unwrap();
    assert_eq!(stack.component(), Component::fluid("lava"));
}

#[test]
fn test_key_bindings() {
    let bindings = NeiKeyBindings::default();
    assert_eq!(bindings.resolve(19), Some(KeyBinding::ShowRecipes));
    assert_eq!(bindings.resolve(22), Some(KeyBinding::ShowUsages));
    assert_eq!(bindings.resolve(30), Some(KeyBinding::Bookmark));
    assert_eq!(bindings.resolve(1), None);
}

#[test]
fn test_handler_names() {
    let handler = handler(DiagramGroupVisibility::AlwaysShown);
    assert_eq!(handler.handler_id(), "test.fluidcontainers");
    assert_eq!(handler.recipe_name(), "Fluid Containers");
    assert_eq!(handler.recipes_per_page(), 2);
    assert_eq!(handler.recipe_height(), TOTAL_HEIGHT / 2);
    assert_eq!(handler.num_pages(), 0);
    assert!(handler.ingredient_stacks(0).is_empty());
    assert!(handler.result_stack(0).is_none());
}

#[test]
fn test_visibility_gates_loading() {
    let shown = handler(DiagramGroupVisibility::ShowOnShift);
    let shift = Modifiers { shift: true, ctrl: false };
    assert_eq!(shown.get_usage_handler("fluid", &[water()], shift).num_pages(), 1);
    assert_eq!(shown.get_usage_handler("fluid", &[water()], Modifiers::default()).num_pages(), 0);
    assert_eq!(
        handler(DiagramGroupVisibility::AlwaysHidden)
            .get_recipe_handler("fluid", &[water()], shift)
            .num_pages(),
        0,
    );
}

#[test]
fn test_click_and_key_on_fluid() {
    let mut loaded = handler(DiagramGroupVisibility::AlwaysShown)
        .get_recipe_handler("fluid", &[water()], Modifiers::default());
    let frame = frame_over_first_fluid(&loaded);

    let mut canvas = RecordingCanvas::new();
    loaded.draw_background(0, &mut canvas, &frame);
    loaded.draw_foreground(0, &mut canvas, &frame);
    loaded.draw_tooltip(0, &mut canvas, &frame);
    assert_eq!(canvas.viewport_depth(), 0);
    assert!(canvas.texts().iter().any(|text| text.contains("Fluid")));

    let mut effects = HostEffects::new();
    assert!(loaded.mouse_clicked(1, 0, &frame, &mut effects));
    // fluids can't be bookmarked
    assert!(loaded.key_code_typed(30, 0, &frame, &mut effects));
    assert!(!loaded.key_code_typed(1, 0, &frame, &mut effects));
    assert_eq!(effects.drain().collect::<Vec<_>>(), vec![HostEffect::ShowRecipes {
        recipe_type: RecipeType::Usage,
        lookup: Lookup::Component(Component::fluid("water")),
    }]);
}
