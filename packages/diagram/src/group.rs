//! Diagram groups, and the page callbacks the host drives them through.

use crate::{
    component::Component,
    config::EngineConfig,
    context::{DrawContext, Modifiers},
    diagram::Diagram,
    effect::{HostEffects, Lookup},
    group_info::DiagramGroupInfo,
    gui_manager::{GuiManager, GuiFrame, MouseButton},
    interactable::{Interactable, RecipeType},
    matcher::DiagramMatcher,
    state::{DiagramState, ScrollDirection},
};
use draw::Canvas;
use std::{
    collections::HashMap,
    fmt::{self, Formatter, Debug},
    sync::Arc,
};


/// Host key bindings a diagram responds to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KeyBinding {
    ShowRecipes,
    ShowUsages,
    Bookmark,
}

impl KeyBinding {
    pub fn recipe_type(self) -> RecipeType {
        match self {
            KeyBinding::ShowRecipes => RecipeType::Crafting,
            KeyBinding::ShowUsages => RecipeType::Usage,
            KeyBinding::Bookmark => RecipeType::Bookmark,
        }
    }
}


/// Callbacks through which the host displays and interacts with a page
/// handler.
///
/// There is one page index per diagram. The host decides how many fit on a
/// screen. Callbacks which take a `HostEffects` queue push whatever the host
/// should do afterwards onto it.
pub trait PageRenderer {
    fn num_pages(&self) -> usize;

    /// Draw the static parts of the page, clipped to the viewport.
    fn draw_background(&mut self, page: usize, canvas: &mut dyn Canvas, frame: &GuiFrame);

    /// Draw inserted content and the hover overlay, clipped to the viewport.
    fn draw_foreground(&mut self, page: usize, canvas: &mut dyn Canvas, frame: &GuiFrame);

    /// Draw the scrollbar and hover tooltip, in absolute coordinates.
    fn draw_tooltip(&mut self, page: usize, canvas: &mut dyn Canvas, frame: &GuiFrame);

    /// Returns whether the click was handled.
    fn mouse_clicked(
        &mut self,
        button: i32,
        page: usize,
        frame: &GuiFrame,
        effects: &mut HostEffects,
    ) -> bool;

    /// Returns whether the key was handled.
    fn key_typed(
        &mut self,
        key: KeyBinding,
        page: usize,
        frame: &GuiFrame,
        effects: &mut HostEffects,
    ) -> bool;

    /// Returns whether the scroll was handled. If not, the host may turn the
    /// page instead.
    fn mouse_scrolled(&mut self, direction: ScrollDirection, page: usize, frame: &GuiFrame) -> bool;

    /// Called once per host tick.
    fn on_update(&mut self, modifiers: Modifiers);

    /// Always empty. The host's native stack display can't show fluids, so
    /// diagrams draw their own content instead.
    fn ingredient_stacks(&self, _page: usize) -> Vec<Component> {
        Vec::new()
    }

    /// Always none, for the same reason as `ingredient_stacks`.
    fn result_stack(&self, _page: usize) -> Option<Component> {
        None
    }
}


/// Builds the diagrams for a custom lookup id.
pub type DiagramSupplier = Arc<dyn Fn() -> Vec<Arc<Diagram>> + Send + Sync>;

/// Creates the state for a new group instance.
pub type StateFactory = Arc<dyn Fn() -> DiagramState + Send + Sync>;

/// Everything shared by all instances of a group.
struct GroupShared {
    info: DiagramGroupInfo,
    matcher: Box<dyn DiagramMatcher>,
    custom_behaviors: HashMap<String, DiagramSupplier>,
    state_factory: StateFactory,
    config: EngineConfig,
}

/// A group of diagrams, as loaded for one lookup.
///
/// The registered group is an instance with no diagrams. Each lookup gets a
/// new instance, with its own diagram state and scrolling.
pub struct DiagramGroup {
    shared: Arc<GroupShared>,
    diagrams: Vec<Arc<Diagram>>,
    state: DiagramState,
    gui: GuiManager,
}

impl DiagramGroup {
    pub fn builder<M>(info: DiagramGroupInfo, matcher: M) -> DiagramGroupBuilder
    where
        M: DiagramMatcher + 'static,
    {
        DiagramGroupBuilder {
            info,
            matcher: Box::new(matcher),
            custom_behaviors: HashMap::new(),
            state_factory: Arc::new(DiagramState::new),
            config: EngineConfig::default(),
        }
    }

    pub fn info(&self) -> &DiagramGroupInfo {
        &self.shared.info
    }

    pub fn config(&self) -> &EngineConfig {
        &self.shared.config
    }

    pub fn diagrams(&self) -> &[Arc<Diagram>] {
        &self.diagrams
    }

    pub fn state(&self) -> &DiagramState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DiagramState {
        &mut self.state
    }

    pub fn gui(&self) -> &GuiManager {
        &self.gui
    }

    /// Instance of this group showing the given diagrams, with fresh state.
    pub fn new_instance(&self, diagrams: Vec<Arc<Diagram>>) -> DiagramGroup {
        DiagramGroup {
            shared: Arc::clone(&self.shared),
            diagrams,
            state: (self.shared.state_factory)(),
            gui: GuiManager::new(),
        }
    }

    /// Instance of this group showing the diagrams for a lookup.
    ///
    /// The group's own id shows every diagram, and a registered custom id
    /// shows whatever its supplier builds. Other ids find nothing.
    pub fn load_diagrams(&self, lookup: &Lookup, recipe_type: RecipeType) -> DiagramGroup {
        let shared = &self.shared;
        let found = match lookup {
            Lookup::Id(id) if *id == shared.info.group_id => shared.matcher.all(),
            Lookup::Id(id) => match shared.custom_behaviors.get(id) {
                Some(supplier) => supplier(),
                None => Vec::new(),
            },
            Lookup::Component(component) => {
                let component = if shared.info.ignore_nbt {
                    component.without_nbt()
                } else {
                    component.clone()
                };
                shared.matcher.matching(recipe_type, &component)
            }
        };

        let total = found.len();
        let diagrams = if shared.config.show_empty_diagrams {
            found
        } else {
            found.into_iter()
                .filter(|diagram| !shared.info.is_empty_diagram(diagram))
                .collect::<Vec<_>>()
        };
        debug!(
            group = %shared.info.group_id,
            ?lookup,
            ?recipe_type,
            total,
            shown = diagrams.len(),
            "loaded diagrams"
        );
        self.new_instance(diagrams)
    }

    fn diagram(&self, page: usize) -> Option<Arc<Diagram>> {
        let diagram = self.diagrams.get(page).cloned();
        if diagram.is_none() {
            warn!(group = %self.shared.info.group_id, %page, "no diagram for page");
        }
        diagram
    }

    /// Interact with whatever's under the mouse. Returns whether there was
    /// anything.
    pub fn interact(
        &mut self,
        page: usize,
        frame: &GuiFrame,
        recipe_type: RecipeType,
        effects: &mut HostEffects,
    ) -> bool {
        if !frame.mouse_in_bounds() {
            return false;
        }
        let diagram = match self.diagram(page) {
            Some(diagram) => diagram,
            None => return false,
        };
        let target = self.gui.relative_mouse(frame);
        match diagram.find_hovered(&self.state, target) {
            Some(interactable) => {
                trace!(?recipe_type, ?target, "interacting");
                interactable.interact(&mut self.state, recipe_type, effects);
                true
            }
            None => false,
        }
    }

    /// Hovered interactable, if the mouse is in the viewport.
    fn hovered<'d>(&self, diagram: &'d Diagram, frame: &GuiFrame) -> Option<&'d dyn Interactable> {
        if !frame.mouse_in_bounds() {
            return None;
        }
        diagram.find_hovered(&self.state, self.gui.relative_mouse(frame))
    }
}

impl PageRenderer for DiagramGroup {
    fn num_pages(&self) -> usize {
        self.diagrams.len()
    }

    fn draw_background(&mut self, page: usize, canvas: &mut dyn Canvas, frame: &GuiFrame) {
        let diagram = match self.diagram(page) {
            Some(diagram) => diagram,
            None => return,
        };
        self.gui.check_scroll_state(frame, diagram.dimension(&self.state));

        let state = &self.state;
        let config = &self.shared.config;
        self.gui.with_viewport(canvas, frame, |canvas| {
            let mut ctx = DrawContext::new(canvas, state, config, frame.modifiers);
            diagram.draw_background(&mut ctx);
        });
    }

    fn draw_foreground(&mut self, page: usize, canvas: &mut dyn Canvas, frame: &GuiFrame) {
        let diagram = match self.diagram(page) {
            Some(diagram) => diagram,
            None => return,
        };
        let hovered = self.hovered(&diagram, frame);

        let state = &self.state;
        let config = &self.shared.config;
        self.gui.with_viewport(canvas, frame, |canvas| {
            let mut ctx = DrawContext::new(canvas, state, config, frame.modifiers);
            diagram.draw_foreground(&mut ctx);
            if let Some(interactable) = hovered {
                interactable.draw_overlay(&mut ctx);
            }
        });
    }

    fn draw_tooltip(&mut self, page: usize, canvas: &mut dyn Canvas, frame: &GuiFrame) {
        let diagram = match self.diagram(page) {
            Some(diagram) => diagram,
            None => return,
        };
        self.gui.draw_scrollbar(canvas, frame, diagram.dimension(&self.state));

        if let Some(interactable) = self.hovered(&diagram, frame) {
            let mut ctx = DrawContext::new(canvas, &self.state, &self.shared.config, frame.modifiers);
            interactable.draw_tooltip(&mut ctx, frame.mouse);
        }
    }

    fn mouse_clicked(
        &mut self,
        button: i32,
        page: usize,
        frame: &GuiFrame,
        effects: &mut HostEffects,
    ) -> bool {
        let scrollbar_button = MouseButton::from_code(button);
        if let (Some(mouse_button), Some(diagram)) = (scrollbar_button, self.diagrams.get(page)) {
            let dimension = diagram.dimension(&self.state);
            if self.gui.mouse_click_scrollbar(mouse_button, frame, dimension) {
                return true;
            }
        }

        let recipe_type = match button {
            0 => RecipeType::Crafting,
            1 => RecipeType::Usage,
            _ => return false,
        };
        self.interact(page, frame, recipe_type, effects)
    }

    fn key_typed(
        &mut self,
        key: KeyBinding,
        page: usize,
        frame: &GuiFrame,
        effects: &mut HostEffects,
    ) -> bool {
        self.interact(page, frame, key.recipe_type(), effects)
    }

    fn mouse_scrolled(&mut self, direction: ScrollDirection, page: usize, frame: &GuiFrame) -> bool {
        if frame.modifiers.shift {
            self.state.scroll(direction);
            return true;
        }

        let diagram = match self.diagram(page) {
            Some(diagram) => diagram,
            None => return false,
        };
        let config = &self.shared.config;
        if config.disable_page_scroll || self.gui.is_scrollable(frame, diagram.dimension(&self.state)) {
            self.gui.scroll(direction, config);
            true
        } else {
            false
        }
    }

    fn on_update(&mut self, modifiers: Modifiers) {
        self.gui.tick();
        self.state.tick(modifiers, &self.shared.config);
    }
}

impl Debug for DiagramGroup {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("DiagramGroup")
            .field("info", &self.shared.info)
            .field("diagrams", &self.diagrams.len())
            .field("state", &self.state)
            .field("gui", &self.gui)
            .finish()
    }
}


pub struct DiagramGroupBuilder {
    info: DiagramGroupInfo,
    matcher: Box<dyn DiagramMatcher>,
    custom_behaviors: HashMap<String, DiagramSupplier>,
    state_factory: StateFactory,
    config: EngineConfig,
}

impl DiagramGroupBuilder {
    /// Serve `id` lookups with the supplier's diagrams. Checked after the
    /// group's own id.
    pub fn custom_behavior<F>(mut self, id: impl Into<String>, supplier: F) -> Self
    where
        F: Fn() -> Vec<Arc<Diagram>> + Send + Sync + 'static,
    {
        self.custom_behaviors.insert(id.into(), Arc::new(supplier));
        self
    }

    /// Create each instance's state with `factory`, e.g. to attach a
    /// `CustomDiagramState`.
    pub fn state_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> DiagramState + Send + Sync + 'static,
    {
        self.state_factory = Arc::new(factory);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> DiagramGroup {
        let shared = GroupShared {
            info: self.info,
            matcher: self.matcher,
            custom_behaviors: self.custom_behaviors,
            state_factory: self.state_factory,
            config: self.config,
        };
        DiagramGroup {
            state: (shared.state_factory)(),
            shared: Arc::new(shared),
            diagrams: Vec::new(),
            gui: GuiManager::new(),
        }
    }
}


#[cfg(test)]
use crate::{
    component::{DisplayComponent, Nbt},
    effect::HostEffect,
    geom::{point, dimension},
    grid::GRID,
    layout::{Layout, SlotKey},
    matcher::ComponentDiagramMatcher,
    slot::Slot,
    state::CustomDiagramState,
    tooltip::Tooltip,
};
#[cfg(test)]
use draw::{recording::RecordingCanvas, TextureRegion};

/// Diagram with one slot at `GRID.grid(0, 4)`, holding `contents` if any.
#[cfg(test)]
fn slot_diagram(contents: Option<&str>) -> Arc<Diagram> {
    let key = SlotKey::new("slot");
    let layout = Layout::builder()
        .put_slot(key.clone(), Slot::builder(GRID.grid(0, 4)).set_tooltip(Tooltip::create("Input")).build())
        .build();
    let mut builder = Diagram::builder();
    builder.add_layout(layout);
    if let Some(id) = contents {
        builder.insert_into_slot(&key, vec![DisplayComponent::new(Component::item(id, 0))]);
    }
    Arc::new(builder.build())
}

#[cfg(test)]
fn test_group(config: EngineConfig) -> DiagramGroup {
    let info = DiagramGroupInfo::builder("Test", "test.group", Component::item("minecraft:book", 0))
        .set_empty_diagram_predicate(|diagram| diagram.slot_insertions().is_empty())
        .build();
    let stone = Component::item("minecraft:stone", 0);
    let mut matcher = ComponentDiagramMatcher::builder();
    matcher.add_diagram(slot_diagram(Some("minecraft:stone"))).add_component(stone.clone());
    matcher.add_diagram(slot_diagram(None)).add_component(stone);
    DiagramGroup::builder(info, matcher.build())
        .custom_behavior("test.custom", || vec![slot_diagram(Some("minecraft:dirt"))])
        .config(config)
        .build()
}

/// Viewport at (104, 51). Diagrams are drawn at (105, 31) before scrolling.
#[cfg(test)]
fn frame(mouse: crate::geom::Point) -> GuiFrame {
    GuiFrame {
        mouse,
        gui_origin: point(100, 20),
        gui_size: dimension(176, 166),
        page_offset: point(5, 11),
        modifiers: Modifiers::default(),
    }
}

#[cfg(test)]
fn over_slot() -> GuiFrame {
    frame(GRID.grid(0, 4) + point(105, 31))
}

#[test]
fn test_load_diagrams_filters_empty() {
    let group = test_group(EngineConfig::default());
    let stone = Component::item("minecraft:stone", 0);
    assert_eq!(group.load_diagrams(&Lookup::Component(stone.clone()), RecipeType::Crafting).num_pages(), 1);
    assert_eq!(group.load_diagrams(&Lookup::Id("test.group".into()), RecipeType::Usage).num_pages(), 1);

    let show_empty = test_group(EngineConfig { show_empty_diagrams: true, ..EngineConfig::default() });
    assert_eq!(show_empty.load_diagrams(&Lookup::Component(stone), RecipeType::Crafting).num_pages(), 2);
    assert_eq!(show_empty.load_diagrams(&Lookup::Id("test.group".into()), RecipeType::Usage).num_pages(), 2);
}

#[test]
fn test_load_diagrams_by_id() {
    let group = test_group(EngineConfig::default());
    assert_eq!(group.load_diagrams(&Lookup::Id("test.custom".into()), RecipeType::Crafting).num_pages(), 1);
    assert_eq!(group.load_diagrams(&Lookup::Id("item".into()), RecipeType::Crafting).num_pages(), 0);
}

#[test]
fn test_load_diagrams_ignores_nbt() {
    let tagged = Component::item("minecraft:stone", 0).with_nbt(Nbt::new("{display:{}}"));
    let group = test_group(EngineConfig::default());
    assert_eq!(group.load_diagrams(&Lookup::Component(tagged.clone()), RecipeType::Usage).num_pages(), 1);

    let info = DiagramGroupInfo::builder("Test", "test.group", Component::item("minecraft:book", 0))
        .set_ignore_nbt(false)
        .build();
    let mut matcher = ComponentDiagramMatcher::builder();
    matcher.add_diagram(slot_diagram(None)).add_component(Component::item("minecraft:stone", 0));
    let strict = DiagramGroup::builder(info, matcher.build()).build();
    assert_eq!(strict.load_diagrams(&Lookup::Component(tagged), RecipeType::Usage).num_pages(), 0);
}

#[test]
fn test_click_interacts_with_hovered_slot() {
    let group = test_group(EngineConfig::default());
    let mut page = group.load_diagrams(&Lookup::Id("test.custom".into()), RecipeType::Crafting);
    let mut effects = HostEffects::new();

    assert!(page.mouse_clicked(1, 0, &over_slot(), &mut effects));
    assert_eq!(
        effects.drain().collect::<Vec<_>>(),
        vec![HostEffect::ShowRecipes {
            recipe_type: RecipeType::Usage,
            lookup: Lookup::Component(Component::item("minecraft:dirt", 0)),
        }],
    );

    assert!(page.key_typed(KeyBinding::Bookmark, 0, &over_slot(), &mut effects));
    assert_eq!(effects.len(), 1);

    // middle click, empty space, outside the viewport, and a missing page
    assert!(!page.mouse_clicked(2, 0, &over_slot(), &mut effects));
    assert!(!page.mouse_clicked(0, 0, &frame(point(200, 150)), &mut effects));
    assert!(!page.mouse_clicked(0, 0, &frame(point(116, 40)), &mut effects));
    assert!(!page.mouse_clicked(0, 3, &over_slot(), &mut effects));
    assert_eq!(effects.len(), 1);
}

#[test]
fn test_draw_passes() {
    let group = test_group(EngineConfig::default());
    let mut page = group.load_diagrams(&Lookup::Id("test.custom".into()), RecipeType::Crafting);
    let mut canvas = RecordingCanvas::new();

    page.draw_background(0, &mut canvas, &over_slot());
    assert_eq!(canvas.textures(TextureRegion::SLOT).len(), 1);
    assert_eq!(canvas.viewport_depth(), 0);

    canvas.clear();
    page.draw_foreground(0, &mut canvas, &over_slot());
    assert_eq!(canvas.icon_count(), 1);
    // the hover overlay
    assert_eq!(canvas.rects().last().map(|r| r.2), Some(draw::colour::OVERLAY_WHITE));

    canvas.clear();
    page.draw_tooltip(0, &mut canvas, &over_slot());
    assert!(canvas.texts().iter().any(|text| text.contains("Input")));
}

#[test]
fn test_scrolling() {
    let group = test_group(EngineConfig::default());
    let mut page = group.load_diagrams(&Lookup::Id("test.custom".into()), RecipeType::Crafting);
    // the diagram fits, so scrolling is left to the host
    assert!(!page.mouse_scrolled(ScrollDirection::Down, 0, &over_slot()));

    // shift scrolls the component cycle instead
    let shifted = GuiFrame { modifiers: Modifiers { shift: true, ctrl: false }, ..over_slot() };
    assert!(page.mouse_scrolled(ScrollDirection::Down, 0, &shifted));
    assert_eq!(page.state().cycle(), 1);

    let no_page_scroll = test_group(EngineConfig { disable_page_scroll: true, ..EngineConfig::default() });
    let mut page = no_page_scroll.load_diagrams(&Lookup::Id("test.custom".into()), RecipeType::Crafting);
    assert!(page.mouse_scrolled(ScrollDirection::Down, 0, &over_slot()));
    assert_eq!(page.gui().scroll_y(), 12);
    // clamped back on the next draw
    page.draw_background(0, &mut RecordingCanvas::new(), &over_slot());
    assert_eq!(page.gui().scroll_y(), 0);
}

#[cfg(test)]
fn tall_group() -> DiagramGroup {
    let info = DiagramGroupInfo::builder("Tall", "test.tall", Component::item("minecraft:book", 0)).build();
    let layout = Layout::builder()
        .put_slot(SlotKey::new("top"), Slot::builder(GRID.grid(0, 0)).build())
        .put_slot(SlotKey::new("bottom"), Slot::builder(GRID.grid(0, 20)).build())
        .build();
    let mut builder = Diagram::builder();
    builder.add_layout(layout);
    let mut matcher = ComponentDiagramMatcher::builder();
    matcher.add_diagram(Arc::new(builder.build())).add_component(Component::item("minecraft:stone", 0));
    DiagramGroup::builder(info, matcher.build()).build()
}

/// Mouse on the scrollbar column, which starts at x = 275.
#[cfg(test)]
fn over_scrollbar(y: i32) -> GuiFrame {
    frame(point(278, y))
}

#[test]
fn test_tall_diagram_scrolls() {
    let group = tall_group();
    let mut page = group.load_diagrams(&Lookup::Id("test.tall".into()), RecipeType::Crafting);
    let height = page.diagrams()[0].dimension(page.state());
    assert!(page.gui().is_scrollable(&over_slot(), height));

    assert!(page.mouse_scrolled(ScrollDirection::Down, 0, &over_slot()));
    assert_eq!(page.gui().scroll_y(), 12);
    page.draw_background(0, &mut RecordingCanvas::new(), &over_slot());
    assert_eq!(page.gui().scroll_y(), 12);

    assert!(page.mouse_scrolled(ScrollDirection::Up, 0, &over_slot()));
    assert!(page.mouse_scrolled(ScrollDirection::Up, 0, &over_slot()));
    page.draw_background(0, &mut RecordingCanvas::new(), &over_slot());
    assert_eq!(page.gui().scroll_y(), 0);
}

#[test]
fn test_scrollbar_click_moves_viewport() {
    let group = tall_group();
    let mut page = group.load_diagrams(&Lookup::Id("test.tall".into()), RecipeType::Crafting);
    let height = page.diagrams()[0].dimension(page.state());
    let scrollable = page.gui().scrollable_height(&over_slot(), height);
    let mut effects = HostEffects::new();

    // right click jumps to the mouse
    assert!(page.mouse_clicked(1, 0, &over_scrollbar(175), &mut effects));
    assert!(page.gui().scroll_y() > 0);
    page.draw_background(0, &mut RecordingCanvas::new(), &over_scrollbar(175));
    assert_eq!(page.gui().scroll_y(), scrollable);

    // left click grabs the scrollbar, which then follows the mouse
    assert!(page.mouse_clicked(0, 0, &over_scrollbar(52), &mut effects));
    assert!(page.gui().scrollbar_selected());
    page.draw_background(0, &mut RecordingCanvas::new(), &over_scrollbar(52));
    assert_eq!(page.gui().scroll_y(), 0);

    // while grabbed, a click anywhere releases it
    assert!(page.mouse_clicked(0, 0, &over_slot(), &mut effects));
    assert!(!page.gui().scrollbar_selected());
    assert!(effects.is_empty());
}

#[test]
fn test_instances_get_fresh_state() {
    let info = DiagramGroupInfo::builder("Test", "test.group", Component::item("minecraft:book", 0)).build();
    let group = DiagramGroup::builder(info, ComponentDiagramMatcher::builder().build())
        .state_factory(|| DiagramState::with_custom(CustomDiagramState::new(|_: &Diagram| 0u8, ())))
        .build();
    let mut page = group.load_diagrams(&Lookup::Id("test.group".into()), RecipeType::Crafting);
    page.on_update(Modifiers::default());
    assert_eq!(page.state().ticks(), 1);
    assert!(page.state().custom::<CustomDiagramState<u8, ()>>().is_some());

    let again = group.load_diagrams(&Lookup::Id("test.group".into()), RecipeType::Crafting);
    assert_eq!(again.state().ticks(), 0);
    assert!(page.ingredient_stacks(0).is_empty());
    assert!(page.result_stack(0).is_none());
}
