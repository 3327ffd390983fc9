//! Diagrams, and the builder that inserts content into layouts.

use crate::{
    component::DisplayComponent,
    context::DrawContext,
    geom::{Point, Dimension, dimension_max, dimension_max_all},
    interactable::{Drawable, Interactable, InteractiveComponentGroup},
    layout::{Layout, LayoutKey, SlotKey, SlotGroupKey},
    slot::Slot,
    state::DiagramState,
};
use std::{
    collections::{BTreeMap, HashMap},
    fmt::Debug,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};
use anyhow::*;


static NEXT_DIAGRAM_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a diagram, for keying per-diagram state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiagramId(u64);

impl DiagramId {
    fn next() -> Self {
        DiagramId(NEXT_DIAGRAM_ID.fetch_add(1, Ordering::Relaxed))
    }
}


/// Chooses which sub-diagrams of a composite diagram are active, based on
/// the diagram state.
pub trait DiagramSelector: Debug + Send + Sync {
    fn active_diagrams<'a>(&'a self, state: &DiagramState) -> Vec<&'a Diagram>;
}


/// A laid-out diagram with content inserted.
#[derive(Debug)]
pub struct Diagram {
    id: DiagramId,
    layout: Layout,
    /// Number of insertions per slot and slot group key. Generators use this
    /// to tell whether a diagram is empty.
    slot_insertions: BTreeMap<LayoutKey, usize>,
    interactables: Vec<Arc<dyn Interactable>>,
    selector: Option<Arc<dyn DiagramSelector>>,
}

impl Diagram {
    pub fn new(layout: Layout, interactables: Vec<Arc<dyn Interactable>>) -> Self {
        Diagram {
            id: DiagramId::next(),
            layout,
            slot_insertions: BTreeMap::new(),
            interactables,
            selector: None,
        }
    }

    pub fn builder() -> DiagramBuilder {
        DiagramBuilder::default()
    }

    /// Diagram drawing and interacting as `base`, plus whichever
    /// sub-diagrams the selector currently picks, drawn on top.
    pub fn composite<S: DiagramSelector + 'static>(base: Diagram, selector: S) -> Self {
        Diagram {
            selector: Some(Arc::new(selector)),
            ..base
        }
    }

    pub fn id(&self) -> DiagramId {
        self.id
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn slot_insertions(&self) -> &BTreeMap<LayoutKey, usize> {
        &self.slot_insertions
    }

    pub fn insertion_count(&self, key: &LayoutKey) -> usize {
        self.slot_insertions.get(key).copied().unwrap_or(0)
    }

    /// Interactables placed on this diagram, not counting slots.
    pub fn interactables(&self) -> &[Arc<dyn Interactable>] {
        &self.interactables
    }

    fn active_diagrams<'a>(&'a self, state: &DiagramState) -> Vec<&'a Diagram> {
        match self.selector {
            Some(ref selector) => selector.active_diagrams(state),
            None => Vec::new(),
        }
    }

    /// Everything which can be moused over, in priority order.
    ///
    /// Empty slots come after placed interactables, so that anything sitting
    /// on top of a slot takes priority over it.
    pub fn all_interactables<'a>(&'a self, state: &DiagramState) -> Vec<&'a dyn Interactable> {
        let mut all: Vec<&dyn Interactable> = Vec::new();
        all.extend(self.interactables.iter().map(|i| &**i as &dyn Interactable));
        all.extend(self.layout.all_slots().map(|slot| slot as &dyn Interactable));
        for diagram in self.active_diagrams(state) {
            all.extend(diagram.all_interactables(state));
        }
        all
    }

    /// First interactable whose bounding box contains `target`, which is
    /// relative to the diagram.
    pub fn find_hovered<'a>(&'a self, state: &DiagramState, target: Point) -> Option<&'a dyn Interactable> {
        self.all_interactables(state)
            .into_iter()
            .find(|interactable| interactable.check_bounding_box(target))
    }

    pub fn dimension(&self, state: &DiagramState) -> Dimension {
        let own = dimension_max(
            self.layout.max_dimension(),
            dimension_max_all(self.interactables.iter().map(|i| i.max_dimension())),
        );
        self.active_diagrams(state)
            .into_iter()
            .map(|diagram| diagram.dimension(state))
            .fold(own, dimension_max)
    }

    /// Draw the layout.
    pub fn draw_background(&self, ctx: &mut DrawContext) {
        self.layout.draw(ctx);
        let state = ctx.state;
        for diagram in self.active_diagrams(state) {
            diagram.draw_background(ctx);
        }
    }

    /// Draw the placed interactables.
    pub fn draw_foreground(&self, ctx: &mut DrawContext) {
        for interactable in &self.interactables {
            interactable.draw(ctx);
        }
        let state = ctx.state;
        for diagram in self.active_diagrams(state) {
            diagram.draw_foreground(ctx);
        }
    }
}


/// Builds a diagram out of layouts, inserting content into their slots.
///
/// Layouts are either always shown, or optional, in which case they're only
/// shown once something is inserted into one of their slots. Inserting no
/// components is always a no-op.
#[derive(Default)]
pub struct DiagramBuilder {
    /// Layouts, and whether each will be shown. Identified by pointer.
    layouts: Vec<(Arc<Layout>, bool)>,
    slot_insertions: BTreeMap<LayoutKey, usize>,
    /// Number of slots already used by auto insertion, per slot group.
    auto_progress: HashMap<SlotGroupKey, usize>,
    interactables: Vec<Arc<dyn Interactable>>,
}

impl DiagramBuilder {
    fn put_layout(&mut self, layout: Arc<Layout>, shown: bool) {
        match self.layouts.iter_mut().find(|(l, _)| Arc::ptr_eq(l, &layout)) {
            Some(entry) => entry.1 = shown,
            None => self.layouts.push((layout, shown)),
        }
    }

    /// Add a layout which is always shown.
    ///
    /// Layouts added to the same diagram should not share keys.
    pub fn add_layout(&mut self, layout: impl Into<Arc<Layout>>) -> &mut Self {
        self.put_layout(layout.into(), true);
        self
    }

    pub fn add_all_layouts<I, L>(&mut self, layouts: I) -> &mut Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Arc<Layout>>,
    {
        for layout in layouts {
            self.add_layout(layout);
        }
        self
    }

    /// Add a layout which is only shown once content is inserted into it.
    pub fn add_optional_layout(&mut self, layout: impl Into<Arc<Layout>>) -> &mut Self {
        self.put_layout(layout.into(), false);
        self
    }

    pub fn add_all_optional_layouts<I, L>(&mut self, layouts: I) -> &mut Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Arc<Layout>>,
    {
        for layout in layouts {
            self.add_optional_layout(layout);
        }
        self
    }

    fn find_slot_layout(&self, key: &SlotKey) -> usize {
        self.layouts.iter()
            .position(|(layout, _)| layout.slot(key).is_some())
            .unwrap_or_else(|| panic!("could not find slot with key: {}", key))
    }

    fn find_slot_group_layout(&self, key: &SlotGroupKey) -> usize {
        self.layouts.iter()
            .position(|(layout, _)| layout.slot_group(key).is_some())
            .unwrap_or_else(|| panic!("could not find slot group with key: {}", key))
    }

    /// Record content placed into a slot of the layout at `layout_index`.
    fn place(
        &mut self,
        layout_index: usize,
        key: LayoutKey,
        slot: &Slot,
        components: Vec<DisplayComponent>,
    ) {
        trace!(%layout_index, ?key, count = components.len(), "inserting into slot");
        self.interactables.push(Arc::new(InteractiveComponentGroup::for_slot(slot, components)));
        self.layouts[layout_index].1 = true;
        *self.slot_insertions.entry(key).or_insert(0) += 1;
    }

    /// Insert into a standalone slot. Panics if no layout has the key.
    ///
    /// Inserting into the same slot twice isn't checked for.
    pub fn insert_into_slot<I>(&mut self, key: &SlotKey, components: I) -> &mut Self
    where
        I: IntoIterator<Item = DisplayComponent>,
    {
        let components = components.into_iter().collect::<Vec<_>>();
        if components.is_empty() {
            return self;
        }
        let index = self.find_slot_layout(key);
        let layout = Arc::clone(&self.layouts[index].0);
        let slot = layout.slot(key).unwrap_or_else(|| unreachable!());
        self.place(index, LayoutKey::Slot(key.clone()), slot, components);
        self
    }

    /// Cursor filling the slot group's slots in order. Panics if no layout
    /// has the key.
    ///
    /// Progress is remembered, so a later cursor for the same group picks up
    /// where this one left off.
    pub fn auto_insert_into_slot_group(&mut self, key: &SlotGroupKey) -> SlotGroupAutoCursor<'_> {
        let layout_index = self.find_slot_group_layout(key);
        let layout = Arc::clone(&self.layouts[layout_index].0);
        SlotGroupAutoCursor {
            builder: self,
            layout,
            layout_index,
            key: key.clone(),
        }
    }

    /// Cursor inserting into slots of the slot group by coordinate. Panics if
    /// no layout has the key.
    pub fn manual_insert_into_slot_group(&mut self, key: &SlotGroupKey) -> SlotGroupManualCursor<'_> {
        let layout_index = self.find_slot_group_layout(key);
        let layout = Arc::clone(&self.layouts[layout_index].0);
        SlotGroupManualCursor {
            builder: self,
            layout,
            layout_index,
            key: key.clone(),
        }
    }

    pub fn add_interactable<T: Interactable + 'static>(&mut self, interactable: T) -> &mut Self {
        self.interactables.push(Arc::new(interactable));
        self
    }

    pub fn add_shared_interactable(&mut self, interactable: Arc<dyn Interactable>) -> &mut Self {
        self.interactables.push(interactable);
        self
    }

    /// Whether any layout will be shown if built now.
    pub fn has_shown_layout(&self) -> bool {
        self.layouts.iter().any(|&(_, shown)| shown)
    }

    /// Build the diagram, merging all shown layouts. Errors if none are
    /// shown.
    ///
    /// This takes the builder's contents, leaving it empty.
    pub fn try_build(&mut self) -> Result<Diagram> {
        ensure!(self.has_shown_layout(), "diagram has no shown layouts");

        let mut merged = Layout::builder();
        for (layout, _) in self.layouts.drain(..).filter(|&(_, shown)| shown) {
            merged = merged.add_sub_layout(&layout);
        }
        let layout = merged.build();

        let mut interactables = std::mem::take(&mut self.interactables);
        interactables.extend(layout.interactables().iter().cloned());
        self.auto_progress.clear();

        Ok(Diagram {
            id: DiagramId::next(),
            layout,
            slot_insertions: std::mem::take(&mut self.slot_insertions),
            interactables,
            selector: None,
        })
    }

    /// Build the diagram, merging all shown layouts. Panics if none are
    /// shown.
    pub fn build(&mut self) -> Diagram {
        self.try_build().unwrap_or_else(|e| panic!("{}", e))
    }
}


/// Inserts into a slot group's slots in order: left to right, then top to
/// bottom.
pub struct SlotGroupAutoCursor<'b> {
    builder: &'b mut DiagramBuilder,
    layout: Arc<Layout>,
    layout_index: usize,
    key: SlotGroupKey,
}

impl<'b> SlotGroupAutoCursor<'b> {
    fn slots(&self) -> &[Slot] {
        match self.layout.slot_group(&self.key) {
            Some(group) => group.slots(),
            None => unreachable!(),
        }
    }

    fn used(&self) -> usize {
        self.builder.auto_progress.get(&self.key).copied().unwrap_or(0)
    }

    /// Number of slots not yet inserted into.
    pub fn remaining(&self) -> usize {
        self.slots().len() - self.used()
    }

    fn insert_next(&mut self, components: Vec<DisplayComponent>) {
        let used = self.used();
        let slot = match self.slots().get(used) {
            Some(slot) => slot.clone(),
            None => panic!("slot group is full: {}", self.key),
        };
        self.builder.auto_progress.insert(self.key.clone(), used + 1);
        let key = LayoutKey::SlotGroup(self.key.clone());
        self.builder.place(self.layout_index, key, &slot, components);
    }

    /// Insert into the next free slot. Panics if the group is full.
    pub fn insert_into_next_slot<I>(&mut self, components: I) -> &mut Self
    where
        I: IntoIterator<Item = DisplayComponent>,
    {
        let components = components.into_iter().collect::<Vec<_>>();
        if !components.is_empty() {
            self.insert_next(components);
        }
        self
    }

    /// Insert each component into its own slot. Panics if the group runs
    /// out of slots.
    pub fn insert_each<I>(&mut self, components: I) -> &mut Self
    where
        I: IntoIterator<Item = DisplayComponent>,
    {
        for component in components {
            self.insert_next(vec![component]);
        }
        self
    }

    /// Insert each component into its own slot, putting any that don't fit
    /// together into the last slot.
    pub fn insert_each_safe<I>(&mut self, components: I) -> &mut Self
    where
        I: IntoIterator<Item = DisplayComponent>,
    {
        let groups = components.into_iter().map(|component| vec![component]);
        self.insert_groups_safe(groups.collect())
    }

    /// Insert each group of components into its own slot. Panics if the
    /// group runs out of slots.
    pub fn insert_each_group<I, G>(&mut self, groups: I) -> &mut Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = DisplayComponent>,
    {
        for group in groups {
            self.insert_into_next_slot(group);
        }
        self
    }

    /// Insert each non-empty group of components into its own slot,
    /// flattening groups that don't fit together into the last slot.
    pub fn insert_each_group_safe<I, G>(&mut self, groups: I) -> &mut Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = DisplayComponent>,
    {
        let groups = groups.into_iter()
            .map(|group| group.into_iter().collect::<Vec<_>>())
            .filter(|group| !group.is_empty())
            .collect();
        self.insert_groups_safe(groups)
    }

    fn insert_groups_safe(&mut self, groups: Vec<Vec<DisplayComponent>>) -> &mut Self {
        if groups.is_empty() {
            return self;
        }
        let remaining = self.remaining();
        if remaining == 0 {
            warn!(key = %self.key, dropped = groups.len(), "slot group already full, dropping components");
            return self;
        }

        let mut groups = groups.into_iter();
        for _ in 1..remaining {
            match groups.next() {
                Some(group) => self.insert_next(group),
                None => return self,
            }
        }
        let rest = groups.flatten().collect::<Vec<_>>();
        if !rest.is_empty() {
            self.insert_next(rest);
        }
        self
    }
}


/// Inserts into a slot group's slots by coordinate.
///
/// Inserting into the same slot twice isn't checked for.
pub struct SlotGroupManualCursor<'b> {
    builder: &'b mut DiagramBuilder,
    layout: Arc<Layout>,
    layout_index: usize,
    key: SlotGroupKey,
}

impl<'b> SlotGroupManualCursor<'b> {
    /// Insert into the slot at `(x, y)`, as addressed by `SlotGroup::slot`.
    pub fn insert_into_slot<I>(&mut self, x: i32, y: i32, components: I) -> &mut Self
    where
        I: IntoIterator<Item = DisplayComponent>,
    {
        let components = components.into_iter().collect::<Vec<_>>();
        if components.is_empty() {
            return self;
        }
        let slot = match self.layout.slot_group(&self.key) {
            Some(group) => group.slot(x, y).clone(),
            None => unreachable!(),
        };
        let key = LayoutKey::SlotGroup(self.key.clone());
        self.builder.place(self.layout_index, key, &slot, components);
        self
    }
}


#[cfg(test)]
use crate::{
    component::Component,
    geom::{point, dimension},
    grid::{GRID, Direction},
    interactable::{BoundedDrawable, CustomInteractable},
    slot_group::SlotGroup,
    text::ComponentLabel,
};

#[cfg(test)]
fn optional_group_layout(key: &str, width: i32) -> Layout {
    Layout::builder()
        .put_slot_group(
            SlotGroupKey::new(key),
            SlotGroup::builder(width, 1, GRID.grid(0, 0), Direction::E).build(),
        )
        .build()
}

#[cfg(test)]
fn items(ids: &[&str]) -> Vec<DisplayComponent> {
    ids.iter().map(|&id| DisplayComponent::new(Component::item(id, 0))).collect()
}

#[test]
fn test_empty_insertion_is_noop() {
    let header = Layout::builder()
        .put_slot(SlotKey::new("header"), Slot::builder(GRID.grid(0, 4)).build())
        .build();
    let optional = optional_group_layout("outputs", 2);
    let mut builder = Diagram::builder();
    builder.add_layout(header).add_optional_layout(optional);
    builder.auto_insert_into_slot_group(&SlotGroupKey::new("outputs"))
        .insert_into_next_slot(Vec::new())
        .insert_each_safe(Vec::new());
    builder.insert_into_slot(&SlotKey::new("header"), Vec::new());
    let diagram = builder.build();
    assert!(diagram.layout().slot_groups().is_empty());
    assert_eq!(diagram.layout().all_slots().count(), 1);
    assert!(diagram.interactables().is_empty());
    assert!(diagram.slot_insertions().is_empty());
}

#[test]
#[should_panic(expected = "slot group is full")]
fn test_auto_insert_exhaustion_panics() {
    let mut builder = Diagram::builder();
    builder.add_optional_layout(optional_group_layout("outputs", 2));
    let mut cursor = builder.auto_insert_into_slot_group(&SlotGroupKey::new("outputs"));
    cursor.insert_into_next_slot(items(&["a"]));
    cursor.insert_into_next_slot(items(&["b"]));
    cursor.insert_into_next_slot(items(&["c"]));
}

#[test]
fn test_insert_each_safe_overflows_into_last_slot() {
    let key = SlotGroupKey::new("outputs");
    let mut builder = Diagram::builder();
    builder.add_optional_layout(optional_group_layout("outputs", 2));
    builder.auto_insert_into_slot_group(&key).insert_each_safe(items(&["a", "b", "c"]));
    let diagram = builder.build();

    let groups = diagram.interactables();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].position(), GRID.grid(0, 0));
    assert_eq!(groups[1].position(), GRID.grid(0, 0) + point(18, 0));
    assert_eq!(diagram.insertion_count(&LayoutKey::SlotGroup(key)), 2);

    // the overflowed components share the second slot
    let state = DiagramState::new();
    let hovered = diagram.find_hovered(&state, groups[1].position()).unwrap();
    assert_eq!(hovered.position(), groups[1].position());
    assert!(diagram.find_hovered(&state, point(0, 0)).is_none());
}

#[test]
fn test_auto_progress_persists_between_cursors() {
    let key = SlotGroupKey::new("outputs");
    let mut builder = Diagram::builder();
    builder.add_optional_layout(optional_group_layout("outputs", 3));
    builder.auto_insert_into_slot_group(&key).insert_into_next_slot(items(&["a"]));
    let mut cursor = builder.auto_insert_into_slot_group(&key);
    assert_eq!(cursor.remaining(), 2);
    cursor.insert_each_group_safe(vec![items(&["b"]), Vec::new(), items(&["c", "d"]), items(&["e"])]);
    assert_eq!(cursor.remaining(), 0);
    // already full: dropped with a warning instead of panicking
    cursor.insert_each_safe(items(&["f"]));
    let diagram = builder.build();
    assert_eq!(diagram.interactables().len(), 3);
    assert_eq!(diagram.interactables()[2].position(), GRID.grid(0, 0) + point(36, 0));
}

#[test]
fn test_manual_insert_uses_slot_coordinates() {
    let key = SlotGroupKey::new("grid");
    let layout = Layout::builder()
        .put_slot_group(key.clone(), SlotGroup::builder(2, 2, point(20, 20), Direction::SE).build())
        .build();
    let mut builder = Diagram::builder();
    builder.add_optional_layout(layout);
    builder.manual_insert_into_slot_group(&key)
        .insert_into_slot(1, 1, items(&["a"]))
        .insert_into_slot(0, 1, Vec::new());
    let diagram = builder.build();
    assert_eq!(diagram.interactables().len(), 1);
    assert_eq!(diagram.interactables()[0].position(), point(38, 38));
}

#[test]
#[should_panic(expected = "could not find slot with key")]
fn test_missing_slot_key_panics() {
    let mut builder = Diagram::builder();
    builder.add_layout(Layout::default());
    builder.insert_into_slot(&SlotKey::new("missing"), items(&["a"]));
}

#[test]
fn test_zero_shown_layouts_fails() {
    let layout = Arc::new(Layout::builder()
        .put_slot(SlotKey::new("input"), Slot::builder(GRID.grid(0, 0)).build())
        .build());
    let mut builder = Diagram::builder();
    builder.add_optional_layout(Arc::clone(&layout));
    assert!(builder.try_build().is_err());

    let mut builder = Diagram::builder();
    builder.add_optional_layout(Arc::clone(&layout));
    builder.insert_into_slot(&SlotKey::new("input"), items(&["a"]));
    assert!(builder.try_build().is_ok());

    // re-adding as required updates the flag rather than duplicating
    let mut builder = Diagram::builder();
    builder.add_optional_layout(Arc::clone(&layout)).add_layout(Arc::clone(&layout));
    let diagram = builder.build();
    assert_eq!(diagram.layout().slots().len(), 1);
}

#[test]
#[should_panic(expected = "no shown layouts")]
fn test_build_without_shown_layouts_panics() {
    let mut builder = Diagram::builder();
    builder.add_optional_layout(optional_group_layout("outputs", 1));
    builder.build();
}

#[test]
fn test_end_to_end() {
    let header = Layout::builder()
        .add_interactable(CustomInteractable::builder(
            ComponentLabel::new(Component::item("minecraft:book", 0), point(20, 11)),
        ).build())
        .build();
    let outputs = optional_group_layout("outputs", 2);
    let mut builder = Diagram::builder();
    builder.add_layout(header).add_optional_layout(outputs);
    builder.auto_insert_into_slot_group(&SlotGroupKey::new("outputs"))
        .insert_into_next_slot(items(&["minecraft:stone"]));
    let diagram = builder.build();

    // the filled slot and the button
    assert_eq!(diagram.interactables().len(), 2);
    // the empty second slot is still there
    assert_eq!(diagram.layout().all_slots().count(), 2);

    let state = DiagramState::new();
    let group = diagram.layout().slot_group(&SlotGroupKey::new("outputs")).unwrap();
    assert_eq!(diagram.dimension(&state), group.max_dimension());
    assert_eq!(diagram.dimension(&state), dimension(37, 19));

    // the filled slot wins over the empty slot beneath it
    let hovered = diagram.find_hovered(&state, GRID.grid(0, 0)).unwrap();
    assert!(std::ptr::eq(
        hovered as *const dyn Interactable as *const u8,
        &*diagram.interactables()[0] as *const dyn Interactable as *const u8,
    ));
}


#[cfg(test)]
#[derive(Debug)]
struct ToggleSelector(Vec<Diagram>);

#[cfg(test)]
impl DiagramSelector for ToggleSelector {
    fn active_diagrams<'a>(&'a self, state: &DiagramState) -> Vec<&'a Diagram> {
        vec![&self.0[state.cycle_index(self.0.len())]]
    }
}

#[test]
fn test_composite_exposes_active_sub_diagram() {
    let sub = |pos: Point| {
        let layout = Layout::builder()
            .put_slot(SlotKey::new("sub"), Slot::builder(pos).build())
            .build();
        Diagram::builder().add_layout(layout).build()
    };
    let base = {
        let layout = Layout::builder()
            .put_slot(SlotKey::new("base"), Slot::builder(GRID.grid(0, 0)).build())
            .build();
        Diagram::builder().add_layout(layout).build()
    };
    let composite = Diagram::composite(
        base,
        ToggleSelector(vec![sub(GRID.grid(2, 0)), sub(GRID.grid(0, 8))]),
    );

    let mut state = DiagramState::new();
    assert!(composite.find_hovered(&state, GRID.grid(2, 0)).is_some());
    assert!(composite.find_hovered(&state, GRID.grid(0, 8)).is_none());
    assert_eq!(composite.all_interactables(&state).len(), 2);

    state.scroll(crate::state::ScrollDirection::Down);
    assert!(composite.find_hovered(&state, GRID.grid(2, 0)).is_none());
    assert!(composite.find_hovered(&state, GRID.grid(0, 8)).is_some());
    assert_eq!(composite.dimension(&state).h, GRID.grid(0, 8).y + 8);
}
