//! Static diagram layouts.
//!
//! A layout is everything about a diagram that doesn't depend on what gets
//! inserted into it: lines, labels, buttons, and the empty slots. Generators
//! usually build a handful of layouts once, then build many diagrams out of
//! them.

use crate::{
    context::DrawContext,
    geom::{Dimension, dimension_max_all},
    interactable::{Drawable, Interactable},
    lines::Lines,
    slot::Slot,
    slot_group::SlotGroup,
};
use std::{
    collections::BTreeMap,
    fmt::{self, Formatter, Display},
    sync::Arc,
};


/// Key of a standalone slot within a layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey(pub String);

/// Key of a slot group within a layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotGroupKey(pub String);

/// Either kind of key, for counting insertions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayoutKey {
    Slot(SlotKey),
    SlotGroup(SlotGroupKey),
}

impl SlotKey {
    pub fn new(key: impl Into<String>) -> Self {
        SlotKey(key.into())
    }
}

impl SlotGroupKey {
    pub fn new(key: impl Into<String>) -> Self {
        SlotGroupKey(key.into())
    }
}

impl Display for SlotKey {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Display for SlotGroupKey {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<SlotKey> for LayoutKey {
    fn from(key: SlotKey) -> Self {
        LayoutKey::Slot(key)
    }
}

impl From<SlotGroupKey> for LayoutKey {
    fn from(key: SlotGroupKey) -> Self {
        LayoutKey::SlotGroup(key)
    }
}


#[derive(Debug, Clone, Default)]
pub struct Layout {
    lines: Vec<Lines>,
    labels: Vec<Arc<dyn Drawable>>,
    /// Buttons and such. Not counted by `max_dimension`, since the diagram
    /// accounts for them along with its inserted content.
    interactables: Vec<Arc<dyn Interactable>>,
    slots: BTreeMap<SlotKey, Slot>,
    slot_groups: BTreeMap<SlotGroupKey, SlotGroup>,
}

impl Layout {
    pub fn builder() -> LayoutBuilder {
        LayoutBuilder::default()
    }

    pub fn to_builder(&self) -> LayoutBuilder {
        LayoutBuilder { layout: self.clone() }
    }

    pub fn lines(&self) -> &[Lines] {
        &self.lines
    }

    pub fn labels(&self) -> &[Arc<dyn Drawable>] {
        &self.labels
    }

    pub fn interactables(&self) -> &[Arc<dyn Interactable>] {
        &self.interactables
    }

    pub fn slots(&self) -> &BTreeMap<SlotKey, Slot> {
        &self.slots
    }

    pub fn slot_groups(&self) -> &BTreeMap<SlotGroupKey, SlotGroup> {
        &self.slot_groups
    }

    pub fn slot(&self, key: &SlotKey) -> Option<&Slot> {
        self.slots.get(key)
    }

    pub fn slot_group(&self, key: &SlotGroupKey) -> Option<&SlotGroup> {
        self.slot_groups.get(key)
    }

    /// Standalone slots, followed by the slots of each slot group.
    pub fn all_slots(&self) -> impl Iterator<Item = &Slot> + '_ {
        self.slots.values()
            .chain(self.slot_groups.values().flat_map(|group| group.slots()))
    }

    /// Everything drawn in the background, in drawing order.
    fn drawables(&self) -> Vec<&dyn Drawable> {
        let mut drawables: Vec<&dyn Drawable> = Vec::new();
        drawables.extend(self.lines.iter().map(|lines| lines as &dyn Drawable));
        drawables.extend(self.slot_groups.values().map(|group| group as &dyn Drawable));
        drawables.extend(self.slots.values().map(|slot| slot as &dyn Drawable));
        drawables.extend(self.labels.iter().map(|label| &**label as &dyn Drawable));
        drawables
    }
}


impl Drawable for Layout {
    fn max_dimension(&self) -> Dimension {
        dimension_max_all(self.drawables().into_iter().map(|drawable| drawable.max_dimension()))
    }

    fn draw(&self, ctx: &mut DrawContext) {
        for drawable in self.drawables() {
            drawable.draw(ctx);
        }
    }
}


#[derive(Debug, Clone, Default)]
pub struct LayoutBuilder {
    layout: Layout,
}

impl LayoutBuilder {
    pub fn add_lines(mut self, lines: Lines) -> Self {
        self.layout.lines.push(lines);
        self
    }

    pub fn add_all_lines<I: IntoIterator<Item = Lines>>(mut self, lines: I) -> Self {
        self.layout.lines.extend(lines);
        self
    }

    pub fn add_label<D: Drawable + 'static>(self, label: D) -> Self {
        self.add_shared_label(Arc::new(label))
    }

    pub fn add_shared_label(mut self, label: Arc<dyn Drawable>) -> Self {
        self.layout.labels.push(label);
        self
    }

    pub fn add_all_labels<I, D>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Drawable + 'static,
    {
        for label in labels {
            self = self.add_label(label);
        }
        self
    }

    pub fn add_interactable<T: Interactable + 'static>(self, interactable: T) -> Self {
        self.add_shared_interactable(Arc::new(interactable))
    }

    pub fn add_shared_interactable(mut self, interactable: Arc<dyn Interactable>) -> Self {
        self.layout.interactables.push(interactable);
        self
    }

    /// Add a slot, replacing any slot with the same key.
    pub fn put_slot(mut self, key: SlotKey, slot: Slot) -> Self {
        self.layout.slots.insert(key, slot);
        self
    }

    /// Add a slot group, replacing any slot group with the same key.
    pub fn put_slot_group(mut self, key: SlotGroupKey, slot_group: SlotGroup) -> Self {
        self.layout.slot_groups.insert(key, slot_group);
        self
    }

    /// Merge in everything from another layout.
    ///
    /// Keys colliding with ones already present silently replace them, so
    /// merged layouts should use distinct keys.
    pub fn add_sub_layout(mut self, other: &Layout) -> Self {
        let layout = &mut self.layout;
        layout.lines.extend(other.lines.iter().cloned());
        layout.labels.extend(other.labels.iter().cloned());
        layout.interactables.extend(other.interactables.iter().cloned());
        layout.slots.extend(other.slots.iter().map(|(k, v)| (k.clone(), v.clone())));
        layout.slot_groups.extend(other.slot_groups.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    pub fn build(self) -> Layout {
        self.layout
    }
}


#[cfg(test)]
use crate::{
    component::Component,
    geom::{point, dimension},
    grid::{GRID, Direction},
    interactable::BoundedDrawable,
    text::ComponentLabel,
    tooltip::Tooltip,
};

#[test]
fn test_all_slots_order() {
    let layout = Layout::builder()
        .put_slot_group(
            SlotGroupKey::new("outputs"),
            SlotGroup::builder(2, 1, GRID.grid(4, 0), Direction::E).build(),
        )
        .put_slot(SlotKey::new("input"), Slot::builder(GRID.grid(0, 0)).build())
        .build();
    let positions = layout.all_slots().map(|slot| slot.position()).collect::<Vec<_>>();
    assert_eq!(positions, vec![GRID.grid(0, 0), GRID.grid(4, 0), GRID.grid(4, 0) + point(18, 0)]);
}

#[test]
fn test_sub_layout_last_write_wins() {
    let key = SlotKey::new("input");
    let a = Layout::builder()
        .put_slot(key.clone(), Slot::builder(point(0, 0)).set_tooltip(Tooltip::create("a")).build())
        .add_label(ComponentLabel::new(Component::item("minecraft:stone", 0), point(50, 50)))
        .build();
    let b = Layout::builder()
        .put_slot(key.clone(), Slot::builder(point(0, 0)).set_tooltip(Tooltip::create("b")).build())
        .build();
    let merged = Layout::builder().add_sub_layout(&a).add_sub_layout(&b).build();
    assert_eq!(merged.slots().len(), 1);
    assert_eq!(merged.slot(&key).map(Slot::tooltip), Some(&Tooltip::create("b")));
    assert_eq!(merged.labels().len(), 1);
}

#[test]
fn test_max_dimension_covers_contents() {
    let layout = Layout::builder()
        .add_lines(Lines::builder(point(0, 0)).add_segment(point(0, 100)).build())
        .put_slot(SlotKey::new("input"), Slot::builder(point(150, 11)).build())
        .build();
    assert_eq!(layout.max_dimension(), dimension(158, 101));
    assert_eq!(Layout::default().max_dimension(), dimension(0, 0));
}
