//! Rectangular arrays of slots.

use crate::{
    context::DrawContext,
    geom::{Point, Dimension, dimension_max_all},
    grid::{Direction, SLOT_WIDTH},
    interactable::{Drawable, BoundedDrawable},
    slot::{Slot, DrawFn, default_draw_fn},
    tooltip::Tooltip,
};
use std::sync::Arc;


/// A `width` by `height` group of slots, stored left-to-right then
/// top-to-bottom. This is also the order an auto-insertion fills them in.
#[derive(Debug, Clone)]
pub struct SlotGroup {
    width: i32,
    height: i32,
    slots: Vec<Slot>,
}

impl SlotGroup {
    /// Group anchored at `position`, growing in `direction` from it.
    ///
    /// Panics if either size is not positive.
    pub fn builder(width: i32, height: i32, position: Point, direction: Direction) -> SlotGroupBuilder {
        assert!(width > 0, "width too small: {}", width);
        assert!(height > 0, "height too small: {}", height);
        SlotGroupBuilder {
            width,
            height,
            position,
            direction,
            slot_width: SLOT_WIDTH,
            default_tooltip: Tooltip::empty(),
            default_draw_fn: default_draw_fn(),
            overrides: vec![None; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slot at `(x, y)`.
    ///
    /// The stride is the height, not the width, so this only agrees with
    /// row-major order for square groups. Layout code addressing slots by
    /// coordinate relies on this.
    pub fn slot(&self, x: i32, y: i32) -> &Slot {
        &self.slots[(x + y * self.height) as usize]
    }
}

impl Drawable for SlotGroup {
    fn max_dimension(&self) -> Dimension {
        dimension_max_all(self.slots.iter().map(Drawable::max_dimension))
    }

    fn draw(&self, ctx: &mut DrawContext) {
        for slot in &self.slots {
            slot.draw(ctx);
        }
    }
}


pub struct SlotGroupBuilder {
    width: i32,
    height: i32,
    position: Point,
    direction: Direction,
    slot_width: i32,
    default_tooltip: Tooltip,
    default_draw_fn: DrawFn,
    /// Custom slots, indexed `x + y * width`.
    overrides: Vec<Option<Slot>>,
}

impl SlotGroupBuilder {
    /// Distance between adjacent slot centers. Panics if not positive.
    pub fn set_slot_width(mut self, slot_width: i32) -> Self {
        assert!(slot_width > 0, "slot width too small: {}", slot_width);
        self.slot_width = slot_width;
        self
    }

    pub fn set_default_tooltip(mut self, tooltip: Tooltip) -> Self {
        self.default_tooltip = tooltip;
        self
    }

    pub fn set_default_draw_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut DrawContext, Point) + Send + Sync + 'static,
    {
        self.default_draw_fn = Arc::new(f);
        self
    }

    /// Use a custom slot at `(x, y)`. Its position is overwritten when the
    /// group is built.
    pub fn set_slot(mut self, x: i32, y: i32, slot: Slot) -> Self {
        assert!(
            (0..self.width).contains(&x) && (0..self.height).contains(&y),
            "slot ({}, {}) out of bounds for {}x{} group", x, y, self.width, self.height,
        );
        self.overrides[(x + y * self.width) as usize] = Some(slot);
        self
    }

    pub fn build(self) -> SlotGroup {
        let SlotGroupBuilder {
            width,
            height,
            position,
            direction,
            slot_width,
            default_tooltip,
            default_draw_fn,
            mut overrides,
        } = self;

        let offset_x = (direction.x_factor() - 1) * (width - 1) * slot_width / 2;
        let offset_y = (direction.y_factor() - 1) * (height - 1) * slot_width / 2;
        let top_left = position + Point::new(offset_x, offset_y);

        let mut slots = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let pos = top_left + Point::new(x * slot_width, y * slot_width);
                let builder = match overrides[(x + y * width) as usize].take() {
                    Some(slot) => slot.to_builder(),
                    None => Slot::builder(pos)
                        .set_slot_width(slot_width)
                        .set_tooltip(default_tooltip.clone())
                        .set_shared_draw_fn(Arc::clone(&default_draw_fn)),
                };
                slots.push(builder.set_position(pos).build());
            }
        }
        SlotGroup { width, height, slots }
    }
}


#[cfg(test)]
use crate::{geom::point, grid::GRID};

#[test]
fn test_slot_group_size_and_order() {
    for &w in &[1, 2, 5] {
        for &h in &[1, 2, 5] {
            let group = SlotGroup::builder(w, h, GRID.grid(6, 6), Direction::C).build();
            assert_eq!(group.slots().len(), (w * h) as usize);
            for (i, pair) in group.slots().windows(2).enumerate() {
                let (a, b) = (pair[0].position(), pair[1].position());
                if (i as i32 + 1) % w == 0 {
                    // wrapped to the next row
                    assert!(b.y > a.y);
                    assert_eq!(b.x, group.slots()[0].position().x);
                } else {
                    assert_eq!(b.y, a.y);
                    assert_eq!(b.x, a.x + SLOT_WIDTH);
                }
            }
        }
    }
}

#[test]
fn test_growth_direction() {
    let anchor = GRID.grid(6, 0);
    let east = SlotGroup::builder(3, 1, anchor, Direction::E).build();
    assert_eq!(east.slots()[0].position(), anchor);
    assert_eq!(east.slots()[2].position(), anchor + point(36, 0));

    let west = SlotGroup::builder(3, 1, anchor, Direction::W).build();
    assert_eq!(west.slots()[2].position(), anchor);

    let center = SlotGroup::builder(3, 3, anchor, Direction::C).build();
    assert_eq!(center.slots()[4].position(), anchor);

    let south = SlotGroup::builder(2, 2, anchor, Direction::S).build();
    assert_eq!(south.slots()[0].position(), anchor + point(-9, 0));
}

#[test]
fn test_slot_stride_is_height() {
    let group = SlotGroup::builder(3, 2, point(0, 0), Direction::SE).build();
    assert_eq!(group.slot(1, 1).position(), group.slots()[3].position());
    let square = SlotGroup::builder(2, 2, point(0, 0), Direction::SE).build();
    assert_eq!(square.slot(1, 1).position(), point(18, 18));
}

#[test]
fn test_custom_slot_position_overwritten() {
    let custom = Slot::builder(point(-100, -100))
        .set_tooltip(Tooltip::create("custom"))
        .build();
    let group = SlotGroup::builder(2, 1, point(0, 0), Direction::E)
        .set_default_tooltip(Tooltip::create("default"))
        .set_slot(1, 0, custom)
        .build();
    assert_eq!(group.slots()[1].position(), point(18, 0));
    assert_eq!(group.slots()[1].tooltip(), &Tooltip::create("custom"));
    assert_eq!(group.slots()[0].tooltip(), &Tooltip::create("default"));
}

#[test]
#[should_panic(expected = "height too small")]
fn test_zero_height_panics() {
    SlotGroup::builder(2, 0, point(0, 0), Direction::C);
}
