//! Requests to the host, queued up by interactions.
//!
//! Interacting with a diagram never calls back into the host directly. It
//! pushes effects onto a queue, which the host drains once the callback
//! returns.

use crate::{
    component::{Component, ItemComponent},
    interactable::RecipeType,
};
use std::collections::VecDeque;


/// Something to look diagrams (or other recipes) up by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Lookup {
    /// A handler id, such as a diagram group id or a custom lookup id.
    Id(String),
    Component(Component),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEffect {
    /// Open the host's recipe view for the lookup.
    ShowRecipes {
        recipe_type: RecipeType,
        lookup: Lookup,
    },
    /// Add or remove a bookmark for an item.
    ToggleBookmark(ItemComponent),
}

/// Queue of host effects waiting to be applied.
#[derive(Debug, Clone, Default)]
pub struct HostEffects(VecDeque<HostEffect>);

impl HostEffects {
    pub fn new() -> Self {
        HostEffects(VecDeque::new())
    }

    pub fn show_recipes(&mut self, recipe_type: RecipeType, lookup: Lookup) {
        trace!(?recipe_type, ?lookup, "queueing recipe lookup");
        self.0.push_back(HostEffect::ShowRecipes { recipe_type, lookup });
    }

    pub fn toggle_bookmark(&mut self, item: ItemComponent) {
        trace!(?item, "queueing bookmark toggle");
        self.0.push_back(HostEffect::ToggleBookmark(item));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Take all queued effects, in the order they were queued.
    pub fn drain(&mut self) -> impl Iterator<Item = HostEffect> + '_ {
        self.0.drain(..)
    }
}
