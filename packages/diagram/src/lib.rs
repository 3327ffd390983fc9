//! Layout and interaction engine for custom recipe diagrams.
//!
//! Generators describe diagrams declaratively: `Layout`s of grid-aligned
//! slots, slot groups, connector lines and labels, which a
//! `DiagramBuilder` fills with components. A `DiagramGroup` then serves
//! lookups against those diagrams, and handles drawing, scrolling and
//! clicking on behalf of the host through the `PageRenderer` callbacks.

#[macro_use]
extern crate tracing;

pub mod geom;
pub mod grid;
pub mod config;
pub mod format;
pub mod component;
pub mod effect;
pub mod context;
pub mod tooltip;
pub mod interactable;
pub mod slot;
pub mod slot_group;
pub mod lines;
pub mod text;
pub mod layout;
pub mod diagram;
pub mod state;
pub mod matcher;
pub mod group_info;
pub mod gui_manager;
pub mod group;

pub mod prelude {
    pub use crate::{
        component::{Component, DisplayComponent},
        config::EngineConfig,
        context::Modifiers,
        diagram::{Diagram, DiagramBuilder, DiagramSelector},
        effect::{HostEffect, HostEffects, Lookup},
        geom::{Point, Dimension, PointExt, point, dimension},
        grid::{Grid, Direction, GRID},
        group::{DiagramGroup, PageRenderer, KeyBinding},
        group_info::{DiagramGroupInfo, DiagramGroupVisibility},
        gui_manager::GuiFrame,
        interactable::{
            Drawable,
            BoundedDrawable,
            Interactable,
            RecipeType,
            CustomInteractable,
        },
        layout::{Layout, SlotKey, SlotGroupKey},
        lines::Lines,
        matcher::{DiagramMatcher, ComponentDiagramMatcher},
        slot::Slot,
        slot_group::SlotGroup,
        state::{DiagramState, ScrollDirection},
        text::{Text, ComponentLabel},
        tooltip::{Tooltip, TextFormatting},
    };
}
