//! State passed down through drawing calls.

use crate::{
    config::EngineConfig,
    state::DiagramState,
};
use draw::Canvas;


/// Modifier keys held by the user.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
}

/// Everything a drawable needs to draw itself.
pub struct DrawContext<'c> {
    pub canvas: &'c mut dyn Canvas,
    pub state: &'c DiagramState,
    pub config: &'c EngineConfig,
    pub modifiers: Modifiers,
}

impl<'c> DrawContext<'c> {
    pub fn new(
        canvas: &'c mut dyn Canvas,
        state: &'c DiagramState,
        config: &'c EngineConfig,
        modifiers: Modifiers,
    ) -> Self {
        DrawContext { canvas, state, config, modifiers }
    }
}
