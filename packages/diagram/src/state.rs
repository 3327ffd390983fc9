//! Mutable per-session diagram state.

use crate::{
    config::EngineConfig,
    context::Modifiers,
    diagram::{Diagram, DiagramId},
};
use std::{
    any::Any,
    collections::HashMap,
    fmt::{self, Formatter, Debug},
    sync::Arc,
};


/// Ticks per step of component cycling.
pub const TICKS_PER_CYCLE: i32 = 20;


/// Mouse wheel direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// Either `-1` or `1`.
    pub fn factor(self) -> i32 {
        match self {
            ScrollDirection::Up => -1,
            ScrollDirection::Down => 1,
        }
    }
}


/// State of a diagram group's session. Drives component cycling, and can
/// carry arbitrary generator-defined state.
pub struct DiagramState {
    ticks: i32,
    custom: Option<Box<dyn Any + Send>>,
}

impl DiagramState {
    pub fn new() -> Self {
        DiagramState { ticks: 0, custom: None }
    }

    /// State carrying a generator-defined value, such as a
    /// `CustomDiagramState`.
    pub fn with_custom<T: Any + Send>(custom: T) -> Self {
        DiagramState { ticks: 0, custom: Some(Box::new(custom)) }
    }

    /// Advance by one host tick.
    ///
    /// Shift pauses cycling. With fast-forward enabled, ctrl skips ahead a
    /// whole cycle per tick, and ctrl+shift skips back. Ticks never go below
    /// zero.
    pub fn tick(&mut self, modifiers: Modifiers, config: &EngineConfig) {
        if config.ctrl_fast_forward && modifiers.ctrl {
            if modifiers.shift {
                self.ticks -= TICKS_PER_CYCLE;
            } else {
                self.ticks += TICKS_PER_CYCLE;
            }
        } else if !modifiers.shift {
            self.ticks += 1;
        }
        self.ticks = self.ticks.max(0);
    }

    /// Step cycling a whole cycle forwards or backwards.
    pub fn scroll(&mut self, direction: ScrollDirection) {
        self.ticks = (self.ticks + direction.factor() * TICKS_PER_CYCLE).max(0);
    }

    pub fn ticks(&self) -> i32 {
        self.ticks
    }

    pub fn cycle(&self) -> i32 {
        self.ticks / TICKS_PER_CYCLE
    }

    /// Current index into a cycle of length `len`. Panics if `len` is zero.
    pub fn cycle_index(&self, len: usize) -> usize {
        self.cycle().rem_euclid(len as i32) as usize
    }

    pub fn custom<T: Any>(&self) -> Option<&T> {
        self.custom.as_ref().and_then(|custom| custom.downcast_ref())
    }

    pub fn custom_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.custom.as_mut().and_then(|custom| custom.downcast_mut())
    }
}

impl Default for DiagramState {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for DiagramState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("DiagramState")
            .field("ticks", &self.ticks)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}


/// Generator-defined state: a value per diagram, created on demand, plus one
/// shared value.
///
/// Stored inside `DiagramState` via `DiagramState::with_custom`.
pub struct CustomDiagramState<T, U> {
    per_diagram: HashMap<DiagramId, T>,
    init: Arc<dyn Fn(&Diagram) -> T + Send + Sync>,
    global: U,
}

impl<T, U> CustomDiagramState<T, U> {
    pub fn new<F>(init: F, global: U) -> Self
    where
        F: Fn(&Diagram) -> T + Send + Sync + 'static,
    {
        CustomDiagramState {
            per_diagram: HashMap::new(),
            init: Arc::new(init),
            global,
        }
    }

    /// State for the diagram, created if this is the first time it's asked
    /// for.
    pub fn state(&mut self, diagram: &Diagram) -> &mut T {
        let init = &self.init;
        self.per_diagram.entry(diagram.id()).or_insert_with(|| init(diagram))
    }

    /// State for the diagram, if it's been created yet.
    pub fn get(&self, diagram: &Diagram) -> Option<&T> {
        self.per_diagram.get(&diagram.id())
    }

    /// State for the diagram without creating it, falling back to a fresh
    /// initial value. For use while drawing, when state can't be mutated.
    pub fn peek(&self, diagram: &Diagram) -> T
    where
        T: Clone,
    {
        self.get(diagram).cloned().unwrap_or_else(|| (self.init)(diagram))
    }

    pub fn global(&self) -> &U {
        &self.global
    }

    pub fn global_mut(&mut self) -> &mut U {
        &mut self.global
    }
}

impl<T: Debug, U: Debug> Debug for CustomDiagramState<T, U> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("CustomDiagramState")
            .field("per_diagram", &self.per_diagram)
            .field("global", &self.global)
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
use crate::{
    geom::point,
    layout::Layout,
    slot::Slot,
    layout::SlotKey,
};

#[test]
fn test_ticking_cycles() {
    let config = EngineConfig::default();
    let mut state = DiagramState::new();
    for _ in 0..20 {
        state.tick(Modifiers::default(), &config);
    }
    assert_eq!(state.cycle(), 1);

    let mut indices = Vec::new();
    let mut state = DiagramState::new();
    for _ in 0..7 {
        indices.push(state.cycle_index(3));
        for _ in 0..TICKS_PER_CYCLE {
            state.tick(Modifiers::default(), &config);
        }
    }
    assert_eq!(indices, [0, 1, 2, 0, 1, 2, 0]);
}

#[test]
fn test_shift_pauses_and_ctrl_fast_forwards() {
    let config = EngineConfig::default();
    let mut state = DiagramState::new();
    state.tick(Modifiers { shift: true, ctrl: false }, &config);
    assert_eq!(state.ticks(), 0);
    state.tick(Modifiers { shift: false, ctrl: true }, &config);
    assert_eq!(state.cycle(), 1);
    state.tick(Modifiers { shift: true, ctrl: true }, &config);
    state.tick(Modifiers { shift: true, ctrl: true }, &config);
    // rewinding clamps at zero
    assert_eq!(state.ticks(), 0);

    let no_ff = EngineConfig { ctrl_fast_forward: false, ..EngineConfig::default() };
    state.tick(Modifiers { shift: false, ctrl: true }, &no_ff);
    assert_eq!(state.ticks(), 1);
}

#[test]
fn test_scroll_steps_cycles() {
    let mut state = DiagramState::new();
    state.scroll(ScrollDirection::Up);
    assert_eq!(state.ticks(), 0);
    state.scroll(ScrollDirection::Down);
    state.scroll(ScrollDirection::Down);
    assert_eq!(state.cycle_index(2), 0);
    assert_eq!(state.cycle(), 2);
}

#[test]
fn test_custom_state() {
    let diagram = Diagram::builder()
        .add_layout(Layout::builder()
            .put_slot(SlotKey::new("a"), Slot::builder(point(11, 11)).build())
            .build())
        .build();
    let custom = CustomDiagramState::new(|_: &Diagram| 5i32, String::from("global"));
    let mut state = DiagramState::with_custom(custom);
    assert!(state.custom::<u8>().is_none());

    let custom = state.custom_mut::<CustomDiagramState<i32, String>>().unwrap();
    assert!(custom.get(&diagram).is_none());
    *custom.state(&diagram) += 1;
    assert_eq!(custom.peek(&diagram), 6);
    assert_eq!(custom.global(), "global");
}
