//! Engine-wide options, threaded explicitly through the engine.

use serde::{Serialize, Deserialize};


/// Immutable options that change how diagrams are loaded, drawn, and
/// interacted with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Keep diagrams which the group's empty-diagram predicate rejects.
    pub show_empty_diagrams: bool,
    /// Pixels scrolled per mouse wheel notch.
    pub scroll_speed: i32,
    /// Holding ctrl fast-forwards component cycling, and ctrl+shift rewinds it.
    pub ctrl_fast_forward: bool,
    /// Always scroll the diagram with the mouse wheel rather than turning
    /// the page when the diagram fits.
    pub disable_page_scroll: bool,
    /// Max number of cycled components listed in a tooltip while shift is
    /// held. Zero or less disables the listing.
    pub tooltip_max_cycle_count: i32,
    /// Draw a stack size of one rather than leaving it implicit.
    pub show_stack_size_one: bool,
    /// List registry ids and damage values in component tooltips.
    pub show_ids: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            show_empty_diagrams: false,
            scroll_speed: 12,
            ctrl_fast_forward: true,
            disable_page_scroll: false,
            tooltip_max_cycle_count: 8,
            show_stack_size_one: false,
            show_ids: false,
        }
    }
}


#[test]
fn test_partial_config_fills_defaults() {
    let config: EngineConfig = serde_json::from_str(r#"{ "scroll_speed": 20 }"#).unwrap();
    assert_eq!(config.scroll_speed, 20);
    assert!(config.ctrl_fast_forward);
    assert_eq!(config.tooltip_max_cycle_count, 8);
    assert!(!config.show_ids);

    let config: EngineConfig = serde_json::from_str(r#"{ "show_ids": true }"#).unwrap();
    assert!(config.show_ids);
}
