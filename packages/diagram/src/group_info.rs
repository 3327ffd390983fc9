//! Static description of a diagram group.

use crate::{
    component::Component,
    context::Modifiers,
    diagram::Diagram,
    grid::{TOTAL_HEIGHT, GRID_HEIGHT},
};
use std::{
    fmt::{self, Formatter, Debug},
    sync::Arc,
};
use serde::{Serialize, Deserialize};


/// When a group's diagrams are offered to the user.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagramGroupVisibility {
    AlwaysShown,
    AlwaysHidden,
    ShowOnShift,
    HideOnShift,
    ShowOnCtrl,
    HideOnCtrl,
    /// Never shown, and the group isn't even generated.
    Disabled,
}

impl DiagramGroupVisibility {
    pub const ALL: [DiagramGroupVisibility; 7] = [
        DiagramGroupVisibility::AlwaysShown,
        DiagramGroupVisibility::AlwaysHidden,
        DiagramGroupVisibility::ShowOnShift,
        DiagramGroupVisibility::HideOnShift,
        DiagramGroupVisibility::ShowOnCtrl,
        DiagramGroupVisibility::HideOnCtrl,
        DiagramGroupVisibility::Disabled,
    ];

    /// Name as stored in config files.
    pub fn name(self) -> &'static str {
        match self {
            DiagramGroupVisibility::AlwaysShown => "ALWAYS_SHOWN",
            DiagramGroupVisibility::AlwaysHidden => "ALWAYS_HIDDEN",
            DiagramGroupVisibility::ShowOnShift => "SHOW_ON_SHIFT",
            DiagramGroupVisibility::HideOnShift => "HIDE_ON_SHIFT",
            DiagramGroupVisibility::ShowOnCtrl => "SHOW_ON_CTRL",
            DiagramGroupVisibility::HideOnCtrl => "HIDE_ON_CTRL",
            DiagramGroupVisibility::Disabled => "DISABLED",
        }
    }

    /// Parse a config name. Unknown names are logged and treated as
    /// `AlwaysShown`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL.iter()
            .copied()
            .find(|visibility| visibility.name() == name)
            .unwrap_or_else(|| {
                error!(%name, "invalid diagram group visibility, defaulting to ALWAYS_SHOWN");
                DiagramGroupVisibility::AlwaysShown
            })
    }

    pub fn is_shown(self, modifiers: Modifiers) -> bool {
        match self {
            DiagramGroupVisibility::AlwaysShown => true,
            DiagramGroupVisibility::AlwaysHidden => false,
            DiagramGroupVisibility::ShowOnShift => modifiers.shift,
            DiagramGroupVisibility::HideOnShift => !modifiers.shift,
            DiagramGroupVisibility::ShowOnCtrl => modifiers.ctrl,
            DiagramGroupVisibility::HideOnCtrl => !modifiers.ctrl,
            DiagramGroupVisibility::Disabled => false,
        }
    }
}

impl Default for DiagramGroupVisibility {
    fn default() -> Self {
        DiagramGroupVisibility::AlwaysShown
    }
}


pub type EmptyDiagramPredicate = Arc<dyn Fn(&Diagram) -> bool + Send + Sync>;

#[derive(Clone)]
pub struct DiagramGroupInfo {
    pub group_name: String,
    /// Full group id, also used as the lookup id for showing every diagram.
    pub group_id: String,
    pub icon: Component,
    /// Either 1 or 2. Two per page halves the usable height.
    pub diagrams_per_page: i32,
    /// Match components regardless of NBT, and strip NBT from lookups.
    pub ignore_nbt: bool,
    /// Decides whether a diagram has nothing worth showing in it.
    pub empty_diagram_predicate: EmptyDiagramPredicate,
    pub default_visibility: DiagramGroupVisibility,
    pub description: String,
}

impl DiagramGroupInfo {
    pub fn builder(
        group_name: impl Into<String>,
        group_id: impl Into<String>,
        icon: Component,
    ) -> DiagramGroupInfoBuilder {
        DiagramGroupInfoBuilder {
            info: DiagramGroupInfo {
                group_name: group_name.into(),
                group_id: group_id.into(),
                icon,
                diagrams_per_page: 1,
                ignore_nbt: true,
                empty_diagram_predicate: Arc::new(|_| false),
                default_visibility: DiagramGroupVisibility::AlwaysShown,
                description: String::new(),
            },
        }
    }

    pub fn is_empty_diagram(&self, diagram: &Diagram) -> bool {
        (self.empty_diagram_predicate)(diagram)
    }

    /// Pixel height the host gives each diagram.
    pub fn handler_height(&self) -> i32 {
        TOTAL_HEIGHT / self.diagrams_per_page
    }

    /// Rows of slots that fit in one diagram without scrolling.
    pub fn max_rows(&self) -> i32 {
        GRID_HEIGHT / self.diagrams_per_page
    }
}

impl Debug for DiagramGroupInfo {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("DiagramGroupInfo")
            .field("group_name", &self.group_name)
            .field("group_id", &self.group_id)
            .field("icon", &self.icon)
            .field("diagrams_per_page", &self.diagrams_per_page)
            .field("ignore_nbt", &self.ignore_nbt)
            .field("default_visibility", &self.default_visibility)
            .finish_non_exhaustive()
    }
}


pub struct DiagramGroupInfoBuilder {
    info: DiagramGroupInfo,
}

impl DiagramGroupInfoBuilder {
    /// Panics unless 1 or 2.
    pub fn set_diagrams_per_page(mut self, n: i32) -> Self {
        assert!(n == 1 || n == 2, "diagrams per page must be 1 or 2: {}", n);
        self.info.diagrams_per_page = n;
        self
    }

    pub fn set_ignore_nbt(mut self, ignore_nbt: bool) -> Self {
        self.info.ignore_nbt = ignore_nbt;
        self
    }

    pub fn set_empty_diagram_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Diagram) -> bool + Send + Sync + 'static,
    {
        self.info.empty_diagram_predicate = Arc::new(predicate);
        self
    }

    pub fn set_default_visibility(mut self, visibility: DiagramGroupVisibility) -> Self {
        self.info.default_visibility = visibility;
        self
    }

    pub fn set_description(mut self, description: impl Into<String>) -> Self {
        self.info.description = description.into();
        self
    }

    pub fn build(self) -> DiagramGroupInfo {
        self.info
    }
}


#[cfg(test)]
use crate::layout::Layout;

#[test]
fn test_visibility_names_round_trip() {
    for visibility in DiagramGroupVisibility::ALL {
        assert_eq!(DiagramGroupVisibility::from_name(visibility.name()), visibility);
        let json = serde_json::to_string(&visibility).unwrap();
        assert_eq!(json, format!("\"{}\"", visibility.name()));
    }
    assert_eq!(DiagramGroupVisibility::from_name("SOMETIMES"), DiagramGroupVisibility::AlwaysShown);
}

#[test]
fn test_visibility_modifiers() {
    let shift = Modifiers { shift: true, ctrl: false };
    let none = Modifiers::default();
    assert!(DiagramGroupVisibility::ShowOnShift.is_shown(shift));
    assert!(!DiagramGroupVisibility::ShowOnShift.is_shown(none));
    assert!(DiagramGroupVisibility::HideOnCtrl.is_shown(shift));
    assert!(!DiagramGroupVisibility::Disabled.is_shown(none));
}

#[test]
fn test_info_defaults() {
    let info = DiagramGroupInfo::builder("Test", "test", Component::item("minecraft:stone", 0))
        .set_empty_diagram_predicate(|diagram| diagram.slot_insertions().is_empty())
        .build();
    assert!(info.ignore_nbt);
    assert_eq!(info.diagrams_per_page, 1);
    let diagram = Diagram::builder().add_layout(Layout::default()).build();
    assert!(info.is_empty_diagram(&diagram));
}

#[test]
#[should_panic(expected = "1 or 2")]
fn test_bad_diagrams_per_page_panics() {
    DiagramGroupInfo::builder("Test", "test", Component::item("minecraft:stone", 0))
        .set_diagrams_per_page(3);
}

#[test]
fn test_height_per_page() {
    let one = DiagramGroupInfo::builder("Test", "test", Component::item("minecraft:stone", 0)).build();
    assert_eq!(one.handler_height(), TOTAL_HEIGHT);
    assert_eq!(one.max_rows(), 14);

    let two = DiagramGroupInfo::builder("Test", "test", Component::item("minecraft:stone", 0))
        .set_diagrams_per_page(2)
        .build();
    assert_eq!(two.handler_height(), TOTAL_HEIGHT / 2);
    assert_eq!(two.max_rows(), 7);
}
