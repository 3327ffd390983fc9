//! Game data the generators build diagrams from.
//!
//! In the game this comes from the mod loader, the fluid registry and the
//! ore dictionary. Here it's a JSON file, or a small built-in sample.

use diagram::component::{Component, DisplayComponent};
use std::{
    collections::BTreeMap,
    path::Path,
    fs::File,
    io::BufReader,
};
use serde::{Serialize, Deserialize};
use anyhow::*;


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: String,
    #[serde(default)]
    pub damage: i32,
}

impl ItemRef {
    pub fn new(id: impl Into<String>, damage: i32) -> Self {
        ItemRef { id: id.into(), damage }
    }

    pub fn component(&self) -> Component {
        Component::item(self.id.as_str(), self.damage)
    }

    pub fn matches(&self, component: &Component) -> bool {
        match component {
            &Component::Item(ref item) => &*item.id == self.id && item.damage == self.damage,
            &Component::Fluid(_) => false,
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedMod {
    pub id: String,
    pub version: String,
}

/// An item which holds some amount of a fluid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluidContainer {
    pub item: ItemRef,
    /// Amount held, in millibuckets.
    pub amount: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluidEntry {
    pub id: String,
    /// Block form of the fluid, if it can be placed.
    #[serde(default)]
    pub block: Option<ItemRef>,
    #[serde(default)]
    pub containers: Vec<FluidContainer>,
}

impl FluidEntry {
    pub fn component(&self) -> Component {
        Component::fluid(self.id.as_str())
    }

    pub fn container_components(&self) -> Vec<DisplayComponent> {
        self.containers.iter()
            .map(|container| DisplayComponent::new(container.item.component())
                .with_additional_info(format!("{}L", container.amount)))
            .collect()
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub loaded_mods: Vec<LoadedMod>,
    pub fluids: Vec<FluidEntry>,
    /// Ore dictionary name to the items registered under it.
    pub ore_dictionary: BTreeMap<String, Vec<ItemRef>>,
}

impl Catalog {
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::try_read(path)
            .with_context(|| format!("unable to read catalog from {}", path.display()))
    }

    fn try_read(path: &Path) -> Result<Self> {
        Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
    }

    pub fn is_mod_loaded(&self, mod_id: &str) -> bool {
        self.mod_version(mod_id).is_some()
    }

    pub fn mod_version(&self, mod_id: &str) -> Option<&str> {
        self.loaded_mods.iter()
            .find(|m| m.id == mod_id)
            .map(|m| m.version.as_str())
    }

    /// The fluid a component is, or is contained in, or is the block of.
    pub fn fluid_for(&self, component: &Component) -> Option<&FluidEntry> {
        match component {
            &Component::Fluid(ref fluid) => self.fluids.iter().find(|entry| entry.id == &*fluid.id),
            &Component::Item(_) => self.fluids.iter().find(|entry| {
                entry.block.as_ref().map(|block| block.matches(component)).unwrap_or(false)
                    || entry.containers.iter().any(|container| container.item.matches(component))
            }),
        }
    }

    /// Ore dictionary names the component is registered under, in name order.
    pub fn ore_names(&self, component: &Component) -> Vec<&str> {
        self.ore_dictionary.iter()
            .filter(|&(_, items)| items.iter().any(|item| item.matches(component)))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn ore_items(&self, ore_name: &str) -> &[ItemRef] {
        self.ore_dictionary.get(ore_name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A small vanilla-flavoured catalog, used when none is given.
    pub fn sample() -> Self {
        let mut ore_dictionary = BTreeMap::new();
        ore_dictionary.insert("ingotIron".to_owned(), vec![ItemRef::new("minecraft:iron_ingot", 0)]);
        ore_dictionary.insert("logWood".to_owned(), (0..4)
            .map(|damage| ItemRef::new("minecraft:log", damage))
            .chain((0..2).map(|damage| ItemRef::new("minecraft:log2", damage)))
            .collect());
        ore_dictionary.insert("plankWood".to_owned(), (0..6)
            .map(|damage| ItemRef::new("minecraft:planks", damage))
            .collect());
        ore_dictionary.insert("treeWood".to_owned(), vec![
            ItemRef::new("minecraft:log", 0),
            ItemRef::new("minecraft:log", 1),
        ]);

        Catalog {
            loaded_mods: vec![
                LoadedMod { id: "Forge".to_owned(), version: "10.13.4.1614".to_owned() },
                LoadedMod { id: "NotEnoughItems".to_owned(), version: "1.0.5.120".to_owned() },
            ],
            fluids: vec![
                FluidEntry {
                    id: "water".to_owned(),
                    block: Some(ItemRef::new("minecraft:water", 0)),
                    containers: vec![
                        FluidContainer { item: ItemRef::new("minecraft:water_bucket", 0), amount: 1000 },
                        FluidContainer { item: ItemRef::new("minecraft:potion", 0), amount: 250 },
                    ],
                },
                FluidEntry {
                    id: "lava".to_owned(),
                    block: Some(ItemRef::new("minecraft:lava", 0)),
                    containers: vec![
                        FluidContainer { item: ItemRef::new("minecraft:lava_bucket", 0), amount: 1000 },
                    ],
                },
            ],
            ore_dictionary,
        }
    }
}


#[test]
fn test_fluid_for() {
    let catalog = Catalog::sample();
    let water = Some("water");
    assert_eq!(catalog.fluid_for(&Component::fluid("water")).map(|f| f.id.as_str()), water);
    assert_eq!(catalog.fluid_for(&Component::item("minecraft:water_bucket", 0)).map(|f| f.id.as_str()), water);
    assert_eq!(catalog.fluid_for(&Component::item("minecraft:water", 0)).map(|f| f.id.as_str()), water);
    assert!(catalog.fluid_for(&Component::item("minecraft:water_bucket", 1)).is_none());
    assert!(catalog.fluid_for(&Component::fluid("milk")).is_none());
}

#[test]
fn test_ore_names() {
    let catalog = Catalog::sample();
    assert_eq!(catalog.ore_names(&Component::item("minecraft:log", 1)), vec!["logWood", "treeWood"]);
    assert_eq!(catalog.ore_names(&Component::item("minecraft:log", 3)), vec!["logWood"]);
    assert!(catalog.ore_names(&Component::fluid("water")).is_empty());
    assert_eq!(catalog.ore_items("plankWood").len(), 6);
    assert!(catalog.ore_items("dustNothing").is_empty());
}

#[test]
fn test_mod_versions() {
    let mut catalog = Catalog::sample();
    assert!(catalog.is_mod_loaded("Forge"));
    assert!(!catalog.is_mod_loaded("gregtech"));
    catalog.loaded_mods.push(LoadedMod { id: "gregtech".to_owned(), version: "MC1710".to_owned() });
    assert_eq!(catalog.mod_version("gregtech"), Some("MC1710"));
}

#[test]
fn test_json_defaults() {
    let catalog: Catalog = serde_json::from_str(r#"{
        "fluids": [{ "id": "oil", "containers": [{ "item": { "id": "buildcraft:bucketOil" }, "amount": 1000 }] }]
    }"#).unwrap();
    assert!(catalog.loaded_mods.is_empty());
    assert_eq!(catalog.fluids[0].block, None);
    assert_eq!(catalog.fluids[0].containers[0].item.damage, 0);
    assert!(Catalog::read("/nonexistent/catalog.json").is_err());
}
