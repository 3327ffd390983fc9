//! Diagrams listing the ore dictionary names of an item, and what else is
//! registered under them. Mostly useful for modpack development.

use crate::{
    catalog::Catalog,
    registry::{DiagramGenerator, GeneratorContext},
};
use diagram::{
    component::{Component, DisplayComponent},
    config::EngineConfig,
    diagram::Diagram,
    grid::{GRID, Direction, TOTAL_WIDTH},
    group::DiagramGroup,
    group_info::{DiagramGroupInfo, DiagramGroupVisibility},
    interactable::CustomInteractable,
    layout::{Layout, SlotGroupKey},
    matcher::DynamicDiagramMatcher,
    slot_group::SlotGroup,
    text::Text,
    tooltip::{Tooltip, TextFormatting},
};
use draw::FontMetrics;
use std::sync::Arc;


const SLOT_GROUP_KEY: &'static str = "key";


pub struct OreDictionary {
    info: DiagramGroupInfo,
    catalog: Arc<Catalog>,
    metrics: Arc<dyn FontMetrics + Send + Sync>,
}

impl OreDictionary {
    pub fn create(ctx: GeneratorContext) -> Box<dyn DiagramGenerator> {
        let icon = Component::item("minecraft:book", 0);
        let info = DiagramGroupInfo::builder("Ore Dictionary", ctx.group_id, icon)
            .set_diagrams_per_page(2)
            .set_default_visibility(DiagramGroupVisibility::Disabled)
            .set_description(
                "This diagram displays ore dictionary names and registered items.\n\
                Mostly useful for modpack development."
            )
            .build();
        Box::new(OreDictionary {
            info,
            catalog: ctx.catalog,
            metrics: ctx.metrics,
        })
    }
}

impl DiagramGenerator for OreDictionary {
    fn info(&self) -> &DiagramGroupInfo {
        &self.info
    }

    fn generate(&self, config: &EngineConfig) -> DiagramGroup {
        let catalog = Arc::clone(&self.catalog);
        let metrics = Arc::clone(&self.metrics);
        let matcher = DynamicDiagramMatcher::new(move |_, component| {
            catalog.ore_names(component).into_iter()
                .map(|ore_name| Arc::new(build_diagram(&catalog, &*metrics, ore_name)))
                .collect()
        });
        DiagramGroup::builder(self.info.clone(), matcher)
            .config(config.clone())
            .build()
    }
}

fn build_diagram(catalog: &Catalog, metrics: &(dyn FontMetrics + Send + Sync), ore_name: &str) -> Diagram {
    let groups = catalog.ore_items(ore_name).iter()
        .map(|item| vec![DisplayComponent::new(item.component())]);

    let mut builder = Diagram::builder();
    builder.add_layout(build_layout(metrics, ore_name));
    builder
        .auto_insert_into_slot_group(&SlotGroupKey::new(SLOT_GROUP_KEY))
        .insert_each_group_safe(groups);
    builder.build()
}

fn build_layout(metrics: &(dyn FontMetrics + Send + Sync), ore_name: &str) -> Layout {
    let small = metrics.string_width(ore_name) > TOTAL_WIDTH - 4;
    let text = Text::builder(ore_name, GRID.grid(6, 0), Direction::N)
        .set_small(small)
        .build(metrics);
    let label = CustomInteractable::builder(text)
        .tooltip(Tooltip::create_formatted("Ore dictionary name", TextFormatting::slot()))
        .build();

    Layout::builder()
        .add_interactable(label)
        .put_slot_group(
            SlotGroupKey::new(SLOT_GROUP_KEY),
            SlotGroup::builder(9, 8, GRID.grid(6, 1), Direction::S).build(),
        )
        .build()
}


#[cfg(test)]
use crate::catalog::ItemRef;
#[cfg(test)]
use diagram::{
    effect::Lookup,
    interactable::{BoundedDrawable, RecipeType},
    layout::LayoutKey,
};
#[cfg(test)]
use draw::recording::MonospaceMetrics;

#[cfg(test)]
fn generate(catalog: Catalog) -> DiagramGroup {
    let generator = OreDictionary::create(GeneratorContext {
        group_id: "test.oredictionary".to_owned(),
        catalog: Arc::new(catalog),
        metrics: Arc::new(MonospaceMetrics::default()),
    });
    assert_eq!(generator.info().default_visibility, DiagramGroupVisibility::Disabled);
    generator.generate(&EngineConfig::default())
}

#[cfg(test)]
fn insertions(diagram: &Diagram) -> usize {
    diagram.insertion_count(&LayoutKey::SlotGroup(SlotGroupKey::new(SLOT_GROUP_KEY)))
}

#[test]
fn test_one_diagram_per_ore_name() {
    let group = generate(Catalog::sample());
    let loaded = group.load_diagrams(&Lookup::Component(Component::item("minecraft:log", 1)), RecipeType::Crafting);
    assert_eq!(loaded.diagrams().len(), 2);
    // name order: logWood, then treeWood
    assert_eq!(insertions(&loaded.diagrams()[0]), 6);
    assert_eq!(insertions(&loaded.diagrams()[1]), 2);

    let loaded = group.load_diagrams(&Lookup::Component(Component::item("minecraft:stone", 0)), RecipeType::Crafting);
    assert_eq!(loaded.diagrams().len(), 0);
}

#[test]
fn test_long_names_are_small() {
    let long_name = "oreEndstoneExtraordinarilyLongName";
    let mut catalog = Catalog::default();
    catalog.ore_dictionary.insert(long_name.to_owned(), vec![ItemRef::new("test:ore", 0)]);
    catalog.ore_dictionary.insert("ore".to_owned(), vec![ItemRef::new("test:ore", 0)]);
    let group = generate(catalog);

    let loaded = group.load_diagrams(&Lookup::Component(Component::item("test:ore", 0)), RecipeType::Usage);
    assert_eq!(loaded.diagrams().len(), 2);
    let label_width = |diagram: &Diagram| diagram.layout().interactables()[0].dimension().w;
    // "ore" sorts first
    assert_eq!(label_width(&loaded.diagrams()[0]), 3 * 6);
    assert_eq!(label_width(&loaded.diagrams()[1]), long_name.len() as i32 * 6 / 2);
}

#[test]
fn test_overflowing_items_share_last_slot() {
    let mut catalog = Catalog::default();
    catalog.ore_dictionary.insert(
        "dustAnything".to_owned(),
        (0..100).map(|damage| ItemRef::new("test:dust", damage)).collect(),
    );
    let group = generate(catalog);
    let loaded = group.load_diagrams(&Lookup::Component(Component::item("test:dust", 99)), RecipeType::Usage);
    assert_eq!(insertions(&loaded.diagrams()[0]), 72);
}
