//! Diagrams showing every registered container for a fluid.
//!
//! Diagrams are built on demand, so showing all diagrams isn't supported.

use crate::{
    catalog::{Catalog, FluidEntry},
    registry::{DiagramGenerator, GeneratorContext},
};
use diagram::{
    component::{Component, DisplayComponent},
    config::EngineConfig,
    diagram::Diagram,
    grid::{GRID, Direction},
    group::DiagramGroup,
    group_info::DiagramGroupInfo,
    layout::{Layout, SlotGroupKey},
    matcher::DynamicDiagramMatcher,
    slot_group::SlotGroup,
    tooltip::{Tooltip, TextFormatting},
};
use std::sync::Arc;


const SLOT_GROUP_FLUIDS: &'static str = "fluids";
const SLOT_GROUP_CONTAINERS: &'static str = "containers";


pub struct FluidContainers {
    info: DiagramGroupInfo,
    catalog: Arc<Catalog>,
}

impl FluidContainers {
    pub fn create(ctx: GeneratorContext) -> Box<dyn DiagramGenerator> {
        let icon = Component::item("minecraft:water_bucket", 0);
        let info = DiagramGroupInfo::builder("Fluid Containers", ctx.group_id, icon)
            .set_diagrams_per_page(2)
            .set_ignore_nbt(false)
            .build();
        Box::new(FluidContainers { info, catalog: ctx.catalog })
    }
}

impl DiagramGenerator for FluidContainers {
    fn info(&self) -> &DiagramGroupInfo {
        &self.info
    }

    fn generate(&self, config: &EngineConfig) -> DiagramGroup {
        let layout = Arc::new(build_layout());
        let catalog = Arc::clone(&self.catalog);
        let matcher = DynamicDiagramMatcher::new(move |_, component| {
            catalog.fluid_for(component)
                .map(|fluid| vec![Arc::new(build_diagram(&layout, fluid))])
                .unwrap_or_default()
        });
        DiagramGroup::builder(self.info.clone(), matcher)
            .config(config.clone())
            .build()
    }
}

fn labelled(component: Component, label: &str) -> DisplayComponent {
    DisplayComponent::new(component)
        .with_additional_tooltip(Tooltip::create_formatted(label, TextFormatting::slot()))
}

fn build_diagram(layout: &Arc<Layout>, fluid: &FluidEntry) -> Diagram {
    let mut builder = Diagram::builder();
    builder.add_layout(Arc::clone(layout));
    builder
        .auto_insert_into_slot_group(&SlotGroupKey::new(SLOT_GROUP_CONTAINERS))
        .insert_each_safe(fluid.container_components());

    let mut fluids = builder.auto_insert_into_slot_group(&SlotGroupKey::new(SLOT_GROUP_FLUIDS));
    fluids.insert_into_next_slot([labelled(fluid.component(), "Fluid")]);
    if let Some(block) = fluid.block.as_ref() {
        fluids.insert_into_next_slot([labelled(block.component(), "Fluid block")]);
    }

    builder.build()
}

fn build_layout() -> Layout {
    Layout::builder()
        .put_slot_group(
            SlotGroupKey::new(SLOT_GROUP_FLUIDS),
            SlotGroup::builder(1, 6, GRID.grid(1, 0), Direction::S).build(),
        )
        .put_slot_group(
            SlotGroupKey::new(SLOT_GROUP_CONTAINERS),
            SlotGroup::builder(6, 6, GRID.grid(3, 0), Direction::SE)
                .set_default_tooltip(Tooltip::create_formatted("Fluid containers", TextFormatting::slot()))
                .build(),
        )
        .build()
}


#[cfg(test)]
use crate::catalog::{FluidContainer, ItemRef};
#[cfg(test)]
use diagram::{
    effect::Lookup,
    interactable::RecipeType,
    layout::LayoutKey,
};
#[cfg(test)]
use draw::recording::MonospaceMetrics;

#[cfg(test)]
fn generate(catalog: Catalog) -> DiagramGroup {
    let generator = FluidContainers::create(GeneratorContext {
        group_id: "test.fluidcontainers".to_owned(),
        catalog: Arc::new(catalog),
        metrics: Arc::new(MonospaceMetrics::default()),
    });
    generator.generate(&EngineConfig::default())
}

#[cfg(test)]
fn insertions(diagram: &Diagram, key: &str) -> usize {
    diagram.insertion_count(&LayoutKey::SlotGroup(SlotGroupKey::new(key)))
}

#[test]
fn test_lookup_by_fluid_container_or_block() {
    let group = generate(Catalog::sample());
    for component in [
        Component::fluid("water"),
        Component::item("minecraft:water_bucket", 0),
        Component::item("minecraft:water", 0),
    ] {
        let loaded = group.load_diagrams(&Lookup::Component(component), RecipeType::Usage);
        assert_eq!(loaded.diagrams().len(), 1);
        let diagram = &loaded.diagrams()[0];
        assert_eq!(insertions(diagram, SLOT_GROUP_CONTAINERS), 2);
        assert_eq!(insertions(diagram, SLOT_GROUP_FLUIDS), 2);
    }
}

#[test]
fn test_unknown_component_finds_nothing() {
    let group = generate(Catalog::sample());
    let loaded = group.load_diagrams(&Lookup::Component(Component::item("minecraft:stone", 0)), RecipeType::Crafting);
    assert_eq!(loaded.diagrams().len(), 0);
    // dynamic diagrams can't all be listed
    let loaded = group.load_diagrams(&Lookup::Id("test.fluidcontainers".to_owned()), RecipeType::Crafting);
    assert_eq!(loaded.diagrams().len(), 0);
}

#[test]
fn test_overflowing_containers_share_last_slot() {
    let mut catalog = Catalog::default();
    catalog.fluids.push(FluidEntry {
        id: "honey".to_owned(),
        block: None,
        containers: (0..40)
            .map(|damage| FluidContainer { item: ItemRef::new("test:jar", damage), amount: 100 })
            .collect(),
    });
    let group = generate(catalog);
    let loaded = group.load_diagrams(&Lookup::Component(Component::fluid("honey")), RecipeType::Crafting);
    let diagram = &loaded.diagrams()[0];
    assert_eq!(insertions(diagram, SLOT_GROUP_CONTAINERS), 36);
    // no block, so only the fluid itself
    assert_eq!(insertions(diagram, SLOT_GROUP_FLUIDS), 1);
}
