//! Registry of diagram generators.

use crate::{
    catalog::Catalog,
    config::Config,
    generators::{
        fluid_containers::FluidContainers,
        ore_dictionary::OreDictionary,
    },
};
use diagram::{
    config::EngineConfig,
    group::DiagramGroup,
    group_info::{DiagramGroupInfo, DiagramGroupVisibility},
};
use draw::FontMetrics;
use std::sync::Arc;


/// Prepended to every group id, so that ids are globally unique.
pub const GROUP_ID_PREFIX: &'static str = "neicustomdiagram.diagramgroup.";


/// Produces one diagram group.
pub trait DiagramGenerator: Send + Sync {
    fn info(&self) -> &DiagramGroupInfo;

    fn generate(&self, config: &EngineConfig) -> DiagramGroup;
}


/// A mod that a generator can't work without.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ModDependency {
    EnderStorage,
    Gregtech5,
    Gregtech6,
}

impl ModDependency {
    pub fn mod_id(self) -> &'static str {
        match self {
            ModDependency::EnderStorage => "EnderStorage",
            ModDependency::Gregtech5 | ModDependency::Gregtech6 => "gregtech",
        }
    }

    /// GregTech 5 and 6 share a mod id, so they're told apart by version.
    pub fn is_loaded(self, catalog: &Catalog) -> bool {
        let version = catalog.mod_version(self.mod_id());
        match self {
            ModDependency::EnderStorage => version.is_some(),
            ModDependency::Gregtech5 => version.map(|v| !v.starts_with("GT6")).unwrap_or(false),
            ModDependency::Gregtech6 => version.map(|v| v.starts_with("GT6")).unwrap_or(false),
        }
    }
}


/// Everything a generator is constructed with.
#[derive(Clone)]
pub struct GeneratorContext {
    /// Full group id, prefix included.
    pub group_id: String,
    pub catalog: Arc<Catalog>,
    pub metrics: Arc<dyn FontMetrics + Send + Sync>,
}

pub type GeneratorConstructor = fn(GeneratorContext) -> Box<dyn DiagramGenerator>;

pub struct RegistryEntry {
    pub group_id: String,
    pub constructor: GeneratorConstructor,
    pub hard_dependencies: Vec<ModDependency>,
}

impl RegistryEntry {
    pub fn new(
        group_id_suffix: &str,
        constructor: GeneratorConstructor,
        hard_dependencies: &[ModDependency],
    ) -> Self {
        RegistryEntry {
            group_id: format!("{}{}", GROUP_ID_PREFIX, group_id_suffix),
            constructor,
            hard_dependencies: hard_dependencies.to_vec(),
        }
    }
}

/// Every generator we know how to build.
pub fn default_entries() -> Vec<RegistryEntry> {
    vec![
        RegistryEntry::new("forge.fluidcontainers", FluidContainers::create, &[]),
        RegistryEntry::new("forge.oredictionary", OreDictionary::create, &[]),
    ]
}


/// The generators which made it through initialization.
pub struct Registry {
    generators: Vec<Box<dyn DiagramGenerator>>,
}

impl Registry {
    /// Construct generators for each entry, skipping those which are hard
    /// disabled or missing a dependency.
    pub fn initialize(
        entries: Vec<RegistryEntry>,
        config: &Config,
        catalog: Arc<Catalog>,
        metrics: Arc<dyn FontMetrics + Send + Sync>,
    ) -> Self {
        info!("initializing diagram generators");
        let mut generators = Vec::new();
        for entry in entries {
            if config.is_hard_disabled(&entry.group_id) {
                info!(group_id = %entry.group_id, "skipping hard disabled generator");
                continue;
            }
            let missing = entry.hard_dependencies.iter()
                .copied()
                .filter(|dep| !dep.is_loaded(&catalog))
                .collect::<Vec<_>>();
            if !missing.is_empty() {
                warn!(group_id = %entry.group_id, ?missing, "missing hard dependencies, skipping generator");
                continue;
            }

            let ctx = GeneratorContext {
                group_id: entry.group_id,
                catalog: Arc::clone(&catalog),
                metrics: Arc::clone(&metrics),
            };
            generators.push((entry.constructor)(ctx));
        }
        info!(count = generators.len(), "initialized diagram generators");
        Registry { generators }
    }

    pub fn info_list(&self) -> Vec<&DiagramGroupInfo> {
        self.generators.iter().map(|generator| generator.info()).collect()
    }

    /// Generate the group of every generator which isn't disabled by config.
    pub fn generate_diagram_groups(&self, config: &Config) -> Vec<DiagramGroup> {
        info!("generating diagram groups");
        let engine_config = config.engine_config();
        let mut groups = Vec::new();
        for generator in &self.generators {
            let info = generator.info();
            if config.visibility(info) == DiagramGroupVisibility::Disabled {
                info!(group_id = %info.group_id, "skipping disabled diagram group");
                continue;
            }
            debug!(group_id = %info.group_id, "generating diagram group");
            groups.push(generator.generate(&engine_config));
        }
        info!(count = groups.len(), "generated diagram groups");
        groups
    }
}


#[cfg(test)]
use draw::recording::MonospaceMetrics;
#[cfg(test)]
use diagram::{
    component::Component,
    matcher::ComponentDiagramMatcher,
};

#[cfg(test)]
struct TestGenerator {
    info: DiagramGroupInfo,
}

#[cfg(test)]
impl DiagramGenerator for TestGenerator {
    fn info(&self) -> &DiagramGroupInfo {
        &self.info
    }

    fn generate(&self, config: &EngineConfig) -> DiagramGroup {
        DiagramGroup::builder(self.info.clone(), ComponentDiagramMatcher::builder().build())
            .config(config.clone())
            .build()
    }
}

#[cfg(test)]
fn test_generator(ctx: GeneratorContext) -> Box<dyn DiagramGenerator> {
    let info = DiagramGroupInfo::builder("Test", ctx.group_id, Component::item("minecraft:stick", 0))
        .build();
    Box::new(TestGenerator { info })
}

#[cfg(test)]
fn initialize(entries: Vec<RegistryEntry>, config: &Config, catalog: Catalog) -> Registry {
    Registry::initialize(entries, config, Arc::new(catalog), Arc::new(MonospaceMetrics::default()))
}

#[cfg(test)]
fn group_ids(registry: &Registry) -> Vec<&str> {
    registry.info_list().into_iter().map(|info| info.group_id.as_str()).collect()
}

#[test]
fn test_group_ids_are_prefixed() {
    let entry = RegistryEntry::new("test.one", test_generator, &[]);
    assert_eq!(entry.group_id, "neicustomdiagram.diagramgroup.test.one");
}

#[test]
fn test_skips_missing_dependencies() {
    let entries = vec![
        RegistryEntry::new("a", test_generator, &[]),
        RegistryEntry::new("b", test_generator, &[ModDependency::EnderStorage]),
        RegistryEntry::new("c", test_generator, &[ModDependency::Gregtech5]),
    ];
    let registry = initialize(entries, &Config::default(), Catalog::sample());
    assert_eq!(group_ids(&registry), vec!["neicustomdiagram.diagramgroup.a"]);
}

#[test]
fn test_skips_hard_disabled() {
    let mut config = Config::default();
    config.hard_disabled_groups.insert("neicustomdiagram.diagramgroup.a".to_owned());
    let entries = vec![
        RegistryEntry::new("a", test_generator, &[]),
        RegistryEntry::new("b", test_generator, &[]),
    ];
    let registry = initialize(entries, &config, Catalog::sample());
    assert_eq!(group_ids(&registry), vec!["neicustomdiagram.diagramgroup.b"]);
}

#[test]
fn test_gregtech_versions() {
    let mut catalog = Catalog::sample();
    assert!(!ModDependency::Gregtech5.is_loaded(&catalog));
    assert!(!ModDependency::Gregtech6.is_loaded(&catalog));

    catalog.loaded_mods.push(crate::catalog::LoadedMod {
        id: "gregtech".to_owned(),
        version: "MC1710".to_owned(),
    });
    assert!(ModDependency::Gregtech5.is_loaded(&catalog));
    assert!(!ModDependency::Gregtech6.is_loaded(&catalog));

    catalog.loaded_mods[2].version = "GT6-MC1710".to_owned();
    assert!(!ModDependency::Gregtech5.is_loaded(&catalog));
    assert!(ModDependency::Gregtech6.is_loaded(&catalog));
}

#[test]
fn test_generate_skips_disabled_visibility() {
    let mut config = Config::default();
    config.group_visibility.insert("neicustomdiagram.diagramgroup.b".to_owned(), "DISABLED".to_owned());
    let entries = vec![
        RegistryEntry::new("a", test_generator, &[]),
        RegistryEntry::new("b", test_generator, &[]),
    ];
    let registry = initialize(entries, &config, Catalog::sample());
    assert_eq!(registry.info_list().len(), 2);

    let groups = registry.generate_diagram_groups(&config);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].info().group_id, "neicustomdiagram.diagramgroup.a");
}

#[test]
fn test_default_entries_generate() {
    let registry = initialize(default_entries(), &Config::default(), Catalog::sample());
    // ore dictionary is disabled by default
    let groups = registry.generate_diagram_groups(&Config::default());
    assert_eq!(registry.info_list().len(), 2);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].info().group_id, "neicustomdiagram.diagramgroup.forge.fluidcontainers");
}
