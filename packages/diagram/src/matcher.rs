//! Finding the diagrams relevant to a component.

use crate::{
    component::Component,
    diagram::Diagram,
    interactable::RecipeType,
};
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};


/// Looks up diagrams by component.
pub trait DiagramMatcher: Send + Sync {
    /// Every diagram, for when the whole group is requested.
    fn all(&self) -> Vec<Arc<Diagram>>;

    fn matching(&self, recipe_type: RecipeType, component: &Component) -> Vec<Arc<Diagram>>;
}


/// Remove repeated diagrams, keeping the first of each.
fn dedup(diagrams: impl IntoIterator<Item = Arc<Diagram>>) -> Vec<Arc<Diagram>> {
    let mut seen = HashSet::new();
    diagrams.into_iter()
        .filter(|diagram| seen.insert(diagram.id()))
        .collect()
}


/// Matcher indexing diagrams by the components they were registered under.
#[derive(Debug, Default)]
pub struct ComponentDiagramMatcher {
    diagrams: Vec<Arc<Diagram>>,
    index: HashMap<(RecipeType, Component), Vec<Arc<Diagram>>>,
}

impl ComponentDiagramMatcher {
    pub fn builder() -> ComponentDiagramMatcherBuilder {
        ComponentDiagramMatcherBuilder {
            matcher: ComponentDiagramMatcher::default(),
        }
    }
}

impl DiagramMatcher for ComponentDiagramMatcher {
    fn all(&self) -> Vec<Arc<Diagram>> {
        dedup(self.diagrams.iter().cloned())
    }

    fn matching(&self, recipe_type: RecipeType, component: &Component) -> Vec<Arc<Diagram>> {
        self.index
            .get(&(recipe_type, component.clone()))
            .cloned()
            .unwrap_or_default()
    }
}


pub struct ComponentDiagramMatcherBuilder {
    matcher: ComponentDiagramMatcher,
}

impl ComponentDiagramMatcherBuilder {
    /// Add a diagram, then say which components it's shown for.
    pub fn add_diagram(&mut self, diagram: impl Into<Arc<Diagram>>) -> DiagramComponents<'_> {
        let diagram = diagram.into();
        self.matcher.diagrams.push(Arc::clone(&diagram));
        DiagramComponents {
            matcher: &mut self.matcher,
            diagram,
        }
    }

    pub fn build(self) -> ComponentDiagramMatcher {
        self.matcher
    }
}


/// Registers components for one diagram of a `ComponentDiagramMatcher`.
pub struct DiagramComponents<'b> {
    matcher: &'b mut ComponentDiagramMatcher,
    diagram: Arc<Diagram>,
}

impl<'b> DiagramComponents<'b> {
    /// Show the diagram for both crafting and usage lookups of the component.
    pub fn add_component(&mut self, component: Component) -> &mut Self {
        for recipe_type in RecipeType::VALID_TYPES {
            self.add_component_for(recipe_type, component.clone());
        }
        self
    }

    pub fn add_component_for(&mut self, recipe_type: RecipeType, component: Component) -> &mut Self {
        let diagrams = self.matcher.index.entry((recipe_type, component)).or_default();
        if !diagrams.iter().any(|d| Arc::ptr_eq(d, &self.diagram)) {
            diagrams.push(Arc::clone(&self.diagram));
        }
        self
    }

    pub fn add_all_components<I>(&mut self, recipe_type: RecipeType, components: I) -> &mut Self
    where
        I: IntoIterator<Item = Component>,
    {
        for component in components {
            self.add_component_for(recipe_type, component);
        }
        self
    }
}


pub type LookupFn = Arc<dyn Fn(RecipeType, &Component) -> Vec<Arc<Diagram>> + Send + Sync>;

/// Matcher with a fixed set of diagrams, looked up by an arbitrary function.
pub struct CustomDiagramMatcher {
    diagrams: Vec<Arc<Diagram>>,
    lookup: LookupFn,
}

impl CustomDiagramMatcher {
    pub fn new<F>(diagrams: Vec<Arc<Diagram>>, lookup: F) -> Self
    where
        F: Fn(RecipeType, &Component) -> Vec<Arc<Diagram>> + Send + Sync + 'static,
    {
        CustomDiagramMatcher { diagrams, lookup: Arc::new(lookup) }
    }
}

impl DiagramMatcher for CustomDiagramMatcher {
    fn all(&self) -> Vec<Arc<Diagram>> {
        self.diagrams.clone()
    }

    fn matching(&self, recipe_type: RecipeType, component: &Component) -> Vec<Arc<Diagram>> {
        (self.lookup)(recipe_type, component)
    }
}


/// Matcher which builds diagrams on demand. It has no fixed set of
/// diagrams, so `all` is always empty.
pub struct DynamicDiagramMatcher {
    lookup: LookupFn,
}

impl DynamicDiagramMatcher {
    pub fn new<F>(lookup: F) -> Self
    where
        F: Fn(RecipeType, &Component) -> Vec<Arc<Diagram>> + Send + Sync + 'static,
    {
        DynamicDiagramMatcher { lookup: Arc::new(lookup) }
    }
}

impl DiagramMatcher for DynamicDiagramMatcher {
    fn all(&self) -> Vec<Arc<Diagram>> {
        Vec::new()
    }

    fn matching(&self, recipe_type: RecipeType, component: &Component) -> Vec<Arc<Diagram>> {
        (self.lookup)(recipe_type, component)
    }
}


pub type MatchPredicate = Arc<dyn Fn(RecipeType, &Component) -> bool + Send + Sync>;

/// Matcher pairing each diagram with a predicate on lookups.
#[derive(Default)]
pub struct PredicateDiagramMatcher {
    entries: Vec<(MatchPredicate, Arc<Diagram>)>,
}

impl PredicateDiagramMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_diagram<F>(&mut self, predicate: F, diagram: impl Into<Arc<Diagram>>) -> &mut Self
    where
        F: Fn(RecipeType, &Component) -> bool + Send + Sync + 'static,
    {
        self.entries.push((Arc::new(predicate), diagram.into()));
        self
    }
}

impl DiagramMatcher for PredicateDiagramMatcher {
    fn all(&self) -> Vec<Arc<Diagram>> {
        dedup(self.entries.iter().map(|(_, diagram)| Arc::clone(diagram)))
    }

    fn matching(&self, recipe_type: RecipeType, component: &Component) -> Vec<Arc<Diagram>> {
        dedup(self.entries.iter()
            .filter(|(predicate, _)| predicate(recipe_type, component))
            .map(|(_, diagram)| Arc::clone(diagram)))
    }
}


#[cfg(test)]
use crate::layout::Layout;

#[cfg(test)]
fn empty_diagram() -> Arc<Diagram> {
    Arc::new(Diagram::builder().add_layout(Layout::default()).build())
}

#[test]
fn test_component_matcher_indexes_by_type() {
    let a = empty_diagram();
    let b = empty_diagram();
    let stone = Component::item("minecraft:stone", 0);
    let water = Component::fluid("water");

    let mut builder = ComponentDiagramMatcher::builder();
    builder.add_diagram(Arc::clone(&a))
        .add_component(stone.clone())
        .add_component(stone.clone());
    builder.add_diagram(Arc::clone(&b))
        .add_component_for(RecipeType::Usage, stone.clone())
        .add_all_components(RecipeType::Crafting, vec![water.clone()]);
    // registering a diagram twice doesn't duplicate it in all()
    builder.add_diagram(Arc::clone(&a));
    let matcher = builder.build();

    let ids = |diagrams: Vec<Arc<Diagram>>| diagrams.iter().map(|d| d.id()).collect::<Vec<_>>();
    assert_eq!(ids(matcher.all()), vec![a.id(), b.id()]);
    assert_eq!(ids(matcher.matching(RecipeType::Crafting, &stone)), vec![a.id()]);
    assert_eq!(ids(matcher.matching(RecipeType::Usage, &stone)), vec![a.id(), b.id()]);
    assert_eq!(ids(matcher.matching(RecipeType::Crafting, &water)), vec![b.id()]);
    assert!(matcher.matching(RecipeType::Usage, &water).is_empty());
    assert!(matcher.matching(RecipeType::Crafting, &Component::item("minecraft:dirt", 0)).is_empty());
}

#[test]
fn test_predicate_matcher_dedups() {
    let a = empty_diagram();
    let mut matcher = PredicateDiagramMatcher::new();
    matcher
        .add_diagram(|_, c| c.id().starts_with("minecraft:"), Arc::clone(&a))
        .add_diagram(|rt, _| rt == RecipeType::Usage, Arc::clone(&a));
    assert_eq!(matcher.all().len(), 1);
    assert_eq!(matcher.matching(RecipeType::Usage, &Component::item("minecraft:stone", 0)).len(), 1);
    assert!(matcher.matching(RecipeType::Crafting, &Component::fluid("water")).is_empty());
}

#[test]
fn test_dynamic_matcher_has_no_fixed_diagrams() {
    let matcher = DynamicDiagramMatcher::new(|_, _| vec![empty_diagram()]);
    assert!(matcher.all().is_empty());
    assert_eq!(matcher.matching(RecipeType::Crafting, &Component::fluid("lava")).len(), 1);
}
