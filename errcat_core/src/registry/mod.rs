//! Catalog registry
//!
//! A [`Catalog`] plays the role of a registry root: it owns the code scheme, the system
//! locale and the default section of a component hierarchy, and lists every component
//! taking part in it. A [`Registry`] holds all catalogs of a process. Both are built once
//! at start-up and are read-only afterwards.

mod traits;
mod types;

pub use traits::{CodeSchemeMember, ComponentRef, CustomizableRef, HasPropertiesTable, HasSection};
pub use types::{Component, ComponentKind, ErrorProperties, PropertiesTable};

use crate::config::constants::l10n::SYSTEM_LOCALE;
use crate::scheme::{CodeParts, CodeScheme};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Contract exposed by a registry root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    /// Numeric code scheme only, cannot be queried
    Global,
    /// Full catalog contract: component codes, properties tables and sections
    #[default]
    Customizable,
}

/// Registry root listing the components of one hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    identifier: String,
    kind: CatalogKind,
    scheme: CodeScheme,
    system_locale: String,
    default_section: String,
    components: Vec<Component>,
}

impl Catalog {
    pub fn builder(identifier: &str) -> CatalogBuilder {
        CatalogBuilder::new(identifier)
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn scheme(&self) -> CodeScheme {
        self.scheme
    }

    pub fn system_locale(&self) -> &str {
        &self.system_locale
    }

    pub fn default_section(&self) -> &str {
        &self.default_section
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Components in declaration order
    pub fn components(&self) -> impl Iterator<Item = ComponentRef<'_>> {
        self.components
            .iter()
            .map(move |component| ComponentRef::new(self, component))
    }

    pub fn component(&self, identifier: &str) -> Option<ComponentRef<'_>> {
        self.components
            .iter()
            .find(|component| component.identifier() == identifier)
            .map(|component| ComponentRef::new(self, component))
    }

    /// Decode a global code and find the component and properties it belongs to
    ///
    /// Non-global codes are matched against non-participating components; the first one
    /// declaring the code wins.
    pub fn explain(&self, global_code: i64) -> CodeExplanation {
        let parts = self.scheme.decode(global_code);

        let owner = self.components().find(|component| {
            let participates = component.component_code() != 0;
            if parts.is_global() {
                participates && component.component_code() == parts.component_code
            } else {
                !participates && component.lookup(parts.local_code).is_some()
            }
        });

        CodeExplanation {
            global_code,
            parts,
            component: owner.map(|c| c.identifier().to_string()),
            properties: owner.and_then(|c| c.lookup(parts.local_code)).cloned(),
        }
    }
}

/// Result of [`Catalog::explain`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeExplanation {
    pub global_code: i64,
    pub parts: CodeParts,
    pub component: Option<String>,
    pub properties: Option<ErrorProperties>,
}

/// Explicit registration step for a catalog
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    pub fn new(identifier: &str) -> Self {
        Self {
            catalog: Catalog {
                identifier: identifier.to_string(),
                kind: CatalogKind::Customizable,
                scheme: CodeScheme::default(),
                system_locale: SYSTEM_LOCALE.to_string(),
                default_section: String::new(),
                components: Vec::new(),
            },
        }
    }

    pub fn kind(mut self, kind: CatalogKind) -> Self {
        self.catalog.kind = kind;
        self
    }

    pub fn scheme(mut self, scheme: CodeScheme) -> Self {
        self.catalog.scheme = scheme;
        self
    }

    pub fn system_locale(mut self, locale: &str) -> Self {
        self.catalog.system_locale = locale.to_string();
        self
    }

    pub fn default_section(mut self, section: &str) -> Self {
        self.catalog.default_section = section.to_string();
        self
    }

    pub fn component(mut self, component: Component) -> Self {
        self.catalog.components.push(component);
        self
    }

    pub fn components<I: IntoIterator<Item = Component>>(mut self, components: I) -> Self {
        self.catalog.components.extend(components);
        self
    }

    pub fn build(self) -> Catalog {
        self.catalog
    }
}

/// All catalogs known to a process, keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct Registry {
    catalogs: IndexMap<String, Catalog>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a catalog, returning the one it replaced
    pub fn register(&mut self, catalog: Catalog) -> Option<Catalog> {
        self.catalogs
            .insert(catalog.identifier().to_string(), catalog)
    }

    pub fn with(mut self, catalog: Catalog) -> Self {
        self.register(catalog);
        self
    }

    pub fn catalog(&self, identifier: &str) -> Option<&Catalog> {
        self.catalogs.get(identifier)
    }

    pub fn catalogs(&self) -> impl Iterator<Item = &Catalog> {
        self.catalogs.values()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.catalogs.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    /// First component with this identifier across all catalogs
    pub fn find_component(&self, identifier: &str) -> Option<ComponentRef<'_>> {
        self.catalogs
            .values()
            .find_map(|catalog| catalog.component(identifier))
    }

    /// [`Catalog::explain`] on a registered catalog
    pub fn explain(&self, catalog: &str, global_code: i64) -> Option<CodeExplanation> {
        self.catalog(catalog).map(|catalog| catalog.explain(global_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_catalog() -> Catalog {
        Catalog::builder("ExampleConfig")
            .default_section("example")
            .component(
                Component::customizable(
                    "ExampleA",
                    0,
                    PropertiesTable::new().with(1, ErrorProperties::message("bingo")),
                )
                .with_section("weee"),
            )
            .component(Component::customizable(
                "ExampleB",
                1,
                PropertiesTable::new().with(1, ErrorProperties::message("stay frosty")),
            ))
            .component(Component::global("Legacy", 7))
            .build()
    }

    #[test]
    fn test_sections_resolve_to_default() {
        let catalog = example_catalog();

        let a = catalog.component("ExampleA").unwrap().customizable().unwrap();
        let b = catalog.component("ExampleB").unwrap().customizable().unwrap();
        assert_eq!(a.section(), "weee");
        assert_eq!(b.section(), "example");
        assert!(catalog.component("Legacy").unwrap().customizable().is_none());
    }

    #[test]
    fn test_component_codes() {
        let catalog = example_catalog();
        let b = catalog.component("ExampleB").unwrap();

        assert_eq!(b.component_code(), 1);
        assert_eq!(b.global_code(1), 100_001);
        assert_eq!(b.format_code(2), "100002");
        assert_eq!(catalog.component("ExampleA").unwrap().global_code(1), 1);
    }

    #[test]
    fn test_invalid_component_code_resolves_to_zero() {
        let catalog = Catalog::builder("Broken")
            .component(Component::global("Negative", -3))
            .build();
        let component = catalog.component("Negative").unwrap();

        assert_eq!(component.configured_code(), -3);
        assert_eq!(component.component_code(), 0);
        assert_eq!(component.global_code(5), 5);
    }

    #[test]
    fn test_explain() {
        let catalog = example_catalog();

        let global = catalog.explain(100_001);
        assert_eq!(global.component.as_deref(), Some("ExampleB"));
        assert_eq!(global.parts, CodeParts::new(1, 1));
        assert_eq!(
            global.properties.unwrap().message_text(),
            "stay frosty"
        );

        let local = catalog.explain(1);
        assert_eq!(local.component.as_deref(), Some("ExampleA"));

        let unknown = catalog.explain(300_001);
        assert!(unknown.component.is_none());
        assert!(unknown.properties.is_none());
    }

    #[test]
    fn test_registry_lookup() {
        let registry = Registry::new().with(example_catalog());

        assert!(registry.contains("ExampleConfig"));
        assert_eq!(registry.len(), 1);
        assert!(registry.find_component("ExampleB").is_some());
        assert!(registry.find_component("Missing").is_none());

        let explained = registry.explain("ExampleConfig", 100_001).unwrap();
        assert_eq!(explained.component.as_deref(), Some("ExampleB"));
        assert!(registry.explain("Missing", 100_001).is_none());
    }
}
