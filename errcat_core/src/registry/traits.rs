//! Capability traits exposed by catalog components

use super::types::{Component, ComponentKind, ErrorProperties, PropertiesTable};
use super::Catalog;
use crate::scheme::CodeScheme;

/// Takes part in a numeric code scheme
pub trait CodeSchemeMember {
    fn identifier(&self) -> &str;

    /// Component code as configured
    fn configured_code(&self) -> i64;

    fn scheme(&self) -> CodeScheme;

    /// Configured code if valid, 0 otherwise
    fn component_code(&self) -> i64 {
        self.scheme().resolve_component_code(self.configured_code())
    }

    fn global_code(&self, local_code: i64) -> i64 {
        self.scheme().encode(self.configured_code(), local_code)
    }

    fn format_code(&self, local_code: i64) -> String {
        self.scheme().format_code(self.configured_code(), local_code)
    }
}

/// Has a table of local code properties
pub trait HasPropertiesTable {
    fn properties_table(&self) -> &PropertiesTable;
}

/// Has a classification section used for filtering
pub trait HasSection {
    fn section(&self) -> &str;
}

/// A component seen through the catalog that lists it
#[derive(Debug, Clone, Copy)]
pub struct ComponentRef<'a> {
    catalog: &'a Catalog,
    component: &'a Component,
}

impl<'a> ComponentRef<'a> {
    pub(crate) fn new(catalog: &'a Catalog, component: &'a Component) -> Self {
        Self { catalog, component }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn component(&self) -> &'a Component {
        self.component
    }

    /// Customizable view, `None` for global-only components
    pub fn customizable(&self) -> Option<CustomizableRef<'a>> {
        match self.component.kind() {
            ComponentKind::Customizable {
                properties,
                section,
            } => Some(CustomizableRef {
                base: *self,
                properties,
                section: section
                    .as_deref()
                    .unwrap_or_else(|| self.catalog.default_section()),
            }),
            ComponentKind::Global => None,
        }
    }

    /// Properties of a local code, `None` for unknown codes and global-only components
    pub fn lookup(&self, local_code: i64) -> Option<&'a ErrorProperties> {
        self.component
            .properties()
            .and_then(|table| table.get(local_code))
    }
}

impl CodeSchemeMember for ComponentRef<'_> {
    fn identifier(&self) -> &str {
        self.component.identifier()
    }

    fn configured_code(&self) -> i64 {
        self.component.code()
    }

    fn scheme(&self) -> CodeScheme {
        self.catalog.scheme()
    }
}

/// A customizable component with its resolved section
#[derive(Debug, Clone, Copy)]
pub struct CustomizableRef<'a> {
    base: ComponentRef<'a>,
    properties: &'a PropertiesTable,
    section: &'a str,
}

impl<'a> CustomizableRef<'a> {
    pub fn base(&self) -> ComponentRef<'a> {
        self.base
    }
}

impl CodeSchemeMember for CustomizableRef<'_> {
    fn identifier(&self) -> &str {
        self.base.identifier()
    }

    fn configured_code(&self) -> i64 {
        self.base.configured_code()
    }

    fn scheme(&self) -> CodeScheme {
        self.base.scheme()
    }
}

impl HasPropertiesTable for CustomizableRef<'_> {
    fn properties_table(&self) -> &PropertiesTable {
        self.properties
    }
}

impl HasSection for CustomizableRef<'_> {
    fn section(&self) -> &str {
        self.section
    }
}
