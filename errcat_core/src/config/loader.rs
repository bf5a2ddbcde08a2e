//! TOML catalog files
//!
//! ```toml
//! [[catalog]]
//! name = "ExampleConfig"
//! default_section = "example"
//!
//! [[catalog.component]]
//! name = "ExampleB"
//! code = 1
//!
//! [[catalog.component.error]]
//! code = 1
//! message = "stay frosty"
//! show_fe = true
//! ```
//!
//! `multiplier`, `system_locale`, `default_section`, `section` and `kind` are optional.

use crate::logging::codes;
use crate::registry::{Catalog, CatalogKind, Component, ErrorProperties, PropertiesTable, Registry};
use crate::scheme::{CodeError, CodeScheme};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Origin reported for catalogs parsed from memory
const INLINE_ORIGIN: &str = "<inline>";

#[derive(Debug, Error)]
pub enum CatalogFileError {
    #[error("Cannot read catalog file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog file '{origin}': {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Catalog '{name}' declared more than once ('{origin}')")]
    DuplicateCatalog { name: String, origin: String },

    #[error("Catalog '{name}' has an unusable code scheme: {source}")]
    InvalidMultiplier {
        name: String,
        #[source]
        source: CodeError,
    },
}

impl CatalogFileError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::Io { .. } => codes::catalog_file::IO_ERROR,
            Self::Parse { .. } => codes::catalog_file::PARSE_ERROR,
            Self::DuplicateCatalog { .. } => codes::catalog_file::DUPLICATE_CATALOG,
            Self::InvalidMultiplier { .. } => codes::catalog_file::INVALID_MULTIPLIER,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    catalog: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogEntry {
    name: String,
    multiplier: Option<i64>,
    system_locale: Option<String>,
    default_section: Option<String>,
    #[serde(default)]
    kind: CatalogKind,
    #[serde(default, rename = "component")]
    components: Vec<ComponentEntry>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ComponentEntryKind {
    Global,
    #[default]
    Customizable,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ComponentEntry {
    name: String,
    #[serde(default)]
    code: i64,
    section: Option<String>,
    #[serde(default)]
    kind: ComponentEntryKind,
    #[serde(default, rename = "error")]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    code: i64,
    #[serde(flatten)]
    properties: ErrorProperties,
}

impl CatalogEntry {
    fn into_catalog(self) -> Result<Catalog, CatalogFileError> {
        let mut builder = Catalog::builder(&self.name).kind(self.kind);

        if let Some(multiplier) = self.multiplier {
            let scheme = CodeScheme::with_multiplier(multiplier).map_err(|source| {
                CatalogFileError::InvalidMultiplier {
                    name: self.name.clone(),
                    source,
                }
            })?;
            builder = builder.scheme(scheme);
        }
        if let Some(locale) = &self.system_locale {
            builder = builder.system_locale(locale);
        }
        if let Some(section) = &self.default_section {
            builder = builder.default_section(section);
        }

        let components = self.components.into_iter().map(|entry| match entry.kind {
            ComponentEntryKind::Global => {
                if !entry.errors.is_empty() {
                    log_warning!("Error properties of a global component are ignored",
                        "component" => entry.name,
                        "count" => entry.errors.len()
                    );
                }
                Component::global(&entry.name, entry.code)
            }
            ComponentEntryKind::Customizable => {
                let table: PropertiesTable = entry
                    .errors
                    .into_iter()
                    .map(|error| (error.code, error.properties))
                    .collect();
                let component = Component::customizable(&entry.name, entry.code, table);
                match &entry.section {
                    Some(section) => component.with_section(section),
                    None => component,
                }
            }
        });

        Ok(builder.components(components).build())
    }
}

fn parse_into(registry: &mut Registry, content: &str, origin: &str) -> Result<(), CatalogFileError> {
    let file: CatalogFile = toml::from_str(content).map_err(|source| CatalogFileError::Parse {
        origin: origin.to_string(),
        source,
    })?;

    for entry in file.catalog {
        if registry.contains(&entry.name) {
            return Err(CatalogFileError::DuplicateCatalog {
                name: entry.name,
                origin: origin.to_string(),
            });
        }

        let catalog = entry.into_catalog()?;
        log_success!(codes::success::CATALOG_LOADED, "Catalog loaded",
            "catalog" => catalog.identifier(),
            "components" => catalog.len(),
            "origin" => origin
        );
        registry.register(catalog);
    }

    Ok(())
}

/// Parse catalogs from TOML text
pub fn parse_registry(content: &str) -> Result<Registry, CatalogFileError> {
    let mut registry = Registry::new();
    parse_into(&mut registry, content, INLINE_ORIGIN)?;
    Ok(registry)
}

/// Load one catalog file
pub fn load_registry(path: &Path) -> Result<Registry, CatalogFileError> {
    let mut registry = Registry::new();
    load_into(&mut registry, path)?;
    Ok(registry)
}

/// Add the catalogs of a file to an existing registry
///
/// A catalog already present in `registry` is a `DuplicateCatalog` error.
pub fn load_into(registry: &mut Registry, path: &Path) -> Result<(), CatalogFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_into(registry, &content, &path.display().to_string())
}
