// Internal modules
#[macro_use]
pub mod logging;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod l10n;
pub mod query;
pub mod registry;
pub mod scheme;

// Re-export key types for library consumers
pub use config::{load_registry, parse_registry, CatalogFileError, RuntimeConfig};
pub use descriptor::{compose, ErrorDescriptor, MessageParts};
pub use error::{ErrcatError, ErrcatResult};
pub use l10n::{L10n, Locale, Translator};
pub use query::{
    query, CatalogError, CatalogLoader, CodeFilterHook, QueryEngine, QueryFilters, QueryOptions,
    QueryReport, ReportValue,
};
pub use registry::{
    Catalog, CatalogKind, CodeSchemeMember, Component, ErrorProperties, PropertiesTable, Registry,
};
pub use scheme::{CodeError, CodeParts, CodeScheme};
