//! Catalog query engine
//!
//! Walks every component of a catalog in declaration order, filters components and local
//! codes, validates what participates in the global code scheme and builds a
//! [`QueryReport`]. Used at build or audit time: documentation export, collision
//! detection, frontend error tables.
//!
//! Validation errors (bad codes, colliding components) abort the query unless the options
//! collect or tolerate them. A root catalog that cannot be resolved always aborts.

mod error;
mod hooks;
mod options;
mod report;

pub use error::{CatalogError, CatalogResult};
pub use hooks::{CatalogLoader, CodeFilterHook};
pub use options::{QueryFilters, QueryOptions};
pub use report::{ExtendedRecord, QueryReport, ReportGroup, ReportValue};

use crate::config::constants::codes::COLLISION_SAMPLE_LOCAL_CODE;
use crate::config::constants::report::GLOBAL_KEY;
use crate::descriptor::{compose, MessageParts};
use crate::l10n::{L10n, Locale};
use crate::logging::{codes, config as log_config};
use crate::registry::{
    Catalog, CatalogKind, CodeSchemeMember, ComponentRef, ErrorProperties, HasPropertiesTable,
    HasSection, Registry,
};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

/// Query entry point bound to a registry
pub struct QueryEngine<'r> {
    registry: &'r Registry,
    l10n: L10n,
    hooks: Vec<Arc<dyn CodeFilterHook>>,
    loader: Option<Arc<dyn CatalogLoader>>,
}

impl<'r> QueryEngine<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            l10n: L10n::default(),
            hooks: Vec::new(),
            loader: None,
        }
    }

    pub fn with_l10n(mut self, l10n: L10n) -> Self {
        self.l10n = l10n;
        self
    }

    pub fn with_hook(mut self, hook: impl CodeFilterHook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    pub fn with_loader(mut self, loader: impl CatalogLoader + 'static) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    /// Resolve a root catalog, falling back to the loader
    pub fn resolve(&self, root: &str) -> CatalogResult<Cow<'r, Catalog>> {
        let catalog = match self.registry.catalog(root) {
            Some(catalog) => Cow::Borrowed(catalog),
            None => match self.loader.as_ref().and_then(|loader| loader.load(root)) {
                Some(catalog) => Cow::Owned(catalog),
                None => {
                    return Err(self.fatal(CatalogError::unresolvable_catalog(
                        root,
                        "is not registered",
                    )))
                }
            },
        };

        if catalog.kind() != CatalogKind::Customizable {
            return Err(self.fatal(CatalogError::unresolvable_catalog(
                root,
                "does not expose component codes, properties tables and sections",
            )));
        }

        Ok(catalog)
    }

    pub fn query(
        &self,
        root: &str,
        options: &QueryOptions,
        filters: &QueryFilters,
    ) -> CatalogResult<QueryReport> {
        let catalog = self.resolve(root)?;
        let locale = options
            .locale
            .clone()
            .unwrap_or_else(|| Locale::named(catalog.system_locale()));
        let trace = log_config::log_filter_decisions();

        // nothing to validate, so no "__errors" key either
        if catalog.is_empty() {
            return Ok(QueryReport::new(false));
        }

        let mut report = QueryReport::new(options.collect_errors);
        let mut owners: HashMap<i64, String> = HashMap::new();

        for component in catalog.components() {
            if !filters.accepts_component(&component) {
                if trace {
                    log_debug!("Component filtered out", "component" => component.identifier());
                }
                continue;
            }

            let participates = component.configured_code() != 0;
            if participates {
                if let Err(error) = self.validate_component(&component, &mut owners) {
                    self.reject(error, options, &mut report)?;
                    continue;
                }
            }

            let Some(customizable) = component.customizable() else {
                continue;
            };

            for (base_code, properties) in customizable.properties_table().iter() {
                if !filters.accepts_code(base_code, properties)
                    || self
                        .hooks
                        .iter()
                        .any(|hook| hook.should_skip(filters, base_code, properties))
                {
                    if trace {
                        log_debug!("Code filtered out",
                            "component" => component.identifier(),
                            "code" => base_code
                        );
                    }
                    continue;
                }

                if participates {
                    if let Err(error) = component.scheme().validate_local_code(base_code) {
                        let error = CatalogError::from_code_error(component.identifier(), error);
                        self.reject(error, options, &mut report)?;
                        continue;
                    }
                }

                if options.skip_data {
                    continue;
                }

                let (group, code) = if participates {
                    (GLOBAL_KEY, component.global_code(base_code))
                } else {
                    (component.identifier(), base_code)
                };
                let value = self.record(
                    &component,
                    customizable.section(),
                    base_code,
                    properties,
                    options,
                    &locale,
                );
                report.insert(group, code, value);
            }
        }

        log_success!(codes::success::CATALOG_QUERY_COMPLETE, "Catalog query completed",
            "catalog" => catalog.identifier(),
            "records" => report.record_count(),
            "errors" => report.errors().map_or(0, <[String]>::len)
        );

        Ok(report)
    }

    /// Validate a participating component and claim its global code range
    fn validate_component(
        &self,
        component: &ComponentRef<'_>,
        owners: &mut HashMap<i64, String>,
    ) -> CatalogResult<()> {
        component
            .scheme()
            .validate_component_code(component.configured_code())
            .map_err(|error| CatalogError::from_code_error(component.identifier(), error))?;

        let sample = component.global_code(COLLISION_SAMPLE_LOCAL_CODE);
        if let Some(first) = owners.get(&sample) {
            return Err(CatalogError::duplicate_global_code(
                sample,
                first,
                component.identifier(),
            ));
        }
        owners.insert(sample, component.identifier().to_string());

        Ok(())
    }

    /// Apply the tolerance options to a validation error
    fn reject(
        &self,
        error: CatalogError,
        options: &QueryOptions,
        report: &mut QueryReport,
    ) -> CatalogResult<()> {
        if !error.is_tolerable() || !options.is_lenient() {
            return Err(self.fatal(error));
        }

        let message = error.to_string();
        if options.collect_errors && !report.push_error(message.clone()) {
            log_warning!("Collected error limit reached, error dropped");
        }
        log_warning!(code = error.error_code(), &message);

        Ok(())
    }

    fn fatal(&self, error: CatalogError) -> CatalogError {
        log_error!(error.error_code(), &error.to_string());
        error
    }

    fn record(
        &self,
        component: &ComponentRef<'_>,
        section: &str,
        base_code: i64,
        properties: &ErrorProperties,
        options: &QueryOptions,
        locale: &Locale,
    ) -> ReportValue {
        let translate = |text: &str| {
            if text.is_empty() {
                String::new()
            } else {
                self.l10n.translate(text, locale)
            }
        };

        let context = translate(properties.context_text());
        let message = translate(properties.message_text());
        let message_fe = translate(properties.message_fe_text());

        if options.extended {
            return ReportValue::Record(ExtendedRecord {
                base_code,
                component_code: component.configured_code(),
                component_identifier: component.identifier().to_string(),
                section: section.to_string(),
                context,
                message,
                message_fe,
                show_fe: properties.show_fe_flag(),
            });
        }

        let chosen = if options.prefer_frontend_message && !message_fe.is_empty() {
            &message_fe
        } else {
            &message
        };
        ReportValue::Message(compose(chosen, MessageParts::context(&context)))
    }
}

/// Query a registry with the identity translator and no hooks
pub fn query(
    registry: &Registry,
    root: &str,
    options: &QueryOptions,
    filters: &QueryFilters,
) -> CatalogResult<QueryReport> {
    QueryEngine::new(registry).query(root, options, filters)
}
