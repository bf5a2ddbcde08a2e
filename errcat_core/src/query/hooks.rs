//! Extension points of the query engine

use super::options::QueryFilters;
use crate::registry::{Catalog, ErrorProperties};

/// Caller-supplied local code filter, consulted after every built-in filter passed
pub trait CodeFilterHook: Send + Sync {
    /// `true` skips the code
    fn should_skip(&self, filters: &QueryFilters, base_code: i64, properties: &ErrorProperties)
        -> bool;
}

impl<F> CodeFilterHook for F
where
    F: Fn(&QueryFilters, i64, &ErrorProperties) -> bool + Send + Sync,
{
    fn should_skip(
        &self,
        filters: &QueryFilters,
        base_code: i64,
        properties: &ErrorProperties,
    ) -> bool {
        self(filters, base_code, properties)
    }
}

/// On-demand source for catalogs missing from the registry
pub trait CatalogLoader: Send + Sync {
    fn load(&self, identifier: &str) -> Option<Catalog>;
}
