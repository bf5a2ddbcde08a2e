//! Event codes and their classification
//!
//! Every event errcat logs carries one of these codes. Metadata (category, severity,
//! recommended action) lives in a lazily built table next to the constants.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Code wrapper shared by error and success events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Registered metadata, `None` for the generic codes of plain events
    pub fn metadata(&self) -> Option<&'static ErrorMetadata> {
        metadata_table().get(self)
    }

    /// Errors are recoverable unless registered otherwise
    pub fn is_recoverable(&self) -> bool {
        self.metadata().map_or(true, |metadata| metadata.recoverable)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    System,
    CatalogValidation,
    CatalogFile,
    CatalogQuery,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorMetadata {
    pub category: Category,
    pub severity: Severity,
    pub recoverable: bool,
    pub description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub recommended_action: &'static str,
}

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Catalog validation error codes
pub mod catalog {
    use super::Code;

    pub const INVALID_LOCAL_CODE: Code = Code::new("EC001");
    pub const INVALID_COMPONENT_CODE: Code = Code::new("EC002");
    pub const DUPLICATE_GLOBAL_CODE: Code = Code::new("EC003");
    pub const UNRESOLVABLE_CATALOG: Code = Code::new("EC010");
}

/// Catalog file error codes
pub mod catalog_file {
    use super::Code;

    pub const IO_ERROR: Code = Code::new("EF001");
    pub const PARSE_ERROR: Code = Code::new("EF002");
    pub const DUPLICATE_CATALOG: Code = Code::new("EF003");
    pub const INVALID_MULTIPLIER: Code = Code::new("EF004");
}

pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("IC001");
    pub const CATALOG_LOADED: Code = Code::new("IC010");
    pub const CATALOG_QUERY_COMPLETE: Code = Code::new("IC020");
    pub const CATALOG_VALIDATION_PASSED: Code = Code::new("IC021");
}

static METADATA: OnceLock<HashMap<Code, ErrorMetadata>> = OnceLock::new();

fn entry(
    code: Code,
    category: Category,
    severity: Severity,
    recoverable: bool,
    description: &'static str,
    recommended_action: &'static str,
) -> (Code, ErrorMetadata) {
    (
        code,
        ErrorMetadata {
            category,
            severity,
            recoverable,
            description,
            recommended_action,
        },
    )
}

fn metadata_table() -> &'static HashMap<Code, ErrorMetadata> {
    use Category::*;
    use Severity::*;

    METADATA.get_or_init(|| {
        HashMap::from([
            entry(
                system::INTERNAL_ERROR,
                System,
                Critical,
                false,
                "Critical internal error",
                "File a bug report with the catalog that triggered it",
            ),
            entry(
                system::INITIALIZATION_FAILURE,
                System,
                Critical,
                false,
                "Logging system initialization failed",
                "Check ERRCAT_* environment variables",
            ),
            entry(
                catalog::INVALID_LOCAL_CODE,
                CatalogValidation,
                High,
                true,
                "Local error code outside the range allowed by the code scheme",
                "Use a local code between 1 and multiplier - 1",
            ),
            entry(
                catalog::INVALID_COMPONENT_CODE,
                CatalogValidation,
                High,
                true,
                "Component code negative or too big for the code scheme",
                "Use a component code between 0 and the scheme maximum",
            ),
            entry(
                catalog::DUPLICATE_GLOBAL_CODE,
                CatalogValidation,
                High,
                true,
                "Two components generate the same global codes",
                "Give every participating component a unique component code",
            ),
            entry(
                catalog::UNRESOLVABLE_CATALOG,
                CatalogValidation,
                Critical,
                false,
                "Queried catalog is unknown or cannot be queried",
                "Register the catalog as customizable before querying it",
            ),
            entry(
                catalog_file::IO_ERROR,
                CatalogFile,
                High,
                false,
                "Catalog file could not be read",
                "Check the file path and permissions",
            ),
            entry(
                catalog_file::PARSE_ERROR,
                CatalogFile,
                High,
                false,
                "Catalog file is not valid TOML or does not match the catalog format",
                "Fix the reported line of the catalog file",
            ),
            entry(
                catalog_file::DUPLICATE_CATALOG,
                CatalogFile,
                Medium,
                false,
                "Catalog declared more than once",
                "Rename or merge the duplicated catalog",
            ),
            entry(
                catalog_file::INVALID_MULTIPLIER,
                CatalogFile,
                High,
                false,
                "Code multiplier cannot form a valid code scheme",
                "Use a multiplier of at least 2",
            ),
            entry(
                success::SYSTEM_INITIALIZATION_COMPLETED,
                System,
                Low,
                true,
                "Logging system initialized",
                "",
            ),
            entry(
                success::CATALOG_LOADED,
                CatalogFile,
                Low,
                true,
                "Catalog file loaded",
                "",
            ),
            entry(
                success::CATALOG_QUERY_COMPLETE,
                CatalogQuery,
                Low,
                true,
                "Catalog query completed",
                "",
            ),
            entry(
                success::CATALOG_VALIDATION_PASSED,
                CatalogQuery,
                Low,
                true,
                "Catalog validated without errors",
                "",
            ),
        ])
    })
}

/// Codes whose metadata is missing from the table
pub fn unregistered<'a>(codes: impl IntoIterator<Item = &'a Code>) -> Vec<Code> {
    codes
        .into_iter()
        .filter(|code| code.metadata().is_none())
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_constant_has_metadata() {
        let all = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            catalog::INVALID_LOCAL_CODE,
            catalog::INVALID_COMPONENT_CODE,
            catalog::DUPLICATE_GLOBAL_CODE,
            catalog::UNRESOLVABLE_CATALOG,
            catalog_file::IO_ERROR,
            catalog_file::PARSE_ERROR,
            catalog_file::DUPLICATE_CATALOG,
            catalog_file::INVALID_MULTIPLIER,
            success::SYSTEM_INITIALIZATION_COMPLETED,
            success::CATALOG_LOADED,
            success::CATALOG_QUERY_COMPLETE,
            success::CATALOG_VALIDATION_PASSED,
        ];

        assert!(unregistered(&all).is_empty());
    }

    #[test]
    fn test_classification() {
        let duplicate = catalog::DUPLICATE_GLOBAL_CODE.metadata().unwrap();
        assert_eq!(duplicate.category, Category::CatalogValidation);

        let unresolvable = catalog::UNRESOLVABLE_CATALOG.metadata().unwrap();
        assert_eq!(unresolvable.severity, Severity::Critical);
        assert!(!catalog::UNRESOLVABLE_CATALOG.is_recoverable());
        assert!(catalog::INVALID_LOCAL_CODE.is_recoverable());

        let generic = Code::new("W000");
        assert!(generic.metadata().is_none());
        assert!(generic.is_recoverable());
        assert_eq!(unregistered(&[generic]), vec![generic]);
    }
}
