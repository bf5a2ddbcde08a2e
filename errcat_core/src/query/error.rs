//! Catalog query errors

use crate::logging::codes;
use crate::scheme::CodeError;
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("The local code {code} for \"{component}\" must range from 1 to {max}.")]
    InvalidLocalCode {
        component: String,
        code: i64,
        max: i64,
    },

    #[error("The global component code {code} for \"{component}\" {reason}.")]
    InvalidComponentCode {
        component: String,
        code: i64,
        reason: String,
    },

    #[error("Same potential global code {global_code} generated for \"{first}\" and \"{second}\".")]
    DuplicateGlobalCode {
        global_code: i64,
        first: String,
        second: String,
    },

    #[error("The code scheme of \"{component}\" is unusable: {source}")]
    InvalidScheme {
        component: String,
        #[source]
        source: CodeError,
    },

    /// Always fatal, never tolerated nor collected
    #[error("The catalog \"{identifier}\" {reason}.")]
    UnresolvableCatalog { identifier: String, reason: String },
}

impl CatalogError {
    pub fn invalid_local_code(component: &str, code: i64, max: i64) -> Self {
        Self::InvalidLocalCode {
            component: component.to_string(),
            code,
            max,
        }
    }

    /// Attach the component to a code algebra failure
    pub fn from_code_error(component: &str, error: CodeError) -> Self {
        match error {
            CodeError::InvalidLocalCode { code, max } => Self::invalid_local_code(component, code, max),
            CodeError::NegativeComponentCode { code } => Self::InvalidComponentCode {
                component: component.to_string(),
                code,
                reason: "must be 0 (not global) or positive".to_string(),
            },
            CodeError::ComponentCodeOverflow { code, max } => Self::InvalidComponentCode {
                component: component.to_string(),
                code,
                reason: format!(
                    "is bigger than {}, can cause integer overflow for the global code",
                    max
                ),
            },
            source @ CodeError::InvalidMultiplier { .. } => Self::InvalidScheme {
                component: component.to_string(),
                source,
            },
        }
    }

    pub fn duplicate_global_code(global_code: i64, first: &str, second: &str) -> Self {
        Self::DuplicateGlobalCode {
            global_code,
            first: first.to_string(),
            second: second.to_string(),
        }
    }

    pub fn unresolvable_catalog(identifier: &str, reason: &str) -> Self {
        Self::UnresolvableCatalog {
            identifier: identifier.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Check if the query options may tolerate or collect this error
    pub fn is_tolerable(&self) -> bool {
        !matches!(self, Self::UnresolvableCatalog { .. })
    }

    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::InvalidLocalCode { .. } => codes::catalog::INVALID_LOCAL_CODE,
            Self::InvalidComponentCode { .. } => codes::catalog::INVALID_COMPONENT_CODE,
            Self::DuplicateGlobalCode { .. } => codes::catalog::DUPLICATE_GLOBAL_CODE,
            Self::InvalidScheme { source, .. } => source.error_code(),
            Self::UnresolvableCatalog { .. } => codes::catalog::UNRESOLVABLE_CATALOG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_component() {
        let error = CatalogError::invalid_local_code("ExampleA", 0, 99_999);
        assert_eq!(
            error.to_string(),
            "The local code 0 for \"ExampleA\" must range from 1 to 99999."
        );

        let error = CatalogError::duplicate_global_code(100_001, "ExampleA", "ExampleB");
        assert_eq!(
            error.to_string(),
            "Same potential global code 100001 generated for \"ExampleA\" and \"ExampleB\"."
        );
    }

    #[test]
    fn test_from_code_error() {
        let error = CatalogError::from_code_error(
            "Broken",
            CodeError::NegativeComponentCode { code: -1 },
        );
        assert_eq!(error.error_code(), codes::catalog::INVALID_COMPONENT_CODE);
        assert!(error.to_string().contains("must be 0 (not global) or positive"));
        assert!(error.to_string().contains("\"Broken\""));
    }

    #[test]
    fn test_unusable_scheme_keeps_its_own_variant() {
        let error = CatalogError::from_code_error(
            "Broken",
            CodeError::InvalidMultiplier {
                multiplier: 1,
                max_relative: i64::MAX,
            },
        );

        assert!(matches!(
            error,
            CatalogError::InvalidScheme {
                source: CodeError::InvalidMultiplier { multiplier: 1, .. },
                ..
            }
        ));
        assert_eq!(error.error_code(), codes::catalog_file::INVALID_MULTIPLIER);
        assert!(error.to_string().contains("\"Broken\""));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_tolerable() {
        assert!(CatalogError::duplicate_global_code(1, "a", "b").is_tolerable());
        assert!(!CatalogError::unresolvable_catalog("Missing", "is not registered").is_tolerable());
    }
}
