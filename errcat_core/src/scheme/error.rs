//! Error types for the global code algebra

use crate::logging::codes;
use thiserror::Error;

/// Result type for code validation
pub type CodeResult<T> = Result<T, CodeError>;

/// Code algebra validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    /// Local code outside `1..multiplier`
    #[error("The local code {code} must range from 1 to {max}.")]
    InvalidLocalCode { code: i64, max: i64 },

    /// Negative component code
    #[error("The component code {code} must be 0 (not global) or positive.")]
    NegativeComponentCode { code: i64 },

    /// Component code that would overflow the global code range
    #[error("The component code {code} is bigger than {max}, can cause integer overflow for the global code.")]
    ComponentCodeOverflow { code: i64, max: i64 },

    /// Multiplier unusable for any local code
    #[error("The code multiplier {multiplier} must be bigger than 1 and not exceed {max_relative}.")]
    InvalidMultiplier { multiplier: i64, max_relative: i64 },
}

impl CodeError {
    /// Get appropriate error code for logging system
    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::InvalidLocalCode { .. } => codes::catalog::INVALID_LOCAL_CODE,
            Self::NegativeComponentCode { .. } | Self::ComponentCodeOverflow { .. } => {
                codes::catalog::INVALID_COMPONENT_CODE
            }
            Self::InvalidMultiplier { .. } => codes::catalog_file::INVALID_MULTIPLIER,
        }
    }
}
