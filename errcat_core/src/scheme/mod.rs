//! Global code algebra
//!
//! A global code packs a component code and a local code into one integer:
//! `local + component * multiplier`. Components with code 0 do not take part and
//! their local codes are used unchanged.
//!
//! `encode` and `decode` never fail. Invalid parts degrade to the non-global form so a
//! single misconfigured component cannot break error construction elsewhere; strict
//! validation is left to the catalog query engine.

mod error;

pub use error::{CodeError, CodeResult};

use crate::config::constants::codes::{DEFAULT_CODE_MULTIPLIER, GLOBAL_CODE_MAX_RELATIVE};
use serde::{Deserialize, Serialize};

/// A global code split into its parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeParts {
    pub local_code: i64,
    pub component_code: i64,
}

impl CodeParts {
    pub fn new(local_code: i64, component_code: i64) -> Self {
        Self {
            local_code,
            component_code,
        }
    }

    /// Check if the global code was actually decomposed
    pub fn is_global(&self) -> bool {
        self.component_code != 0
    }
}

/// Multiplier and relative maximum shared by one component hierarchy
///
/// Decoding must use the scheme that encoded the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeScheme {
    multiplier: i64,
    max_relative: i64,
}

impl Default for CodeScheme {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CodeScheme {
    pub const DEFAULT: CodeScheme = CodeScheme {
        multiplier: DEFAULT_CODE_MULTIPLIER,
        max_relative: GLOBAL_CODE_MAX_RELATIVE,
    };

    /// Create a scheme with a custom multiplier and relative maximum
    pub fn new(multiplier: i64, max_relative: i64) -> CodeResult<Self> {
        if multiplier < 2 || max_relative < multiplier {
            return Err(CodeError::InvalidMultiplier {
                multiplier,
                max_relative,
            });
        }

        Ok(Self {
            multiplier,
            max_relative,
        })
    }

    /// Create a scheme with a custom multiplier and the default relative maximum
    pub fn with_multiplier(multiplier: i64) -> CodeResult<Self> {
        Self::new(multiplier, GLOBAL_CODE_MAX_RELATIVE)
    }

    pub fn multiplier(&self) -> i64 {
        self.multiplier
    }

    pub fn max_relative(&self) -> i64 {
        self.max_relative
    }

    /// Biggest local code allowed
    pub fn local_code_max(&self) -> i64 {
        self.multiplier - 1
    }

    /// Biggest component code that cannot overflow the global code range
    pub fn component_code_max(&self) -> i64 {
        self.max_relative / self.multiplier - 1
    }

    pub fn validate_local_code(&self, code: i64) -> CodeResult<()> {
        if code < 1 || code >= self.multiplier {
            return Err(CodeError::InvalidLocalCode {
                code,
                max: self.local_code_max(),
            });
        }
        Ok(())
    }

    /// Validate a component code; 0 always passes
    pub fn validate_component_code(&self, code: i64) -> CodeResult<()> {
        if code == 0 {
            return Ok(());
        }
        if code < 0 {
            return Err(CodeError::NegativeComponentCode { code });
        }

        let max = self.component_code_max();
        if code > max {
            return Err(CodeError::ComponentCodeOverflow { code, max });
        }
        Ok(())
    }

    /// Configured component code if valid, 0 otherwise
    pub fn resolve_component_code(&self, code: i64) -> i64 {
        match self.validate_component_code(code) {
            Ok(()) => code,
            Err(_) => 0,
        }
    }

    /// Combine a component code and a local code into a global code
    pub fn encode(&self, component_code: i64, local_code: i64) -> i64 {
        if self.validate_local_code(local_code).is_err() {
            return local_code;
        }

        local_code + self.resolve_component_code(component_code) * self.multiplier
    }

    /// Split a global code; undecomposable values come back whole with component 0
    pub fn decode(&self, global_code: i64) -> CodeParts {
        let local_code = global_code % self.multiplier;
        let component_code = global_code.div_euclid(self.multiplier);

        if self.validate_local_code(local_code).is_err()
            || self.validate_component_code(component_code).is_err()
        {
            return CodeParts::new(global_code, 0);
        }

        CodeParts::new(local_code, component_code)
    }

    /// Global code rendered for humans
    pub fn format_code(&self, component_code: i64, local_code: i64) -> String {
        self.encode(component_code, local_code).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_component_code_max() {
        let scheme = CodeScheme::default();
        assert_eq!(scheme.component_code_max(), i64::MAX / 100_000 - 1);

        let small = CodeScheme::new(100, 10_000).unwrap();
        assert_eq!(small.component_code_max(), 99);
    }

    #[test]
    fn test_component_code_boundaries() {
        let scheme = CodeScheme::default();
        let max = scheme.component_code_max();

        assert!(scheme.validate_component_code(0).is_ok());
        assert!(scheme.validate_component_code(1).is_ok());
        assert!(scheme.validate_component_code(max).is_ok());
        assert_matches!(
            scheme.validate_component_code(max + 1),
            Err(CodeError::ComponentCodeOverflow { .. })
        );
        assert_matches!(
            scheme.validate_component_code(-1),
            Err(CodeError::NegativeComponentCode { code: -1 })
        );
    }

    #[test]
    fn test_local_code_boundaries() {
        let scheme = CodeScheme::default();

        assert!(scheme.validate_local_code(0).is_err());
        assert!(scheme.validate_local_code(100_000).is_err());
        assert!(scheme.validate_local_code(-5).is_err());
        assert!(scheme.validate_local_code(1).is_ok());
        assert!(scheme.validate_local_code(99_999).is_ok());
    }

    #[test]
    fn test_encode() {
        let scheme = CodeScheme::default();

        assert_eq!(scheme.encode(1, 1), 100_001);
        assert_eq!(scheme.encode(42, 12_345), 4_212_345);
        assert_eq!(scheme.encode(0, 7), 7);
        // invalid local code degrades to itself
        assert_eq!(scheme.encode(3, 0), 0);
        assert_eq!(scheme.encode(3, 100_000), 100_000);
        // invalid component code resolves to 0
        assert_eq!(scheme.encode(-2, 15), 15);
        assert_eq!(scheme.encode(scheme.component_code_max() + 1, 15), 15);
    }

    #[test]
    fn test_encode_non_participating_is_identity() {
        let scheme = CodeScheme::default();
        for local in [1, 2, 500, 99_998, 99_999] {
            assert_eq!(scheme.encode(0, local), local);
        }
    }

    #[test]
    fn test_round_trip() {
        let scheme = CodeScheme::default();
        let max = scheme.component_code_max();
        let components = [1, 2, 17, 1_000, 65_535, max / 2, max - 1, max];
        let locals = [1, 2, 99, 4_242, 50_000, 99_998, 99_999];

        for &component in &components {
            for &local in &locals {
                let global = scheme.encode(component, local);
                assert_eq!(
                    scheme.decode(global),
                    CodeParts::new(local, component),
                    "component {} local {}",
                    component,
                    local
                );
            }
        }
    }

    #[test]
    fn test_decode_fallback() {
        let scheme = CodeScheme::default();

        // local part 0 is invalid
        assert_eq!(scheme.decode(200_000), CodeParts::new(200_000, 0));
        // component part 0 means not global, the value is a plain local code
        assert_eq!(scheme.decode(42), CodeParts::new(42, 0));
        assert_eq!(scheme.decode(-100_001), CodeParts::new(-100_001, 0));
        assert!(!scheme.decode(42).is_global());
        assert!(scheme.decode(100_001).is_global());
    }

    #[test]
    fn test_custom_multiplier() {
        let scheme = CodeScheme::with_multiplier(1_000).unwrap();
        assert_eq!(scheme.encode(5, 7), 5_007);
        assert_eq!(scheme.decode(5_007), CodeParts::new(7, 5));
        assert!(scheme.validate_local_code(1_000).is_err());

        assert_matches!(
            CodeScheme::with_multiplier(1),
            Err(CodeError::InvalidMultiplier { multiplier: 1, .. })
        );
    }

    #[test]
    fn test_format_code() {
        let scheme = CodeScheme::default();
        assert_eq!(scheme.format_code(1, 3), "100003");
        assert_eq!(scheme.format_code(0, 3), "3");
    }
}
