use crate::config::CatalogFileError;
use crate::logging::codes;
use crate::query::CatalogError;
use crate::scheme::CodeError;

/// Any errcat failure
#[derive(Debug, thiserror::Error)]
pub enum ErrcatError {
    #[error("Code validation failed: {0}")]
    Code(#[from] CodeError),

    #[error("Catalog query failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Catalog file error: {0}")]
    CatalogFile(#[from] CatalogFileError),
}

impl ErrcatError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::Code(error) => error.error_code(),
            Self::Catalog(error) => error.error_code(),
            Self::CatalogFile(error) => error.error_code(),
        }
    }
}

pub type ErrcatResult<T> = Result<T, ErrcatError>;
