//! # Errores del Servicio
//! src/error.rs
//!
//! Taxonomía de errores en la frontera del núcleo. El `JobStore` nunca
//! falla (la ausencia se expresa con `Option`); estos errores los producen
//! el coordinador, la configuración y la capa HTTP.

use crate::http::StatusCode;
use crate::jobs::JobId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HashServerError {
    /// Password vacío o token de job ID malformado
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Job desconocido o aún no completado
    #[error("Job not found: {0}")]
    NotFound(JobId),

    /// El coordinador ya está drenando y no acepta más trabajo
    #[error("Service is shutting down")]
    ShuttingDown,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HashServerError {
    /// Código HTTP con el que la frontera reporta este error
    pub fn status_code(&self) -> StatusCode {
        match self {
            HashServerError::InvalidInput(_) => StatusCode::BadRequest,
            HashServerError::NotFound(_) => StatusCode::NotFound,
            HashServerError::ShuttingDown => StatusCode::ServiceUnavailable,
            HashServerError::InvalidConfig(_) | HashServerError::Io(_) => {
                StatusCode::InternalServerError
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, HashServerError>;
