//! Registration outcomes other than success.

use thiserror::Error;

use crate::form::Field;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum RegistrationError {
    /// One of the three fields was absent or empty.
    #[error("Todos los campos son obligatorios")]
    MissingFields,

    /// Strict mode only: a field failed its format rule.
    #[error("{message}")]
    InvalidField { field: Field, message: &'static str },

    /// The CURP is already stored.
    #[error("El CURP ya está registrado")]
    DuplicateCurp,

    /// Any other persistence failure.
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl RegistrationError {
    /// Metric label for this outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            RegistrationError::MissingFields => "missing_fields",
            RegistrationError::InvalidField { .. } => "invalid_field",
            RegistrationError::DuplicateCurp => "duplicate",
            RegistrationError::Store(_) => "error",
        }
    }
}
