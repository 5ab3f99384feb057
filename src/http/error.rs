//! Mapping of registration outcomes to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::registry::{MessageBody, RegistrationError};

pub const MISSING_FIELDS_MESSAGE: &str = "Todos los campos son obligatorios";
pub const DUPLICATE_CURP_MESSAGE: &str = "El CURP ya está registrado";
pub const SERVER_ERROR_MESSAGE: &str = "Error en el servidor";
pub const MALFORMED_MESSAGE: &str = "Solicitud inválida";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// Body was not a JSON object with string/number fields.
    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Registration(RegistrationError::MissingFields) => {
                (StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE)
            }
            ApiError::Registration(RegistrationError::InvalidField { message, .. }) => {
                (StatusCode::BAD_REQUEST, *message)
            }
            ApiError::Registration(RegistrationError::DuplicateCurp) => {
                (StatusCode::BAD_REQUEST, DUPLICATE_CURP_MESSAGE)
            }
            ApiError::Registration(RegistrationError::Store(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE)
            }
            ApiError::Malformed(_) => (StatusCode::BAD_REQUEST, MALFORMED_MESSAGE),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, mensaje) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(error = %self, "Error en el registro");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Registration rejected");
        }

        (
            status,
            Json(MessageBody {
                mensaje: mensaje.to_string(),
            }),
        )
            .into_response()
    }
}
