//! Registration form: field values, field errors, and the submit lifecycle.
//!
//! ```text
//!            begin_submit (valid)            complete(Created)
//!   Idle ─────────────────────────▶ Submitting ─────────────────▶ Success
//!    ▲  ▲                                 │
//!    │  └── begin_submit (invalid)        │ complete(Rejected | transport error)
//!    │                                    ▼
//!    └──────────── edit ──────────────  Error
//! ```
//!
//! Success and Error accept a new `begin_submit` directly; only Submitting
//! refuses one.

use thiserror::Error;

use crate::client::{ClientError, RegistrationClient, SubmitOutcome};
use crate::form::validation::{validate_field, Field, FieldError};
use crate::registry::NewRegistration;

/// Notification shown after a created response.
pub const SUCCESS_MESSAGE: &str = "Registro exitoso";

/// Notification shown when no usable response arrived.
pub const CONNECTIVITY_MESSAGE: &str = "Hubo un error al conectar con el servidor";

/// Where the form is in its request lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Success { message: String },
    Error { message: String },
}

impl FormState {
    /// The submit action is disabled while a request is in flight.
    pub fn can_submit(&self) -> bool {
        !matches!(self, FormState::Submitting)
    }

    /// User-visible notification, if any.
    pub fn notification(&self) -> Option<&str> {
        match self {
            FormState::Success { message } | FormState::Error { message } => Some(message),
            FormState::Idle | FormState::Submitting => None,
        }
    }
}

/// Why a submit did not start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("a submission is already in flight")]
    InFlight,

    #[error("{} field(s) failed validation", .0.len())]
    Invalid(Vec<FieldError>),
}

/// The registration form model.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    seccion: String,
    curp: String,
    telefono: String,
    errors: Vec<FieldError>,
    state: FormState,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a raw input value. The CURP is uppercased as it is entered.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Seccion => self.seccion = value,
            Field::Curp => self.curp = value.to_uppercase(),
            Field::Telefono => self.telefono = value,
        }
        if !matches!(self.state, FormState::Submitting) {
            self.state = FormState::Idle;
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Seccion => &self.seccion,
            Field::Curp => &self.curp,
            Field::Telefono => &self.telefono,
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Check every field, recording all failures.
    pub fn validate(&mut self) -> Result<(), Vec<FieldError>> {
        self.errors = Field::ALL
            .iter()
            .filter_map(|&field| validate_field(field, self.value(field)).err())
            .collect();

        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors.clone())
        }
    }

    /// The trimmed triple with the CURP uppercased.
    pub fn normalized(&self) -> NewRegistration {
        NewRegistration {
            seccion: self.seccion.trim().to_string(),
            curp: self.curp.trim().to_uppercase(),
            telefono: self.telefono.trim().to_string(),
        }
    }

    /// Validate, normalize and move to `Submitting`.
    pub fn begin_submit(&mut self) -> Result<NewRegistration, SubmitRejected> {
        if !self.state.can_submit() {
            return Err(SubmitRejected::InFlight);
        }
        if let Err(errors) = self.validate() {
            self.state = FormState::Idle;
            return Err(SubmitRejected::Invalid(errors));
        }
        self.state = FormState::Submitting;
        Ok(self.normalized())
    }

    /// Settle an in-flight submit. Results arriving in any other state are dropped.
    pub fn complete(&mut self, result: Result<SubmitOutcome, ClientError>) {
        if !matches!(self.state, FormState::Submitting) {
            tracing::debug!("Dropping response for a form that is not submitting");
            return;
        }

        self.state = match result {
            Ok(SubmitOutcome::Created { .. }) => {
                self.reset();
                FormState::Success {
                    message: SUCCESS_MESSAGE.to_string(),
                }
            }
            Ok(SubmitOutcome::Rejected { mensaje, .. }) => FormState::Error {
                message: format!("Error: {mensaje}"),
            },
            Err(e) => {
                tracing::error!(error = %e, "Error al enviar");
                FormState::Error {
                    message: CONNECTIVITY_MESSAGE.to_string(),
                }
            }
        };
    }

    /// Run the whole submit cycle against a server.
    pub async fn submit(&mut self, client: &RegistrationClient) -> Result<&FormState, SubmitRejected> {
        let payload = self.begin_submit()?;
        let result = client.submit(&payload).await;
        self.complete(result);
        Ok(&self.state)
    }

    fn reset(&mut self) {
        self.seccion.clear();
        self.curp.clear();
        self.telefono.clear();
        self.errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::form::validation::FieldErrorKind;
    use crate::registry::Registration;

    fn filled(seccion: &str, curp: &str, telefono: &str) -> RegistrationForm {
        let mut form = RegistrationForm::new();
        form.set(Field::Seccion, seccion);
        form.set(Field::Curp, curp);
        form.set(Field::Telefono, telefono);
        form
    }

    fn created() -> SubmitOutcome {
        SubmitOutcome::Created {
            mensaje: "Registro exitoso".into(),
            usuario: Registration {
                id: Uuid::new_v4(),
                seccion: "12".into(),
                curp: "ABCD010101HDFRRL09".into(),
                telefono: "5512345678".into(),
                created_at: Utc::now(),
            },
        }
    }

    #[test]
    fn test_curp_uppercased_on_entry() {
        let form = filled("12", "abc123def456ghi789", "5512345678");
        assert_eq!(form.value(Field::Curp), "ABC123DEF456GHI789");
    }

    #[test]
    fn test_invalid_fields_block_submit() {
        let mut form = filled("0", "", "12345");
        let err = form.begin_submit().unwrap_err();

        let SubmitRejected::Invalid(errors) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.len(), 3);
        assert_eq!(form.state(), &FormState::Idle);
        assert_eq!(
            form.error_for(Field::Curp).map(|e| e.kind),
            Some(FieldErrorKind::Required)
        );
        assert_eq!(
            form.error_for(Field::Telefono).map(|e| e.message),
            Some("Debe contener 10 dígitos")
        );
    }

    #[test]
    fn test_begin_submit_normalizes() {
        let mut form = filled("12", "abcd010101hdfrrl09", "5512345678");
        let payload = form.begin_submit().unwrap();

        assert_eq!(payload.curp, "ABCD010101HDFRRL09");
        assert_eq!(form.state(), &FormState::Submitting);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_second_submit_refused_while_in_flight() {
        let mut form = filled("12", "ABCD010101HDFRRL09", "5512345678");
        form.begin_submit().unwrap();
        assert_eq!(form.begin_submit().unwrap_err(), SubmitRejected::InFlight);
    }

    #[test]
    fn test_success_clears_form() {
        let mut form = filled("12", "ABCD010101HDFRRL09", "5512345678");
        form.begin_submit().unwrap();
        form.complete(Ok(created()));

        assert_eq!(form.state().notification(), Some(SUCCESS_MESSAGE));
        for field in Field::ALL {
            assert_eq!(form.value(field), "");
        }
    }

    #[test]
    fn test_rejection_keeps_values_and_shows_server_message() {
        let mut form = filled("12", "ABCD010101HDFRRL09", "5512345678");
        form.begin_submit().unwrap();
        form.complete(Ok(SubmitOutcome::Rejected {
            status: 400,
            mensaje: "El CURP ya está registrado".into(),
        }));

        assert_eq!(
            form.state(),
            &FormState::Error {
                message: "Error: El CURP ya está registrado".into()
            }
        );
        assert_eq!(form.value(Field::Curp), "ABCD010101HDFRRL09");
        assert!(form.state().can_submit());
    }

    #[test]
    fn test_late_response_ignored_when_idle() {
        let mut form = filled("12", "ABCD010101HDFRRL09", "5512345678");
        form.complete(Ok(created()));
        assert_eq!(form.state(), &FormState::Idle);
        assert_eq!(form.value(Field::Seccion), "12");
    }

    #[test]
    fn test_editing_after_result_returns_to_idle() {
        let mut form = filled("12", "ABCD010101HDFRRL09", "5512345678");
        form.begin_submit().unwrap();
        form.complete(Ok(SubmitOutcome::Rejected {
            status: 500,
            mensaje: "Error en el servidor".into(),
        }));
        form.set(Field::Seccion, "13");
        assert_eq!(form.state(), &FormState::Idle);
    }
}
