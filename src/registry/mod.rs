//! Registration domain: the record, the request, and the submit operation.
//!
//! # Data Flow
//! ```text
//! RegistrationRequest (seccion?, curp?, telefono?)
//!     → presence check            → MissingFields
//!     → [strict] format check     → InvalidField
//!     → stamp (_id, fechaRegistro)
//!     → RecordStore::insert       → DuplicateCurp | Store(e)
//!     → Registration
//! ```

pub mod error;
pub mod model;
pub mod service;

pub use error::RegistrationError;
pub use model::{MessageBody, NewRegistration, Registration, RegistrationRequest, RegistrationResponse};
pub use service::RegistrationService;
