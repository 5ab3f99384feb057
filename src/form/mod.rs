//! Client-side registration form.
//!
//! # Data Flow
//! ```text
//! raw inputs (CLI args / prompts)
//!     → state.rs (RegistrationForm: set, CURP uppercased on entry)
//!     → validation.rs (per-field pattern checks, all errors at once)
//!     → normalize (trim, uppercase CURP)
//!     → client::RegistrationClient (one POST /registro)
//!     → FormState::{Success, Error}
//! ```

pub mod state;
pub mod validation;

pub use state::{FormState, RegistrationForm, SubmitRejected, CONNECTIVITY_MESSAGE, SUCCESS_MESSAGE};
pub use validation::{validate_field, Field, FieldError, FieldErrorKind};
