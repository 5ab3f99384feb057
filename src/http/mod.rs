//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID assigned or kept)
//!     → registro.rs (POST /registro → RegistrationService)
//!     → error.rs (outcome → status + {mensaje})
//!     → Send to client
//! ```

pub mod error;
pub mod registro;
pub mod request;
pub mod server;

pub use error::ApiError;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer, ServerError};
