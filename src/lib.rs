//! Affiliate registration service and form client.
//!
//! ```text
//!   registro-cli                                   registro-afiliados
//!  ┌──────────────────────────┐   POST /registro   ┌──────────────────────────────┐
//!  │ form  (validate, trim,   │ ─────────────────▶ │ http     (axum + middleware) │
//!  │        uppercase CURP)   │                    │ registry (presence, stamp)   │
//!  │ client (reqwest)         │ ◀───────────────── │ store    (unique CURP)       │
//!  └──────────────────────────┘  201 / 400 / 500   └──────────────────────────────┘
//! ```

pub mod client;
pub mod config;
pub mod form;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod registry;
pub mod store;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use registry::RegistrationService;
