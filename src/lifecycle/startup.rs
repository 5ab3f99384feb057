//! Startup orchestration.
//!
//! # Responsibilities
//! - Connect the record store once and report the result
//! - Build the registration service around that handle
//!
//! # Design Decisions
//! - A store that fails to open is logged, not retried; the server still
//!   starts and answers 500 until it is restarted with a working store

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::registry::RegistrationService;
use crate::store::{self, DisconnectedStore, RecordStore};

/// Open the configured store, falling back to [`DisconnectedStore`].
pub fn connect_store(uri: &str) -> Arc<dyn RecordStore> {
    match store::open(uri) {
        Ok(handle) => {
            tracing::info!(backend = handle.backend(), "Connected to record store");
            handle
        }
        Err(e) => {
            tracing::error!(error = %e, "Record store connection failed");
            Arc::new(DisconnectedStore::new(e.to_string()))
        }
    }
}

/// Store plus service, wired from config.
pub fn build_service(config: &ServiceConfig) -> RegistrationService {
    RegistrationService::new(connect_store(&config.store.uri))
        .with_strict_validation(config.security.strict_validation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_store_becomes_disconnected() {
        let store = connect_store("mongodb://localhost:27017/registro");
        assert_eq!(store.backend(), "disconnected");
    }

    #[test]
    fn test_build_service_uses_config() {
        let mut config = ServiceConfig::default();
        config.security.strict_validation = true;
        let service = build_service(&config);
        assert_eq!(service.store().backend(), "memory");
    }
}
