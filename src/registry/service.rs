//! The registration operation.

use std::sync::Arc;

use chrono::Utc;

use crate::form::{validate_field, Field};
use crate::observability::metrics;
use crate::registry::error::RegistrationError;
use crate::registry::model::{Registration, RegistrationRequest};
use crate::store::{RecordStore, StoreError};

/// Validates presence, stamps and persists registrations.
///
/// Holds no per-request state; the store handle is the only shared resource.
#[derive(Clone)]
pub struct RegistrationService {
    store: Arc<dyn RecordStore>,
    strict_validation: bool,
}

impl RegistrationService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            strict_validation: false,
        }
    }

    /// Re-check field formats on the server before persisting.
    pub fn with_strict_validation(mut self, enabled: bool) -> Self {
        self.strict_validation = enabled;
        self
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Create a registration record from a request body.
    pub async fn submit_registration(
        &self,
        request: RegistrationRequest,
    ) -> Result<Registration, RegistrationError> {
        let new = request
            .into_new_registration()
            .ok_or(RegistrationError::MissingFields)?;

        if self.strict_validation {
            for field in Field::ALL {
                validate_field(field, new.value(field)).map_err(|e| {
                    RegistrationError::InvalidField {
                        field: e.field,
                        message: e.message,
                    }
                })?;
            }
        }

        let record = new.into_record(Utc::now());
        match self.store.insert(record).await {
            Ok(created) => {
                if let Ok(total) = self.store.count().await {
                    metrics::record_store_size(total);
                }
                Ok(created)
            }
            Err(StoreError::Duplicate { .. }) => Err(RegistrationError::DuplicateCurp),
            Err(e) => Err(RegistrationError::Store(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::NewRegistration;
    use crate::store::{DisconnectedStore, MemoryStore};

    fn request(seccion: &str, curp: &str, telefono: &str) -> RegistrationRequest {
        NewRegistration {
            seccion: seccion.into(),
            curp: curp.into(),
            telefono: telefono.into(),
        }
        .into()
    }

    fn service() -> (RegistrationService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (RegistrationService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_creates_record_with_server_timestamp() {
        let (service, store) = service();
        let before = Utc::now();

        let record = service
            .submit_registration(request("12", "ABCD010101HDFRRL09", "5512345678"))
            .await
            .unwrap();

        assert_eq!(record.seccion, "12");
        assert_eq!(record.curp, "ABCD010101HDFRRL09");
        assert_eq!(record.telefono, "5512345678");
        assert!(record.created_at >= before);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_curp_leaves_store_unchanged() {
        let (service, store) = service();
        let first = service
            .submit_registration(request("12", "ABCD010101HDFRRL09", "5512345678"))
            .await
            .unwrap();

        let err = service
            .submit_registration(request("99", "ABCD010101HDFRRL09", "5500000000"))
            .await
            .unwrap_err();

        assert!(matches!(err, RegistrationError::DuplicateCurp));
        assert_eq!(err.to_string(), "El CURP ya está registrado");
        assert_eq!(store.count().await.unwrap(), 1);
        let stored = store.find_by_curp("ABCD010101HDFRRL09").await.unwrap();
        assert_eq!(stored, Some(first));
    }

    #[tokio::test]
    async fn test_each_missing_field_is_rejected() {
        let (service, store) = service();
        let bodies = [
            RegistrationRequest {
                seccion: None,
                ..request("12", "ABCD010101HDFRRL09", "5512345678")
            },
            RegistrationRequest {
                curp: Some(String::new()),
                ..request("12", "ABCD010101HDFRRL09", "5512345678")
            },
            RegistrationRequest {
                telefono: None,
                ..request("12", "ABCD010101HDFRRL09", "5512345678")
            },
        ];

        for body in bodies {
            let err = service.submit_registration(body).await.unwrap_err();
            assert!(matches!(err, RegistrationError::MissingFields));
        }
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_formats_trusted_by_default() {
        let (service, _) = service();
        let record = service
            .submit_registration(request("0123", "curp-minuscula", "55"))
            .await
            .unwrap();
        assert_eq!(record.curp, "curp-minuscula");
    }

    #[tokio::test]
    async fn test_strict_mode_rechecks_formats() {
        let (service, store) = service();
        let service = service.with_strict_validation(true);

        let err = service
            .submit_registration(request("12", "ABCD010101HDFRRL09", "55"))
            .await
            .unwrap_err();

        match err {
            RegistrationError::InvalidField { field, message } => {
                assert_eq!(field, Field::Telefono);
                assert_eq!(message, "Debe contener 10 dígitos");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_strict_mode_reports_missing_before_format() {
        let (service, _) = service();
        let service = service.with_strict_validation(true);
        let err = service
            .submit_registration(RegistrationRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RegistrationError::MissingFields));
    }

    #[tokio::test]
    async fn test_store_failure_is_generic() {
        let service = RegistrationService::new(Arc::new(DisconnectedStore::new("connection refused")));
        let err = service
            .submit_registration(request("12", "ABCD010101HDFRRL09", "5512345678"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistrationError::Store(StoreError::Unavailable(_))));
        assert_eq!(err.outcome(), "error");
    }
}
