//! Registration document and request/response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::form::Field;

/// A stored registration. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Document id, assigned by the service.
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub seccion: String,
    /// Unique across the store.
    pub curp: String,
    pub telefono: String,
    #[serde(rename = "fechaRegistro")]
    pub created_at: DateTime<Utc>,
}

/// The three values of a registration before the server stamps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRegistration {
    pub seccion: String,
    pub curp: String,
    pub telefono: String,
}

impl NewRegistration {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Seccion => &self.seccion,
            Field::Curp => &self.curp,
            Field::Telefono => &self.telefono,
        }
    }

    /// Stamp with a fresh document id and creation time.
    pub fn into_record(self, created_at: DateTime<Utc>) -> Registration {
        Registration {
            id: Uuid::new_v4(),
            seccion: self.seccion,
            curp: self.curp,
            telefono: self.telefono,
            created_at,
        }
    }
}

/// `POST /registro` body as received. Any field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationRequest {
    #[serde(default, deserialize_with = "text_or_number")]
    pub seccion: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub curp: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub telefono: Option<String>,
}

impl RegistrationRequest {
    /// `None` when any field is absent or empty.
    pub fn into_new_registration(self) -> Option<NewRegistration> {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());
        Some(NewRegistration {
            seccion: present(self.seccion)?,
            curp: present(self.curp)?,
            telefono: present(self.telefono)?,
        })
    }
}

impl From<NewRegistration> for RegistrationRequest {
    fn from(value: NewRegistration) -> Self {
        Self {
            seccion: Some(value.seccion),
            curp: Some(value.curp),
            telefono: Some(value.telefono),
        }
    }
}

/// Numbers are accepted and kept as their decimal text. A numeric zero counts
/// as absent, like `null`.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => Some(s),
        Some(Raw::Number(n)) if n.as_f64() == Some(0.0) => None,
        Some(Raw::Number(n)) => Some(n.to_string()),
        None => None,
    })
}

/// 201 body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub mensaje: String,
    pub usuario: Registration,
}

/// Every non-201 body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub mensaje: String,
}
