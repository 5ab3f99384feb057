//! HTTP client for `POST /registro`.

use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::registry::{MessageBody, NewRegistration, Registration, RegistrationResponse};

/// What the server answered.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// 2xx with the stored record.
    Created { mensaje: String, usuario: Registration },
    /// Any other status, carrying the server's `mensaje`.
    Rejected { status: u16, mensaje: String },
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// No response was received.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// A response arrived but its body was not the expected JSON.
    #[error("unreadable response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Submits registrations to a running service.
pub struct RegistrationClient {
    client: Client,
    endpoint: Url,
}

impl RegistrationClient {
    /// `base_url` is the service root, e.g. `http://localhost:5007`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_http_client(Client::new(), base_url)
    }

    pub fn with_http_client(client: Client, base_url: &str) -> Result<Self, ClientError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join("registro")?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send one registration. No retries.
    pub async fn submit(&self, payload: &NewRegistration) -> Result<SubmitOutcome, ClientError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        if status.is_success() {
            let body: RegistrationResponse = response.json().await.map_err(ClientError::Decode)?;
            Ok(SubmitOutcome::Created {
                mensaje: body.mensaje,
                usuario: body.usuario,
            })
        } else {
            let body: MessageBody = response.json().await.map_err(ClientError::Decode)?;
            Ok(SubmitOutcome::Rejected {
                status: status.as_u16(),
                mensaje: body.mensaje,
            })
        }
    }
}
