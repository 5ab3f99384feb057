//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use registro_afiliados::client::RegistrationClient;
use registro_afiliados::store::{MemoryStore, RecordStore};
use registro_afiliados::{HttpServer, RegistrationService, ServiceConfig, Shutdown};
use tokio::task::JoinHandle;

/// A service running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn registro_url(&self) -> String {
        format!("http://{}/registro", self.addr)
    }

    pub fn client(&self) -> RegistrationClient {
        RegistrationClient::with_http_client(http_client(), &self.url()).unwrap()
    }

    pub async fn stop(self) {
        self.shutdown.trigger();
        let _ = self.handle.await;
    }
}

/// Start a server backed by an in-memory store.
#[allow(dead_code)]
pub async fn start_memory_server() -> (TestServer, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let server = start_server(store.clone()).await;
    (server, store)
}

/// Start a server around any store handle.
pub async fn start_server(store: Arc<dyn RecordStore>) -> TestServer {
    let mut config = ServiceConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, RegistrationService::new(store)).unwrap();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

/// reqwest client that ignores proxy environment variables.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
