//! In-process mock upstreams for adapter tests.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

/// A router served on an ephemeral localhost port.
pub struct MockServer {
    addr: SocketAddr,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockServer {
    pub async fn start(app: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            _handle: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}
