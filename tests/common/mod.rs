//! Shared utilities for runtime integration tests.

use std::net::SocketAddr;

use alb_bridge::adapter::{Adapter, Handler};
use alb_bridge::config::RuntimeConfig;
use alb_bridge::runtime::InvokeServer;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Running runtime; dropping it shuts the server down.
pub struct TestRuntime {
    pub addr: SocketAddr,
    _shutdown: oneshot::Sender<()>,
}

impl TestRuntime {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a runtime around `adapter` on an ephemeral port.
pub async fn start_runtime<H: Handler + 'static>(adapter: Adapter<H>) -> TestRuntime {
    start_runtime_with(adapter, RuntimeConfig::default()).await
}

#[allow(dead_code)]
pub async fn start_runtime_with<H: Handler + 'static>(adapter: Adapter<H>, config: RuntimeConfig) -> TestRuntime {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    let server = InvokeServer::new(adapter, config);
    tokio::spawn(async move {
        let _ = server
            .run_until(listener, async {
                let _ = rx.await;
            })
            .await;
    });

    TestRuntime { addr, _shutdown: tx }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
