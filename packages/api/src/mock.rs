//! In-process HTTP server for tests.
//!
//! Routes are plain axum handlers. Every request, matched or not, increments
//! the returned hit counter, so tests can assert that no call went out.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;

use crate::client::ApiClient;
use crate::config::ApiConfig;

#[derive(Clone, Debug, Default)]
pub(crate) struct Hits(Arc<AtomicUsize>);

impl Hits {
    pub(crate) fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

async fn count_hits(State(hits): State<Hits>, req: Request, next: Next) -> Response {
    hits.0.fetch_add(1, Ordering::SeqCst);
    next.run(req).await
}

pub(crate) struct MockServer {
    pub base_url: String,
    pub hits: Hits,
}

impl MockServer {
    pub(crate) async fn start(router: Router) -> Self {
        let hits = Hits::default();
        let app = router.layer(middleware::from_fn_with_state(hits.clone(), count_hits));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server");
        });

        Self {
            base_url: format!("http://{addr}"),
            hits,
        }
    }

    pub(crate) fn client(&self) -> ApiClient {
        ApiClient::new(ApiConfig::new(self.base_url.clone()))
    }
}

/// A base URL nothing is listening on.
pub(crate) async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind closed port");
    let addr = listener.local_addr().expect("closed port address");
    drop(listener);
    format!("http://{addr}")
}
