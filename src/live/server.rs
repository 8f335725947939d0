// src/live/server.rs

use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use axum::http::header;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::errors::{PipelineError, Result};

use super::inject::inject_reload_client;
use super::reload::{ReloadHub, reload_socket};
use super::{CLIENT_JS, CLIENT_SCRIPT_PATH, RELOAD_SOCKET_PATH};

/// Build the live server's router.
///
/// - `/` serves `<dest>/<index>`.
/// - Everything else is a static file under `dest`; directories only
///   resolve to their `index.html`, never to a listing.
/// - HTML responses get the reload client injected.
pub fn router(dest: &Path, index: &str, hub: ReloadHub, cors: bool) -> Router {
    let static_files = ServeDir::new(dest).append_index_html_on_directories(true);

    let mut router = Router::new()
        .route(RELOAD_SOCKET_PATH, get(reload_socket))
        .route(CLIENT_SCRIPT_PATH, get(client_script))
        .route_service("/", ServeFile::new(dest.join(index)))
        .fallback_service(static_files)
        .layer(middleware::from_fn(inject_reload_client))
        .layer(TraceLayer::new_for_http());

    if cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(hub)
}

async fn client_script() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript; charset=utf-8")], CLIENT_JS)
}

/// A running live server.
#[derive(Debug)]
pub struct LiveServer {
    addr: SocketAddr,
    handle: JoinHandle<std::io::Result<()>>,
}

impl LiveServer {
    /// Bind, start serving in the background and optionally open a browser.
    ///
    /// A bind failure (e.g. port in use) is returned as `BindError`.
    pub async fn start(config: &PipelineConfig, hub: ReloadHub) -> Result<Self> {
        let bind_addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| PipelineError::BindError {
                addr: bind_addr.clone(),
                source,
            })?;
        let addr = listener.local_addr()?;

        let dest = config.dest_dir();
        let app = router(&dest, &config.server.index, hub, config.server.cors);
        let handle = tokio::spawn(async move { axum::serve(listener, app).await });

        let server = Self { addr, handle };
        info!(addr = %server.addr, root = ?dest, "live server listening");

        if config.server.open {
            open_browser(server.url());
        }

        Ok(server)
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn url(&self) -> String {
        format!("http://localhost:{}/", self.addr.port())
    }

    /// Stop accepting connections.
    pub fn stop(self) {
        debug!(addr = %self.addr, "stopping live server");
        self.handle.abort();
    }
}

fn open_browser(url: String) {
    // `open` waits for the platform launcher; keep that off the event loop.
    tokio::task::spawn_blocking(move || {
        if let Err(e) = open::that(&url) {
            warn!(%url, "could not open browser: {e}");
        }
    });
}
