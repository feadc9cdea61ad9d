//! Web server implementation
//!
//! One request at a time per connection, safe across connections: the
//! manifest and its namespace table are read-mostly after build time, and the
//! only post-startup mutation (lazily minting a prefix) is guarded inside the
//! mapper itself.

use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{Path as UrlPath, State},
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use jspec_common::AssetManifest;

use crate::page::{self, HARNESS_PREFIX};
use crate::static_files::{not_found, serve_file};

/// Request-focus prefix for single-suite pages.
const SUITE_PREFIX: &str = "/__suite__";

/// Harness HTTP server
#[derive(Clone)]
pub struct HarnessServer {
    state: Arc<ServerState>,
}

struct ServerState {
    /// Populated before the server starts accepting requests.
    manifest: AssetManifest,
    /// Root of the harness's own browser assets (jasmine.js and friends).
    harness_root: PathBuf,
}

impl HarnessServer {
    pub fn new(manifest: AssetManifest, harness_root: PathBuf) -> Self {
        Self {
            state: Arc::new(ServerState {
                manifest,
                harness_root,
            }),
        }
    }

    /// Create router
    pub fn router(&self) -> Router {
        // Non-GET methods on matched routes fall through to 404 rather than
        // axum's default 405: the surface is GET/HEAD only.
        Router::new()
            .route("/", get(root_handler).fallback(not_found_handler))
            .route("/run.html", get(run_html_handler).fallback(not_found_handler))
            .route(
                &format!("{SUITE_PREFIX}/*path"),
                get(focused_handler).fallback(not_found_handler),
            )
            .route(
                &format!("{HARNESS_PREFIX}/*path"),
                get(harness_asset_handler).fallback(not_found_handler),
            )
            .fallback(mapped_asset_handler)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    pub async fn serve(self, addr: SocketAddr) -> anyhow::Result<()> {
        info!("jspec server starting on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}

/// Convenience entry point: wrap the manifest and serve until shutdown.
pub async fn serve(
    addr: SocketAddr,
    manifest: AssetManifest,
    harness_root: PathBuf,
) -> anyhow::Result<()> {
    HarnessServer::new(manifest, harness_root).serve(addr).await
}

/// `GET /` renders the full runner page; `HEAD /` answers an empty 200
/// without touching the manifest.
async fn root_handler(State(state): State<Arc<ServerState>>, method: Method) -> Response {
    if method == Method::HEAD {
        return ([(header::CONTENT_TYPE, "text/html")], "").into_response();
    }
    (
        [(header::CONTENT_TYPE, "text/html")],
        page::runner_page(&state.manifest, None),
    )
        .into_response()
}

/// Legacy entry point, kept as a plain 302 to `/`.
async fn run_html_handler() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")], "").into_response()
}

/// Focused mode: a runner page whose spec group is the single pattern from
/// the URL, resolved against the spec directory.
async fn focused_handler(
    State(state): State<Arc<ServerState>>,
    UrlPath(spec): UrlPath<String>,
) -> Response {
    debug!("focused suite: {}", spec);
    (
        [(header::CONTENT_TYPE, "text/html")],
        page::runner_page(&state.manifest, Some(&spec)),
    )
        .into_response()
}

/// Static files shipped with the harness itself.
async fn harness_asset_handler(
    State(state): State<Arc<ServerState>>,
    UrlPath(path): UrlPath<String>,
) -> Response {
    if escapes_root(&path) {
        return not_found();
    }
    serve_file(&state.harness_root.join(path))
}

/// Everything else: resolve the request path against the namespace table.
///
/// Token prefixes are checked before the source root, which owns `/` and
/// would otherwise shadow them. A matched mapping whose file is gone is a
/// 404, never a crash.
async fn mapped_asset_handler(
    State(state): State<Arc<ServerState>>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET {
        return not_found();
    }
    let path = uri.path();
    if escapes_root(path) {
        return not_found();
    }

    for (dir, prefix) in state.manifest.mapper().mappings() {
        if prefix == "/" {
            continue;
        }
        if let Some(rest) = path.strip_prefix(&format!("{prefix}/")) {
            return serve_file(&dir.join(rest));
        }
    }

    let candidate = state.manifest.src_dir().join(path.trim_start_matches('/'));
    if candidate.is_file() {
        serve_file(&candidate)
    } else {
        debug!("unmapped path: {}", path);
        not_found()
    }
}

async fn not_found_handler() -> Response {
    not_found()
}

/// True when a request path tries to climb out of its base directory.
fn escapes_root(path: &str) -> bool {
    Path::new(path)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
}
