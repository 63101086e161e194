//! HTTP server for the gallery.
//!
//! Every request builds its own [`GalleryState`](crate::gallery::GalleryState)
//! from the shared manifest; nothing is mutated after startup.

mod handlers;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::gallery::GallerySettings;
use crate::manifest::Manifest;
use crate::photo::{UrlMode, UrlResolver, DEV_FS_PREFIX};

/// Everything the handlers read.
#[derive(Debug)]
pub struct Site {
    /// The photo index.
    pub manifest: Manifest,
    /// Directory holding the year directories.
    pub photo_root: PathBuf,
    /// View sizes.
    pub settings: GallerySettings,
    /// Header title.
    pub title: String,
    /// Image URL builder.
    pub resolver: UrlResolver,
}

impl Site {
    /// Assemble a site from a loaded manifest and configuration.
    ///
    /// In development mode the photo root is made absolute so image URLs
    /// carry the full file-system path.
    #[must_use]
    pub fn from_config(manifest: Manifest, config: &Config) -> Self {
        let root = &config.photos.root;
        let photo_root = match config.server.mode {
            UrlMode::Development if root.is_relative() => std::env::current_dir()
                .map_or_else(|_| root.clone(), |cwd| cwd.join(root)),
            UrlMode::Development | UrlMode::Production => root.clone(),
        };
        let resolver = UrlResolver::for_mode(config.server.mode, &photo_root);

        Self {
            manifest,
            photo_root,
            settings: GallerySettings::from(&config.gallery),
            title: config.gallery.title.clone(),
            resolver,
        }
    }
}

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    site: Arc<Site>,
}

impl AppState {
    /// Wrap a site for sharing across requests.
    #[must_use]
    pub fn new(site: Site) -> Self {
        Self {
            site: Arc::new(site),
        }
    }

    /// The shared site.
    #[must_use]
    pub fn site(&self) -> &Site {
        &self.site
    }
}

/// Build the gallery router.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::home_handler))
        .route("/all/batch", get(handlers::batch_handler))
        .route("/:param", get(handlers::page_handler))
        .route("/photos/:year/*path", get(handlers::photo_handler));

    if state.site().resolver.mode() == UrlMode::Development {
        router = router.route(
            &format!("{DEV_FS_PREFIX}/*rest"),
            get(handlers::dev_fs_handler),
        );
    }

    router
        .fallback(|| async { Redirect::to("/") })
        .with_state(state)
}

/// Serve the gallery on `addr` until SIGINT or SIGTERM.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| Error::ServerBind { addr, source })?;
    let local = listener.local_addr().unwrap_or(addr);

    let site = state.site();
    info!(
        "Serving {} photos across {} years on http://{local} ({} mode)",
        site.manifest.total_photos(),
        site.manifest.year_count(),
        site.resolver.mode()
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                warn!("Could not register signal handlers; falling back to Ctrl-C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received");
}
