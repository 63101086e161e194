use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{AppState, Site};
use crate::gallery::{highlights, GalleryState, Route};
use crate::manifest::Year;
use crate::render::{self, PageContext};

/// View state carried in page URLs.
///
/// Fields are kept as text and parsed one by one, so a malformed value only
/// drops that value and not its neighbours.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageQuery {
    shown: Option<String>,
    photo: Option<String>,
    seed: Option<String>,
}

impl PageQuery {
    fn shown(&self) -> Option<usize> {
        parse_field("shown", self.shown.as_deref())
    }

    fn photo(&self) -> Option<usize> {
        parse_field("photo", self.photo.as_deref())
    }

    fn seed(&self) -> Option<u64> {
        parse_field("seed", self.seed.as_deref())
    }
}

fn parse_field<T: std::str::FromStr>(name: &str, value: Option<&str>) -> Option<T> {
    let value = value?;
    let parsed = value.trim().parse().ok();
    if parsed.is_none() {
        debug!("Ignoring malformed query parameter {name}={value}");
    }
    parsed
}

pub(crate) async fn home_handler(
    State(state): State<AppState>,
    query: Option<Query<PageQuery>>,
) -> Html<String> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    render_view(state.site(), Route::Home, &query)
}

pub(crate) async fn page_handler(
    State(state): State<AppState>,
    Path(param): Path<String>,
    query: Option<Query<PageQuery>>,
) -> Html<String> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let site = state.site();
    let route = Route::from_param(Some(&param), &site.manifest);
    render_view(site, route, &query)
}

pub(crate) async fn batch_handler(
    State(state): State<AppState>,
    query: Option<Query<PageQuery>>,
) -> Html<String> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let site = state.site();
    let mut view = GalleryState::new(&site.manifest, site.settings, Route::AllYears, 0);
    view.reveal(query.shown().unwrap_or(0));
    let range = view.on_sentinel_visible();
    debug!("Batch {range:?} of {}", view.photos().len());

    let ctx = page_context(site);
    Html(render::batch_fragment(&ctx, &view, range))
}

pub(crate) async fn photo_handler(
    State(state): State<AppState>,
    Path((year, path)): Path<(String, String)>,
) -> Response {
    serve_photo(state.site(), &year, &path).await
}

/// Development-mode file access: `/@fs/<root>/<year>/<path>`.
pub(crate) async fn dev_fs_handler(
    State(state): State<AppState>,
    Path(rest): Path<String>,
) -> Response {
    let site = state.site();
    let rest = rest.trim_start_matches('/');
    let relative = match site.resolver.fs_root() {
        Some("") | None => Some(rest),
        Some(root) => rest
            .strip_prefix(root)
            .and_then(|tail| tail.strip_prefix('/')),
    };

    match relative.and_then(|relative| relative.split_once('/')) {
        Some((year, path)) => serve_photo(site, year, path).await,
        None => not_found(),
    }
}

fn render_view(site: &Site, route: Route, query: &PageQuery) -> Html<String> {
    let seed = match route {
        Route::Home => query.seed().unwrap_or_else(highlights::fresh_seed),
        Route::Year(_) | Route::AllYears => 0,
    };
    let mut view = GalleryState::new(&site.manifest, site.settings, route, seed);
    if let Some(shown) = query.shown() {
        view.reveal(shown);
    }
    if let Some(photo) = query.photo() {
        if !view.open_lightbox(photo) {
            debug!("Ignoring lightbox index {photo} on {route}");
        }
    }
    debug!("Rendering {route} with {} photos", view.visible());

    let ctx = page_context(site);
    Html(render::page(&ctx, &view))
}

fn page_context(site: &Site) -> PageContext<'_> {
    PageContext {
        title: &site.title,
        resolver: &site.resolver,
    }
}

/// Serve a photo file if `(year, path)` is in the manifest.
async fn serve_photo(site: &Site, year: &str, path: &str) -> Response {
    let Ok(year) = year.parse::<Year>() else {
        return not_found();
    };
    if !site.manifest.contains(year, path) {
        debug!("Refusing {year}/{path}: not in manifest");
        return not_found();
    }

    let mut file = site.photo_root.join(year.to_string());
    file.extend(path.split('/'));

    match tokio::fs::read(&file).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, content_type(path)),
                (header::CACHE_CONTROL, "public, max-age=3600"),
            ],
            Body::from(bytes),
        )
            .into_response(),
        Err(e) => {
            warn!("Failed to read {}: {e}", file.display());
            not_found()
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

fn content_type(path: &str) -> &'static str {
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type() {
        assert_eq!(content_type("a/b.JPG"), "image/jpeg");
        assert_eq!(content_type("b.jpeg"), "image/jpeg");
        assert_eq!(content_type("b.png"), "image/png");
        assert_eq!(content_type("b.gif"), "image/gif");
        assert_eq!(content_type("README"), "application/octet-stream");
    }

    fn query(uri: &str) -> PageQuery {
        let uri: axum::http::Uri = uri.parse().unwrap();
        Query::<PageQuery>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn test_page_query_defaults() {
        let query = PageQuery::default();
        assert!(query.shown().is_none());
        assert!(query.photo().is_none());
        assert!(query.seed().is_none());
    }

    #[test]
    fn test_malformed_field_keeps_the_others() {
        let query = query("/?seed=5&photo=x&shown=-3");
        assert_eq!(query.seed(), Some(5));
        assert_eq!(query.photo(), None);
        assert_eq!(query.shown(), None);
    }

    #[test]
    fn test_well_formed_query() {
        let query = query("/all?shown=80&photo=12");
        assert_eq!(query.shown(), Some(80));
        assert_eq!(query.photo(), Some(12));
        assert_eq!(query.seed(), None);
    }
}
