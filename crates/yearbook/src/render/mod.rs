//! HTML rendering of gallery views.
//!
//! Pages are rendered on the server from a [`GalleryState`]. Links carry the
//! parts of the view state that must survive a request: the highlight seed on
//! the home page, the visible count in the all-years view, and the lightbox
//! index.

pub mod assets;

use std::ops::Range;

use crate::gallery::{GalleryState, Route};
use crate::photo::{PhotoRef, UrlResolver};

/// Shown instead of a grid when a view has nothing to display.
pub const EMPTY_MESSAGE: &str = "No photos found.";

/// How much room a highlight tile takes in the home grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileSpan {
    /// One cell.
    Single,
    /// Two columns.
    Wide,
    /// Two rows.
    Tall,
    /// Two columns by two rows.
    Feature,
}

impl TileSpan {
    fn class(self) -> &'static str {
        match self {
            Self::Single => "",
            Self::Wide => " span-wide",
            Self::Tall => " span-tall",
            Self::Feature => " span-feature",
        }
    }
}

/// Fixed asymmetric layout of the home highlights, in sample order.
pub const HIGHLIGHT_LAYOUT: [TileSpan; 12] = [
    TileSpan::Feature,
    TileSpan::Tall,
    TileSpan::Single,
    TileSpan::Single,
    TileSpan::Single,
    TileSpan::Wide,
    TileSpan::Single,
    TileSpan::Single,
    TileSpan::Tall,
    TileSpan::Single,
    TileSpan::Wide,
    TileSpan::Wide,
];

/// Site-wide inputs to rendering.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Header title.
    pub title: &'a str,
    /// Image URL builder.
    pub resolver: &'a UrlResolver,
}

/// Render a full page for the view.
#[must_use]
pub fn page(ctx: &PageContext<'_>, state: &GalleryState<'_>) -> String {
    let body = match state.route() {
        Route::Home => home_body(ctx, state),
        Route::Year(_) | Route::AllYears => grid_body(ctx, state),
    };

    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\n\
<title>{title}</title>\n<style>{css}</style>\n</head>\n<body>\n{header}<main>\n{body}</main>\n{lightbox}\
<script>{js}</script>\n</body>\n</html>\n",
        title = escape_html(&page_title(ctx, state)),
        css = assets::STYLESHEET,
        header = header(ctx, state),
        lightbox = lightbox(ctx, state),
        js = assets::SCRIPT,
    )
}

/// Render the tiles revealed by one sentinel hit, followed by a
/// `#sentinel-next` marker carrying the new page URL and, while photos remain,
/// the next batch URL.
#[must_use]
pub fn batch_fragment(
    ctx: &PageContext<'_>,
    state: &GalleryState<'_>,
    range: Range<usize>,
) -> String {
    let mut html = String::new();
    let displayed = state.displayed();
    for index in range {
        if let Some(photo) = displayed.get(index) {
            html.push_str(&tile(ctx, state, index, *photo, TileSpan::Single));
        }
    }

    let page = escape_html(&page_link(state, None));
    if state.has_more() {
        html.push_str(&format!(
            "<div id=\"sentinel-next\" data-page=\"{page}\" data-batch=\"{}\"></div>\n",
            escape_html(&batch_link(state))
        ));
    } else {
        html.push_str(&format!("<div id=\"sentinel-next\" data-page=\"{page}\"></div>\n"));
    }
    html
}

/// URL of the current view, optionally with the lightbox open at `photo`.
#[must_use]
pub fn page_link(state: &GalleryState<'_>, photo: Option<usize>) -> String {
    let mut params = Vec::new();
    match state.route() {
        Route::Home => params.push(format!("seed={}", state.seed())),
        Route::AllYears => params.push(format!("shown={}", state.visible())),
        Route::Year(_) => {}
    }
    if let Some(index) = photo {
        params.push(format!("photo={index}"));
    }

    let path = state.route().path();
    if params.is_empty() {
        path
    } else {
        format!("{path}?{}", params.join("&"))
    }
}

/// URL the sentinel fetches for the next batch.
#[must_use]
pub fn batch_link(state: &GalleryState<'_>) -> String {
    format!("/all/batch?shown={}", state.visible())
}

/// The header count line.
#[must_use]
pub fn count_line(state: &GalleryState<'_>) -> String {
    let manifest = state.manifest();
    match state.route() {
        Route::Year(_) => format!("{} photos", state.photos().len()),
        Route::Home | Route::AllYears => format!(
            "{} photos across {} years",
            manifest.total_photos(),
            manifest.year_count()
        ),
    }
}

fn page_title(ctx: &PageContext<'_>, state: &GalleryState<'_>) -> String {
    match state.route() {
        Route::Home => ctx.title.to_string(),
        Route::Year(year) => format!("{year} - {}", ctx.title),
        Route::AllYears => format!("All Years - {}", ctx.title),
    }
}

fn header(ctx: &PageContext<'_>, state: &GalleryState<'_>) -> String {
    let route = state.route();
    let mut chips = String::new();
    chips.push_str(&chip("/all", "All Years", route == Route::AllYears));
    for year in state.manifest().years() {
        let label = format!("{year} ({})", state.manifest().count(year));
        chips.push_str(&chip(
            &Route::Year(year).path(),
            &label,
            route.selected_year() == Some(year),
        ));
    }

    format!(
        "<header class=\"site-header\">\n<div class=\"title-row\">\
<a class=\"title\" href=\"/\">{}</a><span class=\"count\">{}</span></div>\n\
<nav class=\"chips\">{chips}</nav>\n</header>\n",
        escape_html(ctx.title),
        escape_html(&count_line(state)),
    )
}

fn chip(href: &str, label: &str, active: bool) -> String {
    format!(
        "<a class=\"chip{}\" href=\"{}\">{}</a>",
        if active { " active" } else { "" },
        escape_html(href),
        escape_html(label)
    )
}

fn home_body(ctx: &PageContext<'_>, state: &GalleryState<'_>) -> String {
    if state.displayed().is_empty() {
        return empty_message();
    }

    let mut html = String::from("<section class=\"highlights\">\n");
    for (index, photo) in state.displayed().iter().enumerate() {
        let span = HIGHLIGHT_LAYOUT[index % HIGHLIGHT_LAYOUT.len()];
        html.push_str(&tile(ctx, state, index, *photo, span));
    }
    html.push_str("</section>\n<section class=\"year-list\">\n<h2>Years</h2>\n<ul>\n");
    for (year, count) in state.year_rows() {
        html.push_str(&format!(
            "<li><a href=\"{}\"><span class=\"year\">{year}</span><span class=\"count\">{count} photos</span></a></li>\n",
            Route::Year(year).path()
        ));
    }
    html.push_str("</ul>\n<a class=\"browse-all\" href=\"/all\">Browse all photos</a>\n</section>\n");
    html
}

fn grid_body(ctx: &PageContext<'_>, state: &GalleryState<'_>) -> String {
    if state.displayed().is_empty() {
        return empty_message();
    }

    let mut html = String::from("<section id=\"grid\" class=\"grid\">\n");
    for (index, photo) in state.displayed().iter().enumerate() {
        html.push_str(&tile(ctx, state, index, *photo, TileSpan::Single));
    }
    html.push_str("</section>\n");

    if state.has_more() {
        let fallback = format!(
            "/all?shown={}",
            state.visible() + state.settings().batch_size
        );
        html.push_str(&format!(
            "<div id=\"sentinel\" class=\"sentinel\" data-batch=\"{}\"><a href=\"{}\">Load more</a></div>\n",
            escape_html(&batch_link(state)),
            escape_html(&fallback)
        ));
    }
    html
}

fn empty_message() -> String {
    format!("<p class=\"empty\">{EMPTY_MESSAGE}</p>\n")
}

fn tile(
    ctx: &PageContext<'_>,
    state: &GalleryState<'_>,
    index: usize,
    photo: PhotoRef<'_>,
    span: TileSpan,
) -> String {
    let caption = if state.route().selected_year().is_none() {
        format!("<span class=\"caption\">{}</span>", photo.year)
    } else {
        String::new()
    };
    format!(
        "<a class=\"tile{}\" href=\"{}\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\">{caption}</a>\n",
        span.class(),
        escape_html(&page_link(state, Some(index))),
        escape_html(&ctx.resolver.url(photo)),
        escape_html(photo.file_name()),
    )
}

fn lightbox(ctx: &PageContext<'_>, state: &GalleryState<'_>) -> String {
    let (Some(index), Some(photo)) = (state.lightbox_index(), state.current()) else {
        return String::new();
    };

    let close = escape_html(&page_link(state, None));
    let next = escape_html(&page_link(state, state.next_index()));
    let prev = escape_html(&page_link(state, state.previous_index()));
    let name = escape_html(photo.file_name());

    format!(
        "<div id=\"lightbox\" class=\"lightbox\" role=\"dialog\" aria-modal=\"true\" \
data-next=\"{next}\" data-prev=\"{prev}\" data-close=\"{close}\">\n\
<a class=\"lb-close\" href=\"{close}\" aria-label=\"Close\">&times;</a>\n\
<a class=\"lb-nav lb-prev\" href=\"{prev}\" aria-label=\"Previous\">&larr;</a>\n\
<a class=\"lb-nav lb-next\" href=\"{next}\" aria-label=\"Next\">&rarr;</a>\n\
<figure><img src=\"{src}\" alt=\"{name}\">\
<figcaption><span class=\"lb-name\">{year} / {name}</span>\
<span class=\"lb-pos\">{position} of {total}</span></figcaption></figure>\n</div>\n",
        src = escape_html(&ctx.resolver.url(photo)),
        year = photo.year,
        position = index + 1,
        total = state.visible(),
    )
}

/// Escape text for HTML element content and quoted attributes.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
