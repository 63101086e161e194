//! Gallery view state.
//!
//! [`GalleryState`] holds everything one page view needs: the active
//! [`Route`], the photos that route shows, the batch cursor of the all-years
//! view, and the lightbox position. All transitions are synchronous; the
//! caller feeds in route changes, sentinel visibility and key presses.

pub mod highlights;
mod lightbox;
mod pagination;
mod route;

use std::ops::Range;

use tracing::trace;

use crate::config::GalleryConfig;
use crate::manifest::{Manifest, Year};
use crate::photo::PhotoRef;

pub use lightbox::{Lightbox, LightboxKey};
pub use pagination::BatchCursor;
pub use route::{Route, ALL_YEARS_PARAM};

/// Sizes that shape the views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GallerySettings {
    /// Photos sampled for the home view.
    pub highlight_count: usize,
    /// Photos revealed per batch in the all-years view.
    pub batch_size: usize,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            highlight_count: 12,
            batch_size: 40,
        }
    }
}

impl From<&GalleryConfig> for GallerySettings {
    fn from(config: &GalleryConfig) -> Self {
        Self {
            highlight_count: config.highlight_count,
            batch_size: config.batch_size,
        }
    }
}

/// The state of one gallery page view.
#[derive(Debug, Clone)]
pub struct GalleryState<'m> {
    manifest: &'m Manifest,
    settings: GallerySettings,
    seed: u64,
    route: Route,
    photos: Vec<PhotoRef<'m>>,
    cursor: Option<BatchCursor>,
    lightbox: Lightbox,
}

impl<'m> GalleryState<'m> {
    /// Build the view for `route`.
    ///
    /// `seed` pins the home highlight sample; other routes ignore it.
    #[must_use]
    pub fn new(manifest: &'m Manifest, settings: GallerySettings, route: Route, seed: u64) -> Self {
        let mut state = Self {
            manifest,
            settings,
            seed,
            route,
            photos: Vec::new(),
            cursor: None,
            lightbox: Lightbox::default(),
        };
        state.load_route();
        state
    }

    /// Switch to another route.
    ///
    /// A different route rebuilds the photo list, resets the batch cursor and
    /// closes the lightbox. Navigating to the current route changes nothing.
    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        self.route = route;
        self.load_route();
    }

    fn load_route(&mut self) {
        self.photos = match self.route {
            Route::Home => {
                highlights::sample_seeded(self.manifest, self.settings.highlight_count, self.seed)
            }
            Route::Year(year) => self.manifest.year_refs(year),
            Route::AllYears => self.manifest.recent_first_refs(),
        };
        self.cursor = match self.route {
            Route::AllYears => Some(BatchCursor::new(self.photos.len(), self.settings.batch_size)),
            Route::Home | Route::Year(_) => None,
        };
        self.lightbox.close();
        trace!("Route {} loaded with {} photos", self.route, self.photos.len());
    }

    /// The active route.
    #[must_use]
    pub fn route(&self) -> Route {
        self.route
    }

    /// The manifest this view reads from.
    #[must_use]
    pub fn manifest(&self) -> &'m Manifest {
        self.manifest
    }

    /// The highlight seed of this page view.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The view settings.
    #[must_use]
    pub fn settings(&self) -> GallerySettings {
        self.settings
    }

    /// Every photo the route covers, including ones not yet revealed.
    #[must_use]
    pub fn photos(&self) -> &[PhotoRef<'m>] {
        &self.photos
    }

    /// The photos currently on screen.
    #[must_use]
    pub fn displayed(&self) -> &[PhotoRef<'m>] {
        &self.photos[..self.visible()]
    }

    /// Number of photos currently on screen.
    #[must_use]
    pub fn visible(&self) -> usize {
        self.cursor
            .map_or(self.photos.len(), |cursor| cursor.visible())
    }

    /// Whether a sentinel should be shown below the grid.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.cursor.is_some_and(|cursor| cursor.has_more())
    }

    /// The sentinel scrolled into view: reveal one more batch.
    ///
    /// Returns the range of [`displayed`](Self::displayed) that became
    /// visible; empty when nothing is left or the route is not paginated.
    pub fn on_sentinel_visible(&mut self) -> Range<usize> {
        match self.cursor.as_mut() {
            Some(cursor) => {
                let range = cursor.advance();
                trace!("Sentinel revealed {range:?} of {}", cursor.total());
                range
            }
            None => self.photos.len()..self.photos.len(),
        }
    }

    /// Restore a previous scroll depth: reveal batches until at least `shown`
    /// photos are visible.
    pub fn reveal(&mut self, shown: usize) {
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.reveal(shown);
        }
    }

    /// Open the lightbox on a displayed photo. Returns `false` if `index` is
    /// not displayed.
    pub fn open_lightbox(&mut self, index: usize) -> bool {
        let len = self.visible();
        self.lightbox.open(index, len)
    }

    /// Close the lightbox.
    pub fn close_lightbox(&mut self) {
        self.lightbox.close();
    }

    /// Lightbox to the next displayed photo, wrapping.
    pub fn next(&mut self) {
        let len = self.visible();
        self.lightbox.next(len);
    }

    /// Lightbox to the previous displayed photo, wrapping.
    pub fn previous(&mut self) {
        let len = self.visible();
        self.lightbox.previous(len);
    }

    /// Apply a lightbox key press.
    pub fn handle_key(&mut self, key: LightboxKey) {
        let len = self.visible();
        self.lightbox.handle_key(key, len);
    }

    /// The open lightbox index.
    #[must_use]
    pub fn lightbox_index(&self) -> Option<usize> {
        self.lightbox.index()
    }

    /// Where [`next`](Self::next) would land.
    #[must_use]
    pub fn next_index(&self) -> Option<usize> {
        self.lightbox.peek_next(self.visible())
    }

    /// Where [`previous`](Self::previous) would land.
    #[must_use]
    pub fn previous_index(&self) -> Option<usize> {
        self.lightbox.peek_previous(self.visible())
    }

    /// The photo shown in the lightbox.
    #[must_use]
    pub fn current(&self) -> Option<PhotoRef<'m>> {
        self.lightbox
            .index()
            .and_then(|index| self.displayed().get(index).copied())
    }

    /// `(year, count)` rows for the home view, most recent year first.
    #[must_use]
    pub fn year_rows(&self) -> Vec<(Year, usize)> {
        self.manifest.year_counts_descending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn year(s: &str) -> Year {
        s.parse().unwrap()
    }

    fn small() -> Manifest {
        Manifest::from_json(r#"{"2001": ["a.jpg","b.jpg"], "2002": ["c.jpg"]}"#).unwrap()
    }

    fn large() -> Manifest {
        let mut manifest = Manifest::new();
        for (year, count) in [("1999", 30), ("2005", 45), ("2010", 25)] {
            let photos = (0..count).map(|i| format!("p{i:03}.jpg")).collect();
            manifest.insert(year.parse().unwrap(), photos);
        }
        manifest
    }

    fn keys(photos: &[PhotoRef<'_>]) -> Vec<String> {
        photos.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_year_route_lists_year_in_order() {
        let manifest = small();
        let route = Route::from_param(Some("2001"), &manifest);
        let state = GalleryState::new(&manifest, GallerySettings::default(), route, 0);
        assert_eq!(keys(state.displayed()), ["2001/a.jpg", "2001/b.jpg"]);
        assert!(!state.has_more());
    }

    #[test]
    fn test_all_route_is_recent_year_first() {
        let manifest = small();
        let route = Route::from_param(Some("all"), &manifest);
        let state = GalleryState::new(&manifest, GallerySettings::default(), route, 0);
        assert_eq!(keys(state.displayed()), ["2002/c.jpg", "2001/a.jpg", "2001/b.jpg"]);
    }

    #[test]
    fn test_bogus_route_matches_home() {
        let manifest = small();
        let settings = GallerySettings::default();
        let bogus = GalleryState::new(
            &manifest,
            settings,
            Route::from_param(Some("bogus-year"), &manifest),
            5,
        );
        let home = GalleryState::new(&manifest, settings, Route::from_param(None, &manifest), 5);
        assert_eq!(bogus.route(), Route::Home);
        assert_eq!(bogus.displayed(), home.displayed());
    }

    #[test]
    fn test_home_shows_highlights_and_year_rows() {
        let manifest = large();
        let state = GalleryState::new(&manifest, GallerySettings::default(), Route::Home, 3);
        assert_eq!(state.displayed().len(), 12);
        assert!(!state.has_more());
        assert_eq!(
            state.year_rows(),
            vec![(year("2010"), 25), (year("2005"), 45), (year("1999"), 30)]
        );
    }

    #[test]
    fn test_scrolling_reveals_every_photo_once() {
        let manifest = large();
        let mut state = GalleryState::new(&manifest, GallerySettings::default(), Route::AllYears, 0);
        assert_eq!(state.displayed().len(), 40);

        let mut sentinel_hits = 0;
        while state.has_more() {
            let range = state.on_sentinel_visible();
            assert!(!range.is_empty());
            sentinel_hits += 1;
        }
        assert_eq!(sentinel_hits, 2);

        let shown = keys(state.displayed());
        assert_eq!(shown.len(), manifest.total_photos());
        let unique: HashSet<&String> = shown.iter().collect();
        assert_eq!(unique.len(), shown.len());

        // 2010 first, then 2005, then 1999; file order within each year
        assert_eq!(shown[0], "2010/p000.jpg");
        assert_eq!(shown[24], "2010/p024.jpg");
        assert_eq!(shown[25], "2005/p000.jpg");
        assert_eq!(shown[70], "1999/p000.jpg");
        assert_eq!(shown[99], "1999/p029.jpg");
    }

    #[test]
    fn test_sentinel_on_unpaginated_route_is_noop() {
        let manifest = small();
        let mut state =
            GalleryState::new(&manifest, GallerySettings::default(), Route::Year(year("2001")), 0);
        assert!(state.on_sentinel_visible().is_empty());
        assert_eq!(state.displayed().len(), 2);
    }

    #[test]
    fn test_lightbox_wraps_over_displayed() {
        let manifest = small();
        let mut state = GalleryState::new(&manifest, GallerySettings::default(), Route::AllYears, 0);
        assert!(state.open_lightbox(2));
        state.next();
        assert_eq!(state.lightbox_index(), Some(0));
        state.previous();
        assert_eq!(state.lightbox_index(), Some(2));
        assert_eq!(state.current().unwrap().to_string(), "2001/b.jpg");
    }

    #[test]
    fn test_lightbox_limited_to_revealed_photos() {
        let manifest = large();
        let mut state = GalleryState::new(&manifest, GallerySettings::default(), Route::AllYears, 0);
        assert!(!state.open_lightbox(50));
        assert!(state.open_lightbox(39));
        state.next();
        assert_eq!(state.lightbox_index(), Some(0));

        state.on_sentinel_visible();
        state.open_lightbox(39);
        state.next();
        assert_eq!(state.lightbox_index(), Some(40));
    }

    #[test]
    fn test_navigate_resets_lightbox_and_cursor() {
        let manifest = large();
        let mut state = GalleryState::new(&manifest, GallerySettings::default(), Route::AllYears, 0);
        state.on_sentinel_visible();
        state.open_lightbox(60);
        assert_eq!(state.visible(), 80);

        state.navigate(Route::Year(year("2005")));
        assert_eq!(state.lightbox_index(), None);
        assert_eq!(state.displayed().len(), 45);

        state.navigate(Route::AllYears);
        assert_eq!(state.visible(), 40);
    }

    #[test]
    fn test_navigate_to_same_route_keeps_state() {
        let manifest = small();
        let mut state =
            GalleryState::new(&manifest, GallerySettings::default(), Route::Year(year("2001")), 0);
        state.open_lightbox(1);
        state.navigate(Route::Year(year("2001")));
        assert_eq!(state.lightbox_index(), Some(1));
    }

    #[test]
    fn test_keys_drive_lightbox() {
        let manifest = small();
        let mut state =
            GalleryState::new(&manifest, GallerySettings::default(), Route::Year(year("2001")), 0);
        state.open_lightbox(0);
        state.handle_key(LightboxKey::ArrowLeft);
        assert_eq!(state.lightbox_index(), Some(1));
        assert_eq!(state.next_index(), Some(0));
        assert_eq!(state.previous_index(), Some(0));
        state.handle_key(LightboxKey::Escape);
        assert!(state.current().is_none());
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = Manifest::new();
        let mut state = GalleryState::new(&manifest, GallerySettings::default(), Route::AllYears, 0);
        assert!(state.displayed().is_empty());
        assert!(!state.has_more());
        assert!(!state.open_lightbox(0));
    }

    #[test]
    fn test_reveal_restores_depth() {
        let manifest = large();
        let mut state = GalleryState::new(&manifest, GallerySettings::default(), Route::AllYears, 0);
        state.reveal(41);
        assert_eq!(state.visible(), 80);
    }

    #[test]
    fn test_settings_from_config() {
        let config = GalleryConfig {
            title: "t".to_string(),
            highlight_count: 3,
            batch_size: 7,
        };
        let settings = GallerySettings::from(&config);
        assert_eq!(settings.highlight_count, 3);
        assert_eq!(settings.batch_size, 7);
    }
}
