//! Gallery routes.

use std::fmt;

use crate::manifest::{Manifest, Year};

/// Route parameter selecting the all-years view.
pub const ALL_YEARS_PARAM: &str = "all";

/// The three addressable gallery views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    /// Highlights and per-year counts.
    #[default]
    Home,
    /// Every photo of one year.
    Year(Year),
    /// Every photo, most recent year first, revealed in batches.
    AllYears,
}

impl Route {
    /// Resolve a route parameter against a manifest.
    ///
    /// `None` is home, `"all"` is the all-years view, and a year present in
    /// the manifest selects that year. Anything else falls back to home.
    #[must_use]
    pub fn from_param(param: Option<&str>, manifest: &Manifest) -> Self {
        match param {
            None => Self::Home,
            Some(ALL_YEARS_PARAM) => Self::AllYears,
            Some(param) => param
                .parse::<Year>()
                .ok()
                .filter(|year| manifest.contains_year(*year))
                .map_or(Self::Home, Self::Year),
        }
    }

    /// The year being viewed, if any.
    #[must_use]
    pub fn selected_year(&self) -> Option<Year> {
        match self {
            Self::Year(year) => Some(*year),
            Self::Home | Self::AllYears => None,
        }
    }

    /// The URL path of this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Year(year) => format!("/{year}"),
            Self::AllYears => format!("/{ALL_YEARS_PARAM}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
