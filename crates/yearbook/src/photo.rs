//! Photo references and image URL resolution.

use std::fmt;
use std::path::{Component, Path};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::manifest::Year;

/// Characters escaped in a path segment: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, the same set `encodeURIComponent` leaves
/// alone.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Production URL prefix for photo files.
pub const PHOTOS_PREFIX: &str = "/photos";

/// Development URL prefix for direct file-system serving.
pub const DEV_FS_PREFIX: &str = "/@fs";

/// A photo identified by its year and manifest path.
///
/// Borrowed from a [`Manifest`](crate::Manifest); never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhotoRef<'m> {
    /// The year directory the photo lives under.
    pub year: Year,
    /// Forward-slash path relative to the year directory.
    pub path: &'m str,
}

impl<'m> PhotoRef<'m> {
    /// Create a reference.
    #[must_use]
    pub fn new(year: Year, path: &'m str) -> Self {
        Self { year, path }
    }

    /// The last path segment.
    #[must_use]
    pub fn file_name(&self) -> &'m str {
        self.path.rsplit('/').next().unwrap_or(self.path)
    }
}

impl fmt::Display for PhotoRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.year, self.path)
    }
}

/// Which URL scheme image links use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlMode {
    /// `/photos/<year>/<path>`.
    #[default]
    Production,
    /// `/@fs/<absolute photo root>/<year>/<path>`.
    Development,
}

impl fmt::Display for UrlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Development => write!(f, "development"),
        }
    }
}

/// Builds image URLs for photo references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlResolver {
    mode: UrlMode,
    /// Already-encoded prefix; year and path are appended to it.
    base: String,
    /// Decoded root path below [`DEV_FS_PREFIX`], without slashes at either end.
    fs_root: Option<String>,
}

impl UrlResolver {
    /// Resolver for the production static-asset layout.
    #[must_use]
    pub fn production() -> Self {
        Self {
            mode: UrlMode::Production,
            base: PHOTOS_PREFIX.to_string(),
            fs_root: None,
        }
    }

    /// Resolver serving straight from `root` on the file system.
    ///
    /// `root` should be absolute; relative roots are used as given.
    #[must_use]
    pub fn development(root: &Path) -> Self {
        let segments: Vec<String> = root
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        let encoded = segments
            .iter()
            .map(|segment| encode_segment(segment))
            .collect::<Vec<_>>()
            .join("/");

        Self {
            mode: UrlMode::Development,
            base: format!("{DEV_FS_PREFIX}/{encoded}"),
            fs_root: Some(segments.join("/")),
        }
    }

    /// Resolver for `mode`, using `root` in development mode.
    #[must_use]
    pub fn for_mode(mode: UrlMode, root: &Path) -> Self {
        match mode {
            UrlMode::Production => Self::production(),
            UrlMode::Development => Self::development(root),
        }
    }

    /// The URL scheme in use.
    #[must_use]
    pub fn mode(&self) -> UrlMode {
        self.mode
    }

    /// The decoded file-system root a development URL starts with.
    #[must_use]
    pub fn fs_root(&self) -> Option<&str> {
        self.fs_root.as_deref()
    }

    /// URL of a photo, with each path segment percent-encoded.
    #[must_use]
    pub fn photo_url(&self, year: Year, path: &str) -> String {
        format!("{}/{year}/{}", self.base, encode_path(path))
    }

    /// URL of a photo reference.
    #[must_use]
    pub fn url(&self, photo: PhotoRef<'_>) -> String {
        self.photo_url(photo.year, photo.path)
    }
}

/// Percent-encode one path segment.
#[must_use]
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Percent-encode each `/`-separated segment of `path`, keeping the slashes.
#[must_use]
pub fn encode_path(path: &str) -> String {
    path.split('/').map(encode_segment).collect::<Vec<_>>().join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year(s: &str) -> Year {
        s.parse().unwrap()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(PhotoRef::new(year("2001"), "a/b/c.jpg").file_name(), "c.jpg");
        assert_eq!(PhotoRef::new(year("2001"), "c.jpg").file_name(), "c.jpg");
    }

    #[test]
    fn test_display() {
        assert_eq!(PhotoRef::new(year("2002"), "x/y.png").to_string(), "2002/x/y.png");
    }

    #[test]
    fn test_encode_segment_matches_uri_component() {
        assert_eq!(encode_segment("Party Night #2.jpg"), "Party%20Night%20%232.jpg");
        assert_eq!(encode_segment("it's-(fine)_~!*.png"), "it's-(fine)_~!*.png");
        assert_eq!(encode_segment("a&b=c?.gif"), "a%26b%3Dc%3F.gif");
        assert_eq!(encode_segment("café.jpg"), "caf%C3%A9.jpg");
    }

    #[test]
    fn test_encode_path_keeps_separators() {
        assert_eq!(encode_path("sub dir/my photo.jpg"), "sub%20dir/my%20photo.jpg");
    }

    #[test]
    fn test_production_url() {
        let resolver = UrlResolver::production();
        assert_eq!(
            resolver.photo_url(year("2003"), "Oscar Night/IMG 1.jpg"),
            "/photos/2003/Oscar%20Night/IMG%201.jpg"
        );
        assert_eq!(resolver.mode(), UrlMode::Production);
        assert!(resolver.fs_root().is_none());
    }

    #[test]
    fn test_development_url() {
        let resolver = UrlResolver::development(Path::new("/srv/My Photos"));
        assert_eq!(
            resolver.url(PhotoRef::new(year("2004"), "a b.png")),
            "/@fs/srv/My%20Photos/2004/a%20b.png"
        );
        assert_eq!(resolver.fs_root(), Some("srv/My Photos"));
    }

    #[test]
    fn test_for_mode() {
        let root = Path::new("/photos/root");
        assert_eq!(
            UrlResolver::for_mode(UrlMode::Production, root),
            UrlResolver::production()
        );
        assert_eq!(
            UrlResolver::for_mode(UrlMode::Development, root).mode(),
            UrlMode::Development
        );
    }

    #[test]
    fn test_url_mode_serde() {
        assert_eq!(serde_json::to_string(&UrlMode::Development).unwrap(), "\"development\"");
        let mode: UrlMode = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(mode, UrlMode::Production);
    }
}
