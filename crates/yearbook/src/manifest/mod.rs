//! The photo manifest.
//!
//! A manifest maps each year to the lexicographically sorted list of photo
//! paths found under that year's directory. It is produced once by
//! [`ManifestBuilder`] and treated as read-only input by the gallery.

mod builder;
mod year;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::photo::PhotoRef;

pub use builder::{ManifestBuilder, DEFAULT_EXTENSIONS};
pub use year::Year;

/// Mapping from year to sorted relative photo paths.
///
/// Serializes as a JSON object with four-digit year keys in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    years: BTreeMap<Year, Vec<String>>,
}

/// Totals for a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ManifestSummary {
    /// Number of years with at least one photo.
    pub years: usize,
    /// Number of photos across all years.
    pub photos: usize,
}

impl Manifest {
    /// Create an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the photo list for a year.
    ///
    /// The list is sorted. An empty list removes the year, since empty years
    /// never appear in a manifest.
    pub fn insert(&mut self, year: Year, mut photos: Vec<String>) {
        if photos.is_empty() {
            self.years.remove(&year);
            return;
        }
        photos.sort();
        self.years.insert(year, photos);
    }

    /// Parse and validate a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object of year keys to
    /// string arrays, or if any year breaks the manifest invariants.
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load a manifest file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid manifest.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = Self::from_json(&text)?;
        let summary = manifest.summary();
        debug!(
            "Loaded manifest from {} ({} years, {} photos)",
            path.display(),
            summary.years,
            summary.photos
        );
        Ok(manifest)
    }

    /// Serialize as pretty-printed JSON (two-space indentation).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the manifest to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created or the file cannot be
    /// written.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let json = self.to_json_pretty()?;
        std::fs::write(path, json).map_err(|source| Error::ManifestWrite {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Manifest written to {}", path.display());
        Ok(())
    }

    /// Check the manifest invariants.
    ///
    /// Every year must be non-empty and sorted with no duplicates, and every
    /// path must be a relative, forward-slash path without empty, `.` or `..`
    /// segments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ManifestInvalid`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        for (year, photos) in &self.years {
            if photos.is_empty() {
                return Err(Error::manifest_invalid(format!("year {year} has no photos")));
            }
            if let Some(pair) = photos.windows(2).find(|pair| pair[0] >= pair[1]) {
                return Err(Error::manifest_invalid(format!(
                    "year {year} is not strictly sorted at '{}'",
                    pair[1]
                )));
            }
            if let Some(bad) = photos.iter().find(|path| !is_safe_relative_path(path)) {
                return Err(Error::manifest_invalid(format!(
                    "year {year} has an invalid path '{bad}'"
                )));
            }
        }
        Ok(())
    }

    /// Years present in the manifest, ascending.
    pub fn years(&self) -> impl DoubleEndedIterator<Item = Year> + ExactSizeIterator + '_ {
        self.years.keys().copied()
    }

    /// Whether `year` has any photos.
    #[must_use]
    pub fn contains_year(&self, year: Year) -> bool {
        self.years.contains_key(&year)
    }

    /// The sorted photo paths for `year`; empty if the year is absent.
    #[must_use]
    pub fn photos(&self, year: Year) -> &[String] {
        self.years.get(&year).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of photos for `year`.
    #[must_use]
    pub fn count(&self, year: Year) -> usize {
        self.photos(year).len()
    }

    /// Whether the manifest lists `path` under `year`.
    #[must_use]
    pub fn contains(&self, year: Year, path: &str) -> bool {
        self.photos(year)
            .binary_search_by(|probe| probe.as_str().cmp(path))
            .is_ok()
    }

    /// Total photos across all years.
    #[must_use]
    pub fn total_photos(&self) -> usize {
        self.years.values().map(Vec::len).sum()
    }

    /// Number of years with photos.
    #[must_use]
    pub fn year_count(&self) -> usize {
        self.years.len()
    }

    /// Whether the manifest has no photos at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Year and photo totals.
    #[must_use]
    pub fn summary(&self) -> ManifestSummary {
        ManifestSummary {
            years: self.year_count(),
            photos: self.total_photos(),
        }
    }

    /// Photo references for a single year, in manifest order.
    #[must_use]
    pub fn year_refs(&self, year: Year) -> Vec<PhotoRef<'_>> {
        self.photos(year)
            .iter()
            .map(|path| PhotoRef::new(year, path))
            .collect()
    }

    /// Photo references for every year, most recent year first.
    ///
    /// Within a year the manifest order (filename ascending) is kept; only the
    /// year order is reversed.
    #[must_use]
    pub fn recent_first_refs(&self) -> Vec<PhotoRef<'_>> {
        self.years
            .iter()
            .rev()
            .flat_map(|(year, photos)| photos.iter().map(|path| PhotoRef::new(*year, path)))
            .collect()
    }

    /// `(year, count)` rows, most recent year first.
    #[must_use]
    pub fn year_counts_descending(&self) -> Vec<(Year, usize)> {
        self.years
            .iter()
            .rev()
            .map(|(year, photos)| (*year, photos.len()))
            .collect()
    }
}

fn is_safe_relative_path(path: &str) -> bool {
    !path.is_empty()
        && !path.contains('\\')
        && path
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year(s: &str) -> Year {
        s.parse().unwrap()
    }

    fn sample() -> Manifest {
        Manifest::from_json(r#"{"2001": ["a.jpg","b.jpg"], "2002": ["c.jpg"]}"#).unwrap()
    }

    #[test]
    fn test_from_json() {
        let manifest = sample();
        assert_eq!(manifest.year_count(), 2);
        assert_eq!(manifest.total_photos(), 3);
        assert_eq!(manifest.photos(year("2001")), ["a.jpg", "b.jpg"]);
        assert!(manifest.photos(year("1999")).is_empty());
    }

    #[test]
    fn test_year_refs_in_manifest_order() {
        let manifest = sample();
        let refs = manifest.year_refs(year("2001"));
        let paths: Vec<&str> = refs.iter().map(|r| r.path).collect();
        assert_eq!(paths, ["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_recent_first_keeps_file_order_within_year() {
        let manifest = sample();
        let refs = manifest.recent_first_refs();
        let keys: Vec<String> = refs.iter().map(|r| format!("{}/{}", r.year, r.path)).collect();
        assert_eq!(keys, ["2002/c.jpg", "2001/a.jpg", "2001/b.jpg"]);
    }

    #[test]
    fn test_year_counts_descending() {
        let manifest = sample();
        assert_eq!(
            manifest.year_counts_descending(),
            vec![(year("2002"), 1), (year("2001"), 2)]
        );
    }

    #[test]
    fn test_contains() {
        let manifest = sample();
        assert!(manifest.contains(year("2001"), "b.jpg"));
        assert!(!manifest.contains(year("2001"), "c.jpg"));
        assert!(!manifest.contains(year("2003"), "c.jpg"));
    }

    #[test]
    fn test_insert_sorts_and_drops_empty() {
        let mut manifest = Manifest::new();
        manifest.insert(year("2005"), vec!["z.png".into(), "a/b.jpg".into()]);
        manifest.insert(year("2006"), vec![]);
        assert_eq!(manifest.photos(year("2005")), ["a/b.jpg", "z.png"]);
        assert!(!manifest.contains_year(year("2006")));

        manifest.insert(year("2005"), vec![]);
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_json_keys_ascending_and_pretty() {
        let mut manifest = Manifest::new();
        manifest.insert(year("2010"), vec!["x.jpg".into()]);
        manifest.insert(year("1999"), vec!["y.jpg".into()]);
        let json = manifest.to_json_pretty().unwrap();
        assert_eq!(
            json,
            "{\n  \"1999\": [\n    \"y.jpg\"\n  ],\n  \"2010\": [\n    \"x.jpg\"\n  ]\n}"
        );
    }

    #[test]
    fn test_validate_rejects_unsorted() {
        let err = Manifest::from_json(r#"{"2001": ["b.jpg","a.jpg"]}"#).unwrap_err();
        assert!(err.to_string().contains("not strictly sorted"));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        assert!(Manifest::from_json(r#"{"2001": ["a.jpg","a.jpg"]}"#).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_year() {
        let err = Manifest::from_json(r#"{"2001": []}"#).unwrap_err();
        assert!(err.to_string().contains("no photos"));
    }

    #[test]
    fn test_validate_rejects_escaping_paths() {
        for bad in [
            r#"{"2001": ["../secret.jpg"]}"#,
            r#"{"2001": ["/etc/x.jpg"]}"#,
            r#"{"2001": ["a//b.jpg"]}"#,
            r#"{"2001": ["a\\b.jpg"]}"#,
        ] {
            assert!(Manifest::from_json(bad).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn test_from_json_rejects_bad_year_key() {
        let err = Manifest::from_json(r#"{"19x9": ["a.jpg"]}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_write_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data/nested/photo-manifest.json");

        let manifest = sample();
        manifest.write_to(&path).unwrap();
        assert!(path.exists());

        let loaded = Manifest::load(&path).unwrap();
        assert_eq!(loaded, manifest);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Manifest::load(dir.path().join("missing.json")).unwrap_err();
        assert!(err.is_manifest_missing());
    }

    #[test]
    fn test_summary() {
        let summary = sample().summary();
        assert_eq!(summary, ManifestSummary { years: 2, photos: 3 });
    }
}
