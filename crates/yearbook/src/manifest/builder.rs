//! Manifest generation from a year-organized photo tree.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use super::{Manifest, Year};

/// Extensions collected when none are configured.
pub const DEFAULT_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Scans `<root>/<year>/**` for supported image files.
///
/// Hidden entries (names starting with `.`) are skipped, including the
/// contents of hidden directories. Symbolic links are neither followed nor
/// collected.
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    root: PathBuf,
    years: Vec<Year>,
    extensions: BTreeSet<String>,
}

impl ManifestBuilder {
    /// Create a builder over `root` for the given years, with the default
    /// extension allow-list.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, years: impl IntoIterator<Item = Year>) -> Self {
        Self {
            root: root.into(),
            years: years.into_iter().collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| (*ext).to_string()).collect(),
        }
    }

    /// Replace the extension allow-list.
    ///
    /// Matching is case-insensitive; a leading `.` is ignored.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    /// Scan every configured year and assemble the manifest.
    ///
    /// Years whose directory is missing, unreadable, or holds no supported
    /// images are left out.
    #[must_use]
    pub fn build(&self) -> Manifest {
        let mut manifest = Manifest::new();

        for &year in &self.years {
            let photos = self.collect_year(year);
            if photos.is_empty() {
                continue;
            }
            debug!("Year {year}: {} photos", photos.len());
            manifest.insert(year, photos);
        }

        let summary = manifest.summary();
        info!(
            "Scanned {}: {} years, {} photos",
            self.root.display(),
            summary.years,
            summary.photos
        );
        manifest
    }

    /// Collect the sorted relative paths of supported images under one year.
    #[must_use]
    pub fn collect_year(&self, year: Year) -> Vec<String> {
        let year_dir = self.root.join(year.to_string());
        if !year_dir.is_dir() {
            debug!("Skipping {}: not a directory", year_dir.display());
            return Vec::new();
        }

        let mut photos = Vec::new();
        let walker = WalkDir::new(&year_dir)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !is_hidden(entry));

        for entry in walker {
            // Any read failure drops the whole year rather than writing a partial list.
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Cannot read {}: {err}; treating year {year} as empty", year_dir.display());
                    return Vec::new();
                }
            };

            if !entry.file_type().is_file() || !self.is_supported(entry.path()) {
                continue;
            }

            match relative_path(&year_dir, entry.path()) {
                Some(rel) => photos.push(rel),
                None => warn!("Skipping non UTF-8 path {}", entry.path().display()),
            }
        }

        photos.sort();
        photos
    }

    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.extensions.contains(&ext.to_ascii_lowercase()))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// `path` relative to `base`, joined with `/`.
fn relative_path(base: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    let segments = rel
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn year(s: &str) -> Year {
        s.parse().unwrap()
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"img").unwrap();
    }

    fn years(first: &str, last: &str) -> Vec<Year> {
        Year::range_inclusive(year(first), year(last))
    }

    #[test]
    fn test_collects_sorted_nested_paths() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "2001/party/b.jpg");
        touch(dir.path(), "2001/a.JPG");
        touch(dir.path(), "2001/c.png");
        touch(dir.path(), "2001/Z.gif");

        let builder = ManifestBuilder::new(dir.path(), years("2001", "2001"));
        assert_eq!(
            builder.collect_year(year("2001")),
            ["Z.gif", "a.JPG", "c.png", "party/b.jpg"]
        );
    }

    #[test]
    fn test_skips_hidden_and_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "2002/keep.jpeg");
        touch(dir.path(), "2002/.hidden.jpg");
        touch(dir.path(), "2002/.thumbs/inner.jpg");
        touch(dir.path(), "2002/notes.txt");
        touch(dir.path(), "2002/movie.mov");
        touch(dir.path(), "2002/noext");

        let builder = ManifestBuilder::new(dir.path(), years("2002", "2002"));
        assert_eq!(builder.collect_year(year("2002")), ["keep.jpeg"]);
    }

    #[test]
    fn test_build_omits_missing_and_empty_years() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "1999/one.jpg");
        touch(dir.path(), "2000/readme.txt");
        fs::create_dir_all(dir.path().join("2001")).unwrap();
        touch(dir.path(), "2003/two.gif");
        touch(dir.path(), "2020/out-of-range.jpg");

        let manifest = ManifestBuilder::new(dir.path(), years("1999", "2014")).build();
        let present: Vec<String> = manifest.years().map(|y| y.to_string()).collect();
        assert_eq!(present, ["1999", "2003"]);
        assert_eq!(manifest.total_photos(), 2);
    }

    #[test]
    fn test_year_path_that_is_a_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("2004"), b"not a dir").unwrap();

        let builder = ManifestBuilder::new(dir.path(), years("2004", "2004"));
        assert!(builder.collect_year(year("2004")).is_empty());
    }

    #[test]
    fn test_missing_root_yields_empty_manifest() {
        let builder = ManifestBuilder::new("/nonexistent/photo/root", years("1999", "2014"));
        assert!(builder.build().is_empty());
    }

    #[test]
    fn test_custom_extensions() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "2005/a.jpg");
        touch(dir.path(), "2005/b.webp");

        let builder =
            ManifestBuilder::new(dir.path(), years("2005", "2005")).with_extensions([".WEBP"]);
        assert_eq!(builder.collect_year(year("2005")), ["b.webp"]);
    }

    #[test]
    fn test_built_manifest_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "2006/with space.jpg");
        touch(dir.path(), "2006/sub dir/x.png");

        let manifest = ManifestBuilder::new(dir.path(), years("2006", "2006")).build();
        assert!(manifest.validate().is_ok());
        assert!(manifest.contains(year("2006"), "sub dir/x.png"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_not_collected() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "target/real.jpg");
        fs::create_dir_all(dir.path().join("2007")).unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("target/real.jpg"),
            dir.path().join("2007/link.jpg"),
        )
        .unwrap();
        std::os::unix::fs::symlink(dir.path().join("target"), dir.path().join("2007/linkdir"))
            .unwrap();

        let builder = ManifestBuilder::new(dir.path(), years("2007", "2007"));
        assert!(builder.collect_year(year("2007")).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_empties_year() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "2008/a.jpg");
        touch(dir.path(), "2008/sub/b.jpg");
        touch(dir.path(), "2009/c.jpg");
        let sub = dir.path().join("2008/sub");
        fs::set_permissions(&sub, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores directory permissions, so there is nothing to observe.
        if fs::read_dir(&sub).is_ok() {
            fs::set_permissions(&sub, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let builder = ManifestBuilder::new(dir.path(), years("2008", "2009"));
        let photos = builder.collect_year(year("2008"));
        let manifest = builder.build();
        fs::set_permissions(&sub, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(photos.is_empty());
        assert!(!manifest.contains_year(year("2008")));
        assert_eq!(manifest.photos(year("2009")), ["c.jpg"]);
    }
}
