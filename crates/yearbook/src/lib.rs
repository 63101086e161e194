//! `yearbook` - a year-organized photo gallery.
//!
//! The library has two halves. The manifest builder walks a directory of
//! year folders and records every image it finds; the gallery turns that
//! manifest into home, per-year and all-years views served over HTTP.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod gallery;
pub mod logging;
pub mod manifest;
pub mod photo;
pub mod render;
pub mod server;

pub use config::Config;
pub use error::{Error, Result};
pub use gallery::{GallerySettings, GalleryState, Route};
pub use logging::init_logging;
pub use manifest::{Manifest, ManifestBuilder, Year};
pub use photo::{PhotoRef, UrlResolver};
