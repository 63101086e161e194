//! Random highlight sampling for the home view.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::manifest::Manifest;
use crate::photo::PhotoRef;

/// Draw a fresh seed from the process random source.
///
/// Called once per home page load; the seed then pins that page's sample.
#[must_use]
pub fn fresh_seed() -> u64 {
    rand::rng().random()
}

/// Uniformly sample up to `count` photos from every year.
///
/// Shuffles the full photo list in place and keeps the first `count`.
#[must_use]
pub fn sample<'m, R>(manifest: &'m Manifest, count: usize, rng: &mut R) -> Vec<PhotoRef<'m>>
where
    R: Rng + ?Sized,
{
    let mut photos = manifest.recent_first_refs();
    photos.shuffle(rng);
    photos.truncate(count);
    photos
}

/// [`sample`] driven by a seeded generator, so one seed always yields the
/// same highlights for the same manifest.
#[must_use]
pub fn sample_seeded(manifest: &Manifest, count: usize, seed: u64) -> Vec<PhotoRef<'_>> {
    let mut rng = StdRng::seed_from_u64(seed);
    sample(manifest, count, &mut rng)
}
