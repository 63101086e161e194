//! Lightbox position and keyboard navigation.

/// Keys the lightbox reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    /// Show the next photo.
    ArrowRight,
    /// Show the previous photo.
    ArrowLeft,
    /// Close the lightbox.
    Escape,
}

impl LightboxKey {
    /// Map a DOM `KeyboardEvent.key` name; other keys are ignored.
    #[must_use]
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowRight" => Some(Self::ArrowRight),
            "ArrowLeft" => Some(Self::ArrowLeft),
            "Escape" => Some(Self::Escape),
            _ => None,
        }
    }
}

/// Index of the open photo within the displayed list, if any.
///
/// The lightbox does not own the list; callers pass its current length so
/// navigation wraps over whatever is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lightbox {
    index: Option<usize>,
}

impl Lightbox {
    /// The open index.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Whether a photo is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.index.is_some()
    }

    /// Open at `index`. Out-of-range indices leave the lightbox unchanged.
    pub fn open(&mut self, index: usize, len: usize) -> bool {
        if index >= len {
            return false;
        }
        self.index = Some(index);
        true
    }

    /// Close the lightbox.
    pub fn close(&mut self) {
        self.index = None;
    }

    /// The index `next` would move to.
    #[must_use]
    pub fn peek_next(&self, len: usize) -> Option<usize> {
        match self.index {
            Some(index) if len > 0 => Some((index + 1) % len),
            _ => None,
        }
    }

    /// The index `previous` would move to.
    #[must_use]
    pub fn peek_previous(&self, len: usize) -> Option<usize> {
        match self.index {
            Some(index) if len > 0 => Some((index % len + len - 1) % len),
            _ => None,
        }
    }

    /// Move forward, wrapping from the last photo to the first.
    pub fn next(&mut self, len: usize) {
        if let Some(index) = self.peek_next(len) {
            self.index = Some(index);
        }
    }

    /// Move backward, wrapping from the first photo to the last.
    pub fn previous(&mut self, len: usize) {
        if let Some(index) = self.peek_previous(len) {
            self.index = Some(index);
        }
    }

    /// Apply a key press.
    pub fn handle_key(&mut self, key: LightboxKey, len: usize) {
        if !self.is_open() {
            return;
        }
        match key {
            LightboxKey::ArrowRight => self.next(len),
            LightboxKey::ArrowLeft => self.previous(len),
            LightboxKey::Escape => self.close(),
        }
    }
}
