//! Cyclic index over an ordered list of image URLs.
//!
//! Used by the post detail view to page through attached images with
//! prev/next wraparound and direct thumbnail selection.

/// Image gallery position state. The index is always valid for the
/// current image list (`0..len`), or 0 when the list is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Carousel {
    images: Vec<String>,
    index: usize,
}

impl Carousel {
    pub fn new(images: Vec<String>) -> Self {
        Self { images, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The currently displayed image URL, if any.
    pub fn current(&self) -> Option<&str> {
        self.images.get(self.index).map(String::as_str)
    }

    /// Advance one image, wrapping from the last back to the first.
    /// No-op for galleries of zero or one image.
    pub fn next(&mut self) {
        if self.images.len() > 1 {
            self.index = (self.index + 1) % self.images.len();
        }
    }

    /// Step back one image, wrapping from the first to the last.
    /// No-op for galleries of zero or one image.
    pub fn prev(&mut self) {
        if self.images.len() > 1 {
            self.index = (self.index + self.images.len() - 1) % self.images.len();
        }
    }

    /// Jump directly to a thumbnail position. Out-of-range indices are
    /// ignored (only valid thumbnails are ever rendered).
    pub fn select(&mut self, index: usize) {
        if index < self.images.len() {
            self.index = index;
        }
    }

    /// The 1-based position counter, e.g. `"2 / 5"`.
    pub fn counter(&self) -> String {
        if self.images.is_empty() {
            "0 / 0".to_string()
        } else {
            format!("{} / {}", self.index + 1, self.images.len())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
