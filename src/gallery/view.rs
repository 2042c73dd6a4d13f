use crate::error::FetchError;
use crate::storage::ImageDescriptor;

use super::GalleryClient;

/// Number of images shown per page.
pub const ITEMS_PER_PAGE: usize = 6;

// =============================================================================
// View State
// =============================================================================

/// The single visible state of the gallery at any point in time.
///
/// The view is never in more than one of these: while loading nothing else
/// renders, an error suppresses the grid, and an empty successful listing
/// is distinct from an error.
#[derive(Debug, PartialEq)]
pub enum ViewState<'a> {
    /// Initial fetch in flight
    Loading,

    /// The fetch failed; message for the user
    Error(&'a str),

    /// Fetch succeeded but the listing is empty
    Empty,

    /// Current page of the grid
    Grid {
        /// Zero-based page index
        page: usize,
        /// Total page count (always >= 1)
        total_pages: usize,
        /// Exactly the current page's slice, in listing order
        images: &'a [ImageDescriptor],
    },
}

/// How one grid item renders.
///
/// A missing URL degrades that item to a placeholder; it is not an error.
#[derive(Debug, PartialEq)]
pub enum ItemDisplay<'a> {
    /// Render the image from its presigned URL
    Image(&'a str),

    /// "No URL for image" placeholder
    NoUrl,
}

impl ItemDisplay<'_> {
    /// Display for one descriptor.
    pub fn for_image(image: &ImageDescriptor) -> ItemDisplay<'_> {
        match image.url.as_deref() {
            Some(url) => ItemDisplay::Image(url),
            None => ItemDisplay::NoUrl,
        }
    }
}

// =============================================================================
// Gallery View
// =============================================================================

/// Pagination state machine for the gallery.
///
/// A new view starts in the loading state; drive it with [`load`] (or
/// [`finish_load`] directly when the fetch runs elsewhere), then navigate
/// with [`prev`]/[`next`]. Dropping an in-flight [`load`] future before it
/// completes leaves the state untouched, so an unmounted view never
/// receives a stale write.
///
/// [`load`]: GalleryView::load
/// [`finish_load`]: GalleryView::finish_load
/// [`prev`]: GalleryView::prev
/// [`next`]: GalleryView::next
#[derive(Debug, Default)]
pub struct GalleryView {
    images: Vec<ImageDescriptor>,
    page: usize,
    loading: bool,
    error: Option<String>,
}

impl GalleryView {
    /// Create a view in the loading state, awaiting its first listing.
    pub fn new() -> Self {
        Self {
            images: Vec::new(),
            page: 0,
            loading: true,
            error: None,
        }
    }

    /// Fetch the listing once and apply the result.
    ///
    /// A no-op when a listing is already present; there is no automatic
    /// retry after a failure.
    pub async fn load(&mut self, client: &GalleryClient) {
        if !self.images.is_empty() {
            return;
        }

        self.loading = true;
        let result = client.fetch_images().await;
        self.finish_load(result);
    }

    /// Apply the outcome of a completed fetch.
    pub fn finish_load(&mut self, result: Result<Vec<ImageDescriptor>, FetchError>) {
        match result {
            Ok(images) => {
                self.images = images;
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
        self.normalize_page();
    }

    /// Total page count: `max(1, ceil(n / 6))`.
    pub fn total_pages(&self) -> usize {
        self.images.len().div_ceil(ITEMS_PER_PAGE).max(1)
    }

    /// Current zero-based page index.
    pub fn page(&self) -> usize {
        self.page
    }

    /// The full listing, in listing order.
    pub fn images(&self) -> &[ImageDescriptor] {
        &self.images
    }

    /// Jump to a specific page; out-of-range values are clamped.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.normalize_page();
    }

    /// Navigate one page back, wrapping from the first page to the last.
    ///
    /// A no-op with zero images (the button is disabled).
    pub fn prev(&mut self) {
        if self.images.is_empty() {
            return;
        }

        self.page = if self.page == 0 {
            self.total_pages() - 1
        } else {
            self.page - 1
        };
        self.normalize_page();
    }

    /// Navigate one page forward, wrapping from the last page to the first.
    ///
    /// A no-op with zero images (the button is disabled).
    pub fn next(&mut self) {
        if self.images.is_empty() {
            return;
        }

        self.page = if self.page >= self.total_pages() - 1 {
            0
        } else {
            self.page + 1
        };
        self.normalize_page();
    }

    /// Clamp the page back into `[0, total_pages)`.
    ///
    /// Runs after every mutation, so the invariant also holds when the
    /// listing shrinks underneath the current page.
    fn normalize_page(&mut self) {
        let total = self.total_pages();
        if self.page >= total {
            self.page = total - 1;
        }
    }

    /// The state to render, exactly one of loading/error/empty/grid.
    pub fn view_state(&self) -> ViewState<'_> {
        if self.loading {
            return ViewState::Loading;
        }
        if let Some(ref error) = self.error {
            return ViewState::Error(error);
        }
        if self.images.is_empty() {
            return ViewState::Empty;
        }

        let start = self.page * ITEMS_PER_PAGE;
        let end = (start + ITEMS_PER_PAGE).min(self.images.len());

        ViewState::Grid {
            page: self.page,
            total_pages: self.total_pages(),
            images: &self.images[start..end],
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
