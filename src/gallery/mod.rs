//! Gallery view controller.
//!
//! The browser-side core of the gallery, expressed as a plain state
//! machine plus a fetch client:
//!
//! - [`GalleryView`] holds the image list, the current page, and the
//!   loading/error flags, and exposes circular prev/next navigation over
//!   fixed six-image pages.
//! - [`GalleryClient`] performs the single listing fetch (one GET, caching
//!   disabled, no retry).
//!
//! The view is always in exactly one of four states (loading, error,
//! empty, grid), surfaced by [`GalleryView::view_state`]. The listing is
//! fetched once per mount and paginated purely in memory; navigation never
//! triggers another network call.

mod client;
mod view;

pub use client::GalleryClient;
pub use view::{GalleryView, ItemDisplay, ViewState, ITEMS_PER_PAGE};
