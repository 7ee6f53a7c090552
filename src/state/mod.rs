/// State management module
///
/// This module holds all client-side state, kept free of widgets so it can
/// be tested without a window:
/// - Wire data structures (data.rs)
/// - Device/category selection and request tokens (view.rs)
/// - Carousel track and swipe classification (carousel.rs)
/// - Download gating (download.rs)
/// - Preview modal (preview.rs)
/// - Statistics counters (counter.rs)
/// - Notifications (notify.rs)
/// - Upload staging and simulated progress (upload.rs)

pub mod carousel;
pub mod counter;
pub mod data;
pub mod download;
pub mod notify;
pub mod preview;
pub mod upload;
pub mod view;
