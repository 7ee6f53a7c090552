/// HTTP access to the gallery backend
///
/// The backend is treated as an opaque collaborator: this module only knows
/// the endpoint paths and the JSON shapes in `state::data`.
///
/// - `client.rs` - typed wrapper around `reqwest` for every endpoint
/// - `download.rs` - naming and writing downloaded files

pub mod client;
pub mod download;

pub use client::{DeviceSnapshot, GalleryClient, UploadReceipt, UploadSubmission};
