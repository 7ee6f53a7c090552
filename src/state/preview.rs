/// Full-resolution preview modal
///
/// Metadata is shown immediately; the image itself arrives later. Each open
/// gets a sequence number so that an image finishing after the modal was
/// closed or re-targeted is discarded.
use iced::widget::image::Handle;

use super::counter::group_thousands;
use super::data::Wallpaper;

#[derive(Debug, Clone)]
pub enum PreviewImage {
    Loading,
    Loaded(Handle),
    Failed,
}

#[derive(Debug, Clone)]
pub struct Preview {
    pub wallpaper: Wallpaper,
    pub image: PreviewImage,
    seq: u64,
}

impl Preview {
    /// Sequence number of the image load this preview waits for
    #[cfg(test)]
    pub(crate) fn seq(&self) -> u64 {
        self.seq
    }

    pub fn downloads_label(&self) -> String {
        format!("{} downloads", group_thousands(self.wallpaper.downloads()))
    }
}

#[derive(Debug, Default)]
pub struct PreviewModal {
    open: Option<Preview>,
    seq: u64,
}

impl PreviewModal {
    /// Open for `wallpaper`; returns the sequence number for the image load
    pub fn open(&mut self, wallpaper: Wallpaper) -> u64 {
        self.seq += 1;
        self.open = Some(Preview {
            wallpaper,
            image: PreviewImage::Loading,
            seq: self.seq,
        });
        self.seq
    }

    pub fn close(&mut self) -> bool {
        self.open.take().is_some()
    }

    pub fn current(&self) -> Option<&Preview> {
        self.open.as_ref()
    }

    /// Attach a finished image load. Returns false when the load is stale.
    pub fn finish(&mut self, seq: u64, image: Option<Handle>) -> bool {
        match self.open.as_mut() {
            Some(preview) if preview.seq == seq => {
                preview.image = match image {
                    Some(handle) => PreviewImage::Loaded(handle),
                    None => PreviewImage::Failed,
                };
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{sample_wallpaper, DeviceType};

    #[test]
    fn test_open_shows_metadata_while_loading() {
        let mut modal = PreviewModal::default();
        let mut wallpaper = sample_wallpaper("a", "space", DeviceType::Pc);
        wallpaper.download_count = Some(12345);
        modal.open(wallpaper);

        let preview = modal.current().unwrap();
        assert!(matches!(preview.image, PreviewImage::Loading));
        assert_eq!(preview.downloads_label(), "12,345 downloads");
    }

    #[test]
    fn test_failure_keeps_modal_open() {
        let mut modal = PreviewModal::default();
        let seq = modal.open(sample_wallpaper("a", "space", DeviceType::Pc));

        assert!(modal.finish(seq, None));
        assert!(modal.current().is_some());
        assert!(matches!(modal.current().unwrap().image, PreviewImage::Failed));
    }

    #[test]
    fn test_stale_loads_are_ignored() {
        let mut modal = PreviewModal::default();
        let first = modal.open(sample_wallpaper("a", "space", DeviceType::Pc));
        let second = modal.open(sample_wallpaper("b", "space", DeviceType::Pc));

        assert!(!modal.finish(first, None));
        assert!(matches!(modal.current().unwrap().image, PreviewImage::Loading));

        modal.close();
        assert!(!modal.finish(second, None));
    }
}
