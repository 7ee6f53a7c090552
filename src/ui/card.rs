/// Wallpaper cards
///
/// Cards are built from a `CardModel` (plain data derived from a
/// `Wallpaper`) and rendered by a single function, so grid, popular list
/// and carousel all show the same fields the same way.
use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, text};
use iced::{Alignment, ContentFit, Element, Length};

use crate::gallery::Message;
use crate::state::counter::group_thousands;
use crate::state::data::{capitalize, DeviceType, Wallpaper};

/// Everything a card displays, in display form
#[derive(Debug, Clone)]
pub struct CardModel<'a> {
    pub wallpaper: &'a Wallpaper,
    pub title: &'a str,
    /// Capitalised category tag
    pub category: String,
    /// "MOBILE" / "PC"
    pub badge: &'static str,
    /// "1,234 downloads"
    pub downloads: String,
    /// 1-based rank in the popular list
    pub rank: Option<usize>,
    /// Decoded thumbnail once it has arrived
    pub thumbnail: Option<&'a Handle>,
}

impl<'a> CardModel<'a> {
    pub fn new(wallpaper: &'a Wallpaper, thumbnail: Option<&'a Handle>) -> Self {
        Self {
            wallpaper,
            title: &wallpaper.title,
            category: capitalize(&wallpaper.category),
            badge: wallpaper.device_type.badge(),
            downloads: format!("{} downloads", group_thousands(wallpaper.downloads())),
            rank: None,
            thumbnail,
        }
    }

    pub fn ranked(mut self, rank: usize) -> Self {
        self.rank = Some(rank);
        self
    }
}

/// Card width and image height for a partition
fn dimensions(device: DeviceType) -> (f32, f32) {
    match device {
        DeviceType::Mobile => (180.0, 320.0),
        DeviceType::Pc => (280.0, 158.0),
    }
}

/// Thumbnail (or a placeholder while it loads) at the given size
pub fn picture<'a>(thumbnail: Option<&Handle>, width: f32, height: f32) -> Element<'a, Message> {
    match thumbnail {
        Some(handle) => iced::widget::image(handle.clone())
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text("🖼️").size(28))
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .center_x(Length::Fixed(width))
            .center_y(Length::Fixed(height))
            .style(container::rounded_box)
            .into(),
    }
}

/// Render one card. The image opens the preview; the button starts a download.
pub fn view<'a>(model: CardModel<'a>) -> Element<'a, Message> {
    let (width, height) = dimensions(model.wallpaper.device_type);

    let image = button(picture(model.thumbnail, width, height))
        .padding(0)
        .style(button::text)
        .on_press(Message::OpenPreview(model.wallpaper.clone()));

    let heading = match model.rank {
        Some(rank) => format!("#{} {}", rank, model.title),
        None => model.title.to_string(),
    };

    let tags = row![
        container(text(model.category).size(12))
            .padding([2, 8])
            .style(container::rounded_box),
        container(text(model.badge).size(12))
            .padding([2, 8])
            .style(container::rounded_box),
    ]
    .spacing(6);

    let footer = row![
        text(model.downloads).size(12),
        iced::widget::horizontal_space(),
        button(text("⬇ Download").size(13))
            .style(button::primary)
            .on_press(Message::RequestDownload(model.wallpaper.clone())),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    container(
        column![image, text(heading).size(15), tags, footer]
            .spacing(6)
            .width(Length::Fixed(width)),
    )
    .padding(8)
    .style(container::bordered_box)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::sample_wallpaper;

    #[test]
    fn test_model_formats_fields() {
        let mut wallpaper = sample_wallpaper("a", "nature", DeviceType::Pc);
        wallpaper.download_count = Some(4321);

        let model = CardModel::new(&wallpaper, None).ranked(2);
        assert_eq!(model.title, "Wallpaper a");
        assert_eq!(model.category, "Nature");
        assert_eq!(model.badge, "PC");
        assert_eq!(model.downloads, "4,321 downloads");
        assert_eq!(model.rank, Some(2));
        assert!(model.thumbnail.is_none());
    }

    #[test]
    fn test_missing_count_reads_zero() {
        let wallpaper = sample_wallpaper("b", "space", DeviceType::Mobile);
        let model = CardModel::new(&wallpaper, None);
        assert_eq!(model.downloads, "0 downloads");
        assert_eq!(model.badge, "MOBILE");
    }
}
