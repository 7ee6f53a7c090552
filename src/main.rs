use iced::widget::{button, column, container, horizontal_rule, row, text};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};

mod api;
mod config;
mod error;
mod gallery;
mod logging;
mod state;
mod ui;
mod upload;

use api::GalleryClient;
use config::AppConfig;
use gallery::Gallery;
use upload::UploadWidget;

/// Which page is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Gallery,
    Upload,
}

/// Main application state
struct WallpaperApp {
    page: Page,
    /// Browsing, preview and downloads
    gallery: Gallery,
    /// Staging and submission of new wallpapers
    upload: UploadWidget,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    ShowPage(Page),
    Gallery(gallery::Message),
    Upload(upload::Message),
}

impl WallpaperApp {
    /// Create the application; the gallery starts loading immediately
    fn new(config: AppConfig, client: GalleryClient) -> (Self, Task<Message>) {
        let (gallery, task) = Gallery::new(&config, client.clone());
        let upload = UploadWidget::new(&config, client);

        tracing::info!(
            "🎨 Wallpaper gallery ready, downloads go to {}",
            config.download_dir.display()
        );

        (
            WallpaperApp {
                page: Page::Gallery,
                gallery,
                upload,
            },
            task.map(Message::Gallery),
        )
    }

    /// Window title carries the shareable location of the gallery view
    fn title(&self) -> String {
        format!("Wallpaper Gallery - {}", self.gallery.location())
    }

    /// Route messages to the page that owns them
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ShowPage(page) => {
                tracing::debug!(?page, "showing page");
                self.page = page;
                Task::none()
            }
            Message::Gallery(message) => self.gallery.update(message).map(Message::Gallery),
            Message::Upload(message) => self.upload.update(message).map(Message::Upload),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            self.gallery
                .subscription(self.page == Page::Gallery)
                .map(Message::Gallery),
            self.upload
                .subscription(self.page == Page::Upload)
                .map(Message::Upload),
        ])
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let tab = |label: &'static str, page: Page| {
            let tab = button(text(label)).padding([6, 14]).on_press(Message::ShowPage(page));
            if self.page == page {
                tab.style(button::primary)
            } else {
                tab.style(button::text)
            }
        };

        let nav = row![
            tab("🖼️ Gallery", Page::Gallery),
            tab("⬆ Upload", Page::Upload),
        ]
        .spacing(8)
        .padding([8, 16])
        .align_y(Alignment::Center);

        let page = match self.page {
            Page::Gallery => self.gallery.view().map(Message::Gallery),
            Page::Upload => self.upload.view().map(Message::Upload),
        };

        column![nav, horizontal_rule(1), container(page).height(Length::Fill)].into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    logging::init();

    // Nothing can be shown without a backend address, so a bad config ends here
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("❌ {}", err);
            std::process::exit(2);
        }
    };
    let client = match GalleryClient::new(config.base_url(), config.request_timeout) {
        Ok(client) => client,
        Err(err) => {
            tracing::error!("❌ could not create HTTP client: {}", err);
            std::process::exit(2);
        }
    };

    tracing::info!(server = %client.base(), "starting");

    iced::application(WallpaperApp::title, WallpaperApp::update, WallpaperApp::view)
        .subscription(WallpaperApp::subscription)
        .theme(WallpaperApp::theme)
        .centered()
        .run_with(move || WallpaperApp::new(config, client))
}
