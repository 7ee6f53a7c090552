/// Gallery controller
///
/// Owns everything the gallery page shows: the active device partition and
/// category, the wallpaper grid, the popular list, the carousel, statistics,
/// recent activity, the preview modal and the download gate. Every network
/// call goes out as an iced `Task` and comes back as a `Message`; responses
/// that were overtaken by a newer request are dropped (see `ViewState`).
use iced::widget::image::Handle;
use iced::widget::{
    button, canvas, checkbox, column, container, horizontal_space, progress_bar, row,
    scrollable, stack, text, Column, Row,
};
use iced::{keyboard, time, Alignment, ContentFit, Element, Length, Pixels, Subscription, Task};
use iced_aw::Wrap;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use url::Url;

use crate::api::{DeviceSnapshot, GalleryClient};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::state::carousel::{Carousel, AUTOPLAY_INTERVAL, CAROUSEL_SIZE};
use crate::state::counter::{CounterAnimation, COUNTER_TICK};
use crate::state::data::{
    capitalize, distinct_categories, ActivityEntry, ActivityFilter, ActivityKind, DeviceType,
    Stats, Wallpaper,
};
use crate::state::download::{DownloadGate, DownloadNotice, DownloadTarget};
use crate::state::notify::{Level, Notifications, DEFAULT_DURATION};
use crate::state::preview::{Preview, PreviewImage, PreviewModal};
use crate::state::view::{
    Connectivity, DeviceTicket, Freshness, GalleryTicket, ViewState, WelcomeBanner,
    ALL_CATEGORIES, FILTER_DELAY, STATS_INTERVAL,
};
use crate::ui::card::{self, CardModel};
use crate::ui::chart::CategoryChart;
use crate::ui::modal::{modal, panel};
use crate::ui::notifications;
use crate::ui::swipe::SwipeArea;

/// Redraw period while nothing is counting up
const SLOW_FRAME: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub enum Message {
    SwitchDevice(DeviceType),
    DeviceLoaded(DeviceTicket, Result<DeviceSnapshot, ApiError>),
    Filter(String),
    FilterDelayElapsed(GalleryTicket),
    FilterLoaded(GalleryTicket, Result<Vec<Wallpaper>, ApiError>),
    ResetFilters,

    CarouselStep(i32),
    CarouselAutoplay,
    Swiped(i32),

    StatsTick,
    StatsLoaded(DeviceType, Result<Stats, ApiError>),
    PopularLoaded(DeviceType, Result<Vec<Wallpaper>, ApiError>),
    ActivityFilterChanged(ActivityFilter),
    ActivityLoaded(DeviceType, ActivityFilter, Result<Vec<ActivityEntry>, ApiError>),
    ThumbnailLoaded(String, Result<Vec<u8>, ApiError>),

    OpenPreview(Wallpaper),
    PreviewLoaded(u64, Result<Handle, ApiError>),
    ClosePreview,
    DownloadFromPreview,

    RequestDownload(Wallpaper),
    AcknowledgeFollow(bool),
    FollowInstagram,
    ProceedDownload,
    CancelDownload,
    Tracked(Result<bool, ApiError>),
    Downloaded(Result<PathBuf, ApiError>),

    Escape,
    DismissNotification(u64),
    DismissWelcome,
    Frame(Instant),
}

/// Per-filename thumbnail cache entry
#[derive(Debug, Clone)]
enum Thumbnail {
    Loading,
    Ready(Handle),
    Failed,
}

/// What the gallery grid area currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Results {
    /// Nothing loaded yet
    Pending,
    /// Last load came back empty: placeholder instead of grid
    Empty,
    Populated,
}

/// What a finished tracking call leaves to do
#[derive(Debug)]
struct AfterTracking {
    target: DownloadTarget,
    /// Stats, popular and activity reload only after a counted download
    refresh: bool,
}

/// The three statistics counters
#[derive(Debug, Clone, Copy)]
struct StatCounters {
    total_downloads: CounterAnimation,
    total_wallpapers: CounterAnimation,
    downloads_24h: CounterAnimation,
}

impl StatCounters {
    fn start(stats: &Stats, now: Instant) -> Self {
        Self {
            total_downloads: CounterAnimation::start(stats.total_downloads, now),
            total_wallpapers: CounterAnimation::start(stats.total_wallpapers, now),
            downloads_24h: CounterAnimation::start(stats.downloads_24h, now),
        }
    }

    fn is_finished(&self, now: Instant) -> bool {
        self.total_downloads.is_finished(now)
            && self.total_wallpapers.is_finished(now)
            && self.downloads_24h.is_finished(now)
    }
}

pub struct Gallery {
    client: GalleryClient,
    /// Configured server URL; the shareable location is derived from it
    location_base: Url,
    instagram_url: String,
    download_dir: PathBuf,

    view: ViewState,
    wallpapers: Vec<Wallpaper>,
    results: Results,
    popular: Vec<Wallpaper>,
    categories: Vec<String>,
    /// Wallpaper count shown in the device info panel
    device_count: usize,
    carousel: Carousel,

    stats: Option<Stats>,
    counters: Option<StatCounters>,
    activity: Vec<ActivityEntry>,
    activity_filter: ActivityFilter,

    thumbnails: HashMap<String, Thumbnail>,
    preview: PreviewModal,
    gate: DownloadGate,
    notice: Option<DownloadNotice>,

    notifications: Notifications,
    connectivity: Connectivity,
    welcome: WelcomeBanner,
    /// Full-screen loading overlay text
    loading: Option<String>,
}

impl Gallery {
    pub fn new(config: &AppConfig, client: GalleryClient) -> (Self, Task<Message>) {
        let now = Instant::now();
        let device = config.initial_device();

        let mut gallery = Gallery {
            client,
            location_base: config.server_url.clone(),
            instagram_url: config.instagram_url.clone(),
            download_dir: config.download_dir.clone(),
            view: ViewState::new(device),
            wallpapers: Vec::new(),
            results: Results::Pending,
            popular: Vec::new(),
            categories: Vec::new(),
            device_count: 0,
            carousel: Carousel::default(),
            stats: None,
            counters: None,
            activity: Vec::new(),
            activity_filter: ActivityFilter::default(),
            thumbnails: HashMap::new(),
            preview: PreviewModal::default(),
            gate: DownloadGate::default(),
            notice: None,
            notifications: Notifications::new(),
            connectivity: Connectivity::default(),
            welcome: WelcomeBanner::new(now),
            loading: None,
        };

        tracing::info!("🖼️ Gallery starting on {} partition", device.as_str());
        let ticket = gallery.view.begin_device_load();
        gallery.loading = Some(loading_label(device));
        let task = Task::batch([gallery.load_device(ticket), gallery.load_activity()]);

        (gallery, task)
    }

    /// Shareable location of the current view
    pub fn location(&self) -> Url {
        self.view.location(&self.location_base)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let now = Instant::now();

        match message {
            Message::SwitchDevice(device) => self.switch_device(device, now),
            Message::DeviceLoaded(ticket, result) => self.device_loaded(ticket, result, now),
            Message::Filter(category) => self.filter(&category, now),
            Message::FilterDelayElapsed(ticket) => {
                if !self.view.is_gallery_current(&ticket) {
                    tracing::debug!("filter superseded before its fetch");
                    return Task::none();
                }
                let client = self.client.clone();
                let category = self.view.category().to_string();
                Task::perform(
                    async move { client.wallpapers(ticket.device, &category).await },
                    move |result| Message::FilterLoaded(ticket, result),
                )
            }
            Message::FilterLoaded(ticket, result) => self.filter_loaded(ticket, result, now),
            Message::ResetFilters => self.reset_filters(now),

            Message::CarouselStep(direction) | Message::Swiped(direction) => {
                self.carousel.step(direction);
                Task::none()
            }
            Message::CarouselAutoplay => {
                self.carousel.step(1);
                Task::none()
            }

            Message::StatsTick => Task::batch([self.load_stats(), self.load_activity()]),
            Message::StatsLoaded(device, result) => {
                if device != self.view.device() {
                    return Task::none();
                }
                self.observe(&result, now);
                match result {
                    Ok(stats) => self.apply_stats(stats, now),
                    Err(err) => {
                        tracing::error!("❌ statistics refresh failed: {}", err);
                        self.notifications.message(
                            Level::Error,
                            "Failed to load statistics 📊",
                            Duration::from_millis(2000),
                            now,
                        );
                    }
                }
                Task::none()
            }
            Message::PopularLoaded(device, result) => {
                if device != self.view.device() {
                    return Task::none();
                }
                self.observe(&result, now);
                match result {
                    Ok(popular) => {
                        self.popular = popular;
                        self.request_thumbnails()
                    }
                    Err(err) => {
                        tracing::warn!("⚠️ popular refresh failed: {}", err);
                        Task::none()
                    }
                }
            }
            Message::ActivityFilterChanged(filter) => {
                self.activity_filter = filter;
                self.load_activity()
            }
            Message::ActivityLoaded(device, filter, result) => {
                if device != self.view.device() || filter != self.activity_filter {
                    return Task::none();
                }
                self.observe(&result, now);
                match result {
                    Ok(entries) => self.activity = entries,
                    Err(err) => tracing::warn!("⚠️ activity refresh failed: {}", err),
                }
                Task::none()
            }
            Message::ThumbnailLoaded(filename, result) => {
                let entry = match result {
                    Ok(bytes) => Thumbnail::Ready(Handle::from_bytes(bytes)),
                    Err(err) => {
                        tracing::debug!(%filename, "thumbnail failed: {}", err);
                        Thumbnail::Failed
                    }
                };
                self.thumbnails.insert(filename, entry);
                Task::none()
            }

            Message::OpenPreview(wallpaper) => {
                self.notifications.message(
                    Level::Info,
                    format!("Opening {} preview 🖼️", wallpaper.title),
                    Duration::from_millis(2000),
                    now,
                );
                let filename = wallpaper.filename.clone();
                let seq = self.preview.open(wallpaper);
                let client = self.client.clone();
                Task::perform(load_preview(client, filename), move |result| {
                    Message::PreviewLoaded(seq, result)
                })
            }
            Message::PreviewLoaded(seq, result) => {
                match result {
                    Ok(handle) => {
                        if self.preview.finish(seq, Some(handle)) {
                            if let Some(preview) = self.preview.current() {
                                let text = format!("{} loaded! 🖼️", preview.wallpaper.title);
                                self.notifications.toast(Level::Success, text, DEFAULT_DURATION, now);
                            }
                        }
                    }
                    Err(err) => {
                        tracing::error!("❌ preview load failed: {}", err);
                        if self.preview.finish(seq, None) {
                            self.notifications.message(
                                Level::Error,
                                "Failed to load wallpaper image 😞",
                                DEFAULT_DURATION,
                                now,
                            );
                        }
                    }
                }
                Task::none()
            }
            Message::ClosePreview => {
                self.close_preview(now);
                Task::none()
            }
            Message::DownloadFromPreview => {
                let wallpaper = self.preview.current().map(|p| p.wallpaper.clone());
                self.close_preview(now);
                match wallpaper {
                    Some(wallpaper) => self.update(Message::RequestDownload(wallpaper)),
                    None => Task::none(),
                }
            }

            Message::RequestDownload(wallpaper) => {
                let target = DownloadTarget::from(&wallpaper);
                if self.gate.request(target) {
                    self.notifications.message(
                        Level::Info,
                        format!("Preparing to download \"{}\" 📥", wallpaper.title),
                        Duration::from_millis(2000),
                        now,
                    );
                } else {
                    self.notifications.toast(
                        Level::Info,
                        "A download is already in progress ⏳",
                        DEFAULT_DURATION,
                        now,
                    );
                }
                Task::none()
            }
            Message::AcknowledgeFollow(checked) => {
                self.gate.set_acknowledged(checked);
                Task::none()
            }
            Message::FollowInstagram => {
                self.notifications.toast(
                    Level::Info,
                    "Instagram link copied! Please follow us 📸",
                    DEFAULT_DURATION,
                    now,
                );
                iced::clipboard::write(self.instagram_url.clone())
            }
            Message::ProceedDownload => match self.gate.proceed() {
                Some(target) => {
                    tracing::info!(id = %target.id, "tracking download");
                    let client = self.client.clone();
                    Task::perform(
                        async move { client.track_download(&target.id).await },
                        Message::Tracked,
                    )
                }
                None => Task::none(),
            },
            Message::CancelDownload => {
                self.gate.cancel();
                Task::none()
            }
            Message::Tracked(result) => self.tracked(result, now),
            Message::Downloaded(result) => {
                self.observe(&result, now);
                let Some((target, tracked)) = self.gate.download_finished() else {
                    return Task::none();
                };
                match result {
                    Ok(path) => {
                        tracing::info!(path = %path.display(), "💾 saved {}", target.title);
                        if tracked {
                            self.notifications.message(
                                Level::Success,
                                format!("\"{}\" downloaded successfully! ✅", target.title),
                                DEFAULT_DURATION,
                                now,
                            );
                        } else {
                            self.notifications.toast(
                                Level::Info,
                                format!("Saved to {}", path.display()),
                                DEFAULT_DURATION,
                                now,
                            );
                        }
                    }
                    Err(err) => {
                        tracing::error!("❌ download of {} failed: {}", target.filename, err);
                        self.notice = None;
                        self.notifications.message(
                            Level::Error,
                            format!("Download of \"{}\" failed 😞", target.title),
                            DEFAULT_DURATION,
                            now,
                        );
                    }
                }
                Task::none()
            }

            Message::Escape => {
                self.close_preview(now);
                self.gate.cancel();
                Task::none()
            }
            Message::DismissNotification(id) => {
                self.notifications.dismiss(id);
                Task::none()
            }
            Message::DismissWelcome => {
                self.welcome.dismiss();
                Task::none()
            }
            Message::Frame(now) => {
                self.notifications.prune(now);
                if self.notice.as_ref().is_some_and(|n| !n.is_visible(now)) {
                    self.notice = None;
                }
                Task::none()
            }
        }
    }

    fn switch_device(&mut self, device: DeviceType, now: Instant) -> Task<Message> {
        let Some(ticket) = self.view.switch_device(device) else {
            return Task::none();
        };

        tracing::info!(location = %self.location(), "🔄 switching to {} wallpapers", device.as_str());
        self.loading = Some(loading_label(device));
        self.notifications.message(
            Level::Success,
            format!("Switched to {} wallpapers! 🔄", device.badge()),
            DEFAULT_DURATION,
            now,
        );
        self.notifications.toast(
            Level::Info,
            format!("Now showing {} wallpapers {}", device.label(), device.icon()),
            Duration::from_millis(2000),
            now,
        );

        self.load_device(ticket)
    }

    fn device_loaded(
        &mut self,
        ticket: DeviceTicket,
        result: Result<DeviceSnapshot, ApiError>,
        now: Instant,
    ) -> Task<Message> {
        let freshness = self.view.device_freshness(&ticket);
        if freshness == Freshness::Stale {
            tracing::debug!("dropping stale {} response", ticket.device.as_str());
            return Task::none();
        }

        self.observe(&result, now);
        // a pending filter owns the overlay until it lands
        if freshness == Freshness::Current {
            self.loading = None;
        }

        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::error!("❌ loading {} wallpapers failed: {}", ticket.device.as_str(), err);
                self.notifications.message(
                    Level::Error,
                    "Failed to load wallpapers 😞",
                    DEFAULT_DURATION,
                    now,
                );
                return Task::none();
            }
        };

        self.popular = snapshot.popular;
        self.apply_stats(snapshot.stats, now);
        self.device_count = snapshot.wallpapers.len();

        if freshness == Freshness::Current {
            self.categories = distinct_categories(&snapshot.wallpapers);
            self.carousel
                .replace(snapshot.wallpapers.iter().take(CAROUSEL_SIZE).cloned().collect());

            let device = ticket.device.badge();
            let count = snapshot.wallpapers.len();
            self.show_results(
                snapshot.wallpapers,
                format!("No {} wallpapers found 😔", device),
                format!("Found {} {} wallpapers 🔍", count, device),
                now,
            );
        }

        self.request_thumbnails()
    }

    fn filter(&mut self, category: &str, now: Instant) -> Task<Message> {
        let ticket = self.view.set_category(category);

        self.notifications.toast(
            Level::Info,
            format!("Browsing {} wallpapers 📱", self.view.category_name()),
            DEFAULT_DURATION,
            now,
        );
        self.loading = Some("Filtering wallpapers...".to_string());

        Task::perform(async { tokio::time::sleep(FILTER_DELAY).await }, move |_| {
            Message::FilterDelayElapsed(ticket)
        })
    }

    fn filter_loaded(
        &mut self,
        ticket: GalleryTicket,
        result: Result<Vec<Wallpaper>, ApiError>,
        now: Instant,
    ) -> Task<Message> {
        if !self.view.is_gallery_current(&ticket) {
            tracing::debug!("dropping stale filter response");
            return Task::none();
        }

        self.observe(&result, now);
        self.loading = None;

        match result {
            Ok(wallpapers) => {
                let count = wallpapers.len();
                self.show_results(
                    wallpapers,
                    "No wallpapers found in this category 😔".to_string(),
                    format!("Found {} wallpapers 🔍", count),
                    now,
                );
                self.request_thumbnails()
            }
            Err(err) => {
                tracing::error!("❌ filtering by {} failed: {}", self.view.category(), err);
                self.notifications.message(
                    Level::Error,
                    "Failed to filter wallpapers 😞",
                    DEFAULT_DURATION,
                    now,
                );
                Task::none()
            }
        }
    }

    fn reset_filters(&mut self, now: Instant) -> Task<Message> {
        tracing::info!("resetting filters");
        if self.view.device() == DeviceType::Mobile {
            return self.filter(ALL_CATEGORIES, now);
        }

        // the device load below picks up the "all" category and owns the grid
        self.view.set_category(ALL_CATEGORIES);
        self.switch_device(DeviceType::Mobile, now)
    }

    fn tracked(&mut self, result: Result<bool, ApiError>, now: Instant) -> Task<Message> {
        let Some(after) = self.settle_tracking(result, now) else {
            return Task::none();
        };

        let fetch = Task::perform(self.fetch_file(&after.target), Message::Downloaded);
        if after.refresh {
            Task::batch([fetch, self.load_stats(), self.load_popular(), self.load_activity()])
        } else {
            fetch
        }
    }

    /// Move the gate on from tracking and report the outcome
    fn settle_tracking(&mut self, result: Result<bool, ApiError>, now: Instant) -> Option<AfterTracking> {
        self.observe(&result, now);
        let tracked = match result {
            Ok(true) => true,
            Ok(false) => {
                tracing::warn!("⚠️ server declined to track the download");
                false
            }
            Err(err) => {
                tracing::error!("❌ download tracking failed: {}", err);
                false
            }
        };

        let target = self.gate.tracking_finished(tracked)?;

        if !tracked {
            self.notifications.message(
                Level::Error,
                "Oops! Something went wrong. Please try again 😅",
                DEFAULT_DURATION,
                now,
            );
        }
        self.notice = Some(DownloadNotice::new(target.title.clone(), now));

        Some(AfterTracking {
            target,
            refresh: tracked,
        })
    }

    /// Fetch the wallpaper file into the download directory
    fn fetch_file(
        &self,
        target: &DownloadTarget,
    ) -> impl std::future::Future<Output = Result<PathBuf, ApiError>> + Send + 'static {
        let client = self.client.clone();
        let dir = self.download_dir.clone();
        let filename = target.filename.clone();
        async move { client.download(&filename, &dir).await }
    }

    fn close_preview(&mut self, now: Instant) {
        if self.preview.close() {
            self.notifications
                .toast(Level::Info, "Preview closed 👋", Duration::from_millis(1500), now);
        }
    }

    fn show_results(&mut self, wallpapers: Vec<Wallpaper>, empty: String, found: String, now: Instant) {
        if wallpapers.is_empty() {
            self.results = Results::Empty;
            self.notifications.message(Level::Error, empty, DEFAULT_DURATION, now);
        } else {
            self.results = Results::Populated;
            self.notifications
                .toast(Level::Success, found, Duration::from_millis(2000), now);
        }
        self.wallpapers = wallpapers;
    }

    fn apply_stats(&mut self, stats: Stats, now: Instant) {
        self.counters = Some(StatCounters::start(&stats, now));
        self.stats = Some(stats);
    }

    /// Track reachability; announce transitions
    fn observe<T>(&mut self, result: &Result<T, ApiError>, now: Instant) {
        let reachable = !matches!(result, Err(err) if err.is_offline());
        match self.connectivity.observe(reachable) {
            Some(Connectivity::Offline) => {
                self.notifications.message(
                    Level::Error,
                    "You are offline. Some features may not work 📡",
                    Duration::from_millis(5000),
                    now,
                );
            }
            Some(Connectivity::Online) => {
                self.notifications
                    .toast(Level::Success, "Connection restored! 🌐", DEFAULT_DURATION, now);
            }
            None => {}
        }
    }

    fn load_device(&self, ticket: DeviceTicket) -> Task<Message> {
        let client = self.client.clone();
        let category = self.view.category().to_string();
        Task::perform(
            async move { client.device_snapshot(ticket.device, &category).await },
            move |result| Message::DeviceLoaded(ticket, result),
        )
    }

    fn load_stats(&self) -> Task<Message> {
        let client = self.client.clone();
        let device = self.view.device();
        Task::perform(async move { client.stats(device).await }, move |result| {
            Message::StatsLoaded(device, result)
        })
    }

    fn load_popular(&self) -> Task<Message> {
        let client = self.client.clone();
        let device = self.view.device();
        Task::perform(async move { client.popular(device).await }, move |result| {
            Message::PopularLoaded(device, result)
        })
    }

    fn load_activity(&self) -> Task<Message> {
        let client = self.client.clone();
        let device = self.view.device();
        let filter = self.activity_filter;
        Task::perform(
            async move { client.activity(filter, device).await },
            move |result| Message::ActivityLoaded(device, filter, result),
        )
    }

    /// Fetch thumbnails for every shown wallpaper not yet in the cache
    fn request_thumbnails(&mut self) -> Task<Message> {
        let filenames: Vec<String> = self
            .wallpapers
            .iter()
            .chain(self.popular.iter())
            .map(|w| w.filename.clone())
            .collect();

        let mut tasks = Vec::new();
        for filename in filenames {
            if self.thumbnails.contains_key(&filename) {
                continue;
            }
            self.thumbnails.insert(filename.clone(), Thumbnail::Loading);

            let client = self.client.clone();
            tasks.push(Task::perform(
                async move {
                    let result = client.image_bytes(&filename).await;
                    (filename, result)
                },
                |(filename, result)| Message::ThumbnailLoaded(filename, result),
            ));
        }

        Task::batch(tasks)
    }

    fn thumbnail(&self, filename: &str) -> Option<&Handle> {
        match self.thumbnails.get(filename) {
            Some(Thumbnail::Ready(handle)) => Some(handle),
            _ => None,
        }
    }

    /// View models for the gallery grid
    pub fn cards(&self) -> Vec<CardModel<'_>> {
        self.wallpapers
            .iter()
            .map(|w| CardModel::new(w, self.thumbnail(&w.filename)))
            .collect()
    }

    pub fn is_grid_visible(&self) -> bool {
        self.results == Results::Populated
    }

    pub fn is_placeholder_visible(&self) -> bool {
        self.results == Results::Empty
    }

    /// Timers, plus the keyboard while the gallery has focus
    pub fn subscription(&self, focused: bool) -> Subscription<Message> {
        let now = Instant::now();
        let mut subscriptions = vec![
            time::every(AUTOPLAY_INTERVAL).map(|_| Message::CarouselAutoplay),
            time::every(STATS_INTERVAL).map(|_| Message::StatsTick),
        ];

        if focused {
            subscriptions.push(keyboard::on_key_press(handle_key));
        }

        if self.counters.is_some_and(|c| !c.is_finished(now)) {
            subscriptions.push(time::every(COUNTER_TICK).map(Message::Frame));
        } else if !self.notifications.is_empty() || self.notice.is_some() || self.welcome.is_pending(now) {
            subscriptions.push(time::every(SLOW_FRAME).map(Message::Frame));
        }

        Subscription::batch(subscriptions)
    }

    pub fn view(&self) -> Element<'_, Message> {
        let now = Instant::now();

        let mut content = Column::new().spacing(28).padding(24);
        content = content.push(self.view_header());
        if self.welcome.is_visible(now) {
            content = content.push(
                container(
                    row![
                        text("👋 Welcome! Pick a device, browse categories and grab a wallpaper."),
                        horizontal_space(),
                        button(text("✕").size(12))
                            .style(button::text)
                            .on_press(Message::DismissWelcome),
                    ]
                    .align_y(Alignment::Center),
                )
                .padding(12)
                .style(container::rounded_box),
            );
        }
        content = content
            .push(notifications::messages(&self.notifications, Message::DismissNotification))
            .push(self.view_device_info())
            .push(self.view_carousel())
            .push(self.view_filters())
            .push(self.view_grid())
            .push(self.view_popular())
            .push(self.view_stats(now))
            .push(self.view_activity());

        let mut overlay = Column::new().spacing(8);
        if let Some(notice) = self.notice.as_ref().filter(|n| n.is_visible(now)) {
            overlay = overlay.push(
                container(
                    column![
                        text(format!("⬇ Downloading {}", notice.title)).size(14),
                        progress_bar(0.0..=100.0, notice.progress(now)).height(6),
                    ]
                    .spacing(6)
                    .width(Length::Fixed(280.0)),
                )
                .padding(12)
                .style(panel),
            );
        }
        overlay = overlay.push(notifications::toasts(&self.notifications));

        let mut screen: Element<'_, Message> = stack![
            scrollable(content).height(Length::Fill),
            container(overlay.align_x(Alignment::End))
                .padding(16)
                .width(Length::Fill)
                .align_bottom(Length::Fill),
        ]
        .into();

        if let Some(preview) = self.preview.current() {
            screen = modal(screen, self.view_preview(preview), Some(Message::ClosePreview));
        }
        if let Some(target) = self.gate.pending() {
            screen = modal(screen, self.view_confirm(target), Some(Message::CancelDownload));
        }
        if let Some(label) = &self.loading {
            screen = modal(
                screen,
                container(text(label.as_str()).size(18)).padding(24).style(panel),
                None,
            );
        }

        screen
    }

    fn view_header(&self) -> Element<'_, Message> {
        let device_button = |device: DeviceType| {
            let label = button(text(format!("{} {}", device.icon(), device.label())))
                .padding([8, 16])
                .on_press(Message::SwitchDevice(device));
            if device == self.view.device() {
                label.style(button::primary)
            } else {
                label.style(button::secondary)
            }
        };

        let connectivity = match self.connectivity {
            Connectivity::Online => text("● Online").size(13).style(text::success),
            Connectivity::Offline => text("● Offline").size(13).style(text::danger),
        };

        row![
            text("Wallpaper Gallery").size(30),
            horizontal_space(),
            device_button(DeviceType::Mobile),
            device_button(DeviceType::Pc),
            button(text("Reset filters"))
                .style(button::text)
                .on_press(Message::ResetFilters),
            connectivity,
        ]
        .spacing(10)
        .align_y(Alignment::Center)
        .into()
    }

    fn view_device_info(&self) -> Element<'_, Message> {
        let device = self.view.device();
        column![
            text(format!("{} {}", device.icon(), device.heading())).size(24),
            text(device.tagline()).size(14),
            text(format!("{} wallpapers available", self.device_count)).size(14),
        ]
        .spacing(4)
        .into()
    }

    fn view_carousel(&self) -> Element<'_, Message> {
        let Some(slide) = self.carousel.visible() else {
            return Column::new().into();
        };

        let (width, height) = match slide.device_type {
            DeviceType::Mobile => (240.0, 426.0),
            DeviceType::Pc => (640.0, 360.0),
        };

        let caption = column![
            text(slide.title.as_str()).size(22),
            text(capitalize(&slide.category)).size(14),
            row![
                button(text("👁 Preview")).on_press(Message::OpenPreview(slide.clone())),
                button(text("⬇ Download"))
                    .style(button::primary)
                    .on_press(Message::RequestDownload(slide.clone())),
            ]
            .spacing(8),
        ]
        .spacing(8);

        let slides = row![
            button(text("‹").size(28))
                .style(button::text)
                .on_press(Message::CarouselStep(-1)),
            card::picture(self.thumbnail(&slide.filename), width, height),
            caption,
            horizontal_space(),
            button(text("›").size(28))
                .style(button::text)
                .on_press(Message::CarouselStep(1)),
        ]
        .spacing(16)
        .align_y(Alignment::Center);

        let swipe = canvas(SwipeArea {
            on_swipe: Message::Swiped,
        })
        .width(Length::Fill)
        .height(Length::Fill);

        column![
            text("✨ Featured").size(22),
            stack![slides, swipe],
            text(format!("{} / {}", self.carousel.index() + 1, self.carousel.len())).size(13),
        ]
        .spacing(10)
        .into()
    }

    fn view_filters(&self) -> Element<'_, Message> {
        let filter_button = |label: String, value: String| -> Element<'_, Message> {
            let active = self.view.is_active_category(&value);
            button(text(label).size(14))
                .style(if active { button::primary } else { button::secondary })
                .on_press(Message::Filter(value))
                .into()
        };

        let mut buttons = vec![filter_button("All".to_string(), ALL_CATEGORIES.to_string())];
        buttons.extend(
            self.categories
                .iter()
                .map(|category| filter_button(capitalize(category), category.to_lowercase())),
        );

        column![
            row![
                text("Categories").size(20),
                container(text(self.view.filter_badge()).size(12))
                    .padding([2, 8])
                    .style(container::rounded_box),
            ]
            .spacing(10)
            .align_y(Alignment::Center),
            Wrap::with_elements(buttons)
                .spacing(Pixels(8.0))
                .line_spacing(Pixels(8.0)),
        ]
        .spacing(10)
        .into()
    }

    fn view_grid(&self) -> Element<'_, Message> {
        if self.is_grid_visible() {
            let cards = self.cards().into_iter().map(card::view).collect();
            Wrap::with_elements(cards)
                .spacing(Pixels(16.0))
                .line_spacing(Pixels(16.0))
                .into()
        } else if self.is_placeholder_visible() {
            container(
                column![
                    text("😔").size(40),
                    text("No wallpapers found").size(20),
                    text("Try another category or device").size(14),
                ]
                .spacing(6)
                .align_x(Alignment::Center),
            )
            .padding(40)
            .center_x(Length::Fill)
            .into()
        } else {
            Column::new().into()
        }
    }

    fn view_popular(&self) -> Element<'_, Message> {
        if self.popular.is_empty() {
            return Column::new().into();
        }

        let cards = self
            .popular
            .iter()
            .enumerate()
            .map(|(i, w)| card::view(CardModel::new(w, self.thumbnail(&w.filename)).ranked(i + 1)))
            .collect();

        column![
            text("🔥 Most Popular").size(22),
            Wrap::with_elements(cards)
                .spacing(Pixels(16.0))
                .line_spacing(Pixels(16.0)),
        ]
        .spacing(12)
        .into()
    }

    fn view_stats(&self, now: Instant) -> Element<'_, Message> {
        let counter = |value: String, label: &'static str| {
            column![text(value).size(32), text(label).size(13)]
                .align_x(Alignment::Center)
                .width(Length::Fill)
        };

        let (downloads, wallpapers, recent) = match &self.counters {
            Some(c) => (
                c.total_downloads.label(now),
                c.total_wallpapers.label(now),
                c.downloads_24h.label(now),
            ),
            None => ("0".to_string(), "0".to_string(), "0".to_string()),
        };

        let mut section = column![
            text("📊 Statistics").size(22),
            row![
                counter(downloads, "Total downloads"),
                counter(wallpapers, "Wallpapers"),
                counter(recent, "Downloads (24h)"),
            ]
            .spacing(12),
        ]
        .spacing(12);

        if let Some(stats) = &self.stats {
            let chart = CategoryChart {
                bars: stats
                    .ranked_categories()
                    .into_iter()
                    .map(|(name, count)| (capitalize(name), count))
                    .collect(),
            };
            let height = chart.height();
            section = section
                .push(text("Popular categories").size(16))
                .push(canvas(chart).width(Length::Fill).height(Length::Fixed(height)));
        }

        section.into()
    }

    fn view_activity(&self) -> Element<'_, Message> {
        let filters = Row::with_children(ActivityFilter::ALL.iter().map(|filter| {
            button(text(filter.to_string()).size(13))
                .style(if *filter == self.activity_filter {
                    button::primary
                } else {
                    button::secondary
                })
                .on_press(Message::ActivityFilterChanged(*filter))
                .into()
        }))
        .spacing(6);

        let entries: Element<'_, Message> = if self.activity.is_empty() {
            text("No recent activity").size(14).into()
        } else {
            Column::with_children(self.activity.iter().map(|entry| {
                let icon = match entry.kind {
                    ActivityKind::Download => "⬇",
                    ActivityKind::Upload => "⬆",
                };
                row![
                    text(icon),
                    text(entry.title.as_str()),
                    horizontal_space(),
                    text(entry.display_date()).size(12),
                ]
                .spacing(8)
                .into()
            }))
            .spacing(4)
            .into()
        };

        column![text("🕒 Recent Activity").size(22), filters, entries]
            .spacing(10)
            .into()
    }

    fn view_preview<'a>(&'a self, preview: &'a Preview) -> Element<'a, Message> {
        let wallpaper = &preview.wallpaper;
        let (width, height) = match wallpaper.device_type {
            DeviceType::Mobile => (360.0, 640.0),
            DeviceType::Pc => (800.0, 450.0),
        };

        let placeholder = |label: &'static str| -> Element<'a, Message> {
            container(text(label))
                .center_x(Length::Fixed(width))
                .center_y(Length::Fixed(height))
                .style(container::rounded_box)
                .into()
        };

        let picture = match &preview.image {
            PreviewImage::Loading => placeholder("Loading full resolution..."),
            PreviewImage::Failed => placeholder("⚠️ Image failed to load"),
            PreviewImage::Loaded(handle) => iced::widget::image(handle.clone())
                .width(Length::Fixed(width))
                .height(Length::Fixed(height))
                .content_fit(ContentFit::Contain)
                .into(),
        };

        container(
            column![
                row![
                    text(wallpaper.title.as_str()).size(22),
                    horizontal_space(),
                    button(text("✕"))
                        .style(button::text)
                        .on_press(Message::ClosePreview),
                ]
                .align_y(Alignment::Center),
                text(format!(
                    "{} · {}",
                    capitalize(&wallpaper.category),
                    wallpaper.device_type.badge()
                ))
                .size(14),
                picture,
                row![
                    text(preview.downloads_label()).size(14),
                    horizontal_space(),
                    button(text("⬇ Download"))
                        .style(button::primary)
                        .on_press(Message::DownloadFromPreview),
                ]
                .align_y(Alignment::Center),
            ]
            .spacing(12)
            .width(Length::Fixed(width)),
        )
        .padding(20)
        .style(panel)
        .into()
    }

    fn view_confirm<'a>(&'a self, target: &'a DownloadTarget) -> Element<'a, Message> {
        let proceed = button(text("Proceed to download"))
            .style(button::primary)
            .on_press_maybe(self.gate.can_proceed().then_some(Message::ProceedDownload));

        container(
            column![
                text("Before you download").size(22),
                text(format!(
                    "\"{}\" is free. Please follow us on Instagram to support new wallpapers.",
                    target.title
                )),
                button(text("📸 Follow Instagram")).on_press(Message::FollowInstagram),
                checkbox("I have followed on Instagram", self.gate.can_proceed())
                    .on_toggle(Message::AcknowledgeFollow),
                row![
                    button(text("Cancel"))
                        .style(button::secondary)
                        .on_press(Message::CancelDownload),
                    horizontal_space(),
                    proceed,
                ],
            ]
            .spacing(14)
            .width(Length::Fixed(420.0)),
        )
        .padding(24)
        .style(panel)
        .into()
    }
}

fn loading_label(device: DeviceType) -> String {
    format!("Loading {} wallpapers...", device.badge())
}

fn handle_key(key: keyboard::Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    use keyboard::key::Named;

    match key {
        keyboard::Key::Named(Named::ArrowLeft) => Some(Message::CarouselStep(-1)),
        keyboard::Key::Named(Named::ArrowRight) => Some(Message::CarouselStep(1)),
        keyboard::Key::Named(Named::Escape) => Some(Message::Escape),
        _ => None,
    }
}

/// Fetch a full-resolution image and decode it off the UI thread
async fn load_preview(client: GalleryClient, filename: String) -> Result<Handle, ApiError> {
    let bytes = client.image_bytes(&filename).await?;

    tokio::task::spawn_blocking(move || -> Result<Handle, ApiError> {
        let decoded = image::load_from_memory(&bytes)?.to_rgba8();
        let (width, height) = decoded.dimensions();
        Ok(Handle::from_rgba(width, height, decoded.into_raw()))
    })
    .await
    .map_err(|e| ApiError::Image(format!("decode task failed: {}", e)))?
}
