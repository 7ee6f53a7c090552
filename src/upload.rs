/// Upload widget
///
/// Collects files from the native picker or from window drops, validates
/// them into the staged list, previews them, and submits the staged list as
/// one multipart form. The per-row progress panel is a timed animation, not
/// a transfer meter.
use iced::event::{self, Event};
use iced::widget::image::Handle;
use iced::widget::{
    button, column, container, horizontal_space, pick_list, progress_bar, row, scrollable,
    text, text_input, Column,
};
use iced::{time, window, Alignment, Background, Border, ContentFit, Element, Length, Pixels};
use iced::{Subscription, Task, Theme};
use iced_aw::Wrap;
use rfd::FileDialog;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::api::{GalleryClient, UploadReceipt, UploadSubmission};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::state::data::DeviceType;
use crate::state::notify::{Level, Notifications, DEFAULT_DURATION};
use crate::state::upload::{
    FormFields, Rejection, StagedFile, Staging, UploadProgress, MAX_STAGED_FILES, SUBMIT_DELAY,
};
use crate::ui::notifications;

/// Drops arriving within this window are validated as one selection
const DROP_BATCH_WINDOW: Duration = Duration::from_millis(50);

/// Progress panel redraw period
const FRAME: Duration = Duration::from_millis(50);

/// How long validation errors stay up
const REJECTION_DURATION: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone)]
pub enum Message {
    PickFiles,
    FilesHovered,
    FilesHoveredLeft,
    FileDropped(PathBuf),
    FlushDrops,
    RemoveFile(usize),
    ClearAll,

    TitleChanged(String),
    CategoryChanged(String),
    DeviceSelected(DeviceType),
    SecretChanged(String),

    Submit,
    SendUpload,
    Submitted(Result<UploadReceipt, ApiError>),

    DismissNotification(u64),
    Frame(Instant),
}

pub struct UploadWidget {
    client: GalleryClient,
    staging: Staging,
    fields: FormFields,
    /// Files are hovering over the window
    drag_over: bool,
    /// Drops waiting for the batch window to close
    pending_drops: Vec<PathBuf>,
    submitting: bool,
    progress: Option<UploadProgress>,
    notifications: Notifications,
}

impl UploadWidget {
    pub fn new(config: &AppConfig, client: GalleryClient) -> Self {
        Self {
            client,
            staging: Staging::new(),
            fields: FormFields {
                secret: config.upload_secret.clone(),
                ..FormFields::default()
            },
            drag_over: false,
            pending_drops: Vec::new(),
            submitting: false,
            progress: None,
            notifications: Notifications::new(),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let now = Instant::now();

        match message {
            Message::PickFiles => {
                if self.refuse_while_submitting(now) {
                    return Task::none();
                }
                let picked = FileDialog::new()
                    .set_title("Select wallpapers to upload")
                    .add_filter("Images", &["png", "jpg", "jpeg", "webp"])
                    .pick_files();

                if let Some(paths) = picked {
                    self.stage_paths(paths, now);
                }
                Task::none()
            }
            Message::FilesHovered => {
                self.drag_over = true;
                Task::none()
            }
            Message::FilesHoveredLeft => {
                self.drag_over = false;
                Task::none()
            }
            Message::FileDropped(path) => {
                self.drag_over = false;
                if self.refuse_while_submitting(now) {
                    return Task::none();
                }
                let first = self.pending_drops.is_empty();
                self.pending_drops.push(path);

                if first {
                    Task::perform(
                        async { tokio::time::sleep(DROP_BATCH_WINDOW).await },
                        |_| Message::FlushDrops,
                    )
                } else {
                    Task::none()
                }
            }
            Message::FlushDrops => {
                // held until the upload settles so the sent set stays fixed
                if self.submitting {
                    return Task::none();
                }
                let paths = std::mem::take(&mut self.pending_drops);
                if !paths.is_empty() {
                    self.stage_paths(paths, now);
                }
                Task::none()
            }
            Message::RemoveFile(index) => {
                if self.refuse_while_submitting(now) {
                    return Task::none();
                }
                if let Some(file) = self.staging.remove(index) {
                    tracing::debug!(name = %file.name, "unstaged file");
                    self.notifications.toast(
                        Level::Info,
                        format!("Removed {} 🗑️", file.name),
                        Duration::from_millis(2000),
                        now,
                    );
                }
                Task::none()
            }
            Message::ClearAll => {
                if self.refuse_while_submitting(now) {
                    return Task::none();
                }
                let cleared = self.staging.clear();
                if cleared > 0 {
                    self.notifications.toast(
                        Level::Info,
                        format!("Cleared {} file(s) 🧹", cleared),
                        Duration::from_millis(2000),
                        now,
                    );
                }
                Task::none()
            }

            Message::TitleChanged(title) => {
                self.fields.title = title;
                Task::none()
            }
            Message::CategoryChanged(category) => {
                self.fields.category = category;
                Task::none()
            }
            Message::DeviceSelected(device) => {
                self.fields.device = Some(device);
                Task::none()
            }
            Message::SecretChanged(secret) => {
                self.fields.secret = secret;
                Task::none()
            }

            Message::Submit => self.submit(now),
            Message::SendUpload => match self.submission() {
                Some(submission) => {
                    let client = self.client.clone();
                    Task::perform(async move { client.upload(submission).await }, Message::Submitted)
                }
                None => {
                    self.submitting = false;
                    self.progress = None;
                    Task::none()
                }
            },
            Message::Submitted(result) => {
                self.submitted(result, now);
                Task::none()
            }

            Message::DismissNotification(id) => {
                self.notifications.dismiss(id);
                Task::none()
            }
            Message::Frame(now) => {
                self.notifications.prune(now);
                if !self.submitting && self.progress.as_ref().is_some_and(|p| p.is_settled(now)) {
                    self.progress = None;
                }
                Task::none()
            }
        }
    }

    /// The staged list is frozen while an upload is in flight
    fn refuse_while_submitting(&mut self, now: Instant) -> bool {
        if self.submitting {
            self.notifications.toast(
                Level::Info,
                "Upload in progress, the file list is locked ⏳",
                Duration::from_millis(2000),
                now,
            );
        }
        self.submitting
    }

    /// Validate a selection and report every outcome
    fn stage_paths(&mut self, paths: Vec<PathBuf>, now: Instant) {
        let mut unreadable = Vec::new();
        let candidates: Vec<StagedFile> = paths
            .iter()
            .filter_map(|path| match StagedFile::from_path(path) {
                Ok(file) => Some(file),
                Err(err) => {
                    unreadable.push(Rejection::Unreadable {
                        name: path.display().to_string(),
                        reason: err.to_string(),
                    });
                    None
                }
            })
            .collect();

        let outcome = self.staging.stage(candidates);
        tracing::info!(
            added = outcome.added,
            duplicates = outcome.duplicates,
            rejected = outcome.rejected.len() + unreadable.len(),
            staged = self.staging.len(),
            "📁 selection processed"
        );

        for rejection in unreadable.iter().chain(outcome.rejected.iter()) {
            self.notifications
                .message(Level::Error, rejection.to_string(), REJECTION_DURATION, now);
        }
        if outcome.duplicates > 0 {
            self.notifications.toast(
                Level::Info,
                format!("Skipped {} duplicate file(s)", outcome.duplicates),
                DEFAULT_DURATION,
                now,
            );
        }
        if outcome.added > 0 {
            self.notifications.toast(
                Level::Success,
                format!("{} file(s) selected successfully! 📁", outcome.added),
                Duration::from_millis(2000),
                now,
            );
        }
    }

    fn submit(&mut self, now: Instant) -> Task<Message> {
        if self.submitting {
            return Task::none();
        }
        if self.staging.is_empty() {
            self.notifications.message(
                Level::Error,
                "❌ Please select at least one file to upload.",
                DEFAULT_DURATION,
                now,
            );
            return Task::none();
        }
        if !self.fields.is_complete() {
            self.notifications.message(
                Level::Error,
                "Title, category, and device type are required",
                DEFAULT_DURATION,
                now,
            );
            return Task::none();
        }

        let count = self.staging.len();
        self.submitting = true;
        self.progress = Some(UploadProgress::start(self.staging.files(), now));
        self.notifications.message(
            Level::Info,
            format!("📤 Uploading {} wallpaper(s)... Please wait.", count),
            DEFAULT_DURATION,
            now,
        );
        self.notifications.toast(
            Level::Info,
            format!("Upload in progress... ⏳ ({} files)", count),
            DEFAULT_DURATION,
            now,
        );

        Task::perform(async { tokio::time::sleep(SUBMIT_DELAY).await }, |_| {
            Message::SendUpload
        })
    }

    /// The form as it would be sent right now
    fn submission(&self) -> Option<UploadSubmission> {
        Some(UploadSubmission {
            secret: self.fields.secret.clone(),
            title: self.fields.title.trim().to_string(),
            category: self.fields.category.trim().to_string(),
            device: self.fields.device?,
            files: self.staging.files().to_vec(),
        })
    }

    fn submitted(&mut self, result: Result<UploadReceipt, ApiError>, now: Instant) {
        self.submitting = false;

        match result {
            Ok(receipt) => {
                tracing::info!(status = receipt.status, files = receipt.file_count, "✅ upload accepted");
                self.staging.clear();
                self.notifications.message(
                    Level::Success,
                    format!("✅ Successfully uploaded {} wallpaper(s)!", receipt.file_count),
                    REJECTION_DURATION,
                    now,
                );
            }
            Err(ApiError::Status { status: 403, .. }) => {
                self.progress = None;
                self.notifications.message(
                    Level::Error,
                    "Upload rejected: invalid secret 🔒",
                    REJECTION_DURATION,
                    now,
                );
            }
            Err(err) => {
                tracing::error!("❌ upload failed: {}", err);
                self.progress = None;
                self.notifications.message(
                    Level::Error,
                    format!("Upload failed: {}", err),
                    REJECTION_DURATION,
                    now,
                );
            }
        }

        let held = std::mem::take(&mut self.pending_drops);
        if !held.is_empty() {
            self.stage_paths(held, now);
        }
    }

    /// Window file events while the upload page has focus
    pub fn subscription(&self, focused: bool) -> Subscription<Message> {
        let mut subscriptions = Vec::new();
        if focused {
            subscriptions.push(event::listen_with(file_event));
        }
        if self.progress.is_some() || !self.notifications.is_empty() {
            subscriptions.push(time::every(FRAME).map(Message::Frame));
        }
        Subscription::batch(subscriptions)
    }

    pub fn view(&self) -> Element<'_, Message> {
        let now = Instant::now();

        let form = column![
            text_input("Title", &self.fields.title).on_input(Message::TitleChanged),
            text_input("Category (e.g. nature)", &self.fields.category)
                .on_input(Message::CategoryChanged),
            pick_list(DeviceType::ALL, self.fields.device, Message::DeviceSelected)
                .placeholder("Device type"),
            text_input("Upload secret", &self.fields.secret)
                .secure(true)
                .on_input(Message::SecretChanged),
        ]
        .spacing(10)
        .width(Length::Fixed(420.0));

        let highlighted = self.drag_over;
        let drop_zone = container(
            column![
                text(if highlighted {
                    "Drop to add files"
                } else {
                    "Drag & drop images here"
                })
                .size(18),
                text(format!(
                    "PNG, JPG, JPEG or WEBP · up to 10 MB each · at most {} files",
                    MAX_STAGED_FILES
                ))
                .size(13),
                button(text("📁 Browse files"))
                    .on_press_maybe((!self.submitting).then_some(Message::PickFiles)),
            ]
            .spacing(10)
            .align_x(Alignment::Center),
        )
        .padding(30)
        .center_x(Length::Fill)
        .style(move |theme: &Theme| {
            let palette = theme.extended_palette();
            container::Style {
                background: highlighted.then(|| Background::Color(palette.primary.weak.color)),
                border: Border {
                    width: 2.0,
                    radius: 10.0.into(),
                    color: if highlighted {
                        palette.primary.strong.color
                    } else {
                        palette.background.strong.color
                    },
                },
                ..container::Style::default()
            }
        });

        let submit = button(text(if self.submitting { "Uploading..." } else { "⬆ Upload" }))
            .style(button::primary)
            .padding([10, 24])
            .on_press_maybe((!self.submitting).then_some(Message::Submit));

        let mut content = Column::new()
            .spacing(20)
            .padding(24)
            .push(text("⬆ Upload Wallpapers").size(30))
            .push(notifications::messages(&self.notifications, Message::DismissNotification))
            .push(form)
            .push(drop_zone)
            .push(self.view_staged())
            .push(submit);

        if let Some(progress) = &self.progress {
            content = content.push(view_progress(progress, now));
        }

        column![
            scrollable(content).height(Length::Fill),
            container(notifications::toasts(&self.notifications)).padding(16),
        ]
        .into()
    }

    fn view_staged(&self) -> Element<'_, Message> {
        if self.staging.is_empty() {
            return Column::new().into();
        }

        let previews = self
            .staging
            .files()
            .iter()
            .enumerate()
            .map(|(index, file)| {
                container(
                    column![
                        row![
                            horizontal_space(),
                            button(text("✕").size(12))
                                .style(button::danger)
                                .on_press_maybe(
                                    (!self.submitting).then_some(Message::RemoveFile(index)),
                                ),
                        ],
                        iced::widget::image(Handle::from_path(&file.path))
                            .width(Length::Fixed(140.0))
                            .height(Length::Fixed(140.0))
                            .content_fit(ContentFit::Cover),
                        text(file.name.as_str()).size(12),
                        text(file.size_label()).size(12),
                    ]
                    .spacing(4)
                    .width(Length::Fixed(140.0)),
                )
                .padding(8)
                .style(container::bordered_box)
                .into()
            })
            .collect();

        column![
            row![
                text(format!("{} file(s) ready for upload", self.staging.len())),
                horizontal_space(),
                button(text("Clear all"))
                    .style(button::secondary)
                    .on_press_maybe((!self.submitting).then_some(Message::ClearAll)),
            ]
            .align_y(Alignment::Center),
            Wrap::with_elements(previews)
                .spacing(Pixels(12.0))
                .line_spacing(Pixels(12.0)),
        ]
        .spacing(10)
        .into()
    }
}

fn view_progress(progress: &UploadProgress, now: Instant) -> Element<'_, Message> {
    let rows = progress.rows(now).into_iter().map(|(name, status)| {
        row![
            text(name).size(13).width(Length::FillPortion(2)),
            progress_bar(0.0..=100.0, status.fill())
                .height(8)
                .width(Length::FillPortion(3)),
            text(status.label()).size(13).width(Length::FillPortion(1)),
        ]
        .spacing(10)
        .align_y(Alignment::Center)
        .into()
    });

    container(
        column![
            text("📤 Upload Progress (simulated)").size(18),
            Column::with_children(rows).spacing(6),
        ]
        .spacing(10),
    )
    .padding(16)
    .style(container::rounded_box)
    .into()
}

fn file_event(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::FileHovered(_)) => Some(Message::FilesHovered),
        Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
        Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use std::fs::File;
    use std::path::Path;
    use tempfile::TempDir;

    fn widget_for(server_url: &str) -> UploadWidget {
        let config = AppConfig::for_server(server_url, std::env::temp_dir());
        let client = GalleryClient::new(config.base_url(), config.request_timeout).unwrap();
        UploadWidget::new(&config, client)
    }

    fn offline_widget() -> UploadWidget {
        widget_for("http://127.0.0.1:1/")
    }

    /// Create a zero-filled file of `size` bytes
    fn fixture(dir: &Path, name: &str, size: u64) -> PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap().set_len(size).unwrap();
        path
    }

    /// Drop every path, then close the batch window
    fn drop_files(widget: &mut UploadWidget, paths: &[PathBuf]) {
        for path in paths {
            let _ = widget.update(Message::FileDropped(path.clone()));
        }
        let _ = widget.update(Message::FlushDrops);
    }

    fn fill_fields(widget: &mut UploadWidget) {
        let _ = widget.update(Message::TitleChanged("Night city".into()));
        let _ = widget.update(Message::CategoryChanged("City".into()));
        let _ = widget.update(Message::DeviceSelected(DeviceType::Pc));
    }

    #[test]
    fn test_valid_png_is_staged() {
        let dir = TempDir::new().unwrap();
        let png = fixture(dir.path(), "a.png", 5 * 1024 * 1024);
        let mut widget = offline_widget();

        drop_files(&mut widget, &[png]);

        assert_eq!(widget.staging.len(), 1);
        assert_eq!(widget.staging.files()[0].size_label(), "5.00 MB");
        assert!(widget.notifications.contains("1 file(s) selected successfully!"));
        assert!(widget.pending_drops.is_empty());
    }

    #[test]
    fn test_drops_are_batched() {
        let dir = TempDir::new().unwrap();
        let mut widget = offline_widget();
        let a = fixture(dir.path(), "a.png", 10);
        let b = fixture(dir.path(), "b.webp", 10);

        let _ = widget.update(Message::FileDropped(a));
        let _ = widget.update(Message::FileDropped(b));
        assert_eq!(widget.pending_drops.len(), 2);
        assert!(widget.staging.is_empty());

        let _ = widget.update(Message::FlushDrops);
        assert_eq!(widget.staging.len(), 2);
    }

    #[test]
    fn test_too_many_files_rejects_selection() {
        let dir = TempDir::new().unwrap();
        let paths: Vec<PathBuf> = (0..11)
            .map(|i| fixture(dir.path(), &format!("{}.png", i), 100 + i))
            .collect();
        let mut widget = offline_widget();

        drop_files(&mut widget, &paths);

        assert!(widget.staging.is_empty());
        assert!(widget.notifications.contains("Too many files selected"));
    }

    #[test]
    fn test_non_image_is_rejected() {
        let dir = TempDir::new().unwrap();
        let txt = fixture(dir.path(), "notes.txt", 10);
        let mut widget = offline_widget();

        drop_files(&mut widget, &[txt]);

        assert!(widget.staging.is_empty());
        assert_eq!(widget.notifications.messages().filter(|n| n.level == Level::Error).count(), 1);
        assert!(widget.notifications.contains("Invalid file type: notes.txt"));
    }

    #[test]
    fn test_duplicate_is_staged_once() {
        let dir = TempDir::new().unwrap();
        let png = fixture(dir.path(), "a.png", 2048);
        let mut widget = offline_widget();

        drop_files(&mut widget, &[png.clone()]);
        drop_files(&mut widget, &[png]);

        assert_eq!(widget.staging.len(), 1);
        assert!(widget.notifications.contains("Skipped 1 duplicate"));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut widget = offline_widget();

        drop_files(&mut widget, &[dir.path().join("gone.png")]);

        assert!(widget.staging.is_empty());
        assert!(widget.notifications.contains("Could not read"));
    }

    #[test]
    fn test_remove_and_clear() {
        let dir = TempDir::new().unwrap();
        let paths = vec![
            fixture(dir.path(), "a.png", 1),
            fixture(dir.path(), "b.png", 2),
            fixture(dir.path(), "c.png", 3),
        ];
        let mut widget = offline_widget();
        drop_files(&mut widget, &paths);

        let _ = widget.update(Message::RemoveFile(1));
        let names: Vec<&str> = widget.staging.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "c.png"]);

        let _ = widget.update(Message::RemoveFile(9));
        assert_eq!(widget.staging.len(), 2);

        let _ = widget.update(Message::ClearAll);
        assert!(widget.staging.is_empty());
        assert!(widget.notifications.contains("Cleared 2 file(s)"));
    }

    #[test]
    fn test_submit_without_files_is_refused() {
        let mut widget = offline_widget();
        fill_fields(&mut widget);

        let _ = widget.update(Message::Submit);

        assert!(!widget.submitting);
        assert!(widget.progress.is_none());
        assert!(widget.notifications.contains("Please select at least one file to upload"));
    }

    #[test]
    fn test_submit_requires_fields() {
        let dir = TempDir::new().unwrap();
        let mut widget = offline_widget();
        drop_files(&mut widget, &[fixture(dir.path(), "a.png", 10)]);

        let _ = widget.update(Message::Submit);

        assert!(!widget.submitting);
        assert!(widget.notifications.contains("Title, category, and device type are required"));
    }

    #[test]
    fn test_submit_starts_simulated_progress() {
        let dir = TempDir::new().unwrap();
        let mut widget = offline_widget();
        drop_files(
            &mut widget,
            &[fixture(dir.path(), "a.png", 10), fixture(dir.path(), "b.png", 20)],
        );
        fill_fields(&mut widget);

        let _ = widget.update(Message::Submit);

        assert!(widget.submitting);
        assert_eq!(widget.progress.as_ref().map(|p| p.rows(Instant::now()).len()), Some(2));
        assert!(widget.notifications.contains("Uploading 2 wallpaper(s)"));

        // a second click while submitting does nothing
        let _ = widget.update(Message::Submit);
        assert!(widget.submitting);
    }

    #[test]
    fn test_rejected_secret_keeps_staged_files() {
        let dir = TempDir::new().unwrap();
        let mut widget = offline_widget();
        drop_files(&mut widget, &[fixture(dir.path(), "a.png", 10)]);
        fill_fields(&mut widget);
        let _ = widget.update(Message::Submit);

        let _ = widget.update(Message::Submitted(Err(ApiError::Status {
            endpoint: "/upload".into(),
            status: 403,
        })));

        assert!(!widget.submitting);
        assert!(widget.progress.is_none());
        assert_eq!(widget.staging.len(), 1);
        assert!(widget.notifications.contains("Upload rejected: invalid secret"));
    }

    #[test]
    fn test_staged_list_is_locked_while_submitting() {
        let dir = TempDir::new().unwrap();
        let mut widget = offline_widget();
        drop_files(
            &mut widget,
            &[fixture(dir.path(), "a.png", 10), fixture(dir.path(), "b.png", 20)],
        );
        fill_fields(&mut widget);
        let _ = widget.update(Message::Submit);

        let _ = widget.update(Message::RemoveFile(0));
        let _ = widget.update(Message::ClearAll);
        drop_files(&mut widget, &[fixture(dir.path(), "c.png", 30)]);

        let rows = widget.progress.as_ref().map(|p| p.rows(Instant::now()).len());
        let sent = widget.submission().map(|s| s.files.len());
        assert_eq!(rows, Some(2));
        assert_eq!(sent, Some(2));
        assert!(widget.pending_drops.is_empty());
        assert!(widget.notifications.contains("file list is locked"));

        let _ = widget.update(Message::Submitted(Ok(UploadReceipt {
            status: 200,
            file_count: 2,
        })));
        assert!(widget.staging.is_empty());
    }

    #[test]
    fn test_drop_pending_at_submit_survives_success() {
        let dir = TempDir::new().unwrap();
        let mut widget = offline_widget();
        drop_files(&mut widget, &[fixture(dir.path(), "a.png", 10)]);
        fill_fields(&mut widget);

        // b.png lands just before the click, its batch closes mid-upload
        let _ = widget.update(Message::FileDropped(fixture(dir.path(), "b.png", 20)));
        let _ = widget.update(Message::Submit);
        let _ = widget.update(Message::FlushDrops);

        assert_eq!(widget.staging.len(), 1);
        assert_eq!(widget.pending_drops.len(), 1);

        let _ = widget.update(Message::Submitted(Ok(UploadReceipt {
            status: 200,
            file_count: 1,
        })));

        let names: Vec<&str> = widget.staging.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b.png"]);
        assert!(widget.pending_drops.is_empty());
    }

    #[tokio::test]
    async fn test_accepted_upload_clears_staged_list() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/upload")
            .match_query(Matcher::UrlEncoded("secret".into(), "s3cret".into()))
            .match_body(Matcher::Regex("name=\"title\"".into()))
            .with_status(200)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let mut widget = widget_for(&server.url());
        drop_files(&mut widget, &[fixture(dir.path(), "a.png", 10)]);
        fill_fields(&mut widget);
        let _ = widget.update(Message::Submit);

        let submission = widget.submission().unwrap();
        assert_eq!(submission.category, "City");
        assert_eq!(submission.device, DeviceType::Pc);
        assert_eq!(submission.files.len(), 1);

        let result = widget.client.upload(submission).await;
        let _ = widget.update(Message::Submitted(result));

        assert!(widget.staging.is_empty());
        assert!(!widget.submitting);
        assert!(widget.notifications.contains("Successfully uploaded 1 wallpaper(s)!"));
        mock.assert_async().await;
    }
}
