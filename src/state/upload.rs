/// Staged files for the upload widget
///
/// Files picked or dropped by the user are validated and held here until the
/// form is submitted. The staged list is the only source of the submission
/// payload, so removing or clearing entries is all it takes to keep the
/// eventual upload in sync with what the user sees.
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

use super::data::DeviceType;

/// Maximum number of files staged at once
pub const MAX_STAGED_FILES: usize = 10;

/// Per-file size limit (10 MiB)
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// MIME types the backend accepts
pub const ALLOWED_MIME_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/jpg", "image/webp"];

/// Delay between consecutive rows starting their simulated upload
pub const PROGRESS_STAGGER: Duration = Duration::from_millis(300);
/// Base time a row spends "Uploading" before it reads "Complete"
pub const PROGRESS_COMPLETE_AFTER: Duration = Duration::from_millis(1000);
/// Extra per-row time added to the "Uploading" phase
pub const PROGRESS_COMPLETE_STAGGER: Duration = Duration::from_millis(200);
/// Delay between starting the progress display and posting the form
pub const SUBMIT_DELAY: Duration = Duration::from_millis(1000);

/// A file selected by the user but not yet submitted
#[derive(Debug, Clone, PartialEq)]
pub struct StagedFile {
    /// Location on disk, read at submission time
    pub path: PathBuf,
    /// File name as shown to the user and sent to the server
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Extension-derived MIME type
    pub mime: String,
}

impl StagedFile {
    pub fn new(path: PathBuf, name: String, size: u64, mime: String) -> Self {
        Self { path, name, size, mime }
    }

    /// Build a staged file from disk metadata
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a regular file",
            ));
        }

        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        Ok(Self::new(
            path.to_path_buf(),
            name,
            metadata.len(),
            mime_for_path(path),
        ))
    }

    /// Size formatted the way the preview grid shows it ("4.20 MB")
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size as f64 / 1024.0 / 1024.0)
    }

    fn same_file(&self, other: &StagedFile) -> bool {
        self.name == other.name && self.size == other.size
    }
}

/// MIME type from the file extension, like a browser's `File.type`
pub fn mime_for_path(path: &Path) -> String {
    image::ImageFormat::from_path(path)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| "application/octet-stream".to_string())
}

/// Why a candidate (or a whole selection) was not staged
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("Too many files selected. Maximum {max} files allowed at once.")]
    TooMany { max: usize },

    #[error("❌ Invalid file type: {name}. Please select PNG, JPG, JPEG, or WEBP files.")]
    InvalidType { name: String },

    #[error("⚠️ File too large: {name}. Please select files under 10MB.")]
    TooLarge { name: String },

    #[error("Could not read {name}: {reason}")]
    Unreadable { name: String, reason: String },
}

/// Result of one selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageOutcome {
    /// Files appended to the staged list
    pub added: usize,
    /// Candidates dropped because the same (name, size) is already staged
    pub duplicates: usize,
    /// One entry per violation
    pub rejected: Vec<Rejection>,
}

/// Ordered list of staged files; insertion order is upload order
#[derive(Debug, Clone, Default)]
pub struct Staging {
    files: Vec<StagedFile>,
}

impl Staging {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Validate a selection and append the files that pass.
    ///
    /// Duplicates of staged files (or of earlier candidates) are discarded
    /// first. If the remainder would push the list past `MAX_STAGED_FILES`
    /// the whole selection is rejected. Otherwise type and size are checked
    /// per file and only the offending files are skipped.
    pub fn stage(&mut self, candidates: Vec<StagedFile>) -> StageOutcome {
        let mut outcome = StageOutcome::default();

        let mut fresh: Vec<StagedFile> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let seen = self
                .files
                .iter()
                .chain(fresh.iter())
                .any(|staged| staged.same_file(&candidate));
            if seen {
                outcome.duplicates += 1;
            } else {
                fresh.push(candidate);
            }
        }

        if self.files.len() + fresh.len() > MAX_STAGED_FILES {
            outcome.rejected.push(Rejection::TooMany { max: MAX_STAGED_FILES });
            return outcome;
        }

        for file in fresh {
            if !ALLOWED_MIME_TYPES.contains(&file.mime.as_str()) {
                outcome.rejected.push(Rejection::InvalidType { name: file.name });
            } else if file.size > MAX_FILE_SIZE {
                outcome.rejected.push(Rejection::TooLarge { name: file.name });
            } else {
                self.files.push(file);
                outcome.added += 1;
            }
        }

        outcome
    }

    /// Remove the entry at `index`, if it exists
    pub fn remove(&mut self, index: usize) -> Option<StagedFile> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    /// Drop every staged file; returns how many were removed
    pub fn clear(&mut self) -> usize {
        let count = self.files.len();
        self.files.clear();
        count
    }
}

/// Text fields submitted alongside the files
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    pub title: String,
    pub category: String,
    pub device: Option<DeviceType>,
    pub secret: String,
}

impl FormFields {
    /// The server refuses uploads without title, category and device type
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.category.trim().is_empty() && self.device.is_some()
    }
}

/// Display state of one row in the progress panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Preparing,
    Uploading,
    Complete,
}

impl RowStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RowStatus::Preparing => "Preparing...",
            RowStatus::Uploading => "Uploading...",
            RowStatus::Complete => "Complete ✅",
        }
    }

    /// Fill of the row's bar
    pub fn fill(&self) -> f32 {
        match self {
            RowStatus::Preparing => 0.0,
            RowStatus::Uploading | RowStatus::Complete => 100.0,
        }
    }
}

/// Status of row `index` after `elapsed` since the panel appeared
pub fn row_status_at(index: usize, elapsed: Duration) -> RowStatus {
    let index = index as u32;
    let starts = PROGRESS_STAGGER * index;
    let completes = starts + PROGRESS_COMPLETE_AFTER + PROGRESS_COMPLETE_STAGGER * index;

    if elapsed >= completes {
        RowStatus::Complete
    } else if elapsed >= starts {
        RowStatus::Uploading
    } else {
        RowStatus::Preparing
    }
}

/// Simulated per-file progress.
///
/// Purely cosmetic: the rows advance on a fixed schedule and say nothing
/// about bytes actually sent.
#[derive(Debug, Clone)]
pub struct UploadProgress {
    names: Vec<String>,
    started: Instant,
}

impl UploadProgress {
    pub fn start(files: &[StagedFile], now: Instant) -> Self {
        Self {
            names: files.iter().map(|f| f.name.clone()).collect(),
            started: now,
        }
    }

    pub fn rows(&self, now: Instant) -> Vec<(&str, RowStatus)> {
        let elapsed = now.saturating_duration_since(self.started);
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| (name.as_str(), row_status_at(index, elapsed)))
            .collect()
    }

    /// True once every row reads "Complete"
    pub fn is_settled(&self, now: Instant) -> bool {
        self.rows(now)
            .iter()
            .all(|(_, status)| *status == RowStatus::Complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str, size: u64) -> StagedFile {
        StagedFile::new(PathBuf::from(name), name.to_string(), size, "image/png".to_string())
    }

    #[test]
    fn test_eleven_files_rejected_wholesale() {
        let mut staging = Staging::new();
        let batch: Vec<_> = (0..11).map(|i| png(&format!("{i}.png"), 100)).collect();

        let outcome = staging.stage(batch);

        assert_eq!(outcome.added, 0);
        assert_eq!(outcome.rejected, vec![Rejection::TooMany { max: 10 }]);
        assert!(staging.is_empty());
    }

    #[test]
    fn test_batch_exceeding_remaining_room_is_rejected() {
        let mut staging = Staging::new();
        staging.stage((0..8).map(|i| png(&format!("{i}.png"), 1)).collect());

        let outcome = staging.stage((8..11).map(|i| png(&format!("{i}.png"), 1)).collect());

        assert_eq!(outcome.added, 0);
        assert_eq!(staging.len(), 8);
    }

    #[test]
    fn test_non_image_yields_one_error() {
        let mut staging = Staging::new();
        let pdf = StagedFile::new("doc.pdf".into(), "doc.pdf".into(), 10, "application/pdf".into());

        let outcome = staging.stage(vec![pdf]);

        assert_eq!(outcome.added, 0);
        assert_eq!(outcome.rejected.len(), 1);
        assert!(matches!(outcome.rejected[0], Rejection::InvalidType { .. }));
    }

    #[test]
    fn test_valid_five_megabyte_png_is_added() {
        let mut staging = Staging::new();
        let outcome = staging.stage(vec![png("big.png", 5 * 1024 * 1024)]);

        assert_eq!(outcome.added, 1);
        assert_eq!(staging.len(), 1);
    }

    #[test]
    fn test_oversized_file_skipped_others_kept() {
        let mut staging = Staging::new();
        let outcome = staging.stage(vec![
            png("ok.png", 1024),
            png("huge.png", MAX_FILE_SIZE + 1),
            png("ok2.png", 2048),
        ]);

        assert_eq!(outcome.added, 2);
        assert_eq!(outcome.rejected, vec![Rejection::TooLarge { name: "huge.png".into() }]);
        let names: Vec<_> = staging.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["ok.png", "ok2.png"]);
    }

    #[test]
    fn test_same_file_twice_is_staged_once() {
        let mut staging = Staging::new();
        staging.stage(vec![png("a.png", 42)]);
        let outcome = staging.stage(vec![png("a.png", 42)]);

        assert_eq!(outcome.added, 0);
        assert_eq!(outcome.duplicates, 1);
        assert_eq!(staging.len(), 1);

        // same name, different size is a different file
        staging.stage(vec![png("a.png", 43)]);
        assert_eq!(staging.len(), 2);
    }

    #[test]
    fn test_duplicates_within_one_batch() {
        let mut staging = Staging::new();
        let outcome = staging.stage(vec![png("a.png", 1), png("a.png", 1)]);

        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.duplicates, 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut staging = Staging::new();
        staging.stage(vec![png("a.png", 1), png("b.png", 2), png("c.png", 3)]);

        assert_eq!(staging.remove(1).map(|f| f.name), Some("b.png".to_string()));
        assert_eq!(staging.remove(5), None);
        let names: Vec<_> = staging.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "c.png"]);

        assert_eq!(staging.clear(), 2);
        assert!(staging.is_empty());
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_for_path(Path::new("x.PNG")), "image/png");
        assert_eq!(mime_for_path(Path::new("x.jpg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("x.webp")), "image/webp");
        assert_eq!(mime_for_path(Path::new("x.txt")), "application/octet-stream");
    }

    #[test]
    fn test_from_path_reads_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();

        let staged = StagedFile::from_path(&path).unwrap();
        assert_eq!(staged.name, "shot.png");
        assert_eq!(staged.size, 2048);
        assert_eq!(staged.mime, "image/png");
        assert_eq!(staged.size_label(), "0.00 MB");

        assert!(StagedFile::from_path(dir.path()).is_err());
    }

    #[test]
    fn test_progress_schedule() {
        let ms = Duration::from_millis;

        assert_eq!(row_status_at(0, ms(0)), RowStatus::Uploading);
        assert_eq!(row_status_at(0, ms(999)), RowStatus::Uploading);
        assert_eq!(row_status_at(0, ms(1000)), RowStatus::Complete);

        // row 2 starts at 600ms and completes at 600 + 1000 + 400
        assert_eq!(row_status_at(2, ms(599)), RowStatus::Preparing);
        assert_eq!(row_status_at(2, ms(600)), RowStatus::Uploading);
        assert_eq!(row_status_at(2, ms(1999)), RowStatus::Uploading);
        assert_eq!(row_status_at(2, ms(2000)), RowStatus::Complete);
    }

    #[test]
    fn test_progress_settles() {
        let start = Instant::now();
        let files = vec![png("a.png", 1), png("b.png", 1)];
        let progress = UploadProgress::start(&files, start);

        assert!(!progress.is_settled(start));
        assert!(progress.is_settled(start + Duration::from_millis(1500)));
    }

    #[test]
    fn test_form_fields_completeness() {
        let mut fields = FormFields::default();
        assert!(!fields.is_complete());

        fields.title = "Night".into();
        fields.category = "amoled".into();
        assert!(!fields.is_complete());

        fields.device = Some(DeviceType::Pc);
        assert!(fields.is_complete());
    }
}
