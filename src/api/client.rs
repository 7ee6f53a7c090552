use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use super::download;
use crate::error::ApiError;
use crate::state::data::{
    ActivityEntry, ActivityFilter, DeviceType, Stats, Wallpaper, WallpaperId,
};
use crate::state::upload::StagedFile;

/// Everything a device switch renders, fetched together
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSnapshot {
    pub wallpapers: Vec<Wallpaper>,
    pub popular: Vec<Wallpaper>,
    pub stats: Stats,
}

/// Payload for the multipart upload form
#[derive(Debug, Clone)]
pub struct UploadSubmission {
    pub secret: String,
    pub title: String,
    pub category: String,
    pub device: DeviceType,
    pub files: Vec<StagedFile>,
}

/// What the server told us about an accepted upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadReceipt {
    pub status: u16,
    pub file_count: usize,
}

#[derive(Debug, Serialize)]
struct TrackRequest<'a> {
    wallpaper_id: &'a WallpaperId,
}

#[derive(Debug, Deserialize)]
struct TrackResponse {
    #[serde(default)]
    success: bool,
}

/// Typed client for the gallery REST API
#[derive(Debug, Clone)]
pub struct GalleryClient {
    http: Client,
    base: Url,
}

impl GalleryClient {
    /// Build a client rooted at `base` (query and fragment are ignored)
    pub fn new(mut base: Url, timeout: Duration) -> Result<Self, ApiError> {
        if base.cannot_be_a_base() {
            return Err(ApiError::Url(format!("{} cannot be a base url", base)));
        }
        base.set_query(None);
        base.set_fragment(None);
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("wallpaper-gallery/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path)?)
    }

    /// Base joined with literal segments; each segment is percent-encoded
    fn segments_url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL of a wallpaper's full-resolution static asset
    pub fn asset_url(&self, filename: &str) -> Result<Url, ApiError> {
        self.segments_url(&["static", "wallpapers", filename])
    }

    /// URL the download endpoint serves a wallpaper from
    pub fn download_url(&self, filename: &str) -> Result<Url, ApiError> {
        self.segments_url(&["download", filename])
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, ?query, "GET");

        let response = self.http.get(url).query(query).send().await?;
        let response = ensure_success(response)?;

        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("{}: {}", path, e)))
    }

    /// `GET /api/wallpapers` filtered by device and category ("all" for none)
    pub async fn wallpapers(
        &self,
        device: DeviceType,
        category: &str,
    ) -> Result<Vec<Wallpaper>, ApiError> {
        self.get_json(
            "api/wallpapers",
            &[("device", device.as_str()), ("category", category)],
        )
        .await
    }

    /// `GET /api/popular`, already ordered by the server
    pub async fn popular(&self, device: DeviceType) -> Result<Vec<Wallpaper>, ApiError> {
        self.get_json("api/popular", &[("device", device.as_str())]).await
    }

    pub async fn stats(&self, device: DeviceType) -> Result<Stats, ApiError> {
        self.get_json("api/stats", &[("device", device.as_str())]).await
    }

    pub async fn activity(
        &self,
        filter: ActivityFilter,
        device: DeviceType,
    ) -> Result<Vec<ActivityEntry>, ApiError> {
        self.get_json(
            "api/activity",
            &[("type", filter.as_str()), ("device", device.as_str())],
        )
        .await
    }

    /// Fetch wallpapers, popular and stats concurrently.
    ///
    /// All three must succeed; the first failure wins and nothing is returned.
    pub async fn device_snapshot(
        &self,
        device: DeviceType,
        category: &str,
    ) -> Result<DeviceSnapshot, ApiError> {
        let (wallpapers, popular, stats) = tokio::try_join!(
            self.wallpapers(device, category),
            self.popular(device),
            self.stats(device),
        )?;

        Ok(DeviceSnapshot { wallpapers, popular, stats })
    }

    /// `POST /api/track-download`. Returns the server's `success` flag.
    pub async fn track_download(&self, id: &WallpaperId) -> Result<bool, ApiError> {
        let url = self.endpoint("api/track-download")?;
        let response = self
            .http
            .post(url)
            .json(&TrackRequest { wallpaper_id: id })
            .send()
            .await?;
        let response = ensure_success(response)?;

        let body: TrackResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("api/track-download: {}", e)))?;
        Ok(body.success)
    }

    /// Raw bytes of a wallpaper's static asset
    pub async fn image_bytes(&self, filename: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.asset_url(filename)?;
        let response = ensure_success(self.http.get(url).send().await?)?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Fetch `/download/{filename}` and write it into `dest_dir`.
    ///
    /// The saved name comes from `Content-Disposition` when the server sends
    /// one. Returns the path written.
    pub async fn download(&self, filename: &str, dest_dir: &Path) -> Result<PathBuf, ApiError> {
        let url = self.download_url(filename)?;
        let response = ensure_success(self.http.get(url).send().await?)?;

        let suggested = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(download::filename_from_disposition);
        let name = download::sanitize_filename(suggested.as_deref().unwrap_or(filename));

        let bytes = response.bytes().await?;
        download::save(dest_dir, &name, &bytes).await
    }

    /// `POST /upload?secret=…` with every staged file under `files`
    pub async fn upload(&self, submission: UploadSubmission) -> Result<UploadReceipt, ApiError> {
        let mut url = self.endpoint("upload")?;
        url.query_pairs_mut().append_pair("secret", &submission.secret);

        let file_count = submission.files.len();
        let mut form = Form::new()
            .text("title", submission.title)
            .text("category", submission.category)
            .text("device_type", submission.device.as_str());

        for file in &submission.files {
            let bytes = tokio::fs::read(&file.path).await?;
            let part = Part::bytes(bytes)
                .file_name(file.name.clone())
                .mime_str(&file.mime)
                .map_err(|e| ApiError::Io(format!("{}: {}", file.name, e)))?;
            form = form.part("files", part);
        }

        tracing::info!(files = file_count, "submitting upload form");
        let response = self.http.post(url).multipart(form).send().await?;
        let response = ensure_success(response)?;

        Ok(UploadReceipt {
            status: response.status().as_u16(),
            file_count,
        })
    }
}

/// Turn non-2xx responses into `ApiError::Status`
fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status: StatusCode = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            endpoint: response.url().path().to_string(),
            status: status.as_u16(),
        })
    }
}
