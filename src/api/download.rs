/// Saving downloaded wallpapers to disk
///
/// The server names downloads `<category>-<suffix>.<ext>` through
/// `Content-Disposition`. Names with non-ASCII characters arrive in the
/// RFC 5987 `filename*=UTF-8''…` form, which wins over the plain form.
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};

use crate::error::ApiError;

/// Extract the suggested filename from a `Content-Disposition` header value
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for param in header.split(';').map(str::trim) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                // charset'language'percent-encoded-value
                extended = value
                    .trim()
                    .splitn(3, '\'')
                    .nth(2)
                    .and_then(|encoded| percent_decode_str(encoded).decode_utf8().ok())
                    .map(|name| name.into_owned());
            }
            "filename" => {
                plain = Some(value.trim().trim_matches('"').to_string());
            }
            _ => {}
        }
    }

    extended.or(plain).filter(|name| !name.is_empty())
}

/// Reduce a server-suggested name to a single safe path component
pub fn sanitize_filename(name: &str) -> String {
    let last = name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();
    let cleaned: String = last
        .chars()
        .map(|c| if c.is_control() || matches!(c, ':' | '*' | '?' | '"' | '<' | '>' | '|') { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim().trim_start_matches('.').to_string();

    if cleaned.is_empty() {
        "wallpaper".to_string()
    } else {
        cleaned
    }
}

/// First path in `dir` for `name` that does not exist yet.
///
/// `photo.jpg` becomes `photo (1).jpg`, `photo (2).jpg`, ...
pub fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };

    (1u32..)
        .map(|n| match ext {
            Some(ext) => dir.join(format!("{} ({}).{}", stem, n, ext)),
            None => dir.join(format!("{} ({})", stem, n)),
        })
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Write `bytes` into `dir` under a non-colliding version of `name`
pub async fn save(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, ApiError> {
    tokio::fs::create_dir_all(dir).await?;
    let path = unique_path(dir, name);
    tokio::fs::write(&path, bytes).await?;

    tracing::info!(path = %path.display(), size = bytes.len(), "💾 saved download");
    Ok(path)
}
