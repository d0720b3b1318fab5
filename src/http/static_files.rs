//! # Static File Server
//!
//! Activated only once a static mapping has been registered. Checked
//! after the route table misses: resolves a URL prefix to a filesystem
//! directory, blocks path traversal before ever touching the filesystem,
//! and caps served file size at 10 MiB.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::http::message::Response;

const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct StaticMapping {
    url_prefix: String,
    directory: PathBuf,
    default_file: String,
}

impl StaticMapping {
    pub fn new(url_prefix: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            url_prefix: url_prefix.into(),
            directory: directory.into(),
            default_file: "index.html".to_string(),
        }
    }

    pub fn with_default_file(mut self, filename: impl Into<String>) -> Self {
        self.default_file = filename.into();
        self
    }

    /// Attempts to serve `url_path`. Returns `None` if the path is outside
    /// this mapping's prefix — the caller should fall through to a 404 or
    /// another mapping; `Some(response)` otherwise, including 403/404/500.
    pub async fn try_serve(&self, url_path: &str) -> Option<Response> {
        if !url_path.starts_with(&self.url_prefix) {
            return None;
        }

        let relative = url_path[self.url_prefix.len()..].trim_start_matches('/');

        let relative = if relative.is_empty() || relative.ends_with('/') {
            format!("{relative}{}", self.default_file)
        } else {
            relative.to_string()
        };

        let file_path = self.directory.join(&relative);
        let file_path_str = file_path.to_string_lossy();

        if file_path_str.contains("..") {
            warn!("directory traversal blocked: {}", url_path);
            return Some(Response::forbidden().with_body("403 Forbidden".as_bytes().to_vec()));
        }

        let metadata = match tokio::fs::metadata(&file_path).await {
            Ok(metadata) => metadata,
            Err(_) => return Some(Response::not_found().with_body("404 Not Found".as_bytes().to_vec())),
        };

        if metadata.len() > MAX_FILE_SIZE {
            return Some(Response::internal_error().with_body(b"File too large".to_vec()));
        }

        let content = match tokio::fs::read(&file_path).await {
            Ok(content) => content,
            Err(_) => return Some(Response::internal_error().with_body(Vec::new())),
        };

        debug!("served static file: {} ({} bytes)", file_path_str, content.len());

        Some(
            Response::ok()
                .with_header("Content-Type", mime_type(&file_path_str))
                .with_body(content),
        )
    }
}

/// Selects a MIME type by file extension, falling back to
/// `application/octet-stream` for unrecognised or missing extensions.
pub fn mime_type(filename: &str) -> &'static str {
    let extension = filename.rsplit('.').next().unwrap_or("").to_ascii_lowercase();

    match extension.as_str() {
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "txt" => "text/plain",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        _ => "application/octet-stream",
    }
}
