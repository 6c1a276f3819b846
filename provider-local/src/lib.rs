//! # Local Disk File Provider
//!
//! [`FileProvider`] implementation backed by the local filesystem. All
//! paths are resolved relative to a configured root directory, so a
//! provider rooted at a music library never hands out absolute paths.
//!
//! Sync operations use `std::fs`; the async variants are overridden with
//! `tokio::fs` and `spawn_blocking` so callers on a runtime thread are
//! never blocked by disk I/O.

pub mod stream;

pub use stream::LocalInputStream;

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use async_trait::async_trait;
use tracing::debug;

use provider_traits::{FileInfo, FileMetadata, FileProvider, InputStream};

/// Local filesystem provider rooted at a library directory.
pub struct LocalFileProvider {
    root: PathBuf,
}

impl LocalFileProvider {
    /// Create a provider rooted at `root`.
    ///
    /// The root is not required to exist yet; operations against a missing
    /// root behave like operations against any other missing directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory this provider resolves against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        if relative.is_empty() {
            self.root.clone()
        } else {
            self.root.join(relative)
        }
    }

    fn relative_child_path(directory: &str, name: &str) -> String {
        if directory.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", directory.trim_end_matches('/'), name)
        }
    }
}

/// Infer a MIME type from the file extension.
///
/// Small fixed table covering the formats the player cares about; anything
/// else is reported as a generic binary type.
pub fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        Some("wav") => "audio/wav",
        _ => "application/octet-stream",
    }
}

fn modified_epoch_secs(metadata: &std::fs::Metadata) -> u64 {
    metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[async_trait]
impl FileProvider for LocalFileProvider {
    fn list_files(&self, directory: &str) -> Vec<FileInfo> {
        let full_path = self.resolve(directory);

        let entries = match std::fs::read_dir(&full_path) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = ?full_path, error = %e, "Directory not listable");
                return Vec::new();
            }
        };

        let mut result = Vec::new();
        for entry in entries.flatten() {
            // Entries whose metadata cannot be read are skipped rather than
            // failing the whole listing.
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(e) => {
                    debug!(path = ?entry.path(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            let is_directory = metadata.is_dir();

            result.push(FileInfo {
                path: Self::relative_child_path(directory, &name),
                name,
                is_directory,
                size: if is_directory { 0 } else { metadata.len() },
                modified_time: modified_epoch_secs(&metadata),
            });
        }

        debug!(path = ?full_path, count = result.len(), "Listed directory");
        result
    }

    fn open_file(&self, path: &str) -> Option<Box<dyn InputStream>> {
        let full_path = self.resolve(path);

        match std::fs::File::open(&full_path) {
            Ok(file) => {
                debug!(path = ?full_path, "Opened file for reading");
                Some(Box::new(LocalInputStream::new(file)))
            }
            Err(e) => {
                debug!(path = ?full_path, error = %e, "Failed to open file");
                None
            }
        }
    }

    fn file_metadata(&self, path: &str) -> FileMetadata {
        let full_path = self.resolve(path);

        let metadata = match std::fs::metadata(&full_path) {
            Ok(metadata) if !metadata.is_dir() => metadata,
            _ => return FileMetadata::default(),
        };

        FileMetadata {
            size: metadata.len(),
            modified_time: modified_epoch_secs(&metadata),
            mime_type: mime_type_for(&full_path).to_string(),
        }
    }

    async fn list_files_async(&self, directory: &str) -> Vec<FileInfo> {
        let full_path = self.resolve(directory);

        let mut read_dir = match tokio::fs::read_dir(&full_path).await {
            Ok(read_dir) => read_dir,
            Err(e) => {
                debug!(path = ?full_path, error = %e, "Directory not listable");
                return Vec::new();
            }
        };

        let mut result = Vec::new();
        while let Ok(Some(entry)) = read_dir.next_entry().await {
            let metadata = match entry.metadata().await {
                Ok(metadata) => metadata,
                Err(e) => {
                    debug!(path = ?entry.path(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            let is_directory = metadata.is_dir();

            result.push(FileInfo {
                path: Self::relative_child_path(directory, &name),
                name,
                is_directory,
                size: if is_directory { 0 } else { metadata.len() },
                modified_time: modified_epoch_secs(&metadata),
            });
        }

        debug!(path = ?full_path, count = result.len(), "Listed directory");
        result
    }

    async fn open_file_async(&self, path: &str) -> Option<Box<dyn InputStream>> {
        let full_path = self.resolve(path);

        let opened = tokio::task::spawn_blocking(move || {
            std::fs::File::open(&full_path)
                .map(|file| Box::new(LocalInputStream::new(file)) as Box<dyn InputStream>)
                .ok()
        })
        .await;

        opened.unwrap_or(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_table_covers_audio_formats() {
        assert_eq!(mime_type_for(Path::new("song.mp3")), "audio/mpeg");
        assert_eq!(mime_type_for(Path::new("song.FLAC")), "audio/flac");
        assert_eq!(mime_type_for(Path::new("song.ogg")), "audio/ogg");
        assert_eq!(mime_type_for(Path::new("song.wav")), "audio/wav");
        assert_eq!(mime_type_for(Path::new("notes.txt")), "application/octet-stream");
        assert_eq!(mime_type_for(Path::new("no_extension")), "application/octet-stream");
    }

    #[test]
    fn relative_child_paths_chain() {
        assert_eq!(LocalFileProvider::relative_child_path("", "a.mp3"), "a.mp3");
        assert_eq!(
            LocalFileProvider::relative_child_path("albums", "a.mp3"),
            "albums/a.mp3"
        );
        assert_eq!(
            LocalFileProvider::relative_child_path("albums/", "a.mp3"),
            "albums/a.mp3"
        );
    }
}
