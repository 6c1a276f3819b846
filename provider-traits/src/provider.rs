//! File provider abstractions
//!
//! Platform-agnostic traits for listing directories and streaming file
//! contents from a storage backend.

use async_trait::async_trait;

use crate::error::Result;

/// Information about a single directory entry.
///
/// `path` is the listing directory joined with the entry name, relative to
/// the provider root, so callers can chain it straight into
/// [`FileProvider::open_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Entry name without any directory component
    pub name: String,
    /// Relative path usable in subsequent provider calls
    pub path: String,
    /// Whether this entry is a directory
    pub is_directory: bool,
    /// Size in bytes, 0 for directories
    pub size: u64,
    /// Last modification time as seconds since the Unix epoch, 0 if unknown
    pub modified_time: u64,
}

/// Metadata inferred for a file.
///
/// The default value is what providers return for paths that do not exist
/// or refer to a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMetadata {
    /// Size in bytes
    pub size: u64,
    /// Last modification time as seconds since the Unix epoch, 0 if unknown
    pub modified_time: u64,
    /// Best-effort MIME type, empty when unknown
    pub mime_type: String,
}

/// A readable byte stream bound to one open file.
///
/// Dropping the stream closes the underlying resource; holders do not need
/// an explicit close call, every exit path releases the handle.
pub trait InputStream: Send {
    /// Read up to `buffer.len()` bytes into `buffer`.
    ///
    /// Returns the number of bytes read; 0 indicates end of stream, not an
    /// error.
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Reposition the read cursor to an absolute offset.
    ///
    /// Returns `true` on success.
    fn seek(&mut self, position: u64) -> bool;

    /// Current read cursor position.
    fn tell(&self) -> u64;

    /// Whether the cursor has reached end of stream.
    fn is_eof(&self) -> bool;
}

/// Storage backend abstraction.
///
/// Implementations resolve logical paths relative to their own root. All
/// lookup failures are encoded in return values rather than errors:
/// listing a missing directory yields an empty vector, opening a missing
/// file yields `None`, and metadata for a missing path is the default
/// value.
///
/// The async variants have semantics identical to their sync counterparts
/// and exist purely so UI-thread callers are never blocked by backend I/O.
/// The default implementations delegate to the sync methods inline;
/// backends with real I/O should override them with truly non-blocking
/// versions.
#[async_trait]
pub trait FileProvider: Send + Sync {
    /// Enumerate the immediate children of `directory`.
    ///
    /// Non-recursive. Returns an empty vector if the directory does not
    /// exist or is not a directory.
    fn list_files(&self, directory: &str) -> Vec<FileInfo>;

    /// Open `path` for binary reading.
    ///
    /// Returns `None` if the file cannot be opened.
    fn open_file(&self, path: &str) -> Option<Box<dyn InputStream>>;

    /// Best-effort metadata for `path`.
    ///
    /// Returns `FileMetadata::default()` if the path does not exist or is
    /// a directory.
    fn file_metadata(&self, path: &str) -> FileMetadata;

    /// Async variant of [`list_files`](Self::list_files).
    async fn list_files_async(&self, directory: &str) -> Vec<FileInfo> {
        self.list_files(directory)
    }

    /// Async variant of [`open_file`](Self::open_file).
    async fn open_file_async(&self, path: &str) -> Option<Box<dyn InputStream>> {
        self.open_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticProvider;

    #[async_trait]
    impl FileProvider for StaticProvider {
        fn list_files(&self, directory: &str) -> Vec<FileInfo> {
            if directory.is_empty() {
                vec![FileInfo {
                    name: "a.mp3".to_string(),
                    path: "a.mp3".to_string(),
                    is_directory: false,
                    size: 42,
                    modified_time: 1_700_000_000,
                }]
            } else {
                Vec::new()
            }
        }

        fn open_file(&self, _path: &str) -> Option<Box<dyn InputStream>> {
            None
        }

        fn file_metadata(&self, _path: &str) -> FileMetadata {
            FileMetadata::default()
        }
    }

    #[test]
    fn default_metadata_is_empty() {
        let metadata = FileMetadata::default();
        assert_eq!(metadata.size, 0);
        assert_eq!(metadata.modified_time, 0);
        assert!(metadata.mime_type.is_empty());
    }

    #[tokio::test]
    async fn async_defaults_match_sync() {
        let provider = StaticProvider;

        let sync_listing = provider.list_files("");
        let async_listing = provider.list_files_async("").await;
        assert_eq!(sync_listing, async_listing);

        assert!(provider.open_file_async("missing.mp3").await.is_none());
    }
}
