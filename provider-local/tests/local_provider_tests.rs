//! Integration tests for the local disk provider.
//!
//! Each test builds a throwaway library tree:
//!
//! ```text
//! <root>/
//!   test1.txt
//!   test2.txt
//!   subdir/
//!     test3.txt
//! ```

use std::fs;

use tempfile::TempDir;

use provider_local::LocalFileProvider;
use provider_traits::FileProvider;

fn fixture_library() -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("test1.txt"), "Test file 1").expect("write test1");
    fs::write(dir.path().join("test2.txt"), "Test file 2").expect("write test2");
    fs::create_dir(dir.path().join("subdir")).expect("create subdir");
    fs::write(dir.path().join("subdir/test3.txt"), "Test file 3").expect("write test3");
    dir
}

#[test]
fn list_files_returns_top_level_entries() {
    let library = fixture_library();
    let provider = LocalFileProvider::new(library.path());

    let files = provider.list_files("");
    assert_eq!(files.len(), 3);

    let file1 = files.iter().find(|f| f.name == "test1.txt").expect("test1 listed");
    assert!(!file1.is_directory);
    assert_eq!(file1.path, "test1.txt");
    assert_eq!(file1.size, "Test file 1".len() as u64);
    assert!(file1.modified_time > 0);

    assert!(files.iter().any(|f| f.name == "test2.txt" && !f.is_directory));

    let subdir = files.iter().find(|f| f.name == "subdir").expect("subdir listed");
    assert!(subdir.is_directory);
    assert_eq!(subdir.size, 0);
}

#[test]
fn list_files_in_subdirectory_chains_paths() {
    let library = fixture_library();
    let provider = LocalFileProvider::new(library.path());

    let files = provider.list_files("subdir");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "test3.txt");
    assert_eq!(files[0].path, "subdir/test3.txt");
    assert!(!files[0].is_directory);

    // The listed relative path opens directly.
    let mut stream = provider.open_file(&files[0].path).expect("open listed path");
    let mut buffer = [0u8; 64];
    let bytes_read = stream.read(&mut buffer).expect("read");
    assert_eq!(&buffer[..bytes_read], b"Test file 3");
}

#[test]
fn list_files_on_missing_directory_is_empty() {
    let library = fixture_library();
    let provider = LocalFileProvider::new(library.path());

    assert!(provider.list_files("does-not-exist").is_empty());
    // A file path is not a directory either.
    assert!(provider.list_files("test1.txt").is_empty());
}

#[test]
fn open_file_reads_content() {
    let library = fixture_library();
    let provider = LocalFileProvider::new(library.path());

    let mut stream = provider.open_file("test1.txt").expect("open existing file");

    let mut buffer = [0u8; 1024];
    let bytes_read = stream.read(&mut buffer).expect("read");
    assert_eq!(&buffer[..bytes_read], b"Test file 1");
}

#[test]
fn open_file_on_missing_file_is_none() {
    let library = fixture_library();
    let provider = LocalFileProvider::new(library.path());

    assert!(provider.open_file("missing.mp3").is_none());
}

#[test]
fn stream_seek_tell_and_eof() {
    let library = fixture_library();
    let provider = LocalFileProvider::new(library.path());

    let mut stream = provider.open_file("test1.txt").expect("open");
    assert_eq!(stream.tell(), 0);
    assert!(!stream.is_eof());

    // Drain the file; EOF is reported only once a read comes back empty.
    let mut buffer = [0u8; 1024];
    let bytes_read = stream.read(&mut buffer).expect("read");
    assert_eq!(bytes_read, "Test file 1".len());
    assert_eq!(stream.tell(), bytes_read as u64);
    assert!(!stream.is_eof());

    assert_eq!(stream.read(&mut buffer).expect("read at end"), 0);
    assert!(stream.is_eof());

    // Seeking back clears EOF and repositions the cursor.
    assert!(stream.seek(5));
    assert_eq!(stream.tell(), 5);
    assert!(!stream.is_eof());

    let bytes_read = stream.read(&mut buffer).expect("read after seek");
    assert_eq!(&buffer[..bytes_read], b"file 1");
}

#[test]
fn file_metadata_infers_mime_type() {
    let library = fixture_library();
    fs::write(library.path().join("track.mp3"), "not really audio").expect("write mp3");
    let provider = LocalFileProvider::new(library.path());

    let metadata = provider.file_metadata("track.mp3");
    assert_eq!(metadata.mime_type, "audio/mpeg");
    assert_eq!(metadata.size, "not really audio".len() as u64);
    assert!(metadata.modified_time > 0);

    let metadata = provider.file_metadata("test1.txt");
    assert_eq!(metadata.mime_type, "application/octet-stream");
}

#[test]
fn file_metadata_for_missing_or_directory_is_default() {
    let library = fixture_library();
    let provider = LocalFileProvider::new(library.path());

    assert_eq!(provider.file_metadata("missing.mp3"), Default::default());
    assert_eq!(provider.file_metadata("subdir"), Default::default());
}

#[tokio::test]
async fn async_listing_matches_sync() {
    let library = fixture_library();
    let provider = LocalFileProvider::new(library.path());

    let mut sync_names: Vec<String> =
        provider.list_files("").into_iter().map(|f| f.name).collect();
    let mut async_names: Vec<String> = provider
        .list_files_async("")
        .await
        .into_iter()
        .map(|f| f.name)
        .collect();
    sync_names.sort();
    async_names.sort();

    assert_eq!(sync_names, async_names);
    assert_eq!(provider.list_files_async("does-not-exist").await.len(), 0);
}

#[tokio::test]
async fn async_open_matches_sync() {
    let library = fixture_library();
    let provider = LocalFileProvider::new(library.path());

    let mut stream = provider
        .open_file_async("test2.txt")
        .await
        .expect("open existing file");

    let mut buffer = [0u8; 64];
    let bytes_read = stream.read(&mut buffer).expect("read");
    assert_eq!(&buffer[..bytes_read], b"Test file 2");

    assert!(provider.open_file_async("missing.mp3").await.is_none());
}
