//! Streaming reads over an open local file.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};

use provider_traits::{InputStream, Result};

/// [`InputStream`] over a local file handle.
///
/// The handle is closed when the stream is dropped. EOF is reported the
/// way C streams do it: `is_eof` turns true only after a read has actually
/// hit the end, and a successful seek clears it again.
pub struct LocalInputStream {
    file: File,
    position: u64,
    at_eof: bool,
}

impl LocalInputStream {
    pub fn new(file: File) -> Self {
        Self {
            file,
            position: 0,
            at_eof: false,
        }
    }
}

impl InputStream for LocalInputStream {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let bytes_read = self.file.read(buffer)?;
        self.position += bytes_read as u64;
        if bytes_read == 0 && !buffer.is_empty() {
            self.at_eof = true;
        }
        Ok(bytes_read)
    }

    fn seek(&mut self, position: u64) -> bool {
        match self.file.seek(SeekFrom::Start(position)) {
            Ok(new_position) => {
                self.position = new_position;
                self.at_eof = false;
                true
            }
            Err(_) => false,
        }
    }

    fn tell(&self) -> u64 {
        self.position
    }

    fn is_eof(&self) -> bool {
        self.at_eof
    }
}
