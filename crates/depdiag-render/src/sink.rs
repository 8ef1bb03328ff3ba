//! Writing a rendered image to disk.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use depdiag_core::{Error, Result};

/// Destination file for a rendered byte stream.
///
/// Atomic sinks copy into a temporary file next to the destination and rename
/// it over the destination once every byte is flushed; a failed copy leaves
/// the destination untouched. Direct sinks write the destination in place and
/// may leave it partially written on failure.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    atomic: bool,
}

impl FileSink {
    /// Atomic sink for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            atomic: true,
        }
    }

    pub fn with_atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_atomic(&self) -> bool {
        self.atomic
    }

    /// Copy all of `reader` into the destination. Returns the byte count.
    pub fn write_from(&self, reader: &mut dyn Read) -> Result<u64> {
        let written = if self.atomic {
            self.write_atomic(reader)
        } else {
            self.write_direct(reader)
        }
        .map_err(|err| {
            err.with_operation("sink::write")
                .with_context("path", self.path.display().to_string())
        })?;

        debug!(path = %self.path.display(), written, atomic = self.atomic, "wrote file");
        Ok(written)
    }

    fn write_direct(&self, reader: &mut dyn Read) -> Result<u64> {
        let file = File::create(&self.path)?;
        copy_flushed(reader, file)
    }

    fn write_atomic(&self, reader: &mut dyn Read) -> Result<u64> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir)?;
        let written = copy_flushed(reader, temp.as_file_mut())?;
        temp.persist(&self.path).map_err(|err| Error::from(err.error))?;
        Ok(written)
    }
}

fn copy_flushed<W: Write>(reader: &mut dyn Read, writer: W) -> Result<u64> {
    let mut writer = BufWriter::new(writer);
    let written = io::copy(reader, &mut writer)?;
    writer.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use depdiag_core::ErrorKind;
    use std::io::Cursor;

    /// Yields some bytes, then fails.
    struct Truncated {
        sent: bool,
    }

    impl Read for Truncated {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.sent {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
            }
            self.sent = true;
            buf[..4].copy_from_slice(b"\x89PNG");
            Ok(4)
        }
    }

    #[test]
    fn test_atomic_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagram.png");
        let sink = FileSink::new(&path);

        let written = sink.write_from(&mut Cursor::new(b"image-bytes".to_vec())).unwrap();
        assert_eq!(written, 11);
        assert_eq!(std::fs::read(&path).unwrap(), b"image-bytes");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_atomic_failure_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagram.png");
        std::fs::write(&path, b"old").unwrap();

        let err = FileSink::new(&path)
            .write_from(&mut Truncated { sent: false })
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailed);
        assert_eq!(err.operation(), "sink::write");
        assert_eq!(std::fs::read(&path).unwrap(), b"old");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_direct_failure_leaves_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagram.png");

        let sink = FileSink::new(&path).with_atomic(false);
        assert!(sink.write_from(&mut Truncated { sent: false }).is_err());
        assert!(path.exists());
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("diagram.png");

        let err = FileSink::new(&path)
            .write_from(&mut Cursor::new(Vec::new()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
