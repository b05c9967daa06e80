//! Saving a converted file, the desktop counterpart of a browser download.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::convert::{ConvertedFile, DEFAULT_FILENAME};
use crate::error::ConvertError;

pub trait DownloadSink {
    /// Stores the file and returns where it ended up.
    fn deliver(&mut self, file: &ConvertedFile) -> Result<PathBuf, ConvertError>;
}

/// Writes converted files into one folder without overwriting anything.
#[derive(Debug, Clone)]
pub struct FolderSink {
    dir: PathBuf,
}

impl FolderSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

/// Keeps only the last path component of a server-suggested name.
pub fn safe_file_name(suggested: &str) -> String {
    let last = suggested
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();

    match last {
        "" | "." | ".." => DEFAULT_FILENAME.to_string(),
        name => name.to_string(),
    }
}

fn numbered(name: &str, n: usize) -> String {
    let path = Path::new(name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| name.to_string());

    match path.extension() {
        Some(ext) => format!("{} ({}).{}", stem, n, ext.to_string_lossy()),
        None => format!("{} ({})", stem, n),
    }
}

/// Writes `bytes` to a file just created at `path`. A failed write deletes
/// the file so no truncated output is left behind.
fn write_or_remove<W: Write>(mut out: W, path: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
    let written = out.write_all(bytes).and_then(|()| out.flush());
    drop(out);

    written.map_err(|source| {
        if let Err(e) = fs::remove_file(path) {
            log::warn!("could not remove partial file {}: {}", path.display(), e);
        }
        ConvertError::WriteOutput {
            path: path.to_path_buf(),
            source,
        }
    })
}

impl DownloadSink for FolderSink {
    fn deliver(&mut self, file: &ConvertedFile) -> Result<PathBuf, ConvertError> {
        fs::create_dir_all(&self.dir).map_err(|source| ConvertError::WriteOutput {
            path: self.dir.clone(),
            source,
        })?;

        let name = safe_file_name(&file.filename);
        let mut attempt = 0;

        loop {
            let candidate = if attempt == 0 {
                self.dir.join(&name)
            } else {
                self.dir.join(numbered(&name, attempt))
            };

            match OpenOptions::new().write(true).create_new(true).open(&candidate) {
                Ok(out) => {
                    write_or_remove(out, &candidate, &file.bytes)?;
                    return Ok(candidate);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(source) => {
                    return Err(ConvertError::WriteOutput {
                        path: candidate,
                        source,
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn converted(name: &str) -> ConvertedFile {
        ConvertedFile {
            bytes: Bytes::from_static(b"col1,col2\n"),
            filename: name.to_string(),
        }
    }

    #[test]
    fn strips_directories_from_suggested_names() {
        assert_eq!(safe_file_name("../../etc/passwd"), "passwd");
        assert_eq!(safe_file_name("C:\\temp\\out.csv"), "out.csv");
        assert_eq!(safe_file_name(".."), DEFAULT_FILENAME);
        assert_eq!(safe_file_name(""), DEFAULT_FILENAME);
    }

    #[test]
    fn writes_into_folder() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FolderSink::new(dir.path());

        let path = sink.deliver(&converted("out.csv")).unwrap();

        assert_eq!(path, dir.path().join("out.csv"));
        assert_eq!(fs::read(&path).unwrap(), b"col1,col2\n");
    }

    #[test]
    fn never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FolderSink::new(dir.path());

        sink.deliver(&converted("out.csv")).unwrap();
        let second = sink.deliver(&converted("out.csv")).unwrap();
        let third = sink.deliver(&converted("out.csv")).unwrap();

        assert_eq!(second, dir.path().join("out (1).csv"));
        assert_eq!(third, dir.path().join("out (2).csv"));
    }

    struct DiskFull;

    impl Write for DiskFull {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("no space left on device"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_write_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, b"col1,").unwrap();

        let err = write_or_remove(DiskFull, &path, b"col1,col2\n").unwrap_err();

        assert!(matches!(err, ConvertError::WriteOutput { path: ref p, .. } if *p == path));
        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn successful_write_keeps_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let out = OpenOptions::new().write(true).create_new(true).open(&path).unwrap();

        write_or_remove(out, &path, b"col1,col2\n").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"col1,col2\n");
    }

    #[test]
    fn fallback_name_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FolderSink::new(dir.path());

        sink.deliver(&converted(DEFAULT_FILENAME)).unwrap();
        let second = sink.deliver(&converted(DEFAULT_FILENAME)).unwrap();

        assert_eq!(second, dir.path().join("converted-file (1)"));
    }
}
