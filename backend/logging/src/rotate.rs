//! File writers with rotation.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation as Schedule};

/// Append-mode file that shifts itself aside once it grows past `max_size`.
///
/// With `keep = 3` the live file is `app.log` and old output lives in
/// `app.log.0` (newest) through `app.log.2` (oldest).
#[derive(Debug)]
pub struct SizeRotatingFile {
    path: PathBuf,
    file: File,
    size: u64,
    keep: u64,
    max_size: u64,
}

impl SizeRotatingFile {
    /// Open (creating if needed) `path` for appending. Missing parent
    /// directories are an error.
    pub fn open(path: impl Into<PathBuf>, keep: u64, max_size: u64) -> io::Result<Self> {
        let path = path.into();
        let file = open_append(&path)?;
        let size = file.metadata()?.len();
        Ok(Self {
            path,
            file,
            size,
            keep,
            max_size,
        })
    }

    fn needs_shift(&self, incoming: usize) -> bool {
        self.keep > 0 && self.size > 0 && self.size + incoming as u64 > self.max_size
    }

    fn shift(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let oldest = numbered(&self.path, self.keep - 1);
        match fs::remove_file(&oldest) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => return Err(err),
            _ => {}
        }
        for index in (0..self.keep - 1).rev() {
            let from = numbered(&self.path, index);
            if from.exists() {
                fs::rename(&from, numbered(&self.path, index + 1))?;
            }
        }
        fs::rename(&self.path, numbered(&self.path, 0))?;

        self.file = open_append(&self.path)?;
        self.size = 0;
        Ok(())
    }
}

impl Write for SizeRotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.needs_shift(buf.len()) {
            self.shift()?;
        }
        let written = self.file.write(buf)?;
        self.size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn numbered(path: &Path, index: u64) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

/// Build a time-rotated writer for `path` from a frequency token.
///
/// Output goes to `<file_name>.<period>` next to `path`.
pub fn time_rotating(path: &Path, frequency: &str) -> io::Result<RollingFileAppender> {
    let schedule = match frequency.trim().to_ascii_lowercase().as_str() {
        "daily" => Schedule::DAILY,
        "hourly" => Schedule::HOURLY,
        "minutely" => Schedule::MINUTELY,
        "never" => Schedule::NEVER,
        other => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unsupported rotation frequency '{other}'"),
            ))
        }
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("log directory {} does not exist", dir.display()),
        ));
    }
    let prefix = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "log path has no file name"))?
        .to_string_lossy()
        .into_owned();

    RollingFileAppender::builder()
        .rotation(schedule)
        .filename_prefix(prefix)
        .build(dir)
        .map_err(io::Error::other)
}
