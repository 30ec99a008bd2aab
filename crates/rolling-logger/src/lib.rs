//! Rolling File Logger
//!
//! Installs a `tracing` subscriber that writes to stderr and to `<app>.log`
//! inside the given log directory. Once the live file grows past
//! [`MAX_FILE_BYTES`] it is rotated into a fixed ring of `<app>.1.log` ..
//! `<app>.N.log`; the oldest file falls off the end of the ring.
//!
//! `log` records are bridged into the subscriber, so applications can keep
//! using the `log` macros.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Size at which the live log file is rotated
pub const MAX_FILE_BYTES: u64 = 1024 * 1024;

/// Files kept in the ring, live file included
pub const MAX_FILES: usize = 5;

static INITIALIZED: OnceLock<PathBuf> = OnceLock::new();

/// Initialize logging for the application.
///
/// Calling it again after a successful init is a no-op.
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), String> {
    if INITIALIZED.get().is_some() {
        return Ok(());
    }

    let file = RollingFile::open(&log_dir, app_name, MAX_FILE_BYTES, MAX_FILES)
        .map_err(|e| format!("Failed to open log file in {}: {}", log_dir.display(), e))?;
    let live_path = file.path();

    tracing_subscriber::fmt()
        .with_timer(LocalTime)
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .with_writer(io::stderr.and(Mutex::new(file)))
        .try_init()
        .map_err(|e| format!("Failed to install logger: {}", e))?;

    let _ = INITIALIZED.set(live_path);
    Ok(())
}

/// Path of the live log file, once the logger is up
pub fn log_file() -> Option<&'static Path> {
    INITIALIZED.get().map(PathBuf::as_path)
}

pub fn info(message: &str) -> Result<(), String> {
    ensure_initialized()?;
    log::info!("{}", message);
    Ok(())
}

pub fn warn(message: &str) -> Result<(), String> {
    ensure_initialized()?;
    log::warn!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), String> {
    ensure_initialized()?;
    log::error!("{}", message);
    Ok(())
}

fn ensure_initialized() -> Result<(), String> {
    if INITIALIZED.get().is_none() {
        return Err("Logger not initialized".to_string());
    }
    Ok(())
}

/// Local wall-clock timestamps for log lines
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Append-only log file that rotates itself through a ring of files.
pub struct RollingFile {
    dir: PathBuf,
    stem: String,
    max_bytes: u64,
    max_files: usize,
    file: Option<File>,
    written: u64,
}

impl RollingFile {
    pub fn open(dir: &Path, stem: &str, max_bytes: u64, max_files: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let mut rolling = Self {
            dir: dir.to_path_buf(),
            stem: stem.to_string(),
            max_bytes,
            max_files: max_files.max(1),
            file: None,
            written: 0,
        };
        rolling.reopen()?;
        Ok(rolling)
    }

    /// Path of the live file
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.stem))
    }

    /// Path of the `index`-th rotated file (1 = most recent)
    pub fn rotated_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.{}.log", self.stem, index))
    }

    fn reopen(&mut self) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(self.path())?;
        self.written = file.metadata()?.len();
        self.file = Some(file);
        Ok(())
    }

    fn rotate(&mut self) -> io::Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        // Handle must be closed before renaming on Windows
        self.file = None;
        let shifted = self.shift_ring();
        self.reopen()?;
        shifted
    }

    fn shift_ring(&self) -> io::Result<()> {
        let last = self.max_files - 1;
        if last == 0 {
            return fs::remove_file(self.path());
        }

        let oldest = self.rotated_path(last);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..last).rev() {
            let from = self.rotated_path(index);
            if from.exists() {
                fs::rename(&from, self.rotated_path(index + 1))?;
            }
        }
        fs::rename(self.path(), self.rotated_path(1))
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "log file is closed"))?;
        let n = file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}
