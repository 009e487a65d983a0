//! Logging setup for the Batch Scanner binary.
//!
//! Events go to a size-rotated file under `~/.batchscan/logs` and to stderr.
//! In TUI mode stderr is limited to warnings so log lines do not tear the
//! alternate screen.

use anyhow::{anyhow, Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "batchscan=info,batchscan_db=info";
const MAX_LOG_FILES: usize = 5;
const MAX_LOG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Logging configuration for one binary invocation.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
    pub tui_mode: bool,
}

/// Initialize tracing with a rolling file writer and stderr output.
pub fn init_logging(config: LogConfig<'_>) -> Result<()> {
    let log_dir = ensure_logs_dir()?;
    let file_writer = SharedRollingWriter::new(log_dir, config.app_name)?;

    let file_filter = default_filter();
    let console_filter = if config.tui_mode && !config.verbose {
        EnvFilter::new("warn")
    } else {
        default_filter()
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_filter(file_filter),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_filter(console_filter),
        )
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(())
}

/// `RUST_LOG` if set, else [`DEFAULT_LOG_FILTER`].
fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Batch Scanner home directory: `$BATCHSCAN_HOME` or `~/.batchscan`.
pub fn batchscan_home() -> Result<PathBuf> {
    if let Ok(override_path) = std::env::var("BATCHSCAN_HOME") {
        return Ok(PathBuf::from(override_path));
    }
    dirs::home_dir()
        .map(|home| home.join(".batchscan"))
        .ok_or_else(|| anyhow!("Could not determine home directory. Set BATCHSCAN_HOME to continue."))
}

/// Logs directory: `<home>/logs`.
pub fn logs_dir() -> Result<PathBuf> {
    Ok(batchscan_home()?.join("logs"))
}

/// Ensure the logs directory exists.
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir()?;
    fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create logs directory: {}", logs.display()))?;
    Ok(logs)
}

/// Appends to `<name>.log`, shifting it to `<name>.log.1 .. .N` once it
/// would exceed `max_size`.
struct RollingFile {
    dir: PathBuf,
    name: String,
    keep: usize,
    max_size: u64,
    file: Option<File>,
    written: u64,
}

impl RollingFile {
    fn open(dir: PathBuf, name: &str, keep: usize, max_size: u64) -> io::Result<Self> {
        fs::create_dir_all(&dir)?;
        let mut rolling = Self {
            dir,
            name: sanitize_name(name),
            keep: keep.max(1),
            max_size,
            file: None,
            written: 0,
        };
        rolling.reopen()?;
        if rolling.written > rolling.max_size {
            rolling.roll()?;
        }
        Ok(rolling)
    }

    fn path(&self, index: usize) -> PathBuf {
        if index == 0 {
            self.dir.join(format!("{}.log", self.name))
        } else {
            self.dir.join(format!("{}.log.{}", self.name, index))
        }
    }

    fn reopen(&mut self) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(self.path(0))?;
        self.written = file.metadata()?.len();
        self.file = Some(file);
        Ok(())
    }

    fn roll(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            let _ = file.flush();
        }

        let oldest = self.keep - 1;
        if oldest > 0 {
            let last = self.path(oldest);
            if last.exists() {
                fs::remove_file(&last)?;
            }
            for index in (0..oldest).rev() {
                let src = self.path(index);
                if src.exists() {
                    fs::rename(&src, self.path(index + 1))?;
                }
            }
        } else {
            let current = self.path(0);
            if current.exists() {
                fs::remove_file(current)?;
            }
        }

        self.reopen()
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_size {
            self.roll()?;
        }

        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "log file unavailable"))?;
        let bytes = file.write(buf)?;
        self.written += bytes as u64;
        Ok(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

#[derive(Clone)]
struct SharedRollingWriter {
    inner: Arc<Mutex<RollingFile>>,
}

impl SharedRollingWriter {
    fn new(dir: PathBuf, app_name: &str) -> Result<Self> {
        let file = RollingFile::open(dir, app_name, MAX_LOG_FILES, MAX_LOG_FILE_SIZE)
            .with_context(|| format!("Failed to open log file for {}", app_name))?;
        Ok(Self {
            inner: Arc::new(Mutex::new(file)),
        })
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SharedRollingWriter {
    type Writer = SharedRollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl Write for SharedRollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer lock poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer lock poisoned"))?
            .flush()
    }
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}
