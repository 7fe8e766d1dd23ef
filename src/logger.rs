//! Process logging: a console sink plus a size-rotating file sink.
//!
//! The subscriber is built as a value so the binary can install it globally
//! and tests can run code under their own subscriber with a capturing writer.

use crate::errors::{AppError, AppResult};
use chrono::Local;
use std::ffi::OsString;
use std::fmt;
use std::fmt::Write as _;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub file: PathBuf,
    /// Level for the file sink (`trace`, `debug`, `info`, `warn`, `error`, `off`).
    pub level: String,
    /// Level for the console sink.
    pub console_level: String,
    pub max_bytes: u64,
    pub backups: usize,
}

struct RotatingState {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    file: File,
    written: u64,
}

/// Append-only log file that rolls over once it would exceed `max_bytes`.
///
/// On rollover `app.log.N-1` becomes `app.log.N` (up to `backups`), the live
/// file becomes `app.log.1`, and a fresh `app.log` is opened. With
/// `backups == 0` the live file is truncated instead.
#[derive(Clone)]
pub struct RotatingFile {
    state: Arc<Mutex<RotatingState>>,
}

fn numbered(path: &Path, n: usize) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_owned();
    s.push(format!(".{n}"));
    PathBuf::from(s)
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

impl RotatingFile {
    pub fn open(path: &Path, max_bytes: u64, backups: usize) -> AppResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(AppError::file_op("create log dir", parent))?;
        }
        let file = open_append(path).map_err(AppError::file_op("open log file", path))?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);

        Ok(Self {
            state: Arc::new(Mutex::new(RotatingState {
                path: path.to_path_buf(),
                max_bytes,
                backups,
                file,
                written,
            })),
        })
    }
}

impl RotatingState {
    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.backups == 0 {
            self.file = File::create(&self.path)?;
            self.written = 0;
            return Ok(());
        }

        for n in (1..self.backups).rev() {
            let src = numbered(&self.path, n);
            if src.exists() {
                let dst = numbered(&self.path, n + 1);
                if dst.exists() {
                    fs::remove_file(&dst)?;
                }
                fs::rename(&src, dst)?;
            }
        }
        let first = numbered(&self.path, 1);
        if first.exists() {
            fs::remove_file(&first)?;
        }
        fs::rename(&self.path, &first)?;

        self.file = open_append(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut st = self
            .state
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;

        if st.max_bytes > 0 && st.written > 0 && st.written + buf.len() as u64 > st.max_bytes {
            st.rotate()?;
        }

        let n = st.file.write(buf)?;
        st.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut st = self
            .state
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        st.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RotatingFile {
    type Writer = RotatingFile;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// `2024-01-01 09:30:00,123 - kpr::core::notes - INFO - message key=value`
struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        write!(
            writer,
            "{} - {} - {} - ",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            meta.target(),
            meta.level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn parse_level(s: &str) -> AppResult<LevelFilter> {
    LevelFilter::from_str(s.trim())
        .map_err(|_| AppError::Logger(format!("unknown log level '{s}'")))
}

/// Build the dual-sink subscriber: rotating file + `console`.
pub fn build<W>(settings: &LogSettings, console: W) -> AppResult<impl Subscriber + Send + Sync>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let file_level = parse_level(&settings.level)?;
    let console_level = parse_level(&settings.console_level)?;
    let file = RotatingFile::open(&settings.file, settings.max_bytes, settings.backups)?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .event_format(LineFormat)
        .with_filter(file_level);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(console)
        .with_ansi(false)
        .event_format(LineFormat)
        .with_filter(console_level);

    Ok(tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer))
}

/// Install the subscriber process-wide with stderr as the console sink.
pub fn install(settings: &LogSettings) -> AppResult<()> {
    let subscriber = build(settings, io::stderr)?;
    tracing::subscriber::set_global_default(subscriber).map_err(|e| AppError::Logger(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;
        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    impl Capture {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn settings(dir: &Path, max_bytes: u64, backups: usize) -> LogSettings {
        LogSettings {
            file: dir.join("app.log"),
            level: "debug".into(),
            console_level: "warn".into(),
            max_bytes,
            backups,
        }
    }

    #[test]
    fn rotates_when_size_exceeded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut f = RotatingFile::open(&path, 10, 2).unwrap();

        f.write_all(b"aaaaaaaa\n").unwrap();
        f.write_all(b"bbbbbbbb\n").unwrap();
        f.write_all(b"cccccccc\n").unwrap();
        f.write_all(b"dddddddd\n").unwrap();
        f.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "dddddddd\n");
        assert_eq!(fs::read_to_string(numbered(&path, 1)).unwrap(), "cccccccc\n");
        assert_eq!(fs::read_to_string(numbered(&path, 2)).unwrap(), "bbbbbbbb\n");
        assert!(!numbered(&path, 3).exists());
    }

    #[test]
    fn zero_backups_truncates_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut f = RotatingFile::open(&path, 5, 0).unwrap();
        f.write_all(b"1234\n").unwrap();
        f.write_all(b"5678\n").unwrap();
        f.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "5678\n");
        assert!(!numbered(&path, 1).exists());
    }

    #[test]
    fn sinks_filter_independently() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = settings(dir.path(), 1024 * 1024, 3);
        let console = Capture::default();
        let subscriber = build(&cfg, console.clone()).unwrap();

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("only in file");
            tracing::warn!(id = 7, "everywhere");
        });

        let file = fs::read_to_string(&cfg.file).unwrap();
        assert!(file.contains("DEBUG - only in file"), "{file}");
        assert!(file.contains("WARN - everywhere"), "{file}");
        assert!(file.contains("id=7"), "{file}");

        let out = console.text();
        assert!(!out.contains("only in file"));
        assert!(out.contains(" - WARN - everywhere"), "{out}");
    }

    #[test]
    fn bad_level_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = settings(dir.path(), 10, 1);
        cfg.level = "loud".into();
        assert!(matches!(build(&cfg, io::sink), Err(AppError::Logger(_))));
    }
}
