use crate::config::{LoggingConfig, Section};
use std::{
    collections::HashMap,
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::Targets, fmt};

use file_rotate::{compression::Compression, suffix::AppendCount, ContentLimit, FileRotate};

const DEFAULT_SECTION: &str = "default";
const DEFAULT_MAX_SIZE_MB: u64 = 100;
const DEFAULT_MAX_BACKUPS: usize = 3;

// -------- level helpers --------

/// `None` means the sink is switched off; unknown names fall back to INFO.
fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(LevelFilter::TRACE),
        "debug" => Some(LevelFilter::DEBUG),
        "info" => Some(LevelFilter::INFO),
        "warn" => Some(LevelFilter::WARN),
        "error" => Some(LevelFilter::ERROR),
        "off" | "none" => None,
        _ => Some(LevelFilter::INFO),
    }
}

/// Returns true if target == crate_name or target starts with "crate_name::"
fn matches_crate_prefix(target: &str, crate_name: &str) -> bool {
    target == crate_name
        || (target.starts_with(crate_name) && target[crate_name.len()..].starts_with("::"))
}

// -------- rotating writer for files --------

#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendCount>>>);

impl Write for RotWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("log file writer poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("log file writer poisoned"))?
            .flush()
    }
}

/// Writer handle that may be empty; writes to an empty handle are dropped.
struct RoutedWriter(Option<RotWriter>);

impl Write for RoutedWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &mut self.0 {
            Some(w) => w.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.0 {
            Some(w) => w.flush(),
            None => Ok(()),
        }
    }
}

/// Routes records to per-subsystem files by target prefix,
/// falling back to the file of the "default" section.
#[derive(Default)]
struct FileRouter {
    default: Option<RotWriter>,
    by_prefix: HashMap<String, RotWriter>,
}

impl FileRouter {
    fn resolve_for(&self, target: &str) -> Option<RotWriter> {
        self.by_prefix
            .iter()
            .find(|(prefix, _)| matches_crate_prefix(target, prefix))
            .map(|(_, w)| w.clone())
            .or_else(|| self.default.clone())
    }

    fn is_empty(&self) -> bool {
        self.default.is_none() && self.by_prefix.is_empty()
    }
}

impl<'a> fmt::MakeWriter<'a> for FileRouter {
    type Writer = RoutedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        RoutedWriter(self.default.clone())
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        RoutedWriter(self.resolve_for(meta.target()))
    }
}

// -------- path & writer helpers --------

/// Absolute paths are kept as-is; relative paths are joined with `base_dir`.
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

fn create_rotating_writer_at_path(
    log_path: &Path,
    max_bytes: usize,
    max_backups: usize,
) -> std::io::Result<RotWriter> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let rot = FileRotate::new(
        log_path,
        AppendCount::new(max_backups),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    );

    Ok(RotWriter(Arc::new(Mutex::new(rot))))
}

fn file_writer_for(name: &str, section: &Section, base_dir: &Path) -> Option<RotWriter> {
    if section.file.trim().is_empty() {
        return None;
    }

    let max_bytes = section.max_size_mb.unwrap_or(DEFAULT_MAX_SIZE_MB) * 1024 * 1024;
    let max_backups = section.max_backups.unwrap_or(DEFAULT_MAX_BACKUPS);
    let log_path = resolve_log_path(&section.file, base_dir);

    match create_rotating_writer_at_path(&log_path, max_bytes as usize, max_backups) {
        Ok(writer) => Some(writer),
        Err(e) => {
            eprintln!(
                "Failed to init log file for '{}': {} ({})",
                name,
                log_path.to_string_lossy(),
                e
            );
            None
        }
    }
}

// -------- filters --------

fn console_targets(cfg: &LoggingConfig) -> Targets {
    let default = cfg
        .get(DEFAULT_SECTION)
        .and_then(|s| parse_level(&s.console_level))
        .unwrap_or(LevelFilter::OFF);

    cfg.iter()
        .filter(|(name, _)| name.as_str() != DEFAULT_SECTION)
        .fold(Targets::new().with_default(default), |t, (name, s)| {
            t.with_target(
                name.clone(),
                parse_level(&s.console_level).unwrap_or(LevelFilter::OFF),
            )
        })
}

fn file_targets(cfg: &LoggingConfig) -> Targets {
    let level_of = |s: &Section| {
        if s.file.trim().is_empty() {
            LevelFilter::OFF
        } else {
            parse_level(&s.file_level).unwrap_or(LevelFilter::OFF)
        }
    };

    let default = cfg
        .get(DEFAULT_SECTION)
        .map(level_of)
        .unwrap_or(LevelFilter::OFF);

    cfg.iter()
        .filter(|(name, _)| name.as_str() != DEFAULT_SECTION)
        .fold(Targets::new().with_default(default), |t, (name, s)| {
            t.with_target(name.clone(), level_of(s))
        })
}

fn build_file_router(cfg: &LoggingConfig, base_dir: &Path) -> FileRouter {
    let mut router = FileRouter::default();
    for (name, section) in cfg {
        let Some(writer) = file_writer_for(name, section, base_dir) else {
            continue;
        };
        if name == DEFAULT_SECTION {
            router.default = Some(writer);
        } else {
            router.by_prefix.insert(name.clone(), writer);
        }
    }
    router
}

// -------- public init --------

/// Initialize logging from a configuration.
/// - `cfg`: logging sections keyed by crate prefix, plus "default"
/// - `base_dir`: directory used to resolve relative log file paths (server.home_dir)
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

    // Bridge `log` → `tracing` before installing the subscriber
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        init_default_logging();
        return;
    }

    let ansi = atty::is(atty::Stream::Stdout);
    let console_layer = fmt::layer()
        .with_ansi(ansi)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(console_targets(cfg));

    let router = build_file_router(cfg, base_dir);
    let file_layer = (!router.is_empty()).then(|| {
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_target(true)
            .with_level(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_writer(router)
            .with_filter(file_targets(cfg))
    });

    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

fn init_default_logging() {
    let _ = fmt()
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .try_init();
}
