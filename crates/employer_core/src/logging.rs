//! Process-wide logger for the roster server.
//!
//! One `flexi_logger` backend per process, writing either rolling files or
//! stderr. Asking again for the same settings is a no-op; asking for
//! different ones is refused. Record values never reach the log, only ids.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, LogSpecification, Logger, LoggerHandle,
    Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Once;

const LOG_FILE_BASENAME: &str = "employer";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 5;
const PANIC_TEXT_LIMIT: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: Once = Once::new();

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Where log records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Rolling files under an absolute directory.
    Dir(PathBuf),
    /// Process stderr.
    Stderr,
}

/// Validated logger configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub target: LogTarget,
}

impl Display for LogSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let level = self.level.as_str().to_ascii_lowercase();
        match &self.target {
            LogTarget::Dir(dir) => write!(f, "{level} -> {}", dir.display()),
            LogTarget::Stderr => write!(f, "{level} -> stderr"),
        }
    }
}

impl LogSettings {
    /// Parses raw level text and an optional directory.
    ///
    /// No directory means stderr. A directory must be absolute.
    pub fn parse(level: &str, log_dir: Option<&str>) -> Result<Self, LogError> {
        let level = LevelFilter::from_str(level.trim())
            .map_err(|_| LogError::UnknownLevel(level.to_string()))?;

        let target = match log_dir.map(str::trim) {
            None => LogTarget::Stderr,
            Some(dir) => {
                let dir = PathBuf::from(dir);
                if !dir.is_absolute() {
                    return Err(LogError::RelativeDir(dir));
                }
                LogTarget::Dir(dir)
            }
        };

        Ok(Self { level, target })
    }
}

#[derive(Debug)]
pub enum LogError {
    UnknownLevel(String),
    RelativeDir(PathBuf),
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },
    Backend(FlexiLoggerError),
    AlreadyActive {
        active: LogSettings,
        requested: LogSettings,
    },
}

impl Display for LogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(level) => write!(
                f,
                "unknown log level `{level}`; expected off|error|warn|info|debug|trace"
            ),
            Self::RelativeDir(dir) => {
                write!(f, "log directory must be absolute: `{}`", dir.display())
            }
            Self::CreateDir { dir, source } => {
                write!(f, "cannot create log directory `{}`: {source}", dir.display())
            }
            Self::Backend(err) => write!(f, "logger backend failed to start: {err}"),
            Self::AlreadyActive { active, requested } => {
                write!(f, "logger already running as `{active}`, not `{requested}`")
            }
        }
    }
}

impl Error for LogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

/// Starts the process logger, or confirms it already runs with `settings`.
pub fn init_logging(settings: LogSettings) -> Result<(), LogError> {
    let active = ACTIVE.get_or_try_init(|| start(settings.clone()))?;
    if active.settings != settings {
        return Err(LogError::AlreadyActive {
            active: active.settings.clone(),
            requested: settings,
        });
    }
    Ok(())
}

/// Settings of the running logger, `None` before [`init_logging`].
pub fn active_logging() -> Option<LogSettings> {
    ACTIVE.get().map(|active| active.settings.clone())
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn start(settings: LogSettings) -> Result<ActiveLogger, LogError> {
    let spec = LogSpecification::builder().default(settings.level).build();
    let logger = Logger::with(spec);

    let handle = match &settings.target {
        LogTarget::Dir(dir) => {
            std::fs::create_dir_all(dir).map_err(|source| LogError::CreateDir {
                dir: dir.clone(),
                source,
            })?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir.as_path())
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(ROTATE_AT_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
                .start()
        }
        LogTarget::Stderr => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::detailed_format)
            .start(),
    }
    .map_err(LogError::Backend)?;

    PANIC_HOOK.call_once(log_panics);
    info!(
        "event=logger_start module=core status=ok version={} os={} settings=\"{}\"",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        settings
    );

    Ok(ActiveLogger {
        settings,
        _handle: handle,
    })
}

fn log_panics() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let at = info
            .location()
            .map_or_else(|| "unknown".to_string(), |loc| format!("{}:{}", loc.file(), loc.line()));
        let text = info
            .payload()
            .downcast_ref::<&str>()
            .map(|text| (*text).to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        error!(
            "event=panic module=core status=error at={at} payload=\"{}\"",
            one_line(&text, PANIC_TEXT_LIMIT)
        );
        previous(info);
    }));
}

/// Flattens `text` onto one line of at most `limit` chars, marking a cut with `...`.
fn one_line(text: &str, limit: usize) -> String {
    let flat = text.replace(['\r', '\n'], " ");
    match flat.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &flat[..cut]),
        None => flat,
    }
}

#[cfg(test)]
mod tests {
    use super::{active_logging, init_logging, one_line, LogError, LogSettings, LogTarget};
    use log::LevelFilter;
    use std::path::PathBuf;

    #[test]
    fn parse_accepts_level_names_in_any_case() {
        let settings = LogSettings::parse(" Warn ", None).unwrap();
        assert_eq!(settings.level, LevelFilter::Warn);
        assert_eq!(settings.target, LogTarget::Stderr);
    }

    #[test]
    fn parse_rejects_unknown_level_and_relative_dir() {
        assert!(matches!(
            LogSettings::parse("loud", None),
            Err(LogError::UnknownLevel(level)) if level == "loud"
        ));
        assert!(matches!(
            LogSettings::parse("info", Some("logs/dev")),
            Err(LogError::RelativeDir(_))
        ));
    }

    #[test]
    fn one_line_flattens_and_caps_text() {
        assert_eq!(one_line("a\nb\rc", 10), "a b c");
        assert_eq!(one_line("abcdefgh", 3), "abc...");
        assert_eq!(one_line("abc", 3), "abc");
    }

    // The logger is process-global, so every init assertion lives here.
    #[test]
    fn init_is_idempotent_and_refuses_other_settings() {
        let dir = std::env::temp_dir().join(format!("employer-logs-{}", std::process::id()));
        let dir_text = dir.to_str().unwrap();
        let settings = LogSettings::parse("info", Some(dir_text)).unwrap();

        init_logging(settings.clone()).unwrap();
        init_logging(LogSettings::parse("INFO", Some(dir_text)).unwrap()).unwrap();

        let louder = LogSettings::parse("debug", Some(dir_text)).unwrap();
        assert!(matches!(
            init_logging(louder),
            Err(LogError::AlreadyActive { .. })
        ));
        let stderr = LogSettings::parse("info", None).unwrap();
        let err = init_logging(stderr).unwrap_err();
        assert!(err.to_string().contains("stderr"));

        assert_eq!(active_logging(), Some(settings));
        assert_eq!(
            active_logging().unwrap().target,
            LogTarget::Dir(PathBuf::from(dir_text))
        );
    }
}
