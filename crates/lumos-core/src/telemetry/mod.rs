//! Append-only structured event log.
//!
//! Every enhancement attempt leaves a trail of [`TelemetryEvent`]s. Events are
//! kept in memory for the lifetime of the emitter and, unless the emitter is
//! memory-only, appended to a JSON Lines file:
//!
//! ```text
//! {"timestamp":"2026-01-02T03:04:05Z","event":"enhance_clicked","fields":{"scale_factor":"4"}}
//! ```
//!
//! The emitter is the one piece of state shared between concurrent runs. The
//! in-memory push and the file append happen under the same lock, so lines
//! from different runs interleave but never tear.

mod event;

pub use event::{fields, Fields, TelemetryEvent};

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Process-scoped telemetry emitter.
///
/// Construct one per process (or per test, with an injected path) and share
/// it behind an `Arc`.
#[derive(Debug)]
pub struct Telemetry {
    log_path: Option<PathBuf>,
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    events: Vec<TelemetryEvent>,
    log_dir_ready: bool,
}

impl Telemetry {
    /// Emitter that appends to `log_path`. Parent directories are created on
    /// the first emit.
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: Some(log_path.into()),
            state: Mutex::new(State::default()),
        }
    }

    /// Emitter that only keeps events in memory.
    pub fn in_memory() -> Self {
        Self {
            log_path: None,
            state: Mutex::new(State::default()),
        }
    }

    /// Emitter writing to [`Telemetry::default_log_path`].
    pub fn with_default_path() -> Self {
        Self::new(Self::default_log_path())
    }

    /// Default log location: `<local data dir>/logs/events.jsonl`.
    ///
    /// - Linux: ~/.local/share/lumos/logs/events.jsonl
    /// - macOS: ~/Library/Application Support/com.lumos.lumos/logs/events.jsonl
    /// - Windows: C:\Users\<User>\AppData\Local\lumos\lumos\data\logs\events.jsonl
    ///
    /// Falls back to `<temp dir>/Lumos/logs/events.jsonl`.
    pub fn default_log_path() -> PathBuf {
        directories::ProjectDirs::from("com", "lumos", "lumos")
            .map(|dirs| dirs.data_local_dir().to_path_buf())
            .unwrap_or_else(|| std::env::temp_dir().join("Lumos"))
            .join("logs")
            .join("events.jsonl")
    }

    /// Durable log destination, if any.
    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// Record an event.
    ///
    /// Never fails: if the log file cannot be written the event is still kept
    /// in memory and a warning is logged.
    pub fn emit(&self, name: impl Into<String>, fields: Fields) {
        let event = TelemetryEvent::now(name, fields);
        let line = match &self.log_path {
            Some(_) => match event.to_json_line() {
                Ok(line) => Some(line),
                Err(e) => {
                    tracing::warn!("Failed to serialize telemetry event {}: {}", event.name, e);
                    None
                }
            },
            None => None,
        };

        tracing::debug!(event = %event.name, "telemetry");

        let mut state = self.lock();
        if let (Some(path), Some(line)) = (&self.log_path, line) {
            Self::append_line(&mut state, path, &line);
        }
        state.events.push(event);
    }

    /// Snapshot of every event emitted so far, in append order.
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.lock().events.clone()
    }

    /// Number of events emitted so far.
    pub fn len(&self) -> usize {
        self.lock().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn append_line(state: &mut State, path: &Path, line: &str) {
        if !state.log_dir_ready {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    tracing::warn!("Cannot create telemetry directory {:?}: {}", parent, e);
                    return;
                }
            }
            state.log_dir_ready = true;
        }

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(line.as_bytes()));
        if let Err(e) = result {
            tracing::warn!("Cannot append to telemetry log {:?}: {}", path, e);
        }
    }
}
