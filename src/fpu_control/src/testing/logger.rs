use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};

use log::{Level, LevelFilter, Log, Metadata, Record};

pub(crate) static LOGGER: Logger = Logger {
    log_calls: Mutex::new(Vec::new()),
    max_level: AtomicUsize::new(LevelFilter::Off as usize),
};

static INITIALIZE: Once = Once::new();

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct LogCall {
    pub(crate) level: Level,
    pub(crate) args: String,
}

/// A `log` implementation that records every call, so tests can assert on
/// what was logged
pub(crate) struct Logger {
    log_calls: Mutex<Vec<LogCall>>,
    max_level: AtomicUsize,
}

impl Logger {
    /// Install `LOGGER` as the global logger. Safe to call from every test;
    /// only the first call installs it.
    pub(crate) fn initialize_test_logger() {
        INITIALIZE.call_once(|| {
            log::set_logger(&LOGGER).expect("another logger is already installed");
            log::set_max_level(LevelFilter::Trace);
        });
    }

    pub(crate) fn set_max_level(&self, level: LevelFilter) {
        self.max_level.store(level as usize, Ordering::Relaxed);
    }

    fn max_level(&self) -> LevelFilter {
        match self.max_level.load(Ordering::Relaxed) {
            0 => LevelFilter::Off,
            1 => LevelFilter::Error,
            2 => LevelFilter::Warn,
            3 => LevelFilter::Info,
            4 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub(crate) fn clear_log_calls(&self) {
        self.log_calls.lock().unwrap().clear();
    }

    /// Run `f` over the calls recorded so far, then clear them
    pub(crate) fn test_log_records<F: FnMut(&Vec<LogCall>)>(&self, mut f: F) {
        let mut log_calls = self.log_calls.lock().unwrap();
        f(&log_calls);
        log_calls.clear();
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.log_calls.lock().unwrap().push(LogCall {
            level: record.level(),
            args: format!("{}", record.args()),
        });
    }

    fn flush(&self) {}
}
