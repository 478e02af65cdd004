use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

/// Append-only debug log. Stdout belongs to the frame composer while the
/// editor runs, so diagnostics go to a file instead.
pub struct Logger {
    file: File,
}

impl Logger {
    pub fn new(path: &str) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    pub fn record(&mut self, message: &str) {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let _ = writeln!(self.file, "[{timestamp}] {message}");
    }
}

thread_local! {
    static LOGGER: RefCell<Option<Logger>> = const { RefCell::new(None) };
}

/// Installs the logger for this thread. Debug builds only; release builds
/// leave it disabled and `debug` becomes a no-op.
pub fn init(path: &str) -> std::io::Result<()> {
    #[cfg(debug_assertions)]
    {
        let logger = Logger::new(path)?;
        LOGGER.with(|slot| {
            *slot.borrow_mut() = Some(logger);
        });
    }
    #[cfg(not(debug_assertions))]
    {
        let _ = path;
    }
    Ok(())
}

pub fn debug(message: &str) {
    #[cfg(debug_assertions)]
    {
        LOGGER.with(|slot| {
            if let Some(logger) = slot.borrow_mut().as_mut() {
                logger.record(message);
            }
        });
    }
    #[cfg(not(debug_assertions))]
    {
        let _ = message;
    }
}
