use std::io::{self, Write};
use std::str::FromStr;

use tracing::Level;

/// Installs the global `tracing` subscriber. Calling it again is harmless;
/// the first subscriber stays in place. An unrecognised level falls back to
/// `INFO` and is reported once the subscriber is up.
pub fn init_logging(level: &str) {
    let parsed = parse_level(level);
    let installed = tracing_subscriber::fmt()
        .with_max_level(parsed.unwrap_or(Level::INFO))
        .without_time()
        .with_target(false)
        .with_writer(ConsoleWriter::default)
        .try_init()
        .is_ok();
    if !installed {
        return;
    }
    match parsed {
        Some(level) => tracing::debug!(%level, "logging initialised"),
        None => tracing::warn!(requested = level, "unknown log level, using info"),
    }
}

fn parse_level(level: &str) -> Option<Level> {
    Level::from_str(level.trim()).ok()
}

/// Collects one formatted event and hands it to the console when dropped.
#[derive(Debug, Default)]
pub struct ConsoleWriter {
    buf: Vec<u8>,
}

impl Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        emit(line.trim_end());
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(line: &str) {
    use wasm_bindgen::JsValue;

    let message = JsValue::from_str(line);
    let trimmed = line.trim_start();
    if trimmed.starts_with("ERROR") {
        web_sys::console::error_1(&message);
    } else if trimmed.starts_with("WARN") {
        web_sys::console::warn_1(&message);
    } else {
        web_sys::console::log_1(&message);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(line: &str) {
    eprintln!("{line}");
}
