//! `log` backend that forwards records to the browser console.

use log::{Level, Log, Metadata, Record};
use wasm_bindgen::JsValue;

struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!(
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        ));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Safe to call more than once; later calls are ignored.
pub fn init(level: Level) {
    if log::set_boxed_logger(Box::new(ConsoleLogger)).is_ok() {
        set_level(level);
    }
}

/// Change verbosity at runtime.
pub fn set_level(level: Level) {
    log::set_max_level(level.to_level_filter());
}

/// Parse a level name coming from JS (`"debug"`, `"warn"`, ...). Unknown names fall back to info.
pub fn parse_level(name: &str) -> Level {
    name.parse().unwrap_or(Level::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_level_accepts_known_names() {
        assert_eq!(parse_level("warn"), Level::Warn);
        assert_eq!(parse_level("DEBUG"), Level::Debug);
        assert_eq!(parse_level("loud"), Level::Info);
    }
}
