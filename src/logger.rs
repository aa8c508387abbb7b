use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

/// Append-only run logger. The log file survives across runs; each run
/// appends timestamped entries for load errors, validation failures, post
/// attempts and the final summary.
pub struct RunLogger {
    writer: Mutex<BufWriter<std::fs::File>>,
}

impl RunLogger {
    pub fn open(log_path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = log_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        Ok(RunLogger {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn info(&self, message: &str) {
        self.log("INFO", message);
    }

    pub fn warn(&self, message: &str) {
        self.log("WARN", message);
    }

    fn log(&self, level: &str, message: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let _ = writeln!(writer, "[{}] {} {}", timestamp, level, message);
            let _ = writer.flush();
        }
    }
}
