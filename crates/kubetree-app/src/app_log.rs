use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::fmt::MakeWriter;

const MAX_LOG_LINES: usize = 2000;

static LOG_BUFFER: OnceLock<Arc<Mutex<VecDeque<String>>>> = OnceLock::new();
static CAPTURING: AtomicBool = AtomicBool::new(false);

fn buffer() -> Arc<Mutex<VecDeque<String>>> {
    LOG_BUFFER.get_or_init(|| Arc::new(Mutex::new(VecDeque::with_capacity(MAX_LOG_LINES)))).clone()
}

/// While capturing, log lines are held in memory instead of going to stderr,
/// so they do not tear the alternate screen.
pub fn set_capture(on: bool) {
    CAPTURING.store(on, Ordering::SeqCst);
}

fn is_capturing() -> bool {
    CAPTURING.load(Ordering::SeqCst)
}

fn commit_line(line: &str) {
    if line.is_empty() {
        return;
    }
    let buf = buffer();
    let Ok(mut guard) = buf.lock() else { return };
    guard.push_back(line.to_string());
    while guard.len() > MAX_LOG_LINES {
        let _ = guard.pop_front();
    }
}

pub fn latest() -> Option<String> {
    let buf = buffer();
    let guard = buf.lock().ok()?;
    guard.back().cloned()
}

/// Removes and returns every captured line, oldest first.
pub fn drain() -> Vec<String> {
    let buf = buffer();
    let Ok(mut guard) = buf.lock() else { return Vec::new() };
    guard.drain(..).collect()
}

/// Stops capturing and writes what was captured to stderr.
pub fn release() {
    set_capture(false);
    let mut stderr = io::stderr().lock();
    for line in drain() {
        let _ = writeln!(stderr, "{line}");
    }
}

#[derive(Clone, Default)]
pub struct AppLogMakeWriter;

impl<'a> MakeWriter<'a> for AppLogMakeWriter {
    type Writer = AppLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        AppLogWriter { line_buf: String::new() }
    }
}

/// Buffers bytes until a complete newline-terminated line is received. The
/// tracing formatter may split one event across several `write()` calls.
pub struct AppLogWriter {
    line_buf: String,
}

impl Write for AppLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !is_capturing() {
            return io::stderr().write(buf);
        }

        let text = String::from_utf8_lossy(buf);
        self.line_buf.push_str(&text);

        while let Some(pos) = self.line_buf.find('\n') {
            let line = self.line_buf.drain(..=pos).collect::<String>();
            commit_line(line.trim_end_matches('\n'));
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.line_buf.is_empty() {
            let line = std::mem::take(&mut self.line_buf);
            commit_line(line.trim_end_matches('\n'));
        }
        if !is_capturing() {
            io::stderr().flush()?;
        }
        Ok(())
    }
}

impl Drop for AppLogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
