//! Append-only run log with optional live echo.
//!
//! Each run gets its own log that:
//! - Accumulates the configuration header, per-window progress and raw
//!   checker output in memory
//! - Echoes progress to a callback (console, GUI) as it happens, or emits
//!   it as `tracing` events when no callback is set
//! - Is handed to the result sink exactly once, at run end

use std::time::Duration;

use chrono::Local;

use super::types::{EchoCallback, LogConfig, LogLevel, MessagePrefix};
use crate::models::{Sample, Window};
use crate::results::format_elapsed;

/// Per-run log. The buffer only ever grows.
pub struct RunLog {
    /// Persisted text.
    buffer: String,
    /// Echo configuration.
    config: LogConfig,
    /// Live echo target.
    echo: Option<EchoCallback>,
}

impl RunLog {
    /// Create an empty run log.
    pub fn new(config: LogConfig, echo: Option<EchoCallback>) -> Self {
        Self {
            buffer: String::new(),
            config,
            echo,
        }
    }

    /// Append a preformatted block (e.g. the configuration header).
    pub fn header(&mut self, block: &str) {
        self.buffer.push_str(block);
        if !block.ends_with('\n') {
            self.buffer.push('\n');
        }
        for line in block.lines() {
            self.emit(LogLevel::Info, line);
        }
    }

    /// Record a progress line.
    pub fn info(&mut self, message: &str) {
        if self.traces() {
            tracing::info!("{}", message);
        }
        self.record(LogLevel::Info, &MessagePrefix::Info.format(message));
    }

    /// Record a skipped-window notice.
    pub fn warn(&mut self, message: &str) {
        if self.traces() {
            tracing::warn!("{}", message);
        }
        self.record(LogLevel::Warn, &MessagePrefix::Warning.format(message));
    }

    /// Record an unreadable-trace notice.
    pub fn parse_error(&mut self, message: &str) {
        if self.traces() {
            tracing::warn!("trace parse failure: {}", message);
        }
        self.record(LogLevel::Warn, &MessagePrefix::ParseError.format(message));
    }

    /// Append raw checker output, surrounded by blank lines.
    ///
    /// Raw output is only echoed at debug level.
    pub fn raw(&mut self, text: &str) {
        self.buffer.push('\n');
        self.buffer.push_str(text);
        self.buffer.push('\n');
        for line in text.lines() {
            self.emit(LogLevel::Debug, line);
        }
    }

    /// Echo a status line without persisting it.
    pub fn notice(&self, message: &str) {
        if self.traces() {
            tracing::info!("{}", message);
        }
        self.emit(LogLevel::Info, &MessagePrefix::Status.format(message));
    }

    /// Append the trailing elapsed-time line.
    pub fn finish(&mut self, elapsed: Duration) {
        let line = format!("Total elapsed time: {}", format_elapsed(elapsed));
        self.buffer.push('\n');
        self.record(LogLevel::Info, &line);
    }

    /// Persisted text accumulated so far.
    pub fn contents(&self) -> &str {
        &self.buffer
    }

    /// Length of the persisted text in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Console output goes through the echo when there is one.
    fn traces(&self) -> bool {
        self.echo.is_none()
    }

    fn record(&mut self, level: LogLevel, line: &str) {
        self.buffer.push_str(line);
        self.buffer.push('\n');
        self.emit(level, line);
    }

    fn emit(&self, level: LogLevel, line: &str) {
        if level < self.config.level {
            return;
        }
        if let Some(ref echo) = self.echo {
            if self.config.show_timestamps {
                let timestamp = Local::now().format("%H:%M:%S");
                echo(&format!("[{}] {}", timestamp, line));
            } else {
                echo(line);
            }
        }
    }
}

/// Format the per-window progress summary.
///
/// Shows the first three and last three probabilities of the window just
/// parsed, followed by the running maximum.
pub fn format_progress(window: Window, samples: &[Sample], p_max: f64) -> String {
    let head: Vec<String> = samples
        .iter()
        .take(3)
        .map(|s| format!("{:.3}", s.probability))
        .collect();
    let tail: Vec<String> = samples
        .iter()
        .skip(samples.len().saturating_sub(3))
        .map(|s| format!("{:.3}", s.probability))
        .collect();

    format!(
        "finished clock cycle block {}. P: [{}...{}]. Pmax: {:.3}",
        window,
        head.join(", "),
        tail.join(", "),
        p_max
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Writer collecting formatted `tracing` output.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn traced(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        captured.text()
    }

    fn capture() -> (EchoCallback, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&lines);
        let echo: EchoCallback = Arc::new(move |line: &str| {
            sink.lock().unwrap().push(line.to_string());
        });
        (echo, lines)
    }

    #[test]
    fn buffer_keeps_every_record() {
        let mut log = RunLog::new(LogConfig::default(), None);
        log.header("Simulation parameters:\n  Size: 2x2\n");
        log.info("window done");
        log.warn("window skipped");
        log.raw("+ Property P_0\n  Probability: 0.1");

        let text = log.contents();
        assert!(text.starts_with("Simulation parameters:\n  Size: 2x2\n"));
        assert!(text.contains("  [info]: window done\n"));
        assert!(text.contains("  [warning]: window skipped\n"));
        assert!(text.contains("\n+ Property P_0\n  Probability: 0.1\n"));
    }

    #[test]
    fn finish_appends_elapsed_line() {
        let mut log = RunLog::new(LogConfig::default(), None);
        log.header("Modest check parameters:");
        log.finish(Duration::from_millis(3_723_450));

        assert!(log
            .contents()
            .ends_with("\n\nTotal elapsed time: 01:02:03.45\n"));
    }

    #[test]
    fn echo_filters_by_level_and_skips_raw_output() {
        let (echo, lines) = capture();
        let mut log = RunLog::new(LogConfig::default(), Some(echo));

        log.info("progress");
        log.raw("raw trace line");
        log.notice("Starting run");

        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "  [info]: progress");
        assert_eq!(lines[1], "[status]: Starting run");
        assert!(!log.contents().contains("Starting run"));
    }

    #[test]
    fn echo_replaces_tracing_output() {
        let (echo, lines) = capture();
        let traced_with_echo = traced(|| {
            let mut log = RunLog::new(LogConfig::default(), Some(echo));
            log.info("block done");
            log.warn("block skipped");
        });
        assert!(!traced_with_echo.contains("block done"));
        assert!(!traced_with_echo.contains("block skipped"));
        assert_eq!(lines.lock().unwrap().len(), 2);

        let traced_without_echo = traced(|| {
            let mut log = RunLog::new(LogConfig::default(), None);
            log.info("block done");
            log.warn("block skipped");
        });
        assert!(traced_without_echo.contains("block done"));
        assert!(traced_without_echo.contains("block skipped"));
    }

    #[test]
    fn timestamps_stay_out_of_buffer() {
        let (echo, lines) = capture();
        let config = LogConfig {
            level: LogLevel::Info,
            show_timestamps: true,
        };
        let mut log = RunLog::new(config, Some(echo));
        log.info("progress");

        assert!(lines.lock().unwrap()[0].starts_with('['));
        assert_eq!(log.contents(), "  [info]: progress\n");
    }

    #[test]
    fn progress_shows_head_and_tail() {
        let samples: Vec<Sample> = (0..10)
            .map(|c| Sample::new(c, c as f64 / 10.0))
            .collect();
        let line = format_progress(Window::new(0, 9), &samples, 0.9);
        assert_eq!(
            line,
            "finished clock cycle block (0,9). P: [0.000, 0.100, 0.200...0.700, 0.800, 0.900]. Pmax: 0.900"
        );
    }

    #[test]
    fn progress_handles_short_windows() {
        let samples = vec![Sample::new(5, 0.5)];
        let line = format_progress(Window::new(5, 5), &samples, 0.75);
        assert_eq!(
            line,
            "finished clock cycle block (5,5). P: [0.500...0.500]. Pmax: 0.750"
        );
    }
}
