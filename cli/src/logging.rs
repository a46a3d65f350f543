//! Logging initialization.
//!
//! Logs go to stderr so stdout carries only command output. `RUST_LOG` sets the filter
//! (default `info`). When `LOG_FILE` is set, logs are appended there instead, as plain
//! text with span ids.

use std::io::Write;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::log_format::TextWithSpanIds;

pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,hyper_util=off"));

    match config::env_opt("LOG_FILE") {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?;
            let writer = std::sync::Mutex::new(StripAnsiWriter::new(file));
            let file_layer = tracing_subscriber::fmt::layer()
                .event_format(TextWithSpanIds::new())
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter);
            tracing_subscriber::registry().with(file_layer).init();
            tracing::info!(path = %path, "mvtgen logging to file");
        }
        None => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter);
            tracing_subscriber::registry().with(stderr_layer).init();
        }
    }
    Ok(())
}

/// Drops CSI escape sequences (`ESC [ params final`) so the log file stays plain text.
/// Other `ESC x` pairs are passed through.
struct StripAnsiWriter<W> {
    inner: W,
    pending: Vec<u8>,
}

impl<W: Write> StripAnsiWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            pending: Vec::with_capacity(16),
        }
    }

    fn flush_pending(&mut self) -> std::io::Result<()> {
        self.inner.write_all(&self.pending)?;
        self.pending.clear();
        Ok(())
    }
}

impl<W: Write> Write for StripAnsiWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut rest = buf;
        while let Some((&b, tail)) = rest.split_first() {
            match self.pending.len() {
                0 => match rest.iter().position(|&c| c == 0x1b) {
                    Some(i) => {
                        self.inner.write_all(&rest[..i])?;
                        self.pending.push(0x1b);
                        rest = &rest[i + 1..];
                        continue;
                    }
                    None => {
                        self.inner.write_all(rest)?;
                        break;
                    }
                },
                1 => {
                    self.pending.push(b);
                    if b != b'[' {
                        self.flush_pending()?;
                    }
                }
                _ => {
                    if (0x40..=0x7e).contains(&b) {
                        self.pending.clear();
                    } else if b.is_ascii_digit() || matches!(b, b';' | b'?' | b':') {
                        self.pending.push(b);
                        if self.pending.len() > 64 {
                            self.flush_pending()?;
                        }
                    } else {
                        self.flush_pending()?;
                        self.inner.write_all(&[b])?;
                    }
                }
            }
            rest = tail;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.pending.is_empty() {
            self.flush_pending()?;
        }
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(input: &[u8]) -> String {
        let mut w = StripAnsiWriter::new(Vec::new());
        w.write_all(input).unwrap();
        w.flush().unwrap();
        String::from_utf8(w.inner).unwrap()
    }

    #[test]
    fn removes_color_codes() {
        assert_eq!(strip(b"\x1b[32mINFO\x1b[0m ready"), "INFO ready");
    }

    #[test]
    fn keeps_plain_text_and_non_csi_escapes() {
        assert_eq!(strip(b"plain line\n"), "plain line\n");
        assert_eq!(strip(b"a\x1bxb"), "a\x1bxb");
    }

    #[test]
    fn sequence_split_across_writes() {
        let mut w = StripAnsiWriter::new(Vec::new());
        w.write_all(b"x\x1b[3").unwrap();
        w.write_all(b"1my").unwrap();
        w.flush().unwrap();
        assert_eq!(String::from_utf8(w.inner).unwrap(), "xy");
    }
}
