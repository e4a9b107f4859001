//! I/O primitives for talking to the server process.

use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Split};
use tokio::net::unix::pipe;
use tokio::process::ChildStdin;

/// Writes console commands to the server stdin.
///
/// Write failures never reach the caller. Once a write fails the pipe is
/// dropped and every later command is a no-op.
///
/// A send cancelled mid-write leaves part of a line in the pipe. The next
/// send terminates that fragment with a newline first so the new command
/// reaches the console on a line of its own.
pub struct ConsoleWriter {
    stdin: Option<ChildStdin>,
    partial_line: bool,
}

impl ConsoleWriter {
    /// Create a new writer from a child process stdin.
    pub fn new(stdin: Option<ChildStdin>) -> Self {
        Self {
            stdin,
            partial_line: false,
        }
    }

    /// Write `command` followed by a newline and flush it.
    pub async fn send(&mut self, command: &str) {
        let Some(stdin) = self.stdin.as_mut() else {
            return;
        };

        let line = format_line(command, self.partial_line);
        // Cleared only once the whole line is in the pipe.
        self.partial_line = true;
        let result = async {
            stdin.write_all(line.as_bytes()).await?;
            stdin.flush().await
        }
        .await;

        match result {
            Ok(()) => {
                self.partial_line = false;
                tracing::trace!(command, "console command sent");
            }
            Err(e) => {
                // A dead or crashing server makes the command moot.
                if e.kind() == ErrorKind::BrokenPipe {
                    tracing::debug!(command, "server closed its console; command dropped");
                } else {
                    tracing::warn!(command, error = %e, "failed to write console command");
                }
                self.stdin = None;
            }
        }
    }
}

/// A lazy stream of server log lines.
///
/// Reads the merged stdout/stderr pipe line by line. Each item has trailing
/// whitespace removed and invalid UTF-8 replaced. The stream ends when the
/// server closes its output, normally on exit.
///
/// Obtained from [`ProcessSupervisor::stream_logs`](crate::ProcessSupervisor::stream_logs).
pub struct LogStream {
    lines: Option<Split<BufReader<pipe::Receiver>>>,
}

impl LogStream {
    /// Create a stream reading from the output pipe.
    pub(crate) fn new(output: pipe::Receiver) -> Self {
        Self {
            lines: Some(BufReader::new(output).split(b'\n')),
        }
    }

    /// A stream that yields nothing.
    pub(crate) fn empty() -> Self {
        Self { lines: None }
    }

    /// Get the next log line.
    ///
    /// Returns `None` once the server has closed its output.
    pub async fn next_line(&mut self) -> Option<String> {
        futures::StreamExt::next(self).await
    }
}

impl futures::Stream for LogStream {
    type Item = String;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let Some(lines) = self.lines.as_mut() else {
            return Poll::Ready(None);
        };

        match ready!(Pin::new(lines).poll_next_segment(cx)) {
            Ok(Some(bytes)) => Poll::Ready(Some(decode_line(&bytes))),
            Ok(None) => {
                self.lines = None;
                Poll::Ready(None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read server output; ending log stream");
                self.lines = None;
                Poll::Ready(None)
            }
        }
    }
}

fn format_line(command: &str, after_partial_line: bool) -> String {
    if after_partial_line {
        format!("\n{command}\n")
    } else {
        format!("{command}\n")
    }
}

fn decode_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim_end().to_string()
}
