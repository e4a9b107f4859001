//! Process spawning and lifecycle management.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::net::unix::pipe;
use tokio::process::{Child, Command};

use super::io::{ConsoleWriter, LogStream};
use super::{NO_GUI_FLAG, STOP_COMMAND};
use crate::config::ServerConfig;
use crate::{Error, Result};

/// A running server process.
///
/// Owns the child, the console writer over its stdin, and the read end of
/// the merged stdout/stderr pipe until it is handed out as a [`LogStream`].
///
/// # Cancellation
///
/// The child is spawned with `kill_on_drop`, so dropping a `ServerProcess`
/// kills the server if it is still running.
pub struct ServerProcess {
    child: Child,
    console: ConsoleWriter,
    output: Option<pipe::Receiver>,
}

impl ServerProcess {
    /// Spawn the server described by `config`.
    ///
    /// stdout and stderr are both pointed at the write end of one pipe so the
    /// two streams keep their relative order.
    pub fn spawn(config: &ServerConfig) -> Result<Self> {
        let (sender, output) = pipe::pipe().map_err(Error::io)?;
        let writer = sender.into_blocking_fd().map_err(Error::io)?;
        let writer_for_stderr = writer.try_clone().map_err(Error::io)?;

        let mut cmd = build_command(config);
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::from(writer));
        cmd.stderr(Stdio::from(writer_for_stderr));
        cmd.kill_on_drop(true);

        let spawned = cmd.spawn();
        // The command holds our copies of the write end; the child has its
        // own. Ours must close or the log stream never sees end-of-stream.
        drop(cmd);

        let mut child =
            spawned.map_err(|e| Error::spawn(e, &config.java_path().display().to_string()))?;
        let stdin = child.stdin.take();

        Ok(Self {
            child,
            console: ConsoleWriter::new(stdin),
            output: Some(output),
        })
    }

    /// Get the process ID of the server, if it has not been reaped.
    pub fn pid(&self) -> Option<u32> {
        self.child.id()
    }

    /// Non-blocking exit check.
    ///
    /// Returns `Ok(Some(status))` once the server has exited.
    pub fn try_exit_status(&mut self) -> Result<Option<ExitStatus>> {
        self.child.try_wait().map_err(Error::io)
    }

    /// Console writer over the server stdin.
    pub fn console(&mut self) -> &mut ConsoleWriter {
        &mut self.console
    }

    /// Take the log stream from this process.
    ///
    /// The output pipe can only be taken once; later calls get an empty stream.
    pub fn take_log_stream(&mut self) -> LogStream {
        self.output
            .take()
            .map(LogStream::new)
            .unwrap_or_else(LogStream::empty)
    }

    /// Ask the server to stop, killing it if it has not exited within `timeout`.
    ///
    /// The deadline covers writing the stop command as well as the exit, so
    /// a server that no longer drains its console is still killed on time.
    /// Never fails: every error path ends in a kill attempt.
    pub async fn shutdown(&mut self, timeout: Duration) {
        let pid = self.pid();
        let graceful = async {
            self.console.send(STOP_COMMAND).await;
            self.child.wait().await
        };

        match tokio::time::timeout(timeout, graceful).await {
            Ok(Ok(status)) => {
                tracing::info!(?pid, %status, "server stopped");
                return;
            }
            Ok(Err(e)) => {
                tracing::warn!(?pid, error = %e, "failed to wait for server exit; killing");
            }
            Err(_) => {
                tracing::warn!(?pid, ?timeout, "server did not stop in time; killing");
            }
        }

        self.kill().await;
    }

    /// Kill the server immediately.
    pub async fn kill(&mut self) {
        let pid = self.pid();
        match self.child.kill().await {
            Ok(()) => tracing::info!(?pid, "server killed"),
            Err(e) => tracing::warn!(?pid, error = %e, "failed to kill server process"),
        }
    }
}

/// Build a tokio Command from the config.
fn build_command(config: &ServerConfig) -> Command {
    let mut cmd = Command::new(config.java_path());
    cmd.current_dir(config.working_directory());
    cmd.args(build_args(config));
    cmd
}

/// Build the runtime arguments: heap flags, the archive, and `nogui`.
fn build_args(config: &ServerConfig) -> Vec<String> {
    vec![
        config.min_memory().min_heap_flag(),
        config.max_memory().max_heap_flag(),
        "-jar".to_string(),
        config.jar_path().display().to_string(),
        NO_GUI_FLAG.to_string(),
    ]
}
