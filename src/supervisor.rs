//! Supervisor for a single game server process.
//!
//! This module provides [`ProcessSupervisor`], the main entry point of the
//! crate.
//!
//! # Example
//!
//! ```ignore
//! use futures::StreamExt;
//! use mcserver::{ProcessSupervisor, ServerConfig};
//!
//! let config = ServerConfig::builder()
//!     .jar_path("server.jar")
//!     .working_directory("/srv/minecraft")
//!     .build()?;
//!
//! let mut server = ProcessSupervisor::new(config);
//! if !server.start().await? {
//!     eprintln!("java not found");
//!     return Ok(());
//! }
//!
//! let mut logs = server.stream_logs();
//! tokio::spawn(async move {
//!     while let Some(line) = logs.next().await {
//!         println!("{line}");
//!     }
//! });
//!
//! server.send_command("say Restarting in 10 seconds").await;
//! server.stop().await;
//! ```

use crate::config::ServerConfig;
use crate::process::{LogStream, ServerProcess};
use crate::{Error, Result};

/// Owns at most one server process and drives its lifecycle.
///
/// The supervisor is either idle (no handle) or holds exactly one
/// [`ServerProcess`]. A process that exits on its own keeps its handle until
/// the next [`stop`](Self::stop) or [`start`](Self::start); until then
/// [`is_running`](Self::is_running) simply reports `false`.
///
/// # Concurrency
///
/// Lifecycle methods take `&mut self`, so at most one start/stop transition
/// can be in flight. The [`LogStream`] returned by
/// [`stream_logs`](Self::stream_logs) owns its end of the output pipe and can
/// be consumed on another task while commands are being sent.
pub struct ProcessSupervisor {
    config: ServerConfig,
    server: Option<ServerProcess>,
}

impl ProcessSupervisor {
    /// Create a supervisor for the given configuration. Nothing is spawned yet.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            server: None,
        }
    }

    /// Get a reference to the underlying config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Process ID of the current server, if there is one.
    pub fn pid(&self) -> Option<u32> {
        self.server.as_ref().and_then(ServerProcess::pid)
    }

    /// Check if the server is alive.
    ///
    /// True only while a handle exists and the process has not exited.
    pub fn is_running(&mut self) -> bool {
        let Some(server) = self.server.as_mut() else {
            return false;
        };

        match server.try_exit_status() {
            Ok(status) => status.is_none(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to query server exit status");
                false
            }
        }
    }

    /// Launch the server.
    ///
    /// Returns `Ok(false)` without spawning anything if the server is already
    /// running, or if the java runtime cannot be found or executed. Other
    /// spawn failures are returned as errors. No handle is kept on failure.
    pub async fn start(&mut self) -> Result<bool> {
        if self.is_running() {
            tracing::debug!(pid = ?self.pid(), "server already running; not starting another");
            return Ok(false);
        }

        match ServerProcess::spawn(&self.config) {
            Ok(server) => {
                tracing::info!(
                    pid = ?server.pid(),
                    runtime = %self.config.java_path().display(),
                    jar = %self.config.jar_path().display(),
                    "server started"
                );
                self.server = Some(server);
                Ok(true)
            }
            Err(e @ Error::RuntimeNotFound { .. }) => {
                tracing::warn!(error = %e, "could not launch server");
                self.server = None;
                Ok(false)
            }
            Err(e) => {
                self.server = None;
                Err(e)
            }
        }
    }

    /// Stop the server.
    ///
    /// Sends `stop` on the console and waits for the configured stop timeout
    /// (30 seconds by default), then kills the process. A server that already
    /// exited is not sent anything. The handle is always released when this
    /// returns.
    pub async fn stop(&mut self) {
        let Some(mut server) = self.server.take() else {
            return;
        };

        match server.try_exit_status() {
            Ok(Some(status)) => {
                tracing::debug!(%status, "server already exited");
                return;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "failed to query server exit status; stopping anyway");
            }
        }

        server.shutdown(self.config.stop_timeout()).await;
    }

    /// Send a command to the server console.
    ///
    /// The command is written with a trailing newline. Does nothing when no
    /// server is running or its console is closed; write failures are logged
    /// and otherwise ignored.
    ///
    /// Waits while the console pipe is full. Dropping the future early (for
    /// example under a timeout) can leave part of the command unsent; the
    /// next command is then preceded by a newline so it is not appended to
    /// the fragment.
    pub async fn send_command(&mut self, command: &str) {
        if let Some(server) = self.server.as_mut() {
            server.console().send(command).await;
        }
    }

    /// Stream the server output, one line at a time.
    ///
    /// The output pipe can be streamed only once per server start; without a
    /// server, or on a second call, the returned stream is empty.
    pub fn stream_logs(&mut self) -> LogStream {
        match self.server.as_mut() {
            Some(server) => server.take_log_stream(),
            None => LogStream::empty(),
        }
    }
}
