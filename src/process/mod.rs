//! Process management for the game server.
//!
//! This module handles spawning the server JVM and talking to it over its
//! standard streams.
//!
//! # Architecture
//!
//! ```text
//! mcserver                               java -jar server.jar
//! ┌───────────────┐                     ┌──────────────┐
//! │ ConsoleWriter │──stdin (commands)──▶│              │
//! │ LogStream     │◀──stdout + stderr───│              │
//! └───────────────┘     (one pipe)      └──────────────┘
//! ```
//!
//! # Input Protocol
//!
//! Newline-terminated console commands. [`STOP_COMMAND`] asks the server to
//! save and exit; anything else is passed through untouched.
//!
//! # Output Protocol
//!
//! stdout and stderr share a single pipe, so log lines arrive in the order
//! the server wrote them regardless of which stream they came from.

mod io;
mod spawn;

pub use io::LogStream;
pub(crate) use spawn::ServerProcess;

use std::time::Duration;

/// Console command that asks the server to shut down gracefully.
pub const STOP_COMMAND: &str = "stop";

/// How long a graceful stop may take before the server is killed.
pub const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(30);

/// Flag telling the server not to open its graphical console.
pub const NO_GUI_FLAG: &str = "nogui";
