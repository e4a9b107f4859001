//! # mcserver
//!
//! Async supervisor for a Java game server process.
//!
//! This library owns one server process at a time and provides:
//! - Starting the server with fixed heap and `nogui` launch flags
//! - Graceful shutdown through the `stop` console command, with a forced
//!   kill once the stop window elapses
//! - Console command injection over the server stdin
//! - Log streaming from merged stdout/stderr as an async iterator
//!
//! ## Quick Start
//!
//! ```ignore
//! use mcserver::{ProcessSupervisor, Result, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ServerConfig::builder()
//!         .jar_path("server.jar")
//!         .working_directory("/srv/minecraft")
//!         .build()?;
//!
//!     let mut server = ProcessSupervisor::new(config);
//!     server.start().await?;
//!     server.send_command("say hello").await;
//!     server.stop().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming Logs
//!
//! ```ignore
//! use futures::StreamExt;
//!
//! let mut logs = server.stream_logs();
//! while let Some(line) = logs.next().await {
//!     println!("{}", line);
//! }
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events and never installs a subscriber; wire
//! one up in the application to see them.

pub mod config;
mod error;
pub mod process;
mod supervisor;

pub use error::{Error, Result};

// Re-export the main supervisor type at crate root
pub use supervisor::ProcessSupervisor;

// Re-export commonly used config types at crate root
pub use config::{HeapSize, ServerConfig, ServerConfigBuilder};

// Re-export commonly used process types at crate root
pub use process::{LogStream, DEFAULT_STOP_TIMEOUT, STOP_COMMAND};
