//! Configuration for the supervised server.
//!
//! This module provides:
//!
//! - [`ServerConfig`] and [`ServerConfigBuilder`] for describing how the
//!   server is launched
//! - [`HeapSize`], a newtype for the opaque `-Xms`/`-Xmx` values
//!
//! # Example
//!
//! ```ignore
//! use mcserver::config::ServerConfig;
//!
//! let config = ServerConfig::builder()
//!     .jar_path("server.jar")
//!     .working_directory("/srv/minecraft")
//!     .max_memory("8G")
//!     .build()?;
//! ```
//!
//! Configurations can also be loaded with serde; only `jar_path` and
//! `working_directory` are required, the stop window is given in
//! milliseconds as `stop_timeout_ms`.

pub mod builder;
pub mod options;

pub use builder::{
    ServerConfig, ServerConfigBuilder, DEFAULT_JAVA_PATH, DEFAULT_MAX_MEMORY, DEFAULT_MIN_MEMORY,
};
pub use options::HeapSize;
