//! Server configuration and builder.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use mcserver::ServerConfig;
//!
//! let config = ServerConfig::builder()
//!     .jar_path("server.jar")
//!     .working_directory("/srv/minecraft")
//!     .min_memory("1G")
//!     .max_memory("6G")
//!     .stop_timeout(Duration::from_secs(60))
//!     .build()?;
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::options::HeapSize;
use crate::process::DEFAULT_STOP_TIMEOUT;
use crate::{Error, Result};

/// Default minimum heap size.
pub const DEFAULT_MIN_MEMORY: &str = "2G";

/// Default maximum heap size.
pub const DEFAULT_MAX_MEMORY: &str = "4G";

/// Default runtime command, resolved through `PATH`.
pub const DEFAULT_JAVA_PATH: &str = "java";

/// Configuration for a supervised server.
///
/// Use [`ServerConfig::builder()`] to create a new configuration, or
/// deserialize one with serde. None of the values are validated: paths and
/// heap sizes are handed to the runtime as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub(crate) jar_path: PathBuf,
    pub(crate) working_directory: PathBuf,

    #[serde(default = "default_min_memory")]
    pub(crate) min_memory: HeapSize,
    #[serde(default = "default_max_memory")]
    pub(crate) max_memory: HeapSize,

    #[serde(default = "default_java_path")]
    pub(crate) java_path: PathBuf,

    #[serde(
        default = "default_stop_timeout",
        rename = "stop_timeout_ms",
        with = "duration_millis"
    )]
    pub(crate) stop_timeout: Duration,
}

fn default_min_memory() -> HeapSize {
    HeapSize::from(DEFAULT_MIN_MEMORY)
}

fn default_max_memory() -> HeapSize {
    HeapSize::from(DEFAULT_MAX_MEMORY)
}

fn default_java_path() -> PathBuf {
    PathBuf::from(DEFAULT_JAVA_PATH)
}

fn default_stop_timeout() -> Duration {
    DEFAULT_STOP_TIMEOUT
}

/// Durations as whole milliseconds. Finer values are rejected rather than
/// rounded so a config always reads back as written.
mod duration_millis {
    use std::time::Duration;

    use serde::{ser, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        if value.subsec_nanos() % 1_000_000 != 0 {
            return Err(ser::Error::custom(format!(
                "stop timeout {value:?} is not a whole number of milliseconds"
            )));
        }
        let millis = u64::try_from(value.as_millis())
            .map_err(|_| ser::Error::custom(format!("stop timeout {value:?} is too large")))?;
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

impl ServerConfig {
    /// Create a new builder for ServerConfig.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Path to the server archive passed after `-jar`.
    pub fn jar_path(&self) -> &Path {
        &self.jar_path
    }

    /// Directory the server runs in.
    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    /// Minimum heap size (`-Xms`).
    pub fn min_memory(&self) -> &HeapSize {
        &self.min_memory
    }

    /// Maximum heap size (`-Xmx`).
    pub fn max_memory(&self) -> &HeapSize {
        &self.max_memory
    }

    /// Runtime executable used to launch the server.
    pub fn java_path(&self) -> &Path {
        &self.java_path
    }

    /// How long [`stop`](crate::ProcessSupervisor::stop) waits before killing.
    pub fn stop_timeout(&self) -> Duration {
        self.stop_timeout
    }
}

/// Builder for [`ServerConfig`].
///
/// Only the jar path and working directory are required.
#[derive(Debug, Clone)]
pub struct ServerConfigBuilder {
    jar_path: Option<PathBuf>,
    working_directory: Option<PathBuf>,
    min_memory: HeapSize,
    max_memory: HeapSize,
    java_path: PathBuf,
    stop_timeout: Duration,
}

impl Default for ServerConfigBuilder {
    fn default() -> Self {
        Self {
            jar_path: None,
            working_directory: None,
            min_memory: default_min_memory(),
            max_memory: default_max_memory(),
            java_path: default_java_path(),
            stop_timeout: DEFAULT_STOP_TIMEOUT,
        }
    }
}

impl ServerConfigBuilder {
    /// Path to the server archive.
    pub fn jar_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.jar_path = Some(path.into());
        self
    }

    /// Working directory for the server process.
    pub fn working_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(path.into());
        self
    }

    /// Minimum heap size (default: `2G`).
    pub fn min_memory(mut self, size: impl Into<HeapSize>) -> Self {
        self.min_memory = size.into();
        self
    }

    /// Maximum heap size (default: `4G`).
    pub fn max_memory(mut self, size: impl Into<HeapSize>) -> Self {
        self.max_memory = size.into();
        self
    }

    /// Path to the java binary (default: search PATH for "java").
    pub fn java_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.java_path = path.into();
        self
    }

    /// Graceful-stop window before the server is killed (default: 30s).
    pub fn stop_timeout(mut self, duration: Duration) -> Self {
        self.stop_timeout = duration;
        self
    }

    /// Build the configuration.
    ///
    /// Fails only when a required field is missing. Paths are not checked
    /// for existence; a bad runtime path surfaces when the server is started.
    pub fn build(self) -> Result<ServerConfig> {
        let jar_path = self
            .jar_path
            .ok_or_else(|| Error::InvalidConfig("jar_path is required".into()))?;
        let working_directory = self
            .working_directory
            .ok_or_else(|| Error::InvalidConfig("working_directory is required".into()))?;

        Ok(ServerConfig {
            jar_path,
            working_directory,
            min_memory: self.min_memory,
            max_memory: self.max_memory,
            java_path: self.java_path,
            stop_timeout: self.stop_timeout,
        })
    }
}
