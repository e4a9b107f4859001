/// Errors that can occur when supervising a server process.
///
/// Most supervisor operations deliberately do not fail: a missing runtime is
/// reported by [`ProcessSupervisor::start`](crate::ProcessSupervisor::start)
/// returning `false`, console write failures are swallowed, and
/// [`stop`](crate::ProcessSupervisor::stop) always completes. The variants
/// below cover the remaining cases.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    // -------------------------------------------------------------------------
    // Configuration errors (detected at build() time)
    // -------------------------------------------------------------------------
    /// Invalid configuration provided to builder.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -------------------------------------------------------------------------
    // Spawn errors
    // -------------------------------------------------------------------------
    /// Java runtime not found or not executable.
    #[error("java runtime not found or not executable: {runtime}")]
    RuntimeNotFound { runtime: String },

    /// Failed to spawn the server process.
    #[error("failed to spawn server process: {0}")]
    ProcessSpawn(#[source] std::io::Error),

    // -------------------------------------------------------------------------
    // IO errors
    // -------------------------------------------------------------------------
    /// IO error setting up the server pipes.
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),
}

/// A specialized Result type for mcserver operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error.
    pub fn io(source: std::io::Error) -> Self {
        Self::Io(source)
    }

    /// Map a spawn failure, separating a missing runtime from other errors.
    pub(crate) fn spawn(source: std::io::Error, runtime: &str) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                Self::RuntimeNotFound {
                    runtime: runtime.to_string(),
                }
            }
            _ => Self::ProcessSpawn(source),
        }
    }

    /// Check if this error means the runtime could not be located or executed.
    pub fn is_launch_failure(&self) -> bool {
        matches!(self, Error::RuntimeNotFound { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
