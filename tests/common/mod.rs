//! Test utilities for mcserver integration tests.
//!
//! Instead of a real JVM, each test points `java_path` at a small `/bin/sh`
//! script. The script receives the usual launch arguments
//! (`-Xms.. -Xmx.. -jar server.jar nogui`) and runs in the temp directory.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use mcserver::{LogStream, ProcessSupervisor, ServerConfig, ServerConfigBuilder};
use tempfile::TempDir;

/// How long any single wait in a test may take before it is a failure.
pub const TEST_DEADLINE: Duration = Duration::from_secs(10);

/// Prints `Done!`, echoes each console line, exits cleanly on `stop`.
pub const CONSOLE_SERVER: &str = r#"
echo "Done!"
while IFS= read -r line; do
    echo "console: $line"
    if [ "$line" = "stop" ]; then
        echo "Stopping server"
        exit 0
    fi
done
"#;

/// Echoes console lines but never exits on `stop`.
pub const STUBBORN_SERVER: &str = r#"
echo "Done!"
while IFS= read -r line; do
    echo "ignoring $line"
done
"#;

/// Records the first 10 bytes of console input to `input.bin`.
pub const RECORDING_SERVER: &str = r#"
echo "ready"
dd bs=1 count=10 of=input.bin 2>/dev/null
echo "recorded"
while IFS= read -r line; do
    if [ "$line" = "stop" ]; then
        exit 0
    fi
done
"#;

/// Prints its arguments and working directory, then exits.
pub const ARGS_SERVER: &str = r#"
printf '%s\n' "$*"
pwd -P
"#;

/// Interleaves stdout and stderr, then exits.
pub const MIXED_OUTPUT_SERVER: &str = r#"
echo "out-1"
echo "err-1" >&2
echo "out-2"
echo "err-2" >&2
"#;

/// Writes two lines and exits.
pub const SHORT_LIVED_SERVER: &str = r#"
echo "A"
echo "B"
"#;

/// Never reads its console, so stdin fills up and writes block.
pub const WEDGED_SERVER: &str = r#"
echo "ready"
exec sleep 1000
"#;

/// Starts reading its console only after a second, then echoes each line.
pub const SLOW_CONSOLE_SERVER: &str = r#"
echo "ready"
sleep 1
while IFS= read -r line; do
    echo "console: $line"
done
"#;

/// Exits at once, leaving a background reader on the original stdin that
/// records anything written to it in `late.bin`.
pub const ORPHANED_CONSOLE_SERVER: &str = r#"
exec 3<&0
dd bs=1 count=5 of=late.bin <&3 >/dev/null 2>&1 &
exit 0
"#;

/// A fake java runtime backed by a shell script in a temp directory.
pub struct FakeRuntime {
    dir: TempDir,
    script: PathBuf,
}

impl FakeRuntime {
    /// Write `body` as an executable `/bin/sh` script.
    pub fn new(body: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let script = dir.path().join("fake-java");
        std::fs::write(&script, format!("#!/bin/sh\n{body}")).expect("write script");
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
            .expect("chmod script");
        Self { dir, script }
    }

    /// The server working directory.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Config builder with the fake runtime and temp working directory set.
    pub fn config(&self) -> ServerConfigBuilder {
        ServerConfig::builder()
            .jar_path("server.jar")
            .working_directory(self.dir.path())
            .java_path(&self.script)
    }

    /// A supervisor with default settings for this runtime.
    pub fn supervisor(&self) -> ProcessSupervisor {
        ProcessSupervisor::new(self.config().build().expect("valid config"))
    }

    /// A supervisor with a shortened stop window.
    pub fn supervisor_with_timeout(&self, timeout: Duration) -> ProcessSupervisor {
        let config = self
            .config()
            .stop_timeout(timeout)
            .build()
            .expect("valid config");
        ProcessSupervisor::new(config)
    }

    /// Read a file written by the script, empty if it does not exist.
    pub fn read_file(&self, name: &str) -> Vec<u8> {
        std::fs::read(self.dir.path().join(name)).unwrap_or_default()
    }
}

/// Start the server, retrying transient spawn errors.
///
/// A freshly written script can briefly fail to exec with ETXTBSY when
/// another test forks while the file is still open for writing.
pub async fn start(server: &mut ProcessSupervisor) -> bool {
    let mut last_err = None;
    for _ in 0..5 {
        match server.start().await {
            Ok(started) => return started,
            Err(e) => {
                last_err = Some(e);
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
        }
    }
    panic!("server failed to start: {:?}", last_err);
}

/// Read lines until one equals `needle`, returning everything read so far.
pub async fn read_until(logs: &mut LogStream, needle: &str) -> Vec<String> {
    let read = async {
        let mut lines = Vec::new();
        while let Some(line) = logs.next_line().await {
            let found = line == needle;
            lines.push(line);
            if found {
                return lines;
            }
        }
        panic!("log stream ended before {needle:?}; got {lines:?}");
    };
    tokio::time::timeout(TEST_DEADLINE, read)
        .await
        .unwrap_or_else(|_| panic!("timed out waiting for {needle:?}"))
}

/// Read the remaining lines until the stream ends.
pub async fn read_to_end(logs: LogStream) -> Vec<String> {
    use futures::StreamExt;

    tokio::time::timeout(TEST_DEADLINE, logs.collect::<Vec<_>>())
        .await
        .expect("timed out waiting for log stream to end")
}

/// A command far larger than the console pipe buffer.
pub fn oversized_command() -> String {
    "x".repeat(1 << 20)
}

/// Poll `is_running` until the server has exited on its own.
pub async fn wait_for_exit(server: &mut ProcessSupervisor) {
    let deadline = tokio::time::Instant::now() + TEST_DEADLINE;
    while server.is_running() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "server did not exit in time"
        );
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
