//! Test fixture generation.
//!
//! [`FakeBackend`] writes a shell script that stands in for the real
//! backend executable. It answers per device address and appends one line
//! per call to `calls.log` in the fixture directory:
//!
//! ```text
//! <ip>|<model>|<passwd>|<arguments>
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Scripted backend in a temporary directory with automatic cleanup.
pub struct FakeBackend {
    dir: TempDir,
    script: PathBuf,
    config: PathBuf,
}

impl FakeBackend {
    /// Create an executable script that prints nothing for every device.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or script cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let script = dir.path().join("fake-backend.sh");
        let config = dir.path().join("config.toml");
        fs::write(&config, "").expect("Failed to write empty config");

        let body = format!(
            r#"#!/bin/sh
dir='{dir}'
ip=$(printf '%s\n' "$PYZKACCESS_CONNECT_CONNSTR" | sed -n 's/.*ipaddress=\([^,]*\).*/\1/p')
pw=$(printf '%s\n' "$PYZKACCESS_CONNECT_CONNSTR" | sed -n 's/.*passwd=\(.*\)$/\1/p')
printf '%s|%s|%s|%s\n' "$ip" "$PYZKACCESS_CONNECT_MODEL" "$pw" "$*" >> "$dir/calls.log"
if [ -f "$dir/$ip.err" ]; then
    cat "$dir/$ip.err" >&2
    exit 1
fi
if [ -f "$dir/$ip.out" ]; then
    cat "$dir/$ip.out"
fi
exit 0
"#,
            dir = dir.path().display()
        );
        fs::write(&script, body).expect("Failed to write fake backend");
        make_executable(&script);

        Self {
            dir,
            script,
            config,
        }
    }

    /// Print `payload` on stdout when called for `ip`.
    #[must_use]
    pub fn with_output(self, ip: &str, payload: &str) -> Self {
        fs::write(self.dir.path().join(format!("{ip}.out")), payload)
            .expect("Failed to write fake output");
        self
    }

    /// Print `message` on stderr and exit 1 when called for `ip`.
    #[must_use]
    pub fn with_error(self, ip: &str, message: &str) -> Self {
        fs::write(self.dir.path().join(format!("{ip}.err")), message)
            .expect("Failed to write fake error");
        self
    }

    /// Replace the (empty) config file.
    #[must_use]
    pub fn with_config(self, toml: &str) -> Self {
        fs::write(&self.config, toml).expect("Failed to write config");
        self
    }

    #[must_use]
    pub fn script(&self) -> &Path {
        &self.script
    }

    #[must_use]
    pub fn config(&self) -> &Path {
        &self.config
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Recorded calls, one entry per backend invocation.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("calls.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .expect("Failed to chmod fake backend");
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
