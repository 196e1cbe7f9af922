use super::Transport;
use crate::error::{RegistryError, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

pub(super) const ARIA2C: &str = "aria2c";

/// Delegates each download to an external `aria2c` process.  Its output
/// goes straight to our stdout/stderr.
#[derive(Debug, Clone)]
pub struct AriaTransport {
    executable: PathBuf,
}

impl AriaTransport {
    /// Locate `aria2c` on `PATH`.
    pub fn new() -> Result<Self> {
        let executable = locate_executable(ARIA2C).ok_or_else(|| {
            RegistryError::Transport(format!("failed to find {} executable", ARIA2C))
        })?;
        debug!(executable = %executable.display(), "using aria2c");
        Ok(Self { executable })
    }

    /// Use an explicit executable that accepts aria2c's arguments.
    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}

#[async_trait::async_trait]
impl Transport for AriaTransport {
    async fn download(&self, url: &str, output: &Path) -> Result<()> {
        let dir = output.parent().unwrap_or_else(|| Path::new("."));
        let file_name = output.file_name().ok_or_else(|| {
            RegistryError::Transport(format!("output path has no file name: {}", output.display()))
        })?;

        // aria2c never overwrites an existing file; it saves `<name>.1` instead.
        match tokio::fs::remove_file(output).await {
            Ok(()) => debug!(path = %output.display(), "removed previous blob file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        info!(%url, path = %output.display(), "delegating blob download to aria2c");
        let status = Command::new(&self.executable)
            .arg(url)
            .arg("--async-dns=false")
            .arg("--dir")
            .arg(dir)
            .arg("-o")
            .arg(file_name)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;

        if !status.success() {
            return Err(RegistryError::Transport(format!(
                "{} exited with {} for {}",
                self.executable.display(),
                status,
                url
            )));
        }
        Ok(())
    }
}

/// Resolve a bare executable name against `PATH`.
pub(super) fn locate_executable(name: impl AsRef<OsStr>) -> Option<PathBuf> {
    let name = name.as_ref();
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
