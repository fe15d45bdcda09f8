use std::fs;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Error, Result};
use crate::fragment;
use crate::paths::SystemPaths;
use crate::runner::Runner;

/// Appends an SSH public key to the user's `authorized_keys`, keeping the
/// directory and file modes sshd insists on.
#[derive(Debug, Clone)]
pub struct AuthorizeKey {
    pub public_key: String,
}

/// "<type> <base64-blob> [comment]" with a blob that actually decodes.
fn key_is_well_formed(key: &str) -> bool {
    let mut fields = key.split_whitespace();
    let Some(kind) = fields.next() else {
        return false;
    };
    let Some(blob) = fields.next() else {
        return false;
    };
    !kind.is_empty() && STANDARD.decode(blob).is_ok()
}

impl AuthorizeKey {
    pub fn run(&self, paths: &SystemPaths, _runner: &Runner) -> Result<()> {
        let key = self.public_key.trim();
        if key.is_empty() {
            tracing::warn!("no public key supplied; nothing written");
            return Ok(());
        }
        if !key_is_well_formed(key) {
            tracing::warn!("argument does not look like an SSH public key; nothing written");
            return Ok(());
        }

        let ssh_dir = paths.ssh_dir();
        fs::create_dir_all(&ssh_dir)
            .map_err(|e| Error::msg(format!("failed to create {}: {e}", ssh_dir.display())))?;
        set_mode(&ssh_dir, 0o700)?;

        let authorized_keys = paths.authorized_keys();
        let mut line = key.to_string();
        line.push('\n');
        if fragment::append_unless_present(&authorized_keys, &line)? {
            tracing::info!("appended key to {}", authorized_keys.display());
        } else {
            tracing::info!("key already in {}; append skipped", authorized_keys.display());
        }
        set_mode(&authorized_keys, 0o600)?;
        Ok(())
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(|e| {
        Error::msg(format!(
            "failed to set mode {:o} on {}: {e}",
            mode,
            path.display()
        ))
    })
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
