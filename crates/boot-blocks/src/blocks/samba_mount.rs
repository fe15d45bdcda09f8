use std::fs;

use crate::error::{Error, Result};
use crate::fragment::{self, Template};
use crate::paths::SystemPaths;
use crate::runner::Runner;

const FSTAB_ENTRY: Template = Template {
    body: "SMB-SERVER SMB-LOCAL cifs username=SMB-USER,password=SMB-PASSSMB-DOMAIN,file_mode=SMB-FILEMODE,dir_mode=SMB-DIRMODE,users,x-systemd.automount,noauto,user_xattr 0 0\n",
    placeholders: &[
        "SMB-SERVER",
        "SMB-LOCAL",
        "SMB-USER",
        "SMB-PASS",
        "SMB-DOMAIN",
        "SMB-FILEMODE",
        "SMB-DIRMODE",
    ],
};

/// Adds a CIFS share to the mount table and mounts it.
#[derive(Debug, Clone)]
pub struct SambaMount {
    pub server: String,
    pub local_dir: String,
    pub username: String,
    pub password: String,
    pub domain: String,
    pub file_mode: String,
    pub dir_mode: String,
}

impl SambaMount {
    /// The fstab line, or None when server or mount point is missing.
    /// An unset domain contributes nothing to the options list.
    pub fn fstab_entry(&self) -> Option<String> {
        if self.server.trim().is_empty() || self.local_dir.trim().is_empty() {
            return None;
        }
        let domain_opt = if self.domain.is_empty() {
            String::new()
        } else {
            format!(",domain={}", self.domain)
        };
        Some(FSTAB_ENTRY.render(&[
            ("SMB-SERVER", &self.server),
            ("SMB-LOCAL", &self.local_dir),
            ("SMB-USER", &self.username),
            ("SMB-PASS", &self.password),
            ("SMB-DOMAIN", &domain_opt),
            ("SMB-FILEMODE", &self.file_mode),
            ("SMB-DIRMODE", &self.dir_mode),
        ]))
    }

    pub fn run(&self, paths: &SystemPaths, runner: &Runner) -> Result<()> {
        let Some(entry) = self.fstab_entry() else {
            tracing::warn!("missing server or mount point; {} untouched", paths.fstab.display());
            return Ok(());
        };

        fs::create_dir_all(&self.local_dir).map_err(|e| {
            Error::msg(format!(
                "failed to create mount point {}: {e}",
                self.local_dir
            ))
        })?;

        if fragment::append_unless_present(&paths.fstab, &entry)? {
            tracing::info!(server = %self.server, "added share to {}", paths.fstab.display());
        } else {
            tracing::info!(server = %self.server, "share already in {}; append skipped", paths.fstab.display());
        }

        runner.run("mount", &["-a"])
    }
}
