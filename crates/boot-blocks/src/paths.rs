use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

fn default_dhcpcd_conf() -> PathBuf {
    "/etc/dhcpcd.conf".into()
}

fn default_wpa_supplicant_conf() -> PathBuf {
    "/etc/wpa_supplicant/wpa_supplicant.conf".into()
}

fn default_fstab() -> PathBuf {
    "/etc/fstab".into()
}

fn default_boot_config() -> PathBuf {
    "/boot/config.txt".into()
}

fn default_manifest() -> PathBuf {
    "/boot/bootblocks/manifest.xml".into()
}

fn default_home() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| "/home/pi".into())
}

/// Every system file the blocks mutate, as an injected path. Defaults name
/// the well-known absolute locations; `--paths <toml>` overrides them and
/// tests root everything under a scratch directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SystemPaths {
    pub dhcpcd_conf: PathBuf,
    pub wpa_supplicant_conf: PathBuf,
    pub fstab: PathBuf,
    pub boot_config: PathBuf,
    pub manifest: PathBuf,
    pub home: PathBuf,
}

impl Default for SystemPaths {
    fn default() -> Self {
        Self {
            dhcpcd_conf: default_dhcpcd_conf(),
            wpa_supplicant_conf: default_wpa_supplicant_conf(),
            fstab: default_fstab(),
            boot_config: default_boot_config(),
            manifest: default_manifest(),
            home: default_home(),
        }
    }
}

impl SystemPaths {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .map_err(|e| Error::msg(format!("failed to read paths file {}: {e}", path.display())))?;
        toml::from_str(&data)
            .map_err(|e| Error::msg(format!("invalid paths file {}: {e}", path.display())))
    }

    /// Re-roots every default path under `root`. Absolute components are
    /// re-expressed relative to the root so nothing escapes it.
    pub fn rooted_at(root: &Path) -> Self {
        let defaults = Self::default();
        let reroot = |p: &Path| {
            let rel = p.strip_prefix("/").unwrap_or(p);
            root.join(rel)
        };
        Self {
            dhcpcd_conf: reroot(&defaults.dhcpcd_conf),
            wpa_supplicant_conf: reroot(&defaults.wpa_supplicant_conf),
            fstab: reroot(&defaults.fstab),
            boot_config: reroot(&defaults.boot_config),
            manifest: reroot(&defaults.manifest),
            home: root.join("home/pi"),
        }
    }

    pub fn ssh_dir(&self) -> PathBuf {
        self.home.join(".ssh")
    }

    pub fn authorized_keys(&self) -> PathBuf {
        self.ssh_dir().join("authorized_keys")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rooted_paths_stay_under_root() {
        let root = PathBuf::from("/tmp/blocks-root");
        let paths = SystemPaths::rooted_at(&root);
        assert_eq!(paths.dhcpcd_conf, root.join("etc/dhcpcd.conf"));
        assert_eq!(paths.boot_config, root.join("boot/config.txt"));
        assert_eq!(
            paths.authorized_keys(),
            root.join("home/pi/.ssh/authorized_keys")
        );
    }

    #[test]
    fn override_file_replaces_only_named_paths() {
        let parsed: SystemPaths =
            toml::from_str("fstab = \"/srv/etc/fstab\"\n").expect("parse overrides");
        assert_eq!(parsed.fstab, PathBuf::from("/srv/etc/fstab"));
        assert_eq!(parsed.boot_config, PathBuf::from("/boot/config.txt"));
    }
}
