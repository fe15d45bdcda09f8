use crate::error::Result;
use crate::paths::SystemPaths;
use crate::patch;
use crate::runner::Runner;

/// (hdmi_group, hdmi_mode) for each supported resolution. Group 1 is CEA
/// (TV modes), group 2 is DMT (monitor modes).
fn hdmi_values(resolution: &str) -> Option<(u32, u32)> {
    Some(match resolution {
        "1024x768" => (2, 16),
        "720p" => (1, 4),
        "1080p" => (1, 16),
        "1440x900" => (2, 47),
        "1280x1024" => (2, 35),
        "1280x960" => (2, 32),
        "1280x800" => (2, 28),
        "800x600" => (2, 9),
        _ => return None,
    })
}

/// Forces the HDMI output to a fixed mode by uncommenting the stock
/// directives in the boot config.
#[derive(Debug, Clone)]
pub struct SetDisplay {
    pub resolution: String,
}

impl SetDisplay {
    /// The line substitutions for this resolution, or None for an
    /// unrecognized mode (which leaves the boot config byte-identical).
    pub fn substitutions(&self) -> Option<Vec<(String, String)>> {
        let (group, mode) = hdmi_values(&self.resolution)?;
        Some(vec![
            (
                "#hdmi_force_hotplug=1".to_string(),
                "hdmi_force_hotplug=1".to_string(),
            ),
            ("#hdmi_group=1".to_string(), format!("hdmi_group={group}")),
            ("#hdmi_mode=1".to_string(), format!("hdmi_mode={mode}")),
        ])
    }

    pub fn run(&self, paths: &SystemPaths, _runner: &Runner) -> Result<()> {
        let Some(subs) = self.substitutions() else {
            tracing::warn!(
                resolution = %self.resolution,
                "unrecognized display mode; {} untouched",
                paths.boot_config.display()
            );
            return Ok(());
        };

        let touched = patch::patch_lines(&paths.boot_config, &subs)?;
        tracing::info!(
            resolution = %self.resolution,
            touched,
            "patched {}",
            paths.boot_config.display()
        );
        Ok(())
    }
}
